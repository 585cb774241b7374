//! OctreeBuildParameter - construction limits for the static octree.

/// Construction limits for a static octree.
///
/// Immutable once passed to construction; stored on the tree for
/// inspection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OctreeBuildParameter {
	/// An octant holding at most this many items is not subdivided further.
	pub max_items_per_leaf: usize,
	/// Maximum subdivision depth (root is depth 0).
	pub max_depth: usize,
	/// An octant whose smallest extent falls below this is not subdivided.
	pub min_octant_size: f32,
	/// Build independent subtrees on rayon's thread pool. The resulting tree
	/// is identical to a serial build.
	pub parallel_build: bool,
}

impl OctreeBuildParameter {
	/// Default limits, suitable for point clouds up to a few million points.
	pub const DEFAULT: Self = Self {
		max_items_per_leaf: 8,
		max_depth: 32,
		min_octant_size: 1e-4,
		parallel_build: false,
	};

	/// Default limits with parallel construction enabled.
	pub const PARALLEL: Self = Self {
		parallel_build: true,
		..Self::DEFAULT
	};
}

impl Default for OctreeBuildParameter {
	fn default() -> Self {
		Self::DEFAULT
	}
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

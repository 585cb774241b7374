//! StaticOctree - one-time construction of the immutable spatial partition.
//!
//! Construction recursively subdivides the source's overall bound,
//! partitioning a shared object index array in place so every octant owns a
//! contiguous sub-range. Independent subtrees may build on rayon's thread
//! pool; the partition at each node is sequential and child subtrees merge
//! in fixed octant order, so serial and parallel builds produce identical
//! trees.

use rayon::prelude::*;
use smallvec::SmallVec;
use web_time::Instant;

use crate::bounds::Aabb;
use crate::octree::config::OctreeBuildParameter;
use crate::octree::octant::Octant;
use crate::octree::source::OctreeSource;

/// Nodes with at most this many items always build their subtrees serially;
/// forking smaller work onto the pool costs more than it saves.
const PARALLEL_BUILD_THRESHOLD: usize = 512;

/// Immutable spatial index over a fixed item collection.
///
/// Built once at construction; read-only afterwards. Queries share no
/// mutable state, so a finished tree may be queried concurrently from any
/// number of threads.
pub struct StaticOctree<S: OctreeSource> {
	source: S,
	/// Flat octant arena, root at index 0. Empty for an empty source.
	octants: Vec<Octant>,
	/// Permutation of `[0, N)` over the source's items, partitioned so each
	/// octant owns a contiguous sub-range.
	objects: Vec<u32>,
	parameter: OctreeBuildParameter,
	stats: OctreeStats,
}

impl<S: OctreeSource + Sync> StaticOctree<S> {
	/// Build the tree over `source`.
	///
	/// An empty source yields a valid, queryable empty tree: every query
	/// returns `false`.
	#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "octree::build"))]
	pub fn new(source: S, parameter: OctreeBuildParameter) -> Self {
		let build_start = Instant::now();

		let mut objects = source.object_indices();
		debug_assert_eq!(
			objects.len(),
			source.item_count(),
			"object index array must cover every item"
		);

		let octants = if objects.is_empty() {
			Vec::new()
		} else {
			let bound = source.max_bound();
			build_subtree(&source, &parameter, &mut objects, 0, bound, 0)
		};

		let stats = OctreeStats::gather(&octants, objects.len(), build_start.elapsed());
		#[cfg(feature = "tracing")]
		tracing::debug!(
			octants = stats.octant_count,
			leaves = stats.leaf_count,
			max_depth = stats.max_depth,
			build_us = stats.build_time_us,
			"octree built"
		);

		Self {
			source,
			octants,
			objects,
			parameter,
			stats,
		}
	}
}

impl<S: OctreeSource> StaticOctree<S> {
	/// The item source the tree was built over.
	#[inline]
	pub fn source(&self) -> &S {
		&self.source
	}

	/// The octant arena, root at index 0. Empty for an empty tree.
	#[inline]
	pub fn octants(&self) -> &[Octant] {
		&self.octants
	}

	/// The partitioned object index array.
	#[inline]
	pub fn objects(&self) -> &[u32] {
		&self.objects
	}

	/// Construction limits the tree was built with.
	#[inline]
	pub fn parameter(&self) -> &OctreeBuildParameter {
		&self.parameter
	}

	/// Statistics gathered during construction.
	#[inline]
	pub fn stats(&self) -> &OctreeStats {
		&self.stats
	}

	/// Number of indexed items.
	#[inline]
	pub fn item_count(&self) -> usize {
		self.objects.len()
	}

	/// Whether the tree indexes no items.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.objects.is_empty()
	}

	/// The bound covering all items, if the tree is non-empty.
	#[inline]
	pub fn max_bound(&self) -> Option<Aabb> {
		self.octants.first().map(|root| root.bound)
	}
}

/// One pending child subtree: a disjoint slice of the object index array
/// plus the bound it was partitioned into.
struct ChildTask<'a> {
	slot: u8,
	bound: Aabb,
	offset: u32,
	objects: &'a mut [u32],
}

/// Build the subtree for `objects`, returning an arena with the subtree
/// root at local index 0.
///
/// `offset` is the position of `objects` within the global index array, so
/// octant ranges are stored as global indices.
fn build_subtree<S: OctreeSource + Sync>(
	source: &S,
	parameter: &OctreeBuildParameter,
	objects: &mut [u32],
	offset: u32,
	bound: Aabb,
	depth: usize,
) -> Vec<Octant> {
	let item_count = objects.len();
	let mut root = Octant::new(bound, offset, offset + item_count as u32);

	let splittable = item_count > parameter.max_items_per_leaf
		&& depth < parameter.max_depth
		&& bound.size().min_element() >= parameter.min_octant_size;
	if !splittable {
		return vec![root];
	}

	// 8-way in-place partition: for each child octant in order, swap the
	// items its bound fully contains to the front of the remaining range.
	// First child wins when an item fits several (boundary ties); items no
	// single child contains stay with this octant.
	let mut child_lens = [0usize; 8];
	let mut cursor = 0usize;
	for slot in 0..8u8 {
		let child_bound = bound.octant(slot);
		let begin = cursor;
		for i in cursor..item_count {
			if source.bound_contains(&child_bound, objects[i]) {
				objects.swap(cursor, i);
				cursor += 1;
			}
		}
		child_lens[slot as usize] = cursor - begin;
	}

	// Leftovers [cursor, len) become this octant's direct items
	root.start = offset + cursor as u32;

	let mut tasks: SmallVec<[ChildTask<'_>; 8]> = SmallVec::new();
	let mut child_area = &mut objects[..cursor];
	let mut consumed = 0u32;
	for slot in 0..8u8 {
		let len = child_lens[slot as usize];
		let (slice, rest) = std::mem::take(&mut child_area).split_at_mut(len);
		child_area = rest;
		if len > 0 {
			tasks.push(ChildTask {
				slot,
				bound: bound.octant(slot),
				offset: offset + consumed,
				objects: slice,
			});
		}
		consumed += len as u32;
	}

	let build_task = |task: ChildTask<'_>| {
		let subtree = build_subtree(
			source,
			parameter,
			task.objects,
			task.offset,
			task.bound,
			depth + 1,
		);
		(task.slot, subtree)
	};
	let subtrees: Vec<(u8, Vec<Octant>)> =
		if parameter.parallel_build && item_count > PARALLEL_BUILD_THRESHOLD {
			tasks.into_vec().into_par_iter().map(build_task).collect()
		} else {
			tasks.into_iter().map(build_task).collect()
		};

	// Splice child subtrees into one arena. Fixed slot order keeps the arena
	// layout independent of the build mode.
	let total: usize = subtrees.iter().map(|(_, subtree)| subtree.len()).sum();
	let mut arena = Vec::with_capacity(1 + total);
	arena.push(root);
	for (slot, mut subtree) in subtrees {
		let base = arena.len() as u32;
		arena[0].set_child(slot, base);
		for octant in &mut subtree {
			octant.offset_children(base);
		}
		arena.append(&mut subtree);
	}
	arena
}

/// Statistics gathered while building a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OctreeStats {
	/// Total octants in the arena.
	pub octant_count: usize,
	/// Octants with no children.
	pub leaf_count: usize,
	/// Deepest octant (root is depth 0).
	pub max_depth: usize,
	/// Largest direct-item count over all leaves.
	pub max_leaf_items: usize,
	/// Number of indexed items.
	pub item_count: usize,
	/// Wall-clock construction time in microseconds.
	pub build_time_us: u64,
}

impl OctreeStats {
	fn gather(octants: &[Octant], item_count: usize, elapsed: std::time::Duration) -> Self {
		let mut stats = Self {
			octant_count: octants.len(),
			item_count,
			build_time_us: elapsed.as_micros() as u64,
			..Self::default()
		};
		let mut stack: Vec<(u32, usize)> = Vec::new();
		if !octants.is_empty() {
			stack.push((0, 0));
		}
		while let Some((index, depth)) = stack.pop() {
			let octant = &octants[index as usize];
			stats.max_depth = stats.max_depth.max(depth);
			if octant.is_leaf() {
				stats.leaf_count += 1;
				stats.max_leaf_items = stats.max_leaf_items.max(octant.count());
			}
			for child in octant.children() {
				stack.push((child, depth + 1));
			}
		}
		stats
	}
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;

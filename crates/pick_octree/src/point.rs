//! Static octree specialization for point clouds.
//!
//! Indexes a borrowed position slice for screen-space ray picking and
//! nearest-point sphere queries. Positions are never copied; the slice must
//! outlive the tree.

use glam::Vec3;

use crate::bounds::{Aabb, BoundingSphere};
use crate::hit::{keep_nearest, HitTestResult, ModelId};
use crate::octree::query::PickState;
use crate::octree::source::{OctreeSource, RayHitSource, SphereQuerySource};
use crate::octree::{OctreeBuildParameter, StaticOctree};

/// Inflation applied around each point so pure points present
/// nonzero-volume bounds to box and ray intersection tests.
const BOUND_OFFSET: f32 = 1e-3;

/// Borrowed point positions, indexable by the octree.
#[derive(Clone, Copy, Debug)]
pub struct PointSource<'a> {
	positions: &'a [Vec3],
}

impl<'a> PointSource<'a> {
	/// Wrap a position slice.
	pub fn new(positions: &'a [Vec3]) -> Self {
		Self { positions }
	}

	/// The backing positions.
	pub fn positions(&self) -> &'a [Vec3] {
		self.positions
	}
}

impl OctreeSource for PointSource<'_> {
	fn item_count(&self) -> usize {
		self.positions.len()
	}

	fn item_bound(&self, item: u32) -> Aabb {
		let p = self.positions[item as usize];
		Aabb::new(p - Vec3::splat(BOUND_OFFSET), p + Vec3::splat(BOUND_OFFSET))
	}

	fn bound_contains(&self, bound: &Aabb, item: u32) -> bool {
		// Exact containment, no epsilon: partitioning must be a pure function
		// of the positions
		bound.contains_point(self.positions[item as usize])
	}

	fn max_bound(&self) -> Aabb {
		Aabb::from_points(self.positions)
	}
}

impl RayHitSource for PointSource<'_> {
	fn hit_test_items(
		&self,
		items: &[u32],
		pick: &PickState,
		hits: &mut Vec<HitTestResult>,
	) -> bool {
		let mut best = HitTestResult::invalid();
		let mut is_hit = false;
		let mut tolerance = pick.hit_thickness;

		for &item in items {
			let v0 = self.positions[item as usize];
			let p0 = pick.screen_mvp.project_point3(v0);
			// Screen-space distance in logical pixels. NaN (point behind the
			// near plane) never qualifies.
			let d = (p0 - pick.click_point).length() / pick.dpi_scale;
			if pick.return_multiple {
				tolerance = pick.hit_thickness;
			}
			if d <= tolerance {
				// Single-hit mode narrows the tolerance to the best projected
				// distance seen so far
				tolerance = d;
				let point_ws = pick.model_matrix.transform_point3(v0);
				let result = HitTestResult {
					is_valid: true,
					distance: (pick.ray_ws.origin - point_ws).length(),
					point_hit: point_ws,
					tag: item,
					model: pick.model,
				};
				is_hit = true;
				if pick.return_multiple {
					hits.push(result);
				} else {
					best = result;
				}
			}
		}

		if pick.return_multiple {
			is_hit
		} else if is_hit {
			keep_nearest(hits, best)
		} else {
			false
		}
	}
}

impl SphereQuerySource for PointSource<'_> {
	fn nearest_in_items(
		&self,
		items: &[u32],
		sphere: &BoundingSphere,
		result: &mut Vec<HitTestResult>,
	) -> bool {
		let mut best = HitTestResult::invalid();
		let mut is_hit = false;

		for &item in items {
			let p = self.positions[item as usize];
			if sphere.contains_point(p) {
				let d = (p - sphere.center).length();
				if best.distance > d {
					best = HitTestResult {
						is_valid: true,
						distance: d,
						point_hit: p,
						tag: item,
						model: ModelId::default(),
					};
					is_hit = true;
				}
			}
		}

		if is_hit {
			keep_nearest(result, best)
		} else {
			false
		}
	}
}

/// Static octree over a borrowed point position array.
pub type StaticPointOctree<'a> = StaticOctree<PointSource<'a>>;

impl<'a> StaticOctree<PointSource<'a>> {
	/// Build a point octree over borrowed positions.
	pub fn from_points(positions: &'a [Vec3], parameter: OctreeBuildParameter) -> Self {
		StaticOctree::new(PointSource::new(positions), parameter)
	}
}

#[cfg(test)]
#[path = "point_test.rs"]
mod point_test;

//! Hit-testing and nearest-neighbor traversal over a built tree.
//!
//! Traversal is an explicit stack over the octant arena: an octant whose
//! bound fails the query's volume test is pruned together with its whole
//! subtree; otherwise its direct items run through the source's per-item
//! test and all children are pushed. Internal octants can own items
//! directly, so both steps happen at every visited node.

use glam::{Mat4, Vec3};

use crate::bounds::BoundingSphere;
use crate::context::HitTestContext;
use crate::hit::{HitTestResult, ModelId};
use crate::octree::source::{RayHitSource, SphereQuerySource};
use crate::octree::tree::StaticOctree;
use crate::ray::Ray;

/// Per-call traversal state for one top-level hit test.
///
/// Computed once when the query starts and threaded through the traversal.
/// Queries therefore share no mutable state: any number of picks may run
/// concurrently against the same tree.
#[derive(Clone, Copy, Debug)]
pub struct PickState {
	/// Pick ray in the space the tree was built in.
	pub ray_model: Ray,
	/// Pick ray in world space, for reporting hit distances.
	pub ray_ws: Ray,
	/// Model-to-world transform.
	pub model_matrix: Mat4,
	/// Combined model-to-screen transform (screen-view-projection x model).
	pub screen_mvp: Mat4,
	/// Pick point in physical pixels.
	pub click_point: Vec3,
	/// Scale between logical and physical pixels.
	pub dpi_scale: f32,
	/// Screen-space pick tolerance in logical pixels.
	pub hit_thickness: f32,
	/// Model handle reported in results.
	pub model: ModelId,
	/// Accumulate every qualifying item instead of only the nearest.
	pub return_multiple: bool,
}

impl PickState {
	fn new(
		context: &HitTestContext,
		model: ModelId,
		model_matrix: Mat4,
		hit_thickness: f32,
		return_multiple: bool,
	) -> Self {
		let dpi_scale = context.matrices.dpi_scale;
		Self {
			ray_model: context.ray_ws.transformed(&model_matrix.inverse()),
			ray_ws: context.ray_ws,
			model_matrix,
			screen_mvp: context.matrices.screen_view_projection * model_matrix,
			click_point: context.hit_point_sp.extend(1.0) * dpi_scale,
			dpi_scale,
			hit_thickness,
			model,
			return_multiple,
		}
	}
}

impl<S: RayHitSource> StaticOctree<S> {
	/// Single-hit ray pick.
	///
	/// Keeps only the minimum-distance qualifying match, accumulated into
	/// `hits[0]` under the [`crate::hit::keep_nearest`] policy. `hits` is
	/// appended to, never cleared: pass the same list when picking across
	/// many octrees and the best hit survives.
	///
	/// Returns `true` iff this call recorded a hit.
	pub fn hit_test(
		&self,
		context: &HitTestContext,
		model: ModelId,
		model_matrix: Mat4,
		hits: &mut Vec<HitTestResult>,
		hit_thickness: f32,
	) -> bool {
		let pick = PickState::new(context, model, model_matrix, hit_thickness, false);
		self.hit_test_inner(&pick, hits)
	}

	/// Multi-hit ray pick: appends every item within the pick tolerance.
	///
	/// Results are unsorted; sort by distance if order matters.
	pub fn hit_test_all(
		&self,
		context: &HitTestContext,
		model: ModelId,
		model_matrix: Mat4,
		hits: &mut Vec<HitTestResult>,
		hit_thickness: f32,
	) -> bool {
		let pick = PickState::new(context, model, model_matrix, hit_thickness, true);
		self.hit_test_inner(&pick, hits)
	}

	fn hit_test_inner(&self, pick: &PickState, hits: &mut Vec<HitTestResult>) -> bool {
		let octants = self.octants();
		let mut is_hit = false;
		let mut stack: Vec<u32> = Vec::with_capacity(64);
		if !octants.is_empty() {
			stack.push(0);
		}
		while let Some(index) = stack.pop() {
			let octant = &octants[index as usize];
			// Prune the whole subtree when the ray misses its bound
			if !pick.ray_model.intersects_aabb(&octant.bound) {
				continue;
			}
			if octant.count() > 0 {
				is_hit |= self
					.source()
					.hit_test_items(&self.objects()[octant.range()], pick, hits);
			}
			for child in octant.children() {
				stack.push(child);
			}
		}
		is_hit
	}
}

impl<S: SphereQuerySource> StaticOctree<S> {
	/// Find the point nearest to the sphere center among those the sphere
	/// contains, in the space the tree was built in.
	///
	/// Single-result accumulation into `result[0]`: a new match replaces the
	/// existing one only when strictly closer. Returns `true` iff this call
	/// updated `result`.
	pub fn find_nearest_point_by_sphere(
		&self,
		sphere: &BoundingSphere,
		result: &mut Vec<HitTestResult>,
	) -> bool {
		let octants = self.octants();
		let mut is_hit = false;
		let mut stack: Vec<u32> = Vec::with_capacity(64);
		if !octants.is_empty() {
			stack.push(0);
		}
		while let Some(index) = stack.pop() {
			let octant = &octants[index as usize];
			if octant.bound.disjoint_sphere(sphere) {
				continue;
			}
			if octant.count() > 0 {
				is_hit |= self
					.source()
					.nearest_in_items(&self.objects()[octant.range()], sphere, result);
			}
			for child in octant.children() {
				stack.push(child);
			}
		}
		is_hit
	}

	/// Find the point nearest to `point` within `radius`.
	pub fn find_nearest_point_from_point(
		&self,
		point: Vec3,
		radius: f32,
		result: &mut Vec<HitTestResult>,
	) -> bool {
		self.find_nearest_point_by_sphere(&BoundingSphere::new(point, radius), result)
	}
}

//! Capability traits supplying item data to the generic octree.
//!
//! The tree is parameterized over a source instead of subclassed per item
//! type: the three partitioning hooks plus the per-item query tests are
//! trait methods resolved statically, keeping dynamic dispatch out of the
//! traversal loop.

use crate::bounds::{Aabb, BoundingSphere};
use crate::hit::HitTestResult;
use crate::octree::query::PickState;

/// Item access the octree needs to partition a collection.
///
/// Implementations index items by `u32`; the octree reorders indices, never
/// the items themselves. `bound_contains` drives partitioning and must be a
/// pure function of its inputs so serial and parallel builds agree.
pub trait OctreeSource {
	/// Number of items in the collection.
	fn item_count(&self) -> usize;

	/// Bounding box of one item. Must have nonzero volume for degenerate
	/// items (points) so box and ray tests behave.
	fn item_bound(&self, item: u32) -> Aabb;

	/// Whether an item lies fully inside a candidate octant bound.
	fn bound_contains(&self, bound: &Aabb, item: u32) -> bool;

	/// Bounding box covering the whole collection.
	///
	/// Defaults to the union of all item bounds. Sources with cheaper exact
	/// bounds (e.g. a plain position scan) should override.
	fn max_bound(&self) -> Aabb {
		let mut bound = Aabb::empty();
		for item in 0..self.item_count() as u32 {
			let item_bound = self.item_bound(item);
			bound.encapsulate(item_bound.min);
			bound.encapsulate(item_bound.max);
		}
		bound
	}

	/// Initial object index array. The identity permutation by default.
	fn object_indices(&self) -> Vec<u32> {
		(0..self.item_count() as u32).collect()
	}
}

/// Per-item ray hit testing for sources that support screen-space picking.
pub trait RayHitSource: OctreeSource {
	/// Test the direct items of one octant against the pick.
	///
	/// `items` is the octant's slice of the object index array. Qualifying
	/// matches are accumulated into `hits` under the pick's single- or
	/// multi-hit policy. Returns `true` iff `hits` was updated.
	fn hit_test_items(
		&self,
		items: &[u32],
		pick: &PickState,
		hits: &mut Vec<HitTestResult>,
	) -> bool;
}

/// Per-item nearest-point search for sources that support sphere queries.
pub trait SphereQuerySource: OctreeSource {
	/// Scan the direct items of one octant for the point nearest to the
	/// sphere center, among those the sphere contains.
	///
	/// Follows the single-result policy of [`crate::hit::keep_nearest`]:
	/// `result[0]` is replaced only by a strictly closer match. Returns
	/// `true` iff `result` was updated.
	fn nearest_in_items(
		&self,
		items: &[u32],
		sphere: &BoundingSphere,
		result: &mut Vec<HitTestResult>,
	) -> bool;
}

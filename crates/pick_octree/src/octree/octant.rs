//! Octant - one node of the static octree arena.

use std::ops::Range;

use crate::bounds::Aabb;

/// Sentinel for an absent child slot.
pub(crate) const NO_CHILD: u32 = u32::MAX;

/// One node of the octree, covering an axis-aligned sub-region of space.
///
/// Octants are stored in a flat arena (`Vec<Octant>`, root at index 0) and
/// reference their children by arena index. `[start, end)` is the octant's
/// *direct* item range in the shared object index array: items it owns
/// itself, excluding items owned by descendants. For a leaf that is every
/// item in the subtree; for an internal node it is the items no single
/// child octant fully contains.
///
/// Never mutated after construction completes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Octant {
	/// Region of space covered by this octant. Fully contains the bounds of
	/// every item in the subtree rooted here.
	pub bound: Aabb,
	/// Start of the direct-item range in the object index array.
	pub start: u32,
	/// End (exclusive) of the direct-item range.
	pub end: u32,
	/// Arena indices of child octants, `NO_CHILD` where absent. Slot k covers
	/// `bound.octant(k)`.
	children: [u32; 8],
}

impl Octant {
	/// Create a childless octant over a direct-item range.
	pub(crate) fn new(bound: Aabb, start: u32, end: u32) -> Self {
		debug_assert!(start <= end, "octant range must not be inverted");
		Self {
			bound,
			start,
			end,
			children: [NO_CHILD; 8],
		}
	}

	/// Number of items this octant owns directly.
	#[inline]
	pub fn count(&self) -> usize {
		(self.end - self.start) as usize
	}

	/// Direct-item range, usable to index the object index array.
	#[inline]
	pub fn range(&self) -> Range<usize> {
		self.start as usize..self.end as usize
	}

	/// Whether this octant has no children.
	#[inline]
	pub fn is_leaf(&self) -> bool {
		self.children.iter().all(|&c| c == NO_CHILD)
	}

	/// Arena indices of the present children.
	#[inline]
	pub fn children(&self) -> impl Iterator<Item = u32> + '_ {
		self.children.iter().copied().filter(|&c| c != NO_CHILD)
	}

	/// Arena index of the child covering `bound.octant(slot)`, if present.
	#[inline]
	pub fn child(&self, slot: u8) -> Option<u32> {
		debug_assert!(slot < 8);
		let c = self.children[slot as usize];
		(c != NO_CHILD).then_some(c)
	}

	pub(crate) fn set_child(&mut self, slot: u8, arena_index: u32) {
		debug_assert!(slot < 8);
		debug_assert_eq!(self.children[slot as usize], NO_CHILD, "child slot set twice");
		self.children[slot as usize] = arena_index;
	}

	/// Shift all child references by `base` when splicing a subtree whose
	/// indices are local into the global arena.
	pub(crate) fn offset_children(&mut self, base: u32) {
		for c in &mut self.children {
			if *c != NO_CHILD {
				*c += base;
			}
		}
	}
}

//! Hit-test results and the single-hit accumulation policy.

use glam::Vec3;

/// Opaque handle identifying the model an octree was queried for.
///
/// The octree never interprets the value; it is reported back in results so
/// a caller picking across many models can tell hits apart.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct ModelId(pub u64);

/// One hit-test match.
///
/// References the caller's geometry by index (`tag`); the octree owns
/// neither the geometry nor the model it reports against.
#[derive(Clone, Copy, Debug)]
pub struct HitTestResult {
	/// Whether this result holds a real match.
	pub is_valid: bool,
	/// Distance from the query origin to the hit point.
	///
	/// World-space ray-origin distance for ray picks, Euclidean distance to
	/// the sphere center for nearest-point queries.
	pub distance: f32,
	/// Hit position. World space for ray picks, model space for
	/// nearest-point queries.
	pub point_hit: Vec3,
	/// Index of the hit item in the caller's original collection.
	pub tag: u32,
	/// Handle of the model the octree was queried for.
	pub model: ModelId,
}

impl HitTestResult {
	/// A placeholder result that loses every distance comparison.
	pub fn invalid() -> Self {
		Self {
			is_valid: false,
			distance: f32::MAX,
			point_hit: Vec3::ZERO,
			tag: 0,
			model: ModelId::default(),
		}
	}
}

impl Default for HitTestResult {
	fn default() -> Self {
		Self::invalid()
	}
}

/// Single-hit accumulation: keep only the nearest result in `hits[0]`.
///
/// Replaces `hits[0]` when `candidate` is strictly closer, appends when the
/// list is empty, and otherwise leaves the list untouched. The list is never
/// cleared here: callers accumulate the best hit across queries against many
/// octrees by passing the same list to each.
///
/// Returns `true` iff the list was updated.
pub fn keep_nearest(hits: &mut Vec<HitTestResult>, candidate: HitTestResult) -> bool {
	debug_assert!(candidate.is_valid, "only valid results may be accumulated");
	match hits.first_mut() {
		Some(best) => {
			if best.distance > candidate.distance {
				*best = candidate;
				true
			} else {
				false
			}
		}
		None => {
			hits.push(candidate);
			true
		}
	}
}

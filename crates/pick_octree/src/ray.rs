//! Pick ray and ray/box intersection.

use glam::{Mat4, Vec3};

use crate::bounds::Aabb;

/// Direction components smaller than this are treated as axis-parallel.
const PARALLEL_EPSILON: f32 = 1e-12;

/// A ray with an origin and a direction.
///
/// The direction is expected to be normalized; `transformed` re-normalizes
/// after applying a matrix so distances along the ray stay metric.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
	/// Ray origin.
	pub origin: Vec3,
	/// Ray direction (unit length).
	pub direction: Vec3,
}

impl Ray {
	/// Create a new ray.
	pub fn new(origin: Vec3, direction: Vec3) -> Self {
		Self { origin, direction }
	}

	/// Point at parametric distance `t` along the ray.
	#[inline]
	pub fn point_at(&self, t: f32) -> Vec3 {
		self.origin + self.direction * t
	}

	/// Transform the ray by a matrix (e.g. an inverse model matrix to move a
	/// world-space pick ray into model space).
	pub fn transformed(&self, matrix: &Mat4) -> Ray {
		Ray {
			origin: matrix.transform_point3(self.origin),
			direction: matrix.transform_vector3(self.direction).normalize_or_zero(),
		}
	}

	/// Slab test against an AABB.
	///
	/// Only intersections at t >= 0 count: boxes fully behind the origin miss.
	pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
		let mut t_min = 0.0f32;
		let mut t_max = f32::MAX;

		for axis in 0..3 {
			let origin = self.origin[axis];
			let dir = self.direction[axis];
			let lo = aabb.min[axis];
			let hi = aabb.max[axis];

			if dir.abs() < PARALLEL_EPSILON {
				// Ray parallel to this slab: miss unless the origin lies within it
				if origin < lo || origin > hi {
					return false;
				}
			} else {
				let inv = 1.0 / dir;
				let mut t0 = (lo - origin) * inv;
				let mut t1 = (hi - origin) * inv;
				if t0 > t1 {
					std::mem::swap(&mut t0, &mut t1);
				}
				t_min = t_min.max(t0);
				t_max = t_max.min(t1);
				if t_min > t_max {
					return false;
				}
			}
		}
		true
	}
}

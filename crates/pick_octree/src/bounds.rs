//! Axis-aligned bounding boxes and bounding spheres used by the octree.

use glam::Vec3;

/// Axis-aligned bounding box.
///
/// Intervals are closed on all axes: points on a face count as contained.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
	/// Minimum corner (inclusive).
	pub min: Vec3,
	/// Maximum corner (inclusive).
	pub max: Vec3,
}

impl Aabb {
	/// Create a new AABB from min and max corners.
	///
	/// # Panics
	/// Debug-asserts that min <= max on all axes.
	pub fn new(min: Vec3, max: Vec3) -> Self {
		debug_assert!(
			min.x <= max.x && min.y <= max.y && min.z <= max.z,
			"AABB min must be <= max on all axes"
		);
		Self { min, max }
	}

	/// Create an AABB with inverted extents (ready for encapsulation).
	pub fn empty() -> Self {
		Self {
			min: Vec3::INFINITY,
			max: Vec3::NEG_INFINITY,
		}
	}

	/// Smallest AABB enclosing all `points`.
	///
	/// Returns a degenerate box at the origin when `points` is empty.
	pub fn from_points(points: &[Vec3]) -> Self {
		if points.is_empty() {
			return Self {
				min: Vec3::ZERO,
				max: Vec3::ZERO,
			};
		}
		let mut aabb = Self::empty();
		for &p in points {
			aabb.encapsulate(p);
		}
		aabb
	}

	/// Grow the AABB to include a point.
	#[inline]
	pub fn encapsulate(&mut self, point: Vec3) {
		self.min = self.min.min(point);
		self.max = self.max.max(point);
	}

	/// Check if this AABB contains a point.
	#[inline]
	pub fn contains_point(&self, point: Vec3) -> bool {
		point.x >= self.min.x
			&& point.x <= self.max.x
			&& point.y >= self.min.y
			&& point.y <= self.max.y
			&& point.z >= self.min.z
			&& point.z <= self.max.z
	}

	/// Check if this AABB overlaps with another.
	///
	/// Two AABBs overlap if they share any interior or boundary points.
	#[inline]
	pub fn overlaps(&self, other: &Aabb) -> bool {
		self.min.x <= other.max.x
			&& self.max.x >= other.min.x
			&& self.min.y <= other.max.y
			&& self.max.y >= other.min.y
			&& self.min.z <= other.max.z
			&& self.max.z >= other.min.z
	}

	/// Check if `other` lies fully inside this AABB.
	#[inline]
	pub fn contains_aabb(&self, other: &Aabb) -> bool {
		self.contains_point(other.min) && self.contains_point(other.max)
	}

	/// Get the size of the AABB (max - min).
	#[inline]
	pub fn size(&self) -> Vec3 {
		self.max - self.min
	}

	/// Get the center of the AABB.
	#[inline]
	pub fn center(&self) -> Vec3 {
		(self.min + self.max) * 0.5
	}

	/// One of the 8 equal sub-boxes obtained by splitting at the center.
	///
	/// Octant bits follow the child-addressing convention:
	/// - bit 0: X half (0 = min side, 1 = max side)
	/// - bit 1: Y half
	/// - bit 2: Z half
	#[inline]
	pub fn octant(&self, index: u8) -> Aabb {
		debug_assert!(index < 8, "octant index must be in 0..8");
		let center = self.center();
		let min = Vec3::new(
			if index & 1 == 0 { self.min.x } else { center.x },
			if index & 2 == 0 { self.min.y } else { center.y },
			if index & 4 == 0 { self.min.z } else { center.z },
		);
		let max = Vec3::new(
			if index & 1 == 0 { center.x } else { self.max.x },
			if index & 2 == 0 { center.y } else { self.max.y },
			if index & 4 == 0 { center.z } else { self.max.z },
		);
		Aabb { min, max }
	}

	/// Squared distance from a point to the closest point on the box.
	///
	/// Zero when the point is inside.
	#[inline]
	pub fn distance_squared_to_point(&self, point: Vec3) -> f32 {
		let closest = point.clamp(self.min, self.max);
		(point - closest).length_squared()
	}

	/// Check if the box and a sphere share no points.
	#[inline]
	pub fn disjoint_sphere(&self, sphere: &BoundingSphere) -> bool {
		self.distance_squared_to_point(sphere.center) > sphere.radius * sphere.radius
	}
}

/// Bounding sphere for nearest-point range queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingSphere {
	/// Sphere center.
	pub center: Vec3,
	/// Sphere radius.
	pub radius: f32,
}

impl BoundingSphere {
	/// Create a new sphere.
	///
	/// # Panics
	/// Debug-asserts that the radius is non-negative.
	pub fn new(center: Vec3, radius: f32) -> Self {
		debug_assert!(radius >= 0.0, "sphere radius must be non-negative");
		Self { center, radius }
	}

	/// Check if the sphere contains a point (boundary counts as contained).
	#[inline]
	pub fn contains_point(&self, point: Vec3) -> bool {
		(point - self.center).length_squared() <= self.radius * self.radius
	}
}

use glam::{Mat4, Vec2, Vec3};

use super::*;
use crate::context::{HitTestContext, RenderMatrices};
use crate::ray::Ray;

/// Pick context with identity screen matrices: projected positions equal
/// model positions and the pick point is compared in the same space.
fn identity_context(ray_ws: Ray, hit_point_sp: Vec2) -> HitTestContext {
	HitTestContext::new(ray_ws, hit_point_sp, RenderMatrices::default())
}

fn diagonal_points() -> Vec<Vec3> {
	vec![Vec3::ZERO, Vec3::splat(1.0), Vec3::splat(2.0)]
}

fn build(points: &[Vec3]) -> StaticPointOctree<'_> {
	StaticPointOctree::from_points(points, OctreeBuildParameter::DEFAULT)
}

#[test]
fn test_single_hit_returns_nearest_point() {
	let points = diagonal_points();
	let octree = build(&points);

	// Ray passes through (1,1,1); generous tolerance qualifies all three
	let ray = Ray::new(Vec3::new(1.0, 1.0, -10.0), Vec3::Z);
	let context = identity_context(ray, Vec2::new(1.0, 1.0));
	let mut hits = Vec::new();

	assert!(octree.hit_test(&context, ModelId(3), Mat4::IDENTITY, &mut hits, 2.0));
	assert_eq!(hits.len(), 1);
	assert_eq!(hits[0].tag, 1);
	assert!(hits[0].is_valid);
	assert_eq!(hits[0].model, ModelId(3));
	assert_eq!(hits[0].point_hit, Vec3::splat(1.0));
	let expected = (ray.origin - Vec3::splat(1.0)).length();
	assert!((hits[0].distance - expected).abs() < 1e-5);
}

#[test]
fn test_single_hit_prefers_smaller_projected_distance() {
	let points = diagonal_points();
	let octree = build(&points);

	// Pick at the origin's screen position: (0,0,0) projects closest
	let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
	let context = identity_context(ray, Vec2::ZERO);
	let mut hits = Vec::new();

	assert!(octree.hit_test(&context, ModelId(0), Mat4::IDENTITY, &mut hits, 2.0));
	assert_eq!(hits[0].tag, 0);
}

#[test]
fn test_multi_hit_accumulates_all_within_tolerance() {
	let points = diagonal_points();
	let octree = build(&points);

	let ray = Ray::new(Vec3::new(1.0, 1.0, -10.0), Vec3::Z);
	let context = identity_context(ray, Vec2::new(1.0, 1.0));
	let mut hits = Vec::new();

	assert!(octree.hit_test_all(&context, ModelId(0), Mat4::IDENTITY, &mut hits, 2.0));
	assert_eq!(hits.len(), 3);
	let mut tags: Vec<u32> = hits.iter().map(|h| h.tag).collect();
	tags.sort_unstable();
	assert_eq!(tags, vec![0, 1, 2]);
}

#[test]
fn test_miss_outside_tolerance() {
	let points = diagonal_points();
	let octree = build(&points);

	let ray = Ray::new(Vec3::new(50.0, 50.0, -10.0), Vec3::Z);
	let context = identity_context(ray, Vec2::splat(50.0));
	let mut hits = Vec::new();

	assert!(!octree.hit_test(&context, ModelId(0), Mat4::IDENTITY, &mut hits, 2.0));
	assert!(hits.is_empty());
}

#[test]
fn test_empty_tree_never_hits() {
	let octree = StaticPointOctree::from_points(&[], OctreeBuildParameter::DEFAULT);

	let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
	let context = identity_context(ray, Vec2::ZERO);
	let mut hits = Vec::new();

	assert!(!octree.hit_test(&context, ModelId(0), Mat4::IDENTITY, &mut hits, 100.0));
	assert!(hits.is_empty());
	assert!(!octree.find_nearest_point_from_point(Vec3::ZERO, 100.0, &mut hits));
	assert!(hits.is_empty());
}

#[test]
fn test_model_matrix_is_applied() {
	let points = vec![Vec3::ZERO];
	let octree = build(&points);
	let model_matrix = Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0));

	// World-space ray through the translated point; the pick point sits at
	// its transformed screen position
	let ray = Ray::new(Vec3::new(10.0, 0.0, -10.0), Vec3::Z);
	let context = identity_context(ray, Vec2::new(10.0, 0.0));
	let mut hits = Vec::new();

	assert!(octree.hit_test(&context, ModelId(0), model_matrix, &mut hits, 2.0));
	assert_eq!(hits[0].point_hit, Vec3::new(10.0, 0.0, 0.0));
	assert!((hits[0].distance - 10.0).abs() < 1e-5);
}

#[test]
fn test_hits_accumulate_across_octrees() {
	let near_points = vec![Vec3::ZERO];
	let far_points = vec![Vec3::new(0.0, 0.0, 5.0)];
	let near = build(&near_points);
	let far = build(&far_points);

	let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
	let context = identity_context(ray, Vec2::ZERO);
	let mut hits = Vec::new();

	// Far octree first: both project within tolerance of the pick point,
	// but the far point is farther along the ray
	assert!(far.hit_test(&context, ModelId(2), Mat4::IDENTITY, &mut hits, 10.0));
	assert_eq!(hits[0].model, ModelId(2));

	// Near octree replaces the accumulated hit without clearing the list
	assert!(near.hit_test(&context, ModelId(1), Mat4::IDENTITY, &mut hits, 10.0));
	assert_eq!(hits.len(), 1);
	assert_eq!(hits[0].model, ModelId(1));

	// Querying the far octree again does not displace the nearer hit
	assert!(!far.hit_test(&context, ModelId(2), Mat4::IDENTITY, &mut hits, 10.0));
	assert_eq!(hits[0].model, ModelId(1));
}

#[test]
fn test_degenerate_projection_never_qualifies() {
	let points = diagonal_points();
	let octree = build(&points);

	// A zero screen matrix makes every projected distance NaN; NaN must not
	// pass the tolerance test
	let ray = Ray::new(Vec3::new(1.0, 1.0, -10.0), Vec3::Z);
	let matrices = RenderMatrices {
		screen_view_projection: Mat4::ZERO,
		dpi_scale: 1.0,
	};
	let context = HitTestContext::new(ray, Vec2::new(1.0, 1.0), matrices);
	let mut hits = Vec::new();

	assert!(!octree.hit_test(&context, ModelId(0), Mat4::IDENTITY, &mut hits, 100.0));
	assert!(hits.is_empty());
}

#[test]
fn test_dpi_scale_converts_pixel_distances() {
	let points = vec![Vec3::ZERO];
	let octree = build(&points);

	let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
	let matrices = RenderMatrices {
		screen_view_projection: Mat4::IDENTITY,
		dpi_scale: 2.0,
	};
	let context = HitTestContext::new(ray, Vec2::ZERO, matrices);
	let mut hits = Vec::new();

	// Projected distance is 2 physical pixels, 1 logical pixel after the
	// DPI division, inside the tolerance
	assert!(octree.hit_test(&context, ModelId(0), Mat4::IDENTITY, &mut hits, 1.0));
}

#[test]
fn test_nearest_by_sphere_keeps_closest() {
	let points = vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)];
	let octree = build(&points);

	let sphere = BoundingSphere::new(Vec3::ZERO, 3.0);
	let mut result = Vec::new();

	assert!(octree.find_nearest_point_by_sphere(&sphere, &mut result));
	assert_eq!(result.len(), 1);
	assert_eq!(result[0].tag, 0);
	assert!((result[0].distance - 1.0).abs() < 1e-6);
	assert_eq!(result[0].point_hit, Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn test_nearest_by_sphere_respects_radius() {
	let points = vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)];
	let octree = build(&points);
	let mut result = Vec::new();

	// Radius reaches only the first point
	assert!(octree.find_nearest_point_by_sphere(&BoundingSphere::new(Vec3::ZERO, 1.5), &mut result));
	assert_eq!(result[0].tag, 0);

	// Radius reaches nothing
	let mut empty = Vec::new();
	assert!(!octree.find_nearest_point_by_sphere(&BoundingSphere::new(Vec3::ZERO, 0.5), &mut empty));
	assert!(empty.is_empty());
}

#[test]
fn test_find_nearest_point_from_point() {
	let points = vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0)];
	let octree = build(&points);
	let mut result = Vec::new();

	assert!(octree.find_nearest_point_from_point(Vec3::ZERO, 5.0, &mut result));
	assert_eq!(result[0].tag, 0);
}

/// Deterministic pseudo-random points in the unit cube.
fn hashed_points(count: usize, seed: u32) -> Vec<Vec3> {
	let mut state = seed.wrapping_mul(747796405).wrapping_add(2891336453) | 1;
	let mut next_unit = move || {
		state ^= state << 13;
		state ^= state >> 17;
		state ^= state << 5;
		(state >> 8) as f32 / (1u32 << 24) as f32
	};
	(0..count)
		.map(|_| Vec3::new(next_unit(), next_unit(), next_unit()))
		.collect()
}

/// Direct items of every octant the ray intersects, mirroring the
/// subtree pruning the traversal contract guarantees: octants the ray
/// misses are skipped together with their whole subtree.
fn items_along_ray(octree: &StaticPointOctree<'_>, ray: &Ray) -> Vec<u32> {
	let mut items = Vec::new();
	let mut stack: Vec<u32> = Vec::new();
	if !octree.octants().is_empty() {
		stack.push(0);
	}
	while let Some(index) = stack.pop() {
		let octant = &octree.octants()[index as usize];
		if !ray.intersects_aabb(&octant.bound) {
			continue;
		}
		items.extend_from_slice(&octree.objects()[octant.range()]);
		for child in octant.children() {
			stack.push(child);
		}
	}
	items
}

/// Octree pick agrees with a brute-force scan over the octants the ray
/// reaches. Points in pruned octants are out of contract: the pick only
/// considers candidates whose octant bound the model-space ray intersects,
/// so the oracle scans exactly that set.
#[test]
fn test_pick_matches_brute_force() {
	let points = hashed_points(1_000, 2024);
	let octree = StaticPointOctree::from_points(
		&points,
		OctreeBuildParameter {
			max_items_per_leaf: 8,
			..OctreeBuildParameter::DEFAULT
		},
	);

	for (sx, sy) in [(0.2, 0.3), (0.5, 0.5), (0.9, 0.1), (0.35, 0.75)] {
		let click = Vec2::new(sx, sy);
		let ray = Ray::new(Vec3::new(sx, sy, -10.0), Vec3::Z);
		let context = identity_context(ray, click);
		let mut hits = Vec::new();

		assert!(octree.hit_test(&context, ModelId(0), Mat4::IDENTITY, &mut hits, 10.0));

		// Projected distance of the reported point must equal the brute-force
		// minimum over the reachable candidates (identity matrices: screen
		// position is the model position)
		let candidates = items_along_ray(&octree, &ray);
		assert!(!candidates.is_empty());
		let click3 = click.extend(1.0);
		let expected = candidates
			.iter()
			.map(|&item| (points[item as usize] - click3).length())
			.fold(f32::MAX, f32::min);
		let reported = (points[hits[0].tag as usize] - click3).length();
		assert!(
			(reported - expected).abs() < 1e-6,
			"octree picked a point {} away, reachable brute force found {}",
			reported,
			expected
		);
	}
}

/// Nearest-by-sphere agrees with a brute-force scan.
#[test]
fn test_nearest_matches_brute_force() {
	let points = hashed_points(1_000, 4096);
	let octree = StaticPointOctree::from_points(
		&points,
		OctreeBuildParameter {
			max_items_per_leaf: 8,
			..OctreeBuildParameter::DEFAULT
		},
	);

	for (cx, cy, cz) in [(0.5, 0.5, 0.5), (0.1, 0.9, 0.4), (1.2, 1.2, 1.2)] {
		let center = Vec3::new(cx, cy, cz);
		let sphere = BoundingSphere::new(center, 0.3);
		let mut result = Vec::new();

		let found = octree.find_nearest_point_by_sphere(&sphere, &mut result);

		let expected = points
			.iter()
			.map(|p| (*p - center).length())
			.filter(|&d| d <= sphere.radius)
			.fold(f32::MAX, f32::min);

		if expected == f32::MAX {
			assert!(!found);
			assert!(result.is_empty());
		} else {
			assert!(found);
			assert!((result[0].distance - expected).abs() < 1e-6);
		}
	}
}

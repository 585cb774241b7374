//! Pick context supplied by the rendering layer.
//!
//! The octree does not own a camera or a viewport. Callers pass the pieces
//! it needs for one pick: the world-space ray and the matrices required to
//! compare screen-space distances against the pick tolerance. Everything
//! else about the render context stays opaque to this crate.

use glam::{Mat4, Vec2};

use crate::ray::Ray;

/// Screen matrices needed for the screen-space pick-tolerance test.
#[derive(Clone, Copy, Debug)]
pub struct RenderMatrices {
	/// Combined world-to-screen transform (view, projection and viewport),
	/// producing pixel coordinates after perspective divide.
	pub screen_view_projection: Mat4,
	/// Display scale factor between logical and physical pixels.
	pub dpi_scale: f32,
}

impl Default for RenderMatrices {
	fn default() -> Self {
		Self {
			screen_view_projection: Mat4::IDENTITY,
			dpi_scale: 1.0,
		}
	}
}

/// Per-pick inputs shared by every octree queried for one pick.
#[derive(Clone, Copy, Debug)]
pub struct HitTestContext {
	/// Pick ray in world space.
	pub ray_ws: Ray,
	/// Pick location in screen space (logical pixels).
	pub hit_point_sp: Vec2,
	/// Matrices for the screen-space tolerance computation.
	pub matrices: RenderMatrices,
}

impl HitTestContext {
	/// Create a pick context.
	pub fn new(ray_ws: Ray, hit_point_sp: Vec2, matrices: RenderMatrices) -> Self {
		Self {
			ray_ws,
			hit_point_sp,
			matrices,
		}
	}
}

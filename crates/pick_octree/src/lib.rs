//! pick_octree - static spatial octree for hit-testing large point sets
//!
//! This crate provides an immutable octree built once over a fixed item
//! collection, for screen-space ray picking and nearest-neighbor sphere
//! queries. Octants reference contiguous ranges of a shared, reordered
//! index array, so the caller's geometry is never moved or copied.
//!
//! # Features
//!
//! - **One-time construction**: optional parallel subtree builds via rayon,
//!   with results identical to a serial build
//! - **Screen-space picking**: per-point pick tolerance measured in pixels
//!   through a caller-supplied view-projection transform
//! - **Nearest-point queries**: sphere-pruned minimum-distance search
//! - **Concurrent queries**: a built tree is read-only; picks carry their
//!   state in a per-call context and may run from any number of threads
//!
//! # Example
//!
//! ```ignore
//! use glam::{Mat4, Vec2, Vec3};
//! use pick_octree::{
//!   HitTestContext, ModelId, OctreeBuildParameter, Ray, RenderMatrices,
//!   StaticPointOctree,
//! };
//!
//! let positions: Vec<Vec3> = load_point_cloud();
//! let octree = StaticPointOctree::from_points(&positions, OctreeBuildParameter::PARALLEL);
//!
//! let context = HitTestContext::new(
//!   Ray::new(camera_pos, pick_dir),
//!   cursor_px,
//!   RenderMatrices { screen_view_projection, dpi_scale },
//! );
//! let mut hits = Vec::new();
//! if octree.hit_test(&context, ModelId(0), Mat4::IDENTITY, &mut hits, 4.0) {
//!   println!("picked point #{}", hits[0].tag);
//! }
//! ```

pub mod bounds;
pub mod context;
pub mod hit;
pub mod ray;

// Re-export commonly used items
pub use bounds::{Aabb, BoundingSphere};
pub use context::{HitTestContext, RenderMatrices};
pub use hit::{keep_nearest, HitTestResult, ModelId};
pub use ray::Ray;

// Generic octree: arena, construction, traversal
pub mod octree;
pub use octree::{
	Octant, OctreeBuildParameter, OctreeSource, OctreeStats, PickState, RayHitSource,
	SphereQuerySource, StaticOctree,
};

// Point-cloud specialization
pub mod point;
pub use point::{PointSource, StaticPointOctree};

//! Static spatial octree for hit-testing and nearest-neighbor queries.
//!
//! The tree is built once over a fixed item collection and is immutable
//! afterwards. Octants live in a flat arena and reference contiguous ranges
//! of a shared, reordered object index array, so the original geometry is
//! never moved or copied. A changed collection requires building a new tree.
//!
//! # Module Structure
//!
//! - [`config`]: `OctreeBuildParameter` - construction limits
//! - [`source`]: capability traits supplying item bounds and per-item tests
//! - [`octant`]: `Octant` - one arena node
//! - [`tree`]: `StaticOctree` - construction and build statistics
//! - [`query`]: ray hit-testing and nearest-by-sphere traversal

pub mod config;
pub mod octant;
pub mod query;
pub mod source;
pub mod tree;

// Re-exports
pub use config::OctreeBuildParameter;
pub use octant::Octant;
pub use query::PickState;
pub use source::{OctreeSource, RayHitSource, SphereQuerySource};
pub use tree::{OctreeStats, StaticOctree};

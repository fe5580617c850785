//! Culling
//!
//! A CullVisitor fills a scene's item and light lists with the contributions
//! of the entities its camera can see. The CullDriver runs one visitor over
//! a set of scenes once per frame.

mod cull_visitor;
mod brute_force_cull_visitor;
mod spatial_cull_visitor;
mod cull_driver;

pub use cull_visitor::CullVisitor;
pub use brute_force_cull_visitor::BruteForceCullVisitor;
pub use spatial_cull_visitor::SpatialCullVisitor;
pub use cull_driver::CullDriver;

#[cfg(test)]
#[path = "cull_tests.rs"]
mod tests;

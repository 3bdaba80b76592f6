//! Fixed-Step Integration
//!
//! [`integrate`] advances any [`EcosystemDynamics`] model with classic RK4,
//! applying scheduled events at step boundaries, and returns the run as a
//! read-only [`Trajectory`].
//!
//! [`EcosystemDynamics`]: crate::systems::EcosystemDynamics

pub mod integrator;
pub mod trajectory;

pub use integrator::{integrate, POPULATION_BOUND};
pub use trajectory::Trajectory;

//! Population Dynamics Models
//!
//! Two models share one integration seam ([`EcosystemDynamics`]):
//!
//! - [`PairDynamics`]: the classic two-species Lotka-Volterra equations
//! - [`WebDynamics`]: generalized Lotka-Volterra over a [`FoodWeb`]
//!   interaction graph
//!
//! [`FoodWeb`]: crate::model::FoodWeb

pub mod pair;
pub mod traits;
pub mod web;

pub use pair::{PairDynamics, PREDATOR_ID, PREY_ID};
pub use traits::EcosystemDynamics;
pub use web::WebDynamics;

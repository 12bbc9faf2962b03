//! Lagrangian differentiation and manipulator-form extraction

mod error;
mod extract;
pub mod lagrange;
mod numeric;

pub use error::ExtractionError;
pub use extract::{Dynamics, Exhaustiveness};
pub use lagrange::{collection_order, equations_of_motion, euler_lagrange};
pub use numeric::NumericDynamics;

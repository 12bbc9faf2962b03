use thiserror::Error;

/// Errors raised while splitting equations of motion into M, H and G
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// An acceleration coefficient still depends on an acceleration
    #[error("Equation {equation} is not linear in the acceleration of '{coordinate}'")]
    NonLinearAcceleration { equation: usize, coordinate: String },

    /// Terms that belong to neither the velocity nor the gravity term
    #[error("Equation {equation} has terms outside M, H and G: {terms}")]
    Unclassified { equation: usize, terms: String },
}

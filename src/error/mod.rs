use thiserror::Error;

use crate::dynamics::ExtractionError;
use crate::model::ModelError;
use crate::results::ResultLogError;
use crate::symbolic::SymbolicError;

#[derive(Error, Debug)]
pub enum EomError {
    #[error("Error in the arm model: {0}")]
    Model(#[from] ModelError),
    #[error("Error in symbolic evaluation: {0}")]
    Symbolic(#[from] SymbolicError),
    #[error("Error extracting M, H and G: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("Error reading the result log: {0}")]
    ResultLog(#[from] ResultLogError),
}

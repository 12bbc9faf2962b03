//! Symbolic layer error types

use thiserror::Error;

use crate::symbolic::atom::Atom;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SymbolicError {
    /// A symbol had no value during numeric evaluation
    #[error("Unbound symbol '{symbol}' in numeric evaluation")]
    Unbound { symbol: String },
}

impl SymbolicError {
    pub fn unbound(atom: &Atom) -> Self {
        Self::Unbound {
            symbol: atom.to_string(),
        }
    }
}

use std::collections::HashMap;

use crate::symbolic::atom::Atom;
use crate::symbolic::error::SymbolicError;
use crate::symbolic::expr::Expr;

/// Numeric values for parameters and coordinates, used to evaluate expressions.
///
/// A coordinate carries its value followed by as many time derivatives as are
/// known: `[q, q̇, q̈]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    params: HashMap<String, f64>,
    coordinates: HashMap<String, Vec<f64>>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set_param(name, value);
        self
    }

    pub fn coordinate(mut self, name: impl Into<String>, q: f64, dq: f64, ddq: f64) -> Self {
        self.set_coordinate(name, vec![q, dq, ddq]);
        self
    }

    pub fn set_param(&mut self, name: impl Into<String>, value: f64) {
        self.params.insert(name.into(), value);
    }

    pub fn set_coordinate(&mut self, name: impl Into<String>, derivatives: Vec<f64>) {
        self.coordinates.insert(name.into(), derivatives);
    }

    pub fn value(&self, atom: &Atom) -> Option<f64> {
        match atom {
            Atom::Param(name) => self.params.get(name).copied(),
            Atom::Coord { name, order } => self
                .coordinates
                .get(name)
                .and_then(|values| values.get(*order as usize))
                .copied(),
            Atom::Sin(name) => self.angle(name).map(f64::sin),
            Atom::Cos(name) => self.angle(name).map(f64::cos),
        }
    }

    fn angle(&self, name: &str) -> Option<f64> {
        self.coordinates
            .get(name)
            .and_then(|values| values.first())
            .copied()
    }
}

impl Expr {
    /// Evaluates the polynomial; every atom it contains must be bound.
    pub fn eval(&self, bindings: &Bindings) -> Result<f64, SymbolicError> {
        let mut total = 0.0;
        for (monomial, coefficient) in self.terms() {
            let mut term = *coefficient.numer() as f64 / *coefficient.denom() as f64;
            for (atom, power) in monomial.factors() {
                let value = bindings
                    .value(atom)
                    .ok_or_else(|| SymbolicError::unbound(atom))?;
                term *= value.powi(power as i32);
            }
            total += term;
        }
        Ok(total)
    }
}

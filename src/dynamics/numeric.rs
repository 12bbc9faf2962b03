use nalgebra::{DMatrix, DVector};

use crate::dynamics::extract::Dynamics;
use crate::symbolic::{Bindings, SymbolicError};

/// M, H and G evaluated at one state
#[derive(Debug, Clone, PartialEq)]
pub struct NumericDynamics {
    pub mass: DMatrix<f64>,
    pub velocity: DVector<f64>,
    pub gravity: DVector<f64>,
}

impl NumericDynamics {
    /// Inverse dynamics, `τ = M·q̈ + H + G`
    pub fn torque(&self, acceleration: &DVector<f64>) -> DVector<f64> {
        &self.mass * acceleration + &self.velocity + &self.gravity
    }
}

impl Dynamics {
    /// Evaluates every term at the state and parameter values in `bindings`.
    ///
    /// Accelerations do not need to be bound; no term depends on them.
    pub fn evaluate(&self, bindings: &Bindings) -> Result<NumericDynamics, SymbolicError> {
        let n = self.dof();
        let mut mass = DMatrix::zeros(n, n);
        let mut velocity = DVector::zeros(n);
        let mut gravity = DVector::zeros(n);
        for i in 0..n {
            for j in 0..n {
                mass[(i, j)] = self.mass[i][j].eval(bindings)?;
            }
            velocity[i] = self.velocity[i].eval(bindings)?;
            gravity[i] = self.gravity[i].eval(bindings)?;
        }
        Ok(NumericDynamics {
            mass,
            velocity,
            gravity,
        })
    }
}

use crate::dynamics::error::ExtractionError;
use crate::symbolic::{Atom, Expr, Monomial};

/// What to do with terms that fit neither the velocity nor the gravity term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Exhaustiveness {
    /// Fail the extraction
    #[default]
    Strict,
    /// Keep them aside in [`Dynamics::residual`] and log a warning
    Lenient,
}

/// Equations of motion in manipulator form `M(q)·q̈ + H(q, q̇) + G(q) = τ`
#[derive(Debug, Clone, PartialEq)]
pub struct Dynamics {
    pub coordinates: Vec<String>,
    /// `mass[i][j]` is the coefficient of `q̈j` in equation `i`
    pub mass: Vec<Vec<Expr>>,
    pub velocity: Vec<Expr>,
    pub gravity: Vec<Expr>,
    /// Terms set aside under [`Exhaustiveness::Lenient`]; all zero otherwise
    pub residual: Vec<Expr>,
}

fn depends_on_rate(monomial: &Monomial) -> bool {
    monomial.any(|atom| matches!(atom, Atom::Coord { order, .. } if *order >= 1))
}

fn depends_on_acceleration(expr: &Expr) -> bool {
    expr.atoms()
        .iter()
        .any(|atom| matches!(atom, Atom::Coord { order, .. } if *order >= 2))
}

impl Dynamics {
    /// Splits each equation into exact coefficients.
    ///
    /// `M[i][j] = ∂eq_i/∂q̈j`. What remains after removing `Σ M[i][j]·q̈j` is split
    /// by whether a monomial carries a velocity (H) or not (G). Position-only
    /// terms without the gravity symbol, and velocity terms with it, are the
    /// residual handled according to `policy`.
    pub fn extract(
        equations: &[Expr],
        coordinates: &[String],
        gravity: &Atom,
        policy: Exhaustiveness,
    ) -> Result<Self, ExtractionError> {
        let accelerations: Vec<Atom> = coordinates.iter().map(Atom::acceleration).collect();

        let mut dynamics = Dynamics {
            coordinates: coordinates.to_vec(),
            mass: Vec::with_capacity(equations.len()),
            velocity: Vec::with_capacity(equations.len()),
            gravity: Vec::with_capacity(equations.len()),
            residual: Vec::with_capacity(equations.len()),
        };

        for (i, equation) in equations.iter().enumerate() {
            let mut rest = equation.clone();
            let mut row = Vec::with_capacity(accelerations.len());
            for (acceleration, coordinate) in accelerations.iter().zip(coordinates) {
                let coefficient = equation.diff(acceleration);
                if depends_on_acceleration(&coefficient) {
                    return Err(ExtractionError::NonLinearAcceleration {
                        equation: i + 1,
                        coordinate: coordinate.clone(),
                    });
                }
                rest -= &coefficient * &Expr::atom(acceleration.clone());
                row.push(coefficient);
            }

            let velocity_part = rest.filter(depends_on_rate);
            let position_part = rest.filter(|m| !depends_on_rate(m));

            let residual = position_part.filter(|m| !m.contains(gravity))
                + velocity_part.filter(|m| m.contains(gravity));
            if !residual.is_zero() {
                match policy {
                    Exhaustiveness::Strict => {
                        return Err(ExtractionError::Unclassified {
                            equation: i + 1,
                            terms: residual.to_string(),
                        });
                    }
                    Exhaustiveness::Lenient => {
                        tracing::warn!(
                            "Equation {} has {} unclassified term(s): {}",
                            i + 1,
                            residual.len(),
                            residual
                        );
                    }
                }
            }

            dynamics.mass.push(row);
            dynamics
                .velocity
                .push(velocity_part.filter(|m| !m.contains(gravity)));
            dynamics
                .gravity
                .push(position_part.filter(|m| m.contains(gravity)));
            dynamics.residual.push(residual);
        }

        Ok(dynamics)
    }

    /// Degrees of freedom
    pub fn dof(&self) -> usize {
        self.coordinates.len()
    }

    /// Whether `M[i][j] == M[j][i]` holds structurally for every pair
    pub fn is_symmetric(&self) -> bool {
        (0..self.dof()).all(|i| (0..i).all(|j| self.mass[i][j] == self.mass[j][i]))
    }

    /// `M·q̈ + H + G + residual`, one expression per coordinate.
    ///
    /// Equals the equations the dynamics were extracted from.
    pub fn reassemble(&self) -> Vec<Expr> {
        (0..self.dof())
            .map(|i| {
                let mut total = &self.velocity[i] + &self.gravity[i];
                total += &self.residual[i];
                for (j, coordinate) in self.coordinates.iter().enumerate() {
                    total += &self.mass[i][j] * &Expr::acceleration(coordinate.clone());
                }
                total
            })
            .collect()
    }

    /// Replaces `atom` by `value` in every term.
    pub fn subs(&self, atom: &Atom, value: &Expr) -> Self {
        let map = |exprs: &Vec<Expr>| -> Vec<Expr> {
            exprs.iter().map(|e| e.subs(atom, value)).collect()
        };
        Dynamics {
            coordinates: self.coordinates.clone(),
            mass: self.mass.iter().map(&map).collect(),
            velocity: map(&self.velocity),
            gravity: map(&self.gravity),
            residual: map(&self.residual),
        }
    }
}

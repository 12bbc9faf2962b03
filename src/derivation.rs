//! End-to-end derivation of the equations of motion of an [`ArmModel`].

use crate::dynamics::{collection_order, equations_of_motion, Dynamics, Exhaustiveness};
use crate::error::EomError;
use crate::model::kinematics::{bodies, Body};
use crate::model::{ArmModel, Energy};
use crate::symbolic::{Expr, Node};

/// Every intermediate result of one derivation
#[derive(Debug, Clone)]
pub struct Derivation {
    pub model: ArmModel,
    pub bodies: Vec<Body>,
    pub energy: Energy,
    pub lagrangian: Expr,
    /// One expanded equation per coordinate
    pub equations: Vec<Expr>,
    pub dynamics: Dynamics,
}

impl Derivation {
    /// Derives with [`Exhaustiveness::Strict`].
    pub fn run(model: &ArmModel) -> Result<Self, EomError> {
        Self::run_with(model, Exhaustiveness::default())
    }

    pub fn run_with(model: &ArmModel, policy: Exhaustiveness) -> Result<Self, EomError> {
        model.validate()?;
        tracing::info!(
            "Deriving equations of motion for '{}' ({} links)",
            model.id,
            model.links.len()
        );

        let bodies = bodies(model);
        let energy = Energy::assemble(model, &bodies);
        let lagrangian = energy.lagrangian();
        tracing::debug!("Lagrangian has {} terms", lagrangian.len());

        let coordinates = model.coordinates();
        let equations = equations_of_motion(&lagrangian, &coordinates);
        for (coordinate, equation) in coordinates.iter().zip(&equations) {
            tracing::debug!("Equation for {}: {} terms", coordinate, equation.len());
        }

        let dynamics = Dynamics::extract(&equations, &coordinates, &model.gravity_atom(), policy)?;
        if !dynamics.is_symmetric() {
            tracing::warn!("Mass matrix of '{}' is not symmetric", model.id);
        }

        Ok(Derivation {
            model: model.clone(),
            bodies,
            energy,
            lagrangian,
            equations,
            dynamics,
        })
    }

    /// The equations grouped by gravity, accelerations and velocities, for display
    pub fn collected_equations(&self) -> Vec<Node> {
        let order = collection_order(&self.model);
        self.equations
            .iter()
            .map(|equation| equation.collect(&order))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Link, ModelError};
    use crate::symbolic::Atom;

    #[test]
    fn test_default_model_is_fully_classified() {
        let derivation = Derivation::run(&ArmModel::default()).unwrap();
        assert_eq!(derivation.equations.len(), 2);
        assert_eq!(derivation.bodies.len(), 3);
        assert!(derivation.dynamics.residual.iter().all(Expr::is_zero));
        assert_eq!(derivation.dynamics.reassemble(), derivation.equations);
    }

    #[test]
    fn test_collected_equations_lead_with_gravity() {
        let derivation = Derivation::run(&ArmModel::default()).unwrap();
        let collected = derivation.collected_equations();
        let text = crate::symbolic::render(&collected[0], &crate::symbolic::MathSyntax);
        assert!(text.contains("*g"), "{}", text);
        assert!(text.contains("ddq1"), "{}", text);
    }

    #[test]
    fn test_invalid_model_is_rejected() {
        let model = ArmModel {
            id: "broken".to_string(),
            gravity: "g".to_string(),
            links: vec![Link {
                joint: "q".to_string(),
                mass: "q".to_string(),
                length: "l".to_string(),
                inertia: None,
            }],
            payload: None,
        };
        let err = Derivation::run(&model).unwrap_err();
        assert!(matches!(
            err,
            EomError::Model(ModelError::DuplicateSymbol { .. })
        ));
    }

    #[test]
    fn test_single_pendulum_gravity_term() {
        let model = ArmModel::from_str(
            r#"{"id": "p", "links": [{"joint": "q", "mass": "m", "length": "l"}]}"#,
        )
        .unwrap();
        let derivation = Derivation::run(&model).unwrap();
        // centroid at l/2, angle measured from the x axis
        let expected = Expr::rational(1, 2)
            * Expr::param("m")
            * Expr::param("g")
            * Expr::param("l")
            * Expr::cos(&crate::symbolic::Angle::coordinate("q"));
        assert_eq!(derivation.dynamics.gravity[0], expected);
        assert!(derivation.dynamics.velocity[0].is_zero());
        assert_eq!(
            derivation.dynamics.mass[0][0],
            Expr::rational(1, 4) * Expr::param("m") * Expr::param("l").pow(2)
        );
        assert!(derivation.lagrangian.contains(&Atom::velocity("q")));
    }
}

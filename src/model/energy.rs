//! Kinetic and potential energy of the chain.

use crate::model::kinematics::Body;
use crate::model::ArmModel;
use crate::symbolic::Expr;

/// Per-body energy terms, in the same order as the bodies
#[derive(Debug, Clone, PartialEq)]
pub struct Energy {
    pub kinetic: Vec<Expr>,
    pub potential: Vec<Expr>,
}

impl Energy {
    pub fn assemble(model: &ArmModel, bodies: &[Body]) -> Self {
        let gravity = Expr::param(model.gravity.clone());
        Energy {
            kinetic: bodies.iter().map(kinetic).collect(),
            potential: bodies.iter().map(|body| potential(body, &gravity)).collect(),
        }
    }

    pub fn kinetic_total(&self) -> Expr {
        self.kinetic.iter().fold(Expr::zero(), |acc, k| acc + k)
    }

    pub fn potential_total(&self) -> Expr {
        self.potential.iter().fold(Expr::zero(), |acc, u| acc + u)
    }

    /// `L = K − U`
    pub fn lagrangian(&self) -> Expr {
        self.kinetic_total() - self.potential_total()
    }
}

/// `½ m (ẋ² + ẏ²) + ½ I ω²`, trig-simplified.
///
/// The rotational part is skipped for point masses.
pub fn kinetic(body: &Body) -> Expr {
    let half = Expr::rational(1, 2);
    let vx = body.x.time_derivative();
    let vy = body.y.time_derivative();

    let mut energy = &half * &(&body.mass * &(vx.pow(2) + vy.pow(2)));
    if let (Some(inertia), Some(orientation)) = (&body.inertia, &body.orientation) {
        let omega = orientation.rate();
        energy += &half * &(inertia * &omega.pow(2));
    }
    energy.trigsimp()
}

/// `m g y`
pub fn potential(body: &Body, gravity: &Expr) -> Expr {
    &(&body.mass * gravity) * &body.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::kinematics::bodies;
    use crate::symbolic::{Atom, Bindings};
    use approx::assert_relative_eq;

    #[test]
    fn test_link1_kinetic_energy_is_simplified() {
        // ½ m1 (l1/2)² q̇1² + ½ I1 q̇1², no trig left
        let model = ArmModel::two_link_with_payload();
        let bodies = bodies(&model);
        let k1 = kinetic(&bodies[0]);
        let dq1 = Expr::velocity("q1");
        let expected = Expr::rational(1, 8) * Expr::param("l1").pow(2) * Expr::param("m1") * dq1.pow(2)
            + Expr::rational(1, 2) * Expr::param("I1") * dq1.pow(2);
        assert_eq!(k1, expected);
        assert!(!k1.contains(&Atom::Cos("q1".into())));
    }

    #[test]
    fn test_payload_kinetic_energy() {
        // ½ m3 (l1² q̇1² + l2² (q̇1+q̇2)² + 2 l1 l2 cos q2 q̇1 (q̇1+q̇2))
        let model = ArmModel::two_link_with_payload();
        let bodies = bodies(&model);
        let k3 = kinetic(&bodies[2]);

        let (q2, dq1, dq2) = (0.4_f64, 1.3_f64, -0.6_f64);
        let (l1, l2, m3) = (0.9_f64, 0.5_f64, 2.0_f64);
        let bindings = Bindings::new()
            .param("l1", l1)
            .param("l2", l2)
            .param("m3", m3)
            .coordinate("q1", 0.1, dq1, 0.0)
            .coordinate("q2", q2, dq2, 0.0);
        let expected = 0.5
            * m3
            * (l1.powi(2) * dq1.powi(2)
                + l2.powi(2) * (dq1 + dq2).powi(2)
                + 2.0 * l1 * l2 * q2.cos() * dq1 * (dq1 + dq2));
        assert_relative_eq!(k3.eval(&bindings).unwrap(), expected, epsilon = 1e-12);
        assert!(!k3.contains(&Atom::Sin("q1".into())));
    }

    #[test]
    fn test_potential_and_lagrangian() {
        let model = ArmModel::two_link_with_payload();
        let bodies = bodies(&model);
        let energy = Energy::assemble(&model, &bodies);
        assert_eq!(energy.kinetic.len(), 3);
        assert_eq!(energy.potential.len(), 3);

        let u1 = Expr::rational(1, 2)
            * Expr::param("g")
            * Expr::param("l1")
            * Expr::param("m1")
            * Expr::atom(Atom::Sin("q1".into()));
        assert_eq!(energy.potential[0], u1);

        let l = energy.lagrangian();
        assert_eq!(l, energy.kinetic_total() - energy.potential_total());
        assert!(l.contains(&Atom::param("g")));
    }
}

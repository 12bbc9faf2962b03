//! Center-of-mass positions and absolute orientations of every body in the chain.

use crate::model::ArmModel;
use crate::symbolic::{Angle, Expr};

/// A rigid body (or point mass) of the chain, in closed form.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub mass: Expr,
    /// Rotational inertia about the center of mass; `None` for point masses
    pub inertia: Option<Expr>,
    pub x: Expr,
    pub y: Expr,
    /// Absolute orientation measured from the x axis; `None` for point masses
    pub orientation: Option<Angle>,
}

/// Builds the bodies of `model`: one per link, then the payload if any.
///
/// Link k points along `q1 + … + qk`; its centroid sits half way along it.
/// The payload sits at the tip of the last link.
pub fn bodies(model: &ArmModel) -> Vec<Body> {
    let half = Expr::rational(1, 2);

    let mut bodies = Vec::with_capacity(model.links.len() + 1);
    let mut reach_x = Expr::zero();
    let mut reach_y = Expr::zero();
    let mut angle = Angle::zero();

    for (i, link) in model.links.iter().enumerate() {
        angle = angle + Angle::coordinate(link.joint.clone());
        let length = Expr::param(link.length.clone());
        let along_x = &length * &Expr::cos(&angle);
        let along_y = &length * &Expr::sin(&angle);

        bodies.push(Body {
            name: format!("link{}", i + 1),
            mass: Expr::param(link.mass.clone()),
            inertia: link.inertia.as_ref().map(|name| Expr::param(name.clone())),
            x: &reach_x + &(&half * &along_x),
            y: &reach_y + &(&half * &along_y),
            orientation: Some(angle.clone()),
        });

        reach_x += along_x;
        reach_y += along_y;
    }

    if let Some(payload) = &model.payload {
        bodies.push(Body {
            name: "payload".to_string(),
            mass: Expr::param(payload.mass.clone()),
            inertia: None,
            x: reach_x,
            y: reach_y,
            orientation: None,
        });
    }

    bodies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::{Atom, Bindings};
    use approx::assert_relative_eq;

    #[test]
    fn test_default_model_bodies() {
        let bodies = bodies(&ArmModel::two_link_with_payload());
        let names: Vec<_> = bodies.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["link1", "link2", "payload"]);

        let link1 = &bodies[0];
        let expected_x = Expr::rational(1, 2)
            * Expr::param("l1")
            * Expr::atom(Atom::Cos("q1".into()));
        assert_eq!(link1.x, expected_x);
        assert_eq!(link1.orientation, Some(Angle::coordinate("q1")));

        let payload = &bodies[2];
        assert!(payload.inertia.is_none());
        assert!(payload.orientation.is_none());
    }

    #[test]
    fn test_positions_numerically() {
        let bodies = bodies(&ArmModel::two_link_with_payload());
        let (q1, q2) = (0.3_f64, -1.1_f64);
        let (l1, l2) = (0.7_f64, 0.4_f64);
        let bindings = Bindings::new()
            .param("l1", l1)
            .param("l2", l2)
            .coordinate("q1", q1, 0.0, 0.0)
            .coordinate("q2", q2, 0.0, 0.0);

        let link2 = &bodies[1];
        assert_relative_eq!(
            link2.x.eval(&bindings).unwrap(),
            l1 * q1.cos() + 0.5 * l2 * (q1 + q2).cos(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            link2.y.eval(&bindings).unwrap(),
            l1 * q1.sin() + 0.5 * l2 * (q1 + q2).sin(),
            epsilon = 1e-12
        );

        let tip = &bodies[2];
        assert_relative_eq!(
            tip.y.eval(&bindings).unwrap(),
            l1 * q1.sin() + l2 * (q1 + q2).sin(),
            epsilon = 1e-12
        );
    }
}

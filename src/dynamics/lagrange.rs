use crate::model::ArmModel;
use crate::symbolic::{Atom, Expr};

/// `d/dt(∂L/∂q̇) − ∂L/∂q` for one generalized coordinate.
///
/// The result is expanded and trig-reduced, i.e. canonical.
pub fn euler_lagrange(lagrangian: &Expr, coordinate: &str) -> Expr {
    let momentum = lagrangian.diff(&Atom::velocity(coordinate));
    let force = lagrangian.diff(&Atom::coordinate(coordinate));
    (momentum.time_derivative() - force).trigsimp()
}

/// One equation of motion per coordinate, in coordinate order
pub fn equations_of_motion(lagrangian: &Expr, coordinates: &[String]) -> Vec<Expr> {
    coordinates
        .iter()
        .map(|q| euler_lagrange(lagrangian, q))
        .collect()
}

/// Atoms to collect equations by for display: gravity, accelerations, velocities.
pub fn collection_order(model: &ArmModel) -> Vec<Atom> {
    let coordinates = model.coordinates();
    std::iter::once(model.gravity_atom())
        .chain(coordinates.iter().map(Atom::acceleration))
        .chain(coordinates.iter().map(Atom::velocity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::Angle;

    #[test]
    fn test_simple_pendulum() {
        // L = ½ m l² q̇² + m g l cos q  (angle from the downward vertical)
        let m = Expr::param("m");
        let l = Expr::param("l");
        let g = Expr::param("g");
        let lagrangian = Expr::rational(1, 2) * m.clone() * l.pow(2) * Expr::velocity("q").pow(2)
            + m.clone() * g.clone() * l.clone() * Expr::cos(&Angle::coordinate("q"));

        // m l² q̈ + m g l sin q
        let expected = m.clone() * l.pow(2) * Expr::acceleration("q")
            + m * g * l * Expr::sin(&Angle::coordinate("q"));
        assert_eq!(euler_lagrange(&lagrangian, "q"), expected);
    }

    #[test]
    fn test_collection_order() {
        let order = collection_order(&ArmModel::two_link_with_payload());
        assert_eq!(
            order,
            vec![
                Atom::param("g"),
                Atom::acceleration("q1"),
                Atom::acceleration("q2"),
                Atom::velocity("q1"),
                Atom::velocity("q2"),
            ]
        );
    }
}

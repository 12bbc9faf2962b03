//! Time and partial derivatives.
//!
//! Both follow the product rule over the factors of each monomial; they only
//! differ in how a single atom is differentiated.

use num_rational::Rational64;

use crate::symbolic::atom::Atom;
use crate::symbolic::expr::{Expr, Monomial};

impl Atom {
    /// `d/dt` of this atom, with every coordinate a function of time
    pub fn time_derivative(&self) -> Expr {
        match self {
            Atom::Param(_) => Expr::zero(),
            Atom::Coord { name, order } => Expr::atom(Atom::Coord {
                name: name.clone(),
                order: order + 1,
            }),
            Atom::Sin(name) => Expr::atom(Atom::Cos(name.clone())) * Expr::velocity(name.clone()),
            Atom::Cos(name) => -(Expr::atom(Atom::Sin(name.clone())) * Expr::velocity(name.clone())),
        }
    }

    /// `∂self/∂wrt`, treating `q`, `q̇`, `q̈` and parameters as independent variables
    pub fn partial(&self, wrt: &Atom) -> Expr {
        if self == wrt {
            return Expr::one();
        }
        match (self, wrt) {
            (Atom::Sin(name), Atom::Coord { name: q, order: 0 }) if name == q => {
                Expr::atom(Atom::Cos(name.clone()))
            }
            (Atom::Cos(name), Atom::Coord { name: q, order: 0 }) if name == q => {
                -Expr::atom(Atom::Sin(name.clone()))
            }
            _ => Expr::zero(),
        }
    }
}

impl Expr {
    /// Total time derivative.
    pub fn time_derivative(&self) -> Expr {
        self.product_rule(Atom::time_derivative)
    }

    /// Partial derivative with respect to `wrt`.
    pub fn diff(&self, wrt: &Atom) -> Expr {
        self.product_rule(|atom| atom.partial(wrt))
    }

    fn product_rule(&self, derivative: impl Fn(&Atom) -> Expr) -> Expr {
        let mut result = Expr::zero();
        for (monomial, coefficient) in self.terms() {
            for (atom, power) in monomial.factors() {
                let inner = derivative(atom);
                if inner.is_zero() {
                    continue;
                }
                let rest: Monomial = monomial.with_power(atom, power - 1);
                let outer = Expr::term(rest, *coefficient * Rational64::from_integer(power as i64));
                result += &outer * &inner;
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::Angle;

    #[test]
    fn test_time_derivative_of_coordinates() {
        let q = Expr::coordinate("q1");
        assert_eq!(q.time_derivative(), Expr::velocity("q1"));
        assert_eq!(
            q.time_derivative().time_derivative(),
            Expr::acceleration("q1")
        );
        assert!(Expr::param("m1").time_derivative().is_zero());
    }

    #[test]
    fn test_chain_rule_through_trig() {
        // d/dt (l cos q) = −l sin q · q̇
        let e = Expr::param("l") * Expr::cos(&Angle::coordinate("q"));
        let expected = -(Expr::param("l")
            * Expr::atom(Atom::Sin("q".into()))
            * Expr::velocity("q"));
        assert_eq!(e.time_derivative(), expected);
    }

    #[test]
    fn test_product_rule_with_powers() {
        // d/dt (q̇²) = 2 q̇ q̈
        let e = Expr::velocity("q").pow(2);
        let expected = Expr::integer(2) * Expr::velocity("q") * Expr::acceleration("q");
        assert_eq!(e.time_derivative(), expected);
    }

    #[test]
    fn test_partials_are_independent() {
        // L = ½ m q̇² + m g sin q
        let l = Expr::rational(1, 2) * Expr::param("m") * Expr::velocity("q").pow(2)
            + Expr::param("m") * Expr::param("g") * Expr::sin(&Angle::coordinate("q"));

        assert_eq!(
            l.diff(&Atom::velocity("q")),
            Expr::param("m") * Expr::velocity("q")
        );
        assert_eq!(
            l.diff(&Atom::coordinate("q")),
            Expr::param("m") * Expr::param("g") * Expr::atom(Atom::Cos("q".into()))
        );
        assert_eq!(
            l.diff(&Atom::param("g")),
            Expr::param("m") * Expr::atom(Atom::Sin("q".into()))
        );
        assert!(l.diff(&Atom::acceleration("q")).is_zero());
    }
}

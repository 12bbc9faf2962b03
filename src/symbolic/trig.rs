use crate::symbolic::atom::Atom;
use crate::symbolic::expr::{Expr, Monomial};

impl Expr {
    /// Collapses Pythagorean identities by rewriting `sin²x` as `1 − cos²x`.
    ///
    /// Afterwards no sine appears with a power above one. Together with the
    /// angle expansion done when sines and cosines are built, this is a
    /// canonical form: expressions equal as functions of the coordinates are
    /// structurally equal.
    pub fn trigsimp(&self) -> Expr {
        let mut result = Expr::zero();
        for (monomial, coefficient) in self.terms() {
            result += reduce(monomial).scale(*coefficient);
        }
        result
    }
}

fn reduce(monomial: &Monomial) -> Expr {
    let squared_sine = monomial.factors().find_map(|(atom, power)| match atom {
        Atom::Sin(name) if power >= 2 => Some((atom.clone(), name.clone(), power)),
        _ => None,
    });
    let Some((sine, name, power)) = squared_sine else {
        return Expr::from(monomial.clone());
    };

    let identity = &Expr::one() - &Expr::atom(Atom::Cos(name)).pow(2);
    let lowered = Expr::from(monomial.with_power(&sine, power - 2));
    (&lowered * &identity).trigsimp()
}

use num_rational::Rational64;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;

use crate::symbolic::atom::Atom;
use crate::symbolic::expr::Expr;

/// An integer linear combination of coordinates, e.g. `q1 + q2`.
///
/// Absolute link orientations of a planar serial chain are always of this form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Angle(BTreeMap<String, i64>);

impl Angle {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn coordinate(name: impl Into<String>) -> Self {
        Angle(BTreeMap::from([(name.into(), 1)]))
    }

    pub fn scaled(&self, factor: i64) -> Self {
        let mut angle = Angle::zero();
        for (name, k) in self.0.iter() {
            angle.accumulate(name, k * factor);
        }
        angle
    }

    fn accumulate(&mut self, name: &str, multiple: i64) {
        let entry = self.0.entry(name.to_string()).or_insert(0);
        *entry += multiple;
        if *entry == 0 {
            self.0.remove(name);
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// The angle as a polynomial in its coordinates
    pub fn to_expr(&self) -> Expr {
        self.linear(Atom::coordinate)
    }

    /// Angular rate `Σ k·q̇`
    pub fn rate(&self) -> Expr {
        self.linear(Atom::velocity)
    }

    fn linear(&self, atom: impl Fn(String) -> Atom) -> Expr {
        let mut expr = Expr::zero();
        for (name, k) in self.0.iter() {
            expr += Expr::atom(atom(name.clone())).scale(Rational64::from_integer(*k));
        }
        expr
    }

    /// `(sin θ, cos θ)` expanded into sines and cosines of single coordinates.
    ///
    /// Uses `sin(a+b) = sin a cos b + cos a sin b`, `cos(a+b) = cos a cos b − sin a sin b`
    /// and the parity of sine and cosine for negative multiples. The result is
    /// trig-reduced, so it is in canonical form.
    pub fn expand(&self) -> (Expr, Expr) {
        let mut sin = Expr::zero();
        let mut cos = Expr::one();
        for (name, k) in self.0.iter() {
            let (sk, ck) = multiple(name, *k);
            let next_sin = &(&sin * &ck) + &(&cos * &sk);
            let next_cos = &(&cos * &ck) - &(&sin * &sk);
            sin = next_sin;
            cos = next_cos;
        }
        (sin.trigsimp(), cos.trigsimp())
    }
}

/// `(sin kx, cos kx)` for a single coordinate `x`
fn multiple(name: &str, k: i64) -> (Expr, Expr) {
    let s1 = Expr::atom(Atom::Sin(name.to_string()));
    let c1 = Expr::atom(Atom::Cos(name.to_string()));

    let mut sin = Expr::zero();
    let mut cos = Expr::one();
    for _ in 0..k.unsigned_abs() {
        let next_sin = &(&sin * &c1) + &(&cos * &s1);
        let next_cos = &(&cos * &c1) - &(&sin * &s1);
        sin = next_sin;
        cos = next_cos;
    }
    if k < 0 {
        sin = -sin;
    }
    (sin, cos)
}

impl Add for Angle {
    type Output = Angle;

    fn add(mut self, rhs: Angle) -> Angle {
        for (name, k) in rhs.0.iter() {
            self.accumulate(name, *k);
        }
        self
    }
}

impl Add<&Angle> for &Angle {
    type Output = Angle;

    fn add(self, rhs: &Angle) -> Angle {
        self.clone() + rhs.clone()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_expr())
    }
}

impl Expr {
    pub fn sin(angle: &Angle) -> Expr {
        angle.expand().0
    }

    pub fn cos(angle: &Angle) -> Expr {
        angle.expand().1
    }
}

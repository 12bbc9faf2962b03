use num_rational::Rational64;
use num_traits::{One, Zero};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::symbolic::atom::Atom;
use crate::symbolic::tree::{render, MathSyntax, Node};

/// A product of atoms raised to positive integer powers.
///
/// The empty product is the monomial `1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Monomial(BTreeMap<Atom, u32>);

impl Monomial {
    pub fn one() -> Self {
        Monomial(BTreeMap::new())
    }

    pub fn atom(atom: Atom) -> Self {
        Monomial(BTreeMap::from([(atom, 1)]))
    }

    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    /// Power of `atom` in this monomial, zero if absent
    pub fn power_of(&self, atom: &Atom) -> u32 {
        self.0.get(atom).copied().unwrap_or(0)
    }

    pub fn factors(&self) -> impl Iterator<Item = (&Atom, u32)> {
        self.0.iter().map(|(atom, power)| (atom, *power))
    }

    pub fn contains(&self, atom: &Atom) -> bool {
        self.0.contains_key(atom)
    }

    pub fn any(&self, predicate: impl Fn(&Atom) -> bool) -> bool {
        self.0.keys().any(predicate)
    }

    /// Returns a copy with the power of `atom` replaced; a power of zero drops it.
    pub fn with_power(&self, atom: &Atom, power: u32) -> Self {
        let mut factors = self.0.clone();
        if power == 0 {
            factors.remove(atom);
        } else {
            factors.insert(atom.clone(), power);
        }
        Monomial(factors)
    }
}

impl Mul for &Monomial {
    type Output = Monomial;

    fn mul(self, rhs: &Monomial) -> Monomial {
        let mut factors = self.0.clone();
        for (atom, power) in rhs.0.iter() {
            *factors.entry(atom.clone()).or_insert(0) += power;
        }
        Monomial(factors)
    }
}

/// A polynomial with exact rational coefficients over [`Atom`]s.
///
/// Terms with a zero coefficient are never stored, so two expressions denote
/// the same polynomial exactly when they compare equal. Every operation returns
/// a fully expanded result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Expr {
    terms: BTreeMap<Monomial, Rational64>,
}

impl Expr {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::constant(Rational64::one())
    }

    pub fn constant(value: Rational64) -> Self {
        let mut expr = Self::zero();
        expr.add_term(Monomial::one(), value);
        expr
    }

    pub fn integer(value: i64) -> Self {
        Self::constant(Rational64::from_integer(value))
    }

    /// The exact fraction `numer / denom`.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero, like [`Rational64::new`].
    pub fn rational(numer: i64, denom: i64) -> Self {
        Self::constant(Rational64::new(numer, denom))
    }

    pub fn atom(atom: Atom) -> Self {
        Self::term(Monomial::atom(atom), Rational64::one())
    }

    pub fn term(monomial: Monomial, coefficient: Rational64) -> Self {
        let mut expr = Self::zero();
        expr.add_term(monomial, coefficient);
        expr
    }

    pub fn param(name: impl Into<String>) -> Self {
        Self::atom(Atom::param(name))
    }

    pub fn coordinate(name: impl Into<String>) -> Self {
        Self::atom(Atom::coordinate(name))
    }

    pub fn velocity(name: impl Into<String>) -> Self {
        Self::atom(Atom::velocity(name))
    }

    pub fn acceleration(name: impl Into<String>) -> Self {
        Self::atom(Atom::acceleration(name))
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of additive terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &Rational64)> {
        self.terms.iter()
    }

    /// The value of a constant expression
    pub fn as_constant(&self) -> Option<Rational64> {
        match self.terms.len() {
            0 => Some(Rational64::zero()),
            1 => self.terms.get(&Monomial::one()).copied(),
            _ => None,
        }
    }

    /// Accumulates `coefficient · monomial`, dropping the term when it cancels.
    pub fn add_term(&mut self, monomial: Monomial, coefficient: Rational64) {
        if coefficient.is_zero() {
            return;
        }
        match self.terms.entry(monomial) {
            Entry::Vacant(slot) => {
                slot.insert(coefficient);
            }
            Entry::Occupied(mut slot) => {
                *slot.get_mut() += coefficient;
                if slot.get().is_zero() {
                    slot.remove();
                }
            }
        }
    }

    pub fn scale(&self, factor: Rational64) -> Self {
        if factor.is_zero() {
            return Self::zero();
        }
        Expr {
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (m.clone(), *c * factor))
                .collect(),
        }
    }

    pub fn pow(&self, exponent: u32) -> Self {
        let mut result = Self::one();
        for _ in 0..exponent {
            result = &result * self;
        }
        result
    }

    pub fn contains(&self, atom: &Atom) -> bool {
        self.terms.keys().any(|m| m.contains(atom))
    }

    pub fn atoms(&self) -> BTreeSet<Atom> {
        self.terms
            .keys()
            .flat_map(|m| m.factors().map(|(atom, _)| atom.clone()))
            .collect()
    }

    /// Keeps only the terms whose monomial satisfies `predicate`.
    pub fn filter(&self, predicate: impl Fn(&Monomial) -> bool) -> Self {
        Expr {
            terms: self
                .terms
                .iter()
                .filter(|(m, _)| predicate(m))
                .map(|(m, c)| (m.clone(), *c))
                .collect(),
        }
    }

    /// Replaces every occurrence of `atom` with `value`.
    pub fn subs(&self, atom: &Atom, value: &Expr) -> Self {
        let mut result = Self::zero();
        for (monomial, coefficient) in self.terms.iter() {
            let power = monomial.power_of(atom);
            if power == 0 {
                result.add_term(monomial.clone(), *coefficient);
                continue;
            }
            let rest = Self::term(monomial.with_power(atom, 0), *coefficient);
            result += &rest * &value.pow(power);
        }
        result
    }

    /// Applies [`Expr::subs`] for each pair in turn.
    pub fn subs_all<'a>(&self, substitutions: impl IntoIterator<Item = (&'a Atom, &'a Expr)>) -> Self {
        substitutions
            .into_iter()
            .fold(self.clone(), |acc, (atom, value)| acc.subs(atom, value))
    }

    /// Builds the printable tree of this expression.
    pub fn to_node(&self) -> Node {
        Node::from(self)
    }
}

impl From<Atom> for Expr {
    fn from(atom: Atom) -> Self {
        Expr::atom(atom)
    }
}

impl From<Monomial> for Expr {
    fn from(monomial: Monomial) -> Self {
        Expr::term(monomial, Rational64::one())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::integer(value)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render(&self.to_node(), &MathSyntax))
    }
}

impl Add<&Expr> for &Expr {
    type Output = Expr;

    fn add(self, rhs: &Expr) -> Expr {
        let mut result = self.clone();
        result += rhs;
        result
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(mut self, rhs: Expr) -> Expr {
        self += &rhs;
        self
    }
}

impl Add<&Expr> for Expr {
    type Output = Expr;

    fn add(mut self, rhs: &Expr) -> Expr {
        self += rhs;
        self
    }
}

impl AddAssign<&Expr> for Expr {
    fn add_assign(&mut self, rhs: &Expr) {
        for (monomial, coefficient) in rhs.terms.iter() {
            self.add_term(monomial.clone(), *coefficient);
        }
    }
}

impl AddAssign for Expr {
    fn add_assign(&mut self, rhs: Expr) {
        *self += &rhs;
    }
}

impl Sub<&Expr> for &Expr {
    type Output = Expr;

    fn sub(self, rhs: &Expr) -> Expr {
        let mut result = self.clone();
        result -= rhs;
        result
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(mut self, rhs: Expr) -> Expr {
        self -= &rhs;
        self
    }
}

impl Sub<&Expr> for Expr {
    type Output = Expr;

    fn sub(mut self, rhs: &Expr) -> Expr {
        self -= rhs;
        self
    }
}

impl SubAssign<&Expr> for Expr {
    fn sub_assign(&mut self, rhs: &Expr) {
        for (monomial, coefficient) in rhs.terms.iter() {
            self.add_term(monomial.clone(), -*coefficient);
        }
    }
}

impl SubAssign for Expr {
    fn sub_assign(&mut self, rhs: Expr) {
        *self -= &rhs;
    }
}

impl Mul<&Expr> for &Expr {
    type Output = Expr;

    fn mul(self, rhs: &Expr) -> Expr {
        let mut result = Expr::zero();
        for (lm, lc) in self.terms.iter() {
            for (rm, rc) in rhs.terms.iter() {
                result.add_term(lm * rm, *lc * *rc);
            }
        }
        result
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        &self * &rhs
    }
}

impl Mul<&Expr> for Expr {
    type Output = Expr;

    fn mul(self, rhs: &Expr) -> Expr {
        &self * rhs
    }
}

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        self.scale(-Rational64::one())
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        -&self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::param("x")
    }

    fn y() -> Expr {
        Expr::param("y")
    }

    #[test]
    fn test_cancellation_leaves_zero() {
        let e = &(&x() + &y()) - &(&y() + &x());
        assert!(e.is_zero());
        assert_eq!(e.as_constant(), Some(Rational64::zero()));
    }

    #[test]
    fn test_binomial_expansion() {
        let square = (&x() + &y()).pow(2);
        let expected = x().pow(2) + Expr::integer(2) * x() * y() + y().pow(2);
        assert_eq!(square, expected);
        assert_eq!(square.len(), 3);
    }

    #[test]
    fn test_rational_coefficients_are_exact() {
        let half = Expr::rational(1, 2);
        let sum = &half + &half;
        assert_eq!(sum, Expr::one());
        let quarter = &half * &half;
        assert_eq!(quarter.as_constant(), Some(Rational64::new(1, 4)));
    }

    #[test]
    #[should_panic]
    fn test_rational_with_zero_denominator_panics() {
        let _ = Expr::rational(1, 0);
    }

    #[test]
    fn test_subs() {
        // (x + 1) * y with x -> y  =  y^2 + y
        let e = (x() + Expr::one()) * y();
        let result = e.subs(&Atom::param("x"), &y());
        assert_eq!(result, y().pow(2) + y());

        // substituting zero removes every term carrying the atom
        let zeroed = e.subs(&Atom::param("y"), &Expr::zero());
        assert!(zeroed.is_zero());
    }

    #[test]
    fn test_filter_and_contains() {
        let e = x() * y() + x() + Expr::integer(3);
        let with_y = e.filter(|m| m.contains(&Atom::param("y")));
        assert_eq!(with_y, x() * y());
        assert!(e.contains(&Atom::param("x")));
        assert!(!e.contains(&Atom::param("z")));
        assert_eq!(e.atoms().len(), 2);
    }
}

//! Printable expression trees.
//!
//! [`Expr`] is a flat canonical polynomial; printing goes through [`Node`] so that
//! every output syntax is produced by the same precedence-aware walk. A target
//! language only decides how each node kind is spelled ([`Syntax`]).

use num_traits::{One, Signed};
use std::collections::BTreeMap;

use crate::symbolic::atom::{coordinate_label, Atom};
use crate::symbolic::expr::{Expr, Monomial};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
}

impl Func {
    pub fn name(&self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Non-negative integer literal; signs are carried by [`Node::Neg`]
    Number(i64),
    Symbol(String),
    Coordinate { name: String, order: u8 },
    Call { func: Func, arg: Box<Node> },
    Sum(Vec<Node>),
    Product(Vec<Node>),
    Quotient(Box<Node>, Box<Node>),
    Power(Box<Node>, u32),
    Neg(Box<Node>),
}

const PREC_SUM: u8 = 1;
const PREC_NEG: u8 = 2;
const PREC_PRODUCT: u8 = 3;
const PREC_POWER: u8 = 4;
const PREC_ATOM: u8 = 5;

impl Node {
    fn precedence(&self) -> u8 {
        match self {
            Node::Sum(_) => PREC_SUM,
            Node::Neg(_) => PREC_NEG,
            Node::Product(_) | Node::Quotient(_, _) => PREC_PRODUCT,
            Node::Power(_, _) => PREC_POWER,
            Node::Number(_) | Node::Symbol(_) | Node::Coordinate { .. } | Node::Call { .. } => {
                PREC_ATOM
            }
        }
    }

    pub fn is_atomic(&self) -> bool {
        self.precedence() == PREC_ATOM
    }

    fn from_atom(atom: &Atom) -> Node {
        match atom {
            Atom::Param(name) => Node::Symbol(name.clone()),
            Atom::Coord { name, order } => Node::Coordinate {
                name: name.clone(),
                order: *order,
            },
            Atom::Sin(name) => Node::Call {
                func: Func::Sin,
                arg: Box::new(Node::Coordinate {
                    name: name.clone(),
                    order: 0,
                }),
            },
            Atom::Cos(name) => Node::Call {
                func: Func::Cos,
                arg: Box::new(Node::Coordinate {
                    name: name.clone(),
                    order: 0,
                }),
            },
        }
    }

    fn from_factor(atom: &Atom, power: u32) -> Node {
        let base = Node::from_atom(atom);
        if power == 1 {
            base
        } else {
            Node::Power(Box::new(base), power)
        }
    }

    fn from_term(monomial: &Monomial, coefficient: &num_rational::Rational64) -> Node {
        let numer = coefficient.numer().abs();
        let denom = *coefficient.denom();

        let mut factors = Vec::new();
        if numer != 1 || monomial.is_one() {
            factors.push(Node::Number(numer));
        }
        factors.extend(monomial.factors().map(|(atom, power)| Node::from_factor(atom, power)));

        let mut body = if factors.len() == 1 {
            factors.remove(0)
        } else {
            Node::Product(factors)
        };
        if denom != 1 {
            body = Node::Quotient(Box::new(body), Box::new(Node::Number(denom)));
        }
        if coefficient.is_negative() {
            Node::Neg(Box::new(body))
        } else {
            body
        }
    }

    fn sum(mut parts: Vec<Node>) -> Node {
        match parts.len() {
            0 => Node::Number(0),
            1 => parts.remove(0),
            _ => Node::Sum(parts),
        }
    }
}

impl From<&Expr> for Node {
    fn from(expr: &Expr) -> Self {
        Node::sum(
            expr.terms()
                .map(|(monomial, coefficient)| Node::from_term(monomial, coefficient))
                .collect(),
        )
    }
}

impl Expr {
    /// Groups terms by powers of `order[0]`, then recursively by the remaining atoms.
    ///
    /// This is purely presentational; the expression itself is unchanged.
    pub fn collect(&self, order: &[Atom]) -> Node {
        let Some((first, rest)) = order.split_first() else {
            return Node::from(self);
        };

        let mut groups: BTreeMap<u32, Expr> = BTreeMap::new();
        for (monomial, coefficient) in self.terms() {
            let power = monomial.power_of(first);
            groups
                .entry(power)
                .or_default()
                .add_term(monomial.with_power(first, 0), *coefficient);
        }
        if groups.keys().all(|power| *power == 0) {
            return self.collect(rest);
        }

        let mut parts = Vec::new();
        for (power, coefficient) in groups.iter().rev() {
            if *power == 0 {
                continue;
            }
            let factor = Node::from_factor(first, *power);
            if coefficient.as_constant().is_some_and(|c| c.is_one()) {
                parts.push(factor);
            } else {
                parts.push(Node::Product(vec![coefficient.collect(rest), factor]));
            }
        }
        if let Some(remainder) = groups.get(&0) {
            match remainder.collect(rest) {
                Node::Sum(children) => parts.extend(children),
                node => parts.push(node),
            }
        }
        Node::sum(parts)
    }
}

/// Spelling of each node kind in an output language.
pub trait Syntax {
    fn add(&self) -> &str;
    fn sub(&self) -> &str;
    fn mul(&self) -> &str;
    fn div(&self) -> &str;
    fn neg(&self) -> &str;

    /// Whether prefix negation binds tighter than exponentiation, forcing
    /// parentheses around a negated power.
    fn neg_binds_tightly(&self) -> bool {
        false
    }

    fn number(&self, value: i64) -> String;
    fn symbol(&self, name: &str) -> String;
    fn coordinate(&self, name: &str, order: u8) -> String;
    fn power(&self, base: &str, exponent: u32) -> String;
    /// `argument` is already rendered; `atomic` says whether it needed no parentheses.
    fn call(&self, func: Func, argument: &str, atomic: bool) -> String;
}

/// Renders a tree with the given syntax.
pub fn render(node: &Node, syntax: &dyn Syntax) -> String {
    Printer { syntax }.node(node, 0)
}

struct Printer<'a> {
    syntax: &'a dyn Syntax,
}

impl Printer<'_> {
    fn node(&self, node: &Node, min_prec: u8) -> String {
        let text = self.raw(node);
        if node.precedence() < min_prec {
            format!("({})", text)
        } else {
            text
        }
    }

    fn raw(&self, node: &Node) -> String {
        let syntax = self.syntax;
        match node {
            Node::Number(value) => syntax.number(*value),
            Node::Symbol(name) => syntax.symbol(name),
            Node::Coordinate { name, order } => syntax.coordinate(name, *order),
            Node::Call { func, arg } => syntax.call(*func, &self.node(arg, 0), arg.is_atomic()),
            Node::Sum(children) => {
                let mut text = String::new();
                for (i, child) in children.iter().enumerate() {
                    match child {
                        Node::Neg(inner) if i > 0 => {
                            text.push_str(syntax.sub());
                            text.push_str(&self.node(inner, PREC_PRODUCT));
                        }
                        _ => {
                            if i > 0 {
                                text.push_str(syntax.add());
                            }
                            text.push_str(&self.node(child, PREC_SUM));
                        }
                    }
                }
                text
            }
            Node::Product(children) => children
                .iter()
                .map(|child| self.node(child, PREC_PRODUCT))
                .collect::<Vec<_>>()
                .join(syntax.mul()),
            Node::Quotient(numer, denom) => format!(
                "{}{}{}",
                self.node(numer, PREC_PRODUCT),
                syntax.div(),
                self.node(denom, PREC_POWER)
            ),
            Node::Power(base, exponent) => {
                syntax.power(&self.node(base, PREC_ATOM), *exponent)
            }
            Node::Neg(inner) => {
                let min_prec = if syntax.neg_binds_tightly() {
                    PREC_ATOM
                } else {
                    PREC_PRODUCT
                };
                format!("{}{}", syntax.neg(), self.node(inner, min_prec))
            }
        }
    }
}

/// Conventional mathematical notation, the format used by `Display`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathSyntax;

impl Syntax for MathSyntax {
    fn add(&self) -> &str {
        " + "
    }

    fn sub(&self) -> &str {
        " - "
    }

    fn mul(&self) -> &str {
        "*"
    }

    fn div(&self) -> &str {
        "/"
    }

    fn neg(&self) -> &str {
        "-"
    }

    fn number(&self, value: i64) -> String {
        value.to_string()
    }

    fn symbol(&self, name: &str) -> String {
        name.to_string()
    }

    fn coordinate(&self, name: &str, order: u8) -> String {
        coordinate_label(name, order)
    }

    fn power(&self, base: &str, exponent: u32) -> String {
        format!("{}**{}", base, exponent)
    }

    fn call(&self, func: Func, argument: &str, _atomic: bool) -> String {
        format!("{}({})", func.name(), argument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::Angle;

    #[test]
    fn test_display_of_canonical_terms() {
        let l1 = Expr::param("l1");
        let m1 = Expr::param("m1");
        let e = Expr::rational(1, 4) * l1.pow(2) * m1.clone() - Expr::integer(2) * m1;
        assert_eq!(e.to_string(), "l1**2*m1/4 - 2*m1");
    }

    #[test]
    fn test_leading_negative_and_constants() {
        let e = Expr::integer(3) - Expr::param("a");
        assert_eq!(e.to_string(), "3 - a");
        assert_eq!((-Expr::param("a")).to_string(), "-a");
        assert_eq!(Expr::zero().to_string(), "0");
        assert_eq!(Expr::rational(-1, 2).to_string(), "-1/2");
    }

    #[test]
    fn test_trig_and_derivatives_render() {
        let e = Expr::param("l") * Expr::cos(&Angle::coordinate("q2")) * Expr::velocity("q1");
        assert_eq!(e.to_string(), "l*dq1*cos(q2)");
    }

    #[test]
    fn test_collect_groups_by_priority() {
        let g = Atom::param("g");
        let dd = Atom::acceleration("q1");
        let e = Expr::param("a") * Expr::atom(dd.clone())
            + Expr::param("b") * Expr::atom(dd.clone())
            + Expr::param("m") * Expr::atom(g.clone())
            + Expr::param("c");
        let node = e.collect(&[g, dd]);
        assert_eq!(render(&node, &MathSyntax), "m*g + (a + b)*ddq1 + c");
    }

    #[test]
    fn test_collect_without_matches_is_plain() {
        let e = Expr::param("a") + Expr::param("b");
        assert_eq!(e.collect(&[Atom::param("g")]), Node::from(&e));
    }
}

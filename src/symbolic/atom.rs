use serde::{Deserialize, Serialize};
use std::fmt;

/// The indivisible factors a monomial is built from.
///
/// Coordinates are implicitly functions of time: `Coord { name: "q1", order: 2 }`
/// stands for the second time derivative of `q1(t)`. Parameters are constant in
/// time. Trigonometric atoms only ever take a single coordinate as argument,
/// sums of angles are expanded when they are constructed (see [`crate::symbolic::Angle`]).
///
/// The derived ordering decides the order factors are printed in:
/// parameters first, then coordinates, then sines and cosines.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Atom {
    Param(String),
    Coord { name: String, order: u8 },
    Sin(String),
    Cos(String),
}

impl Atom {
    pub fn param(name: impl Into<String>) -> Self {
        Atom::Param(name.into())
    }

    /// The coordinate itself, `q`
    pub fn coordinate(name: impl Into<String>) -> Self {
        Atom::Coord {
            name: name.into(),
            order: 0,
        }
    }

    /// First time derivative, `q̇`
    pub fn velocity(name: impl Into<String>) -> Self {
        Atom::Coord {
            name: name.into(),
            order: 1,
        }
    }

    /// Second time derivative, `q̈`
    pub fn acceleration(name: impl Into<String>) -> Self {
        Atom::Coord {
            name: name.into(),
            order: 2,
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Param(name) => write!(f, "{}", name),
            Atom::Coord { name, order } => write!(f, "{}", coordinate_label(name, *order)),
            Atom::Sin(name) => write!(f, "sin({})", name),
            Atom::Cos(name) => write!(f, "cos({})", name),
        }
    }
}

/// Plain identifier for a coordinate derivative: `q1`, `dq1`, `ddq1`, `d3q1`, ...
pub fn coordinate_label(name: &str, order: u8) -> String {
    match order {
        0 => name.to_string(),
        1 => format!("d{}", name),
        2 => format!("dd{}", name),
        n => format!("d{}{}", n, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Atom::coordinate("q1").to_string(), "q1");
        assert_eq!(Atom::velocity("q1").to_string(), "dq1");
        assert_eq!(Atom::acceleration("q2").to_string(), "ddq2");
        assert_eq!(coordinate_label("q1", 3), "d3q1");
        assert_eq!(Atom::Cos("q2".into()).to_string(), "cos(q2)");
    }

    #[test]
    fn test_ordering_puts_params_first() {
        let mut atoms = vec![
            Atom::Cos("q2".into()),
            Atom::velocity("q1"),
            Atom::param("m1"),
        ];
        atoms.sort();
        assert_eq!(atoms[0], Atom::param("m1"));
        assert_eq!(atoms[2], Atom::Cos("q2".into()));
    }
}

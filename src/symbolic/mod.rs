//! Exact symbolic algebra for planar multibody Lagrangians
//!
//! Expressions are polynomials with rational coefficients over a closed set of
//! atoms: parameters, generalized coordinates and their time derivatives, and
//! sines and cosines of single coordinates. That set is closed under time
//! differentiation, partial differentiation and multiplication, which is all
//! the Euler–Lagrange operator needs.
//!
//! ```
//! use planar_eom::symbolic::{Angle, Atom, Expr};
//!
//! // position of a pendulum bob and its velocity
//! let x = Expr::param("l") * Expr::cos(&Angle::coordinate("q"));
//! let vx = x.time_derivative();
//! assert_eq!(vx.to_string(), "-l*dq*sin(q)");
//! assert!(vx.contains(&Atom::velocity("q")));
//! ```

mod angle;
mod atom;
mod bindings;
mod calculus;
mod error;
mod expr;
mod tree;
mod trig;

pub use angle::Angle;
pub use atom::{coordinate_label, Atom};
pub use bindings::Bindings;
pub use error::SymbolicError;
pub use expr::{Expr, Monomial};
pub use tree::{render, Func, MathSyntax, Node, Syntax};

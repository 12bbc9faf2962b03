//! Symbolic equations of motion for planar revolute arms
//!
//! The pipeline takes an [`ArmModel`], assembles its Lagrangian, applies the
//! Euler–Lagrange operator per joint and splits the result into the manipulator form
//! `M(q)·q̈ + H(q, q̇) + G(q) = τ`. The terms can be evaluated numerically or emitted
//! as source text for a numeric consumer.
//!
//! ```
//! use planar_eom::prelude::*;
//!
//! let model = ArmModel::default();
//! let derivation = Derivation::run(&model).unwrap();
//! assert!(derivation.dynamics.is_symmetric());
//!
//! for line in CodeGenerator::new(&derivation.dynamics, &model, Target::OCaml)
//!     .mass_matrix()
//!     .lines()
//! {
//!     println!("{}", line);
//! }
//! ```

pub mod codegen;
pub mod derivation;
pub mod dynamics;
pub mod error;
pub mod model;
pub mod results;
pub mod symbolic;

pub use crate::codegen::{CodeGenerator, GeneratedCode, Target};
pub use crate::derivation::Derivation;
pub use crate::dynamics::{Dynamics, Exhaustiveness, NumericDynamics};
pub use crate::model::ArmModel;
pub use crate::results::ResultLog;
pub use crate::symbolic::{Bindings, Expr};
pub use error::EomError;

pub mod prelude {
    pub mod symbolic {
        pub use crate::symbolic::{render, Angle, Atom, MathSyntax, Node, Syntax};
    }
    pub mod model {
        pub use crate::model::{energy::Energy, kinematics::Body, Link, Payload};
    }

    pub use crate::{
        ArmModel, Bindings, CodeGenerator, Derivation, Dynamics, EomError, Exhaustiveness,
        Expr, GeneratedCode, NumericDynamics, ResultLog, Target,
    };
}

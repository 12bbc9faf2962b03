//! Code generation from extracted dynamics to source text
//!
//! Each term of [`Dynamics`] is turned into a [`Node`](crate::symbolic::Node) tree
//! and rendered by the printer of the chosen [`Target`]. Model symbols are mapped to
//! target identifiers through a [`Naming`] built from the parameter roles.
//!
//! ```
//! use planar_eom::codegen::{CodeGenerator, Target};
//! use planar_eom::model::ArmModel;
//! use planar_eom::Derivation;
//!
//! let model = ArmModel::default();
//! let derivation = Derivation::run(&model).unwrap();
//! let code = CodeGenerator::new(&derivation.dynamics, &model, Target::OCaml).mass_matrix();
//!
//! assert_eq!(code.statements.len(), 4);
//! assert!(code.lines()[0].starts_with("let m11 = "));
//! assert!(code.lines()[0].ends_with(" in"));
//! ```

mod naming;
mod syntax;

use std::fmt;

use crate::dynamics::Dynamics;
use crate::model::ArmModel;
use crate::symbolic::{render, Expr};

pub use naming::Naming;
pub use syntax::{OCamlSyntax, RustSyntax, TargetSyntax};

/// Output language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Target {
    /// `let m11 = ... in` with float operators
    #[default]
    #[value(name = "ocaml")]
    OCaml,
    /// `let m11 = ...;` over `f64`
    #[value(name = "rust")]
    Rust,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::OCaml => write!(f, "ocaml"),
            Target::Rust => write!(f, "rust"),
        }
    }
}

/// One named binding
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub name: String,
    /// Rendered right-hand side
    pub expression: String,
}

/// Generated bindings in emission order
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedCode {
    pub target: Target,
    pub statements: Vec<Statement>,
    rendered: Vec<String>,
}

impl GeneratedCode {
    /// One binding statement per line
    pub fn lines(&self) -> &[String] {
        &self.rendered
    }

    pub fn get(&self, name: &str) -> Option<&Statement> {
        self.statements.iter().find(|s| s.name == name)
    }
}

impl fmt::Display for GeneratedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.rendered {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Renders the terms of [`Dynamics`] in a [`Target`] language
pub struct CodeGenerator<'a> {
    dynamics: &'a Dynamics,
    target: Target,
    syntax: Box<dyn TargetSyntax>,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(dynamics: &'a Dynamics, model: &ArmModel, target: Target) -> Self {
        let naming = Naming::for_model(model, target);
        let syntax: Box<dyn TargetSyntax> = match target {
            Target::OCaml => Box::new(OCamlSyntax::new(naming)),
            Target::Rust => Box::new(RustSyntax::new(naming)),
        };
        Self {
            dynamics,
            target,
            syntax,
        }
    }

    /// `m<i><j>` for every entry, row by row
    pub fn mass_matrix(&self) -> GeneratedCode {
        let statements = self.mass_statements();
        self.finish(statements)
    }

    /// The mass matrix followed by `h<i>` and `g<i>`
    pub fn all_terms(&self) -> GeneratedCode {
        let mut statements = self.mass_statements();
        for (i, h) in self.dynamics.velocity.iter().enumerate() {
            statements.push(self.statement(format!("h{}", i + 1), h));
        }
        for (i, g) in self.dynamics.gravity.iter().enumerate() {
            statements.push(self.statement(format!("g{}", i + 1), g));
        }
        self.finish(statements)
    }

    fn mass_statements(&self) -> Vec<Statement> {
        let mut statements = Vec::new();
        for (i, row) in self.dynamics.mass.iter().enumerate() {
            for (j, entry) in row.iter().enumerate() {
                statements.push(self.statement(format!("m{}{}", i + 1, j + 1), entry));
            }
        }
        statements
    }

    fn statement(&self, name: String, expr: &Expr) -> Statement {
        Statement {
            name,
            expression: render(&expr.to_node(), self.syntax.as_ref()),
        }
    }

    fn finish(&self, statements: Vec<Statement>) -> GeneratedCode {
        let rendered = statements
            .iter()
            .map(|s| self.syntax.binding(&s.name, &s.expression))
            .collect();
        GeneratedCode {
            target: self.target,
            statements,
            rendered,
        }
    }
}

use std::collections::HashMap;

use crate::codegen::Target;
use crate::model::{inertia_identifier, ArmModel, Role};

/// Identifier map from model symbols to target-language identifiers.
///
/// Applying it is idempotent: a renamed identifier is never itself a key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Naming {
    renames: HashMap<String, String>,
}

impl Naming {
    /// Identity map
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames derived from the parameter roles of `model`.
    ///
    /// Inertias become `inert<k>` for both targets. OCaml additionally primes
    /// masses and lengths (`m1'`), matching the names of the consuming program.
    pub fn for_model(model: &ArmModel, target: Target) -> Self {
        let mut naming = Naming::new();
        for parameter in model.parameters() {
            let renamed = match (parameter.role, parameter.link, target) {
                (Role::Inertia, Some(k), _) => inertia_identifier(k),
                (Role::Mass | Role::Length, _, Target::OCaml) => format!("{}'", parameter.name),
                _ => continue,
            };
            naming = naming.rename(parameter.name, renamed);
        }
        naming
    }

    /// Adds one rename. A target that is already a source is ignored, as is a
    /// source that is already a target, so that application stays idempotent.
    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        let (from, to) = (from.into(), to.into());
        let collides = self.renames.contains_key(&to) || self.renames.values().any(|v| *v == from);
        if collides {
            tracing::warn!("Ignoring rename {} -> {}: it would chain with another rename", from, to);
        } else if from != to {
            self.renames.insert(from, to);
        }
        self
    }

    pub fn apply(&self, name: &str) -> String {
        self.renames
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }
}

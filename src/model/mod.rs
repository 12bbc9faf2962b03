//! Planar serial arm models
//!
//! An [`ArmModel`] is the immutable context every derivation stage reads from:
//! which joints exist, which symbols name the masses, lengths and inertias, and
//! which symbol is gravity. Models are plain data and can be loaded from JSON:
//!
//! ```
//! use planar_eom::model::ArmModel;
//!
//! let json = r#"{
//!     "id": "single_pendulum",
//!     "links": [ { "joint": "q", "mass": "m", "length": "l" } ]
//! }"#;
//!
//! let model = ArmModel::from_str(json).unwrap();
//! assert_eq!(model.coordinates(), vec!["q"]);
//! assert_eq!(model.gravity, "g");
//! ```

pub mod energy;
mod error;
pub mod kinematics;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use crate::symbolic::{coordinate_label, Atom, Bindings};

pub use energy::Energy;
pub use error::ModelError;
pub use kinematics::Body;

/// A serial chain of revolute links with an optional point mass at the tip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArmModel {
    /// Model identifier
    pub id: String,

    /// Gravity symbol; gravity acts along −y
    #[serde(default = "default_gravity")]
    pub gravity: String,

    /// Links from the base outwards
    pub links: Vec<Link>,

    /// Grasped mass held at the tip of the last link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

/// A uniform link whose center of mass sits at half its length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    /// Joint angle relative to the previous link (or the x axis for the first)
    pub joint: String,
    pub mass: String,
    pub length: String,
    /// Moment of inertia about the center of mass; omitted for a point mass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inertia: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Payload {
    pub mass: String,
}

fn default_gravity() -> String {
    "g".to_string()
}

/// Sign constraint declared for a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assumption {
    Positive,
    NonNegative,
}

impl Assumption {
    pub fn holds(&self, value: f64) -> bool {
        match self {
            Assumption::Positive => value.is_finite() && value > 0.0,
            Assumption::NonNegative => value.is_finite() && value >= 0.0,
        }
    }
}

impl fmt::Display for Assumption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assumption::Positive => write!(f, "positive"),
            Assumption::NonNegative => write!(f, "non-negative"),
        }
    }
}

/// What a parameter means physically
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Mass,
    Length,
    Inertia,
    Gravity,
}

/// A declared parameter of the model
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub role: Role,
    /// 1-based index of the owning link; `None` for the payload and gravity
    pub link: Option<usize>,
    pub assumption: Assumption,
}

impl ArmModel {
    /// Two links with inertias plus a grasped mass at the tip.
    pub fn two_link_with_payload() -> Self {
        let link = |k: usize| Link {
            joint: format!("q{}", k),
            mass: format!("m{}", k),
            length: format!("l{}", k),
            inertia: Some(format!("I{}", k)),
        };
        ArmModel {
            id: "two_link_with_payload".to_string(),
            gravity: default_gravity(),
            links: vec![link(1), link(2)],
            payload: Some(Payload {
                mass: "m3".to_string(),
            }),
        }
    }

    /// Parse and validate a model from JSON.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> Result<Self, ModelError> {
        let model: ArmModel = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Read, parse and validate a model file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_str(&json)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.links.is_empty() {
            return Err(ModelError::NoLinks(self.id.clone()));
        }

        // identifiers taken by coordinate derivatives and renamed inertias
        let mut reserved: HashMap<String, String> = HashMap::new();
        for (i, link) in self.links.iter().enumerate() {
            for order in 1..=2 {
                reserved.insert(
                    coordinate_label(&link.joint, order),
                    format!("derivative of joint '{}'", link.joint),
                );
            }
            if link.inertia.is_some() {
                reserved.insert(inertia_identifier(i + 1), format!("inertia of link {}", i + 1));
            }
        }

        let mut seen = HashSet::new();
        let mut declare = |name: &str, role: &str, owns: Option<&str>| -> Result<(), ModelError> {
            if !is_identifier(name) {
                return Err(ModelError::invalid_name(name, role));
            }
            if let Some(holder) = reserved.get(name) {
                if owns != Some(name) {
                    return Err(ModelError::ReservedName {
                        name: name.to_string(),
                        holder: holder.clone(),
                    });
                }
            }
            if !seen.insert(name.to_string()) {
                return Err(ModelError::DuplicateSymbol {
                    name: name.to_string(),
                });
            }
            Ok(())
        };

        for link in &self.links {
            declare(&link.joint, "joint", None)?;
        }
        for parameter in self.parameters() {
            // an inertia may already carry the name it would be renamed to
            let owns = match (parameter.role, parameter.link) {
                (Role::Inertia, Some(k)) => Some(inertia_identifier(k)),
                _ => None,
            };
            declare(&parameter.name, role_name(parameter.role), owns.as_deref())?;
        }
        Ok(())
    }

    /// Joint coordinate names, base first
    pub fn coordinates(&self) -> Vec<String> {
        self.links.iter().map(|link| link.joint.clone()).collect()
    }

    pub fn gravity_atom(&self) -> Atom {
        Atom::param(self.gravity.clone())
    }

    /// All parameters in declaration order, gravity last
    pub fn parameters(&self) -> Vec<Parameter> {
        let mut parameters = Vec::new();
        for (i, link) in self.links.iter().enumerate() {
            let k = Some(i + 1);
            parameters.push(positive(&link.mass, Role::Mass, k));
            parameters.push(positive(&link.length, Role::Length, k));
            if let Some(inertia) = &link.inertia {
                parameters.push(positive(inertia, Role::Inertia, k));
            }
        }
        if let Some(payload) = &self.payload {
            parameters.push(positive(&payload.mass, Role::Mass, None));
        }
        parameters.push(Parameter {
            name: self.gravity.clone(),
            role: Role::Gravity,
            link: None,
            assumption: Assumption::NonNegative,
        });
        parameters
    }

    /// Checks that every parameter is bound to a value honouring its assumption.
    pub fn check_bindings(&self, bindings: &Bindings) -> Result<(), ModelError> {
        for parameter in self.parameters() {
            let value = bindings
                .value(&Atom::param(parameter.name.clone()))
                .ok_or_else(|| ModelError::MissingValue(parameter.name.clone()))?;
            if !parameter.assumption.holds(value) {
                return Err(ModelError::AssumptionViolated {
                    name: parameter.name,
                    value,
                    assumption: parameter.assumption.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for ArmModel {
    fn default() -> Self {
        Self::two_link_with_payload()
    }
}

fn positive(name: &str, role: Role, link: Option<usize>) -> Parameter {
    Parameter {
        name: name.to_string(),
        role,
        link,
        assumption: Assumption::Positive,
    }
}

/// Identifier the inertia of link `k` (1-based) is emitted as
pub fn inertia_identifier(k: usize) -> String {
    format!("inert{}", k)
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::Mass => "mass",
        Role::Length => "length",
        Role::Inertia => "inertia",
        Role::Gravity => "gravity",
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_parameters() {
        let model = ArmModel::two_link_with_payload();
        let names: Vec<_> = model.parameters().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["m1", "l1", "I1", "m2", "l2", "I2", "m3", "g"]);
        assert_eq!(model.coordinates(), vec!["q1", "q2"]);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip_of_default() {
        let model = ArmModel::two_link_with_payload();
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(ArmModel::from_str(&json).unwrap(), model);
    }

    #[test]
    fn test_rejects_duplicate_symbols() {
        let json = r#"{
            "id": "bad",
            "links": [
                { "joint": "q1", "mass": "m", "length": "l1" },
                { "joint": "q2", "mass": "m", "length": "l2" }
            ]
        }"#;
        let err = ArmModel::from_str(json).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateSymbol { ref name } if name == "m"));
    }

    #[test]
    fn test_rejects_coordinate_named_like_parameter() {
        let json = r#"{
            "id": "bad",
            "links": [ { "joint": "g", "mass": "m1", "length": "l1" } ]
        }"#;
        assert!(matches!(
            ArmModel::from_str(json),
            Err(ModelError::DuplicateSymbol { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_chain_and_bad_names() {
        let empty = r#"{ "id": "empty", "links": [] }"#;
        assert!(matches!(
            ArmModel::from_str(empty),
            Err(ModelError::NoLinks(_))
        ));

        let bad_name = r#"{
            "id": "bad",
            "links": [ { "joint": "q 1", "mass": "m1", "length": "l1" } ]
        }"#;
        assert!(matches!(
            ArmModel::from_str(bad_name),
            Err(ModelError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_rejects_parameter_named_like_a_renamed_inertia() {
        let json = r#"{
            "id": "bad",
            "links": [
                { "joint": "q1", "mass": "m1", "length": "l1", "inertia": "I1" },
                { "joint": "q2", "mass": "inert1", "length": "l2" }
            ]
        }"#;
        let err = ArmModel::from_str(json).unwrap_err();
        assert!(matches!(err, ModelError::ReservedName { ref name, .. } if name == "inert1"));

        // the inertia itself may use that name
        let own = r#"{
            "id": "ok",
            "links": [ { "joint": "q1", "mass": "m1", "length": "l1", "inertia": "inert1" } ]
        }"#;
        assert!(ArmModel::from_str(own).is_ok());
    }

    #[test]
    fn test_rejects_parameter_named_like_a_joint_rate() {
        for name in ["dq", "ddq"] {
            let json = format!(
                r#"{{ "id": "bad", "links": [ {{ "joint": "q", "mass": "{}", "length": "l" }} ] }}"#,
                name
            );
            assert!(matches!(
                ArmModel::from_str(&json),
                Err(ModelError::ReservedName { .. })
            ));
        }

        let joint_clash = r#"{
            "id": "bad",
            "links": [
                { "joint": "q", "mass": "m1", "length": "l1" },
                { "joint": "dq", "mass": "m2", "length": "l2" }
            ]
        }"#;
        assert!(ArmModel::from_str(joint_clash).is_err());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let json = r#"{ "id": "x", "links": [], "damping": "b" }"#;
        assert!(matches!(
            ArmModel::from_str(json),
            Err(ModelError::ParseError(_))
        ));
    }

    #[test]
    fn test_check_bindings() {
        let model = ArmModel::two_link_with_payload();
        let mut bindings = Bindings::new();
        for p in model.parameters() {
            bindings.set_param(p.name, 1.0);
        }
        assert!(model.check_bindings(&bindings).is_ok());

        bindings.set_param("g", 0.0);
        assert!(model.check_bindings(&bindings).is_ok());

        bindings.set_param("I1", 0.0);
        assert!(matches!(
            model.check_bindings(&bindings),
            Err(ModelError::AssumptionViolated { ref name, .. }) if name == "I1"
        ));

        let partial = Bindings::new().param("m1", 1.0);
        assert!(matches!(
            model.check_bindings(&partial),
            Err(ModelError::MissingValue(_))
        ));
    }
}

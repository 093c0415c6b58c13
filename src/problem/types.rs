use crate::generator::JavaType;
use serde::Deserialize;

/// A coding problem as served by the problem store
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Problem {
    /// Unique key, e.g. `fib` or `2-sum`
    pub id: String,
    /// The method the user has to implement
    #[serde(rename = "func")]
    pub function: Function,
}

/// Signature and documentation of the method to generate
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Function {
    /// Method name, emitted verbatim
    pub name: String,
    /// Formal parameters in declaration order
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Return type and its `@return` comment
    #[serde(rename = "returnStatement")]
    pub returns: ReturnStatement,
}

/// A formal parameter of the generated method
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ParameterRecord")]
pub struct Parameter {
    /// Declared variable name
    pub name: String,
    /// Declared type
    pub java_type: JavaType,
    /// Text for the `@param` line
    pub comment: String,
}

/// Return type of the generated method
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ReturnRecord")]
pub struct ReturnStatement {
    /// Declared return type; an empty upstream type is `void`
    pub java_type: JavaType,
    /// Text for the `@return` line
    pub comment: String,
}

/// Parameter exactly as it appears on the wire.
///
/// `generic` and `comment` may be missing or `null` upstream; both default to
/// the empty string.
#[derive(Debug, Deserialize)]
struct ParameterRecord {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    generic: Option<String>,
    #[serde(default)]
    comment: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReturnRecord {
    #[serde(rename = "type", default)]
    ty: Option<String>,
    #[serde(default)]
    generic: Option<String>,
    #[serde(default)]
    comment: Option<String>,
}

impl From<ParameterRecord> for Parameter {
    fn from(record: ParameterRecord) -> Self {
        let generic = record.generic.unwrap_or_default();
        Parameter {
            java_type: JavaType::from_descriptor(&record.ty, &generic),
            name: record.name,
            comment: record.comment.unwrap_or_default(),
        }
    }
}

impl From<ReturnRecord> for ReturnStatement {
    fn from(record: ReturnRecord) -> Self {
        let ty = record.ty.unwrap_or_default();
        let generic = record.generic.unwrap_or_default();
        ReturnStatement {
            java_type: JavaType::from_return_descriptor(&ty, &generic),
            comment: record.comment.unwrap_or_default(),
        }
    }
}

impl Parameter {
    /// Build a parameter from raw descriptor strings.
    pub fn new(name: &str, ty: &str, generic: &str, comment: &str) -> Self {
        Parameter {
            name: name.to_string(),
            java_type: JavaType::from_descriptor(ty, generic),
            comment: comment.to_string(),
        }
    }
}

impl ReturnStatement {
    /// Build a return statement from raw descriptor strings.
    pub fn new(ty: &str, generic: &str, comment: &str) -> Self {
        ReturnStatement {
            java_type: JavaType::from_return_descriptor(ty, generic),
            comment: comment.to_string(),
        }
    }
}

//! # Variant Extraction
//!
//! The MathOptFormat schema encodes every family of sets and functions as a
//! `oneOf` union. Each branch names its variant through a discriminator
//! property (`head`) that is either a single `const` string or an `enum`
//! of strings sharing one description:
//!
//! ```json
//! {"description": "[lower, ∞)", "examples": ["..."],
//!  "properties": {"head": {"const": "GreaterThan"}, "lower": {...}}}
//! ```
//!
//! [`extract`] turns one such branch into [`VariantRecord`]s. Branches that
//! do not follow the pattern produce no records; they are never an error.

use serde::Serialize;
use serde_json::Value;

/// The discriminator property used by the MathOptFormat schema.
pub const DEFAULT_DISCRIMINATOR: &str = "head";

/// How a branch declares the variant name(s) it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadKind {
    /// `{"const": "name"}`: the branch covers exactly one variant.
    Const(String),
    /// `{"enum": ["a", "b", ...]}`: the branch covers several variants
    /// that share a description and example.
    Enum(Vec<String>),
}

impl HeadKind {
    /// Read the discriminator of `branch`, i.e. `properties.<discriminator>`.
    ///
    /// `const` wins over `enum` when both are present. Returns `None` when
    /// the branch has no discriminator object or its `const` is not a
    /// string. Non-string `enum` members are dropped.
    pub fn from_branch(branch: &Value, discriminator: &str) -> Option<Self> {
        let head = branch
            .get("properties")?
            .get(discriminator)?
            .as_object()?;
        if let Some(value) = head.get("const") {
            return value.as_str().map(|name| HeadKind::Const(name.to_string()));
        }
        let names = head
            .get("enum")?
            .as_array()?
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
        Some(HeadKind::Enum(names))
    }

    /// The variant names in declaration order.
    pub fn names(&self) -> &[String] {
        match self {
            HeadKind::Const(name) => std::slice::from_ref(name),
            HeadKind::Enum(names) => names,
        }
    }
}

/// One variant of a discriminated union, as listed in the summary tables.
///
/// Fields hold the schema text verbatim; markdown escaping happens in
/// [`crate::render`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantRecord {
    /// Discriminator value, e.g. `GreaterThan`.
    pub head: String,
    /// The branch's `description`, or empty.
    pub description: String,
    /// The branch's first example, or empty.
    pub example: String,
}

/// Extract the variants declared by one `oneOf` branch.
///
/// A `const` head yields one record, an `enum` head one record per string
/// member in order, all sharing the branch's description and example.
pub fn extract(branch: &Value, discriminator: &str) -> Vec<VariantRecord> {
    let Some(head) = HeadKind::from_branch(branch, discriminator) else {
        return Vec::new();
    };
    let description = branch_description(branch).to_string();
    let example = branch_example(branch);
    head.names()
        .iter()
        .filter(|name| !name.is_empty())
        .map(|name| VariantRecord {
            head: name.clone(),
            description: description.clone(),
            example: example.clone(),
        })
        .collect()
}

/// The branch's own `description` string, or `""`.
pub fn branch_description(branch: &Value) -> &str {
    branch
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

/// First entry of `examples`, falling back to a singular `example` string.
///
/// Non-string examples are rendered as compact JSON.
fn branch_example(branch: &Value) -> String {
    match branch.get("examples").and_then(Value::as_array) {
        Some(examples) => match examples.first() {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        },
        None => branch
            .get("example")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}

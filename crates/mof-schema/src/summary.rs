//! # Schema Summaries
//!
//! Walks the schema's `definitions` and collects the variant records that
//! make up the README tables:
//!
//! - the four categories `scalar_sets`, `vector_sets`, `scalar_functions`
//!   and `vector_functions`, one [`CategoryTable`] each;
//! - the `NonlinearTerm` union, split into operators (classified by arity)
//!   and leaf nodes.
//!
//! Schema branch order is preserved everywhere; the rendered tables list
//! variants in the order the schema declares them.

use serde::Serialize;
use serde_json::Value;

use crate::schema::{Schema, SchemaError};
use crate::variant::{self, VariantRecord, DEFAULT_DISCRIMINATOR};

/// Definition key of the nonlinear expression-graph node union.
pub const NONLINEAR_TERM_KEY: &str = "NonlinearTerm";

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// The summarized families of sets and functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    ScalarSets,
    VectorSets,
    ScalarFunctions,
    VectorFunctions,
}

impl Category {
    /// All categories in rendering order.
    pub const ALL: [Category; 4] = [
        Category::ScalarSets,
        Category::VectorSets,
        Category::ScalarFunctions,
        Category::VectorFunctions,
    ];

    /// Key under the schema's `definitions`.
    pub fn key(self) -> &'static str {
        match self {
            Category::ScalarSets => "scalar_sets",
            Category::VectorSets => "vector_sets",
            Category::ScalarFunctions => "scalar_functions",
            Category::VectorFunctions => "vector_functions",
        }
    }

    /// Heading used in rendered output.
    pub fn title(self) -> &'static str {
        match self {
            Category::ScalarSets => "Scalar Sets",
            Category::VectorSets => "Vector Sets",
            Category::ScalarFunctions => "Scalar Functions",
            Category::VectorFunctions => "Vector Functions",
        }
    }
}

/// The variants of one category, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTable {
    /// `definitions` key the table was built from.
    pub key: String,
    /// Heading for the table.
    pub title: String,
    /// One record per variant.
    pub records: Vec<VariantRecord>,
}

// ---------------------------------------------------------------------------
// Nonlinear operators
// ---------------------------------------------------------------------------

/// Operand count of a nonlinear operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Arity {
    Unary,
    Binary,
    #[serde(rename = "N-ary")]
    NAry,
}

/// Branch descriptions that mark a `NonlinearTerm` branch as a group of
/// operators. Any other description marks a leaf node.
pub const ARITY_TAGS: &[(&str, Arity)] = &[
    ("Unary operators", Arity::Unary),
    ("Binary operators", Arity::Binary),
    ("N-ary operators", Arity::NAry),
];

impl Arity {
    /// Classify a branch by its exact `description` text.
    pub fn from_description(description: &str) -> Option<Self> {
        ARITY_TAGS
            .iter()
            .find(|(tag, _)| *tag == description)
            .map(|(_, arity)| *arity)
    }

    /// Label used in the operator table.
    pub fn label(self) -> &'static str {
        match self {
            Arity::Unary => "Unary",
            Arity::Binary => "Binary",
            Arity::NAry => "N-ary",
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A nonlinear operator and its arity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatorRecord {
    pub head: String,
    pub arity: Arity,
}

/// The classified contents of the `NonlinearTerm` union.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NonlinearSummary {
    /// Operators in branch order, arities interleaved as declared.
    pub operators: Vec<OperatorRecord>,
    /// Leaf node variants in branch order.
    pub leaves: Vec<VariantRecord>,
    /// Leaf branches dropped because they did not declare exactly one
    /// variant.
    pub skipped: usize,
}

/// Everything needed to render the full summary document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaSummary {
    pub scalar_sets: CategoryTable,
    pub vector_sets: CategoryTable,
    pub scalar_functions: CategoryTable,
    pub vector_functions: CategoryTable,
    pub nonlinear: NonlinearSummary,
}

// ---------------------------------------------------------------------------
// Summarizer
// ---------------------------------------------------------------------------

/// Builds summaries from a borrowed [`Schema`].
#[derive(Debug, Clone)]
pub struct Summarizer<'a> {
    schema: &'a Schema,
    discriminator: String,
}

impl<'a> Summarizer<'a> {
    /// A summarizer using the `head` discriminator.
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            discriminator: DEFAULT_DISCRIMINATOR.to_string(),
        }
    }

    /// Use `discriminator` instead of `head` to identify variants.
    pub fn with_discriminator(mut self, discriminator: impl Into<String>) -> Self {
        self.discriminator = discriminator.into();
        self
    }

    /// The discriminator property in use.
    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    /// Summarize one of the four standard categories.
    pub fn category(&self, category: Category) -> Result<CategoryTable, SchemaError> {
        self.category_by_key(category.key(), category.title())
    }

    /// Summarize `definitions[key].oneOf` under the given title.
    ///
    /// # Errors
    ///
    /// Fails if `key` is missing from `definitions` or is not an object
    /// with a `oneOf` array.
    pub fn category_by_key(&self, key: &str, title: &str) -> Result<CategoryTable, SchemaError> {
        let records = self
            .schema
            .one_of(key)?
            .iter()
            .flat_map(|branch| variant::extract(branch, &self.discriminator))
            .collect::<Vec<_>>();
        tracing::debug!(key, variants = records.len(), "summarized category");
        Ok(CategoryTable {
            key: key.to_string(),
            title: title.to_string(),
            records,
        })
    }

    /// Classify the branches of `definitions.NonlinearTerm.oneOf`.
    ///
    /// Branches tagged with one of [`ARITY_TAGS`] contribute operators.
    /// Every other branch must declare exactly one leaf variant; branches
    /// that do not are logged and skipped.
    pub fn nonlinear(&self) -> Result<NonlinearSummary, SchemaError> {
        let mut summary = NonlinearSummary::default();
        for (index, branch) in self.schema.one_of(NONLINEAR_TERM_KEY)?.iter().enumerate() {
            let records = variant::extract(branch, &self.discriminator);
            let description = variant::branch_description(branch);
            match Arity::from_description(description) {
                Some(arity) => {
                    summary
                        .operators
                        .extend(records.into_iter().map(|record| OperatorRecord {
                            head: record.head,
                            arity,
                        }));
                }
                None => match <[VariantRecord; 1]>::try_from(records) {
                    Ok([leaf]) => summary.leaves.push(leaf),
                    Err(records) => {
                        tracing::warn!(
                            branch = index,
                            description,
                            variants = records.len(),
                            object = %compact(branch),
                            "unsupported nonlinear leaf branch, skipping"
                        );
                        summary.skipped += 1;
                    }
                },
            }
        }
        tracing::debug!(
            operators = summary.operators.len(),
            leaves = summary.leaves.len(),
            skipped = summary.skipped,
            "classified nonlinear terms"
        );
        Ok(summary)
    }

    /// Summarize every category and the nonlinear terms.
    pub fn summarize(&self) -> Result<SchemaSummary, SchemaError> {
        Ok(SchemaSummary {
            scalar_sets: self.category(Category::ScalarSets)?,
            vector_sets: self.category(Category::VectorSets)?,
            scalar_functions: self.category(Category::ScalarFunctions)?,
            vector_functions: self.category(Category::VectorFunctions)?,
            nonlinear: self.nonlinear()?,
        })
    }
}

fn compact(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema_with(definitions: Value) -> Schema {
        Schema::from_value(json!({ "definitions": definitions }), "test")
    }

    fn category_schema() -> Schema {
        schema_with(json!({
            "scalar_sets": {"oneOf": [
                {"description": "d1", "examples": ["e1"], "properties": {"head": {"const": "Zeros"}}},
                {"description": "no head"},
                {"description": "cones", "properties": {"head": {"enum": ["Reals", "Nonnegatives"]}}}
            ]},
            "vector_sets": {"oneOf": []},
            "scalar_functions": {"oneOf": [
                {"properties": {"head": {"const": "SingleVariable"}}}
            ]},
            "vector_functions": {"oneOf": [
                {"properties": {"head": {"const": "VectorOfVariables"}}}
            ]},
            "NonlinearTerm": {"oneOf": []}
        }))
    }

    #[test]
    fn category_preserves_branch_order() {
        let schema = category_schema();
        let table = Summarizer::new(&schema)
            .category(Category::ScalarSets)
            .unwrap();
        assert_eq!(table.key, "scalar_sets");
        assert_eq!(table.title, "Scalar Sets");
        let heads: Vec<&str> = table.records.iter().map(|r| r.head.as_str()).collect();
        assert_eq!(heads, ["Zeros", "Reals", "Nonnegatives"]);
        assert_eq!(table.records[0].description, "d1");
        assert_eq!(table.records[0].example, "e1");
        assert_eq!(table.records[2].description, "cones");
    }

    #[test]
    fn empty_one_of_yields_empty_table() {
        let schema = category_schema();
        let table = Summarizer::new(&schema)
            .category(Category::VectorSets)
            .unwrap();
        assert!(table.records.is_empty());
    }

    #[test]
    fn missing_category_is_fatal() {
        let schema = schema_with(json!({"scalar_sets": {"oneOf": []}}));
        let err = Summarizer::new(&schema)
            .category(Category::VectorFunctions)
            .unwrap_err();
        assert!(
            matches!(err, SchemaError::MissingDefinition { ref key } if key == "vector_functions"),
            "Expected MissingDefinition, got: {err}"
        );
    }

    #[test]
    fn summarize_propagates_shape_errors() {
        let schema = schema_with(json!({
            "scalar_sets": {"oneOf": []},
            "vector_sets": {"anyOf": []}
        }));
        let err = Summarizer::new(&schema).summarize().unwrap_err();
        assert!(matches!(err, SchemaError::MalformedDefinition { ref key, .. } if key == "vector_sets"));
    }

    #[test]
    fn arity_lookup_is_exact() {
        assert_eq!(Arity::from_description("Unary operators"), Some(Arity::Unary));
        assert_eq!(Arity::from_description("Binary operators"), Some(Arity::Binary));
        assert_eq!(Arity::from_description("N-ary operators"), Some(Arity::NAry));
        assert_eq!(Arity::from_description("unary operators"), None);
        assert_eq!(Arity::from_description("Unary operators "), None);
        assert_eq!(Arity::NAry.to_string(), "N-ary");
    }

    #[test]
    fn unary_enum_becomes_operators_in_order() {
        let schema = schema_with(json!({
            "NonlinearTerm": {"oneOf": [
                {"description": "Unary operators", "properties": {"head": {"enum": ["log", "exp"]}}}
            ]}
        }));
        let nonlinear = Summarizer::new(&schema).nonlinear().unwrap();
        assert_eq!(
            nonlinear.operators,
            vec![
                OperatorRecord { head: "log".to_string(), arity: Arity::Unary },
                OperatorRecord { head: "exp".to_string(), arity: Arity::Unary },
            ]
        );
        assert!(nonlinear.leaves.is_empty());
    }

    #[test]
    fn operators_interleave_in_branch_order() {
        let schema = schema_with(json!({
            "NonlinearTerm": {"oneOf": [
                {"description": "N-ary operators", "properties": {"head": {"enum": ["+"]}}},
                {"description": "A real constant.", "examples": ["1.0"], "properties": {"head": {"const": "real"}}},
                {"description": "Unary operators", "properties": {"head": {"enum": ["sin"]}}},
                {"description": "Binary operators", "properties": {"head": {"const": "^"}}},
                {"description": "A variable.", "properties": {"head": {"const": "variable"}}}
            ]}
        }));
        let nonlinear = Summarizer::new(&schema).nonlinear().unwrap();
        let operators: Vec<(&str, Arity)> = nonlinear
            .operators
            .iter()
            .map(|op| (op.head.as_str(), op.arity))
            .collect();
        assert_eq!(
            operators,
            [("+", Arity::NAry), ("sin", Arity::Unary), ("^", Arity::Binary)]
        );
        let leaves: Vec<&str> = nonlinear.leaves.iter().map(|l| l.head.as_str()).collect();
        assert_eq!(leaves, ["real", "variable"]);
        assert_eq!(nonlinear.leaves[0].example, "1.0");
        assert_eq!(nonlinear.skipped, 0);
    }

    #[test]
    fn leaf_with_unexpected_cardinality_is_skipped() {
        let schema = schema_with(json!({
            "NonlinearTerm": {"oneOf": [
                {"description": "Constants", "properties": {"head": {"enum": ["real", "complex"]}}},
                {"description": "Nothing to extract"},
                {"description": "A variable.", "properties": {"head": {"const": "variable"}}}
            ]}
        }));
        let nonlinear = Summarizer::new(&schema).nonlinear().unwrap();
        assert_eq!(nonlinear.skipped, 2);
        assert_eq!(nonlinear.leaves.len(), 1);
        assert_eq!(nonlinear.leaves[0].head, "variable");
    }

    #[test]
    fn missing_nonlinear_term_is_fatal() {
        let schema = schema_with(json!({}));
        assert!(matches!(
            Summarizer::new(&schema).nonlinear().unwrap_err(),
            SchemaError::MissingDefinition { .. }
        ));
    }

    #[test]
    fn discriminator_is_configurable() {
        let schema = schema_with(json!({
            "scalar_sets": {"oneOf": [{"properties": {"type": {"const": "ZeroOne"}}}]}
        }));
        let summarizer = Summarizer::new(&schema).with_discriminator("type");
        assert_eq!(summarizer.discriminator(), "type");
        let table = summarizer.category(Category::ScalarSets).unwrap();
        assert_eq!(table.records[0].head, "ZeroOne");
    }
}

//! # Markdown Rendering
//!
//! Renders summaries as GitHub-flavored markdown tables. Two layouts are
//! produced:
//!
//! - [`render_summary`]: the standalone document printed by
//!   `mof summarize`, covering sets, functions and nonlinear terms;
//! - [`ReadmeSections`]: the set and function fragments spliced into the
//!   README template by [`render_with_template`].
//!
//! Cells never contain an unescaped `|` or a line break; see
//! [`escape_cell`].

use std::borrow::Cow;

use crate::summary::{CategoryTable, OperatorRecord, SchemaSummary};
use crate::variant::VariantRecord;

/// README placeholder replaced by the set summary.
pub const SET_SUMMARY_PLACEHOLDER: &str = "[[[AUTOMATICALLY_GENERATED_SET_SUMMARY]]]";

/// README placeholder replaced by the function summary.
pub const FUNCTION_SUMMARY_PLACEHOLDER: &str = "[[[AUTOMATICALLY_GENERATED_FUNCTION_SUMMARY]]]";

const VARIANT_HEADER: &str = "| Name | Description | Example |\n| ---- | ----------- | ------- |\n";
const OPERATOR_HEADER: &str = "| Name | Arity |\n| ---- | ----- |\n";

/// Escape `text` so it stays inside one table cell.
///
/// Every `|` ends up behind an odd number of backslashes, so a backslash
/// already in front of it cannot cancel the escape. Line breaks become
/// `<br>`.
pub fn escape_cell(text: &str) -> Cow<'_, str> {
    if !text.contains(|c: char| matches!(c, '|' | '\n' | '\r')) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    let mut backslashes = 0usize;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '|' => {
                // The run of `backslashes` is already in `out`; double it and
                // add one more for the pipe itself.
                out.extend(std::iter::repeat('\\').take(backslashes + 1));
                out.push('|');
            }
            '\r' if chars.peek() == Some(&'\n') => continue,
            '\n' | '\r' => out.push_str("<br>"),
            other => out.push(other),
        }
        backslashes = if c == '\\' { backslashes + 1 } else { 0 };
    }
    Cow::Owned(out)
}

/// Render a name/description/example table, one row per record.
pub fn render_variant_table(records: &[VariantRecord]) -> String {
    let mut out = String::from(VARIANT_HEADER);
    for record in records {
        out.push_str(&format!(
            "| `\"{}\"` | {} | {} |\n",
            escape_cell(&record.head),
            escape_cell(&record.description),
            escape_cell(&record.example),
        ));
    }
    out
}

/// Render the leaf-node table of the nonlinear summary.
pub fn render_leaf_table(leaves: &[VariantRecord]) -> String {
    render_variant_table(leaves)
}

/// Render the name/arity operator table.
pub fn render_operator_table(operators: &[OperatorRecord]) -> String {
    let mut out = String::from(OPERATOR_HEADER);
    for op in operators {
        out.push_str(&format!(
            "| `\"{}\"` | {} |\n",
            escape_cell(&op.head),
            op.arity
        ));
    }
    out
}

impl CategoryTable {
    /// The table without a heading. Every line ends in a newline.
    pub fn to_markdown(&self) -> String {
        render_variant_table(&self.records)
    }

    /// `#### <title>`, a blank line and the table, without trailing newline.
    fn to_readme_section(&self) -> String {
        let table = self.to_markdown();
        format!("#### {}\n\n{}", self.title, table.trim_end_matches('\n'))
    }
}

/// Render the full summary document.
pub fn render_summary(summary: &SchemaSummary) -> String {
    let mut out = String::new();
    out.push_str("## Sets\n\n");
    push_section(&mut out, "### Scalar Sets", &summary.scalar_sets.to_markdown());
    out.push('\n');
    push_section(&mut out, "### Vector Sets", &summary.vector_sets.to_markdown());
    out.push('\n');
    out.push_str("## Functions\n\n");
    push_section(&mut out, "### Scalar Functions", &summary.scalar_functions.to_markdown());
    out.push('\n');
    push_section(&mut out, "### Vector Functions", &summary.vector_functions.to_markdown());
    out.push('\n');
    out.push_str("### Nonlinear functions\n\n");
    push_section(&mut out, "#### Leaf nodes", &render_leaf_table(&summary.nonlinear.leaves));
    out.push('\n');
    push_section(
        &mut out,
        "#### Operators",
        &render_operator_table(&summary.nonlinear.operators),
    );
    out
}

fn push_section(out: &mut String, heading: &str, body: &str) {
    out.push_str(heading);
    out.push_str("\n\n");
    out.push_str(body);
}

/// The two README fragments generated from the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeSections {
    /// Scalar and vector set tables.
    pub set_summary: String,
    /// Scalar and vector function tables.
    pub function_summary: String,
}

impl ReadmeSections {
    pub fn from_summary(summary: &SchemaSummary) -> Self {
        Self {
            set_summary: join_sections(&summary.scalar_sets, &summary.vector_sets),
            function_summary: join_sections(&summary.scalar_functions, &summary.vector_functions),
        }
    }

    /// Both fragments separated by a blank line, as printed when no
    /// template is given.
    pub fn to_markdown(&self) -> String {
        format!("{}\n\n{}", self.set_summary, self.function_summary)
    }

    /// Splice the fragments into `template`.
    pub fn apply(&self, template: &str) -> String {
        render_with_template(template, &self.set_summary, &self.function_summary)
    }
}

fn join_sections(first: &CategoryTable, second: &CategoryTable) -> String {
    format!("{}\n\n{}", first.to_readme_section(), second.to_readme_section())
}

/// Replace the first occurrence of each placeholder. A placeholder missing
/// from `template` is left alone.
pub fn render_with_template(template: &str, set_summary: &str, function_summary: &str) -> String {
    template
        .replacen(SET_SUMMARY_PLACEHOLDER, set_summary, 1)
        .replacen(FUNCTION_SUMMARY_PLACEHOLDER, function_summary, 1)
}

//! Filter encoder — converts selected aggregation terms into a filter string.
//!
//! Output shape: `field:"term"|"term",field2:"term"`.
//!
//! - **Order**: fields and terms keep their input order; only `selected`
//!   terms are written and fields with no selected term are skipped.
//! - **Quoting**: every term is quoted. Inside quotes `"` becomes `\"` and
//!   `\` becomes `\\`, so reserved characters (`|`, `,`, `:`) and whitespace
//!   in keys never need further treatment. An empty key encodes as `""`.
//! - **Field names**: written bare, with `\`, `:`, `,`, `|` and `"`
//!   backslash-escaped so the first unescaped `:` always ends the field.
//!
//! # Example
//! ```
//! use refine_core::{fields_to_string, FieldAggregation, ResultTerm};
//! let aggs = vec![
//!     FieldAggregation::new("author", vec![ResultTerm::selected("News Staff")]),
//!     FieldAggregation::new("subject", vec![ResultTerm::selected("Animals")]),
//! ];
//! assert_eq!(
//!     fields_to_string(&aggs).unwrap(),
//!     r#"author:"News Staff",subject:"Animals""#
//! );
//! ```

use crate::error::{FilterError, Result};
use crate::types::FieldAggregation;

/// Encode the selected terms of `aggregations` into a filter string.
///
/// Returns an empty string when nothing is selected. Fails with
/// [`FilterError::InvalidAggregation`] if any aggregation has an empty field
/// name, whether or not it has selected terms.
pub fn fields_to_string(aggregations: &[FieldAggregation]) -> Result<String> {
    let mut out = String::new();
    for (index, aggregation) in aggregations.iter().enumerate() {
        if aggregation.field.is_empty() {
            return Err(FilterError::InvalidAggregation { index });
        }
        encode_clause(aggregation, &mut out);
    }
    Ok(out)
}

/// Encode a JSON array of aggregations into a filter string.
pub fn encode_json(json: &str) -> Result<String> {
    let aggregations: Vec<FieldAggregation> = serde_json::from_str(json)?;
    fields_to_string(&aggregations)
}

/// Append `field:"t1"|"t2"` for one aggregation, preceded by `,` if `out`
/// already holds a clause. Writes nothing when no term is selected.
fn encode_clause(aggregation: &FieldAggregation, out: &mut String) {
    let mut terms = aggregation.selected_terms().peekable();
    if terms.peek().is_none() {
        return;
    }
    if !out.is_empty() {
        out.push(',');
    }
    encode_field(&aggregation.field, out);
    out.push(':');
    for (i, term) in terms.enumerate() {
        if i > 0 {
            out.push('|');
        }
        encode_term(&term.key, out);
    }
}

fn encode_field(field: &str, out: &mut String) {
    for c in field.chars() {
        if matches!(c, '\\' | ':' | ',' | '|' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Quote a term key, escaping `"` and `\`.
fn encode_term(key: &str, out: &mut String) {
    out.push('"');
    for c in key.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

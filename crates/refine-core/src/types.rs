//! Data model shared by the codec and the refinement state.
//!
//! Field names follow the search API's JSON: a term's document count travels
//! as `matching_results`. Unknown keys (e.g. the aggregation `type`) are
//! ignored on deserialization.

use serde::{Deserialize, Serialize};

/// One aggregation returned by the search service: a field and its terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAggregation {
    /// Document field the terms belong to. Dotted paths are allowed.
    pub field: String,
    #[serde(default)]
    pub results: Vec<ResultTerm>,
}

impl FieldAggregation {
    pub fn new(field: impl Into<String>, results: Vec<ResultTerm>) -> Self {
        Self {
            field: field.into(),
            results,
        }
    }

    /// Iterate the terms currently marked as selected, in order.
    pub fn selected_terms(&self) -> impl Iterator<Item = &ResultTerm> {
        self.results.iter().filter(|term| term.selected)
    }
}

/// A single facet value within an aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTerm {
    pub key: String,
    #[serde(
        rename = "matching_results",
        alias = "matchingCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub matching_count: Option<u64>,
    #[serde(default)]
    pub selected: bool,
}

impl ResultTerm {
    /// A term parsed out of a filter string: selected, no count.
    pub fn selected(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            matching_count: None,
            selected: true,
        }
    }

    /// A term as reported by the search service: unselected, with a count.
    pub fn with_count(key: impl Into<String>, matching_count: u64) -> Self {
        Self {
            key: key.into(),
            matching_count: Some(matching_count),
            selected: false,
        }
    }
}

/// Result of decoding a filter string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedFilter {
    pub filter_fields: Vec<FieldAggregation>,
}

/// A facet as the panels receive it: either a dynamic facet carrying display
/// text, or a term from a field aggregation.
///
/// The codec only ever sees strings; callers resolve a `FacetEntry` to its
/// text with [`FacetEntry::text`] first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FacetEntry {
    Dynamic {
        text: String,
        #[serde(default)]
        selected: bool,
    },
    Aggregation(ResultTerm),
}

impl FacetEntry {
    pub fn text(&self) -> &str {
        match self {
            FacetEntry::Dynamic { text, .. } => text,
            FacetEntry::Aggregation(term) => &term.key,
        }
    }

    pub fn is_selected(&self) -> bool {
        match self {
            FacetEntry::Dynamic { selected, .. } => *selected,
            FacetEntry::Aggregation(term) => term.selected,
        }
    }
}

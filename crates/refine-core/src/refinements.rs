//! Refinement selection state — the model behind the facet checkboxes.
//!
//! A [`Refinements`] value is built from the aggregations of the latest
//! search response plus the current filter string. It marks the terms the
//! filter selects, applies checkbox/radio toggles, and re-encodes the result.
//! Field order in the re-encoded filter always follows aggregation order,
//! not the order in which terms were clicked.
//!
//! Nothing here is shared or global: callers own the [`SearchParameters`]
//! and pass them in explicitly.

use serde::{Deserialize, Serialize};

use crate::decoder::from_string;
use crate::encoder::fields_to_string;
use crate::error::{FilterError, Result};
use crate::types::{FieldAggregation, ResultTerm};

/// Per-aggregation display settings, in the search service's
/// component-settings JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationSettings {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default = "default_multiple_selections")]
    pub multiple_selections_allowed: bool,
}

fn default_multiple_selections() -> bool {
    true
}

/// Whether a field renders as checkboxes or radio buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Multiple,
    Single,
}

/// The subset of search request parameters refinements touch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParameters {
    #[serde(default)]
    pub filter: String,
    #[serde(default)]
    pub offset: u64,
}

/// Selection state for every refinement field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refinements {
    fields: Vec<FieldAggregation>,
    settings: Vec<AggregationSettings>,
}

impl Refinements {
    /// Build the selection state from server aggregations and the current filter.
    ///
    /// Incoming `selected` flags are discarded; the filter is the source of
    /// truth. Filter terms the aggregations don't list are appended so they
    /// stay selected.
    pub fn from_filter(
        aggregations: &[FieldAggregation],
        filter: &str,
        settings: &[AggregationSettings],
    ) -> Result<Self> {
        let decoded = from_string(filter)?;

        let mut fields: Vec<FieldAggregation> = aggregations.to_vec();
        for term in fields.iter_mut().flat_map(|f| f.results.iter_mut()) {
            term.selected = false;
        }

        for selected in decoded.filter_fields {
            let field = field_entry(&mut fields, &selected.field);
            for term in selected.results {
                match field.results.iter_mut().find(|r| r.key == term.key) {
                    Some(existing) => existing.selected = true,
                    None => field.results.push(term),
                }
            }
        }

        Ok(Self {
            fields,
            settings: settings.to_vec(),
        })
    }

    pub fn fields(&self) -> &[FieldAggregation] {
        &self.fields
    }

    /// `Single` only when the field's settings disallow multiple selections.
    pub fn selection_mode(&self, field: &str) -> SelectionMode {
        match self.settings.iter().find(|s| s.name == field) {
            Some(s) if !s.multiple_selections_allowed => SelectionMode::Single,
            _ => SelectionMode::Multiple,
        }
    }

    /// Check or uncheck `key` within `field`.
    ///
    /// Checking a term of a single-select field unchecks every other term of
    /// that field. Unknown fields and terms are appended.
    pub fn toggle(&mut self, field: &str, key: &str, checked: bool) -> Result<()> {
        if field.is_empty() {
            return Err(FilterError::InvalidAggregation {
                index: self.fields.len(),
            });
        }
        let single = self.selection_mode(field) == SelectionMode::Single;
        let entry = field_entry(&mut self.fields, field);

        if single && checked {
            for term in entry.results.iter_mut() {
                term.selected = false;
            }
        }

        match entry.results.iter_mut().find(|t| t.key == key) {
            Some(term) => term.selected = checked,
            None if checked => entry.results.push(ResultTerm::selected(key)),
            None => {}
        }
        Ok(())
    }

    /// Uncheck every term of `field`.
    pub fn clear_field(&mut self, field: &str) {
        if let Some(entry) = self.fields.iter_mut().find(|f| f.field == field) {
            for term in entry.results.iter_mut() {
                term.selected = false;
            }
        }
    }

    pub fn clear_all(&mut self) {
        for term in self.fields.iter_mut().flat_map(|f| f.results.iter_mut()) {
            term.selected = false;
        }
    }

    /// Encode the current selection.
    pub fn filter_string(&self) -> Result<String> {
        fields_to_string(&self.fields)
    }

    /// Write the current selection into `params`, restarting paging.
    ///
    /// `params` is left untouched if encoding fails.
    pub fn apply_to(&self, params: &mut SearchParameters) -> Result<()> {
        let filter = self.filter_string()?;
        params.filter = filter;
        params.offset = 0;
        Ok(())
    }
}

/// Find `name` in `fields`, appending an empty aggregation if absent.
fn field_entry<'a>(fields: &'a mut Vec<FieldAggregation>, name: &str) -> &'a mut FieldAggregation {
    let index = match fields.iter().position(|f| f.field == name) {
        Some(index) => index,
        None => {
            fields.push(FieldAggregation::new(name, Vec::new()));
            fields.len() - 1
        }
    };
    &mut fields[index]
}

//! WASM bindings for refine-core.
//!
//! Exposes the filter codec and term toggling as `#[wasm_bindgen]` functions
//! so the refinement panels can call them from JavaScript/TypeScript. Data
//! crosses the boundary as JSON strings in the search API's shape.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p refine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/refine_wasm.wasm
//! ```

use refine_core::{AggregationSettings, FieldAggregation, Refinements};
use wasm_bindgen::prelude::*;

/// Encode a JSON array of aggregations into a filter string.
///
/// Throws a JS error if the JSON is invalid or a field name is empty.
#[wasm_bindgen(js_name = fieldsToString)]
pub fn fields_to_string(aggregations_json: &str) -> std::result::Result<String, JsValue> {
    refine_core::encode_json(aggregations_json).map_err(to_js_error)
}

/// Decode a filter string into `{"filter_fields": [...]}` JSON.
///
/// Throws a JS error if the filter is malformed.
#[wasm_bindgen(js_name = fromString)]
pub fn from_string(filter: &str) -> std::result::Result<String, JsValue> {
    refine_core::decode_json(filter).map_err(to_js_error)
}

/// Apply one checkbox/radio change and return the new filter string.
///
/// `settings_json` may be empty, meaning every field is multi-select.
#[wasm_bindgen(js_name = toggleTerm)]
pub fn toggle_term(
    aggregations_json: &str,
    settings_json: &str,
    filter: &str,
    field: &str,
    key: &str,
    checked: bool,
) -> std::result::Result<String, JsValue> {
    toggle(aggregations_json, settings_json, filter, field, key, checked).map_err(to_js_error)
}

fn toggle(
    aggregations_json: &str,
    settings_json: &str,
    filter: &str,
    field: &str,
    key: &str,
    checked: bool,
) -> refine_core::error::Result<String> {
    let aggregations: Vec<FieldAggregation> = serde_json::from_str(aggregations_json)?;
    let settings: Vec<AggregationSettings> = if settings_json.trim().is_empty() {
        Vec::new()
    } else {
        serde_json::from_str(settings_json)?
    };
    let mut refinements = Refinements::from_filter(&aggregations, filter, &settings)?;
    refinements.toggle(field, key, checked)?;
    refinements.filter_string()
}

fn to_js_error(e: refine_core::FilterError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

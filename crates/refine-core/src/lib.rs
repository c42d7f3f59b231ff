//! # refine-core
//!
//! Pure-Rust encoder and decoder for **search refinement filter strings**.
//!
//! Facet panels let users tick terms from server-computed aggregations. The
//! selection travels to the search service as a single `filter` parameter:
//! `field:"term"|"term",other.field:"term"`. This crate converts between that
//! string and a structured list of [`FieldAggregation`]s, and keeps the
//! per-field selection state the panels need ([`Refinements`]).
//!
//! ## Quick start
//!
//! ```rust
//! use refine_core::{fields_to_string, from_string, FieldAggregation, ResultTerm};
//!
//! let aggs = vec![FieldAggregation::new(
//!     "subject",
//!     vec![ResultTerm::selected("Animals"), ResultTerm::selected("1,200")],
//! )];
//! let filter = fields_to_string(&aggs).unwrap();
//! assert_eq!(filter, r#"subject:"Animals"|"1,200""#);
//!
//! // filter → aggregations (roundtrip)
//! let back = from_string(&filter).unwrap();
//! assert_eq!(back.filter_fields, aggs);
//! ```
//!
//! ## Modules
//!
//! - [`encoder`] — aggregations → filter string
//! - [`decoder`] — filter string → aggregations
//! - [`refinements`] — selection state with single/multi-select fields
//! - [`error`] — Error types for parse/encode failures
//! - [`types`] — `FieldAggregation`, `ResultTerm`, `DecodedFilter`, `FacetEntry`

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod refinements;
pub mod types;

pub use decoder::{decode_json, from_string};
pub use encoder::{encode_json, fields_to_string};
pub use error::FilterError;
pub use refinements::{AggregationSettings, Refinements, SearchParameters, SelectionMode};
pub use types::{DecodedFilter, FacetEntry, FieldAggregation, ResultTerm};

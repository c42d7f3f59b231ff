/// Encoder contract tests: aggregations → filter string.
use refine_core::{encode_json, fields_to_string, FieldAggregation, FilterError, ResultTerm};

/// Helper: an aggregation whose terms are all selected.
fn selected(field: &str, keys: &[&str]) -> FieldAggregation {
    FieldAggregation::new(field, keys.iter().map(|k| ResultTerm::selected(*k)).collect())
}

// ============================================================================
// Basic shape
// ============================================================================

#[test]
fn encode_empty_input() {
    assert_eq!(fields_to_string(&[]).unwrap(), "");
}

#[test]
fn encode_single_term() {
    let filter = fields_to_string(&[selected("subject", &["Animals"])]).unwrap();
    assert_eq!(filter, r#"subject:"Animals""#);
}

#[test]
fn encode_multiple_terms_joined_with_pipe() {
    let filter = fields_to_string(&[selected("subject", &["Animals", "People"])]).unwrap();
    assert_eq!(filter, r#"subject:"Animals"|"People""#);
}

#[test]
fn encode_multiple_fields_in_input_order() {
    let aggs = vec![
        selected("author", &["News Staff"]),
        selected("subject", &["Animals"]),
    ];
    assert_eq!(
        fields_to_string(&aggs).unwrap(),
        r#"author:"News Staff",subject:"Animals""#
    );
}

#[test]
fn encode_dotted_field_name() {
    let filter = fields_to_string(&[selected("enriched_text.entities.text", &["IBM"])]).unwrap();
    assert_eq!(filter, r#"enriched_text.entities.text:"IBM""#);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn encode_skips_unselected_terms() {
    let agg = FieldAggregation::new(
        "author",
        vec![
            ResultTerm::with_count("ABMN Staff", 10),
            ResultTerm::selected("News Staff"),
            ResultTerm::with_count("editor", 3),
        ],
    );
    assert_eq!(fields_to_string(&[agg]).unwrap(), r#"author:"News Staff""#);
}

#[test]
fn encode_skips_fields_without_selection() {
    let aggs = vec![
        FieldAggregation::new("author", vec![ResultTerm::with_count("editor", 3)]),
        selected("subject", &["Animals"]),
        FieldAggregation::new("empty", vec![]),
    ];
    assert_eq!(fields_to_string(&aggs).unwrap(), r#"subject:"Animals""#);
}

#[test]
fn encode_nothing_selected_is_empty_string() {
    let aggs = vec![FieldAggregation::new(
        "author",
        vec![ResultTerm::with_count("editor", 3)],
    )];
    assert_eq!(fields_to_string(&aggs).unwrap(), "");
}

// ============================================================================
// Reserved characters
// ============================================================================

#[test]
fn encode_reserved_characters() {
    let aggs = vec![selected(
        "extracted_stuff.weirdAggs",
        &["this | that", "1:30", "1,200", r#"double " quote"#],
    )];
    assert_eq!(
        fields_to_string(&aggs).unwrap(),
        r#"extracted_stuff.weirdAggs:"this | that"|"1:30"|"1,200"|"double \" quote""#
    );
}

#[test]
fn encode_several_fields_with_reserved_characters() {
    let aggs = vec![
        selected(
            "extracted_stuff.weirdAggs",
            &["this | that", "1:30", "1,200", r#"double " quote"#],
        ),
        selected("extracted_stuff.oddAggs", &["something, new", "blah|junk"]),
        selected("extracted_stuff.normalAggs", &["something normal", "nospaces"]),
    ];
    let expected = concat!(
        r#"extracted_stuff.weirdAggs:"this | that"|"1:30"|"1,200"|"double \" quote","#,
        r#"extracted_stuff.oddAggs:"something, new"|"blah|junk","#,
        r#"extracted_stuff.normalAggs:"something normal"|"nospaces""#,
    );
    assert_eq!(fields_to_string(&aggs).unwrap(), expected);
}

#[test]
fn encode_backslash_is_escaped() {
    let filter = fields_to_string(&[selected("path", &[r"C:\temp"])]).unwrap();
    assert_eq!(filter, r#"path:"C:\\temp""#);
}

#[test]
fn encode_empty_key_as_quoted_pair() {
    let filter = fields_to_string(&[selected("subject", &[""])]).unwrap();
    assert_eq!(filter, r#"subject:"""#);
}

#[test]
fn encode_field_name_with_colon_is_escaped() {
    let filter = fields_to_string(&[selected("odd:field", &["x"])]).unwrap();
    assert_eq!(filter, r#"odd\:field:"x""#);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn encode_empty_field_name_fails() {
    let aggs = vec![selected("author", &["a"]), selected("", &["b"])];
    match fields_to_string(&aggs) {
        Err(FilterError::InvalidAggregation { index }) => assert_eq!(index, 1),
        other => panic!("expected InvalidAggregation, got {other:?}"),
    }
}

#[test]
fn encode_empty_field_name_fails_even_without_selection() {
    let aggs = vec![FieldAggregation::new("", vec![])];
    assert!(matches!(
        fields_to_string(&aggs),
        Err(FilterError::InvalidAggregation { index: 0 })
    ));
}

// ============================================================================
// JSON entry point
// ============================================================================

#[test]
fn encode_json_reads_api_shape() {
    let json = r#"[
        {"type":"term","field":"author","results":[
            {"key":"News Staff","matching_results":12,"selected":true},
            {"key":"editor","matching_results":3}
        ]},
        {"type":"term","field":"subject","results":[
            {"key":"Animals","matching_results":40,"selected":true}
        ]}
    ]"#;
    assert_eq!(
        encode_json(json).unwrap(),
        r#"author:"News Staff",subject:"Animals""#
    );
}

#[test]
fn encode_json_invalid_input_fails() {
    assert!(matches!(encode_json("{not json"), Err(FilterError::Json(_))));
}

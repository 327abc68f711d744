use slidechart::error::DataError;
use slidechart::models::RecordShape;
use slidechart::parser::parse;

#[test]
fn pairs_keep_order_and_count() {
    let ds = parse("Q1:120, Q2:150 ,Q3:180,Q4:200", RecordShape::Pair).unwrap();
    assert_eq!(ds.len(), 4);
    assert_eq!(ds.labels(), vec!["Q1", "Q2", "Q3", "Q4"]);
    assert_eq!(ds.values().unwrap(), vec![120.0, 150.0, 180.0, 200.0]);
}

#[test]
fn missing_field_is_malformed() {
    let err = parse("A:10,B", RecordShape::Pair).unwrap_err();
    assert!(matches!(err, DataError::MalformedRecord { index: 1, .. }), "{err:?}");
}

#[test]
fn extra_field_in_pair_is_malformed() {
    let err = parse("A:10:x", RecordShape::Pair).unwrap_err();
    assert!(matches!(err, DataError::MalformedRecord { index: 0, .. }));
}

#[test]
fn non_numeric_value_is_rejected() {
    let err = parse("A:10,B:lots", RecordShape::Pair).unwrap_err();
    assert_eq!(
        err,
        DataError::NotNumeric {
            index: 1,
            field: "lots".to_string()
        }
    );
}

#[test]
fn signs_and_percent_are_kept_as_text() {
    let ds = parse("Base:100,Growth:+35,Churn:-8,Share:12.5%", RecordShape::Pair).unwrap();
    let texts = ds.value_texts().unwrap();
    let labels: Vec<String> = texts.iter().map(|t| t.label()).collect();
    assert_eq!(labels, vec!["100", "+35", "-8", "12.5%"]);
    assert_eq!(texts[3].value, 12.5);
}

#[test]
fn unmarked_values_round_for_display() {
    let ds = parse("A:12.6,B:0.4", RecordShape::Pair).unwrap();
    let labels: Vec<String> = ds.value_texts().unwrap().iter().map(|t| t.label()).collect();
    assert_eq!(labels, vec!["13", "0"]);
}

#[test]
fn bare_numbers_get_item_labels() {
    let ds = parse("5, 7, 9", RecordShape::Pair).unwrap();
    assert_eq!(ds.labels(), vec!["Item 1", "Item 2", "Item 3"]);
}

#[test]
fn triples_keep_colons_in_description() {
    let ds = parse(
        "2023 Q1:Launch:Beta opens at 09:00,2023 Q2:Growth:Two new markets",
        RecordShape::Triple,
    )
    .unwrap();
    assert_eq!(ds.len(), 2);
    let first = &ds.records[0];
    assert_eq!(first.primary, "2023 Q1");
    assert_eq!(first.secondary, "Launch");
    assert_eq!(first.tertiary.as_deref(), Some("Beta opens at 09:00"));
}

#[test]
fn triples_need_three_fields() {
    let err = parse("98%:Uptime", RecordShape::Triple).unwrap_err();
    assert!(matches!(err, DataError::MalformedRecord { index: 0, .. }));
}

#[test]
fn empty_input_is_an_empty_dataset() {
    assert!(parse("", RecordShape::Pair).unwrap().is_empty());
    assert!(parse("   ", RecordShape::Triple).unwrap().is_empty());
}

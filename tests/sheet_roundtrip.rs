use rowsift::error::RowsiftError;
use rowsift::sheet::{SheetFormat, load_csv, load_json_rows, save_csv, sniff_format};
use rowsift::table::Value;

const PEOPLE_CSV: &[u8] =
    b"name,role,city\nA,Software Engineer,San Francisco\nB,Manager,New York\n";

#[test]
fn csv_load_keeps_header_order_and_cells() {
    let table = load_csv(PEOPLE_CSV).expect("load ok");
    assert_eq!(table.columns(), ["name", "role", "city"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(
        table.cell(0, "role"),
        Some(&Value::Text("Software Engineer".into()))
    );
    assert_eq!(table.cell(1, "city"), Some(&Value::Text("New York".into())));
}

#[test]
fn csv_round_trip_preserves_order_and_values() {
    let first = load_csv(PEOPLE_CSV).expect("load ok");
    let bytes = save_csv(&first).expect("save ok");
    let second = load_csv(&bytes).expect("reload ok");
    assert_eq!(first, second);
}

#[test]
fn csv_with_no_data_rows_is_an_empty_source() {
    let err = load_csv(b"name,role\n").unwrap_err();
    assert!(matches!(err, RowsiftError::EmptySource(_)));
}

#[test]
fn undecodable_csv_is_a_load_error() {
    assert!(matches!(load_csv(b""), Err(RowsiftError::Load(_))));
    assert!(matches!(load_csv(&[0xff, 0xfe]), Err(RowsiftError::Load(_))));
}

#[test]
fn json_rows_load_with_first_object_column_order() {
    let bytes = br#"[
        {"name":"A","role":"Engineer","active":true,"level":3},
        {"name":"B","city":"Oslo","level":2.5}
    ]"#;
    let table = load_json_rows(bytes).expect("load ok");
    assert_eq!(table.columns(), ["name", "role", "active", "level"]);
    assert_eq!(table.cell(0, "level"), Some(&Value::Number(3.0)));
    assert_eq!(table.cell(0, "active"), Some(&Value::Bool(true)));
    // keys first appearing in later rows do not extend the column set
    assert!(!table.columns().contains(&"city".to_string()));
    assert_eq!(table.cell(1, "role"), None);
}

#[test]
fn json_null_cells_are_absent() {
    let table = load_json_rows(br#"[{"name":"A","city":null}]"#).expect("load ok");
    assert_eq!(table.columns(), ["name", "city"]);
    assert_eq!(table.cell(0, "city"), None);
}

#[test]
fn empty_json_array_is_an_empty_source() {
    let err = load_json_rows(b"[]").unwrap_err();
    assert!(matches!(err, RowsiftError::EmptySource(_)));
}

#[test]
fn non_array_json_is_a_load_error() {
    assert!(matches!(
        load_json_rows(b"{\"name\":\"A\"}"),
        Err(RowsiftError::Load(_))
    ));
}

#[test]
fn format_sniffing() {
    assert_eq!(sniff_format(PEOPLE_CSV), SheetFormat::Csv);
    assert_eq!(sniff_format(br#"[{"a":1}]"#), SheetFormat::JsonRows);
    assert_eq!(sniff_format(b"  \n[1]"), SheetFormat::JsonRows);
    assert_eq!(sniff_format(b""), SheetFormat::Csv);
}

#[test]
fn saved_cells_render_like_the_evaluator_sees_them() {
    let bytes = br#"[
        {"name":"A","role":"Engineer","active":true,"level":3},
        {"name":"B","role":null,"active":false,"level":2.5}
    ]"#;
    let table = load_json_rows(bytes).expect("load ok");
    let out = String::from_utf8(save_csv(&table).expect("save ok")).expect("utf8");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "name,role,active,level");
    assert_eq!(lines[1], "A,Engineer,true,3");
    assert_eq!(lines[2], "B,,false,2.5");
}

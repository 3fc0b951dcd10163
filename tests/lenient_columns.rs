use rowsift::query::{SKIP_UNRESOLVED_CLAUSES, apply, extract_clauses};
use rowsift::table::{Table, row};

#[test]
fn unresolved_clause_policy_is_skip() {
    assert!(SKIP_UNRESOLVED_CLAUSES);
}

#[test]
fn unresolved_clause_restricts_nothing() {
    // no location-ish column exists, so the location clause must leave the
    // result exactly as if it had not been extracted at all
    let table = Table::new(
        vec!["name".into(), "role".into()],
        vec![
            row([("name", "A"), ("role", "Designer")]),
            row([("name", "B"), ("role", "Manager")]),
        ],
    );
    let with_location = apply(&extract_clauses("designers in atlantis"), &table);
    let without_location = apply(&extract_clauses("show designers"), &table);
    assert_eq!(with_location, without_location);
    assert_eq!(with_location.iter().collect::<Vec<_>>(), vec![0]);
}

#[test]
fn fully_unresolvable_query_returns_the_whole_table() {
    let table = Table::new(
        vec!["name".into()],
        vec![row([("name", "A")]), row([("name", "B")])],
    );
    let rows = apply(&extract_clauses("managers in york"), &table);
    assert_eq!(rows.iter().collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn resolution_follows_candidate_priority_not_table_order() {
    let clauses = extract_clauses("staff in oslo");
    let location = &clauses[0];
    let columns = vec!["Address".to_string(), "City".to_string()];
    assert_eq!(location.resolve_columns(&columns), ["City", "Address"]);
}

#[test]
fn resolution_matches_names_case_insensitively() {
    let clauses = extract_clauses("staff in oslo");
    let columns = vec!["CITY".to_string(), "notes".to_string()];
    assert_eq!(clauses[0].resolve_columns(&columns), ["CITY"]);
}

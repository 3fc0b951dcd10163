use rowsift::query::{ClauseKind, LOCATION_COLUMNS, ROLE_COLUMNS, extract_clauses};

#[test]
fn trailing_in_names_a_location() {
    let clauses = extract_clauses("give me all software engineers in sf");
    assert_eq!(clauses.len(), 2);
    assert_eq!(clauses[0].kind(), ClauseKind::Location);
    assert_eq!(clauses[0].match_value(), "sf");
}

#[test]
fn role_between_all_and_in() {
    let clauses = extract_clauses("give me all software engineers in sf");
    assert_eq!(clauses[1].kind(), ClauseKind::Role);
    assert_eq!(clauses[1].match_value(), "software engineers");
}

#[test]
fn role_anchored_at_start() {
    let clauses = extract_clauses("managers in new york");
    assert_eq!(clauses[0].kind(), ClauseKind::Location);
    assert_eq!(clauses[0].match_value(), "new york");
    assert_eq!(clauses[1].kind(), ClauseKind::Role);
    assert_eq!(clauses[1].match_value(), "managers");
}

#[test]
fn phrasing_verbs_do_not_leak_into_role_values() {
    let clauses = extract_clauses("show managers in new york");
    assert_eq!(clauses[1].kind(), ClauseKind::Role);
    assert_eq!(clauses[1].match_value(), "managers", "leading verb must be dropped");
}

#[test]
fn show_without_location_suffix() {
    let clauses = extract_clauses("show managers");
    assert_eq!(clauses.len(), 1);
    assert_eq!(clauses[0].kind(), ClauseKind::Role);
    assert_eq!(clauses[0].match_value(), "managers");
}

#[test]
fn give_me_without_location_suffix() {
    let clauses = extract_clauses("give me designers");
    assert_eq!(clauses.len(), 1);
    assert_eq!(clauses[0].kind(), ClauseKind::Role);
    assert_eq!(clauses[0].match_value(), "designers");
}

#[test]
fn location_always_precedes_role() {
    for query in [
        "all designers in remote locations",
        "engineers in berlin",
        "show managers in new york",
    ] {
        let kinds: Vec<_> = extract_clauses(query).iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, [ClauseKind::Location, ClauseKind::Role], "query: {query}");
    }
}

#[test]
fn text_without_patterns_yields_no_clauses() {
    assert!(extract_clauses("hello world").is_empty());
    assert!(extract_clauses("").is_empty());
    assert!(extract_clauses("   ").is_empty());
}

#[test]
fn mixed_case_input_is_normalized() {
    let clauses = extract_clauses("Show Managers In New York");
    assert_eq!(clauses[0].match_value(), "new york");
    assert_eq!(clauses[1].match_value(), "managers");
}

#[test]
fn internal_spacing_is_kept() {
    let clauses = extract_clauses("managers in new   york");
    assert_eq!(clauses[0].match_value(), "new   york");
}

#[test]
fn location_text_stays_visible_to_role_patterns() {
    // both patterns scan the whole phrase; the "in" consumed by the
    // location suffix still anchors the role capture
    let clauses = extract_clauses("all designers in remote locations");
    assert_eq!(clauses[0].match_value(), "remote locations");
    assert_eq!(clauses[1].match_value(), "designers");
}

#[test]
fn candidate_columns_are_fixed_per_kind() {
    let clauses = extract_clauses("managers in oslo");
    assert_eq!(clauses[0].candidates(), LOCATION_COLUMNS);
    assert_eq!(clauses[1].candidates(), ROLE_COLUMNS);
    assert_eq!(
        LOCATION_COLUMNS,
        ["city", "location", "state", "country", "address"]
    );
    assert_eq!(ROLE_COLUMNS, ["role", "title", "position", "job", "occupation"]);
}

#[test]
fn filler_only_capture_produces_no_role_clause() {
    // "all" is the entire capture between the start anchor and "in"
    let clauses = extract_clauses("all in london");
    assert_eq!(clauses.len(), 1);
    assert_eq!(clauses[0].kind(), ClauseKind::Location);
    assert_eq!(clauses[0].match_value(), "london");
}

use mergefield_cli::record::{FieldAccessError, JsonRecord};
use mergefield_cli::templating::{
    DelimiterPair, EmptyReason, PlaceholderMatcher, Resolution, resolve_path, substitute,
    substitute_with_report,
};
use serde_json::json;

fn contact() -> JsonRecord {
    serde_json::from_value(json!({
        "attributes": { "type": "Contact" },
        "FirstName": "Jo",
        "LastName": "Smith",
        "Tags": ["vip", "newsletter"],
        "ReportsTo": { "FirstName": "Sam", "Account": { "Name": "Globex" } }
    }))
    .unwrap()
}

fn matcher(start: &str, end: &str) -> PlaceholderMatcher {
    PlaceholderMatcher::compile(&DelimiterPair::new(start, end)).unwrap()
}

#[test]
fn test_multi_character_end_delimiter() {
    let matcher = matcher("<%", "%>");
    assert_eq!(
        substitute(&matcher, "<% FirstName %> and <%LastName%>", &contact()),
        "Jo and Smith"
    );
}

#[test]
fn test_first_end_character_inside_path_prevents_a_match() {
    // Only the first character of the end delimiter bounds the capture
    let brackets = matcher("[[", "]]");
    let template = "[[ Tags]0 ]] [[ LastName ]]";
    assert_eq!(substitute(&brackets, template, &contact()), "[[ Tags]0 ]] Smith");

    let percent = matcher("<%", "%>");
    assert_eq!(substitute(&percent, "<% a%b %>", &contact()), "<% a%b %>");
}

#[test]
fn test_non_ascii_delimiters() {
    let matcher = matcher("«", "»");
    assert_eq!(
        substitute(&matcher, "«FirstName» «ReportsTo.FirstName»", &contact()),
        "Jo Sam"
    );
}

#[test]
fn test_case_variant_duplicates_are_distinct_placeholders() {
    let matcher = matcher("{!", "}");
    assert_eq!(
        substitute(&matcher, "{!LastName} {!lastname} {!LASTNAME}", &contact()),
        "Smith Smith Smith"
    );

    let report = substitute_with_report(&matcher, "{!Nope}{!nope}{!Nope}", &contact());
    let placeholders: Vec<&str> = report
        .unresolved
        .iter()
        .map(|u| u.placeholder.as_str())
        .collect();
    assert_eq!(placeholders, ["{!Nope}", "{!nope}"]);
}

#[test]
fn test_placeholders_at_template_edges() {
    let matcher = matcher("{!", "}");
    assert_eq!(substitute(&matcher, "{!FirstName}", &contact()), "Jo");
    assert_eq!(
        substitute(&matcher, "{!FirstName}{!LastName}", &contact()),
        "JoSmith"
    );
}

#[test]
fn test_list_values_are_not_scalars_or_records() {
    assert_eq!(
        resolve_path(&contact(), "Tags"),
        Resolution::Empty(EmptyReason::FieldAccess(FieldAccessError::NotAScalar {
            field: "Tags".to_string()
        }))
    );
    assert_eq!(
        resolve_path(&contact(), "Tags.Name"),
        Resolution::Empty(EmptyReason::FieldAccess(FieldAccessError::NotARecord {
            field: "Tags".to_string()
        }))
    );
}

#[test]
fn test_degenerate_paths_render_empty() {
    let matcher = matcher("{!", "}");
    let report = substitute_with_report(&matcher, "a{!}b{! ReportsTo. }c", &contact());
    assert_eq!(report.output, "abc");
    assert_eq!(report.unresolved.len(), 2);
    assert!(report.unresolved.iter().all(|u| matches!(
        u.reason,
        EmptyReason::FieldAccess(FieldAccessError::MissingField { .. })
    )));
}

#[test]
fn test_nested_relationship_two_hops() {
    assert_eq!(
        resolve_path(&contact(), "ReportsTo.Account.Name").into_value(),
        "Globex"
    );
}

use mergefield_cli::schema::{PathValidator, RelationshipConventions};
use mergefield_cli::test_utils::{fixture_catalog, fixture_engine};

#[test]
fn test_single_hop_fields() {
    let engine = fixture_engine();
    assert!(engine.is_path_valid("Contact", "LastName"));
    assert!(!engine.is_path_valid("Contact", "NoSuchField"));
}

#[test]
fn test_standard_and_custom_relationships_resolve_alike() {
    let engine = fixture_engine();
    assert!(engine.is_path_valid("Contact", "Account.Name"));
    assert!(engine.is_path_valid("Contact", "Partner__r.Name"));
    assert!(engine.is_path_valid("Contact", "Account.Owner.Alias"));
    assert!(engine.is_path_valid("Contact", "Partner__r.Owner.Alias"));
    assert!(!engine.is_path_valid("Contact", "Partner__c.Name"));
}

#[test]
fn test_polymorphic_hop_short_circuits() {
    let engine = fixture_engine();
    assert!(engine.is_path_valid("Task", "Who.Anything.At.All"));
    assert!(engine.is_path_valid("Task", "What.Nope"));
    assert!(!engine.is_path_valid("Task", "Whom.Name"));
}

#[test]
fn test_validity_is_deterministic() {
    let catalog = fixture_catalog();
    let validator = PathValidator::new(catalog.clone(), RelationshipConventions::default());

    let paths = ["Account.Name", "Account.Nope", "ReportsTo.Account.Owner.Name", "Title.Name"];
    let first: Vec<bool> = paths.iter().map(|p| validator.is_valid("Contact", p)).collect();
    for _ in 0..5 {
        let again: Vec<bool> = paths.iter().map(|p| validator.is_valid("Contact", p)).collect();
        assert_eq!(first, again);
    }
    assert_eq!(first, [true, false, true, false]);
}

#[test]
fn test_catalog_describes_each_type_once() {
    let catalog = fixture_catalog();
    let validator = PathValidator::new(catalog.clone(), RelationshipConventions::default());

    for _ in 0..10 {
        assert!(validator.is_valid("Contact", "Account.Owner.Name"));
    }

    // Contact, Account and User
    assert_eq!(catalog.len(), 3);
    let stats = catalog.stats();
    assert_eq!(stats.misses, 3);
    assert!(stats.hits >= 27);
}

#[test]
fn test_unknown_root_type_is_invalid() {
    let engine = fixture_engine();
    assert!(!engine.is_path_valid("Opportunity", "Name"));
    assert!(!engine.catalog().contains("Opportunity"));
}

use logmgmt_model::{
    AllowedValuesValidator, AttributeDefinition, AttributeRegistry, ModelType, ParameterValidator,
    PathAddress, ValidationError,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

fn level_definition(allowed: &[&str]) -> AttributeDefinition {
    AttributeDefinition::builder("level", ModelType::String)
        .allow_expression(true)
        .validator(AllowedValuesValidator::new(allowed.iter().copied()))
        .build()
}

#[test]
fn test_extension_overrides_base_definition() {
    let base = [
        level_definition(&["ALL", "DEBUG", "INFO", "WARN", "ERROR"]),
        AttributeDefinition::builder("encoding", ModelType::String)
            .allow_null(true)
            .build(),
    ];
    let extension = [level_definition(&["WARN", "ERROR"])];

    let registry = AttributeRegistry::builder()
        .register_all(base)
        .register_all(extension)
        .build();

    assert_eq!(registry.names(), vec!["encoding", "level"]);
    let level = registry.get("level").unwrap();
    assert!(level.validator().validate_resolved_parameter("level", &json!("WARN")).is_ok());
    assert!(matches!(
        level.validator().validate_resolved_parameter("level", &json!("DEBUG")),
        Err(ValidationError::NotAllowed { .. })
    ));
}

#[test]
fn test_unresolved_expression_passes_until_resolved() {
    let def = level_definition(&["INFO"]);
    let expr = json!("${jboss.log.level}");
    assert!(def.validator().validate_parameter("level", &expr).is_ok());
    assert!(def.validator().validate_resolved_parameter("level", &expr).is_err());
}

proptest! {
    #[test]
    fn prop_last_registration_wins(types in prop::collection::vec(0u8..3, 1..16)) {
        let to_type = |t: u8| match t {
            0 => ModelType::String,
            1 => ModelType::Boolean,
            _ => ModelType::Int,
        };
        let registry = AttributeRegistry::builder()
            .register_all(types.iter().map(|&t| AttributeDefinition::builder("attr", to_type(t)).build()))
            .build();

        prop_assert_eq!(registry.len(), 1);
        prop_assert_eq!(registry.get("attr").unwrap().value_type(), to_type(*types.last().unwrap()));
    }

    #[test]
    fn prop_address_display_round_trips(
        segments in prop::collection::vec(("[a-z][a-z-]{0,8}", "[A-Za-z0-9_]{1,8}"), 0..5)
    ) {
        let address = segments
            .iter()
            .fold(PathAddress::root(), |a, (k, v)| a.child(k.as_str(), v.as_str()));
        let parsed: PathAddress = address.to_string().parse().unwrap();
        prop_assert_eq!(parsed, address);
    }
}

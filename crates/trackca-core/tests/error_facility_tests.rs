use trackca_core::errors::{ExError, ExErrorKind, TrackCaError};
use trackca_core::model::ItemId;
use trackca_core::AutomatonConfig;

#[test]
fn test_non_finite_weight_carries_item() {
    let err = TrackCaError::NonFiniteWeight {
        what: "cell",
        item_id: ItemId::new(3),
        value: f64::INFINITY,
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::NonFiniteWeight);
    assert_eq!(ex_err.code(), "ERR_NON_FINITE_WEIGHT");
    assert_eq!(ex_err.item_id(), Some(ItemId::new(3)));
    assert!(ex_err.message().contains("cell"));
}

#[test]
fn test_invalid_config_names_field() {
    let err = AutomatonConfig::from_toml_str("min_path_length = 0").expect_err("rejected");

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidConfig);
    assert!(ex_err.message().starts_with("min_path_length"));
}

#[test]
fn test_malformed_config_is_serialization_error() {
    let err = AutomatonConfig::from_json_str("{ not json").expect_err("rejected");

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::Serialization);
    assert_eq!(ex_err.code(), "ERR_SERIALIZATION");
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::UnknownItem, "ERR_UNKNOWN_ITEM"),
        (ExErrorKind::NonFiniteWeight, "ERR_NON_FINITE_WEIGHT"),
        (ExErrorKind::InvalidConfig, "ERR_INVALID_CONFIG"),
        (ExErrorKind::BudgetExceeded, "ERR_BUDGET_EXCEEDED"),
        (ExErrorKind::InvariantViolation, "ERR_INVARIANT_VIOLATION"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        (ExErrorKind::Internal, "ERR_INTERNAL"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

//! Tests for configuration consistency validation.

use rstest::rstest;

use crate::BeardConfig;
use crate::error::BeardError;

#[rstest]
fn defaults_are_valid() {
    assert!(BeardConfig::default().validate().is_ok());
}

#[rstest]
#[case::page_size(BeardConfig { page_size: 0, ..Default::default() }, "page_size")]
#[case::search_limit(
    BeardConfig { search_result_limit: 0, ..Default::default() },
    "search_result_limit"
)]
#[case::reply_timeout(
    BeardConfig { reply_timeout_seconds: 0, ..Default::default() },
    "reply_timeout_seconds"
)]
fn rejects_zero_settings(#[case] config: BeardConfig, #[case] field: &str) {
    let result = config.validate();

    match result {
        Err(BeardError::Configuration { message }) => assert!(
            message.contains(field),
            "message should name {field}, got {message}"
        ),
        other => panic!("expected Configuration error, got {other:?}"),
    }
}

#[rstest]
#[case::at_cap(100, true)]
#[case::over_cap(101, false)]
fn search_limit_is_capped_by_one_search_call(#[case] limit: usize, #[case] accepted: bool) {
    let config = BeardConfig {
        search_result_limit: limit,
        ..Default::default()
    };

    match config.validate() {
        Ok(()) => assert!(accepted, "limit {limit} should be rejected"),
        Err(BeardError::Configuration { message }) => {
            assert!(!accepted, "limit {limit} should be accepted, got {message}");
            assert!(message.contains("search_result_limit"), "got {message}");
        }
        Err(other) => panic!("expected Configuration error, got {other:?}"),
    }
}

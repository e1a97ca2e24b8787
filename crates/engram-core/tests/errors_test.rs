use engram_core::errors::*;

#[test]
fn subsystem_errors_convert_into_engram_error() {
    let cache: EngramError = CacheError::TokenizerInit {
        reason: "bad vocab".into(),
    }
    .into();
    assert!(matches!(cache, EngramError::Cache(_)));

    let retrieval: EngramError = RetrievalError::upstream("text_search", "connection refused").into();
    assert!(matches!(retrieval, EngramError::Retrieval(_)));

    let recall: EngramError = RecallError::InvalidQuery.into();
    assert!(matches!(recall, EngramError::Recall(_)));
}

#[test]
fn messages_carry_context() {
    let err = RetrievalError::upstream("fetch_by_locality_range", "timeout");
    let msg = err.to_string();
    assert!(msg.contains("fetch_by_locality_range"));
    assert!(msg.contains("timeout"));

    let err = CacheError::CapacityInvariantViolation {
        items: 513,
        tokens: 9000,
    };
    assert!(err.to_string().contains("513"));
}

#[test]
fn invalid_query_names_the_cause() {
    assert!(RecallError::InvalidQuery.to_string().contains("empty"));
}

#[test]
fn both_paths_failed_distinguishes_upstream_from_no_data() {
    let err = RecallError::BothPathsFailed {
        reason: "record store unreachable".into(),
    };
    assert!(err.to_string().contains("unreachable"));
}

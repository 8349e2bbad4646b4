//! # tests/test_computation_engine.rs
//!
//! Integrationstests für die Orchestrierung der Berechnungs-Engine:
//! Vorbedingungen, Datensatz-Abgleich, genau ein Strategie-Aufruf und
//! atomares Fehlverhalten.

use collab_lib::services::computation_engine::{
    execute, AggregationStrategy, EngineError, SchemaProfileStrategy,
};
use collab_lib::services::request_manager::{add_approval, create_computation_request, NewRequestData};
use collab_lib::test_utils::{approved_request_with_datasets, demo_parties, BOSTON_GENERAL, MIT_LAB};
use collab_lib::{AggregateMetrics, ComputationPolicy, ComputationRequest, DatasetMetadata, RequestStatus};
use std::cell::Cell;
use std::collections::HashMap;

/// Eine Strategie, die immer fehlschlägt, für Atomaritäts-Tests.
struct FailingStrategy;

impl AggregationStrategy for FailingStrategy {
    fn aggregate(
        &self,
        _request: &ComputationRequest,
        _metadata: &[DatasetMetadata],
    ) -> Result<AggregateMetrics, EngineError> {
        Err(EngineError::Aggregation(
            "secure aggregation backend unreachable".to_string(),
        ))
    }
}

/// Zählt ihre Aufrufe, um den Genau-einmal-Vertrag zu prüfen.
struct CountingStrategy {
    calls: Cell<usize>,
}

impl AggregationStrategy for CountingStrategy {
    fn aggregate(
        &self,
        _request: &ComputationRequest,
        metadata: &[DatasetMetadata],
    ) -> Result<AggregateMetrics, EngineError> {
        self.calls.set(self.calls.get() + 1);
        let mut metrics = AggregateMetrics::new();
        metrics.insert(
            "datasets_analyzed".to_string(),
            serde_json::json!(metadata.len()),
        );
        Ok(metrics)
    }
}

#[test]
fn test_execute_requires_approval() {
    // --- 1. OFFENE ANFRAGE ---
    let (_, datasets) = approved_request_with_datasets();
    let pending = create_computation_request(
        NewRequestData {
            title: "Pending analysis".to_string(),
            description: "".to_string(),
            research_question: "".to_string(),
            requesting_party: MIT_LAB.to_string(),
            target_dataset_ids: datasets.keys().cloned().collect(),
        },
        &demo_parties(),
        &ComputationPolicy::default(),
    )
    .unwrap();

    let result = execute(&pending, &datasets, &SchemaProfileStrategy);
    assert!(matches!(
        result,
        Err(EngineError::NotApproved { status: RequestStatus::PendingApproval, .. })
    ));
    println!("SUCCESS: A pending request is refused before any aggregation runs.");

    // --- 2. ABGELEHNTE ANFRAGE ---
    let mut rejected = create_computation_request(
        NewRequestData {
            title: "Rejected analysis".to_string(),
            description: "".to_string(),
            research_question: "".to_string(),
            requesting_party: MIT_LAB.to_string(),
            target_dataset_ids: datasets.keys().cloned().collect(),
        },
        &demo_parties(),
        &ComputationPolicy::default(),
    )
    .unwrap();
    add_approval(&mut rejected, BOSTON_GENERAL, false).unwrap();

    let result = execute(&rejected, &datasets, &SchemaProfileStrategy);
    assert!(matches!(
        result,
        Err(EngineError::NotApproved { status: RequestStatus::Rejected, .. })
    ));
    println!("SUCCESS: A rejected request is refused as well.");
}

#[test]
fn test_execute_reports_missing_datasets() {
    let (mut request, datasets) = approved_request_with_datasets();
    request.target_dataset_ids.insert("ffffffffffffffff".to_string());

    let result = execute(&request, &datasets, &SchemaProfileStrategy);
    match result {
        Err(EngineError::DatasetMismatch(missing)) => {
            assert_eq!(missing, vec!["ffffffffffffffff".to_string()]);
            println!("SUCCESS: The mismatch error names exactly the unknown dataset id.");
        }
        other => panic!("expected DatasetMismatch, got {:?}", other),
    }
}

#[test]
fn test_execute_produces_stamped_result() {
    let (request, datasets) = approved_request_with_datasets();
    let strategy = CountingStrategy { calls: Cell::new(0) };

    let result = execute(&request, &datasets, &strategy).unwrap();

    assert_eq!(strategy.calls.get(), 1, "the strategy must run exactly once");
    assert_eq!(result.computation_id, request.id);
    assert_eq!(result.datasets_processed, 3);
    assert!(result.privacy_guarantees.individual_data_encrypted);
    assert!(result.privacy_guarantees.computation_on_encrypted_data);
    assert!(result.privacy_guarantees.no_raw_data_exposed);
    assert!(!result.completed_at.is_empty());
    println!("SUCCESS: The engine stamped an immutable result after one strategy call.");
}

#[test]
fn test_schema_profile_strategy_metrics() {
    let (request, datasets) = approved_request_with_datasets();

    let result = execute(&request, &datasets, &SchemaProfileStrategy).unwrap();
    let metrics = &result.aggregate_metrics;

    assert_eq!(metrics["datasets_analyzed"], serde_json::json!(3));
    // Alle drei Demo-Datensätze teilen dasselbe Sechs-Spalten-Schema.
    assert_eq!(metrics["distinct_columns"], serde_json::json!(6));
    assert_eq!(metrics["columns_shared_by_all"], serde_json::json!(6));

    let total_bytes: usize = datasets
        .values()
        .map(|dataset| dataset.payload.ciphertext.len())
        .sum();
    assert_eq!(metrics["total_ciphertext_bytes"], serde_json::json!(total_bytes));
    println!("SUCCESS: The reference strategy aggregates purely from metadata.");
}

#[test]
fn test_strategy_failure_propagates_without_result() {
    let (request, datasets) = approved_request_with_datasets();

    let result = execute(&request, &datasets, &FailingStrategy);
    match result {
        Err(EngineError::Aggregation(message)) => {
            assert!(message.contains("unreachable"));
            println!("SUCCESS: A strategy failure propagates as a typed error, no result exists.");
        }
        other => panic!("expected Aggregation error, got {:?}", other),
    }

    // Der Anfrage-Status bleibt unangetastet.
    assert_eq!(request.status(), RequestStatus::Approved);
}

#[test]
fn test_empty_dataset_map_is_a_mismatch() {
    let (request, _) = approved_request_with_datasets();
    let empty: HashMap<String, collab_lib::EncryptedDataset> = HashMap::new();

    let result = execute(&request, &empty, &SchemaProfileStrategy);
    match result {
        Err(EngineError::DatasetMismatch(missing)) => {
            assert_eq!(missing.len(), 3);
            println!("SUCCESS: Every unresolved target id is reported.");
        }
        other => panic!("expected DatasetMismatch, got {:?}", other),
    }
}

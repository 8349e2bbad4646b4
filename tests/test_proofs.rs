//! # tests/test_proofs.rs
//!
//! Integrationstests für die Ausstellung und Validierung von
//! Privatsphäre-Nachweisen zu abgeschlossenen Berechnungen.

use collab_lib::services::computation_engine::{execute, SchemaProfileStrategy};
use collab_lib::services::proof_manager::{
    issue_proof, validate_proof, validate_proof_for_result, ProofError,
};
use collab_lib::test_utils::approved_request_with_datasets;
use collab_lib::{CollabCoreError, ComputationResult};

fn demo_result() -> ComputationResult {
    let (request, datasets) = approved_request_with_datasets();
    execute(&request, &datasets, &SchemaProfileStrategy).unwrap()
}

#[test]
fn test_issue_and_validate_round_trip() {
    let result = demo_result();

    let proof = issue_proof(&result, "zk-SNARK").unwrap();
    assert_eq!(proof.computation_id, result.computation_id);
    assert_eq!(proof.proof_type, "zk-SNARK");
    assert_eq!(proof.id.len(), 16);
    assert!(!proof.verification_hash.is_empty());

    validate_proof(&proof).unwrap();
    validate_proof_for_result(&proof, &result).unwrap();
    println!("SUCCESS: A freshly issued proof validates against itself and its result.");
}

#[test]
fn test_tampered_proof_fails_validation() {
    let result = demo_result();
    let mut proof = issue_proof(&result, "zk-SNARK").unwrap();

    // Jede nachträgliche Änderung muss die Prüfung scheitern lassen.
    proof.proof_type = "self-attested".to_string();
    let outcome = validate_proof(&proof);
    assert!(matches!(
        outcome,
        Err(CollabCoreError::Proof(ProofError::InvalidVerificationHash(_)))
    ));
    println!("SUCCESS: A tampered proof is rejected by the recomputed hash.");
}

#[test]
fn test_proof_is_bound_to_its_result() {
    let result = demo_result();
    let proof = issue_proof(&result, "zk-SNARK").unwrap();

    // Ein anderes Ergebnis (anderer Lauf, andere IDs) darf nicht passen.
    let other_result = demo_result();
    assert_ne!(result.computation_id, other_result.computation_id);

    let outcome = validate_proof_for_result(&proof, &other_result);
    assert!(matches!(
        outcome,
        Err(CollabCoreError::Proof(ProofError::MismatchedResult(_)))
    ));
    println!("SUCCESS: A proof does not transfer to a different computation result.");
}

#[test]
fn test_distinct_issuances_get_distinct_ids() {
    let result = demo_result();
    let first = issue_proof(&result, "zk-SNARK").unwrap();
    let second = issue_proof(&result, "differential-privacy-audit").unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.result_digest, second.result_digest);
    println!("SUCCESS: Distinct proof types over one result share the digest but not the id.");
}

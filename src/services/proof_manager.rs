//! # src/services/proof_manager.rs
//!
//! Enthält die zustandslose Geschäftslogik für die Ausstellung und Validierung
//! von Privatsphäre-Nachweisen (`PrivacyProof`) zu abgeschlossenen Berechnungen.

use crate::error::CollabCoreError;
use crate::models::proof::PrivacyProof;
use crate::models::result::ComputationResult;
use crate::services::crypto_utils::{derive_short_id, get_hash};
use crate::services::utils::{get_current_timestamp, to_canonical_json};

/// Definiert die Fehler, die im `proof_manager`-Modul auftreten können.
#[derive(Debug, thiserror::Error)]
pub enum ProofError {
    /// Der Prüf-Hash des Nachweises passt nicht zu seinem Inhalt.
    #[error("The verification hash of privacy proof '{0}' does not match its contents.")]
    InvalidVerificationHash(String),

    /// Der Nachweis ist an ein anderes Berechnungsergebnis gebunden.
    #[error("Privacy proof '{0}' was issued for a different computation result.")]
    MismatchedResult(String),
}

/// Stellt einen Privatsphäre-Nachweis für ein Berechnungsergebnis aus.
///
/// Der Nachweis wird über `result_digest` an den kanonischen Inhalt des
/// Ergebnisses gebunden. Anschließend wird der `verification_hash` über den
/// kanonischen JSON-Inhalt des Nachweises selbst gebildet, mit geleertem
/// Hash-Feld, damit der Hash deterministisch reproduzierbar ist.
///
/// # Arguments
/// * `result` - Das Ergebnis, auf das sich der Nachweis bezieht.
/// * `proof_type` - Die Art des Nachweises (z.B. "zk-SNARK").
pub fn issue_proof(
    result: &ComputationResult,
    proof_type: &str,
) -> Result<PrivacyProof, CollabCoreError> {
    let created_at = get_current_timestamp();
    let result_digest = get_hash(to_canonical_json(result)?);

    let mut proof = PrivacyProof {
        id: derive_short_id(format!("{}{}{}", result.computation_id, proof_type, created_at)),
        computation_id: result.computation_id.clone(),
        proof_type: proof_type.to_string(),
        result_digest,
        verification_hash: String::new(),
        created_at,
    };

    let proof_json_for_hash = to_canonical_json(&proof)?;
    proof.verification_hash = get_hash(proof_json_for_hash);

    Ok(proof)
}

/// Validiert die innere Konsistenz eines Privatsphäre-Nachweises.
///
/// Berechnet den Prüf-Hash über den kanonischen Inhalt (mit geleertem
/// Hash-Feld) neu und vergleicht ihn mit dem hinterlegten Wert. Jede nachträgliche
/// Änderung an einem Feld des Nachweises lässt die Prüfung fehlschlagen.
pub fn validate_proof(proof: &PrivacyProof) -> Result<(), CollabCoreError> {
    let mut proof_without_hash = proof.clone();
    proof_without_hash.verification_hash = String::new();

    let canonical = to_canonical_json(&proof_without_hash)?;
    if get_hash(canonical) != proof.verification_hash {
        return Err(ProofError::InvalidVerificationHash(proof.id.clone()).into());
    }

    Ok(())
}

/// Validiert einen Nachweis gegen das konkrete Berechnungsergebnis.
///
/// Prüft zusätzlich zur inneren Konsistenz, dass der Nachweis für genau dieses
/// Ergebnis ausgestellt wurde.
pub fn validate_proof_for_result(
    proof: &PrivacyProof,
    result: &ComputationResult,
) -> Result<(), CollabCoreError> {
    validate_proof(proof)?;

    let result_digest = get_hash(to_canonical_json(result)?);
    if proof.result_digest != result_digest || proof.computation_id != result.computation_id {
        return Err(ProofError::MismatchedResult(proof.id.clone()).into());
    }

    Ok(())
}

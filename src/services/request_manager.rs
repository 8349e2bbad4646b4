//! # src/services/request_manager.rs
//!
//! Enthält die Geschäftslogik zur Erstellung von Berechnungsanfragen und zur
//! Verarbeitung der Freigabe-Stimmen. Die Statusableitung selbst lebt als reine
//! Funktion bei den Modellen (`models::request::derive_status`).

use crate::error::CollabCoreError;
use crate::models::policy::ComputationPolicy;
use crate::models::request::{ApprovalVote, ComputationRequest, RequestStatus};
use crate::services::crypto_utils::{self, derive_short_id};
use crate::services::utils::get_current_timestamp;
use std::collections::{BTreeMap, BTreeSet};

/// Definiert die Fehler, die im `request_manager`-Modul auftreten können.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Die abstimmende Partei gehört nicht zu den erwarteten Stimmberechtigten.
    /// Die Stimme wird verworfen; die Anfrage bleibt unverändert.
    #[error("Party '{0}' is not an expected voter for this request.")]
    UnknownParty(String),

    /// Nach Ausschluss der anfragenden Partei blieben zu wenige Stimmberechtigte übrig.
    #[error("A computation request needs at least {minimum} eligible voter(s) besides the requester, but only {actual} remained.")]
    NoEligibleVoters { minimum: usize, actual: usize },
}

/// Eine Hilfsstruktur, die alle notwendigen Daten zur Erstellung einer neuen
/// Berechnungsanfrage bündelt. Dies vereinfacht die Signatur der
/// `create_computation_request` Funktion.
pub struct NewRequestData {
    /// Kurztitel der Anfrage.
    pub title: String,
    /// Ausführliche Beschreibung des Vorhabens.
    pub description: String,
    /// Die Forschungsfrage, die beantwortet werden soll.
    pub research_question: String,
    /// Die anfragende Partei.
    pub requesting_party: String,
    /// Die IDs der Ziel-Datensätze.
    pub target_dataset_ids: BTreeSet<String>,
}

/// Erstellt eine neue Berechnungsanfrage mit vollständig initialisierter Abstimmungs-Map.
///
/// Die anfragende Partei wird konstruktiv aus der Stimmberechtigten-Menge
/// ausgeschlossen; jede verbleibende Partei startet mit `Pending`. Für die
/// Anfrage wird ein frischer Berechnungsschlüssel als Platzhalter des späteren
/// Mehrparteien-Schritts erzeugt.
///
/// # Arguments
/// * `data` - Die `NewRequestData`-Struktur mit den anfragespezifischen Informationen.
/// * `participants` - Alle beteiligten Parteien, inklusive der anfragenden.
/// * `policy` - Die Richtlinie, die die Mindestanzahl Stimmberechtigter vorgibt.
pub fn create_computation_request(
    data: NewRequestData,
    participants: &[String],
    policy: &ComputationPolicy,
) -> Result<ComputationRequest, CollabCoreError> {
    let approvals: BTreeMap<String, ApprovalVote> = participants
        .iter()
        .filter(|party| **party != data.requesting_party)
        .map(|party| (party.clone(), ApprovalVote::Pending))
        .collect();

    let minimum = policy.approval.minimum_voters.max(1);
    if approvals.len() < minimum {
        return Err(RequestError::NoEligibleVoters {
            minimum,
            actual: approvals.len(),
        }
        .into());
    }

    let computation_key = crypto_utils::generate_key()?;
    let created_at = get_current_timestamp();
    let id = derive_short_id(format!("{}{}", data.title, created_at));

    Ok(ComputationRequest {
        id,
        title: data.title,
        description: data.description,
        research_question: data.research_question,
        requesting_party: data.requesting_party,
        target_dataset_ids: data.target_dataset_ids,
        approvals,
        computation_key,
        created_at,
    })
}

/// Verbucht die Stimme einer Partei und liefert den neu abgeleiteten Status.
///
/// Solange die Anfrage offen ist, überschreibt eine erneute Stimme derselben
/// Partei schlicht die vorherige. Hat die Anfrage bereits einen terminalen
/// Status erreicht, bleibt die Abstimmungs-Map unangetastet und der stehende
/// Status wird zurückgegeben; aus einem terminalen Zustand führt kein Übergang
/// mehr heraus.
///
/// Die Prüfung und das Schreiben der Stimme samt Statusableitung bilden über
/// die exklusive Ausleihe von `request` eine unteilbare Einheit; verlorene
/// Updates durch nebenläufige Stimmen sind damit ausgeschlossen.
pub fn add_approval(
    request: &mut ComputationRequest,
    party: &str,
    approved: bool,
) -> Result<RequestStatus, RequestError> {
    let current = request.status();

    // Die Prüfung der Stimmberechtigung kommt vor dem Terminal-Kurzschluss:
    // eine unbekannte Partei wird auch bei entschiedenen Anfragen abgewiesen.
    let vote = request
        .approvals
        .get_mut(party)
        .ok_or_else(|| RequestError::UnknownParty(party.to_string()))?;

    if current.is_terminal() {
        return Ok(current);
    }

    *vote = if approved {
        ApprovalVote::Approved
    } else {
        ApprovalVote::Rejected
    };

    Ok(request.status())
}

/// Nimmt einen TOML-String entgegen und deserialisiert ihn in eine `ComputationPolicy`.
pub fn load_policy_definition(toml_str: &str) -> Result<ComputationPolicy, CollabCoreError> {
    let policy: ComputationPolicy = toml::from_str(toml_str)?;
    Ok(policy)
}

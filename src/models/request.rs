//! # src/models/request.rs
//!
//! Definiert die Datenstrukturen für eine Berechnungsanfrage und deren
//! Freigabe-Zustandsmaschine. Der Status ist eine reine Funktion der
//! Abstimmungs-Map und wird niemals separat gespeichert.

use crate::services::crypto_utils::EncryptionKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Die Stimme einer einzelnen Partei zu einer Berechnungsanfrage.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalVote {
    /// Die Partei hat noch nicht abgestimmt.
    #[serde(rename = "pending")]
    Pending,
    /// Die Partei hat der Berechnung zugestimmt.
    #[serde(rename = "approved")]
    Approved,
    /// Die Partei hat die Berechnung abgelehnt.
    #[serde(rename = "rejected")]
    Rejected,
}

/// Der aus den Stimmen abgeleitete Gesamtstatus einer Berechnungsanfrage.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    /// Mindestens eine Stimme steht noch aus und keine Partei hat abgelehnt.
    #[serde(rename = "pending_approval")]
    PendingApproval,
    /// Jede stimmberechtigte Partei hat zugestimmt. Terminal.
    #[serde(rename = "approved")]
    Approved,
    /// Mindestens eine Partei hat abgelehnt. Terminal.
    #[serde(rename = "rejected")]
    Rejected,
}

impl RequestStatus {
    /// Terminale Zustände werden nie wieder verlassen.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Approved | RequestStatus::Rejected)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequestStatus::PendingApproval => "pending_approval",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        })
    }
}

/// Leitet den Status aus der Abstimmungs-Map ab.
///
/// Regeln, in dieser Reihenfolge:
/// 1. Eine einzelne Ablehnung blockiert die Anfrage unabhängig von allen
///    übrigen Stimmen (first-reject-wins, keine Mehrheitsentscheidung).
/// 2. Haben alle stimmberechtigten Parteien zugestimmt, ist die Anfrage
///    freigegeben.
/// 3. Andernfalls steht die Freigabe noch aus.
pub fn derive_status(approvals: &BTreeMap<String, ApprovalVote>) -> RequestStatus {
    if approvals.values().any(|vote| *vote == ApprovalVote::Rejected) {
        return RequestStatus::Rejected;
    }
    if !approvals.is_empty() && approvals.values().all(|vote| *vote == ApprovalVote::Approved) {
        return RequestStatus::Approved;
    }
    RequestStatus::PendingApproval
}

/// Repräsentiert eine Anfrage zur Berechnung über fremde, verschlüsselte Datensätze.
///
/// Die Anfrage referenziert Ziel-Datensätze ausschließlich über deren IDs,
/// niemals über Schlüssel. Invariante: die anfragende Partei ist nie Schlüssel
/// der `approvals`-Map (eine Partei stimmt nicht über die eigene Anfrage ab).
#[derive(Debug)]
pub struct ComputationRequest {
    /// Eindeutige Kennung, abgeleitet aus Titel und Erstellungszeitpunkt (16 Hex-Zeichen).
    pub id: String,
    /// Kurztitel der Anfrage.
    pub title: String,
    /// Ausführliche Beschreibung des Vorhabens.
    pub description: String,
    /// Die Forschungsfrage, die mit der Berechnung beantwortet werden soll.
    pub research_question: String,
    /// Die anfragende Partei.
    pub requesting_party: String,
    /// Die IDs der Ziel-Datensätze.
    pub target_dataset_ids: BTreeSet<String>,
    /// Stimme jeder stimmberechtigten Partei; vollständig ab Erstellung
    /// (`Pending`), bis jede Partei abgestimmt hat.
    pub approvals: BTreeMap<String, ApprovalVote>,
    /// Platzhalter für das gemeinsame Geheimnis des späteren
    /// Mehrparteien-Berechnungsschritts. Verlässt die Struktur nur als Fingerprint.
    pub(crate) computation_key: EncryptionKey,
    /// Erstellungszeitpunkt im ISO 8601-Format.
    pub created_at: String,
}

impl ComputationRequest {
    /// Der abgeleitete Status, immer konsistent zur aktuellen `approvals`-Map.
    pub fn status(&self) -> RequestStatus {
        derive_status(&self.approvals)
    }

    /// Der Fingerprint des Berechnungsschlüssels (16 Hex-Zeichen).
    ///
    /// Schlüsselmaterial überquert Komponentengrenzen ausschließlich in dieser Form.
    pub fn computation_key_fingerprint(&self) -> String {
        self.computation_key.fingerprint()
    }

    /// Erstellt die serialisierbare Zusammenfassung der Anfrage für Aufrufer.
    pub fn summary(&self) -> RequestSummary {
        RequestSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            research_question: self.research_question.clone(),
            requesting_party: self.requesting_party.clone(),
            status: self.status(),
            approvals: self.approvals.clone(),
            target_datasets: self.target_dataset_ids.len(),
            created_at: self.created_at.clone(),
            // Der Berechnungsschlüssel wird bei der Erstellung erzeugt und
            // existiert über die gesamte Lebensdauer der Anfrage.
            has_computation_key: true,
        }
    }
}

/// Eine leichtgewichtige, serialisierbare Zusammenfassung einer Berechnungsanfrage.
///
/// Enthält alle Metadaten, aber niemals den Berechnungsschlüssel selbst.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RequestSummary {
    /// Eindeutige Kennung der Anfrage.
    pub id: String,
    /// Kurztitel der Anfrage.
    pub title: String,
    /// Ausführliche Beschreibung des Vorhabens.
    pub description: String,
    /// Die Forschungsfrage.
    pub research_question: String,
    /// Die anfragende Partei.
    pub requesting_party: String,
    /// Der abgeleitete Gesamtstatus.
    pub status: RequestStatus,
    /// Die aktuelle Abstimmungs-Map.
    pub approvals: BTreeMap<String, ApprovalVote>,
    /// Anzahl der referenzierten Ziel-Datensätze.
    pub target_datasets: usize,
    /// Erstellungszeitpunkt im ISO 8601-Format.
    pub created_at: String,
    /// Gibt an, ob für die Anfrage ein Berechnungsschlüssel vorliegt.
    pub has_computation_key: bool,
}

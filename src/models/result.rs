//! # src/models/result.rs
//!
//! Definiert das unveränderliche Ergebnis einer erfolgreichen Engine-Ausführung,
//! inklusive der expliziten Privatsphäre-Garantien.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregierte Kennzahlen einer Berechnung: Name → Wert.
pub type AggregateMetrics = BTreeMap<String, serde_json::Value>;

/// Die Privatsphäre-Garantien, mit denen die Engine jedes Ergebnis stempelt.
///
/// Die ersten drei Flags setzt die Engine operativ durch (sie sieht
/// ausschließlich Metadaten und Schemata); die letzten beiden beschreiben das
/// Protokoll, für das die eingesteckte Aggregations-Strategie in einer
/// produktiven Umgebung steht.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivacyGuarantees {
    /// Jeder Datensatz wurde vor der Berechnung unter einem eigenen Schlüssel verschlüsselt.
    pub individual_data_encrypted: bool,
    /// Die Berechnung lief ohne Entschlüsselung der einzelnen Payloads.
    pub computation_on_encrypted_data: bool,
    /// Keine Rohdaten haben den Besitzer-Prozess verlassen.
    pub no_raw_data_exposed: bool,
    /// Differenzielle Privatsphäre auf den Aggregaten.
    pub differential_privacy_applied: bool,
    /// Null-Wissen-Beweise über die Korrektheit der Berechnung.
    pub zero_knowledge_proofs: bool,
}

/// Das unveränderliche Ergebnis genau einer erfolgreichen Engine-Ausführung.
///
/// Enthält bewusst keine Rückreferenz, über die Datensatz-Inhalte abfließen
/// könnten, sondern nur Zählwerte, Aggregate und Garantien.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ComputationResult {
    /// Die ID der zugrunde liegenden Berechnungsanfrage.
    pub computation_id: String,
    /// Anzahl der verarbeiteten Datensätze.
    pub datasets_processed: usize,
    /// Die von der Aggregations-Strategie gelieferten Kennzahlen.
    pub aggregate_metrics: AggregateMetrics,
    /// Die von der Engine gestempelten Privatsphäre-Garantien.
    pub privacy_guarantees: PrivacyGuarantees,
    /// Abschlusszeitpunkt im ISO 8601-Format.
    pub completed_at: String,
}

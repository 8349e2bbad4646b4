//! # src/models/proof.rs
//!
//! Definiert den Datensatz eines Privatsphäre-Nachweises zu einer
//! abgeschlossenen Berechnung.

use serde::{Deserialize, Serialize};

/// Ein Nachweis über die Privatsphäre-Eigenschaften einer abgeschlossenen Berechnung.
///
/// Der `verification_hash` wird über den kanonischen JSON-Inhalt des Nachweises
/// (mit geleertem Hash-Feld) gebildet; `result_digest` bindet den Nachweis an
/// das konkrete Berechnungsergebnis. In einer produktiven Umgebung stünde hier
/// ein echter Null-Wissen-Beweis; die Struktur hält dafür den Platz frei.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PrivacyProof {
    /// Eindeutige Kennung des Nachweises (16 Hex-Zeichen).
    pub id: String,
    /// Die ID der Berechnung, auf die sich der Nachweis bezieht.
    pub computation_id: String,
    /// Die Art des Nachweises (z.B. "zk-SNARK").
    pub proof_type: String,
    /// Inhalts-Hash des zugehörigen `ComputationResult` in kanonischer Form.
    pub result_digest: String,
    /// Prüf-Hash über den kanonischen Inhalt dieses Nachweises.
    pub verification_hash: String,
    /// Ausstellungszeitpunkt im ISO 8601-Format.
    pub created_at: String,
}

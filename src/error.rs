//! # src/error.rs
//!
//! Definiert den zentralen Fehlertyp für die gesamte collab_core-Bibliothek.
//! Verwendet `thiserror` zur einfachen Erstellung von aussagekräftigen Fehlern
//! und zur automatischen Konvertierung von untergeordneten Fehlertypen.

use crate::services::{
    computation_engine::EngineError, crypto_utils::CipherError, proof_manager::ProofError,
    request_manager::RequestError,
};
use crate::store::StoreError;
use thiserror::Error;

/// Der zentrale Fehlertyp für alle Operationen in der `collab_core`-Bibliothek.
///
/// Dieser Enum fasst Fehler aus allen Modulen (Chiffre, Anfragen, Engine,
/// Nachweise, Store, Serialisierung) an einem Ort zusammen und bildet die
/// einheitliche Fehler-API der Bibliothek. Alle Varianten sind typisierte
/// Ergebnisse an den Aufrufer; im Kern wird nichts protokolliert oder
/// verschluckt. Eine Entschlüsselung mit falschem Schlüssel unter dem
/// XOR-Strom ist bewusst **kein** Fehlerfall; sie liefert stillschweigend
/// unbrauchbaren Klartext (dokumentierte Schwäche der Strom-Chiffre).
#[derive(Error, Debug)]
pub enum CollabCoreError {
    /// Ein Fehler bei der Schlüsselerzeugung oder Ver-/Entschlüsselung.
    /// Kapselt den spezifischeren `CipherError`-Typ; `EntropyUnavailable`
    /// ist fatal und wird nicht wiederholt.
    #[error("Cipher Error: {0}")]
    Cipher(#[from] CipherError),

    /// Ein Fehler bei der Erstellung oder Abstimmung einer Berechnungsanfrage.
    #[error("Request Error: {0}")]
    Request(#[from] RequestError),

    /// Ein Fehler bei der Ausführung einer Berechnung. Die Anfrage behält in
    /// jedem Fall ihren bisherigen Status; ein Teilergebnis entsteht nie.
    #[error("Computation Engine Error: {0}")]
    Engine(#[from] EngineError),

    /// Ein Fehler bei der Ausstellung oder Validierung eines Privatsphäre-Nachweises.
    #[error("Privacy Proof Error: {0}")]
    Proof(#[from] ProofError),

    /// Ein Fehler bei einer Store- oder Verzeichnis-Operation (unbekannte IDs,
    /// doppelte Registrierung).
    #[error("Store Error: {0}")]
    Store(#[from] StoreError),

    /// Ein Fehler bei der Verarbeitung von JSON (Serialisierung oder Deserialisierung).
    #[error("JSON Processing Error: {0}")]
    Json(#[from] serde_json::Error),

    /// Ein Fehler bei der Deserialisierung von TOML (z.B. beim Laden einer
    /// Richtlinien-Definition).
    #[error("TOML Deserialization Error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Ein allgemeiner Fehler, der für verschiedene Zwecke verwendet werden kann.
    #[error("Generic error: {0}")]
    Generic(String),
}

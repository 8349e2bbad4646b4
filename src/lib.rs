//! # collab_core
//!
//! Die Kernlogik eines zustimmungsbasierten Systems für Berechnungen auf
//! verschlüsselten Datensätzen mehrerer Parteien. Diese Bibliothek stellt die
//! Datenstrukturen und Funktionen bereit, um Datensätze pro Partei zu
//! verschlüsseln, Berechnungsanfragen über eine Freigabe-Zustandsmaschine zu
//! steuern und aggregierte Ergebnisse mit expliziten Privatsphäre-Garantien
//! zu erzeugen.

// Deklariert die Hauptmodule der Bibliothek und macht sie öffentlich.
pub mod coordinator;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod test_utils;

// Re-exportiert die wichtigsten öffentlichen Typen für eine einfachere Nutzung.
// Anstatt `collab_lib::models::dataset::EncryptedDataset` können Benutzer nun
// `collab_lib::EncryptedDataset` schreiben.

// Modelle
pub use models::dataset::{
    CipherMethod, DatasetMetadata, DatasetSchema, EncryptedDataset, EncryptedPayload,
};
pub use models::policy::ComputationPolicy;
pub use models::proof::PrivacyProof;
pub use models::request::{
    derive_status, ApprovalVote, ComputationRequest, RequestStatus, RequestSummary,
};
pub use models::result::{AggregateMetrics, ComputationResult, PrivacyGuarantees};

// Services
pub use services::computation_engine::{AggregationStrategy, EngineError, SchemaProfileStrategy};
pub use services::crypto_utils::{
    self, ChaCha20Poly1305Cipher, CipherError, EncryptionKey, PayloadCipher, XorStreamCipher,
};
pub use services::request_manager::{load_policy_definition, NewRequestData, RequestError};
pub use services::utils::to_canonical_json;

// Fassade und Kollaborateure
pub use coordinator::Coordinator;
pub use error::CollabCoreError;
pub use store::{CollabStore, PartyDirectory, StoreError};

//! # src/store.rs
//!
//! Definiert die expliziten In-Memory-Kollaborateure der Bibliothek: den
//! `CollabStore` (ID-indizierte Ablage für Datensätze, Anfragen, Ergebnisse
//! und Nachweise) und das `PartyDirectory` (registrierte Parteien). Beide
//! ersetzen modulglobalen, veränderlichen Zustand und werden dem `Coordinator`
//! injiziert. Persistente Speicher-Backends sind ausdrücklich nicht Teil
//! dieses Kerns.

use crate::models::dataset::EncryptedDataset;
use crate::models::proof::PrivacyProof;
use crate::models::request::ComputationRequest;
use crate::models::result::ComputationResult;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Ein generischer Fehler-Typ für alle Store- und Verzeichnis-Operationen.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Dataset with id '{0}' not found in the collaboration store.")]
    DatasetNotFound(String),

    #[error("Computation request with id '{0}' not found in the collaboration store.")]
    RequestNotFound(String),

    #[error("No computation result recorded for computation id '{0}'.")]
    ResultNotFound(String),

    #[error("Privacy proof with id '{0}' not found in the collaboration store.")]
    ProofNotFound(String),

    #[error("Party '{0}' is already registered in the directory.")]
    PartyAlreadyRegistered(String),

    #[error("Party '{0}' is not registered in the directory.")]
    UnknownParty(String),
}

/// Die ID-indizierte In-Memory-Ablage einer Kollaborations-Sitzung.
#[derive(Debug, Default)]
pub struct CollabStore {
    datasets: HashMap<String, EncryptedDataset>,
    requests: HashMap<String, ComputationRequest>,
    results: HashMap<String, ComputationResult>,
    proofs: HashMap<String, PrivacyProof>,
}

impl CollabStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Legt einen Datensatz unter seiner ID ab.
    pub fn insert_dataset(&mut self, dataset: EncryptedDataset) {
        self.datasets.insert(dataset.id.clone(), dataset);
    }

    /// Liefert den Datensatz zur ID.
    pub fn dataset(&self, dataset_id: &str) -> Result<&EncryptedDataset, StoreError> {
        self.datasets
            .get(dataset_id)
            .ok_or_else(|| StoreError::DatasetNotFound(dataset_id.to_string()))
    }

    /// Liefert die vollständige Datensatz-Ablage, z.B. für die Engine.
    pub fn datasets(&self) -> &HashMap<String, EncryptedDataset> {
        &self.datasets
    }

    /// Legt eine Berechnungsanfrage unter ihrer ID ab.
    pub fn insert_request(&mut self, request: ComputationRequest) {
        self.requests.insert(request.id.clone(), request);
    }

    /// Liefert die Anfrage zur ID.
    pub fn request(&self, request_id: &str) -> Result<&ComputationRequest, StoreError> {
        self.requests
            .get(request_id)
            .ok_or_else(|| StoreError::RequestNotFound(request_id.to_string()))
    }

    /// Liefert die Anfrage zur ID als exklusive Ausleihe (für Stimmabgaben).
    pub fn request_mut(&mut self, request_id: &str) -> Result<&mut ComputationRequest, StoreError> {
        self.requests
            .get_mut(request_id)
            .ok_or_else(|| StoreError::RequestNotFound(request_id.to_string()))
    }

    /// Verbucht das Ergebnis einer abgeschlossenen Berechnung unter seiner Berechnungs-ID.
    pub fn record_result(&mut self, result: ComputationResult) {
        self.results.insert(result.computation_id.clone(), result);
    }

    /// Liefert das Ergebnis zur Berechnungs-ID.
    pub fn result(&self, computation_id: &str) -> Result<&ComputationResult, StoreError> {
        self.results
            .get(computation_id)
            .ok_or_else(|| StoreError::ResultNotFound(computation_id.to_string()))
    }

    /// Legt einen Privatsphäre-Nachweis unter seiner ID ab.
    pub fn insert_proof(&mut self, proof: PrivacyProof) {
        self.proofs.insert(proof.id.clone(), proof);
    }

    /// Liefert den Nachweis zur ID.
    pub fn proof(&self, proof_id: &str) -> Result<&PrivacyProof, StoreError> {
        self.proofs
            .get(proof_id)
            .ok_or_else(|| StoreError::ProofNotFound(proof_id.to_string()))
    }

    /// Liefert alle Nachweise, die zu einer Berechnung ausgestellt wurden.
    pub fn proofs_for_computation(&self, computation_id: &str) -> Vec<&PrivacyProof> {
        self.proofs
            .values()
            .filter(|proof| proof.computation_id == computation_id)
            .collect()
    }
}

/// Das Verzeichnis der registrierten Parteien einer Kollaborations-Sitzung.
///
/// Die Identität der Parteien gilt als vom Aufrufer vor-authentifiziert; das
/// Verzeichnis prüft nur Mitgliedschaft, keine Identität.
#[derive(Debug, Default)]
pub struct PartyDirectory {
    parties: BTreeSet<String>,
}

impl PartyDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert eine Partei unter ihrem Namen.
    pub fn register(&mut self, name: &str) -> Result<(), StoreError> {
        if !self.parties.insert(name.to_string()) {
            return Err(StoreError::PartyAlreadyRegistered(name.to_string()));
        }
        Ok(())
    }

    /// Prüft, ob eine Partei registriert ist.
    pub fn contains(&self, name: &str) -> bool {
        self.parties.contains(name)
    }

    /// Schlägt fehl, wenn die Partei nicht registriert ist.
    pub fn ensure_registered(&self, name: &str) -> Result<(), StoreError> {
        if !self.contains(name) {
            return Err(StoreError::UnknownParty(name.to_string()));
        }
        Ok(())
    }

    /// Liefert die Namen aller registrierten Parteien in stabiler Reihenfolge.
    pub fn names(&self) -> Vec<String> {
        self.parties.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.parties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }
}

//! # src/coordinator.rs
//!
//! Die aufruferseitige Fassade des Kerns. Der `Coordinator` besitzt die
//! Kollaborateure (Store, Parteien-Verzeichnis, Chiffre-Strategie,
//! Aggregations-Strategie, Richtlinie) und bietet die Operationen an, die
//! eine Orchestrierungs-Schicht (Demo, CLI, Netzwerkdienst) aufruft:
//! Datensätze anlegen, Anfragen stellen, abstimmen, Berechnungen ausführen,
//! Nachweise ausstellen. Alle Fehler kommen als typisierte Ergebnisse zurück;
//! der Kern protokolliert nichts und verschluckt nichts.

use crate::error::CollabCoreError;
use crate::models::dataset::{DatasetMetadata, DatasetSchema};
use crate::models::policy::ComputationPolicy;
use crate::models::proof::PrivacyProof;
use crate::models::request::{RequestStatus, RequestSummary};
use crate::models::result::ComputationResult;
use crate::services::computation_engine::{self, AggregationStrategy, SchemaProfileStrategy};
use crate::services::crypto_utils::{cipher_for_method, PayloadCipher};
use crate::services::dataset_manager::{create_encrypted_dataset, verify_dataset_integrity};
use crate::services::proof_manager;
use crate::services::request_manager::{add_approval, create_computation_request, NewRequestData};
use crate::store::{CollabStore, PartyDirectory};

/// Die Fassade über eine Kollaborations-Sitzung.
pub struct Coordinator {
    policy: ComputationPolicy,
    cipher: Box<dyn PayloadCipher>,
    strategy: Box<dyn AggregationStrategy>,
    store: CollabStore,
    directory: PartyDirectory,
}

impl Coordinator {
    /// Erstellt einen `Coordinator` mit gegebener Richtlinie und
    /// Aggregations-Strategie. Die Chiffre-Strategie folgt der Richtlinie.
    pub fn new(policy: ComputationPolicy, strategy: Box<dyn AggregationStrategy>) -> Self {
        let cipher = cipher_for_method(policy.encryption.method);
        Coordinator {
            policy,
            cipher,
            strategy,
            store: CollabStore::new(),
            directory: PartyDirectory::new(),
        }
    }

    /// Erstellt einen `Coordinator` mit der Demo-Richtlinie und der
    /// Metadaten-Referenz-Strategie.
    pub fn with_defaults() -> Self {
        Coordinator::new(ComputationPolicy::default(), Box::new(SchemaProfileStrategy))
    }

    /// Die aktive Richtlinie.
    pub fn policy(&self) -> &ComputationPolicy {
        &self.policy
    }

    /// Registriert eine Partei im Verzeichnis der Sitzung.
    ///
    /// Die Identität gilt als vom Aufrufer vor-authentifiziert.
    pub fn register_party(&mut self, name: &str) -> Result<(), CollabCoreError> {
        self.directory.register(name)?;
        Ok(())
    }

    /// Die Namen aller registrierten Parteien in stabiler Reihenfolge.
    pub fn parties(&self) -> Vec<String> {
        self.directory.names()
    }

    /// Erstellt einen verschlüsselten Datensatz und liefert dessen Metadaten.
    ///
    /// Der Besitzer-Schlüssel wird intern erzeugt und verbleibt im Store;
    /// er ist in keiner Rückgabe dieser Fassade enthalten.
    pub fn create_dataset(
        &mut self,
        name: &str,
        raw_payload: &[u8],
        schema: DatasetSchema,
    ) -> Result<DatasetMetadata, CollabCoreError> {
        let dataset = create_encrypted_dataset(name, raw_payload, schema, self.cipher.as_ref())?;
        let metadata = dataset.metadata();
        self.store.insert_dataset(dataset);
        Ok(metadata)
    }

    /// Liefert die Metadaten eines abgelegten Datensatzes.
    pub fn get_metadata(&self, dataset_id: &str) -> Result<DatasetMetadata, CollabCoreError> {
        Ok(self.store.dataset(dataset_id)?.metadata())
    }

    /// Führt die Integritäts-Selbstprüfung eines Datensatzes aus.
    pub fn verify_dataset(&self, dataset_id: &str) -> Result<bool, CollabCoreError> {
        Ok(verify_dataset_integrity(self.store.dataset(dataset_id)?))
    }

    /// Erstellt eine Berechnungsanfrage und liefert ihre ID.
    ///
    /// Die Stimmberechtigten ergeben sich aus dem Parteien-Verzeichnis ohne
    /// die anfragende Partei; jede referenzierte Datensatz-ID muss im Store
    /// existieren.
    pub fn create_request(&mut self, data: NewRequestData) -> Result<String, CollabCoreError> {
        self.directory.ensure_registered(&data.requesting_party)?;
        for dataset_id in &data.target_dataset_ids {
            self.store.dataset(dataset_id)?;
        }

        let participants = self.directory.names();
        let request = create_computation_request(data, &participants, &self.policy)?;
        let request_id = request.id.clone();
        self.store.insert_request(request);
        Ok(request_id)
    }

    /// Verbucht die Stimme einer Partei und liefert den neuen Status.
    pub fn vote(
        &mut self,
        request_id: &str,
        party: &str,
        approved: bool,
    ) -> Result<RequestStatus, CollabCoreError> {
        let request = self.store.request_mut(request_id)?;
        Ok(add_approval(request, party, approved)?)
    }

    /// Liefert die serialisierbare Zusammenfassung einer Anfrage.
    pub fn request_summary(&self, request_id: &str) -> Result<RequestSummary, CollabCoreError> {
        Ok(self.store.request(request_id)?.summary())
    }

    /// Führt eine freigegebene Berechnungsanfrage aus und verbucht das Ergebnis.
    ///
    /// Atomar: Schlägt irgendein Schritt fehl, wird kein Ergebnis verbucht und
    /// die Anfrage behält ihren bisherigen Status.
    pub fn run_computation(&mut self, request_id: &str) -> Result<ComputationResult, CollabCoreError> {
        let request = self.store.request(request_id)?;
        let result = computation_engine::execute(request, self.store.datasets(), self.strategy.as_ref())?;
        self.store.record_result(result.clone());
        Ok(result)
    }

    /// Liefert das verbuchte Ergebnis einer Berechnung.
    pub fn result(&self, computation_id: &str) -> Result<&ComputationResult, CollabCoreError> {
        Ok(self.store.result(computation_id)?)
    }

    /// Stellt einen Privatsphäre-Nachweis für eine abgeschlossene Berechnung aus.
    pub fn issue_proof(
        &mut self,
        computation_id: &str,
        proof_type: &str,
    ) -> Result<PrivacyProof, CollabCoreError> {
        let result = self.store.result(computation_id)?;
        let proof = proof_manager::issue_proof(result, proof_type)?;
        self.store.insert_proof(proof.clone());
        Ok(proof)
    }

    /// Validiert einen abgelegten Nachweis gegen sein Berechnungsergebnis.
    ///
    /// Liefert `false`, wenn der Nachweis inhaltlich nicht mehr zu sich selbst
    /// oder zum Ergebnis passt; andere Fehler (z.B. unbekannte IDs) werden
    /// durchgereicht.
    pub fn validate_proof(&self, proof_id: &str) -> Result<bool, CollabCoreError> {
        let proof = self.store.proof(proof_id)?;
        let result = self.store.result(&proof.computation_id)?;
        match proof_manager::validate_proof_for_result(proof, result) {
            Ok(()) => Ok(true),
            Err(CollabCoreError::Proof(_)) => Ok(false),
            Err(other) => Err(other),
        }
    }

    /// Liefert alle Nachweise zu einer Berechnung.
    pub fn proofs_for_computation(&self, computation_id: &str) -> Vec<PrivacyProof> {
        self.store
            .proofs_for_computation(computation_id)
            .into_iter()
            .cloned()
            .collect()
    }
}

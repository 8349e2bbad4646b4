//! # src/test_utils.rs
//!
//! Zentrale Hilfsfunktionen und Demo-Fixtures für alle Tests (intern und extern).
//! Die drei Demo-Parteien entsprechen dem Gesundheitsdaten-Szenario, mit dem
//! die Bibliothek entworfen wurde.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::coordinator::Coordinator;
use crate::models::dataset::{DatasetSchema, EncryptedDataset};
use crate::models::policy::ComputationPolicy;
use crate::models::request::ComputationRequest;
use crate::services::computation_engine::SchemaProfileStrategy;
use crate::services::crypto_utils::XorStreamCipher;
use crate::services::dataset_manager::create_encrypted_dataset;
use crate::services::request_manager::{add_approval, create_computation_request, NewRequestData};

/// Die drei Demo-Parteien des Gesundheitsdaten-Szenarios.
pub const BOSTON_GENERAL: &str = "Boston General Hospital";
pub const NOVARTIS: &str = "Novartis Pharmaceuticals";
pub const MIT_LAB: &str = "MIT Research Laboratory";

/// Alle Demo-Parteien als Vektor, z.B. für die Anfrage-Erstellung.
pub fn demo_parties() -> Vec<String> {
    vec![
        BOSTON_GENERAL.to_string(),
        NOVARTIS.to_string(),
        MIT_LAB.to_string(),
    ]
}

lazy_static! {
    /// Beispielhafte Patientendaten im CSV-Format, wie sie eine Partei einliefern würde.
    pub static ref SAMPLE_PATIENT_CSV: Vec<u8> = "\
patient_id,age,treatment,outcome,recovery_days,side_effects
P001,45,Drug_X,Improved,12,None
P002,62,Drug_Y,Improved,18,Mild
P003,38,Drug_X,Cured,8,None
P004,55,Drug_Y,Improved,22,Moderate
P005,41,Drug_X,Cured,10,None
P006,67,Drug_Y,No_Change,30,Severe
P007,33,Drug_X,Improved,14,Mild
P008,58,Drug_Y,Improved,16,None
P009,49,Drug_X,Cured,9,None
P010,71,Drug_Y,Improved,25,Moderate
"
    .as_bytes()
    .to_vec();
}

/// Das deklarierte Schema der Beispiel-Patientendaten.
pub fn sample_schema() -> DatasetSchema {
    let mut schema = DatasetSchema::new();
    schema.insert("patient_id".to_string(), "string".to_string());
    schema.insert("age".to_string(), "integer".to_string());
    schema.insert("treatment".to_string(), "string".to_string());
    schema.insert("outcome".to_string(), "string".to_string());
    schema.insert("recovery_days".to_string(), "integer".to_string());
    schema.insert("side_effects".to_string(), "string".to_string());
    schema
}

/// Erstellt einen `Coordinator` mit Demo-Richtlinie und allen drei
/// registrierten Demo-Parteien.
pub fn demo_coordinator() -> Coordinator {
    let mut coordinator =
        Coordinator::new(ComputationPolicy::default(), Box::new(SchemaProfileStrategy));
    for party in demo_parties() {
        coordinator
            .register_party(&party)
            .expect("demo party registration must succeed");
    }
    coordinator
}

/// Baut drei verschlüsselte Demo-Datensätze (einen pro Partei) und eine
/// bereits freigegebene Anfrage des MIT-Labors darüber.
///
/// Nützlich für Engine- und Nachweis-Tests, die hinter der Zustandsmaschine
/// ansetzen.
pub fn approved_request_with_datasets() -> (ComputationRequest, HashMap<String, EncryptedDataset>) {
    let cipher = XorStreamCipher;
    let mut datasets = HashMap::new();
    for (i, party) in demo_parties().iter().enumerate() {
        let dataset = create_encrypted_dataset(
            &format!("{}_patient_outcomes_{}", party, i + 1),
            &SAMPLE_PATIENT_CSV,
            sample_schema(),
            &cipher,
        )
        .expect("demo dataset creation must succeed");
        datasets.insert(dataset.id.clone(), dataset);
    }

    let data = NewRequestData {
        title: "Multi-Drug Treatment Effectiveness Analysis".to_string(),
        description: "Analyze effectiveness of Drug X vs Drug Y across multiple healthcare providers"
            .to_string(),
        research_question: "Which treatment shows better patient outcomes with fewer side effects?"
            .to_string(),
        requesting_party: MIT_LAB.to_string(),
        target_dataset_ids: datasets.keys().cloned().collect(),
    };

    let mut request =
        create_computation_request(data, &demo_parties(), &ComputationPolicy::default())
            .expect("demo request creation must succeed");
    add_approval(&mut request, BOSTON_GENERAL, true).expect("vote must succeed");
    add_approval(&mut request, NOVARTIS, true).expect("vote must succeed");

    (request, datasets)
}

//! # src/models/policy.rs
//!
//! Definiert die TOML-ladbare Richtlinien-Definition, nach der ein
//! `Coordinator` konfiguriert wird. Die Definition legt regelbasierte Felder
//! fest (Mindestanzahl stimmberechtigter Parteien, Chiffre-Variante), während
//! die Zustandsmaschine selbst unverändert bleibt.

use crate::models::dataset::CipherMethod;
use serde::Deserialize;

/// Beschreibende Metadaten einer Richtlinie.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PolicyMetadata {
    /// Name der Richtlinie.
    pub name: String,
    /// Optionale Beschreibung.
    #[serde(default)]
    pub description: String,
}

/// Regeln für den Freigabe-Workflow.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ApprovalPolicy {
    /// Mindestanzahl stimmberechtigter Parteien (ohne die anfragende Partei),
    /// die eine Anfrage bei der Erstellung haben muss. Werte unter 1 werden
    /// auf 1 angehoben, denn Einstimmigkeit über niemanden wäre bedeutungslos.
    pub minimum_voters: usize,
}

/// Regeln für die Verschlüsselung neuer Datensätze.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct EncryptionPolicy {
    /// Die Chiffre-Variante für neu erstellte Datensätze.
    pub method: CipherMethod,
}

/// Die vollständige Richtlinien-Definition.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ComputationPolicy {
    pub metadata: PolicyMetadata,
    pub approval: ApprovalPolicy,
    pub encryption: EncryptionPolicy,
}

impl Default for ComputationPolicy {
    /// Die Demo-Richtlinie: eine stimmberechtigte Partei genügt, Datensätze
    /// werden mit dem XOR-Strom-Kombinator verschlüsselt.
    fn default() -> Self {
        ComputationPolicy {
            metadata: PolicyMetadata {
                name: "default-collaboration-policy".to_string(),
                description: String::new(),
            },
            approval: ApprovalPolicy { minimum_voters: 1 },
            encryption: EncryptionPolicy {
                method: CipherMethod::XorStream,
            },
        }
    }
}

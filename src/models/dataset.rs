//! # src/models/dataset.rs
//!
//! Definiert die Datenstrukturen für einen verschlüsselten Datensatz einer Partei.
//! Ein `EncryptedDataset` wird bei der Erstellung verschlüsselt und gibt nach außen
//! ausschließlich Metadaten preis; der Besitzer-Schlüssel verlässt die Struktur nie.

use crate::services::crypto_utils::EncryptionKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Das deklarierte Schema eines Datensatzes: Spaltenname → Typbezeichnung (z.B. "integer").
///
/// Das Schema wird vom Ersteller angegeben und niemals aus dem Inhalt abgeleitet;
/// der Kern inspiziert den Klartext nach der Verschlüsselung nicht mehr.
pub type DatasetSchema = BTreeMap<String, String>;

/// Kennzeichnet die Chiffre-Variante, mit der ein Payload verschlüsselt wurde.
///
/// Die Verwendung eines Enums anstelle eines reinen Strings erhöht die Typsicherheit
/// und macht die gewählte Strategie im Code explizit.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherMethod {
    /// Der byteweise XOR-Stromchiffrier-Kombinator. Längenerhaltend, aber ohne
    /// jede Authentisierung. Dient ausschließlich der Illustration des Protokollablaufs.
    #[serde(rename = "XOR_STREAM")]
    XorStream,
    /// Authentisierte Verschlüsselung mit ChaCha20-Poly1305 als produktionsnahe
    /// Ersatz-Strategie. Der Ciphertext trägt ein 16-Byte-Authentisierungs-Tag.
    #[serde(rename = "CHACHA20_POLY1305")]
    ChaCha20Poly1305,
}

/// Das Ergebnis einer Verschlüsselungsoperation.
///
/// Der `key_fingerprint` ist ein Einweg-Digest des Schlüssels: Zwei Datensätze,
/// die unter demselben Schlüssel verschlüsselt wurden, lassen sich darüber
/// korrelieren, ohne den Schlüssel selbst offenzulegen.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EncryptedPayload {
    /// Die verschlüsselten Nutzdaten.
    pub ciphertext: Vec<u8>,
    /// Die pro Verschlüsselungsaufruf frisch gezogene 12-Byte-Nonce.
    pub nonce: Vec<u8>,
    /// 16 Hex-Zeichen langer Einweg-Digest des verwendeten Schlüssels.
    pub key_fingerprint: String,
    /// Die Chiffre-Variante, mit der dieser Payload erzeugt wurde.
    pub method: CipherMethod,
}

/// Repräsentiert den verschlüsselten Datensatz einer Partei.
///
/// Die Struktur implementiert bewusst kein `Serialize`: Der `owner_key` gehört
/// exklusiv dem erstellenden Prozess und darf auf keinem Transportweg landen.
/// Nach außen wird ausschließlich [`DatasetMetadata`] gereicht.
#[derive(Debug)]
pub struct EncryptedDataset {
    /// Eindeutige Kennung, abgeleitet aus Name und Erstellungszeitpunkt (16 Hex-Zeichen).
    pub id: String,
    /// Der vom Ersteller vergebene Name des Datensatzes.
    pub name: String,
    /// Das deklarierte Schema der Rohdaten.
    pub schema: DatasetSchema,
    /// Der verschlüsselte Inhalt samt Nonce und Schlüssel-Fingerprint.
    pub payload: EncryptedPayload,
    /// Der Besitzer-Schlüssel. Verlässt diese Struktur nie und wird beim
    /// Verlassen des Gültigkeitsbereichs genullt.
    pub(crate) owner_key: EncryptionKey,
    /// Der Erstellungszeitpunkt im ISO 8601-Format.
    pub created_at: String,
}

impl EncryptedDataset {
    /// Erstellt die nach außen sichtbare Metadaten-Projektion des Datensatzes.
    ///
    /// Die Projektion enthält weder den Schlüssel noch irgendein aus dem
    /// Klartext ableitbares Feld.
    pub fn metadata(&self) -> DatasetMetadata {
        DatasetMetadata {
            id: self.id.clone(),
            name: self.name.clone(),
            schema: self.schema.clone(),
            size_bytes: self.payload.ciphertext.len(),
            encryption_method: self.payload.method,
            key_fingerprint: self.payload.key_fingerprint.clone(),
            created_at: self.created_at.clone(),
            is_encrypted: true,
        }
    }
}

/// Die serialisierbaren Metadaten eines verschlüsselten Datensatzes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DatasetMetadata {
    /// Eindeutige Kennung des Datensatzes.
    pub id: String,
    /// Name des Datensatzes.
    pub name: String,
    /// Das deklarierte Schema.
    pub schema: DatasetSchema,
    /// Länge des Ciphertexts in Bytes.
    pub size_bytes: usize,
    /// Die verwendete Chiffre-Variante.
    pub encryption_method: CipherMethod,
    /// Einweg-Digest des Besitzer-Schlüssels.
    pub key_fingerprint: String,
    /// Erstellungszeitpunkt im ISO 8601-Format.
    pub created_at: String,
    /// Marker, dass der Inhalt verschlüsselt vorliegt.
    pub is_encrypted: bool,
}

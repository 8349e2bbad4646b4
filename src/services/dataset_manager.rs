//! # src/services/dataset_manager.rs
//!
//! Enthält die Kernlogik zur Erstellung und Integritätsprüfung eines
//! `EncryptedDataset`. Die Rohdaten werden genau einmal, bei der Erstellung,
//! angefasst; danach arbeitet der Kern ausschließlich auf Metadaten.

use crate::error::CollabCoreError;
use crate::models::dataset::{DatasetSchema, EncryptedDataset};
use crate::services::crypto_utils::{self, cipher_for_method, derive_short_id, PayloadCipher};
use crate::services::utils::get_current_timestamp;

/// Erstellt einen verschlüsselten Datensatz aus Rohdaten und deklariertem Schema.
///
/// Für jeden Datensatz wird ein frischer Besitzer-Schlüssel erzeugt; die ID
/// entsteht aus Name und Erstellungszeitpunkt. Das Schema wird übernommen wie
/// deklariert und nicht aus dem Inhalt abgeleitet.
///
/// # Arguments
/// * `name` - Der Name des Datensatzes.
/// * `raw_payload` - Die zu verschlüsselnden Rohdaten.
/// * `schema` - Das deklarierte Schema (Spalte → Typ).
/// * `cipher` - Die Chiffre-Strategie für die Verschlüsselung.
pub fn create_encrypted_dataset(
    name: &str,
    raw_payload: &[u8],
    schema: DatasetSchema,
    cipher: &dyn PayloadCipher,
) -> Result<EncryptedDataset, CollabCoreError> {
    let owner_key = crypto_utils::generate_key()?;
    let payload = cipher.encrypt(raw_payload, &owner_key)?;
    let created_at = get_current_timestamp();
    let id = derive_short_id(format!("{}{}", name, created_at));

    Ok(EncryptedDataset {
        id,
        name: name.to_string(),
        schema,
        payload,
        owner_key,
        created_at,
    })
}

/// Prüft, ob der Datensatz mit dem Besitzer-Schlüssel rund-trip-fähig ist.
///
/// Entschlüsselt den Payload, verschlüsselt das Ergebnis unter einer frischen
/// Nonce erneut und vergleicht die Ciphertext-Längen. Das beweist nur, dass
/// die Längenerhaltung der Chiffre rund-trippt. Es ist **kein**
/// kryptographischer Unversehrtheits-Nachweis (es existiert kein MAC in diesem
/// Entwurf) und würde auch für einen verfälschten Ciphertext bestehen. Diese
/// bekannte Einschränkung ist Teil des Vertrags.
pub fn verify_dataset_integrity(dataset: &EncryptedDataset) -> bool {
    let cipher = cipher_for_method(dataset.payload.method);

    let plaintext = match cipher.decrypt(&dataset.payload, &dataset.owner_key) {
        Ok(plaintext) => plaintext,
        Err(_) => return false,
    };

    match cipher.encrypt(&plaintext, &dataset.owner_key) {
        Ok(re_encrypted) => re_encrypted.ciphertext.len() == dataset.payload.ciphertext.len(),
        Err(_) => false,
    }
}

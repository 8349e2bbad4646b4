//! # utils.rs
//!
//! Enthält allgemeine Hilfsfunktionen, z.B. für Zeitstempel und kanonische Serialisierung.

use chrono::Utc;
use serde::Serialize;
use serde_json_canonicalizer::to_vec;

/// Serialisiert eine beliebige `Serialize`-bare Struktur in einen kanonischen JSON-String
/// gemäß RFC 8785 (JCS - JSON Canonicalization Scheme).
///
/// Dies stellt sicher, dass die Ausgabe deterministisch ist:
/// - Schlüssel in Objekten sind alphabetisch sortiert.
/// - Keine überflüssigen Leerzeichen.
///
/// Diese Funktion ist essenziell für die Ableitung von Prüf-Hashes (z.B. für
/// `PrivacyProof`), da sie garantiert, dass derselbe logische Inhalt immer
/// denselben Hash erzeugt.
///
/// # Arguments
/// * `value` - Ein Wert, der `serde::Serialize` implementiert.
///
/// # Returns
/// Ein `Result`, das entweder den kompakten, kanonischen JSON-String oder einen Fehler enthält.
pub fn to_canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    to_vec(value).map(|bytes| String::from_utf8(bytes).expect("JCS output is valid UTF-8"))
}

/// Returns the current timestamp in ISO 8601 format in UTC with microsecond precision.
///
/// # Returns
///
/// A string representing the timestamp in ISO 8601 format (YYYY-MM-DDTHH:MM:SS.ffffffZ).
pub fn get_current_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

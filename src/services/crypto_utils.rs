// Zufallszahlengenerierung
use rand_core::{OsRng, RngCore};

// Kryptografische Hashes (SHA-2)
use sha2::{Digest, Sha256};

// Authentisierte Verschlüsselung (Ersatz-Strategie für den XOR-Strom)
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};

// Standard Bibliothek
use std::fmt;

use crate::models::dataset::{CipherMethod, EncryptedPayload};
use zeroize::ZeroizeOnDrop;

/// Länge eines Verschlüsselungs-Schlüssels in Bytes.
pub const KEY_LEN: usize = 32;
/// Länge der pro Verschlüsselungsaufruf frisch gezogenen Nonce in Bytes.
pub const NONCE_LEN: usize = 12;
/// Länge eines Schlüssel-Fingerprints in Hex-Zeichen.
pub const FINGERPRINT_LEN: usize = 16;

/// Custom error type for cipher and key generation functions.
#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    /// The operating system's entropy source could not provide random bytes.
    /// This is fatal for key and nonce generation and is never retried.
    #[error("The operating system entropy source is unavailable.")]
    EntropyUnavailable,

    /// Indicates that the AEAD encryption process failed.
    #[error("AEAD encryption failed.")]
    EncryptionFailed,

    /// Indicates that AEAD decryption failed, likely due to a wrong key or tampered data.
    /// The XOR stream variant never raises this: it has no way to notice a wrong key.
    #[error("AEAD decryption failed. The key may be incorrect or the data may have been tampered with.")]
    DecryptionFailed,

    /// Indicates that the payload carries a nonce of unexpected length.
    #[error("Invalid nonce length: expected {expected} bytes, got {actual}.")]
    NonceLength { expected: usize, actual: usize },
}

/// Ein symmetrischer 32-Byte-Schlüssel aus einer kryptographisch sicheren Zufallsquelle.
///
/// Der Schlüssel gehört exklusiv der Partei, die ihn erzeugt hat. Er wird niemals
/// serialisiert und beim Verlassen des Gültigkeitsbereichs genullt. Nach außen
/// existiert er ausschließlich als [`EncryptionKey::fingerprint`].
#[derive(ZeroizeOnDrop)]
pub struct EncryptionKey([u8; KEY_LEN]);

impl EncryptionKey {
    /// Baut einen Schlüssel aus vorhandenen Bytes auf.
    ///
    /// Reguläre Aufrufer erzeugen Schlüssel über [`generate_key`]; dieser
    /// Konstruktor dient reproduzierbaren Tests und externen Schlüsselquellen.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        EncryptionKey(bytes)
    }

    /// Gibt die rohen Schlüsselbytes für die Chiffre-Strategien frei.
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Berechnet den Einweg-Digest des Schlüssels (16 Hex-Zeichen, SHA-256).
    ///
    /// Zwei unter demselben Schlüssel verschlüsselte Payloads lassen sich über
    /// den Fingerprint korrelieren, ohne den Schlüssel offenzulegen.
    pub fn fingerprint(&self) -> String {
        derive_short_id(self.0)
    }
}

// Der Schlüssel darf auch über Debug-Ausgaben nicht entweichen.
impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncryptionKey(fingerprint={})", self.fingerprint())
    }
}

/// Generates a random 32-byte encryption key.
///
/// # Errors
///
/// Returns `CipherError::EntropyUnavailable` if the operating system's
/// entropy source cannot be read. This is the only failure mode.
pub fn generate_key() -> Result<EncryptionKey, CipherError> {
    let mut bytes = [0u8; KEY_LEN];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|_| CipherError::EntropyUnavailable)?;
    Ok(EncryptionKey(bytes))
}

/// Zieht eine frische 12-Byte-Nonce aus der OS-Zufallsquelle.
///
/// Nonce-Wiederverwendung unter demselben Schlüssel wäre ein Sicherheitsdefekt,
/// kein tolerierter Randfall; deshalb wird die Nonce pro Aufruf neu gezogen und
/// niemals vom Aufrufer übergeben.
fn generate_nonce() -> Result<[u8; NONCE_LEN], CipherError> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|_| CipherError::EntropyUnavailable)?;
    Ok(nonce)
}

/// Computes a short identifier from the input: the first 16 hex characters
/// of its SHA-256 digest.
///
/// Used for dataset, request, and proof ids (hashed over name + creation
/// timestamp) as well as for key fingerprints.
///
/// # Arguments
///
/// * `input` - The data to hash. Accepts anything that can be referenced as a byte slice.
pub fn derive_short_id(input: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_ref());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(FINGERPRINT_LEN);
    digest
}

/// Computes a SHA3-256 hash of the input and returns it as a base58-encoded string.
///
/// # Arguments
///
/// * `input` - The data to hash. Accepts anything that can be referenced as a byte slice.
///
/// # Returns
///
/// A base58-encoded SHA3-256 hash string.
pub fn get_hash(input: impl AsRef<[u8]>) -> String {
    use sha3::Digest;
    let mut hasher = sha3::Sha3_256::new();
    hasher.update(input.as_ref());
    let hash_bytes = hasher.finalize();
    bs58::encode(hash_bytes).into_string()
}

/// Die Strategie-Schnittstelle für die Payload-Verschlüsselung.
///
/// Der Datensatz- und Request-Vertrag hängt nur von dieser Schnittstelle ab,
/// sodass der Demonstrations-Kombinator ohne Änderung der übrigen Verträge
/// durch eine authentisierte Chiffre ersetzt werden kann.
pub trait PayloadCipher {
    /// Die Chiffre-Variante, die diese Strategie erzeugt.
    fn method(&self) -> CipherMethod;

    /// Verschlüsselt `plaintext` unter `key` mit einer frischen Nonce.
    fn encrypt(&self, plaintext: &[u8], key: &EncryptionKey) -> Result<EncryptedPayload, CipherError>;

    /// Entschlüsselt einen zuvor von dieser Strategie erzeugten Payload.
    fn decrypt(&self, payload: &EncryptedPayload, key: &EncryptionKey) -> Result<Vec<u8>, CipherError>;
}

/// Der byteweise XOR-Strom-Kombinator: `ct[i] = pt[i] ^ key[i % 32] ^ nonce[i % 12]`.
///
/// Längenerhaltend und selbst-invers. **Nicht kryptographisch belastbar**:
/// Schlüssel- und Nonce-Strom wiederholen sich zyklisch, und es existiert kein
/// Authentisierungs-Tag. Eine Entschlüsselung mit falschem Schlüssel gelingt
/// strukturell (gleiche Länge), liefert aber unbrauchbaren Klartext. Diese
/// Schwäche ist dokumentierter Teil des Vertrags, keine zu reparierende Lücke.
/// Aufrufer, die Manipulations- oder Falschschlüssel-Erkennung brauchen,
/// verwenden [`ChaCha20Poly1305Cipher`].
pub struct XorStreamCipher;

fn xor_stream(input: &[u8], key: &EncryptionKey, nonce: &[u8]) -> Vec<u8> {
    let key_bytes = key.as_bytes();
    input
        .iter()
        .enumerate()
        .map(|(i, byte)| byte ^ key_bytes[i % KEY_LEN] ^ nonce[i % nonce.len()])
        .collect()
}

impl PayloadCipher for XorStreamCipher {
    fn method(&self) -> CipherMethod {
        CipherMethod::XorStream
    }

    fn encrypt(&self, plaintext: &[u8], key: &EncryptionKey) -> Result<EncryptedPayload, CipherError> {
        let nonce = generate_nonce()?;
        Ok(EncryptedPayload {
            ciphertext: xor_stream(plaintext, key, &nonce),
            nonce: nonce.to_vec(),
            key_fingerprint: key.fingerprint(),
            method: CipherMethod::XorStream,
        })
    }

    fn decrypt(&self, payload: &EncryptedPayload, key: &EncryptionKey) -> Result<Vec<u8>, CipherError> {
        if payload.nonce.len() != NONCE_LEN {
            return Err(CipherError::NonceLength {
                expected: NONCE_LEN,
                actual: payload.nonce.len(),
            });
        }
        // Der Kombinator ist selbst-invers; ein falscher Schlüssel fällt hier
        // nicht auf, sondern erzeugt stillschweigend unbrauchbaren Klartext.
        Ok(xor_stream(&payload.ciphertext, key, &payload.nonce))
    }
}

/// Authentisierte Verschlüsselung mit ChaCha20-Poly1305.
///
/// Die produktionsnahe Ersatz-Strategie: Ein falscher Schlüssel oder ein
/// manipulierter Ciphertext schlägt bei der Entschlüsselung fehl. Der
/// Ciphertext ist um das 16-Byte-Tag länger als der Klartext.
pub struct ChaCha20Poly1305Cipher;

impl PayloadCipher for ChaCha20Poly1305Cipher {
    fn method(&self) -> CipherMethod {
        CipherMethod::ChaCha20Poly1305
    }

    fn encrypt(&self, plaintext: &[u8], key: &EncryptionKey) -> Result<EncryptedPayload, CipherError> {
        let nonce = generate_nonce()?;
        let cipher = ChaCha20Poly1305::new(key.as_bytes().into());
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|_| CipherError::EncryptionFailed)?;
        Ok(EncryptedPayload {
            ciphertext,
            nonce: nonce.to_vec(),
            key_fingerprint: key.fingerprint(),
            method: CipherMethod::ChaCha20Poly1305,
        })
    }

    fn decrypt(&self, payload: &EncryptedPayload, key: &EncryptionKey) -> Result<Vec<u8>, CipherError> {
        if payload.nonce.len() != NONCE_LEN {
            return Err(CipherError::NonceLength {
                expected: NONCE_LEN,
                actual: payload.nonce.len(),
            });
        }
        let cipher = ChaCha20Poly1305::new(key.as_bytes().into());
        let nonce = Nonce::from_slice(&payload.nonce);
        // `decrypt` verifiziert das Authentisierungs-Tag; bei falschem Schlüssel
        // oder manipulierten Daten kommt ein Fehler zurück.
        cipher
            .decrypt(nonce, payload.ciphertext.as_slice())
            .map_err(|_| CipherError::DecryptionFailed)
    }
}

/// Liefert die zu einer Chiffre-Variante gehörende Strategie.
///
/// Wird überall dort verwendet, wo ein Payload anhand seines Methoden-Tags
/// verarbeitet werden muss (z.B. bei der Integritätsprüfung eines Datensatzes).
pub fn cipher_for_method(method: CipherMethod) -> Box<dyn PayloadCipher> {
    match method {
        CipherMethod::XorStream => Box::new(XorStreamCipher),
        CipherMethod::ChaCha20Poly1305 => Box::new(ChaCha20Poly1305Cipher),
    }
}

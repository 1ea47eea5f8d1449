//! SSH key material
//!
//! Key pairs are generated as ECDSA P-256. Public keys use the OpenSSH
//! `<type> <base64 blob> [comment]` format and fingerprints the OpenSSH
//! `SHA256:<unpadded base64>` form over the key blob.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine as _;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::pkcs8::{EncodePrivateKey, LineEnding};
use p256::{PublicKey, SecretKey};
use rand_core::OsRng;
use sha2::{Digest, Sha256};
use thiserror::Error;

pub const ECDSA_P256_KEY_TYPE: &str = "ecdsa-sha2-nistp256";
const ECDSA_P256_CURVE: &str = "nistp256";

/// Key types accepted for registration
const SUPPORTED_KEY_TYPES: &[&str] = &[
    "ssh-rsa",
    "ssh-ed25519",
    ECDSA_P256_KEY_TYPE,
    "ecdsa-sha2-nistp384",
    "ecdsa-sha2-nistp521",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SshKeyError {
    #[error("Public key is invalid: {0}")]
    InvalidPublicKey(String),

    #[error("Failed to encode private key: {0}")]
    Encoding(String),
}

/// Freshly generated key pair
#[derive(Debug, Clone)]
pub struct GeneratedKey {
    pub public_key: String,
    /// PKCS#8 PEM
    pub private_key: String,
    pub fingerprint: String,
}

/// A validated OpenSSH public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPublicKey {
    pub key_type: String,
    /// `<type> <base64 blob>`, comment stripped
    pub public_key: String,
    pub fingerprint: String,
}

/// Generate an ECDSA P-256 key pair
pub fn generate_key_pair() -> Result<GeneratedKey, SshKeyError> {
    let secret = SecretKey::random(&mut OsRng);
    let private_key = secret
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| SshKeyError::Encoding(e.to_string()))?;

    let blob = ecdsa_p256_blob(&secret.public_key());
    Ok(GeneratedKey {
        public_key: format!("{} {}", ECDSA_P256_KEY_TYPE, STANDARD.encode(&blob)),
        private_key: private_key.to_string(),
        fingerprint: fingerprint(&blob),
    })
}

/// Parse and validate an OpenSSH public key line
pub fn parse_public_key(line: &str) -> Result<ParsedPublicKey, SshKeyError> {
    let mut fields = line.split_whitespace();
    let (key_type, encoded) = match (fields.next(), fields.next()) {
        (Some(key_type), Some(encoded)) => (key_type, encoded),
        _ => return Err(invalid("expected '<type> <base64>'")),
    };

    if !SUPPORTED_KEY_TYPES.contains(&key_type) {
        return Err(invalid(format!("unsupported key type '{}'", key_type)));
    }

    let blob = STANDARD
        .decode(encoded)
        .map_err(|e| invalid(format!("bad base64: {}", e)))?;

    let (embedded_type, rest) = read_ssh_string(&blob).ok_or_else(|| invalid("truncated key"))?;
    if embedded_type != key_type.as_bytes() {
        return Err(invalid("key type does not match key data"));
    }

    if key_type == ECDSA_P256_KEY_TYPE {
        let (curve, rest) = read_ssh_string(rest).ok_or_else(|| invalid("truncated key"))?;
        if curve != ECDSA_P256_CURVE.as_bytes() {
            return Err(invalid("curve does not match key type"));
        }
        let (point, _) = read_ssh_string(rest).ok_or_else(|| invalid("truncated key"))?;
        PublicKey::from_sec1_bytes(point).map_err(|_| invalid("not a valid P-256 point"))?;
    } else if rest.is_empty() {
        return Err(invalid("missing key data"));
    }

    Ok(ParsedPublicKey {
        key_type: key_type.to_string(),
        public_key: format!("{} {}", key_type, encoded),
        fingerprint: fingerprint(&blob),
    })
}

/// OpenSSH SHA256 fingerprint of a key blob
pub fn fingerprint(blob: &[u8]) -> String {
    format!("SHA256:{}", STANDARD_NO_PAD.encode(Sha256::digest(blob)))
}

fn ecdsa_p256_blob(public_key: &PublicKey) -> Vec<u8> {
    let point = public_key.to_encoded_point(false);
    let mut blob = Vec::new();
    write_ssh_string(&mut blob, ECDSA_P256_KEY_TYPE.as_bytes());
    write_ssh_string(&mut blob, ECDSA_P256_CURVE.as_bytes());
    write_ssh_string(&mut blob, point.as_bytes());
    blob
}

fn write_ssh_string(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}

/// Split a length-prefixed string off the front of `input`
fn read_ssh_string(input: &[u8]) -> Option<(&[u8], &[u8])> {
    let len_bytes: [u8; 4] = input.get(..4)?.try_into().ok()?;
    let len = u32::from_be_bytes(len_bytes) as usize;
    let rest = &input[4..];
    if rest.len() < len {
        return None;
    }
    Some(rest.split_at(len))
}

fn invalid(reason: impl Into<String>) -> SshKeyError {
    SshKeyError::InvalidPublicKey(reason.into())
}

//! Persisted result records and their textual form.
//!
//! A [`HardenedSaltedHash`] is the unit of exchange: it carries the digest,
//! the salt hierarchy needed to recompute it, and one checkpoint per stage.
//! It serializes to JSON with byte fields as standard base64; the JSON may
//! itself be wrapped in an outer base64 envelope.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::engine::adaptive::AdaptiveParameters;
use crate::types::{DigestWidth, Result};

// =============================================================================
// SALT HIERARCHY
// =============================================================================

/// Master, per-stage, timestamp and meta salts for one computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchicalSalt {
    /// Random master salt.
    #[serde(with = "base64_bytes")]
    pub master_salt: Vec<u8>,
    /// One salt per stage, derived from the master salt.
    #[serde(with = "base64_byte_vecs")]
    pub stage_salts: Vec<Vec<u8>>,
    /// Hour-bucket salt.
    #[serde(with = "base64_bytes")]
    pub timestamp_salt: Vec<u8>,
    /// Salt over all other components.
    #[serde(with = "base64_bytes")]
    pub meta_salt: Vec<u8>,
    /// Width the hierarchy was sized for.
    #[serde(rename = "hash_size")]
    pub digest_width: DigestWidth,
}

// =============================================================================
// CHECKPOINTS
// =============================================================================

/// Digest of one stage output, recorded in stage order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryCheckpoint {
    /// Zero-based stage index.
    #[serde(rename = "stage")]
    pub stage_index: usize,
    /// Iterations the stage ran.
    #[serde(rename = "iteration")]
    pub iterations: usize,
    /// Base64 of the width-selected digest of the stage block.
    #[serde(rename = "hash")]
    pub digest: String,
    /// Width of the computation.
    #[serde(rename = "size")]
    pub digest_width: DigestWidth,
}

// =============================================================================
// RESULT
// =============================================================================

/// Complete output of a hardened computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardenedSaltedHash {
    /// Final digest, exactly `digest_width / 8` bytes.
    #[serde(rename = "hash", with = "base64_bytes")]
    pub final_hash: Vec<u8>,
    /// Salt hierarchy; `None` only on malformed stored records.
    pub salt: Option<HierarchicalSalt>,
    /// One checkpoint per stage.
    pub checkpoints: Vec<TrajectoryCheckpoint>,
    /// Wall-clock time including the timing floor.
    pub compute_time_ns: u64,
    /// Memory estimate in KiB.
    pub memory_used_kb: u64,
    /// Descriptive parameters derived from the input.
    pub parameters: AdaptiveParameters,
    /// Algorithm name, e.g. `QHASH-256`.
    pub algorithm: String,
    /// Record format version.
    pub version: String,
    /// Digest width.
    #[serde(rename = "hash_size")]
    pub digest_width: DigestWidth,
}

impl HardenedSaltedHash {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// [`crate::HashError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Standard base64 of the pretty JSON.
    ///
    /// # Errors
    /// [`crate::HashError::Json`] if serialization fails.
    pub fn to_base64(&self) -> Result<String> {
        Ok(STANDARD.encode(self.to_json()?))
    }

    /// Parse a record from JSON or base64-wrapped JSON.
    ///
    /// The outer envelope is stripped when the text is valid base64;
    /// otherwise the text is read as raw JSON.
    ///
    /// # Errors
    /// [`crate::HashError::Json`] if the payload is not a valid record.
    pub fn decode(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let raw = STANDARD
            .decode(trimmed)
            .unwrap_or_else(|_| trimmed.as_bytes().to_vec());
        Ok(serde_json::from_slice(&raw)?)
    }

    /// Digest as standard base64.
    #[must_use]
    pub fn final_hash_base64(&self) -> String {
        STANDARD.encode(&self.final_hash)
    }
}

// =============================================================================
// SERDE HELPERS
// =============================================================================

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

mod base64_byte_vecs {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ptr_arg)]
    pub fn serialize<S>(items: &Vec<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
            seq.serialize_element(&STANDARD.encode(item))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|s| STANDARD.decode(s).map_err(serde::de::Error::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn sample() -> HardenedSaltedHash {
        HardenedSaltedHash {
            final_hash: vec![0xAB; 32],
            salt: Some(HierarchicalSalt {
                master_salt: vec![1; 32],
                stage_salts: vec![vec![2; 16], vec![3; 16]],
                timestamp_salt: vec![4; 12],
                meta_salt: vec![5; 24],
                digest_width: DigestWidth::W256,
            }),
            checkpoints: vec![TrajectoryCheckpoint {
                stage_index: 0,
                iterations: 2000,
                digest: STANDARD.encode([9u8; 32]),
                digest_width: DigestWidth::W256,
            }],
            compute_time_ns: 100_000_000,
            memory_used_kb: 12,
            parameters: AdaptiveParameters::default(),
            algorithm: "QHASH-256".into(),
            version: "2.0".into(),
            digest_width: DigestWidth::W256,
        }
    }

    #[test]
    fn test_field_names_on_the_wire() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(json["hash"], STANDARD.encode([0xAB; 32]));
        assert_eq!(json["hash_size"], 256);
        assert_eq!(json["salt"]["hash_size"], 256);
        assert_eq!(json["salt"]["stage_salts"][1], STANDARD.encode([3u8; 16]));
        assert_eq!(json["checkpoints"][0]["iteration"], 2000);
        assert_eq!(json["checkpoints"][0]["size"], 256);
        assert_eq!(json["compute_time_ns"], 100_000_000);
    }

    #[test]
    fn test_decode_accepts_raw_and_enveloped() {
        let record = sample();
        let raw = HardenedSaltedHash::decode(&record.to_json().unwrap()).unwrap();
        let wrapped = HardenedSaltedHash::decode(&record.to_base64().unwrap()).unwrap();
        assert_eq!(raw, record);
        assert_eq!(wrapped, record);
    }

    #[test]
    fn test_decode_rejects_bad_width_and_garbage() {
        let mut json: serde_json::Value =
            serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        json["hash_size"] = 768.into();
        assert!(HardenedSaltedHash::decode(&json.to_string()).is_err());
        assert!(HardenedSaltedHash::decode("not a record").is_err());
    }

    #[test]
    fn test_null_salt_decodes() {
        let mut json: serde_json::Value =
            serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        json["salt"] = serde_json::Value::Null;
        let record = HardenedSaltedHash::decode(&json.to_string()).unwrap();
        assert!(record.salt.is_none());
    }
}

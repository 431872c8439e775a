//! Width-selected SHA-2 primitives.

use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::types::DigestWidth;

/// SHA-2 construction used for checkpoints and finalization rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// SHA-256 (32 bytes).
    Sha256,
    /// SHA-384 (48 bytes).
    Sha384,
    /// SHA-512 (64 bytes).
    Sha512,
    /// `SHA-512(m) || SHA-512(SHA-512(m))` (128 bytes).
    DoubleSha512,
}

impl Primitive {
    /// Primitive matching a digest width.
    #[must_use]
    pub const fn for_width(width: DigestWidth) -> Self {
        match width {
            DigestWidth::W256 => Self::Sha256,
            DigestWidth::W384 => Self::Sha384,
            DigestWidth::W512 => Self::Sha512,
            DigestWidth::W1024 => Self::DoubleSha512,
        }
    }

    /// Hash the concatenation of `parts`.
    #[must_use]
    pub fn digest(self, parts: &[&[u8]]) -> Vec<u8> {
        match self {
            Self::Sha256 => sha256(parts).to_vec(),
            Self::Sha384 => chain::<Sha384>(parts),
            Self::Sha512 => chain::<Sha512>(parts),
            Self::DoubleSha512 => {
                let mut out = chain::<Sha512>(parts);
                let second = Sha512::digest(&out);
                out.extend_from_slice(&second);
                out
            }
        }
    }
}

/// SHA-256 over the concatenation of `parts`.
#[must_use]
pub fn sha256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

fn chain<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().to_vec()
}

//! Local identifier minting
//!
//! Entities served by this service resolve under a local namespace, so every
//! identifier minted here has the form `<namespace><local>` where the local
//! part is exactly [`ID_LENGTH`] characters from a restricted alphabet.
//!
//! Two construction modes:
//!
//! - [`LocalIdentifier::random`] draws the local part from a CSPRNG. Used
//!   when nothing characteristic is known about the entity.
//! - [`LocalIdentifier::reproducible`] derives the local part from a CRC32C
//!   checksum of the caller's inputs. Same inputs, same argument order,
//!   same identifier - always. Call sites must keep their argument order
//!   stable across releases.
//!
//! Uniqueness is a namespace + length contract only. Checksum collisions
//! between distinct inputs are an accepted, documented risk; they are not
//! detected here because salting the checksum would break reproducibility
//! across repeated imports of the same source data.

use crate::error::IdentifierError;
use rand::Rng;
use std::sync::Arc;
use tessera_graph::Term;

/// Characters a generated local part is drawn from
pub const ID_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Exact length of every local part
pub const ID_LENGTH: usize = 8;

/// Right-padding character for checksum encodings shorter than [`ID_LENGTH`].
/// Reserved: never produced by the alphabet encoding itself.
pub const ID_PADDING: char = '_';

/// An IRI minted under the local namespace
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalIdentifier {
    namespace: Arc<str>,
    local: String,
}

impl LocalIdentifier {
    /// Mint a random identifier in the given namespace
    pub fn random(namespace: &str) -> Self {
        let mut rng = rand::thread_rng();
        let local = (0..ID_LENGTH)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect();
        Self {
            namespace: Arc::from(namespace),
            local,
        }
    }

    /// Mint a reproducible identifier from one or more characteristic parts
    ///
    /// The parts are concatenated in argument order and checksummed with
    /// CRC32C. Fails with [`IdentifierError::EmptyInput`] when the
    /// concatenation is empty.
    pub fn reproducible(namespace: &str, parts: &[&str]) -> Result<Self, IdentifierError> {
        let joined: String = parts.concat();
        if joined.is_empty() {
            return Err(IdentifierError::EmptyInput);
        }
        let checksum = crc32c::crc32c(joined.as_bytes());
        Ok(Self {
            namespace: Arc::from(namespace),
            local: encode_checksum(checksum),
        })
    }

    /// The namespace part
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The 8-character local part
    pub fn local(&self) -> &str {
        &self.local
    }

    /// The full IRI string
    pub fn iri(&self) -> String {
        format!("{}{}", self.namespace, self.local)
    }

    /// The identifier as a graph term
    pub fn to_term(&self) -> Term {
        Term::iri(self.iri())
    }

    /// True iff the IRI conforms to a local identifier: its namespace
    /// matches and the remaining local part has exactly [`ID_LENGTH`]
    /// characters.
    pub fn is_local(iri: &str, namespace: &str) -> bool {
        iri.strip_prefix(namespace)
            .map(|local| local.len() == ID_LENGTH)
            .unwrap_or(false)
    }
}

impl std::fmt::Display for LocalIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.namespace, self.local)
    }
}

/// Encode a checksum into the restricted alphabet.
///
/// The unsigned checksum is repeatedly divided by the alphabet size,
/// remainders collected least-significant first, then reversed. An encoding
/// longer than [`ID_LENGTH`] is truncated to `ID_LENGTH - 1` characters
/// (lossy; kept as observed behavior - a CRC32C value cannot actually reach
/// that branch with a 36-character alphabet). Shorter encodings are
/// right-padded with [`ID_PADDING`].
fn encode_checksum(checksum: u32) -> String {
    let base = ID_ALPHABET.len() as u64;
    let mut number = checksum as u64;
    let mut digits = Vec::new();
    loop {
        digits.push(ID_ALPHABET[(number % base) as usize] as char);
        number /= base;
        if number == 0 {
            break;
        }
    }
    digits.reverse();

    let mut encoded: String = digits.into_iter().collect();
    if encoded.len() > ID_LENGTH {
        encoded.truncate(ID_LENGTH - 1);
    }
    while encoded.len() < ID_LENGTH {
        encoded.push(ID_PADDING);
    }
    encoded
}

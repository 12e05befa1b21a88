//! BIP-32 hierarchical deterministic derivation over secp256k1.
//!
//! Paths use the strict `m/44'/118'/0'/0/0` grammar: a leading `m`, then one
//! or more `/`-separated decimal indices, each optionally hardened with `'`.

use super::{hash160, PrivateKey, Seed};
use crate::error::{KeygenError, KeygenResult};
use cosmrs::bip32::ChildNumber;
use hmac::{Hmac, Mac};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, NonZeroScalar, Scalar, SecretKey};
use sha2::Sha512;
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

type HmacSha512 = Hmac<Sha512>;

/// HMAC key for the master node.
const MASTER_KEY_SALT: &[u8] = b"Bitcoin seed";

/// BIP-32 stores the depth in a single byte.
const MAX_DEPTH: usize = u8::MAX as usize;

/// Parsed HD derivation path. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HdPath(Vec<ChildNumber>);

impl HdPath {
    pub fn iter(&self) -> impl Iterator<Item = ChildNumber> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for HdPath {
    type Err = KeygenError;

    fn from_str(path: &str) -> KeygenResult<Self> {
        let mut segments = path.split('/');
        if segments.next() != Some("m") {
            return Err(KeygenError::invalid_path(format!(
                "`{}` must start with `m/`",
                path
            )));
        }

        let children = segments
            .map(parse_segment)
            .collect::<KeygenResult<Vec<_>>>()?;

        if children.is_empty() {
            return Err(KeygenError::invalid_path("path has no child segments"));
        }
        if children.len() > MAX_DEPTH {
            return Err(KeygenError::invalid_path(format!(
                "path has {} segments, at most {} are allowed",
                children.len(),
                MAX_DEPTH
            )));
        }

        Ok(Self(children))
    }
}

impl fmt::Display for HdPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for child in self.iter() {
            write!(f, "/{}", segment_label(child))?;
        }
        Ok(())
    }
}

fn parse_segment(segment: &str) -> KeygenResult<ChildNumber> {
    let (digits, hardened) = match segment.strip_suffix('\'') {
        Some(digits) => (digits, true),
        None => (segment, false),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(KeygenError::invalid_path(format!(
            "segment `{}` is not a decimal index",
            segment
        )));
    }

    let index: u32 = digits.parse().map_err(|_| {
        KeygenError::invalid_path(format!("segment `{}` does not fit in 31 bits", segment))
    })?;

    ChildNumber::new(index, hardened).map_err(|_| {
        KeygenError::invalid_path(format!("segment `{}` does not fit in 31 bits", segment))
    })
}

fn segment_label(child: ChildNumber) -> String {
    if child.is_hardened() {
        format!("{}'", child.index())
    } else {
        child.index().to_string()
    }
}

/// A node of the BIP-32 tree: private scalar, chain code and position metadata.
///
/// Children are new values; a parent is never modified by deriving from it.
pub struct ExtendedKey {
    secret: SecretKey,
    chain_code: [u8; 32],
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: ChildNumber,
}

impl ExtendedKey {
    /// Master node from a seed: HMAC-SHA512("Bitcoin seed", seed).
    pub fn new_master(seed: &Seed) -> KeygenResult<Self> {
        let (il, chain_code) = hmac_sha512(MASTER_KEY_SALT, &[&seed.as_bytes()[..]])?;
        let secret = SecretKey::from_bytes(&FieldBytes::from(*il))
            .map_err(|_| KeygenError::derivation("master key is zero or outside the curve order"))?;

        Ok(Self {
            secret,
            chain_code,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: ChildNumber(0),
        })
    }

    /// Walk `path` from the master node of `seed`.
    pub fn derive_path(seed: &Seed, path: &HdPath) -> KeygenResult<Self> {
        path.iter()
            .try_fold(Self::new_master(seed)?, |parent, child| {
                parent.derive_child(child)
            })
    }

    /// Private child derivation (CKDpriv).
    pub fn derive_child(&self, child: ChildNumber) -> KeygenResult<Self> {
        let depth = self
            .depth
            .checked_add(1)
            .ok_or_else(|| KeygenError::derivation("maximum derivation depth exceeded"))?;
        let index = u32::from(child).to_be_bytes();

        let (il, chain_code) = if child.is_hardened() {
            let mut secret = Zeroizing::new([0u8; 32]);
            secret.copy_from_slice(&self.secret.to_bytes());
            hmac_sha512(&self.chain_code, &[&[0u8][..], &secret[..], &index[..]])?
        } else {
            let public = self.public_key_bytes();
            hmac_sha512(&self.chain_code, &[&public[..], &index[..]])?
        };

        let secret = add_tweak(&self.secret, &il).map_err(|e| match e {
            KeygenError::InvalidDerivation(msg) => KeygenError::derivation(format!(
                "child {}: {}",
                segment_label(child),
                msg
            )),
            other => other,
        })?;

        Ok(Self {
            secret,
            chain_code,
            depth,
            parent_fingerprint: self.fingerprint(),
            child_number: child,
        })
    }

    pub fn private_key(&self) -> PrivateKey {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&self.secret.to_bytes());
        let key = PrivateKey::from_bytes(bytes);
        bytes.zeroize();
        key
    }

    /// Compressed SEC1 public key (33 bytes).
    pub fn public_key_bytes(&self) -> [u8; 33] {
        let point = self.secret.public_key().to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// First four bytes of hash160 of this node's public key.
    pub fn fingerprint(&self) -> [u8; 4] {
        let hash = hash160(&self.public_key_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    pub fn child_number(&self) -> ChildNumber {
        self.child_number
    }
}

impl Drop for ExtendedKey {
    fn drop(&mut self) {
        self.chain_code.zeroize();
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("depth", &self.depth)
            .field("parent_fingerprint", &self.parent_fingerprint)
            .field("child_number", &segment_label(self.child_number))
            .finish_non_exhaustive()
    }
}

/// Derive the private key at `path` below the master node of `seed`.
pub fn derive_key(seed: &Seed, path: &HdPath) -> KeygenResult<PrivateKey> {
    let node = ExtendedKey::derive_path(seed, path)?;
    debug!(
        depth = node.depth(),
        parent_fingerprint = %format!("{:08x}", u32::from_be_bytes(node.parent_fingerprint())),
        "derived child key"
    );
    Ok(node.private_key())
}

/// Child scalar = (IL + parent) mod n. Fails when IL >= n or the sum is zero.
fn add_tweak(parent: &SecretKey, il: &[u8; 32]) -> KeygenResult<SecretKey> {
    let tweak = Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from(*il)))
        .ok_or_else(|| KeygenError::derivation("tweak is outside the curve order"))?;
    let sum = tweak + *parent.to_nonzero_scalar();
    let child = Option::<NonZeroScalar>::from(NonZeroScalar::new(sum))
        .ok_or_else(|| KeygenError::derivation("derived key is zero"))?;
    Ok(SecretKey::from(child))
}

/// HMAC-SHA512 split into (IL, IR). IL is wiped when dropped.
fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> KeygenResult<(Zeroizing<[u8; 32]>, [u8; 32])> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| KeygenError::derivation(format!("HMAC error: {}", e)))?;
    for part in parts {
        mac.update(part);
    }
    let mut output = mac.finalize().into_bytes();

    let mut il = Zeroizing::new([0u8; 32]);
    let mut ir = [0u8; 32];
    il.copy_from_slice(&output[..32]);
    ir.copy_from_slice(&output[32..]);
    output[..].zeroize();

    Ok((il, ir))
}

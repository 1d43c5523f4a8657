//! Canonical signing string and keyed digest shared by outbound requests and
//! inbound notifications.
//!
//! The signing string is `k1=v1&k2=v2&...` with keys in ascending byte order and
//! the signature field left out. Values are used verbatim. This layout is a
//! compatibility contract with the gateway.

use crate::errors::Result;
use crate::utils::{base64_encode, hmac_sha256};
use std::collections::BTreeSet;

pub const SHOP_ID_FIELD: &str = "shopId";
pub const SIGNATURE_FIELD: &str = "signature";
pub const STATUS_FIELD: &str = "status";

/// Keyed one-way hash applied to the canonical signing string.
pub trait KeyedHasher: Send + Sync {
    fn digest(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256Hasher;

impl KeyedHasher for HmacSha256Hasher {
    fn digest(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        hmac_sha256(key, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignEncoding {
    /// Lowercase hex.
    #[default]
    Hex,
    /// Standard alphabet, padded.
    Base64,
}

impl SignEncoding {
    pub fn encode(&self, raw: &[u8]) -> String {
        match self {
            SignEncoding::Hex => hex::encode(raw),
            SignEncoding::Base64 => base64_encode(raw),
        }
    }
}

/// Field names and encoding the gateway uses for signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignScheme {
    shop_id_field: String,
    signature_field: String,
    excluded: BTreeSet<String>,
    encoding: SignEncoding,
}

impl Default for SignScheme {
    fn default() -> Self {
        Self {
            shop_id_field: SHOP_ID_FIELD.to_string(),
            signature_field: SIGNATURE_FIELD.to_string(),
            excluded: BTreeSet::new(),
            encoding: SignEncoding::default(),
        }
    }
}

impl SignScheme {
    pub fn with_shop_id_field(mut self, name: impl Into<String>) -> Self {
        self.shop_id_field = name.into();
        self
    }

    pub fn with_signature_field(mut self, name: impl Into<String>) -> Self {
        self.signature_field = name.into();
        self
    }

    /// Leaves `name` out of the signing string in addition to the signature field.
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.excluded.insert(name.into());
        self
    }

    pub fn with_encoding(mut self, encoding: SignEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn shop_id_field(&self) -> &str {
        &self.shop_id_field
    }

    pub fn signature_field(&self) -> &str {
        &self.signature_field
    }

    pub fn encoding(&self) -> SignEncoding {
        self.encoding
    }

    pub fn is_signed_field(&self, key: &str) -> bool {
        key != self.signature_field && !self.excluded.contains(key)
    }

    pub fn canonicalize<I, K, V>(&self, fields: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut kv: Vec<(K, V)> = fields
            .into_iter()
            .filter(|(k, _)| self.is_signed_field(k.as_ref()))
            .collect();
        // str ordering is byte-wise; ties only occur for non-map inputs
        kv.sort_by(|a, b| {
            a.0.as_ref()
                .cmp(b.0.as_ref())
                .then_with(|| a.1.as_ref().cmp(b.1.as_ref()))
        });
        kv.iter()
            .map(|(k, v)| format!("{}={}", k.as_ref(), v.as_ref()))
            .collect::<Vec<String>>()
            .join("&")
    }

    pub fn compute_signature<I, K, V>(&self, fields: I, secret_key: &str) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.compute_signature_with(&HmacSha256Hasher, fields, secret_key)
    }

    pub fn compute_signature_with<H, I, K, V>(
        &self,
        hasher: &H,
        fields: I,
        secret_key: &str,
    ) -> Result<String>
    where
        H: KeyedHasher + ?Sized,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let content = self.canonicalize(fields);
        let raw = hasher.digest(secret_key.as_bytes(), content.as_bytes())?;
        Ok(self.encoding.encode(&raw))
    }
}

/// Canonical signing string under the default scheme.
pub fn canonicalize<I, K, V>(fields: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    SignScheme::default().canonicalize(fields)
}

/// HMAC-SHA256 hex signature under the default scheme.
pub fn compute_signature<I, K, V>(fields: I, secret_key: &str) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    SignScheme::default().compute_signature(fields, secret_key)
}

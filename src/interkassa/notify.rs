use crate::config::ShopConfig;
use crate::errors::{PayError, Result};
use crate::sign::{HmacSha256Hasher, KeyedHasher, SignScheme, STATUS_FIELD};
use crate::utils::constant_time_eq;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Payment outcome reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentState {
    Success,
    Pending,
    Failed,
    Canceled,
    Other(String),
}

impl From<&str> for PaymentState {
    fn from(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "success" | "paid" => PaymentState::Success,
            "pending" | "new" | "process" | "waitaccept" => PaymentState::Pending,
            "fail" | "failed" => PaymentState::Failed,
            "canceled" | "cancelled" => PaymentState::Canceled,
            _ => PaymentState::Other(raw.to_string()),
        }
    }
}

/// A status callback whose shop id and signature both checked out.
///
/// Only [`StatusVerifier::verify`] creates these; a forged payload yields an
/// error instead.
#[derive(Debug, Clone)]
pub struct StatusNotification {
    fields: BTreeMap<String, String>,
    verified: bool,
    scheme: SignScheme,
}

impl StatusNotification {
    /// All inbound parameters, unmodified, signature included.
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn shop_id(&self) -> &str {
        self.get(self.scheme.shop_id_field()).unwrap_or_default()
    }

    pub fn signature(&self) -> &str {
        self.get(self.scheme.signature_field()).unwrap_or_default()
    }

    /// Parsed `status` field, `None` when the gateway did not send one.
    pub fn payment_state(&self) -> Option<PaymentState> {
        self.get(STATUS_FIELD).map(PaymentState::from)
    }
}

/// Checks inbound status callbacks for one shop.
///
/// Order of checks: shop id presence, shop id match, signature presence, then
/// the keyed hash. Payloads addressed to another shop never reach the hasher.
pub struct StatusVerifier<H = HmacSha256Hasher> {
    shop: Arc<ShopConfig>,
    scheme: SignScheme,
    hasher: H,
}

impl StatusVerifier<HmacSha256Hasher> {
    pub fn new(shop: Arc<ShopConfig>) -> Self {
        Self::with_scheme(shop, SignScheme::default())
    }

    pub fn with_scheme(shop: Arc<ShopConfig>, scheme: SignScheme) -> Self {
        Self {
            shop,
            scheme,
            hasher: HmacSha256Hasher,
        }
    }
}

impl<H: KeyedHasher> StatusVerifier<H> {
    pub fn with_hasher<H2: KeyedHasher>(self, hasher: H2) -> StatusVerifier<H2> {
        StatusVerifier {
            shop: self.shop,
            scheme: self.scheme,
            hasher,
        }
    }

    pub fn shop(&self) -> &ShopConfig {
        &self.shop
    }

    pub fn verify<I, K, V>(&self, source: I) -> Result<StatusNotification>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields: BTreeMap<String, String> = source
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        match self.check(&fields) {
            Ok(()) => {
                debug!(shop_id = %self.shop.id(), "status notification verified");
                Ok(StatusNotification {
                    fields,
                    verified: true,
                    scheme: self.scheme.clone(),
                })
            }
            Err(e) => {
                warn!(shop_id = %self.shop.id(), reason = %e, "status notification rejected");
                Err(e)
            }
        }
    }

    fn check(&self, fields: &BTreeMap<String, String>) -> Result<()> {
        let shop_field = self.scheme.shop_id_field();
        let received = fields
            .get(shop_field)
            .ok_or_else(|| PayError::MalformedPayload(format!("missing {}", shop_field)))?;
        if received != self.shop.id() {
            return Err(PayError::ShopMismatch {
                expected: self.shop.id().to_string(),
                received: received.clone(),
            });
        }

        let sign_field = self.scheme.signature_field();
        let supplied = fields
            .get(sign_field)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| PayError::MalformedPayload(format!("missing {}", sign_field)))?;

        let expected =
            self.scheme
                .compute_signature_with(&self.hasher, fields, self.shop.secret_key())?;
        if !constant_time_eq(expected.as_bytes(), supplied.as_bytes()) {
            return Err(PayError::InvalidSignature);
        }
        Ok(())
    }
}

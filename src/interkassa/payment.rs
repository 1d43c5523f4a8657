use crate::config::ShopConfig;
use crate::errors::Result;
use crate::sign::SignScheme;
use crate::utils::encode_query;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Outbound payment parameters with the shop id injected. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    fields: BTreeMap<String, String>,
    scheme: SignScheme,
}

impl PaymentRequest {
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn shop_id(&self) -> &str {
        self.get(self.scheme.shop_id_field()).unwrap_or_default()
    }

    pub fn canonical_string(&self) -> String {
        self.scheme.canonicalize(&self.fields)
    }

    pub fn signature(&self, secret_key: &str) -> Result<String> {
        self.scheme.compute_signature(&self.fields, secret_key)
    }

    /// Adds the signature field, ready to send to the gateway.
    pub fn signed(&self, secret_key: &str) -> Result<SignedPaymentRequest> {
        let signature = self.signature(secret_key)?;
        let mut fields = self.fields.clone();
        fields.insert(self.scheme.signature_field().to_string(), signature.clone());
        Ok(SignedPaymentRequest { fields, signature })
    }

    pub fn to_query_string(&self) -> String {
        encode_query(&self.fields)
    }
}

/// A payment request carrying its signature field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPaymentRequest {
    fields: BTreeMap<String, String>,
    signature: String,
}

impl SignedPaymentRequest {
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn to_query_string(&self) -> String {
        encode_query(&self.fields)
    }
}

pub struct PaymentRequestBuilder {
    shop: Arc<ShopConfig>,
    scheme: SignScheme,
}

impl PaymentRequestBuilder {
    pub fn new(shop: Arc<ShopConfig>) -> Self {
        Self::with_scheme(shop, SignScheme::default())
    }

    pub fn with_scheme(shop: Arc<ShopConfig>, scheme: SignScheme) -> Self {
        Self { shop, scheme }
    }

    /// Copies `data` and sets the shop id field. A caller-supplied shop id is
    /// replaced by this shop's id.
    pub fn build<I, K, V>(&self, data: I) -> PaymentRequest
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields: BTreeMap<String, String> = data
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let shop_field = self.scheme.shop_id_field();
        if let Some(prev) = fields.insert(shop_field.to_string(), self.shop.id().to_string()) {
            if prev != self.shop.id() {
                debug!(field = shop_field, "caller shop id replaced by configured shop id");
            }
        }
        PaymentRequest {
            fields,
            scheme: self.scheme.clone(),
        }
    }

    pub fn build_signed<I, K, V>(&self, data: I) -> Result<SignedPaymentRequest>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.build(data).signed(self.shop.secret_key())
    }

    pub fn canonicalize(&self, fields: &BTreeMap<String, String>) -> String {
        self.scheme.canonicalize(fields)
    }

    pub fn compute_signature(&self, fields: &BTreeMap<String, String>) -> Result<String> {
        self.scheme.compute_signature(fields, self.shop.secret_key())
    }
}

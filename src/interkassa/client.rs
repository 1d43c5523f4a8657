use crate::config::ShopConfig;
use crate::errors::Result;
use crate::interkassa::notify::{StatusNotification, StatusVerifier};
use crate::interkassa::payment::{PaymentRequest, PaymentRequestBuilder, SignedPaymentRequest};
use crate::sign::SignScheme;
use std::sync::Arc;

/// One shop's entry point: builds outbound payments and checks inbound status
/// callbacks with the same config and signing scheme.
#[derive(Clone, Debug)]
pub struct ShopClient {
    shop: Arc<ShopConfig>,
    scheme: SignScheme,
}

impl ShopClient {
    pub fn new(shop: Arc<ShopConfig>) -> Self {
        Self::with_scheme(shop, SignScheme::default())
    }

    pub fn with_scheme(shop: Arc<ShopConfig>, scheme: SignScheme) -> Self {
        Self { shop, scheme }
    }

    pub fn shop(&self) -> &ShopConfig {
        &self.shop
    }

    fn builder(&self) -> PaymentRequestBuilder {
        PaymentRequestBuilder::with_scheme(self.shop.clone(), self.scheme.clone())
    }

    pub fn create_payment<I, K, V>(&self, data: I) -> PaymentRequest
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.builder().build(data)
    }

    pub fn create_signed_payment<I, K, V>(&self, data: I) -> Result<SignedPaymentRequest>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.builder().build_signed(data)
    }

    /// `source` is the decoded callback body or query string.
    pub fn receive_status<I, K, V>(&self, source: I) -> Result<StatusNotification>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        StatusVerifier::with_scheme(self.shop.clone(), self.scheme.clone()).verify(source)
    }
}

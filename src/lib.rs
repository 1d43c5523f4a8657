pub mod client;
pub mod config;
pub mod errors;
pub mod interkassa;
pub mod sign;
pub mod utils;

pub use client::Pay;
pub use config::{ShopConfig, ShopOptions};
pub use errors::{PayError, Result};
pub use interkassa::{
    PaymentRequest, PaymentRequestBuilder, PaymentState, ShopClient, SignedPaymentRequest,
    StatusNotification, StatusVerifier,
};
pub use sign::{
    canonicalize, compute_signature, HmacSha256Hasher, KeyedHasher, SignEncoding, SignScheme,
};

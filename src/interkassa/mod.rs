pub mod client;
pub mod notify;
pub mod payment;

pub use client::ShopClient;
pub use notify::{PaymentState, StatusNotification, StatusVerifier};
pub use payment::{PaymentRequest, PaymentRequestBuilder, SignedPaymentRequest};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PayError>;

#[derive(Error, Debug)]
pub enum PayError {
    #[error("config: {0}")]
    Config(String),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("shop mismatch: expected {expected}, received {received}")]
    ShopMismatch { expected: String, received: String },
    #[error("invalid signature")]
    InvalidSignature,
    #[error("crypto: {0}")]
    Crypto(String),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl PayError {
    /// True when the error means an inbound notification must be dropped.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            PayError::MalformedPayload(_) | PayError::ShopMismatch { .. } | PayError::InvalidSignature
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_kinds() {
        assert!(PayError::InvalidSignature.is_rejection());
        assert!(PayError::MalformedPayload("missing signature".into()).is_rejection());
        assert!(PayError::ShopMismatch {
            expected: "a".into(),
            received: "b".into()
        }
        .is_rejection());
        assert!(!PayError::Config("missing id".into()).is_rejection());
        assert!(!PayError::Crypto("bad key".into()).is_rejection());
    }

    #[test]
    fn mismatch_message_names_both_ids() {
        let e = PayError::ShopMismatch {
            expected: "shop1".into(),
            received: "shop2".into(),
        };
        assert_eq!(e.to_string(), "shop mismatch: expected shop1, received shop2");
    }
}

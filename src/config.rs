use crate::errors::{PayError, Result};
use serde::Deserialize;
use std::fmt;

/// Raw shop options, as supplied by the integrating application.
#[derive(Clone, Default, Deserialize)]
pub struct ShopOptions {
    pub id: Option<String>,
    #[serde(rename = "secretKey", alias = "secret_key")]
    pub secret_key: Option<String>,
}

impl ShopOptions {
    pub fn new(id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            secret_key: Some(secret_key.into()),
        }
    }
}

impl fmt::Debug for ShopOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopOptions")
            .field("id", &self.id)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Validated shop identity: the id the gateway knows us by and the shared
/// secret used for signing. Immutable once built.
#[derive(Clone)]
pub struct ShopConfig {
    id: String,
    secret_key: String,
}

impl ShopConfig {
    /// Validates `options`. The id is checked before the secret key, so options
    /// missing both report the id.
    pub fn new(options: ShopOptions) -> Result<Self> {
        let id = non_empty(options.id).ok_or_else(|| PayError::Config("missing id".into()))?;
        let secret_key = non_empty(options.secret_key)
            .ok_or_else(|| PayError::Config("missing secretKey".into()))?;
        Ok(Self { id, secret_key })
    }

    /// Parses `{"id": .., "secretKey": ..}` and validates it.
    pub fn from_json(raw: &str) -> Result<Self> {
        let options: ShopOptions = serde_json::from_str(raw)?;
        Self::new(options)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for ShopConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopConfig")
            .field("id", &self.id)
            .field("secret_key", &"***")
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

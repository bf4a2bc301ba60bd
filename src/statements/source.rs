// src/statements/source.rs
use crate::statements::models::{Statement, StatementRequest};
use crate::utils::error::SourceError;

#[cfg_attr(not(test), allow(dead_code))]
pub const IDENTITY_ENV_VAR: &str = "EDGAR_IDENTITY";

/// Settings handed to a data source on every call.
///
/// The identity is the "Name email" string SEC EDGAR requires as User-Agent.
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub identity: String,
}

#[cfg_attr(not(test), allow(dead_code))]
impl SourceConfig {
    pub fn new(identity: impl Into<String>) -> Result<Self, SourceError> {
        let identity = identity.into();
        if identity.trim().is_empty() {
            return Err(SourceError::MissingIdentity(IDENTITY_ENV_VAR));
        }
        Ok(Self { identity })
    }

    /// Reads the identity from `EDGAR_IDENTITY`.
    pub fn from_env() -> Result<Self, SourceError> {
        let identity = std::env::var(IDENTITY_ENV_VAR)
            .map_err(|_| SourceError::MissingIdentity(IDENTITY_ENV_VAR))?;
        Self::new(identity)
    }
}

/// Anything that can produce statement tables for a filing.
#[cfg_attr(not(test), allow(dead_code))]
pub trait StatementSource {
    fn fetch(
        &self,
        config: &SourceConfig,
        request: &StatementRequest,
    ) -> Result<Statement, SourceError>;
}

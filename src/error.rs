//! Error types for the AirWave client library.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AirWaveError>;

/// Comprehensive error type for all AirWave API operations
#[derive(Error, Debug)]
pub enum AirWaveError {
    /// Network or HTTP-related errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// XML parsing errors
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    UrlParsing(#[from] url::ParseError),

    /// The response document does not contain the expected structure
    #[error("Missing element in response document: {expected}")]
    MissingElement { expected: String },

    /// Authentication failed
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    /// Operation requires an active session
    #[error("Not logged in - call login() before issuing requests")]
    NotLoggedIn,

    /// A query parameter cannot be serialized
    #[error("Cannot encode parameter '{key}': {reason}")]
    Encoding { key: String, reason: String },
}

impl AirWaveError {
    /// Create a new authentication error
    pub fn auth_failed(reason: impl Into<String>) -> Self {
        Self::AuthenticationFailed {
            reason: reason.into(),
        }
    }

    /// Create a new missing-element parse error
    pub fn missing_element(expected: impl Into<String>) -> Self {
        Self::MissingElement {
            expected: expected.into(),
        }
    }

    /// Create a new parameter encoding error
    pub fn encoding(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Encoding {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error indicates the caller must (re-)login first
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            AirWaveError::NotLoggedIn | AirWaveError::AuthenticationFailed { .. }
        )
    }

    /// Check if this error came out of the XML adapters
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            AirWaveError::Xml(_) | AirWaveError::MissingElement { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = AirWaveError::auth_failed("bad credentials");
        assert!(error.to_string().contains("bad credentials"));

        let error = AirWaveError::missing_element("amp_ap_list");
        assert!(error.to_string().contains("amp_ap_list"));

        let error = AirWaveError::encoding("start", "non-finite float");
        assert!(error.to_string().contains("start"));
        assert!(error.to_string().contains("non-finite float"));
    }

    #[test]
    fn test_error_properties() {
        assert!(AirWaveError::NotLoggedIn.requires_login());
        assert!(AirWaveError::auth_failed("rejected").requires_login());
        assert!(!AirWaveError::missing_element("ap").requires_login());

        assert!(AirWaveError::missing_element("ap").is_parse_error());
        assert!(!AirWaveError::NotLoggedIn.is_parse_error());
    }
}

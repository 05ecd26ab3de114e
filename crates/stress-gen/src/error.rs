//! Error types for configuration generation.

use serde_json::Value;
use stress_addr::AddressError;
use thiserror::Error;

/// Errors that can occur while generating, mutating, or verifying a
/// configuration. None of these are recoverable within a single derivation:
/// they are returned to the driving harness and no partial [`Config`] is
/// produced.
///
/// [`Config`]: crate::Config
#[derive(Debug, Error)]
pub enum GenError {
    /// An address could not be decoded or did not belong to the chain.
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    /// The token generator kept producing names that were already issued.
    #[error("namespace exhausted: no unused name after {attempts} attempts")]
    NamespaceExhausted { attempts: usize },

    /// Two objects given together declare the same name.
    #[error("duplicate name in namespace: {0}")]
    DuplicateName(String),

    /// A configuration could not be rendered to text.
    #[error("render error: {0}")]
    Render(#[from] hcl::Error),

    /// The generator configuration is inconsistent.
    #[error("invalid generator config: {0}")]
    InvalidConfig(String),

    /// Observed output values differ from what the configuration declares.
    #[error("{} output value(s) did not match", .mismatches.len())]
    OutputMismatch { mismatches: Vec<OutputMismatch> },
}

/// One output whose observed value differs from the expected value.
///
/// `None` on either side means the output was absent there.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputMismatch {
    pub name: String,
    pub expected: Option<Value>,
    pub actual: Option<Value>,
}

/// Convenience type alias for generator operations.
pub type Result<T> = std::result::Result<T, GenError>;

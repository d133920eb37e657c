//! Error types for iblpt operations.
//!
//! This module provides the error hierarchy with structured error codes,
//! suggestions for resolution, and the context attached to simulation failures.

use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for iblpt operations.
pub type IblResult<T> = Result<T, IblError>;

/// Main error type for all iblpt operations.
#[derive(Error, Debug)]
pub enum IblError {
    /// Input validation failed.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        code: ErrorCode,
        details: HashMap<String, String>,
        suggestion: Option<String>,
    },

    /// A numerical precondition was violated.
    #[error("Numerical error: {message}")]
    Numerical { message: String, code: ErrorCode },

    /// A Monte Carlo replicate failed; the whole evaluation is aborted.
    #[error("Simulation failed on problem {problem_index} (id {problem_id}), replicate {replicate}: {source}")]
    Simulation {
        problem_index: usize,
        problem_id: i64,
        replicate: usize,
        #[source]
        source: Box<IblError>,
    },

    /// Parameter search failed.
    #[error("Optimization error: {message}")]
    Optimization { message: String, code: ErrorCode },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Parse error.
    #[error("Parse error: {message}")]
    Parse { message: String, code: ErrorCode },

    /// Provider not supported.
    #[error("Provider not supported: {provider}")]
    UnsupportedProvider { provider: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Validation (VAL_xxx)
    ValInvalidInput,
    ValParameterArity,
    ValParameterRange,
    ValEmptyDataset,
    ValLengthMismatch,

    // Numerical (NUM_xxx)
    NumTemporalOrder,
    NumNonFinite,

    // Simulation (SIM_xxx)
    SimReplicateFailed,

    // Optimization (OPT_xxx)
    OptInvalidBounds,
    OptObjectiveFailed,

    // Parse (PARSE_xxx)
    ParseInvalidRow,
    ParseInvalidNumber,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValInvalidInput => "VAL_001",
            ErrorCode::ValParameterArity => "VAL_002",
            ErrorCode::ValParameterRange => "VAL_003",
            ErrorCode::ValEmptyDataset => "VAL_004",
            ErrorCode::ValLengthMismatch => "VAL_005",
            ErrorCode::NumTemporalOrder => "NUM_001",
            ErrorCode::NumNonFinite => "NUM_002",
            ErrorCode::SimReplicateFailed => "SIM_001",
            ErrorCode::OptInvalidBounds => "OPT_001",
            ErrorCode::OptObjectiveFailed => "OPT_002",
            ErrorCode::ParseInvalidRow => "PARSE_001",
            ErrorCode::ParseInvalidNumber => "PARSE_002",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl IblError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
            details: HashMap::new(),
            suggestion: None,
        }
    }

    /// Create a validation error with a specific code.
    pub fn validation_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code,
            details: HashMap::new(),
            suggestion: None,
        }
    }

    /// Create a validation error with suggestion.
    pub fn validation_with_suggestion(
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
            details: HashMap::new(),
            suggestion: Some(suggestion.into()),
        }
    }

    /// Create a parameter arity error naming the expected and received counts.
    pub fn parameter_arity(variant: impl Into<String>, expected: &str, got: usize) -> Self {
        let variant = variant.into();
        let mut details = HashMap::new();
        details.insert("variant".to_string(), variant.clone());
        details.insert("expected".to_string(), expected.to_string());
        details.insert("received".to_string(), got.to_string());
        Self::Validation {
            message: format!(
                "{} model expects {} parameters, got {}",
                variant, expected, got
            ),
            code: ErrorCode::ValParameterArity,
            details,
            suggestion: Some(
                "IBL takes (d, s, p); PT-IBL takes (d, s, p, alpha, beta, lambda)".to_string(),
            ),
        }
    }

    /// Create a parameter range error.
    pub fn parameter_range(name: &str, value: f64, constraint: &str) -> Self {
        let mut details = HashMap::new();
        details.insert("parameter".to_string(), name.to_string());
        details.insert("value".to_string(), value.to_string());
        Self::Validation {
            message: format!("parameter {} = {} violates {}", name, value, constraint),
            code: ErrorCode::ValParameterRange,
            details,
            suggestion: None,
        }
    }

    /// Create a numerical error.
    pub fn numerical(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Numerical {
            message: message.into(),
            code,
        }
    }

    /// Wrap a replicate failure with the problem/replicate that produced it.
    pub fn simulation(
        problem_index: usize,
        problem_id: i64,
        replicate: usize,
        source: IblError,
    ) -> Self {
        Self::Simulation {
            problem_index,
            problem_id,
            replicate,
            source: Box::new(source),
        }
    }

    /// Create an optimization error.
    pub fn optimization(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Optimization {
            message: message.into(),
            code,
        }
    }

    /// Create a parse error.
    pub fn parse(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            code,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { code, .. } => *code,
            Self::Numerical { code, .. } => *code,
            Self::Simulation { .. } => ErrorCode::SimReplicateFailed,
            Self::Optimization { code, .. } => *code,
            Self::Parse { code, .. } => *code,
            _ => ErrorCode::Internal,
        }
    }

    /// Whether this error (or the replicate failure it wraps) is a validation error.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation { .. } => true,
            Self::Simulation { source, .. } => source.is_validation(),
            _ => false,
        }
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Validation { suggestion, .. } => suggestion.as_deref(),
            Self::Numerical {
                code: ErrorCode::NumTemporalOrder,
                ..
            } => Some("Activation must be computed at a trial index later than every stored instance"),
            Self::Simulation { source, .. } => source.suggestion(),
            Self::Parse { .. } => Some("Dataset rows need 8 whitespace-separated columns: id val_high p_high val_low val_safe sure d1 mode"),
            Self::Configuration(_) => Some("Check the config file; supported formats are .toml, .json and .yaml"),
            _ => None,
        }
    }
}

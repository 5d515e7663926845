//! Common error infrastructure for profit-core.
//!
//! This module provides the severity classification shared by every error in
//! the crate, plus [`ParameterError`] for rejected inputs. Oracle access
//! errors live in [`crate::env`] next to the traits they describe.
//!
//! # Error Taxonomy
//!
//! - **Invalid parameters** abort the single computation that received them
//!   ([`ParameterError`], severity `Validation`).
//! - **Unknown catalog entries** are absorbed: unknown items price at zero and
//!   unknown actions produce an empty report. They never surface as errors.
//! - **Unsupported queries** are reported in-band through
//!   [`crate::distribution::CdfValue::Unsupported`].

use crate::env::OracleError;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: The caller may retry with different inputs or degrade
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Fatal**: The computation cannot proceed at all (missing collaborator)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with adjusted inputs.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: negative trials, probability above one
    Validation,

    /// Fatal error - a required collaborator is absent.
    ///
    /// Examples: no catalog oracle in the environment
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if the computation cannot proceed with any input.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all profit-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Rejected input to a distribution, drop or profit computation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParameterError {
    /// Trial count was negative, NaN or infinite.
    #[error("trials must be a finite non-negative number, got {0}")]
    InvalidTrials(f64),

    /// Drop probability outside `[0, 1]`.
    #[error("probability must lie in [0, 1], got {0}")]
    ProbabilityOutOfRange(f64),

    /// A count bound was negative or not finite.
    #[error("drop counts must be finite and non-negative, got {0}")]
    InvalidCount(f64),

    /// `min_count` exceeds `max_count`.
    #[error("min count {min} exceeds max count {max}")]
    InvertedCountRange { min: f64, max: f64 },

    /// Duration of the profit window was zero, negative or not finite.
    #[error("duration must be a positive number of hours, got {0}")]
    NonPositiveDuration(f64),

    /// Quantile parameter outside the open interval `(0, 1)`.
    #[error("quantile parameter must lie strictly between 0 and 1, got {0}")]
    QuantileOutOfRange(f64),

    /// Scaled-convolution magnification was zero, negative or not finite.
    #[error("scale must be a finite positive number, got {0}")]
    InvalidScale(f64),

    /// The exact convolution table would exceed the configured bound.
    #[error("convolution table of {len} entries exceeds limit of {limit}")]
    TableTooLarge { len: usize, limit: usize },
}

impl EngineError for ParameterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TableTooLarge { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTrials(_) => "PARAM_INVALID_TRIALS",
            Self::ProbabilityOutOfRange(_) => "PARAM_PROBABILITY_OUT_OF_RANGE",
            Self::InvalidCount(_) => "PARAM_INVALID_COUNT",
            Self::InvertedCountRange { .. } => "PARAM_INVERTED_COUNT_RANGE",
            Self::NonPositiveDuration(_) => "PARAM_NON_POSITIVE_DURATION",
            Self::QuantileOutOfRange(_) => "PARAM_QUANTILE_OUT_OF_RANGE",
            Self::InvalidScale(_) => "PARAM_INVALID_SCALE",
            Self::TableTooLarge { .. } => "PARAM_TABLE_TOO_LARGE",
        }
    }
}

/// Top-level error of [`crate::compute_profit`] and the luck curve builders.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ProfitError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl EngineError for ProfitError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Parameter(e) => e.severity(),
            Self::Oracle(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Parameter(e) => e.error_code(),
            Self::Oracle(e) => e.error_code(),
        }
    }
}

use thiserror::Error;

use super::config::ConfigError;
use super::utils::sampling::SamplingError;
use crate::core::catalog::{CatalogError, EntityKind};
use crate::core::response::ResponseError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Computation failed in {context}: produced non-finite value {value}")]
    Computation { context: &'static str, value: f64 },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Catalog error: {source}")]
    Catalog { source: CatalogError },

    #[error("Sampling failed: {source}")]
    Sampling {
        #[from]
        source: SamplingError,
    },
}

/// Coarse outcome class used by request layers to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStatus {
    NotFound,
    BadRequest,
    Internal,
}

impl EngineError {
    pub(crate) fn invalid(
        name: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        EngineError::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> ErrorStatus {
        match self {
            EngineError::NotFound { .. } => ErrorStatus::NotFound,
            EngineError::InvalidParameter { .. } | EngineError::Config { .. } => {
                ErrorStatus::BadRequest
            }
            EngineError::Computation { .. }
            | EngineError::Catalog { .. }
            | EngineError::Sampling { .. } => ErrorStatus::Internal,
        }
    }
}

impl From<CatalogError> for EngineError {
    fn from(source: CatalogError) -> Self {
        match source {
            CatalogError::NotFound { kind, id } => EngineError::NotFound { kind, id },
            other => EngineError::Catalog { source: other },
        }
    }
}

impl From<ResponseError> for EngineError {
    fn from(source: ResponseError) -> Self {
        match source {
            ResponseError::InvalidIc50(v) => {
                EngineError::invalid("ic50", v, "IC50 must be positive and finite")
            }
            ResponseError::InvalidHillCoefficient(v) => EngineError::invalid(
                "hill_coefficient",
                v,
                "Hill coefficient must be positive and finite",
            ),
            ResponseError::InvalidConcentration(v) => EngineError::invalid(
                "concentration",
                v,
                "concentration must be non-negative and finite",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_not_found_keeps_identifier() {
        let err: EngineError = CatalogError::NotFound {
            kind: EntityKind::CellLine,
            id: "XYZ".to_string(),
        }
        .into();
        assert!(matches!(&err, EngineError::NotFound { id, .. } if id == "XYZ"));
        assert_eq!(err.status(), ErrorStatus::NotFound);
        assert!(err.to_string().contains("XYZ"));
    }

    #[test]
    fn response_errors_become_bad_requests() {
        let err: EngineError = ResponseError::InvalidConcentration(-1.0).into();
        assert!(matches!(
            err,
            EngineError::InvalidParameter {
                name: "concentration",
                ..
            }
        ));
        assert_eq!(err.status(), ErrorStatus::BadRequest);
    }

    #[test]
    fn computation_errors_are_internal() {
        let err = EngineError::Computation {
            context: "pose affinity",
            value: f64::NAN,
        };
        assert_eq!(err.status(), ErrorStatus::Internal);
    }
}

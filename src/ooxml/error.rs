//! Error types for presentation and chart data operations.

use thiserror::Error;

use crate::ooxml::opc::error::OpcError;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

#[derive(Error, Debug)]
pub enum OoxmlError {
    /// OPC package error
    #[error("OPC error: {0}")]
    Opc(#[from] OpcError),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Part not found
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// Invalid content type
    #[error("Invalid content type: expected {expected}, got {got}")]
    InvalidContentType { expected: String, got: String },

    /// Invalid relationship
    #[error("Invalid relationship: {0}")]
    InvalidRelationship(String),

    /// Invalid format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A cell-range formula that does not follow the letters/digits/range grammar
    #[error("Invalid cell-range formula '{formula}': {reason}")]
    FormulaParse { formula: String, reason: String },

    /// Chart data that cannot be resolved to the expected values
    #[error("Chart data error: {0}")]
    ChartData(String),

    /// The embedded workbook behind a chart could not be opened
    #[error("Cannot open embedded workbook {part}: {source}")]
    WorkbookOpen {
        part: String,
        #[source]
        source: OpcError,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OoxmlError {
    pub(crate) fn formula(formula: &str, reason: impl Into<String>) -> Self {
        OoxmlError::FormulaParse {
            formula: formula.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

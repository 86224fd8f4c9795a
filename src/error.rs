//! Error types shared by the renderers and the export controller.

use thiserror::Error;

use crate::format::ExportFormat;

/// Failures raised while previewing, signing or downloading an invoice.
///
/// No variant is fatal: every failure is scoped to a single export attempt,
/// and the controller returns to the idle state on any error other than the
/// recoverable [`ExportError::EmptySignatureName`] validation failure.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Signature confirmation was attempted with an empty name.
    #[error("signature name must not be empty")]
    EmptySignatureName,

    /// A download was requested before any format had been previewed.
    #[error("no format selected for download")]
    NoFormatSelected,

    /// The signature prompt was opened while a non-PDF format was previewed.
    #[error("signing is only available for PDF exports, not {0}")]
    SignatureUnavailable(ExportFormat),

    /// A signature was confirmed while no prompt was open.
    #[error("no signature prompt is open")]
    SignaturePromptNotOpen,

    /// The PDF generator reported a failure.
    #[error("PDF generation failed: {0}")]
    Pdf(#[from] genpdf::error::Error),

    /// The Word generator failed to package the document.
    #[error("Word generation failed: {0}")]
    Word(String),

    /// The download sink failed to store the exported bytes.
    #[error("failed to save export: {0}")]
    Save(#[from] std::io::Error),
}

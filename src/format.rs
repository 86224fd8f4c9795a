//! Export format selection.

use std::fmt;

/// The document formats an invoice can be exported to.
///
/// Kept as a closed enum so format dispatch is matched exhaustively; adding
/// or removing a format is a compile-time-checked change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Portable Document Format, the only format carrying a signature line.
    Pdf,
    /// Word-processor document packaged as DOCX.
    Word,
    /// Rich Text Format produced by string templating.
    Rtf,
}

impl ExportFormat {
    /// Returns the file extension used for downloads.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Word => "docx",
            Self::Rtf => "rtf",
        }
    }

    /// Returns the MIME type describing the rendered bytes.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Rtf => "application/rtf",
        }
    }

    /// Returns the filename suggested to the download sink.
    pub fn suggested_filename(self) -> String {
        format!("invoice.{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pdf => "PDF",
            Self::Word => "Word",
            Self::Rtf => "RTF",
        };
        f.write_str(name)
    }
}

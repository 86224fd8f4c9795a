//! Invoice preview and export helpers.
//!
//! The crate holds an immutable [`model::Invoice`], three deterministic
//! renderers producing PDF ([`pdf`]), Word ([`word`]) and RTF ([`rtf`])
//! documents, and a small [`controller::ExportController`] that drives the
//! preview/sign/download flow and hands finished bytes to a
//! [`controller::DownloadSink`].

pub mod controller;
pub mod error;
pub mod fonts;
pub mod format;
pub mod model;
pub mod pdf;
pub mod rtf;
pub mod word;

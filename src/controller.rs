//! Preview/export flow control.
//!
//! [`ExportController`] owns the transient UI state: which format is being
//! previewed, the preview bytes themselves and the signature name captured
//! from the user.  Every transition that produces bytes regenerates them from
//! the invoice model instead of reusing the preview, so a download always
//! reflects the latest signature state.

use std::fs;
use std::io;
use std::path::PathBuf;

use log::debug;

use crate::error::ExportError;
use crate::format::ExportFormat;
use crate::model::Invoice;
use crate::{pdf, rtf, word};

/// Rendered bytes held for display while a preview is open.
#[derive(Clone, Debug)]
pub struct Preview {
    format: ExportFormat,
    bytes: Vec<u8>,
}

impl Preview {
    /// Returns the previewed format.
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Returns the rendered document bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the MIME type describing the preview bytes.
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// External collaborator that presents exported bytes to the user as a named
/// file.
pub trait DownloadSink {
    /// Stores the exported bytes under the suggested filename.
    fn save(&mut self, bytes: &[u8], filename: &str) -> io::Result<()>;
}

/// Download sink writing exports into a directory on disk.
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    /// Creates a sink targeting the given directory, creating it on demand.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl DownloadSink for DirectorySink {
    fn save(&mut self, bytes: &[u8], filename: &str) -> io::Result<()> {
        fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(filename);
        fs::write(&path, bytes)?;
        debug!("saved export to {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

/// The states the export flow moves through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    /// Nothing is previewed.
    Idle,
    /// A preview of the given format is displayed.
    Previewing(ExportFormat),
    /// The signature prompt is open on top of a PDF preview.
    SignaturePromptOpen,
}

/// Drives the preview, signature and download transitions for one invoice.
///
/// The invoice itself is read-only for the whole session; only the preview
/// bytes and the signature name change, and both are reset when an export
/// completes or fails.
pub struct ExportController<S> {
    invoice: Invoice,
    sink: S,
    state: ControllerState,
    signature: String,
    preview: Option<Preview>,
}

impl<S: DownloadSink> ExportController<S> {
    /// Creates an idle controller over the given invoice and download sink.
    pub fn new(invoice: Invoice, sink: S) -> Self {
        Self {
            invoice,
            sink,
            state: ControllerState::Idle,
            signature: String::new(),
            preview: None,
        }
    }

    /// Returns the invoice driving all renders.
    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    /// Returns the current state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Returns the currently displayed preview, if any.
    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Renders the requested format and exposes the bytes as the current
    /// preview, releasing any preview displayed before.
    pub async fn request_preview(
        &mut self,
        format: ExportFormat,
    ) -> Result<&Preview, ExportError> {
        debug!("rendering {} preview", format);
        let bytes = match render_document(&self.invoice, format, None).await {
            Ok(bytes) => bytes,
            Err(err) => return Err(self.fail_to_idle(err)),
        };

        self.state = ControllerState::Previewing(format);
        Ok(self.preview.insert(Preview { format, bytes }))
    }

    /// Opens the signature prompt on top of a PDF preview.
    ///
    /// Signing is only offered for the PDF export path; any other previewed
    /// format is rejected.
    pub fn open_signature_prompt(&mut self) -> Result<(), ExportError> {
        match self.state {
            ControllerState::Previewing(ExportFormat::Pdf) | ControllerState::SignaturePromptOpen => {
                self.state = ControllerState::SignaturePromptOpen;
                Ok(())
            }
            ControllerState::Previewing(format) => Err(ExportError::SignatureUnavailable(format)),
            ControllerState::Idle => Err(ExportError::NoFormatSelected),
        }
    }

    /// Closes the signature prompt and returns to the PDF preview.
    pub fn close_signature_prompt(&mut self) {
        if self.state == ControllerState::SignaturePromptOpen {
            self.state = ControllerState::Previewing(ExportFormat::Pdf);
        }
    }

    /// Confirms the signature and exports the signed PDF.
    ///
    /// An empty name is a recoverable validation failure: the prompt stays
    /// open and nothing is downloaded.  On success the PDF is re-rendered
    /// with the signature applied, handed to the sink, and the controller
    /// returns to idle with the signature state reset.
    pub async fn confirm_signature(&mut self, name: &str) -> Result<(), ExportError> {
        if self.state != ControllerState::SignaturePromptOpen {
            return Err(ExportError::SignaturePromptNotOpen);
        }
        if name.is_empty() {
            return Err(ExportError::EmptySignatureName);
        }

        self.signature = name.to_owned();
        let bytes = match pdf::render_invoice(&self.invoice, Some(self.signature.as_str())) {
            Ok(bytes) => bytes,
            Err(err) => return Err(self.fail_to_idle(err)),
        };

        self.save_and_reset(&bytes, ExportFormat::Pdf)
    }

    /// Re-renders the previewed format and hands the bytes to the sink.
    ///
    /// Bytes are regenerated from the invoice model, never reused from the
    /// preview.  Without a previewed format the download fails with
    /// [`ExportError::NoFormatSelected`] instead of silently doing nothing.
    pub async fn download(&mut self) -> Result<(), ExportError> {
        let format = match self.state {
            ControllerState::Previewing(format) => format,
            ControllerState::Idle | ControllerState::SignaturePromptOpen => {
                return Err(ExportError::NoFormatSelected)
            }
        };

        let signature = (!self.signature.is_empty()).then_some(self.signature.as_str());
        let bytes = match render_document(&self.invoice, format, signature).await {
            Ok(bytes) => bytes,
            Err(err) => return Err(self.fail_to_idle(err)),
        };

        self.save_and_reset(&bytes, format)
    }

    /// Closes the preview without downloading, releasing the preview bytes.
    pub fn close_preview(&mut self) {
        self.preview = None;
        self.state = ControllerState::Idle;
    }

    fn save_and_reset(&mut self, bytes: &[u8], format: ExportFormat) -> Result<(), ExportError> {
        let filename = format.suggested_filename();
        if let Err(err) = self.sink.save(bytes, &filename) {
            return Err(self.fail_to_idle(ExportError::Save(err)));
        }
        debug!("downloaded {} export as {}", format, filename);
        self.reset();
        Ok(())
    }

    fn fail_to_idle(&mut self, err: ExportError) -> ExportError {
        // Never leave stale partial bytes displayed after a failed attempt.
        self.reset();
        err
    }

    fn reset(&mut self) {
        self.signature.clear();
        self.preview = None;
        self.state = ControllerState::Idle;
    }
}

/// Renders the invoice in the given format.
///
/// The signature is applied only on the PDF path; Word and RTF exports never
/// incorporate it.
pub async fn render_document(
    invoice: &Invoice,
    format: ExportFormat,
    signature: Option<&str>,
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Pdf => pdf::render_invoice(invoice, signature),
        ExportFormat::Word => word::render_invoice(invoice).await,
        ExportFormat::Rtf => Ok(rtf::render_invoice(invoice)),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    use super::{ControllerState, DownloadSink, ExportController};
    use crate::error::ExportError;
    use crate::format::ExportFormat;
    use crate::model::sample_invoice;

    #[derive(Clone, Default)]
    struct MemorySink {
        saved: Rc<RefCell<Vec<(String, Vec<u8>)>>>,
    }

    impl DownloadSink for MemorySink {
        fn save(&mut self, bytes: &[u8], filename: &str) -> io::Result<()> {
            self.saved
                .borrow_mut()
                .push((filename.to_owned(), bytes.to_vec()));
            Ok(())
        }
    }

    fn controller() -> (ExportController<MemorySink>, MemorySink) {
        let sink = MemorySink::default();
        (ExportController::new(sample_invoice(), sink.clone()), sink)
    }

    #[tokio::test]
    async fn download_without_preview_is_an_explicit_error() {
        let (mut controller, sink) = controller();

        let err = controller.download().await.unwrap_err();
        assert!(matches!(err, ExportError::NoFormatSelected));
        assert!(sink.saved.borrow().is_empty());
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[tokio::test]
    async fn rtf_preview_then_download_saves_named_file() {
        let (mut controller, sink) = controller();

        let preview = controller
            .request_preview(ExportFormat::Rtf)
            .await
            .expect("rtf preview");
        assert_eq!(preview.format(), ExportFormat::Rtf);
        assert_eq!(preview.content_type(), "application/rtf");
        assert_eq!(
            controller.state(),
            ControllerState::Previewing(ExportFormat::Rtf)
        );

        controller.download().await.expect("rtf download");

        let saved = sink.saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, "invoice.rtf");
        assert!(!saved[0].1.is_empty());
        assert_eq!(controller.state(), ControllerState::Idle);
        assert!(controller.preview().is_none());
    }

    #[tokio::test]
    async fn word_download_regenerates_bytes_from_the_model() {
        let (mut controller, sink) = controller();

        controller
            .request_preview(ExportFormat::Word)
            .await
            .expect("word preview");
        let preview_bytes = controller.preview().expect("preview present").bytes().to_vec();

        controller.download().await.expect("word download");

        let saved = sink.saved.borrow();
        assert_eq!(saved[0].0, "invoice.docx");
        // Regenerated, not reused, but deterministic for the same model.
        assert_eq!(saved[0].1, preview_bytes);
    }

    #[tokio::test]
    async fn new_preview_replaces_the_previous_one() {
        let (mut controller, _sink) = controller();

        controller
            .request_preview(ExportFormat::Rtf)
            .await
            .expect("rtf preview");
        controller
            .request_preview(ExportFormat::Word)
            .await
            .expect("word preview");

        let preview = controller.preview().expect("preview present");
        assert_eq!(preview.format(), ExportFormat::Word);
    }

    #[tokio::test]
    async fn signature_prompt_rejected_outside_pdf_previews() {
        let (mut controller, _sink) = controller();

        assert!(matches!(
            controller.open_signature_prompt(),
            Err(ExportError::NoFormatSelected)
        ));

        controller
            .request_preview(ExportFormat::Rtf)
            .await
            .expect("rtf preview");
        assert!(matches!(
            controller.open_signature_prompt(),
            Err(ExportError::SignatureUnavailable(ExportFormat::Rtf))
        ));
    }

    #[tokio::test]
    async fn confirming_without_open_prompt_is_rejected() {
        let (mut controller, sink) = controller();

        let err = controller.confirm_signature("Jane Doe").await.unwrap_err();
        assert!(matches!(err, ExportError::SignaturePromptNotOpen));
        assert!(sink.saved.borrow().is_empty());
    }

    #[tokio::test]
    async fn closing_the_preview_releases_bytes_and_idles() {
        let (mut controller, _sink) = controller();

        controller
            .request_preview(ExportFormat::Rtf)
            .await
            .expect("rtf preview");
        controller.close_preview();

        assert_eq!(controller.state(), ControllerState::Idle);
        assert!(controller.preview().is_none());
    }
}

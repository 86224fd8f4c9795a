use std::io;
use std::sync::{Arc, Mutex};

use invoice_exporter::controller::{ControllerState, DownloadSink, ExportController};
use invoice_exporter::error::ExportError;
use invoice_exporter::fonts;
use invoice_exporter::format::ExportFormat;
use invoice_exporter::model::sample_invoice;

#[derive(Clone, Default)]
struct RecordingSink {
    saved: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl RecordingSink {
    fn filenames(&self) -> Vec<String> {
        self.saved
            .lock()
            .expect("sink lock")
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl DownloadSink for RecordingSink {
    fn save(&mut self, bytes: &[u8], filename: &str) -> io::Result<()> {
        self.saved
            .lock()
            .expect("sink lock")
            .push((filename.to_owned(), bytes.to_vec()));
        Ok(())
    }
}

#[tokio::test]
async fn signature_flow_validates_and_exports_a_signed_pdf() {
    if !fonts::default_fonts_available() {
        eprintln!(
            "Skipping signature_flow_validates_and_exports_a_signed_pdf: no fonts installed."
        );
        return;
    }

    let sink = RecordingSink::default();
    let mut controller = ExportController::new(sample_invoice(), sink.clone());

    controller
        .request_preview(ExportFormat::Pdf)
        .await
        .expect("pdf preview");
    controller.open_signature_prompt().expect("open prompt");

    // An empty name is a recoverable validation failure: the prompt stays
    // open and nothing reaches the sink.
    let err = controller.confirm_signature("").await.unwrap_err();
    assert!(matches!(err, ExportError::EmptySignatureName));
    assert_eq!(controller.state(), ControllerState::SignaturePromptOpen);
    assert!(sink.filenames().is_empty());

    controller
        .confirm_signature("Jane Doe")
        .await
        .expect("signed export");

    assert_eq!(sink.filenames(), ["invoice.pdf"]);
    assert_eq!(controller.state(), ControllerState::Idle);
    assert!(controller.preview().is_none());
}

#[tokio::test]
async fn closing_the_signature_prompt_returns_to_the_pdf_preview() {
    if !fonts::default_fonts_available() {
        eprintln!(
            "Skipping closing_the_signature_prompt_returns_to_the_pdf_preview: no fonts installed."
        );
        return;
    }

    let sink = RecordingSink::default();
    let mut controller = ExportController::new(sample_invoice(), sink.clone());

    controller
        .request_preview(ExportFormat::Pdf)
        .await
        .expect("pdf preview");
    controller.open_signature_prompt().expect("open prompt");
    controller.close_signature_prompt();

    assert_eq!(
        controller.state(),
        ControllerState::Previewing(ExportFormat::Pdf)
    );
    assert!(controller.preview().is_some());

    // Downloading after an abandoned prompt exports the unsigned document.
    controller.download().await.expect("pdf download");
    assert_eq!(sink.filenames(), ["invoice.pdf"]);
}

//! Word renderer built on `docx-rs`.
//!
//! The document carries an "Invoice" heading, three metadata paragraphs and a
//! table with a header row, one row per line item and a trailing summary row.
//! Packaging the document into DOCX bytes runs on a blocking worker, so the
//! renderer is asynchronous and callers must await completion.  The signature
//! state is never incorporated into this format.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};

use crate::error::ExportError;
use crate::model::Invoice;

/// Returns the cell text of the line-item table, row by row: header, one row
/// per item, then the summary row carrying the grand total.
pub fn table_rows(invoice: &Invoice) -> Vec<[String; 4]> {
    let mut rows = vec![[
        "Description".to_owned(),
        "Quantity".to_owned(),
        "Price".to_owned(),
        "Total".to_owned(),
    ]];

    for item in invoice.items() {
        rows.push([
            item.description().to_owned(),
            item.quantity().to_string(),
            item.price().to_string(),
            item.total().to_string(),
        ]);
    }

    rows.push([
        String::new(),
        String::new(),
        "Total".to_owned(),
        invoice.total().to_string(),
    ]);

    rows
}

fn text_paragraph(text: impl Into<String>) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn text_cell(text: impl Into<String>) -> TableCell {
    TableCell::new().add_paragraph(text_paragraph(text))
}

fn build_docx(invoice: &Invoice) -> Docx {
    let rows = table_rows(invoice)
        .into_iter()
        .map(|cells| TableRow::new(cells.into_iter().map(text_cell).collect()))
        .collect();

    Docx::new()
        .add_paragraph(text_paragraph("Invoice").style("Heading1"))
        .add_paragraph(text_paragraph(format!("Date: {}", invoice.date_text())))
        .add_paragraph(text_paragraph(format!("Company: {}", invoice.company())))
        .add_paragraph(text_paragraph(format!("Address: {}", invoice.address())))
        .add_table(Table::new(rows))
}

fn package(invoice: &Invoice) -> Result<Vec<u8>, ExportError> {
    let mut cursor = Cursor::new(Vec::new());
    build_docx(invoice)
        .build()
        .pack(&mut cursor)
        .map_err(|err| ExportError::Word(err.to_string()))?;
    Ok(cursor.into_inner())
}

/// Renders the invoice as a DOCX byte stream.
///
/// Packaging runs on the blocking thread pool; the future resolves once the
/// bytes are fully assembled.
pub async fn render_invoice(invoice: &Invoice) -> Result<Vec<u8>, ExportError> {
    let invoice = invoice.clone();
    tokio::task::spawn_blocking(move || package(&invoice))
        .await
        .map_err(|err| ExportError::Word(err.to_string()))?
}

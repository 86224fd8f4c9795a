//! PDF renderer built on `genpdf`.
//!
//! Layout order is fixed: title, date, company, address, the line-item table,
//! the grand-total line, and optionally a signature line.  Given the same
//! [`Invoice`] and signature the produced bytes are identical across
//! invocations, apart from the creation timestamps `genpdf` stamps into the
//! document metadata.

use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::style::Style;
use genpdf::{Document, Element, SimplePageDecorator};

use crate::error::ExportError;
use crate::fonts;
use crate::model::{Invoice, LineItem};

const TITLE_FONT_SIZE: u8 = 18;
const PAGE_MARGIN_MM: i32 = 10;

fn heading_lines(invoice: &Invoice) -> [String; 4] {
    [
        "Invoice".to_owned(),
        format!("Date: {}", invoice.date_text()),
        format!("Company: {}", invoice.company()),
        format!("Address: {}", invoice.address()),
    ]
}

fn total_line(invoice: &Invoice) -> String {
    format!("Total: {}", invoice.total())
}

fn signature_line(signature: Option<&str>) -> Option<String> {
    signature
        .filter(|name| !name.is_empty())
        .map(|name| format!("Signed by: {}", name))
}

/// Returns the textual lines surrounding the line-item table, in render
/// order: title, metadata, grand total and (when supplied) the signature.
///
/// The PDF renderer feeds these into paragraphs verbatim, so tests can assert
/// document content without parsing the produced byte stream.
pub fn document_lines(invoice: &Invoice, signature: Option<&str>) -> Vec<String> {
    let mut lines = heading_lines(invoice).to_vec();
    lines.push(total_line(invoice));
    lines.extend(signature_line(signature));
    lines
}

fn item_table(items: &[LineItem]) -> Result<TableLayout, ExportError> {
    let mut table = TableLayout::new(vec![3, 1, 1, 1]);
    table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    let header = Style::new().bold();
    table
        .row()
        .element(Paragraph::new("Description").styled(header))
        .element(Paragraph::new("Quantity").styled(header))
        .element(Paragraph::new("Price").styled(header))
        .element(Paragraph::new("Total").styled(header))
        .push()?;

    for item in items {
        table
            .row()
            .element(Paragraph::new(item.description()))
            .element(Paragraph::new(item.quantity().to_string()))
            .element(Paragraph::new(item.price().to_string()))
            .element(Paragraph::new(item.total().to_string()))
            .push()?;
    }

    Ok(table)
}

fn build_document(invoice: &Invoice, signature: Option<&str>) -> Result<Document, ExportError> {
    let font_family = fonts::default_font_family()?;
    let mut document = Document::new(font_family);
    document.set_title("Invoice");

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(PAGE_MARGIN_MM);
    document.set_page_decorator(decorator);

    let [title, date, company, address] = heading_lines(invoice);
    document.push(
        Paragraph::new(title).styled(Style::new().bold().with_font_size(TITLE_FONT_SIZE)),
    );
    document.push(Paragraph::new(date));
    document.push(Paragraph::new(company));
    document.push(Paragraph::new(address));
    document.push(Break::new(1));

    document.push(item_table(invoice.items())?);
    document.push(Break::new(1));
    document.push(Paragraph::new(total_line(invoice)));

    if let Some(line) = signature_line(signature) {
        document.push(Break::new(1));
        document.push(Paragraph::new(line));
    }

    Ok(document)
}

/// Renders the invoice as a PDF byte stream.
///
/// A `Some` signature with a non-empty name adds a "Signed by" line below the
/// grand total; previews pass `None`.
pub fn render_invoice(invoice: &Invoice, signature: Option<&str>) -> Result<Vec<u8>, ExportError> {
    let document = build_document(invoice, signature)?;
    let mut bytes = Vec::new();
    document.render(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::document_lines;
    use crate::model::sample_invoice;

    #[test]
    fn lines_follow_render_order() {
        let invoice = sample_invoice();
        let lines = document_lines(&invoice, None);

        assert_eq!(
            lines,
            vec![
                "Invoice",
                "Date: 2024-07-25",
                "Company: Your Company",
                "Address: 123 Street, City, Country",
                "Total: 3000",
            ]
        );
    }

    #[test]
    fn signature_line_present_iff_name_supplied() {
        let invoice = sample_invoice();

        let signed = document_lines(&invoice, Some("Jane Doe"));
        assert_eq!(signed.last().map(String::as_str), Some("Signed by: Jane Doe"));

        let unsigned = document_lines(&invoice, None);
        assert!(!unsigned.iter().any(|line| line.starts_with("Signed by:")));

        let empty = document_lines(&invoice, Some(""));
        assert!(!empty.iter().any(|line| line.starts_with("Signed by:")));
    }
}

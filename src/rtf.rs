//! RTF renderer built by direct string templating.
//!
//! The markup mirrors the other renderers: a bold title, three metadata
//! lines, a four-column table block and a final row carrying the grand total.
//! All user-supplied text passes through [`escape`] first, so descriptions
//! containing RTF control characters cannot corrupt the output.  The
//! signature state is never incorporated into this format.

use std::fmt::Write as _;

use crate::model::Invoice;

const ROW_PRELUDE: &str = "\\trowd\\trgaph108\\trleft-108\\cellx2520\\cellx3780\\cellx5040\\cellx6300";

/// Escapes text for safe embedding in an RTF document.
///
/// Backslashes and braces are prefixed with a backslash; characters outside
/// the ASCII range are emitted as `\uN?` unicode escapes with the question
/// mark as the fallback glyph for non-unicode readers.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '{' => escaped.push_str("\\{"),
            '}' => escaped.push_str("\\}"),
            ch if ch.is_ascii() => escaped.push(ch),
            ch => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    // \uN takes a signed 16-bit value.
                    let _ = write!(escaped, "\\u{}?", *unit as i16);
                }
            }
        }
    }
    escaped
}

fn table_row(cells: [&str; 4], bold: bool) -> String {
    let mut row = String::from(ROW_PRELUDE);
    row.push_str("\n\\intbl");
    for cell in cells {
        if bold {
            let _ = write!(row, "\\b {}\\b0\\cell", cell);
        } else {
            let _ = write!(row, " {}\\cell", cell);
        }
    }
    row.push_str("\\row\n");
    row
}

/// Renders the invoice as RTF markup.
pub fn render_document(invoice: &Invoice) -> String {
    let mut rtf = String::new();
    rtf.push_str("{\\rtf1\\ansi\\deff0\n");
    rtf.push_str("{\\fonttbl{\\f0 Times New Roman;}}\n");
    rtf.push_str("{\\colortbl;\\red0\\green0\\blue0;}\n");
    rtf.push_str("\\f0\\fs24\\b Invoice\\b0\\line\n");

    let _ = writeln!(rtf, "Date: {}\\line", escape(&invoice.date_text()));
    let _ = writeln!(rtf, "Company: {}\\line", escape(invoice.company()));
    let _ = writeln!(rtf, "Address: {}\\line\\line", escape(invoice.address()));

    rtf.push_str(&table_row(["Description", "Quantity", "Price", "Total"], true));

    for item in invoice.items() {
        rtf.push_str(&table_row(
            [
                escape(item.description()).as_str(),
                &item.quantity().to_string(),
                &item.price().to_string(),
                &item.total().to_string(),
            ],
            false,
        ));
    }

    rtf.push_str(&table_row(["", "", "Total", &invoice.total().to_string()], false));
    rtf.push('}');
    rtf
}

/// Renders the invoice as an RTF byte stream.
pub fn render_invoice(invoice: &Invoice) -> Vec<u8> {
    render_document(invoice).into_bytes()
}

//! Data structures describing the logical content of an invoice.
//!
//! The types in this module form a renderer-agnostic model: the PDF, Word and
//! RTF renderers all consume the same [`Invoice`] value.  Monetary amounts use
//! [`rust_decimal::Decimal`], never floating point, and per-row totals are
//! always computed on demand rather than stored.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A single invoice row: description, quantity and unit price.
///
/// Line items are immutable once constructed; the row total is derived via
/// [`LineItem::total`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineItem {
    description: String,
    quantity: u32,
    price: Decimal,
}

impl LineItem {
    /// Creates a new line item.
    pub fn new(description: impl Into<String>, quantity: u32, price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            price,
        }
    }

    /// Returns the item description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the ordered quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the unit price.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Returns the row total, quantity times unit price.
    pub fn total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.price
    }
}

/// Sums quantity times price over the given items.
///
/// Defined for the empty slice, where it returns zero.
pub fn grand_total(items: &[LineItem]) -> Decimal {
    items.iter().map(LineItem::total).sum()
}

/// An invoice: issuing company, address, date and an ordered list of items.
///
/// The value is immutable after construction.  The grand total is never
/// cached; callers recompute it through [`Invoice::total`], so there is no
/// staleness to manage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invoice {
    company: String,
    address: String,
    date: NaiveDate,
    items: Vec<LineItem>,
}

impl Invoice {
    /// Creates an invoice without line items.
    pub fn new(company: impl Into<String>, address: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            company: company.into(),
            address: address.into(),
            date,
            items: Vec::new(),
        }
    }

    /// Appends a line item and returns the updated invoice.
    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Extends the invoice with multiple line items and returns the updated
    /// instance.
    pub fn with_items<I>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = LineItem>,
    {
        self.items.extend(items);
        self
    }

    /// Returns the issuing company name.
    pub fn company(&self) -> &str {
        &self.company
    }

    /// Returns the company address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the invoice date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the invoice date formatted as `YYYY-MM-DD`.
    pub fn date_text(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Returns the ordered line items.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the grand total over all line items.
    pub fn total(&self) -> Decimal {
        grand_total(&self.items)
    }
}

/// Returns the built-in demonstration invoice.
///
/// The dataset is fixed so renderer output stays reproducible across runs.
pub fn sample_invoice() -> Invoice {
    let date = NaiveDate::from_ymd_opt(2024, 7, 25).expect("valid sample date");
    Invoice::new("Your Company", "123 Street, City, Country", date).with_items([
        LineItem::new("Item 1", 5, Decimal::from(50)),
        LineItem::new("Item 2", 1, Decimal::from(100)),
        LineItem::new("Item 3", 5, Decimal::from(30)),
        LineItem::new("Item 4", 50, Decimal::from(50)),
    ])
}

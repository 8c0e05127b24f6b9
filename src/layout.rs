//! # Text Layout
//!
//! Fixed-width text formatting for receipts: columns, item rows, totals and
//! boxes. Everything here works on `String`s measured in characters; the
//! session encodes the result into the selected code page.
//!
//! ## Receipt Row Geometry (42 characters)
//!
//! ```text
//! ├ qty ┼──────────── description ────────────┼ price ┤
//! │  5  │                30                   │   7   │
//! ```

use crate::error::PosError;

/// Characters per line in the default font.
pub const LINE_WIDTH: usize = 42;

/// Most columns `column_line` will lay out.
pub const MAX_COLUMNS: usize = 5;

pub const QTY_WIDTH: usize = 5;
/// Quantities shorter than this are padded to [`QTY_WIDTH`]; longer ones are
/// left as they are.
pub const QTY_PAD_THRESHOLD: usize = 4;
pub const DESCRIPTION_WIDTH: usize = 30;
pub const PRICE_WIDTH: usize = 7;

/// Width of a total line (half a line, for double-size text).
pub const TOTAL_WIDTH: usize = 21;

/// Right-pad with spaces to `width` characters. Longer input is unchanged.
pub fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    let mut out = String::with_capacity(s.len() + width.saturating_sub(len));
    out.push_str(s);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    out
}

/// Left-pad with spaces to `width` characters. Longer input is unchanged.
pub fn pad_left(s: &str, width: usize) -> String {
    let len = s.chars().count();
    let mut out = String::with_capacity(s.len() + width.saturating_sub(len));
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    out.push_str(s);
    out
}

/// Truncate to `width` characters, or right-pad up to it.
pub fn fit(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        s.chars().take(width).collect()
    } else {
        pad_right(s, width)
    }
}

// ============================================================================
// COLUMNS
// ============================================================================

/// Column count and the per-column width derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    count: usize,
    line_width: usize,
}

impl ColumnSpec {
    /// Columns on a [`LINE_WIDTH`] line. Counts above [`MAX_COLUMNS`] clamp.
    ///
    /// ## Errors
    ///
    /// A count of zero is rejected.
    pub fn new(count: usize) -> Result<Self, PosError> {
        Self::with_line_width(count, LINE_WIDTH)
    }

    /// Columns on a line of `line_width` characters.
    pub fn with_line_width(count: usize, line_width: usize) -> Result<Self, PosError> {
        if count < 1 {
            return Err(PosError::InvalidArgument(
                "column count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            count: count.min(MAX_COLUMNS),
            line_width,
        })
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Characters per column: `line_width / count`, rounded down.
    #[inline]
    pub fn width(&self) -> usize {
        self.line_width / self.count
    }
}

/// Lay cells out in fixed-width columns, newline-terminated.
///
/// Every cell is cut or padded to exactly the column width; overflow is
/// dropped, never wrapped.
pub fn column_line<S: AsRef<str>>(cells: &[S], spec: ColumnSpec) -> String {
    let width = spec.width();
    let mut line = String::with_capacity(width * cells.len() + 1);
    for cell in cells {
        line.push_str(&fit(cell.as_ref(), width));
    }
    line.push('\n');
    line
}

// ============================================================================
// RECEIPT ROWS
// ============================================================================

/// One item row of a receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLine {
    pub quantity: String,
    pub description: String,
    pub price: String,
}

impl ReceiptLine {
    pub fn new(
        quantity: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            quantity: quantity.into(),
            description: description.into(),
            price: price.into(),
        }
    }

    /// `qty + description + price`, newline-terminated.
    pub fn render(&self) -> String {
        let quantity = if self.quantity.chars().count() < QTY_PAD_THRESHOLD {
            pad_right(&self.quantity, QTY_WIDTH)
        } else {
            self.quantity.clone()
        };
        format!(
            "{}{}{}\n",
            quantity,
            fit(&self.description, DESCRIPTION_WIDTH),
            pad_left(&self.price, PRICE_WIDTH)
        )
    }
}

/// Column titles aligned to the receipt row fields.
pub fn receipt_header() -> String {
    format!(
        "{}{}{}\n",
        pad_right("Qty", QTY_WIDTH),
        pad_right("Description", DESCRIPTION_WIDTH),
        pad_left("Price", PRICE_WIDTH)
    )
}

/// Label and amount on a [`TOTAL_WIDTH`] line, amount flush right.
pub fn total_line(label: &str, amount: &str) -> String {
    let label_width = TOTAL_WIDTH.saturating_sub(amount.chars().count());
    format!("{}{}\n", pad_right(label, label_width), amount)
}

// ============================================================================
// BOXES
// ============================================================================

/// Frame lines in `border`.
///
/// With `max` the longest line length, the top and bottom rows are `max + 4`
/// border characters. Each line is left-padded to `(max + 3) / 2`, then
/// right-padded to `max + 3`, and written as `border, space, line, space,
/// border`. Lines are returned newline-terminated.
pub fn box_lines<S: AsRef<str>>(lines: &[S], border: char) -> Vec<String> {
    let max = lines
        .iter()
        .map(|l| l.as_ref().chars().count())
        .max()
        .unwrap_or(0);

    let mut edge: String = std::iter::repeat_n(border, max + 4).collect();
    edge.push('\n');

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(edge.clone());
    for line in lines {
        let centered = pad_right(&pad_left(line.as_ref(), (max + 3) / 2), max + 3);
        out.push(format!("{border} {centered} {border}\n"));
    }
    out.push(edge);
    out
}

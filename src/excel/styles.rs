//! Shared cell formats, built once and passed to every sheet builder.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder};

const TITLE_FILL: Color = Color::RGB(0x1F4E78);
const HEADER_FILL: Color = Color::RGB(0x2F5597);
const LABEL_FILL: Color = Color::RGB(0xF2F2F2);
const WORKINGS_FILL: Color = Color::RGB(0xD9E1F2);
const BORDER_COLOR: Color = Color::RGB(0xD9D9D9);

pub const CURRENCY_FORMAT: &str = "R #,##0.00";

/// The full set of formats used across the workbook.
pub struct Styles {
    /// Merged Output title banner.
    pub title: Format,
    /// Quote line-item column headers.
    pub table_header: Format,
    /// Input form labels.
    pub label: Format,
    /// Plain bold text (quote meta labels).
    pub bold: Format,
    /// Bordered entry cell, left aligned.
    pub entry: Format,
    /// Bordered entry cell, centered (Yes/No flags).
    pub entry_center: Format,
    /// Quote line cell, centered (codes, qty, VAT%).
    pub line_center: Format,
    /// Quote line cell, left aligned (descriptions).
    pub line_left: Format,
    /// Currency line cell, left aligned.
    pub currency: Format,
    /// Currency totals cell, right aligned.
    pub currency_total: Format,
    /// Totals label cell.
    pub total_label: Format,
    /// Workings panel label column.
    pub workings_label: Format,
    /// Workings panel value column.
    pub workings_value: Format,
}

impl Styles {
    pub fn new() -> Self {
        let bordered = || {
            Format::new()
                .set_border(FormatBorder::Thin)
                .set_border_color(BORDER_COLOR)
        };

        Self {
            title: Format::new()
                .set_font_size(14)
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(TITLE_FILL)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            table_header: bordered()
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(HEADER_FILL)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            label: bordered()
                .set_bold()
                .set_background_color(LABEL_FILL)
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter),
            bold: Format::new().set_bold(),
            entry: bordered()
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter),
            entry_center: bordered()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            line_center: bordered()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            line_left: bordered()
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter),
            currency: bordered()
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter)
                .set_num_format(CURRENCY_FORMAT),
            currency_total: bordered()
                .set_align(FormatAlign::Right)
                .set_align(FormatAlign::VerticalCenter)
                .set_num_format(CURRENCY_FORMAT),
            total_label: bordered()
                .set_bold()
                .set_align(FormatAlign::Right)
                .set_align(FormatAlign::VerticalCenter),
            workings_label: bordered()
                .set_bold()
                .set_background_color(WORKINGS_FILL)
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter),
            workings_value: bordered()
                .set_align(FormatAlign::Right)
                .set_align(FormatAlign::VerticalCenter),
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::new()
    }
}

//! Workbook assembly: the four sheets in their strict build order, the named
//! constants, and the single save at the end. Nothing is written to disk
//! until every sheet has been populated.

use crate::error::QuoteResult;
use crate::excel::refs::abs_cell;
use crate::excel::styles::Styles;
use crate::excel::{calc, input, output, rates};
use crate::layout::{constants, Layout, SHEET_CALC, SHEET_INPUT, SHEET_OUTPUT, SHEET_RATES};
use crate::types::RateBook;
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Builds the billing calculator workbook from an extracted rate book.
pub struct WorkbookBuilder {
    book: RateBook,
    layout: Layout,
}

impl WorkbookBuilder {
    pub fn new(book: RateBook) -> Self {
        let layout = Layout::plan(&book);
        Self { book, layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn rate_book(&self) -> &RateBook {
        &self.book
    }

    /// Populate all four sheets and write the workbook to `path`.
    pub fn write(&self, path: &Path) -> QuoteResult<()> {
        let styles = Styles::new();
        let mut workbook = Workbook::new();

        {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(SHEET_RATES)?;
            rates::write_rates(worksheet, &self.book, &self.layout)?;
        }
        {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(SHEET_INPUT)?;
            input::write_input(worksheet, &self.layout, &styles)?;
        }
        {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(SHEET_CALC)?;
            calc::write_calculations(worksheet, &self.layout)?;
            // Workings only; hidden, not protected.
            worksheet.set_hidden(true);
        }
        {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(SHEET_OUTPUT)?;
            output::write_output(worksheet, &self.book, &self.layout, &styles)?;
        }

        let names = [
            ("RCF_AN", constants::RCF_AN_ROW),
            ("RCF_CL", constants::RCF_CL_ROW),
            ("VAT", constants::VAT_ROW),
            ("BASE_AN", constants::BASE_AN_ROW),
            ("BASE_CL", constants::BASE_CL_ROW),
        ];
        for (name, row) in names {
            workbook.define_name(name, &format!("={}", abs_cell(SHEET_RATES, 'B', row)))?;
        }

        workbook.save(path)?;
        Ok(())
    }
}

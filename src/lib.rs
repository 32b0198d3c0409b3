//! Quotesmith - anaesthetic billing quote workbook generator
//!
//! Reads a billing-rates configuration (procedure codes, rate plans,
//! modifiers, consultation fees) from a text source and writes a formatted
//! `.xlsx` workbook that works as a billing calculator: users capture the
//! case on the Input sheet and read a VAT-inclusive quote on the Output
//! sheet. All arithmetic lives in spreadsheet formulas; this tool only
//! extracts records and lays the workbook out.
//!
//! # Example
//!
//! ```no_run
//! use quotesmith::excel::WorkbookBuilder;
//! use quotesmith::parser;
//! use std::path::Path;
//!
//! let book = parser::parse_rates_file(Path::new("rates.txt"))?;
//! WorkbookBuilder::new(book).write(Path::new("quote.xlsx"))?;
//! # Ok::<(), quotesmith::error::QuoteError>(())
//! ```

pub mod cli;
pub mod error;
pub mod excel;
pub mod layout;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use error::{QuoteError, QuoteResult};
pub use types::{Constants, ConsultFee, Modifier, Procedure, RateBook, RatePlan};

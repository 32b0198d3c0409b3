use thiserror::Error;

pub type QuoteResult<T> = Result<T, QuoteError>;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),

    #[error("Required constant '{0}' not found in rates source")]
    MissingConstant(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

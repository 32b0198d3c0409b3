use clap::Parser;
use quotesmith::cli;
use quotesmith::error::QuoteResult;
use std::path::PathBuf;

/// Default source path of the rates configuration.
const DEFAULT_SOURCE: &str = "anaesthetic-billing-calculator-v2.txt";
/// Default path of the generated workbook.
const DEFAULT_OUTPUT: &str = "anaesthetic_billing_2026.xlsx";

#[derive(Parser)]
#[command(name = "quotesmith")]
#[command(about = "Generate an anaesthetic billing calculator workbook from a rates configuration")]
#[command(long_about = "Quotesmith - anaesthetic billing quote workbook generator

Reads procedure codes, rate plans, modifiers and consultation fees from a
rates configuration text file and writes a formatted .xlsx calculator:
capture the case on the Input sheet, read the VAT-inclusive quote on the
Output sheet. All pricing rules are written as spreadsheet formulas.

EXAMPLES:
  quotesmith                          # fixed default paths
  quotesmith rates.txt quote.xlsx     # explicit paths")]
#[command(version)]
struct Cli {
    /// Path to the rates configuration text file
    #[arg(default_value = DEFAULT_SOURCE)]
    source: PathBuf,

    /// Output workbook path (.xlsx)
    #[arg(default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Show verbose generation steps
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> QuoteResult<()> {
    let cli = Cli::parse();
    cli::generate(cli.source, cli.output, cli.verbose)
}

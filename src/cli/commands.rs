use crate::error::QuoteResult;
use crate::excel::WorkbookBuilder;
use crate::parser;
use colored::Colorize;
use std::path::PathBuf;

/// Execute the generate command: rates source in, workbook out.
pub fn generate(source: PathBuf, output: PathBuf, verbose: bool) -> QuoteResult<()> {
    println!("{}", "🧾 Quotesmith - Generating billing workbook".bold().green());
    println!("   Source: {}", source.display());
    println!("   Output: {}", output.display());
    println!();

    if verbose {
        println!("{}", "📖 Extracting rate records...".cyan());
    }

    let book = parser::parse_rates_file(&source)?;

    if verbose {
        println!(
            "   Found {} procedures, {} plans, {} modifiers, {} consult fees",
            book.procedures.len(),
            book.plans.len(),
            book.modifiers.len(),
            book.consults.len()
        );
        println!();
    }

    if book.skipped_lines > 0 {
        println!(
            "{}",
            format!(
                "⚠️  Skipped {} malformed record line(s) in the rates source",
                book.skipped_lines
            )
            .yellow()
        );
        println!();
    }

    let builder = WorkbookBuilder::new(book);

    if verbose {
        println!("{}", "📝 Writing workbook sheets...".cyan());
    }

    builder.write(&output)?;

    println!("{}", "✅ Workbook written:".bold().green());
    println!("   {}", output.display());

    Ok(())
}

//! Output sheet: the formatted quote with its line items, totals and the
//! workings panel. Every value is a formula over the Input and Calculations
//! sheets.

use crate::error::QuoteResult;
use crate::excel::refs::{cell, grid_range, Cell};
use crate::excel::styles::Styles;
use crate::layout::{calc, input, Layout, SHEET_CALC, SHEET_INPUT, SHEET_RATES};
use crate::types::RateBook;
use rust_xlsxwriter::{Formula, Worksheet};

const TITLE_ROW: u32 = 0;
const HEADER_ROW: u32 = 4;
const CONSULT_FIRST_LINE: u32 = 5;
const PROC_LINE: u32 = 8;
const ANAES_LINE: u32 = 9;
const EMERGENCY_LINE: u32 = 10;
const MODIFIERS_LINE: u32 = 11;
const SUBTOTAL_ROW: u32 = 13;
const VAT_ROW: u32 = 14;
const TOTAL_ROW: u32 = 15;
const WORKINGS_COL: u16 = 7;

pub(crate) fn write_output(
    worksheet: &mut Worksheet,
    book: &RateBook,
    layout: &Layout,
    styles: &Styles,
) -> QuoteResult<()> {
    let vat_display = format!("{:.0}%", book.constants.vat * 100.0);

    worksheet.merge_range(
        TITLE_ROW,
        0,
        TITLE_ROW,
        5,
        "Anaesthetic Quote (2026)",
        &styles.title,
    )?;
    write_meta(worksheet, styles)?;

    for (col, header) in [
        "Code",
        "Description",
        "Qty",
        "Unit Price exclVAT",
        "VAT%",
        "Amount exclVAT",
    ]
    .iter()
    .enumerate()
    {
        worksheet.write_string_with_format(HEADER_ROW, col as u16, *header, &styles.table_header)?;
    }

    for i in 0..input::CONSULT_COUNT {
        write_consult_line(worksheet, layout, styles, i, &vat_display)?;
    }
    write_procedure_line(worksheet, layout, styles, &vat_display)?;
    write_anaesthetic_line(worksheet, styles, &vat_display)?;
    write_emergency_line(worksheet, styles, &vat_display)?;
    write_modifiers_line(worksheet, styles, &vat_display)?;
    write_totals(worksheet, book, styles)?;
    write_workings(worksheet, styles)?;

    for (col, width) in [
        (0u16, 12.0),
        (1, 50.0),
        (2, 8.0),
        (3, 18.0),
        (4, 8.0),
        (5, 18.0),
        (7, 28.0),
        (8, 20.0),
    ] {
        worksheet.set_column_width(col, width)?;
    }
    worksheet.set_freeze_panes(CONSULT_FIRST_LINE, 0)?;
    worksheet.set_screen_gridlines(false);

    Ok(())
}

fn write_meta(worksheet: &mut Worksheet, styles: &Styles) -> QuoteResult<()> {
    let meta: [(u32, u16, &str, Cell); 6] = [
        (1, 0, "Patient", cell(SHEET_INPUT, 'B', input::PATIENT_ROW)),
        (1, 2, "ICD-10", cell(SHEET_INPUT, 'B', input::ICD10_ROW)),
        (1, 4, "Plan", cell(SHEET_INPUT, 'B', input::PLAN_ROW)),
        (2, 0, "Surgeon", cell(SHEET_INPUT, 'B', input::SURGEON_ROW)),
        (2, 2, "Procedure", cell(SHEET_INPUT, 'B', input::PROCEDURE_ROW)),
        (2, 4, "Minutes", cell(SHEET_INPUT, 'B', input::MINUTES_ROW)),
    ];
    for (row, col, label, source) in meta {
        worksheet.write_string_with_format(row, col, label, &styles.bold)?;
        worksheet.write_formula(row, col + 1, Formula::new(format!("={source}")))?;
    }
    Ok(())
}

fn write_consult_line(
    worksheet: &mut Worksheet,
    layout: &Layout,
    styles: &Styles,
    index: u32,
    vat_display: &str,
) -> QuoteResult<()> {
    let row = CONSULT_FIRST_LINE + index;
    let source = cell(SHEET_INPUT, 'B', input::consult_row(index));
    let location = cell(SHEET_CALC, 'B', calc::PLAN_LOCATION_ROW);
    let desc_range = grid_range(
        SHEET_RATES,
        'A',
        'B',
        layout.consults.first_data_row(),
        layout.consults.last_data_row(),
    );
    let fee_range = grid_range(
        SHEET_RATES,
        'A',
        'D',
        layout.consults.first_data_row(),
        layout.consults.last_data_row(),
    );

    worksheet.write_formula_with_format(
        row,
        0,
        Formula::new(format!(r#"=IF({source}="","",{source})"#)),
        &styles.line_center,
    )?;
    worksheet.write_formula_with_format(
        row,
        1,
        Formula::new(format!(
            r#"=IF({source}="","",VLOOKUP({source}, {desc_range},2,FALSE))"#
        )),
        &styles.line_left,
    )?;
    worksheet.write_formula_with_format(
        row,
        2,
        Formula::new(format!(r#"=IF({source}="",0,1)"#)),
        &styles.line_center,
    )?;
    // In-hospital plans read column 3 (IH), out-of-hospital column 4 (OH).
    worksheet.write_formula_with_format(
        row,
        3,
        Formula::new(format!(
            r#"=IF({source}="",0,IF({location}="IH",VLOOKUP({source}, {fee_range},3,FALSE),VLOOKUP({source}, {fee_range},4,FALSE))/(1+VAT))"#
        )),
        &styles.currency,
    )?;
    worksheet.write_string_with_format(row, 4, vat_display, &styles.line_center)?;
    write_amount_formula(worksheet, row, styles)?;
    Ok(())
}

fn write_procedure_line(
    worksheet: &mut Worksheet,
    layout: &Layout,
    styles: &Styles,
    vat_display: &str,
) -> QuoteResult<()> {
    let source = cell(SHEET_INPUT, 'B', input::PROCEDURE_ROW);
    let price = cell(SHEET_CALC, 'B', calc::PROC_UNIT_PRICE_ROW);
    let desc_range = grid_range(
        SHEET_RATES,
        'A',
        'B',
        layout.procs.first_data_row(),
        layout.procs.last_data_row(),
    );

    worksheet.write_formula_with_format(
        PROC_LINE,
        0,
        Formula::new(format!(r#"=IF({source}="","",{source})"#)),
        &styles.line_center,
    )?;
    worksheet.write_formula_with_format(
        PROC_LINE,
        1,
        Formula::new(format!(
            r#"=IF({source}="","",VLOOKUP({source}, {desc_range},2,FALSE))"#
        )),
        &styles.line_left,
    )?;
    worksheet.write_formula_with_format(
        PROC_LINE,
        2,
        Formula::new(format!(r#"=IF({source}="",0,1)"#)),
        &styles.line_center,
    )?;
    worksheet.write_formula_with_format(
        PROC_LINE,
        3,
        Formula::new(format!(r#"=IF({price}="",0,{price})"#)),
        &styles.currency,
    )?;
    worksheet.write_string_with_format(PROC_LINE, 4, vat_display, &styles.line_center)?;
    write_amount_formula(worksheet, PROC_LINE, styles)?;
    Ok(())
}

fn write_anaesthetic_line(
    worksheet: &mut Worksheet,
    styles: &Styles,
    vat_display: &str,
) -> QuoteResult<()> {
    let units = cell(SHEET_CALC, 'B', calc::TIME_UNITS_ROW);
    let price = cell(SHEET_CALC, 'B', calc::ANAES_UNIT_PRICE_ROW);
    let minutes = cell(SHEET_INPUT, 'B', input::MINUTES_ROW);

    worksheet.write_string_with_format(ANAES_LINE, 0, "0023", &styles.line_center)?;
    worksheet.write_formula_with_format(
        ANAES_LINE,
        1,
        Formula::new(format!(
            r#"=IF({units}=0,"",CONCAT("Anaesthetic time ",{minutes}," min"))"#
        )),
        &styles.line_left,
    )?;
    worksheet.write_formula_with_format(
        ANAES_LINE,
        2,
        Formula::new(format!("={units}")),
        &styles.line_center,
    )?;
    worksheet.write_formula_with_format(
        ANAES_LINE,
        3,
        Formula::new(format!("={price}")),
        &styles.currency,
    )?;
    worksheet.write_string_with_format(ANAES_LINE, 4, vat_display, &styles.line_center)?;
    write_amount_formula(worksheet, ANAES_LINE, styles)?;
    Ok(())
}

fn write_emergency_line(
    worksheet: &mut Worksheet,
    styles: &Styles,
    vat_display: &str,
) -> QuoteResult<()> {
    let blocks = cell(SHEET_CALC, 'B', calc::EMERGENCY_BLOCKS_ROW);
    let price = cell(SHEET_CALC, 'B', calc::EMERGENCY_BLOCK_PRICE_ROW);
    let minutes = cell(SHEET_INPUT, 'D', input::EMERGENCY_ROW);

    worksheet.write_string_with_format(EMERGENCY_LINE, 0, "0011", &styles.line_center)?;
    worksheet.write_formula_with_format(
        EMERGENCY_LINE,
        1,
        Formula::new(format!(
            r#"=IF({blocks}=0,"",CONCAT("Emergency ",{minutes}," min"))"#
        )),
        &styles.line_left,
    )?;
    worksheet.write_formula_with_format(
        EMERGENCY_LINE,
        2,
        Formula::new(format!("={blocks}")),
        &styles.line_center,
    )?;
    worksheet.write_formula_with_format(
        EMERGENCY_LINE,
        3,
        Formula::new(format!("={price}")),
        &styles.currency,
    )?;
    worksheet.write_string_with_format(EMERGENCY_LINE, 4, vat_display, &styles.line_center)?;
    write_amount_formula(worksheet, EMERGENCY_LINE, styles)?;
    Ok(())
}

fn write_modifiers_line(
    worksheet: &mut Worksheet,
    styles: &Styles,
    vat_display: &str,
) -> QuoteResult<()> {
    let amount = cell(SHEET_CALC, 'B', calc::MODIFIERS_AMOUNT_ROW);

    worksheet.write_string_with_format(MODIFIERS_LINE, 0, "MODS", &styles.line_center)?;
    worksheet.write_string_with_format(MODIFIERS_LINE, 1, "Modifiers (total)", &styles.line_left)?;
    worksheet.write_formula_with_format(
        MODIFIERS_LINE,
        2,
        Formula::new(format!("=IF({amount}=0,0,1)")),
        &styles.line_center,
    )?;
    worksheet.write_formula_with_format(
        MODIFIERS_LINE,
        3,
        Formula::new(format!("=IF({amount}=0,0,{amount})")),
        &styles.currency,
    )?;
    worksheet.write_string_with_format(MODIFIERS_LINE, 4, vat_display, &styles.line_center)?;
    // The aggregated amount is already the full line value.
    worksheet.write_formula_with_format(
        MODIFIERS_LINE,
        5,
        Formula::new(format!("=D{}", MODIFIERS_LINE + 1)),
        &styles.currency,
    )?;
    Ok(())
}

fn write_totals(worksheet: &mut Worksheet, book: &RateBook, styles: &Styles) -> QuoteResult<()> {
    worksheet.write_string_with_format(SUBTOTAL_ROW, 4, "Subtotal (excl VAT)", &styles.total_label)?;
    worksheet.write_formula_with_format(
        SUBTOTAL_ROW,
        5,
        Formula::new(format!(
            "=SUM(F{}:F{})",
            CONSULT_FIRST_LINE + 1,
            MODIFIERS_LINE + 1
        )),
        &styles.currency_total,
    )?;
    worksheet.write_string_with_format(
        VAT_ROW,
        4,
        &format!("VAT ({:.0}%)", book.constants.vat * 100.0),
        &styles.total_label,
    )?;
    worksheet.write_formula_with_format(
        VAT_ROW,
        5,
        Formula::new(format!("=F{}*VAT", SUBTOTAL_ROW + 1)),
        &styles.currency_total,
    )?;
    worksheet.write_string_with_format(TOTAL_ROW, 4, "Total (incl VAT)", &styles.total_label)?;
    worksheet.write_formula_with_format(
        TOTAL_ROW,
        5,
        Formula::new(format!("=F{}+F{}", SUBTOTAL_ROW + 1, VAT_ROW + 1)),
        &styles.currency_total,
    )?;
    Ok(())
}

fn write_workings(worksheet: &mut Worksheet, styles: &Styles) -> QuoteResult<()> {
    worksheet.merge_range(
        TITLE_ROW,
        WORKINGS_COL,
        TITLE_ROW,
        WORKINGS_COL + 1,
        "Workings",
        &styles.table_header,
    )?;

    let entries = [
        ("Plan Multiplier", calc::PLAN_MULTIPLIER_ROW),
        ("Plan Location", calc::PLAN_LOCATION_ROW),
        ("Proc RVU", calc::PROC_RVU_ROW),
        ("Proc Unit Price (ex VAT)", calc::PROC_UNIT_PRICE_ROW),
        ("Anaes Minutes", calc::MINUTES_ROW),
        ("Effective Minutes", calc::EFFECTIVE_MINUTES_ROW),
        ("Time Units", calc::TIME_UNITS_ROW),
        ("Anaes Unit Price (ex VAT)", calc::ANAES_UNIT_PRICE_ROW),
        ("Emergency Blocks", calc::EMERGENCY_BLOCKS_ROW),
        (
            "Emergency Block Price (ex VAT)",
            calc::EMERGENCY_BLOCK_PRICE_ROW,
        ),
        ("Modifiers Amount (ex VAT)", calc::MODIFIERS_AMOUNT_ROW),
    ];
    for (i, (label, calc_row)) in entries.iter().enumerate() {
        let row = TITLE_ROW + 1 + i as u32;
        worksheet.write_string_with_format(row, WORKINGS_COL, *label, &styles.workings_label)?;
        worksheet.write_formula_with_format(
            row,
            WORKINGS_COL + 1,
            Formula::new(format!("={}", cell(SHEET_CALC, 'B', *calc_row))),
            &styles.workings_value,
        )?;
    }
    Ok(())
}

fn write_amount_formula(worksheet: &mut Worksheet, row: u32, styles: &Styles) -> QuoteResult<()> {
    worksheet.write_formula_with_format(
        row,
        5,
        Formula::new(format!("=C{r}*D{r}", r = row + 1)),
        &styles.currency,
    )?;
    Ok(())
}

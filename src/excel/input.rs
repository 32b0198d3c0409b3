//! Input sheet: the fixed-position entry form with its dropdown constraints.

use crate::error::QuoteResult;
use crate::excel::refs::{col_range, grid_range};
use crate::excel::styles::Styles;
use crate::layout::{input, Layout, SHEET_RATES};
use rust_xlsxwriter::{DataValidation, Formula, Worksheet};

pub(crate) fn write_input(
    worksheet: &mut Worksheet,
    layout: &Layout,
    styles: &Styles,
) -> QuoteResult<()> {
    let labels = [
        (input::PATIENT_ROW, "Patient"),
        (input::ICD10_ROW, "ICD-10"),
        (input::SURGEON_ROW, "Surgeon"),
        (input::PLAN_ROW, "Rate Plan"),
        (input::PROCEDURE_ROW, "Procedure Code"),
        (input::MINUTES_ROW, "Anaesthetic Minutes"),
        (input::EMERGENCY_ROW, "Emergency? (Yes/No)"),
    ];
    for (row, label) in labels {
        worksheet.write_string_with_format(row, 0, label, &styles.label)?;
        if row == input::EMERGENCY_ROW {
            worksheet.write_string_with_format(row, 1, "No", &styles.entry)?;
        } else {
            worksheet.write_blank(row, 1, &styles.entry)?;
        }
    }
    worksheet.write_string_with_format(
        input::EMERGENCY_ROW,
        2,
        "Emergency Minutes",
        &styles.label,
    )?;
    worksheet.write_blank(input::EMERGENCY_ROW, 3, &styles.entry)?;

    for i in 0..input::CONSULT_COUNT {
        let row = input::consult_row(i);
        worksheet.write_string_with_format(row, 0, &format!("Consult {}", i + 1), &styles.label)?;
        worksheet.write_blank(row, 1, &styles.entry)?;
    }

    worksheet.write_string_with_format(
        input::MODIFIER_HEADER_ROW,
        0,
        "Modifier Code",
        &styles.label,
    )?;
    worksheet.write_string_with_format(
        input::MODIFIER_HEADER_ROW,
        1,
        "Enabled (Yes/No)",
        &styles.label,
    )?;
    for row in input::MODIFIER_FIRST_ROW..=input::modifier_last_row() {
        worksheet.write_blank(row, 0, &styles.entry)?;
        worksheet.write_string_with_format(row, 1, "No", &styles.entry_center)?;
    }

    // Read-only echo of the chosen procedure's description.
    let proc_row = input::PROCEDURE_ROW + 1;
    let proc_desc_range = grid_range(
        SHEET_RATES,
        'A',
        'B',
        layout.procs.first_data_row(),
        layout.procs.last_data_row(),
    );
    worksheet.write_formula_with_format(
        input::PROCEDURE_ROW,
        2,
        Formula::new(format!(
            r#"=IF(B{proc_row}="","",VLOOKUP(B{proc_row}, {proc_desc_range}, 2, FALSE))"#
        )),
        &styles.entry,
    )?;

    add_validations(worksheet, layout)?;

    worksheet.set_column_width(0, 26)?;
    worksheet.set_column_width(1, 22)?;
    worksheet.set_column_width(2, 42)?;
    worksheet.set_column_width(3, 20)?;
    worksheet.set_freeze_panes(input::PLAN_ROW, 0)?;
    worksheet.set_screen_gridlines(false);

    Ok(())
}

fn add_validations(worksheet: &mut Worksheet, layout: &Layout) -> QuoteResult<()> {
    let plan_labels = col_range(
        SHEET_RATES,
        'B',
        layout.plans.first_data_row(),
        layout.plans.last_data_row(),
    );
    let plan_list = DataValidation::new()
        .allow_list_formula(Formula::new(plan_labels.to_string()))
        .ignore_blank(false);
    worksheet.add_data_validation(input::PLAN_ROW, 1, input::PLAN_ROW, 1, &plan_list)?;

    let proc_codes = col_range(
        SHEET_RATES,
        'A',
        layout.procs.first_data_row(),
        layout.procs.last_data_row(),
    );
    let proc_list = DataValidation::new()
        .allow_list_formula(Formula::new(proc_codes.to_string()))
        .ignore_blank(true);
    worksheet.add_data_validation(input::PROCEDURE_ROW, 1, input::PROCEDURE_ROW, 1, &proc_list)?;

    let consult_codes = col_range(
        SHEET_RATES,
        'A',
        layout.consults.first_data_row(),
        layout.consults.last_data_row(),
    );
    let consult_list = DataValidation::new()
        .allow_list_formula(Formula::new(consult_codes.to_string()))
        .ignore_blank(true);
    worksheet.add_data_validation(
        input::CONSULT_FIRST_ROW,
        1,
        input::consult_row(input::CONSULT_COUNT - 1),
        1,
        &consult_list,
    )?;

    let modifier_codes = col_range(
        SHEET_RATES,
        'A',
        layout.mods.first_data_row(),
        layout.mods.last_data_row(),
    );
    let modifier_list = DataValidation::new()
        .allow_list_formula(Formula::new(modifier_codes.to_string()))
        .ignore_blank(true);
    worksheet.add_data_validation(
        input::MODIFIER_FIRST_ROW,
        0,
        input::modifier_last_row(),
        0,
        &modifier_list,
    )?;

    let yes_no = DataValidation::new()
        .allow_list_strings(&["Yes", "No"])?
        .ignore_blank(false);
    worksheet.add_data_validation(input::EMERGENCY_ROW, 1, input::EMERGENCY_ROW, 1, &yes_no)?;
    worksheet.add_data_validation(
        input::MODIFIER_FIRST_ROW,
        1,
        input::modifier_last_row(),
        1,
        &yes_no,
    )?;

    Ok(())
}

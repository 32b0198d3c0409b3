//! Reference sheet: scalar constants plus the four record blocks, each
//! registered as a named table.

use crate::error::QuoteResult;
use crate::layout::{constants, Layout};
use crate::types::RateBook;
use rust_xlsxwriter::{Table, TableColumn, TableStyle, Worksheet};

pub const TBL_PROCS: &str = "tbl_PROCS";
pub const TBL_PLANS: &str = "tbl_PLANS";
pub const TBL_MODS: &str = "tbl_MODS";
pub const TBL_CONSULTS: &str = "tbl_CONSULTS";

pub(crate) fn write_rates(
    worksheet: &mut Worksheet,
    book: &RateBook,
    layout: &Layout,
) -> QuoteResult<()> {
    write_constants(worksheet, book)?;

    // Procedures block
    for (i, proc_record) in book.procedures.iter().enumerate() {
        let row = layout.procs.first_data_row() + i as u32;
        worksheet.write_string(row, 0, &proc_record.code)?;
        worksheet.write_string(row, 1, &proc_record.description)?;
        worksheet.write_number(row, 2, proc_record.rvu)?;
        worksheet.write_number(row, 3, proc_record.base_amount)?;
        worksheet.write_number(row, 4, f64::from(proc_record.specialty_index))?;
    }
    add_block_table(
        worksheet,
        layout.procs.header_row,
        layout.procs.last_data_row(),
        TBL_PROCS,
        &["Code", "Description", "RVU", "BaseAmount", "SpecialtyIndex"],
    )?;

    // Plans block
    for (i, plan) in book.plans.iter().enumerate() {
        let row = layout.plans.first_data_row() + i as u32;
        worksheet.write_string(row, 0, &plan.id)?;
        worksheet.write_string(row, 1, &plan.label)?;
        worksheet.write_number(row, 2, plan.multiplier)?;
        worksheet.write_string(row, 3, plan.location.as_str())?;
    }
    add_block_table(
        worksheet,
        layout.plans.header_row,
        layout.plans.last_data_row(),
        TBL_PLANS,
        &["PlanID", "Label", "Multiplier", "Loc"],
    )?;

    // Modifiers block
    for (i, modifier) in book.modifiers.iter().enumerate() {
        let row = layout.mods.first_data_row() + i as u32;
        worksheet.write_string(row, 0, &modifier.code)?;
        worksheet.write_string(row, 1, &modifier.description)?;
        worksheet.write_number(row, 2, modifier.units)?;
        worksheet.write_string(row, 3, modifier.unit_type.as_str())?;
        worksheet.write_string(row, 4, &modifier.category)?;
    }
    add_block_table(
        worksheet,
        layout.mods.header_row,
        layout.mods.last_data_row(),
        TBL_MODS,
        &["ModCode", "Description", "Units", "UnitType", "Category"],
    )?;

    // Consult fees block
    for (i, consult) in book.consults.iter().enumerate() {
        let row = layout.consults.first_data_row() + i as u32;
        worksheet.write_string(row, 0, &consult.code)?;
        worksheet.write_string(row, 1, &consult.description)?;
        worksheet.write_number(row, 2, consult.in_hospital)?;
        worksheet.write_number(row, 3, consult.out_of_hospital)?;
    }
    add_block_table(
        worksheet,
        layout.consults.header_row,
        layout.consults.last_data_row(),
        TBL_CONSULTS,
        &["ConsCode", "Description", "IH", "OH"],
    )?;

    for col in 0..5u16 {
        worksheet.set_column_width(col, 30)?;
    }

    Ok(())
}

fn write_constants(worksheet: &mut Worksheet, book: &RateBook) -> QuoteResult<()> {
    let c = &book.constants;
    let rows = [
        (constants::RCF_AN_ROW, "RCF_AN", c.rcf_an),
        (constants::RCF_CL_ROW, "RCF_CL", c.rcf_cl),
        (constants::VAT_ROW, "VAT", c.vat),
        (constants::BASE_AN_ROW, "BASE_AN", c.base_an()),
        (constants::BASE_CL_ROW, "BASE_CL", c.base_cl()),
    ];
    for (row, name, value) in rows {
        worksheet.write_string(row, 0, name)?;
        worksheet.write_number(row, 1, value)?;
    }
    Ok(())
}

fn add_block_table(
    worksheet: &mut Worksheet,
    header_row: u32,
    last_data_row: u32,
    name: &str,
    headers: &[&str],
) -> QuoteResult<()> {
    let columns: Vec<TableColumn> = headers
        .iter()
        .map(|h| TableColumn::new().set_header(*h))
        .collect();
    let table = Table::new()
        .set_name(name)
        .set_style(TableStyle::None)
        .set_autofilter(false)
        .set_columns(&columns);
    worksheet.add_table(
        header_row,
        0,
        last_data_row,
        (headers.len() - 1) as u16,
        &table,
    )?;
    Ok(())
}

//! Calculations sheet: every derived quantity of the quote, written as
//! spreadsheet formulas in a fixed dependency order. Nothing here is
//! evaluated by the tool.

use crate::error::QuoteResult;
use crate::excel::refs::{cell, col_range};
use crate::layout::{calc, input, Layout, SHEET_INPUT, SHEET_RATES};
use rust_xlsxwriter::{Formula, Worksheet};

/// Modifier code whose enablement triggers the BMI minutes multiplier.
pub const BMI_MODIFIER_CODE: &str = "18";

pub(crate) fn write_calculations(worksheet: &mut Worksheet, layout: &Layout) -> QuoteResult<()> {
    let plan_cell = cell(SHEET_INPUT, 'B', input::PLAN_ROW);
    let proc_cell = cell(SHEET_INPUT, 'B', input::PROCEDURE_ROW);
    let minutes_cell = cell(SHEET_INPUT, 'B', input::MINUTES_ROW);
    let emergency_flag = cell(SHEET_INPUT, 'B', input::EMERGENCY_ROW);
    let emergency_minutes = cell(SHEET_INPUT, 'D', input::EMERGENCY_ROW);

    let plan_labels = col_range(
        SHEET_RATES,
        'B',
        layout.plans.first_data_row(),
        layout.plans.last_data_row(),
    );
    let plan_multipliers = col_range(
        SHEET_RATES,
        'C',
        layout.plans.first_data_row(),
        layout.plans.last_data_row(),
    );
    let plan_locations = col_range(
        SHEET_RATES,
        'D',
        layout.plans.first_data_row(),
        layout.plans.last_data_row(),
    );

    let rows: Vec<(u32, &str, String)> = vec![
        (
            calc::PLAN_MULTIPLIER_ROW,
            "Plan Multiplier",
            format!(
                r#"=IF({plan_cell}="","",INDEX({plan_multipliers},MATCH({plan_cell},{plan_labels},0)))"#
            ),
        ),
        (
            calc::PLAN_LOCATION_ROW,
            "Plan Location",
            format!(
                r#"=IF({plan_cell}="","",INDEX({plan_locations},MATCH({plan_cell},{plan_labels},0)))"#
            ),
        ),
        (
            calc::PROC_RVU_ROW,
            "Proc RVU",
            format!(
                r#"=IF({proc_cell}="","",VLOOKUP({proc_cell}, {lookup},3,FALSE))"#,
                lookup = crate::excel::refs::grid_range(
                    SHEET_RATES,
                    'A',
                    'C',
                    layout.procs.first_data_row(),
                    layout.procs.last_data_row(),
                ),
            ),
        ),
        (
            calc::PROC_UNIT_PRICE_ROW,
            "Proc UnitPrice_exclVAT",
            format!(
                r#"=IF(B{rvu}="","",(B{rvu}*BASE_AN*B{mult})/(1+VAT))"#,
                rvu = calc::PROC_RVU_ROW + 1,
                mult = calc::PLAN_MULTIPLIER_ROW + 1,
            ),
        ),
        (
            calc::MINUTES_ROW,
            "Anaes Minutes",
            format!(r#"=IF({minutes_cell}="",0,{minutes_cell})"#),
        ),
        (calc::HAS_BMI_ROW, "Has BMI", has_bmi_formula()),
        (
            calc::EFFECTIVE_MINUTES_ROW,
            "Effective Minutes",
            format!(
                "=IF(B{bmi}=1,ROUND(B{min}*1.5,0),B{min})",
                bmi = calc::HAS_BMI_ROW + 1,
                min = calc::MINUTES_ROW + 1,
            ),
        ),
        (calc::TIME_UNITS_ROW, "Time Units", time_units_formula()),
        (
            calc::ANAES_UNIT_PRICE_ROW,
            "Anaes Unit Price exclVAT",
            format!(
                r#"=IF(B{mult}="","",(BASE_AN*B{mult})/(1+VAT))"#,
                mult = calc::PLAN_MULTIPLIER_ROW + 1,
            ),
        ),
        (
            calc::ANAES_AMOUNT_ROW,
            "Anaes Amount exclVAT",
            format!(
                "=B{units}*B{price}",
                units = calc::TIME_UNITS_ROW + 1,
                price = calc::ANAES_UNIT_PRICE_ROW + 1,
            ),
        ),
        (
            calc::EMERGENCY_MINUTES_ROW,
            "Emergency Minutes",
            format!(r#"=IF({emergency_flag}="Yes",{emergency_minutes},0)"#),
        ),
        (
            calc::EMERGENCY_BLOCKS_ROW,
            "Emergency Blocks",
            format!(
                "=IF(B{min}<=0,0,CEILING(B{min}/30,1))",
                min = calc::EMERGENCY_MINUTES_ROW + 1,
            ),
        ),
        (
            calc::CLINICAL_UNIT_PRICE_ROW,
            "Clinical unit price exclVAT",
            format!(
                "=(BASE_CL*B{mult})/(1+VAT)",
                mult = calc::PLAN_MULTIPLIER_ROW + 1,
            ),
        ),
        (
            calc::EMERGENCY_BLOCK_PRICE_ROW,
            "Emergency Unit Price per block exclVAT",
            format!("=B{}*12", calc::CLINICAL_UNIT_PRICE_ROW + 1),
        ),
        (
            calc::EMERGENCY_AMOUNT_ROW,
            "Emergency Amount exclVAT",
            format!(
                "=B{blocks}*B{price}",
                blocks = calc::EMERGENCY_BLOCKS_ROW + 1,
                price = calc::EMERGENCY_BLOCK_PRICE_ROW + 1,
            ),
        ),
        (
            calc::MODIFIERS_AMOUNT_ROW,
            "Modifiers Amount exclVAT",
            modifiers_amount_formula(layout),
        ),
    ];

    for (row, label, formula) in rows {
        worksheet.write_string(row, 0, label)?;
        worksheet.write_formula(row, 1, Formula::new(formula))?;
    }

    Ok(())
}

fn enabled_codes_range() -> crate::excel::refs::ColRange {
    col_range(
        SHEET_INPUT,
        'A',
        input::MODIFIER_FIRST_ROW,
        input::modifier_last_row(),
    )
}

fn enabled_flags_range() -> crate::excel::refs::ColRange {
    col_range(
        SHEET_INPUT,
        'B',
        input::MODIFIER_FIRST_ROW,
        input::modifier_last_row(),
    )
}

/// 1 iff any enabled modifier slot holds the BMI code.
fn has_bmi_formula() -> String {
    format!(
        r#"=IF(COUNTIFS({codes},"{BMI_MODIFIER_CODE}",{flags},"Yes")>0,1,0)"#,
        codes = enabled_codes_range(),
        flags = enabled_flags_range(),
    )
}

/// Banded step function of effective minutes: the first hour bills 2 units
/// per started 15 minutes, everything past it 3.
fn time_units_formula() -> String {
    format!(
        "=IF(B{m}<=0,0,IF(B{m}<=60,CEILING(B{m}/15,1)*2,8+CEILING((B{m}-60)/15,1)*3))",
        m = calc::EFFECTIVE_MINUTES_ROW + 1,
    )
}

/// Set-membership aggregation over the modifier table: each table row whose
/// code appears among the enabled slots contributes once, however many slots
/// name it.
fn modifiers_amount_formula(layout: &Layout) -> String {
    let mod_codes = col_range(
        SHEET_RATES,
        'A',
        layout.mods.first_data_row(),
        layout.mods.last_data_row(),
    );
    let mod_units = col_range(
        SHEET_RATES,
        'C',
        layout.mods.first_data_row(),
        layout.mods.last_data_row(),
    );
    let mod_types = col_range(
        SHEET_RATES,
        'D',
        layout.mods.first_data_row(),
        layout.mods.last_data_row(),
    );
    format!(
        r#"=SUMPRODUCT( (COUNTIF({enabled}, {mod_codes})>0) * ( {mod_units} * ((({mod_types}="an")*BASE_AN) + (({mod_types}="cl")*BASE_CL)) * B{mult} / (1+VAT) ) )"#,
        enabled = enabled_codes_range(),
        mult = calc::PLAN_MULTIPLIER_ROW + 1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use crate::types::*;
    use pretty_assertions::assert_eq;

    /// Mirror of the banding the emitted formula encodes, for boundary checks.
    fn band(minutes: f64) -> f64 {
        if minutes <= 0.0 {
            0.0
        } else if minutes <= 60.0 {
            (minutes / 15.0).ceil() * 2.0
        } else {
            8.0 + ((minutes - 60.0) / 15.0).ceil() * 3.0
        }
    }

    fn blocks(minutes: f64) -> f64 {
        if minutes <= 0.0 {
            0.0
        } else {
            (minutes / 30.0).ceil()
        }
    }

    #[test]
    fn time_unit_banding_boundaries() {
        assert_eq!(band(0.0), 0.0);
        assert_eq!(band(15.0), 2.0);
        assert_eq!(band(60.0), 8.0);
        assert_eq!(band(61.0), 11.0);
        assert_eq!(band(75.0), 11.0);
        assert_eq!(band(90.0), 14.0);
    }

    #[test]
    fn emergency_block_boundaries() {
        assert_eq!(blocks(0.0), 0.0);
        assert_eq!(blocks(1.0), 1.0);
        assert_eq!(blocks(30.0), 1.0);
        assert_eq!(blocks(31.0), 2.0);
    }

    #[test]
    fn time_units_formula_matches_banding_constants() {
        assert_eq!(
            time_units_formula(),
            "=IF(B8<=0,0,IF(B8<=60,CEILING(B8/15,1)*2,8+CEILING((B8-60)/15,1)*3))"
        );
    }

    #[test]
    fn has_bmi_formula_checks_code_and_flag_together() {
        assert_eq!(
            has_bmi_formula(),
            r#"=IF(COUNTIFS(Input!$A$18:$A$37,"18",Input!$B$18:$B$37,"Yes")>0,1,0)"#
        );
    }

    #[test]
    fn modifiers_formula_aggregates_by_table_membership() {
        let book = RateBook {
            constants: Constants {
                rcf_an: 20.40,
                rcf_cl: 10.20,
                vat: 0.15,
            },
            procedures: vec![Procedure {
                code: "1234".into(),
                description: "x".into(),
                rvu: 5.0,
                base_amount: 1000.0,
                specialty_index: 3,
            }],
            plans: vec![RatePlan {
                id: "STD".into(),
                label: "Standard".into(),
                multiplier: 1.0,
                location: Location::InHospital,
            }],
            modifiers: vec![
                Modifier {
                    code: "18".into(),
                    description: "BMI".into(),
                    units: 2.0,
                    unit_type: UnitType::Anaesthetic,
                    category: "General".into(),
                    note: None,
                    time_multiplier: None,
                },
                Modifier {
                    code: "21".into(),
                    description: "Night".into(),
                    units: 3.0,
                    unit_type: UnitType::Clinical,
                    category: "After hours".into(),
                    note: None,
                    time_multiplier: None,
                },
            ],
            consults: vec![],
            skipped_lines: 0,
        };
        let layout = Layout::plan(&book);
        let formula = modifiers_amount_formula(&layout);

        // The COUNTIF membership test runs over the Rates rows, so a code
        // enabled in two input slots still contributes exactly once.
        assert!(formula.contains("COUNTIF(Input!$A$18:$A$37, Rates!$A$14:$A$15)"));
        assert!(formula.contains(r#"(Rates!$D$14:$D$15="an")*BASE_AN"#));
        assert!(formula.contains(r#"(Rates!$D$14:$D$15="cl")*BASE_CL"#));
        assert!(formula.starts_with("=SUMPRODUCT("));
    }
}

//! End-to-end workbook generation tests.
//!
//! Each test generates a workbook into a scratch directory and reads it back
//! with calamine to verify cell values and formula text. Formula cells come
//! back without the leading `=`.

use calamine::{open_workbook, Data, Range, Reader, SheetVisible, Xlsx};
use quotesmith::excel::WorkbookBuilder;
use quotesmith::parser;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SAMPLE: &str = r#"
const RCF_AN = 2040.0;
const RCF_CL = 1020.0;
const VAT = 0.15;

PLANS = [
{ id:"STD", label:"Standard", m:1.0, loc:"IH" }
{ id:"PRM", label:"Premium", m:1.8, loc:"OH" }
]

PROCS = [
["1234","Appendicectomy", 5.0, 1000.0, 3]
["5678","Hip replacement", 9.5, 1000.0, 4]
]

MODS = [
{ c:"18", d:"BMI over 35", u:2, t:"an", cat:"General" }
{ c:"21", d:"Night work", u:3, t:"cl", cat:"After hours" }
]

CONSULTS = [
{ c:"0190", d:"Pre-op consult", ih:500, oh:400 }
{ c:"0191", d:"Emergency consult", ih:750, oh:600,on:true }
]
"#;

fn generate(dir: &TempDir, source: &str) -> PathBuf {
    let output = dir.path().join("quote.xlsx");
    let book = parser::parse_rates(source).unwrap();
    WorkbookBuilder::new(book).write(&output).unwrap();
    output
}

fn open(path: &Path) -> Xlsx<std::io::BufReader<std::fs::File>> {
    open_workbook(path).unwrap()
}

fn string_at(range: &Range<Data>, row: u32, col: u32) -> Option<String> {
    match range.get_value((row, col)) {
        Some(Data::String(s)) => Some(s.clone()),
        _ => None,
    }
}

fn number_at(range: &Range<Data>, row: u32, col: u32) -> Option<f64> {
    match range.get_value((row, col)) {
        Some(Data::Float(f)) => Some(*f),
        Some(Data::Int(i)) => Some(*i as f64),
        _ => None,
    }
}

fn formula_at(range: &Range<String>, row: u32, col: u32) -> String {
    range
        .get_value((row, col))
        .cloned()
        .unwrap_or_else(|| panic!("no formula at ({row},{col})"))
}

#[test]
fn workbook_has_four_sheets_and_hidden_calculations() {
    let dir = TempDir::new().unwrap();
    let path = generate(&dir, SAMPLE);
    let workbook = open(&path);

    let names = workbook.sheet_names().to_vec();
    assert_eq!(names, vec!["Rates", "Input", "Calculations", "Output"]);

    let calc_meta = workbook
        .sheets_metadata()
        .iter()
        .find(|s| s.name == "Calculations")
        .unwrap();
    assert_eq!(calc_meta.visible, SheetVisible::Hidden);
}

#[test]
fn rates_sheet_holds_constants_and_derived_bases() {
    let dir = TempDir::new().unwrap();
    let path = generate(&dir, SAMPLE);
    let mut workbook = open(&path);
    let rates = workbook.worksheet_range("Rates").unwrap();

    assert_eq!(string_at(&rates, 0, 0).as_deref(), Some("RCF_AN"));
    assert_eq!(number_at(&rates, 0, 1), Some(2040.0));
    assert_eq!(number_at(&rates, 2, 1), Some(0.15));
    // BASE_AN = RCF_AN / 2.04
    assert!((number_at(&rates, 3, 1).unwrap() - 1000.0).abs() < 1e-9);
    assert!((number_at(&rates, 4, 1).unwrap() - 500.0).abs() < 1e-9);
}

#[test]
fn reference_blocks_span_exactly_their_records() {
    let dir = TempDir::new().unwrap();
    let path = generate(&dir, SAMPLE);
    let mut workbook = open(&path);
    let rates = workbook.worksheet_range("Rates").unwrap();

    // Procedures: header row 7 (0-based 6), two data rows, then a blank
    // separator before the plans header.
    assert_eq!(string_at(&rates, 6, 0).as_deref(), Some("Code"));
    assert_eq!(string_at(&rates, 7, 0).as_deref(), Some("1234"));
    assert_eq!(string_at(&rates, 8, 0).as_deref(), Some("5678"));
    assert_eq!(string_at(&rates, 9, 0), None);
    assert_eq!(string_at(&rates, 10, 0).as_deref(), Some("PlanID"));

    assert_eq!(string_at(&rates, 11, 1).as_deref(), Some("Standard"));
    assert_eq!(string_at(&rates, 12, 3).as_deref(), Some("OH"));

    assert_eq!(string_at(&rates, 14, 0).as_deref(), Some("ModCode"));
    assert_eq!(string_at(&rates, 15, 3).as_deref(), Some("an"));
    assert_eq!(string_at(&rates, 16, 3).as_deref(), Some("cl"));

    assert_eq!(string_at(&rates, 18, 0).as_deref(), Some("ConsCode"));
    assert_eq!(string_at(&rates, 19, 0).as_deref(), Some("0190"));
    assert_eq!(number_at(&rates, 20, 2), Some(750.0));
}

#[test]
fn input_sheet_has_defaults_and_description_echo() {
    let dir = TempDir::new().unwrap();
    let path = generate(&dir, SAMPLE);
    let mut workbook = open(&path);
    let input = workbook.worksheet_range("Input").unwrap();

    assert_eq!(string_at(&input, 0, 0).as_deref(), Some("Patient"));
    assert_eq!(string_at(&input, 4, 0).as_deref(), Some("Rate Plan"));
    // Emergency flag defaults to No
    assert_eq!(string_at(&input, 10, 1).as_deref(), Some("No"));
    // All 20 modifier slots default to No
    for row in 17..37 {
        assert_eq!(string_at(&input, row, 1).as_deref(), Some("No"));
    }

    let formulas = workbook.worksheet_formula("Input").unwrap();
    let echo = formula_at(&formulas, 6, 2);
    assert!(echo.contains("VLOOKUP(B7, Rates!$A$8:$B$9, 2, FALSE)"), "{echo}");
}

#[test]
fn calculation_formulas_follow_the_fixed_chain() {
    let dir = TempDir::new().unwrap();
    let path = generate(&dir, SAMPLE);
    let mut workbook = open(&path);
    let formulas = workbook.worksheet_formula("Calculations").unwrap();

    let multiplier = formula_at(&formulas, 0, 1);
    assert!(multiplier.contains("INDEX(Rates!$C$12:$C$13,MATCH(Input!B5,Rates!$B$12:$B$13,0))"));

    let proc_price = formula_at(&formulas, 3, 1);
    assert!(proc_price.contains("(B3*BASE_AN*B1)/(1+VAT)"));

    let has_bmi = formula_at(&formulas, 6, 1);
    assert!(has_bmi.contains(r#"COUNTIFS(Input!$A$18:$A$37,"18",Input!$B$18:$B$37,"Yes")"#));

    let effective = formula_at(&formulas, 7, 1);
    assert!(effective.contains("ROUND(B6*1.5,0)"));

    let time_units = formula_at(&formulas, 8, 1);
    assert_eq!(
        time_units,
        "IF(B8<=0,0,IF(B8<=60,CEILING(B8/15,1)*2,8+CEILING((B8-60)/15,1)*3))"
    );

    let blocks = formula_at(&formulas, 13, 1);
    assert_eq!(blocks, "IF(B13<=0,0,CEILING(B13/30,1))");

    let block_price = formula_at(&formulas, 15, 1);
    assert_eq!(block_price, "B15*12");

    let mods = formula_at(&formulas, 19, 1);
    assert!(mods.starts_with("SUMPRODUCT("));
    assert!(mods.contains("COUNTIF(Input!$A$18:$A$37, Rates!$A$16:$A$17)"));
    assert!(mods.contains(r#"(Rates!$D$16:$D$17="an")*BASE_AN"#));
}

#[test]
fn output_sheet_totals_and_workings_reference_calculations() {
    let dir = TempDir::new().unwrap();
    let path = generate(&dir, SAMPLE);
    let mut workbook = open(&path);

    let output = workbook.worksheet_range("Output").unwrap();
    assert_eq!(
        string_at(&output, 0, 0).as_deref(),
        Some("Anaesthetic Quote (2026)")
    );
    assert_eq!(string_at(&output, 4, 0).as_deref(), Some("Code"));
    assert_eq!(string_at(&output, 5, 4).as_deref(), Some("15%"));
    assert_eq!(string_at(&output, 9, 0).as_deref(), Some("0023"));
    assert_eq!(string_at(&output, 10, 0).as_deref(), Some("0011"));
    assert_eq!(string_at(&output, 13, 4).as_deref(), Some("Subtotal (excl VAT)"));
    assert_eq!(string_at(&output, 14, 4).as_deref(), Some("VAT (15%)"));

    let formulas = workbook.worksheet_formula("Output").unwrap();
    assert_eq!(formula_at(&formulas, 13, 5), "SUM(F6:F12)");
    assert_eq!(formula_at(&formulas, 14, 5), "F14*VAT");
    assert_eq!(formula_at(&formulas, 15, 5), "F14+F15");

    // Consult unit price picks the IH or OH fee column off the plan location.
    let consult_price = formula_at(&formulas, 5, 3);
    assert!(consult_price.contains(r#"IF(Calculations!B2="IH""#));
    assert!(consult_price.contains("VLOOKUP(Input!B13, Rates!$A$20:$D$21,3,FALSE)"));
    assert!(consult_price.contains("VLOOKUP(Input!B13, Rates!$A$20:$D$21,4,FALSE)"));
    assert!(consult_price.contains("/(1+VAT)"));

    // Workings panel echoes the calculation chain.
    assert_eq!(string_at(&output, 1, 7).as_deref(), Some("Plan Multiplier"));
    assert_eq!(formula_at(&formulas, 1, 8), "Calculations!B1");
    assert_eq!(string_at(&output, 11, 7).as_deref(), Some("Modifiers Amount (ex VAT)"));
    assert_eq!(formula_at(&formulas, 11, 8), "Calculations!B20");

    // Line amounts are qty x unit price.
    assert_eq!(formula_at(&formulas, 8, 5), "C9*D9");
    assert_eq!(formula_at(&formulas, 11, 5), "D12");
}

/// Mirror of the workbook's pricing chain for the end-to-end scenario of a
/// 90-minute case on a 1.0 multiplier plan with no BMI modifier.
#[test]
fn end_to_end_scenario_reproduces_expected_amounts() {
    let dir = TempDir::new().unwrap();
    let path = generate(&dir, SAMPLE);
    let mut workbook = open(&path);
    let rates = workbook.worksheet_range("Rates").unwrap();

    let base_an = number_at(&rates, 3, 1).unwrap();
    let vat = number_at(&rates, 2, 1).unwrap();
    let rvu = number_at(&rates, 7, 2).unwrap();
    let multiplier = number_at(&rates, 11, 2).unwrap();

    let proc_price = rvu * base_an * multiplier / (1.0 + vat);
    assert!((proc_price - 4347.83).abs() < 0.005);

    // 90 raw minutes, no BMI: effective minutes 90 -> 8 + ceil(30/15)*3 = 14
    let effective = 90.0f64;
    let time_units = 8.0 + ((effective - 60.0) / 15.0f64).ceil() * 3.0;
    assert_eq!(time_units, 14.0);

    let anaes_unit = base_an * multiplier / (1.0 + vat);
    let subtotal = proc_price + time_units * anaes_unit;
    let total = subtotal * (1.0 + vat);

    // No emergency, no modifiers: subtotal is the two lines only, and the
    // VAT round trip closes to the cent.
    assert!((subtotal - (proc_price + 14.0 * anaes_unit)).abs() < 1e-9);
    assert!(((subtotal + subtotal * vat) - total).abs() < 0.005);
}

/// Duplicate enabled slots must not double a modifier: the aggregation is a
/// membership test over the modifier table, mirrored here.
#[test]
fn modifier_aggregation_is_idempotent_under_duplicate_slots() {
    let book = parser::parse_rates(SAMPLE).unwrap();
    let multiplier = 1.0;
    let vat = book.constants.vat;

    let amount = |enabled: &[&str]| -> f64 {
        book.modifiers
            .iter()
            .filter(|m| enabled.contains(&m.code.as_str()))
            .map(|m| {
                let base = match m.unit_type {
                    quotesmith::types::UnitType::Anaesthetic => book.constants.base_an(),
                    quotesmith::types::UnitType::Clinical => book.constants.base_cl(),
                    _ => 0.0,
                };
                m.units * base * multiplier / (1.0 + vat)
            })
            .sum()
    };

    assert_eq!(amount(&["18"]), amount(&["18", "18"]));
    assert!(amount(&["18", "21"]) > amount(&["18"]));
}

#[test]
fn empty_consult_set_still_produces_a_valid_workbook() {
    let source = r#"
const RCF_AN = 2040.0;
const RCF_CL = 1020.0;
const VAT = 0.15;
{ id:"STD", label:"Standard", m:1.0, loc:"IH" }
["1234","Appendicectomy", 5.0, 1000.0, 3]
{ c:"18", d:"BMI over 35", u:2, t:"an", cat:"General" }
"#;
    let dir = TempDir::new().unwrap();
    let path = generate(&dir, source);
    let mut workbook = open(&path);
    let rates = workbook.worksheet_range("Rates").unwrap();

    // Consults block keeps its header with a single blank data row under it.
    let book = parser::parse_rates(source).unwrap();
    let layout = quotesmith::layout::Layout::plan(&book);
    assert!(layout.consults.is_empty());
    assert_eq!(
        string_at(&rates, layout.consults.header_row, 0).as_deref(),
        Some("ConsCode")
    );
    assert_eq!(string_at(&rates, layout.consults.first_data_row(), 0), None);

    // Dropdown source range is the single blank row, still a valid range.
    let formulas = workbook.worksheet_formula("Input").unwrap();
    let echo = formula_at(&formulas, 6, 2);
    assert!(echo.contains("Rates!$A$8:$B$8"), "{echo}");
}

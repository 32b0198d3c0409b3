//! Workbook layout plan.
//!
//! Every cross-sheet reference in the generated workbook is position-derived,
//! so the row spans of the reference-sheet blocks are computed exactly once
//! here and handed to each sheet builder. Builders never recompute ranges.
//!
//! All rows are 0-based worksheet coordinates; A1-notation conversion happens
//! in [`crate::excel::refs`] when formulas are rendered.

use crate::types::RateBook;

pub const SHEET_RATES: &str = "Rates";
pub const SHEET_INPUT: &str = "Input";
pub const SHEET_CALC: &str = "Calculations";
pub const SHEET_OUTPUT: &str = "Output";

/// Rates-sheet rows holding the named scalar constants (values in column B).
pub mod constants {
    pub const RCF_AN_ROW: u32 = 0;
    pub const RCF_CL_ROW: u32 = 1;
    pub const VAT_ROW: u32 = 2;
    pub const BASE_AN_ROW: u32 = 3;
    pub const BASE_CL_ROW: u32 = 4;
}

/// Fixed Input-sheet form coordinates. Entry values live in column B unless
/// noted otherwise.
pub mod input {
    pub const PATIENT_ROW: u32 = 0;
    pub const ICD10_ROW: u32 = 1;
    pub const SURGEON_ROW: u32 = 2;
    pub const PLAN_ROW: u32 = 4;
    /// Procedure code in B, read-only description echo in C.
    pub const PROCEDURE_ROW: u32 = 6;
    pub const MINUTES_ROW: u32 = 8;
    /// Yes/No flag in B, emergency minutes in D.
    pub const EMERGENCY_ROW: u32 = 10;
    pub const CONSULT_FIRST_ROW: u32 = 12;
    pub const CONSULT_COUNT: u32 = 3;
    /// Modifier slots: code in A, Yes/No enable flag in B.
    pub const MODIFIER_HEADER_ROW: u32 = 16;
    pub const MODIFIER_FIRST_ROW: u32 = 17;
    pub const MODIFIER_SLOTS: u32 = 20;

    pub const fn consult_row(index: u32) -> u32 {
        CONSULT_FIRST_ROW + index
    }

    pub const fn modifier_last_row() -> u32 {
        MODIFIER_FIRST_ROW + MODIFIER_SLOTS - 1
    }
}

/// Calculations-sheet rows (labels in A, formulas in B), in dependency order.
pub mod calc {
    pub const PLAN_MULTIPLIER_ROW: u32 = 0;
    pub const PLAN_LOCATION_ROW: u32 = 1;
    pub const PROC_RVU_ROW: u32 = 2;
    pub const PROC_UNIT_PRICE_ROW: u32 = 3;
    pub const MINUTES_ROW: u32 = 5;
    pub const HAS_BMI_ROW: u32 = 6;
    pub const EFFECTIVE_MINUTES_ROW: u32 = 7;
    pub const TIME_UNITS_ROW: u32 = 8;
    pub const ANAES_UNIT_PRICE_ROW: u32 = 9;
    pub const ANAES_AMOUNT_ROW: u32 = 10;
    pub const EMERGENCY_MINUTES_ROW: u32 = 12;
    pub const EMERGENCY_BLOCKS_ROW: u32 = 13;
    pub const CLINICAL_UNIT_PRICE_ROW: u32 = 14;
    pub const EMERGENCY_BLOCK_PRICE_ROW: u32 = 15;
    pub const EMERGENCY_AMOUNT_ROW: u32 = 16;
    pub const MODIFIERS_AMOUNT_ROW: u32 = 19;
}

/// Row span of one reference-sheet record block.
///
/// An empty record set keeps one blank data row under its header so the named
/// table and every dependent range stay structurally valid; dropdowns built on
/// that row simply offer no values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub header_row: u32,
    pub record_count: usize,
}

impl BlockSpan {
    pub fn first_data_row(&self) -> u32 {
        self.header_row + 1
    }

    pub fn last_data_row(&self) -> u32 {
        self.header_row + (self.record_count.max(1) as u32)
    }

    /// Header row of the block that follows, after one blank separator row.
    pub fn next_block_row(&self) -> u32 {
        self.last_data_row() + 2
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

/// The complete reference-sheet layout, computed once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub procs: BlockSpan,
    pub plans: BlockSpan,
    pub mods: BlockSpan,
    pub consults: BlockSpan,
}

/// First block starts below the constants with one blank row between.
const FIRST_BLOCK_ROW: u32 = 6;

impl Layout {
    pub fn plan(book: &RateBook) -> Self {
        let procs = BlockSpan {
            header_row: FIRST_BLOCK_ROW,
            record_count: book.procedures.len(),
        };
        let plans = BlockSpan {
            header_row: procs.next_block_row(),
            record_count: book.plans.len(),
        };
        let mods = BlockSpan {
            header_row: plans.next_block_row(),
            record_count: book.modifiers.len(),
        };
        let consults = BlockSpan {
            header_row: mods.next_block_row(),
            record_count: book.consults.len(),
        };
        Self {
            procs,
            plans,
            mods,
            consults,
        }
    }
}

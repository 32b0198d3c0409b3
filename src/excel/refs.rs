//! Cell and range reference rendering for formula assembly.
//!
//! Formulas are assembled from these display types instead of hand-built
//! string interpolation, so every cross-sheet address is derived from the
//! layout plan in one place. Rows are 0-based worksheet coordinates and are
//! converted to 1-based A1 notation on display.

use std::fmt;

/// A single-cell reference, rendered relative: `Input!B5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub sheet: &'static str,
    pub col: char,
    pub row: u32,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}{}", self.sheet, self.col, self.row + 1)
    }
}

/// A single-cell reference, rendered absolute: `Rates!$B$1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsCell {
    pub sheet: &'static str,
    pub col: char,
    pub row: u32,
}

impl fmt::Display for AbsCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!${}${}", self.sheet, self.col, self.row + 1)
    }
}

/// A single-column range, rendered absolute: `Rates!$A$8:$A$20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColRange {
    pub sheet: &'static str,
    pub col: char,
    pub first_row: u32,
    pub last_row: u32,
}

impl fmt::Display for ColRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}!${}${}:${}${}",
            self.sheet,
            self.col,
            self.first_row + 1,
            self.col,
            self.last_row + 1
        )
    }
}

/// A multi-column range, rendered absolute: `Rates!$A$8:$C$20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRange {
    pub sheet: &'static str,
    pub first_col: char,
    pub last_col: char,
    pub first_row: u32,
    pub last_row: u32,
}

impl fmt::Display for GridRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}!${}${}:${}${}",
            self.sheet,
            self.first_col,
            self.first_row + 1,
            self.last_col,
            self.last_row + 1
        )
    }
}

pub const fn cell(sheet: &'static str, col: char, row: u32) -> Cell {
    Cell { sheet, col, row }
}

pub const fn abs_cell(sheet: &'static str, col: char, row: u32) -> AbsCell {
    AbsCell { sheet, col, row }
}

pub const fn col_range(sheet: &'static str, col: char, first_row: u32, last_row: u32) -> ColRange {
    ColRange {
        sheet,
        col,
        first_row,
        last_row,
    }
}

pub const fn grid_range(
    sheet: &'static str,
    first_col: char,
    last_col: char,
    first_row: u32,
    last_row: u32,
) -> GridRange {
    GridRange {
        sheet,
        first_col,
        last_col,
        first_row,
        last_row,
    }
}

//! Workbook generation: sheet builders, shared formats, and the reference
//! rendering used to assemble formulas.

mod builder;
pub(crate) mod calc;
pub(crate) mod input;
pub(crate) mod output;
pub(crate) mod rates;
pub mod refs;
pub mod styles;

pub use builder::WorkbookBuilder;
pub use calc::BMI_MODIFIER_CODE;
pub use rates::{TBL_CONSULTS, TBL_MODS, TBL_PLANS, TBL_PROCS};

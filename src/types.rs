//! Record types extracted from the rates configuration.
//!
//! Everything here is immutable once parsed: the extractor builds a
//! [`RateBook`] in one pass and the sheet builders only read from it.

/// Raw rates are quoted per 2.04 units; dividing yields the billable base.
pub const UNIT_SCALE_DIVISOR: f64 = 2.04;

/// Location tag on a rate plan, selecting in- or out-of-hospital consult fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    InHospital,
    OutOfHospital,
}

impl Location {
    /// Parse the `loc:` tag of a plan record.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "IH" => Some(Location::InHospital),
            "OH" => Some(Location::OutOfHospital),
            _ => None,
        }
    }

    /// The tag text written to the reference sheet and compared in formulas.
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::InHospital => "IH",
            Location::OutOfHospital => "OH",
        }
    }
}

/// Which base constant a modifier's units multiply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitType {
    /// Anaesthetic base rate ("an").
    Anaesthetic,
    /// Clinical base rate ("cl").
    Clinical,
    /// Anything else contributes zero; the tag is preserved verbatim.
    Other(String),
}

impl UnitType {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "an" => UnitType::Anaesthetic,
            "cl" => UnitType::Clinical,
            other => UnitType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            UnitType::Anaesthetic => "an",
            UnitType::Clinical => "cl",
            UnitType::Other(tag) => tag,
        }
    }
}

/// A billing rate plan (medical scheme option).
#[derive(Debug, Clone, PartialEq)]
pub struct RatePlan {
    pub id: String,
    pub label: String,
    pub multiplier: f64,
    pub location: Location,
}

/// A procedure code with its relative-value-unit pricing inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Procedure {
    pub code: String,
    pub description: String,
    pub rvu: f64,
    pub base_amount: f64,
    pub specialty_index: u32,
}

/// An add-on billing modifier charged against a base rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Modifier {
    pub code: String,
    pub description: String,
    pub units: f64,
    pub unit_type: UnitType,
    pub category: String,
    pub note: Option<String>,
    pub time_multiplier: Option<f64>,
}

/// A consultation fee with separate in- and out-of-hospital rates.
///
/// `on_call` is carried through from the source but no downstream formula
/// reads it; the source format reserves it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsultFee {
    pub code: String,
    pub description: String,
    pub in_hospital: f64,
    pub out_of_hospital: f64,
    pub on_call: bool,
}

/// The three scalar constants of the rates source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constants {
    /// Raw anaesthetic rate conversion factor.
    pub rcf_an: f64,
    /// Raw clinical rate conversion factor.
    pub rcf_cl: f64,
    /// VAT rate as a fraction (e.g. 0.15).
    pub vat: f64,
}

impl Constants {
    /// Anaesthetic base constant used as the per-unit price input.
    pub fn base_an(&self) -> f64 {
        self.rcf_an / UNIT_SCALE_DIVISOR
    }

    /// Clinical base constant used as the per-unit price input.
    pub fn base_cl(&self) -> f64 {
        self.rcf_cl / UNIT_SCALE_DIVISOR
    }
}

/// Everything extracted from the rates source, in source order.
#[derive(Debug, Clone)]
pub struct RateBook {
    pub constants: Constants,
    pub procedures: Vec<Procedure>,
    pub plans: Vec<RatePlan>,
    pub modifiers: Vec<Modifier>,
    pub consults: Vec<ConsultFee>,
    /// Candidate record lines that matched no declaration form.
    pub skipped_lines: usize,
}

//! Record extraction from the rates configuration text.
//!
//! The source is line-oriented: each declaration (constant, plan, procedure,
//! modifier, consult fee) sits on its own line and is matched structurally.
//! Source order is preserved; it becomes display and lookup order in the
//! generated workbook.
//!
//! Tolerance policy: a line that looks like a record but fails its pattern is
//! skipped, not fatal. Skips are counted in [`RateBook::skipped_lines`] so the
//! CLI can surface them. Missing required constants are fatal before any
//! output is written.

use crate::error::{QuoteError, QuoteResult};
use crate::types::{
    Constants, ConsultFee, Location, Modifier, Procedure, RateBook, RatePlan, UnitType,
};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::Path;

/// Constants that must be present for any output to be produced.
const REQUIRED_CONSTANTS: [&str; 3] = ["RCF_AN", "RCF_CL", "VAT"];

/// Compiled declaration patterns, one per record form.
struct Patterns {
    constant: Regex,
    plan: Regex,
    procedure: Regex,
    modifier: Regex,
    consult: Regex,
    /// Loose match for "this line is trying to be a record".
    candidate: Regex,
}

impl Patterns {
    fn compile() -> QuoteResult<Self> {
        Ok(Self {
            constant: pattern(r"const\s+([A-Z_][A-Z0-9_]*)\s*=\s*([0-9.]+)\s*;")?,
            plan: pattern(
                r#"\{\s*id:"([^"]+)",\s*label:"([^"]+)",\s*m:([0-9.]+),\s*loc:"([^"]+)"\s*\}"#,
            )?,
            procedure: pattern(
                r#"\["([0-9A-Za-z]+)","([^"]+)",\s*([0-9.]+),\s*([0-9.]+),\s*(\d+)\]"#,
            )?,
            modifier: pattern(
                r#"\{\s*c:"([^"]+)",\s*d:"([^"]+)",\s*u:([0-9.]+),\s*t:"([^"]+)",\s*cat:"([^"]+)"(?:,note:"([^"]+)")?(?:,tm:([0-9.]+))?\s*\}"#,
            )?,
            consult: pattern(
                r#"\{\s*c:"([^"]+)",\s*d:"([^"]+)",\s*ih:([0-9.]+),\s*oh:([0-9.]+)(,on:true)?\s*\}"#,
            )?,
            candidate: pattern(r#"\{\s*(?:id|c):|\[""#)?,
        })
    }
}

fn pattern(re: &str) -> QuoteResult<Regex> {
    Regex::new(re).map_err(|e| QuoteError::Parse(format!("Regex error: {}", e)))
}

/// Read and extract a rates source file.
pub fn parse_rates_file(path: &Path) -> QuoteResult<RateBook> {
    let text = std::fs::read_to_string(path)?;
    parse_rates(&text)
}

/// Extract all records and constants from the rates source text.
pub fn parse_rates(text: &str) -> QuoteResult<RateBook> {
    let patterns = Patterns::compile()?;
    let constants = extract_constants(&patterns, text)?;

    let mut procedures = Vec::new();
    let mut plans = Vec::new();
    let mut modifiers = Vec::new();
    let mut consults = Vec::new();
    let mut skipped_lines = 0usize;

    for line in text.lines() {
        let mut matched = 0usize;
        let mut malformed = false;

        for caps in patterns.plan.captures_iter(line) {
            match plan_from(&caps) {
                Some(plan) => {
                    plans.push(plan);
                    matched += 1;
                }
                None => malformed = true,
            }
        }
        for caps in patterns.procedure.captures_iter(line) {
            match procedure_from(&caps) {
                Some(proc_record) => {
                    procedures.push(proc_record);
                    matched += 1;
                }
                None => malformed = true,
            }
        }
        for caps in patterns.modifier.captures_iter(line) {
            match modifier_from(&caps) {
                Some(modifier) => {
                    modifiers.push(modifier);
                    matched += 1;
                }
                None => malformed = true,
            }
        }
        for caps in patterns.consult.captures_iter(line) {
            match consult_from(&caps) {
                Some(consult) => {
                    consults.push(consult);
                    matched += 1;
                }
                None => malformed = true,
            }
        }

        if malformed || (matched == 0 && patterns.candidate.is_match(line)) {
            skipped_lines += 1;
        }
    }

    Ok(RateBook {
        constants,
        procedures,
        plans,
        modifiers,
        consults,
        skipped_lines,
    })
}

fn extract_constants(patterns: &Patterns, text: &str) -> QuoteResult<Constants> {
    let mut found: HashMap<String, f64> = HashMap::new();
    for caps in patterns.constant.captures_iter(text) {
        if let (Some(name), Some(value)) = (caps.get(1), num(&caps, 2)) {
            found.insert(name.as_str().to_string(), value);
        }
    }

    for name in REQUIRED_CONSTANTS {
        if !found.contains_key(name) {
            return Err(QuoteError::MissingConstant(name.to_string()));
        }
    }

    Ok(Constants {
        rcf_an: found["RCF_AN"],
        rcf_cl: found["RCF_CL"],
        vat: found["VAT"],
    })
}

fn plan_from(caps: &Captures) -> Option<RatePlan> {
    Some(RatePlan {
        id: text(caps, 1)?,
        label: text(caps, 2)?,
        multiplier: num(caps, 3)?,
        location: Location::parse(caps.get(4)?.as_str())?,
    })
}

fn procedure_from(caps: &Captures) -> Option<Procedure> {
    Some(Procedure {
        code: text(caps, 1)?,
        description: text(caps, 2)?,
        rvu: num(caps, 3)?,
        base_amount: num(caps, 4)?,
        specialty_index: caps.get(5)?.as_str().parse().ok()?,
    })
}

fn modifier_from(caps: &Captures) -> Option<Modifier> {
    Some(Modifier {
        code: text(caps, 1)?,
        description: text(caps, 2)?,
        units: num(caps, 3)?,
        unit_type: UnitType::parse(caps.get(4)?.as_str()),
        category: text(caps, 5)?,
        note: text(caps, 6),
        time_multiplier: num(caps, 7),
    })
}

fn consult_from(caps: &Captures) -> Option<ConsultFee> {
    Some(ConsultFee {
        code: text(caps, 1)?,
        description: text(caps, 2)?,
        in_hospital: num(caps, 3)?,
        out_of_hospital: num(caps, 4)?,
        on_call: caps.get(5).is_some(),
    })
}

fn text(caps: &Captures, index: usize) -> Option<String> {
    caps.get(index).map(|m| m.as_str().to_string())
}

fn num(caps: &Captures, index: usize) -> Option<f64> {
    caps.get(index)?.as_str().parse().ok()
}

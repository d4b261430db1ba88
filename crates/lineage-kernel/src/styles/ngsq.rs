//! NGSQ (National Genealogical Society Quarterly) style.
//!
//! Every descendant gets the next value of a running counter, followed by
//! the Roman numeral of their birth position: `1 2i`, `1 2i 3i`, ... The
//! counter belongs to the style instance and covers one generation run;
//! [`NumberingStyle::reset`] starts it over.

use crate::error::StyleError;
use crate::params::NumberingParameters;
use crate::style::NumberingStyle;

pub const ID: &str = "ngsq";

const ROOT_COUNTER: u32 = 1;

const ONES: [&str; 10] = ["", "i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix"];

/// Lowercase Roman numeral for 1..=39.
pub fn to_roman(n: u32) -> Option<String> {
    if !(1..40).contains(&n) {
        return None;
    }
    let mut numeral = "x".repeat((n / 10) as usize);
    numeral.push_str(ONES[(n % 10) as usize]);
    Some(numeral)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ngsq {
    counter: u32,
}

impl Default for Ngsq {
    fn default() -> Self {
        Self {
            counter: ROOT_COUNTER,
        }
    }
}

impl Ngsq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last counter value handed out (1 before any descendant).
    pub fn counter(&self) -> u32 {
        self.counter
    }
}

impl NumberingStyle for Ngsq {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "NGSQ Style"
    }

    fn descendant_number(
        &mut self,
        params: Option<&NumberingParameters>,
    ) -> Result<String, StyleError> {
        let Some(params) = params else {
            return Ok(ROOT_COUNTER.to_string());
        };
        let parent = params
            .parent_label
            .as_deref()
            .ok_or(StyleError::MissingParentLabel { style: ID })?;
        let numeral = to_roman(params.nth_child).ok_or(StyleError::OrdinalOutOfRange {
            style: ID,
            ordinal: params.nth_child,
        })?;

        self.counter += 1;
        Ok(format!("{parent} {}{numeral}", self.counter))
    }

    fn reset(&mut self) {
        self.counter = ROOT_COUNTER;
    }
}

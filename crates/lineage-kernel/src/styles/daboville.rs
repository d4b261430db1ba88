//! d'Aboville numbering.
//!
//! The root is `1`; each child appends its ordinal to the parent's label,
//! separated by a period. `1.2.10` is the tenth child of the second child
//! of the root. Period frequency, letters for 10+ children and spouse
//! letters are configurable.

use super::{capital_letter, lowercase_letter};
use crate::error::StyleError;
use crate::parameter::{Choice, ParameterDescriptor, ParameterKind, ParameterValue};
use crate::params::NumberingParameters;
use crate::style::NumberingStyle;

pub const ID: &str = "daboville";

pub mod param {
    /// Number spouses as `<label>a`, `<label>b`, ...
    pub const INCLUDE_SPOUSES: &str = "includeSpouses";
    /// How the 10th and later children are numbered.
    pub const CHILDREN_NUMBER_AFTER_10: &str = "childrenNumberAfter10";
    /// Always put a period after the first number.
    pub const DOT_AFTER_FIRST_NUMBER: &str = "dotAfterFirstNumber";
    /// Put a period after every Nth number.
    pub const DOT_FOR_EACH_N_NUMBERS: &str = "dotForEachNNumbers";
}

const NUMBERS: &str = "10";
const LETTERS: &str = "A";

const AFTER_10_CHOICES: &[Choice] = &[
    Choice::new(NUMBERS, "Numbers (... 8, 9, 10, 11, ...)"),
    Choice::new(LETTERS, "Capital letters (... 8, 9, A, B, ...)"),
];

const DESCRIPTORS: &[ParameterDescriptor] = &[
    ParameterDescriptor::new(
        param::INCLUDE_SPOUSES,
        "Include spouses (a, b, c, ...)",
        ParameterKind::Boolean,
    )
    .with_description("Includes spouses as separate entries."),
    ParameterDescriptor::new(
        param::CHILDREN_NUMBER_AFTER_10,
        "Child numbering after 9",
        ParameterKind::SingleChoice,
    )
    .with_description("Sets how 10+ children are numbered.")
    .with_choices(AFTER_10_CHOICES),
    ParameterDescriptor::new(
        param::DOT_AFTER_FIRST_NUMBER,
        "Place a period after first number",
        ParameterKind::Boolean,
    )
    .with_description("Always places a separator period after the first number."),
    ParameterDescriptor::new(
        param::DOT_FOR_EACH_N_NUMBERS,
        "Place a period after each Nth number",
        ParameterKind::Integer,
    )
    .with_description(
        "Sets how frequently a separator period is placed. Capital letters for 10+ \
         children keep labels readable when this is greater than 1.",
    )
    .with_min(1.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChildOrdinal {
    /// `... 9, 10, 11`
    #[default]
    Numbers,
    /// `... 9, A, B`
    Letters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DAboville {
    include_spouses: bool,
    after_nine: ChildOrdinal,
    dot_after_first: bool,
    dot_every: u32,
}

impl Default for DAboville {
    fn default() -> Self {
        Self {
            include_spouses: false,
            after_nine: ChildOrdinal::Numbers,
            dot_after_first: false,
            dot_every: 1,
        }
    }
}

impl DAboville {
    pub fn new() -> Self {
        Self::default()
    }

    fn ordinal(&self, nth_child: u32) -> Result<String, StyleError> {
        if nth_child == 0 {
            return Err(self.out_of_range(nth_child));
        }
        match self.after_nine {
            ChildOrdinal::Letters if nth_child >= 10 => capital_letter(nth_child - 10)
                .map(String::from)
                .ok_or_else(|| self.out_of_range(nth_child)),
            _ => Ok(nth_child.to_string()),
        }
    }

    /// Whether the number of `generation` is preceded by a period.
    fn places_period(&self, generation: u32) -> bool {
        let every = self.dot_every.max(1);
        if self.dot_after_first {
            generation == 1 || generation.saturating_sub(1) % every == 0
        } else {
            generation % every == 0
        }
    }

    fn out_of_range(&self, ordinal: u32) -> StyleError {
        StyleError::OrdinalOutOfRange { style: ID, ordinal }
    }

    fn mismatch(&self, key: &str, expected: &'static str) -> StyleError {
        StyleError::KindMismatch {
            style: ID,
            key: key.to_string(),
            expected,
        }
    }
}

impl NumberingStyle for DAboville {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "d'Aboville"
    }

    fn parameter_descriptors(&self) -> &'static [ParameterDescriptor] {
        DESCRIPTORS
    }

    fn apply_parameter(&mut self, key: &str, value: ParameterValue) -> Result<(), StyleError> {
        match key {
            param::INCLUDE_SPOUSES => {
                self.include_spouses = value.as_bool().ok_or_else(|| self.mismatch(key, "bool"))?;
            }
            param::DOT_AFTER_FIRST_NUMBER => {
                self.dot_after_first = value.as_bool().ok_or_else(|| self.mismatch(key, "bool"))?;
            }
            param::CHILDREN_NUMBER_AFTER_10 => {
                self.after_nine = match value.as_choice() {
                    Some(NUMBERS) => ChildOrdinal::Numbers,
                    Some(LETTERS) => ChildOrdinal::Letters,
                    _ => return Err(self.mismatch(key, "a child numbering choice")),
                };
            }
            param::DOT_FOR_EACH_N_NUMBERS => {
                self.dot_every = value
                    .as_integer()
                    .and_then(|n| u32::try_from(n).ok())
                    .filter(|n| *n >= 1)
                    .ok_or_else(|| self.mismatch(key, "a positive integer"))?;
            }
            _ => {
                return Err(StyleError::NoSetter {
                    style: ID,
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    fn parameter(&self, key: &str) -> Option<ParameterValue> {
        match key {
            param::INCLUDE_SPOUSES => Some(ParameterValue::Bool(self.include_spouses)),
            param::DOT_AFTER_FIRST_NUMBER => Some(ParameterValue::Bool(self.dot_after_first)),
            param::CHILDREN_NUMBER_AFTER_10 => Some(ParameterValue::Choice(
                match self.after_nine {
                    ChildOrdinal::Numbers => NUMBERS,
                    ChildOrdinal::Letters => LETTERS,
                }
                .to_string(),
            )),
            param::DOT_FOR_EACH_N_NUMBERS => {
                Some(ParameterValue::Integer(i64::from(self.dot_every)))
            }
            _ => None,
        }
    }

    fn descendant_number(
        &mut self,
        params: Option<&NumberingParameters>,
    ) -> Result<String, StyleError> {
        let Some(params) = params else {
            return Ok("1".to_string());
        };

        let ordinal = self.ordinal(params.nth_child)?;
        let mut label = params.parent_label().to_string();
        if self.places_period(params.generation()) {
            label.push('.');
        }
        label.push_str(&ordinal);
        Ok(label)
    }

    fn spouse_number(
        &self,
        other_label: &str,
        nth_marriage: u32,
    ) -> Result<Option<String>, StyleError> {
        if !self.include_spouses {
            return Ok(None);
        }
        let letter = nth_marriage
            .checked_sub(1)
            .and_then(lowercase_letter)
            .ok_or_else(|| self.out_of_range(nth_marriage))?;
        Ok(Some(format!("{other_label}{letter}")))
    }
}

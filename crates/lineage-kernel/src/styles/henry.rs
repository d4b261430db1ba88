//! Henry numbering.
//!
//! Labels carry no separators: the child ordinal is appended to the
//! parent's label with all periods removed, followed by a trailing period.
//! Ordinals 10 and up are either `X`, `A`, `B`, ... (original Henry) or
//! `(10)`, `(11)`, ... (modified Henry).

use super::capital_letter;
use crate::error::StyleError;
use crate::parameter::{Choice, ParameterDescriptor, ParameterKind, ParameterValue};
use crate::params::NumberingParameters;
use crate::style::NumberingStyle;

pub const ID: &str = "henry";

pub mod param {
    /// Original (`X`, `A`, `B`, ...) or modified (`(10)`, `(11)`, ...).
    pub const CHILDREN_NUMBER_AFTER_9: &str = "childrenNumberAfter9";
}

const ORIGINAL: &str = "original";
const MODIFIED: &str = "modified";

const AFTER_9_CHOICES: &[Choice] = &[
    Choice::new(ORIGINAL, "Original Henry (... 9, X, A, B, ...)"),
    Choice::new(MODIFIED, "Modified Henry (... 9, (10), (11), ...)"),
];

const DESCRIPTORS: &[ParameterDescriptor] = &[ParameterDescriptor::new(
    param::CHILDREN_NUMBER_AFTER_9,
    "Child numbering after 9",
    ParameterKind::SingleChoice,
)
.with_description("Sets how 10+ children are numbered.")
.with_choices(AFTER_9_CHOICES)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HenryMode {
    #[default]
    Original,
    Modified,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Henry {
    mode: HenryMode,
}

impl Henry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: HenryMode) -> Self {
        Self { mode }
    }

    fn ordinal(&self, nth_child: u32) -> Result<String, StyleError> {
        let out_of_range = || StyleError::OrdinalOutOfRange {
            style: ID,
            ordinal: nth_child,
        };
        match (nth_child, self.mode) {
            (0, _) => Err(out_of_range()),
            (1..=9, _) => Ok(nth_child.to_string()),
            (_, HenryMode::Modified) => Ok(format!("({nth_child})")),
            (10, HenryMode::Original) => Ok("X".to_string()),
            (_, HenryMode::Original) => capital_letter(nth_child - 11)
                .map(String::from)
                .ok_or_else(out_of_range),
        }
    }
}

impl NumberingStyle for Henry {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Henry System"
    }

    fn parameter_descriptors(&self) -> &'static [ParameterDescriptor] {
        DESCRIPTORS
    }

    fn apply_parameter(&mut self, key: &str, value: ParameterValue) -> Result<(), StyleError> {
        if key != param::CHILDREN_NUMBER_AFTER_9 {
            return Err(StyleError::NoSetter {
                style: ID,
                key: key.to_string(),
            });
        }
        self.mode = match value.as_choice() {
            Some(ORIGINAL) => HenryMode::Original,
            Some(MODIFIED) => HenryMode::Modified,
            _ => {
                return Err(StyleError::KindMismatch {
                    style: ID,
                    key: key.to_string(),
                    expected: "a Henry mode choice",
                });
            }
        };
        Ok(())
    }

    fn parameter(&self, key: &str) -> Option<ParameterValue> {
        (key == param::CHILDREN_NUMBER_AFTER_9).then(|| {
            ParameterValue::Choice(
                match self.mode {
                    HenryMode::Original => ORIGINAL,
                    HenryMode::Modified => MODIFIED,
                }
                .to_string(),
            )
        })
    }

    fn descendant_number(
        &mut self,
        params: Option<&NumberingParameters>,
    ) -> Result<String, StyleError> {
        let Some(params) = params else {
            return Ok("1.".to_string());
        };
        let parent = params
            .parent_label
            .as_deref()
            .ok_or(StyleError::MissingParentLabel { style: ID })?;

        let mut label: String = parent.chars().filter(|c| *c != '.').collect();
        label.push_str(&self.ordinal(params.nth_child)?);
        label.push('.');
        Ok(label)
    }
}

//! Custom style parameters: static descriptors and raw-value coercion.
//!
//! Every style declares its options once as a slice of
//! [`ParameterDescriptor`]s. Raw values arrive from an untrusted caller as
//! JSON values; [`ParameterDescriptor::coerce`] is the only way to turn one
//! into a typed [`ParameterValue`].

use crate::error::LineageError;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// Input kind of a custom parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParameterKind {
    Text,
    TextMultiline,
    Dropdown,
    SingleChoice,
    MultiChoice,
    #[serde(rename = "bool")]
    Boolean,
    Integer,
    Real,
}

impl ParameterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::TextMultiline => "text-multiline",
            Self::Dropdown => "dropdown",
            Self::SingleChoice => "single-choice",
            Self::MultiChoice => "multi-choice",
            Self::Boolean => "bool",
            Self::Integer => "integer",
            Self::Real => "real",
        }
    }

    pub fn is_choice(self) -> bool {
        matches!(self, Self::Dropdown | Self::SingleChoice | Self::MultiChoice)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Real)
    }
}

impl std::fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable value of a choice parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub display: &'static str,
}

impl Choice {
    pub const fn new(value: &'static str, display: &'static str) -> Self {
        Self { value, display }
    }
}

/// Static description of one custom parameter of a style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    pub key: &'static str,
    pub display_name: &'static str,
    pub kind: ParameterKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "no_choices")]
    pub choices: &'static [Choice],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<&'static str>,
}

impl ParameterDescriptor {
    pub const fn new(key: &'static str, display_name: &'static str, kind: ParameterKind) -> Self {
        Self {
            key,
            display_name,
            kind,
            description: None,
            choices: &[],
            min: None,
            max: None,
            pattern: None,
        }
    }

    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub const fn with_choices(mut self, choices: &'static [Choice]) -> Self {
        self.choices = choices;
        self
    }

    pub const fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub const fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub const fn with_pattern(mut self, pattern: &'static str) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Validate a raw value and convert it to the descriptor's kind.
    pub fn coerce(&self, raw: &Value) -> Result<ParameterValue, LineageError> {
        match self.kind {
            ParameterKind::Boolean => truthy(raw)
                .map(ParameterValue::Bool)
                .ok_or_else(|| self.invalid("expected a boolean")),
            ParameterKind::Integer => {
                let value = parse_integer(raw).ok_or_else(|| self.invalid("expected an integer"))?;
                self.check_bounds(value as f64)?;
                Ok(ParameterValue::Integer(value))
            }
            ParameterKind::Real => {
                let value = parse_real(raw).ok_or_else(|| self.invalid("expected a number"))?;
                self.check_bounds(value)?;
                Ok(ParameterValue::Real(value))
            }
            ParameterKind::Dropdown | ParameterKind::SingleChoice => {
                let value = scalar_text(raw).ok_or_else(|| self.invalid("expected a choice"))?;
                self.check_choice(&value)?;
                Ok(ParameterValue::Choice(value))
            }
            ParameterKind::MultiChoice => {
                let values: Vec<String> = match raw {
                    Value::Array(items) => items
                        .iter()
                        .map(|item| {
                            scalar_text(item).ok_or_else(|| self.invalid("expected a list of choices"))
                        })
                        .collect::<Result<_, _>>()?,
                    other => vec![
                        scalar_text(other)
                            .ok_or_else(|| self.invalid("expected a list of choices"))?,
                    ],
                };
                for value in &values {
                    self.check_choice(value)?;
                }
                Ok(ParameterValue::Choices(values))
            }
            ParameterKind::Text | ParameterKind::TextMultiline => {
                let value = scalar_text(raw).ok_or_else(|| self.invalid("expected text"))?;
                if let Some(pattern) = self.pattern {
                    let regex = Regex::new(pattern).map_err(|e| LineageError::InvalidPattern {
                        key: self.key.to_string(),
                        reason: e.to_string(),
                    })?;
                    if !regex.is_match(&value) {
                        return Err(self.invalid(&format!("`{value}` does not match `{pattern}`")));
                    }
                }
                Ok(ParameterValue::Text(value))
            }
        }
    }

    fn check_bounds(&self, value: f64) -> Result<(), LineageError> {
        if let Some(min) = self.min
            && value < min
        {
            return Err(self.invalid(&format!(
                "{value} is smaller than the required minimum value: {min}"
            )));
        }
        if let Some(max) = self.max
            && value > max
        {
            return Err(self.invalid(&format!(
                "{value} is greater than the allowed maximum value: {max}"
            )));
        }
        Ok(())
    }

    fn check_choice(&self, value: &str) -> Result<(), LineageError> {
        if self.choices.iter().any(|choice| choice.value == value) {
            Ok(())
        } else {
            Err(self.invalid(&format!("invalid choice: {value}")))
        }
    }

    fn invalid(&self, reason: &str) -> LineageError {
        LineageError::InvalidParameterValue {
            key: self.key.to_string(),
            reason: reason.to_string(),
        }
    }
}

fn no_choices(choices: &&'static [Choice]) -> bool {
    choices.is_empty()
}

/// A validated parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Integer(i64),
    Real(f64),
    Choice(String),
    Choices(Vec<String>),
    Text(String),
}

impl ParameterValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<&str> {
        match self {
            Self::Choice(value) => Some(value),
            _ => None,
        }
    }
}

/// Truthy parse: `true/1/yes/on` are true, other scalars false.
fn truthy(raw: &Value) -> Option<bool> {
    match raw {
        Value::Null => Some(false),
        Value::Bool(value) => Some(*value),
        Value::Number(number) => Some(number.as_f64().is_some_and(|n| n != 0.0)),
        Value::String(text) => Some(matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_integer(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64)
                .map(|n| n as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn parse_real(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

fn scalar_text(raw: &Value) -> Option<String> {
    match raw {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(value) => Some(value.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CHOICES: &[Choice] = &[Choice::new("10", "Numbers"), Choice::new("A", "Letters")];

    fn reason(err: LineageError) -> String {
        match err {
            LineageError::InvalidParameterValue { reason, .. } => reason,
            other => panic!("expected invalid value, got {other:?}"),
        }
    }

    #[test]
    fn boolean_uses_truthy_parse() {
        let desc = ParameterDescriptor::new("flag", "Flag", ParameterKind::Boolean);
        for raw in [json!(true), json!(1), json!("1"), json!(" Yes "), json!("on")] {
            assert_eq!(desc.coerce(&raw).unwrap(), ParameterValue::Bool(true), "{raw}");
        }
        for raw in [json!(false), json!(0), json!("0"), json!("off"), json!(null)] {
            assert_eq!(desc.coerce(&raw).unwrap(), ParameterValue::Bool(false), "{raw}");
        }
        assert!(desc.coerce(&json!([1])).is_err());
    }

    #[test]
    fn integer_enforces_bounds() {
        let desc = ParameterDescriptor::new("n", "N", ParameterKind::Integer)
            .with_min(1.0)
            .with_max(5.0);
        assert_eq!(desc.coerce(&json!("3")).unwrap(), ParameterValue::Integer(3));
        assert_eq!(desc.coerce(&json!(4.0)).unwrap(), ParameterValue::Integer(4));
        assert!(reason(desc.coerce(&json!(0)).unwrap_err()).contains("minimum"));
        assert!(reason(desc.coerce(&json!(6)).unwrap_err()).contains("maximum"));
        assert!(reason(desc.coerce(&json!("two")).unwrap_err()).contains("integer"));
        assert!(desc.coerce(&json!(2.5)).is_err());
    }

    #[test]
    fn real_accepts_numeric_text() {
        let desc = ParameterDescriptor::new("r", "R", ParameterKind::Real).with_min(0.5);
        assert_eq!(desc.coerce(&json!("0.75")).unwrap(), ParameterValue::Real(0.75));
        assert!(desc.coerce(&json!(0.25)).is_err());
        assert!(desc.coerce(&json!("NaN")).is_err());
    }

    #[test]
    fn choices_are_checked_against_declared_values() {
        let single = ParameterDescriptor::new("c", "C", ParameterKind::SingleChoice)
            .with_choices(CHOICES);
        assert_eq!(
            single.coerce(&json!("A")).unwrap(),
            ParameterValue::Choice("A".to_string())
        );
        assert_eq!(
            single.coerce(&json!(10)).unwrap(),
            ParameterValue::Choice("10".to_string())
        );
        assert!(reason(single.coerce(&json!("B")).unwrap_err()).contains("invalid choice"));

        let multi =
            ParameterDescriptor::new("m", "M", ParameterKind::MultiChoice).with_choices(CHOICES);
        assert_eq!(
            multi.coerce(&json!(["A", "10"])).unwrap(),
            ParameterValue::Choices(vec!["A".to_string(), "10".to_string()])
        );
        assert!(multi.coerce(&json!(["A", "Z"])).is_err());
    }

    #[test]
    fn text_honours_pattern() {
        let desc = ParameterDescriptor::new("sep", "Separator", ParameterKind::Text)
            .with_pattern(r"^[.\-/]$");
        assert_eq!(
            desc.coerce(&json!("-")).unwrap(),
            ParameterValue::Text("-".to_string())
        );
        assert!(reason(desc.coerce(&json!("--")).unwrap_err()).contains("does not match"));

        let broken = ParameterDescriptor::new("bad", "Bad", ParameterKind::Text).with_pattern("(");
        assert!(matches!(
            broken.coerce(&json!("x")),
            Err(LineageError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn descriptor_serializes_only_declared_fields() {
        let desc = ParameterDescriptor::new("n", "N", ParameterKind::Integer).with_min(1.0);
        let json = serde_json::to_value(desc).unwrap();
        assert_eq!(
            json,
            json!({"key": "n", "displayName": "N", "kind": "integer", "min": 1.0})
        );
    }
}

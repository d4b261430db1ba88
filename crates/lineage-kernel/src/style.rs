//! The numbering style contract.
//!
//! A style maps a traversal position to a label. Styles own a typed
//! configuration struct; raw caller values reach it only through the
//! descriptor-driven [`NumberingStyle::set_parameters`], which validates
//! each key and then dispatches to the style's typed setter.

use crate::error::{LineageError, StyleError};
use crate::parameter::{ParameterDescriptor, ParameterValue};
use crate::params::NumberingParameters;
use serde_json::{Map, Value};

pub trait NumberingStyle: std::fmt::Debug {
    /// Stable identifier used by the registry.
    fn id(&self) -> &'static str;

    /// User-friendly name.
    fn name(&self) -> &'static str;

    /// Custom parameters, in display order. Empty when the style has none.
    fn parameter_descriptors(&self) -> &'static [ParameterDescriptor] {
        &[]
    }

    /// Store an already validated value into the typed configuration.
    fn apply_parameter(&mut self, key: &str, _value: ParameterValue) -> Result<(), StyleError> {
        Err(StyleError::NoSetter {
            style: self.id(),
            key: key.to_string(),
        })
    }

    /// Current value of a declared parameter.
    fn parameter(&self, _key: &str) -> Option<ParameterValue> {
        None
    }

    /// Label of a descendant. `None` asks for the root ancestor's label.
    fn descendant_number(
        &mut self,
        params: Option<&NumberingParameters>,
    ) -> Result<String, StyleError>;

    /// Label of the `nth_marriage` spouse of the person labelled
    /// `other_label`. `Ok(None)` means the style does not number spouses.
    fn spouse_number(
        &self,
        _other_label: &str,
        _nth_marriage: u32,
    ) -> Result<Option<String>, StyleError> {
        Ok(None)
    }

    /// Clear state scoped to one generation run.
    fn reset(&mut self) {}

    fn descriptor(&self, key: &str) -> Option<&'static ParameterDescriptor> {
        self.parameter_descriptors()
            .iter()
            .find(|descriptor| descriptor.key == key)
    }

    /// Validate and store one raw value. An empty key is ignored.
    fn set_parameter(&mut self, key: &str, raw: &Value) -> Result<(), LineageError> {
        if key.is_empty() {
            return Ok(());
        }
        let descriptor = self
            .descriptor(key)
            .ok_or_else(|| LineageError::InvalidParameterName {
                style: self.id().to_string(),
                key: key.to_string(),
            })?;
        let value = descriptor.coerce(raw)?;
        self.apply_parameter(key, value)?;
        Ok(())
    }

    /// Validate and store every entry of `raw`, stopping at the first bad
    /// one. Keys processed before the failure stay applied.
    fn set_parameters(&mut self, raw: &Map<String, Value>) -> Result<(), LineageError> {
        for (key, value) in raw {
            self.set_parameter(key, value)?;
        }
        Ok(())
    }

    /// Current value of a declared parameter; unknown keys are an error.
    fn custom_parameter(&self, key: &str) -> Result<Option<ParameterValue>, LineageError> {
        if self.descriptor(key).is_none() {
            return Err(LineageError::InvalidParameterName {
                style: self.id().to_string(),
                key: key.to_string(),
            });
        }
        Ok(self.parameter(key))
    }
}

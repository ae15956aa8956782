//! Strength policy: the allowed range, the default, and how values print.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Most fractional digits a policy may print; past this `f64` has nothing
/// left to show.
pub const MAX_PRECISION: usize = 17;

/// How strengths are bounded, defaulted, quantized, and rendered.
///
/// The default policy is the one every host expects: strengths live in
/// `[0.0, 2.0]`, unknown labels get `1.0`, sliders move in `0.1` steps and
/// output carries exactly one fractional digit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthPolicy {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// Fractional digits in formatted output.
    pub precision: usize,
    /// Slider quantization step.
    pub step: f64,
}

impl Default for StrengthPolicy {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 2.0,
            default: 1.0,
            precision: 1,
            step: 0.1,
        }
    }
}

impl StrengthPolicy {
    /// Clamp a value into `[min, max]`. NaN maps to the default.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default;
        }
        let clamped = if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        };
        // Normalizes -0.0 so it never prints with a sign.
        clamped + 0.0
    }

    /// Clamp and render with `precision` fractional digits, capped at
    /// [`MAX_PRECISION`].
    pub fn format(&self, value: f64) -> String {
        let precision = self.precision.min(MAX_PRECISION);
        format!("{:.*}", precision, self.clamp(value))
    }

    /// Snap a value to the nearest slider step, staying in range.
    pub fn quantize(&self, value: f64) -> f64 {
        let clamped = self.clamp(value);
        let snapped = self.clamp((clamped / self.step).round() * self.step);
        (snapped * 100.0).round() / 100.0
    }

    /// Check the policy is internally consistent.
    pub fn validate(&self) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.default.is_finite()) {
            return Err(Error::InvalidPolicy(
                "min, max and default must be finite".into(),
            ));
        }
        if self.min > self.max {
            return Err(Error::InvalidPolicy(format!(
                "min ({}) is greater than max ({})",
                self.min, self.max
            )));
        }
        if self.default < self.min || self.default > self.max {
            return Err(Error::InvalidPolicy(format!(
                "default ({}) is outside [{}, {}]",
                self.default, self.min, self.max
            )));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(Error::InvalidPolicy("step must be a positive number".into()));
        }
        if self.precision > MAX_PRECISION {
            return Err(Error::InvalidPolicy(format!(
                "precision ({}) exceeds {MAX_PRECISION}",
                self.precision
            )));
        }
        Ok(())
    }
}

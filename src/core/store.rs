use tracing::debug;

use super::engine::compute_comparison_table;
use super::types::{AUM_LEVELS, ComparisonRow, ParameterField, ParameterSet};

/// Parses the longest leading numeric prefix of `raw`, the way a browser
/// number field is read. Anything unparseable or non-finite becomes 0.
pub fn coerce_numeric(raw: &str) -> f64 {
    let text = raw.trim_start();
    let end = numeric_prefix_len(text.as_bytes());
    if end == 0 {
        return 0.0;
    }
    match text[..end].parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Length of the leading `[+-]digits[.digits][(e|E)[+-]digits]` run.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_digits = digits_from(i);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = digits_from(i + 1);
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = digits_from(j);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }
    i
}

#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    parameters: ParameterSet,
}

impl ParameterStore {
    pub fn new(parameters: ParameterSet) -> Self {
        Self {
            parameters: parameters.sanitized(),
        }
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    pub fn update(&mut self, field: ParameterField, raw: &str) -> f64 {
        let value = coerce_numeric(raw);
        self.set(field, value);
        value
    }

    pub fn set(&mut self, field: ParameterField, value: f64) {
        self.parameters.set(field, value);
        debug!(field = %field, value = self.parameters.get(field), "parameter updated");
    }

    pub fn reset(&mut self) {
        self.parameters = ParameterSet::default();
        debug!("parameters reset to defaults");
    }

    pub fn comparison(&self) -> Vec<ComparisonRow> {
        let rows = compute_comparison_table(&self.parameters, &AUM_LEVELS);
        debug!(rows = rows.len(), "comparison recomputed");
        rows
    }
}

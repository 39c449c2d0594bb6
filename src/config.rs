use std::fs;
use std::path::Path;

use tracing::info;

use crate::core::{ParameterField, ParameterSet, ParameterStore};
use crate::error::PartnerModelError;

/// A single `field=value` override, kept as raw text until it reaches the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub field: ParameterField,
    pub raw: String,
}

pub fn parse_assignment(text: &str) -> Result<Assignment, PartnerModelError> {
    let (key, raw) = text
        .split_once('=')
        .ok_or_else(|| PartnerModelError::MalformedAssignment(text.to_string()))?;
    Ok(Assignment {
        field: key.parse()?,
        raw: raw.to_string(),
    })
}

/// Missing keys in the file keep their defaults.
pub fn load_parameters(path: &Path) -> Result<ParameterSet, PartnerModelError> {
    let text = fs::read_to_string(path).map_err(|source| PartnerModelError::ReadParameters {
        path: path.to_path_buf(),
        source,
    })?;
    let parameters = serde_json::from_str::<ParameterSet>(&text).map_err(|source| {
        PartnerModelError::ParseParameters {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!(path = %path.display(), "loaded parameters file");
    Ok(parameters.sanitized())
}

pub fn build_store(
    params_file: Option<&Path>,
    assignments: &[Assignment],
) -> Result<ParameterStore, PartnerModelError> {
    let base = match params_file {
        Some(path) => load_parameters(path)?,
        None => ParameterSet::default(),
    };
    let mut store = ParameterStore::new(base);
    for assignment in assignments {
        store.update(assignment.field, &assignment.raw);
    }
    Ok(store)
}

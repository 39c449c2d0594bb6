use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PartnerModelError {
    #[error("unknown parameter field `{0}`")]
    UnknownField(String),

    #[error("expected `field=value`, got `{0}`")]
    MalformedAssignment(String),

    #[error("failed to read parameters file {}: {source}", path.display())]
    ReadParameters {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid parameters file {}: {source}", path.display())]
    ParseParameters {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

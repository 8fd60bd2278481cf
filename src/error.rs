use std::path::PathBuf;

use crate::model::BodyID;

/// Problems with the scene file. Line numbers are 1-based.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read scene file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: missing column `{column}`")]
    MissingColumn { line: usize, column: &'static str },

    #[error("line {line}: column `{column}` has bad value {value:?}")]
    BadNumber {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: column `{column}` must be non-negative, got {value}")]
    Negative {
        line: usize,
        column: &'static str,
        value: f32,
    },

    #[error("line {line}: need at least {min} {column}, got {value}")]
    TooCoarse {
        line: usize,
        column: &'static str,
        min: u32,
        value: u32,
    },

    #[error("line {line}: parent {parent:?} is not declared above this body")]
    UnknownParent { line: usize, parent: String },

    #[error("line {line}: body {name:?} is declared twice")]
    DuplicateName { line: usize, name: String },

    #[error("line {line}: unexpected trailing column {value:?}")]
    TrailingColumn { line: usize, value: String },

    #[error("scene file declares no bodies")]
    Empty,
}

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("no body with id {0:?}")]
    UnknownBody(BodyID),

    #[error("{dependent:?} can only track {parent:?} if {parent:?} is added first")]
    TrackingOrder { dependent: String, parent: String },
}

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to read texture {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode texture {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

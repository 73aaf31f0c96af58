use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::spec::SpecError;

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("{0}")]
    Spec(#[from] SpecError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Code generation error: {0}")]
    Codegen(#[from] CodegenError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Spec file not found: {}", .0.display())]
    SpecFileNotFound(PathBuf),

    #[error("Spec file is empty: {}", .0.display())]
    SpecFileEmpty(PathBuf),

    #[error("Spec file {} is not a canonical plugin spec: {source}", .path.display())]
    BadSpecFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ForgeError>;

impl warp::reject::Reject for ForgeError {}

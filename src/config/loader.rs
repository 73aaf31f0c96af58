use figment::{Figment, providers::{Format, Toml, Json, Yaml, Env}};
use crate::error::{ConfigError, Result};
use super::schema::Config;
use std::path::Path;

pub fn load_from_env_or_file() -> Result<Config> {
    let config: Config = Figment::new()
        // Try to load from various config files
        .merge(Toml::file("vstforge.toml"))
        .merge(Json::file("vstforge.json"))
        .merge(Yaml::file("vstforge.yaml"))
        .merge(Yaml::file("vstforge.yml"))
        // Override with environment variables (VSTFORGE_ prefix)
        .merge(Env::prefixed("VSTFORGE_").split("_"))
        // A bare PORT variable maps to server.port
        .merge(port_env())
        .extract()
        .map_err(|e| ConfigError::Parse(e.to_string()))?;

    validate(&config)?;

    Ok(config)
}

pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();

    let config = if path.extension().and_then(|e| e.to_str()) == Some("toml") {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("VSTFORGE_").split("_"))
            .merge(port_env())
            .extract()
    } else if path.extension().and_then(|e| e.to_str()) == Some("json") {
        Figment::new()
            .merge(Json::file(path))
            .merge(Env::prefixed("VSTFORGE_").split("_"))
            .merge(port_env())
            .extract()
    } else if matches!(path.extension().and_then(|e| e.to_str()), Some("yaml") | Some("yml")) {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("VSTFORGE_").split("_"))
            .merge(port_env())
            .extract()
    } else {
        return Err(ConfigError::Parse(
            "Unsupported config file format. Use .toml, .json, .yaml, or .yml".into()
        ).into());
    };

    let config = config.map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;

    Ok(config)
}

fn port_env() -> Env {
    Env::raw().only(&["PORT"]).map(|_| "server.port".into()).split(".")
}

pub fn validate(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        return Err(ConfigError::Validation(
            "Server port must be greater than 0".into()
        ).into());
    }

    if config.server.max_body_bytes == 0 {
        return Err(ConfigError::Validation(
            "Request body limit must be greater than 0".into()
        ).into());
    }

    if config.generator.spec_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "Generator spec path must not be empty".into()
        ).into());
    }

    if config.generator.header_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "Generator header path must not be empty".into()
        ).into());
    }

    Ok(())
}

//! Loading the environment to check.

use std::path::Path;

use testkit_env::{RawEnv, StdEnvSource};
use tracing::debug;

use crate::cli::SourceArgs;
use crate::error::{CliError, CliResult};

/// Collect the raw environment selected by the source flags.
///
/// Defaults to the process environment.
pub async fn load_raw_env(args: &SourceArgs) -> CliResult<RawEnv> {
    if let Some(path) = &args.file {
        return load_fixture(path).await;
    }
    if let Some(path) = &args.env_file {
        return load_env_file(path).await;
    }

    debug!("reading process environment");
    Ok(RawEnv::from_source(&StdEnvSource))
}

/// Human-readable name of the selected source.
pub fn describe_source(args: &SourceArgs) -> String {
    match (&args.file, &args.env_file) {
        (Some(path), _) | (None, Some(path)) => path.display().to_string(),
        (None, None) => "process environment".to_string(),
    }
}

/// Read a JSON or TOML fixture, chosen by file extension.
async fn load_fixture(path: &Path) -> CliResult<RawEnv> {
    debug!(path = %path.display(), "reading fixture");
    let content = read(path).await?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(RawEnv::from_json_str(&content)?),
        Some("toml") => Ok(RawEnv::from_toml_str(&content)?),
        _ => Err(CliError::Input(format!(
            "Unsupported fixture format (expected .json or .toml): {}",
            path.display()
        ))),
    }
}

/// Read a dotenv-style file.
async fn load_env_file(path: &Path) -> CliResult<RawEnv> {
    debug!(path = %path.display(), "reading env file");
    let content = read(path).await?;

    let vars = dotenvy::from_read_iter(content.as_bytes()).collect::<Result<Vec<_>, _>>()?;
    Ok(RawEnv::from_vars(vars))
}

async fn read(path: &Path) -> CliResult<String> {
    if !path.exists() {
        return Err(CliError::Input(format!(
            "File not found: {}",
            path.display()
        )));
    }
    Ok(tokio::fs::read_to_string(path).await?)
}

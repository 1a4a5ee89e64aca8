//! `KEY=VALUE` environment file reader

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use types::{utils::is_valid_var_name, ActorError, EnvironmentMap, Result};

/// An environment file together with the snapshot resolved from it
#[derive(Debug, Clone)]
pub struct LoadedEnv {
    /// File the variables were read from
    pub path: PathBuf,
    /// Variables exactly as found in the file
    pub file: EnvironmentMap,
    /// File variables merged over the configured defaults
    pub resolved: EnvironmentMap,
}

/// Read and parse an environment file
pub async fn read_env_file<P: AsRef<Path>>(path: P) -> Result<EnvironmentMap> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ActorError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => ActorError::NotReadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        },
    })?;

    let content = String::from_utf8(bytes).map_err(|_| ActorError::NotReadable {
        path: path.display().to_string(),
        reason: "file is not valid UTF-8".to_string(),
    })?;

    let env = parse_env(&content);
    tracing::debug!(path = %path.display(), count = env.len(), "Parsed environment file");
    Ok(env)
}

/// Read an environment file and merge it over `defaults`
pub async fn load_env<P: AsRef<Path>>(path: P, defaults: &EnvironmentMap) -> Result<LoadedEnv> {
    let path = path.as_ref();
    let file = read_env_file(path).await?;
    let resolved = file.merged_over(defaults);

    Ok(LoadedEnv {
        path: path.to_path_buf(),
        file,
        resolved,
    })
}

/// Parse `KEY=VALUE` lines
///
/// Blank lines and `#` comments are ignored. Lines without `=` or with an
/// unusable key are skipped without error. Values are taken literally after
/// the first `=`, surrounding whitespace trimmed.
pub fn parse_env(content: &str) -> EnvironmentMap {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if !is_valid_var_name(key) {
                tracing::trace!(line = %line, "Skipping unparseable line");
                return None;
            }
            Some((key.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Serialize as one `KEY=VALUE` line per variable
pub fn serialize_env(env: &EnvironmentMap) -> String {
    env.iter()
        .map(|(key, value)| format!("{}={}\n", key, value))
        .collect()
}

pub mod delete;
pub mod diff;
pub mod fetch;
pub mod push;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use cms_core::schema::presets::default_languages;
use cms_core::{Record, RecordKind};
use cms_remote::config::DEFAULT_BASE_URL;
use cms_remote::{HttpRemote, RemoteConfig};

/// Connection flags shared by every command that talks to the admin API
#[derive(Debug, Args)]
pub struct RemoteArgs {
    /// Admin API base URL
    #[arg(long, env = "CMS_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Session token, sent as the `token` cookie
    #[arg(long, env = "CMS_SESSION_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

impl RemoteArgs {
    pub fn connect(&self, kind: RecordKind) -> Result<HttpRemote, Box<dyn std::error::Error>> {
        let mut config =
            RemoteConfig::new(&self.api_url)?.with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(token) = &self.token {
            config = config.with_session_token(token.as_str());
        }
        Ok(HttpRemote::new(config, kind)?)
    }
}

/// Resolve `--languages`, falling back to the panel's defaults
pub fn languages_or_default(languages: Option<Vec<String>>) -> Vec<String> {
    match languages {
        Some(list) if !list.is_empty() => list
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect(),
        _ => default_languages(),
    }
}

/// Load a record from a JSON file
pub fn read_record(path: &Path) -> Result<Record, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let record = serde_json::from_str(&text)
        .map_err(|e| format!("invalid record in {}: {}", path.display(), e))?;
    Ok(record)
}

/// Write to `output`, or to stdout when no path is given
pub fn emit(text: &str, output: Option<&PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            println!("✓ Written to {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

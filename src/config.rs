use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use directories::ProjectDirs;
use anyhow::{Context, Result};
use std::env;
use std::fs;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub commit: CommitConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BackendConfig {
    #[serde(default = "default_bcdedit")]
    pub bcdedit: String,
    #[serde(default = "default_manage_bde")]
    pub manage_bde: String,
    #[serde(default = "default_restart")]
    pub restart: String,
}

fn default_bcdedit() -> String { "bcdedit".to_string() }
fn default_manage_bde() -> String { "manage-bde".to_string() }
fn default_restart() -> String { "shutdown /r /t 0".to_string() }

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            bcdedit: default_bcdedit(),
            manage_bde: default_manage_bde(),
            restart: default_restart(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct CommitConfig {
    #[serde(default = "default_countdown_seconds")]
    pub countdown_seconds: u32,
    #[serde(default)]
    pub system_drive: Option<String>,
}

fn default_countdown_seconds() -> u32 { 5 }

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            countdown_seconds: default_countdown_seconds(),
            system_drive: None,
        }
    }
}

impl CommitConfig {
    /// The volume holding the running OS: config override, then `SystemDrive`, then `C:`.
    pub fn system_volume(&self) -> String {
        self.system_volume_or(env::var("SystemDrive").ok())
    }

    fn system_volume_or(&self, system_drive_env: Option<String>) -> String {
        let not_blank = |s: &String| !s.trim().is_empty();
        self.system_drive
            .clone()
            .filter(not_blank)
            .or_else(|| system_drive_env.filter(not_blank))
            .unwrap_or_else(|| "C:".to_string())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_refresh_pause_ms")]
    pub refresh_pause_ms: u64,
}

fn default_refresh_pause_ms() -> u64 { 1500 }

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_pause_ms: default_refresh_pause_ms(),
        }
    }
}

impl SessionConfig {
    pub fn refresh_pause(&self) -> Duration {
        Duration::from_millis(self.refresh_pause_ms)
    }
}

pub fn default_config_path() -> PathBuf {
    match ProjectDirs::from("org", "nextboot", "nextboot") {
        Some(dirs) => dirs.config_dir().join("config.toml"),
        None => PathBuf::from("config.toml"),
    }
}

/// Loads `path`, or the default location when `None`. A missing file is not an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

    if !config_path.exists() {
        log::debug!("No config at {:?}, using defaults", config_path);
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("reading {}", config_path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("parsing {}", config_path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.backend.bcdedit, "bcdedit");
        assert_eq!(config.backend.manage_bde, "manage-bde");
        assert_eq!(config.backend.restart, "shutdown /r /t 0");
        assert_eq!(config.commit.countdown_seconds, 5);
        assert_eq!(config.session.refresh_pause(), Duration::from_millis(1500));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [backend]
            bcdedit = 'C:\Windows\System32\bcdedit.exe'

            [commit]
            system_drive = "D:"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.bcdedit, r"C:\Windows\System32\bcdedit.exe");
        assert_eq!(config.backend.restart, "shutdown /r /t 0");
        assert_eq!(config.commit.countdown_seconds, 5);
        assert_eq!(config.commit.system_volume(), "D:");
    }

    #[test]
    fn blank_system_drive_override_is_ignored() {
        let commit = CommitConfig {
            countdown_seconds: 5,
            system_drive: Some("  ".to_string()),
        };
        assert_eq!(commit.system_volume_or(Some("D:".to_string())), "D:");
        assert_eq!(commit.system_volume_or(Some(" ".to_string())), "C:");
        assert_eq!(commit.system_volume_or(None), "C:");
    }

    #[test]
    fn override_beats_system_drive() {
        let commit = CommitConfig {
            countdown_seconds: 5,
            system_drive: Some("E:".to_string()),
        };
        assert_eq!(commit.system_volume_or(Some("D:".to_string())), "E:");
    }

    #[test]
    fn missing_file_is_default() {
        let config = load_config(Some(Path::new("/nonexistent/nextboot/config.toml"))).unwrap();
        assert_eq!(config.commit.countdown_seconds, 5);
    }
}

//! Bridge configuration loaded from file and environment.
//!
//! | Source | Example | Notes |
//! |--------|---------|-------|
//! | defaults | `port = 8000` | see [`BridgeConfig::default`] |
//! | file | `config/blockly-bridge.toml` | path overridable with `BLOCKLY_CONFIG` |
//! | env | `BLOCKLY_PORT=8001` | any field, prefixed `BLOCKLY_` |
//!
//! Relative paths resolve against `project_root`, except `workspace_file`, which lives
//! with the editor assets under `static_dir`.

use crate::error::BridgeResult;
use serde::{Deserialize, Serialize};
use std::net::Ipv6Addr;
use std::path::{Path, PathBuf};

/// Config file used when `BLOCKLY_CONFIG` is unset. Skipped if missing.
pub const DEFAULT_CONFIG_PATH: &str = "config/blockly-bridge.toml";
/// Environment variable naming an alternate config file.
pub const CONFIG_PATH_ENV: &str = "BLOCKLY_CONFIG";
/// Prefix for per-field environment overrides.
pub const ENV_PREFIX: &str = "BLOCKLY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Interface to bind. Loopback by default; this is a single-developer tool.
    pub host: String,
    /// HTTP port.
    pub port: u16,
    /// Project directory; the export target and other relative paths hang off it.
    pub project_root: PathBuf,
    /// Directory holding the editor's static assets (index.html, blocks.js, ...).
    pub static_dir: PathBuf,
    /// Single-slot workspace document, relative to `static_dir` unless absolute.
    pub workspace_file: PathBuf,
    /// Single-slot generated source (the firmware entry point).
    pub export_file: PathBuf,
    /// Largest accepted request body.
    pub max_body_bytes: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            project_root: PathBuf::from("."),
            static_dir: PathBuf::from("blockly"),
            workspace_file: PathBuf::from(".blockly_workspace.json"),
            export_file: PathBuf::from("src/main.cpp"),
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

impl BridgeConfig {
    /// Load config from file and environment. Precedence: env `BLOCKLY_*` > file
    /// (`BLOCKLY_CONFIG` path, else `config/blockly-bridge.toml`) > defaults.
    pub fn load() -> BridgeResult<Self> {
        let config_path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from(&config_path)
    }

    /// Same as [`BridgeConfig::load`] with an explicit file path.
    pub fn load_from(path: &Path) -> BridgeResult<Self> {
        let defaults = Self::default();
        let builder = config::Config::builder()
            .set_default("host", defaults.host.as_str())?
            .set_default("port", i64::from(defaults.port))?
            .set_default("project_root", path_value(&defaults.project_root))?
            .set_default("static_dir", path_value(&defaults.static_dir))?
            .set_default("workspace_file", path_value(&defaults.workspace_file))?
            .set_default("export_file", path_value(&defaults.export_file))?
            .set_default("max_body_bytes", defaults.max_body_bytes as i64)?;

        let builder = if path.exists() {
            tracing::debug!(path = %path.display(), "loading bridge config file");
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(built.try_deserialize()?)
    }

    /// Anchor a relative `project_root` at the current directory so reported paths are absolute.
    pub fn with_absolute_root(mut self) -> BridgeResult<Self> {
        if self.project_root.is_relative() {
            let cwd = std::env::current_dir().map_err(crate::BridgeError::io("."))?;
            self.project_root = normalize(&cwd.join(&self.project_root));
        }
        Ok(self)
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            normalize(&self.project_root.join(path))
        }
    }

    pub fn static_root(&self) -> PathBuf {
        self.resolve(&self.static_dir)
    }

    pub fn workspace_path(&self) -> PathBuf {
        if self.workspace_file.is_absolute() {
            self.workspace_file.clone()
        } else {
            normalize(&self.static_root().join(&self.workspace_file))
        }
    }

    pub fn export_path(&self) -> PathBuf {
        self.resolve(&self.export_file)
    }

    /// `host:port`, with IPv6 literals bracketed (`[::1]:8000`).
    pub fn bind_addr(&self) -> String {
        if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Drop `.` components so `./src/main.cpp` prints as `src/main.cpp`.
fn normalize(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// `load_from` reads `BLOCKLY_*`; tests that load must not overlap with one that sets them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn defaults_match_blockly_layout() {
        let config = BridgeConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
        assert_eq!(config.export_path(), PathBuf::from("src/main.cpp"));
        assert_eq!(
            config.workspace_path(),
            PathBuf::from("blockly/.blockly_workspace.json")
        );
    }

    #[test]
    fn relative_paths_resolve_against_project_root() {
        let config = BridgeConfig {
            project_root: PathBuf::from("/work/robot"),
            ..BridgeConfig::default()
        };
        assert_eq!(config.static_root(), PathBuf::from("/work/robot/blockly"));
        assert_eq!(config.export_path(), PathBuf::from("/work/robot/src/main.cpp"));
    }

    #[test]
    fn absolute_paths_are_kept() {
        let config = BridgeConfig {
            project_root: PathBuf::from("/work/robot"),
            export_file: PathBuf::from("/tmp/out.cpp"),
            ..BridgeConfig::default()
        };
        assert_eq!(config.export_path(), PathBuf::from("/tmp/out.cpp"));
    }

    #[test]
    fn absolute_root_is_anchored_at_cwd() {
        let config = BridgeConfig::default().with_absolute_root().unwrap();
        assert!(config.project_root.is_absolute());
        assert!(config.export_path().ends_with("src/main.cpp"));
    }

    #[test]
    fn workspace_follows_static_dir() {
        let config = BridgeConfig {
            project_root: PathBuf::from("/work/robot"),
            static_dir: PathBuf::from("editor"),
            ..BridgeConfig::default()
        };
        assert_eq!(
            config.workspace_path(),
            PathBuf::from("/work/robot/editor/.blockly_workspace.json")
        );

        let pinned = BridgeConfig {
            workspace_file: PathBuf::from("/var/tmp/ws.json"),
            ..config
        };
        assert_eq!(pinned.workspace_path(), PathBuf::from("/var/tmp/ws.json"));
    }

    #[test]
    fn ipv6_host_is_bracketed() {
        let v6 = BridgeConfig {
            host: "::1".to_string(),
            ..BridgeConfig::default()
        };
        assert_eq!(v6.bind_addr(), "[::1]:8000");
        assert!(v6.bind_addr().parse::<std::net::SocketAddr>().is_ok());

        let named = BridgeConfig {
            host: "localhost".to_string(),
            ..BridgeConfig::default()
        };
        assert_eq!(named.bind_addr(), "localhost:8000");
    }

    #[test]
    fn env_overrides_file_and_defaults() {
        let _guard = env_guard();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.toml");
        std::fs::write(&path, "port = 9001\nproject_root = \"/from/file\"\n").unwrap();

        std::env::set_var("BLOCKLY_PORT", "9123");
        std::env::set_var("BLOCKLY_PROJECT_ROOT", "/x/y");
        // Also seen by the env source as an unknown `config` key.
        std::env::set_var(CONFIG_PATH_ENV, "/nonexistent.toml");
        let loaded = BridgeConfig::load_from(&path);
        let via_load = BridgeConfig::load();
        std::env::remove_var("BLOCKLY_PORT");
        std::env::remove_var("BLOCKLY_PROJECT_ROOT");
        std::env::remove_var(CONFIG_PATH_ENV);

        let config = loaded.unwrap();
        assert_eq!(config.port, 9123);
        assert_eq!(config.project_root, PathBuf::from("/x/y"));
        assert_eq!(config.static_dir, PathBuf::from("blockly"));

        let config = via_load.unwrap();
        assert_eq!(config.port, 9123);
        assert_eq!(config.project_root, PathBuf::from("/x/y"));
    }

    #[test]
    fn file_overrides_defaults() {
        let _guard = env_guard();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.toml");
        std::fs::write(
            &path,
            "port = 9001\nexport_file = \"firmware/main.cpp\"\n",
        )
        .unwrap();

        let config = BridgeConfig::load_from(&path).unwrap();
        assert_eq!(config.port, 9001);
        assert_eq!(config.export_file, PathBuf::from("firmware/main.cpp"));
        assert_eq!(config.static_dir, PathBuf::from("blockly"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let _guard = env_guard();
        let dir = tempfile::tempdir().unwrap();
        let config = BridgeConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.max_body_bytes, BridgeConfig::default().max_body_bytes);
        assert_eq!(config.host, "127.0.0.1");
    }
}

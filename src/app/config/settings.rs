//! 配置文件加载

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::error::types::{PostViewerError, Result};
use crate::core::posts::fetcher::{DEFAULT_POSTS_URL, DEFAULT_TIMEOUT_SECS};
use crate::core::viewer::render::ViewMode;

/// 配置目录名
const APP_DIR: &str = "post-viewer";
/// 配置文件名
const CONFIG_FILE: &str = "config.toml";

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 帖子接口地址
    pub endpoint: String,
    /// 请求超时（秒）
    pub timeout_secs: u64,
    /// 初始视图模式
    pub view: ViewMode,
    /// 是否启用颜色
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_POSTS_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            view: ViewMode::List,
            color: true,
        }
    }
}

impl Settings {
    /// 加载配置
    ///
    /// 显式指定的文件必须存在；否则尝试默认位置，不存在时使用默认值。
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// 从 TOML 文件读取
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(path)
            .map_err(PostViewerError::Io)?;
        Self::from_toml(&text).map_err(|e| {
            anyhow::Error::from(PostViewerError::Config(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })
    }

    /// 解析 TOML 文本
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// 默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_uses_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.endpoint, DEFAULT_POSTS_URL);
    }

    #[test]
    fn partial_file_overrides_given_keys() {
        let settings = Settings::from_toml(
            r#"
            endpoint = "http://localhost:8080/posts"
            view = "card"
            "#,
        )
        .unwrap();

        assert_eq!(settings.endpoint, "http://localhost:8080/posts");
        assert_eq!(settings.view, ViewMode::Card);
        assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(settings.color);
    }

    #[test]
    fn unknown_view_is_rejected() {
        assert!(Settings::from_toml(r#"view = "grid""#).is_err());
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = 3\ncolor = false").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.timeout_secs, 3);
        assert!(!settings.color);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Settings::load(Some(&missing)).is_err());
    }
}

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::geometry::{Color, Point};
use crate::render::{
    CompositorStyle, StrokeStyle, DEFAULT_BLUR_SIGMA, DEFAULT_OUTLINE_WIDTH, MAX_BLUR_SIGMA,
};
use crate::session::{PanelLayout, DEFAULT_PANEL_GAP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "blurpaste";
const APP_CONFIG_FILE: &str = "config.json";

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) blur_sigma: f32,
    pub(crate) outline_color: [u8; 3],
    pub(crate) outline_width: u32,
    pub(crate) panel_gap: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            blur_sigma: DEFAULT_BLUR_SIGMA,
            outline_color: [255, 0, 0],
            outline_width: DEFAULT_OUTLINE_WIDTH,
            panel_gap: DEFAULT_PANEL_GAP,
        }
    }
}

impl AppConfig {
    pub(crate) fn compositor_style(&self) -> CompositorStyle {
        let blur_sigma = if self.blur_sigma > MAX_BLUR_SIGMA {
            tracing::warn!(
                blur_sigma = self.blur_sigma,
                max = MAX_BLUR_SIGMA,
                "blur_sigma too large; capping"
            );
            MAX_BLUR_SIGMA
        } else if self.blur_sigma.is_finite() && self.blur_sigma > 0.0 {
            self.blur_sigma
        } else {
            tracing::warn!(blur_sigma = self.blur_sigma, "invalid blur_sigma; using default");
            DEFAULT_BLUR_SIGMA
        };
        let [r, g, b] = self.outline_color;
        CompositorStyle {
            outline: StrokeStyle {
                color: Color::new(r, g, b),
                width: self.outline_width.max(1),
            },
            blur_sigma,
        }
    }

    pub(crate) fn panel_layout(&self) -> PanelLayout {
        let gap = if self.panel_gap.is_finite() {
            self.panel_gap
        } else {
            DEFAULT_PANEL_GAP
        };
        PanelLayout::new(Point::new(0.0, 0.0), gap)
    }
}

pub(crate) fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            APP_DIR,
            APP_CONFIG_FILE,
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/config-root/blurpaste/config.json"));
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path(APP_DIR, APP_CONFIG_FILE, None, Some(Path::new("/tmp/home")))
            .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/blurpaste/config.json"));
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path(APP_DIR, APP_CONFIG_FILE, None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn partial_config_keeps_defaults_for_missing_fields() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "blur_sigma": 3.5 }"#).expect("config should parse");
        assert_eq!(config.blur_sigma, 3.5);
        assert_eq!(config.outline_color, [255, 0, 0]);
        assert_eq!(config.outline_width, DEFAULT_OUTLINE_WIDTH);
    }

    #[test]
    fn compositor_style_clamps_invalid_values() {
        let config = AppConfig {
            blur_sigma: -2.0,
            outline_width: 0,
            ..AppConfig::default()
        };
        let style = config.compositor_style();
        assert_eq!(style.blur_sigma, DEFAULT_BLUR_SIGMA);
        assert_eq!(style.outline.width, 1);
    }

    #[test]
    fn compositor_style_caps_huge_blur_sigma() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "blur_sigma": 1e9 }"#).expect("config should parse");
        assert_eq!(config.compositor_style().blur_sigma, MAX_BLUR_SIGMA);

        let infinite = AppConfig {
            blur_sigma: f32::INFINITY,
            ..AppConfig::default()
        };
        assert_eq!(infinite.compositor_style().blur_sigma, MAX_BLUR_SIGMA);
    }

    fn unique_temp_root(label: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        std::env::temp_dir().join(format!(
            "blurpaste-config-{label}-{}-{nanos}",
            std::process::id()
        ))
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let root = unique_temp_root("missing");
        let config = load_app_config_with(Some(&root), None);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn malformed_config_file_yields_defaults() {
        let root = unique_temp_root("malformed");
        let dir = root.join(APP_DIR);
        std::fs::create_dir_all(&dir).expect("temp config dir should be created");
        std::fs::write(dir.join(APP_CONFIG_FILE), b"{ not json")
            .expect("malformed config should be written");

        let config = load_app_config_with(Some(&root), None);

        assert_eq!(config, AppConfig::default());
        let _ = std::fs::remove_dir_all(root);
    }
}

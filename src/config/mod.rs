use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::editor::tools::{StrokeStyle, DEFAULT_DRAW_COLOR};
use crate::geometry::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "gimmickboard";
const APP_CONFIG_FILE: &str = "config.json";

/// Raw `config.json` contents; every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawBoardConfig {
    #[serde(default)]
    line_width: Option<f32>,
    #[serde(default)]
    default_color: Option<String>,
}

/// Drawing settings applied to a new editor session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardConfig {
    pub stroke_style: StrokeStyle,
    pub default_color: Color,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            stroke_style: StrokeStyle::default(),
            default_color: DEFAULT_DRAW_COLOR,
        }
    }
}

impl BoardConfig {
    fn from_raw(raw: RawBoardConfig) -> Self {
        let mut config = Self::default();
        if let Some(line_width) = raw.line_width {
            config.stroke_style.set_line_width(line_width);
        }
        if let Some(text) = raw.default_color {
            match Color::from_hex(&text) {
                Some(color) => config.default_color = color,
                None => {
                    tracing::warn!(color = %text, "invalid default_color in config.json; using default")
                }
            }
        }
        config
    }

    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RawBoardConfig>(contents).map(Self::from_raw)
    }
}

pub fn load_board_config() -> BoardConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_board_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_board_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> BoardConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return BoardConfig::default(),
    };
    if !path.exists() {
        return BoardConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => BoardConfig::from_json(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            BoardConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            BoardConfig::default()
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
    use crate::editor::tools::{DEFAULT_LINE_WIDTH, MAX_LINE_WIDTH};

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "gimmickboard",
            "config.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/config-root/gimmickboard/config.json")
        );
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path(
            "gimmickboard",
            "config.json",
            Some(Path::new("")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/gimmickboard/config.json"));
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("gimmickboard", "config.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let config = load_board_config_with(
            Some(Path::new("/nonexistent/gimmickboard-test-root")),
            None,
        );
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn json_fields_override_defaults_and_are_sanitized() {
        let config = BoardConfig::from_json(r##"{"line_width": 900, "default_color": "#00ff00"}"##)
            .expect("valid json should parse");
        assert_eq!(config.stroke_style.line_width, MAX_LINE_WIDTH);
        assert_eq!(config.default_color, Color::new(0, 255, 0));
    }

    #[test]
    fn empty_object_and_bad_color_fall_back_to_defaults() {
        let config = BoardConfig::from_json("{}").expect("empty object should parse");
        assert_eq!(config, BoardConfig::default());

        let config = BoardConfig::from_json(r#"{"default_color": "teal"}"#)
            .expect("unknown color text is not a parse error");
        assert_eq!(config.default_color, DEFAULT_DRAW_COLOR);
        assert_eq!(config.stroke_style.line_width, DEFAULT_LINE_WIDTH);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(BoardConfig::from_json("{line_width: 3").is_err());
    }
}

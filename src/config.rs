use crate::error::Error;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATHS: &[&str] = &["pseudoc.config.json", "config/pseudoc.config.json"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Leading spaces that collapse into one before depth encoding (0 = off).
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    /// Type names recognized in addition to the built-in set and typedefs.
    #[serde(default)]
    pub extra_types: Vec<String>,

    /// Cap for every fixed-point rewrite loop.
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
}

fn default_indent_width() -> usize {
    4
}
fn default_max_passes() -> usize {
    64
}

impl Default for Config {
    fn default() -> Self {
        Config {
            indent_width: 4,
            extra_types: Vec::new(),
            max_passes: 64,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, Error> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the first default config file that exists, else defaults.
    pub fn discover() -> Result<Config, Error> {
        for p in DEFAULT_CONFIG_PATHS {
            let path = PathBuf::from(p);
            if path.is_file() {
                return Config::load(&path);
            }
        }
        Ok(Config::default())
    }
}

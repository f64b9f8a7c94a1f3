use anyhow::Context;
use pagecraft_compiler_react::CompileOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding page documents (`<slug>.json`)
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    /// Export output directory
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Directory for extracted images, inside each exported page
    #[serde(default = "default_image_dir")]
    pub image_dir: String,

    /// Emit the generated-by header in page sources
    #[serde(default = "default_include_header")]
    pub include_header: bool,
}

fn default_pages_dir() -> String {
    "pages".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_image_dir() -> String {
    "images".to_string()
}

fn default_include_header() -> bool {
    true
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", DEFAULT_CONFIG_NAME))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the pages directory
    pub fn get_pages_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.pages_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            image_dir: self.image_dir.clone(),
            include_header: self.include_header,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            out_dir: default_out_dir(),
            image_dir: default_image_dir(),
            include_header: default_include_header(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "pagesDir": "content",
            "outDir": "build",
            "imageDir": "static/img",
            "includeHeader": false
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.pages_dir, "content");
        assert_eq!(config.out_dir, "build");
        assert_eq!(
            config.compile_options(),
            CompileOptions {
                image_dir: "static/img".to_string(),
                include_header: false,
            }
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "outDir": "out" }"#).unwrap();
        assert_eq!(config.pages_dir, "pages");
        assert_eq!(config.out_dir, "out");
        assert_eq!(config.image_dir, "images");
        assert!(config.include_header);
    }

    #[test]
    fn test_missing_config_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ nope").unwrap();

        assert!(Config::load(dir.path().to_str().unwrap()).is_err());
    }
}

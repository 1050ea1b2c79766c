use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".calcmigrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_modules_root")]
    pub modules_root: String,
    #[serde(default = "default_module_file_suffix")]
    pub module_file_suffix: String,
    #[serde(default = "default_computations_root")]
    pub computations_root: String,
    #[serde(default = "default_output_root")]
    pub output_root: String,
    #[serde(default = "default_dictionary_path")]
    pub dictionary_path: String,
    #[serde(default = "default_report_path")]
    pub report_path: String,
    #[serde(default = "default_file_extension")]
    pub file_extension: String,
    #[serde(default = "default_generated_suffix")]
    pub generated_suffix: String,
    #[serde(default = "default_category_namespace")]
    pub category_namespace: String,
    #[serde(default = "default_field_constructor")]
    pub field_constructor: String,
    #[serde(default = "default_rewrite_includes")]
    pub rewrite_includes: Vec<String>,
    #[serde(default = "default_rewrite_ignores")]
    pub rewrite_ignores: Vec<String>,
}

fn default_modules_root() -> String {
    "lib/domain/calculators/modules".to_string()
}

fn default_module_file_suffix() -> String {
    "_calculators.dart".to_string()
}

fn default_computations_root() -> String {
    "lib/domain/usecases".to_string()
}

fn default_output_root() -> String {
    "lib/domain/calculators".to_string()
}

fn default_dictionary_path() -> String {
    "assets/lang/ru.json".to_string()
}

fn default_report_path() -> String {
    "migration_analysis.json".to_string()
}

fn default_file_extension() -> String {
    "dart".to_string()
}

fn default_generated_suffix() -> String {
    "_v2".to_string()
}

fn default_category_namespace() -> String {
    "CalculatorCategory".to_string()
}

fn default_field_constructor() -> String {
    "CalculatorField".to_string()
}

fn default_rewrite_includes() -> Vec<String> {
    vec!["lib/domain/calculators/*_v2.dart".to_string()]
}

fn default_rewrite_ignores() -> Vec<String> {
    vec!["**/calculator_definition_v2.dart".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            modules_root: default_modules_root(),
            module_file_suffix: default_module_file_suffix(),
            computations_root: default_computations_root(),
            output_root: default_output_root(),
            dictionary_path: default_dictionary_path(),
            report_path: default_report_path(),
            file_extension: default_file_extension(),
            generated_suffix: default_generated_suffix(),
            category_namespace: default_category_namespace(),
            field_constructor: default_field_constructor(),
            rewrite_includes: default_rewrite_includes(),
            rewrite_ignores: default_rewrite_ignores(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `rewriteIncludes` or `rewriteIgnores`
    /// is invalid, or if an identifier used to build rewrite patterns is empty.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.rewrite_includes {
            Pattern::new(pattern).with_context(|| {
                format!("Invalid glob pattern in 'rewriteIncludes': \"{}\"", pattern)
            })?;
        }

        for pattern in &self.rewrite_ignores {
            Pattern::new(pattern).with_context(|| {
                format!("Invalid glob pattern in 'rewriteIgnores': \"{}\"", pattern)
            })?;
        }

        if self.category_namespace.trim().is_empty() {
            anyhow::bail!("'categoryNamespace' must not be empty");
        }
        if self.field_constructor.trim().is_empty() {
            anyhow::bail!("'fieldConstructor' must not be empty");
        }
        if self.module_file_suffix.is_empty() {
            anyhow::bail!("'moduleFileSuffix' must not be empty");
        }

        Ok(())
    }

    /// Extension with the leading dot, e.g. `.dart`.
    pub fn dotted_extension(&self) -> String {
        let ext = self.file_extension.trim_start_matches('.');
        format!(".{}", ext)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.file_extension, "dart");
        assert_eq!(config.generated_suffix, "_v2");
        assert!(!config.rewrite_includes.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "modulesRoot": "src/modules",
              "dictionaryPath": "i18n/ru.json",
              "rewriteIncludes": ["src/v2/*.dart"]
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.modules_root, "src/modules");
        assert_eq!(config.dictionary_path, "i18n/ru.json");
        assert_eq!(config.rewrite_includes, vec!["src/v2/*.dart"]);
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{ "reportPath": "out/report.json" }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.report_path, "out/report.json");
        assert_eq!(config.modules_root, default_modules_root());
        assert_eq!(config.rewrite_ignores, default_rewrite_ignores());
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("lib").join("domain");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_stops_at_git_root() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        assert!(find_config_file(dir.path()).is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "categoryNamespace": "Category" }"#,
        )
        .unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file);
        assert_eq!(result.config.category_namespace, "Category");
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert_eq!(result.config.dictionary_path, default_dictionary_path());
    }

    #[test]
    fn test_validate_invalid_include_pattern() {
        let config = Config {
            rewrite_includes: vec!["lib/**/[invalid".to_string()],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("rewriteIncludes"));
    }

    #[test]
    fn test_validate_invalid_ignore_pattern() {
        let config = Config {
            rewrite_ignores: vec!["[invalid".to_string()],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("rewriteIgnores"));
    }

    #[test]
    fn test_validate_empty_namespace() {
        let config = Config {
            category_namespace: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_with_invalid_pattern_fails() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "rewriteIgnores": ["[invalid"] }"#,
        )
        .unwrap();

        assert!(load_config(dir.path()).is_err());
    }

    #[test]
    fn test_dotted_extension() {
        let mut config = Config::default();
        assert_eq!(config.dotted_extension(), ".dart");
        config.file_extension = ".kt".to_string();
        assert_eq!(config.dotted_extension(), ".kt");
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = default_config_json().unwrap();
        assert!(json.contains("modulesRoot"));
        assert!(json.contains("rewriteIncludes"));
        assert!(!json.contains("modules_root"));
    }
}

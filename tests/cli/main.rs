use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod analyze;
mod generate;
mod init;
mod migrate;
mod remove_field;
mod translate;

const BIN_NAME: &str = "calcmig";

/// Declaration module with one complete calculator.
pub const TILE_MODULE: &str = r#"
final tileCalculators = [
  CalculatorDefinition(
    id: 'bathroom_tile',
    titleKey: 'calculator.bathroomTile',
    category: 'Внутренняя отделка',
    subCategory: 'Ванная / туалет',
    fields: const [
      InputFieldDefinition(key: 'area', labelKey: 'input.wallArea', minValue: 1.0),
    ],
    resultLabels: const {'tiles': 'result.tiles'},
    useCase: CalculateBathroomTile(),
  ),
];
"#;

pub const TILE_MODULE_PATH: &str = "lib/domain/calculators/modules/tiles/tiles_calculators.dart";

pub const DICTIONARY_PATH: &str = "assets/lang/ru.json";

/// Has the field label but neither the title nor the result label.
pub const PARTIAL_DICTIONARY: &str = r#"{
  "calculator": {},
  "input": {
    "wallArea": "Площадь стен"
  },
  "result": {}
}"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A project with the tile module and a partial dictionary.
    pub fn with_tile_project() -> Result<Self> {
        let test = Self::new()?;
        test.write_file(TILE_MODULE_PATH, TILE_MODULE)?;
        test.write_file(DICTIONARY_PATH, PARTIAL_DICTIONARY)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    /// Run `calcmig <args>` and capture its output.
    pub fn run(&self, args: &[&str]) -> Result<Output> {
        self.command()
            .args(args)
            .output()
            .with_context(|| format!("Failed to run {} {:?}", BIN_NAME, args))
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_help_lists_commands() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.run(&["--help"])?;
    let text = stdout(&output);

    assert!(output.status.success());
    for command in [
        "analyze",
        "translate",
        "generate",
        "migrate-categories",
        "remove-field",
        "init",
    ] {
        assert!(text.contains(command), "missing {} in:\n{}", command, text);
    }

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".calcmigrc.json", "{ not json")?;

    let output = test.run(&["analyze"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));

    Ok(())
}

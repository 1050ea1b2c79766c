use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, DICTIONARY_PATH, stdout};

const COMPUTATION_PATH: &str = "lib/domain/usecases/calculate_bathroom_tile.dart";

#[test]
fn test_analyze_reports_missing_translations() -> Result<()> {
    let test = CliTest::with_tile_project()?;
    test.write_file(
        COMPUTATION_PATH,
        "// Нормы: ГЭСН 11-01, СП 71.13330\nclass CalculateBathroomTile {}\n",
    )?;

    let output = test.run(&["analyze"])?;
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(1), "{}", text);
    assert!(text.contains("error: \"calculator.bathroomTile\"  missing-translation"));
    assert!(text.contains("error: \"result.tiles\"  missing-translation"));
    assert!(!text.contains("input.wallArea"));
    assert!(text.contains("Analyzed 1 definition (1 with norms, 2 missing keys)"));
    assert!(text.contains("Wrote migration_analysis.json"));

    let report: Value = serde_json::from_str(&test.read_file("migration_analysis.json")?)?;
    assert_eq!(report["totalDefinitions"], 1);
    assert_eq!(report["summary"]["missingKeys"], 2);

    let definition = &report["definitions"][0];
    assert_eq!(definition["id"], "bathroom_tile");
    assert_eq!(definition["module"], "tiles");
    assert_eq!(definition["computation"]["exists"], true);
    assert_eq!(definition["computation"]["hasNorms"], true);

    Ok(())
}

#[test]
fn test_analyze_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_tile_project()?;

    let output = test.run(&["analyze", "--dry-run"])?;
    let text = stdout(&output);

    assert!(text.contains("Would write analysis report"));
    assert!(!test.root().join("migration_analysis.json").exists());

    Ok(())
}

#[test]
fn test_analyze_custom_output() -> Result<()> {
    let test = CliTest::with_tile_project()?;

    test.run(&["analyze", "--output", "out/report.json"])?;
    assert!(test.root().join("out/report.json").exists());

    Ok(())
}

#[test]
fn test_analyze_complete_dictionary_succeeds() -> Result<()> {
    let test = CliTest::with_tile_project()?;
    test.write_file(
        DICTIONARY_PATH,
        r#"{
  "calculator": { "bathroomTile": "Плитка в ванной" },
  "input": { "wallArea": "Площадь стен" },
  "result": { "tiles": "Плитка" }
}"#,
    )?;

    let output = test.run(&["analyze"])?;
    let text = stdout(&output);

    assert!(output.status.success(), "{}", text);
    assert!(!text.contains("error:"));

    Ok(())
}

#[test]
fn test_analyze_without_modules() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["analyze", "--dry-run"])?;
    let text = stdout(&output);

    // Missing inputs are warnings; the run still completes.
    assert!(output.status.success(), "{}", text);
    assert!(text.contains("missing-input"));
    assert!(text.contains("Analyzed 0 definitions"));

    Ok(())
}

#[test]
fn test_analyze_report_output() -> Result<()> {
    let test = CliTest::with_tile_project()?;
    test.write_file(COMPUTATION_PATH, "// ГЭСН 11-01\n")?;

    let mut cmd = test.command();
    cmd.arg("analyze");
    assert_cmd_snapshot!(cmd, @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "calculator.bathroomTile"  missing-translation
      --> lib/domain/calculators/modules/tiles/tiles_calculators.dart:3:3
      |
    3 |   CalculatorDefinition(
      |   ^
      = note: title of 'bathroom_tile'
      = hint: run `calcmig translate` to backfill the dictionary

    error: "result.tiles"  missing-translation
      --> lib/domain/calculators/modules/tiles/tiles_calculators.dart:3:3
      |
    3 |   CalculatorDefinition(
      |   ^
      = note: result label of 'bathroom_tile'
      = hint: run `calcmig translate` to backfill the dictionary

    ✘ 2 problems (2 errors, 0 warnings)
    ✓ Analyzed 1 definition (1 with norms, 2 missing keys)
    Wrote migration_analysis.json

    ----- stderr -----
    "#);

    Ok(())
}

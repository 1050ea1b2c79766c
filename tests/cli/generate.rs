use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stdout};

const OUTPUT_PATH: &str = "lib/domain/calculators/bathroom_tile_v2.dart";

#[test]
fn test_generate_creates_files() -> Result<()> {
    let test = CliTest::with_tile_project()?;

    let output = test.run(&["generate"])?;
    let text = stdout(&output);

    assert!(output.status.success(), "{}", text);
    assert!(text.contains("Created 1 file"));

    let content = test.read_file(OUTPUT_PATH)?;
    assert!(content.contains("final bathroom_tileV2 = CalculatorDefinitionV2("));
    assert!(content.contains("category: CalculatorCategory.interior,"));
    assert!(content.contains("subCategory: 'bathroom',"));
    assert!(content.contains("useCase: CalculateBathroomTile(),"));
    assert!(content.contains("import '../usecases/calculate_bathroom_tile.dart';"));

    Ok(())
}

#[test]
fn test_generate_never_overwrites() -> Result<()> {
    let test = CliTest::with_tile_project()?;
    test.write_file(OUTPUT_PATH, "// hand edited\n")?;

    let output = test.run(&["generate"])?;
    let text = stdout(&output);

    assert!(output.status.success(), "{}", text);
    assert!(text.contains("write-conflict"));
    assert!(text.contains("already exist: 1"));
    assert_eq!(test.read_file(OUTPUT_PATH)?, "// hand edited\n");

    Ok(())
}

#[test]
fn test_generate_dry_run() -> Result<()> {
    let test = CliTest::with_tile_project()?;

    let output = test.run(&["generate", "--dry-run"])?;
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(1), "{}", text);
    assert!(text.contains("Would create 1 file"));
    assert!(!test.root().join(OUTPUT_PATH).exists());

    Ok(())
}

#[test]
fn test_generate_skips_definitions_without_computation() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "lib/domain/calculators/modules/misc/misc_calculators.dart",
        r#"[
  CalculatorDefinition(
    id: 'stub',
    titleKey: 'calculator.stub',
  ),
];"#,
    )?;

    let output = test.run(&["generate"])?;
    let text = stdout(&output);

    assert!(text.contains("generation-skipped"));
    assert!(text.contains("No new files to generate"));
    assert!(!test.root().join("lib/domain/calculators/stub_v2.dart").exists());

    Ok(())
}

#[test]
fn test_generate_continues_after_write_failure() -> Result<()> {
    let test = CliTest::new()?;
    let long_id = "x".repeat(300);
    test.write_file(
        "lib/domain/calculators/modules/misc/misc_calculators.dart",
        &format!(
            r#"[
  CalculatorDefinition(id: '{long_id}', titleKey: 'calculator.long', useCase: CalculateLong()),
  CalculatorDefinition(id: 'second', titleKey: 'calculator.second', useCase: CalculateSecond()),
];"#
        ),
    )?;

    let output = test.run(&["generate"])?;
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(1), "{}", text);
    assert!(text.contains("write-failed"));
    assert!(text.contains("Created 1 file"));
    assert!(test.root().join("lib/domain/calculators/second_v2.dart").exists());

    Ok(())
}

#[test]
fn test_generate_skips_ids_with_path_components() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "lib/domain/calculators/modules/misc/misc_calculators.dart",
        r#"[
  CalculatorDefinition(id: '../../escape', titleKey: 'calculator.escape', useCase: CalculateEscape()),
];"#,
    )?;

    let output = test.run(&["generate"])?;
    let text = stdout(&output);

    assert!(output.status.success(), "{}", text);
    assert!(text.contains("generation-skipped"));
    assert!(text.contains("id is not a plain file name"));
    assert!(!test.root().join("escape_v2.dart").exists());
    assert!(!test.root().join("lib/escape_v2.dart").exists());

    Ok(())
}

#[test]
fn test_generate_conflict_output() -> Result<()> {
    let test = CliTest::with_tile_project()?;
    test.write_file(OUTPUT_PATH, "// hand edited\n")?;

    let mut cmd = test.command();
    cmd.arg("generate");
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "lib/domain/calculators/bathroom_tile_v2.dart"  write-conflict
      --> lib/domain/calculators/bathroom_tile_v2.dart
      = note: already exists, 'bathroom_tile' not generated

    ✘ 1 problems (0 errors, 1 warning)
    ✓ No new files to generate
      - already exist: 1

    ----- stderr -----
    "#);

    Ok(())
}

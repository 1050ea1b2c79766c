use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stdout};

const V2_PATH: &str = "lib/domain/calculators/tile_v2.dart";

const TILE_V2: &str = r#"final tileV2 = CalculatorDefinitionV2(
  id: 'tile',
  fields: [
    CalculatorField(
      key: 'area',
      labelKey: 'input.area',
    ),
    CalculatorField(
      key: 'waste',
      labelKey: 'input.waste',
      defaultValue: 10,
    ),
  ],
);
"#;

const TILE_V2_WITHOUT_WASTE: &str = r#"final tileV2 = CalculatorDefinitionV2(
  id: 'tile',
  fields: [
    CalculatorField(
      key: 'area',
      labelKey: 'input.area',
    ),
  ],
);
"#;

#[test]
fn test_remove_field_deletes_whole_block() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(V2_PATH, TILE_V2)?;

    let output = test.run(&["remove-field", "waste"])?;
    let text = stdout(&output);

    assert!(output.status.success(), "{}", text);
    assert!(text.contains("Rewrote 1 file (1 change, removal of field 'waste')"));
    assert_eq!(test.read_file(V2_PATH)?, TILE_V2_WITHOUT_WASTE);

    Ok(())
}

#[test]
fn test_remove_field_explicit_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("lib/other/tile.dart", TILE_V2)?;
    test.write_file(V2_PATH, TILE_V2)?;

    let output = test.run(&["remove-field", "waste", "--file", "lib/other/tile.dart"])?;
    assert!(output.status.success(), "{}", stdout(&output));

    assert_eq!(test.read_file("lib/other/tile.dart")?, TILE_V2_WITHOUT_WASTE);
    assert_eq!(test.read_file(V2_PATH)?, TILE_V2);

    Ok(())
}

#[test]
fn test_remove_field_missing_file_is_reported() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(V2_PATH, TILE_V2)?;

    let output = test.run(&[
        "remove-field",
        "waste",
        "--file",
        "lib/missing.dart",
        "--file",
        V2_PATH,
    ])?;
    let text = stdout(&output);

    assert!(output.status.success(), "{}", text);
    assert!(text.contains("warning: \"lib/missing.dart\"  missing-input"));
    assert_eq!(test.read_file(V2_PATH)?, TILE_V2_WITHOUT_WASTE);

    Ok(())
}

#[test]
fn test_remove_field_unknown_key_changes_nothing() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(V2_PATH, TILE_V2)?;

    let output = test.run(&["remove-field", "height"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("nothing to change"));
    assert_eq!(test.read_file(V2_PATH)?, TILE_V2);

    Ok(())
}

#[test]
fn test_remove_field_output() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(V2_PATH, TILE_V2)?;

    let mut cmd = test.command();
    cmd.args(["remove-field", "waste", "--dry-run"]);
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 1
    ----- stdout -----
      ~ lib/domain/calculators/tile_v2.dart (1 change)
          line 8: removed block
    Would rewrite 1 file (1 change, removal of field 'waste')

    ----- stderr -----
    ");

    Ok(())
}

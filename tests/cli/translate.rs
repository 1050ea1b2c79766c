use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, DICTIONARY_PATH, PARTIAL_DICTIONARY, stdout};

#[test]
fn test_translate_backfills_dictionary() -> Result<()> {
    let test = CliTest::with_tile_project()?;

    let output = test.run(&["translate"])?;
    let text = stdout(&output);

    assert!(output.status.success(), "{}", text);
    assert!(text.contains("Inserted 2 keys into assets/lang/ru.json"));
    assert!(text.contains("  - curated: 1"));
    assert!(text.contains("  - generated: 1"));

    let dictionary: Value = serde_json::from_str(&test.read_file(DICTIONARY_PATH)?)?;
    assert_eq!(dictionary["calculator"]["bathroomTile"], "Плитка в ванной");
    assert_eq!(dictionary["result"]["tiles"], "Tiles");
    assert_eq!(dictionary["input"]["wallArea"], "Площадь стен");

    // Non-ASCII text is written verbatim.
    assert!(test.read_file(DICTIONARY_PATH)?.contains("Плитка в ванной"));

    Ok(())
}

#[test]
fn test_translate_is_idempotent() -> Result<()> {
    let test = CliTest::with_tile_project()?;

    test.run(&["translate"])?;
    let first = test.read_file(DICTIONARY_PATH)?;

    let output = test.run(&["translate"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("No keys to insert into assets/lang/ru.json"));
    assert_eq!(test.read_file(DICTIONARY_PATH)?, first);

    Ok(())
}

#[test]
fn test_translate_dry_run() -> Result<()> {
    let test = CliTest::with_tile_project()?;

    let output = test.run(&["translate", "--dry-run"])?;
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(1), "{}", text);
    assert!(text.contains("+ calculator.bathroomTile = \"Плитка в ванной\" (curated)"));
    assert!(text.contains("Would insert 2 keys"));
    assert_eq!(test.read_file(DICTIONARY_PATH)?, PARTIAL_DICTIONARY);

    Ok(())
}

#[test]
fn test_translate_custom_dictionary_path() -> Result<()> {
    let test = CliTest::with_tile_project()?;
    test.write_file("i18n/ru.json", "{}")?;

    let output = test.run(&["translate", "--dictionary", "i18n/ru.json"])?;
    assert!(output.status.success(), "{}", stdout(&output));

    let dictionary: Value = serde_json::from_str(&test.read_file("i18n/ru.json")?)?;
    assert_eq!(dictionary["input"]["wallArea"], "Площадь стен");
    assert_eq!(test.read_file(DICTIONARY_PATH)?, PARTIAL_DICTIONARY);

    Ok(())
}

#[test]
fn test_translate_corrupt_dictionary_is_an_error() -> Result<()> {
    let test = CliTest::with_tile_project()?;
    test.write_file(DICTIONARY_PATH, "{ \"calculator\": ")?;

    let output = test.run(&["translate"])?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(test.read_file(DICTIONARY_PATH)?, "{ \"calculator\": ");

    Ok(())
}

#[test]
fn test_translate_dry_run_output() -> Result<()> {
    let test = CliTest::with_tile_project()?;

    let mut cmd = test.command();
    cmd.args(["translate", "--dry-run"]);
    assert_cmd_snapshot!(cmd, @r#"
    success: false
    exit_code: 1
    ----- stdout -----
      + calculator.bathroomTile = "Плитка в ванной" (curated)
      + result.tiles = "Tiles" (generated)
    Would insert 2 keys into assets/lang/ru.json
      - curated: 1
      - generated: 1

    ----- stderr -----
    "#);

    Ok(())
}

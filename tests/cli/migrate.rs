use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stdout};

const V2_PATH: &str = "lib/domain/calculators/walls_v2.dart";

const WALLS_V2: &str = r#"final wallsV2 = CalculatorDefinitionV2(
  id: 'walls',
  category: CalculatorCategory.walls,
  subCategory: 'walls',
);

final ceilingV2 = CalculatorDefinitionV2(
  id: 'ceiling',
  category: CalculatorCategory.ceilings,
);

final paintV2 = CalculatorDefinitionV2(
  id: 'paint',
  category: CalculatorCategory.interior,
);
"#;

#[test]
fn test_migrate_categories_rewrites_in_place() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(V2_PATH, WALLS_V2)?;

    let output = test.run(&["migrate-categories"])?;
    let text = stdout(&output);

    assert!(output.status.success(), "{}", text);
    assert!(text.contains("Rewrote 1 file (2 changes, category remap)"));

    let content = test.read_file(V2_PATH)?;
    assert!(content.contains("category: CalculatorCategory.exterior,\n  subCategory: 'walls',"));
    assert!(content.contains("category: CalculatorCategory.interior,\n);\n\nfinal paintV2"));
    assert!(!content.contains("CalculatorCategory.walls"));
    assert!(!content.contains("CalculatorCategory.ceilings"));

    Ok(())
}

#[test]
fn test_migrate_categories_twice_changes_nothing() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(V2_PATH, WALLS_V2)?;

    test.run(&["migrate-categories"])?;
    let first = test.read_file(V2_PATH)?;

    let output = test.run(&["migrate-categories"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Checked 1 file - nothing to change for category remap"));
    assert_eq!(test.read_file(V2_PATH)?, first);

    Ok(())
}

#[test]
fn test_migrate_categories_dry_run() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(V2_PATH, WALLS_V2)?;

    let output = test.run(&["migrate-categories", "--dry-run"])?;
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(1), "{}", text);
    assert!(text.contains("line 3: walls -> exterior"));
    assert!(text.contains("Would rewrite 1 file"));
    assert_eq!(test.read_file(V2_PATH)?, WALLS_V2);

    Ok(())
}

#[test]
fn test_migrate_categories_respects_config_includes() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".calcmigrc.json", r#"{ "rewriteIncludes": ["src/*.dart"] }"#)?;
    test.write_file("src/walls.dart", WALLS_V2)?;
    test.write_file(V2_PATH, WALLS_V2)?;

    let output = test.run(&["migrate-categories"])?;
    assert!(output.status.success(), "{}", stdout(&output));

    assert!(!test.read_file("src/walls.dart")?.contains("CalculatorCategory.walls"));
    assert_eq!(test.read_file(V2_PATH)?, WALLS_V2);

    Ok(())
}

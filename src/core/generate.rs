//! Template generator: one new source file per definition, never overwriting.

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{
    config::Config,
    core::{
        data::Definition,
        tables::{map_category, map_subcategory},
    },
    utils::camel_to_snake,
};

/// Why a definition produced no file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Without a behaviour reference the output would not compile.
    NoComputationRef,
    /// The id would not stay a single file name under the output root.
    UnsafeId,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoComputationRef => write!(f, "no computation reference"),
            SkipReason::UnsafeId => write!(f, "id is not a plain file name"),
        }
    }
}

/// A rendered file waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub id: String,
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    /// Something already exists at the target path; nothing was written.
    AlreadyExists,
}

/// Renders definitions into the target layout.
#[derive(Debug, Clone)]
pub struct Generator {
    output_root: PathBuf,
    suffix: String,
    extension: String,
    namespace: String,
}

impl Generator {
    pub fn new(output_root: PathBuf, config: &Config) -> Self {
        Self {
            output_root,
            suffix: config.generated_suffix.clone(),
            extension: config.dotted_extension(),
            namespace: config.category_namespace.clone(),
        }
    }

    /// `<id><suffix><ext>`, e.g. `tile_v2.dart`.
    pub fn file_name(&self, id: &str) -> String {
        format!("{}{}{}", id, self.suffix, self.extension)
    }

    pub fn target_path(&self, id: &str) -> PathBuf {
        self.output_root.join(self.file_name(id))
    }

    /// Render the file for `definition` declared in `module`.
    pub fn render(&self, definition: &Definition, module: &str) -> Result<GeneratedFile, SkipReason> {
        if !is_plain_file_stem(&definition.id) {
            return Err(SkipReason::UnsafeId);
        }
        let computation = definition
            .computation_ref
            .as_deref()
            .filter(|r| !r.is_empty())
            .ok_or(SkipReason::NoComputationRef)?;

        let content = render_template(&TemplateParams {
            id: &definition.id,
            variable: &self.variable_name(&definition.id),
            title_key: &definition.title_key,
            namespace: &self.namespace,
            category: map_category(&definition.category),
            sub_category: map_subcategory(&definition.sub_category, module),
            source_category: &definition.category,
            source_sub_category: &definition.sub_category,
            module,
            computation,
            computation_file: &camel_to_snake(computation),
            extension: &self.extension,
        });

        Ok(GeneratedFile {
            id: definition.id.clone(),
            path: self.target_path(&definition.id),
            content,
        })
    }

    /// `tile` + `_v2` → `tileV2`.
    fn variable_name(&self, id: &str) -> String {
        let mut name = id.to_string();
        for part in self.suffix.split('_').filter(|p| !p.is_empty()) {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                name.extend(first.to_uppercase());
                name.push_str(chars.as_str());
            }
        }
        name
    }
}

fn is_plain_file_stem(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '\\']) && !id.contains("..")
}

struct TemplateParams<'a> {
    id: &'a str,
    variable: &'a str,
    title_key: &'a str,
    namespace: &'a str,
    category: &'a str,
    sub_category: &'a str,
    source_category: &'a str,
    source_sub_category: &'a str,
    module: &'a str,
    computation: &'a str,
    computation_file: &'a str,
    extension: &'a str,
}

fn render_template(p: &TemplateParams) -> String {
    format!(
        "import '../core/enums/calculator_category{ext}';
import '../usecases/{computation_file}{ext}';
import 'calculator_constants{ext}';
import 'models/calculator_definition_v2{ext}';
import 'models/calculator_field{ext}';

/// Calculator: {title_key}
///
/// Generated from module: {module}
final {variable} = CalculatorDefinitionV2(
  id: '{id}',
  titleKey: '{title_key}',
  descriptionKey: '{title_key}.description',
  category: {namespace}.{category},
  subCategory: '{sub_category}',
  fields: [
    // TODO: port the field declarations by hand
  ],
  useCase: {computation}(),
  complexity: 2,
  popularity: 10,
  tags: ['{source_category}', '{source_sub_category}', '{module}'],
);
",
        ext = p.extension,
        computation_file = p.computation_file,
        title_key = p.title_key,
        module = p.module,
        variable = p.variable,
        id = p.id,
        namespace = p.namespace,
        category = p.category,
        sub_category = p.sub_category,
        computation = p.computation,
        source_category = p.source_category,
        source_sub_category = p.source_sub_category,
    )
}

/// Create `path` with `content` unless it already exists.
///
/// Existence and creation are one atomic step, so a file that appears
/// between planning and writing is never clobbered.
pub fn write_new(path: &Path, content: &str) -> Result<WriteOutcome> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            tracing::debug!(path = %path.display(), "target exists, skipping");
            return Ok(WriteOutcome::AlreadyExists);
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to create: {}", path.display()));
        }
    };
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write: {}", path.display()))?;
    Ok(WriteOutcome::Created)
}

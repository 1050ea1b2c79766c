use std::{
    cell::OnceCell,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        data::{Definition, SourceContext},
        dictionary::Dictionary,
        extract::{DroppedDeclaration, extract_definitions},
        file_scanner::scan_modules,
    },
    issues::{DroppedDeclarationIssue, Issue, MissingInputIssue},
};

/// A definition together with where it was declared.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedDefinition {
    /// Module name, from the declaration file name.
    pub module: String,
    pub definition: Definition,
    /// Text of the opener's line, for caret output.
    pub source_line: String,
}

impl ScannedDefinition {
    pub fn context(&self) -> SourceContext {
        SourceContext::new(self.definition.location.clone(), self.source_line.clone())
    }
}

/// Everything one pass over the declaration modules produced.
#[derive(Debug, Default)]
pub struct ScanOutput {
    pub definitions: Vec<ScannedDefinition>,
    pub dropped: Vec<DroppedDeclaration>,
    /// Definition openers that yielded nothing (fields excluded).
    pub failure_count: usize,
    pub files_scanned: usize,
    /// Input-missing problems met while scanning.
    pub issues: Vec<Issue>,
}

impl ScanOutput {
    /// Dropped declarations and scan problems as issues.
    pub fn issues(&self) -> Vec<Issue> {
        let mut issues = self.issues.clone();
        issues.extend(self.dropped.iter().map(|d| {
            Issue::DroppedDeclaration(DroppedDeclarationIssue {
                context: d.context.clone(),
                kind: d.kind,
                reason: d.reason,
            })
        }));
        issues
    }
}

/// Project root, effective configuration and the lazily computed scan.
pub struct ProjectContext {
    pub root: PathBuf,
    pub config: Config,
    /// True if the config came from a file rather than defaults.
    pub from_file: bool,
    pub verbose: bool,
    scan: OnceCell<ScanOutput>,
}

impl ProjectContext {
    pub fn new(args: &CommonArgs) -> Result<Self> {
        let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
        let loaded = load_config(&root)?;
        let mut config = loaded.config;

        if let Some(path) = &args.dictionary {
            config.dictionary_path = path.to_string_lossy().into_owned();
        }
        if let Some(path) = &args.modules_root {
            config.modules_root = path.to_string_lossy().into_owned();
        }
        tracing::debug!(root = %root.display(), from_file = loaded.from_file, "configuration loaded");

        Ok(Self {
            root,
            config,
            from_file: loaded.from_file,
            verbose: args.verbose,
            scan: OnceCell::new(),
        })
    }

    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Path shown to the user: relative to the root when possible.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }

    pub fn modules_root(&self) -> PathBuf {
        self.resolve(&self.config.modules_root)
    }

    pub fn dictionary_path(&self) -> PathBuf {
        self.resolve(&self.config.dictionary_path)
    }

    pub fn computations_root(&self) -> PathBuf {
        self.resolve(&self.config.computations_root)
    }

    pub fn output_root(&self) -> PathBuf {
        self.resolve(&self.config.output_root)
    }

    pub fn report_path(&self) -> PathBuf {
        self.resolve(&self.config.report_path)
    }

    /// Extract every declaration module; computed once per run.
    pub fn scan(&self) -> &ScanOutput {
        self.scan.get_or_init(|| self.scan_modules())
    }

    fn scan_modules(&self) -> ScanOutput {
        let mut output = ScanOutput::default();
        let modules_root = self.modules_root();

        if !modules_root.is_dir() {
            tracing::warn!(path = %modules_root.display(), "modules directory not found");
            output.issues.push(Issue::MissingInput(MissingInputIssue {
                path: self.display_path(&modules_root),
                reason: "modules directory does not exist".to_string(),
            }));
            return output;
        }

        let (modules, skipped) = scan_modules(&modules_root, &self.config.module_file_suffix);
        if skipped > 0 {
            tracing::warn!(skipped, "some paths under the modules directory were unreadable");
        }

        for module in modules {
            let shown = self.display_path(&module.path);
            let content = match fs::read_to_string(&module.path) {
                Ok(content) => content,
                Err(err) => {
                    tracing::warn!(path = %shown, "cannot read module: {}", err);
                    output.issues.push(Issue::MissingInput(MissingInputIssue {
                        path: shown,
                        reason: err.to_string(),
                    }));
                    continue;
                }
            };

            let extraction = extract_definitions(&shown, &content);
            tracing::debug!(
                module = %module.module,
                definitions = extraction.definitions.len(),
                dropped = extraction.dropped.len(),
                "scanned {}",
                shown
            );
            for dropped in &extraction.dropped {
                tracing::debug!(
                    line = dropped.context.line(),
                    "dropped {}: {}",
                    dropped.kind,
                    dropped.reason
                );
            }

            output.files_scanned += 1;
            output.failure_count += extraction.failure_count();
            let lines: Vec<&str> = content.lines().collect();
            output
                .definitions
                .extend(extraction.definitions.into_iter().map(|definition| {
                    let source_line = lines
                        .get(definition.location.line.saturating_sub(1))
                        .copied()
                        .unwrap_or_default()
                        .to_string();
                    ScannedDefinition {
                        module: module.module.clone(),
                        definition,
                        source_line,
                    }
                }));
            output.dropped.extend(extraction.dropped);
        }

        output
    }

    /// Load the dictionary. `Ok(None)` when the file does not exist;
    /// corrupt JSON is an error.
    pub fn load_dictionary(&self) -> Result<Option<Dictionary>> {
        let path = self.dictionary_path();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "dictionary not found");
            return Ok(None);
        }
        Dictionary::load(&path)
            .map(Some)
            .with_context(|| format!("Cannot use dictionary {}", self.display_path(&path)))
    }

    pub fn missing_dictionary_issue(&self) -> Issue {
        Issue::MissingInput(MissingInputIssue {
            path: self.display_path(&self.dictionary_path()),
            reason: "dictionary file does not exist".to_string(),
        })
    }
}

use std::path::{Path, PathBuf};

use glob::{Pattern, glob};
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// A declaration file and the module it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFile {
    /// File name minus the module suffix, e.g. `floors` for `floors_calculators.dart`.
    pub module: String,
    pub path: PathBuf,
}

/// Find every file under `modules_root` whose name ends with `suffix`.
///
/// Sorted by path so that runs are reproducible. Unreadable entries are
/// counted and skipped.
pub fn scan_modules(modules_root: &Path, suffix: &str) -> (Vec<ModuleFile>, usize) {
    let mut modules = Vec::new();
    let mut skipped_count = 0;

    for entry in WalkDir::new(modules_root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                tracing::warn!("cannot access path: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if let Some(module) = name.strip_suffix(suffix)
            && !module.is_empty()
        {
            modules.push(ModuleFile {
                module: module.to_string(),
                path: entry.into_path(),
            });
        }
    }

    modules.sort_by(|a, b| a.path.cmp(&b.path));
    (modules, skipped_count)
}

/// Result of resolving the rewrite file set.
pub struct ScanResult {
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Resolve include patterns (files or directories, relative to `base_dir`)
/// minus ignore patterns into a sorted, deduplicated file list.
pub fn scan_files(base_dir: &Path, includes: &[String], ignore_patterns: &[String]) -> ScanResult {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => tracing::warn!("invalid ignore pattern '{}': {}", p, e),
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    let mut roots: Vec<PathBuf> = Vec::new();
    for inc in includes {
        if is_glob_pattern(inc) {
            let full_pattern = base_dir.join(inc);
            match glob(&full_pattern.to_string_lossy()) {
                Ok(entries) => roots.extend(entries.flatten()),
                Err(e) => tracing::warn!("invalid glob pattern '{}': {}", inc, e),
            }
        } else {
            let path = base_dir.join(inc);
            if path.exists() {
                roots.push(path);
            } else {
                tracing::warn!("include path does not exist: {}", path.display());
            }
        }
    }

    for root in roots {
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    tracing::warn!("cannot access path: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }
            let path_str = path.to_string_lossy();
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if entry.file_type().is_file() {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();

    ScanResult {
        files,
        skipped_count,
    }
}

//! Resolves a definition's `computationRef` to a file and scans it for
//! building-norm citations.

use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;

use crate::utils::camel_to_snake;

/// ГЭСН, ФЕР, СНиП, СП and ГОСТ citations, each with an optional code.
static NORM_CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:ГЭСН(?:[- ]?\d+)?|ФЕР(?:[- ]?\d+)?|СНиП(?:[- ]?[\d.]+)?|СП(?:[- ]?[\d.]+)?|ГОСТ(?:[- ]?[\d-]+)?)\b",
    )
    .unwrap()
});

/// What was found behind a `computationRef`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputationInfo {
    pub exists: bool,
    pub has_norms: bool,
    /// Sorted, deduplicated citations as written.
    pub norms: Vec<String>,
    /// Size in bytes; absent when the file does not exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

impl ComputationInfo {
    pub fn missing() -> Self {
        Self::default()
    }
}

/// `root/snake_case(reference).ext`
///
/// ```
/// use std::path::Path;
/// use calcmig::core::norms::computation_path;
///
/// let path = computation_path(Path::new("usecases"), "CalculateWallPaint", ".dart");
/// assert_eq!(path, Path::new("usecases/calculate_wall_paint.dart"));
/// ```
pub fn computation_path(root: &Path, reference: &str, dotted_extension: &str) -> PathBuf {
    root.join(format!("{}{}", camel_to_snake(reference), dotted_extension))
}

pub fn scan_norms(content: &str) -> Vec<String> {
    NORM_CITATION
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Inspect the computation file. A file that does not exist is not an error.
pub fn inspect_computation(path: &Path) -> Result<ComputationInfo> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "computation file not found");
            return Ok(ComputationInfo::missing());
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to read computation file: {}", path.display()));
        }
    };

    let norms = scan_norms(&content);
    Ok(ComputationInfo {
        exists: true,
        has_norms: !norms.is_empty(),
        norms,
        file_size: Some(content.len() as u64),
    })
}

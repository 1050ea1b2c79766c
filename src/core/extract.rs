//! Declaration extractor.
//!
//! Recovers [`Definition`] records from host source text without a grammar.
//! The scan is layered:
//!
//! 1. **Span detection**: find each `CalculatorDefinition(` opener and cut the
//!    span at the first `)` that is followed by another opener or by the end of
//!    the enclosing list (`];`).
//! 2. **Narrowing**: inside the span, nested brackets are masked so that
//!    definition-level attribute patterns never see text from the field list
//!    or the result-label map.
//! 3. **Attribute matching**: each attribute (`id`, `titleKey`, ...) is found
//!    by its own pattern, so attribute order does not matter.
//!
//! Fields repeat the same three steps inside the isolated `fields: [...]` list.
//! Anything that does not match simply yields a missing or default value.

use std::{ops::Range, sync::LazyLock};

use regex::Regex;

use crate::core::{
    data::{DEFAULT_FIELD_VALUE, Definition, Field, LineIndex, ResultLabel, SourceContext},
    text::{blank_comments, find_closing, mask_nested},
};

static DEFINITION_OPENER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:const\s+)?CalculatorDefinition\s*\(").unwrap());

static DEFINITION_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\)\s*,?\s*(?:(?:const\s+)?CalculatorDefinition\s*\(|\]\s*;)").unwrap()
});

static FIELD_OPENER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:const\s+)?InputFieldDefinition\s*\(").unwrap());

static FIELD_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\)\s*,?\s*(?:(?:const\s+)?InputFieldDefinition\s*\(|\z)").unwrap()
});

static FIELDS_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfields\s*:\s*(?:const\s*)?\[").unwrap());

static RESULT_LABELS_MAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bresultLabels\s*:\s*(?:const\s*)?\{").unwrap());

static RESULT_LABEL_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"['"]([^'"]+)['"]\s*:\s*['"]([^'"]+)['"]"#).unwrap()
});

static COMPUTATION_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\buseCase\s*:\s*(?:const\s+)?(\w+)\s*\(").unwrap());

static ID: LazyLock<Regex> = LazyLock::new(|| string_attribute("id"));
static TITLE_KEY: LazyLock<Regex> = LazyLock::new(|| string_attribute("titleKey"));
static CATEGORY: LazyLock<Regex> = LazyLock::new(|| string_attribute("category"));
static SUB_CATEGORY: LazyLock<Regex> = LazyLock::new(|| string_attribute("subCategory"));
static KEY: LazyLock<Regex> = LazyLock::new(|| string_attribute("key"));
static LABEL_KEY: LazyLock<Regex> = LazyLock::new(|| string_attribute("labelKey"));
static DEFAULT_VALUE: LazyLock<Regex> = LazyLock::new(|| numeric_attribute("defaultValue"));
static MIN_VALUE: LazyLock<Regex> = LazyLock::new(|| numeric_attribute("minValue"));
static MAX_VALUE: LazyLock<Regex> = LazyLock::new(|| numeric_attribute("maxValue"));

static REQUIRED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\brequired\s*:\s*(true|false)\b").unwrap());

fn string_attribute(name: &str) -> Regex {
    Regex::new(&format!(r#"\b{}\s*:\s*['"]([^'"]+)['"]"#, name)).unwrap()
}

fn numeric_attribute(name: &str) -> Regex {
    Regex::new(&format!(
        r"\b{}\s*:\s*(-?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)",
        name
    ))
    .unwrap()
}

/// What kind of declaration a dropped span was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Definition,
    Field,
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclarationKind::Definition => write!(f, "definition"),
            DeclarationKind::Field => write!(f, "field"),
        }
    }
}

/// Why a span that looked like a declaration was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// No closing boundary was found after the opener.
    Unterminated,
    MissingId,
    MissingTitleKey,
    MissingFieldKey,
    MissingFieldLabel,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::Unterminated => write!(f, "no closing boundary found"),
            DropReason::MissingId => write!(f, "no `id` attribute"),
            DropReason::MissingTitleKey => write!(f, "no `titleKey` attribute"),
            DropReason::MissingFieldKey => write!(f, "field has no `key` attribute"),
            DropReason::MissingFieldLabel => write!(f, "field has no `labelKey` attribute"),
        }
    }
}

/// A span that opened like a declaration but could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedDeclaration {
    pub kind: DeclarationKind,
    pub context: SourceContext,
    pub reason: DropReason,
}

/// Result of extracting one file.
#[derive(Debug, Default)]
pub struct Extraction {
    pub definitions: Vec<Definition>,
    pub dropped: Vec<DroppedDeclaration>,
}

impl Extraction {
    /// Number of definition openers that did not yield a definition.
    pub fn failure_count(&self) -> usize {
        self.dropped
            .iter()
            .filter(|d| d.kind == DeclarationKind::Definition)
            .count()
    }
}

/// A detected span: where the opener starts and the inner text range.
enum Span {
    Closed { opener: usize, inner: Range<usize> },
    Unterminated { opener: usize },
}

/// Find opener/boundary spans inside `text[region]`, returning absolute offsets.
///
/// After a closed span the search resumes at its closing `)`, so openers that
/// sit inside an earlier span are not reported a second time.
fn scan_spans(text: &str, region: Range<usize>, opener: &Regex, boundary: &Regex) -> Vec<Span> {
    let base = region.start;
    let haystack = &text[region];
    let mut spans = Vec::new();
    let mut cursor = 0;

    while let Some(open) = opener.find_at(haystack, cursor) {
        match boundary.find_at(haystack, open.end()) {
            Some(close) => {
                spans.push(Span::Closed {
                    opener: base + open.start(),
                    inner: base + open.end()..base + close.start(),
                });
                // Resume at the `)`; the next opener is after it.
                cursor = close.start() + 1;
            }
            None => {
                spans.push(Span::Unterminated {
                    opener: base + open.start(),
                });
                cursor = open.end();
            }
        }
    }

    spans
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|c| c[1].to_string())
}

fn capture_number(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text).and_then(|c| c[1].parse::<f64>().ok())
}

/// Locate `name: [` / `name: {` at the top level of a span and return the
/// absolute range strictly between the brackets.
fn nested_region(text: &str, span: &Range<usize>, masked: &str, re: &Regex) -> Option<Range<usize>> {
    let m = re.find(masked)?;
    let open = span.start + m.end() - 1;
    let close = find_closing(text, open)?;
    Some(open + 1..close)
}

/// Extract every definition from one file's text.
pub fn extract_definitions(file_path: &str, content: &str) -> Extraction {
    let index = LineIndex::new(content);
    let code = blank_comments(content);
    let mut extraction = Extraction::default();

    for span in scan_spans(&code, 0..code.len(), &DEFINITION_OPENER, &DEFINITION_BOUNDARY) {
        match span {
            Span::Unterminated { opener } => {
                extraction.dropped.push(DroppedDeclaration {
                    kind: DeclarationKind::Definition,
                    context: index.context_at(file_path, opener),
                    reason: DropReason::Unterminated,
                });
            }
            Span::Closed { opener, inner } => {
                match parse_definition(&code, opener, inner, file_path, &index, &mut extraction)
                {
                    Ok(definition) => extraction.definitions.push(definition),
                    Err(reason) => extraction.dropped.push(DroppedDeclaration {
                        kind: DeclarationKind::Definition,
                        context: index.context_at(file_path, opener),
                        reason,
                    }),
                }
            }
        }
    }

    extraction
}

fn parse_definition(
    content: &str,
    opener: usize,
    inner: Range<usize>,
    file_path: &str,
    index: &LineIndex,
    extraction: &mut Extraction,
) -> Result<Definition, DropReason> {
    let masked = mask_nested(&content[inner.clone()]);

    let id = capture(&ID, &masked).ok_or(DropReason::MissingId)?;
    let title_key = capture(&TITLE_KEY, &masked).ok_or(DropReason::MissingTitleKey)?;

    let fields = match nested_region(content, &inner, &masked, &FIELDS_LIST) {
        Some(region) => parse_fields(content, region, file_path, index, extraction),
        None => Vec::new(),
    };

    let result_labels = match nested_region(content, &inner, &masked, &RESULT_LABELS_MAP) {
        Some(region) => RESULT_LABEL_PAIR
            .captures_iter(&content[region])
            .map(|c| ResultLabel {
                name: c[1].to_string(),
                label_key: c[2].to_string(),
            })
            .collect(),
        None => Vec::new(),
    };

    Ok(Definition {
        id,
        title_key,
        category: capture(&CATEGORY, &masked).unwrap_or_default(),
        sub_category: capture(&SUB_CATEGORY, &masked).unwrap_or_default(),
        computation_ref: capture(&COMPUTATION_REF, &masked),
        fields,
        result_labels,
        location: index.context_at(file_path, opener).location,
    })
}

fn parse_fields(
    content: &str,
    region: Range<usize>,
    file_path: &str,
    index: &LineIndex,
    extraction: &mut Extraction,
) -> Vec<Field> {
    let mut fields = Vec::new();

    for span in scan_spans(content, region, &FIELD_OPENER, &FIELD_BOUNDARY) {
        let (opener, result) = match span {
            Span::Unterminated { opener } => (opener, Err(DropReason::Unterminated)),
            Span::Closed { opener, inner } => (opener, parse_field(&content[inner])),
        };
        match result {
            Ok(field) => fields.push(field),
            Err(reason) => extraction.dropped.push(DroppedDeclaration {
                kind: DeclarationKind::Field,
                context: index.context_at(file_path, opener),
                reason,
            }),
        }
    }

    fields
}

fn parse_field(span: &str) -> Result<Field, DropReason> {
    let masked = mask_nested(span);

    let key = capture(&KEY, &masked).ok_or(DropReason::MissingFieldKey)?;
    let label_key = capture(&LABEL_KEY, &masked).ok_or(DropReason::MissingFieldLabel)?;

    Ok(Field {
        key,
        label_key,
        default_value: capture_number(&DEFAULT_VALUE, &masked).unwrap_or(DEFAULT_FIELD_VALUE),
        min_value: capture_number(&MIN_VALUE, &masked),
        max_value: capture_number(&MAX_VALUE, &masked),
        required: capture(&REQUIRED, &masked)
            .map(|v| v == "true")
            .unwrap_or(true),
    })
}

use serde::{Serialize, Serializer, ser::SerializeMap};

use super::source::SourceLocation;

/// Default for an absent `defaultValue`.
pub const DEFAULT_FIELD_VALUE: f64 = 0.0;

/// One input slot of a definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Unique within the owning definition.
    pub key: String,
    pub label_key: String,
    pub default_value: f64,
    /// `None` means unbounded.
    pub min_value: Option<f64>,
    /// `None` means unbounded.
    pub max_value: Option<f64>,
    pub required: bool,
}

/// An output name and the dotted label key it is displayed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLabel {
    pub name: String,
    pub label_key: String,
}

/// One declared calculator recovered from source text.
///
/// Only `id` and `title_key` are guaranteed; everything else is best effort.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub id: String,
    pub title_key: String,
    pub category: String,
    pub sub_category: String,
    /// Name of the behaviour unit, resolved to a file by naming convention.
    pub computation_ref: Option<String>,
    pub fields: Vec<Field>,
    #[serde(serialize_with = "serialize_result_labels")]
    pub result_labels: Vec<ResultLabel>,
    #[serde(flatten)]
    pub location: SourceLocation,
}

impl Definition {
    /// Every dotted key this definition references, in declaration order:
    /// title, field labels, result labels.
    pub fn label_keys(&self) -> impl Iterator<Item = (LabelRole, &str)> {
        std::iter::once((LabelRole::Title, self.title_key.as_str()))
            .chain(
                self.fields
                    .iter()
                    .map(|f| (LabelRole::Field, f.label_key.as_str())),
            )
            .chain(
                self.result_labels
                    .iter()
                    .map(|r| (LabelRole::Result, r.label_key.as_str())),
            )
    }
}

/// Where in a definition a label key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LabelRole {
    Title,
    Field,
    Result,
}

impl std::fmt::Display for LabelRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelRole::Title => write!(f, "title"),
            LabelRole::Field => write!(f, "field label"),
            LabelRole::Result => write!(f, "result label"),
        }
    }
}

fn serialize_result_labels<S: Serializer>(
    labels: &[ResultLabel],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(labels.len()))?;
    for label in labels {
        map.serialize_entry(&label.name, &label.label_key)?;
    }
    map.end()
}

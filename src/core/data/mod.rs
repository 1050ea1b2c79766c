//! Core data types shared by every pipeline stage.
//!
//! ## Module Structure
//!
//! - `definition`: the extracted model (Definition, Field, ResultLabel)
//! - `source`: source positions (SourceLocation, SourceContext, LineIndex)

pub mod definition;
pub mod source;

pub use definition::{DEFAULT_FIELD_VALUE, Definition, Field, LabelRole, ResultLabel};
pub use source::{LineIndex, SourceContext, SourceLocation};

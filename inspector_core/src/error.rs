// inspector_core/src/error.rs
use crate::inspector::inspector::InspectorState;
use crate::reflect::Value;
use thiserror::Error;

/// Reading or writing a member value failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccessError {
    #[error("type `{type_name}` has no member `{member}`")]
    UnknownMember { type_name: &'static str, member: String },
    #[error("expected a {expected} value, found {found}")]
    TypeMismatch { expected: &'static str, found: &'static str },
    #[error("value {value} is out of range for {target}")]
    OutOfRange { value: String, target: &'static str },
    #[error("expected {expected} elements, found {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("`{variant}` is not a variant of `{type_name}`")]
    UnknownVariant { type_name: &'static str, variant: String },
    #[error("member `{0}` is not readable")]
    NotReadable(String),
    #[error("member `{0}` is not writable")]
    NotWritable(String),
    #[error("member `{0}` is read-only in the inspector")]
    ReadOnly(String),
    #[error("member `{0}` holds a null value")]
    NullMember(String),
    #[error("instance {index} is null")]
    NullReference { index: usize },
    #[error("instance {index} is already borrowed")]
    Borrowed { index: usize },
    #[error("instance index {index} is out of bounds for a selection of {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("instance {index}, member `{path}`")]
    At {
        index: usize,
        path: String,
        #[source]
        source: Box<AccessError>,
    },
    #[error("{0}")]
    Rejected(String),
}

impl AccessError {
    pub fn unknown_member(type_name: &'static str, member: &str) -> Self {
        Self::UnknownMember { type_name, member: member.to_string() }
    }

    pub fn type_mismatch(expected: &'static str, found: &Value) -> Self {
        Self::TypeMismatch { expected, found: found.type_name() }
    }

    /// Attaches the instance index and member path the error happened at.
    pub fn at(self, index: usize, path: impl Into<String>) -> Self {
        Self::At { index, path: path.into(), source: Box::new(self) }
    }

    /// The innermost error, without the location wrappers.
    pub fn root_cause(&self) -> &AccessError {
        match self {
            Self::At { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Selecting the editor for a member failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorResolutionError {
    #[error("no editor is registered for type `{type_name}`")]
    UnknownType { type_name: &'static str },
    #[error("no editor is registered under the name `{name}`")]
    UnknownName { name: String },
    #[error("editor `{editor}` could not be created: {reason}")]
    Instantiation { editor: String, reason: String },
    #[error("editor `{editor}` panicked while being created")]
    Panicked { editor: String },
}

/// Inspector metadata on a member is malformed. Never fatal, the offending
/// key is treated as absent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetadataError {
    #[error("member `{member}` declares `{key}` more than once, the first one is used")]
    Duplicate { member: String, key: &'static str },
    #[error("member `{member}` has an invalid space height {height}")]
    InvalidSpace { member: String, height: f32 },
    #[error("member `{member}` has an empty `{key}`")]
    Empty { member: String, key: &'static str },
}

/// Errors surfaced by the inspector entry points and editors.
#[derive(Debug, Error)]
pub enum InspectorError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Resolution(#[from] EditorResolutionError),
    #[error("the selection is empty")]
    EmptySelection,
    #[error("cannot {operation} while the inspector is {state}")]
    InvalidState { operation: &'static str, state: InspectorState },
}

/// Loading or saving the inspector config failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("config write: {0}")]
    Serialize(#[from] ron::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_cause_skips_location_wrappers() {
        let err = AccessError::NullReference { index: 1 }.at(1, "light.range");
        assert_eq!(err.root_cause(), &AccessError::NullReference { index: 1 });
        assert_eq!(err.to_string(), "instance 1, member `light.range`");
    }
}

use thiserror::Error;

/// Placeholder used in error messages before an element's `name` is known.
pub const UNNAMED: &str = "<unnamed>";

/// Everything that can abort a compilation.
///
/// There is no local recovery: every error propagates to the caller of
/// [`compile`](crate::compile) / [`Element::generate`](crate::Element::generate),
/// and no partial output is produced.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The `type` field names no known element kind.
    #[error("unknown element type {type_name:?}")]
    UnknownType { type_name: String },

    /// A required field is absent.
    #[error("{element}: missing field {field:?}")]
    MissingField { element: String, field: String },

    /// A field is present but has the wrong JSON shape.
    #[error("{element}: field {field:?} must be {expected}")]
    WrongFieldType {
        element: String,
        field: String,
        expected: &'static str,
    },

    /// A color field is a string but not a `#rrggbb[aa]` literal.
    #[error("{element}: invalid color {value:?}")]
    InvalidColor { element: String, value: String },

    /// A structural invariant of a composite element does not hold.
    #[error("{element}: {reason}")]
    Structure { element: String, reason: String },

    /// The renderer could not resolve a referenced asset.
    #[error("{kind} not found: {name:?}")]
    ResourceNotFound { kind: ResourceKind, name: String },

    /// The input is not valid JSON text.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl LayoutError {
    pub(crate) fn structure(element: &str, reason: impl Into<String>) -> Self {
        Self::Structure { element: element.to_string(), reason: reason.into() }
    }
}

/// Which asset table a failed lookup went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Sprite,
    Font,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Sprite => f.write_str("sprite"),
            ResourceKind::Font => f.write_str("font"),
        }
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Raised when a value object cannot be constructed from its inputs.
///
/// Validation happens once, at construction/deserialization time, so no
/// partially-initialized value ever reaches calling code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A mandatory field was omitted or null.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field was present but carried an unusable value.
    #[error("invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Error type for (de)normalization.
///
/// Eligibility checks (`supports_*`) never produce these; they only surface
/// from an actual conversion attempt or from loading definitions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A generic handler was asked to write literal strings into serialized
    /// storage columns. A specialized denormalizer is required for this field.
    #[error(
        "the generic field item normalizer cannot denormalize string values for {} properties of the \"{field_name}\" field (field item class: {target_class})",
        quoted(.property_names)
    )]
    SchemaViolation {
        property_names: Vec<String>,
        field_name: String,
        target_class: String,
    },
    #[error("no normalizer supports {type_name} (format: {format:?})")]
    NoNormalizer {
        type_name: String,
        format: Option<String>,
    },
    #[error("no denormalizer supports {type_name} (format: {format:?})")]
    NoDenormalizer {
        type_name: String,
        format: Option<String>,
    },
    #[error("denormalizing into {type_name} requires a target instance in the context")]
    MissingTargetInstance { type_name: String },
    #[error("{type_name} matched a {capability} handler but does not expose that capability")]
    MissingCapability {
        type_name: String,
        capability: &'static str,
    },
    #[error("invalid definitions: {0}")]
    Definitions(#[from] toml::de::Error),
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

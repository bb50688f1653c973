use super::domain::Event;

/// Configuration faults that abort form composition. There is no degraded
/// output: a partially decorated form would silently drop registration data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormConfigError {
    #[error("unsupported address location '{0}'")]
    UnsupportedLocation(String),
    #[error("unsupported address use case '{0}'")]
    UnsupportedUseCase(String),
    #[error("unsupported field set configuration '{0}'")]
    UnsupportedFieldSet(String),
    #[error("unsupported event '{0}'")]
    UnsupportedEvent(String),
    #[error("administrative levels must be between 1 and 5, got {0}")]
    InvalidAdminLevels(u8),
    #[error("location '{location}' is deeper than the {admin_levels} configured administrative level(s)")]
    TierNotConfigured {
        location: &'static str,
        admin_levels: u8,
    },
    #[error("field set '{config}' requires attribute '{attribute}'")]
    MissingAttribute {
        config: String,
        attribute: &'static str,
    },
    #[error("use case '{use_case}' cannot be placed in a {event} form")]
    EventMismatch {
        use_case: &'static str,
        event: Event,
    },
    #[error("preceding field id '{0}' must have the form event.section.group.field")]
    MalformedFieldId(String),
    #[error("preceding field id '{field_id}' does not resolve: no {segment} '{value}'")]
    UnresolvedField {
        field_id: String,
        segment: &'static str,
        value: String,
    },
    #[error("field '{name}' already exists in group '{group}'")]
    DuplicateFieldName { group: String, name: String },
}

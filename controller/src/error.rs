use thiserror::Error;

/// Errors raised while loading controller or driver settings.
///
/// Runtime movement never fails; only configuration can be rejected.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

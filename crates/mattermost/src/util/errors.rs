use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A resolved dependency is missing a required value.
    #[error("ValidationError: {0}")]
    ValidationError(String),

    /// The declarative spec selects no variant, several variants, or leaves out a
    /// structural field.
    #[error("ConfigurationError: {0}")]
    ConfigurationError(String),

    #[error("MetadataMissing: {0}")]
    MetadataMissing(String),
}

impl Error {
    pub fn metric_label(&self) -> String {
        format!("{self:?}").to_lowercase()
    }

    /// CamelCase reason used on status conditions.
    pub fn reason(&self) -> &'static str {
        match self {
            Error::ValidationError(_) => "ValidationError",
            Error::ConfigurationError(_) => "ConfigurationError",
            Error::MetadataMissing(_) => "MetadataMissing",
        }
    }

    /// The bare message, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::ValidationError(msg) | Error::ConfigurationError(msg) | Error::MetadataMissing(msg) => msg,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_message() {
        let err = Error::ConfigurationError("volume claim name shouldn't be empty".to_string());
        assert_eq!(
            err.to_string(),
            "ConfigurationError: volume claim name shouldn't be empty"
        );
        assert_eq!(err.message(), "volume claim name shouldn't be empty");
        assert_eq!(err.reason(), "ConfigurationError");
    }

    #[test]
    fn test_metric_label_is_lowercase() {
        let err = Error::ValidationError("database name shouldn't be empty".to_string());
        let label = err.metric_label();
        assert!(label.starts_with("validationerror"));
        assert_eq!(label, label.to_lowercase());
    }
}

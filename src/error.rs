/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
///
/// Unresolvable models, columns, controllers and missing translations are not
/// errors: the pipeline degrades locally and only logs them.
#[derive(Debug)]
pub enum Error {
    IoError(std::io::Error),
    /// A pipeline step produced an entity without a field it requires
    ConfigurationContract { call: String, field: String },
    InvalidArgument(String),
    SerializationError(String),
}

impl Error {
    /// Build a contract violation for `field` missing after `call`
    pub fn contract(call: &str, field: &str) -> Self {
        Error::ConfigurationContract {
            call: call.to_string(),
            field: field.to_string(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::IoError(e) => write!(f, "IO error: {}", e),
            Error::ConfigurationContract { call, field } => {
                write!(
                    f,
                    "A required field '{}' was not specified when calling '{}'",
                    field, call
                )
            }
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::SerializationError(format!("YAML error: {}", err))
    }
}

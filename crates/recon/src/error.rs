use std::fmt;

#[derive(Debug)]
pub enum DiffError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (blank name, blank ignore entry, etc.).
    ConfigValidation(String),
    /// An actual metric's name never appears on the expected side
    /// (only raised under `unknown_names = "reject"`).
    UnknownName { name: String },
    /// Report serialization error.
    Serialize(String),
}

impl fmt::Display for DiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::UnknownName { name } => {
                write!(f, "actual metric '{name}' has no expected counterpart")
            }
            Self::Serialize(msg) => write!(f, "serialize error: {msg}"),
        }
    }
}

impl std::error::Error for DiffError {}

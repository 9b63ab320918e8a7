use std::path::PathBuf;

/// Errors that can occur across the Tail'ed crates.
///
/// Library crates return this type directly; the binary renders it through
/// `miette` at the boundary.
///
/// # Examples
///
/// ```
/// use tailed_core::TailedError;
///
/// let err = TailedError::Config("missing GitHub token".into());
/// assert!(err.to_string().contains("missing GitHub token"));
/// ```
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TailedError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    #[diagnostic(help("set the value in .tailed.toml or pass it on the command line"))]
    Config(String),

    /// GitHub API transport, status, or GraphQL error.
    #[error("GitHub error: {0}")]
    GitHub(String),

    /// Input that could not be interpreted (dates, calendar payloads).
    #[error("parse error: {0}")]
    Parse(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A required file was not found.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TailedError = io_err.into();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn config_error_displays_message() {
        let err = TailedError::Config("bad value".into());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn github_error_displays_message() {
        let err = TailedError::GitHub("401 Unauthorized".into());
        assert_eq!(err.to_string(), "GitHub error: 401 Unauthorized");
    }

    #[test]
    fn json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TailedError = json_err.into();
        assert!(err.to_string().starts_with("serialization error"));
    }

    #[test]
    fn file_not_found_shows_path() {
        let err = TailedError::FileNotFound(PathBuf::from("/tmp/calendar.json"));
        assert!(err.to_string().contains("/tmp/calendar.json"));
    }
}

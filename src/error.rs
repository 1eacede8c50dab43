//! Error types and handling for the `AirCheck` client

use thiserror::Error;

/// Prompt shown when the city input is empty
pub const MSG_EMPTY_CITY: &str = "Por favor, digite uma cidade.";
/// Shown on HTTP 404
pub const MSG_CITY_NOT_FOUND: &str = "Cidade não encontrada. Verifique o nome e tente novamente.";
/// Shown on any other non-200, non-400 status
pub const MSG_SERVER_ERROR: &str =
    "Ocorreu um erro ao consultar a qualidade do ar. Tente novamente mais tarde.";
/// Shown when the cycle fails for transport, parsing or rendering reasons
pub const MSG_CONNECTION_ERROR: &str =
    "Erro ao conectar-se com o servidor. Verifique sua conexão ou tente mais tarde.";

/// Main error type for the `AirCheck` client
#[derive(Error, Debug)]
pub enum AirCheckError {
    /// Empty or whitespace-only city input
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// HTTP 400 with a server supplied message
    #[error("Request rejected by server: {message}")]
    Client { message: String },

    /// HTTP 404
    #[error("City not found: {city}")]
    NotFound { city: String },

    /// Any other non-200 status
    #[error("Server responded with status {status}")]
    Server { status: u16 },

    /// Connection refused, DNS failure, body read failure
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Malformed JSON or a missing field in the payload
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// The chart could not be drawn
    #[error("Chart error: {message}")]
    Chart { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl AirCheckError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new client (HTTP 400) error
    pub fn client<S: Into<String>>(message: S) -> Self {
        Self::Client {
            message: message.into(),
        }
    }

    pub fn not_found<S: Into<String>>(city: S) -> Self {
        Self::NotFound { city: city.into() }
    }

    #[must_use]
    pub fn server(status: u16) -> Self {
        Self::Server { status }
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn chart<S: Into<String>>(message: S) -> Self {
        Self::Chart {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get the message shown to the user in place of the report
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AirCheckError::Validation { .. } => MSG_EMPTY_CITY.to_string(),
            AirCheckError::Client { message } => format!("Erro: {message}"),
            AirCheckError::NotFound { .. } => MSG_CITY_NOT_FOUND.to_string(),
            AirCheckError::Server { .. } => MSG_SERVER_ERROR.to_string(),
            AirCheckError::Transport { .. }
            | AirCheckError::Parse { .. }
            | AirCheckError::Chart { .. } => MSG_CONNECTION_ERROR.to_string(),
            AirCheckError::Config { message } => format!("Erro de configuração: {message}"),
            AirCheckError::Io { .. } => {
                "Falha de leitura ou escrita. Verifique as permissões.".to_string()
            }
        }
    }

    /// Whether the underlying detail should only go to the logs
    #[must_use]
    pub fn is_diagnostic_only(&self) -> bool {
        matches!(
            self,
            AirCheckError::Transport { .. } | AirCheckError::Parse { .. } | AirCheckError::Chart { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = AirCheckError::validation("empty city");
        assert!(matches!(err, AirCheckError::Validation { .. }));

        let err = AirCheckError::server(503);
        assert!(matches!(err, AirCheckError::Server { status: 503 }));

        let err = AirCheckError::transport("connection refused");
        assert!(matches!(err, AirCheckError::Transport { .. }));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AirCheckError::validation("x").user_message(),
            "Por favor, digite uma cidade."
        );
        assert_eq!(
            AirCheckError::client("invalid city name").user_message(),
            "Erro: invalid city name"
        );
        assert_eq!(
            AirCheckError::not_found("Atlantis").user_message(),
            MSG_CITY_NOT_FOUND
        );
        assert_eq!(AirCheckError::server(500).user_message(), MSG_SERVER_ERROR);
    }

    #[test]
    fn test_internal_detail_not_surfaced() {
        let err = AirCheckError::transport("tcp connect error: 127.0.0.1:5000");
        assert_eq!(err.user_message(), MSG_CONNECTION_ERROR);
        assert!(!err.user_message().contains("127.0.0.1"));
        assert!(err.is_diagnostic_only());

        let err = AirCheckError::parse("missing field `O3`");
        assert_eq!(err.user_message(), MSG_CONNECTION_ERROR);

        let err = AirCheckError::chart("empty drawing area");
        assert_eq!(err.user_message(), MSG_CONNECTION_ERROR);
    }

    #[test]
    fn test_server_status_not_shown() {
        let msg = AirCheckError::server(502).user_message();
        assert!(!msg.contains("502"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: AirCheckError = io_err.into();
        assert!(matches!(err, AirCheckError::Io { .. }));
    }
}

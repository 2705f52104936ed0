use thiserror::Error;

/// Provider-side faults that get their own retry hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerFault {
    Internal,
    BadGateway,
    Unavailable,
    GatewayTimeout,
}

impl ServerFault {
    pub fn status(&self) -> u16 {
        match self {
            ServerFault::Internal => 500,
            ServerFault::BadGateway => 502,
            ServerFault::Unavailable => 503,
            ServerFault::GatewayTimeout => 504,
        }
    }

    fn category(&self) -> &'static str {
        match self {
            ServerFault::Internal => "Internal Server Error",
            ServerFault::BadGateway => "Bad Gateway",
            ServerFault::Unavailable => "Service Unavailable",
            ServerFault::GatewayTimeout => "Gateway Timeout",
        }
    }

    fn hint(&self) -> &'static str {
        match self {
            ServerFault::Internal => "Please try again later.",
            ServerFault::BadGateway => "Invalid response from the server.",
            ServerFault::Unavailable => "Server is down.",
            ServerFault::GatewayTimeout => "No response from the server.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Connect,
    Timeout,
    Redirect,
    Other,
}

impl TransportKind {
    pub fn of(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportKind::Timeout
        } else if err.is_connect() {
            TransportKind::Connect
        } else if err.is_redirect() {
            TransportKind::Redirect
        } else {
            TransportKind::Other
        }
    }
}

/// Coarse classification of a [`WeatherError`], handy for logging and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingCredential,
    EmptyInput,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    ServerError,
    Transport,
    Parse,
    OtherHttp,
}

/// Every way a lookup can fail. `Display` renders the two-line
/// "category / hint" message shown in the window.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    #[error("Configuration Error:\nAPI key not found.")]
    MissingCredential,

    #[error("Input Error:\nPlease enter a city name.")]
    EmptyInput,

    #[error("Bad Request:\nCheck your input.")]
    BadRequest,

    #[error("Unauthorized:\nInvalid API key.")]
    Unauthorized,

    #[error("Forbidden:\nAccess is denied.")]
    Forbidden,

    #[error("Not Found:\nCity not found.")]
    NotFound,

    #[error("{}:\n{}", server_category(.0), server_hint(.0))]
    ServerError(ServerFault),

    #[error("{}:\n{}", transport_category(.kind), transport_hint(.kind, .detail))]
    Transport { kind: TransportKind, detail: String },

    #[error("Parse Error:\nError parsing data.")]
    Parse { detail: String },

    #[error("HTTP Error:\n{}", other_http_hint(.status, .detail))]
    OtherHttp { status: Option<u16>, detail: String },
}

impl WeatherError {
    /// Total mapping from an HTTP status code to an error. Only meaningful for
    /// non-success codes; anything not listed lands in `OtherHttp`.
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        match status {
            400 => WeatherError::BadRequest,
            401 => WeatherError::Unauthorized,
            403 => WeatherError::Forbidden,
            404 => WeatherError::NotFound,
            500 => WeatherError::ServerError(ServerFault::Internal),
            502 => WeatherError::ServerError(ServerFault::BadGateway),
            503 => WeatherError::ServerError(ServerFault::Unavailable),
            504 => WeatherError::ServerError(ServerFault::GatewayTimeout),
            other => WeatherError::OtherHttp {
                status: Some(other),
                detail: detail.into(),
            },
        }
    }

    pub fn transport(err: &reqwest::Error) -> Self {
        WeatherError::Transport {
            kind: TransportKind::of(err),
            detail: err.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::MissingCredential => ErrorKind::MissingCredential,
            WeatherError::EmptyInput => ErrorKind::EmptyInput,
            WeatherError::BadRequest => ErrorKind::BadRequest,
            WeatherError::Unauthorized => ErrorKind::Unauthorized,
            WeatherError::Forbidden => ErrorKind::Forbidden,
            WeatherError::NotFound => ErrorKind::NotFound,
            WeatherError::ServerError(_) => ErrorKind::ServerError,
            WeatherError::Transport { .. } => ErrorKind::Transport,
            WeatherError::Parse { .. } => ErrorKind::Parse,
            WeatherError::OtherHttp { .. } => ErrorKind::OtherHttp,
        }
    }
}

fn server_category(fault: &ServerFault) -> &'static str {
    fault.category()
}

fn server_hint(fault: &ServerFault) -> &'static str {
    fault.hint()
}

fn transport_category(kind: &TransportKind) -> &'static str {
    match kind {
        TransportKind::Connect => "Connection Error",
        TransportKind::Timeout => "Timeout Error",
        TransportKind::Redirect => "Too Many Redirects",
        TransportKind::Other => "Request Error",
    }
}

fn transport_hint(kind: &TransportKind, detail: &str) -> String {
    match kind {
        TransportKind::Connect => "Check your internet connection.".to_string(),
        TransportKind::Timeout => "The request timed out.".to_string(),
        TransportKind::Redirect => "Check the URL.".to_string(),
        TransportKind::Other => detail.to_string(),
    }
}

fn other_http_hint(status: &Option<u16>, detail: &str) -> String {
    match status {
        Some(code) => format!("{}: {}", code, detail),
        None => detail.to_string(),
    }
}

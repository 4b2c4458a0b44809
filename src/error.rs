use std::error::Error;
use std::fmt;

/// Error returned by bus operations.
///
/// Listener failures never surface here; the bus only reports misuse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// The bus was shut down and no longer accepts registrations or publishes.
    Closed,
    /// A listener published from inside a delivery pass that was already
    /// nested `depth` levels deep.
    TooDeep { depth: usize },
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::Closed => write!(f, "whisper bus has been shut down"),
            BusError::TooDeep { depth } => {
                write!(f, "nested publish refused at depth {}", depth)
            }
        }
    }
}

impl Error for BusError {}

/// Error a listener callback may return while handling a whisper.
#[derive(Debug)]
pub enum ListenerError {
    /// The listener refused the whisper.
    Rejected(String),
    /// Anything else that went wrong inside the listener.
    Other(Box<dyn Error + Send + Sync>),
}

impl ListenerError {
    /// Wrap an arbitrary error.
    pub fn other(err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        ListenerError::Other(err.into())
    }
}

impl fmt::Display for ListenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerError::Rejected(msg) => write!(f, "whisper rejected: {}", msg),
            ListenerError::Other(e) => write!(f, "listener error: {}", e),
        }
    }
}

impl Error for ListenerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ListenerError::Other(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<BusError> for ListenerError {
    fn from(err: BusError) -> Self {
        ListenerError::Other(Box::new(err))
    }
}

/// Error type for the inbound and outbound bridges.
#[derive(Debug)]
pub enum BridgeError {
    /// The target address could not be turned into a listener identifier.
    InvalidAddress(String),
    /// A payload could not be encoded or decoded.
    Encode(String),
    /// The outbound transport failed before a response was received.
    Http(String),
    /// The remote end answered with a non-success status.
    Status(u16),
    /// The bus refused the publish.
    Bus(BusError),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::InvalidAddress(addr) => write!(f, "invalid address: {:?}", addr),
            BridgeError::Encode(msg) => write!(f, "encode failed: {}", msg),
            BridgeError::Http(msg) => write!(f, "http request failed: {}", msg),
            BridgeError::Status(code) => write!(f, "remote returned status {}", code),
            BridgeError::Bus(e) => write!(f, "bus error: {}", e),
        }
    }
}

impl Error for BridgeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BridgeError::Bus(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BusError> for BridgeError {
    fn from(err: BusError) -> Self {
        BridgeError::Bus(err)
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Encode(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => BridgeError::Status(status.as_u16()),
            None => BridgeError::Http(err.to_string()),
        }
    }
}

impl BridgeError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            BridgeError::InvalidAddress(_) => 400,
            BridgeError::Encode(_) => 400,
            BridgeError::Http(_) => 502,
            BridgeError::Status(_) => 502,
            BridgeError::Bus(BusError::Closed) => 503,
            BridgeError::Bus(BusError::TooDeep { .. }) => 508,
        }
    }
}

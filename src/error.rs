//! Crate-level error type.
//!
//! Transport, JSON-RPC, decoding and validation failures all surface as
//! [`Error`] so query callers can tell "the node failed" apart from "the
//! input was malformed" and from "the contract returned nothing usable".

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Connection, TLS or body-read failure in the HTTP client.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The RPC endpoint answered with a non-success status code.
    #[error("rpc endpoint returned HTTP {0}")]
    HttpStatus(u16),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The node returned a JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("rpc response has no string result field")]
    MissingResult,

    #[error("invalid hex data: {0}")]
    InvalidHex(String),

    #[error("response too short: need {needed} bytes, got {got}")]
    ShortResponse { needed: usize, got: usize },

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid order id: {0}")]
    InvalidOrderId(String),

    /// An enum word (asset type, status) holds a value the contract never emits.
    #[error("unknown {field} discriminant {value}")]
    InvalidDiscriminant { field: &'static str, value: u64 },

    #[error("numeric overflow in {0}")]
    Overflow(&'static str),
}

impl Error {
    /// Whether the failure happened at the transport level and is worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Http(_) | Error::HttpStatus(_))
    }
}

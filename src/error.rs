/// Error types for the deniable encryption library
#[derive(Debug, thiserror::Error)]
pub enum DeniableError {
    /// Scalar string is not a decimal integer in the accepted range
    #[error("Invalid scalar: {0}")]
    InvalidScalar(String),
    /// Plaintext or ciphertext integer failed to parse
    #[error("Invalid integer: {0}")]
    InvalidInteger(String),
    /// Hex string could not be decoded
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    /// Bytes do not encode a valid curve point
    #[error("Invalid point encoding: {0}")]
    InvalidPoint(String),
    /// Invalid parameter provided (e.g., a search bound that overflows)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// The operating system's random source could not be read
    #[error("Entropy source failure: {0}")]
    Entropy(String),
    /// JSON record could not be (de)serialized
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

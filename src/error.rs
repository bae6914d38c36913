use thiserror::Error;

#[derive(Error, Debug)]
pub enum MotifError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown symbol '{symbol}' at position {position}")]
    UnknownSymbol { position: usize, symbol: char },

    #[error("Degenerate weights: total weight must be positive and finite")]
    DegenerateWeights,

    #[error("Invalid parameter: {name} = {value}, {message}")]
    InvalidParameter {
        name: String,
        value: String,
        message: String,
    },

    #[error("Data error: {0}")]
    DataError(String),
}

/// Type alias for Result with MotifError
pub type Result<T> = std::result::Result<T, MotifError>;

impl MotifError {
    /// Create a new InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        MotifError::InvalidInput(message.into())
    }

    /// Create a new UnknownSymbol error from a raw byte
    pub fn unknown_symbol(position: usize, symbol: u8) -> Self {
        MotifError::UnknownSymbol {
            position,
            symbol: symbol as char,
        }
    }

    /// Create a new InvalidParameter error
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: impl ToString,
        message: impl Into<String>,
    ) -> Self {
        MotifError::InvalidParameter {
            name: name.into(),
            value: value.to_string(),
            message: message.into(),
        }
    }
}

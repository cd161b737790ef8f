use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetParseError {
    #[error("Monthly document yielded no usable rows ({0} raw rows scanned)")]
    EmptyMonthlySeries(usize),

    #[error("Holdings document yielded no usable rows ({0} raw rows scanned)")]
    EmptyHoldings(usize),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SheetParseError>;

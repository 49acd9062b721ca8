use std::fmt::{self, Display, Formatter};

#[derive(Debug)]
pub enum Error {
    InvalidRange(String),
    Write(csv::Error),
    Io(std::io::Error),
}

impl Error {
    pub fn invalid_range(msg: &str) -> Self {
        Self::InvalidRange(msg.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Self::Write(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange(msg) => write!(f, "Invalid date range: {msg}"),
            Self::Write(e) => write!(f, "Suggestion output error: {e}"),
            Self::Io(e) => write!(f, "Suggestion output error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

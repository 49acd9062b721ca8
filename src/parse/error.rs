use std::fmt::{self, Display, Formatter};

#[derive(Debug)]
pub enum Error {
    HtmlParse(String),
}

impl Error {
    pub fn html_parse_error(msg: &str) -> Self {
        Self::HtmlParse(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "HTML Parse Error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

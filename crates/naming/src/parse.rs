use crate::NamingPattern;
use crate::error::{Error, ErrorKind};
use std::str::FromStr;

impl FromStr for NamingPattern {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "source-number" | "number" => Ok(NamingPattern::SourceNumber),
            "sequence" | "seq" => Ok(NamingPattern::Sequence),
            "token-only" | "token" => Ok(NamingPattern::TokenOnly),
            "date-stamp" | "date" => Ok(NamingPattern::DateStamp),
            _ => exn::bail!(ErrorKind::UnknownPattern(s.to_string())),
        }
    }
}

use std::path::Path;
use std::str::FromStr;

use ::lazy_regex::{lazy_regex, Lazy, Regex};
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid contest slug '{0}'")]
    InvalidSlug(String),
}

static RE_CONTEST_SLUG: Lazy<Regex> = lazy_regex!(r"^[0-9A-Za-z_-]+$");

/// Contest identification as it appears in URL paths.
/// (e.g.) "abc204", "arc121", "tenka1-2012-qualB"
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContestId(String);

impl ContestId {
    pub fn new(slug: impl AsRef<str>) -> Result<Self> {
        let slug = slug.as_ref();
        if RE_CONTEST_SLUG.is_match(slug) {
            Ok(Self(slug.to_owned()))
        } else {
            Err(Error::InvalidSlug(slug.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for ContestId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ContestId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl std::fmt::Display for ContestId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContestId {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl AsRef<Path> for ContestId {
    fn as_ref(&self) -> &Path {
        self.0.as_ref()
    }
}

impl From<ContestId> for String {
    fn from(value: ContestId) -> Self {
        value.0
    }
}

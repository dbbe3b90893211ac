//! Values returned across the module boundary

use cuecast_common::{Error, Result};
use std::fmt;

/// Non-empty name of a media item (filename or path)
///
/// Resolving the name to a file is the host's business.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackName(String);

impl TrackName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidInput("track name must not be empty".to_string()));
        }
        Ok(Self(name))
    }

    /// Literal names compiled into this crate's modules
    pub(crate) fn from_static(name: &'static str) -> Self {
        debug_assert!(!name.is_empty());
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for TrackName {
    type Error = Error;

    fn try_from(name: String) -> Result<Self> {
        Self::new(name)
    }
}

impl TryFrom<&str> for TrackName {
    type Error = Error;

    fn try_from(name: &str) -> Result<Self> {
        Self::new(name)
    }
}

impl AsRef<str> for TrackName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata answer: a non-empty display string, or "no metadata"
///
/// An empty string is normalized to "no metadata" so it can never be mistaken
/// for a title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata(Option<String>);

impl Metadata {
    /// No metadata; the host falls back to the file
    pub fn none() -> Self {
        Self(None)
    }

    pub fn new(text: impl Into<String>) -> Self {
        Self::from_option(Some(text.into()))
    }

    pub fn from_option(text: Option<String>) -> Self {
        Self(text.filter(|t| !t.is_empty()))
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn into_option(self) -> Option<String> {
        self.0
    }
}

impl From<Option<String>> for Metadata {
    fn from(text: Option<String>) -> Self {
        Self::from_option(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_track_name_rejected() {
        assert!(matches!(TrackName::new(""), Err(Error::InvalidInput(_))));
        assert!(TrackName::try_from(String::new()).is_err());
    }

    #[test]
    fn test_track_name_keeps_text() {
        let name = TrackName::try_from("/music/song.ogg").unwrap();
        assert_eq!(name.as_str(), "/music/song.ogg");
        assert_eq!(name.to_string(), "/music/song.ogg");
        assert_eq!(name.into_string(), "/music/song.ogg");
    }

    #[test]
    fn test_empty_metadata_is_none() {
        let metadata = Metadata::new("");
        assert!(!metadata.is_present());
        assert_eq!(metadata, Metadata::none());
        assert_eq!(Metadata::from(Some(String::new())), Metadata::none());
    }

    #[test]
    fn test_metadata_text() {
        let metadata = Metadata::new("Artist - Title");
        assert!(metadata.is_present());
        assert_eq!(metadata.as_str(), Some("Artist - Title"));
        assert_eq!(metadata.into_option(), Some("Artist - Title".to_string()));
        assert_eq!(Metadata::default(), Metadata::none());
    }
}

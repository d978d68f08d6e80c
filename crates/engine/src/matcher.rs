// crates/engine/src/matcher.rs
//! Base-name matching and replacement.
//!
//! The old substring is compiled as an escaped literal, so regex
//! metacharacters in user input carry no special meaning. Case-insensitive
//! mode relies on the regex engine's Unicode simple case folding; only the
//! matched spans are replaced, everything else keeps its original casing.

use crate::error::{EngineError, Result};
use regex::bytes::{NoExpand, Regex, RegexBuilder};
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};

/// Matches against the raw bytes of a name, so names that are not valid
/// UTF-8 are still searched and everything around the match is preserved.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    pattern: Regex,
    replacement: Vec<u8>,
}

impl NameMatcher {
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] if `old` is empty or the literal
    /// pattern cannot be compiled (e.g. it exceeds the regex size limit).
    pub fn new(old: &str, new: &str, case_sensitive: bool) -> Result<Self> {
        if old.is_empty() {
            return Err(EngineError::InvalidInput(
                "old substring must not be empty".to_string(),
            ));
        }
        let pattern = RegexBuilder::new(&regex::escape(old))
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| EngineError::InvalidInput(e.to_string()))?;
        Ok(Self {
            pattern,
            replacement: new.as_bytes().to_vec(),
        })
    }

    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name.as_bytes())
    }

    /// Replace every non-overlapping occurrence, scanning left to right.
    ///
    /// Returns `Cow::Borrowed` when nothing matched.
    #[must_use]
    pub fn replace<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self.pattern.replace_all(name.as_bytes(), NoExpand(&self.replacement)) {
            Cow::Borrowed(_) => Cow::Borrowed(name),
            // Matches are whole UTF-8 sequences, so the result stays valid.
            Cow::Owned(bytes) => Cow::Owned(
                String::from_utf8(bytes)
                    .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()),
            ),
        }
    }

    #[must_use]
    pub fn matches_os(&self, name: &OsStr) -> bool {
        name_bytes(name).is_some_and(|bytes| self.pattern.is_match(bytes))
    }

    /// [`replace`](Self::replace) for names straight from the filesystem.
    #[must_use]
    pub fn replace_os<'a>(&self, name: &'a OsStr) -> Cow<'a, OsStr> {
        let Some(bytes) = name_bytes(name) else {
            return Cow::Borrowed(name);
        };
        match self.pattern.replace_all(bytes, NoExpand(&self.replacement)) {
            Cow::Borrowed(_) => Cow::Borrowed(name),
            Cow::Owned(replaced) => {
                name_from_bytes(replaced).map_or(Cow::Borrowed(name), Cow::Owned)
            }
        }
    }
}

#[cfg(unix)]
fn name_bytes(name: &OsStr) -> Option<&[u8]> {
    use std::os::unix::ffi::OsStrExt;
    Some(name.as_bytes())
}

#[cfg(unix)]
fn name_from_bytes(bytes: Vec<u8>) -> Option<OsString> {
    use std::os::unix::ffi::OsStringExt;
    Some(OsString::from_vec(bytes))
}

// Elsewhere names are not plain bytes; only the Unicode ones can be edited.
#[cfg(not(unix))]
fn name_bytes(name: &OsStr) -> Option<&[u8]> {
    name.to_str().map(str::as_bytes)
}

#[cfg(not(unix))]
fn name_from_bytes(bytes: Vec<u8>) -> Option<OsString> {
    String::from_utf8(bytes).ok().map(OsString::from)
}

//! Scope selector: the selector of the container preview styles are confined to

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from validating a scope selector
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("Scope selector is empty")]
    Empty,

    #[error("Scope selector must be a single class, id or tag selector: {0}")]
    NotSimple(String),

    #[error("Scope selector names a void element that cannot contain markup: {0}")]
    VoidElement(String),
}

pub type ScopeResult<T> = Result<T, ScopeError>;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Element that a scope selector matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Container {
    Class(String),
    Id(String),
    Tag(String),
}

/// A validated simple selector such as `.preview`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScopeSelector {
    text: String,
    container: Container,
}

/// Class of the container the preview is rendered into by default
pub const DEFAULT_SCOPE_CLASS: &str = "preview";

impl Default for ScopeSelector {
    fn default() -> Self {
        Self {
            text: format!(".{}", DEFAULT_SCOPE_CLASS),
            container: Container::Class(DEFAULT_SCOPE_CLASS.to_string()),
        }
    }
}

impl ScopeSelector {
    pub fn parse(selector: &str) -> ScopeResult<Self> {
        let text = selector.trim();
        if text.is_empty() {
            return Err(ScopeError::Empty);
        }

        let container = if let Some(name) = text.strip_prefix('.') {
            Container::Class(ident(name, text)?.to_string())
        } else if let Some(name) = text.strip_prefix('#') {
            Container::Id(ident(name, text)?.to_string())
        } else {
            let tag = ident(text, text)?.to_ascii_lowercase();
            if VOID_ELEMENTS.contains(&tag.as_str()) {
                return Err(ScopeError::VoidElement(tag));
            }
            Container::Tag(tag)
        };

        Ok(Self {
            text: text.to_string(),
            container,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Opening tag of an element matched by this selector
    pub fn open_tag(&self) -> String {
        match &self.container {
            Container::Class(name) => format!("<div class=\"{}\">", name),
            Container::Id(name) => format!("<div id=\"{}\">", name),
            Container::Tag(tag) => format!("<{}>", tag),
        }
    }

    pub fn close_tag(&self) -> String {
        match &self.container {
            Container::Class(_) | Container::Id(_) => "</div>".to_string(),
            Container::Tag(tag) => format!("</{}>", tag),
        }
    }
}

fn ident<'a>(name: &'a str, selector: &str) -> ScopeResult<&'a str> {
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '-')
        && name.chars().all(is_ident_char);

    if valid {
        Ok(name)
    } else {
        Err(ScopeError::NotSimple(selector.to_string()))
    }
}

pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

impl TryFrom<String> for ScopeSelector {
    type Error = ScopeError;

    fn try_from(value: String) -> ScopeResult<Self> {
        Self::parse(&value)
    }
}

impl From<ScopeSelector> for String {
    fn from(selector: ScopeSelector) -> Self {
        selector.text
    }
}

impl std::str::FromStr for ScopeSelector {
    type Err = ScopeError;

    fn from_str(s: &str) -> ScopeResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ScopeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_class_selector() {
        let scope = ScopeSelector::parse(" .preview ").unwrap();
        assert_eq!(scope.as_str(), ".preview");
        assert_eq!(scope.container(), &Container::Class("preview".to_string()));
        assert_eq!(scope.open_tag(), "<div class=\"preview\">");
        assert_eq!(scope.close_tag(), "</div>");
    }

    #[test]
    fn test_parse_id_and_tag_selectors() {
        let scope = ScopeSelector::parse("#repl-target").unwrap();
        assert_eq!(scope.open_tag(), "<div id=\"repl-target\">");

        let scope = ScopeSelector::parse("MAIN").unwrap();
        assert_eq!(scope.open_tag(), "<main>");
        assert_eq!(scope.close_tag(), "</main>");
    }

    #[test]
    fn test_reject_invalid_selectors() {
        assert_eq!(ScopeSelector::parse("  "), Err(ScopeError::Empty));
        assert!(matches!(
            ScopeSelector::parse(".a .b"),
            Err(ScopeError::NotSimple(_))
        ));
        assert!(matches!(
            ScopeSelector::parse(".a, .b"),
            Err(ScopeError::NotSimple(_))
        ));
        assert!(matches!(
            ScopeSelector::parse("."),
            Err(ScopeError::NotSimple(_))
        ));
        assert!(matches!(
            ScopeSelector::parse(".1x"),
            Err(ScopeError::NotSimple(_))
        ));
        assert_eq!(
            ScopeSelector::parse("img"),
            Err(ScopeError::VoidElement("img".to_string()))
        );
    }

    #[test]
    fn test_default_matches_parsed() {
        assert_eq!(ScopeSelector::default(), ScopeSelector::parse(".preview").unwrap());
    }

    #[test]
    fn test_deserialize_from_string() {
        let scope: ScopeSelector = serde_json::from_str("\".preview\"").unwrap();
        assert_eq!(scope.as_str(), ".preview");

        let result: Result<ScopeSelector, _> = serde_json::from_str("\"a b\"");
        assert!(result.is_err());
    }
}

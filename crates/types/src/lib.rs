//! # FindThem Types
//!
//! Small validated primitives shared by the FindThem crates.
//!
//! - [`NonEmptyText`] for values that must carry at least one visible character
//! - [`PersonId`] for case identifiers that arrive as either JSON numbers or strings

use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("text must contain at least one non-whitespace character")]
    Empty,
}

#[derive(Debug, thiserror::Error)]
pub enum PersonIdError {
    #[error("person id cannot be empty")]
    Empty,
}

/// Trimmed text with at least one visible character, used for configuration
/// values such as the backend base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        match input.as_ref().trim() {
            "" => Err(TextError::Empty),
            text => Ok(Self(text.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Identifier of a missing-person case.
///
/// The backend stores ids as integers while the page passes them around as
/// `data-person-id` attribute strings, so both forms are accepted and compared
/// loosely: `7` and `"7"` (and `"7.0"`) name the same case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonId(String);

impl PersonId {
    /// Parses an id from attribute or form text.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, PersonIdError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PersonIdError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the id exactly as it should appear in markup and request bodies.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Loose equality between ids that may differ only in numeric spelling.
    pub fn matches(&self, other: &PersonId) -> bool {
        if self.0 == other.0 {
            return true;
        }
        match (self.0.parse::<f64>(), other.0.parse::<f64>()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl From<u64> for PersonId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl serde::Serialize for PersonId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PersonId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct PersonIdVisitor;

        impl serde::de::Visitor<'_> for PersonIdVisitor {
            type Value = PersonId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a person id as a string or number")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<PersonId, E> {
                Ok(PersonId::from(v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<PersonId, E> {
                Ok(PersonId(v.to_string()))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<PersonId, E> {
                Ok(PersonId(v.to_string()))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<PersonId, E> {
                PersonId::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(PersonIdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Jane  ").unwrap();
        assert_eq!(text.as_str(), "Jane");
    }

    #[test]
    fn non_empty_text_rejects_whitespace() {
        assert!(matches!(NonEmptyText::new("   "), Err(TextError::Empty)));
    }

    #[test]
    fn person_id_accepts_numbers_and_strings() {
        let from_number: PersonId = serde_json::from_str("7").unwrap();
        let from_string: PersonId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(from_number.as_str(), "7");
        assert!(from_number.matches(&from_string));
    }

    #[test]
    fn person_id_matches_numeric_spellings() {
        let a = PersonId::parse("7").unwrap();
        let b = PersonId::parse("7.0").unwrap();
        let c = PersonId::parse("8").unwrap();
        assert!(a.matches(&b));
        assert!(!a.matches(&c));
    }

    #[test]
    fn person_id_rejects_empty_attribute() {
        assert!(matches!(PersonId::parse(" "), Err(PersonIdError::Empty)));
        assert!(serde_json::from_str::<PersonId>("\"\"").is_err());
    }

    #[test]
    fn person_id_serializes_as_string() {
        let id = PersonId::from(12);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"12\"");
    }
}

//! Course module - identifiers and prerequisite records

use std::borrow::Borrow;
use std::fmt;

/// Course identifier, e.g. `COMP3506`
///
/// Identifiers are opaque: the usual shape is an alphabetic subject prefix
/// followed by a numeric code, but ids that do not follow it are still valid
/// graph keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CourseId(String);

impl CourseId {
    /// Create a CourseId from any string without validation
    ///
    /// # Examples
    ///
    /// ```
    /// use coursemap_domain::CourseId;
    ///
    /// let id = CourseId::new("COMP3506");
    /// assert_eq!(id.as_str(), "COMP3506");
    /// ```
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parse a CourseId from user or catalog input
    ///
    /// Surrounding whitespace is trimmed. Empty input is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use coursemap_domain::CourseId;
    ///
    /// let id = CourseId::parse("  MATH1051 ").unwrap();
    /// assert_eq!(id.as_str(), "MATH1051");
    /// assert!(CourseId::parse("   ").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Course id must not be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split a `PREFIX + DIGITS` identifier into its subject prefix and numeric code
    ///
    /// Returns `None` when the id does not have exactly that shape (for
    /// example a missing prefix, trailing letters, or a code too large for
    /// `u64`).
    ///
    /// # Examples
    ///
    /// ```
    /// use coursemap_domain::CourseId;
    ///
    /// assert_eq!(CourseId::new("COMP3506").code_parts(), Some(("COMP", 3506)));
    /// assert_eq!(CourseId::new("COMP35X").code_parts(), None);
    /// ```
    pub fn code_parts(&self) -> Option<(&str, u64)> {
        let split = self
            .0
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(self.0.len());
        let (prefix, digits) = self.0.split_at(split);

        if prefix.is_empty() || digits.is_empty() {
            return None;
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        digits.parse().ok().map(|code| (prefix, code))
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CourseId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for CourseId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CourseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A course and the ids of its direct prerequisites
///
/// Prerequisite ids are references by value. They may name courses that the
/// catalog never returned; consumers must tolerate such dangling ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
    /// Unique identifier
    pub id: CourseId,

    /// Direct prerequisites, in catalog order
    pub prerequisite_ids: Vec<CourseId>,
}

impl CourseRecord {
    /// Create a new record
    pub fn new(id: CourseId, prerequisite_ids: Vec<CourseId>) -> Self {
        Self {
            id,
            prerequisite_ids,
        }
    }

    /// Create a record with no prerequisites
    pub fn standalone(id: CourseId) -> Self {
        Self::new(id, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_rejects_empty() {
        assert_eq!(CourseId::parse(" CSSE1001\n").unwrap().as_str(), "CSSE1001");
        assert!(CourseId::parse("").is_err());
        assert!(CourseId::parse(" \t ").is_err());
    }

    #[test]
    fn test_code_parts() {
        assert_eq!(CourseId::new("COMP3506").code_parts(), Some(("COMP", 3506)));
        assert_eq!(CourseId::new("MATH1051").code_parts(), Some(("MATH", 1051)));
        assert_eq!(CourseId::new("COMP0007").code_parts(), Some(("COMP", 7)));
    }

    #[test]
    fn test_code_parts_rejects_other_shapes() {
        assert_eq!(CourseId::new("3506").code_parts(), None);
        assert_eq!(CourseId::new("COMP").code_parts(), None);
        assert_eq!(CourseId::new("COMP35A").code_parts(), None);
        assert_eq!(CourseId::new("COMP 3506").code_parts(), None);
        assert_eq!(CourseId::new("COMP99999999999999999999999").code_parts(), None);
    }

    #[test]
    fn test_display_and_borrow() {
        let id = CourseId::from("INFS1200");
        assert_eq!(id.to_string(), "INFS1200");

        let set: std::collections::HashSet<CourseId> = [id].into_iter().collect();
        assert!(set.contains("INFS1200"));
    }

    #[test]
    fn test_record_constructors() {
        let record = CourseRecord::new(
            CourseId::new("COMP3506"),
            vec![CourseId::new("CSSE2002"), CourseId::new("MATH1061")],
        );
        assert_eq!(record.prerequisite_ids.len(), 2);
        assert!(CourseRecord::standalone(CourseId::new("X1")).prerequisite_ids.is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: well-formed ids always split back into their parts
        #[test]
        fn test_code_parts_roundtrip(prefix in "[A-Z]{2,6}", code in 0u64..1_000_000) {
            let id = CourseId::new(format!("{}{}", prefix, code));
            prop_assert_eq!(id.code_parts(), Some((prefix.as_str(), code)));
        }

        /// Property: parsing never yields an id with surrounding whitespace
        #[test]
        fn test_parse_is_trimmed(raw in "\\PC{0,12}") {
            if let Ok(id) = CourseId::parse(&raw) {
                prop_assert_eq!(id.as_str(), id.as_str().trim());
                prop_assert!(!id.as_str().is_empty());
            }
        }
    }
}

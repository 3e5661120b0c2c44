//! Matchers for `where` criteria.
//!
//! A [`Matcher`] decides whether a single field value satisfies a criterion.
//! [`Criteria`] groups matchers by field name; a record satisfies the
//! criteria when every matcher accepts the record's value for its field.

use std::cmp::Ordering;
use std::fmt;

use regex::Regex;

use crate::error::Result;
use crate::record::Record;
use crate::value::{Number, Value};

/// A partial-text pattern.
///
/// Patterns are tested against a field value rendered as text (see
/// [`Value::to_text`]). None of them requires the whole text to match.
#[derive(Debug, Clone)]
pub enum TextPattern {
    /// Text starts with the prefix.
    StartsWith(String),
    /// Text ends with the suffix.
    EndsWith(String),
    /// Text contains the substring.
    Contains(String),
    /// Regular expression found anywhere in the text.
    Regex(Regex),
}

impl TextPattern {
    /// Tests the pattern against `text`.
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            TextPattern::StartsWith(prefix) => text.starts_with(prefix.as_str()),
            TextPattern::EndsWith(suffix) => text.ends_with(suffix.as_str()),
            TextPattern::Contains(needle) => text.contains(needle.as_str()),
            TextPattern::Regex(regex) => regex.is_match(text),
        }
    }
}

impl PartialEq for TextPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TextPattern::StartsWith(a), TextPattern::StartsWith(b))
            | (TextPattern::EndsWith(a), TextPattern::EndsWith(b))
            | (TextPattern::Contains(a), TextPattern::Contains(b)) => a == b,
            (TextPattern::Regex(a), TextPattern::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl fmt::Display for TextPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextPattern::StartsWith(s) => write!(f, "^= {s:?}"),
            TextPattern::EndsWith(s) => write!(f, "$= {s:?}"),
            TextPattern::Contains(s) => write!(f, "*= {s:?}"),
            TextPattern::Regex(regex) => write!(f, "~ /{}/", regex.as_str()),
        }
    }
}

/// Comparison rule for one `where` criterion.
///
/// # Example
///
/// ```
/// use fluent_query::{Matcher, Value};
///
/// let literal = Matcher::literal("barber");
/// assert!(literal.matches(Some(&Value::from("barber"))));
/// assert!(!literal.matches(Some(&Value::from("barbers"))));
///
/// let prefix = Matcher::pattern("dev");
/// assert!(prefix.matches(Some(&Value::from("developer"))));
/// assert!(!prefix.matches(None));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    /// Strict equality: same type and same value.
    Literal(Value),
    /// Partial-text match against the value's text form.
    Text(TextPattern),
}

impl Matcher {
    /// Creates a literal matcher.
    pub fn literal(value: impl Into<Value>) -> Self {
        Matcher::Literal(value.into())
    }

    /// Creates a partial-text matcher. Plain patterns match as a prefix.
    pub fn pattern(prefix: impl Into<String>) -> Self {
        Matcher::starts_with(prefix)
    }

    /// Creates a prefix matcher.
    pub fn starts_with(prefix: impl Into<String>) -> Self {
        Matcher::Text(TextPattern::StartsWith(prefix.into()))
    }

    /// Creates a suffix matcher.
    pub fn ends_with(suffix: impl Into<String>) -> Self {
        Matcher::Text(TextPattern::EndsWith(suffix.into()))
    }

    /// Creates a substring matcher.
    pub fn contains(needle: impl Into<String>) -> Self {
        Matcher::Text(TextPattern::Contains(needle.into()))
    }

    /// Compiles a regex matcher.
    ///
    /// Returns an error if the pattern is invalid.
    pub fn regex(pattern: &str) -> Result<Self> {
        Ok(Matcher::Text(TextPattern::Regex(Regex::new(pattern)?)))
    }

    /// Evaluates this matcher against a field value.
    ///
    /// `None` means the record lacks the field, which never matches.
    pub fn matches(&self, field_value: Option<&Value>) -> bool {
        let Some(value) = field_value else {
            return false;
        };
        match self {
            Matcher::Literal(expected) => literal_eq(expected, value),
            Matcher::Text(pattern) => value
                .to_text()
                .is_some_and(|text| pattern.is_match(&text)),
        }
    }
}

fn literal_eq(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::String(a), Value::String(b)) => a == b,
        // NaN never equals anything here
        (Value::Number(a), Value::Number(b)) => a.compare(*b) == Some(Ordering::Equal),
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Null, Value::Null) => true,
        // Type mismatch - doesn't match
        _ => false,
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Literal(value) => write!(f, "= {value}"),
            Matcher::Text(pattern) => write!(f, "{pattern}"),
        }
    }
}

// Scalars convert to literal matchers, regexes to text patterns.

macro_rules! matcher_from_literal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Matcher {
                fn from(value: $ty) -> Self {
                    Matcher::Literal(Value::from(value))
                }
            }
        )*
    };
}

matcher_from_literal!(
    Value, Number, String, &str, bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32,
    f64,
);

impl From<Regex> for Matcher {
    fn from(regex: Regex) -> Self {
        Matcher::Text(TextPattern::Regex(regex))
    }
}

impl From<TextPattern> for Matcher {
    fn from(pattern: TextPattern) -> Self {
        Matcher::Text(pattern)
    }
}

/// Field-to-matcher mapping evaluated with AND semantics.
///
/// Criteria keep insertion order. Adding a field twice replaces the
/// earlier matcher, as with any mapping. Empty criteria match every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    entries: Vec<(String, Matcher)>,
}

impl Criteria {
    /// Creates empty criteria.
    pub fn new() -> Self {
        Criteria::default()
    }

    /// Sets the matcher for `field`.
    pub fn insert(&mut self, field: impl Into<String>, matcher: impl Into<Matcher>) {
        let field = field.into();
        let matcher = matcher.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => *slot = matcher,
            None => self.entries.push((field, matcher)),
        }
    }

    /// Builder form of [`Criteria::insert`].
    pub fn with(mut self, field: impl Into<String>, matcher: impl Into<Matcher>) -> Self {
        self.insert(field, matcher);
        self
    }

    /// Returns the number of criteria.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no criteria.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(field, matcher)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Matcher)> {
        self.entries.iter().map(|(field, matcher)| (field.as_str(), matcher))
    }

    /// Returns `true` if `record` satisfies every criterion.
    pub fn matches(&self, record: &Record) -> bool {
        self.entries
            .iter()
            .all(|(field, matcher)| matcher.matches(record.get(field)))
    }
}

impl<K, M> FromIterator<(K, M)> for Criteria
where
    K: Into<String>,
    M: Into<Matcher>,
{
    fn from_iter<I: IntoIterator<Item = (K, M)>>(iter: I) -> Self {
        let mut criteria = Criteria::new();
        for (field, matcher) in iter {
            criteria.insert(field, matcher);
        }
        criteria
    }
}

impl IntoIterator for Criteria {
    type Item = (String, Matcher);
    type IntoIter = std::vec::IntoIter<(String, Matcher)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, matcher)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field} {matcher}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    #[test]
    fn literal_string() {
        let m = Matcher::literal("hello");
        assert!(m.matches(Some(&Value::from("hello"))));
        assert!(!m.matches(Some(&Value::from("world"))));
        assert!(!m.matches(Some(&Value::from("Hello")))); // case sensitive
    }

    #[test]
    fn literal_is_strict() {
        let m = Matcher::literal(1);
        assert!(m.matches(Some(&Value::from(1u64))));
        assert!(m.matches(Some(&Value::from(1.0))));
        assert!(!m.matches(Some(&Value::from("1"))));
        assert!(!m.matches(Some(&Value::from(true))));
    }

    #[test]
    fn literal_nan_never_matches() {
        let m = Matcher::literal(f64::NAN);
        assert!(!m.matches(Some(&Value::from(f64::NAN))));
        assert!(!m.matches(Some(&Value::from(0.0))));
        // Values still compare equal, so pipelines holding NaN stay equal
        assert_eq!(m, Matcher::literal(f64::NAN));
    }

    #[test]
    fn literal_exact_above_f64_precision() {
        let big: i64 = (1 << 53) + 1;
        assert!(!Matcher::literal(big).matches(Some(&Value::from((1u64 << 53) as f64))));
        assert!(Matcher::literal(big).matches(Some(&Value::from(big as u64))));
    }

    #[test]
    fn literal_null_matches_present_null_only() {
        let m = Matcher::literal(Value::Null);
        assert!(m.matches(Some(&Value::Null)));
        assert!(!m.matches(Some(&Value::from(""))));
        assert!(!m.matches(None));
    }

    #[test]
    fn pattern_defaults_to_prefix() {
        let m = Matcher::pattern("dev");
        assert!(m.matches(Some(&Value::from("dev"))));
        assert!(m.matches(Some(&Value::from("devops"))));
        assert!(!m.matches(Some(&Value::from("webdev"))));
    }

    #[test]
    fn contains_and_ends_with() {
        let contains = Matcher::contains("lt");
        assert!(contains.matches(Some(&Value::from("valter"))));
        assert!(!contains.matches(Some(&Value::from("carlos"))));

        let ends = Matcher::ends_with("er");
        assert!(ends.matches(Some(&Value::from("barber"))));
        assert!(!ends.matches(Some(&Value::from("vet"))));
    }

    #[test]
    fn regex_is_unanchored() {
        let m = Matcher::regex("v").unwrap();
        assert!(m.matches(Some(&Value::from("valter"))));
        assert!(m.matches(Some(&Value::from("vet"))));
        assert!(!m.matches(Some(&Value::from("carlos"))));

        let anchored = Matcher::regex("^dev").unwrap();
        assert!(anchored.matches(Some(&Value::from("dev"))));
        assert!(!anchored.matches(Some(&Value::from("vet"))));
    }

    #[test]
    fn invalid_regex_is_an_error() {
        assert!(Matcher::regex("[unclosed").is_err());
    }

    #[test]
    fn patterns_see_text_form_of_scalars() {
        assert!(Matcher::pattern("4").matches(Some(&Value::from(42))));
        assert!(Matcher::pattern("tr").matches(Some(&Value::from(true))));
        assert!(!Matcher::pattern("n").matches(Some(&Value::Null)));
    }

    #[test]
    fn missing_field_never_matches() {
        assert!(!Matcher::literal("x").matches(None));
        assert!(!Matcher::contains("").matches(None));
    }

    #[test]
    fn criteria_conjunction() {
        let criteria = Criteria::new()
            .with("category", "barber")
            .with("name", Matcher::contains("v"));

        assert!(criteria.matches(&record! { "name" => "valter", "category" => "barber" }));
        assert!(!criteria.matches(&record! { "name" => "carlos", "category" => "barber" }));
        assert!(!criteria.matches(&record! { "name" => "valter" }));
    }

    #[test]
    fn empty_criteria_match_everything() {
        assert!(Criteria::new().matches(&record! {}));
        assert!(Criteria::new().matches(&record! { "a" => 1 }));
    }

    #[test]
    fn criteria_replace_duplicate_field() {
        let criteria: Criteria = vec![("a", 1), ("a", 2)].into_iter().collect();
        assert_eq!(criteria.len(), 1);
        assert!(criteria.matches(&record! { "a" => 2 }));
    }

    #[test]
    fn display() {
        let criteria = Criteria::new()
            .with("category", "barber")
            .with("name", Matcher::regex("v").unwrap())
            .with("id", Matcher::pattern("1"));
        assert_eq!(criteria.to_string(), r#"category = "barber", name ~ /v/, id ^= "1""#);
    }
}

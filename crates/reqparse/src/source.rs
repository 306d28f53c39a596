//! Value sources: where bound parameter values come from.
//!
//! The parser only asks a [`ValueSource`] whether a key is present and, once
//! it is, for the value as text or as a typed scalar. [`RequestParams`] is an
//! in-memory source modelled on an HTTP request: path parameters first, then
//! form fields, then query parameters.

use std::collections::HashMap;

use crate::error::SourceError;
use crate::value::parse_bool;

/// Provider of raw parameter values.
pub trait ValueSource {
    /// Whether `key` is present in any location.
    fn contains(&self, key: &str) -> bool;

    /// The value for `key` as text.
    fn get_string(&self, key: &str) -> Option<&str>;

    /// The value for `key` parsed as a base-10 signed integer.
    fn get_i64(&self, key: &str) -> Result<i64, SourceError> {
        parse_with(self, key, "integer", |raw| raw.parse().ok())
    }

    /// The value for `key` parsed as a base-10 unsigned integer.
    fn get_u64(&self, key: &str) -> Result<u64, SourceError> {
        parse_with(self, key, "unsigned integer", |raw| raw.parse().ok())
    }

    /// The value for `key` parsed as a floating point number.
    fn get_f64(&self, key: &str) -> Result<f64, SourceError> {
        parse_with(self, key, "float", |raw| raw.parse().ok())
    }

    /// The value for `key` parsed as a boolean.
    fn get_bool(&self, key: &str) -> Result<bool, SourceError> {
        parse_with(self, key, "boolean", parse_bool)
    }
}

fn parse_with<S, T>(
    source: &S,
    key: &str,
    expected: &'static str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<T, SourceError>
where
    S: ValueSource + ?Sized,
{
    let raw = source.get_string(key).ok_or_else(|| SourceError::NotFound {
        key: key.to_owned(),
    })?;
    parse(raw).ok_or_else(|| SourceError::Parse {
        key: key.to_owned(),
        value: raw.to_owned(),
        expected,
    })
}

impl ValueSource for HashMap<String, String> {
    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Parameters of one request, split by location.
///
/// Lookups check path parameters, then form fields, then query parameters.
/// Multi-valued form and query keys yield their first value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    path: HashMap<String, String>,
    form: HashMap<String, Vec<String>>,
    query: HashMap<String, Vec<String>>,
}

impl RequestParams {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is ignored.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let mut params = Self::new();
        let query = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            params.push_query(key.into_owned(), value.into_owned());
        }
        params
    }

    /// Add every field of an `application/x-www-form-urlencoded` body.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_form_encoded(mut self, body: &str) -> Self {
        for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
            self.push_form(key.into_owned(), value.into_owned());
        }
        self
    }

    /// Set a path parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_path(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.path.insert(key.into(), value.into());
        self
    }

    /// Append a form field value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_form(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_form(key, value);
        self
    }

    /// Append a query parameter value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_query(key, value);
        self
    }

    /// Append a form field value in place.
    pub fn push_form(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.form.entry(key.into()).or_default().push(value.into());
    }

    /// Append a query parameter value in place.
    pub fn push_query(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.entry(key.into()).or_default().push(value.into());
    }

    /// Every value of a form field, then of the query parameter, in order.
    pub fn get_all(&self, key: &str) -> impl Iterator<Item = &str> {
        self.form
            .get(key)
            .into_iter()
            .chain(self.query.get(key))
            .flatten()
            .map(String::as_str)
    }

    /// Whether no parameter is set in any location.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty() && self.form.is_empty() && self.query.is_empty()
    }
}

impl ValueSource for RequestParams {
    fn contains(&self, key: &str) -> bool {
        self.path.contains_key(key) || self.form.contains_key(key) || self.query.contains_key(key)
    }

    fn get_string(&self, key: &str) -> Option<&str> {
        if let Some(value) = self.path.get(key) {
            return Some(value);
        }
        self.get_all(key).next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn precedence_path_form_query() {
        let params = RequestParams::new()
            .with_query("id", "from-query")
            .with_form("id", "from-form")
            .with_path("id", "from-path");
        assert_eq!(params.get_string("id"), Some("from-path"));

        let params = RequestParams::new()
            .with_query("id", "from-query")
            .with_form("id", "from-form");
        assert_eq!(params.get_string("id"), Some("from-form"));

        let params = RequestParams::new().with_query("id", "from-query");
        assert_eq!(params.get_string("id"), Some("from-query"));
        assert!(params.contains("id"));
        assert!(!params.contains("ID"));
    }

    #[test]
    fn multi_valued_keys_yield_first() {
        let params = RequestParams::from_query_string("?tag=a&tag=b");
        assert_eq!(params.get_string("tag"), Some("a"));
        assert_eq!(params.get_all("tag").collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn form_body_is_decoded() {
        let params = RequestParams::new().with_form_encoded("username=d+d&grade=A%2B");
        assert_eq!(params.get_string("username"), Some("d d"));
        assert_eq!(params.get_string("grade"), Some("A+"));
    }

    #[test]
    fn empty_value_is_present() {
        let params = RequestParams::from_query_string("name=");
        assert!(params.contains("name"));
        assert_eq!(params.get_string("name"), Some(""));
    }

    #[test]
    fn typed_getters() {
        let params = RequestParams::from_query_string("n=-2&u=7&f=2.5&b=true&x=abc");
        assert_eq!(params.get_i64("n"), Ok(-2));
        assert_eq!(params.get_u64("u"), Ok(7));
        assert_eq!(params.get_f64("f"), Ok(2.5));
        assert_eq!(params.get_bool("b"), Ok(true));
        assert_eq!(
            params.get_i64("x"),
            Err(SourceError::Parse {
                key: "x".into(),
                value: "abc".into(),
                expected: "integer",
            })
        );
        assert_eq!(
            params.get_u64("n"),
            Err(SourceError::Parse {
                key: "n".into(),
                value: "-2".into(),
                expected: "unsigned integer",
            })
        );
        assert_eq!(
            params.get_bool("missing"),
            Err(SourceError::NotFound {
                key: "missing".into()
            })
        );
    }

    #[test]
    fn hash_map_source() {
        let mut map = HashMap::new();
        map.insert("number".to_owned(), "12".to_owned());
        assert!(ValueSource::contains(&map, "number"));
        assert_eq!(map.get_i64("number"), Ok(12));
        assert_eq!(ValueSource::get_string(&map, "other"), None);
    }

    #[test]
    fn empty_params() {
        assert!(RequestParams::new().is_empty());
        assert!(!RequestParams::new().with_path("id", "1").is_empty());
    }
}

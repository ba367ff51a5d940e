//! Query arguments for collection requests.

use std::collections::BTreeMap;
use std::fmt::Display;

/// An immutable set of query arguments passed with a request.
///
/// Keys are kept in sorted order so the same arguments always produce the
/// same query string. Keys and values are percent-encoded on output.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::rest::QueryArgs;
///
/// let args = QueryArgs::new()
///     .arg("sku", "ABC-1")
///     .include(["variants", "images"])
///     .limit(50);
///
/// assert_eq!(
///     args.to_query_string(),
///     "include=variants%2Cimages&limit=50&sku=ABC-1"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryArgs {
    args: BTreeMap<String, String>,
}

impl QueryArgs {
    /// Creates an empty set of arguments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one argument.
    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.args.insert(key.into(), value.to_string());
        self
    }

    /// Sets `include` to a comma-separated list of sub-resources.
    #[must_use]
    pub fn include<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Display,
    {
        self.arg("include", join(names))
    }

    /// Sets `include_fields` to a comma-separated list of fields.
    #[must_use]
    pub fn include_fields<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Display,
    {
        self.arg("include_fields", join(fields))
    }

    /// Sets `{field}:in` to a comma-separated list of values.
    #[must_use]
    pub fn field_in<I, S>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Display,
    {
        self.arg(format!("{field}:in"), join(values))
    }

    /// Sets `id:in` to a comma-separated list of ids.
    #[must_use]
    pub fn id_in<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Display,
    {
        self.field_in("id", ids)
    }

    /// Sets the page size.
    #[must_use]
    pub fn limit(self, limit: u32) -> Self {
        self.arg("limit", limit)
    }

    /// Returns the value of an argument.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.args.get(key).map(String::as_str)
    }

    /// Returns `true` if no arguments are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Renders the arguments as `k=v&k2=v2`, percent-encoded.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.encode(|_| true)
    }

    fn encode(&self, keep: impl Fn(&str) -> bool) -> String {
        self.args
            .iter()
            .filter(|(key, _)| keep(key))
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Appends the arguments to `endpoint`.
    #[must_use]
    pub fn apply_to(&self, endpoint: &str) -> String {
        if self.is_empty() {
            return endpoint.to_string();
        }
        format!(
            "{endpoint}{}{}",
            separator(endpoint),
            self.to_query_string()
        )
    }

    /// Builds the path for one page: `page` first, then the arguments.
    ///
    /// A `page` argument set by the caller is dropped; the traversal owns the
    /// page cursor.
    #[must_use]
    pub fn page_path(&self, endpoint: &str, page: u32) -> String {
        let mut path = format!("{endpoint}{}page={page}", separator(endpoint));
        let rest = self.encode(|key| key != "page");
        if !rest.is_empty() {
            path.push('&');
            path.push_str(&rest);
        }
        path
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for QueryArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |args, (key, value)| args.arg(key, value))
    }
}

fn separator(endpoint: &str) -> char {
    if endpoint.contains('?') {
        '&'
    } else {
        '?'
    }
}

fn join<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: Display,
{
    values
        .into_iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

//! Navigation / query-parameter boundary.

use std::collections::BTreeMap;
use url::Url;

pub trait QueryParams {
    fn get(&self, key: &str) -> Option<String>;
    /// Rewrite `key` to `value`, leaving other parameters alone.
    fn set(&mut self, key: &str, value: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryQuery {
    params: BTreeMap<String, String>,
}

impl MemoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }
}

impl QueryParams for MemoryQuery {
    fn get(&self, key: &str) -> Option<String> {
        self.params.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.params.insert(key.to_string(), value.to_string());
    }
}

/// Query parameters of a page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlQuery {
    url: Url,
}

impl UrlQuery {
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: Url::parse(input)?,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl From<Url> for UrlQuery {
    fn from(url: Url) -> Self {
        Self { url }
    }
}

impl QueryParams for UrlQuery {
    fn get(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    fn set(&mut self, key: &str, value: &str) {
        let others: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(k, _)| k != key)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        self.url
            .query_pairs_mut()
            .clear()
            .extend_pairs(others)
            .append_pair(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_query_reads_param() {
        let q = UrlQuery::parse("https://pixel.example/?access=pixel01").unwrap();
        assert_eq!(q.get("access").as_deref(), Some("pixel01"));
        assert!(q.get("other").is_none());
    }

    #[test]
    fn url_query_set_preserves_other_params() {
        let mut q = UrlQuery::parse("https://pixel.example/about?ref=mail&access=old").unwrap();
        q.set("access", "pixel01");
        assert_eq!(q.get("ref").as_deref(), Some("mail"));
        assert_eq!(q.get("access").as_deref(), Some("pixel01"));
        assert_eq!(q.url().path(), "/about");
        assert_eq!(q.url().query(), Some("ref=mail&access=pixel01"));
    }

    #[test]
    fn url_query_set_on_bare_url() {
        let mut q = UrlQuery::parse("https://pixel.example/").unwrap();
        q.set("access", "pixel01");
        assert_eq!(q.url().as_str(), "https://pixel.example/?access=pixel01");
    }
}

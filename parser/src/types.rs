use std::slice;

/// Header fields in the order they first appeared.
///
/// Names compare case-insensitively. Setting a name that is already present
/// replaces its value in place, so the entry keeps its original position and
/// spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => self.entries[index].1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Folds a continuation line into the value of `name`.
    ///
    /// Returns `false` if `name` is not present.
    pub fn append_continuation(&mut self, name: &str, continuation: &str) -> bool {
        let Some(index) = self.position(name) else {
            return false;
        };

        let continuation = continuation.trim_matches([' ', '\t']);
        if continuation.is_empty() {
            return true;
        }

        let value = &mut self.entries[index].1;
        if !value.is_empty() {
            value.push(' ');
        }
        value.push_str(continuation);
        true
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name)
            .map(|index| self.entries[index].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> HeaderIter<'_> {
        HeaderIter {
            inner: self.entries.iter(),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }
}

pub struct HeaderIter<'a> {
    inner: slice::Iter<'a, (String, String)>,
}

impl<'a> Iterator for HeaderIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a str, &'a str);
    type IntoIter = HeaderIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The request line and header fields of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    pub method: String,
    pub target: String,
    pub version: String,
    pub headers: Headers,
    /// Declared body length, `0` when `Content-Length` is absent.
    pub content_length: usize,
}

// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeMap;

/// The headers and trailers associated with an error.
///
/// Connect transmits metadata as HTTP headers or trailers, where the key
/// names are case-insensitive. This type normalizes the keys to lowercase,
/// and keys that differ only in case are merged, with their values
/// concatenated in the order they were added.
///
/// The original spelling of the first key added for each normalized key is
/// kept for diagnostics, see [original_key][Metadata::original_key]. It does
/// not participate in lookups or comparisons.
///
/// # Example
/// ```
/// # use connect_rpc::metadata::Metadata;
/// let metadata = Metadata::from_iter([
///     ("sOmEkEy", vec!["foo"]),
///     ("SOMEKEY", vec!["bar"]),
/// ]);
/// assert_eq!(metadata.get("somekey"), Some(["foo".to_string(), "bar".to_string()].as_slice()));
/// assert_eq!(metadata.original_key("SomeKey"), Some("sOmEkEy"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Metadata {
    entries: BTreeMap<String, Entry>,
}

#[derive(Clone, Debug)]
struct Entry {
    key: String,
    values: Vec<String>,
}

fn normalize(key: &str) -> String {
    key.to_lowercase()
}

impl Metadata {
    /// Creates empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `values` to the values of `key`.
    pub fn append<K, I, V>(&mut self, key: K, values: I)
    where
        K: AsRef<str>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let key = key.as_ref();
        let entry = self
            .entries
            .entry(normalize(key))
            .or_insert_with(|| Entry {
                key: key.to_string(),
                values: Vec::new(),
            });
        entry.values.extend(values.into_iter().map(Into::into));
    }

    /// The values associated with `key`, in the order they were added.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .get(&normalize(key))
            .map(|e| e.values.as_slice())
    }

    /// The first value associated with `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Returns true if `key` has an entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&normalize(key))
    }

    /// The spelling of `key` when it was first added.
    pub fn original_key(&self, key: &str) -> Option<&str> {
        self.entries.get(&normalize(key)).map(|e| e.key.as_str())
    }

    /// The number of distinct (normalized) keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the normalized keys and their values, ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, e)| (k.as_str(), e.values.as_slice()))
    }

    /// Iterates over the normalized keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl PartialEq for Metadata {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for Metadata {}

impl<K, I, V> Extend<(K, I)> for Metadata
where
    K: AsRef<str>,
    I: IntoIterator<Item = V>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, I)>>(&mut self, iter: T) {
        for (key, values) in iter {
            self.append(key, values);
        }
    }
}

impl<K, I, V> FromIterator<(K, I)> for Metadata
where
    K: AsRef<str>,
    I: IntoIterator<Item = V>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut metadata = Metadata::new();
        metadata.extend(iter);
        metadata
    }
}

#[cfg(feature = "http")]
impl From<&http::HeaderMap> for Metadata {
    fn from(headers: &http::HeaderMap) -> Self {
        let mut metadata = Metadata::new();
        for name in headers.keys() {
            let values = headers
                .get_all(name)
                .iter()
                .filter_map(|value| match value.to_str() {
                    Ok(v) => Some(v.to_string()),
                    Err(e) => {
                        tracing::debug!(
                            header = name.as_str(),
                            "skipping header value with opaque bytes: {e}"
                        );
                        None
                    }
                });
            metadata.append(name.as_str(), values);
        }
        metadata
    }
}

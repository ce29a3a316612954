use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Raw form data as posted by a client: one or more string values per field
/// name, the multi-valued case coming from multi-select fields.
///
/// Deserializes from a JSON object whose values are strings or arrays of
/// strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData(BTreeMap<String, Vec<String>>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), vec![value.into()]);
    }

    pub fn set_all(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.0.insert(name.into(), values);
    }

    /// First posted value for a field, if any.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All posted values for a field.
    pub fn values(&self, name: &str) -> &[String] {
        self.0.get(name).map_or(&[], Vec::as_slice)
    }

    /// Missing, or present with an all-whitespace first value.
    pub fn is_blank(&self, name: &str) -> bool {
        self.value(name).is_none_or(|v| v.trim().is_empty())
    }
}

impl<S: Into<String>, V: Into<String>> FromIterator<(S, V)> for FormData {
    fn from_iter<T: IntoIterator<Item = (S, V)>>(iter: T) -> Self {
        let mut data = Self::new();
        for (name, value) in iter {
            data.set(name, value);
        }
        data
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Vec<String> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(vs) => vs,
        }
    }
}

impl<'de> Deserialize<'de> for FormData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, OneOrMany>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter().map(|(k, v)| (k, v.into())).collect(),
        ))
    }
}

/// Case-insensitive HTTP header multimap.
///
/// Lookup ignores name case; insertion order is preserved for
/// serialization. Repeated `append` calls for the same name merge the
/// values into a single comma-separated entry, except for `Set-Cookie`,
/// which keeps one entry per value (RFC 6265 forbids folding it).
///
/// # Example
///
/// ```
/// # use beacon::http::headers::HeaderMap;
/// let mut headers = HeaderMap::new();
/// headers.set("Content-Type", "application/json");
/// assert_eq!(headers.get("content-type"), Some("application/json"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    values: Vec<String>,
}

/// Headers that must not be comma-folded when repeated.
fn keeps_separate_values(name: &str) -> bool {
    name.eq_ignore_ascii_case("set-cookie")
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a header, merging with any existing entry of the same name.
    ///
    /// Most headers are joined as a comma-separated string; `Set-Cookie`
    /// values are kept distinct. The original name casing of the first
    /// insertion is preserved for serialization.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.entry_mut(&name) {
            Some(entry) => {
                if keeps_separate_values(&entry.name) {
                    entry.values.push(value);
                } else {
                    let joined = format!("{}, {}", entry.values[0], value);
                    entry.values[0] = joined;
                }
            }
            None => self.entries.push(Entry {
                name,
                values: vec![value],
            }),
        }
    }

    /// Sets a header, replacing any existing values (last write wins).
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.entry_mut(&name) {
            Some(entry) => {
                entry.name = name;
                entry.values = vec![value];
            }
            None => self.entries.push(Entry {
                name,
                values: vec![value],
            }),
        }
    }

    /// Returns the first value for `name` (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entry(name).map(|e| e.values[0].as_str())
    }

    /// Returns all values for `name` (case-insensitive).
    ///
    /// Only `Set-Cookie`-like headers ever carry more than one.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entry(name)
            .map(|e| e.values.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Removes all values for `name`. Returns true if anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !e.name.eq_ignore_ascii_case(name));
        self.entries.len() != before
    }

    /// Iterates `(name, value)` pairs in insertion order, one pair per
    /// serialized header line.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|e| {
            e.values.iter().map(move |v| (e.name.as_str(), v.as_str()))
        })
    }

    fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name.eq_ignore_ascii_case(name))
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.entries
            .iter_mut()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }
}

//! Measure title sanitization
//!
//! Titles double as column keys and user-facing labels. External references
//! (form fields, JSON keys) use a sanitized form where every run of non-word
//! characters collapses to a single `_`. Sanitization is not injective, so the
//! reverse lookup keeps every title that maps to a key and refuses to pick one
//! when there is more than one.

use crate::{Error, Result};
use ahash::AHashMap;

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Collapse each maximal run of non-word characters into a single `_`
pub fn sanitize_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut in_run = false;
    for c in title.chars() {
        if is_word_char(c) {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// Sanitized key -> original title lookup
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    entries: Vec<(String, String)>,
    by_key: AHashMap<String, Vec<String>>,
}

impl TitleIndex {
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = TitleIndex::default();
        for title in titles {
            let title = title.as_ref();
            let key = sanitize_title(title);
            let slot = index.by_key.entry(key.clone()).or_default();
            if slot.iter().any(|t| t == title) {
                continue;
            }
            slot.push(title.to_string());
            index.entries.push((key, title.to_string()));
        }
        index
    }

    /// `(key, title)` pairs in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, t)| (k.as_str(), t.as_str()))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys shared by more than one distinct title, sorted
    pub fn ambiguities(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .by_key
            .iter()
            .filter(|(_, titles)| titles.len() > 1)
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Resolve a sanitized key.
    ///
    /// `Ok(None)` when the key is not indexed, [`Error::AmbiguousMeasureKey`]
    /// when several titles collapse onto it.
    pub fn resolve(&self, key: &str) -> Result<Option<&str>> {
        match self.by_key.get(key).map(Vec::as_slice) {
            None | Some([]) => Ok(None),
            Some([title]) => Ok(Some(title.as_str())),
            Some(titles) => Err(Error::AmbiguousMeasureKey {
                key: key.to_string(),
                titles: titles.to_vec(),
            }),
        }
    }

    /// Map sanitized keys back to titles. Unindexed keys pass through verbatim.
    pub fn resolve_all<V, I>(&self, pairs: I) -> Result<Vec<(String, V)>>
    where
        I: IntoIterator<Item = (String, V)>,
    {
        pairs
            .into_iter()
            .map(|(key, value)| {
                let title = match self.resolve(&key)? {
                    Some(title) => title.to_string(),
                    None => key,
                };
                Ok((title, value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_collapses_runs() {
        assert_eq!(
            sanitize_title("Loi n° 2024-12 : l'article 3"),
            "Loi_n_2024_12_l_article_3"
        );
        assert_eq!(sanitize_title("a -- b"), "a_b");
        assert_eq!(sanitize_title("déjà_vu"), "déjà_vu");
        assert_eq!(sanitize_title("(x)"), "_x_");
        assert_eq!(sanitize_title(""), "");
    }

    #[test]
    fn test_resolve_round_trip() {
        let index = TitleIndex::new(["Loi sur l'eau", "Budget 2025"]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.resolve("Loi_sur_l_eau").unwrap(), Some("Loi sur l'eau"));
        assert_eq!(index.resolve("Budget_2025").unwrap(), Some("Budget 2025"));
        assert_eq!(index.resolve("missing").unwrap(), None);
        assert!(index.ambiguities().is_empty());
    }

    #[test]
    fn test_collision_is_detected() {
        let index = TitleIndex::new(["Loi: A", "Loi A", "Loi-A", "Other"]);
        assert_eq!(index.ambiguities(), vec!["Loi_A"]);

        match index.resolve("Loi_A") {
            Err(Error::AmbiguousMeasureKey { key, titles }) => {
                assert_eq!(key, "Loi_A");
                assert_eq!(titles, vec!["Loi: A", "Loi A", "Loi-A"]);
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
        assert_eq!(index.resolve("Other").unwrap(), Some("Other"));
    }

    #[test]
    fn test_duplicate_title_is_not_ambiguous() {
        let index = TitleIndex::new(["Same", "Same"]);
        assert_eq!(index.len(), 1);
        assert!(index.ambiguities().is_empty());
    }

    #[test]
    fn test_resolve_all_passes_unknown_keys_through() {
        let index = TitleIndex::new(["Loi sur l'eau"]);
        let resolved = index
            .resolve_all(vec![
                ("Loi_sur_l_eau".to_string(), "pour"),
                ("Inconnue".to_string(), "contre"),
            ])
            .unwrap();
        assert_eq!(
            resolved,
            vec![
                ("Loi sur l'eau".to_string(), "pour"),
                ("Inconnue".to_string(), "contre"),
            ]
        );
    }
}

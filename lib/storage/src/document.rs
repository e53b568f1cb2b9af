//! JSON document access
//!
//! Source documents are looked up by descendant search: the first value whose
//! key matches, anywhere in the tree, in document order. Key order is
//! preserved on parse (`serde_json/preserve_order`) so "first" means first in
//! the file.

use crate::report::{ParseReport, Skip, SkipReason};
use serde_json::Value;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// List `.json` documents in `dir`, sorted by path.
///
/// A missing or unlistable directory is an `Err`. Entries that fail while
/// listing are recorded as skips next to the paths that were found.
pub fn list_documents(dir: &Path) -> Result<ParseReport<Vec<PathBuf>>, Skip> {
    let entries = fs::read_dir(dir).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Skip::new(dir, SkipReason::SourceNotFound),
        _ => Skip::new(dir, SkipReason::SourceUnreadable(e.to_string())),
    })?;

    Ok(collect_documents(
        dir,
        entries.map(|entry| entry.map(|entry| entry.path())),
    ))
}

fn collect_documents<I>(dir: &Path, entries: I) -> ParseReport<Vec<PathBuf>>
where
    I: IntoIterator<Item = io::Result<PathBuf>>,
{
    let mut report = ParseReport::new(Vec::new());
    for entry in entries {
        match entry {
            Ok(path) => {
                if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
                    report.value.push(path);
                }
            }
            Err(e) => report
                .skipped
                .push(Skip::new(dir, SkipReason::Unreadable(e.to_string()))),
        }
    }
    report.value.sort();
    report.parsed = report.value.len();
    report
}

/// Read and parse one document
pub fn read_document(path: &Path) -> Result<Value, Skip> {
    let raw = fs::read_to_string(path)
        .map_err(|e| Skip::new(path, SkipReason::Unreadable(e.to_string())))?;
    serde_json::from_str(&raw).map_err(|e| Skip::new(path, SkipReason::Malformed(e.to_string())))
}

/// First value stored under `key` anywhere below `value`
pub fn find_first<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                if k == key {
                    return Some(v);
                }
                if let Some(found) = find_first(v, key) {
                    return Some(found);
                }
            }
            None
        }
        Value::Array(items) => items.iter().find_map(|item| find_first(item, key)),
        _ => None,
    }
}

/// Every value stored under `key` below `value`, without descending into matches
pub fn find_all<'a>(value: &'a Value, key: &str) -> Vec<&'a Value> {
    let mut found = Vec::new();
    collect(value, key, &mut found);
    found
}

fn collect<'a>(value: &'a Value, key: &str, found: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                if k == key {
                    found.push(v);
                } else {
                    collect(v, key, found);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect(item, key, found);
            }
        }
        _ => {}
    }
}

/// Text content: a string, a number, or an object's `#text`. Blank text is `None`.
pub fn text_of(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => return map.get("#text").and_then(text_of),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// A single object or an array of them; `null` is empty
pub fn one_or_many(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_find_first_in_document_order() {
        let doc = json!({
            "acteur": {
                "uid": {"#text": "PA1"},
                "adresses": [{"uid": "AD9"}],
                "etatCivil": {"ident": {"prenom": "Jane", "nom": "Doe"}}
            }
        });
        assert_eq!(find_first(&doc, "uid").and_then(text_of), Some("PA1".to_string()));
        assert_eq!(find_first(&doc, "nom").and_then(text_of), Some("Doe".to_string()));
        assert!(find_first(&doc, "missing").is_none());
    }

    #[test]
    fn test_find_all_collects_siblings() {
        let doc = json!({
            "groupes": [
                {"vote": {"decompteNominatif": {"pours": null}}},
                {"vote": {"decompteNominatif": {"contres": null}}}
            ]
        });
        assert_eq!(find_all(&doc, "decompteNominatif").len(), 2);
    }

    #[test]
    fn test_text_of() {
        assert_eq!(text_of(&json!("  Loi  ")), Some("Loi".to_string()));
        assert_eq!(text_of(&json!("   ")), None);
        assert_eq!(text_of(&json!({"#text": "x"})), Some("x".to_string()));
        assert_eq!(text_of(&json!(12)), Some("12".to_string()));
        assert_eq!(text_of(&json!(null)), None);
    }

    #[test]
    fn test_one_or_many() {
        assert_eq!(one_or_many(&json!({"a": 1})).len(), 1);
        assert_eq!(one_or_many(&json!([{"a": 1}, {"a": 2}])).len(), 2);
        assert!(one_or_many(&json!(null)).is_empty());
    }

    #[test]
    fn test_list_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("sub.json")).unwrap();

        let docs = list_documents(dir.path()).unwrap();
        assert!(docs.skipped.is_empty());
        assert_eq!(docs.parsed, 2);
        let names: Vec<_> = docs
            .value
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);

        let missing = list_documents(&dir.path().join("nope")).unwrap_err();
        assert_eq!(missing.reason, SkipReason::SourceNotFound);
    }

    #[test]
    fn test_entry_errors_are_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("a.json");
        std::fs::write(&doc, "{}").unwrap();

        let entries = vec![
            Err(io::Error::new(ErrorKind::PermissionDenied, "entry vanished")),
            Ok(doc.clone()),
        ];
        let report = collect_documents(dir.path(), entries);
        assert_eq!(report.value, vec![doc]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, dir.path());
        assert!(matches!(
            &report.skipped[0].reason,
            SkipReason::Unreadable(msg) if msg.contains("entry vanished")
        ));
    }
}

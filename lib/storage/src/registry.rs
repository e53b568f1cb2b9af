use crate::document::{find_first, list_documents, read_document, text_of};
use crate::report::{ParseReport, Skip, SkipReason};
use hemicycle_core::{Member, MemberRegistry};
use serde_json::Value;
use std::path::Path;
use tracing::{error, info, warn};

/// Extract a member from one document
pub fn parse_member(doc: &Value) -> Result<Member, SkipReason> {
    let field = |name: &'static str| {
        find_first(doc, name)
            .and_then(text_of)
            .ok_or(SkipReason::MissingField(name))
    };

    let uid = field("uid")?;
    let family = field("nom")?;
    let given = field("prenom")?;
    Ok(Member::from_names(uid, &given, &family))
}

/// Load every member document in `dir`.
///
/// Bad documents are skipped individually. A missing or unlistable directory
/// gives an empty registry with a source skip recorded.
pub fn load_registry(dir: &Path) -> ParseReport<MemberRegistry> {
    let mut report = ParseReport::new(MemberRegistry::new());

    let listing = match list_documents(dir) {
        Ok(listing) => listing,
        Err(skip) => {
            error!("Member source unavailable: {}", skip);
            report.skipped.push(skip);
            return report;
        }
    };
    for skip in &listing.skipped {
        error!("Skipping member entry {}", skip);
    }
    report.skipped.extend(listing.skipped);
    let paths = listing.value;
    info!("{} member documents in {:?}", paths.len(), dir);

    for path in paths {
        let member = read_document(&path).and_then(|doc| {
            parse_member(&doc).map_err(|reason| Skip::new(&path, reason))
        });

        match member {
            Ok(member) => {
                report.value.insert(member);
                report.parsed += 1;
            }
            Err(skip) => {
                match skip.reason {
                    SkipReason::MissingField(_) => warn!("Skipping member {}", skip),
                    _ => error!("Skipping member {}", skip),
                }
                report.skipped.push(skip);
            }
        }
    }

    info!(
        "Loaded {} members ({} documents skipped)",
        report.value.len(),
        report.skipped.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_parse_member() {
        let doc = json!({
            "acteur": {
                "uid": {"@xsi:type": "IdActeur_type", "#text": "PA1008"},
                "etatCivil": {"ident": {"civ": "Mme", "prenom": "Jane", "nom": "Doe"}}
            }
        });
        let member = parse_member(&doc).unwrap();
        assert_eq!(member.id, "PA1008");
        assert_eq!(member.display_name, "Jane Doe");
    }

    #[test]
    fn test_missing_field() {
        let doc = json!({"acteur": {"uid": "PA1", "etatCivil": {"ident": {"nom": "Doe"}}}});
        assert_eq!(parse_member(&doc), Err(SkipReason::MissingField("prenom")));
    }

    #[test]
    fn test_load_skips_bad_documents() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("PA1.json"),
            r#"{"acteur": {"uid": "PA1", "etatCivil": {"ident": {"prenom": "Jane", "nom": "Doe"}}}}"#,
        )
        .unwrap();
        fs::write(dir.path().join("PA2.json"), r#"{"acteur": {"uid": "PA2"}}"#).unwrap();
        fs::write(dir.path().join("PA3.json"), "{ not json").unwrap();

        let report = load_registry(dir.path());
        assert_eq!(report.parsed, 1);
        assert_eq!(report.value.display_name("PA1"), "Jane Doe");
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].reason, SkipReason::MissingField("nom"));
        assert!(matches!(report.skipped[1].reason, SkipReason::Malformed(_)));
        assert!(report.source_error().is_none());
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let report = load_registry(&dir.path().join("acteur"));
        assert!(report.value.is_empty());
        assert!(report.source_error().is_some());
    }
}

use crate::document::{find_all, find_first, list_documents, one_or_many, read_document, text_of};
use crate::report::{ParseReport, Skip, SkipReason};
use hemicycle_core::{VoteCategory, VoteMatrix, VoteMatrixBuilder};
use serde_json::Value;
use std::path::Path;
use tracing::{error, info, warn};

/// Roll-call section keys and the category each one records
const SECTIONS: [(&str, VoteCategory); 4] = [
    ("pours", VoteCategory::Pour),
    ("contres", VoteCategory::Contre),
    ("abstentions", VoteCategory::Abstention),
    ("nonVotantsVolontaires", VoteCategory::NonVotantVolontaire),
];

/// One ballot's measure title and explicit (member, category) entries
#[derive(Debug, Clone, PartialEq)]
pub struct Ballot {
    pub title: String,
    pub votes: Vec<(String, VoteCategory)>,
}

/// Extract a ballot from one document
pub fn parse_ballot(doc: &Value) -> Result<Ballot, SkipReason> {
    let title = find_first(doc, "titre")
        .and_then(text_of)
        .ok_or(SkipReason::MissingTitle)?;

    let sections = find_all(doc, "decompteNominatif");
    if sections.is_empty() {
        return Err(SkipReason::NoRollCall);
    }

    let mut votes = Vec::new();
    for section in sections {
        for (key, category) in SECTIONS {
            for group in find_all(section, key) {
                let voters = group.get("votant").map(one_or_many).unwrap_or_default();
                for voter in voters {
                    if let Some(member_id) = voter.get("acteurRef").and_then(text_of) {
                        votes.push((member_id, category));
                    }
                }
            }
        }
    }

    Ok(Ballot { title, votes })
}

/// Load every ballot document in `dir` into a dense vote matrix.
///
/// Each file is parsed independently; failures are recorded and the rest of
/// the directory is still processed.
pub fn load_ballots(dir: &Path) -> ParseReport<VoteMatrix> {
    let mut builder = VoteMatrixBuilder::new();
    let mut parsed = 0;
    let mut skipped = Vec::new();

    match list_documents(dir) {
        Ok(listing) => {
            for skip in &listing.skipped {
                error!("Skipping ballot entry {}", skip);
            }
            skipped.extend(listing.skipped);
            let paths = listing.value;
            info!("{} ballot documents in {:?}", paths.len(), dir);
            for path in paths {
                let ballot = read_document(&path).and_then(|doc| {
                    parse_ballot(&doc).map_err(|reason| Skip::new(&path, reason))
                });

                match ballot {
                    Ok(ballot) => {
                        for (member_id, category) in &ballot.votes {
                            builder.record(member_id, &ballot.title, *category);
                        }
                        parsed += 1;
                    }
                    Err(skip) => {
                        match skip.reason {
                            SkipReason::MissingTitle | SkipReason::NoRollCall => {
                                warn!("Skipping ballot {}", skip)
                            }
                            _ => error!("Skipping ballot {}", skip),
                        }
                        skipped.push(skip);
                    }
                }
            }
        }
        Err(skip) => {
            error!("Ballot source unavailable: {}", skip);
            skipped.push(skip);
        }
    }

    let recorded = builder.recorded();
    let matrix = builder.build();
    if matrix.is_empty() {
        error!("No votes parsed from {:?}", dir);
    } else {
        info!(
            "Vote matrix: {} members x {} measures ({} explicit votes, {} documents skipped)",
            matrix.n_members(),
            matrix.n_measures(),
            recorded,
            skipped.len()
        );
    }

    ParseReport {
        value: matrix,
        parsed,
        skipped,
    }
}

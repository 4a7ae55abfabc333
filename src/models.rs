use crate::organizer::preview::MoveOperation;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// What phase 1 did with a single note
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TagOutcome {
    /// Tags were requested and merged into the note
    Processed { path: PathBuf, tags: String },
    /// The note already had a `tags:` line and was left alone
    Skipped { path: PathBuf },
}

/// Result of the tagging phase
#[derive(Debug, Clone, Default, Serialize)]
pub struct TagReport {
    /// Notes that went through tagging, in directory order
    pub processed: Vec<PathBuf>,
    /// Notes that already carried tags
    pub skipped: Vec<PathBuf>,
    /// Tag reply merged into each processed note
    pub tags: BTreeMap<PathBuf, String>,
}

impl TagReport {
    pub fn record(&mut self, outcome: TagOutcome) {
        match outcome {
            TagOutcome::Processed { path, tags } => {
                self.tags.insert(path.clone(), tags);
                self.processed.push(path);
            }
            TagOutcome::Skipped { path } => self.skipped.push(path),
        }
    }
}

/// A file that was moved into a folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub folder: String,
}

impl From<MoveOperation> for MovedFile {
    fn from(op: MoveOperation) -> Self {
        Self {
            source: op.source,
            destination: op.destination,
            folder: op.folder.to_string(),
        }
    }
}

/// Everything a full run did
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub tagging: TagReport,
    pub moved: Vec<MovedFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_report_records_outcomes() {
        let mut report = TagReport::default();
        report.record(TagOutcome::Processed {
            path: PathBuf::from("a.md"),
            tags: "x, y".to_string(),
        });
        report.record(TagOutcome::Skipped {
            path: PathBuf::from("b.md"),
        });

        assert_eq!(report.processed, vec![PathBuf::from("a.md")]);
        assert_eq!(report.skipped, vec![PathBuf::from("b.md")]);
        assert_eq!(report.tags.get(&PathBuf::from("a.md")).map(String::as_str), Some("x, y"));
        assert!(!report.tags.contains_key(&PathBuf::from("b.md")));
    }

    #[test]
    fn test_run_report_serialization() {
        let mut tagging = TagReport::default();
        tagging.record(TagOutcome::Processed {
            path: PathBuf::from("a.md"),
            tags: "rust, cli".to_string(),
        });
        let report = RunReport {
            tagging,
            moved: vec![MovedFile {
                source: PathBuf::from("a.md"),
                destination: PathBuf::from("Projects/a.md"),
                folder: "Projects".to_string(),
            }],
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["tagging"]["processed"][0], "a.md");
        assert_eq!(json["tagging"]["tags"]["a.md"], "rust, cli");
        assert_eq!(json["moved"][0]["folder"], "Projects");
    }
}

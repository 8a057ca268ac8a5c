//! Row encoding for the backing CSV file.
//!
//! A stored row has four columns: id, name, program and a scores field. The
//! scores field packs every `course:score` pair into one text cell joined
//! with `;`. Course names are not escaped, so a name containing `:` or `;`
//! cannot survive a save/load cycle. That sub-encoding sits behind
//! [`ScoreCodec`] so a safer format can replace it without touching the store.

use csv::StringRecord;
use tracing::{debug, warn};

use crate::record::{Scores, StudentRecord};

/// Header tokens of the legacy data file, in column order.
pub const COLUMNS: [&str; 4] = ["nim", "name", "prodi", "scores"];

/// Header token of the id column. Rows whose id matches it are stray headers.
pub const ID_HEADER: &str = COLUMNS[0];

/// Separator between `course:score` pairs.
pub const PAIR_SEPARATOR: char = ';';

/// Separator between a course name and its score.
pub const SCORE_SEPARATOR: char = ':';

/// Converts a score mapping to and from a single text field.
pub trait ScoreCodec: std::fmt::Debug {
    /// Render all scores into one field.
    fn encode(&self, scores: &Scores) -> String;

    /// Parse a field back into scores, dropping anything unreadable.
    fn decode(&self, field: &str) -> Scores;
}

/// The `course:score;course:score` encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelimitedScoreCodec;

impl ScoreCodec for DelimitedScoreCodec {
    fn encode(&self, scores: &Scores) -> String {
        scores
            .iter()
            .map(|(course, score)| {
                if course.contains(&[PAIR_SEPARATOR, SCORE_SEPARATOR][..]) {
                    warn!(
                        course = %course,
                        "course name contains a score delimiter and will not round-trip"
                    );
                }
                format!("{course}{SCORE_SEPARATOR}{}", format_score(*score))
            })
            .collect::<Vec<_>>()
            .join(PAIR_SEPARATOR.to_string().as_str())
    }

    fn decode(&self, field: &str) -> Scores {
        let mut scores = Scores::new();
        for fragment in field.split(PAIR_SEPARATOR) {
            let Some((course, value)) = fragment.split_once(SCORE_SEPARATOR) else {
                continue;
            };
            let course = course.trim();
            if course.is_empty() {
                continue;
            }
            match value.trim().parse::<f64>() {
                Ok(score) => {
                    scores.insert(course.to_string(), score);
                }
                Err(_) => debug!(fragment, "dropping unparseable score"),
            }
        }
        scores
    }
}

/// Render a score so it always reads back as a float (`90.0`, `87.5`).
#[must_use]
pub fn format_score(score: f64) -> String {
    format!("{score:?}")
}

/// Decode one CSV row into a record.
///
/// Returns `None` for rows that are not data: an empty id, or an id equal to
/// the id column header (compared case-insensitively). Missing trailing
/// columns read as empty and extra columns are ignored.
#[must_use]
pub fn decode_row(row: &StringRecord, codec: &impl ScoreCodec) -> Option<StudentRecord> {
    let field = |i: usize| row.get(i).unwrap_or("").trim();

    let id = field(0);
    if is_reserved_id(id) {
        return None;
    }

    Some(StudentRecord {
        id: id.to_string(),
        name: field(1).to_string(),
        program: field(2).to_string(),
        scores: codec.decode(field(3)),
    })
}

/// Encode a record as the four columns of a CSV row.
#[must_use]
pub fn encode_row(record: &StudentRecord, codec: &impl ScoreCodec) -> [String; 4] {
    [
        record.id.clone(),
        record.name.clone(),
        record.program.clone(),
        codec.encode(&record.scores),
    ]
}

/// Whether an id would be dropped by [`decode_row`] on the next load.
#[must_use]
pub fn is_reserved_id(id: &str) -> bool {
    let id = id.trim();
    id.is_empty() || id.eq_ignore_ascii_case(ID_HEADER)
}

//! Execution of record commands against a loaded gradebook.

use std::io::Write;

use crate::book::Gradebook;
use crate::codec::{format_score, ScoreCodec};
use crate::error::{Error, Result};
use crate::record::Scores;
use crate::session::Session;

use super::commands::{AddCommand, RecordCommand};
use super::render::{self, RenderOptions};

/// Run one record command and write its result to `out`.
///
/// # Errors
///
/// Returns the gradebook error for a rejected operation (unknown id,
/// duplicate id, missing premium access and so on), or an I/O error if the
/// output cannot be written.
pub fn execute<C: ScoreCodec>(
    command: &RecordCommand,
    book: &mut Gradebook<C>,
    session: &mut Session,
    opts: RenderOptions,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        RecordCommand::Add(cmd) => add(cmd, book, out),
        RecordCommand::SetScore(args) => {
            let existed = book
                .get_student(&args.id)?
                .scores
                .contains_key(args.course.trim());
            book.set_score(&args.id, &args.course, args.score)?;
            let verb = if existed { "updated" } else { "added" };
            writeln!(
                out,
                "Score {verb}: {} {} = {}",
                args.id.trim(),
                args.course.trim(),
                format_score(args.score)
            )?;
            Ok(())
        }
        RecordCommand::EditScore(args) => {
            if let Err(e) = book.edit_score(&args.id, &args.course, args.score) {
                if matches!(e, Error::CourseNotFound { .. }) {
                    list_courses(book, args.id.trim(), out)?;
                }
                return Err(e);
            }
            writeln!(
                out,
                "Score updated: {} {} = {}",
                args.id.trim(),
                args.course.trim(),
                format_score(args.score)
            )?;
            Ok(())
        }
        RecordCommand::Delete(args) => {
            book.delete_student(&args.id)?;
            writeln!(out, "Student {} deleted.", args.id.trim())?;
            Ok(())
        }
        RecordCommand::Show(cmd) => {
            let record = book.get_student(&cmd.id)?;
            render::student(out, record, opts.with_format(cmd.format))
        }
        RecordCommand::List(cmd) => {
            render::summaries(out, &book.list_summaries(), opts.with_format(cmd.format))
        }
        RecordCommand::Premium(cmd) => {
            if cmd.upgrade {
                if session.upgrade() {
                    writeln!(out, "Upgrade complete. This session now has premium access.")?;
                } else {
                    writeln!(out, "This session already has premium access.")?;
                }
            } else if session.is_premium() {
                writeln!(out, "Premium: active")?;
            } else {
                writeln!(
                    out,
                    "Premium: inactive (run `premium --upgrade` to unlock career recommendations)"
                )?;
            }
            Ok(())
        }
        RecordCommand::Career(args) => {
            let tag = session.career_tag(book, &args.id)?;
            render::career(out, args.id.trim(), tag, opts)
        }
    }
}

fn add<C: ScoreCodec>(
    cmd: &AddCommand,
    book: &mut Gradebook<C>,
    out: &mut impl Write,
) -> Result<()> {
    let initial = match (&cmd.course, cmd.score) {
        (Some(course), Some(score)) => {
            let mut scores = Scores::new();
            scores.insert(course.clone(), score);
            Some(scores)
        }
        _ => None,
    };
    book.add_student(&cmd.id, &cmd.name, &cmd.program, initial)?;
    writeln!(out, "Student {} added.", cmd.id.trim())?;
    Ok(())
}

/// Point at the courses `edit-score` can change.
fn list_courses<C: ScoreCodec>(book: &Gradebook<C>, id: &str, out: &mut impl Write) -> Result<()> {
    let courses = book.courses(id)?;
    if courses.is_empty() {
        writeln!(out, "Student {id} has no scores yet. Use `set-score` to add one.")?;
    } else {
        writeln!(out, "Courses on record for {id}: {}", courses.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{IdArgs, ListCommand, PremiumCommand, ScoreArgs, ShowCommand};
    use crate::cli::OutputFormat;
    use crate::storage::RecordStore;

    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        book: Gradebook,
        session: Session,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let book = Gradebook::open(RecordStore::new(dir.path().join("s.csv"))).unwrap();
            Self {
                _dir: dir,
                book,
                session: Session::new(),
            }
        }

        fn run(&mut self, command: RecordCommand) -> Result<String> {
            let (result, out) = self.run_with_output(command);
            result.map(|()| out)
        }

        fn run_with_output(&mut self, command: RecordCommand) -> (Result<()>, String) {
            let mut out = Vec::new();
            let opts = RenderOptions {
                format: OutputFormat::Plain,
                decimals: 2,
            };
            let result = execute(&command, &mut self.book, &mut self.session, opts, &mut out);
            (result, String::from_utf8(out).unwrap())
        }
    }

    fn add_cmd(id: &str) -> RecordCommand {
        RecordCommand::Add(AddCommand {
            id: id.to_string(),
            name: "Ann".to_string(),
            program: "CS".to_string(),
            course: None,
            score: None,
        })
    }

    fn score(id: &str, course: &str, value: f64) -> ScoreArgs {
        ScoreArgs {
            id: id.to_string(),
            course: course.to_string(),
            score: value,
        }
    }

    #[test]
    fn test_add_and_show() {
        let mut fx = Fixture::new();
        assert_eq!(fx.run(add_cmd("S1")).unwrap(), "Student S1 added.\n");

        let shown = fx
            .run(RecordCommand::Show(ShowCommand {
                id: "S1".to_string(),
                format: None,
            }))
            .unwrap();
        assert!(shown.contains("Name:    Ann"));
        assert!(shown.contains("No scores yet."));
    }

    #[test]
    fn test_add_with_initial_score() {
        let mut fx = Fixture::new();
        fx.run(RecordCommand::Add(AddCommand {
            id: "S1".to_string(),
            name: String::new(),
            program: String::new(),
            course: Some("Algo".to_string()),
            score: Some(77.0),
        }))
        .unwrap();
        assert_eq!(fx.book.get_student("S1").unwrap().scores["Algo"], 77.0);
    }

    #[test]
    fn test_set_score_reports_added_then_updated() {
        let mut fx = Fixture::new();
        fx.run(add_cmd("S1")).unwrap();
        assert_eq!(
            fx.run(RecordCommand::SetScore(score("S1", "Algo", 92.0))).unwrap(),
            "Score added: S1 Algo = 92.0\n"
        );
        assert_eq!(
            fx.run(RecordCommand::SetScore(score("S1", "Algo", 95.0))).unwrap(),
            "Score updated: S1 Algo = 95.0\n"
        );

        let listed = fx
            .run(RecordCommand::List(ListCommand { format: None }))
            .unwrap();
        assert_eq!(listed, "S1\tAnn\tCS\t1\t95.00\n");
    }

    #[test]
    fn test_set_score_unknown_student() {
        let mut fx = Fixture::new();
        let err = fx
            .run(RecordCommand::SetScore(score("S9", "Algo", 1.0)))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_edit_score_without_scores_says_so() {
        let mut fx = Fixture::new();
        fx.run(add_cmd("S1")).unwrap();
        let (result, out) = fx.run_with_output(RecordCommand::EditScore(score("S1", "Algo", 50.0)));
        assert!(matches!(result, Err(Error::CourseNotFound { .. })));
        assert_eq!(out, "Student S1 has no scores yet. Use `set-score` to add one.\n");
    }

    #[test]
    fn test_edit_score_unknown_course_lists_courses() {
        let mut fx = Fixture::new();
        fx.run(add_cmd("S1")).unwrap();
        fx.run(RecordCommand::SetScore(score("S1", "Calc", 70.0)))
            .unwrap();
        fx.run(RecordCommand::SetScore(score("S1", "Algo", 80.0)))
            .unwrap();

        let (result, out) = fx.run_with_output(RecordCommand::EditScore(score("S1", "Net", 50.0)));
        assert!(matches!(result, Err(Error::CourseNotFound { .. })));
        assert_eq!(out, "Courses on record for S1: Algo, Calc\n");
        assert_eq!(
            fx.run(RecordCommand::EditScore(score("S1", "Calc", 75.0)))
                .unwrap(),
            "Score updated: S1 Calc = 75.0\n"
        );
    }

    #[test]
    fn test_edit_score_unknown_student_lists_nothing() {
        let mut fx = Fixture::new();
        let (result, out) = fx.run_with_output(RecordCommand::EditScore(score("S9", "Algo", 50.0)));
        assert!(result.unwrap_err().is_not_found());
        assert!(out.is_empty());
    }

    #[test]
    fn test_delete() {
        let mut fx = Fixture::new();
        fx.run(add_cmd("S1")).unwrap();
        let out = fx
            .run(RecordCommand::Delete(IdArgs {
                id: "S1".to_string(),
            }))
            .unwrap();
        assert_eq!(out, "Student S1 deleted.\n");
        assert!(fx.book.records().is_empty());
    }

    #[test]
    fn test_career_requires_premium() {
        let mut fx = Fixture::new();
        fx.run(add_cmd("S1")).unwrap();
        fx.run(RecordCommand::SetScore(score("S1", "Algo", 88.0)))
            .unwrap();

        let career = || {
            RecordCommand::Career(IdArgs {
                id: "S1".to_string(),
            })
        };
        assert!(matches!(fx.run(career()), Err(Error::PremiumRequired)));

        let status = fx
            .run(RecordCommand::Premium(PremiumCommand { upgrade: false }))
            .unwrap();
        assert!(status.starts_with("Premium: inactive"));

        fx.run(RecordCommand::Premium(PremiumCommand { upgrade: true }))
            .unwrap();
        assert_eq!(
            fx.run(career()).unwrap(),
            "Career recommendation for S1: Software Engineer / AI Engineer\n"
        );
    }
}

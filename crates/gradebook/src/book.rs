//! The operations a front end drives: one loaded session over a record store.
//!
//! [`Gradebook`] loads the store once when opened and saves the whole
//! collection after each successful mutation. Failed operations never save,
//! and a mutation whose save fails leaves the loaded records untouched.
//! Ids and course names coming in from the caller are trimmed, matching how
//! they are read back from disk.

use tracing::info;

use crate::career::CareerTag;
use crate::codec::{self, DelimitedScoreCodec, ScoreCodec};
use crate::error::{Error, Result};
use crate::record::{Scores, StudentRecord, SummaryRow};
use crate::storage::{self, RecordStore};

/// A session's view of all student records.
#[derive(Debug)]
pub struct Gradebook<C: ScoreCodec = DelimitedScoreCodec> {
    store: RecordStore<C>,
    records: Vec<StudentRecord>,
}

impl<C: ScoreCodec> Gradebook<C> {
    /// Load every record from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file exists but cannot be read.
    pub fn open(store: RecordStore<C>) -> Result<Self> {
        let records = store.load()?;
        Ok(Self { store, records })
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &RecordStore<C> {
        &self.store
    }

    /// All records in file order.
    #[must_use]
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Re-read the backing file, discarding the in-memory collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read.
    pub fn load_all(&mut self) -> Result<&[StudentRecord]> {
        self.records = self.store.load()?;
        Ok(&self.records)
    }

    /// Write the in-memory collection to the backing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be written.
    pub fn save_all(&self) -> Result<()> {
        self.store.save(&self.records)
    }

    /// Add a new student, optionally with some scores already filled in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidId`] for an empty or header-like id,
    /// [`Error::EmptyCourse`] if an initial score has a blank course name,
    /// [`Error::DuplicateId`] if the id is taken, or a storage error.
    pub fn add_student(
        &mut self,
        id: &str,
        name: &str,
        program: &str,
        initial_scores: Option<Scores>,
    ) -> Result<()> {
        let id = id.trim();
        if codec::is_reserved_id(id) {
            return Err(Error::InvalidId { id: id.to_string() });
        }

        let mut record = StudentRecord::new(id, name.trim(), program.trim());
        for (course, score) in initial_scores.unwrap_or_default() {
            let course = course.trim();
            if course.is_empty() {
                return Err(Error::EmptyCourse { id: id.to_string() });
            }
            record.upsert_score(course, score);
        }

        let mut staged = self.records.clone();
        storage::add(&mut staged, record)?;
        self.commit(staged)
    }

    /// Insert or overwrite one course score.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, [`Error::EmptyCourse`]
    /// for a blank course name, or a storage error.
    pub fn set_score(&mut self, id: &str, course: &str, score: f64) -> Result<()> {
        let id = id.trim();
        let course = course.trim();
        let (index, _) =
            storage::find_by_id(&self.records, id).ok_or_else(|| Error::not_found(id))?;
        if course.is_empty() {
            return Err(Error::EmptyCourse { id: id.to_string() });
        }

        let mut staged = self.records.clone();
        match staged[index].upsert_score(course, score) {
            Some(old) => info!("Updated {id} {course}: {old} -> {score}"),
            None => info!("Added {id} {course}: {score}"),
        }
        self.commit(staged)
    }

    /// Change the score of a course the student already has.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id,
    /// [`Error::CourseNotFound`] if the course has no score yet, or a
    /// storage error.
    pub fn edit_score(&mut self, id: &str, course: &str, score: f64) -> Result<()> {
        let id = id.trim();
        let course = course.trim();
        let (index, record) =
            storage::find_by_id(&self.records, id).ok_or_else(|| Error::not_found(id))?;
        if !record.scores.contains_key(course) {
            return Err(Error::course_not_found(id, course));
        }

        let mut staged = self.records.clone();
        if let Some(old) = staged[index].upsert_score(course, score) {
            info!("Edited {id} {course}: {old} -> {score}");
        }
        self.commit(staged)
    }

    /// Names of the courses a student has scores for.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id.
    pub fn courses(&self, id: &str) -> Result<Vec<&str>> {
        let record = self.get_student(id)?;
        Ok(record.scores.keys().map(String::as_str).collect())
    }

    /// Remove a student.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id (nothing is saved), or a
    /// storage error.
    pub fn delete_student(&mut self, id: &str) -> Result<()> {
        let id = id.trim();
        let mut staged = self.records.clone();
        if !storage::delete_by_id(&mut staged, id) {
            return Err(Error::not_found(id));
        }
        self.commit(staged)
    }

    /// Look up one student.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id.
    pub fn get_student(&self, id: &str) -> Result<&StudentRecord> {
        let id = id.trim();
        storage::find_by_id(&self.records, id)
            .map(|(_, record)| record)
            .ok_or_else(|| Error::not_found(id))
    }

    /// One summary row per student, in file order.
    #[must_use]
    pub fn list_summaries(&self) -> Vec<SummaryRow> {
        self.records.iter().map(StudentRecord::summary_row).collect()
    }

    /// The career tag for a student's current scores.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id.
    pub fn career_tag(&self, id: &str) -> Result<CareerTag> {
        self.get_student(id)
            .map(|record| CareerTag::from_scores(&record.scores))
    }

    /// Save `staged` and adopt it only once it is on disk, so a failed save
    /// leaves the loaded records matching the file.
    fn commit(&mut self, staged: Vec<StudentRecord>) -> Result<()> {
        self.store.save(&staged)?;
        self.records = staged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn open_temp() -> (TempDir, Gradebook) {
        let dir = tempfile::tempdir().unwrap();
        let book = Gradebook::open(RecordStore::new(dir.path().join("students.csv"))).unwrap();
        (dir, book)
    }

    fn reopen(book: &Gradebook) -> Gradebook {
        Gradebook::open(RecordStore::new(book.store().path())).unwrap()
    }

    #[test]
    fn test_open_empty() {
        let (_dir, book) = open_temp();
        assert!(book.records().is_empty());
        assert!(book.list_summaries().is_empty());
    }

    #[test]
    fn test_add_student_persists() {
        let (_dir, mut book) = open_temp();
        book.add_student(" S1 ", " Ann ", "CS", None).unwrap();

        let reloaded = reopen(&book);
        let student = reloaded.get_student("S1").unwrap();
        assert_eq!(student.name, "Ann");
        assert_eq!(student.program, "CS");
    }

    #[test]
    fn test_add_student_with_initial_scores() {
        let (_dir, mut book) = open_temp();
        let mut scores = Scores::new();
        scores.insert("Algo".to_string(), 88.0);
        book.add_student("S1", "Ann", "CS", Some(scores)).unwrap();

        assert_eq!(book.courses("S1").unwrap(), vec!["Algo"]);
    }

    #[test]
    fn test_add_student_blank_initial_course_rejected() {
        let (_dir, mut book) = open_temp();
        let mut scores = Scores::new();
        scores.insert("  ".to_string(), 88.0);

        let err = book.add_student("S1", "Ann", "CS", Some(scores)).unwrap_err();
        assert!(matches!(err, Error::EmptyCourse { .. }));
        assert!(book.records().is_empty());
    }

    #[test]
    fn test_add_duplicate_does_not_save() {
        let (_dir, mut book) = open_temp();
        book.add_student("S1", "Ann", "CS", None).unwrap();
        let path = book.store().path().to_path_buf();
        let before = std::fs::read(&path).unwrap();

        let err = book.add_student("S1", "Impostor", "EE", None).unwrap_err();
        assert!(err.is_duplicate_id());
        assert_eq!(book.records().len(), 1);
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_add_reserved_ids_rejected() {
        let (_dir, mut book) = open_temp();
        for id in ["", "   ", "nim", "NIM"] {
            let err = book.add_student(id, "x", "y", None).unwrap_err();
            assert!(matches!(err, Error::InvalidId { .. }), "{id:?}");
        }
        assert!(!book.store().path().exists());
    }

    #[test]
    fn test_set_score_unknown_student() {
        let (_dir, mut book) = open_temp();
        let err = book.set_score("S9", "Algo", 90.0).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_set_score_unknown_student_checked_before_course() {
        let (_dir, mut book) = open_temp();
        let err = book.set_score("S9", " ", 90.0).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_set_score_blank_course() {
        let (_dir, mut book) = open_temp();
        book.add_student("S1", "Ann", "CS", None).unwrap();
        let err = book.set_score("S1", " ", 90.0).unwrap_err();
        assert!(matches!(err, Error::EmptyCourse { .. }));
    }

    #[test]
    fn test_set_score_overwrite_end_to_end() {
        let (_dir, mut book) = open_temp();
        book.add_student("S1", "Ann", "CS", None).unwrap();
        book.set_score("S1", "Algo", 92.0).unwrap();
        book.set_score("S1", "Algo", 95.0).unwrap();

        let rows = reopen(&book).list_summaries();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "S1");
        assert_eq!(rows[0].course_count, 1);
        assert_eq!(rows[0].average, 95.0);
    }

    #[test]
    fn test_edit_score_existing_course() {
        let (_dir, mut book) = open_temp();
        book.add_student("S1", "Ann", "CS", None).unwrap();
        book.set_score("S1", "Algo", 60.0).unwrap();
        book.edit_score("S1", "Algo", 72.5).unwrap();

        assert_eq!(reopen(&book).get_student("S1").unwrap().scores["Algo"], 72.5);
    }

    #[test]
    fn test_edit_score_missing_course() {
        let (_dir, mut book) = open_temp();
        book.add_student("S1", "Ann", "CS", None).unwrap();

        let err = book.edit_score("S1", "Algo", 72.5).unwrap_err();
        assert!(matches!(err, Error::CourseNotFound { .. }));
        assert!(book.get_student("S1").unwrap().scores.is_empty());
    }

    #[test]
    fn test_delete_student() {
        let (_dir, mut book) = open_temp();
        book.add_student("S1", "Ann", "CS", None).unwrap();
        book.add_student("S2", "Bo", "EE", None).unwrap();
        book.delete_student("S1").unwrap();

        let reloaded = reopen(&book);
        assert_eq!(reloaded.records().len(), 1);
        assert!(reloaded.get_student("S1").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_missing_does_not_save() {
        let (_dir, mut book) = open_temp();
        let err = book.delete_student("S1").unwrap_err();
        assert!(err.is_not_found());
        assert!(!book.store().path().exists());
    }

    #[test]
    fn test_career_tag() {
        let (_dir, mut book) = open_temp();
        book.add_student("S1", "Ann", "CS", None).unwrap();
        assert_eq!(book.career_tag("S1").unwrap(), CareerTag::NoData);

        book.set_score("S1", "Algo", 90.0).unwrap();
        book.set_score("S1", "Calc", 80.0).unwrap();
        assert_eq!(book.career_tag("S1").unwrap(), CareerTag::SoftwareAiEngineer);
        assert!(book.career_tag("S2").unwrap_err().is_not_found());
    }

    /// Put a directory where the data file goes so the next save fails.
    fn block_data_file(book: &Gradebook) {
        let path = book.store().path();
        if path.exists() {
            std::fs::remove_file(path).unwrap();
        }
        std::fs::create_dir(path).unwrap();
    }

    fn unblock_data_file(book: &Gradebook) {
        std::fs::remove_dir(book.store().path()).unwrap();
    }

    #[test]
    fn test_failed_add_can_be_retried() {
        let (_dir, mut book) = open_temp();
        block_data_file(&book);

        let err = book.add_student("S1", "Ann", "CS", None).unwrap_err();
        assert!(matches!(err, Error::DataFileWrite { .. }));
        assert!(book.records().is_empty());

        unblock_data_file(&book);
        book.add_student("S1", "Ann", "CS", None).unwrap();
        assert_eq!(reopen(&book).records().len(), 1);
    }

    #[test]
    fn test_failed_delete_can_be_retried() {
        let (_dir, mut book) = open_temp();
        book.add_student("S1", "Ann", "CS", None).unwrap();
        block_data_file(&book);

        let err = book.delete_student("S1").unwrap_err();
        assert!(matches!(err, Error::DataFileWrite { .. }));
        assert_eq!(book.records().len(), 1);

        unblock_data_file(&book);
        book.delete_student("S1").unwrap();
        assert!(reopen(&book).records().is_empty());
    }

    #[test]
    fn test_failed_score_changes_leave_records_unchanged() {
        let (_dir, mut book) = open_temp();
        book.add_student("S1", "Ann", "CS", None).unwrap();
        book.set_score("S1", "Algo", 60.0).unwrap();
        let before = book.records().to_vec();
        block_data_file(&book);

        assert!(book.set_score("S1", "Algo", 95.0).is_err());
        assert!(book.set_score("S1", "Calc", 70.0).is_err());
        assert!(book.edit_score("S1", "Algo", 80.0).is_err());
        assert_eq!(book.records(), before.as_slice());

        unblock_data_file(&book);
        book.edit_score("S1", "Algo", 80.0).unwrap();
        assert_eq!(reopen(&book).get_student("S1").unwrap().scores["Algo"], 80.0);
    }

    #[test]
    fn test_load_all_picks_up_external_changes() {
        let (_dir, mut book) = open_temp();
        book.add_student("S1", "Ann", "CS", None).unwrap();

        let mut other = reopen(&book);
        other.add_student("S2", "Bo", "EE", None).unwrap();

        assert_eq!(book.records().len(), 1);
        assert_eq!(book.load_all().unwrap().len(), 2);
    }
}

//! Loading question sets from row stores.

mod loader;

use tracing::{debug, info};

use crate::error::QuizError;
use crate::models::{Question, QuestionDraft, QuestionRef};
use crate::store::RowStore;

pub use loader::{load_from_store, load_questions};

/// Questions loaded from one read of a store, in store order.
#[derive(Debug, Clone, Default)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Read the whole store. An empty store is an empty set, not an error.
    pub fn load(store: &dyn RowStore) -> Result<Self, QuizError> {
        load_from_store(store).map(Self::new)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Questions with the most recently appended first.
    pub fn newest_first(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().rev()
    }

    pub fn find(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Look up a question by the handle [`Question::reference`] gave out,
    /// possibly from an earlier load of the same store.
    pub fn get(&self, reference: &QuestionRef) -> Option<&Question> {
        match reference {
            QuestionRef::Id(id) => self.find(id),
            QuestionRef::Row(row) => self.questions.get(*row).filter(|q| !q.stored_id),
        }
    }

    /// Row index of the question with `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    /// Rewrite literal-text answers as their 1-based option index.
    ///
    /// Questions whose answer does not resolve keep it as stored; each one
    /// is reported as a [`QuizError::MalformedAnswer`] naming its id.
    pub fn canonicalize(&mut self) -> Vec<QuizError> {
        let mut defects = Vec::new();
        for question in &mut self.questions {
            match question.answer_index() {
                Ok(index) => question.answer = (index + 1).to_string(),
                Err(err) => {
                    debug!(id = %question.id, answer = %question.answer, "answer does not resolve");
                    defects.push(err);
                }
            }
        }
        defects
    }
}

impl IntoIterator for QuestionSet {
    type Item = Question;
    type IntoIter = std::vec::IntoIter<Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.into_iter()
    }
}

/// Validate `draft` and append it to `store` as one row. Returns the new id.
///
/// Nothing is written when validation fails.
pub fn append_question(store: &dyn RowStore, draft: &QuestionDraft) -> Result<String, QuizError> {
    let row = draft.validate_and_serialize()?;
    store.append_row(&row)?;
    info!(store = %store.describe(), id = %row[0], "appended question");
    Ok(row[0].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DraftField;
    use crate::models::CSV_HEADER;
    use crate::store::MemoryStore;

    fn korea_draft() -> QuestionDraft {
        QuestionDraft {
            question: "Capital of Korea?".to_string(),
            options: ["Seoul", "Busan", "Incheon", "Daegu"].map(str::to_string),
            answer_index: 1,
            creator: "Alice".to_string(),
        }
    }

    #[test]
    fn test_append_then_load() {
        let store = MemoryStore::new();
        let id = append_question(&store, &korea_draft()).unwrap();

        let set = QuestionSet::load(&store).unwrap();
        assert_eq!(set.len(), 1);
        let question = set.find(&id).unwrap();
        assert_eq!(question.creator, "Alice");
        assert_eq!(question.correct_option().unwrap(), "Seoul");
        assert_eq!(set.position(&id), Some(0));
    }

    #[test]
    fn test_invalid_draft_writes_nothing() {
        let store = MemoryStore::new();
        let draft = QuestionDraft {
            creator: "  ".to_string(),
            ..korea_draft()
        };

        match append_question(&store, &draft) {
            Err(QuizError::Validation(err)) => assert!(err.contains(DraftField::Creator)),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_append_failure_propagates() {
        let store = MemoryStore::unavailable("quota exceeded");
        assert!(matches!(
            append_question(&store, &korea_draft()),
            Err(QuizError::SourceUnavailable(_))
        ));
    }

    #[test]
    fn test_newest_first() {
        let store = MemoryStore::new();
        store.push(&["1", "old", "a", "b", "c", "d", "1", "x"]);
        store.push(&["2", "new", "a", "b", "c", "d", "1", "x"]);

        let set = QuestionSet::load(&store).unwrap();
        let texts: Vec<_> = set.newest_first().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, ["new", "old"]);
        assert_eq!(set.questions()[0].text, "old");
    }

    #[test]
    fn test_get_by_reference() {
        let store = MemoryStore::with_header(&CSV_HEADER);
        store.push(&["First?", "a", "b", "c", "d", "1"]);
        store.push(&["Second?", "a", "b", "c", "d", "2"]);

        let before = QuestionSet::load(&store).unwrap();
        let reference = before.questions()[1].reference();
        assert_eq!(reference, QuestionRef::Row(1));

        let after = QuestionSet::load(&store).unwrap();
        assert_eq!(after.get(&reference).unwrap().text, "Second?");
        assert!(after.get(&QuestionRef::Row(2)).is_none());
        assert!(after.get(&QuestionRef::Id(before.questions()[1].id.clone())).is_none());
    }

    #[test]
    fn test_row_reference_skips_rows_with_stored_ids() {
        let store = MemoryStore::new();
        store.push(&["q-1", "Stored?", "a", "b", "c", "d", "1", "Ann"]);

        let set = QuestionSet::load(&store).unwrap();
        assert!(set.get(&QuestionRef::Row(0)).is_none());
        assert_eq!(set.get(&QuestionRef::Id("q-1".to_string())).unwrap().text, "Stored?");
    }

    #[test]
    fn test_canonicalize_migrates_literal_answers() {
        let store = MemoryStore::with_header(&CSV_HEADER);
        store.push(&["Capital?", "Busan", "Seoul", "Incheon", "Daegu", "Seoul"]);
        store.push(&["Broken?", "a", "b", "c", "d", "z"]);
        store.push(&["Indexed?", "a", "b", "c", "d", "4"]);

        let mut set = QuestionSet::load(&store).unwrap();
        let defects = set.canonicalize();

        assert_eq!(defects.len(), 1);
        match &defects[0] {
            QuizError::MalformedAnswer { question_id, answer } => {
                assert_eq!(question_id, &set.questions()[1].id);
                assert_eq!(answer, "z");
            }
            other => panic!("unexpected defect {other:?}"),
        }
        let answers: Vec<_> = set.questions().iter().map(|q| q.answer.as_str()).collect();
        assert_eq!(answers, ["2", "z", "4"]);
    }
}

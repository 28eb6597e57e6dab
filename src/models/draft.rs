//! Newly authored questions.

use uuid::Uuid;

use crate::error::{DraftField, QuizError, ValidationError};

use super::question::NUM_OPTIONS;

/// Generate an opaque question id. Collisions are not checked.
pub fn new_question_id() -> String {
    Uuid::new_v4().to_string()
}

/// A question as typed into the creation form, before it becomes a row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: String,
    pub options: [String; NUM_OPTIONS],
    /// 1-based index of the correct option.
    pub answer_index: u8,
    pub creator: String,
}

impl QuestionDraft {
    /// Report every field that keeps this draft from being appended.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut fields = Vec::new();

        if self.question.trim().is_empty() {
            fields.push(DraftField::Question);
        }
        for (option, field) in self.options.iter().zip(DraftField::OPTIONS) {
            if option.trim().is_empty() {
                fields.push(field);
            }
        }
        if !(1..=NUM_OPTIONS as u8).contains(&self.answer_index) {
            fields.push(DraftField::AnswerIndex);
        }
        if self.creator.trim().is_empty() {
            fields.push(DraftField::Creator);
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { fields })
        }
    }

    /// Validate and produce the row to append, with a freshly generated id.
    ///
    /// Column order is `id, question, option1..4, answer, creator`; stores
    /// rely on it matching their header.
    pub fn validate_and_serialize(&self) -> Result<Vec<String>, QuizError> {
        self.validate()?;

        let mut row = Vec::with_capacity(NUM_OPTIONS + 4);
        row.push(new_question_id());
        row.push(self.question.clone());
        row.extend(self.options.iter().cloned());
        row.push(self.answer_index.to_string());
        row.push(self.creator.clone());
        Ok(row)
    }
}

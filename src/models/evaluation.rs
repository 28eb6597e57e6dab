//! Answer evaluation.

use crate::error::QuizError;

use super::question::Question;

/// One answer given by a user. Correctness is derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSubmission {
    pub question_id: String,
    pub selected_option: String,
}

/// Outcome of checking a selected option against a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub is_correct: bool,
    pub correct_option: String,
}

impl Evaluation {
    /// Human-readable outcome shown after a submission.
    pub fn result_line(&self, selected_option: &str) -> String {
        if self.is_correct {
            format!("Correct! (answer: {})", self.correct_option)
        } else {
            format!(
                "Wrong. (answer: {}, your choice: {})",
                self.correct_option, selected_option
            )
        }
    }
}

/// Check `selected_option` against the question's stored answer.
///
/// Comparison is exact: no trimming, no case folding.
pub fn evaluate(question: &Question, selected_option: &str) -> Result<Evaluation, QuizError> {
    let correct_option = question.correct_option()?;

    Ok(Evaluation {
        is_correct: selected_option == correct_option,
        correct_option: correct_option.to_string(),
    })
}

impl AnswerSubmission {
    pub fn evaluate(&self, question: &Question) -> Result<Evaluation, QuizError> {
        evaluate(question, &self.selected_option)
    }
}

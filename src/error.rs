//! Error types shared by the loader, evaluator, appender and stores.

use std::fmt;

use thiserror::Error;

/// Errors produced while loading, evaluating or appending questions.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The row store could not be read or written (unreachable, misconfigured,
    /// malformed response).
    #[error("question source unavailable: {0}")]
    SourceUnavailable(String),

    /// A stored question whose answer does not resolve to one of its options.
    #[error("question {question_id} has a malformed answer: {answer:?}")]
    MalformedAnswer { question_id: String, answer: String },

    /// A newly authored question failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error while driving the terminal.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuizError {
    /// Returns `true` for defects in stored data rather than in the store or
    /// the user's input.
    pub fn is_data_quality(&self) -> bool {
        matches!(self, QuizError::MalformedAnswer { .. })
    }
}

/// Fields of a [`crate::QuestionDraft`], used to report validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Question,
    Option1,
    Option2,
    Option3,
    Option4,
    AnswerIndex,
    Creator,
}

impl DraftField {
    /// The four option fields in display order.
    pub const OPTIONS: [DraftField; 4] = [
        DraftField::Option1,
        DraftField::Option2,
        DraftField::Option3,
        DraftField::Option4,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DraftField::Question => "question",
            DraftField::Option1 => "option 1",
            DraftField::Option2 => "option 2",
            DraftField::Option3 => "option 3",
            DraftField::Option4 => "option 4",
            DraftField::AnswerIndex => "answer",
            DraftField::Creator => "creator",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Every field that made a draft unacceptable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    pub fields: Vec<DraftField>,
}

impl ValidationError {
    pub fn contains(&self, field: DraftField) -> bool {
        self.fields.contains(&field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.fields.iter().map(|field| field.label()).collect();
        write!(f, "please fill in: {}", labels.join(", "))
    }
}

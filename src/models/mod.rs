mod draft;
mod evaluation;
mod question;

pub use draft::{new_question_id, QuestionDraft};
pub use evaluation::{evaluate, AnswerSubmission, Evaluation};
pub use question::{
    Question, QuestionRef, ANONYMOUS_CREATOR, CSV_HEADER, NUM_OPTIONS, OPTION_COLUMNS, SHEET_HEADER,
};

use std::fmt;

use crate::error::QuizError;

/// Attribution used when a question's creator is unknown.
pub const ANONYMOUS_CREATOR: &str = "anonymous";

/// Number of options every question carries.
pub const NUM_OPTIONS: usize = 4;

/// Column layout of the spreadsheet store. Appended rows follow this order.
pub const SHEET_HEADER: [&str; 8] = [
    "id", "question", "option1", "option2", "option3", "option4", "answer", "creator",
];

/// Column layout of legacy CSV question files (no id, no creator).
pub const CSV_HEADER: [&str; 6] = ["question", "option1", "option2", "option3", "option4", "answer"];

/// Column names of the four options, in display order.
pub const OPTION_COLUMNS: [&str; NUM_OPTIONS] = ["option1", "option2", "option3", "option4"];

/// How a question is found again after the store is re-read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuestionRef {
    /// The id stored in the question's row.
    Id(String),
    /// 0-based data-row index, for rows stored without an id. Their
    /// generated ids change on every load.
    Row(usize),
}

impl QuestionRef {
    /// `#N` is a row index; anything else is an id.
    pub fn parse(s: &str) -> Self {
        s.strip_prefix('#')
            .and_then(|n| n.parse().ok())
            .map(QuestionRef::Row)
            .unwrap_or_else(|| QuestionRef::Id(s.to_string()))
    }
}

impl fmt::Display for QuestionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionRef::Id(id) => f.write_str(id),
            QuestionRef::Row(row) => write!(f, "#{}", row),
        }
    }
}

/// A multiple-choice question as loaded from a row store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    /// Whether `id` came from the row rather than being generated at load.
    pub stored_id: bool,
    /// 0-based position among the store's data rows.
    pub row: usize,
    pub text: String,
    pub options: [String; NUM_OPTIONS],
    /// Raw stored answer: a 1-based index or the literal text of an option.
    pub answer: String,
    pub creator: String,
}

impl Question {
    /// Resolve the stored answer to a 0-based option index.
    ///
    /// A strict integer in `1..=4` is an index; anything else must equal one
    /// of the options verbatim. The index reading wins even when the answer
    /// also equals a different option, e.g. `"2"` with options `4, 3, 2, 1`
    /// resolves to `"3"`.
    pub fn answer_index(&self) -> Result<usize, QuizError> {
        if let Ok(n) = self.answer.parse::<usize>() {
            if (1..=NUM_OPTIONS).contains(&n) {
                return Ok(n - 1);
            }
        }

        self.options
            .iter()
            .position(|option| *option == self.answer)
            .ok_or_else(|| QuizError::MalformedAnswer {
                question_id: self.id.clone(),
                answer: self.answer.clone(),
            })
    }

    /// The option text the stored answer points at.
    pub fn correct_option(&self) -> Result<&str, QuizError> {
        self.answer_index().map(|index| self.options[index].as_str())
    }

    /// Stable handle: the stored id, or the row for id-less rows.
    pub fn reference(&self) -> QuestionRef {
        if self.stored_id {
            QuestionRef::Id(self.id.clone())
        } else {
            QuestionRef::Row(self.row)
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.creator == ANONYMOUS_CREATOR
    }

    /// Serialize into the spreadsheet column order.
    pub fn to_sheet_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(SHEET_HEADER.len());
        row.push(self.id.clone());
        row.push(self.text.clone());
        row.extend(self.options.iter().cloned());
        row.push(self.answer.clone());
        row.push(self.creator.clone());
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer: &str, options: [&str; 4]) -> Question {
        Question {
            id: "q1".to_string(),
            stored_id: true,
            row: 0,
            text: "Pick one".to_string(),
            options: options.map(str::to_string),
            answer: answer.to_string(),
            creator: ANONYMOUS_CREATOR.to_string(),
        }
    }

    #[test]
    fn test_numeric_answer_is_one_based_index() {
        let q = question("3", ["a", "b", "c", "d"]);
        assert_eq!(q.answer_index().unwrap(), 2);
        assert_eq!(q.correct_option().unwrap(), "c");
    }

    #[test]
    fn test_literal_answer_matches_option() {
        let q = question("Seoul", ["Busan", "Seoul", "Incheon", "Daegu"]);
        assert_eq!(q.answer_index().unwrap(), 1);
    }

    #[test]
    fn test_numeric_literal_outside_range_matches_option() {
        let q = question("1990", ["1988", "1990", "1992", "1994"]);
        assert_eq!(q.correct_option().unwrap(), "1990");
    }

    #[test]
    fn test_index_takes_precedence_over_literal() {
        let q = question("2", ["4", "3", "2", "1"]);
        assert_eq!(q.correct_option().unwrap(), "3");
    }

    #[test]
    fn test_malformed_answers() {
        for answer in ["0", "5", "-1", "Tokyo", "", " 2", "2.0"] {
            let q = question(answer, ["a", "b", "c", "d"]);
            assert!(
                matches!(q.answer_index(), Err(QuizError::MalformedAnswer { .. })),
                "answer {answer:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_reference_prefers_stored_id() {
        let mut q = question("1", ["a", "b", "c", "d"]);
        assert_eq!(q.reference(), QuestionRef::Id("q1".to_string()));

        q.stored_id = false;
        q.row = 3;
        assert_eq!(q.reference(), QuestionRef::Row(3));
        assert_eq!(q.reference().to_string(), "#3");
    }

    #[test]
    fn test_reference_parse() {
        assert_eq!(QuestionRef::parse("#0"), QuestionRef::Row(0));
        assert_eq!(QuestionRef::parse("#12"), QuestionRef::Row(12));
        assert_eq!(QuestionRef::parse("abc"), QuestionRef::Id("abc".to_string()));
        assert_eq!(QuestionRef::parse("#x"), QuestionRef::Id("#x".to_string()));
    }

    #[test]
    fn test_sheet_row_order() {
        let q = question("1", ["a", "b", "c", "d"]);
        assert_eq!(
            q.to_sheet_row(),
            vec!["q1", "Pick one", "a", "b", "c", "d", "1", "anonymous"]
        );
    }
}

use tracing::{debug, warn};

use crate::error::QuizError;
use crate::models::{new_question_id, Question, ANONYMOUS_CREATOR, OPTION_COLUMNS};
use crate::store::{RowRecord, RowStore};

/// Build questions from store rows, one per row, in row order.
///
/// Rows without an `id` get a freshly generated one and are referred to by
/// position instead (see [`Question::reference`]); rows without a `creator`
/// are attributed to [`ANONYMOUS_CREATOR`]. Missing text columns load as
/// empty strings; the evaluator reports what that breaks.
pub fn load_questions(rows: Vec<RowRecord>) -> Vec<Question> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| question_from_row(index, row))
        .collect()
}

fn question_from_row(index: usize, mut row: RowRecord) -> Question {
    let mut take = |column: &str| row.remove(column).unwrap_or_default();

    let stored = Some(take("id")).filter(|id| !id.is_empty());
    let stored_id = stored.is_some();
    let id = stored.unwrap_or_else(new_question_id);
    let text = take("question");
    let options = OPTION_COLUMNS.map(&mut take);
    let answer = take("answer");
    let creator = Some(take("creator"))
        .filter(|creator| !creator.is_empty())
        .unwrap_or_else(|| ANONYMOUS_CREATOR.to_string());

    Question {
        id,
        stored_id,
        row: index,
        text,
        options,
        answer,
        creator,
    }
}

/// Read every row of `store` and load it.
pub fn load_from_store(store: &dyn RowStore) -> Result<Vec<Question>, QuizError> {
    let rows = store.read_rows().inspect_err(|e| {
        warn!(store = %store.describe(), error = %e, "failed to read questions");
    })?;
    let questions = load_questions(rows);
    debug!(store = %store.describe(), count = questions.len(), "loaded questions");
    Ok(questions)
}

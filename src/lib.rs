//! # quiz-board
//!
//! Multiple-choice quizzes kept in a Google spreadsheet or a local CSV file.
//!
//! The core is small: [`load_questions`] turns store rows into
//! [`Question`]s, [`evaluate`] checks a selected option, and
//! [`QuestionDraft::validate_and_serialize`] turns a newly authored question
//! into the row a store appends. [`Quiz`] wraps all of it in a terminal UI.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_board::{CsvStore, Quiz, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     let quiz = Quiz::new(Box::new(CsvStore::new("questions.csv")));
//!     quiz.run()?;
//!     Ok(())
//! }
//! ```

mod app;
pub mod config;
mod data;
mod error;
pub mod logging;
mod models;
pub mod store;
pub mod terminal;
mod ui;

use crossterm::event::{self, Event, KeyEventKind};

pub use app::{App, Banner, CreateForm, Outcome, Page};
pub use config::{QuizConfig, SourceConfig};
pub use data::{append_question, load_from_store, load_questions, QuestionSet};
pub use error::{DraftField, QuizError, ValidationError};
pub use models::{
    evaluate, new_question_id, AnswerSubmission, Evaluation, Question, QuestionDraft, QuestionRef,
    ANONYMOUS_CREATOR, CSV_HEADER, NUM_OPTIONS, SHEET_HEADER,
};
pub use store::{CsvStore, MemoryStore, RowRecord, RowStore, SheetsStore};

/// A quiz board that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a quiz board over `store`, loading it once.
    pub fn new(store: Box<dyn RowStore>) -> Self {
        Self {
            app: App::new(store),
        }
    }

    /// Run the board in the terminal.
    ///
    /// This takes over the terminal and returns when the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut session = terminal::TerminalSession::start()?;
        run_event_loop(&mut session, &mut self.app)?;
        session.finish()?;
        Ok(())
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::QuizTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if app.handle_key(key.code) {
                break;
            }
        }
    }

    Ok(())
}

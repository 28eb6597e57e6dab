use crossterm::event::KeyCode;
use tracing::warn;

use crate::data::{append_question, QuestionSet};
use crate::error::{DraftField, QuizError};
use crate::models::{evaluate, Evaluation, Question, QuestionDraft, QuestionRef, NUM_OPTIONS};
use crate::store::RowStore;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    List,
    Solve,
    Create,
}

/// Status line shown under every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Info(String),
    Warning(String),
    Error(String),
}

/// Result of submitting an option on the solve page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Answered {
        evaluation: Evaluation,
        selected: String,
    },
    /// The stored answer is broken; this is not the user's mistake.
    DataError(String),
}

/// Form fields in focus order.
pub const FORM_ORDER: [DraftField; 7] = [
    DraftField::Question,
    DraftField::Option1,
    DraftField::Option2,
    DraftField::Option3,
    DraftField::Option4,
    DraftField::AnswerIndex,
    DraftField::Creator,
];

/// State of the question creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateForm {
    pub draft: QuestionDraft,
    pub focus: usize,
    pub invalid: Vec<DraftField>,
}

impl Default for CreateForm {
    fn default() -> Self {
        Self {
            draft: QuestionDraft {
                answer_index: 1,
                ..QuestionDraft::default()
            },
            focus: 0,
            invalid: Vec::new(),
        }
    }
}

impl CreateForm {
    pub fn focused(&self) -> DraftField {
        FORM_ORDER[self.focus]
    }

    /// Text of a form field; the answer selector has none.
    pub fn text(&self, field: DraftField) -> Option<&str> {
        let draft = &self.draft;
        match field {
            DraftField::Question => Some(draft.question.as_str()),
            DraftField::Option1 => Some(draft.options[0].as_str()),
            DraftField::Option2 => Some(draft.options[1].as_str()),
            DraftField::Option3 => Some(draft.options[2].as_str()),
            DraftField::Option4 => Some(draft.options[3].as_str()),
            DraftField::Creator => Some(draft.creator.as_str()),
            DraftField::AnswerIndex => None,
        }
    }

    fn text_mut(&mut self, field: DraftField) -> Option<&mut String> {
        let draft = &mut self.draft;
        match field {
            DraftField::Question => Some(&mut draft.question),
            DraftField::Option1 => Some(&mut draft.options[0]),
            DraftField::Option2 => Some(&mut draft.options[1]),
            DraftField::Option3 => Some(&mut draft.options[2]),
            DraftField::Option4 => Some(&mut draft.options[3]),
            DraftField::Creator => Some(&mut draft.creator),
            DraftField::AnswerIndex => None,
        }
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FORM_ORDER.len();
    }

    fn focus_previous(&mut self) {
        self.focus = (self.focus + FORM_ORDER.len() - 1) % FORM_ORDER.len();
    }

    fn cycle_answer(&mut self, forward: bool) {
        let n = NUM_OPTIONS as u8;
        let current = self.draft.answer_index.clamp(1, n) - 1;
        let next = (if forward { current + 1 } else { current + n - 1 }) % n;
        self.draft.answer_index = next + 1;
    }
}

pub struct App {
    store: Box<dyn RowStore>,
    page: Page,
    questions: QuestionSet,
    list_cursor: usize,
    selected: Option<QuestionRef>,
    selected_option: usize,
    outcome: Option<Outcome>,
    form: CreateForm,
    banner: Option<Banner>,
}

impl App {
    /// Start on the list page with a fresh load of `store`.
    pub fn new(store: Box<dyn RowStore>) -> Self {
        let mut app = Self {
            store,
            page: Page::List,
            questions: QuestionSet::default(),
            list_cursor: 0,
            selected: None,
            selected_option: 0,
            outcome: None,
            form: CreateForm::default(),
            banner: None,
        };
        app.reload();
        app
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn source(&self) -> String {
        self.store.describe()
    }

    pub fn question_set(&self) -> &QuestionSet {
        &self.questions
    }

    /// Cursor position in newest-first order.
    pub fn list_cursor(&self) -> usize {
        self.list_cursor
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.selected
            .as_ref()
            .and_then(|reference| self.questions.get(reference))
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn form(&self) -> &CreateForm {
        &self.form
    }

    /// Re-read the store. On failure the previous questions stay visible.
    pub fn reload(&mut self) -> bool {
        match QuestionSet::load(self.store.as_ref()) {
            Ok(questions) => {
                self.questions = questions;
                self.list_cursor = self
                    .list_cursor
                    .min(self.questions.len().saturating_sub(1));
                true
            }
            Err(err) => {
                self.banner = Some(Banner::Error(err.to_string()));
                false
            }
        }
    }

    fn show_list(&mut self) {
        self.page = Page::List;
        self.selected = None;
        self.outcome = None;
        self.reload();
    }

    fn show_create(&mut self) {
        self.page = Page::Create;
        self.selected = None;
        self.banner = None;
    }

    /// Open the question under the list cursor, re-reading the store first.
    pub fn open_selected(&mut self) {
        let Some(reference) = self
            .questions
            .newest_first()
            .nth(self.list_cursor)
            .map(Question::reference)
        else {
            return;
        };

        self.banner = None;
        if !self.reload() {
            return;
        }
        if self.questions.get(&reference).is_none() {
            self.banner = Some(Banner::Error(
                "That quiz no longer exists. Back to the list.".to_string(),
            ));
            self.page = Page::List;
            return;
        }

        self.selected = Some(reference);
        self.selected_option = 0;
        self.outcome = None;
        self.page = Page::Solve;
    }

    pub fn select_next_option(&mut self) {
        self.selected_option = (self.selected_option + 1) % NUM_OPTIONS;
    }

    pub fn select_previous_option(&mut self) {
        self.selected_option = (self.selected_option + NUM_OPTIONS - 1) % NUM_OPTIONS;
    }

    /// Evaluate the highlighted option against the open question.
    pub fn submit_answer(&mut self) {
        let Some(question) = self.current_question() else {
            return;
        };
        let selected = question.options[self.selected_option].clone();

        self.outcome = Some(match evaluate(question, &selected) {
            Ok(evaluation) => Outcome::Answered {
                evaluation,
                selected,
            },
            Err(err) => {
                warn!(error = %err, "cannot grade question");
                Outcome::DataError(err.to_string())
            }
        });
    }

    /// Append the form's draft. The form is cleared only when the row lands.
    pub fn submit_form(&mut self) {
        match append_question(self.store.as_ref(), &self.form.draft) {
            Ok(_) => {
                self.form = CreateForm::default();
                self.banner = Some(Banner::Info("New quiz added!".to_string()));
            }
            Err(QuizError::Validation(err)) => {
                self.banner = Some(Banner::Warning(err.to_string()));
                if let Some(first) = err.fields.first() {
                    self.form.focus = FORM_ORDER.iter().position(|f| f == first).unwrap_or(0);
                }
                self.form.invalid = err.fields;
            }
            Err(err) => {
                self.banner = Some(Banner::Error(err.to_string()));
            }
        }
    }

    /// Handle a key press. Returns true if the app should exit.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.page {
            Page::List => self.handle_list_key(key),
            Page::Solve => self.handle_solve_key(key),
            Page::Create => self.handle_create_key(key),
        }
    }

    fn handle_list_key(&mut self, key: KeyCode) -> bool {
        let count = self.questions.len();
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                if count > 0 {
                    self.list_cursor = (self.list_cursor + 1) % count;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if count > 0 {
                    self.list_cursor = (self.list_cursor + count - 1) % count;
                }
            }
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('n') | KeyCode::Char('N') => self.show_create(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.banner = None;
                self.reload();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
            _ => {}
        }
        false
    }

    fn handle_solve_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous_option(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next_option(),
            KeyCode::Enter | KeyCode::Char(' ') => self.submit_answer(),
            KeyCode::Esc | KeyCode::Char('b') => self.show_list(),
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {}
        }
        false
    }

    fn handle_create_key(&mut self, key: KeyCode) -> bool {
        let focused = self.form.focused();
        match key {
            KeyCode::Esc => self.show_list(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_previous(),
            KeyCode::Left if focused == DraftField::AnswerIndex => self.form.cycle_answer(false),
            KeyCode::Right if focused == DraftField::AnswerIndex => self.form.cycle_answer(true),
            KeyCode::Char(c) if focused == DraftField::AnswerIndex => {
                if let Some(n) = c.to_digit(10).filter(|n| (1..=NUM_OPTIONS as u32).contains(n)) {
                    self.form.draft.answer_index = n as u8;
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.form.text_mut(focused) {
                    text.push(c);
                    self.form.invalid.retain(|f| *f != focused);
                }
            }
            KeyCode::Backspace => {
                if let Some(text) = self.form.text_mut(focused) {
                    text.pop();
                }
            }
            _ => {}
        }
        false
    }
}

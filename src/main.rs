use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use quiz_board::{
    append_question, evaluate, logging, QuestionDraft, QuestionRef, QuestionSet, Quiz, QuizConfig,
    RowStore,
    SourceConfig, NUM_OPTIONS, SHEET_HEADER,
};

/// Environment variable holding the OAuth token used with `--sheet`.
const TOKEN_ENV: &str = "GOOGLE_SHEETS_TOKEN";

#[derive(Parser, Debug)]
#[command(version, about = "Multiple-choice quizzes from a spreadsheet or CSV file", long_about = None)]
struct Args {
    /// Config file (defaults to ./quiz.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use a local CSV file as the question store
    #[arg(long, global = true, conflicts_with = "sheet")]
    csv: Option<PathBuf>,

    /// Use a Google spreadsheet (by id) as the question store; the access
    /// token is read from GOOGLE_SHEETS_TOKEN
    #[arg(long, global = true)]
    sheet: Option<String>,

    /// Write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse, solve and create quizzes in the terminal (default)
    Play,

    /// Print every quiz, newest first
    List,

    /// Check one answer
    Check {
        /// Quiz id as printed by `list` (`#N` for rows without a stored id)
        #[arg(long, required_unless_present = "row", conflicts_with = "row")]
        id: Option<String>,

        /// 0-based row of a quiz without a stored id
        #[arg(long)]
        row: Option<usize>,

        /// The option text you pick
        #[arg(long)]
        choice: String,
    },

    /// Append a new quiz
    Add {
        #[arg(long)]
        question: String,

        /// Give exactly four times, in display order
        #[arg(long = "option", required = true)]
        options: Vec<String>,

        /// Number (1-4) of the correct option
        #[arg(long)]
        answer: u8,

        #[arg(long)]
        creator: String,
    },

    /// Rewrite the question set as a spreadsheet-layout CSV with numeric answers
    Migrate {
        #[arg(long)]
        output: PathBuf,

        /// Overwrite the output file if it exists
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = QuizConfig::load(args.config.as_deref())?;
    if let Some(path) = args.csv {
        config.source = SourceConfig::Csv { path };
    } else if let Some(spreadsheet_id) = args.sheet {
        config.source = SourceConfig::Sheets {
            spreadsheet_id,
            range: quiz_board::store::DEFAULT_RANGE.to_string(),
            access_token: std::env::var(TOKEN_ENV).unwrap_or_default(),
            base_url: quiz_board::store::DEFAULT_SHEETS_URL.to_string(),
        };
    }
    if args.log_file.is_some() {
        config.log_file = args.log_file;
    }

    let command = args.command.unwrap_or(Command::Play);
    match &command {
        Command::Play => {
            if let Some(path) = &config.log_file {
                logging::init_file(path)?;
            }
        }
        _ => logging::init_stderr(),
    }

    let store = config.open_store()?;
    tracing::debug!(source = ?config.source, "opened question store");

    match command {
        Command::Play => Quiz::new(store).run()?,
        Command::List => list(store.as_ref())?,
        Command::Check { id, row, choice } => {
            let reference = match (id, row) {
                (Some(id), _) => QuestionRef::parse(&id),
                (None, Some(row)) => QuestionRef::Row(row),
                (None, None) => return Err("pass --id or --row".into()),
            };
            check(store.as_ref(), &reference, &choice)?
        }
        Command::Add {
            question,
            options,
            answer,
            creator,
        } => add(store.as_ref(), question, options, answer, creator)?,
        Command::Migrate { output, force } => migrate(store.as_ref(), &output, force)?,
    }

    Ok(())
}

fn list(store: &dyn RowStore) -> Result<(), Box<dyn Error>> {
    let questions = QuestionSet::load(store)?;
    if questions.is_empty() {
        println!("No quizzes yet. Create one with `quiz-board add`.");
        return Ok(());
    }

    for question in questions.newest_first() {
        println!(
            "{}  {}  (by {})",
            question.reference(),
            question.text,
            question.creator
        );
    }
    println!("{} quizzes", questions.len());
    Ok(())
}

fn check(store: &dyn RowStore, reference: &QuestionRef, choice: &str) -> Result<(), Box<dyn Error>> {
    let questions = QuestionSet::load(store)?;
    let question = questions
        .get(reference)
        .ok_or_else(|| format!("no quiz with id {}", reference))?;

    let evaluation = evaluate(question, choice)?;
    println!("{}", evaluation.result_line(choice));
    Ok(())
}

fn add(
    store: &dyn RowStore,
    question: String,
    options: Vec<String>,
    answer_index: u8,
    creator: String,
) -> Result<(), Box<dyn Error>> {
    let count = options.len();
    let options: [String; NUM_OPTIONS] = options
        .try_into()
        .map_err(|_| format!("expected {} options, got {}", NUM_OPTIONS, count))?;

    let draft = QuestionDraft {
        question,
        options,
        answer_index,
        creator,
    };
    let id = append_question(store, &draft)?;
    println!("Added quiz {}", id);
    Ok(())
}

fn migrate(store: &dyn RowStore, output: &Path, force: bool) -> Result<(), Box<dyn Error>> {
    if output.exists() && !force {
        return Err(format!("{} already exists; pass --force to overwrite", output.display()).into());
    }

    let mut questions = QuestionSet::load(store)?;
    for defect in questions.canonicalize() {
        eprintln!("warning: {}", defect);
    }

    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record(SHEET_HEADER)?;
    for question in questions.questions() {
        writer.write_record(question.to_sheet_row())?;
    }
    writer.flush()?;

    println!("Wrote {} quizzes to {}", questions.len(), output.display());
    Ok(())
}

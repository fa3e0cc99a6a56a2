use std::fmt;
use std::path::PathBuf;

use storage::json::JsonQuestionFile;
use storage::repository::QuestionRepository;
use storage::sqlite::SqliteRepository;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    from: PathBuf,
    replace: bool,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("QUIZ_DB_URL").unwrap_or_else(|_| "sqlite:quiz.sqlite3?mode=rwc".into());
        let mut from = std::env::var("QUIZ_QUESTIONS")
            .map_or_else(|_| PathBuf::from("public/data/questions.json"), PathBuf::from);
        let mut replace = false;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--from" => {
                    from = PathBuf::from(require_value(&mut args, "--from")?);
                }
                "--replace" => replace = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            from,
            replace,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>   SQLite URL (default: sqlite:quiz.sqlite3?mode=rwc)");
    eprintln!("  --from <path>       Question JSON document (default: public/data/questions.json)");
    eprintln!("  --replace           Delete existing questions before importing");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_QUESTIONS");
}

async fn run(args: Args) -> Result<usize, Box<dyn std::error::Error>> {
    let source = JsonQuestionFile::new(&args.from);
    let questions = source.list_questions().await?;

    let repo = SqliteRepository::connect(&args.db_url).await?;
    repo.migrate().await?;
    if args.replace {
        repo.clear_questions().await?;
    }
    for question in &questions {
        repo.upsert_question(question).await?;
    }
    Ok(questions.len())
}

#[tokio::main]
async fn main() {
    let args = match Args::parse() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            std::process::exit(2);
        }
    };

    match run(args.clone()).await {
        Ok(count) => {
            println!(
                "seeded {count} questions from {} into {}",
                args.from.display(),
                args.db_url
            );
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::{DEFAULT_AUTO_ADVANCE_DELAY_SECS, QuizSettings};
use services::QuestionBankService;
use storage::repository::Storage;
use tracing_subscriber::EnvFilter;
use ui::{App, AudioSource, UiApp, build_app_context};

const DEFAULT_QUESTIONS: &str = "public/data/questions.json";
const DEFAULT_AUDIO_DIR: &str = "public/audio";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidTimePerRound { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidTimePerRound { raw } => {
                write!(f, "invalid --time-per-round value: {raw} (expected seconds > 0)")
            }
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

struct DesktopApp {
    question_bank: Arc<QuestionBankService>,
    settings: QuizSettings,
    audio: AudioSource,
}

impl UiApp for DesktopApp {
    fn question_bank(&self) -> Arc<QuestionBankService> {
        Arc::clone(&self.question_bank)
    }

    fn settings(&self) -> QuizSettings {
        self.settings
    }

    fn audio(&self) -> AudioSource {
        self.audio.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum QuestionSource {
    Json(PathBuf),
    Sqlite(String),
}

#[derive(Debug)]
struct Args {
    source: QuestionSource,
    audio: AudioSource,
    settings: QuizSettings,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --questions <path>       Question JSON document (default: {DEFAULT_QUESTIONS})");
    eprintln!("  --db <sqlite_url>        Read questions from SQLite instead of JSON");
    eprintln!("  --audio-dir <path>       Audio root with question/ and answer/ (default: {DEFAULT_AUDIO_DIR})");
    eprintln!("  --time-per-round <secs>  Countdown per question (default: 30)");
    eprintln!("  --no-autoplay            Do not advance automatically after a timeout");
    eprintln!("  --mute                   Run without sound");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_QUESTIONS, QUIZ_DB_URL, QUIZ_AUDIO_DIR, QUIZ_TIME_PER_ROUND,");
    eprintln!("  QUIZ_AUTOPLAY=0, QUIZ_MUTE=1, RUST_LOG");
}

/// `0`/`false`/`off`/`no` and `1`/`true`/`on`/`yes`; anything else is ignored.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn parse_time_per_round(raw: String) -> Result<u32, ArgsError> {
    match raw.trim().parse::<u32>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ArgsError::InvalidTimePerRound { raw }),
    }
}

impl Args {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        Self::parse_with_env(args, |key| std::env::var(key).ok())
    }

    fn parse_with_env(
        mut args: impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut questions = env("QUIZ_QUESTIONS")
            .map_or_else(|| PathBuf::from(DEFAULT_QUESTIONS), PathBuf::from);
        let mut db_url = env("QUIZ_DB_URL").filter(|value| !value.trim().is_empty());
        let mut audio_dir = env("QUIZ_AUDIO_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_AUDIO_DIR), PathBuf::from);
        let mut time_per_round = env("QUIZ_TIME_PER_ROUND")
            .map(parse_time_per_round)
            .transpose()?
            .unwrap_or(QuizSettings::default().time_per_round_secs());
        let mut autoplay = env("QUIZ_AUTOPLAY")
            .as_deref()
            .and_then(parse_flag)
            .unwrap_or(true);
        let mut mute = env("QUIZ_MUTE")
            .as_deref()
            .and_then(parse_flag)
            .unwrap_or(false);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions" => {
                    questions = PathBuf::from(require_value(&mut args, "--questions")?);
                }
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = Some(value);
                }
                "--audio-dir" => {
                    audio_dir = PathBuf::from(require_value(&mut args, "--audio-dir")?);
                }
                "--time-per-round" => {
                    time_per_round =
                        parse_time_per_round(require_value(&mut args, "--time-per-round")?)?;
                }
                "--no-autoplay" => autoplay = false,
                "--mute" => mute = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let settings =
            QuizSettings::new(time_per_round, DEFAULT_AUTO_ADVANCE_DELAY_SECS, autoplay).map_err(
                |_| ArgsError::InvalidTimePerRound {
                    raw: time_per_round.to_string(),
                },
            )?;

        Ok(Self {
            source: db_url.map_or(QuestionSource::Json(questions), QuestionSource::Sqlite),
            audio: if mute {
                AudioSource::Muted
            } else {
                AudioSource::Directory(audio_dir)
            },
            settings,
        })
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open the store here so core/services stay free of process concerns.
    let storage = match &args.source {
        QuestionSource::Json(path) => {
            tracing::info!(path = %path.display(), "reading questions from JSON");
            Storage::json(path.clone())
        }
        QuestionSource::Sqlite(url) => {
            tracing::info!(%url, "reading questions from SQLite");
            Storage::sqlite(url).await?
        }
    };

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        question_bank: Arc::new(QuestionBankService::new(Arc::clone(&storage.questions))),
        settings: args.settings,
        audio: args.audio,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Audio Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

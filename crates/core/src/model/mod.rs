mod audio;
mod bank;
mod ids;
mod question;
mod report;
mod settings;

pub use audio::{AudioTrack, TrackKind};
pub use bank::{BankError, QuestionBank};
pub use ids::QuestionId;
pub use question::{Question, QuestionError};
pub use report::{QuizReport, ReportError};
pub use settings::{
    DEFAULT_AUTO_ADVANCE_DELAY_SECS, DEFAULT_TIME_PER_ROUND_SECS, QuestionLimit, QuizSettings,
    SettingsError,
};

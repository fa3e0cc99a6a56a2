use std::fmt;
use std::num::NonZeroU32;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TIME_PER_ROUND_SECS: u32 = 30;
pub const DEFAULT_AUTO_ADVANCE_DELAY_SECS: u32 = 5;

/// How many questions a session asks before it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuestionLimit {
    #[default]
    Unbounded,
    AtMost(NonZeroU32),
}

impl QuestionLimit {
    /// Interpret user-entered text. Anything that is not a positive integer means unbounded.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<u32>()
            .ok()
            .and_then(NonZeroU32::new)
            .map_or(Self::Unbounded, Self::AtMost)
    }

    #[must_use]
    pub fn from_count(count: Option<u32>) -> Self {
        count
            .and_then(NonZeroU32::new)
            .map_or(Self::Unbounded, Self::AtMost)
    }

    #[must_use]
    pub fn is_reached(&self, answered: u32) -> bool {
        match self {
            Self::Unbounded => false,
            Self::AtMost(max) => answered >= max.get(),
        }
    }

    #[must_use]
    pub fn max(&self) -> Option<u32> {
        match self {
            Self::Unbounded => None,
            Self::AtMost(max) => Some(max.get()),
        }
    }
}

impl fmt::Display for QuestionLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => f.write_str("∞"),
            Self::AtMost(max) => write!(f, "{max}"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("time per round must be at least one second")]
    ZeroTimePerRound,
}

/// Per-session timing and autoplay preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    time_per_round_secs: u32,
    auto_advance_delay_secs: u32,
    autoplay: bool,
}

impl QuizSettings {
    /// # Errors
    ///
    /// Returns `SettingsError::ZeroTimePerRound` when `time_per_round_secs` is zero.
    pub fn new(
        time_per_round_secs: u32,
        auto_advance_delay_secs: u32,
        autoplay: bool,
    ) -> Result<Self, SettingsError> {
        if time_per_round_secs == 0 {
            return Err(SettingsError::ZeroTimePerRound);
        }
        Ok(Self {
            time_per_round_secs,
            auto_advance_delay_secs,
            autoplay,
        })
    }

    #[must_use]
    pub fn time_per_round_secs(&self) -> u32 {
        self.time_per_round_secs
    }

    #[must_use]
    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_secs(u64::from(self.auto_advance_delay_secs))
    }

    #[must_use]
    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.autoplay = autoplay;
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            time_per_round_secs: DEFAULT_TIME_PER_ROUND_SECS,
            auto_advance_delay_secs: DEFAULT_AUTO_ADVANCE_DELAY_SECS,
            autoplay: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_parsing_falls_back_to_unbounded() {
        assert_eq!(QuestionLimit::parse(""), QuestionLimit::Unbounded);
        assert_eq!(QuestionLimit::parse("abc"), QuestionLimit::Unbounded);
        assert_eq!(QuestionLimit::parse("0"), QuestionLimit::Unbounded);
        assert_eq!(QuestionLimit::parse("-4"), QuestionLimit::Unbounded);
        assert_eq!(QuestionLimit::parse(" 12 ").max(), Some(12));
    }

    #[test]
    fn limit_is_reached_at_max() {
        let limit = QuestionLimit::from_count(Some(3));
        assert!(!limit.is_reached(2));
        assert!(limit.is_reached(3));
        assert!(!QuestionLimit::Unbounded.is_reached(u32::MAX));
        assert_eq!(limit.to_string(), "3");
        assert_eq!(QuestionLimit::Unbounded.to_string(), "∞");
    }

    #[test]
    fn defaults_match_round_timing() {
        let settings = QuizSettings::default();
        assert_eq!(settings.time_per_round_secs(), 30);
        assert_eq!(settings.auto_advance_delay(), Duration::from_secs(5));
        assert!(settings.autoplay());
        assert_eq!(
            QuizSettings::new(0, 5, true).unwrap_err(),
            SettingsError::ZeroTimePerRound
        );
    }
}

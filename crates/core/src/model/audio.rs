use crate::model::QuestionId;

/// Which phase of a question a track belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Question,
    Answer,
}

impl TrackKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Answer => "answer",
        }
    }
}

/// An audio cue, keyed by question id and phase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioTrack {
    pub question_id: QuestionId,
    pub kind: TrackKind,
}

impl AudioTrack {
    #[must_use]
    pub fn question(question_id: QuestionId) -> Self {
        Self {
            question_id,
            kind: TrackKind::Question,
        }
    }

    #[must_use]
    pub fn answer(question_id: QuestionId) -> Self {
        Self {
            question_id,
            kind: TrackKind::Answer,
        }
    }

    /// Path relative to the audio root, e.g. `answer/12.mp3`.
    #[must_use]
    pub fn relative_path(&self) -> String {
        format!("{}/{}.mp3", self.kind.as_str(), self.question_id)
    }
}

use std::path::PathBuf;
use std::rc::Rc;

use dioxus::document::Document;
use quiz_core::model::AudioTrack;
use services::{AudioError, AudioPlayer, SilentAudio};

use super::scripts::{audio_src, play_script, stop_script};

/// Plays cues through the webview's HTML audio element.
pub(super) struct WebviewAudio {
    root: PathBuf,
    document: Rc<dyn Document>,
}

impl WebviewAudio {
    pub(super) fn new(root: PathBuf, document: Rc<dyn Document>) -> Self {
        Self { root, document }
    }
}

impl AudioPlayer for WebviewAudio {
    fn play(&mut self, track: AudioTrack) -> Result<(), AudioError> {
        let path = self.root.join(track.relative_path());
        if !path.is_file() {
            return Err(AudioError::Missing {
                path: path.display().to_string(),
            });
        }
        let _ = self.document.eval(play_script(&audio_src(&path)));
        Ok(())
    }

    fn stop(&mut self) {
        let _ = self.document.eval(stop_script().to_owned());
    }
}

pub(super) enum QuizAudio {
    Silent(SilentAudio),
    Webview(WebviewAudio),
}

impl AudioPlayer for QuizAudio {
    fn play(&mut self, track: AudioTrack) -> Result<(), AudioError> {
        match self {
            Self::Silent(audio) => audio.play(track),
            Self::Webview(audio) => audio.play(track),
        }
    }

    fn stop(&mut self) {
        match self {
            Self::Silent(audio) => audio.stop(),
            Self::Webview(audio) => audio.stop(),
        }
    }
}

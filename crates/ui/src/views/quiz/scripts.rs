use std::path::{Component, Path};

/// URL the webview loads a cue from. Relative roots resolve against the app's working directory.
pub(super) fn audio_src(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    format!("/{}", parts.join("/"))
}

/// One shared `<audio>` element; each play restarts it on the new source.
pub(super) fn play_script(src: &str) -> String {
    format!(
        r#"(function() {{
                const audio = window.__quizAudio || (window.__quizAudio = new Audio());
                audio.pause();
                audio.src = {src:?};
                audio.currentTime = 0;
                audio.play().catch(() => {{}});
            }})();"#
    )
}

pub(super) fn stop_script() -> &'static str {
    r#"(function() {
                const audio = window.__quizAudio;
                if (audio) {
                    audio.pause();
                    audio.currentTime = 0;
                }
            })();"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_src_uses_forward_slashes() {
        let path = Path::new("public").join("audio").join("question").join("12.mp3");
        assert_eq!(audio_src(&path), "/public/audio/question/12.mp3");
        assert_eq!(
            audio_src(Path::new("/srv/quiz/answer/3.mp3")),
            "/srv/quiz/answer/3.mp3"
        );
    }

    #[test]
    fn play_script_quotes_source() {
        let js = play_script("/public/audio/answer/3.mp3");
        assert!(js.contains(r#"audio.src = "/public/audio/answer/3.mp3";"#));
        assert!(js.contains("audio.play()"));
        assert!(stop_script().contains("audio.currentTime = 0"));
    }
}

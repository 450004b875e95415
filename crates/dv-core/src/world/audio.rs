//! Voice-line playback state.
//!
//! Scripted talkers hold their dialogue state until the line they triggered
//! has finished playing. The host answers that question through [`AudioCues`].

use super::Speech;

pub trait AudioCues {
    /// True while the voice recording for `speech` is still playing
    fn is_playing(&self, speech: Speech) -> bool;
}

/// Host without audio: every line finishes instantly
#[derive(Debug, Clone, Copy, Default)]
pub struct Silence;

impl AudioCues for Silence {
    fn is_playing(&self, _speech: Speech) -> bool {
        false
    }
}

/// A fixed set of lines that stay "playing" until cleared
#[derive(Debug, Clone, Default)]
pub struct PlayingLines(pub Vec<Speech>);

impl AudioCues for PlayingLines {
    fn is_playing(&self, speech: Speech) -> bool {
        self.0.contains(&speech)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_never_plays() {
        assert!(!Silence.is_playing(Speech::Garbud4));
    }

    #[test]
    fn test_playing_lines() {
        let audio = PlayingLines(vec![Speech::Zhar2]);
        assert!(audio.is_playing(Speech::Zhar2));
        assert!(!audio.is_playing(Speech::Zhar1));
    }
}

//! Optional platform capabilities: speech, native sharing and the clipboard.
//!
//! Every capability has a no-op implementation so a missing platform feature
//! degrades to "nothing happens" rather than an error.

use serde::{Deserialize, Serialize};

/// Text-to-speech output.
pub trait SpeechSynth: Send {
    fn is_available(&self) -> bool {
        true
    }

    fn speak(&mut self, text: &str);

    /// Stop any speech in progress.
    fn cancel(&mut self);
}

/// Native share sheet.
pub trait ShareTarget: Send {
    /// Returns `true` when the platform accepted the share.
    fn share(&mut self, data: &ShareData) -> bool;
}

/// System clipboard.
pub trait Clipboard: Send {
    /// Returns `true` when the text was copied.
    fn write_text(&mut self, text: &str) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpeech;

impl SpeechSynth for NoSpeech {
    fn is_available(&self) -> bool {
        false
    }

    fn speak(&mut self, _text: &str) {}

    fn cancel(&mut self) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoShare;

impl ShareTarget for NoShare {
    fn share(&mut self, _data: &ShareData) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn write_text(&mut self, _text: &str) -> bool {
        false
    }
}

/// Payload handed to the share sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareData {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareData {
    /// Clipboard form: title, text and url on separate lines.
    pub fn to_clipboard_text(&self) -> String {
        format!("{}\n{}\n{}", self.title, self.text, self.url)
    }
}

/// What happened when the reader asked to share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShareOutcome {
    Shared,
    CopiedToClipboard,
    Unavailable,
}

/// The capability set a controller runs with.
pub struct Capabilities {
    pub speech: Box<dyn SpeechSynth>,
    pub share: Box<dyn ShareTarget>,
    pub clipboard: Box<dyn Clipboard>,
}

impl Capabilities {
    /// No speech, no sharing, no clipboard.
    pub fn none() -> Self {
        Self {
            speech: Box::new(NoSpeech),
            share: Box::new(NoShare),
            clipboard: Box::new(NoClipboard),
        }
    }

    pub fn with_speech(mut self, speech: impl SpeechSynth + 'static) -> Self {
        self.speech = Box::new(speech);
        self
    }

    pub fn with_share(mut self, share: impl ShareTarget + 'static) -> Self {
        self.share = Box::new(share);
        self
    }

    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    /// Try the share sheet, then the clipboard.
    pub fn share_or_copy(&mut self, data: &ShareData) -> ShareOutcome {
        if self.share.share(data) {
            ShareOutcome::Shared
        } else if self.clipboard.write_text(&data.to_clipboard_text()) {
            ShareOutcome::CopiedToClipboard
        } else {
            ShareOutcome::Unavailable
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("speech", &self.speech.is_available())
            .finish_non_exhaustive()
    }
}

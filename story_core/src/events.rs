//! Commands into the narrative controller and the effects it reports back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use space_weather::{AchievementId, ActiveAdaptations, AdaptationKind};

use crate::capabilities::ShareOutcome;
use crate::controller::{ChoiceOutcome, CompletionSummary};
use crate::library::StoryId;
use crate::overlay::RenderedPage;

/// Reader input, from buttons or the keyboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoryCommand {
    /// Start a story with the adaptations in effect at `now`.
    Load { story: StoryId, now: DateTime<Utc> },
    Next,
    Previous,
    /// Choose by zero-based index; the page advances after the display delay.
    Choose(usize),
    ToggleVoice,
    ApplyAdaptations(ActiveAdaptations),
    Share { url: String },
}

impl StoryCommand {
    /// Map a keyboard key name to a command.
    ///
    /// Arrow keys page back and forth, space advances, `1`-`3` pick a choice.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(StoryCommand::Previous),
            "ArrowRight" | " " => Some(StoryCommand::Next),
            "1" | "2" | "3" => key.parse::<usize>().ok().map(|n| StoryCommand::Choose(n - 1)),
            _ => None,
        }
    }
}

/// Observable results of handling a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StoryEffect {
    PageShown(RenderedPage),
    ChoiceResolved(ChoiceOutcome),
    StoryCompleted(CompletionSummary),
    AchievementUnlocked(AchievementId),
    /// An extreme adaptation worth interrupting the reader for.
    SpaceWeatherAlert { kind: AdaptationKind, dialogue: String },
    VoiceToggled(bool),
    Shared(ShareOutcome),
}

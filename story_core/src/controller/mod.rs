//! Narrative Controller - drives one reading session at a time.
//!
//! The controller owns the reading state (current page, recorded choices,
//! active adaptations) and is the only writer of reader progress. Pages are
//! always rendered from the library's base content through the overlay, so the
//! same page, index and adaptation flags always produce the same output.

mod outcome;

pub use outcome::*;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use space_weather::{AchievementId, ActiveAdaptations, SpaceWeatherCatalogue};
use std::sync::Arc;
use tracing::{debug, info};

use crate::capabilities::{Capabilities, ShareData, ShareOutcome};
use crate::config::NarrativeConfig;
use crate::error::StoryError;
use crate::events::{StoryCommand, StoryEffect};
use crate::library::{StoryId, StoryLibrary};
use crate::overlay::{ContentOverlay, RenderedPage};
use crate::progress::{KeyValueStorage, ProgressStore, UserProgress};
use crate::quiz::QuizSession;

const SHARE_TEXT: &str = "I just completed an amazing space weather adventure! Join me in learning about real NASA data through interactive stories.";

/// Where a reading session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionStatus {
    Reading,
    Completed { score: u32 },
}

/// State of the story currently being read.
#[derive(Debug, Clone)]
pub struct ReadingSession {
    run_id: RunId,
    story: StoryId,
    current_page: usize,
    total_pages: usize,
    choices: Vec<ChoiceRecord>,
    status: SessionStatus,
    adaptations: ActiveAdaptations,
}

impl ReadingSession {
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn story(&self) -> &StoryId {
        &self.story
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn choices(&self) -> &[ChoiceRecord] {
        &self.choices
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn adaptations(&self) -> &ActiveAdaptations {
        &self.adaptations
    }

    /// Sum of the points of every recorded choice.
    pub fn score(&self) -> u32 {
        self.choices.iter().map(|c| c.outcome.points).sum()
    }

    fn ensure_reading(&self) -> Result<(), StoryError> {
        match self.status {
            SessionStatus::Reading => Ok(()),
            SessionStatus::Completed { .. } => Err(StoryError::AlreadyCompleted(self.story.clone())),
        }
    }
}

/// Results shown on the completion screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionSummary {
    pub story: StoryId,
    pub score: u32,
    pub choices_made: usize,
    pub pages_read: usize,
    /// Achievements newly unlocked by this completion.
    pub unlocked: Vec<AchievementId>,
}

/// What advancing a page led to.
#[derive(Debug, Clone, PartialEq)]
pub enum PageTurn {
    Page(RenderedPage),
    Completed(CompletionSummary),
}

/// The narrative controller.
pub struct NarrativeController<S: KeyValueStorage> {
    config: NarrativeConfig,
    library: Arc<StoryLibrary>,
    catalogue: Arc<SpaceWeatherCatalogue>,
    overlay: ContentOverlay,
    progress: ProgressStore<S>,
    capabilities: Capabilities,
    session: Option<ReadingSession>,
    voice_enabled: bool,
}

impl<S: KeyValueStorage> NarrativeController<S> {
    /// Create a controller, loading progress from `storage`.
    pub fn new(
        config: NarrativeConfig,
        library: Arc<StoryLibrary>,
        catalogue: Arc<SpaceWeatherCatalogue>,
        storage: S,
    ) -> Self {
        let progress = ProgressStore::open(storage, config.progress_key.clone());
        let overlay = ContentOverlay::new(config.overlay.clone());
        Self {
            config,
            library,
            catalogue,
            overlay,
            progress,
            capabilities: Capabilities::none(),
            session: None,
            voice_enabled: false,
        }
    }

    /// Use platform speech, sharing and clipboard support.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Get the session being read, if any.
    pub fn session(&self) -> Option<&ReadingSession> {
        self.session.as_ref()
    }

    /// Get the reader's persisted progress.
    pub fn progress(&self) -> &UserProgress {
        self.progress.progress()
    }

    pub fn library(&self) -> &StoryLibrary {
        &self.library
    }

    pub fn voice_enabled(&self) -> bool {
        self.voice_enabled
    }

    /// Start reading `id` from its first page under the given adaptations.
    ///
    /// On error the previous session, if any, is left untouched.
    pub fn load_story(
        &mut self,
        id: &StoryId,
        adaptations: ActiveAdaptations,
    ) -> Result<RenderedPage, StoryError> {
        let story = self.library.get(id)?;
        if story.pages.is_empty() {
            return Err(StoryError::EmptyStory(id.clone()));
        }

        let session = ReadingSession {
            run_id: RunId::new(),
            story: id.clone(),
            current_page: 0,
            total_pages: story.total_pages(),
            choices: Vec::new(),
            status: SessionStatus::Reading,
            adaptations,
        };
        info!(
            story = %id,
            run = %session.run_id,
            pages = session.total_pages,
            adaptations = session.adaptations.len(),
            "story loaded"
        );
        self.session = Some(session);
        self.show_current()
    }

    /// The current page as rendered under the session's adaptations.
    pub fn current_page(&self) -> Result<RenderedPage, StoryError> {
        let session = self.session.as_ref().ok_or(StoryError::NoStoryLoaded)?;
        let story = self.library.get(&session.story)?;
        let page = story
            .page(session.current_page)
            .ok_or_else(|| StoryError::UnknownPage {
                story: session.story.clone(),
                page: session.current_page,
            })?;
        Ok(self.overlay.render(page, session.current_page, &session.adaptations))
    }

    fn show_current(&mut self) -> Result<RenderedPage, StoryError> {
        let page = self.current_page()?;
        if self.voice_enabled && self.capabilities.speech.is_available() {
            self.capabilities.speech.speak(&page.speech_text());
        }
        debug!(page = page.index, choices = page.choice_count(), "page shown");
        Ok(page)
    }

    fn session_mut(&mut self) -> Result<&mut ReadingSession, StoryError> {
        self.session.as_mut().ok_or(StoryError::NoStoryLoaded)
    }

    /// Advance one page, completing the story when already on the last page.
    pub fn next_page(&mut self) -> Result<PageTurn, StoryError> {
        let session = self.session_mut()?;
        session.ensure_reading()?;

        if session.current_page + 1 < session.total_pages {
            session.current_page += 1;
            Ok(PageTurn::Page(self.show_current()?))
        } else {
            Ok(PageTurn::Completed(self.complete()?))
        }
    }

    /// Go back one page; stays on the first page.
    pub fn previous_page(&mut self) -> Result<RenderedPage, StoryError> {
        let session = self.session_mut()?;
        session.ensure_reading()?;

        if session.current_page == 0 {
            return self.current_page();
        }
        session.current_page -= 1;
        self.show_current()
    }

    /// Record a choice on the current page without advancing.
    pub fn make_choice(&mut self, index: usize) -> Result<ChoiceOutcome, StoryError> {
        self.session
            .as_ref()
            .ok_or(StoryError::NoStoryLoaded)?
            .ensure_reading()?;

        let available = self.current_page()?.choice_count();
        if index >= available {
            return Err(StoryError::InvalidChoice { index, available });
        }

        let session = self.session_mut()?;
        let outcome = ChoiceOutcome::resolve(index);
        session.choices.push(ChoiceRecord {
            page: session.current_page,
            choice: index,
            outcome,
        });
        debug!(
            page = session.current_page,
            choice = index,
            points = outcome.points,
            "choice recorded"
        );
        Ok(outcome)
    }

    /// Record a choice, keep the outcome on screen for the display delay, then advance.
    pub async fn choose_and_advance(
        &mut self,
        index: usize,
    ) -> Result<(ChoiceOutcome, PageTurn), StoryError> {
        let outcome = self.make_choice(index)?;
        tokio::time::sleep(self.config.choice_display_delay()).await;
        let turn = self.next_page()?;
        Ok((outcome, turn))
    }

    /// Merge new adaptations into the session and re-render the current page.
    ///
    /// Returns `None` when nothing is being read.
    pub fn apply_adaptations(
        &mut self,
        adaptations: &ActiveAdaptations,
    ) -> Result<Option<RenderedPage>, StoryError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        session.adaptations.merge(adaptations);
        if session.status != SessionStatus::Reading {
            return Ok(None);
        }
        self.show_current().map(Some)
    }

    /// Fraction of the story reached, counting the current page as read.
    pub fn progress_fraction(&self) -> f32 {
        self.session
            .as_ref()
            .map(|s| (s.current_page + 1) as f32 / s.total_pages as f32)
            .unwrap_or(0.0)
    }

    /// Record the finished story, then close the session. If the record
    /// cannot be saved the session stays open so completion can be retried.
    fn complete(&mut self) -> Result<CompletionSummary, StoryError> {
        let session = self.session.as_ref().ok_or(StoryError::NoStoryLoaded)?;
        let score = session.score();
        let story = session.story.clone();
        let choices_made = session.choices.len();
        let pages_read = session.total_pages;

        self.progress.complete_story(story.clone(), score)?;
        self.session_mut()?.status = SessionStatus::Completed { score };

        let mut unlocked = Vec::new();
        if self.unlock(AchievementId::FIRST_STORY)? {
            unlocked.push(AchievementId::new(AchievementId::FIRST_STORY));
        }
        let all_done = self.progress.progress().has_completed_all(self.library.ids());
        if all_done && self.unlock(AchievementId::ALL_STORIES)? {
            unlocked.push(AchievementId::new(AchievementId::ALL_STORIES));
        }

        info!(story = %story, score, choices = choices_made, "reading completed");
        Ok(CompletionSummary {
            story,
            score,
            choices_made,
            pages_read,
            unlocked,
        })
    }

    fn unlock(&mut self, id: &str) -> Result<bool, StoryError> {
        let points = self.catalogue.achievement(id).map_or(0, |a| a.points);
        self.progress.unlock_achievement(AchievementId::new(id), points)
    }

    /// Flip voice narration; turning it on reads the current page aloud.
    pub fn toggle_voice(&mut self) -> bool {
        self.voice_enabled = !self.voice_enabled;
        if self.voice_enabled {
            if let Ok(page) = self.current_page() {
                if self.capabilities.speech.is_available() {
                    self.capabilities.speech.speak(&page.speech_text());
                }
            }
        } else {
            self.capabilities.speech.cancel();
        }
        info!(enabled = self.voice_enabled, "voice narration toggled");
        self.voice_enabled
    }

    /// Share the current story, falling back to the clipboard.
    pub fn share_story(&mut self, url: &str) -> Result<ShareOutcome, StoryError> {
        let session = self.session.as_ref().ok_or(StoryError::NoStoryLoaded)?;
        let story = self.library.get(&session.story)?;
        let data = ShareData {
            title: format!("Chronicles of the Solar Monarch - {}", story.title),
            text: SHARE_TEXT.to_string(),
            url: url.to_string(),
        };
        let outcome = self.capabilities.share_or_copy(&data);
        debug!(?outcome, "story shared");
        Ok(outcome)
    }

    /// Draw a quiz for the current story's category.
    pub fn start_quiz<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<QuizSession, StoryError> {
        let session = self.session.as_ref().ok_or(StoryError::NoStoryLoaded)?;
        let category = &self.library.get(&session.story)?.quiz_category;
        let questions = self
            .catalogue
            .quiz_questions(rng, self.config.quiz_length, None, Some(category.as_str()))
            .into_iter()
            .cloned()
            .collect();
        Ok(QuizSession::new(category.clone(), questions))
    }

    /// Record a quiz result; returns achievements newly unlocked.
    pub fn finish_quiz(&mut self, quiz: &QuizSession) -> Result<Vec<AchievementId>, StoryError> {
        self.progress.record_quiz(quiz.category(), quiz.score())?;

        let mut unlocked = Vec::new();
        let enough = self.progress.progress().correct_answers >= self.config.quiz_master_threshold;
        if enough && self.unlock(AchievementId::QUIZ_MASTER)? {
            unlocked.push(AchievementId::new(AchievementId::QUIZ_MASTER));
        }
        Ok(unlocked)
    }

    /// Handle one reader command.
    pub async fn dispatch(&mut self, command: StoryCommand) -> Result<Vec<StoryEffect>, StoryError> {
        let mut effects = Vec::new();
        match command {
            StoryCommand::Load { story, now } => {
                let adaptations = self.catalogue.check_adaptations(now);
                push_alerts(&mut effects, &adaptations);
                let page = self.load_story(&story, adaptations)?;
                effects.push(StoryEffect::PageShown(page));
            }
            StoryCommand::Next => push_turn(&mut effects, self.next_page()?),
            StoryCommand::Previous => {
                effects.push(StoryEffect::PageShown(self.previous_page()?));
            }
            StoryCommand::Choose(index) => {
                let (outcome, turn) = self.choose_and_advance(index).await?;
                effects.push(StoryEffect::ChoiceResolved(outcome));
                push_turn(&mut effects, turn);
            }
            StoryCommand::ToggleVoice => {
                effects.push(StoryEffect::VoiceToggled(self.toggle_voice()));
            }
            StoryCommand::ApplyAdaptations(adaptations) => {
                push_alerts(&mut effects, &adaptations);
                if let Some(page) = self.apply_adaptations(&adaptations)? {
                    effects.push(StoryEffect::PageShown(page));
                }
            }
            StoryCommand::Share { url } => {
                effects.push(StoryEffect::Shared(self.share_story(&url)?));
            }
        }
        Ok(effects)
    }

    /// Evaluate the catalogue's adaptation rules at `now` and apply them.
    pub fn refresh_adaptations(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<Option<RenderedPage>, StoryError> {
        let adaptations = self.catalogue.check_adaptations(now);
        self.apply_adaptations(&adaptations)
    }
}

fn push_alerts(effects: &mut Vec<StoryEffect>, adaptations: &ActiveAdaptations) {
    for (kind, modification) in adaptations.alerts() {
        effects.push(StoryEffect::SpaceWeatherAlert {
            kind,
            dialogue: modification.dialogue.clone(),
        });
    }
}

fn push_turn(effects: &mut Vec<StoryEffect>, turn: PageTurn) {
    match turn {
        PageTurn::Page(page) => effects.push(StoryEffect::PageShown(page)),
        PageTurn::Completed(summary) => {
            for id in &summary.unlocked {
                effects.push(StoryEffect::AchievementUnlocked(id.clone()));
            }
            effects.push(StoryEffect::StoryCompleted(summary));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::SpeechSynth;
    use crate::error::StorageError;
    use crate::progress::{KeyValueStorage, MemoryStorage};
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use space_weather::AdaptationKind;
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct RecordingSpeech(Arc<Mutex<Vec<String>>>);

    impl SpeechSynth for RecordingSpeech {
        fn speak(&mut self, text: &str) {
            self.0.lock().unwrap().push(text.to_string());
        }

        fn cancel(&mut self) {
            self.0.lock().unwrap().push("<cancel>".to_string());
        }
    }

    fn controller() -> NarrativeController<MemoryStorage> {
        NarrativeController::new(
            NarrativeConfig::default(),
            Arc::new(StoryLibrary::builtin().unwrap()),
            Arc::new(SpaceWeatherCatalogue::builtin().unwrap()),
            MemoryStorage::new(),
        )
    }

    fn read_to_end(controller: &mut NarrativeController<MemoryStorage>) -> CompletionSummary {
        loop {
            if let PageTurn::Completed(summary) = controller.next_page().unwrap() {
                return summary;
            }
        }
    }

    #[test]
    fn test_load_story_starts_at_first_page() {
        let mut controller = controller();
        let page = controller
            .load_story(&"solar-storm".into(), ActiveAdaptations::new())
            .unwrap();

        assert_eq!(page.index, 0);
        assert_eq!(page.title, "A Perfect Farm Morning");
        assert_eq!(controller.session().unwrap().total_pages(), 10);
        assert!((controller.progress_fraction() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_story_keeps_session() {
        let mut controller = controller();
        controller
            .load_story(&"cme".into(), ActiveAdaptations::new())
            .unwrap();
        controller.next_page().unwrap();

        let err = controller
            .load_story(&"moon".into(), ActiveAdaptations::new())
            .unwrap_err();
        assert!(matches!(err, StoryError::UnknownStory(_)));
        assert_eq!(controller.session().unwrap().current_page(), 1);
    }

    #[test]
    fn test_navigation_bounds() {
        let mut controller = controller();
        assert!(matches!(controller.next_page(), Err(StoryError::NoStoryLoaded)));

        controller
            .load_story(&"solar-storm".into(), ActiveAdaptations::new())
            .unwrap();
        assert_eq!(controller.previous_page().unwrap().index, 0);

        controller.next_page().unwrap();
        controller.next_page().unwrap();
        assert_eq!(controller.previous_page().unwrap().index, 1);
    }

    #[test]
    fn test_invalid_choice_rejected() {
        let mut controller = controller();
        controller
            .load_story(&"solar-storm".into(), ActiveAdaptations::new())
            .unwrap();

        assert!(matches!(
            controller.make_choice(3),
            Err(StoryError::InvalidChoice { index: 3, available: 3 })
        ));
        assert!(controller.session().unwrap().choices().is_empty());
    }

    #[test]
    fn test_overlay_choice_is_selectable() {
        let mut controller = controller();
        let flags = ActiveAdaptations::from_flags([AdaptationKind::SolarFlare]);
        let page = controller.load_story(&"solar-storm".into(), flags).unwrap();
        assert_eq!(page.choice_count(), 4);

        let outcome = controller.make_choice(3).unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Default);
        assert_eq!(outcome.points, 5);
    }

    #[test]
    fn test_completion_scores_choices() {
        let mut controller = controller();
        controller
            .load_story(&"solar-storm".into(), ActiveAdaptations::new())
            .unwrap();
        controller.make_choice(0).unwrap();
        controller.next_page().unwrap();
        controller.make_choice(2).unwrap();

        let summary = read_to_end(&mut controller);
        assert_eq!(summary.score, 30);
        assert_eq!(summary.choices_made, 2);
        assert_eq!(summary.pages_read, 10);
        assert_eq!(summary.unlocked, vec![AchievementId::new(AchievementId::FIRST_STORY)]);

        // 30 from choices plus 100 for the first story achievement.
        assert_eq!(controller.progress().total_points, 130);
        assert!(matches!(
            controller.next_page(),
            Err(StoryError::AlreadyCompleted(_))
        ));
        assert!((controller.progress_fraction() - 1.0).abs() < 1e-6);
    }

    /// Memory storage whose writes can be switched to fail.
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        failing: Arc<AtomicBool>,
    }

    impl KeyValueStorage for FlakyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StorageError::Io(io::Error::new(io::ErrorKind::Other, "disk full")));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_failed_save_keeps_story_open() {
        let storage = FlakyStorage::default();
        let failing = Arc::clone(&storage.failing);
        let mut controller = NarrativeController::new(
            NarrativeConfig::default(),
            Arc::new(StoryLibrary::builtin().unwrap()),
            Arc::new(SpaceWeatherCatalogue::builtin().unwrap()),
            storage,
        );
        controller
            .load_story(&"cme".into(), ActiveAdaptations::new())
            .unwrap();
        let last = controller.session().unwrap().total_pages() - 1;
        for _ in 0..last {
            controller.next_page().unwrap();
        }

        failing.store(true, Ordering::SeqCst);
        assert!(matches!(controller.next_page(), Err(StoryError::Storage(_))));
        assert_eq!(controller.session().unwrap().status(), SessionStatus::Reading);
        assert!(controller.progress().stories_completed.is_empty());
        assert_eq!(controller.progress().total_points, 0);

        failing.store(false, Ordering::SeqCst);
        let PageTurn::Completed(summary) = controller.next_page().unwrap() else {
            panic!("expected the story to complete");
        };
        assert_eq!(summary.unlocked, vec![AchievementId::new(AchievementId::FIRST_STORY)]);
        assert!(controller.progress().has_completed(&StoryId::new("cme")));
        assert_eq!(controller.progress().total_points, 100);
    }

    #[test]
    fn test_apply_adaptations_rerenders_without_stacking() {
        let mut controller = controller();
        controller
            .load_story(&"geomagnetic-storm".into(), ActiveAdaptations::new())
            .unwrap();

        let storm = ActiveAdaptations::from_flags([AdaptationKind::GeomagneticStorm]);
        let first = controller.apply_adaptations(&storm).unwrap().unwrap();
        let second = controller.apply_adaptations(&storm).unwrap().unwrap();

        assert_eq!(first, second);
        assert_eq!(first.text.matches("ACTIVE NOW").count(), 1);
    }

    #[test]
    fn test_apply_adaptations_without_story() {
        let mut controller = controller();
        let storm = ActiveAdaptations::from_flags([AdaptationKind::GeomagneticStorm]);
        assert!(controller.apply_adaptations(&storm).unwrap().is_none());
    }

    #[test]
    fn test_voice_reads_pages() {
        let speech = RecordingSpeech::default();
        let mut controller =
            controller().with_capabilities(Capabilities::none().with_speech(speech.clone()));
        let flags = ActiveAdaptations::from_flags([AdaptationKind::SolarFlare]);
        controller.load_story(&"solar-storm".into(), flags).unwrap();
        assert!(speech.0.lock().unwrap().is_empty());

        assert!(controller.toggle_voice());
        controller.next_page().unwrap();
        assert!(!controller.toggle_voice());

        let spoken = speech.0.lock().unwrap();
        assert_eq!(spoken.len(), 3);
        assert!(spoken[0].starts_with("Mia stretches"));
        assert!(!spoken[0].contains('🌟'));
        assert!(spoken[1].starts_with("As Mia climbs"));
        assert_eq!(spoken[2], "<cancel>");
    }

    #[test]
    fn test_share_without_capabilities() {
        let mut controller = controller();
        assert!(controller.share_story("https://example.org").is_err());

        controller
            .load_story(&"cme".into(), ActiveAdaptations::new())
            .unwrap();
        assert_eq!(
            controller.share_story("https://example.org").unwrap(),
            ShareOutcome::Unavailable
        );
    }

    #[test]
    fn test_quiz_for_story_category() {
        let mut controller = controller();
        controller
            .load_story(&"geomagnetic-storm".into(), ActiveAdaptations::new())
            .unwrap();

        let mut rng = StdRng::seed_from_u64(9);
        let mut quiz = controller.start_quiz(&mut rng).unwrap();
        assert_eq!(quiz.category(), "aurora");
        assert_eq!(quiz.len(), 1);

        let correct = quiz.current().unwrap().correct;
        assert!(quiz.answer(correct).unwrap().correct);

        let unlocked = controller.finish_quiz(&quiz).unwrap();
        assert!(unlocked.is_empty());
        assert_eq!(controller.progress().quiz_scores["aurora"], 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_choose_and_advance_waits_for_delay() {
        let mut controller = controller();
        controller
            .load_story(&"cme".into(), ActiveAdaptations::new())
            .unwrap();

        let start = tokio::time::Instant::now();
        let (outcome, turn) = controller.choose_and_advance(1).await.unwrap();

        assert!(start.elapsed() >= std::time::Duration::from_millis(2000));
        assert_eq!(outcome.kind, OutcomeKind::Active);
        assert!(matches!(turn, PageTurn::Page(ref page) if page.index == 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_keyboard_commands() {
        let mut controller = controller();
        let now = Utc.with_ymd_and_hms(2024, 10, 18, 23, 0, 0).unwrap();

        let effects = controller
            .dispatch(StoryCommand::Load {
                story: "cme".into(),
                now,
            })
            .await
            .unwrap();
        // The CME arrival rule is extreme and raises an alert before the page.
        assert!(matches!(
            effects[0],
            StoryEffect::SpaceWeatherAlert { kind: AdaptationKind::CmeArrival, .. }
        ));
        assert!(matches!(effects.last(), Some(StoryEffect::PageShown(_))));

        let command = StoryCommand::from_key("2").unwrap();
        let effects = controller.dispatch(command).await.unwrap();
        assert!(matches!(effects[0], StoryEffect::ChoiceResolved(_)));
        assert!(matches!(&effects[1], StoryEffect::PageShown(page) if page.index == 1));
    }
}

//! The space weather catalogue - the central structure holding all content data.

mod status;

pub use status::*;

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::adaptation::{ActiveAdaptations, AdaptationRule};
use crate::education::{Achievement, AchievementId, EducationalFacts, FactCategory};
use crate::error::CatalogueError;
use crate::events::{CmeEvent, EventId, GeomagneticStorm, SepEvent, SolarFlare, SpaceWeatherEvent};
use crate::quiz::{Difficulty, QuizQuestion};

const BUILTIN_CATALOGUE: &str = include_str!("../../data/catalogue.toml");

/// All static content: events, status board, facts, quiz items, achievements and rules.
///
/// Built once at startup and shared by reference. The only mutation is
/// [`SpaceWeatherCatalogue::update_real_time_data`], which jitters the live readings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpaceWeatherCatalogue {
    pub current_status: CurrentStatus,
    pub solar_flares: Vec<SolarFlare>,
    pub cme_events: Vec<CmeEvent>,
    pub geomagnetic_storms: Vec<GeomagneticStorm>,
    pub sep_events: Vec<SepEvent>,
    pub solar_wind_data: SolarWind,
    pub educational_facts: EducationalFacts,
    pub quiz_questions: Vec<QuizQuestion>,
    pub achievements: BTreeMap<AchievementId, Achievement>,
    pub adaptation_rules: Vec<AdaptationRule>,
}

impl SpaceWeatherCatalogue {
    /// The catalogue shipped with the application.
    pub fn builtin() -> Result<Self, CatalogueError> {
        Self::from_toml_str(BUILTIN_CATALOGUE)
    }

    /// Load a catalogue from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self, CatalogueError> {
        let catalogue: Self = toml::from_str(s)?;
        catalogue.log_loaded("toml");
        Ok(catalogue)
    }

    /// Load a catalogue from JSON (the shape of the original data feed).
    pub fn from_json_str(s: &str) -> Result<Self, CatalogueError> {
        let catalogue: Self = serde_json::from_str(s)?;
        catalogue.log_loaded("json");
        Ok(catalogue)
    }

    fn log_loaded(&self, format: &str) {
        info!(
            format,
            flares = self.solar_flares.len(),
            cmes = self.cme_events.len(),
            storms = self.geomagnetic_storms.len(),
            questions = self.quiz_questions.len(),
            rules = self.adaptation_rules.len(),
            "catalogue loaded"
        );
    }

    pub fn current_status(&self) -> &CurrentStatus {
        &self.current_status
    }

    pub fn solar_wind(&self) -> &SolarWind {
        &self.solar_wind_data
    }

    /// Flares that started within the last `days` days, up to and including `now`.
    pub fn recent_flares(&self, now: DateTime<Utc>, days: u32) -> Vec<&SolarFlare> {
        let window = Duration::days(days as i64);
        self.solar_flares
            .iter()
            .filter(|f| f.started_within(now, window))
            .collect()
    }

    /// CMEs that have arrived and whose effect window covers `now`.
    pub fn active_cmes(&self, now: DateTime<Utc>) -> Vec<&CmeEvent> {
        self.cme_events.iter().filter(|c| c.is_active_at(now)).collect()
    }

    /// The first storm whose span covers `now`, inclusive at both ends.
    pub fn current_storm(&self, now: DateTime<Utc>) -> Option<&GeomagneticStorm> {
        self.geomagnetic_storms.iter().find(|s| s.is_ongoing(now))
    }

    /// Every event record, flares first.
    pub fn events(&self) -> impl Iterator<Item = SpaceWeatherEvent<'_>> {
        self.solar_flares
            .iter()
            .map(SpaceWeatherEvent::SolarFlare)
            .chain(self.cme_events.iter().map(SpaceWeatherEvent::Cme))
            .chain(self.geomagnetic_storms.iter().map(SpaceWeatherEvent::GeomagneticStorm))
            .chain(self.sep_events.iter().map(SpaceWeatherEvent::Sep))
    }

    pub fn event(&self, id: &EventId) -> Option<SpaceWeatherEvent<'_>> {
        self.events().find(|e| e.id() == id)
    }

    /// Facts for one category; empty when the category has none.
    pub fn facts(&self, category: FactCategory) -> &[String] {
        self.educational_facts
            .get(category.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// A random fact, from `category` or from any category with facts.
    pub fn random_fact<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        category: Option<FactCategory>,
    ) -> Result<&str, CatalogueError> {
        let key = match category {
            Some(category) => category.as_str().to_string(),
            None => {
                let keys: Vec<&String> = self
                    .educational_facts
                    .iter()
                    .filter(|(_, facts)| !facts.is_empty())
                    .map(|(key, _)| key)
                    .collect();
                keys.choose(rng)
                    .map(|k| k.to_string())
                    .ok_or_else(|| CatalogueError::EmptyCategory("any".to_string()))?
            }
        };

        self.educational_facts
            .get(&key)
            .and_then(|facts| facts.choose(rng))
            .map(String::as_str)
            .ok_or(CatalogueError::EmptyCategory(key))
    }

    /// Up to `count` questions matching the filters, in random order.
    pub fn quiz_questions<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        difficulty: Option<Difficulty>,
        category: Option<&str>,
    ) -> Vec<&QuizQuestion> {
        let mut questions: Vec<&QuizQuestion> = self
            .quiz_questions
            .iter()
            .filter(|q| difficulty.map_or(true, |d| q.difficulty == d))
            .filter(|q| category.map_or(true, |c| q.category == c))
            .collect();
        questions.shuffle(rng);
        questions.truncate(count);
        questions
    }

    /// Evaluate every adaptation rule against the catalogue at `now`.
    pub fn check_adaptations(&self, now: DateTime<Utc>) -> ActiveAdaptations {
        let mut active = ActiveAdaptations::new();
        for rule in &self.adaptation_rules {
            if rule.trigger.holds(self, now) {
                debug!(kind = rule.kind.as_str(), "adaptation rule fired");
                active.insert(rule.kind, rule.modifications.clone());
            }
        }
        active
    }

    /// Jitter the live readings to simulate a real-time feed.
    pub fn update_real_time_data<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> &CurrentStatus {
        self.solar_wind_data.speed += (rng.gen::<f32>() - 0.5) * 20.0;
        self.solar_wind_data.density += (rng.gen::<f32>() - 0.5) * 2.0;

        let k_index = self.current_status.k_index + (rng.gen::<f32>() - 0.5) * 2.0;
        self.current_status.k_index = k_index.clamp(0.0, 9.0);
        self.current_status.last_updated = Some(now);

        debug!(
            k_index = self.current_status.k_index,
            wind_speed = self.solar_wind_data.speed,
            "real-time data updated"
        );
        &self.current_status
    }

    pub fn achievement(&self, id: &str) -> Option<&Achievement> {
        self.achievements.get(&AchievementId::new(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn builtin() -> SpaceWeatherCatalogue {
        SpaceWeatherCatalogue::builtin().unwrap()
    }

    #[test]
    fn test_builtin_loads() {
        let catalogue = builtin();
        assert_eq!(catalogue.solar_flares.len(), 3);
        assert_eq!(catalogue.cme_events.len(), 2);
        assert_eq!(catalogue.geomagnetic_storms.len(), 2);
        assert_eq!(catalogue.sep_events.len(), 1);
        assert_eq!(catalogue.quiz_questions.len(), 5);
        assert_eq!(catalogue.achievements.len(), 6);
        assert_eq!(catalogue.adaptation_rules.len(), 3);
        assert!(catalogue.quiz_questions.iter().all(QuizQuestion::is_well_formed));
    }

    #[test]
    fn test_recent_flares() {
        let catalogue = builtin();
        let now = Utc.with_ymd_and_hms(2024, 11, 3, 0, 0, 0).unwrap();

        let recent = catalogue.recent_flares(now, 30);
        let ids: Vec<&str> = recent.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["FL_001", "FL_003"]);

        assert_eq!(catalogue.recent_flares(now, 1).len(), 1);
    }

    #[test]
    fn test_recent_flares_ignores_future_records() {
        let catalogue = builtin();
        let now = Utc.with_ymd_and_hms(2024, 10, 18, 23, 0, 0).unwrap();

        let ids: Vec<&str> = catalogue.recent_flares(now, 30).iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["FL_001", "FL_002"]);
    }

    #[test]
    fn test_recent_flares_huge_window() {
        let catalogue = builtin();
        let now = Utc.with_ymd_and_hms(2024, 10, 18, 23, 0, 0).unwrap();
        assert_eq!(catalogue.recent_flares(now, u32::MAX).len(), 2);
        assert_eq!(catalogue.recent_flares(Utc::now(), u32::MAX).len(), 3);
    }

    #[test]
    fn test_active_cmes_and_storm() {
        let catalogue = builtin();
        let during = Utc.with_ymd_and_hms(2024, 10, 18, 20, 0, 0).unwrap();

        let active = catalogue.active_cmes(during);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id.as_str(), "CME_001");

        let storm = catalogue.current_storm(during).unwrap();
        assert_eq!(storm.id.as_str(), "GST_001");

        let quiet = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert!(catalogue.active_cmes(quiet).is_empty());
        assert!(catalogue.current_storm(quiet).is_none());
    }

    #[test]
    fn test_storm_boundary_inclusive() {
        let catalogue = builtin();
        let start = Utc.with_ymd_and_hms(2024, 10, 18, 12, 0, 0).unwrap();
        assert!(catalogue.current_storm(start).is_some());
    }

    #[test]
    fn test_event_lookup() {
        let catalogue = builtin();
        let sep = catalogue.event(&EventId::new("SEP_001")).unwrap();
        assert_eq!(sep.magnitude(), "S1-Minor");
        assert_eq!(catalogue.events().count(), 8);
        assert!(catalogue.event(&EventId::new("NOPE")).is_none());
    }

    #[test]
    fn test_random_fact_from_category() {
        let catalogue = builtin();
        let mut rng = StdRng::seed_from_u64(7);

        let fact = catalogue
            .random_fact(&mut rng, Some(FactCategory::CmeEvents))
            .unwrap();
        assert!(catalogue.facts(FactCategory::CmeEvents).iter().any(|f| f == fact));

        assert!(catalogue.random_fact(&mut rng, None).is_ok());
    }

    #[test]
    fn test_random_fact_empty_category() {
        let catalogue = SpaceWeatherCatalogue::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            catalogue.random_fact(&mut rng, Some(FactCategory::SolarFlares)),
            Err(CatalogueError::EmptyCategory(_))
        ));
        assert!(catalogue.random_fact(&mut rng, None).is_err());
    }

    #[test]
    fn test_quiz_question_filters() {
        let catalogue = builtin();
        let mut rng = StdRng::seed_from_u64(3);

        let easy = catalogue.quiz_questions(&mut rng, 5, Some(Difficulty::Easy), None);
        assert_eq!(easy.len(), 2);
        assert!(easy.iter().all(|q| q.difficulty == Difficulty::Easy));

        let aurora = catalogue.quiz_questions(&mut rng, 5, None, Some("aurora"));
        assert_eq!(aurora.len(), 1);

        assert_eq!(catalogue.quiz_questions(&mut rng, 3, None, None).len(), 3);
    }

    #[test]
    fn test_check_adaptations() {
        let catalogue = builtin();

        // Inside GST_001, hours after CME_001 arrival, days after FL_001.
        let now = Utc.with_ymd_and_hms(2024, 10, 18, 23, 0, 0).unwrap();
        let active = catalogue.check_adaptations(now);
        assert!(active.is_active(crate::AdaptationKind::CmeArrival));
        assert!(active.is_active(crate::AdaptationKind::GeomagneticStorm));
        assert!(!active.is_active(crate::AdaptationKind::SolarFlare));

        let quiet = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        assert!(catalogue.check_adaptations(quiet).is_empty());
    }

    #[test]
    fn test_update_real_time_data_clamps() {
        let mut catalogue = builtin();
        let mut rng = StdRng::seed_from_u64(42);
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let speed = catalogue.solar_wind_data.speed;

        for _ in 0..200 {
            let status = catalogue.update_real_time_data(&mut rng, now);
            assert!((0.0..=9.0).contains(&status.k_index));
        }
        assert_eq!(catalogue.current_status.last_updated, Some(now));
        assert_ne!(catalogue.solar_wind_data.speed, speed);
    }

    #[test]
    fn test_achievement_lookup() {
        let catalogue = builtin();
        assert_eq!(catalogue.achievement("quiz_master").unwrap().points, 300);
        assert!(catalogue.achievement("unknown").is_none());
    }
}

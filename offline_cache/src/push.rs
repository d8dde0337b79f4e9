//! Push payloads, alert notifications and the alert policy hook.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use space_weather::SpaceWeatherCatalogue;
use tracing::debug;

use crate::config::NotificationConfig;
use crate::error::CacheError;
use crate::http::Response;

/// Incoming push data; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushPayload {
    pub title: Option<String>,
    pub body: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
}

impl PushPayload {
    pub fn from_json(s: &str) -> Result<Self, CacheError> {
        Ok(serde_json::from_str(s)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
    pub icon: String,
}

pub const ACTION_VIEW: &str = "view";
pub const ACTION_DISMISS: &str = "dismiss";

/// Data carried by a notification and handed back on click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationData {
    pub url: String,
    /// Milliseconds since the epoch.
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOptions {
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub image: Option<String>,
    pub tag: String,
    pub renotify: bool,
    pub require_interaction: bool,
    pub actions: Vec<NotificationAction>,
    pub data: NotificationData,
}

impl NotificationOptions {
    /// Title and options for a space weather alert, filling gaps from `config`.
    pub fn alert(
        payload: PushPayload,
        config: &NotificationConfig,
        now: DateTime<Utc>,
    ) -> (String, NotificationOptions) {
        let title = payload.title.unwrap_or_else(|| config.title.clone());
        let options = NotificationOptions {
            body: payload.body.unwrap_or_else(|| config.body.clone()),
            icon: config.icon.clone(),
            badge: config.badge.clone(),
            image: payload.image,
            tag: config.tag.clone(),
            renotify: true,
            require_interaction: true,
            actions: vec![
                NotificationAction {
                    action: ACTION_VIEW.to_string(),
                    title: "View Details".to_string(),
                    icon: config.view_icon.clone(),
                },
                NotificationAction {
                    action: ACTION_DISMISS.to_string(),
                    title: "Dismiss".to_string(),
                    icon: config.dismiss_icon.clone(),
                },
            ],
            data: NotificationData {
                url: payload.url.unwrap_or_else(|| config.url.clone()),
                timestamp: now.timestamp_millis(),
            },
        };
        (title, options)
    }
}

/// Decides whether freshly synced data deserves an alert.
pub trait AlertPolicy: Send + Sync {
    fn evaluate(&self, data: &Response, now: DateTime<Utc>) -> Option<PushPayload>;
}

/// Never alerts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAlerts;

impl AlertPolicy for NoAlerts {
    fn evaluate(&self, _data: &Response, _now: DateTime<Utc>) -> Option<PushPayload> {
        None
    }
}

/// Reads the synced resource as a catalogue and alerts on the first
/// extreme-intensity adaptation that holds at `now`.
#[derive(Debug, Default, Clone)]
pub struct CatalogueAlertPolicy {
    /// Deep link opened from the alert.
    pub url: Option<String>,
}

impl AlertPolicy for CatalogueAlertPolicy {
    fn evaluate(&self, data: &Response, now: DateTime<Utc>) -> Option<PushPayload> {
        let catalogue = match SpaceWeatherCatalogue::from_json_str(&data.text()) {
            Ok(catalogue) => catalogue,
            Err(e) => {
                debug!(error = %e, "Synced data is not a catalogue, skipping alert check");
                return None;
            }
        };
        let adaptations = catalogue.check_adaptations(now);
        let (kind, modification) = adaptations.alerts().next()?;
        Some(PushPayload {
            title: None,
            body: Some(modification.dialogue.clone()),
            image: None,
            url: self.url.clone().or_else(|| Some(format!("/#{}", kind.as_str()))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_alert_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 10, 18, 15, 0, 0).unwrap();
        let (title, options) =
            NotificationOptions::alert(PushPayload::default(), &NotificationConfig::default(), now);
        assert_eq!(title, "🌟 Solar Monarch Alert");
        assert_eq!(options.body, "New space weather activity detected!");
        assert_eq!(options.data.url, "/#dashboard");
        assert_eq!(options.data.timestamp, now.timestamp_millis());
        let actions: Vec<_> = options.actions.iter().map(|a| a.action.as_str()).collect();
        assert_eq!(actions, [ACTION_VIEW, ACTION_DISMISS]);
        assert!(options.require_interaction);
    }

    #[test]
    fn test_payload_overrides() {
        let payload = PushPayload::from_json(r#"{"title":"X-class flare","url":"/#flares"}"#).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 10, 18, 15, 0, 0).unwrap();
        let (title, options) = NotificationOptions::alert(payload, &NotificationConfig::default(), now);
        assert_eq!(title, "X-class flare");
        assert_eq!(options.data.url, "/#flares");
        assert_eq!(options.body, "New space weather activity detected!");
    }

    #[test]
    fn test_catalogue_policy_alerts_on_cme_arrival() {
        let catalogue = SpaceWeatherCatalogue::builtin().unwrap();
        let data = Response::ok(serde_json::to_vec(&catalogue).unwrap());
        let policy = CatalogueAlertPolicy::default();

        let arrival = Utc.with_ymd_and_hms(2024, 10, 18, 15, 0, 0).unwrap();
        let payload = policy.evaluate(&data, arrival).unwrap();
        assert_eq!(payload.url.as_deref(), Some("/#cmeArrival"));
        assert!(payload.body.is_some());

        let quiet = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        assert!(policy.evaluate(&data, quiet).is_none());
    }

    #[test]
    fn test_catalogue_policy_ignores_non_catalogue() {
        let policy = CatalogueAlertPolicy::default();
        let now = Utc.with_ymd_and_hms(2024, 10, 18, 15, 0, 0).unwrap();
        assert!(policy.evaluate(&Response::ok("const NASA_DATA = {};"), now).is_none());
    }
}

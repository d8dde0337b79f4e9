//! Worker configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::CacheError;
use crate::manifest::CacheManifest;
use crate::routes::RouteTable;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Prefix shared by every cache name.
    pub namespace: String,
    /// Bump to retire every cache from earlier generations.
    pub generation: u32,

    /// Fetched and stored atomically at install.
    pub static_assets: Vec<String>,

    pub network_first: Vec<String>,
    pub cache_first: Vec<String>,

    /// The dynamic data resource refreshed by background sync.
    pub data_url: String,
    /// Stored offline page, preferred over the synthesized one.
    pub offline_page_url: String,

    pub sync_tag: String,
    pub periodic_sync_tag: String,

    /// Origin of the pages this worker controls.
    pub origin: String,

    pub notification: NotificationConfig,

    /// Story type -> asset URLs cached on request.
    pub story_assets: BTreeMap<String, Vec<String>>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            namespace: "solar-monarch".to_string(),
            generation: 1,
            static_assets: [
                "/",
                "/index.html",
                "/manifest.json",
                "/css/main.css",
                "/css/animations.css",
                "/css/components.css",
                "/js/main.js",
                "/js/modules/galaxy-generator.js",
                "/js/modules/story-engine.js",
                "/data/nasa-data.js",
                "/assets/images/icon-192x192.png",
                "/assets/images/icon-512x512.png",
            ]
            .map(String::from)
            .to_vec(),
            network_first: ["/data/nasa-data.js", "/api/"].map(String::from).to_vec(),
            cache_first: [
                "/assets/images/",
                "/assets/audio/",
                "https://fonts.googleapis.com/",
                "https://fonts.gstatic.com/",
            ]
            .map(String::from)
            .to_vec(),
            data_url: "/data/nasa-data.js".to_string(),
            offline_page_url: "/offline.html".to_string(),
            sync_tag: "nasa-data-sync".to_string(),
            periodic_sync_tag: "space-weather-update".to_string(),
            origin: "http://localhost".to_string(),
            notification: NotificationConfig::default(),
            story_assets: BTreeMap::new(),
        }
    }
}

impl WorkerConfig {
    /// Parse a config, filling unspecified fields with defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, CacheError> {
        Ok(toml::from_str(s)?)
    }

    pub fn manifest(&self) -> CacheManifest {
        CacheManifest::new(&self.namespace, self.generation, self.static_assets.clone())
    }

    pub fn routes(&self) -> RouteTable {
        RouteTable::new(self.network_first.clone(), self.cache_first.clone())
    }
}

/// Defaults for space weather alert notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub title: String,
    pub body: String,
    pub url: String,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    pub view_icon: String,
    pub dismiss_icon: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            title: "🌟 Solar Monarch Alert".to_string(),
            body: "New space weather activity detected!".to_string(),
            url: "/#dashboard".to_string(),
            icon: "/assets/images/icon-192x192.png".to_string(),
            badge: "/assets/images/badge-72x72.png".to_string(),
            tag: "space-weather-alert".to_string(),
            view_icon: "/assets/images/action-view.png".to_string(),
            dismiss_icon: "/assets/images/action-dismiss.png".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest() {
        let config = WorkerConfig::default();
        let manifest = config.manifest();
        assert_eq!(manifest.static_cache().to_string(), "solar-monarch-static-v1");
        assert_eq!(manifest.dynamic_cache().to_string(), "solar-monarch-dynamic-v1");
        assert_eq!(manifest.assets.len(), 12);
    }

    #[test]
    fn test_partial_override() {
        let config = WorkerConfig::from_toml_str(
            r#"
            generation = 4

            [story_assets]
            aurora = ["/assets/images/aurora-page1.png"]

            [notification]
            url = "/#alerts"
            "#,
        )
        .unwrap();
        assert_eq!(config.generation, 4);
        assert_eq!(config.story_assets["aurora"].len(), 1);
        assert_eq!(config.notification.url, "/#alerts");
        assert_eq!(config.notification.title, "🌟 Solar Monarch Alert");
        assert_eq!(config.sync_tag, "nasa-data-sync");
    }
}

//! URL classification.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    NetworkFirst,
    CacheFirst,
    StaleWhileRevalidate,
}

/// Substring patterns checked in order: network-first, then cache-first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    pub network_first: Vec<String>,
    pub cache_first: Vec<String>,
}

impl RouteTable {
    pub fn new(network_first: Vec<String>, cache_first: Vec<String>) -> Self {
        Self {
            network_first,
            cache_first,
        }
    }

    pub fn classify(&self, url: &str) -> Strategy {
        if self.network_first.iter().any(|p| url.contains(p.as_str())) {
            Strategy::NetworkFirst
        } else if self.cache_first.iter().any(|p| url.contains(p.as_str())) {
            Strategy::CacheFirst
        } else {
            Strategy::StaleWhileRevalidate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new(
            vec!["/data/nasa-data.js".into(), "/api/".into()],
            vec!["/assets/images/".into(), "https://fonts.gstatic.com/".into()],
        )
    }

    #[test]
    fn test_classify() {
        let routes = table();
        assert_eq!(routes.classify("/api/flares"), Strategy::NetworkFirst);
        assert_eq!(routes.classify("/assets/images/aurora.png"), Strategy::CacheFirst);
        assert_eq!(
            routes.classify("https://fonts.gstatic.com/s/orbitron.woff2"),
            Strategy::CacheFirst
        );
        assert_eq!(routes.classify("/css/main.css"), Strategy::StaleWhileRevalidate);
    }

    #[test]
    fn test_network_first_wins() {
        // Matches both lists; the network-first list is checked first.
        let routes = table();
        assert_eq!(
            routes.classify("/assets/images/api/chart.png"),
            Strategy::NetworkFirst
        );
    }
}

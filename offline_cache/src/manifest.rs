//! Versioned cache names.
//!
//! Cache names look like `solar-monarch-static-v1`. Activation parses every
//! stored name and keeps only the two that belong to the current manifest;
//! names that fail to parse are treated as stale.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CacheError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    /// Populated once, at install.
    Static,
    /// Populated at fetch time.
    Dynamic,
}

impl Partition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Static => "static",
            Partition::Dynamic => "dynamic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheName {
    pub namespace: String,
    pub partition: Partition,
    pub generation: u32,
}

impl CacheName {
    pub fn new(namespace: impl Into<String>, partition: Partition, generation: u32) -> Self {
        Self {
            namespace: namespace.into(),
            partition,
            generation,
        }
    }
}

impl std::fmt::Display for CacheName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-v{}",
            self.namespace,
            self.partition.as_str(),
            self.generation
        )
    }
}

impl FromStr for CacheName {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CacheError::InvalidCacheName(s.to_string());

        let (rest, version) = s.rsplit_once('-').ok_or_else(invalid)?;
        let generation = version
            .strip_prefix('v')
            .and_then(|g| g.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        let (namespace, partition) = rest.rsplit_once('-').ok_or_else(invalid)?;
        let partition = match partition {
            "static" => Partition::Static,
            "dynamic" => Partition::Dynamic,
            _ => return Err(invalid()),
        };
        if namespace.is_empty() {
            return Err(invalid());
        }

        Ok(CacheName::new(namespace, partition, generation))
    }
}

/// The current cache generation and its install-time asset list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheManifest {
    pub namespace: String,
    pub generation: u32,
    pub assets: Vec<String>,
}

impl CacheManifest {
    pub fn new(namespace: impl Into<String>, generation: u32, assets: Vec<String>) -> Self {
        Self {
            namespace: namespace.into(),
            generation,
            assets,
        }
    }

    pub fn static_cache(&self) -> CacheName {
        CacheName::new(&self.namespace, Partition::Static, self.generation)
    }

    pub fn dynamic_cache(&self) -> CacheName {
        CacheName::new(&self.namespace, Partition::Dynamic, self.generation)
    }

    /// Whether a stored cache name belongs to this manifest.
    pub fn is_current(&self, stored: &str) -> bool {
        match stored.parse::<CacheName>() {
            Ok(name) => name.namespace == self.namespace && name.generation == self.generation,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_and_parse() {
        let name = CacheName::new("solar-monarch", Partition::Dynamic, 3);
        assert_eq!(name.to_string(), "solar-monarch-dynamic-v3");
        assert_eq!("solar-monarch-dynamic-v3".parse::<CacheName>().unwrap(), name);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["solar-monarch-v1.0.0", "static-v1", "solar-monarch-static-1", "x-cold-v2", ""] {
            assert!(bad.parse::<CacheName>().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_is_current() {
        let manifest = CacheManifest::new("solar-monarch", 2, vec![]);
        assert!(manifest.is_current("solar-monarch-static-v2"));
        assert!(manifest.is_current("solar-monarch-dynamic-v2"));
        assert!(!manifest.is_current("solar-monarch-static-v1"));
        assert!(!manifest.is_current("other-app-static-v2"));
        assert!(!manifest.is_current("solar-monarch-v1.0.0"));
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three roles a named cache can play. Entries never move between
/// roles; a cache is only ever populated or deleted wholesale.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheRole {
    Static,
    Runtime,
    Image,
}

/// Version marker embedded in every cache name. Bumping the generation is
/// the sole eviction mechanism: the activate transition deletes every
/// cache whose name does not carry the current tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheGeneration(String);

impl CacheGeneration {
    pub fn new(value: String) -> Result<Self, String> {
        if value.trim().is_empty() {
            return Err("Cache generation tag cannot be empty".to_string());
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheName(String);

impl CacheName {
    pub fn new(value: String) -> Result<Self, String> {
        if value.trim().is_empty() {
            return Err("Cache name cannot be empty".to_string());
        }
        Ok(Self(value))
    }

    pub fn build(prefix: &str, role: CacheRole, generation: &CacheGeneration) -> Self {
        let name = match role {
            CacheRole::Static => format!("{prefix}-{generation}"),
            CacheRole::Runtime => format!("{prefix}-runtime-{generation}"),
            CacheRole::Image => format!("{prefix}-images-{generation}"),
        };
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The current-generation name for each role. At most one generation per
/// role is current at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheNames {
    statics: CacheName,
    runtime: CacheName,
    images: CacheName,
}

impl CacheNames {
    pub fn current(prefix: &str, generation: &CacheGeneration) -> Self {
        Self {
            statics: CacheName::build(prefix, CacheRole::Static, generation),
            runtime: CacheName::build(prefix, CacheRole::Runtime, generation),
            images: CacheName::build(prefix, CacheRole::Image, generation),
        }
    }

    pub fn for_role(&self, role: CacheRole) -> &CacheName {
        match role {
            CacheRole::Static => &self.statics,
            CacheRole::Runtime => &self.runtime,
            CacheRole::Image => &self.images,
        }
    }

    pub fn contains(&self, name: &CacheName) -> bool {
        name == &self.statics || name == &self.runtime || name == &self.images
    }

    pub fn all(&self) -> [&CacheName; 3] {
        [&self.statics, &self.runtime, &self.images]
    }
}

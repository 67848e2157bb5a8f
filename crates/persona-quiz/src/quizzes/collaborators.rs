use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{QuizConfig, MAX_CACHE_TTL_SECS};

use super::catalog::QuizCatalog;
use super::scoring::QuizResult;

/// Image shown next to a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub url: String,
    pub alt: String,
}

/// Looks up artwork for a candidate. Always answers; unknown keys get a
/// placeholder.
pub trait ArtworkResolver: Send + Sync {
    fn resolve(&self, key: &str) -> Artwork;
}

/// Key of a candidate's artwork: `<quiz>/<candidate>`.
pub fn artwork_key(quiz: &str, candidate: &str) -> String {
    format!("{quiz}/{candidate}")
}

/// Fixed lookup table.
#[derive(Debug, Clone)]
pub struct StaticArtwork {
    entries: HashMap<String, Artwork>,
    fallback: Artwork,
}

impl StaticArtwork {
    pub fn new(fallback: Artwork) -> Self {
        Self {
            entries: HashMap::new(),
            fallback,
        }
    }

    pub fn with(mut self, key: impl Into<String>, artwork: Artwork) -> Self {
        self.entries.insert(key.into(), artwork);
        self
    }

    /// One image per candidate, served from `<base_url>/<quiz>/<candidate>.png`.
    pub fn from_catalog(catalog: &QuizCatalog, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        catalog
            .iter()
            .flat_map(|quiz| {
                quiz.definition()
                    .candidates
                    .iter()
                    .map(move |candidate| (quiz.key(), candidate))
            })
            .fold(Self::default(), |table, (quiz, candidate)| {
                table.with(
                    artwork_key(quiz, &candidate.key),
                    Artwork {
                        url: format!("{base_url}/{quiz}/{}.png", candidate.key),
                        alt: candidate.name.clone(),
                    },
                )
            })
    }
}

impl Default for StaticArtwork {
    fn default() -> Self {
        Self::new(Artwork {
            url: "/static/art/placeholder.png".to_string(),
            alt: "Quiz result".to_string(),
        })
    }
}

impl ArtworkResolver for StaticArtwork {
    fn resolve(&self, key: &str) -> Artwork {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Session result storage. Failures stay inside the cache: a broken cache
/// behaves like an empty one.
pub trait ResultCache: Send + Sync {
    fn load(&self, key: &str) -> Option<QuizResult>;
    fn save(&self, key: &str, result: &QuizResult);
}

/// Cache that never remembers anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl ResultCache for NoCache {
    fn load(&self, _key: &str) -> Option<QuizResult> {
        None
    }

    fn save(&self, _key: &str, _result: &QuizResult) {}
}

#[derive(Debug, Clone)]
struct CachedResult {
    stored_at: DateTime<Utc>,
    result: QuizResult,
}

/// Process-local cache with a fixed time to live. A zero TTL disables it.
#[derive(Debug)]
pub struct InMemoryResultCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedResult>>,
}

impl InMemoryResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Out-of-range TTLs are clamped into what `chrono` can represent.
    pub fn from_config(config: &QuizConfig) -> Self {
        let secs = config.cache_ttl_secs.clamp(0, MAX_CACHE_TTL_SECS);
        if secs != config.cache_ttl_secs {
            warn!(
                requested = config.cache_ttl_secs,
                applied = secs,
                "result cache ttl out of range; clamped"
            );
        }
        Self::new(Duration::seconds(secs))
    }

    pub(crate) fn load_at(&self, key: &str, now: DateTime<Utc>) -> Option<QuizResult> {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(_) => {
                warn!(key, "result cache lock poisoned; skipping lookup");
                return None;
            }
        };

        let fresh = entries
            .get(key)
            .map(|entry| now - entry.stored_at < self.ttl)?;
        if fresh {
            entries.get(key).map(|entry| entry.result.clone())
        } else {
            entries.remove(key);
            None
        }
    }

    pub(crate) fn save_at(&self, key: &str, result: &QuizResult, now: DateTime<Utc>) {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.retain(|_, entry| now - entry.stored_at < self.ttl);
                entries.insert(
                    key.to_string(),
                    CachedResult {
                        stored_at: now,
                        result: result.clone(),
                    },
                );
            }
            Err(_) => warn!(key, "result cache lock poisoned; result not stored"),
        }
    }
}

impl ResultCache for InMemoryResultCache {
    fn load(&self, key: &str) -> Option<QuizResult> {
        self.load_at(key, Utc::now())
    }

    fn save(&self, key: &str, result: &QuizResult) {
        self.save_at(key, result, Utc::now())
    }
}

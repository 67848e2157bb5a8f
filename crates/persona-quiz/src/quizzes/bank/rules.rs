use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::quizzes::domain::DimensionVector;

/// Decides whether an option label belongs to a preset.
pub trait LabelPredicate: fmt::Debug + Send + Sync {
    fn matches(&self, label: &str) -> bool;
}

/// Any of the keywords appears in the label, ignoring case.
#[derive(Debug, Clone)]
pub struct Contains {
    keywords: Vec<String>,
}

impl Contains {
    pub fn any<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|keyword| keyword.as_ref().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
        }
    }
}

impl LabelPredicate for Contains {
    fn matches(&self, label: &str) -> bool {
        let label = label.to_lowercase();
        self.keywords.iter().any(|keyword| label.contains(keyword))
    }
}

/// Whole label equals the expected text, ignoring case and outer whitespace.
#[derive(Debug, Clone)]
pub struct Exact {
    expected: String,
}

impl Exact {
    pub fn new(expected: &str) -> Self {
        Self {
            expected: expected.trim().to_lowercase(),
        }
    }
}

impl LabelPredicate for Exact {
    fn matches(&self, label: &str) -> bool {
        label.trim().to_lowercase() == self.expected
    }
}

#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }
}

impl LabelPredicate for Pattern {
    fn matches(&self, label: &str) -> bool {
        self.regex.is_match(label)
    }
}

/// Named complete vector an option can be mapped to.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorPreset {
    pub key: String,
    pub vector: DimensionVector,
}

#[derive(Debug, Clone)]
pub struct OptionRule {
    pub predicate: Arc<dyn LabelPredicate>,
    pub preset: String,
}

impl OptionRule {
    pub fn new<P>(predicate: P, preset: &str) -> Self
    where
        P: LabelPredicate + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            preset: preset.to_string(),
        }
    }
}

/// Ordered label rules with a positional fallback.
#[derive(Debug, Clone)]
pub struct RuleSet {
    presets: Vec<VectorPreset>,
    rules: Vec<OptionRule>,
    fallback: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleSetError {
    #[error("rule set declares no presets")]
    NoPresets,
    #[error("rule or fallback references unknown preset '{0}'")]
    UnknownPreset(String),
}

impl RuleSet {
    /// Validates that every rule and fallback entry names a declared preset.
    /// An empty fallback defaults to the presets in declaration order.
    pub fn new(
        presets: Vec<VectorPreset>,
        rules: Vec<OptionRule>,
        fallback: Vec<String>,
    ) -> Result<Self, RuleSetError> {
        if presets.is_empty() {
            return Err(RuleSetError::NoPresets);
        }

        let known = |key: &str| presets.iter().any(|preset| preset.key == key);
        if let Some(missing) = rules
            .iter()
            .map(|rule| rule.preset.as_str())
            .chain(fallback.iter().map(String::as_str))
            .find(|key| !known(*key))
        {
            return Err(RuleSetError::UnknownPreset(missing.to_string()));
        }

        let fallback = if fallback.is_empty() {
            presets.iter().map(|preset| preset.key.clone()).collect()
        } else {
            fallback
        };

        Ok(Self {
            presets,
            rules,
            fallback,
        })
    }

    /// Key of the preset a label maps to: the first matching rule, else the
    /// fallback entry at `ordinal` (wrapping around).
    pub fn preset_key(&self, label: &str, ordinal: usize) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.predicate.matches(label))
            .map(|rule| rule.preset.as_str())
            .unwrap_or_else(|| self.fallback[ordinal % self.fallback.len()].as_str())
    }

    /// Owned copy of the matched preset vector.
    pub fn resolve(&self, label: &str, ordinal: usize) -> (String, DimensionVector) {
        let key = self.preset_key(label, ordinal);
        let preset = self
            .presets
            .iter()
            .find(|preset| preset.key == key)
            .unwrap_or(&self.presets[0]);
        (preset.key.clone(), preset.vector.clone())
    }

    pub fn presets(&self) -> &[VectorPreset] {
        &self.presets
    }
}

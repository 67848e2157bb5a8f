use crate::quizzes::bank::{
    ColumnLayout, Contains, Exact, OptionMode, OptionRule, OutcomeSet, Pattern, RuleSet,
    VectorPreset,
};
use crate::quizzes::defaults::DEFAULT_WEIGHT_FLOOR;
use crate::quizzes::definition::QuizDefinition;
use crate::quizzes::domain::{CandidateProfile, Dimension, DimensionVector, Scale, VectorSpace};
use crate::quizzes::scoring::ScoringStrategy;

use super::CatalogError;

pub const KEY: &str = "cat-archetype";

const SOURCE: &str = include_str!("data/cat_archetype.csv");

const BANK_SIZE: usize = 12;
const OPTION_COLUMNS: usize = 4;
const DESCRIPTION_COLUMN: usize = 6 + OPTION_COLUMNS;

const FACETS: [&str; 4] = ["play", "rest", "people", "territory"];

const NARRATIVE: &str = "{name}. {description} You bring {traits} to every room you enter.";

/// `(key, energy, sociability, curiosity, independence)`
const PRESETS: [(&str, [f64; 4]); 4] = [
    ("adventurous", [85.0, 50.0, 90.0, 70.0]),
    ("social", [65.0, 90.0, 55.0, 25.0]),
    ("cozy", [20.0, 55.0, 30.0, 40.0]),
    ("aloof", [40.0, 15.0, 45.0, 90.0]),
];

/// `(key, name, description, vector)`
const ARCHETYPES: [(&str, &str, &str, [f64; 4]); 6] = [
    (
        "explorer",
        "The Rooftop Explorer",
        "No shelf is too high and no cupboard stays closed for long.",
        [85.0, 45.0, 90.0, 75.0],
    ),
    (
        "socialite",
        "The Lap Socialite",
        "Every visitor is a friend you have not purred at yet.",
        [55.0, 90.0, 50.0, 20.0],
    ),
    (
        "napper",
        "The Sunbeam Napper",
        "You know where the warm patch will be at every hour of the day.",
        [15.0, 50.0, 25.0, 45.0],
    ),
    (
        "sentinel",
        "The Windowsill Sentinel",
        "You watch the street, the garden and the humans, mostly from a distance.",
        [40.0, 20.0, 60.0, 85.0],
    ),
    (
        "gremlin",
        "The Midnight Gremlin",
        "Things fall off tables when you are around, usually at 3am.",
        [95.0, 60.0, 75.0, 55.0],
    ),
    (
        "diplomat",
        "The Quiet Diplomat",
        "You keep the peace between the dog, the kids and the other cat.",
        [40.0, 65.0, 45.0, 50.0],
    ),
];

fn space() -> VectorSpace {
    VectorSpace::new(
        vec![
            Dimension::new("energy", "Energy"),
            Dimension::new("sociability", "Sociability"),
            Dimension::new("curiosity", "Curiosity"),
            Dimension::new("independence", "Independence"),
        ],
        Scale::new(0.0, 100.0),
    )
}

fn vector_of(space: &VectorSpace, values: &[f64; 4]) -> DimensionVector {
    let pairs: Vec<(&str, f64)> = space.keys().zip(values.iter().copied()).collect();
    space.vector(&pairs)
}

/// Keyword rules checked in order; labels nothing matches fall back to the
/// preset at the option's position.
fn rule_set(space: &VectorSpace) -> Result<RuleSet, CatalogError> {
    let presets = PRESETS
        .iter()
        .map(|(key, values)| VectorPreset {
            key: (*key).to_string(),
            vector: vector_of(space, values),
        })
        .collect();

    let rules = vec![
        OptionRule::new(
            Pattern::new(r"(?i)\b(climb|explor|hunt|chas|investigat|adventure)\w*")?,
            "adventurous",
        ),
        OptionRule::new(
            Contains::any(["friend", "together", "everyone", "company", "greet", "purr"]),
            "social",
        ),
        OptionRule::new(
            Contains::any(["nap", "blanket", "sun", "quiet", "cozy", "curl", "sleep"]),
            "cozy",
        ),
        OptionRule::new(
            Contains::any(["alone", "myself", "my own", "ignore", "privacy", "hide"]),
            "aloof",
        ),
        OptionRule::new(Exact::new("Depends on my mood"), "aloof"),
    ];

    let fallback = PRESETS.iter().map(|(key, _)| (*key).to_string()).collect();
    Ok(RuleSet::new(presets, rules, fallback)?)
}

fn candidates(space: &VectorSpace) -> Vec<CandidateProfile> {
    ARCHETYPES
        .iter()
        .map(|(key, name, description, values)| CandidateProfile {
            key: (*key).to_string(),
            name: (*name).to_string(),
            description: (*description).to_string(),
            narrative: NARRATIVE.to_string(),
            vector: vector_of(space, values),
        })
        .collect()
}

pub fn definition() -> Result<QuizDefinition, CatalogError> {
    let space = space();
    let rules = rule_set(&space)?;
    let candidates = candidates(&space);
    Ok(QuizDefinition {
        key: KEY.to_string(),
        title: "Which cat are you?".to_string(),
        description: "Twelve everyday situations, one feline archetype.".to_string(),
        space,
        outcomes: OutcomeSet::new(FACETS),
        layout: ColumnLayout::with_options(OPTION_COLUMNS).with_description(DESCRIPTION_COLUMN),
        mode: OptionMode::RuleMatched(rules),
        bank_size: Some(BANK_SIZE),
        candidates,
        strategy: ScoringStrategy::WeightedDistance {
            weight_floor: DEFAULT_WEIGHT_FLOOR,
        },
        top_n: 3,
        narrative_traits: 2,
        source: SOURCE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset_for(label: &str, ordinal: usize) -> String {
        let space = space();
        let rules = rule_set(&space).expect("rules compile");
        rules.preset_key(label, ordinal).to_string()
    }

    #[test]
    fn labels_map_through_rules_in_order() {
        assert_eq!(preset_for("Climb inside and explore every corner", 3), "adventurous");
        assert_eq!(preset_for("Greet each guest at the door", 0), "social");
        assert_eq!(preset_for("Find the warmest quiet spot", 0), "cozy");
        assert_eq!(preset_for("Hide until they leave", 0), "aloof");
        assert_eq!(preset_for("  depends on my mood ", 0), "aloof");
    }

    #[test]
    fn unmatched_labels_fall_back_by_position() {
        assert_eq!(preset_for("Complain loudly", 0), "adventurous");
        assert_eq!(preset_for("Complain loudly", 2), "cozy");
        assert_eq!(preset_for("Complain loudly", 5), "social");
    }

    #[test]
    fn scenario_column_becomes_question_description() {
        let definition = definition().expect("definition builds");
        let bank = crate::quizzes::bank::build_question_bank(definition.source, &definition);
        let description = |id: &str| {
            bank.questions
                .iter()
                .find(|question| question.id == id)
                .map(|question| question.description.as_str())
        };
        assert_eq!(description("c01"), Some("Delivery day"));
        // trailing column left off
        assert_eq!(description("c06"), Some(""));
    }

    #[test]
    fn archetypes_stay_inside_the_scale() {
        let definition = definition().expect("definition builds");
        let scale = definition.space.scale;
        assert!(definition
            .candidates
            .iter()
            .flat_map(|candidate| candidate.vector.entries())
            .all(|entry| scale.contains(entry.value)));
    }
}

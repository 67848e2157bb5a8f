use crate::quizzes::bank::{ColumnLayout, LikertScale, OptionMode, OutcomeSet};
use crate::quizzes::definition::QuizDefinition;
use crate::quizzes::domain::{CandidateProfile, Dimension, Scale, VectorSpace};
use crate::quizzes::scoring::ScoringStrategy;

pub const KEY: &str = "enneagram";

const SOURCE: &str = include_str!("data/enneagram.csv");

const BANK_SIZE: usize = 27;

/// Emphasis a type places on its neighbouring wings.
const WING_EMPHASIS: f64 = 0.25;

const NARRATIVE: &str =
    "You are closest to {name}. {description} Your answers lean most on {traits}.";

/// `(key, dimension label, type name, description)` in circle order.
const TYPES: [(&str, &str, &str, &str); 9] = [
    (
        "type1",
        "Integrity",
        "The Reformer",
        "Principled and purposeful, you want to make things right.",
    ),
    (
        "type2",
        "Generosity",
        "The Helper",
        "Warm and attentive, you find meaning in being there for others.",
    ),
    (
        "type3",
        "Drive",
        "The Achiever",
        "Adaptable and goal-oriented, you like to see results.",
    ),
    (
        "type4",
        "Individuality",
        "The Individualist",
        "Expressive and sensitive, you look for what is authentic.",
    ),
    (
        "type5",
        "Insight",
        "The Investigator",
        "Perceptive and independent, you need to understand before you act.",
    ),
    (
        "type6",
        "Loyalty",
        "The Loyalist",
        "Committed and security-minded, you keep people and plans steady.",
    ),
    (
        "type7",
        "Enthusiasm",
        "The Enthusiast",
        "Spontaneous and versatile, you chase the next good experience.",
    ),
    (
        "type8",
        "Assertiveness",
        "The Challenger",
        "Self-confident and decisive, you protect your ground and your people.",
    ),
    (
        "type9",
        "Harmony",
        "The Peacemaker",
        "Easygoing and receptive, you keep the room calm.",
    ),
];

fn space() -> VectorSpace {
    VectorSpace::new(
        TYPES
            .iter()
            .map(|(key, label, _, _)| Dimension::new(key, label))
            .collect(),
        Scale::new(1.0, 5.0),
    )
}

/// Each type emphasizes its own dimension fully and its two wings lightly.
fn candidates(space: &VectorSpace) -> Vec<CandidateProfile> {
    let count = TYPES.len();
    TYPES
        .iter()
        .enumerate()
        .map(|(index, (key, _, name, description))| {
            let left = TYPES[(index + count - 1) % count].0;
            let right = TYPES[(index + 1) % count].0;
            CandidateProfile {
                key: (*key).to_string(),
                name: (*name).to_string(),
                description: (*description).to_string(),
                narrative: NARRATIVE.to_string(),
                vector: space.vector(&[(*key, 1.0), (left, WING_EMPHASIS), (right, WING_EMPHASIS)]),
            }
        })
        .collect()
}

pub fn definition() -> QuizDefinition {
    let space = space();
    let candidates = candidates(&space);
    QuizDefinition {
        key: KEY.to_string(),
        title: "Enneagram".to_string(),
        description: "Rate 27 statements to find the type you lean towards.".to_string(),
        outcomes: OutcomeSet::new(space.keys()),
        space,
        layout: ColumnLayout::likert(),
        mode: OptionMode::Likert(LikertScale::default()),
        bank_size: Some(BANK_SIZE),
        candidates,
        strategy: ScoringStrategy::RawMagnitude,
        top_n: 3,
        narrative_traits: 2,
        source: SOURCE,
    }
}

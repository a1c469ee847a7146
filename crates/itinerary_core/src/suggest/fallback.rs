//! Local suggestion list used when no service answers.

pub const FALLBACK_SUGGESTIONS: [&str; 5] = [
    "Visit a famous shrine or temple",
    "Try a local ramen or sushi restaurant",
    "Stroll through a historic district or shopping street",
    "Visit a museum or art gallery",
    "Take scenic photos at a viewpoint",
];

/// First `take` entries of the fallback list.
pub fn fallback_suggestions(take: usize) -> Vec<String> {
    FALLBACK_SUGGESTIONS
        .iter()
        .take(take)
        .map(|title| (*title).to_string())
        .collect()
}

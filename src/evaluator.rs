//! Answer checking shared by every exercise shape.

/// Canonical comparison form: lowercase, with every whitespace character
/// removed (interior spaces included).
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// True when the learner's answer equals the expected one after
/// normalization. Blank input is never correct.
pub fn answers_match(user: &str, expected: &str) -> bool {
    let user = normalize(user);
    !user.is_empty() && user == normalize(expected)
}

use crate::domain::model::TEAM_NAME_MAX_LEN;

/// The part of `prefix` that takes part in matching: at most
/// `TEAM_NAME_MAX_LEN` characters.
pub fn effective_prefix(prefix: &str) -> &str {
    match prefix.char_indices().nth(TEAM_NAME_MAX_LEN) {
        Some((cut, _)) => &prefix[..cut],
        None => prefix,
    }
}

/// Case-sensitive, byte-wise prefix test. An empty prefix matches every name.
pub fn matches_prefix(name: &str, prefix: &str) -> bool {
    name.as_bytes()
        .starts_with(effective_prefix(prefix).as_bytes())
}

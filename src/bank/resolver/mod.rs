use crate::bank::catalog::Topic;
use crate::error::{Error, Result};


/// Reverses the slug transform so an id-style token can be compared
/// against display names.
pub fn unslugify(token: &str) -> String {
    token.to_lowercase().replace('-', " ").replace("plus", "+")
}

/// Finds the topic designated by a user-supplied token.
///
/// Rules are tried in order and the first match wins:
/// 1. the token is a topic id (case-insensitive),
/// 2. the unslugged token is a topic name (case-insensitive),
/// 3. the unslugged token is contained in a topic name.
///
/// Ties resolve to the earliest topic in catalog order.
pub fn resolve<'a>(topics: &'a [Topic], token: &str) -> Result<&'a Topic> {
    let not_found = || Error::TopicNotFound(token.to_owned());

    if token.trim().is_empty() {
        return Err(not_found());
    }

    let id = token.to_lowercase();
    if let Some(topic) = topics.iter().find(|t| t.id == id) {
        return Ok(topic);
    }

    let name = unslugify(token);
    if let Some(topic) = topics.iter().find(|t| t.name.to_lowercase() == name) {
        return Ok(topic);
    }

    topics
        .iter()
        .find(|t| t.name.to_lowercase().contains(&name))
        .ok_or_else(not_found)
}

pub mod calendar;
pub mod dashboard;
pub mod endpoint;
pub mod group;
pub mod meeting;
pub mod report;
pub mod settings;
pub mod staff;
pub mod unit;
pub mod user;

use chrono::Utc;

/// Generate an entity identifier: fixed prefix + current Unix-millisecond
/// timestamp. Collisions are negligible at human-interaction rates.
pub fn next_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_millis())
}

/// Replace the element with a matching id, leaving everything else untouched.
/// Returns None when no element matched.
pub fn replace_by_id<T, F>(items: &[T], id: &str, get_id: F, replacement: T) -> Option<Vec<T>>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    if !items.iter().any(|item| get_id(item) == id) {
        return None;
    }
    Some(
        items
            .iter()
            .map(|item| {
                if get_id(item) == id {
                    replacement.clone()
                } else {
                    item.clone()
                }
            })
            .collect(),
    )
}

/// Drop the element with a matching id. Returns None when no element matched.
pub fn remove_by_id<T, F>(items: &[T], id: &str, get_id: F) -> Option<Vec<T>>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    if !items.iter().any(|item| get_id(item) == id) {
        return None;
    }
    Some(
        items
            .iter()
            .filter(|item| get_id(item) != id)
            .cloned()
            .collect(),
    )
}

use shared::domain::Event;

/// Sidebar search: case-insensitive match on title or preview, order kept.
pub fn filter_events<'a>(events: &'a [Event], query: &str) -> Vec<&'a Event> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return events.iter().collect();
    }

    events
        .iter()
        .filter(|event| {
            event.title.to_lowercase().contains(&query)
                || event.preview.to_lowercase().contains(&query)
        })
        .collect()
}

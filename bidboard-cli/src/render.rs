//! Terminal rendering for the agenda view.

use owo_colors::OwoColorize;

use bidboard_core::CalendarEvent;

/// Print events sorted by start, one line per event.
///
/// Sorting happens here, after filtering: the filter pipeline preserves
/// input order, the display chooses chronological order.
pub fn print_events(events: &[CalendarEvent]) {
    if events.is_empty() {
        println!("No events.");
        return;
    }

    let mut sorted: Vec<&CalendarEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.start);

    for event in sorted {
        let date = event.start.format("%Y-%m-%d").to_string();
        let time = if event.all_day {
            "all day".to_string()
        } else {
            event.start.format("%H:%M").to_string()
        };
        let marker = if event.is_milestone() { "◆ " } else { "  " };
        let tag = match event.category {
            Some(category) => format!("  [{}]", category.label()),
            None => String::new(),
        };

        println!(
            "{} {:>7}  {}{}{}",
            date.dimmed(),
            time.dimmed(),
            marker,
            event.title.bold(),
            tag.dimmed(),
        );
        if let Some(description) = &event.description {
            println!("                     {}", description.dimmed());
        }
    }
}

//! Plain-text rendering of itinerary snapshots.

use itinerary_core::{is_video_link, to_embed_url, Day, Itinerary, MAX_ACTIVITIES_PER_DAY};

/// One line per day: position, label, activity count, id.
pub fn overview(itinerary: &Itinerary) -> String {
    if itinerary.is_empty() {
        return "no days planned\n".to_string();
    }
    let mut out = String::new();
    for (index, day) in itinerary.days().iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {} ({}) [{}]\n",
            index + 1,
            label(day),
            day.summary(),
            day.id
        ));
    }
    out
}

/// Day header followed by numbered activities.
pub fn day_detail(index: usize, day: &Day) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} [{}] {}/{MAX_ACTIVITIES_PER_DAY} activities\n",
        label_or_position(day, index),
        day.id,
        day.activities.len()
    ));
    for (position, activity) in day.activities.iter().enumerate() {
        let title = if activity.title.is_empty() {
            "(untitled)"
        } else {
            activity.title.as_str()
        };
        out.push_str(&format!(
            "{:>3}. {title}  {}  [{}]\n",
            position + 1,
            activity.time_span_label(),
            activity.id
        ));
        for line in activity.notes.lines() {
            out.push_str(&format!("     {line}\n"));
        }
        if !activity.link.is_empty() {
            out.push_str(&format!("     link: {}\n", activity.link));
            if is_video_link(&activity.link) {
                if let Some(embed) = to_embed_url(&activity.link) {
                    out.push_str(&format!("     preview: {embed}\n"));
                }
            }
        }
    }
    out
}

fn label(day: &Day) -> &str {
    if day.date.is_empty() {
        "—"
    } else {
        day.date.as_str()
    }
}

fn label_or_position(day: &Day, index: usize) -> String {
    if day.date.is_empty() {
        format!("Day {}", index + 1)
    } else {
        day.date.clone()
    }
}

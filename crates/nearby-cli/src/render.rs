//! Plain-text rendering of place lists and details.

use nearby_core::{format_distance, PlaceRecord};
use nearby_places::PlaceDetailRecord;

/// One line per place: name, rating (or a no-ratings note), open status when
/// known, and distance when enriched.
pub(crate) fn place_list(places: &[PlaceRecord]) -> String {
    let mut out = format!("Nearby places ({})\n", places.len());
    for place in places {
        out.push_str(&place_line(place));
        out.push('\n');
    }
    out
}

pub(crate) fn place_line(place: &PlaceRecord) -> String {
    let mut parts = vec![place.name.clone()];

    match (place.rating, place.rating_count) {
        (Some(rating), Some(count)) => parts.push(format!("{rating:.1} ({count})")),
        (Some(rating), None) => parts.push(format!("{rating:.1}")),
        (None, _) => parts.push("No ratings or reviews".to_owned()),
    }

    match place.open_now {
        Some(true) => parts.push("Open".to_owned()),
        Some(false) => parts.push("Closed".to_owned()),
        None => {}
    }

    if let Some(distance) = place.distance_meters {
        parts.push(format_distance(distance));
    }

    parts.join(" | ")
}

pub(crate) fn place_details(details: &PlaceDetailRecord, photo_urls: &[String]) -> String {
    let mut lines = Vec::new();
    if let Some(name) = &details.name {
        lines.push(name.clone());
    }
    lines.push(format!(
        "Phone: {}",
        details
            .international_phone_number
            .as_deref()
            .unwrap_or("unknown")
    ));
    lines.push(format!(
        "Address: {}",
        details.address().unwrap_or_else(|| "unknown".to_owned())
    ));

    if !photo_urls.is_empty() {
        lines.push("Photos:".to_owned());
        lines.extend(photo_urls.iter().map(|url| format!("  {url}")));
    }

    lines.push(format!("Reviews ({}):", details.reviews.len()));
    for review in &details.reviews {
        let when = review
            .relative_time_description
            .clone()
            .or_else(|| review.posted_at().map(|t| t.format("%Y-%m-%d").to_string()))
            .unwrap_or_default();
        lines.push(format!(
            "  {} - {}/5 {}",
            review.author_name, review.rating, when
        ));
        lines.push(format!("    {}", review.text));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

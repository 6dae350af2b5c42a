use disc_types::Round;

use crate::ScoringEngine;

pub const SHARE_FOOTER: &str = "Tracked with Disc Golf Tracker App";

/// Plain-text scorecard suitable for pasting into a message.
pub fn share_text(round: &Round) -> String {
    let holes: String = round
        .scores
        .iter()
        .map(|score| {
            format!(
                "Hole {} ({}ft, Par {}): {} {}\n",
                score.hole_id,
                score.distance,
                score.par,
                score.throws,
                ScoringEngine::bucket(score.differential()).emoji()
            )
        })
        .collect();

    format!(
        "🥏 Disc Golf Round at {} 🥏\nDate: {}\nFinal Score: {} ({} throws)\n\nHole-by-hole:\n{}\n{}",
        round.course_name,
        display_date(&round.date),
        ScoringEngine::relative_label(round.differential()),
        round.total_throws(),
        holes,
        SHARE_FOOTER
    )
}

/// `M/D/YYYY` for an RFC 3339 timestamp, or the stored text unchanged if it
/// does not parse.
pub fn display_date(date: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(date)
        .map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

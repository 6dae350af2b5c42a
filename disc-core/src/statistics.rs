use std::collections::BTreeMap;

use disc_types::{BestRound, CourseId, CourseStats, Round, ScoreCounts, Statistics};

use crate::{DifferentialBucket, ScoringEngine};

#[derive(Debug)]
struct CourseAccumulator {
    name: String,
    round_count: u32,
    total_throws: u64,
    total_par: u64,
    best_differential: i64,
}

fn record_bucket(counts: &mut ScoreCounts, bucket: DifferentialBucket) {
    let slot = match bucket {
        DifferentialBucket::AlbatrossOrBetter => &mut counts.albatrosses,
        DifferentialBucket::Eagle => &mut counts.eagles,
        DifferentialBucket::Birdie => &mut counts.birdies,
        DifferentialBucket::Par => &mut counts.pars,
        DifferentialBucket::Bogey => &mut counts.bogeys,
        DifferentialBucket::DoubleBogey => &mut counts.double_bogeys,
        DifferentialBucket::TripleBogeyPlus => &mut counts.triple_bogey_plus,
    };
    *slot += 1;
}

/// Aggregate every completed round in a single pass.
///
/// Returns `None` for an empty log. Totals, bucket counts and per-course
/// rollups do not depend on the order of `rounds`; the best round does, but
/// only for ties: the first round with the lowest differential wins.
pub fn compute_statistics(rounds: &[Round]) -> Option<Statistics> {
    if rounds.is_empty() {
        return None;
    }

    let mut total_holes: u32 = 0;
    let mut total_throws: u64 = 0;
    let mut total_par: u64 = 0;
    let mut score_counts = ScoreCounts::default();
    let mut best: Option<(&Round, i64, u64)> = None;
    let mut courses: BTreeMap<CourseId, CourseAccumulator> = BTreeMap::new();

    for round in rounds {
        let mut round_throws: u64 = 0;
        let mut round_par: u64 = 0;

        for score in &round.scores {
            total_holes += 1;
            round_throws += u64::from(score.throws);
            round_par += u64::from(score.par);
            record_bucket(&mut score_counts, ScoringEngine::bucket(score.differential()));
        }

        total_throws += round_throws;
        total_par += round_par;
        let differential = round_throws as i64 - round_par as i64;

        let course = courses
            .entry(round.course_id)
            .or_insert_with(|| CourseAccumulator {
                name: round.course_name.clone(),
                round_count: 0,
                total_throws: 0,
                total_par: 0,
                best_differential: differential,
            });
        course.round_count += 1;
        course.total_throws += round_throws;
        course.total_par += round_par;
        course.best_differential = course.best_differential.min(differential);

        // Strict comparison keeps the earliest round on ties
        if best.is_none_or(|(_, best_diff, _)| differential < best_diff) {
            best = Some((round, differential, round_throws));
        }
    }

    let total_rounds = rounds.len() as u32;
    let average_throws_per_hole = if total_holes > 0 {
        format!("{:.2}", total_throws as f64 / f64::from(total_holes))
    } else {
        "0".to_string()
    };
    let average_round_score = ScoringEngine::relative_average(
        (total_throws as i64 - total_par as i64) as f64 / f64::from(total_rounds),
    );

    let best_round = best.map(|(round, differential, throws)| BestRound {
        course_id: round.course_id,
        course_name: round.course_name.clone(),
        date: round.date.clone(),
        score: ScoringEngine::relative_label(differential),
        differential,
        throws,
    });

    let course_stats = courses
        .into_iter()
        .map(|(id, course)| CourseStats {
            id,
            name: course.name,
            round_count: course.round_count,
            average_score: ScoringEngine::relative_average(
                (course.total_throws as i64 - course.total_par as i64) as f64
                    / f64::from(course.round_count),
            ),
            best_score: ScoringEngine::relative_label(course.best_differential),
            best_differential: course.best_differential,
        })
        .collect();

    Some(Statistics {
        total_rounds,
        total_holes,
        total_throws,
        total_par,
        average_throws_per_hole,
        average_round_score,
        score_counts,
        best_round,
        course_stats,
    })
}

//! Cohort extraction: current-season stats and normalization

use crate::metrics::STAT_KEYS;
use crate::models::{CohortEntry, PlayerRow, SeasonRecord, Statistics};
use std::collections::BTreeMap;
use tracing::debug;

/// Statistics of the most recent season the player has in `tournament_name`.
///
/// The first tournament entry (in record order) with a matching name and a
/// non-empty season map is used. Record order is lexical key order, so "10"
/// comes before "9"; which of several matching entries wins is arbitrary.
/// Season ids are compared as integers; ids that do not parse are skipped.
pub fn extract_current_season_stats<'a>(
    record: &'a SeasonRecord,
    tournament_name: &str,
) -> Option<&'a Statistics> {
    let tournament = record
        .values()
        .find(|entry| entry.tournament_name == tournament_name && !entry.seasons.is_empty())?;

    let (_, payload) = tournament
        .seasons
        .iter()
        .filter_map(|(season_id, payload)| {
            season_id.trim().parse::<i64>().ok().map(|id| (id, payload))
        })
        .max_by_key(|(id, _)| *id)?;

    payload.statistics.as_ref()
}

/// Flatten a player's statistics into a cohort entry.
pub fn build_cohort_entry(row: &PlayerRow, statistics: &Statistics) -> CohortEntry {
    let stats: BTreeMap<String, f64> = STAT_KEYS
        .iter()
        .map(|key| {
            let value = statistics.get(*key).and_then(|v| v.as_f64()).unwrap_or(0.0);
            (key.to_string(), value)
        })
        .collect();

    CohortEntry {
        id: row.id,
        name: row.name.clone(),
        club: row.club.clone(),
        position: row.position.clone(),
        stats,
    }
}

/// Build the cohort for a tournament, dropping players without current stats.
/// Fetch order is preserved.
pub fn build_cohort(rows: &[PlayerRow], tournament_name: &str) -> Vec<CohortEntry> {
    let mut cohort = Vec::with_capacity(rows.len());

    for row in rows {
        let statistics = row
            .season_stats
            .as_ref()
            .and_then(|record| extract_current_season_stats(record, tournament_name));

        match statistics {
            Some(statistics) => cohort.push(build_cohort_entry(row, statistics)),
            None => debug!("Dropping player {} ({}): no {} stats", row.id, row.name, tournament_name),
        }
    }

    debug!("Built cohort of {} from {} rows", cohort.len(), rows.len());
    cohort
}

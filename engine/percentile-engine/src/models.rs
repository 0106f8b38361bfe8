use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;
use uuid::Uuid;

/// Raw statistics object of one season, as delivered by the upstream source
pub type Statistics = serde_json::Map<String, Value>;

/// Season record keyed by the source's own player key
pub type SeasonRecord = BTreeMap<String, TournamentSeasons>;

/// One tournament's seasons inside a season record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TournamentSeasons {
    /// Tournament name (e.g., "Premier League"); empty when the source omits it
    #[serde(default)]
    pub tournament_name: String,

    /// Season payloads keyed by stringified season id (e.g., "61627")
    #[serde(default, deserialize_with = "lenient_seasons")]
    pub seasons: BTreeMap<String, SeasonPayload>,
}

/// Payload of a single season
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeasonPayload {
    pub statistics: Option<Statistics>,
}

impl<'de> Deserialize<'de> for SeasonPayload {
    /// Null payloads and non-object statistics decode as "no statistics"
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let statistics = match Value::deserialize(deserializer)? {
            Value::Object(mut payload) => match payload.remove("statistics") {
                Some(Value::Object(statistics)) => Some(statistics),
                _ => None,
            },
            _ => None,
        };
        Ok(SeasonPayload { statistics })
    }
}

fn lenient_seasons<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, SeasonPayload>, D::Error>
where
    D: Deserializer<'de>,
{
    let seasons = match Value::deserialize(deserializer)? {
        Value::Object(seasons) => seasons
            .into_iter()
            .filter_map(|(id, payload)| serde_json::from_value(payload).ok().map(|p| (id, p)))
            .collect(),
        _ => BTreeMap::new(),
    };
    Ok(seasons)
}

/// Decode a stored season record, dropping tournament entries that do not
/// have the expected shape. Anything other than an object yields `None`.
pub fn parse_season_record(value: Value) -> Option<SeasonRecord> {
    let entries = match value {
        Value::Object(entries) => entries,
        Value::Null => return None,
        other => {
            warn!("Ignoring season record of unexpected type: {}", json_type(&other));
            return None;
        }
    };

    let mut record = SeasonRecord::new();
    for (key, entry) in entries {
        match serde_json::from_value::<TournamentSeasons>(entry) {
            Ok(tournament) => {
                record.insert(key, tournament);
            }
            Err(e) => warn!("Skipping malformed season entry {}: {}", key, e),
        }
    }
    Some(record)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn lenient_season_record<'de, D>(deserializer: D) -> std::result::Result<Option<SeasonRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(parse_season_record))
}

/// Player row as returned by the data store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRow {
    pub id: Uuid,

    /// Player name (e.g., "Bukayo Saka")
    pub name: String,

    /// Club name, if the player is attached to one
    #[serde(default)]
    pub club: Option<String>,

    /// Position as produced by the upstream classifier (e.g., "Forward")
    pub position: String,

    /// Nested season statistics, absent for players never synced
    #[serde(default, deserialize_with = "lenient_season_record")]
    pub season_stats: Option<SeasonRecord>,
}

/// Stored profile used to infer league and position for a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub league_id: Option<u32>,
    pub position: Option<String>,
}

/// One normalized cohort member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortEntry {
    pub id: Uuid,
    pub name: String,
    pub club: Option<String>,
    pub position: String,

    /// Flattened current-season stats, one value per known stat key
    pub stats: BTreeMap<String, f64>,
}

impl CohortEntry {
    /// Value of a stat, zero when the key is unknown
    pub fn stat(&self, key: &str) -> f64 {
        self.stats.get(key).copied().unwrap_or(0.0)
    }
}

/// Cohort entry enriched with its standing inside the cohort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredEntry {
    pub id: Uuid,
    pub name: String,
    pub club: Option<String>,
    pub position: String,
    pub stats: BTreeMap<String, f64>,

    /// Percentile per metric, 0..=100
    pub percentiles: BTreeMap<String, u32>,

    /// Rank per metric, 1..=total_players
    pub ranks: BTreeMap<String, usize>,

    pub total_players: usize,
}

impl ScoredEntry {
    pub fn from_cohort_entry(entry: CohortEntry, total_players: usize) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            club: entry.club,
            position: entry.position,
            stats: entry.stats,
            percentiles: BTreeMap::new(),
            ranks: BTreeMap::new(),
            total_players,
        }
    }

    pub fn stat(&self, key: &str) -> f64 {
        self.stats.get(key).copied().unwrap_or(0.0)
    }
}

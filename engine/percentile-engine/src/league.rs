//! Supported leagues and their external identifiers

use crate::error::{Result, ScoringError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A league the service can build cohorts for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum League {
    PremierLeague,
    LaLiga,
    SerieA,
    Bundesliga,
    Ligue1,
}

impl League {
    pub const ALL: [League; 5] = [
        League::PremierLeague,
        League::LaLiga,
        League::SerieA,
        League::Bundesliga,
        League::Ligue1,
    ];

    /// Display name returned to clients
    pub fn name(&self) -> &'static str {
        match self {
            League::PremierLeague => "Premier League",
            League::LaLiga => "La Liga",
            League::SerieA => "Serie A",
            League::Bundesliga => "Bundesliga",
            League::Ligue1 => "Ligue 1",
        }
    }

    /// URL slug (e.g., "premier-league")
    pub fn slug(&self) -> &'static str {
        match self {
            League::PremierLeague => "premier-league",
            League::LaLiga => "la-liga",
            League::SerieA => "serie-a",
            League::Bundesliga => "bundesliga",
            League::Ligue1 => "ligue-1",
        }
    }

    /// Tournament name as it appears in season records
    pub fn tournament_name(&self) -> &'static str {
        match self {
            League::PremierLeague => "Premier League",
            League::LaLiga => "LaLiga",
            League::SerieA => "Serie A",
            League::Bundesliga => "Bundesliga",
            League::Ligue1 => "Ligue 1",
        }
    }

    /// Unique tournament id in the external stats provider
    pub fn tournament_id(&self) -> u32 {
        match self {
            League::PremierLeague => 17,
            League::LaLiga => 8,
            League::SerieA => 23,
            League::Bundesliga => 35,
            League::Ligue1 => 34,
        }
    }

    pub fn from_tournament_id(id: u32) -> Option<League> {
        League::ALL.into_iter().find(|league| league.tournament_id() == id)
    }
}

impl FromStr for League {
    type Err = ScoringError;

    /// Accepts display name, slug, tournament name or tournament id, ignoring case
    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        if needle.is_empty() {
            return Err(ScoringError::MissingLeague);
        }

        if let Ok(id) = needle.parse::<u32>() {
            return League::from_tournament_id(id).ok_or_else(|| ScoringError::unknown_league(needle));
        }

        League::ALL
            .into_iter()
            .find(|league| {
                league.name().eq_ignore_ascii_case(needle)
                    || league.slug().eq_ignore_ascii_case(needle)
                    || league.tournament_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| ScoringError::unknown_league(needle))
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

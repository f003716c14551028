//! Balanced team split
//!
//! Players are ranked by rating (highest first) and dealt into two teams by a
//! fixed rank pattern, so the top two picks land on different sides and the
//! remaining ranks alternate in pairs. Pure and deterministic.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use thiserror::Error;

use crate::consts::ROSTER_SIZE;
use crate::player::{Player, Roster};

/// Shirt color of a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Team {
    Dark,
    Light,
}

/// Team for each rank index after sorting by rating descending
pub const PATTERN: [Team; ROSTER_SIZE] = [
    Team::Dark,
    Team::Light,
    Team::Light,
    Team::Dark,
    Team::Dark,
    Team::Light,
    Team::Light,
    Team::Dark,
    Team::Dark,
    Team::Light,
];

/// Result of splitting a roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSplit {
    pub dark: Vec<Player>,
    pub light: Vec<Player>,
}

impl TeamSplit {
    pub fn team(&self, team: Team) -> &[Player] {
        match team {
            Team::Dark => &self.dark,
            Team::Light => &self.light,
        }
    }

    /// Sum of player ratings on one side
    pub fn total_rating(&self, team: Team) -> u32 {
        self.team(team).iter().map(|p| p.rating).sum()
    }

    /// Absolute difference between the two rating totals
    pub fn rating_gap(&self) -> u32 {
        self.total_rating(Team::Dark)
            .abs_diff(self.total_rating(Team::Light))
    }

    /// Total number of players over both teams
    pub fn player_count(&self) -> usize {
        self.dark.len() + self.light.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("roster must have exactly {expected} players, found {actual}")]
    WrongRosterSize { expected: usize, actual: usize },
}

/// Split a full roster into dark and light teams
///
/// The roster itself is left untouched. Players with equal rating keep their
/// roster order (stable sort).
pub fn split(roster: &Roster) -> Result<TeamSplit, SplitError> {
    if !roster.is_complete() {
        return Err(SplitError::WrongRosterSize {
            expected: ROSTER_SIZE,
            actual: roster.len(),
        });
    }

    let mut ranked: Vec<&Player> = roster.players().iter().collect();
    ranked.sort_by(|a, b| b.rating.cmp(&a.rating));

    let mut teams = TeamSplit {
        dark: Vec::with_capacity(ROSTER_SIZE / 2),
        light: Vec::with_capacity(ROSTER_SIZE / 2),
    };
    for (player, team) in ranked.into_iter().zip(PATTERN) {
        match team {
            Team::Dark => teams.dark.push(player.clone()),
            Team::Light => teams.light.push(player.clone()),
        }
    }

    log::debug!(
        "Split roster: dark {} / light {}",
        teams.total_rating(Team::Dark),
        teams.total_rating(Team::Light)
    );
    Ok(teams)
}

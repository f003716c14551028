//! Player records, roster, and input normalization
//!
//! Every player that enters the system (edited table rows or JSON read back from
//! storage) passes through [`normalize`], so a [`Player`] is always valid:
//! non-empty name and position, rating within [`MIN_RATING`, `MAX_RATING`].

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::consts::{MAX_RATING, MIN_RATING, ROSTER_SIZE};

/// Position shown when the field is left blank
pub const BLANK_POSITION: &str = "-";

/// A single roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub rating: u32,
    pub pos: String,
}

impl Player {
    pub fn new(name: impl Into<String>, rating: u32, pos: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rating,
            pos: pos.into(),
        }
    }
}

/// Rating as it arrives from outside: a JSON number or the text of an input field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRating {
    Number(f64),
    Text(String),
}

/// Unvalidated player data
///
/// Missing fields are allowed; [`normalize`] fills them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPlayer {
    pub name: Option<String>,
    pub rating: Option<RawRating>,
    pub pos: Option<String>,
}

impl RawPlayer {
    /// Build from the three text inputs of a table row
    pub fn from_fields(name: &str, rating: &str, pos: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            rating: Some(RawRating::Text(rating.to_string())),
            pos: Some(pos.to_string()),
        }
    }
}

impl From<Player> for RawPlayer {
    fn from(player: Player) -> Self {
        Self {
            name: Some(player.name),
            rating: Some(RawRating::Number(player.rating as f64)),
            pos: Some(player.pos),
        }
    }
}

/// Editable column of the roster table (`data-field` attribute value)
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum PlayerField {
    Name,
    Rating,
    Pos,
}

/// Placeholder name for a blank name field (`index` is 0-based)
pub fn default_name(index: usize) -> String {
    format!("Jugador {}", index + 1)
}

/// Parse a rating the way a number input is read: leading integer, rest ignored
///
/// Returns `None` when the text does not start with a number.
pub fn parse_rating(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Overlong digit strings saturate rather than fail
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * value)
}

fn normalize_rating(raw: Option<&RawRating>) -> u32 {
    let value = match raw {
        Some(RawRating::Number(n)) if n.is_finite() => Some(n.trunc() as i64),
        Some(RawRating::Text(s)) => parse_rating(s),
        _ => None,
    };
    match value {
        // Zero counts as "no rating", same as garbage
        None | Some(0) => MIN_RATING,
        Some(v) => v.clamp(MIN_RATING as i64, MAX_RATING as i64) as u32,
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Turn raw input at roster position `index` into a valid player
pub fn normalize(index: usize, raw: &RawPlayer) -> Player {
    Player {
        name: non_blank(raw.name.as_deref()).unwrap_or_else(|| default_name(index)),
        rating: normalize_rating(raw.rating.as_ref()),
        pos: non_blank(raw.pos.as_deref()).unwrap_or_else(|| BLANK_POSITION.to_string()),
    }
}

/// Ordered list of players
///
/// Serialized as a bare JSON array. Splitting requires exactly
/// [`ROSTER_SIZE`] players; see [`Roster::is_complete`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// Normalize every row, using its position for default names
    pub fn from_raw<'a>(rows: impl IntoIterator<Item = &'a RawPlayer>) -> Self {
        Self {
            players: rows
                .into_iter()
                .enumerate()
                .map(|(i, raw)| normalize(i, raw))
                .collect(),
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Whether the roster has exactly the number of players a split needs
    pub fn is_complete(&self) -> bool {
        self.players.len() == ROSTER_SIZE
    }
}

/// The roster used on first start and after clearing saved data
pub fn default_roster() -> Roster {
    Roster::new(vec![
        Player::new("Messi", 95, "DEL"),
        Player::new("Cristiano", 93, "DEL"),
        Player::new("De Bruyne", 91, "MC"),
        Player::new("Mbappé", 92, "DEL"),
        Player::new("Van Dijk", 90, "DFC"),
        Player::new("Modric", 89, "MC"),
        Player::new("Haaland", 91, "DEL"),
        Player::new("Alisson", 88, "ARQ"),
        Player::new("Rodri", 90, "MC"),
        Player::new("Valverde", 86, "MC"),
    ])
}

//! HTML fragments for the roster table and the team view
//!
//! Pure string rendering so the markup can be tested natively; the web front
//! end only swaps these into the page.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::player::{Player, PlayerField, Roster};
use crate::splitter::{Team, TeamSplit};

pub const NO_TEAMS_TEXT: &str = "No hay equipos generados.";
pub const WRONG_SIZE_TEXT: &str = "Tienen que ser exactamente 10 jugadores.";

impl Team {
    /// Heading shown above the team column
    pub fn title(&self) -> &'static str {
        match self {
            Team::Dark => "Camiseta Oscura",
            Team::Light => "Camiseta Clara",
        }
    }
}

fn input(index: usize, field: PlayerField, value: &str) -> String {
    let (kind, extra, label) = match field {
        PlayerField::Name => ("text", "", "Nombre jugador"),
        PlayerField::Rating => ("number", " min=\"1\" max=\"100\"", "Puntaje jugador"),
        PlayerField::Pos => ("text", "", "Posición jugador"),
    };
    format!(
        "<input type=\"{}\"{} value=\"{}\" data-idx=\"{}\" data-field=\"{}\" aria-label=\"{} {}\">",
        kind,
        extra,
        encode_double_quoted_attribute(value),
        index,
        field.as_ref(),
        label,
        index + 1
    )
}

/// Table body rows, one per player, with editable inputs
pub fn roster_rows(roster: &Roster) -> String {
    roster
        .players()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                i + 1,
                input(i, PlayerField::Name, &p.name),
                input(i, PlayerField::Rating, &p.rating.to_string()),
                input(i, PlayerField::Pos, &p.pos)
            )
        })
        .collect()
}

pub fn roster_heading(roster: &Roster) -> String {
    format!("Jugadores ({})", roster.len())
}

fn player_card(player: &Player) -> String {
    format!(
        "<div class=\"card\"><span>{} ({})</span><strong>{}</strong></div>",
        encode_text(&player.name),
        encode_text(&player.pos),
        player.rating
    )
}

fn team_column(teams: &TeamSplit, team: Team) -> String {
    let cards: String = teams.team(team).iter().map(player_card).collect();
    format!(
        "<div class=\"team {}\"><h3>{}</h3>{}</div>",
        team.as_ref(),
        team.title(),
        cards
    )
}

/// Both team columns, or a placeholder when nothing was generated yet
pub fn teams_view(teams: Option<&TeamSplit>) -> String {
    match teams {
        Some(teams) => format!(
            "<div class=\"teams\">{}{}</div>",
            team_column(teams, Team::Dark),
            team_column(teams, Team::Light)
        ),
        None => format!("<p>{}</p>", NO_TEAMS_TEXT),
    }
}

//! Editing session
//!
//! Owns the store plus the live roster and split, and implements the user
//! actions independent of any DOM. The web front end forwards events here and
//! re-renders from [`Session::roster`] / [`Session::team_split`].

use crate::player::{RawPlayer, Roster};
use crate::splitter::{SplitError, TeamSplit, split};
use crate::storage::KeyValueStorage;
use crate::store::RosterStore;

pub struct Session<S: KeyValueStorage> {
    store: RosterStore<S>,
    roster: Roster,
    teams: Option<TeamSplit>,
}

impl<S: KeyValueStorage> Session<S> {
    /// Restore the saved roster (or defaults) and the last split
    pub fn start(mut store: RosterStore<S>) -> Self {
        let roster = store.load_roster();
        let teams = store.load_team_split();
        Self {
            store,
            roster,
            teams,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn team_split(&self) -> Option<&TeamSplit> {
        self.teams.as_ref()
    }

    pub fn store(&self) -> &RosterStore<S> {
        &self.store
    }

    /// Replace the roster with the edited table contents and save it
    ///
    /// The current split is left as is, even if it is now stale.
    pub fn sync_roster(&mut self, rows: &[RawPlayer]) {
        self.roster = Roster::from_raw(rows);
        self.store.save_roster(&self.roster);
    }

    /// Split the table contents into teams and save both roster and split
    ///
    /// With the wrong number of players nothing changes, in memory or in
    /// storage.
    pub fn generate(&mut self, rows: &[RawPlayer]) -> Result<&TeamSplit, SplitError> {
        let roster = Roster::from_raw(rows);
        let teams = split(&roster)?;

        self.store.save_team_split(&teams);
        self.store.save_roster(&roster);
        self.roster = roster;
        log::info!("Generated teams (rating gap {})", teams.rating_gap());
        Ok(&*self.teams.insert(teams))
    }

    /// Forget all saved data and show the default roster again
    ///
    /// Defaults are not written back here; the next start heals storage.
    pub fn clear(&mut self) {
        self.store.clear();
        self.roster = self.store.config().default_roster.clone();
        self.teams = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ROSTER_KEY, SPLIT_KEY};
    use crate::player::{Player, default_roster};
    use crate::storage::MemoryStorage;

    fn rows(roster: &Roster) -> Vec<RawPlayer> {
        roster.players().iter().cloned().map(RawPlayer::from).collect()
    }

    fn session() -> Session<MemoryStorage> {
        Session::start(RosterStore::with_defaults(MemoryStorage::new()))
    }

    #[test]
    fn test_fresh_start() {
        let session = session();
        assert_eq!(session.roster(), &default_roster());
        assert!(session.team_split().is_none());
        assert!(session.store().storage().contains_key(ROSTER_KEY));
        assert!(!session.store().storage().contains_key(SPLIT_KEY));
    }

    #[test]
    fn test_edit_persists_and_keeps_stale_split() {
        let mut session = session();
        let before = session.generate(&rows(&default_roster())).unwrap().clone();

        let mut edited = rows(&default_roster());
        edited[0] = RawPlayer::from_fields("Leo", "", " ");
        session.sync_roster(&edited);

        assert_eq!(session.roster().players()[0], Player::new("Leo", 1, "-"));
        assert_eq!(session.team_split(), Some(&before));

        // Survives a restart
        let storage = session.store().storage().clone();
        let restarted = Session::start(RosterStore::with_defaults(storage));
        assert_eq!(restarted.roster().players()[0].name, "Leo");
        assert_eq!(restarted.team_split(), Some(&before));
    }

    #[test]
    fn test_generate_saves_split_and_roster() {
        let mut session = session();
        let mut edited = rows(&default_roster());
        edited[9] = RawPlayer::from_fields("Valverde", "99", "MC");

        let teams = session.generate(&edited).unwrap().clone();
        assert_eq!(teams.dark[0].name, "Valverde");
        assert_eq!(session.roster().players()[9].rating, 99);

        let storage = session.store().storage().clone();
        let restarted = Session::start(RosterStore::with_defaults(storage));
        assert_eq!(restarted.team_split(), Some(&teams));
        assert_eq!(restarted.roster(), session.roster());
    }

    #[test]
    fn test_generate_with_nine_players_changes_nothing() {
        let mut session = session();
        let all = rows(&default_roster());

        let err = session.generate(&all[..9]).unwrap_err();
        assert_eq!(
            err,
            SplitError::WrongRosterSize {
                expected: 10,
                actual: 9
            }
        );
        assert!(session.team_split().is_none());
        assert_eq!(session.roster(), &default_roster());
        assert!(!session.store().storage().contains_key(SPLIT_KEY));
    }

    #[test]
    fn test_regenerate_replaces_split() {
        let mut session = session();
        session.generate(&rows(&default_roster())).unwrap();

        let mut edited = rows(&default_roster());
        edited[1] = RawPlayer::from_fields("Cristiano", "10", "DEL");
        let second = session.generate(&edited).unwrap().clone();

        assert_eq!(session.team_split(), Some(&second));
        assert_eq!(session.store().load_team_split(), Some(second));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut session = session();
        let mut edited = rows(&default_roster());
        edited[3] = RawPlayer::from_fields("Kylian", "92", "DEL");
        session.generate(&edited).unwrap();

        session.clear();
        assert_eq!(session.roster(), &default_roster());
        assert!(session.team_split().is_none());
        assert!(session.store().storage().is_empty());

        let storage = session.store().storage().clone();
        let restarted = Session::start(RosterStore::with_defaults(storage));
        assert_eq!(restarted.roster(), &default_roster());
        assert!(restarted.team_split().is_none());
    }
}

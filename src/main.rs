//! Team Splitter entry point
//!
//! Handles platform-specific initialization and wires the page to the session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlInputElement};

    use team_splitter::player::PlayerField;
    use team_splitter::render::{WRONG_SIZE_TEXT, roster_heading, roster_rows, teams_view};
    use team_splitter::{
        KeyValueStorage, LocalStorage, MemoryStorage, RawPlayer, RosterStore, Session, TeamSplit,
    };

    type App = Rc<RefCell<Session<Box<dyn KeyValueStorage>>>>;

    const TABLE_BODY: &str = "#players-table tbody";

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn render_roster(session: &Session<Box<dyn KeyValueStorage>>) {
        let document = document();
        if let Some(tbody) = document.query_selector(TABLE_BODY).ok().flatten() {
            tbody.set_inner_html(&roster_rows(session.roster()));
        }
        if let Some(heading) = document.get_element_by_id("players-heading") {
            heading.set_text_content(Some(&roster_heading(session.roster())));
        }
    }

    fn render_teams(teams: Option<&TeamSplit>) {
        if let Some(container) = document().get_element_by_id("teams-container") {
            container.set_inner_html(&teams_view(teams));
        }
    }

    fn field_value(row: &Element, field: PlayerField) -> String {
        let selector = format!("input[data-field=\"{}\"]", field.as_ref());
        row.query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    /// Read every visible table row as raw player data
    fn read_table() -> Vec<RawPlayer> {
        let Ok(rows) = document().query_selector_all(&format!("{} tr", TABLE_BODY)) else {
            return Vec::new();
        };
        (0..rows.length())
            .filter_map(|i| rows.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|row| {
                RawPlayer::from_fields(
                    &field_value(&row, PlayerField::Name),
                    &field_value(&row, PlayerField::Rating),
                    &field_value(&row, PlayerField::Pos),
                )
            })
            .collect()
    }

    fn open_storage() -> Box<dyn KeyValueStorage> {
        match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{}, changes will not be kept", e);
                Box::new(MemoryStorage::new())
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Team Splitter starting...");

        let session = Session::start(RosterStore::with_defaults(open_storage()));
        render_roster(&session);
        render_teams(session.team_split());

        let app: App = Rc::new(RefCell::new(session));
        setup_table_input(app.clone());
        setup_generate_button(app.clone());
        setup_clear_button(app);

        log::info!("Team Splitter ready");
    }

    /// One delegated listener on the table body covers every field
    fn setup_table_input(app: App) {
        let Some(tbody) = document().query_selector(TABLE_BODY).ok().flatten() else {
            log::error!("Roster table not found");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            let is_field = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.get_attribute("data-field"))
                .is_some_and(|f| f.parse::<PlayerField>().is_ok());
            if is_field {
                app.borrow_mut().sync_roster(&read_table());
            }
        });
        let _ = tbody.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_generate_button(app: App) {
        if let Some(btn) = document().get_element_by_id("generate-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let rows = read_table();
                let mut session = app.borrow_mut();
                match session.generate(&rows) {
                    Ok(teams) => render_teams(Some(teams)),
                    Err(e) => {
                        log::warn!("Cannot generate teams: {}", e);
                        if let Some(window) = web_sys::window() {
                            let _ = window.alert_with_message(WRONG_SIZE_TEXT);
                        }
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_clear_button(app: App) {
        if let Some(btn) = document().get_element_by_id("clear-storage") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut session = app.borrow_mut();
                session.clear();
                render_roster(&session);
                render_teams(None);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use team_splitter::{MemoryStorage, RawPlayer, RosterStore, Session, Team};

    env_logger::init();
    log::info!("Team Splitter (native) starting...");
    log::info!("Native mode runs a demo split - run with `trunk serve` for the web version");

    let mut session = Session::start(RosterStore::with_defaults(MemoryStorage::new()));
    let rows: Vec<RawPlayer> = session
        .roster()
        .players()
        .iter()
        .cloned()
        .map(RawPlayer::from)
        .collect();

    match session.generate(&rows) {
        Ok(teams) => {
            for team in [Team::Dark, Team::Light] {
                println!("\n{} ({})", team.title(), teams.total_rating(team));
                for player in teams.team(team) {
                    println!("  {:<12} {:<4} {}", player.name, player.pos, player.rating);
                }
            }
            println!("\nRating gap: {}", teams.rating_gap());
        }
        Err(e) => log::error!("{}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use crossterm::event::{KeyCode, KeyEvent};

use branchview_core::ContactSortKey;

use crate::app::{App, AppState, ViewMode, PAGE_SCROLL_SIZE};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return false;
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('j' | 'J' | 'y' | 'Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return true;
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return false;
    }

    // Handle search mode
    if matches!(app.state, AppState::Searching) {
        handle_search_input(app, key);
        return false;
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Char('1') => app.set_view(ViewMode::List),
        KeyCode::Char('2') => app.set_view(ViewMode::Contacts),
        KeyCode::Char('3') => app.set_view(ViewMode::Map),
        KeyCode::Left => app.set_view(app.view_mode.prev()),
        KeyCode::Right => app.set_view(app.view_mode.next()),
        KeyCode::Char('/') => {
            app.state = AppState::Searching;
        }
        KeyCode::Esc => app.clear_query(),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-(PAGE_SCROLL_SIZE as isize)),
        KeyCode::PageDown => app.move_selection(PAGE_SCROLL_SIZE as isize),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        _ => {
            // View-specific input
            match app.view_mode {
                ViewMode::List | ViewMode::Map => handle_branch_input(app, key),
                ViewMode::Contacts => handle_contacts_input(app, key),
            }
        }
    }

    false
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
            app.clear_query();
        }
        KeyCode::Enter => {
            app.state = AppState::Normal;
            // Keep search query active
        }
        KeyCode::Backspace => app.pop_query_char(),
        KeyCode::Char(c) => app.push_query_char(c),
        _ => {}
    }
}

/// Keys shared by the list and map views, which both filter branches
fn handle_branch_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('t') => app.cycle_type_filter(),
        KeyCode::Char('s') => app.cycle_status_filter(),
        KeyCode::Enter | KeyCode::Char(' ') if app.view_mode == ViewMode::List => {
            app.toggle_selected_card();
        }
        _ => {}
    }
}

fn handle_contacts_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('f') => app.cycle_role_filter(),
        KeyCode::Char('n') => app.contact_list.set_sort(ContactSortKey::Name),
        KeyCode::Char('r') => app.contact_list.set_sort(ContactSortKey::Role),
        KeyCode::Char('a') => app.contact_list.set_sort(ContactSortKey::Branch),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use branchview_core::loader::parse;
    use branchview_core::{RoleFilter, StatusFilter, TypeFilter};
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::config::Config;

    const DIRECTORY: &str = r#"{
        "data": { "branches": [
            { "branchId": "a", "branchType": "Lokalforening", "branchName": "Oslo Lokalforening",
              "branchStatus": { "isActive": true, "isTerminated": false },
              "branchContacts": [
                { "role": "Nestleder", "firstName": "Per", "lastName": "Hansen" },
                { "role": "Leder", "firstName": "Kari", "lastName": "Nordmann" }
              ] },
            { "branchId": "b", "branchType": "Distrikt", "branchName": "Oslo Distrikt",
              "branchStatus": { "isActive": true, "isTerminated": false } }
        ] },
        "metadata": { "totalCount": 2 }
    }"#;

    fn app() -> App {
        App::with_response(Config::default(), parse(DIRECTORY).unwrap())
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_input(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_number_keys_switch_views() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.view_mode, ViewMode::Contacts);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.view_mode, ViewMode::Map);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.view_mode, ViewMode::List);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.view_mode, ViewMode::Map);
    }

    #[test]
    fn test_search_enter_keeps_query() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.state, AppState::Searching);

        // Letters that are shortcuts elsewhere go into the query
        type_str(&mut app, "distq");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.search_query, "dist");
        assert_eq!(app.visible_branches().len(), 1);
    }

    #[test]
    fn test_search_escape_clears_query() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "oslo");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Normal);
        assert!(app.search_query.is_empty());
    }

    #[test]
    fn test_query_survives_view_switch() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "kari");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.search_query, "kari");
        assert_eq!(app.visible_contacts().len(), 1);
    }

    #[test]
    fn test_filter_keys_depend_on_view() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('f'));
        assert_ne!(app.type_filter, TypeFilter::All);
        assert_eq!(app.status_filter, StatusFilter::Terminated);
        assert_eq!(app.role_filter, RoleFilter::All);

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.role_filter, RoleFilter::Role("Leder".to_string()));
    }

    #[test]
    fn test_sort_keys_in_contacts_view() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.contact_list.sort_key, ContactSortKey::Role);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.contact_list.sort_key, ContactSortKey::Branch);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.contact_list.sort_key, ContactSortKey::Name);
    }

    #[test]
    fn test_enter_toggles_card() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(app.branch_list.is_expanded("b"));
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.branch_list.is_expanded("b"));
    }

    #[test]
    fn test_quit_requires_confirmation() {
        let mut app = app();
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.state, AppState::ConfirmingQuit);
        assert!(!press(&mut app, KeyCode::Char('n')));
        assert_eq!(app.state, AppState::Normal);

        press(&mut app, KeyCode::Char('q'));
        assert!(press(&mut app, KeyCode::Char('j')));
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.state, AppState::ShowingHelp);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.view_mode, ViewMode::List);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Normal);
    }
}

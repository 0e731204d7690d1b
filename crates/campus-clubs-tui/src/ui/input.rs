//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use campus_clubs_core::models::Comment;

use crate::app::{
    can_add_comment_char, can_add_email_char, can_add_name_char, can_add_password_char, App,
    AppState, AuthMode, HomeTab, LoginFocus, Page, PAGE_SCROLL_SIZE,
};
use crate::ui::styles::Palette;

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Handle delete confirmation
    if matches!(app.state, AppState::ConfirmingDelete) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
            _ => {}
        }
        return Ok(false);
    }

    if matches!(app.state, AppState::Composing) {
        handle_compose_input(app, key);
        return Ok(false);
    }

    // Form pages take printable keys as text
    if app.page == Page::Login {
        handle_login_input(app, key);
        return Ok(false);
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        _ => {}
    }

    if app.page == Page::Landing {
        match key.code {
            KeyCode::Char('g') => app.open_login(AuthMode::Register),
            KeyCode::Char('s') | KeyCode::Enter => app.open_login(AuthMode::Login),
            _ => {}
        }
        return Ok(false);
    }

    // Signed-in navigation
    match key.code {
        KeyCode::Char('1') => app.go_to(Page::Home),
        KeyCode::Char('2') => app.go_to(Page::Events),
        KeyCode::Char('3') => app.go_to(Page::Settings),
        KeyCode::Left => app.go_to(app.page.prev()),
        KeyCode::Right => app.go_to(app.page.next()),
        KeyCode::Char('L') => app.logout(),
        KeyCode::Char('u') => app.refresh_current_page(),
        _ => match app.page {
            Page::Home => handle_home_input(app, key),
            Page::Comments => handle_comments_input(app, key),
            Page::Events => handle_events_input(app, key),
            Page::Settings => handle_settings_input(app, key),
            Page::Landing | Page::Login => {}
        },
    }

    Ok(false)
}

/// Move a list selection by `key`, returning the new index
fn navigate(selection: usize, len: usize, key: KeyCode) -> usize {
    if len == 0 {
        return 0;
    }
    let last = len - 1;
    match key {
        KeyCode::Up => selection.saturating_sub(1),
        KeyCode::Down => (selection + 1).min(last),
        KeyCode::PageUp => selection.saturating_sub(PAGE_SCROLL_SIZE),
        KeyCode::PageDown => (selection + PAGE_SCROLL_SIZE).min(last),
        KeyCode::Home => 0,
        KeyCode::End => last,
        _ => selection,
    }
}

fn handle_login_input(app: &mut App, key: KeyEvent) {
    let mode = app.login.mode;
    match key.code {
        KeyCode::Esc => {
            app.login.error = None;
            app.page = Page::Landing;
        }
        KeyCode::Down | KeyCode::Tab => {
            app.login.focus = app.login.focus.next(mode);
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login.focus = app.login.focus.prev(mode);
        }
        KeyCode::Enter => match app.login.focus {
            LoginFocus::Button => app.submit_login_form(),
            focus => app.login.focus = focus.next(mode),
        },
        KeyCode::Backspace => match app.login.focus {
            LoginFocus::Name => {
                app.login.name.pop();
            }
            LoginFocus::Email => {
                app.login.email.pop();
            }
            LoginFocus::Password => {
                app.login.password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login.focus {
            LoginFocus::Name => {
                if can_add_name_char(app.login.name.chars().count(), c) {
                    app.login.name.push(c);
                }
            }
            LoginFocus::Email => {
                if can_add_email_char(app.login.email.chars().count(), c) {
                    app.login.email.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.login.password.chars().count(), c) {
                    app.login.password.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
}

fn handle_home_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => app.home.tab = app.home.tab.toggle(),
        KeyCode::Char('j') => app.join_selected(),
        KeyCode::Char('m') if app.home.tab == HomeTab::Clubs => app.manage_selected_club(),
        KeyCode::Char('c') | KeyCode::Enter if app.home.tab == HomeTab::Events => {
            app.open_comments()
        }
        code => match app.home.tab {
            HomeTab::Events => {
                app.home.event_selection = navigate(app.home.event_selection, app.home.events.len(), code);
            }
            HomeTab::Clubs => {
                app.home.club_selection = navigate(app.home.club_selection, app.home.clubs.len(), code);
            }
        },
    }
}

fn handle_comments_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.page = Page::Home,
        KeyCode::Char('n') => app.start_compose(false),
        KeyCode::Char('r') => app.start_compose(true),
        code => {
            let total = Comment::count(&app.comments.thread);
            app.comments.selection = navigate(app.comments.selection, total, code);
        }
    }
}

fn handle_compose_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_compose(),
        KeyCode::Enter => app.submit_comment(),
        KeyCode::Backspace => {
            app.comments.draft.pop();
        }
        KeyCode::Char(c) => {
            if can_add_comment_char(app.comments.draft.chars().count(), c) {
                app.comments.draft.push(c);
            }
        }
        _ => {}
    }
}

fn handle_events_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(uid) = app.selected_managed_event().map(|e| e.uid.clone()) {
                app.toggle_expand(&uid);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        code => {
            app.manage.selection = navigate(app.manage.selection, app.manage.events.len(), code);
        }
    }
}

fn handle_settings_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(palette) = Palette::ALL.get(app.settings_selection) {
                app.select_palette(*palette);
            }
        }
        KeyCode::Char('c') => app.cycle_palette(),
        KeyCode::Char('r') => app.reset_palette(),
        code => {
            app.settings_selection = navigate(app.settings_selection, Palette::ALL.len(), code);
        }
    }
}

// event handling

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::InputMethod;
use crate::tui::app::{App, Mode, Popup, Submission};

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Submit(Submission),
    CopyReport,
}

pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

pub fn handle_event(app: &mut App, event: Event) -> Action {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        // drag and drop arrives as a bracketed paste
        Event::Paste(data) if app.popup == Popup::None => match app.paste(&data) {
            Some(submission) => Action::Submit(submission),
            None => Action::None,
        },
        _ => Action::None,
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    if app.popup == Popup::Themes {
        return handle_theme_popup(app, key);
    }

    match app.mode {
        Mode::Normal => handle_normal_key(app, key),
        Mode::Insert => handle_insert_key(app, key),
    }
}

fn handle_theme_popup(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_popup(),
        KeyCode::Char('j') | KeyCode::Down => app.theme_scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.theme_scroll_up(),
        KeyCode::Enter => app.select_theme(),
        _ => {}
    }
    Action::None
}

fn handle_normal_key(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => return Action::Quit,

        // input method
        KeyCode::Tab => app.toggle_input_method(),
        KeyCode::Char('u') | KeyCode::Char('1') => app.set_input_method(InputMethod::Upload),
        KeyCode::Char('m') | KeyCode::Char('2') => app.set_input_method(InputMethod::Manual),

        // editing
        KeyCode::Char('i') => app.enter_insert(),
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.active_field_mut().move_end();
            app.enter_insert();
        }
        KeyCode::Char('I') => {
            app.active_field_mut().move_start();
            app.enter_insert();
        }

        KeyCode::Enter => {
            if let Some(submission) = app.submit() {
                return Action::Submit(submission);
            }
        }

        KeyCode::Char('y') => return Action::CopyReport,
        KeyCode::Char('d') => app.toggle_dark(),
        KeyCode::Char('t') => app.open_theme_popup(),

        // scrolling
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
        KeyCode::Char('J') => app.scroll_logs_down(),
        KeyCode::Char('K') => app.scroll_logs_up(),

        _ => {}
    }
    Action::None
}

fn handle_insert_key(app: &mut App, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('a') => app.active_field_mut().move_start(),
            KeyCode::Char('e') => app.active_field_mut().move_end(),
            KeyCode::Char('u') => app.active_field_mut().clear(),
            // submit without leaving a stray newline
            KeyCode::Char('s') | KeyCode::Char('d') => {
                if let Some(submission) = app.submit() {
                    return Action::Submit(submission);
                }
            }
            _ => {}
        }
        return Action::None;
    }

    match key.code {
        KeyCode::Esc => app.exit_insert(),

        // a path is one line, enter sends it; contract text keeps its newlines
        KeyCode::Enter => match app.input_method {
            InputMethod::Upload => {
                app.exit_insert();
                if let Some(submission) = app.submit() {
                    return Action::Submit(submission);
                }
            }
            InputMethod::Manual => app.insert_newline(),
        },

        KeyCode::Char(c) => app.active_field_mut().insert_char(c),
        KeyCode::Backspace => app.active_field_mut().delete_char(),
        KeyCode::Delete => app.active_field_mut().delete_char_forward(),
        KeyCode::Left => app.active_field_mut().move_left(),
        KeyCode::Right => app.active_field_mut().move_right(),
        KeyCode::Home => app.active_field_mut().move_start(),
        KeyCode::End => app.active_field_mut().move_end(),

        _ => {}
    }
    Action::None
}

// tests for the tui state machine and rendering

use agreewise::tui::{
    ANALYZE_FAILED, Action, App, Mode, Submission, TextField, ThemeKind, UPLOAD_FAILED,
    handle_event, handle_key, render,
};
use agreewise::{Analysis, InputMethod, RiskScore};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use std::path::PathBuf;
use std::time::{Duration, Instant};

fn app() -> App {
    App::with_theme("http://localhost:5000", ThemeKind::Dark)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn last_log(app: &App) -> &str {
    app.logs.last().map(|e| e.message.as_str()).unwrap_or("")
}

fn sample() -> Analysis {
    Analysis {
        risk_score: RiskScore::Medium,
        crucial_points: vec![
            "Termination terms are unclear".to_string(),
            "Fair terms detected".to_string(),
        ],
        verdict: false,
    }
}

#[test]
fn test_starts_idle_on_upload() {
    let app = app();
    assert_eq!(app.input_method, InputMethod::Upload);
    assert_eq!(app.mode, Mode::Normal);
    assert!(!app.loading);
    assert!(app.analysis.is_none());
    assert!(app.error.is_none());
}

#[test]
fn test_non_pdf_is_rejected() {
    let mut app = app();
    app.file_path.set("/tmp/contract.docx".to_string());

    assert_eq!(app.submit(), None);
    assert!(!app.loading);
    assert_eq!(last_log(&app), "Please upload a PDF file");
}

#[test]
fn test_blank_path_is_rejected() {
    let mut app = app();
    assert_eq!(app.submit(), None);
    assert_eq!(last_log(&app), "Please upload a PDF file");
}

#[test]
fn test_empty_text_is_rejected() {
    let mut app = app();
    app.set_input_method(InputMethod::Manual);
    app.manual_text.set("   \n".to_string());

    assert_eq!(app.submit(), None);
    assert!(!app.loading);
    assert_eq!(last_log(&app), "Please enter contract text");
}

#[test]
fn test_submit_text() {
    let mut app = app();
    app.set_input_method(InputMethod::Manual);
    app.manual_text.set("The parties agree.".to_string());

    assert_eq!(
        app.submit(),
        Some(Submission::Text("The parties agree.".to_string()))
    );
    assert!(app.loading);

    // no second request while one is in flight
    assert_eq!(app.submit(), None);
}

#[test]
fn test_drop_submits_pdf() {
    let mut app = app();
    let action = handle_event(&mut app, Event::Paste("'/tmp/My Lease.pdf'".to_string()));

    assert_eq!(
        action,
        Action::Submit(Submission::Upload(PathBuf::from("/tmp/My Lease.pdf")))
    );
    assert_eq!(app.file_path.value, "/tmp/My Lease.pdf");
    assert!(app.loading);
}

#[test]
fn test_drop_rejects_other_files() {
    let mut app = app();
    let action = handle_event(&mut app, Event::Paste("/tmp/photo.png".to_string()));

    assert_eq!(action, Action::None);
    assert!(!app.loading);
    assert_eq!(last_log(&app), "Please upload a PDF file");
}

#[test]
fn test_paste_in_manual_mode_is_text() {
    let mut app = app();
    app.set_input_method(InputMethod::Manual);

    let action = handle_event(&mut app, Event::Paste("clause one\nclause two".to_string()));
    assert_eq!(action, Action::None);
    assert_eq!(app.manual_text.value, "clause one\nclause two");
}

#[test]
fn test_result_matches_payload() {
    let mut app = app();
    app.set_input_method(InputMethod::Manual);
    app.manual_text.set("some contract".to_string());
    app.submit();

    app.set_analysis(sample());

    assert!(!app.loading);
    assert_eq!(app.analysis, Some(sample()));
    assert_eq!(app.report(), Some(sample().report()));
}

#[test]
fn test_failure_is_generic_and_keeps_result() {
    let mut app = app();
    app.set_analysis(sample());

    app.file_path.set("/tmp/lease.pdf".to_string());
    assert!(app.submit().is_some());
    app.set_error("connection refused");

    assert!(!app.loading);
    assert_eq!(app.error.as_deref(), Some(UPLOAD_FAILED));
    assert_eq!(app.analysis, Some(sample()));

    app.set_input_method(InputMethod::Manual);
    app.manual_text.set("text".to_string());
    assert!(app.submit().is_some());
    assert!(app.error.is_none());
    app.set_error("HTTP 500");
    assert_eq!(app.error.as_deref(), Some(ANALYZE_FAILED));
}

#[test]
fn test_no_report_without_analysis() {
    let app = app();
    assert_eq!(app.report(), None);
    assert!(!app.copied());
}

#[test]
fn test_copied_marker() {
    let mut app = app();
    app.mark_copied();
    assert!(app.copied());
}

#[test]
fn test_copied_marker_expires() {
    let mut app = app();
    app.mark_copied();
    app.copied_at = Instant::now().checked_sub(Duration::from_secs(3));
    assert!(app.copied_at.is_some());
    assert!(!app.copied());
}

#[test]
fn test_scroll_stops_at_end_of_results() {
    let mut app = app();
    app.scroll_down();
    assert_eq!(app.result_scroll, 0);

    app.set_analysis(sample());
    for _ in 0..100 {
        app.scroll_down();
    }
    // two points plus seven fixed rows
    assert_eq!(app.result_scroll, 8);

    app.scroll_up();
    assert_eq!(app.result_scroll, 7);
}

#[test]
fn test_toggle_dark() {
    let mut app = app();
    app.toggle_dark();
    assert_eq!(app.theme_kind, ThemeKind::Light);
    app.toggle_dark();
    assert_eq!(app.theme_kind, ThemeKind::Dark);

    app.set_theme(ThemeKind::Paper);
    app.toggle_dark();
    assert_eq!(app.theme_kind, ThemeKind::Dark);
}

#[test]
fn test_keys() {
    let mut app = app();

    assert_eq!(handle_key(&mut app, key(KeyCode::Tab)), Action::None);
    assert_eq!(app.input_method, InputMethod::Manual);

    handle_key(&mut app, key(KeyCode::Char('i')));
    assert_eq!(app.mode, Mode::Insert);

    for c in "hi".chars() {
        handle_key(&mut app, key(KeyCode::Char(c)));
    }
    handle_key(&mut app, key(KeyCode::Enter));
    handle_key(&mut app, key(KeyCode::Char('x')));
    assert_eq!(app.manual_text.value, "hi\nx");

    let submit = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
    assert_eq!(
        handle_key(&mut app, submit),
        Action::Submit(Submission::Text("hi\nx".to_string()))
    );
    assert_eq!(app.mode, Mode::Normal);

    assert_eq!(handle_key(&mut app, key(KeyCode::Char('y'))), Action::CopyReport);
    assert_eq!(handle_key(&mut app, key(KeyCode::Char('q'))), Action::Quit);
}

#[test]
fn test_theme_popup_keys() {
    let mut app = app();
    handle_key(&mut app, key(KeyCode::Char('t')));
    handle_key(&mut app, key(KeyCode::Char('j')));
    handle_key(&mut app, key(KeyCode::Enter));

    assert_eq!(app.theme_kind, ThemeKind::Midnight);
}

#[test]
fn test_text_field_unicode() {
    let mut field = TextField::default();
    for c in "naïve".chars() {
        field.insert_char(c);
    }
    field.move_left();
    field.move_left();
    field.delete_char();
    assert_eq!(field.value, "nave");
    assert_eq!(field.cursor, 2);

    field.move_end();
    field.insert_str("\nok");
    assert_eq!(field.cursor_position(), (1, 2));
}

#[test]
fn test_render_result() {
    let mut app = app();
    app.set_analysis(sample());

    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal.draw(|frame| render(frame, &mut app)).unwrap();

    let screen: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();

    assert!(screen.contains("Medium"));
    assert!(screen.contains("Termination terms are unclear"));
    assert!(screen.contains("Fair terms detected"));
    assert!(screen.contains("Not recommended"));
}

#[test]
fn test_render_very_long_line() {
    let mut app = app();
    app.set_input_method(InputMethod::Manual);
    handle_key(&mut app, key(KeyCode::Char('i')));
    handle_event(&mut app, Event::Paste("x".repeat(70_000)));
    assert_eq!(app.manual_text.cursor_position(), (0, 70_000));

    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal.draw(|frame| render(frame, &mut app)).unwrap();
}

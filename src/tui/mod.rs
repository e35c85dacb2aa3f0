// terminal ui

mod app;
mod event;
mod theme;
mod ui;

pub use app::{ANALYZE_FAILED, App, LogLevel, Mode, Popup, Submission, TextField, UPLOAD_FAILED};
pub use event::{Action, handle_event, handle_key};
pub use theme::{Theme, ThemeKind};
pub use ui::render;

use crossterm::{
    cursor::SetCursorStyle,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, stdout};
use std::time::Duration;

use crate::{Client, Error, PdfUpload};
use event::poll_event;

fn copy_to_clipboard(text: &str) -> bool {
    use std::io::Write;
    use std::process::{Command, Stdio};

    let candidates: [(&str, &[&str]); 4] = [
        ("pbcopy", &[]),
        ("wl-copy", &[]),
        ("xclip", &["-selection", "clipboard"]),
        ("xsel", &["--clipboard", "--input"]),
    ];

    for (program, args) in candidates {
        if let Ok(mut child) = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .spawn()
            && let Some(mut stdin) = child.stdin.take()
            && stdin.write_all(text.as_bytes()).is_ok()
        {
            // close stdin so the tool sees eof
            drop(stdin);
            return child.wait().map(|s| s.success()).unwrap_or(false);
        }
    }

    false
}

fn term_err(e: io::Error) -> Error {
    Error::Terminal(e.to_string())
}

pub async fn run(client: Client) -> Result<(), Error> {
    // ask the terminal for its background before raw mode takes over input
    let theme = theme::detect_theme();

    // setup terminal
    enable_raw_mode().map_err(term_err)?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste).map_err(term_err)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(term_err)?;

    let result = run_app(&mut terminal, &client, theme).await;

    // restore terminal
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        SetCursorStyle::DefaultUserShape,
        LeaveAlternateScreen
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: &Client,
    theme: ThemeKind,
) -> Result<(), Error> {
    let mut app = App::with_theme(client.endpoint(), theme);
    let mut last_mode = app.mode;

    loop {
        if app.mode != last_mode {
            let cursor_style = match app.mode {
                Mode::Insert => SetCursorStyle::BlinkingBar,
                Mode::Normal => SetCursorStyle::BlinkingBlock,
            };
            execute!(terminal.backend_mut(), cursor_style).ok();
            last_mode = app.mode;
        }

        terminal
            .draw(|frame| ui::render(frame, &mut app))
            .map_err(term_err)?;

        let Some(event) = poll_event(Duration::from_millis(100)).map_err(term_err)? else {
            continue;
        };

        match handle_event(&mut app, event) {
            Action::Quit => break,
            Action::Submit(submission) => {
                // show the spinner before blocking on the request
                terminal
                    .draw(|frame| ui::render(frame, &mut app))
                    .map_err(term_err)?;

                match send(client, &submission).await {
                    Ok(analysis) => app.set_analysis(analysis),
                    Err(e) => app.set_error(&e.to_string()),
                }
            }
            Action::CopyReport => match app.report() {
                Some(report) => {
                    if copy_to_clipboard(&report) {
                        app.mark_copied();
                        app.log(LogLevel::Ok, "report copied to clipboard".to_string());
                    } else {
                        app.log(LogLevel::Warn, "clipboard not available".to_string());
                    }
                }
                None => app.log(LogLevel::Warn, "no report to copy".to_string()),
            },
            Action::None => {}
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}

async fn send(client: &Client, submission: &Submission) -> Result<crate::Analysis, Error> {
    match submission {
        Submission::Upload(path) => {
            let pdf = PdfUpload::open(path)?;
            client.upload(pdf).await
        }
        Submission::Text(text) => client.analyze_text(text).await,
    }
}

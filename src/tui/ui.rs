// ui rendering

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::InputMethod;
use crate::tui::app::{App, LogLevel, Mode, Popup, TextField};
use crate::tui::theme::ThemeKind;

const SPINNER: &[&str] = &["|", "/", "-", "\\"];

pub fn render(frame: &mut Frame, app: &mut App) {
    let theme = &app.theme;

    frame.render_widget(Clear, frame.area());
    frame.render_widget(Block::default().style(theme.base()), frame.area());

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(3), // input method tabs
            Constraint::Min(8),    // input + results
            Constraint::Length(6), // notifications
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, main[0]);
    render_tabs(frame, app, main[1]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(main[2]);

    render_input(frame, app, content[0]);
    render_results(frame, app, content[1]);
    render_logs(frame, app, main[3]);
    render_footer(frame, app, main[4]);

    if app.popup == Popup::Themes {
        render_theme_popup(frame, app);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .style(theme.base());

    let icon = if app.theme_kind.is_light() { "☾" } else { "☀" };
    let mode = match app.mode {
        Mode::Normal => "normal",
        Mode::Insert => "insert",
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("AgreeWise", theme.title()),
            Span::styled("  ", theme.muted()),
            Span::styled(format!("[d] {icon}"), theme.accent()),
            Span::styled(format!("  theme: {}", app.theme_kind.name()), theme.muted()),
        ]),
        Line::from(vec![
            Span::styled("service: ", theme.muted()),
            Span::styled(app.endpoint.as_str(), theme.base()),
            Span::styled("  | mode: ", theme.muted()),
            Span::styled(mode, theme.accent()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block).style(theme.base()), area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (i, method) in [InputMethod::Upload, InputMethod::Manual].into_iter().enumerate() {
        let active = app.input_method == method;
        let (style, border) = if active {
            (theme.base().bg(theme.accent).fg(theme.bg), theme.accent())
        } else {
            (theme.muted(), theme.border())
        };

        let tab = Paragraph::new(Line::styled(
            format!("[{}] {}", i + 1, method.label()),
            style,
        ))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .style(theme.base()),
        );

        frame.render_widget(tab, cols[i]);
    }
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let editing = app.mode == Mode::Insert;

    let title = match app.input_method {
        InputMethod::Upload => " Contract PDF ",
        InputMethod::Manual => " Contract Text ",
    };

    let block = Block::default()
        .title(Span::styled(title, theme.title()))
        .borders(Borders::ALL)
        .border_style(if editing {
            theme.accent()
        } else {
            theme.border()
        })
        .style(theme.base());

    let lines: Vec<Line> = match app.input_method {
        InputMethod::Upload => {
            let mut lines = vec![
                Line::from(""),
                Line::styled("Drag & drop your contract here,", theme.base())
                    .alignment(Alignment::Center),
                Line::styled("or press 'i' and type its path", theme.base())
                    .alignment(Alignment::Center),
                Line::styled("Supports PDF files", theme.muted()).alignment(Alignment::Center),
                Line::from(""),
            ];
            let path = if app.file_path.value.is_empty() && !editing {
                Line::styled("no file selected", theme.muted())
            } else {
                Line::from(vec![
                    Span::styled("file: ", theme.muted()),
                    Span::styled(app.file_path.value.as_str(), theme.accent()),
                ])
            };
            lines.push(path);
            lines
        }
        InputMethod::Manual => {
            if app.manual_text.value.is_empty() && !editing {
                vec![Line::styled(
                    "Paste your contract text here... (press 'i' to type)",
                    theme.muted(),
                )]
            } else {
                app.manual_text
                    .value
                    .split('\n')
                    .map(|l| Line::styled(l.to_string(), theme.base()))
                    .collect()
            }
        }
    };

    // no wrap for text so the terminal cursor lines up with what is typed
    let mut paragraph = Paragraph::new(lines).block(block).style(theme.base());
    let inner = area.inner(Margin {
        horizontal: 1,
        vertical: 1,
    });

    if editing {
        let (origin, field) = match app.input_method {
            // path sits on the last line of the drop zone
            InputMethod::Upload => ((inner.x + 6, inner.y + 5), &app.file_path),
            InputMethod::Manual => ((inner.x, inner.y), &app.manual_text),
        };
        let (scroll, x, y) = cursor_cell(field, origin, inner);
        paragraph = paragraph.scroll((scroll, 0));
        if x < inner.right() && y < inner.bottom() {
            frame.set_cursor_position((x, y));
        }
    } else if app.input_method == InputMethod::Upload {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }

    frame.render_widget(paragraph, area);
}

// where the terminal cursor goes, scrolling long text so it stays visible
fn cursor_cell(field: &TextField, origin: (u16, u16), inner: Rect) -> (u16, u16, u16) {
    let (line, col) = field.cursor_position();
    let line = cell(line);
    let visible = inner.bottom().saturating_sub(origin.1).max(1);
    let scroll = line.saturating_sub(visible - 1);
    (
        scroll,
        origin.0.saturating_add(cell(col)),
        origin.1.saturating_add(line - scroll),
    )
}

// pasted text can be far wider or longer than any terminal
fn cell(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let copy_hint = if app.copied() { " [✓] " } else { " [y] copy " };

    let block = Block::default()
        .title(Span::styled(" Analysis Results ", theme.title()))
        .title_top(Line::styled(copy_hint, theme.accent()).right_aligned())
        .borders(Borders::ALL)
        .border_style(theme.border())
        .style(theme.base());

    let mut lines: Vec<Line> = Vec::new();

    if app.loading {
        let tick = (chrono::Local::now().timestamp_millis() / 150) as usize % SPINNER.len();
        lines.push(Line::from(""));
        lines.push(
            Line::styled(format!("{} analyzing contract...", SPINNER[tick]), theme.accent())
                .alignment(Alignment::Center),
        );
    } else {
        if let Some(err) = &app.error {
            lines.push(Line::styled(err.as_str(), theme.error()));
            lines.push(Line::from(""));
        }

        match &app.analysis {
            Some(analysis) => {
                lines.push(Line::styled("Risk Level", theme.muted()));
                lines.push(Line::styled(
                    format!(" {} ", analysis.risk_score.label()),
                    theme.risk(analysis.risk_score).add_modifier(Modifier::REVERSED),
                ));
                lines.push(Line::from(""));

                lines.push(Line::styled("Crucial Points", theme.muted()));
                for point in &analysis.crucial_points {
                    lines.push(Line::from(vec![
                        Span::styled(" • ", theme.accent()),
                        Span::styled(point.as_str(), theme.base()),
                    ]));
                }
                lines.push(Line::from(""));

                lines.push(Line::styled("Final Verdict", theme.muted()));
                let (mark, style) = if analysis.verdict {
                    ("✓", theme.success())
                } else {
                    ("✗", theme.error())
                };
                lines.push(Line::styled(
                    format!("{mark} {}", analysis.verdict_label()),
                    style.add_modifier(Modifier::BOLD),
                ));
            }
            None if app.error.is_none() => {
                lines.push(Line::styled(
                    "submit a contract to see its risk report",
                    theme.muted(),
                ));
            }
            None => {}
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(theme.base())
        .wrap(Wrap { trim: false })
        .scroll((cell(app.result_scroll), 0));

    frame.render_widget(paragraph, area);
}

fn render_logs(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .title(Span::styled(" Notifications ", theme.title()))
        .borders(Borders::ALL)
        .border_style(theme.border())
        .style(theme.base());

    let lines: Vec<Line> = app
        .logs
        .iter()
        .map(|entry| {
            let (prefix, style) = match entry.level {
                LogLevel::Ok => ("[OK]", theme.success()),
                LogLevel::Info => ("[--]", theme.muted()),
                LogLevel::Warn => ("[!!]", theme.warning()),
                LogLevel::Error => ("[ERR]", theme.error()),
            };
            Line::from(vec![
                Span::styled(format!("{} ", entry.time), theme.muted()),
                Span::styled(format!("{prefix} "), style),
                Span::styled(entry.message.as_str(), theme.base()),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(theme.base())
        .scroll((cell(app.log_scroll), 0));

    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let submit_hint = match (app.mode, app.input_method) {
        (Mode::Insert, InputMethod::Manual) => " C-s ",
        _ => " Enter ",
    };

    let parts = vec![
        Span::styled(submit_hint, theme.base().bg(theme.accent).fg(theme.bg)),
        Span::styled(" Analyze ", theme.muted()),
        Span::styled("| ", theme.border()),
        Span::styled("Tab ", theme.accent()),
        Span::styled("Input ", theme.muted()),
        Span::styled("| ", theme.border()),
        Span::styled("i ", theme.accent()),
        Span::styled("Edit ", theme.muted()),
        Span::styled("| ", theme.border()),
        Span::styled("y ", theme.accent()),
        Span::styled("Copy ", theme.muted()),
        Span::styled("| ", theme.border()),
        Span::styled("d ", theme.accent()),
        Span::styled("Dark/Light ", theme.muted()),
        Span::styled("| ", theme.border()),
        Span::styled("t ", theme.accent()),
        Span::styled("Theme ", theme.muted()),
        Span::styled("| ", theme.border()),
        Span::styled("q ", theme.accent()),
        Span::styled("Quit ", theme.muted()),
    ];

    let paragraph = Paragraph::new(Line::from(parts))
        .style(theme.base())
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_theme_popup(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(36, 50, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(" select theme ", theme.title()))
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .style(theme.base());

    let lines: Vec<Line> = ThemeKind::ALL
        .iter()
        .enumerate()
        .map(|(i, &kind)| {
            if i == app.theme_scroll {
                Line::from(vec![
                    Span::styled(" > ", theme.accent()),
                    Span::styled(kind.name(), theme.selected()),
                ])
            } else {
                Line::from(vec![
                    Span::raw("   "),
                    Span::styled(kind.name(), theme.base()),
                ])
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block).style(theme.base()), area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

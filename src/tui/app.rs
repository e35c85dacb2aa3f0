// app state for the tui

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::tui::theme::{Theme, ThemeKind};
use crate::{Analysis, InputMethod, ensure_pdf, ensure_text, parse_dropped_path};

const COPIED_FOR: Duration = Duration::from_secs(2);

pub const UPLOAD_FAILED: &str = "Error uploading file. Please try again.";
pub const ANALYZE_FAILED: &str = "Error analyzing text. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Themes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Ok,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub time: String,
    pub message: String,
}

/// What the event loop should send to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Upload(PathBuf),
    Text(String),
}

/// Single or multi line input with a cursor counted in chars.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub value: String,
    pub cursor: usize,
}

impl TextField {
    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_index(self.cursor);
        self.value.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn set(&mut self, value: String) {
        self.value = value;
        self.move_end();
    }

    /// (line, column) of the cursor, for placing the terminal cursor.
    pub fn cursor_position(&self) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in self.value.chars().take(self.cursor) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }
}

pub struct App {
    pub running: bool,
    pub mode: Mode,
    pub popup: Popup,
    pub theme_kind: ThemeKind,
    pub theme: Theme,
    pub endpoint: String,

    // input
    pub input_method: InputMethod,
    pub file_path: TextField,
    pub manual_text: TextField,

    // request state
    pub loading: bool,
    pub pending: Option<InputMethod>,
    pub analysis: Option<Analysis>,
    pub error: Option<String>,
    pub copied_at: Option<Instant>,

    // notifications
    pub logs: Vec<LogEntry>,

    // scroll
    pub result_scroll: usize,
    pub log_scroll: usize,
    pub theme_scroll: usize,
}

impl App {
    pub fn with_theme(endpoint: &str, theme_kind: ThemeKind) -> Self {
        let mut app = Self {
            running: true,
            mode: Mode::Normal,
            popup: Popup::None,
            theme_kind,
            theme: Theme::from_kind(theme_kind),
            endpoint: endpoint.to_string(),
            input_method: InputMethod::default(),
            file_path: TextField::default(),
            manual_text: TextField::default(),
            loading: false,
            pending: None,
            analysis: None,
            error: None,
            copied_at: None,
            logs: Vec::new(),
            result_scroll: 0,
            log_scroll: 0,
            theme_scroll: theme_kind.index(),
        };

        app.log(LogLevel::Info, format!("service: {endpoint}"));
        app
    }

    pub fn log(&mut self, level: LogLevel, message: String) {
        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        self.logs.push(LogEntry {
            level,
            time,
            message,
        });
        // keep the newest entries in view
        self.log_scroll = self.logs.len().saturating_sub(4);
    }

    // input method

    pub fn set_input_method(&mut self, method: InputMethod) {
        if self.input_method != method {
            self.input_method = method;
            self.mode = Mode::Normal;
        }
    }

    pub fn toggle_input_method(&mut self) {
        self.set_input_method(self.input_method.toggle());
    }

    pub fn active_field_mut(&mut self) -> &mut TextField {
        match self.input_method {
            InputMethod::Upload => &mut self.file_path,
            InputMethod::Manual => &mut self.manual_text,
        }
    }

    pub fn enter_insert(&mut self) {
        self.mode = Mode::Insert;
    }

    pub fn exit_insert(&mut self) {
        self.mode = Mode::Normal;
    }

    /// Newlines only make sense in the contract text.
    pub fn insert_newline(&mut self) {
        if self.input_method == InputMethod::Manual {
            self.manual_text.insert_char('\n');
        }
    }

    // submitting

    /// Validates the active input. Nothing is returned, and so nothing is
    /// sent, unless it passes.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.loading {
            return None;
        }

        match self.input_method {
            InputMethod::Upload => {
                let path = parse_dropped_path(&self.file_path.value);
                self.submit_file(path)
            }
            InputMethod::Manual => {
                if ensure_text(&self.manual_text.value).is_err() {
                    self.log(LogLevel::Error, "Please enter contract text".to_string());
                    return None;
                }
                self.start(InputMethod::Manual);
                Some(Submission::Text(self.manual_text.value.clone()))
            }
        }
    }

    /// A pasted string. In upload mode that is a dropped file and is
    /// submitted straight away, in manual mode it is just text.
    pub fn paste(&mut self, data: &str) -> Option<Submission> {
        match self.input_method {
            InputMethod::Upload => {
                let path = parse_dropped_path(data);
                self.file_path.set(path.display().to_string());
                self.submit_file(path)
            }
            InputMethod::Manual => {
                self.manual_text.insert_str(data);
                None
            }
        }
    }

    fn submit_file(&mut self, path: PathBuf) -> Option<Submission> {
        if self.loading {
            return None;
        }
        if is_blank(&path) || ensure_pdf(&path).is_err() {
            self.log(LogLevel::Error, "Please upload a PDF file".to_string());
            return None;
        }
        self.start(InputMethod::Upload);
        Some(Submission::Upload(path))
    }

    fn start(&mut self, method: InputMethod) {
        self.loading = true;
        self.pending = Some(method);
        self.error = None;
        self.mode = Mode::Normal;
    }

    pub fn set_analysis(&mut self, analysis: Analysis) {
        self.loading = false;
        self.pending = None;
        self.error = None;
        self.result_scroll = 0;
        self.log(
            LogLevel::Ok,
            format!("analysis complete (risk: {})", analysis.risk_score.label()),
        );
        self.analysis = Some(analysis);
    }

    /// Any failure gets the same message; the detail only goes to the log file.
    pub fn set_error(&mut self, detail: &str) {
        let message = match self.pending.take() {
            Some(InputMethod::Upload) => UPLOAD_FAILED,
            _ => ANALYZE_FAILED,
        };
        tracing::error!("{detail}");
        self.loading = false;
        self.error = Some(message.to_string());
        self.log(LogLevel::Error, message.to_string());
    }

    // report export

    pub fn report(&self) -> Option<String> {
        self.analysis.as_ref().map(Analysis::report)
    }

    pub fn mark_copied(&mut self) {
        self.copied_at = Some(Instant::now());
    }

    pub fn copied(&self) -> bool {
        self.copied_at.is_some_and(|t| t.elapsed() < COPIED_FOR)
    }

    // themes

    pub fn set_theme(&mut self, kind: ThemeKind) {
        self.theme_kind = kind;
        self.theme = Theme::from_kind(kind);
        self.theme_scroll = kind.index();
    }

    pub fn toggle_dark(&mut self) {
        self.set_theme(self.theme_kind.toggled());
    }

    pub fn open_theme_popup(&mut self) {
        self.popup = Popup::Themes;
        self.theme_scroll = self.theme_kind.index();
    }

    pub fn close_popup(&mut self) {
        self.popup = Popup::None;
    }

    pub fn theme_scroll_up(&mut self) {
        if self.theme_scroll > 0 {
            self.theme_scroll -= 1;
            self.set_theme(ThemeKind::ALL[self.theme_scroll]);
        }
    }

    pub fn theme_scroll_down(&mut self) {
        if self.theme_scroll < ThemeKind::ALL.len() - 1 {
            self.theme_scroll += 1;
            self.set_theme(ThemeKind::ALL[self.theme_scroll]);
        }
    }

    pub fn select_theme(&mut self) {
        self.set_theme(ThemeKind::ALL[self.theme_scroll]);
        self.close_popup();
    }

    // scrolling

    pub fn scroll_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.result_scroll + 1 < self.result_lines() {
            self.result_scroll += 1;
        }
    }

    // rows of the results card before wrapping
    fn result_lines(&self) -> usize {
        let error = if self.error.is_some() { 2 } else { 0 };
        let analysis = self
            .analysis
            .as_ref()
            .map_or(0, |a| a.crucial_points.len() + 7);
        error + analysis
    }

    pub fn scroll_logs_up(&mut self) {
        self.log_scroll = self.log_scroll.saturating_sub(1);
    }

    pub fn scroll_logs_down(&mut self) {
        if self.log_scroll + 1 < self.logs.len() {
            self.log_scroll += 1;
        }
    }
}

fn is_blank(path: &Path) -> bool {
    path.as_os_str().is_empty()
}

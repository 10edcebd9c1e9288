use std::{
    io, thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use locsync_core::{
    config::AppConfig,
    error::SyncError,
    scaffold::{self, ScaffoldReport, ScenesMigration},
    sync::{SyncEvent, SyncReport, TableSync},
    table::JsonTableStore,
};

const TICK_RATE: Duration = Duration::from_millis(250);
const MAX_URL_LEN: usize = 512;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    success: Color,
    warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Menu,
    Sync,
    Scaffold,
}

enum AppEvent {
    Input(Event),
    Tick,
}

#[derive(Debug, Clone)]
struct UrlEditor {
    input: String,
    cursor: usize,
}

impl UrlEditor {
    fn new(current: &str) -> Self {
        Self {
            input: current.to_string(),
            cursor: current.len(),
        }
    }

    // The cursor is a byte index kept on a char boundary; the seed URL from
    // the config file may contain multibyte characters.
    fn move_cursor(&mut self, delta: isize) {
        if delta < 0 {
            for _ in 0..delta.unsigned_abs() {
                match self.input[..self.cursor].char_indices().next_back() {
                    Some((idx, _)) => self.cursor = idx,
                    None => break,
                }
            }
        } else {
            for _ in 0..delta as usize {
                match self.input[self.cursor..].chars().next() {
                    Some(ch) => self.cursor += ch.len_utf8(),
                    None => break,
                }
            }
        }
    }

    fn move_home(&mut self) {
        self.cursor = 0;
    }

    fn move_end(&mut self) {
        self.cursor = self.input.len();
    }

    fn insert(&mut self, ch: char) {
        if self.input.len() >= MAX_URL_LEN {
            return;
        }
        if ch.is_ascii() && !ch.is_ascii_control() {
            self.input.insert(self.cursor, ch);
            self.cursor += ch.len_utf8();
        }
    }

    fn backspace(&mut self) {
        if let Some((idx, _)) = self.input[..self.cursor].char_indices().next_back() {
            self.input.remove(idx);
            self.cursor = idx;
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.input.len() {
            self.input.remove(self.cursor);
        }
    }

    fn value(&self) -> String {
        self.input.trim().to_string()
    }
}

/// High-level application state for the terminal frontend.
pub struct LocsyncApp {
    config: AppConfig,
    state: UiState,
    screen: Screen,
    sync_rx: Option<mpsc::Receiver<SyncEvent>>,
    sync_cancel: Option<CancellationToken>,
    sync_started: Option<Instant>,
    table_keys: Option<usize>,
    last_report: Option<SyncReport>,
    last_scaffold: Option<ScaffoldReport>,
    scaffold_rows: Vec<(String, bool)>,
    url_editor: Option<UrlEditor>,
    theme: Theme,
}

impl LocsyncApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            state: UiState::default(),
            screen: Screen::Menu,
            sync_rx: None,
            sync_cancel: None,
            sync_started: None,
            table_keys: None,
            last_report: None,
            last_scaffold: None,
            scaffold_rows: Vec::new(),
            url_editor: None,
            theme: Theme::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.refresh_table_info();
        self.refresh_scaffold_rows();

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        let mut sync_rx: Option<mpsc::Receiver<SyncEvent>> = None;

        loop {
            if let Some(rx) = self.sync_rx.take() {
                sync_rx = Some(rx);
            }

            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }

            if sync_rx.is_some() {
                let mut sync_closed = false;
                let rx = sync_rx.as_mut().unwrap();
                tokio::select! {
                    maybe_event = event_rx.recv() => {
                        if !self.process_app_event(maybe_event) {
                            break;
                        }
                    }
                    maybe_sync = rx.recv() => {
                        match maybe_sync {
                            Some(event) => self.handle_sync_event(event),
                            None => sync_closed = true,
                        }
                    }
                }
                if sync_closed {
                    sync_rx = None;
                    self.sync_cancel = None;
                    self.sync_started = None;
                }
            } else {
                let maybe_event = event_rx.recv().await;
                if !self.process_app_event(maybe_event) {
                    break;
                }
            }

            if self.state.should_quit {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        Ok(())
    }

    fn refresh_table_info(&mut self) {
        self.table_keys = JsonTableStore::load(&self.config.sync.table_path)
            .map(|store| store.len())
            .ok();
    }

    fn refresh_scaffold_rows(&mut self) {
        let settings = &self.config.scaffold;
        let root = settings.base_dir.join(&settings.root);
        let mut rows = Vec::new();
        rows.push((settings.root.clone(), root.is_dir()));
        for folder in &settings.folders {
            rows.push((
                format!("{}/{}", settings.root, folder),
                root.join(folder).is_dir(),
            ));
        }
        rows.push((
            format!("{}/{}", settings.root, settings.legacy_scenes),
            root.join(&settings.legacy_scenes).is_dir(),
        ));
        self.scaffold_rows = rows;
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                if self.url_editor.is_some() {
                    if let Event::Key(key) = event {
                        self.handle_url_editor_key(key);
                    }
                } else if let Err(err) = self.handle_input(event) {
                    self.state.set_status(format!("Error: {err}"));
                }
                true
            }
            Some(AppEvent::Tick) => {
                self.handle_tick();
                true
            }
            None => false,
        }
    }

    fn handle_tick(&mut self) {
        if let Some(started) = self.sync_started {
            self.state
                .set_status(format!("Syncing… {}s", started.elapsed().as_secs()));
        }
    }

    fn handle_sync_event(&mut self, event: SyncEvent) {
        self.sync_cancel = None;
        self.sync_started = None;
        match event {
            SyncEvent::Success { report } => {
                info!(
                    added = report.added,
                    updated = report.updated,
                    removed = report.removed_keys.len(),
                    "Sync succeeded"
                );
                self.table_keys = Some(report.table_len);
                self.state
                    .set_status(format!("Sync complete: {}", report.summary()));
                self.last_report = Some(report);
            }
            SyncEvent::Error(SyncError::Cancelled) => {
                info!("Sync cancelled");
                self.state.set_status("Sync cancelled".to_string());
            }
            SyncEvent::Error(err) => {
                error!(?err, "Background sync failed");
                self.state.set_status(format!("Sync failed: {err}"));
            }
        }
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        match self.screen {
            Screen::Menu => self.handle_menu_event(event),
            Screen::Sync => self.handle_sync_screen_event(event),
            Screen::Scaffold => self.handle_scaffold_event(event),
        }
        Ok(())
    }

    fn handle_menu_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            match key.code {
                KeyCode::Esc => {
                    self.state.should_quit = true;
                }
                KeyCode::Char('q') | KeyCode::Char('Q') if key.modifiers.is_empty() => {
                    self.state.should_quit = true;
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    self.state.move_menu_cursor(1, MENU_ITEMS.len());
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.state.move_menu_cursor(-1, MENU_ITEMS.len());
                }
                KeyCode::Enter => match self.state.menu_cursor {
                    0 => {
                        self.screen = Screen::Sync;
                        self.refresh_table_info();
                        self.state
                            .set_status("Press s to sync the translation table".to_string());
                    }
                    1 => {
                        self.screen = Screen::Scaffold;
                        self.refresh_scaffold_rows();
                        self.state
                            .set_status("Press Enter to create the project folders".to_string());
                    }
                    2 => {
                        self.state.should_quit = true;
                    }
                    _ => {}
                },
                _ => {}
            }
        }
    }

    fn handle_sync_screen_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            match key.code {
                KeyCode::Esc => {
                    if self.sync_cancel.is_some() {
                        self.cancel_sync();
                    } else {
                        self.screen = Screen::Menu;
                        self.state.set_status("Returned to main menu".to_string());
                    }
                }
                KeyCode::Char('q') | KeyCode::Char('Q') if key.modifiers.is_empty() => {
                    self.state.should_quit = true;
                }
                KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => {
                    self.trigger_sync();
                }
                KeyCode::Char('e') | KeyCode::Char('E') => {
                    self.url_editor = Some(UrlEditor::new(&self.config.sync.sheet_url));
                    self.state.set_status("Editing sheet URL".to_string());
                }
                _ => {}
            }
        }
    }

    fn handle_scaffold_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            match key.code {
                KeyCode::Esc => {
                    self.screen = Screen::Menu;
                    self.state.set_status("Returned to main menu".to_string());
                }
                KeyCode::Char('q') | KeyCode::Char('Q') if key.modifiers.is_empty() => {
                    self.state.should_quit = true;
                }
                KeyCode::Enter => {
                    self.run_scaffold();
                }
                _ => {}
            }
        }
    }

    fn handle_url_editor_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.url_editor = None;
                self.state.set_status("URL edit cancelled".to_string());
            }
            KeyCode::Enter => self.commit_url_edit(),
            code => {
                if let Some(editor) = self.url_editor.as_mut() {
                    match code {
                        KeyCode::Left => editor.move_cursor(-1),
                        KeyCode::Right => editor.move_cursor(1),
                        KeyCode::Home => editor.move_home(),
                        KeyCode::End => editor.move_end(),
                        KeyCode::Backspace => editor.backspace(),
                        KeyCode::Delete => editor.delete(),
                        KeyCode::Char(ch) => editor.insert(ch),
                        _ => {}
                    }
                }
            }
        }
    }

    fn commit_url_edit(&mut self) {
        let Some(editor) = self.url_editor.take() else {
            return;
        };
        let value = editor.value();
        if value.is_empty() {
            self.state
                .set_status("URL unchanged (empty input)".to_string());
            return;
        }
        self.config.sync.sheet_url = value;
        match self.config.save() {
            Ok(()) => self.state.set_status("Sheet URL updated".to_string()),
            Err(err) => {
                error!(?err, "Failed to persist configuration");
                self.state
                    .set_status(format!("URL set for this session; save failed: {err}"));
            }
        }
    }

    fn trigger_sync(&mut self) {
        if self.sync_cancel.is_some() {
            self.state.set_status("Sync already running".to_string());
            return;
        }
        let url = self.config.sync.sheet_url.trim().to_string();
        if url.is_empty() {
            self.state.set_status("Set a sheet URL first".to_string());
            return;
        }

        let store = match JsonTableStore::load(&self.config.sync.table_path) {
            Ok(store) => store,
            Err(err) => {
                error!(?err, "Failed to open table");
                self.state.set_status(format!("Failed to open table: {err}"));
                return;
            }
        };

        let engine = TableSync::new(
            url,
            Duration::from_secs(self.config.sync.timeout_secs),
            store,
        );
        let token = CancellationToken::new();
        let (sync_tx, sync_rx) = mpsc::channel(8);
        self.sync_rx = Some(sync_rx);
        self.sync_cancel = Some(token.clone());
        self.sync_started = Some(Instant::now());

        tokio::spawn(async move {
            if let Err(err) = engine.run(sync_tx, token).await {
                error!("Sync task error: {err}");
            }
        });
        self.state.set_status("Sync started…".to_string());
    }

    fn cancel_sync(&mut self) {
        if let Some(token) = &self.sync_cancel {
            token.cancel();
            self.state.set_status("Cancelling sync…".to_string());
        }
    }

    fn run_scaffold(&mut self) {
        match scaffold::apply(&self.config.scaffold) {
            Ok(report) => {
                self.state
                    .set_status(format!("Scaffold complete: {}", report.summary()));
                self.last_scaffold = Some(report);
            }
            Err(err) => {
                error!(?err, "Scaffold failed");
                self.state.set_status(format!("Scaffold failed: {err}"));
            }
        }
        self.refresh_scaffold_rows();
    }

    fn draw(&mut self, frame: &mut Frame) {
        match self.screen {
            Screen::Menu => self.draw_menu(frame),
            Screen::Sync => self.draw_sync(frame),
            Screen::Scaffold => self.draw_scaffold(frame),
        }
        if let Some(editor) = &self.url_editor {
            self.render_url_editor(frame, editor);
        }
    }

    fn draw_menu(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(3)])
            .split(area);

        let banner = Paragraph::new(vec![
            Line::from(Span::styled(
                "locsync",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Localisation table synchroniser",
                Style::default().fg(self.theme.muted),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(banner, layout[0]);

        let menu_height = (MENU_ITEMS.len() as u16)
            .saturating_mul(2)
            .saturating_add(2)
            .min(layout[1].height);
        let menu_width = 30.min(layout[1].width.max(1));
        let menu_area = centered_rect(menu_width, menu_height, layout[1]);

        let menu_lines: Vec<Line> = MENU_ITEMS
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                if idx == self.state.menu_cursor {
                    Line::from(Span::styled(
                        format!("▶ {item}"),
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("  {item}"),
                        Style::default().fg(self.theme.primary_fg),
                    ))
                }
            })
            .collect();

        let menu = Paragraph::new(menu_lines)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .alignment(Alignment::Center);
        frame.render_widget(menu, menu_area);
    }

    fn draw_sync(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        self.render_sync_info(frame, chunks[0]);
        self.render_sync_report(frame, chunks[1]);
        self.render_status(frame, chunks[2]);
    }

    fn render_sync_info(&self, frame: &mut Frame, area: Rect) {
        let label = Style::default().fg(self.theme.muted);
        let value = Style::default().fg(self.theme.primary_fg);

        let table_line = match self.table_keys {
            Some(keys) => format!(
                "{} ({keys} keys)",
                self.config.sync.table_path.display()
            ),
            None => format!("{} (unreadable)", self.config.sync.table_path.display()),
        };
        let state_line = if let Some(started) = self.sync_started {
            Line::from(Span::styled(
                format!("Syncing… {}s", started.elapsed().as_secs()),
                Style::default().fg(self.theme.warning),
            ))
        } else {
            Line::from(Span::styled("Idle", Style::default().fg(self.theme.success)))
        };

        let lines = vec![
            Line::from(vec![
                Span::styled("URL      ", label),
                Span::styled(self.config.sync.sheet_url.clone(), value),
            ]),
            Line::from(vec![
                Span::styled("Table    ", label),
                Span::styled(table_line, value),
            ]),
            Line::from(vec![
                Span::styled("Timeout  ", label),
                Span::styled(format!("{}s", self.config.sync.timeout_secs), value),
            ]),
            state_line,
        ];

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Sheet Sync"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_sync_report(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Last Sync");
        let lines = match &self.last_report {
            Some(report) => vec![
                Line::from(format!(
                    "Finished {} ({:.1}s)",
                    report
                        .finished_at
                        .with_timezone(&Local)
                        .format("%Y-%m-%d %H:%M:%S"),
                    report.duration.as_secs_f64()
                )),
                Line::from(format!("Added      {}", report.added)),
                Line::from(format!("Updated    {}", report.updated)),
                Line::from(removed_summary(&report.removed_keys)),
                Line::from(format!("Unchanged  {}", report.unchanged)),
                Line::from(format!("Skipped    {}", report.skipped)),
                Line::from(format!("Table keys {}", report.table_len)),
            ],
            None => vec![Line::from(Span::styled(
                "No sync run yet",
                Style::default().fg(self.theme.muted),
            ))],
        };
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn draw_scaffold(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(area);

        let mut lines: Vec<Line> = self
            .scaffold_rows
            .iter()
            .map(|(name, exists)| {
                let marker = if *exists {
                    Span::styled("✔ ", Style::default().fg(self.theme.success))
                } else {
                    Span::styled("· ", Style::default().fg(self.theme.muted))
                };
                Line::from(vec![
                    marker,
                    Span::styled(name.clone(), Style::default().fg(self.theme.primary_fg)),
                ])
            })
            .collect();

        if let Some(report) = &self.last_scaffold {
            lines.push(Line::from(""));
            let migration = match &report.migration {
                ScenesMigration::LegacyAbsent => "No legacy scenes directory found".to_string(),
                ScenesMigration::MovedDirectory => {
                    "Legacy scenes directory moved into the project root".to_string()
                }
                ScenesMigration::MergedFiles {
                    moved,
                    legacy_removed,
                } => {
                    if *legacy_removed {
                        format!("Merged {moved} scene files; legacy directory removed")
                    } else {
                        format!("Merged {moved} scene files; legacy directory kept")
                    }
                }
            };
            lines.push(Line::from(Span::styled(
                migration,
                Style::default().fg(self.theme.muted),
            )));
        }

        let title = format!(
            "Project Folders ({})",
            self.config.scaffold.base_dir.display()
        );
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, chunks[0]);
        self.render_status(frame, chunks[1]);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let hints = match self.screen {
            Screen::Menu => "j/k move  Enter select  q quit",
            Screen::Sync => "s sync  e edit URL  Esc back/cancel  q quit",
            Screen::Scaffold => "Enter run  Esc back  q quit",
        };
        let paragraph = Paragraph::new(vec![
            Line::from(self.state.status.clone()),
            Line::from(Span::styled(hints, Style::default().fg(self.theme.muted))),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_url_editor(&self, frame: &mut Frame, editor: &UrlEditor) {
        let frame_area = frame.size();
        let width = 70.min(frame_area.width.saturating_sub(4)).max(24);
        let height = 7_u16.min(frame_area.height.saturating_sub(2)).max(5);
        let area = centered_rect(width, height, frame_area);

        frame.render_widget(Clear, area);

        let input_line = Line::from(vec![
            Span::styled("> ", Style::default().fg(self.theme.accent)),
            Span::raw(editor.input.clone()),
        ]);
        let helper = Line::from(vec![
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" save  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" cancel"),
        ]);

        let paragraph = Paragraph::new(vec![
            Line::from("CSV export URL"),
            input_line,
            Line::from(""),
            helper,
        ])
        .block(Block::default().borders(Borders::ALL).title("Edit Sheet URL"))
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);

        let cursor_cols = editor.input[..editor.cursor].chars().count() as u16;
        let cursor_x =
            (area.x + 2 + cursor_cols).min(area.x + area.width.saturating_sub(2));
        let cursor_y = area.y + 1;
        frame.set_cursor(cursor_x, cursor_y);
    }
}

const MENU_ITEMS: [&str; 3] = ["Sync Table", "Scaffold Project", "Quit"];

struct UiState {
    status: String,
    should_quit: bool,
    menu_cursor: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
            should_quit: false,
            menu_cursor: 0,
        }
    }
}

impl UiState {
    fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    fn move_menu_cursor(&mut self, delta: isize, total: usize) {
        if total == 0 {
            return;
        }
        let len = total as isize;
        let mut next = self.menu_cursor as isize + delta;
        if next < 0 {
            next = 0;
        } else if next >= len {
            next = len - 1;
        }
        self.menu_cursor = next as usize;
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

fn removed_summary(keys: &[String]) -> String {
    if keys.is_empty() {
        return "Removed    0".to_string();
    }
    let shown: Vec<&str> = keys.iter().take(5).map(String::as_str).collect();
    let suffix = if keys.len() > shown.len() { ", …" } else { "" };
    format!("Removed    {} ({}{suffix})", keys.len(), shown.join(", "))
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The chat shell: transcript viewport, input line, sidebar, setup manager.
//! Every frame re-renders the transcript through the markdown pipeline; the
//! streaming task only ever touches the shared transcript snapshots.

use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::warn;

use crate::backend::{
    attach, prompt, ChatSession, GeminiClient, BackendError,
};
use crate::markdown::{parse_transcript_markup, InlineRun, LineBlock, RenderedBlock};
use crate::model::{CameraSetup, ConversationMessage, InlineImage, MessageRole, SetupFields};
use crate::render::{render_schematic, SchematicRender};
use crate::store::DataFolder;
use crate::stream::{drive_turn, MergeOutcome, Transcript};

mod theme;

use theme::TuiTheme;

const BUSY_TEXT: &str = "Accessing technical database...";
const IMAGE_PLACEHOLDER_TEXT: &str = "Analyzed provided image.";
const TOAST_TTL: Duration = Duration::from_secs(4);
const SIDEBAR_WIDTH: u16 = 32;

/// Runs the interactive chat shell until the user quits.
///
/// Streaming turns are spawned onto `handle`; the shell itself blocks its
/// thread on crossterm events at a 250 ms cadence.
pub fn run(
    client: GeminiClient,
    data: DataFolder,
    handle: tokio::runtime::Handle,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(client, data, handle);

    while !app.should_quit {
        app.expire_toast();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Input,
    Sidebar,
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

struct App {
    client: GeminiClient,
    data: DataFolder,
    handle: tokio::runtime::Handle,
    theme: TuiTheme,

    transcript: Arc<Mutex<Transcript>>,
    session: Arc<tokio::sync::Mutex<ChatSession>>,
    busy: Arc<AtomicBool>,

    input: InputLine,
    attach_prompt: bool,
    pending_image: Option<InlineImage>,
    pending_image_name: Option<String>,

    focus: Focus,
    sidebar_index: usize,
    recent: Vec<String>,
    setups: Vec<CameraSetup>,
    form: Option<SetupForm>,

    scroll: u16,
    follow: bool,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(client: GeminiClient, data: DataFolder, handle: tokio::runtime::Handle) -> Self {
        let session = Arc::new(tokio::sync::Mutex::new(client.open_session()));
        let recent = data.load_recent_queries();
        let setups = data.load_setups();

        Self {
            client,
            data,
            handle,
            theme: TuiTheme,
            transcript: Arc::new(Mutex::new(Transcript::default())),
            session,
            busy: Arc::new(AtomicBool::new(false)),
            input: InputLine::default(),
            attach_prompt: false,
            pending_image: None,
            pending_image_name: None,
            focus: Focus::Input,
            sidebar_index: 0,
            recent,
            setups,
            form: None,
            scroll: 0,
            follow: true,
            toast: None,
            should_quit: false,
        }
    }

    fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn expire_toast(&mut self) {
        if let Some(toast) = &self.toast {
            if Instant::now() >= toast.expires_at {
                self.toast = None;
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('r') => {
                    self.reset_session();
                    return;
                }
                KeyCode::Char('s') if self.form.is_none() => {
                    self.form = Some(SetupForm::default());
                    return;
                }
                KeyCode::Char('o') => {
                    self.attach_prompt = !self.attach_prompt;
                    self.input.clear();
                    return;
                }
                KeyCode::Char('e') => {
                    self.follow = true;
                    return;
                }
                _ => {}
            }
        }

        if self.form.is_some() {
            self.handle_form_key(key);
            return;
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Sidebar => self.handle_sidebar_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if self.attach_prompt {
                    self.take_attachment();
                } else {
                    let text = self.input.take();
                    self.send_message(text);
                }
            }
            KeyCode::Esc => {
                if self.attach_prompt {
                    self.attach_prompt = false;
                    self.input.clear();
                } else if self.pending_image.is_some() {
                    self.pending_image = None;
                    self.pending_image_name = None;
                }
            }
            KeyCode::Tab => self.focus = Focus::Sidebar,
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-10),
            KeyCode::PageDown => self.scroll_by(10),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.insert(ch)
            }
            _ => {}
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Esc => self.focus = Focus::Input,
            KeyCode::Up => self.move_sidebar_selection(-1),
            KeyCode::Down => self.move_sidebar_selection(1),
            KeyCode::Enter => self.activate_sidebar_entry(),
            KeyCode::Char('n') => self.form = Some(SetupForm::default()),
            KeyCode::Char('d') => self.delete_selected_setup(),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = &mut self.form else {
            return;
        };

        match key.code {
            KeyCode::Esc => {
                self.form = None;
            }
            KeyCode::Up => form.select_previous(),
            KeyCode::Down | KeyCode::Tab => form.select_next(),
            KeyCode::Left => form.cycle_camera(-1),
            KeyCode::Right => form.cycle_camera(1),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.insert(ch)
            }
            KeyCode::Enter => {
                if let Some(setup) = form.to_setup() {
                    match self.data.add_setup(&setup) {
                        Ok(setups) => {
                            self.setups = setups;
                            self.form = None;
                            self.set_toast(format!("Saved setup \"{}\"", setup.name()));
                        }
                        Err(err) => {
                            warn!(%err, "cannot save setup");
                            self.set_toast("Could not save the setup; see the log");
                        }
                    }
                } else {
                    self.set_toast("Name and camera are required");
                }
            }
            _ => {}
        }
    }

    fn take_attachment(&mut self) {
        let raw = self.input.take();
        let path = PathBuf::from(raw.trim());
        self.attach_prompt = false;

        match attach::load_inline_image(&path) {
            Ok(image) => {
                self.pending_image_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned());
                self.pending_image = Some(image);
            }
            Err(err) => self.set_toast(err.to_string()),
        }
    }

    fn send_message(&mut self, text: String) {
        let text = text.trim().to_owned();
        if text.is_empty() && self.pending_image.is_none() {
            return;
        }
        if self.is_busy() {
            self.set_toast("Still answering; one question at a time");
            return;
        }

        if !text.is_empty() {
            match self.data.record_query(&text) {
                Ok(recent) => self.recent = recent,
                Err(err) => warn!(%err, "cannot persist recent query"),
            }
        }

        let image = self.pending_image.take();
        self.pending_image_name = None;

        let display = if text.is_empty() {
            IMAGE_PLACEHOLDER_TEXT.to_owned()
        } else {
            text.clone()
        };

        let model_message_id = {
            let mut transcript = self.transcript.lock().expect("transcript lock poisoned");
            transcript.push(ConversationMessage::user(display, image.clone()));
            transcript.push(ConversationMessage::model_placeholder())
        };

        self.busy.store(true, Ordering::SeqCst);
        self.follow = true;

        let client = self.client.clone();
        let session = self.session.clone();
        let transcript = self.transcript.clone();
        let busy = self.busy.clone();

        self.handle.spawn(async move {
            let opened = {
                let mut session = session.lock().await;
                client.stream_turn(&mut session, &text, image).await
            };

            match opened {
                Ok(chunks) => {
                    let outcome = drive_turn(transcript, model_message_id, chunks).await;
                    if let MergeOutcome::Completed { text, .. } = outcome {
                        session.lock().await.record_model_reply(&text);
                    }
                }
                Err(error) => {
                    report_turn_failure(&transcript, model_message_id, &error);
                }
            }

            busy.store(false, Ordering::SeqCst);
        });
    }

    /// Discards the visible transcript and opens a fresh backend session.
    /// An in-flight stream keeps running but its snapshots go unobserved.
    fn reset_session(&mut self) {
        self.transcript
            .lock()
            .expect("transcript lock poisoned")
            .clear();
        self.session = Arc::new(tokio::sync::Mutex::new(self.client.open_session()));
        self.busy.store(false, Ordering::SeqCst);
        self.scroll = 0;
        self.follow = true;
        self.set_toast("Session reset");
    }

    fn scroll_by(&mut self, delta: i32) {
        self.follow = false;
        if delta < 0 {
            self.scroll = self.scroll.saturating_sub((-delta) as u16);
        } else {
            self.scroll = self.scroll.saturating_add(delta as u16);
        }
    }

    fn sidebar_entries(&self) -> Vec<SidebarEntry> {
        let mut entries = Vec::new();

        let transcript_empty = self
            .transcript
            .lock()
            .expect("transcript lock poisoned")
            .is_empty();
        if transcript_empty {
            entries.push(SidebarEntry::Header("Suggested"));
            for (idx, _) in prompt::SUGGESTED_QUERIES.iter().enumerate() {
                entries.push(SidebarEntry::Suggested(idx));
            }
        }

        entries.push(SidebarEntry::Header("Toolkit"));
        for (idx, _) in prompt::TOOLKIT_PROMPTS.iter().enumerate() {
            entries.push(SidebarEntry::Toolkit(idx));
        }

        if !self.recent.is_empty() {
            entries.push(SidebarEntry::Header("Recent History"));
            for (idx, _) in self.recent.iter().enumerate() {
                entries.push(SidebarEntry::Recent(idx));
            }
        }

        entries.push(SidebarEntry::Header("Quick Select"));
        for (idx, _) in prompt::QUICK_PICKS.iter().enumerate() {
            entries.push(SidebarEntry::QuickPick(idx));
        }

        entries.push(SidebarEntry::Header("My Setups  (n new, d delete)"));
        for (idx, _) in self.setups.iter().enumerate() {
            entries.push(SidebarEntry::Setup(idx));
        }

        entries
    }

    fn move_sidebar_selection(&mut self, delta: i32) {
        let entries = self.sidebar_entries();
        if let Some(next) = next_selectable(&entries, self.sidebar_index, delta) {
            self.sidebar_index = next;
        }
    }

    fn activate_sidebar_entry(&mut self) {
        let entries = self.sidebar_entries();
        let Some(entry) = entries.get(self.sidebar_index) else {
            return;
        };

        let send = match entry {
            SidebarEntry::Suggested(idx) => {
                prompt::SUGGESTED_QUERIES.get(*idx).map(|q| (*q).to_owned())
            }
            SidebarEntry::Toolkit(idx) => {
                prompt::TOOLKIT_PROMPTS.get(*idx).map(|(_, q)| (*q).to_owned())
            }
            SidebarEntry::Recent(idx) => self.recent.get(*idx).cloned(),
            SidebarEntry::QuickPick(idx) => {
                prompt::QUICK_PICKS.get(*idx).map(|pick| pick.prompt())
            }
            SidebarEntry::Setup(idx) => self.setups.get(*idx).map(CameraSetup::apply_prompt),
            SidebarEntry::Header(_) => None,
        };

        if let Some(text) = send {
            self.focus = Focus::Input;
            self.send_message(text);
        }
    }

    fn delete_selected_setup(&mut self) {
        let entries = self.sidebar_entries();
        let Some(SidebarEntry::Setup(idx)) = entries.get(self.sidebar_index) else {
            return;
        };
        let Some(setup) = self.setups.get(*idx) else {
            return;
        };

        match self.data.delete_setup(setup.id()) {
            Ok(setups) => {
                self.setups = setups;
                self.move_sidebar_selection(-1);
            }
            Err(err) => {
                warn!(%err, "cannot delete setup");
                self.set_toast("Could not delete the setup; see the log");
            }
        }
    }
}

fn report_turn_failure(
    transcript: &Arc<Mutex<Transcript>>,
    message_id: crate::model::MessageId,
    error: &BackendError,
) {
    warn!(%error, "chat turn could not be opened");
    transcript
        .lock()
        .expect("transcript lock poisoned")
        .mark_failed(&message_id);
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SidebarEntry {
    Header(&'static str),
    Suggested(usize),
    Toolkit(usize),
    Recent(usize),
    QuickPick(usize),
    Setup(usize),
}

impl SidebarEntry {
    fn selectable(&self) -> bool {
        !matches!(self, Self::Header(_))
    }
}

fn next_selectable(entries: &[SidebarEntry], current: usize, delta: i32) -> Option<usize> {
    if entries.is_empty() {
        return None;
    }

    let mut idx = current.min(entries.len() - 1) as i32;

    loop {
        idx += delta.signum();
        if idx < 0 || idx as usize >= entries.len() {
            return Some(current.min(entries.len() - 1));
        }
        if entries[idx as usize].selectable() {
            return Some(idx as usize);
        }
    }
}

// ── Input line ───────────────────────────────────────────────────────────────

/// A single-line editor with a character cursor.
#[derive(Debug, Default, Clone)]
struct InputLine {
    chars: Vec<char>,
    cursor: usize,
}

impl InputLine {
    fn insert(&mut self, ch: char) {
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    fn move_home(&mut self) {
        self.cursor = 0;
    }

    fn move_end(&mut self) {
        self.cursor = self.chars.len();
    }

    fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    fn take(&mut self) -> String {
        let text: String = self.chars.iter().collect();
        self.clear();
        text
    }

    fn text(&self) -> String {
        self.chars.iter().collect()
    }

    fn cursor(&self) -> usize {
        self.cursor
    }
}

// ── Setup form ───────────────────────────────────────────────────────────────

const FORM_FIELDS: &[&str] = &[
    "Name", "Camera", "FPS", "Shutter", "ISO / EI", "White Balance", "Resolution", "Codec",
    "Lens", "Notes",
];

/// The in-TUI "new setup" form. Plain text fields; the camera field can also
/// cycle through the built-in camera database with ←/→.
#[derive(Debug, Default)]
struct SetupForm {
    values: [String; FORM_FIELDS.len()],
    selected: usize,
    camera_cursor: Option<usize>,
}

impl SetupForm {
    fn select_previous(&mut self) {
        self.selected = self.selected.checked_sub(1).unwrap_or(FORM_FIELDS.len() - 1);
    }

    fn select_next(&mut self) {
        self.selected = (self.selected + 1) % FORM_FIELDS.len();
    }

    fn insert(&mut self, ch: char) {
        self.values[self.selected].push(ch);
        if self.selected == 1 {
            self.camera_cursor = None;
        }
    }

    fn backspace(&mut self) {
        self.values[self.selected].pop();
        if self.selected == 1 {
            self.camera_cursor = None;
        }
    }

    /// On the camera field, ←/→ steps through "Brand Model" options.
    fn cycle_camera(&mut self, delta: i32) {
        if self.selected != 1 {
            return;
        }

        let options = camera_options();
        if options.is_empty() {
            return;
        }

        let next = match self.camera_cursor {
            None => {
                if delta >= 0 {
                    0
                } else {
                    options.len() - 1
                }
            }
            Some(current) => {
                let len = options.len() as i32;
                (((current as i32 + delta.signum()) % len + len) % len) as usize
            }
        };

        self.camera_cursor = Some(next);
        self.values[1] = options[next].clone();
    }

    fn to_setup(&self) -> Option<CameraSetup> {
        let name = self.values[0].trim();
        let camera = self.values[1].trim();
        if name.is_empty() || camera.is_empty() {
            return None;
        }

        Some(CameraSetup::new(
            name,
            camera,
            SetupFields {
                fps: self.values[2].clone(),
                shutter: self.values[3].clone(),
                iso: self.values[4].clone(),
                wb: self.values[5].clone(),
                resolution: self.values[6].clone(),
                codec: self.values[7].clone(),
                lens: self.values[8].clone(),
                notes: self.values[9].clone(),
            },
        ))
    }
}

fn camera_options() -> Vec<String> {
    prompt::CAMERA_DATABASE
        .iter()
        .flat_map(|(brand, models)| {
            models
                .iter()
                .map(move |model| format!("{brand} {model}"))
        })
        .collect()
}

// ── Drawing ──────────────────────────────────────────────────────────────────

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(frame.size());

    draw_sidebar(frame, app, columns[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(columns[1]);

    draw_transcript(frame, app, rows[0]);
    draw_input(frame, app, rows[1]);
    draw_footer(frame, app, rows[2]);

    if app.form.is_some() {
        draw_setup_form(frame, app, frame.size());
    }
}

fn draw_sidebar(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let theme = app.theme;
    let entries = app.sidebar_entries();

    let mut items = Vec::with_capacity(entries.len());
    for entry in &entries {
        let line = match entry {
            SidebarEntry::Header(title) => {
                Line::styled(format!("─ {title}"), theme.dim_style())
            }
            SidebarEntry::Suggested(idx) => {
                Line::styled(format!("\"{}\"", prompt::SUGGESTED_QUERIES[*idx]), theme.base_style())
            }
            SidebarEntry::Toolkit(idx) => {
                Line::styled(prompt::TOOLKIT_PROMPTS[*idx].0, theme.base_style())
            }
            SidebarEntry::Recent(idx) => Line::styled(
                format!("⏱ {}", app.recent[*idx]),
                theme.base_style(),
            ),
            SidebarEntry::QuickPick(idx) => {
                let pick = &prompt::QUICK_PICKS[*idx];
                Line::from(vec![
                    Span::styled(pick.name, theme.base_style()),
                    Span::styled(format!("  {}", pick.manufacturer), theme.dim_style()),
                ])
            }
            SidebarEntry::Setup(idx) => {
                let setup = &app.setups[*idx];
                Line::from(vec![
                    Span::styled(setup.name().to_owned(), theme.base_style()),
                    Span::styled(format!("  {}", setup.camera()), theme.dim_style()),
                ])
            }
        };
        items.push(ListItem::new(line));
    }

    let focused = app.focus == Focus::Sidebar && app.form.is_none();
    let list = List::new(items)
        .block(
            Block::default()
                .title(" CineAssist ")
                .borders(Borders::ALL)
                .border_style(theme.panel_border_style(focused)),
        )
        .highlight_style(if focused {
            theme.selection_style()
        } else {
            theme.base_style()
        });

    let mut state = ListState::default();
    if focused {
        app.sidebar_index = app.sidebar_index.min(entries.len().saturating_sub(1));
        state.select(Some(app.sidebar_index));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_transcript(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let theme = app.theme;

    let messages = {
        let transcript = app.transcript.lock().expect("transcript lock poisoned");
        transcript.messages().to_vec()
    };

    let text = if messages.is_empty() {
        welcome_text(&theme)
    } else {
        let mut text = transcript_text(&messages, &theme);
        if app.is_busy() {
            text.lines.push(Line::default());
            text.lines.push(Line::styled(BUSY_TEXT, theme.busy_style()));
        }
        text
    };

    let inner_width = area.width.saturating_sub(2).max(1);
    let total = estimated_height(&text, inner_width);
    let viewport = area.height.saturating_sub(2);
    let max_scroll = total.saturating_sub(viewport);
    if app.follow {
        app.scroll = max_scroll;
    } else {
        app.scroll = app.scroll.min(max_scroll);
        if app.scroll == max_scroll {
            app.follow = true;
        }
    }

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.panel_border_style(false)),
        );

    frame.render_widget(paragraph, area);
}

fn draw_input(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let theme = app.theme;

    let mut title = if app.attach_prompt {
        " Image path ".to_owned()
    } else {
        " Ask ".to_owned()
    };
    if let Some(name) = &app.pending_image_name {
        title.push_str(&format!("[📷 {name}] "));
    }

    let style = if app.is_busy() {
        theme.dim_style()
    } else {
        theme.base_style()
    };

    let focused = app.focus == Focus::Input && app.form.is_none();
    let input = Paragraph::new(Line::styled(app.input.text(), style)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(theme.panel_border_style(focused)),
    );
    frame.render_widget(input, area);

    if focused {
        let x = area.x + 1 + app.input.cursor() as u16;
        let y = area.y + 1;
        if x < area.right().saturating_sub(1) {
            frame.set_cursor(x, y);
        }
    }
}

fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let theme = app.theme;

    let line = if let Some(toast) = &app.toast {
        Line::styled(toast.message.clone(), theme.busy_style())
    } else {
        let mut spans = Vec::new();
        for (key, label) in [
            ("Enter", "send"),
            ("Tab", "sidebar"),
            ("^O", "attach"),
            ("^S", "setups"),
            ("^R", "reset"),
            ("^C", "quit"),
        ] {
            spans.push(Span::styled(key, theme.footer_key_style()));
            spans.push(Span::styled(format!(" {label}  "), theme.footer_label_style()));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn draw_setup_form(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let theme = app.theme;
    let Some(form) = &app.form else {
        return;
    };

    let width = area.width.min(56);
    let height = (FORM_FIELDS.len() as u16 + 4).min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup);

    let mut lines = Vec::with_capacity(FORM_FIELDS.len() + 1);
    for (idx, label) in FORM_FIELDS.iter().enumerate() {
        let value = &form.values[idx];
        let label_span = Span::styled(format!("{label:>14}: "), theme.dim_style());
        let value_style = if idx == form.selected {
            theme.selection_style()
        } else {
            theme.base_style()
        };
        let hint = if idx == 1 && idx == form.selected {
            "  ←/→ cycle models"
        } else {
            ""
        };
        lines.push(Line::from(vec![
            label_span,
            Span::styled(value.clone(), value_style),
            Span::styled(hint, theme.dim_style()),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::styled(
        "Enter save · Esc cancel",
        theme.footer_label_style(),
    ));

    let form_widget = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .title(" New Camera Setup ")
            .borders(Borders::ALL)
            .border_style(theme.panel_border_style(true)),
    );

    frame.render_widget(form_widget, popup);
}

fn welcome_text(theme: &TuiTheme) -> Text<'static> {
    let mut lines = vec![
        Line::default(),
        Line::styled("1st AC & DIT Assistant", theme.heading_style()),
        Line::default(),
        Line::styled(
            "Ask about camera menus, lens specs, or troubleshoot errors on set.",
            theme.base_style(),
        ),
        Line::styled(
            "Always verify critical specs with the official manufacturer manual.",
            theme.dim_style(),
        ),
        Line::default(),
        Line::styled("Try one of these (Tab → Suggested):", theme.dim_style()),
    ];
    for query in prompt::SUGGESTED_QUERIES {
        lines.push(Line::styled(format!("  \"{query}\""), theme.base_style()));
    }
    Text::from(lines)
}

/// Builds the whole transcript as styled text. Pure: the markdown pipeline
/// runs fresh over every model message on every frame.
fn transcript_text(messages: &[ConversationMessage], theme: &TuiTheme) -> Text<'static> {
    let mut lines = Vec::new();

    for message in messages {
        if !lines.is_empty() {
            lines.push(Line::default());
        }

        match message.role() {
            MessageRole::User => {
                let mut tag = vec![Span::styled("You", theme.user_tag_style())];
                tag.push(Span::styled(
                    format!("  {}", message.created_at().format("%H:%M")),
                    theme.dim_style(),
                ));
                lines.push(Line::from(tag));
                if message.image().is_some() {
                    lines.push(Line::styled("[image attached]", theme.dim_style()));
                }
                for line in message.content().split('\n') {
                    lines.push(Line::styled(line.to_owned(), theme.base_style()));
                }
            }
            MessageRole::System => {
                lines.push(Line::styled(message.content().to_owned(), theme.system_style()));
            }
            MessageRole::Model => {
                lines.push(Line::from(Span::styled(
                    "CineAssist",
                    theme.assistant_tag_style(),
                )));

                if message.failed() {
                    lines.push(Line::styled(message.content().to_owned(), theme.error_style()));
                    continue;
                }

                for block in parse_transcript_markup(message.content()) {
                    append_block_lines(&mut lines, &block, theme);
                }

                if !message.citations().is_empty() {
                    lines.push(Line::styled("Sources", theme.dim_style()));
                    for source in message.citations() {
                        lines.push(Line::styled(
                            format!("  • {} ({})", source.title, source.uri),
                            theme.citation_style(),
                        ));
                    }
                }
            }
        }
    }

    Text::from(lines)
}

fn append_block_lines(lines: &mut Vec<Line<'static>>, block: &RenderedBlock, theme: &TuiTheme) {
    match block {
        RenderedBlock::Lines(blocks) => {
            for line_block in blocks {
                lines.push(line_block_to_line(line_block, theme));
            }
        }
        RenderedBlock::Code { body, .. } => {
            for line in body.trim_end_matches('\n').split('\n') {
                lines.push(Line::styled(format!("  {line}"), theme.code_block_style()));
            }
        }
        RenderedBlock::Schematic(directive) => {
            let render = render_schematic(directive);
            lines.extend(schematic_lines(&render, theme));
        }
    }
}

fn line_block_to_line(block: &LineBlock, theme: &TuiTheme) -> Line<'static> {
    match block {
        LineBlock::Heading2(runs) => Line::from(runs_to_spans(runs, theme.heading_style(), theme)),
        LineBlock::Heading3(runs) => {
            Line::from(runs_to_spans(runs, theme.subheading_style(), theme))
        }
        LineBlock::Bullet(runs) => {
            let mut spans = vec![Span::styled("  • ", theme.highlight_style())];
            spans.extend(runs_to_spans(runs, theme.base_style(), theme));
            Line::from(spans)
        }
        LineBlock::Numbered { number, runs } => {
            let mut spans = vec![Span::styled(
                format!("  {number}. "),
                theme.subheading_style(),
            )];
            spans.extend(runs_to_spans(runs, theme.base_style(), theme));
            Line::from(spans)
        }
        LineBlock::Blank => Line::default(),
        LineBlock::Paragraph(runs) => Line::from(runs_to_spans(runs, theme.base_style(), theme)),
    }
}

fn runs_to_spans(
    runs: &crate::markdown::InlineRuns,
    base: Style,
    theme: &TuiTheme,
) -> Vec<Span<'static>> {
    runs.iter()
        .map(|run| match run {
            InlineRun::Plain(text) => Span::styled(text.clone(), base),
            InlineRun::Emphasis(text) => Span::styled(text.clone(), theme.emphasis_style()),
            InlineRun::Code(text) => Span::styled(text.clone(), theme.inline_code_style()),
        })
        .collect()
}

/// Converts a schematic render into styled lines, coloring highlight spans.
fn schematic_lines(render: &SchematicRender, theme: &TuiTheme) -> Vec<Line<'static>> {
    render
        .text
        .split('\n')
        .enumerate()
        .map(|(y, raw)| {
            let spans_here: Vec<(usize, usize)> = render
                .highlight
                .iter()
                .filter(|(line, _, _)| *line == y)
                .map(|(_, x0, x1)| (*x0, *x1))
                .collect();

            if spans_here.is_empty() {
                return Line::styled(raw.to_owned(), theme.schematic_style());
            }

            split_highlighted(raw, &spans_here, theme.schematic_style(), theme.highlight_style())
        })
        .collect()
}

/// Splits one line into base/highlight styled spans at character indices.
fn split_highlighted(
    raw: &str,
    spans: &[(usize, usize)],
    base: Style,
    accent: Style,
) -> Line<'static> {
    let chars: Vec<char> = raw.chars().collect();
    let mut cut = vec![false; chars.len()];
    for &(x0, x1) in spans {
        for flag in cut.iter_mut().take((x1 + 1).min(chars.len())).skip(x0) {
            *flag = true;
        }
    }

    let mut out = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let highlighted = cut[start];
        let mut end = start;
        while end < chars.len() && cut[end] == highlighted {
            end += 1;
        }
        let text: String = chars[start..end].iter().collect();
        out.push(Span::styled(text, if highlighted { accent } else { base }));
        start = end;
    }

    Line::from(out)
}

fn estimated_height(text: &Text<'_>, width: u16) -> u16 {
    let width = width.max(1) as usize;
    let mut rows = 0u16;
    for line in &text.lines {
        let len: usize = line.spans.iter().map(|span| span.content.chars().count()).sum();
        let wrapped = if len == 0 { 1 } else { len.div_ceil(width) };
        rows = rows.saturating_add(wrapped as u16);
    }
    rows
}

// ── Terminal session ─────────────────────────────────────────────────────────

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

#[cfg(test)]
mod tests {
    use ratatui::style::{Color, Style};

    use super::{
        camera_options, estimated_height, next_selectable, split_highlighted, InputLine,
        SetupForm, SidebarEntry,
    };
    use ratatui::text::Text;

    #[test]
    fn input_line_edits_at_the_cursor() {
        let mut input = InputLine::default();
        for ch in "ios".chars() {
            input.insert(ch);
        }
        input.move_left();
        input.move_left();
        input.insert('s');
        assert_eq!(input.text(), "isos");

        input.move_end();
        input.backspace();
        assert_eq!(input.text(), "iso");

        assert_eq!(input.take(), "iso");
        assert_eq!(input.text(), "");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn sidebar_selection_skips_headers() {
        let entries = vec![
            SidebarEntry::Header("A"),
            SidebarEntry::Recent(0),
            SidebarEntry::Header("B"),
            SidebarEntry::QuickPick(0),
        ];

        assert_eq!(next_selectable(&entries, 1, 1), Some(3));
        assert_eq!(next_selectable(&entries, 3, -1), Some(1));
        // At the edges the selection stays put.
        assert_eq!(next_selectable(&entries, 1, -1), Some(1));
        assert_eq!(next_selectable(&entries, 3, 1), Some(3));
    }

    #[test]
    fn setup_form_requires_name_and_camera() {
        let mut form = SetupForm::default();
        assert!(form.to_setup().is_none());

        for ch in "A-Cam".chars() {
            form.insert(ch);
        }
        assert!(form.to_setup().is_none());

        form.select_next();
        form.cycle_camera(1);
        let setup = form.to_setup().expect("setup");
        assert_eq!(setup.name(), "A-Cam");
        assert_eq!(setup.camera(), camera_options()[0]);
    }

    #[test]
    fn camera_cycling_wraps_both_ways() {
        let mut form = SetupForm::default();
        form.select_next();

        form.cycle_camera(-1);
        let last = camera_options().len() - 1;
        assert_eq!(form.values[1], camera_options()[last]);

        form.cycle_camera(1);
        assert_eq!(form.values[1], camera_options()[0]);
    }

    #[test]
    fn typing_in_the_camera_field_clears_the_cycler() {
        let mut form = SetupForm::default();
        form.select_next();
        form.cycle_camera(1);
        form.insert('X');
        assert!(form.camera_cursor.is_none());
    }

    #[test]
    fn split_highlighted_partitions_at_char_indices() {
        let base = Style::default();
        let accent = Style::default().fg(Color::Red);
        let line = split_highlighted("abcdef", &[(1, 2), (4, 4)], base, accent);

        let rendered: Vec<(String, bool)> = line
            .spans
            .iter()
            .map(|span| (span.content.to_string(), span.style == accent))
            .collect();

        assert_eq!(
            rendered,
            vec![
                ("a".to_owned(), false),
                ("bc".to_owned(), true),
                ("d".to_owned(), false),
                ("e".to_owned(), true),
                ("f".to_owned(), false),
            ]
        );
    }

    #[test]
    fn estimated_height_counts_wrapped_rows() {
        let text = Text::from(vec![
            ratatui::text::Line::from("1234567890"),
            ratatui::text::Line::from(""),
        ]);
        assert_eq!(estimated_height(&text, 4), 4);
        assert_eq!(estimated_height(&text, 20), 2);
    }
}

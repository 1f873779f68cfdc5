//! Application loop, focus handling and key bindings.
//!
//! `App` owns the `ProductScreen` plus everything terminal-specific:
//! which widget has focus, the text cursor, the list selection, and the
//! channel the transport reports back on. Keys translate into screen
//! operations; finished requests are folded back in between frames.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use amma_core::{Operation, PendingRequest, ProductClient, ProductScreen};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::widgets::ListState;
use ratatui::Frame;

use crate::transport::{self, NetEvent};
use crate::ui;

/// Which part of the screen receives keystrokes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Focus {
    Name,
    Description,
    Price,
    List,
}

pub struct App {
    pub(crate) screen: ProductScreen,
    pub(crate) focus: Focus,
    /// Cursor within the focused field, counted in characters.
    pub(crate) cursor: usize,
    pub(crate) list_state: ListState,
    pub(crate) net_tx: Sender<NetEvent>,
    pub(crate) net_rx: Receiver<NetEvent>,
    pub(crate) should_quit: bool,
}

impl App {
    pub fn new(base_url: &str) -> Self {
        let (net_tx, net_rx) = mpsc::channel();
        Self {
            screen: ProductScreen::new(ProductClient::new(base_url)),
            focus: Focus::Name,
            cursor: 0,
            list_state: ListState::default(),
            net_tx,
            net_rx,
            should_quit: false,
        }
    }

    pub fn run(mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        self.dispatch(self.screen.open());

        loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    // Windows compatibility: only handle Press events
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            while let Ok(event) = self.net_rx.try_recv() {
                self.on_net_event(event);
            }

            if self.should_quit {
                break;
            }
        }

        ratatui::restore();
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        ui::render(frame, self);
    }

    fn dispatch(&self, pending: PendingRequest) {
        transport::spawn(self.net_tx.clone(), pending);
    }

    pub(crate) fn handle_key(&mut self, key: KeyCode) {
        // The alert is modal: keys only dismiss it. In-flight results keep
        // landing through the channel regardless.
        if self.screen.alert().is_some() {
            if matches!(key, KeyCode::Enter | KeyCode::Esc) {
                self.screen.dismiss_alert();
            }
            return;
        }

        match self.focus {
            Focus::List => self.handle_list_key(key),
            _ => self.handle_form_key(key),
        }
    }

    fn handle_list_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(selected) = self.list_state.selected() {
                    if selected > 0 {
                        self.list_state.select(Some(selected - 1));
                    }
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(selected) = self.list_state.selected() {
                    if selected < self.screen.products().len().saturating_sub(1) {
                        self.list_state.select(Some(selected + 1));
                    }
                }
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(selected) = self.list_state.selected() {
                    if self.screen.begin_edit(selected) {
                        self.focus_field(Focus::Name);
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some(selected) = self.list_state.selected() {
                    if let Some(pending) = self.screen.request_delete(selected) {
                        self.dispatch(pending);
                    }
                }
            }
            KeyCode::Tab => self.focus_field(Focus::Name),
            KeyCode::BackTab => self.focus_field(Focus::Price),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab => {
                let next = match self.focus {
                    Focus::Name => Focus::Description,
                    Focus::Description => Focus::Price,
                    Focus::Price | Focus::List => Focus::List,
                };
                self.focus_field(next);
            }
            KeyCode::BackTab => {
                let prev = match self.focus {
                    Focus::Name | Focus::List => Focus::List,
                    Focus::Description => Focus::Name,
                    Focus::Price => Focus::Description,
                };
                self.focus_field(prev);
            }
            KeyCode::Enter => {
                if let Some(pending) = self.screen.submit() {
                    self.dispatch(pending);
                }
            }
            KeyCode::Esc => self.focus = Focus::List,
            KeyCode::Char(c) => {
                let cursor = self.cursor;
                let Some(field) = self.focused_field_mut() else {
                    return;
                };
                field.insert(byte_index(field, cursor), c);
                self.cursor += 1;
            }
            KeyCode::Backspace => {
                let cursor = self.cursor;
                if cursor == 0 {
                    return;
                }
                let Some(field) = self.focused_field_mut() else {
                    return;
                };
                field.remove(byte_index(field, cursor - 1));
                self.cursor -= 1;
            }
            KeyCode::Delete => {
                let cursor = self.cursor;
                let Some(field) = self.focused_field_mut() else {
                    return;
                };
                if cursor < field.chars().count() {
                    field.remove(byte_index(field, cursor));
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                if self.cursor < self.focused_len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.focused_len(),
            _ => {}
        }
    }

    pub(crate) fn on_net_event(&mut self, event: NetEvent) {
        match event.operation {
            Operation::Load => {
                if let Err(error) = self.screen.apply_load(event.response) {
                    tracing::error!(%error, "load failed");
                }
                self.clamp_selection();
            }
            Operation::Save => match self.screen.apply_save(event.response) {
                Ok(reload) => {
                    self.cursor = self.focused_len();
                    self.dispatch(reload);
                }
                Err(error) => tracing::error!(%error, "save failed"),
            },
            Operation::Delete => match self.screen.apply_delete(event.response) {
                Ok(reload) => self.dispatch(reload),
                Err(error) => tracing::error!(%error, "delete failed"),
            },
        }
    }

    fn focus_field(&mut self, focus: Focus) {
        self.focus = focus;
        self.cursor = self.focused_len();
    }

    fn focused_field_mut(&mut self) -> Option<&mut String> {
        let draft = self.screen.draft_mut();
        match self.focus {
            Focus::Name => Some(&mut draft.name),
            Focus::Description => Some(&mut draft.description),
            Focus::Price => Some(&mut draft.price),
            Focus::List => None,
        }
    }

    fn focused_len(&self) -> usize {
        let draft = self.screen.draft();
        match self.focus {
            Focus::Name => draft.name.chars().count(),
            Focus::Description => draft.description.chars().count(),
            Focus::Price => draft.price.chars().count(),
            Focus::List => 0,
        }
    }

    /// Keep the list selection inside the freshly loaded list.
    fn clamp_selection(&mut self) {
        let len = self.screen.products().len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            let selected = self.list_state.selected().unwrap_or(0).min(len - 1);
            self.list_state.select(Some(selected));
        }
    }
}

/// Byte offset of the `chars`-th character, safe for multibyte input.
fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices()
        .map(|(i, _)| i)
        .nth(chars)
        .unwrap_or(text.len())
}

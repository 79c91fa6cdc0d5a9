//! The board's modal state machine.
//!
//! [`App`] is a plain value. The runtime feeds it one [`Event`] at a time
//! through [`App::apply`], which performs any store round-trip synchronously
//! and hands back the next state. Nothing here touches the terminal.

use chrono::Utc;

use crate::board::{Board, COLUMN_COUNT};
use crate::store::ItemStore;
use crate::task::{Status, WorkItem};
use crate::view::{BoardView, CardView, ColumnView, PromptView, View};

/// Logical key, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Char(char),
    Backspace,
    Enter,
    Esc,
    /// Hard quit (Ctrl-C). Cancels entry modes, exits from `Normal`.
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    Resize { width: u16, height: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// Current interaction mode. Entry modes own their text buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Details,
    NewItem { title: String },
    AssignSprint { sprint: String },
    Filter { term: String },
    Dashboard,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Details => "details",
            Mode::NewItem { .. } => "new-item",
            Mode::AssignSprint { .. } => "assign-sprint",
            Mode::Filter { .. } => "filter",
            Mode::Dashboard => "dashboard",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct App {
    board: Board,
    mode: Mode,
    column: usize,
    row: usize,
    filter: String,
    viewport: Viewport,
    /// Last store failure, shown until the next successful save.
    message: Option<String>,
}

impl App {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            ..Default::default()
        }
    }

    /// Load every item from `store` into a fresh board.
    pub fn load<S: ItemStore + ?Sized>(store: &S) -> crate::Result<Self> {
        Ok(Self::new(Board::load(store)?))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Selected `(column, row)`.
    pub fn selection(&self) -> (usize, usize) {
        (self.column, self.row)
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn selected_status(&self) -> Status {
        Status::from_index(self.column).unwrap_or_default()
    }

    pub fn selected_item(&self) -> Option<&WorkItem> {
        self.board.get(self.selected_status(), self.row)
    }

    /// Process one event and return the resulting state.
    pub fn apply<S: ItemStore + ?Sized>(mut self, event: Event, store: &mut S) -> (Self, Control) {
        let control = match event {
            Event::Resize { width, height } => {
                self.viewport = Viewport { width, height };
                Control::Continue
            }
            Event::Key(key) => self.handle_key(key, store),
        };
        (self, control)
    }

    fn handle_key<S: ItemStore + ?Sized>(&mut self, key: Key, store: &mut S) -> Control {
        let before = self.mode.name();
        let control = match std::mem::take(&mut self.mode) {
            Mode::Normal => return self.handle_normal(key, store),
            Mode::Details => {
                self.mode = match key {
                    Key::Char('q') | Key::Esc | Key::Quit => Mode::Normal,
                    _ => Mode::Details,
                };
                Control::Continue
            }
            Mode::Dashboard => {
                self.mode = match key {
                    Key::Char('q') | Key::Esc | Key::Quit => Mode::Normal,
                    _ => Mode::Dashboard,
                };
                Control::Continue
            }
            Mode::NewItem { mut title } => {
                match edit(&mut title, key) {
                    Entry::Editing => self.mode = Mode::NewItem { title },
                    Entry::Cancelled => {}
                    Entry::Confirmed => self.create_item(title, store),
                }
                Control::Continue
            }
            Mode::AssignSprint { mut sprint } => {
                match edit(&mut sprint, key) {
                    Entry::Editing => self.mode = Mode::AssignSprint { sprint },
                    Entry::Cancelled => {}
                    Entry::Confirmed => self.assign_sprint(sprint, store),
                }
                Control::Continue
            }
            Mode::Filter { mut term } => {
                match edit(&mut term, key) {
                    Entry::Editing => self.mode = Mode::Filter { term },
                    Entry::Cancelled => self.filter.clear(),
                    Entry::Confirmed => self.filter = term,
                }
                Control::Continue
            }
        };
        if self.mode.name() != before {
            tracing::debug!(from = before, to = self.mode.name(), "mode changed");
        }
        control
    }

    fn handle_normal<S: ItemStore + ?Sized>(&mut self, key: Key, store: &mut S) -> Control {
        match key {
            Key::Char('q') | Key::Quit => return Control::Quit,
            Key::Left | Key::Char('h') => self.select_column(self.column.saturating_sub(1)),
            Key::Right | Key::Char('l') => self.select_column(self.column + 1),
            Key::Down | Key::Char('j') => {
                let len = self.board.column(self.selected_status()).len();
                if self.row + 1 < len {
                    self.row += 1;
                }
            }
            Key::Up | Key::Char('k') => self.row = self.row.saturating_sub(1),
            Key::Enter | Key::Char('d') => self.mode = Mode::Details,
            Key::Char('n') => {
                self.mode = Mode::NewItem {
                    title: String::new(),
                }
            }
            Key::Char('f') | Key::Char('/') => {
                self.mode = Mode::Filter {
                    term: String::new(),
                }
            }
            Key::Char('v') => self.mode = Mode::Dashboard,
            Key::Char('s') => {
                if self.selected_item().is_some() {
                    self.mode = Mode::AssignSprint {
                        sprint: String::new(),
                    };
                }
            }
            Key::Char('L') => self.shift_selected(Status::next, store),
            Key::Char('H') => self.shift_selected(Status::prev, store),
            _ => {}
        }
        if self.mode != Mode::Normal {
            tracing::debug!(to = self.mode.name(), "mode changed");
        }
        Control::Continue
    }

    fn select_column(&mut self, column: usize) {
        let column = column.min(COLUMN_COUNT - 1);
        if column != self.column {
            self.column = column;
            self.row = 0;
        }
    }

    /// Move the selected item to the column `target` picks, then follow it.
    fn shift_selected<S: ItemStore + ?Sized>(
        &mut self,
        target: fn(&Status) -> Option<Status>,
        store: &mut S,
    ) {
        let Some(to) = target(&self.selected_status()) else {
            return;
        };
        let Some(mut item) = self.selected_item().cloned() else {
            return;
        };
        item.status = to;
        self.persist(&mut item, store);
        self.resync(&*store);
        self.column = to.index();
        self.row = 0;
    }

    fn create_item<S: ItemStore + ?Sized>(&mut self, title: String, store: &mut S) {
        let mut item = WorkItem::new_task(title, Utc::now());
        self.persist(&mut item, store);
        self.resync(&*store);
    }

    fn assign_sprint<S: ItemStore + ?Sized>(&mut self, sprint: String, store: &mut S) {
        // The column may have emptied since the prompt opened.
        if let Some(mut item) = self.selected_item().cloned() {
            item.sprint_id = (!sprint.is_empty()).then_some(sprint);
            self.persist(&mut item, store);
        }
        self.resync(&*store);
    }

    /// Save `item`, recording a failure without undoing the caller's
    /// state change.
    fn persist<S: ItemStore + ?Sized>(&mut self, item: &mut WorkItem, store: &mut S) {
        match store.save_item(item) {
            Ok(()) => self.message = None,
            Err(e) => {
                tracing::error!("failed to save work item: {}", e);
                self.message = Some(format!("save failed: {e}"));
            }
        }
    }

    /// Rebuild the grouping from the store. Keeps the old grouping if the
    /// reload fails.
    fn resync<S: ItemStore + ?Sized>(&mut self, store: &S) {
        match Board::load(store) {
            Ok(board) => self.board = board,
            Err(e) => {
                tracing::error!("failed to reload work items: {}", e);
                self.message = Some(format!("reload failed: {e}"));
            }
        }
        self.row = 0;
    }

    /// Describe what the current mode should display.
    pub fn view(&self) -> View<'_> {
        match &self.mode {
            Mode::Normal => View::Board(self.board_view()),
            Mode::Details => View::Details(self.selected_item()),
            Mode::NewItem { title } => View::Prompt(PromptView {
                heading: "Create New Task",
                label: "Title",
                input: title,
                hint: "[Enter to Save, Esc to Cancel]",
            }),
            Mode::AssignSprint { sprint } => View::Prompt(PromptView {
                heading: "Assign to Sprint",
                label: "Sprint ID",
                input: sprint,
                hint: "[Enter to Save, Esc to Cancel]",
            }),
            Mode::Filter { term } => View::Prompt(PromptView {
                heading: "Filter Board",
                label: "Search",
                input: term,
                hint: "[Enter to Apply, Esc to Clear]",
            }),
            Mode::Dashboard => View::Dashboard(self.board.stats()),
        }
    }

    fn board_view(&self) -> BoardView<'_> {
        let columns = Status::ALL
            .iter()
            .map(|&status| ColumnView {
                status,
                cards: self
                    .board
                    .column(status)
                    .iter()
                    .enumerate()
                    .filter(|(_, item)| item.matches_filter(&self.filter))
                    .map(|(row, item)| CardView {
                        title: &item.title,
                        selected: status.index() == self.column && row == self.row,
                    })
                    .collect(),
            })
            .collect();
        BoardView {
            columns,
            selection: self.selection(),
            filter: &self.filter,
            message: self.message.as_deref(),
            viewport: self.viewport,
        }
    }
}

enum Entry {
    Editing,
    Cancelled,
    Confirmed,
}

/// Apply `key` to a text buffer shared by all entry modes.
fn edit(buffer: &mut String, key: Key) -> Entry {
    match key {
        Key::Enter => Entry::Confirmed,
        Key::Esc | Key::Quit => Entry::Cancelled,
        Key::Backspace => {
            buffer.pop();
            Entry::Editing
        }
        Key::Char(c) if !c.is_control() => {
            buffer.push(c);
            Entry::Editing
        }
        _ => Entry::Editing,
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

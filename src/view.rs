//! Backend-neutral descriptions of what each mode displays.

use crate::app::Viewport;
use crate::board::BoardStats;
use crate::task::{Status, WorkItem};

#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    Board(BoardView<'a>),
    /// `None` when nothing is selected.
    Details(Option<&'a WorkItem>),
    Prompt(PromptView<'a>),
    Dashboard(BoardStats),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardView<'a> {
    /// Always five, in board order.
    pub columns: Vec<ColumnView<'a>>,
    /// Selected `(column, row)`. The row indexes the unfiltered column, so the
    /// selected card may be hidden by the filter.
    pub selection: (usize, usize),
    pub filter: &'a str,
    pub message: Option<&'a str>,
    pub viewport: Viewport,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView<'a> {
    pub status: Status,
    pub cards: Vec<CardView<'a>>,
}

impl ColumnView<'_> {
    pub fn titles(&self) -> Vec<&str> {
        self.cards.iter().map(|card| card.title).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardView<'a> {
    pub title: &'a str,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptView<'a> {
    pub heading: &'static str,
    pub label: &'static str,
    pub input: &'a str,
    pub hint: &'static str,
}

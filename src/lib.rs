//! sprintboard: a single-user terminal kanban board.
//!
//! Work items live one JSON file each under a store directory and flow
//! through five fixed columns. [`app::App`] is the modal state machine that
//! turns key presses into board changes; [`ui`] draws whatever it describes.

pub mod app;
pub mod board;
pub mod config;
pub mod error;
pub mod keymap;
pub mod sprint;
pub mod store;
pub mod task;
pub mod ui;
pub mod view;

pub use app::{App, Control, Event, Key, Mode};
pub use board::{Board, BoardStats, ColumnStats};
pub use config::Config;
pub use error::{Error, Result};
pub use sprint::Sprint;
pub use store::{ItemStore, JsonStore};
pub use task::{Dependency, Priority, Status, WorkItem, WorkType};

use crate::error::Result;
use crate::store::ItemStore;
use crate::task::{Status, WorkItem};

pub const COLUMN_COUNT: usize = Status::ALL.len();

/// All known work items, partitioned by status in board order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    columns: [Vec<WorkItem>; COLUMN_COUNT],
}

impl Board {
    pub fn from_items(items: impl IntoIterator<Item = WorkItem>) -> Self {
        let mut board = Self::default();
        for item in items {
            board.columns[item.status.index()].push(item);
        }
        for column in &mut board.columns {
            column.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        }
        board
    }

    /// Rebuild the grouping from everything in `store`.
    pub fn load<S: ItemStore + ?Sized>(store: &S) -> Result<Self> {
        Ok(Self::from_items(store.load_all_items()?))
    }

    pub fn column(&self, status: Status) -> &[WorkItem] {
        &self.columns[status.index()]
    }

    pub fn get(&self, status: Status, row: usize) -> Option<&WorkItem> {
        self.column(status).get(row)
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }

    /// Item counts and point totals per column.
    pub fn stats(&self) -> BoardStats {
        let columns = Status::ALL.map(|status| {
            let items = self.column(status);
            ColumnStats {
                status,
                count: items.len(),
                points: items.iter().map(|item| u64::from(item.points)).sum(),
            }
        });
        BoardStats {
            total: self.len(),
            columns,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnStats {
    pub status: Status,
    pub count: usize,
    pub points: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardStats {
    pub total: usize,
    pub columns: [ColumnStats; COLUMN_COUNT],
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;

use crate::models::{Column, Task};
use crate::repo::{PersistedBoard, PersistedTask};

/// Per-column view of the task collection.
///
/// Always holds all three columns, in store order within each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    columns: [Vec<&'a Task>; 3],
}

/// Group tasks by column, keeping their relative order
pub fn project(tasks: &[Task]) -> Projection<'_> {
    let mut columns: [Vec<&Task>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for task in tasks {
        columns[task.status.index()].push(task);
    }
    Projection { columns }
}

impl<'a> Projection<'a> {
    pub fn tasks(&self, column: Column) -> &[&'a Task] {
        &self.columns[column.index()]
    }

    pub fn count(&self, column: Column) -> usize {
        self.columns[column.index()].len()
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    /// Columns left to right with their tasks
    pub fn iter(&self) -> impl Iterator<Item = (Column, &[&'a Task])> + '_ {
        Column::ALL
            .into_iter()
            .map(move |column| (column, self.tasks(column)))
    }
}

impl From<&Projection<'_>> for PersistedBoard {
    fn from(projection: &Projection<'_>) -> Self {
        let mut board = PersistedBoard::default();
        for (column, tasks) in projection.iter() {
            *board.column_mut(column) = tasks
                .iter()
                .map(|task| PersistedTask {
                    title: task.title.clone(),
                    description: task.description.clone(),
                })
                .collect();
        }
        board
    }
}

use crate::models::{Column, TaskId};

/// Drag gesture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(TaskId),
}

/// The current drag gesture plus per-column hover flags.
///
/// Holds at most one dragged task. Starting a drag while another is active
/// replaces it (last source wins). Hover flags are purely visual.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
    hover: [bool; 3],
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn dragged(&self) -> Option<TaskId> {
        match self.state {
            DragState::Dragging(id) => Some(id),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged().is_some()
    }

    /// Record `id` as the drag source, returning the source it replaced
    pub fn start(&mut self, id: TaskId) -> Option<TaskId> {
        let previous = self.dragged();
        self.state = DragState::Dragging(id);
        previous
    }

    /// Finish the gesture on `column`: clears its hover flag and hands back
    /// the dragged task, leaving the session idle.
    pub fn drop_on(&mut self, column: Column) -> Option<TaskId> {
        self.hover[column.index()] = false;
        self.take()
    }

    /// End the gesture without a drop. Every drop-target highlight goes
    /// with it.
    pub fn cancel(&mut self) -> Option<TaskId> {
        self.hover = [false; 3];
        self.take()
    }

    fn take(&mut self) -> Option<TaskId> {
        let dragged = self.dragged();
        self.state = DragState::Idle;
        dragged
    }

    pub fn enter(&mut self, column: Column) {
        self.hover[column.index()] = true;
    }

    pub fn leave(&mut self, column: Column) {
        self.hover[column.index()] = false;
    }

    pub fn is_hovered(&self, column: Column) -> bool {
        self.hover[column.index()]
    }

    /// Hover flags in column order
    pub fn hover_flags(&self) -> [bool; 3] {
        self.hover
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let session = DragSession::new();
        assert_eq!(session.state(), DragState::Idle);
        assert_eq!(session.hover_flags(), [false; 3]);
    }

    #[test]
    fn test_drop_takes_dragged_task() {
        let mut session = DragSession::new();
        assert_eq!(session.start(TaskId(3)), None);
        assert!(session.is_dragging());

        assert_eq!(session.drop_on(Column::Done), Some(TaskId(3)));
        assert_eq!(session.state(), DragState::Idle);
        assert_eq!(session.drop_on(Column::Done), None);
    }

    #[test]
    fn test_last_source_wins() {
        let mut session = DragSession::new();
        session.start(TaskId(1));
        assert_eq!(session.start(TaskId(2)), Some(TaskId(1)));
        assert_eq!(session.drop_on(Column::Progress), Some(TaskId(2)));
    }

    #[test]
    fn test_cancel_clears_slot() {
        let mut session = DragSession::new();
        session.start(TaskId(1));
        assert_eq!(session.cancel(), Some(TaskId(1)));
        assert_eq!(session.dragged(), None);
    }

    #[test]
    fn test_cancel_clears_hover() {
        let mut session = DragSession::new();
        session.start(TaskId(1));
        session.enter(Column::Done);
        session.enter(Column::Progress);

        session.cancel();
        assert_eq!(session.hover_flags(), [false; 3]);
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_hover_is_per_column() {
        let mut session = DragSession::new();
        session.enter(Column::Todo);
        session.enter(Column::Done);
        session.leave(Column::Todo);
        assert_eq!(session.hover_flags(), [false, false, true]);

        session.drop_on(Column::Done);
        assert!(!session.is_hovered(Column::Done));
    }
}

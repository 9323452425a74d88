//! Drag-and-drop board interaction.
//!
//! A drag is a short-lived gesture: it starts on a card, may hover over any
//! column, and ends with a drop that either names a destination column or
//! falls outside the board. `Board` tracks that gesture as an explicit state
//! machine and turns a completed drop into a `MoveIntent`. Everything the
//! board asks of the task store goes through `BoardIntent`.

use tracing::debug;

use crate::editor::TaskEditor;
use crate::error::Result;
use crate::fields::Status;
use crate::storage::SlotStore;
use crate::store::TaskStore;

/// Gesture state of the board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { source: Status, task_id: String },
}

/// Where a card was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub column: Status,
    /// Position within the column. Column order follows storage order, so
    /// this is not persisted.
    pub index: usize,
}

impl DropTarget {
    pub fn column(column: Status) -> Self {
        DropTarget { column, index: 0 }
    }
}

/// A completed drag of one task to a destination column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveIntent {
    pub task_id: String,
    pub source: Status,
    pub destination: Status,
}

/// Requests the board makes of its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardIntent {
    Add { column: Status },
    Edit { task_id: String },
    Delete { task_id: String },
    Move(MoveIntent),
}

/// Result of dispatching a `BoardIntent`.
#[derive(Debug)]
pub enum BoardEffect {
    /// The store committed a change.
    Changed,
    /// Nothing happened (unknown task).
    Unchanged,
    /// The owner should show this editor.
    OpenEditor(TaskEditor),
}

/// Drag state machine for one board.
#[derive(Debug, Default)]
pub struct Board {
    drag: DragState,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Id of the card being dragged.
    pub fn dragged_task(&self) -> Option<&str> {
        match &self.drag {
            DragState::Dragging { task_id, .. } => Some(task_id),
            DragState::Idle => None,
        }
    }

    /// Pick up a card. A stale gesture is replaced.
    pub fn begin_drag(&mut self, source: Status, task_id: &str) {
        debug!(task_id, source = source.column_id(), "drag started");
        self.drag = DragState::Dragging { source, task_id: task_id.to_string() };
    }

    /// Abandon the gesture without moving anything.
    pub fn cancel(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Release the card. Dropping outside every column, or while not
    /// dragging, yields no intent.
    pub fn drop(&mut self, destination: Option<DropTarget>) -> Option<MoveIntent> {
        let DragState::Dragging { source, task_id } = std::mem::take(&mut self.drag) else {
            return None;
        };
        let Some(target) = destination else {
            debug!(task_id = %task_id, "dropped outside the board");
            return None;
        };
        Some(MoveIntent { task_id, source, destination: target.column })
    }

    /// Carry out an intent against the store.
    pub fn dispatch<S: SlotStore>(
        &mut self,
        intent: BoardIntent,
        store: &mut TaskStore<S>,
    ) -> Result<BoardEffect> {
        let effect = match intent {
            BoardIntent::Add { column } => BoardEffect::OpenEditor(TaskEditor::create(column)),
            BoardIntent::Edit { task_id } => match store.get(&task_id) {
                Some(task) => BoardEffect::OpenEditor(TaskEditor::edit(task)),
                None => BoardEffect::Unchanged,
            },
            BoardIntent::Delete { task_id } => changed(store.delete(&task_id)?),
            BoardIntent::Move(intent) => changed(store.apply_move(&intent)?),
        };
        Ok(effect)
    }
}

fn changed(did_change: bool) -> BoardEffect {
    if did_change {
        BoardEffect::Changed
    } else {
        BoardEffect::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Priority;
    use crate::storage::{tasks_key, MemoryStore};
    use crate::task::tests::sample;

    fn store_with(tasks: &[crate::task::Task]) -> TaskStore<MemoryStore> {
        let raw = serde_json::to_string_pretty(tasks).unwrap();
        TaskStore::load(MemoryStore::new().with_slot(&tasks_key("1"), &raw), "1")
    }

    #[test]
    fn test_drag_then_drop_emits_move() {
        let mut board = Board::new();
        board.begin_drag(Status::Todo, "a");
        assert_eq!(board.dragged_task(), Some("a"));

        let intent = board.drop(Some(DropTarget { column: Status::Review, index: 3 }));
        assert_eq!(
            intent,
            Some(MoveIntent { task_id: "a".into(), source: Status::Todo, destination: Status::Review })
        );
        assert_eq!(*board.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_drop_without_destination_or_drag_is_noop() {
        let mut board = Board::new();
        assert_eq!(board.drop(Some(DropTarget::column(Status::Done))), None);

        board.begin_drag(Status::Todo, "a");
        assert_eq!(board.drop(None), None);
        assert!(!board.is_dragging());

        board.begin_drag(Status::Todo, "a");
        board.cancel();
        assert_eq!(board.drop(Some(DropTarget::column(Status::Done))), None);
    }

    #[test]
    fn test_move_changes_only_status() {
        let original = sample("a", Status::Todo, "1");
        let mut store = store_with(&[original.clone(), sample("b", Status::Todo, "1")]);
        let mut board = Board::new();

        board.begin_drag(Status::Todo, "a");
        let intent = board.drop(Some(DropTarget::column(Status::Done))).unwrap();
        let effect = board.dispatch(BoardIntent::Move(intent), &mut store).unwrap();
        assert!(matches!(effect, BoardEffect::Changed));

        let moved = store.get("a").unwrap();
        assert_eq!(moved.status, Status::Done);
        assert_eq!(moved.title, original.title);
        assert_eq!(moved.description, original.description);
        assert_eq!(moved.priority, Priority::High);
        assert_eq!(moved.assignee, original.assignee);
        assert_eq!(moved.due_date, original.due_date);
        assert_eq!(moved.labels, original.labels);
        assert_eq!(moved.created_at, original.created_at);
        assert_eq!(moved.project_id, original.project_id);
        // Position in the list is unchanged.
        assert_eq!(store.tasks()[0].id, "a");
    }

    #[test]
    fn test_unknown_task_move_leaves_slot_identical() {
        let mut store = store_with(&[sample("a", Status::Todo, "1")]);
        let before = store.storage().raw("project_1_tasks").unwrap().to_string();
        let mut board = Board::new();

        board.begin_drag(Status::Todo, "ghost");
        let intent = board.drop(Some(DropTarget::column(Status::Done))).unwrap();
        let effect = board.dispatch(BoardIntent::Move(intent), &mut store).unwrap();
        assert!(matches!(effect, BoardEffect::Unchanged));
        assert_eq!(store.storage().raw("project_1_tasks").unwrap(), before);
        assert_eq!(store.storage().writes(), 0);
    }

    #[test]
    fn test_add_and_edit_open_editor() {
        let mut store = store_with(&[sample("a", Status::Review, "1")]);
        let mut board = Board::new();

        match board.dispatch(BoardIntent::Add { column: Status::InProgress }, &mut store).unwrap() {
            BoardEffect::OpenEditor(editor) => assert_eq!(editor.status(), Status::InProgress),
            other => panic!("expected editor, got {other:?}"),
        }
        match board.dispatch(BoardIntent::Edit { task_id: "a".into() }, &mut store).unwrap() {
            BoardEffect::OpenEditor(editor) => assert_eq!(editor.title.value, "Task a"),
            other => panic!("expected editor, got {other:?}"),
        }
        let effect = board.dispatch(BoardIntent::Edit { task_id: "zz".into() }, &mut store).unwrap();
        assert!(matches!(effect, BoardEffect::Unchanged));
    }

    #[test]
    fn test_delete_is_immediate() {
        let mut store = store_with(&[sample("a", Status::Todo, "1"), sample("b", Status::Done, "1")]);
        let mut board = Board::new();
        let effect = board.dispatch(BoardIntent::Delete { task_id: "a".into() }, &mut store).unwrap();
        assert!(matches!(effect, BoardEffect::Changed));
        assert_eq!(store.len(), 1);
        assert!(store.get("a").is_none());
    }
}

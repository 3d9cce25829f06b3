use std::collections::HashSet;
use taskflow::board::{project, Board, Outcome};
use taskflow::db::DbConnection;
use taskflow::models::{Column, TaskId};
use taskflow::repo::{BoardStorage, KeyValueStore, MemoryStore, PersistedBoard, SqliteStore, TASKS_KEY};
use tempfile::TempDir;

/// (title, description) pairs per column, in board order
fn snapshot<S: KeyValueStore>(board: &Board<S>) -> Vec<Vec<(String, String)>> {
    let projection = board.projection();
    projection
        .iter()
        .map(|(_, tasks)| {
            tasks
                .iter()
                .map(|t| (t.title.clone(), t.description.clone()))
                .collect()
        })
        .collect()
}

fn counts<S: KeyValueStore>(board: &Board<S>) -> [usize; 3] {
    let projection = board.projection();
    [
        projection.count(Column::Todo),
        projection.count(Column::Progress),
        projection.count(Column::Done),
    ]
}

/// Deterministic pseudo-random sequence for operation mixes
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}

#[test]
fn test_buy_milk_scenario() {
    let mut board = Board::load(MemoryStore::new());

    let (id, outcome) = board.create("Buy milk", "2%").unwrap();
    assert!(matches!(outcome, Outcome::Saved));
    assert_eq!(counts(&board), [1, 0, 0]);

    assert!(board.drag_start(id));
    board.drag_enter(Column::Progress);
    assert!(board.drop_on(Column::Progress).is_changed());
    assert_eq!(counts(&board), [0, 1, 0]);
    assert_eq!(board.tasks().get(id).unwrap().title, "Buy milk");

    assert!(board.delete(id).is_changed());
    assert_eq!(counts(&board), [0, 0, 0]);
    assert!(board.tasks().is_empty());

    // Reload from the same storage: still empty, no error
    let board = Board::load(board.into_backend());
    assert_eq!(counts(&board), [0, 0, 0]);
}

#[test]
fn test_reload_with_empty_storage() {
    let board = Board::load(MemoryStore::new());
    assert_eq!(counts(&board), [0, 0, 0]);
    assert!(!board.is_persistence_degraded());
}

#[test]
fn test_empty_title_submission() {
    let mut board = Board::load(MemoryStore::new());
    board.create("Existing", "").unwrap();
    let before = counts(&board);

    board.modal_mut().open();
    board.modal_mut().set_title("");
    assert!(board.submit_modal().is_none());

    assert!(!board.modal().is_open());
    assert_eq!(counts(&board), before);
}

#[test]
fn test_round_trip_preserves_columns_and_order() {
    let mut board = Board::load(MemoryStore::new());
    let a = board.create("Write spec", "draft first").unwrap().0;
    board.create("Review PR", "").unwrap();
    let c = board.create("Deploy", "after review\nfriday").unwrap().0;
    board.create("Buy milk", "2%").unwrap();
    board.move_task(c, Column::Done);
    board.move_task(a, Column::Progress);

    let before = snapshot(&board);
    let reloaded = Board::load(board.into_backend());
    assert_eq!(snapshot(&reloaded), before);
    assert_eq!(counts(&reloaded), [2, 1, 1]);
}

#[test]
fn test_round_trip_through_sqlite_file() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("board.db");

    let before = {
        let conn = DbConnection::connect_at(&db_path).unwrap();
        let mut board = Board::load(SqliteStore::new(conn));
        let (id, _) = board.create("Persist me", "across connections").unwrap();
        board.create("Stay", "").unwrap();
        board.move_task(id, Column::Done);
        snapshot(&board)
    };

    let conn = DbConnection::connect_at(&db_path).unwrap();
    let board = Board::load(SqliteStore::new(conn));
    assert_eq!(snapshot(&board), before);
}

#[test]
fn test_save_is_idempotent() {
    let mut board = Board::load(MemoryStore::new());
    board.create("a", "1").unwrap();
    let (b, _) = board.create("b", "2").unwrap();
    board.move_task(b, Column::Done);

    let persisted = PersistedBoard::from(&board.projection());
    let mut storage = BoardStorage::new(MemoryStore::new());
    storage.save(&persisted).unwrap();
    let first = storage.store().get(TASKS_KEY).unwrap();
    storage.save(&persisted).unwrap();
    let second = storage.store().get(TASKS_KEY).unwrap();

    assert_eq!(first, second);
    assert_eq!(storage.load(), Some(persisted));
}

#[test]
fn test_delete_missing_id_changes_nothing() {
    let mut board = Board::load(MemoryStore::new());
    board.create("a", "").unwrap();
    board.create("b", "").unwrap();
    let before = snapshot(&board);
    let revision = board.revision();

    assert!(!board.delete(TaskId(1000)).is_changed());
    assert_eq!(snapshot(&board), before);
    assert_eq!(board.revision(), revision);
}

#[test]
fn test_move_to_current_column_changes_nothing() {
    let mut board = Board::load(MemoryStore::new());
    let (a, _) = board.create("a", "").unwrap();
    board.create("b", "").unwrap();
    let (c, _) = board.create("c", "").unwrap();
    board.move_task(c, Column::Progress);
    let before = snapshot(&board);

    assert!(!board.move_task(a, Column::Todo).is_changed());
    assert!(!board.move_task(c, Column::Progress).is_changed());
    assert_eq!(snapshot(&board), before);
}

#[test]
fn test_last_drag_source_wins() {
    let mut board = Board::load(MemoryStore::new());
    let (a, _) = board.create("a", "").unwrap();
    let (b, _) = board.create("b", "").unwrap();

    board.drag_start(a);
    board.drag_start(b);
    board.drop_on(Column::Done);

    assert_eq!(board.tasks().get(a).unwrap().status, Column::Todo);
    assert_eq!(board.tasks().get(b).unwrap().status, Column::Done);
}

#[test]
fn test_hover_does_not_touch_tasks() {
    let mut board = Board::load(MemoryStore::new());
    board.create("a", "").unwrap();
    let revision = board.revision();

    board.drag_enter(Column::Done);
    board.drag_leave(Column::Done);
    board.drag_enter(Column::Progress);

    assert_eq!(board.revision(), revision);
    assert_eq!(board.drag().hover_flags(), [false, true, false]);
}

#[test]
fn test_malformed_storage_is_overwritten() {
    let mut backend = MemoryStore::new();
    backend.set(TASKS_KEY, "<<<garbage>>>").unwrap();

    let mut board = Board::load(backend);
    assert!(board.tasks().is_empty());
    board.create("Recovered", "").unwrap();

    let raw = board.storage().store().get(TASKS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["todo"][0]["title"], "Recovered");
}

#[test]
fn test_rejected_writes_keep_board_usable() {
    let mut board = Board::load(MemoryStore::with_quota(10));

    let (id, outcome) = board.create("Too big to save", "").unwrap();
    assert!(outcome.save_error().is_some());
    assert!(board.is_persistence_degraded());

    assert!(board.move_task(id, Column::Progress).is_changed());
    assert!(board.delete(id).is_changed());
    assert!(board.tasks().is_empty());
}

#[test]
fn test_random_operation_mix_keeps_invariants() {
    let mut rng = Lcg(0x5eed);
    let mut board = Board::load(MemoryStore::new());
    let mut issued: HashSet<TaskId> = HashSet::new();

    for step in 0..500 {
        match rng.next(4) {
            0 => {
                let title = if rng.next(5) == 0 { "  ".to_string() } else { format!("task {}", step) };
                if let Some((id, _)) = board.create(&title, "") {
                    assert!(issued.insert(id), "id {} handed out twice", id);
                }
            }
            1 => {
                board.delete(TaskId(rng.next(60) + 1));
            }
            2 => {
                let column = Column::ALL[rng.next(3) as usize];
                board.move_task(TaskId(rng.next(60) + 1), column);
            }
            _ => {
                let names = ["todo", "progress", "done", "archive"];
                board.drag_start(TaskId(rng.next(60) + 1));
                board.drop_on_named(names[rng.next(4) as usize]);
            }
        }

        let ids: HashSet<TaskId> = board.tasks().all().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), board.tasks().len());
        for task in board.tasks().all() {
            assert!(Column::ALL.contains(&task.status));
            assert!(!task.title.trim().is_empty());
        }
        let projection = project(board.tasks().all());
        assert_eq!(projection.total(), board.tasks().len());
    }

    let before = snapshot(&board);
    let reloaded = Board::load(board.into_backend());
    assert_eq!(snapshot(&reloaded), before);
}

#[test]
fn test_config_location_from_home() {
    let _guard = test_env::lock_test_env();
    let temp_dir = TempDir::new().unwrap();
    test_env::write_rc(temp_dir.path(), "data.location=nested/custom.db\n");
    std::env::set_var("HOME", temp_dir.path());

    let resolved = DbConnection::resolve_path().unwrap();
    assert_eq!(
        resolved,
        temp_dir.path().join(".taskflow").join("nested/custom.db")
    );

    drop(temp_dir);
}

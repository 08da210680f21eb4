use super::*;
use crate::gateway::MockBoardGateway;
use async_trait::async_trait;
use kanban_domain::{Column, ColumnId, EntityId, RemoteId, Task, TaskPatch};
use mockall::predicate::eq;
use std::time::Duration;
use tokio::sync::{oneshot, Barrier};

fn task(id: RemoteId, title: &str, position: i32) -> Task {
    Task {
        id: EntityId::Remote(id),
        title: title.to_string(),
        description: None,
        position,
    }
}

fn column(id: RemoteId, title: &str, position: i32, tasks: Vec<Task>) -> Column {
    Column {
        id: EntityId::Remote(id),
        title: title.to_string(),
        position,
        is_default: false,
        tasks,
    }
}

/// Board 1 with columns A(10), B(20), C(30). A holds T(100), U(101), V(102).
fn sample_board() -> Board {
    Board::new(
        EntityId::Remote(1),
        "Roadmap".to_string(),
        vec![
            column(
                10,
                "A",
                0,
                vec![task(100, "T", 0), task(101, "U", 1), task(102, "V", 2)],
            ),
            column(20, "B", 1, vec![]),
            column(30, "C", 2, vec![]),
        ],
    )
}

fn store_with(gateway: MockBoardGateway) -> EntityStore {
    let store = EntityStore::new(Arc::new(gateway));
    store.set_current_board(sample_board());
    store
}

fn column_titles(board: &Board) -> Vec<&str> {
    board.columns.iter().map(|c| c.title.as_str()).collect()
}

fn task_titles(column: &Column) -> Vec<&str> {
    column.tasks.iter().map(|t| t.title.as_str()).collect()
}

fn assert_dense_positions(board: &Board) {
    for (ci, column) in board.columns.iter().enumerate() {
        assert_eq!(column.position, ci as i32, "column {}", column.title);
        for (ti, task) in column.tasks.iter().enumerate() {
            assert_eq!(task.position, ti as i32, "task {}", task.title);
        }
    }
}

fn current(store: &EntityStore) -> Arc<Board> {
    store.current_board().expect("board loaded")
}

#[tokio::test]
async fn test_noop_move_touches_nothing() {
    let mut gateway = MockBoardGateway::new();
    gateway.expect_move_column().never();
    gateway.expect_move_task().never();
    let store = store_with(gateway);
    let before = current(&store);

    store
        .move_column(EntityId::Remote(20), 1, 1)
        .await
        .unwrap();
    store
        .move_task(
            EntityId::Remote(101),
            EntityId::Remote(10),
            EntityId::Remote(10),
            1,
            1,
        )
        .await
        .unwrap();

    assert!(Arc::ptr_eq(&before, &current(&store)));
    assert!(store.take_notices().is_empty());
}

#[tokio::test]
async fn test_move_column_and_back() {
    let mut gateway = MockBoardGateway::new();
    gateway
        .expect_move_column()
        .with(eq(1), eq(10), eq(2))
        .times(1)
        .returning(|_, _, _| Ok(()));
    gateway
        .expect_move_column()
        .with(eq(1), eq(10), eq(0))
        .times(1)
        .returning(|_, _, _| Ok(()));
    let store = store_with(gateway);

    store.move_column(EntityId::Remote(10), 0, 2).await.unwrap();
    let moved = current(&store);
    assert_eq!(column_titles(&moved), vec!["B", "C", "A"]);
    assert_dense_positions(&moved);

    store.move_column(EntityId::Remote(10), 2, 0).await.unwrap();
    assert_eq!(*current(&store), sample_board());
}

#[tokio::test]
async fn test_failed_move_rolls_back_and_notifies() {
    let mut gateway = MockBoardGateway::new();
    gateway.expect_move_column().times(1).returning(|_, _, _| {
        Err(KanbanError::Server {
            status: 500,
            message: "boom".to_string(),
        })
    });
    let store = store_with(gateway);

    let result = store.move_column(EntityId::Remote(10), 0, 2).await;

    assert!(matches!(result, Err(KanbanError::Server { status: 500, .. })));
    assert_eq!(*current(&store), sample_board());
    let notices = store.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].operation, "column movement");
    assert!(notices[0].message.contains("Reverting changes"));
    assert!(store.take_notices().is_empty());
}

#[tokio::test]
async fn test_move_task_across_columns() {
    let mut gateway = MockBoardGateway::new();
    gateway
        .expect_move_task()
        .with(eq(10), eq(101), eq(30), eq(0))
        .times(1)
        .returning(|_, _, _, _| Ok(()));
    let store = store_with(gateway);

    store
        .move_task(
            EntityId::Remote(101),
            EntityId::Remote(10),
            EntityId::Remote(30),
            1,
            0,
        )
        .await
        .unwrap();

    let board = current(&store);
    assert_eq!(task_titles(&board.columns[0]), vec!["T", "V"]);
    assert_eq!(task_titles(&board.columns[2]), vec!["U"]);
    assert_dense_positions(&board);
}

#[tokio::test]
async fn test_move_task_with_stale_index_is_rejected_locally() {
    let mut gateway = MockBoardGateway::new();
    gateway.expect_move_task().never();
    let store = store_with(gateway);
    let before = current(&store);

    let result = store
        .move_task(
            EntityId::Remote(101),
            EntityId::Remote(10),
            EntityId::Remote(20),
            0,
            0,
        )
        .await;

    assert!(matches!(result, Err(KanbanError::Validation(_))));
    assert!(Arc::ptr_eq(&before, &current(&store)));
}

#[tokio::test]
async fn test_delete_task_reindexes() {
    let mut gateway = MockBoardGateway::new();
    gateway
        .expect_delete_task()
        .with(eq(10), eq(100))
        .times(1)
        .returning(|_, _| Ok(()));
    let store = store_with(gateway);

    store
        .delete_task(EntityId::Remote(10), EntityId::Remote(100))
        .await
        .unwrap();

    let board = current(&store);
    assert_eq!(task_titles(&board.columns[0]), vec!["U", "V"]);
    assert_eq!(
        board.columns[0]
            .tasks
            .iter()
            .map(|t| t.position)
            .collect::<Vec<_>>(),
        vec![0, 1]
    );
}

#[tokio::test]
async fn test_delete_unknown_task_is_not_found() {
    let mut gateway = MockBoardGateway::new();
    gateway.expect_delete_task().never();
    let store = store_with(gateway);

    let result = store
        .delete_task(EntityId::Remote(20), EntityId::Remote(100))
        .await;

    assert!(matches!(result, Err(KanbanError::NotFound(_))));
}

#[tokio::test]
async fn test_create_task_appends_regardless_of_server_position() {
    let mut gateway = MockBoardGateway::new();
    gateway
        .expect_create_task()
        .times(1)
        .returning(|column_id, title, description| {
            assert_eq!(column_id, 10);
            assert_eq!(description, "");
            Ok(Task {
                id: EntityId::Remote(200),
                title: title.to_string(),
                description: Some(String::new()),
                position: 0,
            })
        });
    let store = store_with(gateway);

    let created = store
        .create_task(EntityId::Remote(10), "W", None)
        .await
        .unwrap();
    assert_eq!(created.id, EntityId::Remote(200));

    let board = current(&store);
    let tasks = &board.columns[0].tasks;
    assert_eq!(task_titles(&board.columns[0]), vec!["T", "U", "V", "W"]);
    assert_eq!(tasks[3].id, EntityId::Remote(200));
    assert!(tasks.iter().all(|t| !t.id.is_pending()));
    assert_dense_positions(&board);
}

#[tokio::test]
async fn test_failed_create_removes_placeholder() {
    let mut gateway = MockBoardGateway::new();
    gateway
        .expect_create_task()
        .times(1)
        .returning(|_, _, _| Err(KanbanError::Network("connection refused".to_string())));
    let store = store_with(gateway);

    let result = store
        .create_task(EntityId::Remote(10), "W", Some("details".to_string()))
        .await;

    assert!(matches!(result, Err(KanbanError::Network(_))));
    assert_eq!(*current(&store), sample_board());
    assert_eq!(store.take_notices()[0].operation, "task creation");
}

#[tokio::test]
async fn test_blank_title_never_reaches_gateway() {
    // No expectations: any gateway call panics.
    let store = store_with(MockBoardGateway::new());
    let before = current(&store);

    let task = store.create_task(EntityId::Remote(10), "   ", None).await;
    let column = store.create_column("").await;
    let update = store
        .update_task(EntityId::Remote(100), TaskPatch::title(" "))
        .await;

    assert!(task.unwrap_err().is_validation());
    assert!(column.unwrap_err().is_validation());
    assert!(update.unwrap_err().is_validation());
    assert!(Arc::ptr_eq(&before, &current(&store)));
}

#[tokio::test]
async fn test_pending_target_is_rejected() {
    let store = EntityStore::new(Arc::new(MockBoardGateway::new()));
    let mut board = sample_board();
    let pending = Column::placeholder("Draft".to_string(), 3);
    let pending_id: ColumnId = pending.id;
    board.push_column(pending);
    store.set_current_board(board);

    let create = store.create_task(pending_id, "W", None).await;
    let delete = store.delete_column(pending_id).await;

    assert!(create.unwrap_err().is_validation());
    assert!(delete.unwrap_err().is_validation());
    assert_eq!(current(&store).columns.len(), 4);
}

#[tokio::test]
async fn test_mutation_without_board_is_rejected() {
    let store = EntityStore::new(Arc::new(MockBoardGateway::new()));
    let result = store.create_column("Done").await;
    assert!(result.unwrap_err().is_validation());
}

#[tokio::test]
async fn test_update_title_preserves_description() {
    let mut gateway = MockBoardGateway::new();
    gateway
        .expect_update_task()
        .withf(|task_id, patch| {
            *task_id == 100
                && patch.title.as_deref() == Some("Renamed")
                && patch.description.is_none()
        })
        .times(1)
        .returning(|_, _| Ok(()));
    let store = EntityStore::new(Arc::new(gateway));
    let mut board = sample_board();
    board.columns[0].tasks[0].description = Some("keep me".to_string());
    store.set_current_board(board);

    store
        .update_task(EntityId::Remote(100), TaskPatch::title("Renamed"))
        .await
        .unwrap();

    let board = current(&store);
    let task = board.find_task(EntityId::Remote(100)).unwrap();
    assert_eq!(task.title, "Renamed");
    assert_eq!(task.description.as_deref(), Some("keep me"));
}

#[tokio::test]
async fn test_empty_patch_is_a_noop() {
    let store = store_with(MockBoardGateway::new());
    let before = current(&store);
    store
        .update_task(EntityId::Remote(100), TaskPatch::default())
        .await
        .unwrap();
    assert!(Arc::ptr_eq(&before, &current(&store)));
}

#[tokio::test]
async fn test_create_and_delete_column() {
    let mut gateway = MockBoardGateway::new();
    gateway
        .expect_create_column()
        .times(1)
        .returning(|_, title| Ok(column(40, title, 9, vec![])));
    gateway
        .expect_delete_column()
        .with(eq(1), eq(20))
        .times(1)
        .returning(|_, _| Ok(()));
    let store = store_with(gateway);

    let created = store.create_column("Done").await.unwrap();
    assert_eq!(created.id, EntityId::Remote(40));
    let board = current(&store);
    assert_eq!(column_titles(&board), vec!["A", "B", "C", "Done"]);
    assert_dense_positions(&board);

    store.delete_column(EntityId::Remote(20)).await.unwrap();
    let board = current(&store);
    assert_eq!(column_titles(&board), vec!["A", "C", "Done"]);
    assert_dense_positions(&board);
}

#[tokio::test]
async fn test_positions_stay_dense_across_mutations() {
    let mut gateway = MockBoardGateway::new();
    let mut next_id = 500;
    gateway.expect_create_task().returning(move |_, title, _| {
        next_id += 1;
        Ok(task(next_id, title, 42))
    });
    gateway.expect_delete_task().returning(|_, _| Ok(()));
    gateway.expect_move_task().returning(|_, _, _, _| Ok(()));
    let store = store_with(gateway);

    store
        .create_task(EntityId::Remote(20), "X", None)
        .await
        .unwrap();
    assert_dense_positions(&current(&store));
    store
        .delete_task(EntityId::Remote(10), EntityId::Remote(101))
        .await
        .unwrap();
    assert_dense_positions(&current(&store));
    store
        .move_task(
            EntityId::Remote(100),
            EntityId::Remote(10),
            EntityId::Remote(20),
            0,
            1,
        )
        .await
        .unwrap();
    assert_dense_positions(&current(&store));
    store
        .create_task(EntityId::Remote(10), "Y", None)
        .await
        .unwrap();

    let board = current(&store);
    assert_dense_positions(&board);
    assert_eq!(task_titles(&board.columns[0]), vec!["V", "Y"]);
    assert_eq!(task_titles(&board.columns[1]), vec!["X", "T"]);
}

#[tokio::test]
async fn test_fetch_board_details_loads_columns_then_tasks() {
    let mut gateway = MockBoardGateway::new();
    gateway
        .expect_get_columns()
        .with(eq(1))
        .times(1)
        .returning(|_| {
            Ok(vec![
                column(30, "C", 2, vec![]),
                column(10, "A", 0, vec![]),
                column(20, "B", 1, vec![]),
            ])
        });
    gateway
        .expect_get_tasks()
        .times(3)
        .returning(|column_id| match column_id {
            10 => Ok(vec![task(100, "T", 0)]),
            _ => Ok(vec![]),
        });
    let store = EntityStore::new(Arc::new(gateway));
    store.set_boards(vec![BoardSummary {
        id: EntityId::Remote(1),
        name: "Roadmap".to_string(),
        description: Some("Q3".to_string()),
    }]);

    store.fetch_board_details(EntityId::Remote(1)).await.unwrap();

    let snapshot = store.snapshot();
    assert!(!snapshot.is_loading);
    assert!(snapshot.error.is_none());
    let board = snapshot.current_board.unwrap();
    assert_eq!(board.name, "Roadmap");
    assert_eq!(column_titles(&board), vec!["A", "B", "C"]);
    assert_eq!(task_titles(&board.columns[0]), vec!["T"]);
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_board() {
    let mut gateway = MockBoardGateway::new();
    gateway
        .expect_get_columns()
        .times(1)
        .returning(|_| Err(KanbanError::NotFound("Board 2".to_string())));
    let store = store_with(gateway);

    let result = store.fetch_board_details(EntityId::Remote(2)).await;

    assert!(matches!(result, Err(KanbanError::NotFound(_))));
    assert_eq!(*current(&store), sample_board());
    assert!(!store.is_loading());
    assert!(store.error().is_some());
}

#[tokio::test]
async fn test_fetch_boards_sets_error_on_failure() {
    let mut gateway = MockBoardGateway::new();
    gateway
        .expect_list_boards()
        .times(1)
        .returning(|| Err(KanbanError::Unauthorized));
    let store = EntityStore::new(Arc::new(gateway));

    assert!(store.fetch_boards().await.is_err());
    assert!(store.error().is_some());
    assert!(store.boards().is_empty());

    store.clear_error();
    assert!(store.error().is_none());
}

#[tokio::test]
async fn test_create_board_reconciles_placeholder() {
    let mut gateway = MockBoardGateway::new();
    gateway
        .expect_create_board()
        .times(1)
        .returning(|name| {
            Ok(BoardSummary {
                id: EntityId::Remote(5),
                name: name.to_string(),
                description: Some(String::new()),
            })
        });
    let store = EntityStore::new(Arc::new(gateway));

    store.create_board("Ops").await.unwrap();

    let boards = store.boards();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].id, EntityId::Remote(5));
    assert_eq!(boards[0].name, "Ops");
}

#[tokio::test]
async fn test_failed_board_delete_restores_list() {
    let mut gateway = MockBoardGateway::new();
    gateway
        .expect_delete_board()
        .with(eq(1))
        .times(1)
        .returning(|_| Err(KanbanError::Conflict("board not empty".to_string())));
    let store = EntityStore::new(Arc::new(gateway));
    let boards = vec![
        BoardSummary {
            id: EntityId::Remote(1),
            name: "One".to_string(),
            description: None,
        },
        BoardSummary {
            id: EntityId::Remote(2),
            name: "Two".to_string(),
            description: None,
        },
    ];
    store.set_boards(boards.clone());

    let result = store.delete_board(EntityId::Remote(1)).await;

    assert!(matches!(result, Err(KanbanError::Conflict(_))));
    assert_eq!(*store.boards(), boards);
    assert_eq!(store.take_notices()[0].operation, "board deletion");
}

#[tokio::test]
async fn test_reset_clears_everything() {
    let store = store_with(MockBoardGateway::new());
    store.reset();
    let snapshot = store.snapshot();
    assert!(snapshot.current_board.is_none());
    assert!(snapshot.boards.is_empty());
}

/// Holds `move_task` until the test releases it. Every board loads as a
/// single empty "Fresh" column.
struct GatedGateway {
    entered: Mutex<Option<oneshot::Sender<()>>>,
    release: Mutex<Option<oneshot::Receiver<()>>>,
    fail_move: bool,
}

impl GatedGateway {
    fn new(fail_move: bool) -> (Self, oneshot::Receiver<()>, oneshot::Sender<()>) {
        let (entered_tx, entered_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        let gateway = Self {
            entered: Mutex::new(Some(entered_tx)),
            release: Mutex::new(Some(release_rx)),
            fail_move,
        };
        (gateway, entered_rx, release_tx)
    }
}

#[async_trait]
impl BoardGateway for GatedGateway {
    async fn list_boards(&self) -> KanbanResult<Vec<BoardSummary>> {
        unreachable!()
    }
    async fn create_board(&self, _: &str) -> KanbanResult<BoardSummary> {
        unreachable!()
    }
    async fn delete_board(&self, _: RemoteId) -> KanbanResult<()> {
        unreachable!()
    }
    async fn get_columns(&self, _: RemoteId) -> KanbanResult<Vec<Column>> {
        Ok(vec![column(40, "Fresh", 0, vec![])])
    }
    async fn create_column(&self, _: RemoteId, _: &str) -> KanbanResult<Column> {
        unreachable!()
    }
    async fn delete_column(&self, _: RemoteId, _: RemoteId) -> KanbanResult<()> {
        unreachable!()
    }
    async fn move_column(&self, _: RemoteId, _: RemoteId, _: usize) -> KanbanResult<()> {
        unreachable!()
    }
    async fn get_tasks(&self, _: RemoteId) -> KanbanResult<Vec<Task>> {
        Ok(vec![])
    }
    async fn create_task(&self, _: RemoteId, _: &str, _: &str) -> KanbanResult<Task> {
        unreachable!()
    }
    async fn delete_task(&self, _: RemoteId, _: RemoteId) -> KanbanResult<()> {
        unreachable!()
    }

    async fn move_task(
        &self,
        _: RemoteId,
        _: RemoteId,
        _: RemoteId,
        _: usize,
    ) -> KanbanResult<()> {
        if let Some(entered) = self.entered.lock().take() {
            let _ = entered.send(());
        }
        let release = self.release.lock().take();
        if let Some(release) = release {
            let _ = release.await;
        }
        if self.fail_move {
            Err(KanbanError::Network("timed out".to_string()))
        } else {
            Ok(())
        }
    }

    async fn update_task(&self, _: RemoteId, _: &TaskPatch) -> KanbanResult<()> {
        Ok(())
    }
}

fn occurrences(board: &Board, task_id: EntityId) -> usize {
    board
        .columns
        .iter()
        .flat_map(|c| c.tasks.iter())
        .filter(|t| t.id == task_id)
        .count()
}

#[tokio::test]
async fn test_update_while_move_in_flight() {
    let (gateway, entered, release) = GatedGateway::new(false);
    let store = EntityStore::new(Arc::new(gateway));
    store.set_current_board(sample_board());
    let t = EntityId::Remote(100);

    let mover = store.move_task(t, EntityId::Remote(10), EntityId::Remote(20), 0, 0);
    let editor = async {
        entered.await.unwrap();
        store
            .update_task(t, TaskPatch::title("T2"))
            .await
            .unwrap();

        let board = current(&store);
        assert_eq!(occurrences(&board, t), 1);
        assert_eq!(board.columns[1].tasks[0].title, "T2");
        release.send(()).unwrap();
    };
    let (moved, ()) = tokio::join!(mover, editor);

    moved.unwrap();
    let board = current(&store);
    assert_eq!(occurrences(&board, t), 1);
    assert_eq!(board.columns[1].tasks[0].id, t);
    assert_eq!(board.columns[1].tasks[0].title, "T2");
}

#[tokio::test]
async fn test_failed_move_with_concurrent_update_keeps_single_copy() {
    let (gateway, entered, release) = GatedGateway::new(true);
    let store = EntityStore::new(Arc::new(gateway));
    store.set_current_board(sample_board());
    let t = EntityId::Remote(100);

    let mover = store.move_task(t, EntityId::Remote(10), EntityId::Remote(20), 0, 0);
    let editor = async {
        entered.await.unwrap();
        store
            .update_task(t, TaskPatch::title("T2"))
            .await
            .unwrap();
        release.send(()).unwrap();
    };
    let (moved, ()) = tokio::join!(mover, editor);

    assert!(moved.is_err());
    let board = current(&store);
    assert_eq!(occurrences(&board, t), 1);
    assert_eq!(board.columns[0].tasks[0].id, t);
    assert_eq!(store.take_notices().len(), 1);
}

#[tokio::test]
async fn test_failed_move_after_board_switch_keeps_new_board() {
    let (gateway, entered, release) = GatedGateway::new(true);
    let store = EntityStore::new(Arc::new(gateway));
    store.set_current_board(sample_board());
    let t = EntityId::Remote(100);

    let mover = store.move_task(t, EntityId::Remote(10), EntityId::Remote(20), 0, 0);
    let switcher = async {
        entered.await.unwrap();
        store.fetch_board_details(EntityId::Remote(2)).await.unwrap();
        release.send(()).unwrap();
    };
    let (moved, ()) = tokio::join!(mover, switcher);

    assert!(moved.is_err());
    let board = current(&store);
    assert_eq!(board.id, EntityId::Remote(2));
    assert_eq!(column_titles(&board), vec!["Fresh"]);
    assert_eq!(store.take_notices().len(), 1);
}

#[tokio::test]
async fn test_failed_move_after_reload_keeps_fresh_board() {
    let (gateway, entered, release) = GatedGateway::new(true);
    let store = EntityStore::new(Arc::new(gateway));
    store.set_current_board(sample_board());
    let t = EntityId::Remote(100);

    let mover = store.move_task(t, EntityId::Remote(10), EntityId::Remote(20), 0, 0);
    let reloader = async {
        entered.await.unwrap();
        store.fetch_board_details(EntityId::Remote(1)).await.unwrap();
        release.send(()).unwrap();
    };
    let (moved, ()) = tokio::join!(mover, reloader);

    assert!(moved.is_err());
    let board = current(&store);
    assert_eq!(board.id, EntityId::Remote(1));
    assert_eq!(column_titles(&board), vec!["Fresh"]);
    assert_eq!(store.take_notices().len(), 1);
}

#[tokio::test]
async fn test_failure_after_reset_is_dropped() {
    let (gateway, entered, release) = GatedGateway::new(true);
    let store = EntityStore::new(Arc::new(gateway));
    store.set_current_board(sample_board());

    let mover = store.move_task(
        EntityId::Remote(100),
        EntityId::Remote(10),
        EntityId::Remote(20),
        0,
        0,
    );
    let logout = async {
        entered.await.unwrap();
        store.reset();
        release.send(()).unwrap();
    };
    let (moved, ()) = tokio::join!(mover, logout);

    assert!(moved.is_err());
    assert!(store.current_board().is_none());
    assert!(store.take_notices().is_empty());
}

/// Board 1's column load waits for `release`; any other board loads at once.
struct HeldLoadGateway {
    release: Mutex<Option<oneshot::Receiver<()>>>,
}

#[async_trait]
impl BoardGateway for HeldLoadGateway {
    async fn list_boards(&self) -> KanbanResult<Vec<BoardSummary>> {
        unreachable!()
    }
    async fn create_board(&self, _: &str) -> KanbanResult<BoardSummary> {
        unreachable!()
    }
    async fn delete_board(&self, _: RemoteId) -> KanbanResult<()> {
        unreachable!()
    }
    async fn get_columns(&self, board_id: RemoteId) -> KanbanResult<Vec<Column>> {
        if board_id == 1 {
            let release = self.release.lock().take();
            if let Some(release) = release {
                let _ = release.await;
            }
        }
        Ok(vec![column(board_id * 10, "A", 0, vec![])])
    }
    async fn create_column(&self, _: RemoteId, _: &str) -> KanbanResult<Column> {
        unreachable!()
    }
    async fn delete_column(&self, _: RemoteId, _: RemoteId) -> KanbanResult<()> {
        unreachable!()
    }
    async fn move_column(&self, _: RemoteId, _: RemoteId, _: usize) -> KanbanResult<()> {
        unreachable!()
    }
    async fn get_tasks(&self, _: RemoteId) -> KanbanResult<Vec<Task>> {
        Ok(vec![])
    }
    async fn create_task(&self, _: RemoteId, _: &str, _: &str) -> KanbanResult<Task> {
        unreachable!()
    }
    async fn delete_task(&self, _: RemoteId, _: RemoteId) -> KanbanResult<()> {
        unreachable!()
    }
    async fn move_task(&self, _: RemoteId, _: RemoteId, _: RemoteId, _: usize) -> KanbanResult<()> {
        unreachable!()
    }
    async fn update_task(&self, _: RemoteId, _: &TaskPatch) -> KanbanResult<()> {
        unreachable!()
    }
}

#[tokio::test]
async fn test_superseded_load_is_discarded() {
    let (release_tx, release_rx) = oneshot::channel();
    let store = EntityStore::new(Arc::new(HeldLoadGateway {
        release: Mutex::new(Some(release_rx)),
    }));

    let first = store.fetch_board_details(EntityId::Remote(1));
    let second = async {
        store.fetch_board_details(EntityId::Remote(2)).await.unwrap();
        release_tx.send(()).unwrap();
    };
    let (first, ()) = tokio::join!(first, second);

    first.unwrap();
    let snapshot = store.snapshot();
    assert!(!snapshot.is_loading);
    let board = snapshot.current_board.unwrap();
    assert_eq!(board.id, EntityId::Remote(2));
    assert_eq!(board.columns[0].id, EntityId::Remote(20));
}

/// Every `get_tasks` call waits until all of them have started.
struct BarrierGateway {
    barrier: Barrier,
}

#[async_trait]
impl BoardGateway for BarrierGateway {
    async fn list_boards(&self) -> KanbanResult<Vec<BoardSummary>> {
        unreachable!()
    }
    async fn create_board(&self, _: &str) -> KanbanResult<BoardSummary> {
        unreachable!()
    }
    async fn delete_board(&self, _: RemoteId) -> KanbanResult<()> {
        unreachable!()
    }
    async fn get_columns(&self, _: RemoteId) -> KanbanResult<Vec<Column>> {
        Ok(vec![
            column(10, "A", 0, vec![]),
            column(20, "B", 1, vec![]),
            column(30, "C", 2, vec![]),
        ])
    }
    async fn create_column(&self, _: RemoteId, _: &str) -> KanbanResult<Column> {
        unreachable!()
    }
    async fn delete_column(&self, _: RemoteId, _: RemoteId) -> KanbanResult<()> {
        unreachable!()
    }
    async fn move_column(&self, _: RemoteId, _: RemoteId, _: usize) -> KanbanResult<()> {
        unreachable!()
    }
    async fn get_tasks(&self, column_id: RemoteId) -> KanbanResult<Vec<Task>> {
        self.barrier.wait().await;
        Ok(vec![task(column_id * 10, "t", 0)])
    }
    async fn create_task(&self, _: RemoteId, _: &str, _: &str) -> KanbanResult<Task> {
        unreachable!()
    }
    async fn delete_task(&self, _: RemoteId, _: RemoteId) -> KanbanResult<()> {
        unreachable!()
    }
    async fn move_task(&self, _: RemoteId, _: RemoteId, _: RemoteId, _: usize) -> KanbanResult<()> {
        unreachable!()
    }
    async fn update_task(&self, _: RemoteId, _: &TaskPatch) -> KanbanResult<()> {
        unreachable!()
    }
}

#[tokio::test]
async fn test_task_loads_run_concurrently() {
    let store = EntityStore::new(Arc::new(BarrierGateway {
        barrier: Barrier::new(3),
    }));

    // Sequential loads would park on the barrier forever.
    tokio::time::timeout(
        Duration::from_secs(5),
        store.fetch_board_details(EntityId::Remote(1)),
    )
    .await
    .expect("task loads did not overlap")
    .unwrap();

    let board = current(&store);
    assert!(board.columns.iter().all(|c| c.tasks.len() == 1));
}

use crate::cli::{TaskAction, TaskUpdateArgs};
use crate::context::{self, CliContext};
use crate::handlers::column::MoveResult;
use crate::output;
use kanban_core::KanbanError;
use kanban_domain::{EntityId, TaskPatch};

pub async fn handle(ctx: &CliContext, action: TaskAction) -> anyhow::Result<()> {
    let store = ctx.store();
    match action {
        TaskAction::Create {
            board_id,
            column_id,
            title,
            description,
        } => {
            ctx.open_board(board_id).await?;
            let task = store
                .create_task(EntityId::Remote(column_id), &title, description)
                .await
                .map_err(|e| ctx.explain(e))?;
            output::output_success(&task);
        }
        TaskAction::Delete { board_id, id } => {
            let board = ctx.open_board(board_id).await?;
            let task_id = EntityId::Remote(id);
            let (ci, _) = board
                .task_location(task_id)
                .ok_or_else(|| KanbanError::NotFound(format!("Task {}", task_id)))?;
            store
                .delete_task(board.columns[ci].id, task_id)
                .await
                .map_err(|e| ctx.explain(e))?;
            output::output_success(serde_json::json!({ "deleted": id }));
        }
        TaskAction::Move {
            board_id,
            id,
            column_id,
            position,
        } => {
            let board = ctx.open_board(board_id).await?;
            let event = context::task_drag(&board, id, column_id, position)?;
            let moved = ctx
                .session()
                .handle_drag_end(&event)
                .await
                .map_err(|e| ctx.explain(e))?;

            let board = store.current_board().unwrap_or(board);
            output::output_success(MoveResult {
                moved,
                board: &board,
            });
        }
        TaskAction::Update(args) => handle_update(ctx, args).await?,
    }
    Ok(())
}

async fn handle_update(ctx: &CliContext, args: TaskUpdateArgs) -> anyhow::Result<()> {
    let patch = TaskPatch {
        title: args.title,
        description: args.description,
    };
    if patch.is_empty() {
        anyhow::bail!("Nothing to update: pass --title and/or --description");
    }

    ctx.open_board(args.board_id).await?;
    let task_id = EntityId::Remote(args.id);
    let session = ctx.session();
    session.open_task(task_id);
    session
        .store()
        .update_task(task_id, patch)
        .await
        .map_err(|e| ctx.explain(e))?;

    match session.focused_task() {
        Some(task) => output::output_success(&task),
        None => output::output_error(&format!("Task not found: {}", task_id)),
    }
    Ok(())
}

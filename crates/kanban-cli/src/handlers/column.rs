use crate::cli::ColumnAction;
use crate::context::{self, CliContext};
use crate::output;
use kanban_domain::{Board, EntityId};
use serde::Serialize;

#[derive(Serialize)]
pub struct MoveResult<'a> {
    pub moved: bool,
    pub board: &'a Board,
}

pub async fn handle(ctx: &CliContext, action: ColumnAction) -> anyhow::Result<()> {
    let store = ctx.store();
    match action {
        ColumnAction::Create { board_id, title } => {
            ctx.open_board(board_id).await?;
            let column = store
                .create_column(&title)
                .await
                .map_err(|e| ctx.explain(e))?;
            output::output_success(&column);
        }
        ColumnAction::Delete { board_id, id } => {
            ctx.open_board(board_id).await?;
            store
                .delete_column(EntityId::Remote(id))
                .await
                .map_err(|e| ctx.explain(e))?;
            output::output_success(serde_json::json!({ "deleted": id }));
        }
        ColumnAction::Move {
            board_id,
            id,
            position,
        } => {
            let board = ctx.open_board(board_id).await?;
            let event = context::column_drag(&board, id, position)?;
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
    }
    Ok(())
}

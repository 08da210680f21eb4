use crate::cli::BoardAction;
use crate::context::CliContext;
use crate::output;
use kanban_domain::EntityId;

pub async fn handle(ctx: &CliContext, action: BoardAction) -> anyhow::Result<()> {
    let store = ctx.store();
    match action {
        BoardAction::List => {
            store.fetch_boards().await?;
            output::output_list(store.boards().to_vec());
        }
        BoardAction::Create { name } => {
            let board = store.create_board(&name).await.map_err(|e| ctx.explain(e))?;
            output::output_success(&board);
        }
        BoardAction::Delete { id } => {
            store.fetch_boards().await?;
            store
                .delete_board(EntityId::Remote(id))
                .await
                .map_err(|e| ctx.explain(e))?;
            output::output_success(serde_json::json!({ "deleted": id }));
        }
        BoardAction::Show { id } => {
            let board = ctx.open_board(id).await?;
            output::output_success(&*board);
        }
    }
    Ok(())
}

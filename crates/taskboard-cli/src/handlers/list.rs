use crate::cli::ListAction;
use crate::context::CliContext;
use crate::output;
use taskboard_core::BoardError;

pub async fn handle(ctx: &mut CliContext, action: ListAction) -> anyhow::Result<()> {
    match action {
        ListAction::Create { name, cards } => {
            let list = ctx.store.create_list(&name, cards).await?;
            output::output_success(&list)?;
        }
        ListAction::Rename { id, name } => {
            let list = ctx.store.rename_list(id, &name).await?;
            output::output_success(&list)?;
        }
        ListAction::Delete { id } => {
            ctx.store.remove_list(id).await?;
            output::output_success(serde_json::json!({"deleted": id.to_string()}))?;
        }
        ListAction::Show { id } => match ctx.store.get_list(id) {
            Some(list) => output::output_success(list)?,
            None => return Err(BoardError::NotFound(format!("List {}", id)).into()),
        },
        ListAction::Ls => {
            output::output_list(ctx.store.lists().iter().collect())?;
        }
        ListAction::Move {
            from_index,
            to_index,
        } => {
            ctx.store.reorder_lists(from_index, to_index).await?;
            output::output_list(ctx.store.lists().iter().collect())?;
        }
    }
    Ok(())
}

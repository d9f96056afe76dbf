use crate::context::CliContext;
use crate::output;
use taskboard_core::BoardError;
use taskboard_domain::DragResult;

/// Apply a drag-completion event, e.g.
/// `{"dragged_id": "...", "kind": "card", "source": {"container_id": "<list>", "index": 0}, "destination": {"container_id": "<list>", "index": 2}}`.
pub async fn handle(ctx: &mut CliContext, event: &str) -> anyhow::Result<()> {
    let drag: DragResult = serde_json::from_str(event)
        .map_err(|e| BoardError::Validation(format!("Invalid drag event: {}", e)))?;
    let applied = ctx.store.apply_drag(&drag).await?;
    output::output_success(serde_json::json!({
        "applied": applied,
        "lists": ctx.store.lists(),
    }))
}

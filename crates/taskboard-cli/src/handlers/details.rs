//! Card detail commands. Each one opens a card editor, makes a single edit
//! and saves the whole card back through the store.

use crate::cli::{AttachArgs, ChecklistAction, CommentAction};
use crate::context::CliContext;
use crate::output;
use taskboard_core::BoardError;
use taskboard_domain::Attachment;
use uuid::Uuid;

pub async fn handle_checklist(ctx: &mut CliContext, action: ChecklistAction) -> anyhow::Result<()> {
    match action {
        ChecklistAction::Add { card_id, text } => {
            let (card, item_id) = ctx
                .edit_card(card_id, |editor, _, _| editor.add_checklist_item(&text))
                .await?;
            output::output_success(serde_json::json!({
                "item_id": item_id.to_string(),
                "card": card,
            }))?;
        }
        ChecklistAction::Toggle { card_id, item_id } => {
            let (card, completed) = ctx
                .edit_card(card_id, |editor, _, _| editor.toggle_checklist_item(item_id))
                .await?;
            output::output_success(serde_json::json!({
                "completed": completed,
                "card": card,
            }))?;
        }
        ChecklistAction::Remove { card_id, item_id } => {
            let (card, ()) = ctx
                .edit_card(card_id, |editor, _, _| editor.remove_checklist_item(item_id))
                .await?;
            output::output_success(&card)?;
        }
        ChecklistAction::HideCompleted { card_id } => {
            let (card, hidden) = ctx
                .edit_card(card_id, |editor, _, _| Ok(editor.toggle_hide_completed()))
                .await?;
            output::output_success(serde_json::json!({
                "hide_completed": hidden,
                "card": card,
            }))?;
        }
    }
    Ok(())
}

pub async fn handle_comment(ctx: &mut CliContext, action: CommentAction) -> anyhow::Result<()> {
    match action {
        CommentAction::Add { card_id, text } => {
            let (_, comment) = ctx
                .edit_card(card_id, |editor, session, config| {
                    editor
                        .add_comment(session, &text, &config.comment_date_format)
                        .map(Clone::clone)
                })
                .await?;
            output::output_success(&comment)?;
        }
    }
    Ok(())
}

pub async fn handle_assign(ctx: &mut CliContext, card_id: Uuid, user_id: &str) -> anyhow::Result<()> {
    let (card, assigned) = ctx
        .edit_card(card_id, |editor, _, config| {
            let user = config
                .find_user(user_id)
                .cloned()
                .ok_or_else(|| BoardError::NotFound(format!("User {}", user_id)))?;
            Ok(editor.toggle_assignee(user))
        })
        .await?;
    output::output_success(serde_json::json!({
        "assigned": assigned,
        "assignees": card.details.assignees,
    }))
}

pub async fn handle_attach(ctx: &mut CliContext, args: AttachArgs) -> anyhow::Result<()> {
    if args.name.trim().is_empty() {
        return Err(BoardError::Validation("Attachment name cannot be empty".into()).into());
    }
    let attachment = Attachment {
        name: args.name,
        size_bytes: args.size_bytes,
        media_type: args.media_type,
    };
    let (card, ()) = ctx
        .edit_card(args.card_id, |editor, _, _| {
            let mut attachments = editor.draft().attachments.clone();
            attachments.push(attachment);
            editor.set_attachments(attachments);
            Ok(())
        })
        .await?;
    output::output_success(serde_json::json!({
        "attachments": card.details.attachments,
    }))
}

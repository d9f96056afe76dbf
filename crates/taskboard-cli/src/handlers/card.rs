use crate::cli::{CardAction, CardUpdateArgs};
use crate::context::CliContext;
use crate::output;
use taskboard_core::BoardError;
use taskboard_domain::{CardPriority, CardUpdate, FieldUpdate, Reminder};

pub async fn handle(ctx: &mut CliContext, action: CardAction) -> anyhow::Result<()> {
    match action {
        CardAction::Add { list_id, text } => {
            let card = ctx.store.add_card(list_id, &text).await?;
            output::output_success(&card)?;
        }
        CardAction::Remove { list_id, index } => {
            let card = ctx.store.remove_card(list_id, index).await?;
            output::output_success(serde_json::json!({
                "removed": card.id.to_string(),
                "text": card.text,
            }))?;
        }
        CardAction::Move {
            from_list,
            from_index,
            to_list,
            to_index,
        } => {
            ctx.store
                .reorder_or_transfer_cards(from_list, from_index, to_list, to_index)
                .await?;
            let mut lists = vec![ctx.store.get_list(from_list)];
            if from_list != to_list {
                lists.push(ctx.store.get_list(to_list));
            }
            output::output_list(lists.into_iter().flatten().collect())?;
        }
        CardAction::Show { id } => match ctx.store.find_card(id) {
            Some((list, index, card)) => output::output_success(serde_json::json!({
                "list_id": list.id.to_string(),
                "index": index,
                "card": card,
            }))?,
            None => return Err(BoardError::NotFound(format!("Card {}", id)).into()),
        },
        CardAction::Update(args) => {
            let id = args.id;
            let updates = build_card_update(args)?;
            if updates.is_empty() {
                return Err(BoardError::Validation("No fields to update".into()).into());
            }
            let card = ctx.store.update_card(id, updates).await?;
            output::output_success(&card)?;
        }
    }
    Ok(())
}

fn build_card_update(args: CardUpdateArgs) -> Result<CardUpdate, BoardError> {
    let priority = args
        .priority
        .as_deref()
        .map(str::parse::<CardPriority>)
        .transpose()?;
    let reminder = args
        .reminder
        .as_deref()
        .map(str::parse::<Reminder>)
        .transpose()?;
    if let Some(text) = &args.text {
        if text.trim().is_empty() {
            return Err(BoardError::Validation("Card text cannot be empty".into()));
        }
    }

    Ok(CardUpdate {
        text: args.text,
        description: if args.clear_description {
            FieldUpdate::Clear
        } else {
            args.description
                .map(FieldUpdate::Set)
                .unwrap_or(FieldUpdate::NoChange)
        },
        start_date: date_update(args.start_date.as_deref(), args.clear_start_date)?,
        end_date: date_update(args.end_date.as_deref(), args.clear_end_date)?,
        priority,
        reminder,
        assigned_by: args.assigned_by,
        archived: args.archived,
        ..Default::default()
    })
}

fn date_update(
    value: Option<&str>,
    clear: bool,
) -> Result<FieldUpdate<chrono::DateTime<chrono::Utc>>, BoardError> {
    if clear {
        return Ok(FieldUpdate::Clear);
    }
    match value {
        Some(d) => Ok(FieldUpdate::Set(parse_datetime(d)?)),
        None => Ok(FieldUpdate::NoChange),
    }
}

fn parse_datetime(s: &str) -> Result<chrono::DateTime<chrono::Utc>, BoardError> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .or_else(|_| {
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| ())
                .and_then(|d| d.and_hms_opt(0, 0, 0).ok_or(()))
                .map(|dt| dt.and_utc())
        })
        .map_err(|_| {
            BoardError::Validation(format!(
                "Invalid date '{}'. Supported formats: YYYY-MM-DD or RFC 3339 (e.g., 2024-01-15T10:30:00Z)",
                s
            ))
        })
}

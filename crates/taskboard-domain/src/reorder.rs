//! Reorder engine.
//!
//! Pure functions that turn a completed drag into a new ordering of lists and
//! cards. Inputs are never mutated; callers get back a fresh `Vec<TaskList>`
//! to commit. Index semantics follow [`taskboard_core::reorder`].

use taskboard_core::reorder::{can_move, can_transfer, move_item, transfer_item};
use taskboard_core::{BoardError, BoardResult};

use crate::drag::{ContainerId, DragKind, DragResult};
use crate::list::{ListId, TaskList};

/// Move the list at `from` to `to`.
pub fn reorder_lists(lists: &[TaskList], from: usize, to: usize) -> BoardResult<Vec<TaskList>> {
    if !can_move(lists.len(), from, to) {
        return Err(BoardError::Internal(format!(
            "List move {} -> {} out of range for {} lists",
            from,
            to,
            lists.len()
        )));
    }
    let mut next = lists.to_vec();
    move_item(&mut next, from, to);
    Ok(next)
}

/// Move a card within one list, or transfer it into another list.
pub fn reorder_cards(
    lists: &[TaskList],
    source_list: ListId,
    from: usize,
    destination_list: ListId,
    to: usize,
) -> BoardResult<Vec<TaskList>> {
    let source_idx = list_position(lists, source_list)?;
    let destination_idx = list_position(lists, destination_list)?;
    let mut next = lists.to_vec();

    if source_idx == destination_idx {
        let list = &mut next[source_idx];
        if !can_move(list.cards.len(), from, to) {
            return Err(out_of_range(list, from, to));
        }
        move_item(&mut list.cards, from, to);
        list.touch();
    } else {
        let (source, destination) = pair_mut(&mut next, source_idx, destination_idx);
        if !can_transfer(source.cards.len(), from, destination.cards.len(), to) {
            return Err(BoardError::Internal(format!(
                "Card transfer {}[{}] -> {}[{}] out of range",
                source.id, from, destination.id, to
            )));
        }
        transfer_item(&mut source.cards, from, &mut destination.cards, to);
        source.touch();
        destination.touch();
    }

    Ok(next)
}

/// Compute the board after a drag. `None` means the drag was cancelled and
/// nothing changes.
pub fn apply_drag(lists: &[TaskList], drag: &DragResult) -> BoardResult<Option<Vec<TaskList>>> {
    let Some(destination) = drag.destination else {
        return Ok(None);
    };

    let next = match drag.kind {
        DragKind::List => reorder_lists(lists, drag.source.index, destination.index)?,
        DragKind::Card => {
            let source_list = list_container(drag.source.container_id)?;
            let destination_list = list_container(destination.container_id)?;
            reorder_cards(
                lists,
                source_list,
                drag.source.index,
                destination_list,
                destination.index,
            )?
        }
    };
    Ok(Some(next))
}

fn list_container(container: ContainerId) -> BoardResult<ListId> {
    match container {
        ContainerId::List(id) => Ok(id),
        ContainerId::Board => Err(BoardError::Validation(
            "Card drags must start and end inside a list".into(),
        )),
    }
}

fn list_position(lists: &[TaskList], id: ListId) -> BoardResult<usize> {
    lists
        .iter()
        .position(|l| l.id == id)
        .ok_or_else(|| BoardError::NotFound(format!("List {}", id)))
}

fn out_of_range(list: &TaskList, from: usize, to: usize) -> BoardError {
    BoardError::Internal(format!(
        "Card move {} -> {} out of range for list {} with {} cards",
        from,
        to,
        list.id,
        list.cards.len()
    ))
}

/// Borrow two distinct elements mutably.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

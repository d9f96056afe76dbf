//! Generic splice-move primitives.
//!
//! Ordering changes are expressed as "remove at source, insert at
//! destination", where the destination index is interpreted against the
//! sequence *after* the element has been removed. Moving an element onto its
//! own index therefore leaves the sequence untouched.
//!
//! The unchecked functions trust their indices. Use [`can_move`] and
//! [`can_transfer`] first when the indices come from outside.

/// Move the element at `from` so that it ends up at index `to`.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    debug_assert!(can_move(items.len(), from, to));
    let item = items.remove(from);
    items.insert(to, item);
}

/// Remove the element at `from` in `source` and insert it at `to` in `destination`.
pub fn transfer_item<T>(source: &mut Vec<T>, from: usize, destination: &mut Vec<T>, to: usize) {
    debug_assert!(can_transfer(source.len(), from, destination.len(), to));
    let item = source.remove(from);
    destination.insert(to, item);
}

/// Whether `move_item` is valid for a sequence of length `len`.
pub fn can_move(len: usize, from: usize, to: usize) -> bool {
    from < len && to < len
}

/// Whether `transfer_item` is valid for the given source and destination lengths.
pub fn can_transfer(source_len: usize, from: usize, destination_len: usize, to: usize) -> bool {
    from < source_len && to <= destination_len
}

/// A detached, editable copy of an entity.
///
/// Editors take a copy with `from_entity`, mutate it freely, and write it
/// back with `apply_to`. Nothing touches the entity until `apply_to` runs.
pub trait Editable<T> {
    fn from_entity(entity: &T) -> Self;
    fn apply_to(self, entity: &mut T);
}

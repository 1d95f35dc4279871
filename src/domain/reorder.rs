//! Relocating a single element within an ordered sequence

/// Moves the element at `from` so that it ends up at index `to`
///
/// The element is removed first and then inserted at `to` in the shortened
/// sequence. Every other element keeps its relative order. Out-of-bounds
/// indices leave the sequence unchanged.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut moved = items.to_vec();
    if from >= items.len() || to >= items.len() {
        tracing::trace!(from, to, len = items.len(), "move out of bounds, ignoring");
        return moved;
    }
    if from != to {
        let item = moved.remove(from);
        moved.insert(to, item);
    }
    moved
}

use super::{Piece, PieceColor, PieceId};

/// Owning container for detached pieces.
///
/// Pieces enter the pool when their cell is cleared and leave it when a cell is
/// refilled. [`PiecePool::acquire`] hands out the most recently released piece,
/// or allocates a fresh one when the pool has run dry, so acquiring never fails.
///
/// # Example
///
/// ```
/// use rowfall_engine::{PieceColor, PiecePool};
///
/// let mut pool = PiecePool::new();
/// let piece = pool.acquire(PieceColor::Gold, 1, 0);
/// let id = piece.id();
/// pool.release(piece);
///
/// let reused = pool.acquire(PieceColor::Health, 2, -1);
/// assert_eq!(reused.id(), id);
/// assert_eq!(reused.color(), PieceColor::Health);
/// assert_eq!(pool.allocated(), 1);
/// ```
#[derive(Debug, Default)]
pub struct PiecePool {
    idle: Vec<Piece>,
    allocated: u32,
}

impl PiecePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of idle pieces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.idle.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.idle.is_empty()
    }

    /// Total pieces ever allocated, idle or placed.
    #[must_use]
    pub fn allocated(&self) -> usize {
        self.allocated as usize
    }

    pub fn ids(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.idle.iter().map(Piece::id)
    }

    /// Allocates a brand new piece, bypassing idle ones.
    pub fn allocate(&mut self, color: PieceColor, value: u32, display_row: i32) -> Piece {
        let id = PieceId::new(self.allocated);
        self.allocated += 1;
        Piece::new(id, color, value, display_row)
    }

    /// Takes the most recently released piece, reset to the given state.
    pub fn acquire(&mut self, color: PieceColor, value: u32, display_row: i32) -> Piece {
        let Some(mut piece) = self.idle.pop() else {
            return self.allocate(color, value, display_row);
        };
        piece.reset(color, value);
        piece.set_display_row(display_row);
        piece
    }

    /// Returns a detached piece to the pool.
    pub fn release(&mut self, piece: Piece) {
        debug_assert!(
            self.idle.iter().all(|p| p.id() != piece.id()),
            "piece {} released twice",
            piece.id()
        );
        self.idle.push(piece);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_allocates_when_empty() {
        let mut pool = PiecePool::new();
        let a = pool.acquire(PieceColor::Gold, 1, 0);
        let b = pool.acquire(PieceColor::Gold, 1, 0);
        assert_ne!(a.id(), b.id());
        assert_eq!(pool.allocated(), 2);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_acquire_is_lifo() {
        let mut pool = PiecePool::new();
        let a = pool.allocate(PieceColor::Health, 1, 0);
        let b = pool.allocate(PieceColor::Health, 1, 0);
        let (a_id, b_id) = (a.id(), b.id());
        pool.release(a);
        pool.release(b);
        assert_eq!(pool.len(), 2);

        assert_eq!(pool.acquire(PieceColor::Gold, 1, 0).id(), b_id);
        assert_eq!(pool.acquire(PieceColor::Gold, 1, 0).id(), a_id);
        assert_eq!(pool.allocated(), 2);
    }

    #[test]
    fn test_acquire_resets_piece() {
        let mut pool = PiecePool::new();
        let mut piece = pool.allocate(PieceColor::Curse, 7, 5);
        piece.set_display_row(8);
        pool.release(piece);

        let piece = pool.acquire(PieceColor::Experience, 1, -3);
        assert_eq!(piece.color(), PieceColor::Experience);
        assert_eq!(piece.value(), 1);
        assert_eq!(piece.display_row(), -3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "released twice")]
    fn test_double_release_is_caught() {
        let mut pool = PiecePool::new();
        let piece = pool.allocate(PieceColor::Gold, 1, 0);
        // A second piece with the same identity can only exist through a bug.
        let forged = Piece::new(piece.id(), PieceColor::Gold, 1, 0);
        pool.release(piece);
        pool.release(forged);
    }
}

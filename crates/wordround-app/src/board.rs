//! Seam to the drag-and-drop board widget.
//!
//! The widget owns physical placement and drag gestures. The controller
//! only asks it for candidate placements, takes candidates back, forwards
//! confirmed moves and toggles whether it accepts input. Tile drops and
//! cancelled drags come back to the controller as
//! [`crate::Intent::TileDropped`] and [`crate::Intent::RevertRequested`].

use wordround_core::Tile;
use wordround_proto::PlacedTile;

/// A candidate tile on the board, in widget coordinates (0-indexed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPlacement {
    /// Column, starting at 0.
    pub x: u32,
    /// Row, starting at 0.
    pub y: u32,
    /// The tile.
    pub tile: Tile,
}

impl BoardPlacement {
    /// Wire placement in server coordinates. `None` for a square with no
    /// server position.
    pub fn to_wire(&self) -> Option<PlacedTile> {
        PlacedTile::from_board(self.x, self.y, self.tile.face())
    }
}

/// Operations the controller needs from the board widget.
pub trait BoardWidget {
    /// Show a confirmed move. Positions are server coordinates.
    fn move_tiles(&mut self, placed: &[PlacedTile]);

    /// Candidate placements currently on the board.
    fn candidate_tiles(&self) -> Vec<BoardPlacement>;

    /// Lift every candidate off the board, returning the tiles in board order.
    fn remove_candidate_tiles(&mut self) -> Vec<Tile>;

    /// Accept (`false`) or refuse (`true`) placements.
    fn set_view_only(&mut self, view_only: bool);
}

impl<B: BoardWidget + ?Sized> BoardWidget for &mut B {
    fn move_tiles(&mut self, placed: &[PlacedTile]) {
        (**self).move_tiles(placed);
    }

    fn candidate_tiles(&self) -> Vec<BoardPlacement> {
        (**self).candidate_tiles()
    }

    fn remove_candidate_tiles(&mut self) -> Vec<Tile> {
        (**self).remove_candidate_tiles()
    }

    fn set_view_only(&mut self, view_only: bool) {
        (**self).set_view_only(view_only);
    }
}

use crate::{
    config::GridConfig,
    geometry::{DeskId, SeatId, enumerate_desks},
    person::Person,
    state::SeatState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatView {
    pub id: SeatId,
    pub occupant: Option<Person>,
    pub disabled: bool,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskView {
    pub id: DeskId,
    /// one-based, for display
    pub row: usize,
    /// one-based, for display
    pub col: usize,
    pub left: SeatView,
    pub right: SeatView,
}

impl DeskView {
    pub fn seats(&self) -> [&SeatView; 2] {
        [&self.left, &self.right]
    }
}

/// Project the seat state onto the desks of `grid`, in traversal order.
/// Read-only: entries for seats outside the grid are ignored, not removed.
pub fn build_desks(state: &SeatState, grid: &GridConfig) -> Vec<DeskView> {
    enumerate_desks(grid.rows, grid.cols)
        .map(|desk| {
            let [left, right] = desk.seats().map(|seat| seat_view(state, seat));
            DeskView {
                id: desk,
                row: desk.row + 1,
                col: desk.col + 1,
                left,
                right,
            }
        })
        .collect()
}

fn seat_view(state: &SeatState, id: SeatId) -> SeatView {
    SeatView {
        id,
        occupant: state.occupant(id).cloned(),
        disabled: state.is_disabled(id),
        locked: state.is_locked(id),
    }
}

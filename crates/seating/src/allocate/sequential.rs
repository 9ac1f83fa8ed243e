//! Input-order allocation used right after a roster import.
//!
//! No shuffling and no gender rules: people fill the seats in traversal
//! order exactly as listed. Two reserved roster rows shape the layout:
//! a disabled-seat row disables the seat at its own position in the list,
//! an empty-seat row leaves the next seat empty without disabling it.

use crate::{
    config::GridConfig,
    geometry::{SeatId, enumerate_seats},
    person::{LayoutDirective, Person},
    state::Assignments,
};
use log::{debug, warn};
use std::collections::HashSet;

/// Layout produced from an imported roster. Imports start without locks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequentialLayout {
    pub assignments: Assignments,
    pub disabled: HashSet<SeatId>,
}

pub fn allocate_sequential(entries: &[Person], grid: &GridConfig) -> SequentialLayout {
    let mut layout = SequentialLayout::default();

    for (index, entry) in entries.iter().enumerate() {
        if entry.directive() == Some(LayoutDirective::DisabledSeat) {
            let seat = SeatId::from_index(index, grid.cols);
            layout.disabled.insert(seat);
            layout.assignments.insert(seat, None);
        }
    }

    let mut queue = entries
        .iter()
        .filter(|p| p.directive() != Some(LayoutDirective::DisabledSeat));

    let mut seated = 0;
    for seat in enumerate_seats(grid.rows, grid.cols) {
        if layout.disabled.contains(&seat) {
            layout.assignments.insert(seat, None);
            continue;
        }
        let occupant = match queue.next() {
            Some(p) if p.directive() == Some(LayoutDirective::EmptySeat) => None,
            Some(p) => {
                seated += 1;
                Some(p.clone())
            }
            None => None,
        };
        layout.assignments.insert(seat, occupant);
    }

    let unplaced = queue.filter(|p| !p.is_directive()).count();
    if unplaced > 0 {
        warn!("{unplaced} people did not fit the {}x{} grid", grid.rows, grid.cols);
    }
    debug!(
        "Sequential allocation: {} seated, {} seats disabled",
        seated,
        layout.disabled.len()
    );

    layout
}

//! Desk and seat addressing.
//!
//! A grid of `rows x cols` desks holds two seats per desk. Seats are
//! addressed as `desk-<row>-<col>-<L|R>` with zero-based row and column.
//! Every "first available seat" search in the engine walks
//! [`enumerate_seats`], so its order (row-major, left before right) must
//! not change.

use crate::{
    constants::{DESK_PREFIX, SEATS_PER_DESK},
    error::{Result, SeatingError},
};
use std::{fmt, str::FromStr};

/// Seat position on a desk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; SEATS_PER_DESK] = [Side::Left, Side::Right];

    pub fn tag(self) -> char {
        match self {
            Side::Left => 'L',
            Side::Right => 'R',
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "L" => Some(Side::Left),
            "R" => Some(Side::Right),
            _ => None,
        }
    }
}

/// Desk address (zero-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeskId {
    pub row: usize,
    pub col: usize,
}

impl DeskId {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn seat(self, side: Side) -> SeatId {
        SeatId::new(self.row, self.col, side)
    }

    /// Left and right seat, in traversal order
    pub fn seats(self) -> [SeatId; SEATS_PER_DESK] {
        [self.seat(Side::Left), self.seat(Side::Right)]
    }
}

impl fmt::Display for DeskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", DESK_PREFIX, self.row, self.col)
    }
}

/// Seat address. This is the join key of every seat map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeatId {
    pub row: usize,
    pub col: usize,
    pub side: Side,
}

impl SeatId {
    pub fn new(row: usize, col: usize, side: Side) -> Self {
        Self { row, col, side }
    }

    pub fn desk(self) -> DeskId {
        DeskId::new(self.row, self.col)
    }

    /// Seat reached after `index` steps of the traversal on a grid `cols` desks wide.
    pub fn from_index(index: usize, cols: usize) -> Self {
        let seats_per_row = cols.max(1) * SEATS_PER_DESK;
        let row = index / seats_per_row;
        let col = (index % seats_per_row) / SEATS_PER_DESK;
        let side = if index % SEATS_PER_DESK == 0 {
            Side::Left
        } else {
            Side::Right
        };
        Self::new(row, col, side)
    }

    pub fn is_within(self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.desk(), self.side.tag())
    }
}

impl FromStr for SeatId {
    type Err = SeatingError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SeatingError::InvalidSeatId(s.to_string());

        let rest = s
            .trim()
            .strip_prefix(DESK_PREFIX)
            .and_then(|r| r.strip_prefix('-'))
            .ok_or_else(invalid)?;

        let mut parts = rest.split('-');
        let (Some(row), Some(col), Some(side), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let row = parse_index(row).ok_or_else(invalid)?;
        let col = parse_index(col).ok_or_else(invalid)?;
        let side = Side::from_tag(side).ok_or_else(invalid)?;
        Ok(Self::new(row, col, side))
    }
}

fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// All desks, row-major
pub fn enumerate_desks(rows: usize, cols: usize) -> impl Iterator<Item = DeskId> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| DeskId::new(row, col)))
}

/// All seats in traversal order: row-major, then left before right
pub fn enumerate_seats(rows: usize, cols: usize) -> impl Iterator<Item = SeatId> {
    enumerate_desks(rows, cols).flat_map(DeskId::seats)
}

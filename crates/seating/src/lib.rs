//! Classroom seating engine.
//!
//! Seats a roster at two-seat desks on a rectangular grid, honouring
//! disabled seats, locked seats and a gender pairing policy, and applies
//! live edits (disable, lock, swap) without reshuffling the room.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`geometry`] | Desk/seat ids and traversal order |
//! | [`state`] | Disabled/locked/current seat maps and live edits |
//! | [`pairing`] | Pair and single queues under a pairing policy |
//! | [`allocate`] | Randomised desk filling and import-order layout |
//! | [`view`] | Read-only desk views for rendering |
//! | [`roster`] | Roster text ingestion |
//! | [`export`] | CSV export of the current layout |
//! | [`session`] | Roster + grid + state driven one operation at a time |

pub mod allocate;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod geometry;
pub mod pairing;
pub mod person;
pub mod roster;
pub mod session;
pub mod state;
pub mod view;

pub use config::{Config, DisplacementPolicy, GridConfig};
pub use error::{Result, SeatingError};
pub use geometry::{DeskId, SeatId, Side};
pub use person::{Gender, Person, PersonId};
pub use roster::{RosterEntry, parse_roster_text, read_roster_file};
pub use session::Classroom;
pub use state::{DisableOutcome, LockOutcome, SeatState};
pub use view::{DeskView, SeatView};

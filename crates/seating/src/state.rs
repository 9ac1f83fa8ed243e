//! Live seat state and the incremental edits applied to it.
//!
//! Three maps keyed by [`SeatId`] hold everything the engine knows about
//! the room:
//!
//! - `disabled`: seats nobody may sit in
//! - `locked`: seats pinned to a person across reshuffles
//! - `current`: who sits where right now
//!
//! Invariants kept by every operation:
//! - a disabled seat is never occupied in `current`
//! - every locked seat holds its locked person in `current`
//! - no seat is both disabled and locked
//!
//! Each operation computes the next maps in full and commits them at the
//! end, so a failed operation leaves the state untouched.

use crate::{
    config::{DisplacementPolicy, GridConfig},
    error::{Result, SeatingError},
    geometry::{SeatId, enumerate_seats},
    person::Person,
};
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

/// Seat -> occupant. A missing key and `None` both mean the seat is empty.
pub type Assignments = HashMap<SeatId, Option<Person>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatState {
    disabled: HashSet<SeatId>,
    locked: HashMap<SeatId, Person>,
    current: Assignments,
}

/// Result of [`SeatState::toggle_disable`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisableOutcome {
    /// seat was disabled and is usable again
    Enabled,
    /// seat was empty and is now disabled
    Disabled,
    /// occupant moved to the first vacant seat
    Relocated { person: Person, to: SeatId },
    /// no vacant seat was left and the occupant is no longer seated
    Dropped { person: Person },
}

/// Result of [`SeatState::toggle_lock`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOutcome {
    Locked(Person),
    Unlocked,
    /// empty seats cannot be locked
    Unchanged,
}

impl SeatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        disabled: HashSet<SeatId>,
        locked: HashMap<SeatId, Person>,
        current: Assignments,
    ) -> Self {
        Self {
            disabled,
            locked,
            current,
        }
    }

    pub fn disabled(&self) -> &HashSet<SeatId> {
        &self.disabled
    }

    pub fn locked(&self) -> &HashMap<SeatId, Person> {
        &self.locked
    }

    pub fn current(&self) -> &Assignments {
        &self.current
    }

    pub fn occupant(&self, seat: SeatId) -> Option<&Person> {
        self.current.get(&seat).and_then(Option::as_ref)
    }

    pub fn is_disabled(&self, seat: SeatId) -> bool {
        self.disabled.contains(&seat)
    }

    pub fn is_locked(&self, seat: SeatId) -> bool {
        self.locked.contains_key(&seat)
    }

    /// Replace who sits where, keeping disabled seats and locks
    pub fn replace_current(&mut self, current: Assignments) {
        self.current = current;
    }

    /// Seat where `person` currently sits, if any
    pub fn seat_of(&self, person: &Person) -> Option<SeatId> {
        self.current
            .iter()
            .find(|(_, occupant)| occupant.as_ref().is_some_and(|p| p.id == person.id))
            .map(|(seat, _)| *seat)
    }

    /// Flip the disabled flag of `seat`.
    ///
    /// Disabling an occupied seat moves its occupant to the first vacant
    /// seat in traversal order (not disabled, not locked, empty). When no
    /// such seat exists the occupant is dropped, or the toggle is refused
    /// under [`DisplacementPolicy::Reject`]. Re-enabling never fills the seat.
    pub fn toggle_disable(
        &mut self,
        seat: SeatId,
        grid: &GridConfig,
        policy: DisplacementPolicy,
    ) -> Result<DisableOutcome> {
        let mut disabled = self.disabled.clone();
        if disabled.remove(&seat) {
            debug!("Enabled seat {seat}");
            self.disabled = disabled;
            return Ok(DisableOutcome::Enabled);
        }
        disabled.insert(seat);

        let mut locked = self.locked.clone();
        locked.remove(&seat);

        let Some(person) = self.occupant(seat).cloned() else {
            debug!("Disabled empty seat {seat}");
            self.disabled = disabled;
            self.locked = locked;
            return Ok(DisableOutcome::Disabled);
        };

        let mut current = self.current.clone();
        current.remove(&seat);

        let vacancy = enumerate_seats(grid.rows, grid.cols).find(|&candidate| {
            candidate != seat
                && !disabled.contains(&candidate)
                && !locked.contains_key(&candidate)
                && is_vacant(&current, candidate)
        });

        let outcome = match vacancy {
            Some(to) => {
                debug!("Disabled seat {seat}, moved {} to {to}", person.name);
                current.insert(to, Some(person.clone()));
                DisableOutcome::Relocated { person, to }
            }
            None => match policy {
                DisplacementPolicy::Drop => {
                    warn!(
                        "Disabled seat {seat}, no vacant seat left: {} is no longer seated",
                        person.name
                    );
                    DisableOutcome::Dropped { person }
                }
                DisplacementPolicy::Reject => {
                    return Err(SeatingError::NoVacancy {
                        seat: seat.to_string(),
                        name: person.name,
                    });
                }
            },
        };

        self.disabled = disabled;
        self.locked = locked;
        self.current = current;
        Ok(outcome)
    }

    /// Lock an occupied seat to its occupant, or unlock a locked seat.
    /// Never moves anyone.
    pub fn toggle_lock(&mut self, seat: SeatId) -> LockOutcome {
        let mut locked = self.locked.clone();
        let outcome = if locked.remove(&seat).is_some() {
            LockOutcome::Unlocked
        } else if let Some(person) = self.occupant(seat).cloned() {
            locked.insert(seat, person.clone());
            LockOutcome::Locked(person)
        } else {
            return LockOutcome::Unchanged;
        };
        debug!("Lock toggled on {seat}: {outcome:?}");
        self.locked = locked;
        outcome
    }

    /// Exchange the occupants of two seats. Either side may be empty.
    ///
    /// Locks on either seat are released, since the locked person no longer
    /// sits there. Returns whether any lock was released.
    pub fn swap(&mut self, source: SeatId, target: SeatId) -> Result<bool> {
        if source == target {
            return Ok(false);
        }
        for seat in [source, target] {
            if self.is_disabled(seat) {
                return Err(SeatingError::SeatDisabled(seat.to_string()));
            }
        }

        let mut current = self.current.clone();
        let from_source = current.get(&source).cloned().flatten();
        let from_target = current.get(&target).cloned().flatten();
        current.insert(target, from_source);
        current.insert(source, from_target);

        let mut locked = self.locked.clone();
        let source_lock = locked.remove(&source);
        let target_lock = locked.remove(&target);
        let released = source_lock.is_some() || target_lock.is_some();
        if released {
            debug!("Swap {source} <-> {target} released locks");
        }

        self.current = current;
        self.locked = locked;
        Ok(released)
    }
}

fn is_vacant(current: &Assignments, seat: SeatId) -> bool {
    current.get(&seat).is_none_or(Option::is_none)
}

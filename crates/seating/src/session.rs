//! A classroom session: roster, grid and live seat state, driven one
//! operation at a time.

use crate::{
    allocate::{SequentialLayout, allocate_desks, allocate_sequential},
    config::{Config, DisplacementPolicy, GridConfig},
    error::{Result, SeatingError},
    export::{ExportRecord, export_records, export_to_csv_with_path},
    geometry::SeatId,
    person::{Person, PersonId},
    roster::{RosterEntry, into_people},
    state::{DisableOutcome, LockOutcome, SeatState},
    view::{DeskView, build_desks},
};
use log::info;
use rand::Rng;
use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Default)]
pub struct Classroom {
    roster: Vec<Person>,
    grid: GridConfig,
    displacement: DisplacementPolicy,
    state: SeatState,
}

impl Classroom {
    pub fn new(grid: GridConfig) -> Self {
        Self {
            grid: grid.clamped(),
            ..Self::default()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.grid).with_displacement(config.engine.displacement)
    }

    pub fn with_displacement(mut self, policy: DisplacementPolicy) -> Self {
        self.displacement = policy;
        self
    }

    pub fn roster(&self) -> &[Person] {
        &self.roster
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn state(&self) -> &SeatState {
        &self.state
    }

    /// Replace the roster and lay it out in input order.
    ///
    /// Locks and disabled seats are reset; disabled seats then come only
    /// from directive rows. When the rows (directives included) exceed the
    /// grid, rows are added keeping the column count.
    pub fn import(&mut self, entries: Vec<RosterEntry>) {
        let entries = into_people(entries);

        if entries.len() > self.grid.seat_count() {
            let desks_needed = entries.len().div_ceil(2);
            let rows = desks_needed.div_ceil(self.grid.cols);
            info!(
                "Roster of {} rows needs more seats, growing grid to {}x{}",
                entries.len(),
                rows,
                self.grid.cols
            );
            self.grid.rows = rows;
        }

        let SequentialLayout {
            assignments,
            disabled,
        } = allocate_sequential(&entries, &self.grid);
        self.state = SeatState::from_parts(disabled, HashMap::new(), assignments);
        self.roster = entries.into_iter().filter(|p| !p.is_directive()).collect();

        info!(
            "Imported {} people into a {}x{} grid",
            self.roster.len(),
            self.grid.rows,
            self.grid.cols
        );
    }

    /// Reseat everyone who is not locked. Returns how many are left unseated.
    pub fn shuffle(&mut self, rng: &mut impl Rng) -> usize {
        let assignments = allocate_desks(
            &self.roster,
            &self.grid,
            self.state.disabled(),
            self.state.locked(),
            rng,
        );
        self.state.replace_current(assignments);

        let unseated = self.unseated().len();
        info!(
            "Shuffled {} people, {} unseated",
            self.roster.len(),
            unseated
        );
        unseated
    }

    /// Change grid size or pairing flags. Nobody is moved; seats outside a
    /// smaller grid are just no longer shown.
    pub fn set_grid(&mut self, grid: GridConfig) {
        self.grid = grid.clamped();
    }

    /// Parse a seat id and check it lies on the current grid
    pub fn resolve(&self, id: &str) -> Result<SeatId> {
        let seat: SeatId = id.parse()?;
        if !self.grid.contains(seat) {
            return Err(SeatingError::SeatOutOfGrid {
                seat: seat.to_string(),
                rows: self.grid.rows,
                cols: self.grid.cols,
            });
        }
        Ok(seat)
    }

    pub fn toggle_disable(&mut self, seat: SeatId) -> Result<DisableOutcome> {
        self.ensure_on_grid(seat)?;
        self.state.toggle_disable(seat, &self.grid, self.displacement)
    }

    pub fn toggle_lock(&mut self, seat: SeatId) -> Result<LockOutcome> {
        self.ensure_on_grid(seat)?;
        Ok(self.state.toggle_lock(seat))
    }

    /// Returns whether any lock was released
    pub fn swap(&mut self, source: SeatId, target: SeatId) -> Result<bool> {
        self.ensure_on_grid(source)?;
        self.ensure_on_grid(target)?;
        self.state.swap(source, target)
    }

    pub fn desks(&self) -> Vec<DeskView> {
        build_desks(&self.state, &self.grid)
    }

    /// Roster members who hold no seat
    pub fn unseated(&self) -> Vec<&Person> {
        let seated: HashSet<PersonId> = self
            .state
            .current()
            .values()
            .flatten()
            .map(|p| p.id)
            .collect();
        self.roster
            .iter()
            .filter(|p| !seated.contains(&p.id))
            .collect()
    }

    pub fn export_records(&self) -> Vec<ExportRecord> {
        export_records(&self.desks())
    }

    pub fn export_to(&self, output_dir: Option<&Path>) -> Result<PathBuf> {
        export_to_csv_with_path(&self.desks(), output_dir)
    }

    fn ensure_on_grid(&self, seat: SeatId) -> Result<()> {
        if self.grid.contains(seat) {
            Ok(())
        } else {
            Err(SeatingError::SeatOutOfGrid {
                seat: seat.to_string(),
                rows: self.grid.rows,
                cols: self.grid.cols,
            })
        }
    }
}

//! Randomised desk-filling allocation.
//!
//! Locked seats are kept, disabled seats stay empty, and every other seat
//! is filled desk by desk in traversal order from the pairing queues:
//! a desk with two open seats takes a pair (or two singles), a desk with
//! one open seat takes a single (or half of a broken pair).

use crate::{
    config::GridConfig,
    geometry::{SeatId, enumerate_desks},
    pairing::{PairingPolicy, SeatingQueues, build_queues},
    person::{Person, PersonId},
    state::Assignments,
};
use log::{debug, warn};
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Build a fresh seat -> occupant map for `roster`.
///
/// People pinned in `locked` keep their seats and are left out of the
/// shuffle. People who do not fit are simply absent from the result.
pub fn allocate_desks(
    roster: &[Person],
    grid: &GridConfig,
    disabled: &HashSet<SeatId>,
    locked: &HashMap<SeatId, Person>,
    rng: &mut impl Rng,
) -> Assignments {
    let mut assignments: Assignments = locked
        .iter()
        .map(|(seat, person)| (*seat, Some(person.clone())))
        .collect();

    let mut open_desks: Vec<Vec<SeatId>> = Vec::new();
    for desk in enumerate_desks(grid.rows, grid.cols) {
        let mut open = Vec::with_capacity(2);
        for seat in desk.seats() {
            if disabled.contains(&seat) {
                assignments.insert(seat, None);
            } else if !assignments.contains_key(&seat) {
                open.push(seat);
            }
        }
        if !open.is_empty() {
            open_desks.push(open);
        }
    }

    let pinned: HashSet<PersonId> = locked.values().map(|p| p.id).collect();
    let pool: Vec<Person> = roster
        .iter()
        .filter(|p| !pinned.contains(&p.id))
        .cloned()
        .collect();

    let policy = grid.pairing_policy();
    let mut queues = build_queues(pool, policy, rng);

    for slots in &open_desks {
        fill_desk(slots, &mut queues, policy, &mut assignments);
    }

    debug!(
        "Desk allocation: {} open desks, {} locked seats",
        open_desks.len(),
        locked.len()
    );
    if !queues.is_empty() {
        warn!("{} people could not be seated", queues.len());
    }

    assignments
}

/// Seat people from `queues` into the open seats of one desk
fn fill_desk(
    slots: &[SeatId],
    queues: &mut SeatingQueues,
    policy: PairingPolicy,
    out: &mut Assignments,
) {
    match *slots {
        [left, right] => {
            if let Some((first, second)) = queues.pop_pair() {
                out.insert(left, Some(first));
                out.insert(right, Some(second));
                return;
            }
            match (queues.pop_single(), queues.pop_single()) {
                (Some(first), Some(second)) => {
                    if may_share_desk(&first, &second, policy) {
                        out.insert(left, Some(first));
                        out.insert(right, Some(second));
                    } else {
                        // second one waits for the next desk
                        out.insert(left, Some(first));
                        out.insert(right, None);
                        queues.push_single(second);
                    }
                }
                (Some(only), None) => {
                    out.insert(left, Some(only));
                    out.insert(right, None);
                }
                _ => {
                    out.insert(left, None);
                    out.insert(right, None);
                }
            }
        }
        [only] => {
            if let Some(single) = queues.pop_single() {
                out.insert(only, Some(single));
            } else if let Some((first, second)) = queues.pop_pair() {
                out.insert(only, Some(first));
                queues.push_single(second);
            } else {
                out.insert(only, None);
            }
        }
        _ => {}
    }
}

/// Two singles of different known genders never share a desk in strict same-gender mode
fn may_share_desk(a: &Person, b: &Person, policy: PairingPolicy) -> bool {
    if policy.allows_mixed_singles() {
        return true;
    }
    a.gender == b.gender || !a.gender.is_known() || !b.gender.is_known()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn seat(id: &str) -> SeatId {
        id.parse().unwrap()
    }

    fn person(id: u32, name: &str, gender: &str) -> Person {
        Person::new(PersonId(id), name, gender)
    }

    fn name_at(assignments: &Assignments, id: &str) -> Option<String> {
        assignments
            .get(&seat(id))
            .cloned()
            .flatten()
            .map(|p| p.name)
    }

    fn seated_count(assignments: &Assignments) -> usize {
        assignments.values().filter(|p| p.is_some()).count()
    }

    #[test]
    fn test_cross_gender_singles_are_separated() {
        let grid = GridConfig::new(1, 1);
        let roster = vec![person(1, "Alice", "f"), person(2, "Bob", "m")];
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = allocate_desks(&roster, &grid, &HashSet::new(), &HashMap::new(), &mut rng);
            assert_eq!(seated_count(&out), 1);
            assert!(name_at(&out, "desk-0-0-L").is_some());
            assert_eq!(name_at(&out, "desk-0-0-R"), None);
        }
    }

    #[test]
    fn test_separated_single_moves_to_next_desk() {
        let grid = GridConfig::new(1, 2);
        let roster = vec![person(1, "Alice", "f"), person(2, "Bob", "m")];
        let mut rng = StdRng::seed_from_u64(4);
        let out = allocate_desks(&roster, &grid, &HashSet::new(), &HashMap::new(), &mut rng);

        assert_eq!(seated_count(&out), 2);
        assert!(name_at(&out, "desk-0-0-L").is_some());
        assert!(name_at(&out, "desk-0-1-L").is_some());
        assert_eq!(name_at(&out, "desk-0-0-R"), None);
        assert_eq!(name_at(&out, "desk-0-1-R"), None);
    }

    #[test]
    fn test_same_gender_pair_shares_desk() {
        let grid = GridConfig::new(1, 1);
        let roster = vec![person(1, "Alice", "f"), person(2, "Carol", "f")];
        let mut rng = StdRng::seed_from_u64(0);
        let out = allocate_desks(&roster, &grid, &HashSet::new(), &HashMap::new(), &mut rng);
        assert_eq!(seated_count(&out), 2);
    }

    #[test]
    fn test_mixed_leftovers_share_desk_when_allowed() {
        let grid = GridConfig::new(1, 1).with_mixed_leftovers(true);
        let roster = vec![person(1, "Alice", "f"), person(2, "Bob", "m")];
        let mut rng = StdRng::seed_from_u64(0);
        let out = allocate_desks(&roster, &grid, &HashSet::new(), &HashMap::new(), &mut rng);
        assert_eq!(seated_count(&out), 2);
    }

    #[test]
    fn test_unknown_gender_single_may_join_anyone() {
        let grid = GridConfig::new(1, 1);
        let roster = vec![person(1, "Alice", "f"), person(2, "Sam", "?")];
        let mut rng = StdRng::seed_from_u64(0);
        let out = allocate_desks(&roster, &grid, &HashSet::new(), &HashMap::new(), &mut rng);
        assert_eq!(seated_count(&out), 2);
    }

    #[test]
    fn test_locked_seat_survives() {
        let grid = GridConfig::new(1, 2);
        let alice = person(1, "Alice", "f");
        let roster = vec![alice.clone(), person(2, "Bob", "m"), person(3, "Carol", "f")];
        let locked = HashMap::from([(seat("desk-0-0-L"), alice)]);

        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = allocate_desks(&roster, &grid, &HashSet::new(), &locked, &mut rng);
            assert_eq!(name_at(&out, "desk-0-0-L").as_deref(), Some("Alice"));
            let alice_seats = out
                .values()
                .flatten()
                .filter(|p| p.name == "Alice")
                .count();
            assert_eq!(alice_seats, 1);
        }
    }

    #[test]
    fn test_single_slot_desk_breaks_pair() {
        let grid = GridConfig::new(1, 2);
        let roster = vec![person(1, "Alice", "f"), person(2, "Carol", "f")];
        let disabled = HashSet::from([seat("desk-0-0-R")]);
        let mut rng = StdRng::seed_from_u64(1);
        let out = allocate_desks(&roster, &grid, &disabled, &HashMap::new(), &mut rng);

        assert!(name_at(&out, "desk-0-0-L").is_some());
        assert_eq!(name_at(&out, "desk-0-0-R"), None);
        assert!(out.contains_key(&seat("desk-0-0-R")));
        assert!(name_at(&out, "desk-0-1-L").is_some());
        assert_eq!(seated_count(&out), 2);
    }

    #[test]
    fn test_disabled_seats_stay_empty() {
        let grid = GridConfig::new(2, 2);
        let roster: Vec<Person> = (0..8).map(|i| person(i, &format!("p{i}"), "m")).collect();
        let disabled = HashSet::from([seat("desk-0-1-L"), seat("desk-1-0-R")]);
        let mut rng = StdRng::seed_from_u64(8);
        let out = allocate_desks(&roster, &grid, &disabled, &HashMap::new(), &mut rng);

        for seat in &disabled {
            assert_eq!(out.get(seat), Some(&None));
        }
        assert_eq!(seated_count(&out), 6);
    }

    #[test]
    fn test_overflow_leaves_people_unseated() {
        let grid = GridConfig::new(1, 1);
        let roster: Vec<Person> = (0..3).map(|i| person(i, &format!("p{i}"), "f")).collect();
        let mut rng = StdRng::seed_from_u64(2);
        let out = allocate_desks(&roster, &grid, &HashSet::new(), &HashMap::new(), &mut rng);
        assert_eq!(seated_count(&out), 2);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_empty_roster_fills_grid_with_absent() {
        let grid = GridConfig::new(2, 3);
        let mut rng = StdRng::seed_from_u64(0);
        let out = allocate_desks(&[], &grid, &HashSet::new(), &HashMap::new(), &mut rng);
        assert_eq!(out.len(), grid.seat_count());
        assert_eq!(seated_count(&out), 0);
    }

    #[test]
    fn test_fully_locked_desk_is_skipped() {
        let grid = GridConfig::new(1, 1);
        let alice = person(1, "Alice", "f");
        let carol = person(2, "Carol", "f");
        let roster = vec![alice.clone(), carol.clone(), person(3, "Dana", "f")];
        let locked = HashMap::from([(seat("desk-0-0-L"), alice), (seat("desk-0-0-R"), carol)]);
        let mut rng = StdRng::seed_from_u64(0);

        let out = allocate_desks(&roster, &grid, &HashSet::new(), &locked, &mut rng);
        assert_eq!(name_at(&out, "desk-0-0-L").as_deref(), Some("Alice"));
        assert_eq!(name_at(&out, "desk-0-0-R").as_deref(), Some("Carol"));
        assert!(out.values().flatten().all(|p| p.name != "Dana"));
    }
}

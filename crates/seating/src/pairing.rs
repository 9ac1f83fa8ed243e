//! Pairing queue construction.
//!
//! People not pinned to a seat are split into a queue of desk partners and
//! a queue of singles. Both queues are consumed from the back, so the last
//! element is always the next one placed.

use crate::person::{Gender, Person};
use log::debug;
use rand::{Rng, seq::SliceRandom};

/// Two people meant to share a desk, left seat first
pub type Pair = (Person, Person);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingPolicy {
    /// M-M, F-F and U-U desks first. Leftovers may be mixed only if allowed.
    SameGender { allow_mixed_leftovers: bool },
    /// M-F desks first, everyone left over is paired regardless of gender
    MixedPreferred,
}

impl PairingPolicy {
    /// Whether two leftover singles of different known genders may share a desk
    pub fn allows_mixed_singles(self) -> bool {
        match self {
            PairingPolicy::SameGender {
                allow_mixed_leftovers,
            } => allow_mixed_leftovers,
            PairingPolicy::MixedPreferred => true,
        }
    }
}

/// Pending pairs and singles for one allocation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatingQueues {
    pairs: Vec<Pair>,
    singles: Vec<Person>,
}

impl SeatingQueues {
    pub fn new(pairs: Vec<Pair>, singles: Vec<Person>) -> Self {
        Self { pairs, singles }
    }

    pub fn pop_pair(&mut self) -> Option<Pair> {
        self.pairs.pop()
    }

    pub fn pop_single(&mut self) -> Option<Person> {
        self.singles.pop()
    }

    /// Put a single back so it is the next one placed
    pub fn push_single(&mut self, person: Person) {
        self.singles.push(person);
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn singles(&self) -> &[Person] {
        &self.singles
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.singles.is_empty()
    }

    /// Number of people still waiting
    pub fn len(&self) -> usize {
        self.pairs.len() * 2 + self.singles.len()
    }
}

/// Build shuffled pair and single queues from `people` under `policy`.
pub fn build_queues(people: Vec<Person>, policy: PairingPolicy, rng: &mut impl Rng) -> SeatingQueues {
    let queues = match policy {
        PairingPolicy::SameGender {
            allow_mixed_leftovers,
        } => same_gender_queues(people, allow_mixed_leftovers, rng),
        PairingPolicy::MixedPreferred => mixed_gender_queues(people, rng),
    };
    debug!(
        "Pairing ({:?}): {} pairs, {} singles",
        policy,
        queues.pairs.len(),
        queues.singles.len()
    );
    queues
}

fn same_gender_queues(people: Vec<Person>, allow_mixed: bool, rng: &mut impl Rng) -> SeatingQueues {
    let [mut males, mut females, mut others] = shuffled_buckets(people, rng);

    let mut pairs = Vec::new();
    for bucket in [&mut males, &mut females, &mut others] {
        while let Some(pair) = pop_two(bucket) {
            pairs.push(pair);
        }
    }
    pairs.shuffle(rng);

    // at most one leftover per bucket
    let mut leftovers: Vec<Person> = males.into_iter().chain(females).chain(others).collect();
    if allow_mixed {
        leftovers.shuffle(rng);
        while let Some((a, b)) = pop_two(&mut leftovers) {
            pairs.push(oriented(a, b, rng));
        }
    }

    SeatingQueues::new(pairs, leftovers)
}

fn mixed_gender_queues(people: Vec<Person>, rng: &mut impl Rng) -> SeatingQueues {
    let [mut males, mut females, others] = shuffled_buckets(people, rng);

    let mut pairs = Vec::new();
    let cross = males.len().min(females.len());
    for _ in 0..cross {
        if let (Some(m), Some(f)) = (males.pop(), females.pop()) {
            pairs.push(oriented(m, f, rng));
        }
    }

    let mut leftovers: Vec<Person> = males.into_iter().chain(females).chain(others).collect();
    leftovers.shuffle(rng);
    while let Some(pair) = pop_two(&mut leftovers) {
        pairs.push(pair);
    }

    // interleave cross-gender pairs with leftover pairs
    pairs.shuffle(rng);

    SeatingQueues::new(pairs, leftovers)
}

/// Male, Female and Unknown buckets, each independently shuffled
fn shuffled_buckets(people: Vec<Person>, rng: &mut impl Rng) -> [Vec<Person>; 3] {
    let mut buckets: [Vec<Person>; 3] = Default::default();
    for person in people {
        let idx = match person.gender {
            Gender::Male => 0,
            Gender::Female => 1,
            Gender::Unknown => 2,
        };
        buckets[idx].push(person);
    }
    for bucket in buckets.iter_mut() {
        bucket.shuffle(rng);
    }
    buckets
}

fn pop_two(pool: &mut Vec<Person>) -> Option<Pair> {
    if pool.len() < 2 {
        return None;
    }
    let first = pool.pop()?;
    let second = pool.pop()?;
    Some((first, second))
}

/// Random left/right orientation
fn oriented(a: Person, b: Person, rng: &mut impl Rng) -> Pair {
    if rng.gen_bool(0.5) { (a, b) } else { (b, a) }
}

use crate::constants::{DISABLED_SEAT_TOKEN, EMPTY_SEAT_TOKEN, FEMALE_LABEL, MALE_LABEL};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Gender {
    /// Label used in exported rosters. Unknown exports as an empty field.
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => MALE_LABEL,
            Gender::Female => FEMALE_LABEL,
            Gender::Unknown => "",
        }
    }

    pub fn is_known(self) -> bool {
        self != Gender::Unknown
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Map a free-text gender token to a [`Gender`]. Anything unrecognised is Unknown.
pub fn normalize_gender(token: &str) -> Gender {
    let t = token.trim().to_lowercase();
    match t.as_str() {
        "m" | "male" | "boy" | "man" | "男" | "男生" => Gender::Male,
        "f" | "female" | "girl" | "woman" | "女" | "女生" => Gender::Female,
        _ => Gender::Unknown,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(pub u32);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A roster member. Immutable once imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub gender: Gender,
    /// gender token exactly as it appeared in the roster
    pub raw_gender: String,
}

impl Person {
    pub fn new(id: PersonId, name: impl Into<String>, raw_gender: impl Into<String>) -> Self {
        let raw_gender = raw_gender.into();
        Self {
            id,
            name: name.into(),
            gender: normalize_gender(&raw_gender),
            raw_gender,
        }
    }

    /// What the roster row means for the import layout
    pub fn directive(&self) -> Option<LayoutDirective> {
        match self.name.as_str() {
            DISABLED_SEAT_TOKEN => Some(LayoutDirective::DisabledSeat),
            EMPTY_SEAT_TOKEN => Some(LayoutDirective::EmptySeat),
            _ => None,
        }
    }

    pub fn is_directive(&self) -> bool {
        self.directive().is_some()
    }
}

/// Reserved roster rows that shape the imported layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutDirective {
    DisabledSeat,
    EmptySeat,
}

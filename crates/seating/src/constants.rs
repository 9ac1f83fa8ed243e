/// Grid settings
pub const SEATS_PER_DESK: usize = 2;
pub const MIN_ROWS: usize = 1;
pub const MIN_COLS: usize = 1;
pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 5;

/// Seat identifier format
pub const DESK_PREFIX: &str = "desk";

/// Roster rows that are layout directives rather than people
pub const DISABLED_SEAT_TOKEN: &str = "锁"; // seat is disabled at import
pub const EMPTY_SEAT_TOKEN: &str = "空"; // seat is left empty at import

/// Gender labels written on export (readable again by `normalize_gender`)
pub const MALE_LABEL: &str = "男";
pub const FEMALE_LABEL: &str = "女";

/// Excel needs a BOM to open UTF-8 CSV correctly
pub const UTF8_BOM: &str = "\u{feff}";
pub const FULL_WIDTH_COMMA: char = '，';

use seating::{DeskView, SeatView};

const EMPTY_MARK: &str = "-";
const DISABLED_MARK: &str = "#";
const LOCK_MARK: char = '*';

fn seat_label(seat: &SeatView) -> String {
    match (&seat.occupant, seat.disabled) {
        (Some(p), _) if seat.locked => format!("{}{}", p.name, LOCK_MARK),
        (Some(p), _) => p.name.clone(),
        (None, true) => DISABLED_MARK.to_string(),
        (None, false) => EMPTY_MARK.to_string(),
    }
}

/// Text grid, one line per desk row: `  1 [Alice Bob] [- #]`
pub fn render_grid(desks: &[DeskView]) -> String {
    let width = desks
        .iter()
        .flat_map(|d| d.seats())
        .map(|s| seat_label(s).chars().count())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    let mut current_row = None;
    for desk in desks {
        if current_row != Some(desk.row) {
            if current_row.is_some() {
                out.truncate(out.trim_end().len());
                out.push('\n');
            }
            out.push_str(&format!("{:>3} ", desk.row));
            current_row = Some(desk.row);
        }
        out.push_str(&format!(
            "[{:<width$} {:<width$}] ",
            seat_label(&desk.left),
            seat_label(&desk.right),
        ));
    }
    out.truncate(out.trim_end().len());
    out
}

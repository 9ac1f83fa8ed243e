pub mod desk;
pub mod sequential;

pub use desk::allocate_desks;
pub use sequential::{SequentialLayout, allocate_sequential};

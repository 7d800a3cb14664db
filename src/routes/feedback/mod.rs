pub mod list;
pub mod update;

pub use list::*;
pub use update::*;

pub mod feedback;
pub mod health_checks;
pub mod seed;

pub use health_checks::*;
pub use seed::*;

pub mod invariants;
pub mod validation;

pub use invariants::{find_state_violations, StateViolation};
pub use validation::validate_relaxed;

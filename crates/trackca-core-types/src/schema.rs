//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_EVENT_ID: &str = "event_id";
pub const FIELD_PASS_ID: &str = "pass_id";

// Item identifiers
pub const FIELD_ITEM_ID: &str = "item_id";

// Collection sizes and diagnostic counts
pub const FIELD_N_ITEMS: &str = "n_items";
pub const FIELD_N_RELATIONS: &str = "n_relations";
pub const FIELD_N_ROUNDS: &str = "n_rounds";
pub const FIELD_N_CYCLE: &str = "n_cycle";
pub const FIELD_N_SEEDS: &str = "n_seeds";
pub const FIELD_N_PATHS: &str = "n_paths";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

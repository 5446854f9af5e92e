use trackca_core_types::EventId;
use thiserror::Error;

use crate::model::ItemId;

/// Result type alias using TrackCaError
pub type Result<T> = std::result::Result<T, TrackCaError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and log aggregation. The algorithm phases
/// themselves never fail; these kinds cover graph construction, configuration
/// and the caller-side drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Graph construction
    UnknownItem,
    NonFiniteWeight,

    // Configuration
    InvalidConfig,

    // Driver budgets
    BudgetExceeded,

    // Post-relaxation checks
    InvariantViolation,

    // Integration/IO
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::UnknownItem => "ERR_UNKNOWN_ITEM",
            ExErrorKind::NonFiniteWeight => "ERR_NON_FINITE_WEIGHT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::BudgetExceeded => "ERR_BUDGET_EXCEEDED",
            ExErrorKind::InvariantViolation => "ERR_INVARIANT_VIOLATION",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and the item /
/// event context needed to find the offending record in a log.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    item_id: Option<ItemId>,
    event_id: Option<EventId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            item_id: None,
            event_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add item context
    pub fn with_item_id(mut self, id: ItemId) -> Self {
        self.item_id = Some(id);
        self
    }

    /// Add event context
    pub fn with_event_id(mut self, event_id: EventId) -> Self {
        self.event_id = Some(event_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn item_id(&self) -> Option<ItemId> {
        self.item_id
    }

    pub fn event_id(&self) -> Option<&EventId> {
        self.event_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(item_id) = self.item_id {
            write!(f, " (item: {})", item_id)?;
        }
        if let Some(event_id) = &self.event_id {
            write!(f, " (event: {})", event_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for trackca operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackCaError {
    /// A relation or lookup referenced an item outside the arena
    #[error("Unknown item {item_id}: arena holds {n_items} items")]
    UnknownItem { item_id: ItemId, n_items: usize },

    /// A cell or relation weight was NaN or infinite
    #[error("Non-finite {what} weight {value} for item {item_id}")]
    NonFiniteWeight {
        what: &'static str,
        item_id: ItemId,
        value: f64,
    },

    /// Configuration value out of its allowed range
    #[error("Invalid configuration field '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    /// Caller-imposed enumeration budget exceeded; the event must be aborted
    #[error("Budget exceeded for {what}: limit {limit}, found at least {found}")]
    BudgetExceeded {
        what: &'static str,
        limit: usize,
        found: usize,
    },

    /// Post-relaxation check found broken cell states
    #[error("Relaxation invariant violated at item {item_id}: {reason}")]
    InvariantViolation { item_id: ItemId, reason: String },

    /// Configuration or summary (de)serialization failure
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Internal error (should never happen)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from TrackCaError to the structured ExError
impl From<TrackCaError> for ExError {
    fn from(err: TrackCaError) -> Self {
        match err {
            TrackCaError::UnknownItem { item_id, n_items } => {
                ExError::new(ExErrorKind::UnknownItem)
                    .with_item_id(item_id)
                    .with_message(format!("Arena holds {} items", n_items))
            }

            TrackCaError::NonFiniteWeight {
                what,
                item_id,
                value,
            } => ExError::new(ExErrorKind::NonFiniteWeight)
                .with_item_id(item_id)
                .with_message(format!("Non-finite {} weight {}", what, value)),

            TrackCaError::InvalidConfig { field, reason } => {
                ExError::new(ExErrorKind::InvalidConfig)
                    .with_message(format!("{}: {}", field, reason))
            }

            TrackCaError::BudgetExceeded { what, limit, found } => {
                ExError::new(ExErrorKind::BudgetExceeded).with_message(format!(
                    "{} budget {} exceeded ({} found)",
                    what, limit, found
                ))
            }

            TrackCaError::InvariantViolation { item_id, reason } => {
                ExError::new(ExErrorKind::InvariantViolation)
                    .with_item_id(item_id)
                    .with_message(reason)
            }

            TrackCaError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            TrackCaError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for TrackCaError {
    fn from(err: serde_json::Error) -> Self {
        TrackCaError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for TrackCaError {
    fn from(err: toml::de::Error) -> Self {
        TrackCaError::Serialization {
            message: err.to_string(),
        }
    }
}

use thiserror::Error;
use vectarget_core_types::{ActorId, CapabilityId, SessionId};

/// Result type alias using VectorTargetError
pub type Result<T> = std::result::Result<T, VectorTargetError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and log assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Queue protocol
    /// Dispatch started for a queue that holds nothing (interceptor/dispatch desync)
    EmptyQueue,
    /// Queue at capacity refused a push
    Overflow,
    /// Push with a sequence number that does not advance the queue
    SequenceRegression,

    // Configuration
    InvalidConfiguration,
    UnknownCapability,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::EmptyQueue => "ERR_EMPTY_QUEUE",
            ExErrorKind::Overflow => "ERR_QUEUE_OVERFLOW",
            ExErrorKind::SequenceRegression => "ERR_SEQUENCE_REGRESSION",
            ExErrorKind::InvalidConfiguration => "ERR_INVALID_CONFIGURATION",
            ExErrorKind::UnknownCapability => "ERR_UNKNOWN_CAPABILITY",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether this kind means protocol state can no longer be trusted
    pub fn is_fatal(&self) -> bool {
        matches!(self, ExErrorKind::EmptyQueue | ExErrorKind::Internal)
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and the
/// targeting keys (session, actor, capability, sequence) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    session_id: Option<SessionId>,
    actor_id: Option<ActorId>,
    capability_id: Option<CapabilityId>,
    sequence: Option<i64>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            session_id: None,
            actor_id: None,
            capability_id: None,
            sequence: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add session context
    pub fn with_session_id(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Add actor context
    pub fn with_actor_id(mut self, actor_id: ActorId) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    /// Add capability context
    pub fn with_capability_id(mut self, capability_id: CapabilityId) -> Self {
        self.capability_id = Some(capability_id);
        self
    }

    /// Add sequence number context
    pub fn with_sequence(mut self, sequence: i64) -> Self {
        self.sequence = Some(sequence);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session_id
    }

    pub fn actor_id(&self) -> Option<ActorId> {
        self.actor_id
    }

    pub fn capability_id(&self) -> Option<CapabilityId> {
        self.capability_id
    }

    pub fn sequence(&self) -> Option<i64> {
        self.sequence
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " op={}", op)?;
        }
        if let Some(actor_id) = self.actor_id {
            write!(f, " {}", actor_id)?;
        }
        if let Some(capability_id) = self.capability_id {
            write!(f, " {}", capability_id)?;
        }
        if let Some(sequence) = self.sequence {
            write!(f, " seq={}", sequence)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== Domain Errors ==========

/// Errors raised by the targeting core
#[derive(Debug, Clone, Error, PartialEq)]
pub enum VectorTargetError {
    // ===== Queue Errors =====
    /// Dispatch started but nothing was queued for the pair
    #[error("Empty queue: no queued vector target for {actor_id} / {capability_id}")]
    EmptyQueue {
        actor_id: ActorId,
        capability_id: CapabilityId,
    },

    /// Pop from a queue with no boundary (standalone queue use)
    #[error("Empty queue: nothing to pop")]
    NothingQueued,

    /// Queue is at capacity
    #[error("Queue overflow: capacity {capacity} reached")]
    QueueOverflow { capacity: usize },

    /// Push would break strictly increasing insertion order
    #[error("Sequence regression: {sequence} does not follow last queued sequence {last}")]
    SequenceRegression { sequence: i64, last: i64 },

    // ===== Configuration Errors =====
    /// Capability configuration is unusable
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Referenced capability is not configured
    #[error("Unknown capability {capability_id}")]
    UnknownCapability { capability_id: CapabilityId },

    /// TOML decoding failed
    #[error("Config error: {message}")]
    Config { message: String },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Filesystem error
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl From<VectorTargetError> for ExError {
    fn from(err: VectorTargetError) -> Self {
        match err {
            VectorTargetError::EmptyQueue {
                actor_id,
                capability_id,
            } => ExError::new(ExErrorKind::EmptyQueue)
                .with_op("dispatch_start")
                .with_actor_id(actor_id)
                .with_capability_id(capability_id)
                .with_message("Dispatch started with no queued vector target"),

            VectorTargetError::NothingQueued => {
                ExError::new(ExErrorKind::EmptyQueue).with_message("Nothing to pop")
            }

            VectorTargetError::QueueOverflow { capacity } => ExError::new(ExErrorKind::Overflow)
                .with_message(format!("Queue capacity {} reached", capacity)),

            VectorTargetError::SequenceRegression { sequence, last } => {
                ExError::new(ExErrorKind::SequenceRegression)
                    .with_sequence(sequence)
                    .with_message(format!("Last queued sequence is {}", last))
            }

            VectorTargetError::InvalidConfiguration { reason } => {
                ExError::new(ExErrorKind::InvalidConfiguration).with_message(reason)
            }

            VectorTargetError::UnknownCapability { capability_id } => {
                ExError::new(ExErrorKind::UnknownCapability)
                    .with_capability_id(capability_id)
                    .with_message("Capability is not configured")
            }

            VectorTargetError::Config { message } => {
                ExError::new(ExErrorKind::InvalidConfiguration).with_message(message)
            }

            VectorTargetError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            VectorTargetError::Io { message } => ExError::new(ExErrorKind::Io).with_message(message),
        }
    }
}

/// Conversion from serde_json::Error to VectorTargetError
impl From<serde_json::Error> for VectorTargetError {
    fn from(err: serde_json::Error) -> Self {
        VectorTargetError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for VectorTargetError {
    fn from(err: toml::de::Error) -> Self {
        VectorTargetError::Config {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for VectorTargetError {
    fn from(err: std::io::Error) -> Self {
        VectorTargetError::Io {
            message: err.to_string(),
        }
    }
}

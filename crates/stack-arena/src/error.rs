//! Error types for stack-arena
//!
//! Uses thiserror for clean, idiomatic Rust error definitions.

use core::alloc::Layout;
use thiserror::Error;

#[cfg(feature = "logging")]
use tracing::{debug, warn};

// ============================================================================
// Main Error Type
// ============================================================================

/// Arena errors
///
/// Exhaustion is the only error an arena reports during normal operation.
/// The remaining variants describe API misuse that is detected at runtime.
#[must_use = "errors should be handled"]
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    #[error("arena exhausted: requested {requested} bytes, available {available}")]
    Exhausted { requested: usize, available: usize },

    #[error("requested alignment {requested} exceeds arena alignment {arena}")]
    AlignmentTooStrict { requested: usize, arena: usize },

    #[error("marker {position:#x} lies outside the arena buffer [{start:#x}, {end:#x}]")]
    MarkerOutOfRange {
        position: usize,
        start: usize,
        end: usize,
    },

    #[error("marker {position:#x} is not aligned to {align} bytes")]
    MisalignedMarker { position: usize, align: usize },
}

impl ArenaError {
    /// Check if error is retryable
    ///
    /// Only exhaustion clears up on its own, after a rewind or a smaller request.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// Get error code for categorization
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Exhausted { .. } => "ARENA:EXHAUSTED",
            Self::AlignmentTooStrict { .. } => "ARENA:ALIGN",
            Self::MarkerOutOfRange { .. } => "ARENA:MARKER:RANGE",
            Self::MisalignedMarker { .. } => "ARENA:MARKER:ALIGN",
        }
    }

    /// Check if this error was caused by a bad marker
    #[must_use]
    pub fn is_invalid_marker(&self) -> bool {
        matches!(
            self,
            Self::MarkerOutOfRange { .. } | Self::MisalignedMarker { .. }
        )
    }

    // ========================================================================
    // Convenience Constructors
    // ========================================================================

    /// Create exhausted error
    pub fn exhausted(requested: usize, available: usize) -> Self {
        #[cfg(feature = "logging")]
        debug!(requested, available, "stack arena exhausted");

        Self::Exhausted {
            requested,
            available,
        }
    }

    /// Create alignment error from a layout the arena cannot honour
    pub fn alignment_too_strict(layout: Layout, arena: usize) -> Self {
        #[cfg(feature = "logging")]
        debug!(
            size = layout.size(),
            requested = layout.align(),
            arena,
            "layout alignment exceeds arena alignment"
        );

        Self::AlignmentTooStrict {
            requested: layout.align(),
            arena,
        }
    }

    /// Create out-of-range marker error
    pub fn marker_out_of_range(position: usize, start: usize, end: usize) -> Self {
        #[cfg(feature = "logging")]
        warn!(position, start, end, "marker outside arena buffer");

        Self::MarkerOutOfRange {
            position,
            start,
            end,
        }
    }

    /// Create misaligned marker error
    pub fn misaligned_marker(position: usize, align: usize) -> Self {
        #[cfg(feature = "logging")]
        warn!(position, align, "marker not aligned to arena alignment");

        Self::MisalignedMarker { position, align }
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Result type for arena operations
pub type ArenaResult<T> = Result<T, ArenaError>;

// ============================================================================
// Tests
// ============================================================================

//! Setup-time error types.
//!
//! The frame loop itself has no failure path: physics is deterministic and
//! game over is a normal session state. Errors only surface while building a
//! table or validating a [`GameConfig`](crate::GameConfig).

use std::fmt;

/// Top-level error enum for the pool engine.
#[derive(Debug, Clone, PartialEq)]
pub enum PoolError {
    /// A cushion outline could not be turned into a convex collider,
    /// usually because its points are collinear or duplicated.
    InvalidCushion {
        /// Position of the cushion in the table's cushion list.
        index: usize,
        /// Number of points supplied for the outline.
        vertex_count: usize,
    },

    /// A configuration constant is outside its safe operating range.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::InvalidCushion { index, vertex_count } => write!(
                f,
                "cushion {index} is not a valid convex polygon ({vertex_count} points)"
            ),
            PoolError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "config constant `{name}` = {value} is outside safe range {safe_range}"
            ),
        }
    }
}

impl std::error::Error for PoolError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_cushion_index() {
        let err = PoolError::InvalidCushion {
            index: 4,
            vertex_count: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("cushion 4"), "{msg}");
        assert!(msg.contains("2 points"), "{msg}");
    }

    #[test]
    fn display_mentions_constant_name() {
        let err = PoolError::UnsafeConstant {
            name: "fps",
            value: 0.0,
            safe_range: "(0, 1000]",
        };
        assert!(err.to_string().contains("`fps`"));
    }
}

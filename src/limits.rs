//! Parser configuration.
//!
//! Recursive descent uses one stack frame per nesting level, so a hostile
//! input like `[[[[...` can exhaust the stack. [`Limits`] bounds the depth;
//! exceeding it is an ordinary parse failure.

/// Default maximum nesting depth for arrays and objects.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 512;

/// Limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limits {
    /// Maximum number of simultaneously open arrays/objects.
    pub max_nesting_depth: usize,
}

impl Limits {
    /// Default limits, see [`DEFAULT_MAX_NESTING_DEPTH`].
    pub const fn new() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    /// No nesting limit. Only use on trusted input.
    pub const fn unbounded() -> Self {
        Self {
            max_nesting_depth: usize::MAX,
        }
    }

    /// Replace the nesting limit.
    pub const fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new()
    }
}

//! Run-time options for validation runs.

/// Options controlling a validation run.
///
/// The default raises on failure and evaluates constraints sequentially.
///
/// # Example
///
/// ```rust
/// use seal_core::ValidationOptions;
///
/// let options = ValidationOptions::new()
///     .with_raise_on_error(false)
///     .with_parallel(true);
///
/// assert!(!options.raise_on_error);
/// assert!(options.parallel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Raise a `ValidationError` on failure instead of returning a failed result.
    ///
    /// When set, type-check failures abort the run before any constraint is
    /// evaluated; constraint failures are raised after every constraint ran.
    pub raise_on_error: bool,

    /// Evaluate constraints on multiple threads.
    ///
    /// Output order and raising behaviour are identical to sequential runs.
    pub parallel: bool,
}

impl ValidationOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that never raise and always run both phases.
    pub fn collect_all() -> Self {
        Self::default().with_raise_on_error(false)
    }

    /// Sets fail-fast mode.
    pub fn with_raise_on_error(mut self, raise_on_error: bool) -> Self {
        self.raise_on_error = raise_on_error;
        self
    }

    /// Sets parallel constraint evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            raise_on_error: true,
            parallel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ValidationOptions::default();
        assert!(options.raise_on_error);
        assert!(!options.parallel);
    }

    #[test]
    fn test_collect_all() {
        let options = ValidationOptions::collect_all();
        assert!(!options.raise_on_error);
        assert!(!options.parallel);
    }
}

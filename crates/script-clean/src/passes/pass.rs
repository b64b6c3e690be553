//! Pass type for text transformation.

/// Type alias for transform functions
pub type TransformFn = Box<dyn Fn(&str) -> String + Send + Sync>;

/// A single text-to-text step of the cleaning pipeline
pub struct Pass {
    /// Transform applied to the output of the previous pass
    pub transform: TransformFn,
}

impl Pass {
    /// Create a new pass
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            transform: Box::new(transform),
        }
    }

    /// Create a pass that replaces every occurrence of a literal string
    pub fn replace_literal(from: &'static str, to: &'static str) -> Self {
        Self::new(move |text| text.replace(from, to))
    }

    /// Apply this pass
    pub fn apply(&self, text: &str) -> String {
        (self.transform)(text)
    }
}

impl std::fmt::Debug for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pass").finish_non_exhaustive()
    }
}

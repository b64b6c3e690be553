//! Pass system for text cleaning.
//!
//! Passes run in insertion order. The standard pipeline has three stages,
//! each assuming the output shape of the one before it:
//!
//! 1. [`markdown`] strips formatting artifacts
//! 2. [`numbering`] puts every numbered item on its own line
//! 3. [`whitespace`] normalizes spacing and blank lines

mod markdown;
mod numbering;
mod pass;
mod whitespace;

pub use markdown::markdown_passes;
pub use numbering::numbering_passes;
pub use pass::Pass;
pub use whitespace::whitespace_passes;

use indexmap::IndexMap;

/// Ordered collection of named passes
#[derive(Debug, Default)]
pub struct Passes {
    passes: IndexMap<String, Pass>,
}

impl Passes {
    /// Create an empty collection
    pub fn new() -> Self {
        Self {
            passes: IndexMap::new(),
        }
    }

    /// Create the standard three-stage cleaning pipeline
    pub fn standard() -> Self {
        let mut passes = Self::new();
        for (key, pass) in markdown_passes()
            .into_iter()
            .chain(numbering_passes())
            .chain(whitespace_passes())
        {
            passes.add(key, pass);
        }
        passes
    }

    /// Add a pass at the end, or replace an existing pass in place
    pub fn add(&mut self, key: &str, pass: Pass) {
        self.passes.insert(key.to_string(), pass);
    }

    /// Remove a pass, keeping the order of the rest
    pub fn remove(&mut self, key: &str) -> Option<Pass> {
        self.passes.shift_remove(key)
    }

    /// Get a pass by key
    pub fn get(&self, key: &str) -> Option<&Pass> {
        self.passes.get(key)
    }

    /// Pass keys in application order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.passes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Run text through every pass in order
    pub fn apply(&self, text: &str) -> String {
        self.passes
            .values()
            .fold(text.to_string(), |acc, pass| pass.apply(&acc))
    }
}

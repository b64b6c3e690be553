//! CleanService - the main entry point for cleaning text blocks.

use once_cell::sync::Lazy;

use crate::passes::{Pass, Passes};

static STANDARD: Lazy<CleanService> = Lazy::new(CleanService::new);

/// Clean a single text block with the standard pipeline.
///
/// `None` yields an empty string.
pub fn clean_block(text: Option<&str>) -> String {
    STANDARD.clean(text)
}

/// The service that runs text blocks through an ordered set of passes
#[derive(Debug)]
pub struct CleanService {
    passes: Passes,
}

impl CleanService {
    /// Create a CleanService with the standard pipeline
    pub fn new() -> Self {
        Self {
            passes: Passes::standard(),
        }
    }

    /// Create a CleanService with a custom set of passes
    pub fn with_passes(passes: Passes) -> Self {
        Self { passes }
    }

    /// Clean a text block
    pub fn clean(&self, text: Option<&str>) -> String {
        match text {
            Some(text) if !text.is_empty() => self.passes.apply(text),
            _ => String::new(),
        }
    }

    /// Add a pass after the existing ones (or replace one with the same key)
    pub fn add_pass(&mut self, key: &str, pass: Pass) -> &mut Self {
        self.passes.add(key, pass);
        self
    }

    /// Remove a pass
    pub fn remove_pass(&mut self, key: &str) -> &mut Self {
        self.passes.remove(key);
        self
    }

    /// Get the current passes
    pub fn passes(&self) -> &Passes {
        &self.passes
    }
}

impl Default for CleanService {
    fn default() -> Self {
        Self::new()
    }
}

// crates/engine/src/options.rs
use crate::error::{EngineError, Result};
use derive_builder::Builder;

/// How the tree is visited and in which order renames are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Collect every candidate first, then apply them in reverse walk order.
    #[default]
    Collect,
    /// Children-before-parent walk; candidates are applied as they are visited.
    PostOrder,
}

/// Options for a single rename run.
///
/// The root path is passed separately so the same options can be reused
/// across several trees.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct RenameOptions {
    /// Substring searched for in base names. Must not be empty.
    pub old: String,
    /// Replacement text, inserted verbatim. May be empty.
    #[builder(default)]
    pub new: String,
    #[builder(default = "true")]
    pub case_sensitive: bool,
    #[builder(default)]
    pub dry_run: bool,
    /// Turn per-entry failures (walk errors, collisions, rename errors) into
    /// reported skips instead of aborting the run.
    #[builder(default)]
    pub skip_errors: bool,
    #[builder(default)]
    pub follow_links: bool,
    #[builder(default, setter(strip_option))]
    pub max_depth: Option<usize>,
    #[builder(default)]
    pub order: TraversalOrder,
}

impl RenameOptionsBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        match &self.old {
            Some(old) if old.is_empty() => Err(EMPTY_OLD.to_string()),
            _ => Ok(()),
        }
    }
}

const EMPTY_OLD: &str = "old substring must not be empty";

impl RenameOptions {
    /// Case-sensitive options that abort on the first error.
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
            case_sensitive: true,
            dry_run: false,
            skip_errors: false,
            follow_links: false,
            max_depth: None,
            order: TraversalOrder::default(),
        }
    }

    /// Check invariants that the builder cannot enforce on hand-built values.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] when `old` is empty.
    pub fn validate(&self) -> Result<()> {
        if self.old.is_empty() {
            return Err(EngineError::InvalidInput(EMPTY_OLD.to_string()));
        }
        Ok(())
    }
}

//! The reifier's options record.

use std::collections::BTreeSet;

use crate::code::Access;

use super::names::default_keywords;

/// Chooses the access level of a declaration from its name path.
pub type Accessor = Box<dyn Fn(&[String]) -> Access>;

/// User hook to rename a declaration; `None` falls back to sanitation.
/// Conventionally maps the root id `"#"` to something like `"Schema"`.
pub type Renamer = Box<dyn Fn(&[String], &str) -> Option<String>>;

/// Configuration passed by value into `reify`/`reify_module`.
///
/// Both hooks must be pure functions of their inputs; the reifier may call
/// them repeatedly for the same path.
pub struct ReifyOptions {
    pub accessor: Option<Accessor>,
    pub renamer: Option<Renamer>,
    /// Wrap `Named` fields in `Indirect` once a struct carries more fields
    /// than this, keeping by-value sizes bounded.
    pub indirect_count_threshold: usize,
    /// Request an equality conformance on generated declarations.
    pub generate_equals: bool,
    /// Reserved identifiers of the target language.
    pub keywords_to_avoid: BTreeSet<String>,
}

impl ReifyOptions {
    pub(crate) fn access_for(&self, path: &[String]) -> Access {
        match &self.accessor {
            Some(f) => f(path),
            None => Access::Public,
        }
    }

    pub(crate) fn rename(&self, path: &[String], raw: &str) -> Option<String> {
        self.renamer.as_ref().and_then(|f| f(path, raw))
    }
}

impl Default for ReifyOptions {
    fn default() -> Self {
        Self {
            accessor: None,
            renamer: None,
            indirect_count_threshold: 16,
            generate_equals: true,
            keywords_to_avoid: default_keywords(),
        }
    }
}

impl std::fmt::Debug for ReifyOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReifyOptions")
            .field("accessor", &self.accessor.as_ref().map(|_| "<fn>"))
            .field("renamer", &self.renamer.as_ref().map(|_| "<fn>"))
            .field("indirect_count_threshold", &self.indirect_count_threshold)
            .field("generate_equals", &self.generate_equals)
            .field("keywords_to_avoid", &self.keywords_to_avoid.len())
            .finish()
    }
}

//! Member name diffing between two ordered key sets

use indexmap::IndexSet;

/// Ordered difference between the exposed members and a new definition
///
/// - `added`: in `next`, not in `previous` (order of `next`)
/// - `retained`: in both (order of `next`)
/// - `removed`: in `previous`, not in `next` (order of `previous`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDiff {
    /// Newly declared names
    pub added: Vec<String>,
    /// Names no longer declared
    pub removed: Vec<String>,
    /// Names declared before and after
    pub retained: Vec<String>,
}

impl MemberDiff {
    /// Diff two ordered name lists; duplicates are ignored after their first
    /// occurrence
    #[must_use]
    pub fn between<P, N>(previous: &[P], next: &[N]) -> Self
    where
        P: AsRef<str>,
        N: AsRef<str>,
    {
        let before: IndexSet<&str> = previous.iter().map(AsRef::as_ref).collect();
        let after: IndexSet<&str> = next.iter().map(AsRef::as_ref).collect();

        let mut diff = Self::default();
        for name in &after {
            if before.contains(name) {
                diff.retained.push((*name).to_owned());
            } else {
                diff.added.push((*name).to_owned());
            }
        }
        diff.removed = before
            .iter()
            .filter(|name| !after.contains(*name))
            .map(|name| (*name).to_owned())
            .collect();
        diff
    }

    /// True if the key sets are identical
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

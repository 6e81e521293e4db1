use std::sync::LazyLock;

use syscalls::Sysno;
use tracing::trace;

use crate::errors::{Error, Result};

/// The calls known to the host architecture, sorted once for the whole run.
pub static HOST_CALL_TABLE: LazyLock<CallTable> = LazyLock::new(CallTable::host);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallTableEntry {
    pub name: &'static str,
    pub code: i64,
}

/// Symbolic call names and their numeric codes, ordered by name so that a
/// lookup is a binary search.
#[derive(Clone, Debug)]
pub struct CallTable {
    entries: Vec<CallTableEntry>,
}

impl CallTable {
    pub fn from_entries(entries: impl IntoIterator<Item = CallTableEntry>) -> Self {
        let mut entries: Vec<CallTableEntry> = entries.into_iter().collect();
        entries.sort_unstable_by(|left, right| left.name.cmp(right.name));
        Self { entries }
    }

    pub fn host() -> Self {
        Self::from_entries(Sysno::iter().map(|sysno| CallTableEntry {
            name: sysno.name(),
            code: i64::from(sysno.id()),
        }))
    }

    pub fn resolve(&self, name: &str) -> Result<i64> {
        let index = self
            .entries
            .binary_search_by(|entry| entry.name.cmp(name))
            .map_err(|_| Error::UnknownCall(name.to_owned()))?;
        let code = self.entries[index].code;
        trace!(name, code, "resolved");
        Ok(code)
    }

    /// Entries in name order.
    pub fn entries(&self) -> &[CallTableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

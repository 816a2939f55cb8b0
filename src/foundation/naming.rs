use std::sync::atomic::{AtomicU64, Ordering};

static GLOBAL: NameCounter = NameCounter::new();

/// Monotonic source of default names for anonymous parameters and views.
///
/// One process-wide instance is available through [`NameCounter::global`]; callers that
/// need names scoped per document (for example a server rendering many charts) can own
/// their own counter and pass it to the builders that accept one.
#[derive(Debug, Default)]
pub struct NameCounter {
    next: AtomicU64,
}

impl NameCounter {
    /// Create a counter whose first generated name ends in `_1`.
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Process-wide default counter.
    pub fn global() -> &'static NameCounter {
        &GLOBAL
    }

    /// Produce the next name, e.g. `param_3`.
    pub fn next_name(&self, prefix: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}_{n}")
    }

    /// Number of names handed out so far.
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }

    /// Restart numbering. Intended for test-harness boundaries.
    pub fn reset(&self) {
        self.next.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/naming.rs"]
mod tests;

use serde::Serialize;

/// Per-phase row counts. Skipped covers both conflict-skipped duplicates
/// and rows dropped because a dimension reference could not be resolved.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct LoadSummary {
    pub inserted: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl LoadSummary {
    pub fn total(&self) -> usize {
        self.inserted + self.skipped + self.errors
    }

    pub fn absorb(&mut self, other: LoadSummary) {
        self.inserted += other.inserted;
        self.skipped += other.skipped;
        self.errors += other.errors;
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunReport {
    pub menus: LoadSummary,
    pub orders: LoadSummary,
    pub checks: LoadSummary,
    pub time_entries: LoadSummary,
}

impl RunReport {
    pub fn has_errors(&self) -> bool {
        self.menus.errors > 0
            || self.orders.errors > 0
            || self.checks.errors > 0
            || self.time_entries.errors > 0
    }
}

//! Parse options.

/// Options for [`parse_logs_with`](crate::parse_logs_with).
///
/// The defaults match what an interactive look at a finished simulation
/// wants: one concatenated table with restart duplicates dropped, no
/// completeness chatter, nothing printed.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Stack all runs into one table instead of keeping one per run.
    pub concat: bool,
    /// Drop rows repeating an already-seen `Step` value, keeping the
    /// first occurrence. Only applies to the concatenated table.
    pub dedup_steps: bool,
    /// Log per-file run completeness after parsing.
    pub check_completeness: bool,
    /// Print the resulting table to stdout.
    pub print_table: bool,
    /// Columns to make cumulative across restarts within each file.
    pub extend_columns: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            concat: true,
            dedup_steps: true,
            check_completeness: false,
            print_table: false,
            extend_columns: Vec::new(),
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn concat(mut self, concat: bool) -> Self {
        self.concat = concat;
        self
    }

    #[must_use]
    pub fn dedup_steps(mut self, dedup_steps: bool) -> Self {
        self.dedup_steps = dedup_steps;
        self
    }

    #[must_use]
    pub fn check_completeness(mut self, check_completeness: bool) -> Self {
        self.check_completeness = check_completeness;
        self
    }

    #[must_use]
    pub fn print_table(mut self, print_table: bool) -> Self {
        self.print_table = print_table;
        self
    }

    /// Replace the set of columns extended across restarts.
    #[must_use]
    pub fn extend_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extend_columns = columns.into_iter().map(Into::into).collect();
        self
    }
}

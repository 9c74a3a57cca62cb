/// ProgressReporter port for reporting pipeline progress
///
/// This port abstracts user-facing progress output (e.g., to stderr)
/// for the fetch, layout and publish steps of a run.
pub trait ProgressReporter {
    /// Reports a step message
    fn report(&self, message: &str);

    /// Reports progress through the pipeline
    ///
    /// # Arguments
    /// * `current` - Number of completed steps
    /// * `total` - Total number of steps
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of the run
    fn report_completion(&self, message: &str);
}

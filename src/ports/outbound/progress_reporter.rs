/// ProgressReporter port - the merge diagnostics channel
///
/// Receives human-oriented messages while documents are loaded, merged and
/// validated: documents loaded, inputs skipped, component counts and
/// validation issues. Messages are advisory; a failure is always also
/// returned as an error.
pub trait ProgressReporter {
    /// Reports an informational step
    ///
    /// # Arguments
    /// * `message` - Text to show
    fn report(&self, message: &str);

    /// Reports how many of `total` units of work are done
    ///
    /// # Arguments
    /// * `current` - Units completed so far
    /// * `total` - Units expected
    /// * `message` - Optional label for the unit in flight
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a warning, such as a skipped input or a validation issue
    ///
    /// # Arguments
    /// * `message` - Warning text
    fn report_warning(&self, message: &str);

    /// Reports the end of the merge
    ///
    /// # Arguments
    /// * `message` - Summary line
    fn report_completion(&self, message: &str);
}

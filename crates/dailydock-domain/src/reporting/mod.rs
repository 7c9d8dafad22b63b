/// Run-level output framing (collapsible groups and annotations).
///
/// The workflow and coordinator talk to this narrow interface only; which
/// sink renders it (CI workflow commands, plain console) is chosen at startup.
pub trait RunReporter: Send + Sync {
    /// Open a collapsible group
    fn group(&self, title: &str);

    /// Close the innermost group
    fn end_group(&self);

    fn notice(&self, title: &str, message: &str);

    fn warning(&self, message: &str);

    fn error(&self, message: &str);

    fn debug(&self, message: &str);

    /// Pre-formatted text block, written as-is
    fn print(&self, text: &str);
}

/// Closes the group when dropped, so early returns cannot leave it open
pub struct GroupGuard<'a> {
    reporter: &'a dyn RunReporter,
}

impl<'a> GroupGuard<'a> {
    pub fn open(reporter: &'a dyn RunReporter, title: &str) -> Self {
        reporter.group(title);
        Self { reporter }
    }
}

impl Drop for GroupGuard<'_> {
    fn drop(&mut self) {
        self.reporter.end_group();
    }
}

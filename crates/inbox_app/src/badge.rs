use inbox_core::BadgeSink;
use tracing::info;

/// Badge stand-in for hosts without a home-screen indicator: the unread
/// count only goes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBadgeSink;

impl BadgeSink for LogBadgeSink {
    fn set_count(&self, unread: usize) {
        info!(unread, "badge count updated");
    }
}

//! Pending operation queue.

use cliplog_protocols::LogOperation;

/// Flush progress of the pending queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushState {
    /// Operations may be waiting; the next flush request will drain them.
    #[default]
    Idle,
    /// A flush is replaying operations. Nested flush requests are ignored.
    Flushing,
    /// The queue has been drained and nothing was deferred since.
    Flushed,
}

/// FIFO of operations deferred while the context gate was closed.
///
/// Each deferred operation is replayed exactly once. Deferring again after a
/// completed flush re-arms the queue, so operations held back by a gate that
/// closed again are not stranded.
#[derive(Debug, Default)]
pub struct PendingQueue {
    operations: Vec<LogOperation>,
    state: FlushState,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defer an operation.
    pub fn push(&mut self, operation: LogOperation) {
        self.operations.push(operation);
        if self.state == FlushState::Flushed {
            self.state = FlushState::Idle;
        }
    }

    /// Start a flush, taking every pending operation.
    ///
    /// Returns `None` while a flush is already running or once the queue has
    /// been flushed with nothing deferred since.
    pub fn begin_flush(&mut self) -> Option<Vec<LogOperation>> {
        if self.state != FlushState::Idle {
            return None;
        }
        self.state = FlushState::Flushing;
        Some(std::mem::take(&mut self.operations))
    }

    /// Finish the flush started by [`PendingQueue::begin_flush`].
    pub fn finish_flush(&mut self) {
        self.state = if self.operations.is_empty() {
            FlushState::Flushed
        } else {
            FlushState::Idle
        };
    }

    pub fn state(&self) -> FlushState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn operations(&self) -> &[LogOperation] {
        &self.operations
    }
}

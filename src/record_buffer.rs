use std::collections::VecDeque;

use parking_lot::Mutex;

/// In-memory store of formatted log lines awaiting consumption.
///
/// This module provides the shared FIFO that sits between the emission path
/// and whatever component later displays or persists log history. Unlike the
/// Logger's sink, which is write-only, the buffer supports a destructive
/// read-and-clear operation so a consumer (e.g. a UI log viewer) can show
/// everything accumulated since its last visit.
///
/// # Thread Safety
///
/// All threads share one buffer. Enqueue and drain are serialized by a single
/// mutex; the buffer provides mutual exclusion but no ordering guarantee
/// across emitting threads beyond the order in which their calls acquire the
/// lock.

/// Default capacity of a [`RecordBuffer`], in lines.
///
/// The buffer is bounded: once full, enqueueing drops the oldest line. A
/// diagnostics viewer that drains after a burst wants the newest records,
/// so drop-oldest is the eviction policy.
pub const DEFAULT_CAPACITY: usize = 4096;

/// A bounded FIFO of formatted log lines.
///
/// Lines are stored exactly as enqueued, terminator included. Draining
/// removes every queued line and concatenates the non-blank ones in
/// insertion order.
///
/// # Examples
///
/// ```
/// # use tap_logger::RecordBuffer;
/// let buffer = RecordBuffer::new();
/// buffer.enqueue("[NET]: connected\n".to_string());
/// buffer.enqueue("[UI]: window shown\n".to_string());
///
/// assert_eq!(buffer.drain_all(), "[NET]: connected\n[UI]: window shown\n");
///
/// // Drain is destructive: a second drain finds nothing.
/// assert_eq!(buffer.drain_all(), "");
/// ```
pub struct RecordBuffer {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl RecordBuffer {
    /// Creates a buffer with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a buffer bounded at `capacity` lines.
    ///
    /// A capacity of zero is treated as one: the buffer always holds at
    /// least the most recent line.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Appends a line at the tail.
    ///
    /// If the buffer is at capacity, the oldest line is dropped to make
    /// room. Safe to call concurrently from any number of emitters.
    pub fn enqueue(&self, line: String) {
        let mut lines = self.lines.lock();
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Removes all queued lines and returns their concatenation in FIFO
    /// order.
    ///
    /// Lines that are empty after trimming surrounding whitespace (e.g. a
    /// bare terminator) contribute nothing to the result but are still
    /// removed. Draining an empty buffer returns the empty string. No line
    /// is ever returned twice.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tap_logger::RecordBuffer;
    /// let buffer = RecordBuffer::new();
    /// buffer.enqueue("\n".to_string());
    /// buffer.enqueue("[NET]: retrying\n".to_string());
    ///
    /// // The blank line is skipped but the queue is fully cleared.
    /// assert_eq!(buffer.drain_all(), "[NET]: retrying\n");
    /// assert!(buffer.is_empty());
    /// ```
    pub fn drain_all(&self) -> String {
        let mut lines = self.lines.lock();
        let mut result = String::new();
        for line in lines.drain(..) {
            if !line.trim().is_empty() {
                result.push_str(&line);
            }
        }
        result
    }

    /// Number of lines currently queued, blank lines included.
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl Default for RecordBuffer {
    fn default() -> Self {
        Self::new()
    }
}

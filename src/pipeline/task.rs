//! Per-reference task lifecycle
//!
//! Each discovered reference becomes one task. A task moves through
//! Pending, Fetching, and Retrying until it lands in one of the two
//! terminal states; the attempt counter bounds total fetch attempts,
//! retries included.

use crate::discover::ContentReference;

/// Lifecycle states of one extraction task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Fetching,
    Retrying,
    Succeeded,
    Failed,
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// One unit of work: fetch a reference, extract its records
#[derive(Debug, Clone)]
pub struct ExtractionTask {
    pub reference: ContentReference,
    pub attempt_count: u32,
    pub state: TaskState,
}

impl ExtractionTask {
    pub fn new(reference: ContentReference) -> Self {
        Self {
            reference,
            attempt_count: 0,
            state: TaskState::Pending,
        }
    }

    /// Marks the start of a fetch attempt and counts it against the bound
    pub fn begin_attempt(&mut self) {
        self.attempt_count += 1;
        self.state = TaskState::Fetching;
    }

    pub fn succeed(&mut self) {
        self.state = TaskState::Succeeded;
    }

    /// Records a failed attempt. Returns true if the task may be retried,
    /// false once the attempt budget is exhausted and the task is Failed.
    pub fn record_failure(&mut self, max_retries: u32) -> bool {
        if self.attempt_count < max_retries {
            self.state = TaskState::Retrying;
            true
        } else {
            self.state = TaskState::Failed;
            false
        }
    }
}

//! Per-run state machines

use std::fmt::Debug;
use tracing::debug;

/// States of a metadata workflow run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataState {
    /// Not started
    Idle,
    /// Building the response
    Running,
    /// Response returned
    Succeeded,
    /// Run ended with an error
    Failed,
}

/// States of a process-file workflow run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessFileState {
    /// Not started
    Idle,
    /// Event accepted for an uploaded file
    Uploaded(String),
    /// Waiting on the backend
    Extracting,
    /// Result returned
    Succeeded,
    /// Run ended with an error
    Failed,
}

/// Ordered record of the states one run passed through
#[derive(Debug)]
pub(crate) struct RunTrace<S> {
    workflow: &'static str,
    history: Vec<S>,
}

impl<S: Debug + Clone> RunTrace<S> {
    pub(crate) fn new(workflow: &'static str, initial: S) -> Self {
        Self {
            workflow,
            history: vec![initial],
        }
    }

    pub(crate) fn advance(&mut self, next: S) {
        if let Some(current) = self.history.last() {
            debug!(workflow = self.workflow, from = ?current, to = ?next, "state transition");
        }
        self.history.push(next);
    }

    pub(crate) fn into_history(self) -> Vec<S> {
        self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_records_in_order() {
        let mut trace = RunTrace::new("metadata", MetadataState::Idle);
        trace.advance(MetadataState::Running);
        trace.advance(MetadataState::Succeeded);
        assert_eq!(
            trace.into_history(),
            vec![
                MetadataState::Idle,
                MetadataState::Running,
                MetadataState::Succeeded
            ]
        );
    }
}

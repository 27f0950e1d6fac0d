//! Progress reporting for review runs. The runner emits done/total after
//! each chapter completes; the console layer consumes events via a sink.

use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub done: usize,
    pub total: usize,
}

pub type ProgressSink = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

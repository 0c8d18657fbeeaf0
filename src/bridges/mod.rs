//! Thin seams to the manager's external collaborators: the event sink, the
//! dependency-injection container, and the progress display. All three are
//! optional; their failures are recovered locally and never block lifecycle
//! progress.

mod di;
mod progress;
mod sink;

pub use di::DiBridge;
pub use progress::ProgressSink;
pub use sink::EventSink;

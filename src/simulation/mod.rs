//! Message forwarding and change replay on top of computed routing tables.

pub mod forwarder;
pub mod changes;

pub use forwarder::{forward, replay, trace_route, MessageTrace, TraceResult};
pub use changes::{ChangeApplier, ReplayRound};

//! Decoded telemetry shared between the link producer and the render consumer

pub mod latch;
pub mod mock;
pub mod snapshot;
pub mod values;

pub use latch::ConnectionLatch;
pub use mock::MockSweep;
pub use snapshot::TelemetrySnapshot;
pub use values::TelemetryValues;

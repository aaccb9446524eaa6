use std::time::Duration;

/// Monotonic time source for gesture timing.
///
/// Readings are offsets from an arbitrary fixed epoch and never go
/// backwards.
pub trait Clock: Send {
    fn now(&self) -> Duration;
}

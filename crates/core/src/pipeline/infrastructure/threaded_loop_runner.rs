use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::pipeline::eye_control_use_case::EyeControlUseCase;

type SendError = Box<dyn std::error::Error + Send + Sync>;

/// A blocking loop that can be driven from a background thread.
pub trait LoopTask {
    fn run(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}

impl LoopTask for EyeControlUseCase {
    fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        EyeControlUseCase::run(self)
    }
}

/// Runs a control loop on its own thread.
///
/// The loop is built by `factory` on the worker thread itself, so camera,
/// window and input handles never cross threads. The calling thread only
/// waits on the returned handle.
pub struct ThreadedLoopRunner;

impl ThreadedLoopRunner {
    pub fn spawn<T, F>(factory: F, cancelled: Arc<AtomicBool>) -> LoopHandle
    where
        T: LoopTask,
        F: FnOnce() -> Result<T, Box<dyn std::error::Error>> + Send + 'static,
    {
        let handle = std::thread::spawn(move || -> Result<(), SendError> {
            let mut task = factory().map_err(|e| -> SendError { e.to_string().into() })?;
            task.run().map_err(|e| -> SendError { e.to_string().into() })
        });
        LoopHandle { cancelled, handle }
    }
}

pub struct LoopHandle {
    cancelled: Arc<AtomicBool>,
    handle: JoinHandle<Result<(), SendError>>,
}

impl LoopHandle {
    /// Asks the loop to stop at its next iteration.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the loop to end and returns its outcome.
    pub fn join(self) -> Result<(), Box<dyn std::error::Error>> {
        match self.handle.join() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(e.to_string().into()),
            Err(_) => Err("Control loop thread panicked".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    struct SpinUntilCancelled {
        cancelled: Arc<AtomicBool>,
        iterations: Arc<AtomicUsize>,
    }

    impl LoopTask for SpinUntilCancelled {
        fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            while !self.cancelled.load(Ordering::Relaxed) {
                self.iterations.fetch_add(1, Ordering::Relaxed);
                std::thread::sleep(Duration::from_millis(1));
            }
            Ok(())
        }
    }

    struct Failing;

    impl LoopTask for Failing {
        fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            Err("camera unplugged".into())
        }
    }

    struct Panicking;

    impl LoopTask for Panicking {
        fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            panic!("boom");
        }
    }

    #[test]
    fn test_cancel_stops_loop() {
        let cancelled = Arc::new(AtomicBool::new(false));
        let iterations = Arc::new(AtomicUsize::new(0));
        let task_cancelled = cancelled.clone();
        let task_iterations = iterations.clone();

        let handle = ThreadedLoopRunner::spawn(
            move || {
                Ok(SpinUntilCancelled {
                    cancelled: task_cancelled,
                    iterations: task_iterations,
                })
            },
            cancelled,
        );
        while iterations.load(Ordering::Relaxed) == 0 {
            std::thread::sleep(Duration::from_millis(1));
        }
        handle.cancel();
        assert!(handle.join().is_ok());
    }

    #[test]
    fn test_loop_error_is_returned_from_join() {
        let handle = ThreadedLoopRunner::spawn(|| Ok(Failing), Arc::new(AtomicBool::new(false)));
        while !handle.is_finished() {
            std::thread::sleep(Duration::from_millis(1));
        }
        let err = handle.join().unwrap_err();
        assert!(err.to_string().contains("camera unplugged"));
    }

    #[test]
    fn test_factory_error_is_returned_from_join() {
        let handle = ThreadedLoopRunner::spawn(
            || -> Result<Failing, Box<dyn std::error::Error>> { Err("no camera".into()) },
            Arc::new(AtomicBool::new(false)),
        );
        let err = handle.join().unwrap_err();
        assert!(err.to_string().contains("no camera"));
    }

    #[test]
    fn test_panic_is_reported() {
        let handle = ThreadedLoopRunner::spawn(|| Ok(Panicking), Arc::new(AtomicBool::new(false)));
        let err = handle.join().unwrap_err();
        assert!(err.to_string().contains("panicked"));
    }
}

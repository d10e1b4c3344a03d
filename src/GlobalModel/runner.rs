//! Background execution of the integrator behind a narrow capability
//! interface: start, poll samples, cancel, join. A front end built on top of
//! this handle (or on polling the stream file, for an external process) never
//! touches the model while it runs; the worker thread owns it exclusively and
//! cancellation lands between complete steps.

use super::integrator::RunControl;
use super::model::{GlobalModel, ModelError};
use super::sampling::SampleRow;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, channel};
use std::thread::{self, JoinHandle};

pub struct ModelRunner {
    handle: JoinHandle<Result<GlobalModel, ModelError>>,
    cancel: Arc<AtomicBool>,
    samples: Receiver<SampleRow>,
}

impl ModelRunner {
    /// Start the simulation on a worker thread, appending samples to the
    /// stream at `output_path` and mirroring them into the handle's queue.
    pub fn spawn(mut model: GlobalModel, output_path: PathBuf) -> Self {
        let cancel = Arc::new(AtomicBool::new(false));
        let (sample_tx, samples) = channel();
        let worker_cancel = Arc::clone(&cancel);
        let handle = thread::spawn(move || {
            let control = RunControl {
                cancel: Some(worker_cancel),
                monitor: Some(sample_tx),
            };
            model.process_main_loop(&output_path, &control)?;
            Ok(model)
        });
        Self {
            handle,
            cancel,
            samples,
        }
    }

    /// Next queued sample, if any. Non-blocking.
    pub fn poll_sample(&self) -> Option<SampleRow> {
        self.samples.try_recv().ok()
    }

    /// Request a cooperative stop; the worker exits at the next step
    /// boundary.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the worker and take the model back.
    pub fn join(self) -> Result<GlobalModel, ModelError> {
        self.handle.join().map_err(|_| {
            ModelError::InvalidConfiguration("integration worker panicked".to_string())
        })?
    }
}

//! Background pipeline worker.
//!
//! Runs a [`Pipeline`] on a dedicated thread so an interactive caller never
//! blocks on a recomputation. Requests are tagged with a monotonically
//! increasing generation; the worker skips requests that were superseded
//! while it was busy, and the receiving side drops results of any
//! generation older than the newest submitted one.
//!
//! There is no cancellation of a batch in progress. Dropping the worker
//! detaches its thread, which exits after the current batch.

use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use log::{debug, info, trace, warn};

use crate::pipeline::{Pipeline, PipelineRequest, PipelineResult};
use crate::{Result, SceneError};

/// Handle identifying one submitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

struct Job {
    generation: u64,
    request: PipelineRequest,
}

struct Completed {
    generation: u64,
    result: Result<PipelineResult>,
}

pub struct PipelineWorker {
    jobs: Option<Sender<Job>>,
    results: Receiver<Completed>,
    handle: Option<std::thread::JoinHandle<()>>,
    generation: u64,
    pending: bool,
}

impl PipelineWorker {
    /// Start the worker thread
    pub fn spawn(pipeline: Pipeline) -> Result<Self> {
        let (job_tx, job_rx) = unbounded::<Job>();
        let (result_tx, result_rx) = unbounded::<Completed>();

        let handle = std::thread::Builder::new()
            .name("starscene-worker".to_string())
            .spawn(move || worker_loop(pipeline, job_rx, result_tx))?;

        Ok(Self {
            jobs: Some(job_tx),
            results: result_rx,
            handle: Some(handle),
            generation: 0,
            pending: false,
        })
    }

    /// Queue a request, superseding every earlier one
    ///
    /// # Returns
    /// * `Ok(Ticket)` - Generation assigned to the request
    /// * `Err(SceneError::WorkerDisconnected)` - The worker thread has exited
    pub fn submit(&mut self, request: PipelineRequest) -> Result<Ticket> {
        let jobs = self.jobs.as_ref().ok_or(SceneError::WorkerDisconnected)?;
        let generation = self.generation + 1;
        jobs.send(Job {
            generation,
            request,
        })
        .map_err(|_| SceneError::WorkerDisconnected)?;
        self.generation = generation;
        self.pending = true;
        trace!("Submitted pipeline request {generation}");
        Ok(Ticket(generation))
    }

    /// Ticket of the most recent submission
    pub fn latest_ticket(&self) -> Option<Ticket> {
        (self.generation > 0).then_some(Ticket(self.generation))
    }

    /// Whether the newest request has not been delivered yet
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Result of the newest request, if it is ready
    ///
    /// Stale results found along the way are discarded. Returns `None` when
    /// nothing is pending or the newest result has not arrived.
    pub fn try_latest(&mut self) -> Option<Result<PipelineResult>> {
        while self.pending {
            match self.results.try_recv() {
                Ok(completed) => {
                    if let Some(result) = self.accept(completed) {
                        return Some(result);
                    }
                }
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => return Some(self.disconnected()),
            }
        }
        None
    }

    /// Block until the newest request completes
    pub fn wait_latest(&mut self) -> Result<PipelineResult> {
        if !self.pending {
            return Err(SceneError::NothingPending);
        }
        loop {
            match self.results.recv() {
                Ok(completed) => {
                    if let Some(result) = self.accept(completed) {
                        return result;
                    }
                }
                Err(_) => return self.disconnected(),
            }
        }
    }

    /// Block until the newest request completes or the timeout elapses
    ///
    /// # Returns
    /// * `Ok(Some(result))` - Newest result arrived in time
    /// * `Ok(None)` - Timed out, the request is still pending
    /// * `Err(SceneError)` - Pipeline failure, nothing pending or a dead worker
    pub fn wait_latest_timeout(&mut self, timeout: Duration) -> Result<Option<PipelineResult>> {
        if !self.pending {
            return Err(SceneError::NothingPending);
        }
        let deadline = Instant::now() + timeout;
        loop {
            match self.results.recv_deadline(deadline) {
                Ok(completed) => {
                    if let Some(result) = self.accept(completed) {
                        return result.map(Some);
                    }
                }
                Err(RecvTimeoutError::Timeout) => return Ok(None),
                Err(RecvTimeoutError::Disconnected) => return self.disconnected(),
            }
        }
    }

    /// Stop accepting requests and wait for the thread to finish
    pub fn shutdown(mut self) {
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.join() {
                warn!("Pipeline worker panicked: {e:?}");
            }
        }
    }

    fn accept(&mut self, completed: Completed) -> Option<Result<PipelineResult>> {
        if completed.generation == self.generation {
            self.pending = false;
            Some(completed.result)
        } else {
            trace!(
                "Discarding stale pipeline result {} (latest {})",
                completed.generation,
                self.generation
            );
            None
        }
    }

    fn disconnected<T>(&mut self) -> Result<T> {
        self.pending = false;
        self.jobs.take();
        Err(SceneError::WorkerDisconnected)
    }
}

impl Drop for PipelineWorker {
    fn drop(&mut self) {
        // Closing the queue lets the thread exit once its current batch is done
        self.jobs.take();
    }
}

fn worker_loop(pipeline: Pipeline, jobs: Receiver<Job>, results: Sender<Completed>) {
    info!("Pipeline worker started");
    while let Ok(mut job) = jobs.recv() {
        while let Ok(newer) = jobs.try_recv() {
            trace!("Skipping superseded pipeline request {}", job.generation);
            job = newer;
        }

        let started = Instant::now();
        let result = pipeline.run(&job.request);
        debug!(
            "Pipeline request {} evaluated {} sources in {:?}",
            job.generation,
            job.request.len(),
            started.elapsed()
        );

        if results
            .send(Completed {
                generation: job.generation,
                result,
            })
            .is_err()
        {
            break;
        }
    }
    info!("Pipeline worker shutting down");
}

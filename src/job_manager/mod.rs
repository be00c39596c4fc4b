//! Background jobs for file I/O
//! Load/save run off the owning thread; results come back over a channel
//! and are applied to the document by its single owner

use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::constants::errors;
use crate::document::DocumentId;
use crate::error::{ErrorType, JotterError, Result};

pub mod jobs;

/// Sealed trait for job payloads to ensure type safety.
pub trait JobPayload: Any + Send + std::fmt::Debug + 'static {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Message sent from a background job to the owner.
#[derive(Debug)]
pub enum JobMessage {
    /// Job started
    Started(usize),
    /// Job finished successfully
    Finished(usize),
    /// Job failed with error message
    Error(usize, String),
    /// Job cancelled (terminal state)
    Cancelled(usize),
    /// Custom payload for job-specific results
    Custom(usize, Box<dyn JobPayload>),
}

impl JobMessage {
    fn job_id(&self) -> usize {
        match self {
            JobMessage::Started(id)
            | JobMessage::Finished(id)
            | JobMessage::Error(id, _)
            | JobMessage::Cancelled(id)
            | JobMessage::Custom(id, _) => *id,
        }
    }
}

/// Signal used to check if a job has been cancelled.
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    cancelled: Arc<AtomicBool>,
}

impl CancellationSignal {
    /// Check if the job has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// State of a background job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Running,
    Finished,
    Failed,
    Cancelled,
}

/// Handle to a running job
pub struct JobHandle {
    pub handle: JoinHandle<()>,
    pub state: JobState,
    pub cancellation_token: Arc<AtomicBool>,
    /// Document whose I/O this job owns, if any
    pub document_id: Option<DocumentId>,
}

/// Trait defining a background job.
/// Jobs must be Send + 'static to be moved into a thread.
pub trait Job: Send + std::fmt::Debug + 'static {
    /// Run the job.
    ///
    /// # Invariants
    /// * The job MUST NOT touch document state; it sends a payload the
    ///   owning thread applies.
    /// * The job SHOULD check `sender.send(...)` results AND
    ///   `signal.is_cancelled()` and exit early when cancelled.
    fn run(self: Box<Self>, id: usize, sender: Sender<JobMessage>, signal: CancellationSignal);
}

/// Manages background jobs and the at-most-one-in-flight rule per document.
pub struct JobManager {
    /// Sender to clone for new jobs
    sender: Sender<JobMessage>,
    /// Receiver for the owner to poll
    receiver: Receiver<JobMessage>,
    /// Active jobs map
    jobs: HashMap<usize, JobHandle>,
    /// Documents with a load or save in flight
    busy_documents: HashMap<DocumentId, usize>,
    /// Counter for generating job IDs
    next_job_id: usize,
}

impl JobManager {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            jobs: HashMap::new(),
            busy_documents: HashMap::new(),
            next_job_id: 1,
        }
    }

    /// Spawn a job bound to a document's I/O slot.
    ///
    /// Fails with `DOCUMENT_BUSY` while that document already has a load or
    /// save in flight; jobs for different documents run fully in parallel.
    pub fn spawn_for_document<J: Job>(&mut self, document_id: DocumentId, job: J) -> Result<usize> {
        if let Some(job_id) = self.busy_documents.get(&document_id) {
            return Err(JotterError::warning(
                ErrorType::Document,
                errors::DOCUMENT_BUSY,
                format!(
                    "Document {} already has job {} in flight",
                    document_id, job_id
                ),
            ));
        }
        let id = self.spawn_inner(job, Some(document_id));
        self.busy_documents.insert(document_id, id);
        Ok(id)
    }

    /// Spawn an unbound job. Returns the job ID.
    pub fn spawn<J: Job>(&mut self, job: J) -> usize {
        self.spawn_inner(job, None)
    }

    fn spawn_inner<J: Job>(&mut self, job: J, document_id: Option<DocumentId>) -> usize {
        let id = self.next_job_id;
        self.next_job_id += 1;

        let sender = self.sender.clone();
        let cancellation_token = Arc::new(AtomicBool::new(false));
        let signal = CancellationSignal {
            cancelled: cancellation_token.clone(),
        };
        let job_box = Box::new(job);

        let handle = thread::spawn(move || {
            if sender.send(JobMessage::Started(id)).is_ok() {
                job_box.run(id, sender, signal);
            }
        });

        self.jobs.insert(
            id,
            JobHandle {
                handle,
                state: JobState::Running,
                cancellation_token,
                document_id,
            },
        );

        id
    }

    /// Whether a document has a load or save in flight
    #[must_use]
    pub fn is_document_busy(&self, document_id: DocumentId) -> bool {
        self.busy_documents.contains_key(&document_id)
    }

    /// Get the receiver to poll for messages.
    /// The owner should call `try_recv()` to get messages without blocking.
    pub fn receiver(&self) -> &Receiver<JobMessage> {
        &self.receiver
    }

    /// Update job state based on a message the owner just received.
    /// Terminal messages release the document's I/O slot.
    pub fn update_job_state(&mut self, message: &JobMessage) {
        let state = match message {
            JobMessage::Finished(_) => JobState::Finished,
            JobMessage::Error(_, _) => JobState::Failed,
            JobMessage::Cancelled(_) => JobState::Cancelled,
            JobMessage::Started(_) | JobMessage::Custom(_, _) => return,
        };
        let id = message.job_id();
        if let Some(job) = self.jobs.get_mut(&id) {
            job.state = state;
            if let Some(document_id) = job.document_id {
                self.busy_documents.remove(&document_id);
            }
        }
    }

    /// Clean up finished/failed/cancelled jobs, joining their threads.
    /// Returns the cleaned-up IDs.
    pub fn cleanup_finished_jobs(&mut self) -> Vec<usize> {
        let mut finished_ids = Vec::new();

        for (id, job) in &self.jobs {
            if matches!(
                job.state,
                JobState::Finished | JobState::Failed | JobState::Cancelled
            ) && job.handle.is_finished()
            {
                finished_ids.push(*id);
            }
        }

        for id in &finished_ids {
            if let Some(job) = self.jobs.remove(id) {
                if let Some(document_id) = job.document_id {
                    self.busy_documents.remove(&document_id);
                }
                let _ = job.handle.join();
            }
        }

        finished_ids
    }

    /// Cancel a specific job.
    /// Sets the cancellation flag; the job thread is expected to notice it
    /// and exit. The document's busy slot stays held until the job's
    /// terminal message arrives: the thread may be mid-write past its last
    /// cancellation checkpoint, and a new job for the same document must
    /// not start until it is done.
    pub fn cancel_job(&mut self, id: usize) {
        if let Some(job) = self.jobs.get_mut(&id) {
            job.cancellation_token.store(true, Ordering::Relaxed);
            job.state = JobState::Cancelled;
        }
    }
}

impl Default for JobManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for JobManager {
    fn drop(&mut self) {
        // Signal cancellation to all jobs
        for job in self.jobs.values() {
            job.cancellation_token.store(true, Ordering::Relaxed);
        }
    }
}

//! --- File Operations ---

use crate::document::{DocumentId, LoadedFile};
use crate::encoding::{self, Encoding};
use crate::job_manager::{CancellationSignal, Job, JobMessage, JobPayload};
use std::any::Any;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// Payload for a successful file load
#[derive(Debug)]
pub struct FileLoadResult {
    pub document_id: DocumentId,
    pub loaded: LoadedFile,
}

impl JobPayload for FileLoadResult {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Job to load a file asynchronously.
///
/// Reads and decodes off-thread; the owner applies the payload with
/// `TextDocument::apply_load`, so the document itself never changes until
/// the result lands back on its thread.
#[derive(Debug)]
pub struct FileLoadJob {
    pub document_id: DocumentId,
    pub path: PathBuf,
}

impl FileLoadJob {
    pub fn new(document_id: DocumentId, path: impl Into<PathBuf>) -> Self {
        Self {
            document_id,
            path: path.into(),
        }
    }
}

impl Job for FileLoadJob {
    fn run(self: Box<Self>, id: usize, sender: Sender<JobMessage>, signal: CancellationSignal) {
        match LoadedFile::read(&self.path) {
            Ok(loaded) => {
                if signal.is_cancelled() {
                    let _ = sender.send(JobMessage::Cancelled(id));
                    return;
                }
                let payload = FileLoadResult {
                    document_id: self.document_id,
                    loaded,
                };
                if sender.send(JobMessage::Custom(id, Box::new(payload))).is_ok() {
                    let _ = sender.send(JobMessage::Finished(id));
                }
            }
            Err(e) => {
                let _ = sender.send(JobMessage::Error(id, e.message));
            }
        }
    }
}

/// Payload for a successful file save
#[derive(Debug)]
pub struct FileSaveResult {
    pub document_id: DocumentId,
    pub revision: u64,
    pub path: PathBuf,
}

impl JobPayload for FileSaveResult {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Job to save a file asynchronously.
///
/// Carries a text snapshot and the revision it captures; the owner calls
/// `TextDocument::mark_saved(revision)` when the payload arrives, so edits
/// made while the write was in flight keep the document dirty.
#[derive(Debug)]
pub struct FileSaveJob {
    pub document_id: DocumentId,
    pub text: String,
    pub encoding: Encoding,
    pub path: PathBuf,
    pub revision: u64,
}

impl FileSaveJob {
    pub fn new(
        document_id: DocumentId,
        text: String,
        encoding: Encoding,
        path: impl Into<PathBuf>,
        revision: u64,
    ) -> Self {
        Self {
            document_id,
            text,
            encoding,
            path: path.into(),
            revision,
        }
    }
}

impl Job for FileSaveJob {
    fn run(self: Box<Self>, id: usize, sender: Sender<JobMessage>, signal: CancellationSignal) {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        let temp_path = parent.join(format!(
            ".{}.tmp",
            self.path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("file")
        ));

        let bytes = encoding::encode(&self.text, self.encoding);
        let do_write = || -> std::io::Result<bool> {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
            drop(file);

            // Check cancellation before the rename makes the write visible
            if signal.is_cancelled() {
                let _ = fs::remove_file(&temp_path);
                return Ok(false);
            }
            fs::rename(&temp_path, &self.path)?;
            Ok(true)
        };

        match do_write() {
            Ok(true) => {
                let payload = FileSaveResult {
                    document_id: self.document_id,
                    revision: self.revision,
                    path: self.path,
                };
                if sender.send(JobMessage::Custom(id, Box::new(payload))).is_ok() {
                    let _ = sender.send(JobMessage::Finished(id));
                }
            }
            Ok(false) => {
                let _ = sender.send(JobMessage::Cancelled(id));
            }
            Err(e) => {
                let _ = fs::remove_file(&temp_path);
                let _ = sender.send(JobMessage::Error(
                    id,
                    format!("Unable to save {}: {}", self.path.display(), e),
                ));
            }
        }
    }
}

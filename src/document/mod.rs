//! Document management
//! Encapsulates text + encoding + file metadata for multi-tab support

use crate::constants::errors;
use crate::encoding::{self, Encoding, EncodingState};
use crate::error::{ErrorType, JotterError, Result};
use crate::lexer::{LineLexer, StyledTextSink};
use crate::position::{LineEnding, PositionMapper};
use std::fs;
use std::path::{Path, PathBuf};

pub mod manager;

pub use manager::DocumentManager;

/// Unique identifier for documents
pub type DocumentId = u64;

/// External "choose encoding" collaborator, consulted when a save is
/// blocked by an unsupported encoding. Implemented by the UI layer.
pub trait EncodingChooser {
    /// Return a replacement canonical encoding, or `None` to cancel the save
    fn choose(&self, current_label: &str) -> Option<Encoding>;
}

/// Everything a finished background load needs to swap into a document
/// on the owning thread
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub text: String,
    pub encoding: EncodingState,
    pub line_ending: LineEnding,
    pub read_only: bool,
}

impl LoadedFile {
    /// Run the full load pipeline over raw bytes: detect, promote,
    /// normalize, decode, fix the newline convention. Pure except for the
    /// read-only probe; never fails once the bytes are in hand.
    #[must_use]
    pub fn from_bytes(path: &Path, bytes: &[u8]) -> Self {
        let detection = encoding::detect(bytes);
        let state = encoding::resolve_detected(&detection.label);
        let text = encoding::decode(bytes, &state);
        let line_ending = LineEnding::detect(&text);
        Self {
            path: path.to_path_buf(),
            text,
            encoding: state,
            line_ending,
            read_only: probe_read_only(path),
        }
    }

    /// Read and decode a file. Fails only when the byte source itself
    /// cannot be read; unrecognized encodings still load.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| {
            JotterError::new(
                ErrorType::Io,
                errors::LOAD_FAILED,
                format!("Unable to load {}: {}", path.display(), e),
            )
        })?;
        Ok(Self::from_bytes(path, &bytes))
    }
}

/// Document combining text content and file metadata
#[derive(Debug)]
pub struct TextDocument {
    /// Unique document identifier
    pub id: DocumentId,
    /// Raw character content
    text: String,
    /// Encoding observed at load time (or chosen later)
    encoding: EncodingState,
    /// Newline convention, fixed until the document is reloaded
    line_ending: LineEnding,
    /// File path (None if new/unsaved)
    file_path: Option<PathBuf>,
    /// Current revision number (incremented on edits)
    revision: u64,
    /// Revision of last load/save
    last_saved_revision: u64,
    /// Read-only flag from the write-permission probe at load
    read_only: bool,
}

impl TextDocument {
    /// Create a new empty document
    #[must_use]
    pub fn new(id: DocumentId) -> Self {
        Self {
            id,
            text: String::new(),
            encoding: EncodingState::default(),
            line_ending: LineEnding::default(),
            file_path: None,
            revision: 0,
            last_saved_revision: 0,
            read_only: false,
        }
    }

    /// Load a document from a file, populating the sink with styled runs
    pub fn open(id: DocumentId, path: impl AsRef<Path>, sink: &mut dyn StyledTextSink) -> Result<Self> {
        let loaded = LoadedFile::read(path.as_ref())?;
        let mut document = Self::new(id);
        document.apply_load(loaded, sink);
        Ok(document)
    }

    /// Install the result of a load, replacing all prior state.
    /// Also the commit point for background loads finishing on the
    /// owning thread.
    pub fn apply_load(&mut self, loaded: LoadedFile, sink: &mut dyn StyledTextSink) {
        self.text = loaded.text;
        self.encoding = loaded.encoding;
        self.line_ending = loaded.line_ending;
        self.file_path = Some(loaded.path);
        self.read_only = loaded.read_only;
        self.revision = 0;
        self.last_saved_revision = 0;
        self.retokenize(sink);
    }

    /// Reload from disk. A failed read leaves the in-memory state intact.
    pub fn reload(&mut self, sink: &mut dyn StyledTextSink) -> Result<()> {
        let path = self.require_path()?.to_path_buf();
        let loaded = LoadedFile::read(&path)?;
        self.apply_load(loaded, sink);
        Ok(())
    }

    /// Save to the current path.
    ///
    /// An encoding outside the canonical set fails with
    /// `ENCODING_NOT_SAVEABLE` before any bytes are written; the caller
    /// resolves the encoding (see [`TextDocument::save_with_chooser`]) and
    /// retries. A failed write never clears the dirty flag.
    pub fn save(&mut self) -> Result<()> {
        let encoding = self.require_saveable_encoding()?;
        if self.read_only {
            return Err(JotterError::new(
                ErrorType::Document,
                errors::READ_ONLY,
                "Document is read-only".to_string(),
            ));
        }
        let path = self.require_path()?.to_path_buf();
        self.write_to_file(&path, encoding)?;
        self.last_saved_revision = self.revision;
        Ok(())
    }

    /// Save to a new path and adopt it
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let encoding = self.require_saveable_encoding()?;
        let path = path.as_ref();
        self.write_to_file(path, encoding)?;
        self.file_path = Some(path.to_path_buf());
        self.read_only = false;
        self.last_saved_revision = self.revision;
        Ok(())
    }

    /// Save, consulting the chooser when the current encoding cannot be
    /// saved. Cancellation fails with `SAVE_CANCELLED` and writes nothing.
    pub fn save_with_chooser(&mut self, chooser: &dyn EncodingChooser) -> Result<()> {
        if !self.encoding.is_saveable() {
            match chooser.choose(self.encoding.name()) {
                Some(replacement) => self.encoding = EncodingState::Known(replacement),
                None => {
                    return Err(JotterError::warning(
                        ErrorType::Encoding,
                        errors::SAVE_CANCELLED,
                        "Save cancelled: no replacement encoding chosen".to_string(),
                    ))
                }
            }
        }
        self.save()
    }

    /// Replace `removed_len` characters at `offset` with `inserted`,
    /// mark dirty, and re-run tokenization into the sink.
    ///
    /// The whole document is re-tokenized; fine for notepad-sized files,
    /// a known scaling limit for large ones.
    pub fn apply_edit(
        &mut self,
        offset: usize,
        removed_len: usize,
        inserted: &str,
        sink: &mut dyn StyledTextSink,
    ) -> Result<()> {
        let start = self.byte_index(offset)?;
        let end = self.byte_index(offset + removed_len)?;
        self.text.replace_range(start..end, inserted);
        self.revision += 1;
        self.retokenize(sink);
        Ok(())
    }

    /// Rebuild the sink from the current text
    pub fn retokenize(&self, sink: &mut dyn StyledTextSink) {
        sink.clear();
        LineLexer::new().scan_into(&self.text, sink);
    }

    /// Record that a background save of `revision` reached disk
    pub fn mark_saved(&mut self, revision: u64) {
        self.last_saved_revision = revision;
    }

    /// Check if the document has unsaved changes
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.revision != self.last_saved_revision
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    #[must_use]
    pub fn encoding(&self) -> &EncodingState {
        &self.encoding
    }

    /// Replace the encoding ahead of a retried save
    pub fn set_encoding(&mut self, encoding: Encoding) {
        self.encoding = EncodingState::Known(encoding);
    }

    #[must_use]
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Position mapper over the current text and newline convention
    #[must_use]
    pub fn mapper(&self) -> PositionMapper<'_> {
        PositionMapper::new(&self.text, self.line_ending)
    }

    /// Get the file path if it exists
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    #[must_use]
    pub fn has_path(&self) -> bool {
        self.file_path.is_some()
    }

    /// Get display name for UI (filename or "[No Name]")
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or(crate::constants::ui::NO_NAME)
    }

    fn require_path(&self) -> Result<&Path> {
        self.file_path.as_deref().ok_or_else(|| {
            JotterError::new(
                ErrorType::Document,
                errors::NO_PATH,
                "Document has no file path".to_string(),
            )
        })
    }

    fn require_saveable_encoding(&self) -> Result<Encoding> {
        self.encoding.known().ok_or_else(|| {
            JotterError::warning(
                ErrorType::Encoding,
                errors::ENCODING_NOT_SAVEABLE,
                format!(
                    "The current encoding ({}) is not supported for saving",
                    self.encoding.name()
                ),
            )
        })
    }

    fn byte_index(&self, char_offset: usize) -> Result<usize> {
        if char_offset == 0 {
            return Ok(0);
        }
        let mut remaining = char_offset;
        for (idx, _) in self.text.char_indices() {
            if remaining == 0 {
                return Ok(idx);
            }
            remaining -= 1;
        }
        if remaining == 0 {
            return Ok(self.text.len());
        }
        Err(JotterError::new(
            ErrorType::Position,
            errors::POSITION_OUT_OF_RANGE,
            format!("edit offset {} past end of document", char_offset),
        ))
    }

    /// Atomic write: encode, write a sibling temp file, rename over
    fn write_to_file(&self, path: &Path, encoding: Encoding) -> Result<()> {
        let bytes = crate::encoding::encode(&self.text, encoding);

        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let temp_path = parent.join(format!(
            ".{}.tmp",
            path.file_name().and_then(|n| n.to_str()).unwrap_or("file")
        ));

        let write = || -> std::io::Result<()> {
            use std::io::Write;
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
            drop(file);
            fs::rename(&temp_path, path)?;
            Ok(())
        };

        write().map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            JotterError::new(
                ErrorType::Io,
                errors::SAVE_FAILED,
                format!("Unable to save {}: {}", path.display(), e),
            )
        })
    }
}

/// Write-permission probe. A failed probe means read-only, never an error.
fn probe_read_only(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(meta) if meta.permissions().readonly() => return true,
        Err(_) => return true,
        Ok(_) => {}
    }
    fs::OpenOptions::new().append(true).open(path).is_err()
}

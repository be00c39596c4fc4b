//! Global constants for the Jotter document core

pub mod ui {
    /// Display text for documents with no file path
    pub const NO_NAME: &str = "[No Name]";
}

pub mod errors {
    // Error Codes
    pub const IO_ERROR: &str = "IO_ERROR";
    pub const LOAD_FAILED: &str = "LOAD_FAILED";
    pub const SAVE_FAILED: &str = "SAVE_FAILED";
    pub const NO_PATH: &str = "NO_PATH";
    pub const READ_ONLY: &str = "READ_ONLY";
    pub const ENCODING_NOT_SAVEABLE: &str = "ENCODING_NOT_SAVEABLE";
    pub const SAVE_CANCELLED: &str = "SAVE_CANCELLED";
    pub const POSITION_OUT_OF_RANGE: &str = "POSITION_OUT_OF_RANGE";
    pub const DOCUMENT_BUSY: &str = "DOCUMENT_BUSY";
    pub const UNSAVED_CHANGES: &str = "UNSAVED_CHANGES";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

    // Error messages
    pub const MSG_UNSAVED_CHANGES: &str = "Document has unsaved changes";
}

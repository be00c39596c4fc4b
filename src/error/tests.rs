//! Tests for Jotter error handling

use super::*;
use crate::constants::errors;
use std::io;

#[test]
fn test_error_severity_display() {
    assert_eq!(format!("{}", ErrorSeverity::Info), "INFO");
    assert_eq!(format!("{}", ErrorSeverity::Warning), "WARN");
    assert_eq!(format!("{}", ErrorSeverity::Error), "ERROR");
    assert_eq!(format!("{}", ErrorSeverity::Critical), "CRITICAL");
}

#[test]
fn test_error_severity_ordering() {
    assert!(ErrorSeverity::Info < ErrorSeverity::Warning);
    assert!(ErrorSeverity::Warning < ErrorSeverity::Error);
    assert!(ErrorSeverity::Error < ErrorSeverity::Critical);
}

#[test]
fn test_error_type_display() {
    assert_eq!(format!("{}", ErrorType::Io), "IO");
    assert_eq!(format!("{}", ErrorType::Encoding), "Encoding");
    assert_eq!(format!("{}", ErrorType::Position), "Position");
    assert_eq!(format!("{}", ErrorType::Document), "Document");
    assert_eq!(format!("{}", ErrorType::Internal), "Internal");
    assert_eq!(format!("{}", ErrorType::Other), "Other");
}

#[test]
fn test_jotter_error_new() {
    let err = JotterError::new(ErrorType::Io, "E001", "test msg");
    assert_eq!(err.severity, ErrorSeverity::Error);
    assert_eq!(err.kind, ErrorType::Io);
    assert_eq!(err.code, "E001");
    assert_eq!(err.message, "test msg");
}

#[test]
fn test_jotter_error_warning() {
    let err = JotterError::warning(ErrorType::Encoding, errors::ENCODING_NOT_SAVEABLE, "pick one");
    assert_eq!(err.severity, ErrorSeverity::Warning);
    assert_eq!(err.kind, ErrorType::Encoding);
    assert!(err.is_code(errors::ENCODING_NOT_SAVEABLE));
}

#[test]
fn test_jotter_error_display() {
    let err = JotterError::new(ErrorType::Io, "E001", "test msg");
    assert_eq!(format!("{}", err), "[ERROR] IO(E001): test msg");
}

#[test]
fn test_jotter_error_contains_msg() {
    let err = JotterError::new(ErrorType::Other, "E", "the quick brown fox");
    assert!(err.contains_msg("quick"));
    assert!(!err.contains_msg("lazy"));
}

#[test]
fn test_result_alias() {
    fn produce_error() -> Result<()> {
        Err(JotterError::new(ErrorType::Other, "FAIL", "reason"))
    }

    let res = produce_error();
    assert!(res.is_err());
    assert_eq!(res.unwrap_err().code, "FAIL");
}

#[test]
fn test_from_conversions() {
    let err_string: JotterError = "string error".to_string().into();
    assert_eq!(err_string.code, "GENERIC_ERROR");
    assert_eq!(err_string.message, "string error");

    let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
    let err_io: JotterError = io_err.into();
    assert_eq!(err_io.kind, ErrorType::Io);
    assert_eq!(err_io.code, errors::IO_ERROR);
}

#[test]
fn test_from_io_error_kinds() {
    let kinds = vec![
        (io::ErrorKind::NotFound, "not found"),
        (io::ErrorKind::PermissionDenied, "denied"),
    ];

    for (kind, msg) in kinds {
        let io_err = io::Error::new(kind, msg);
        let err: JotterError = io_err.into();
        assert_eq!(err.kind, ErrorType::Io);
        assert!(err.message.contains(msg));
    }
}

#[test]
fn test_jotter_error_traits() {
    let err1 = JotterError::new(ErrorType::Io, "E1", "msg");
    let err2 = JotterError::new(ErrorType::Io, "E1", "msg");
    let err3 = JotterError::new(ErrorType::Io, "E2", "msg");

    assert_eq!(err1, err2);
    assert_ne!(err1, err3);

    let std_err: &dyn std::error::Error = &err1;
    assert_eq!(format!("{}", std_err), "[ERROR] IO(E1): msg");
}

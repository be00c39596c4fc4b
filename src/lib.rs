//! Jotter - encoding-aware document core for a notepad-style editor

pub mod constants;
pub mod error;
pub mod encoding;
pub mod lexer;
pub mod position;
pub mod document;
pub mod job_manager;

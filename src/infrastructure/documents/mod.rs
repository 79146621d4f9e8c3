//! Confirmation document rendering

pub mod text;

pub use text::TextDocumentGenerator;

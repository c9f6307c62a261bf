use std::io;
use thiserror::Error;

use crate::parser::ParserError;
use crate::parser::snapshot::SnapshotError;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Parser error: {0}")]
    Parser(#[from] ParserError),

    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid command arguments")]
    InvalidArguments,
}

pub type Result<T> = std::result::Result<T, InventoryError>;

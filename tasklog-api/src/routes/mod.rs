/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: User listing, creation and deletion
/// - `tasks`: Per-user task assignment
/// - `logs`: Task log submission, listing and clearing

pub mod health;
pub mod logs;
pub mod tasks;
pub mod users;

use serde::{Deserialize, Serialize};

/// Plain confirmation body for operations without a record to return
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

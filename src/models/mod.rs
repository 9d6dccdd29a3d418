//! Request, response and domain models for the content service
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP bodies, and the content domain types.

pub mod content;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use content::{
    JournalEntry, JournalPatch, Mood, Principal, Section, SectionSummary, SessionStatus,
};
pub use requests::{SignQuery, UpdateJournalRequest};
pub use responses::{DeleteResponse, HealthResponse, SignedUrlResponse};

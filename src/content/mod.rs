//! Content Module
//!
//! Contracts for the external collaborators (content store, object signer,
//! session gate), local implementations of each, and the cached facade the
//! HTTP handlers talk to.

mod cached;
mod session;
mod signer;
mod store;

pub use cached::{CachedContent, CachedValue, SignedUrl};
pub use session::{SessionGate, StaticTokenGate};
pub use signer::{LocalObjectSigner, ObjectSigner};
pub use store::{ContentSeed, ContentStore, InMemoryContentStore};

//! Session lifecycle and namespace traversal.
//!
//! A [`FsSession`] lazily binds path authorities to live client handles and
//! carries the working-directory state tied to those handles. Traversal
//! (listing, recursive walk) lives here too since every step needs a client.

mod session;
mod traverse;

pub use session::{CwdGuard, FsSession};
pub use traverse::Walk;

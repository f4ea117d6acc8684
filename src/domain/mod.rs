//! Domain value objects and types.
//!
//! Type-safe wrappers for the demo personas and for signup email addresses.
//! Both validate at construction time so invalid values never reach the
//! search session or the mailing-list client.

pub mod email;
pub mod errors;
pub mod persona;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use persona::{Persona, PersonaMeta};

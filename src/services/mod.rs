//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between
//! repositories, the search session and the mailing-list client. They provide
//! a clean boundary between the MCP handlers and the data access layer.

mod demo_service;
mod signup_service;

pub use demo_service::{DemoService, DemoServiceImpl, SessionSnapshot};
pub use signup_service::{SignupService, SignupServiceImpl};

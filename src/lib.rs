//! ChatSherlock demo - search and highlight over canned ChatGPT conversation histories.
//!
//! This library powers the interactive ChatSherlock demo: a visitor picks a persona,
//! types a phrase, and sees that persona's conversations ranked by how often the phrase
//! occurs, with highlighted snippets and a full highlighted conversation view. The
//! demo is exposed as a Model Context Protocol (MCP) server, alongside the landing
//! page's mailing-list signup.
//!
//! # Architecture
//!
//! - **models**: Corpora, conversations and messages
//! - **domain**: Validated value objects (persona, email address)
//! - **search**: Matcher, ranker, snippet builder, highlighter and browse filter
//! - **session**: Idle / Searching / Viewing state machine
//! - **repositories**: Where persona corpora come from (embedded or a directory)
//! - **client**: HTTP client for the mailing-list API
//! - **services**: Business logic behind the MCP tools
//! - **signup**: Serverless-function envelope for signups
//! - **server**: MCP protocol server
//! - **config** / **error** / **metrics**: Ambient configuration, errors and counters

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod search;
pub mod server;
pub mod services;
pub mod session;
pub mod signup;

// Re-export commonly used types
pub use client::{MailingListClient, SubscriptionStatus};
pub use config::{Config, MailingListConfig};
pub use domain::{EmailAddress, Persona};
pub use error::{ConfigError, CorpusError, MailingListError, SearchError, SessionError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{Conversation, Corpus, Message, Role};
pub use search::{highlight, search, MatchResult, Query};
pub use server::DemoMcpServer;
pub use session::{ConversationView, SearchSession, SessionPhase};

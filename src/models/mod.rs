//! Data models for the demo corpora.
//!
//! This module contains the data structures representing persona datasets,
//! the conversations in them and the messages inside each conversation.

pub mod conversation;

pub use conversation::{Conversation, Corpus, Message, Role, UNDATED_LABEL};

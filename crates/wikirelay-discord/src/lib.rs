//! # wikirelay-discord
//!
//! Turns wiki recent-change records into Discord webhook payloads.
//!
//! The crate is the payload-construction core only: it consumes a
//! fully populated [`RecentChange`](wikirelay_types::RecentChange) and
//! a [`FeedConfig`](wikirelay_types::FeedConfig) and produces a
//! serializable [`WebhookPayload`]. Subscribing to the change stream
//! and delivering the payload over HTTP belong to the surrounding
//! dispatcher, not here.
//!
//! # Modules
//!
//! - [`embed`] -- Embed / field / payload value objects with filtered
//!   serialization
//! - [`markdown`] -- wiki markup to Discord-markdown conversion
//! - [`builder`] -- the per-event decision engine

pub mod builder;
pub mod embed;
pub mod markdown;

pub use builder::payload_for_change;
pub use embed::{Embed, EmbedAuthor, EmbedField, EmbedFooter, WebhookPayload};

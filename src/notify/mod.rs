//! Chat webhook notifications for reviews.

pub mod message;
pub mod webhook;

pub use message::{
    build_message, compose_text, parse_rating, render_rating, Block, BlockMessage, TextObject,
};
pub use webhook::{NotifyOutcome, WebhookNotifier};

//! Telegram remote-approval channel.
//!
//! Sends a permission prompt with inline Allow/Deny buttons, then long-polls
//! the Bot API for the button press correlated to this session. The winning
//! press is acknowledged, the prompt edited to the resolved outcome, and the
//! decision committed to the shared slot.

mod api;
mod channel;
mod client;
mod error;

pub use api::{CallbackQuery, MessageRef, Update};
pub use channel::{decision_for_callback, TelegramChannel};
pub use client::TelegramClient;
pub use error::{TelegramError, TelegramResult};

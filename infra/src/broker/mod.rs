//! Notification queues on Redis lists
//!
//! Publishing is `LPUSH queue:<name>`. A consumer moves each message into
//! `queue:<name>:processing` with `BLMOVE` and removes it there once it has
//! been handled, so a crash between the two leaves the message to be
//! re-queued on the next start-up. Delivery is at-least-once.

mod consumer;
mod publisher;

pub use consumer::{Delivery, QueueConsumer};
pub use publisher::RedisQueuePublisher;

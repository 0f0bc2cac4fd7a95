//! Domain entities representing core business objects.

pub mod notification;
pub mod one_time_token;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use notification::{EmailLinkMessage, NotificationQueue};
pub use one_time_token::{blacklist_key, TokenPurpose};
pub use token::{AccessToken, Claims, TokenPair, TokenType};
pub use user::{User, UserChanges, UserLookup, UserProfile};

pub mod codec;
pub mod error;
pub mod record;
pub mod store;
pub mod timefmt;

pub use crate::store::{
    BadgeSink, NotificationInbox, NotificationInboxBuilder, PreferenceStore,
};

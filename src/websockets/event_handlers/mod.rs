pub mod chat_events;
pub mod connection_events;
pub mod presence_events;
pub mod shared;
pub mod status_events;
pub mod typing_events;

pub use chat_events::ChatEventHandlers;
pub use connection_events::ConnectionEventHandlers;
pub use presence_events::PresenceEventHandlers;
pub use status_events::StatusEventHandlers;
pub use typing_events::TypingEventHandlers;

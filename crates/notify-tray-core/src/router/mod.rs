mod button_event;
mod event_router;
mod observers;

pub use button_event::{ButtonAction, ButtonEvent, MouseButton, Point};

pub(crate) use {event_router::EventRouter, observers::Observers};

use crate::{
    ButtonEvent, Message, Point,
    message::{low_word, x_coordinate, y_coordinate},
    router::Observers,
};

use tracing::trace;

/// Fixed table from tray events to their observer sets.
pub(crate) struct EventRouter {
    buttons: [Observers<Point>; ButtonEvent::COUNT],
    menu_command: Observers<u16>,
}

impl EventRouter {
    pub(crate) fn new() -> Self {
        Self {
            buttons: std::array::from_fn(|_| Observers::new()),
            menu_command: Observers::new(),
        }
    }

    pub(crate) fn button(&self, event: ButtonEvent) -> &Observers<Point> {
        &self.buttons[event.slot()]
    }

    pub(crate) fn menu_command(&self) -> &Observers<u16> {
        &self.menu_command
    }

    /// Route a tray callback. The sub-message is the low word of `lparam`,
    /// the cursor position is packed into `wparam`.
    pub(crate) fn route_callback(&self, message: Message) {
        let sub_message = u32::from(low_word(message.lparam as usize));

        let Some(event) = ButtonEvent::from_message(sub_message) else {
            trace!(sub_message, "Ignoring tray callback");
            return;
        };

        let point = Point {
            x: x_coordinate(message.wparam),
            y: y_coordinate(message.wparam),
        };

        trace!(event = ?event, x = point.x, y = point.y, "Tray button event");
        self.button(event).invoke(point);
    }

    /// Route a menu command; the command identifier is the low word of `wparam`.
    pub(crate) fn route_menu_command(&self, message: Message) {
        let command = low_word(message.wparam);
        trace!(command, "Menu command");
        self.menu_command.invoke(command);
    }
}

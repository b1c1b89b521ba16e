use crate::{
    ButtonAction, ButtonEvent, DescriptorFlags, DispatchState, Disposition, Icon, Message, MouseButton,
    NotifyIcon, NotifyOp, Point, TrayError,
    message::{CALLBACK_MESSAGE, WM_CLOSE, WM_COMMAND, WM_DESTROY, pack_coordinates},
    tests::mock_shell::{Call, MockShell, RESTART_MESSAGE},
};

use std::{cell::RefCell, path::Path, rc::Rc};

#[allow(clippy::unwrap_used)]
fn tray(shell: &MockShell, tooltip: &str) -> NotifyIcon<MockShell> {
    NotifyIcon::with_shell(shell.clone(), tooltip, None).unwrap()
}

fn button_message(event: ButtonEvent, x: i32, y: i32) -> Message {
    Message::new(
        CALLBACK_MESSAGE,
        pack_coordinates(x, y),
        event.message_id() as isize,
    )
}

/// WHAT: Construction registers a class, creates the window and adds the icon
/// WHY: The icon must be visible as soon as construction returns
#[test]
fn given_tooltip_without_icon_when_constructing_then_add_and_set_version_submitted() {
    // Given: A recording shell
    let shell = MockShell::new();

    // When: Constructing with tooltip "Hello" and no icon
    let icon = tray(&shell, "Hello");

    // Then: Class, window, Add, SetVersion in that order
    let calls = shell.calls();
    assert!(matches!(&calls[0], Call::RegisterClass { .. }));
    assert!(matches!(&calls[1], Call::CreateWindow { .. }));
    let ops: Vec<NotifyOp> = shell.notifications().into_iter().map(|(op, _)| op).collect();
    assert_eq!(ops, vec![NotifyOp::Add, NotifyOp::SetVersion]);

    // Then: Descriptor references the window, has tip but no icon
    let (_, descriptor) = &shell.notifications()[0];
    assert_eq!(descriptor.window, icon.window_handle());
    assert_eq!(descriptor.tooltip.to_string(), "Hello");
    assert!(descriptor.flags.contains(DescriptorFlags::TIP | DescriptorFlags::MESSAGE));
    assert!(!descriptor.flags.contains(DescriptorFlags::ICON));
    assert_eq!(descriptor.icon, None);
    assert_eq!(icon.state(), DispatchState::Active);
    assert!(icon.is_registered());
}

/// WHAT: An icon resource is referenced by the descriptor
/// WHY: The icon flag is set iff an image is present
#[test]
#[allow(clippy::unwrap_used)]
fn given_icon_when_constructing_then_descriptor_carries_handle_and_icon_flag() {
    // Given: A loaded icon
    let shell = MockShell::new();
    let image = Icon::load(shell.clone(), Path::new("tray.ico")).unwrap();
    let handle = image.handle();

    // When: Constructing with it
    let icon = NotifyIcon::with_shell(shell.clone(), "Hello", Some(image)).unwrap();

    // Then: Handle and flag present
    let descriptor = icon.descriptor();
    assert_eq!(descriptor.icon, Some(handle));
    assert!(descriptor.flags.contains(DescriptorFlags::ICON));
}

/// WHAT: Class registration failure aborts construction
/// WHY: No tray registration may be attempted without a window
#[test]
fn given_class_registration_failure_when_constructing_then_error_and_no_window_or_tray() {
    // Given: A shell refusing class registration
    let shell = MockShell::new();
    shell.fail_register_class(1410);

    // When: Constructing
    let result = NotifyIcon::with_shell(shell.clone(), "Hello", None);

    // Then: ClassRegistrationFailed and only the registration attempt recorded
    assert!(matches!(
        result,
        Err(TrayError::ClassRegistrationFailed { code: 1410, .. })
    ));
    assert_eq!(shell.calls().len(), 1);
}

/// WHAT: Window creation failure aborts construction
/// WHY: Failed instances leave no partially usable object
#[test]
fn given_window_creation_failure_when_constructing_then_error_and_no_tray() {
    // Given: A shell refusing window creation
    let shell = MockShell::new();
    shell.fail_create_window(8);

    // When: Constructing
    let result = NotifyIcon::with_shell(shell.clone(), "Hello", None);

    // Then: WindowCreationFailed, no notification, no destroy
    assert!(matches!(
        result,
        Err(TrayError::WindowCreationFailed { code: 8, .. })
    ));
    assert!(shell.notifications().is_empty());
    assert!(
        !shell
            .calls()
            .iter()
            .any(|call| matches!(call, Call::DestroyWindow(_)))
    );
}

/// WHAT: Failed construction still releases the supplied icon
/// WHY: The icon is owned by the instance from the moment it is passed in
#[test]
#[allow(clippy::unwrap_used)]
fn given_icon_and_failing_window_when_constructing_then_icon_released() {
    let shell = MockShell::new();
    let image = Icon::load(shell.clone(), Path::new("tray.ico")).unwrap();
    shell.fail_create_window(8);

    let result = NotifyIcon::with_shell(shell.clone(), "Hello", Some(image));

    assert!(result.is_err());
    assert!(matches!(
        shell.calls().last(),
        Some(Call::ReleaseImage { .. })
    ));
}

/// WHAT: Every instance uses its own window class
/// WHY: Concurrent instances must not collide on class registration
#[test]
fn given_two_instances_when_constructing_then_class_names_differ() {
    let shell = MockShell::new();
    let _first = tray(&shell, "a");
    let _second = tray(&shell, "b");

    let names: Vec<String> = shell
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            Call::RegisterClass { class_name } => Some(class_name),
            _ => None,
        })
        .collect();

    assert_eq!(names.len(), 2);
    assert_ne!(names[0], names[1]);
}

/// WHAT: Dispose removes the tray entry, then destroys the window, once
/// WHY: Teardown order and idempotence
#[test]
fn given_active_icon_when_disposed_twice_then_single_delete_then_destroy() {
    // Given: A constructed icon
    let shell = MockShell::new();
    let mut icon = tray(&shell, "Hello");
    let window = icon.window_handle();
    shell.clear();

    // When: Disposing twice
    icon.dispose();
    icon.dispose();

    // Then: Delete, destroy, and the quit posted by the nested WM_DESTROY
    let calls = shell.calls();
    assert_eq!(calls.len(), 3);
    assert!(matches!(
        &calls[0],
        Call::Notify {
            op: NotifyOp::Delete,
            ..
        }
    ));
    assert_eq!(calls[1], Call::DestroyWindow(window));
    assert_eq!(calls[2], Call::PostQuit(0));
    assert_eq!(icon.state(), DispatchState::Destroyed);

    // Then: Dropping afterwards adds nothing
    drop(icon);
    assert_eq!(shell.calls().len(), 3);
}

/// WHAT: Destroying the window during dispose delivers WM_DESTROY to the instance
/// WHY: The synchronous WM_DESTROY must not submit a second delete
#[test]
fn given_active_icon_when_disposed_then_window_gone_and_one_delete() {
    // Given: A constructed icon
    let shell = MockShell::new();
    let mut icon = tray(&shell, "Hello");
    let window = icon.window_handle();

    // When: Disposing
    icon.dispose();

    // Then: One delete, the loop asked to quit, the window no longer routes
    assert_eq!(shell.count_notify(NotifyOp::Delete), 1);
    assert!(shell.calls().contains(&Call::PostQuit(0)));
    assert!(!icon.is_registered());
    assert_eq!(shell.deliver(window, Message::new(WM_CLOSE, 0, 0)), None);
}

/// WHAT: A destroy notification removes the entry without explicit dispose
/// WHY: The entry must never outlive its window
#[test]
fn given_destroy_notification_when_never_disposed_then_entry_removed_once() {
    // Given: A constructed icon
    let shell = MockShell::new();
    let icon = tray(&shell, "Hello");

    // When: The window procedure receives WM_DESTROY, then the icon is dropped
    let disposition = icon.dispatch(Message::new(WM_DESTROY, 0, 0));
    assert_eq!(disposition, Disposition::Handled);
    assert_eq!(icon.state(), DispatchState::Destroyed);
    drop(icon);

    // Then: Exactly one delete, the loop asked to quit, no second destroy
    assert_eq!(shell.count_notify(NotifyOp::Delete), 1);
    assert!(shell.calls().contains(&Call::PostQuit(0)));
    assert!(
        !shell
            .calls()
            .iter()
            .any(|call| matches!(call, Call::DestroyWindow(_)))
    );
}

/// WHAT: Dispose followed by the resulting WM_DESTROY deletes once
/// WHY: Both teardown paths remove the entry; only one may reach the shell
#[test]
fn given_disposed_icon_when_destroy_notification_arrives_then_no_second_delete() {
    let shell = MockShell::new();
    let mut icon = tray(&shell, "Hello");

    icon.dispose();
    icon.dispatch(Message::new(WM_DESTROY, 0, 0));

    assert_eq!(shell.count_notify(NotifyOp::Delete), 1);
}

/// WHAT: A close request destroys the window
/// WHY: WM_CLOSE moves the window to destruction
#[test]
fn given_active_icon_when_close_requested_then_window_destroyed() {
    // Given: A constructed icon
    let shell = MockShell::new();
    let mut icon = tray(&shell, "Hello");
    let window = icon.window_handle();

    // When: WM_CLOSE arrives, then the icon is disposed
    assert_eq!(
        icon.dispatch(Message::new(WM_CLOSE, 0, 0)),
        Disposition::Handled
    );
    icon.dispose();

    // Then: The window was destroyed exactly once
    let destroys = shell
        .calls()
        .into_iter()
        .filter(|call| *call == Call::DestroyWindow(window))
        .count();
    assert_eq!(destroys, 1);
    assert_eq!(icon.state(), DispatchState::Destroyed);

    // Then: The nested WM_DESTROY deleted the entry once and asked to quit
    assert_eq!(shell.count_notify(NotifyOp::Delete), 1);
    assert!(shell.calls().contains(&Call::PostQuit(0)));
}

/// WHAT: WM_CLOSE through the window deletes, destroys and quits in that order
/// WHY: Closing from the message loop tears down without an explicit dispose
#[test]
#[allow(clippy::panic)]
fn given_active_icon_when_close_delivered_to_window_then_destroy_delete_quit() {
    // Given: A constructed icon
    let shell = MockShell::new();
    let icon = tray(&shell, "Hello");
    let window = icon.window_handle();
    shell.clear();

    // When: WM_CLOSE is sent to its window
    let disposition = shell.deliver(window, Message::new(WM_CLOSE, 0, 0));

    // Then: Destroy, the nested WM_DESTROY's delete, then the quit
    assert_eq!(disposition, Some(Disposition::Handled));
    let calls = shell.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], Call::DestroyWindow(window));
    match &calls[1] {
        Call::Notify {
            op: NotifyOp::Delete,
            descriptor,
        } => assert_eq!(descriptor.window, window),
        other => panic!("expected delete, got {other:?}"),
    }
    assert_eq!(calls[2], Call::PostQuit(0));

    // Then: Dropping the instance afterwards adds nothing
    drop(icon);
    assert_eq!(shell.calls().len(), 3);
}

/// WHAT: close() posts WM_CLOSE to the instance's own window
/// WHY: Callers close the icon through the message loop
#[test]
fn given_active_icon_when_close_called_then_close_posted_to_window() {
    let shell = MockShell::new();
    let icon = tray(&shell, "Hello");

    icon.close();

    assert!(shell.calls().contains(&Call::PostClose(icon.window_handle())));
}

/// WHAT: The restart broadcast re-adds with the current descriptor
/// WHY: The icon has to survive the shell recreating the tray
#[test]
fn given_changed_tooltip_when_restart_broadcast_then_one_add_and_set_version_with_it() {
    // Given: An icon whose tooltip changed after construction
    let shell = MockShell::new();
    let icon = tray(&shell, "Hello");
    icon.set_tooltip("Updated");
    shell.clear();

    // When: The shell broadcasts TaskbarCreated
    let disposition = icon.dispatch(Message::new(RESTART_MESSAGE, 0, 0));

    // Then: Exactly Add + SetVersion carrying the current tooltip
    assert_eq!(disposition, Disposition::Handled);
    let notifications = shell.notifications();
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0].0, NotifyOp::Add);
    assert_eq!(notifications[1].0, NotifyOp::SetVersion);
    for (_, descriptor) in &notifications {
        assert_eq!(descriptor, &icon.descriptor());
        assert_eq!(descriptor.tooltip.to_string(), "Updated");
    }
}

/// WHAT: Each button message reaches only its own observers with its coordinates
/// WHY: The nine events are independent observer sets
#[test]
fn given_observers_on_all_buttons_when_each_message_dispatched_then_only_matching_fires() {
    // Given: One recording observer on each of the nine events
    let shell = MockShell::new();
    let icon = tray(&shell, "Hello");
    let seen: Rc<RefCell<Vec<(ButtonEvent, Point)>>> = Rc::new(RefCell::new(Vec::new()));
    for event in ButtonEvent::ALL {
        let seen = Rc::clone(&seen);
        icon.on_button(event, move |point| seen.borrow_mut().push((event, point)));
    }

    for event in ButtonEvent::ALL {
        seen.borrow_mut().clear();

        // When: Dispatching that event at (123, 45)
        let disposition = icon.dispatch(button_message(event, 123, 45));

        // Then: Only the matching observer fired, with that point
        assert_eq!(disposition, Disposition::Handled);
        assert_eq!(*seen.borrow(), vec![(event, Point { x: 123, y: 45 })]);
    }
}

/// WHAT: The named subscription helpers map to the right events
/// WHY: Public convenience methods must not cross wires
#[test]
fn given_named_subscriptions_when_dispatching_then_each_helper_receives_its_event() {
    let shell = MockShell::new();
    let icon = tray(&shell, "Hello");
    let fired = Rc::new(RefCell::new(Vec::new()));

    macro_rules! record {
        ($method:ident) => {{
            let fired = Rc::clone(&fired);
            icon.$method(move |_| fired.borrow_mut().push(stringify!($method)));
        }};
    }
    record!(on_left_button_down);
    record!(on_left_button_up);
    record!(on_left_button_double_click);
    record!(on_middle_button_down);
    record!(on_middle_button_up);
    record!(on_middle_button_double_click);
    record!(on_right_button_down);
    record!(on_right_button_up);
    record!(on_right_button_double_click);

    for event in ButtonEvent::ALL {
        icon.dispatch(button_message(event, 0, 0));
    }

    assert_eq!(
        *fired.borrow(),
        vec![
            "on_left_button_down",
            "on_left_button_up",
            "on_left_button_double_click",
            "on_middle_button_down",
            "on_middle_button_up",
            "on_middle_button_double_click",
            "on_right_button_down",
            "on_right_button_up",
            "on_right_button_double_click",
        ]
    );
}

/// WHAT: Unknown callback sub-messages invoke nothing
/// WHY: The shell also reports hover and key events we do not surface
#[test]
fn given_unknown_sub_message_when_dispatching_then_no_observer_and_no_error() {
    // Given: Observers on every button and on menu commands
    let shell = MockShell::new();
    let icon = tray(&shell, "Hello");
    let fired = Rc::new(RefCell::new(0));
    for event in ButtonEvent::ALL {
        let fired = Rc::clone(&fired);
        icon.on_button(event, move |_| *fired.borrow_mut() += 1);
    }
    {
        let fired = Rc::clone(&fired);
        icon.on_menu_command(move |_| *fired.borrow_mut() += 1);
    }

    // When: Dispatching WM_MOUSEMOVE and NIN_SELECT as sub-messages
    for sub_message in [0x0200isize, 0x0400] {
        let disposition = icon.dispatch(Message::new(
            CALLBACK_MESSAGE,
            pack_coordinates(1, 1),
            sub_message,
        ));
        assert_eq!(disposition, Disposition::Handled);
    }

    // Then: Nothing fired
    assert_eq!(*fired.borrow(), 0);
}

/// WHAT: Menu commands deliver the low word of wparam
/// WHY: The high word carries the notification source, not the id
#[test]
fn given_menu_observer_when_command_dispatched_then_receives_exact_id() {
    // Given: A menu observer
    let shell = MockShell::new();
    let icon = tray(&shell, "Hello");
    let ids = Rc::new(RefCell::new(Vec::new()));
    {
        let ids = Rc::clone(&ids);
        icon.on_menu_command(move |id| ids.borrow_mut().push(id));
    }

    // When: WM_COMMAND with id 1001 and a non-zero high word
    icon.dispatch(Message::new(WM_COMMAND, (1 << 16) | 1001, 0));

    // Then: Exactly 1001
    assert_eq!(*ids.borrow(), vec![1001]);
}

/// WHAT: Messages the core does not handle go to the default procedure
/// WHY: The window must behave normally for everything else
#[test]
fn given_unrelated_message_when_dispatching_then_pass_through() {
    let shell = MockShell::new();
    let icon = tray(&shell, "Hello");

    // WM_TIMER
    assert_eq!(
        icon.dispatch(Message::new(0x0113, 0, 0)),
        Disposition::PassThrough
    );
}

/// WHAT: Replacing the icon modifies the entry before releasing the old image
/// WHY: The shell must never reference a released handle
#[test]
#[allow(clippy::unwrap_used, clippy::panic)]
fn given_registered_icon_when_icon_replaced_then_modify_precedes_release() {
    // Given: An icon constructed with one image
    let shell = MockShell::new();
    let first = Icon::load(shell.clone(), Path::new("a.ico")).unwrap();
    let first_handle = first.handle();
    let icon = NotifyIcon::with_shell(shell.clone(), "Hello", Some(first)).unwrap();
    let second = Icon::load(shell.clone(), Path::new("b.ico")).unwrap();
    let second_handle = second.handle();
    shell.clear();

    // When: Replacing the image
    icon.set_icon(Some(second));

    // Then: Modify with the new handle, then the old one released
    let calls = shell.calls();
    assert_eq!(calls.len(), 2);
    match &calls[0] {
        Call::Notify {
            op: NotifyOp::Modify,
            descriptor,
        } => assert_eq!(descriptor.icon, Some(second_handle)),
        other => panic!("expected modify, got {other:?}"),
    }
    assert!(matches!(
        &calls[1],
        Call::ReleaseImage { handle, .. } if *handle == first_handle
    ));
}

/// WHAT: Clearing the icon drops the icon flag
/// WHY: The descriptor reflects exactly the current state
#[test]
#[allow(clippy::unwrap_used)]
fn given_icon_with_image_when_cleared_then_icon_flag_unset() {
    let shell = MockShell::new();
    let image = Icon::load(shell.clone(), Path::new("a.ico")).unwrap();
    let icon = NotifyIcon::with_shell(shell.clone(), "Hello", Some(image)).unwrap();

    icon.set_icon(None);

    let descriptor = icon.descriptor();
    assert_eq!(descriptor.icon, None);
    assert!(!descriptor.flags.contains(DescriptorFlags::ICON));
}

/// WHAT: Changes after dispose do not reach the shell
/// WHY: Nothing may be modified once the entry is deleted
#[test]
fn given_disposed_icon_when_tooltip_changed_then_no_modify() {
    let shell = MockShell::new();
    let mut icon = tray(&shell, "Hello");
    icon.dispose();
    shell.clear();

    icon.set_tooltip("late");

    assert!(shell.calls().is_empty());
    assert_eq!(icon.tooltip(), "late");
}

/// WHAT: Dropping an instance releases its image after the window is gone
/// WHY: Teardown releases tray, then window, then image
#[test]
#[allow(clippy::unwrap_used)]
fn given_icon_with_image_when_dropped_then_release_is_last() {
    let shell = MockShell::new();
    let image = Icon::load(shell.clone(), Path::new("a.ico")).unwrap();
    let icon = NotifyIcon::with_shell(shell.clone(), "Hello", Some(image)).unwrap();
    shell.clear();

    drop(icon);

    let calls = shell.calls();
    assert!(matches!(
        &calls[0],
        Call::Notify {
            op: NotifyOp::Delete,
            ..
        }
    ));
    assert!(matches!(&calls[1], Call::DestroyWindow(_)));
    assert_eq!(calls[2], Call::PostQuit(0));
    assert!(matches!(&calls[3], Call::ReleaseImage { .. }));
    assert_eq!(calls.len(), 4);
}

/// WHAT: An observer may drop its own instance while the event is dispatched
/// WHY: Teardown from a callback must complete without touching freed state
#[test]
#[allow(clippy::unwrap_used)]
fn given_observer_dropping_its_tray_when_dispatching_then_remaining_observers_run_and_teardown_completes() {
    // Given: An instance with an image, held in a slot its first observer empties
    let shell = MockShell::new();
    let image = Icon::load(shell.clone(), Path::new("a.ico")).unwrap();
    let icon = NotifyIcon::with_shell(shell.clone(), "Hello", Some(image)).unwrap();
    let window = icon.window_handle();
    let slot: Rc<RefCell<Option<NotifyIcon<MockShell>>>> = Rc::new(RefCell::new(Some(icon)));
    let hits = Rc::new(RefCell::new(0));
    {
        let slot_for_observer = Rc::clone(&slot);
        let hits = Rc::clone(&hits);
        let borrowed = slot.borrow();
        let icon = borrowed.as_ref().unwrap();
        icon.on_left_button_up(move |_| {
            let taken = slot_for_observer.borrow_mut().take();
            drop(taken);
        });
        icon.on_left_button_up(move |_| *hits.borrow_mut() += 1);
    }
    shell.clear();

    // When: A left-button-up arrives through the window procedure
    let up = ButtonEvent::new(MouseButton::Left, ButtonAction::Up);
    let disposition = shell.deliver(window, button_message(up, 5, 6));

    // Then: The event was handled and the second observer still ran
    assert_eq!(disposition, Some(Disposition::Handled));
    assert_eq!(*hits.borrow(), 1);
    assert!(slot.borrow().is_none());

    // Then: One delete, one destroy, the quit, and the image released last
    let calls = shell.calls();
    assert_eq!(shell.count_notify(NotifyOp::Delete), 1);
    let destroys = calls
        .iter()
        .filter(|call| matches!(call, Call::DestroyWindow(_)))
        .count();
    assert_eq!(destroys, 1);
    assert!(calls.contains(&Call::PostQuit(0)));
    let releases = calls
        .iter()
        .filter(|call| matches!(call, Call::ReleaseImage { .. }))
        .count();
    assert_eq!(releases, 1);
    assert!(matches!(calls.last(), Some(Call::ReleaseImage { .. })));

    // Then: The window no longer routes anything
    assert_eq!(shell.deliver(window, button_message(up, 5, 6)), None);
}

/// WHAT: Button helpers cover left, middle and right
/// WHY: Guards the fixed slot table against a missing button
#[test]
fn given_all_events_when_listed_then_each_button_has_three_actions() {
    for button in [MouseButton::Left, MouseButton::Middle, MouseButton::Right] {
        let count = ButtonEvent::ALL
            .iter()
            .filter(|event| event.button == button)
            .count();
        assert_eq!(count, 3);
    }
}

/// WHAT: Subscribing from a button callback takes effect on the next event
/// WHY: Callbacks may wire further callbacks without losing them
#[test]
fn given_callback_subscribing_same_event_when_dispatched_twice_then_new_callback_fires_once() {
    // Given: A left-button-down callback that subscribes another on first use
    let shell = MockShell::new();
    let icon = Rc::new(tray(&shell, "Hello"));
    let late_hits = Rc::new(RefCell::new(0));
    {
        let icon_ref = Rc::downgrade(&icon);
        let late_hits = Rc::clone(&late_hits);
        let subscribed = RefCell::new(false);
        icon.on_left_button_down(move |_| {
            if subscribed.replace(true) {
                return;
            }
            if let Some(icon) = icon_ref.upgrade() {
                let late_hits = Rc::clone(&late_hits);
                icon.on_left_button_down(move |_| *late_hits.borrow_mut() += 1);
            }
        });
    }
    let down = ButtonEvent::new(MouseButton::Left, ButtonAction::Down);

    // When: Dispatching the event twice
    icon.dispatch(button_message(down, 0, 0));
    assert_eq!(*late_hits.borrow(), 0);
    icon.dispatch(button_message(down, 0, 0));

    // Then: The late callback saw only the second event
    assert_eq!(*late_hits.borrow(), 1);
}

#![cfg(feature = "mock")]

use std::{cell::RefCell, rc::Rc};
use ui_utils::device::{DeviceInfo, DeviceType, ListenerId, on_device_change};

#[mockall_double::double]
use ui_utils::device::ViewportProvider;

fn make_provider(width: f64, height: f64) -> ViewportProvider {
    let mut provider = ViewportProvider::default();
    provider.expect_inner_width().return_const(width);
    provider.expect_inner_height().return_const(height);
    provider
}

#[test]
fn subscribe_registers_one_listener_and_reports_immediately() {
    let mut provider = make_provider(1280.0, 720.0);
    provider
        .expect_add_resize_listener()
        .times(1)
        .returning(|_| ListenerId(3));
    provider.expect_remove_resize_listener().never();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let subscription = on_device_change(Rc::new(provider), move |info| {
        sink.borrow_mut().push(info);
    });

    assert_eq!(subscription.id(), ListenerId(3));
    assert_eq!(
        *seen.borrow(),
        vec![DeviceInfo {
            device_type: DeviceType::Widescreen,
            width: 1280,
            height: 720,
        }]
    );
}

#[test]
fn unsubscribe_removes_listener_once() {
    let mut provider = make_provider(400.0, 800.0);
    provider
        .expect_add_resize_listener()
        .returning(|_| ListenerId(9));
    provider
        .expect_remove_resize_listener()
        .withf(|id| *id == ListenerId(9))
        .times(1)
        .return_const(());

    let subscription = on_device_change(Rc::new(provider), |_| {});
    subscription.unsubscribe();
    subscription.unsubscribe();

    assert!(!subscription.is_active());
}

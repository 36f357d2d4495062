use super::*;
use crate::{
    drivers::m5core2::test_bus::FakeBus,
    eyes::{touch::classify, TouchState},
};

fn frame_bytes(contacts: u8, x: u16, y: u16) -> [u8; 5] {
    [
        contacts,
        0x40 | (x >> 8) as u8,
        x as u8,
        0x10 | (y >> 8) as u8,
        y as u8,
    ]
}

#[test]
fn decodes_first_point_and_ignores_flag_bits() {
    let frame = decode_frame(&frame_bytes(1, 300, 211));
    assert_eq!(
        frame,
        TouchFrame {
            contacts: 1,
            x: 300,
            y: 211
        }
    );
}

#[test]
fn idle_status_decodes_as_no_contact() {
    assert_eq!(decode_frame(&frame_bytes(0x0F, 10, 10)), TouchFrame::default());
    assert_eq!(decode_frame(&frame_bytes(0, 10, 10)), TouchFrame::default());
}

#[test]
fn gesture_codes_classify_as_expected() {
    assert_eq!(classify(gesture_code(false, true), 1), TouchState::Touching);
    assert_eq!(classify(gesture_code(true, true), 1), TouchState::Touching);
    assert_eq!(classify(gesture_code(true, false), 0), TouchState::Released);
    assert_eq!(classify(gesture_code(false, false), 0), TouchState::None);
    assert_eq!(classify(gesture_code(true, true), 2), TouchState::MultiTouch);
}

#[test]
fn init_selects_polling_mode() {
    let mut touch = Ft6336::new(FakeBus::default().with_device(FT6336_ADDR));
    assert_eq!(touch.init(), Ok(true));
    assert_eq!(touch.release().last_write(FT6336_ADDR, REG_G_MODE), Some(0x00));

    let mut absent = Ft6336::new(FakeBus::default());
    assert_eq!(absent.init(), Ok(false));
}

#[test]
fn poll_synthesizes_begin_hold_and_release() {
    let mut bus = FakeBus::default().with_device(FT6336_ADDR);
    bus.set(FT6336_ADDR, REG_TD_STATUS, &frame_bytes(1, 40, 50));
    let bus = core::cell::RefCell::new(bus);
    let mut touch = Ft6336::new(&bus);

    let begin = touch.poll();
    assert_eq!((begin.code, begin.x, begin.y), (3, 40, 50));

    bus.borrow_mut()
        .set(FT6336_ADDR, REG_TD_STATUS, &frame_bytes(1, 44, 52));
    let hold = touch.poll();
    assert_eq!((hold.code, hold.x, hold.y), (1, 44, 52));

    bus.borrow_mut()
        .set(FT6336_ADDR, REG_TD_STATUS, &frame_bytes(0, 0, 0));
    let end = touch.poll();
    assert_eq!((end.code, end.contacts), (2, 0));
    assert_eq!((end.x, end.y), (44, 52), "release keeps the last point");

    assert_eq!(touch.poll().code, 0);
}

#[test]
fn bus_error_reads_as_idle_and_keeps_contact_state() {
    let mut bus = FakeBus::default().with_device(FT6336_ADDR);
    bus.set(FT6336_ADDR, REG_TD_STATUS, &frame_bytes(1, 40, 50));
    let bus = core::cell::RefCell::new(bus);
    let mut touch = Ft6336::new(&bus);
    touch.poll();

    bus.borrow_mut().failing = true;
    assert_eq!(touch.poll(), RawTouch::default());

    bus.borrow_mut().failing = false;
    bus.borrow_mut()
        .set(FT6336_ADDR, REG_TD_STATUS, &frame_bytes(0, 0, 0));
    assert_eq!(touch.poll().code, 2);
}

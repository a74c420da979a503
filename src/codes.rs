//! Maps raw event codes of the trackpad to the field they update.
//!
//! The codes are compared without looking at the event type, so e.g.
//! `0x0000` covers both `ABS_X` and `SYN_REPORT`. Both are ignored.

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Field {
    TrackingId,
    LiftOrPressCount,
    PositionX,
    PositionY,
    Surface,
    Click,
    GlobalForce,
    Unrecognized,
}

pub const TRACKING_ID: u16 = 0x002f;
pub const LIFT_OR_PRESS_COUNT: u16 = 0x0039;
pub const POSITION_X: u16 = 0x0035;
pub const POSITION_Y: u16 = 0x0036;
pub const SURFACE: u16 = 0x0030;
pub const CLICK: u16 = 0x0110;
pub const GLOBAL_FORCE: u16 = 0x003a;

/// Value of a `LIFT_OR_PRESS_COUNT` event that removes the current contact.
pub const LIFT: i32 = -1;

/// Codes the device emits that carry nothing we track: first-finger
/// position and force, initial surface and the finger count chords.
pub const IGNORED: [u16; 10] = [
    0x0000, 0x0001, 0x0018, 0x0031, 0x0145, 0x0148, 0x014a, 0x014d, 0x014e, 0x014f,
];

pub fn classify(code: u16) -> Field {
    match code {
        TRACKING_ID => Field::TrackingId,
        LIFT_OR_PRESS_COUNT => Field::LiftOrPressCount,
        POSITION_X => Field::PositionX,
        POSITION_Y => Field::PositionY,
        SURFACE => Field::Surface,
        CLICK => Field::Click,
        GLOBAL_FORCE => Field::GlobalForce,
        _ => Field::Unrecognized,
    }
}

#[cfg(test)]
test_suite! {
    use super::*;

    test classify_maps_tracking_ids() {
        assert_eq!(classify(0x002f), Field::TrackingId);
    }

    test classify_maps_lifts_and_press_counts() {
        assert_eq!(classify(0x0039), Field::LiftOrPressCount);
    }

    test classify_maps_positions() {
        assert_eq!(classify(0x0035), Field::PositionX);
        assert_eq!(classify(0x0036), Field::PositionY);
    }

    test classify_maps_surface_click_and_global_force() {
        assert_eq!(classify(0x0030), Field::Surface);
        assert_eq!(classify(0x0110), Field::Click);
        assert_eq!(classify(0x003a), Field::GlobalForce);
    }

    test classify_ignores_gesture_and_first_finger_codes() {
        for code in IGNORED.iter() {
            assert_eq!(classify(*code), Field::Unrecognized, "code: {:#06x}", code);
        }
    }

    test classify_ignores_unknown_codes() {
        assert_eq!(classify(0xffff), Field::Unrecognized);
        assert_eq!(classify(0x0005), Field::Unrecognized);
    }
}

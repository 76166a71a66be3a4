// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-kind gesture payloads.
//!
//! [`GestureEventDetails`] is a tagged union keyed by [`GestureType`]. The
//! payload shape is chosen by the kind at construction and never changes, so
//! each accessor is only meaningful for the kinds listed in its docs.
//! Reading a payload through the wrong kind is a programming error and panics.
//!
//! ```
//! use understory_gesture::{GestureEventDetails, GestureType};
//!
//! let details = GestureEventDetails::with_delta(GestureType::ScrollUpdate, 3.0, -4.0);
//! assert_eq!(details.scroll_x(), 3.0);
//! assert_eq!(details.scroll_y(), -4.0);
//!
//! let mut tap = GestureEventDetails::new(GestureType::Tap);
//! tap.set_tap_count(2);
//! assert_eq!(tap.tap_count(), 2);
//! ```

use kurbo::Rect;

use crate::{GestureDeviceType, GestureType};

bitflags::bitflags! {
    /// Directions of a swipe. A diagonal swipe sets two bits.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SwipeDirection: u8 {
        /// Towards negative x.
        const LEFT  = 0b0000_0001;
        /// Towards positive x.
        const RIGHT = 0b0000_0010;
        /// Towards negative y.
        const UP    = 0b0000_0100;
        /// Towards positive y.
        const DOWN  = 0b0000_1000;
    }
}

impl SwipeDirection {
    /// Directions implied by the sign of each delta component.
    pub fn from_delta(dx: f64, dy: f64) -> Self {
        let mut dir = Self::empty();
        dir.set(Self::LEFT, dx < 0.0);
        dir.set(Self::RIGHT, dx > 0.0);
        dir.set(Self::UP, dy < 0.0);
        dir.set(Self::DOWN, dy > 0.0);
        dir
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Payload {
    None,
    ScrollBegin { x_hint: f64, y_hint: f64 },
    ScrollUpdate { x: f64, y: f64 },
    Fling { velocity_x: f64, velocity_y: f64 },
    Pinch { scale: f64 },
    Swipe(SwipeDirection),
    TwoFingerTap { width: f64, height: f64 },
    Tap { count: u8 },
}

impl Payload {
    fn default_for(kind: GestureType) -> Self {
        match kind {
            GestureType::ScrollBegin => Self::ScrollBegin {
                x_hint: 0.0,
                y_hint: 0.0,
            },
            GestureType::ScrollUpdate => Self::ScrollUpdate { x: 0.0, y: 0.0 },
            GestureType::FlingStart => Self::Fling {
                velocity_x: 0.0,
                velocity_y: 0.0,
            },
            GestureType::PinchUpdate => Self::Pinch { scale: 1.0 },
            GestureType::Swipe => Self::Swipe(SwipeDirection::empty()),
            GestureType::TwoFingerTap => Self::TwoFingerTap {
                width: 0.0,
                height: 0.0,
            },
            GestureType::Tap | GestureType::TapUnconfirmed | GestureType::DoubleTap => {
                Self::Tap { count: 0 }
            }
            _ => Self::None,
        }
    }
}

/// Kind-specific payload plus the attributes shared by every gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureEventDetails {
    kind: GestureType,
    payload: Payload,
    touch_points: u32,
    bounding_box: Rect,
    oldest_touch_id: u32,
    device_type: GestureDeviceType,
}

impl GestureEventDetails {
    /// Highest tap count a tap gesture may carry.
    pub const MAX_TAP_COUNT: u8 = 3;

    /// Details for `kind` with a zeroed payload (a pinch scale of `1.0`).
    pub fn new(kind: GestureType) -> Self {
        Self {
            kind,
            payload: Payload::default_for(kind),
            touch_points: 1,
            bounding_box: Rect::ZERO,
            oldest_touch_id: 0,
            device_type: GestureDeviceType::Unknown,
        }
    }

    /// Details for a kind whose payload is a pair of values.
    ///
    /// - [`GestureType::ScrollBegin`]: scroll hints.
    /// - [`GestureType::ScrollUpdate`]: scroll deltas.
    /// - [`GestureType::FlingStart`]: fling velocity.
    /// - [`GestureType::TwoFingerTap`]: width and height of the first finger's enclosing rectangle.
    /// - [`GestureType::Swipe`]: directions from the sign of each component.
    ///
    /// # Panics
    ///
    /// Panics for any other kind.
    #[track_caller]
    pub fn with_delta(kind: GestureType, dx: f64, dy: f64) -> Self {
        let payload = match kind {
            GestureType::ScrollBegin => Payload::ScrollBegin {
                x_hint: dx,
                y_hint: dy,
            },
            GestureType::ScrollUpdate => Payload::ScrollUpdate { x: dx, y: dy },
            GestureType::FlingStart => Payload::Fling {
                velocity_x: dx,
                velocity_y: dy,
            },
            GestureType::TwoFingerTap => Payload::TwoFingerTap {
                width: dx,
                height: dy,
            },
            GestureType::Swipe => Payload::Swipe(SwipeDirection::from_delta(dx, dy)),
            _ => panic!("{kind} gestures do not carry a two-component payload"),
        };
        Self {
            payload,
            ..Self::new(kind)
        }
    }

    /// The kind this payload is keyed by.
    #[inline]
    pub fn kind(&self) -> GestureType {
        self.kind
    }

    /// Number of touch points contributing to the gesture.
    #[inline]
    pub fn touch_points(&self) -> u32 {
        self.touch_points
    }

    /// Set the number of contributing touch points.
    pub fn set_touch_points(&mut self, touch_points: u32) {
        self.touch_points = touch_points;
    }

    /// Bounding box of the contributing touches.
    #[inline]
    pub fn bounding_box(&self) -> Rect {
        self.bounding_box
    }

    /// Set the bounding box of the contributing touches.
    pub fn set_bounding_box(&mut self, bounding_box: Rect) {
        self.bounding_box = bounding_box;
    }

    /// Id of the oldest touch contributing to the gesture.
    #[inline]
    pub fn oldest_touch_id(&self) -> u32 {
        self.oldest_touch_id
    }

    /// Set the id of the oldest contributing touch.
    pub fn set_oldest_touch_id(&mut self, id: u32) {
        self.oldest_touch_id = id;
    }

    /// Class of device that produced the gesture.
    #[inline]
    pub fn device_type(&self) -> GestureDeviceType {
        self.device_type
    }

    /// Set the class of device that produced the gesture.
    pub fn set_device_type(&mut self, device_type: GestureDeviceType) {
        self.device_type = device_type;
    }

    /// Horizontal scroll hint of a [`GestureType::ScrollBegin`].
    #[track_caller]
    pub fn scroll_x_hint(&self) -> f64 {
        match self.payload {
            Payload::ScrollBegin { x_hint, .. } => x_hint,
            _ => self.wrong_kind("scroll_x_hint", "scroll_begin"),
        }
    }

    /// Vertical scroll hint of a [`GestureType::ScrollBegin`].
    #[track_caller]
    pub fn scroll_y_hint(&self) -> f64 {
        match self.payload {
            Payload::ScrollBegin { y_hint, .. } => y_hint,
            _ => self.wrong_kind("scroll_y_hint", "scroll_begin"),
        }
    }

    /// Horizontal delta of a [`GestureType::ScrollUpdate`].
    #[track_caller]
    pub fn scroll_x(&self) -> f64 {
        match self.payload {
            Payload::ScrollUpdate { x, .. } => x,
            _ => self.wrong_kind("scroll_x", "scroll_update"),
        }
    }

    /// Vertical delta of a [`GestureType::ScrollUpdate`].
    #[track_caller]
    pub fn scroll_y(&self) -> f64 {
        match self.payload {
            Payload::ScrollUpdate { y, .. } => y,
            _ => self.wrong_kind("scroll_y", "scroll_update"),
        }
    }

    /// Horizontal velocity of a [`GestureType::FlingStart`].
    #[track_caller]
    pub fn velocity_x(&self) -> f64 {
        match self.payload {
            Payload::Fling { velocity_x, .. } => velocity_x,
            _ => self.wrong_kind("velocity_x", "fling_start"),
        }
    }

    /// Vertical velocity of a [`GestureType::FlingStart`].
    #[track_caller]
    pub fn velocity_y(&self) -> f64 {
        match self.payload {
            Payload::Fling { velocity_y, .. } => velocity_y,
            _ => self.wrong_kind("velocity_y", "fling_start"),
        }
    }

    /// Scale factor of a [`GestureType::PinchUpdate`].
    #[track_caller]
    pub fn scale(&self) -> f64 {
        match self.payload {
            Payload::Pinch { scale } => scale,
            _ => self.wrong_kind("scale", "pinch_update"),
        }
    }

    /// Set the scale factor of a [`GestureType::PinchUpdate`].
    ///
    /// # Panics
    ///
    /// Panics for other kinds, or if `scale` is negative.
    #[track_caller]
    pub fn set_scale(&mut self, scale: f64) {
        assert!(scale >= 0.0, "pinch scale must not be negative, got {scale}");
        if !matches!(self.payload, Payload::Pinch { .. }) {
            self.wrong_kind("set_scale", "pinch_update");
        }
        self.payload = Payload::Pinch { scale };
    }

    /// Directions of a [`GestureType::Swipe`].
    #[track_caller]
    pub fn swipe_direction(&self) -> SwipeDirection {
        match self.payload {
            Payload::Swipe(dir) => dir,
            _ => self.wrong_kind("swipe_direction", "swipe"),
        }
    }

    /// Whether a [`GestureType::Swipe`] moved left.
    #[track_caller]
    pub fn swipe_left(&self) -> bool {
        self.swipe_direction().contains(SwipeDirection::LEFT)
    }

    /// Whether a [`GestureType::Swipe`] moved right.
    #[track_caller]
    pub fn swipe_right(&self) -> bool {
        self.swipe_direction().contains(SwipeDirection::RIGHT)
    }

    /// Whether a [`GestureType::Swipe`] moved up.
    #[track_caller]
    pub fn swipe_up(&self) -> bool {
        self.swipe_direction().contains(SwipeDirection::UP)
    }

    /// Whether a [`GestureType::Swipe`] moved down.
    #[track_caller]
    pub fn swipe_down(&self) -> bool {
        self.swipe_direction().contains(SwipeDirection::DOWN)
    }

    /// Width of the first finger's enclosing rectangle in a [`GestureType::TwoFingerTap`].
    #[track_caller]
    pub fn first_finger_width(&self) -> f64 {
        match self.payload {
            Payload::TwoFingerTap { width, .. } => width,
            _ => self.wrong_kind("first_finger_width", "two_finger_tap"),
        }
    }

    /// Height of the first finger's enclosing rectangle in a [`GestureType::TwoFingerTap`].
    #[track_caller]
    pub fn first_finger_height(&self) -> f64 {
        match self.payload {
            Payload::TwoFingerTap { height, .. } => height,
            _ => self.wrong_kind("first_finger_height", "two_finger_tap"),
        }
    }

    /// Tap count of a [`GestureType::Tap`], [`GestureType::TapUnconfirmed`] or
    /// [`GestureType::DoubleTap`].
    #[track_caller]
    pub fn tap_count(&self) -> u8 {
        match self.payload {
            Payload::Tap { count } => count,
            _ => self.wrong_kind("tap_count", "tap"),
        }
    }

    /// Set the tap count of a tap kind.
    ///
    /// # Panics
    ///
    /// Panics for non-tap kinds, or if `count` exceeds [`Self::MAX_TAP_COUNT`].
    #[track_caller]
    pub fn set_tap_count(&mut self, count: u8) {
        assert!(
            count <= Self::MAX_TAP_COUNT,
            "tap count {count} exceeds {}",
            Self::MAX_TAP_COUNT
        );
        if !matches!(self.payload, Payload::Tap { .. }) {
            self.wrong_kind("set_tap_count", "tap");
        }
        self.payload = Payload::Tap { count };
    }

    #[cold]
    #[track_caller]
    fn wrong_kind(&self, accessor: &str, expected: &str) -> ! {
        panic!(
            "`{accessor}` requires a {expected} gesture, but this is a {}",
            self.kind
        )
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture kinds, pointer tool types, and device types.

use core::fmt;

/// The kind of a recognized gesture.
///
/// Each kind has a stable ordinal, [`GestureType::index`], in
/// `0..GestureType::COUNT`. Ordinals are used to key per-kind tables and
/// bit sets, so the declaration order here is part of the contract.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum GestureType {
    /// A scroll has started.
    ScrollBegin = 0,
    /// A scroll has ended.
    ScrollEnd,
    /// A scroll moved by some delta.
    ScrollUpdate,
    /// A confirmed single (or multi) tap.
    Tap,
    /// A finger went down; a tap may follow.
    TapDown,
    /// A previously started tap will not complete.
    TapCancel,
    /// A tap that may still become a double tap.
    TapUnconfirmed,
    /// A double tap.
    DoubleTap,
    /// A touch point joined the gesture.
    GestureBegin,
    /// A touch point left the gesture.
    GestureEnd,
    /// Two fingers tapped together.
    TwoFingerTap,
    /// A pinch has started.
    PinchBegin,
    /// A pinch has ended.
    PinchEnd,
    /// A pinch changed scale.
    PinchUpdate,
    /// A press was held long enough to count as a long press.
    LongPress,
    /// A long press was released.
    LongTap,
    /// A swipe in one or more directions.
    Swipe,
    /// The pressed state of a tap should become visible.
    ShowPress,
    /// A fling has started.
    FlingStart,
    /// A running fling was stopped.
    FlingCancel,
}

impl GestureType {
    /// Number of gesture kinds.
    pub const COUNT: usize = 20;

    /// All gesture kinds, in ordinal order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::ScrollBegin,
        Self::ScrollEnd,
        Self::ScrollUpdate,
        Self::Tap,
        Self::TapDown,
        Self::TapCancel,
        Self::TapUnconfirmed,
        Self::DoubleTap,
        Self::GestureBegin,
        Self::GestureEnd,
        Self::TwoFingerTap,
        Self::PinchBegin,
        Self::PinchEnd,
        Self::PinchUpdate,
        Self::LongPress,
        Self::LongTap,
        Self::Swipe,
        Self::ShowPress,
        Self::FlingStart,
        Self::FlingCancel,
    ];

    /// Ordinal of this kind, in `0..GestureType::COUNT`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`GestureType::index`].
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Snake-case name, e.g. `"tap_down"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ScrollBegin => "scroll_begin",
            Self::ScrollEnd => "scroll_end",
            Self::ScrollUpdate => "scroll_update",
            Self::Tap => "tap",
            Self::TapDown => "tap_down",
            Self::TapCancel => "tap_cancel",
            Self::TapUnconfirmed => "tap_unconfirmed",
            Self::DoubleTap => "double_tap",
            Self::GestureBegin => "gesture_begin",
            Self::GestureEnd => "gesture_end",
            Self::TwoFingerTap => "two_finger_tap",
            Self::PinchBegin => "pinch_begin",
            Self::PinchEnd => "pinch_end",
            Self::PinchUpdate => "pinch_update",
            Self::LongPress => "long_press",
            Self::LongTap => "long_tap",
            Self::Swipe => "swipe",
            Self::ShowPress => "show_press",
            Self::FlingStart => "fling_start",
            Self::FlingCancel => "fling_cancel",
        }
    }

    /// Returns `true` for the kinds that carry a tap count.
    #[inline]
    pub const fn is_tap(self) -> bool {
        matches!(self, Self::Tap | Self::TapUnconfirmed | Self::DoubleTap)
    }
}

impl fmt::Display for GestureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The tool that produced the primary pointer of a touch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToolType {
    /// Tool not known.
    #[default]
    Unknown,
    /// A finger.
    Finger,
    /// A stylus tip.
    Stylus,
    /// A mouse.
    Mouse,
    /// The eraser end of a stylus.
    Eraser,
}

/// The class of device a gesture originated from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureDeviceType {
    /// Device not known.
    #[default]
    Unknown,
    /// A direct-touch screen.
    Touchscreen,
    /// An indirect touchpad.
    Touchpad,
}

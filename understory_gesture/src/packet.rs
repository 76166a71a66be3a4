// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture packets: the gestures recognized from a single touch event or timeout.
//!
//! A recognizer produces one [`GestureEventDataPacket`] per touch event it
//! processes (possibly with no gestures at all), plus an extra packet whenever a
//! timer fires (long press, show press). The packet's [`GestureSource`] says
//! which role its touch plays in the touch sequence.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::{GestureEventDataPacket, GestureSource, TouchAction};
//!
//! let packet = GestureEventDataPacket::from_touch_action(
//!     TouchAction::Down,
//!     16,
//!     Point::new(4.0, 8.0),
//!     Point::new(4.0, 8.0),
//! );
//! assert_eq!(packet.source(), GestureSource::TouchSequenceStart);
//! assert!(packet.is_empty());
//! ```

use kurbo::Point;
use smallvec::SmallVec;

use crate::GestureEventData;

/// The role of the touch event (or timeout) a packet was produced from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureSource {
    /// Not yet assigned.
    #[default]
    Undefined,
    /// Explicitly invalid.
    Invalid,
    /// The first pointer of a touch sequence went down.
    TouchSequenceStart,
    /// The last pointer of a touch sequence went up.
    TouchSequenceEnd,
    /// The touch sequence was cancelled.
    TouchSequenceCancel,
    /// An additional pointer went down.
    TouchStart,
    /// Pointers moved.
    TouchMove,
    /// A non-final pointer went up.
    TouchEnd,
    /// A recognizer timer fired; no touch event is attached.
    TouchTimeout,
}

impl GestureSource {
    /// Source for a packet produced from a touch event with `action`.
    pub const fn from_touch_action(action: TouchAction) -> Self {
        match action {
            TouchAction::Down => Self::TouchSequenceStart,
            TouchAction::PointerDown => Self::TouchStart,
            TouchAction::Move => Self::TouchMove,
            TouchAction::PointerUp => Self::TouchEnd,
            TouchAction::Up => Self::TouchSequenceEnd,
            TouchAction::Cancel => Self::TouchSequenceCancel,
        }
    }

    /// Returns `false` for [`Undefined`](Self::Undefined) and [`Invalid`](Self::Invalid).
    #[inline]
    pub const fn is_valid(self) -> bool {
        !matches!(self, Self::Undefined | Self::Invalid)
    }

    /// Returns `true` if a pointer went down, starting the sequence or joining it.
    #[inline]
    pub const fn is_touch_start(self) -> bool {
        matches!(self, Self::TouchSequenceStart | Self::TouchStart)
    }
}

/// Action of a touch event, as reported by the platform.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TouchAction {
    /// First pointer down.
    Down,
    /// Additional pointer down.
    PointerDown,
    /// Pointer movement.
    Move,
    /// Non-final pointer up.
    PointerUp,
    /// Final pointer up.
    Up,
    /// The platform cancelled the touch stream.
    Cancel,
}

/// Ordered gestures attributed to one touch event or timeout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureEventDataPacket {
    timestamp: u64,
    gestures: SmallVec<[GestureEventData; 4]>,
    touch_location: Point,
    raw_touch_location: Point,
    source: GestureSource,
}

impl GestureEventDataPacket {
    /// An empty packet for a touch event.
    pub fn from_touch(
        source: GestureSource,
        timestamp: u64,
        touch_location: Point,
        raw_touch_location: Point,
    ) -> Self {
        Self {
            timestamp,
            gestures: SmallVec::new(),
            touch_location,
            raw_touch_location,
            source,
        }
    }

    /// An empty packet for a touch event with `action`.
    pub fn from_touch_action(
        action: TouchAction,
        timestamp: u64,
        touch_location: Point,
        raw_touch_location: Point,
    ) -> Self {
        Self::from_touch(
            GestureSource::from_touch_action(action),
            timestamp,
            touch_location,
            raw_touch_location,
        )
    }

    /// A [`GestureSource::TouchTimeout`] packet holding just `gesture`.
    ///
    /// The packet's time and locations are taken from the gesture.
    pub fn from_touch_timeout(gesture: GestureEventData) -> Self {
        let mut packet = Self::from_touch(
            GestureSource::TouchTimeout,
            gesture.time,
            gesture.location,
            gesture.raw_location,
        );
        packet.push(gesture);
        packet
    }

    /// Append a gesture.
    pub fn push(&mut self, gesture: GestureEventData) {
        self.gestures.push(gesture);
    }

    /// The gestures, in recognition order.
    #[inline]
    pub fn gestures(&self) -> &[GestureEventData] {
        &self.gestures
    }

    /// The gesture at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn gesture(&self, index: usize) -> &GestureEventData {
        &self.gestures[index]
    }

    /// Number of gestures.
    #[inline]
    pub fn gesture_count(&self) -> usize {
        self.gestures.len()
    }

    /// Returns `true` if the packet holds no gestures.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty()
    }

    /// Role of the originating touch event.
    #[inline]
    pub fn source(&self) -> GestureSource {
        self.source
    }

    /// Timestamp of the originating touch event, in milliseconds.
    #[inline]
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Filtered location of the originating touch.
    #[inline]
    pub fn touch_location(&self) -> Point {
        self.touch_location
    }

    /// Unfiltered location of the originating touch.
    #[inline]
    pub fn raw_touch_location(&self) -> Point {
        self.raw_touch_location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventFlags, GestureEventDetails, GestureType, ToolType};
    use kurbo::Rect;

    fn gesture(kind: GestureType, time: u64) -> GestureEventData {
        GestureEventData::new(
            GestureEventDetails::new(kind),
            3,
            ToolType::Finger,
            time,
            Point::new(1.0, 2.0),
            Point::new(11.0, 12.0),
            1,
            Rect::ZERO,
            EventFlags::empty(),
        )
    }

    #[test]
    fn default_packet_is_undefined_and_empty() {
        let p = GestureEventDataPacket::default();
        assert_eq!(p.source(), GestureSource::Undefined);
        assert!(!p.source().is_valid());
        assert!(p.is_empty());
    }

    #[test]
    fn touch_actions_map_to_sources() {
        let cases = [
            (TouchAction::Down, GestureSource::TouchSequenceStart),
            (TouchAction::PointerDown, GestureSource::TouchStart),
            (TouchAction::Move, GestureSource::TouchMove),
            (TouchAction::PointerUp, GestureSource::TouchEnd),
            (TouchAction::Up, GestureSource::TouchSequenceEnd),
            (TouchAction::Cancel, GestureSource::TouchSequenceCancel),
        ];
        for (action, source) in cases {
            assert_eq!(GestureSource::from_touch_action(action), source);
        }
    }

    #[test]
    fn only_pointer_down_sources_are_touch_starts() {
        assert!(GestureSource::TouchSequenceStart.is_touch_start());
        assert!(GestureSource::TouchStart.is_touch_start());
        assert!(!GestureSource::TouchMove.is_touch_start());
        assert!(!GestureSource::TouchTimeout.is_touch_start());
    }

    #[test]
    fn push_preserves_order() {
        let mut p = GestureEventDataPacket::from_touch(
            GestureSource::TouchMove,
            5,
            Point::ZERO,
            Point::ZERO,
        );
        p.push(gesture(GestureType::ScrollBegin, 5));
        p.push(gesture(GestureType::ScrollUpdate, 5));
        assert_eq!(p.gesture_count(), 2);
        assert_eq!(p.gesture(0).kind(), GestureType::ScrollBegin);
        assert_eq!(p.gestures()[1].kind(), GestureType::ScrollUpdate);
    }

    #[test]
    fn timeout_packet_takes_context_from_gesture() {
        let p = GestureEventDataPacket::from_touch_timeout(gesture(GestureType::ShowPress, 99));
        assert_eq!(p.source(), GestureSource::TouchTimeout);
        assert_eq!(p.timestamp(), 99);
        assert_eq!(p.touch_location(), Point::new(1.0, 2.0));
        assert_eq!(p.raw_touch_location(), Point::new(11.0, 12.0));
        assert_eq!(p.gesture_count(), 1);
    }
}

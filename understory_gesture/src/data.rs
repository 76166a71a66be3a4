// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single gesture together with the touch it is attributed to.

use kurbo::{Point, Rect};

use crate::{GestureEventDetails, GestureType, ToolType};

bitflags::bitflags! {
    /// Modifier and provenance flags carried by a gesture.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventFlags: u16 {
        /// Shift was held.
        const SHIFT          = 0b0000_0001;
        /// Control was held.
        const CONTROL        = 0b0000_0010;
        /// Alt was held.
        const ALT            = 0b0000_0100;
        /// Command (or the platform's meta key) was held.
        const COMMAND        = 0b0000_1000;
        /// The gesture was synthesized rather than recognized from touches.
        const IS_SYNTHESIZED = 0b0001_0000;
    }
}

/// A gesture plus the identity and spatiotemporal context of its touch.
///
/// This is a plain value; clone it freely.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureEventData {
    /// Kind-specific payload and shared gesture attributes.
    pub details: GestureEventDetails,
    /// Id of the motion event the gesture was recognized from.
    pub motion_event_id: i32,
    /// Tool of the primary pointer.
    pub primary_tool_type: ToolType,
    /// Timestamp in milliseconds. Opaque to this crate.
    pub time: u64,
    /// Filtered location.
    pub location: Point,
    /// Unfiltered location.
    pub raw_location: Point,
    /// Modifier and provenance flags.
    pub flags: EventFlags,
}

impl GestureEventData {
    /// Attach touch metadata to `details`.
    ///
    /// `touch_point_count` and `bounding_box` are stored on the details.
    pub fn new(
        mut details: GestureEventDetails,
        motion_event_id: i32,
        primary_tool_type: ToolType,
        time: u64,
        location: Point,
        raw_location: Point,
        touch_point_count: u32,
        bounding_box: Rect,
        flags: EventFlags,
    ) -> Self {
        details.set_touch_points(touch_point_count);
        details.set_bounding_box(bounding_box);
        Self {
            details,
            motion_event_id,
            primary_tool_type,
            time,
            location,
            raw_location,
            flags,
        }
    }

    /// A gesture of `kind` carrying every piece of metadata from `other`.
    ///
    /// The payload is the default for `kind`; the touch count, bounding box,
    /// oldest touch id and device type are copied.
    pub fn from_template(kind: GestureType, other: &Self) -> Self {
        let mut details = GestureEventDetails::new(kind);
        details.set_touch_points(other.details.touch_points());
        details.set_bounding_box(other.details.bounding_box());
        details.set_oldest_touch_id(other.details.oldest_touch_id());
        details.set_device_type(other.details.device_type());
        Self {
            details,
            ..other.clone()
        }
    }

    /// Kind of the gesture.
    #[inline]
    pub fn kind(&self) -> GestureType {
        self.details.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GestureDeviceType;

    fn tap() -> GestureEventData {
        let mut details = GestureEventDetails::new(GestureType::Tap);
        details.set_tap_count(1);
        details.set_device_type(GestureDeviceType::Touchscreen);
        details.set_oldest_touch_id(7);
        GestureEventData::new(
            details,
            42,
            ToolType::Stylus,
            1_000,
            Point::new(10.0, 20.0),
            Point::new(110.0, 220.0),
            2,
            Rect::new(5.0, 15.0, 15.0, 25.0),
            EventFlags::SHIFT,
        )
    }

    #[test]
    fn new_stores_touch_attributes_on_details() {
        let g = tap();
        assert_eq!(g.kind(), GestureType::Tap);
        assert_eq!(g.details.touch_points(), 2);
        assert_eq!(g.details.bounding_box(), Rect::new(5.0, 15.0, 15.0, 25.0));
    }

    #[test]
    fn from_template_copies_metadata_with_fresh_payload() {
        let g = tap();
        let press = GestureEventData::from_template(GestureType::ShowPress, &g);

        assert_eq!(press.kind(), GestureType::ShowPress);
        assert_eq!(press.motion_event_id, 42);
        assert_eq!(press.primary_tool_type, ToolType::Stylus);
        assert_eq!(press.time, 1_000);
        assert_eq!(press.location, g.location);
        assert_eq!(press.raw_location, g.raw_location);
        assert_eq!(press.flags, EventFlags::SHIFT);
        assert_eq!(press.details.touch_points(), 2);
        assert_eq!(press.details.bounding_box(), g.details.bounding_box());
        assert_eq!(press.details.oldest_touch_id(), 7);
        assert_eq!(
            press.details.device_type(),
            GestureDeviceType::Touchscreen
        );
    }
}

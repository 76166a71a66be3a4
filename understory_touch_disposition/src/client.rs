// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sink for gestures that survive filtering.

use understory_gesture::GestureEventData;

/// Receives every gesture the filter lets through, synthesized ones included,
/// in dispatch order.
///
/// Closures taking `&GestureEventData` implement this trait:
///
/// ```
/// use understory_gesture::GestureEventData;
/// use understory_touch_disposition::TouchDispositionGestureFilter;
///
/// let mut forwarded = 0_usize;
/// let filter = TouchDispositionGestureFilter::new(|_: &GestureEventData| forwarded += 1);
/// assert!(filter.is_empty());
/// ```
pub trait GestureFilterClient {
    /// Deliver one gesture to the application.
    fn forward_gesture_event(&mut self, event: &GestureEventData);
}

impl<F> GestureFilterClient for F
where
    F: FnMut(&GestureEventData),
{
    fn forward_gesture_event(&mut self, event: &GestureEventData) {
        self(event);
    }
}

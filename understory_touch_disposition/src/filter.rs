// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ack-driven gesture filter: replay queued gesture packets once the touch
//! they came from has been acknowledged.
//!
//! A gesture recognizer runs ahead of the application: it recognizes gestures
//! from a touch event before the application has decided whether it consumed
//! that touch. [`TouchDispositionGestureFilter`] holds the resulting packets,
//! one queue per touch sequence, until the matching ack arrives. On each ack it
//! releases exactly one touch packet (plus any timeout packets queued behind
//! it), drops the gestures whose touches were consumed, and forwards the rest.
//!
//! ## Stream repair
//!
//! Dropping gestures can leave the forwarded stream inconsistent, e.g. a tap
//! down with no matching tap or tap cancel. The filter tracks which "start"
//! gestures it forwarded and synthesizes the owed ending event when needed:
//!
//! - `TapDown` is closed by `Tap`, `TapCancel` or a synthesized `TapCancel`.
//! - `ScrollBegin` is closed by `ScrollEnd`, `FlingStart` or a synthesized `ScrollEnd`.
//! - `FlingStart` is closed by `FlingCancel` or a synthesized `FlingCancel`.
//! - `ShowPress` is owed after `TapDown` and synthesized before a `Tap` if missing.
//!
//! Synthesized events carry the motion event id and tool of the gesture they
//! close, and the time and location of the packet that triggered them.
//!
//! `GestureEnd` is always the last gesture forwarded for its packet.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_gesture::{
//!     EventFlags, GestureEventData, GestureEventDataPacket, GestureEventDetails,
//!     GestureSource, GestureType, ToolType,
//! };
//! use understory_touch_disposition::TouchDispositionGestureFilter;
//!
//! fn packet(source: GestureSource, kinds: &[GestureType]) -> GestureEventDataPacket {
//!     let mut packet = GestureEventDataPacket::from_touch(source, 0, Point::ZERO, Point::ZERO);
//!     for &kind in kinds {
//!         packet.push(GestureEventData::new(
//!             GestureEventDetails::new(kind),
//!             1,
//!             ToolType::Finger,
//!             0,
//!             Point::ZERO,
//!             Point::ZERO,
//!             1,
//!             Rect::ZERO,
//!             EventFlags::empty(),
//!         ));
//!     }
//!     packet
//! }
//!
//! let mut forwarded = Vec::new();
//! let mut filter =
//!     TouchDispositionGestureFilter::new(|g: &GestureEventData| forwarded.push(g.kind()));
//!
//! filter
//!     .on_gesture_packet(packet(GestureSource::TouchSequenceStart, &[GestureType::TapDown]))
//!     .unwrap();
//! filter
//!     .on_gesture_packet(packet(GestureSource::TouchSequenceEnd, &[GestureType::Tap]))
//!     .unwrap();
//!
//! // Nothing is forwarded until the touches are acked.
//! filter.on_touch_event_ack(false);
//! // The application consumed the release, so the tap is dropped and the
//! // open tap down is cancelled instead.
//! filter.on_touch_event_ack(true);
//!
//! drop(filter);
//! assert_eq!(
//!     forwarded,
//!     [GestureType::TapDown, GestureType::TapCancel]
//! );
//! ```

use alloc::collections::VecDeque;
use core::fmt;

use kurbo::{Rect, Size};
use tracing::{debug, trace};
use understory_gesture::{
    EventFlags, GestureDeviceType, GestureEventData, GestureEventDataPacket, GestureEventDetails,
    GestureSource, GestureType, ToolType,
};

use crate::{GestureFilterClient, GestureHandlingState};

/// Why a gesture packet was rejected.
///
/// Either case means the producer broke its contract; the input stream the
/// packet belongs to should be treated as unusable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PacketError {
    /// The packet's source was [`GestureSource::Undefined`] or [`GestureSource::Invalid`].
    InvalidPacketType(GestureSource),
    /// The packet arrived before any [`GestureSource::TouchSequenceStart`] packet.
    InvalidPacketOrder,
}

impl fmt::Display for PacketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPacketType(source) => {
                write!(f, "gesture packet has unusable source {source:?}")
            }
            Self::InvalidPacketOrder => {
                f.write_str("gesture packet arrived outside of a touch sequence")
            }
        }
    }
}

impl core::error::Error for PacketError {}

/// Packets of one touch sequence, oldest first.
type GestureSequence = VecDeque<GestureEventDataPacket>;

/// Buffers gesture packets until their touch is acked, then filters and
/// forwards them to a [`GestureFilterClient`].
///
/// Sequences are drained strictly in order. Only the front sequence is ever
/// being replayed; packets for later sequences wait until it is retired.
#[derive(Debug)]
pub struct TouchDispositionGestureFilter<C> {
    client: C,
    sequences: VecDeque<GestureSequence>,
    state: GestureHandlingState,

    // Identity used for synthesized ending events.
    ending_event_motion_event_id: i32,
    ending_event_primary_tool_type: ToolType,

    needs_tap_ending_event: bool,
    needs_show_press_event: bool,
    needs_fling_ending_event: bool,
    needs_scroll_ending_event: bool,
}

impl<C: GestureFilterClient> TouchDispositionGestureFilter<C> {
    /// Create a filter forwarding to `client`.
    pub fn new(client: C) -> Self {
        Self {
            client,
            sequences: VecDeque::new(),
            state: GestureHandlingState::default(),
            ending_event_motion_event_id: 0,
            ending_event_primary_tool_type: ToolType::Unknown,
            needs_tap_ending_event: false,
            needs_show_press_event: false,
            needs_fling_ending_event: false,
            needs_scroll_ending_event: false,
        }
    }

    /// Queue a packet produced by the recognizer.
    ///
    /// A [`GestureSource::TouchSequenceStart`] packet opens a new sequence;
    /// every other packet joins the most recently opened one. A
    /// [`GestureSource::TouchTimeout`] packet is dispatched immediately if that
    /// sequence has nothing queued, since no ack will ever release it.
    ///
    /// # Errors
    ///
    /// - [`PacketError::InvalidPacketType`] if the packet's source is undefined or invalid.
    /// - [`PacketError::InvalidPacketOrder`] if no sequence has been opened yet.
    pub fn on_gesture_packet(&mut self, packet: GestureEventDataPacket) -> Result<(), PacketError> {
        let source = packet.source();
        if !source.is_valid() {
            debug!(?source, "rejecting gesture packet with unusable source");
            return Err(PacketError::InvalidPacketType(source));
        }

        if source == GestureSource::TouchSequenceStart {
            self.sequences.push_back(GestureSequence::new());
            trace!(sequences = self.sequences.len(), "opened touch sequence");
        }

        let Some(tail) = self.sequences.back_mut() else {
            debug!(?source, "rejecting gesture packet outside of a touch sequence");
            return Err(PacketError::InvalidPacketOrder);
        };

        if source == GestureSource::TouchTimeout && tail.is_empty() {
            trace!("dispatching timeout packet without waiting for an ack");
            self.filter_and_send_packet(&packet);
            return Ok(());
        }

        trace!(
            ?source,
            gestures = packet.gesture_count(),
            "queued gesture packet"
        );
        tail.push_back(packet);
        Ok(())
    }

    /// Apply the application's verdict on the oldest unacked touch.
    ///
    /// Releases the touch packet for that touch, along with any timeout
    /// packets that were queued behind it. Acks with nothing to reconcile are
    /// ignored.
    pub fn on_touch_event_ack(&mut self, event_consumed: bool) {
        let Some(head) = self.sequences.front() else {
            debug!("ignoring touch ack with no touch sequence");
            return;
        };
        if head.is_empty() {
            if self.sequences.len() == 1 {
                debug!("ignoring touch ack with no queued packets");
                return;
            }
            self.pop_gesture_sequence();
        }

        let mut touch_packet_for_current_ack_handled = false;
        while let Some(source) = self
            .sequences
            .front()
            .and_then(VecDeque::front)
            .map(GestureEventDataPacket::source)
        {
            debug_assert!(source.is_valid(), "queued packets have usable sources");
            if source != GestureSource::TouchTimeout {
                // At most one touch packet per ack.
                if touch_packet_for_current_ack_handled {
                    break;
                }
                self.state
                    .on_touch_event_ack(event_consumed, source.is_touch_start());
                touch_packet_for_current_ack_handled = true;
            }
            // Take the packet out of the queue before dispatching it.
            let Some(packet) = self.sequences.front_mut().and_then(VecDeque::pop_front) else {
                break;
            };
            self.filter_and_send_packet(&packet);
        }
        debug_assert!(
            touch_packet_for_current_ack_handled,
            "touch ack did not match a queued touch packet"
        );
    }

    /// Returns `true` if no touch sequence is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Number of queued touch sequences, including a drained one not yet retired.
    #[inline]
    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    /// Number of packets waiting for an ack, across all sequences.
    pub fn pending_packet_count(&self) -> usize {
        self.sequences.iter().map(VecDeque::len).sum()
    }

    /// Disposition state of the sequence being replayed.
    #[inline]
    pub fn state(&self) -> &GestureHandlingState {
        &self.state
    }

    /// The client gestures are forwarded to.
    #[inline]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Mutable access to the client.
    #[inline]
    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    /// Consume the filter, returning its client. Queued packets are discarded.
    pub fn into_client(self) -> C {
        self.client
    }

    fn filter_and_send_packet(&mut self, packet: &GestureEventDataPacket) {
        match packet.source() {
            GestureSource::TouchSequenceStart => {
                self.cancel_tap_if_necessary(packet);
                self.end_scroll_if_necessary(packet);
                self.cancel_fling_if_necessary(packet);
            }
            GestureSource::TouchStart => self.cancel_tap_if_necessary(packet),
            _ => {}
        }

        let mut gesture_end = None;
        for gesture in packet.gestures() {
            let kind = gesture.kind();
            if self.state.filter(kind) {
                trace!(%kind, "dropped gesture");
                self.cancel_tap_if_necessary(packet);
                continue;
            }
            if packet.source() == GestureSource::TouchTimeout {
                debug_assert_eq!(
                    packet.gesture_count(),
                    1,
                    "timeout packets carry exactly one gesture"
                );
                self.send_gesture(gesture, packet);
                return;
            }
            // Synthesized scroll ends and tap cancels go out before the gesture end.
            if kind == GestureType::GestureEnd {
                debug_assert!(gesture_end.is_none(), "more than one gesture_end in a packet");
                gesture_end = Some(gesture);
                continue;
            }
            self.send_gesture(gesture, packet);
        }

        match packet.source() {
            GestureSource::TouchSequenceCancel => {
                self.end_scroll_if_necessary(packet);
                self.cancel_tap_if_necessary(packet);
            }
            GestureSource::TouchSequenceEnd => self.end_scroll_if_necessary(packet),
            _ => {}
        }

        if let Some(gesture) = gesture_end {
            self.send_gesture(gesture, packet);
        }
    }

    fn send_gesture(&mut self, event: &GestureEventData, packet: &GestureEventDataPacket) {
        match event.kind() {
            GestureType::LongTap => {
                if !self.needs_tap_ending_event {
                    trace!("suppressed long_tap without an open tap");
                    return;
                }
                self.cancel_tap_if_necessary(packet);
                self.cancel_fling_if_necessary(packet);
            }
            GestureType::TapDown => {
                debug_assert!(
                    !self.needs_tap_ending_event,
                    "tap_down forwarded while a tap is still open"
                );
                self.record_ending_event_identity(event);
                self.needs_show_press_event = true;
                self.needs_tap_ending_event = true;
            }
            GestureType::ShowPress => {
                if !self.needs_show_press_event {
                    trace!("suppressed show_press that is not owed");
                    return;
                }
                self.needs_show_press_event = false;
            }
            GestureType::DoubleTap => {
                self.cancel_tap_if_necessary(packet);
                self.needs_show_press_event = false;
            }
            GestureType::Tap => {
                if self.needs_show_press_event {
                    let show_press = GestureEventData::from_template(GestureType::ShowPress, event);
                    self.send_gesture(&show_press, packet);
                    debug_assert!(!self.needs_show_press_event, "show_press was not sent");
                }
                self.needs_tap_ending_event = false;
            }
            GestureType::TapCancel => {
                self.needs_show_press_event = false;
                self.needs_tap_ending_event = false;
            }
            GestureType::ScrollBegin => {
                self.cancel_tap_if_necessary(packet);
                self.cancel_fling_if_necessary(packet);
                self.end_scroll_if_necessary(packet);
                self.record_ending_event_identity(event);
                self.needs_scroll_ending_event = true;
            }
            GestureType::ScrollEnd => {
                self.needs_scroll_ending_event = false;
            }
            GestureType::FlingStart => {
                self.cancel_fling_if_necessary(packet);
                self.record_ending_event_identity(event);
                self.needs_fling_ending_event = true;
                // The fling takes over from the scroll it ends.
                self.needs_scroll_ending_event = false;
            }
            GestureType::FlingCancel => {
                self.needs_fling_ending_event = false;
            }
            _ => {}
        }
        trace!(
            kind = %event.kind(),
            motion_event_id = event.motion_event_id,
            "forwarding gesture"
        );
        self.client.forward_gesture_event(event);
    }

    fn record_ending_event_identity(&mut self, event: &GestureEventData) {
        self.ending_event_motion_event_id = event.motion_event_id;
        self.ending_event_primary_tool_type = event.primary_tool_type;
    }

    fn cancel_tap_if_necessary(&mut self, packet: &GestureEventDataPacket) {
        if !self.needs_tap_ending_event {
            return;
        }
        self.send_ending_event(GestureType::TapCancel, packet);
        debug_assert!(!self.needs_tap_ending_event, "tap_cancel left the tap open");
    }

    fn cancel_fling_if_necessary(&mut self, packet: &GestureEventDataPacket) {
        if !self.needs_fling_ending_event {
            return;
        }
        self.send_ending_event(GestureType::FlingCancel, packet);
        debug_assert!(
            !self.needs_fling_ending_event,
            "fling_cancel left the fling open"
        );
    }

    fn end_scroll_if_necessary(&mut self, packet: &GestureEventDataPacket) {
        if !self.needs_scroll_ending_event {
            return;
        }
        self.send_ending_event(GestureType::ScrollEnd, packet);
        debug_assert!(
            !self.needs_scroll_ending_event,
            "scroll_end left the scroll open"
        );
    }

    fn send_ending_event(&mut self, kind: GestureType, packet: &GestureEventDataPacket) {
        trace!(%kind, "synthesizing ending event");
        let event = self.create_gesture(kind, packet);
        self.send_gesture(&event, packet);
    }

    /// Identity of the event being closed, context of the packet closing it.
    fn create_gesture(&self, kind: GestureType, packet: &GestureEventDataPacket) -> GestureEventData {
        let mut details = GestureEventDetails::new(kind);
        details.set_device_type(GestureDeviceType::Touchscreen);
        GestureEventData::new(
            details,
            self.ending_event_motion_event_id,
            self.ending_event_primary_tool_type,
            packet.timestamp(),
            packet.touch_location(),
            packet.raw_touch_location(),
            1,
            Rect::from_origin_size(packet.touch_location(), Size::ZERO),
            EventFlags::IS_SYNTHESIZED,
        )
    }

    fn pop_gesture_sequence(&mut self) {
        debug_assert!(
            self.sequences.front().is_some_and(VecDeque::is_empty),
            "only drained sequences are retired"
        );
        self.state = GestureHandlingState::default();
        self.sequences.pop_front();
        trace!(sequences = self.sequences.len(), "retired touch sequence");
    }
}

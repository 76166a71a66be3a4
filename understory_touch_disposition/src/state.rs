// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-sequence disposition state: which gestures survive a touch ack.
//!
//! Every gesture kind depends on some of the touches that produced it. A tap
//! is meaningless if the application consumed the touch that started it; a
//! scroll update is meaningless if the application consumed the move that
//! produced it. Some kinds also depend on an earlier kind (their antecedent):
//! if the last scroll begin was dropped, the following updates must be dropped
//! too, even when their own touches were not consumed.
//!
//! [`GestureHandlingState`] tracks the consumption verdicts for one touch
//! sequence and answers, per kind, whether the gesture must be filtered.
//!
//! ```
//! use understory_gesture::GestureType;
//! use understory_touch_disposition::GestureHandlingState;
//!
//! let mut state = GestureHandlingState::default();
//!
//! // The start touch was not consumed, so a scroll may begin.
//! state.on_touch_event_ack(false, true);
//! assert!(!state.filter(GestureType::ScrollBegin));
//!
//! // A later move was consumed: its scroll update is dropped, but the scroll
//! // may still end.
//! state.on_touch_event_ack(true, false);
//! assert!(state.filter(GestureType::ScrollUpdate));
//! assert!(!state.filter(GestureType::ScrollEnd));
//! ```

use understory_gesture::GestureType;

bitflags::bitflags! {
    /// Touches a gesture kind depends on.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RequiredTouches: u8 {
        /// The touch that started the sequence (or joined it).
        const START   = 0b0000_0001;
        /// The touch the gesture was recognized from.
        const CURRENT = 0b0000_0010;
    }
}

/// How a gesture kind reacts to consumed touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DispositionHandlingInfo {
    /// The gesture is dropped if any of these touches was consumed.
    pub required_touches: RequiredTouches,
    /// The gesture is dropped if the last gesture of this kind was dropped.
    pub antecedent: Option<GestureType>,
}

const fn info(
    required_touches: RequiredTouches,
    antecedent: Option<GestureType>,
) -> DispositionHandlingInfo {
    DispositionHandlingInfo {
        required_touches,
        antecedent,
    }
}

const NONE: RequiredTouches = RequiredTouches::empty();
const START: RequiredTouches = RequiredTouches::START;
const CURRENT: RequiredTouches = RequiredTouches::CURRENT;
const START_CURRENT: RequiredTouches = RequiredTouches::START.union(RequiredTouches::CURRENT);

/// Indexed by [`GestureType::index`].
static DISPOSITION_TABLE: [DispositionHandlingInfo; GestureType::COUNT] = [
    // ScrollBegin
    info(START, None),
    // ScrollEnd
    info(NONE, Some(GestureType::ScrollBegin)),
    // ScrollUpdate
    info(CURRENT, Some(GestureType::ScrollBegin)),
    // Tap
    info(START_CURRENT, Some(GestureType::TapUnconfirmed)),
    // TapDown
    info(START, None),
    // TapCancel
    info(START, None),
    // TapUnconfirmed
    info(START_CURRENT, None),
    // DoubleTap
    info(START_CURRENT, Some(GestureType::TapUnconfirmed)),
    // GestureBegin
    info(START, None),
    // GestureEnd
    info(NONE, Some(GestureType::GestureBegin)),
    // TwoFingerTap
    info(START, None),
    // PinchBegin
    info(START, Some(GestureType::ScrollBegin)),
    // PinchEnd
    info(NONE, Some(GestureType::PinchBegin)),
    // PinchUpdate
    info(CURRENT, Some(GestureType::PinchBegin)),
    // LongPress
    info(START, None),
    // LongTap
    info(START_CURRENT, None),
    // Swipe
    info(START, Some(GestureType::ScrollBegin)),
    // ShowPress
    info(START, None),
    // FlingStart
    info(NONE, Some(GestureType::ScrollUpdate)),
    // FlingCancel
    info(NONE, Some(GestureType::FlingStart)),
];

/// The disposition rule for `kind`.
#[inline]
pub fn disposition_info(kind: GestureType) -> DispositionHandlingInfo {
    DISPOSITION_TABLE[kind.index()]
}

/// A set of gesture kinds, one bit per [`GestureType::index`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GestureTypeSet(u32);

impl GestureTypeSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns `true` if `kind` is in the set.
    #[inline]
    pub const fn contains(self, kind: GestureType) -> bool {
        self.0 & Self::bit(kind) != 0
    }

    /// Add or remove `kind`.
    #[inline]
    pub fn set(&mut self, kind: GestureType, present: bool) {
        if present {
            self.0 |= Self::bit(kind);
        } else {
            self.0 &= !Self::bit(kind);
        }
    }

    /// Returns `true` if no kind is in the set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    const fn bit(kind: GestureType) -> u32 {
        1 << kind.index()
    }
}

/// Consumption verdicts for one touch sequence.
///
/// The default value is the state of a fresh sequence; the filter resets to it
/// whenever a sequence is retired.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GestureHandlingState {
    start_touch_consumed: bool,
    current_touch_consumed: bool,
    last_gesture_of_type_dropped: GestureTypeSet,
}

impl GestureHandlingState {
    /// Record the application's verdict for the current touch.
    ///
    /// Once a start touch is consumed, the start stays consumed for the rest
    /// of the sequence.
    pub fn on_touch_event_ack(&mut self, event_consumed: bool, is_touch_start_event: bool) {
        self.current_touch_consumed = event_consumed;
        if event_consumed && is_touch_start_event {
            self.start_touch_consumed = true;
        }
    }

    /// Whether a gesture of `kind` must be dropped.
    ///
    /// Records the answer so that later kinds naming `kind` as their
    /// antecedent follow it.
    pub fn filter(&mut self, kind: GestureType) -> bool {
        let DispositionHandlingInfo {
            required_touches,
            antecedent,
        } = disposition_info(kind);

        let dropped = (required_touches.contains(RequiredTouches::START)
            && self.start_touch_consumed)
            || (required_touches.contains(RequiredTouches::CURRENT) && self.current_touch_consumed)
            || antecedent.is_some_and(|a| self.last_gesture_of_type_dropped.contains(a));

        self.last_gesture_of_type_dropped.set(kind, dropped);
        dropped
    }

    /// Whether the start touch of the sequence was consumed.
    #[inline]
    pub fn start_touch_consumed(&self) -> bool {
        self.start_touch_consumed
    }

    /// Whether the most recently acked touch was consumed.
    #[inline]
    pub fn current_touch_consumed(&self) -> bool {
        self.current_touch_consumed
    }

    /// Whether the most recent gesture of `kind` was dropped.
    #[inline]
    pub fn was_dropped(&self, kind: GestureType) -> bool {
        self.last_gesture_of_type_dropped.contains(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_forwards_everything() {
        let mut state = GestureHandlingState::default();
        for kind in GestureType::ALL {
            assert!(!state.filter(kind), "{kind} dropped in a fresh state");
        }
    }

    #[test]
    fn table_matches_disposition_rules() {
        use GestureType::*;
        let expected = [
            (TapDown, START, None),
            (TapCancel, START, None),
            (ShowPress, START, None),
            (LongPress, START, None),
            (LongTap, START_CURRENT, None),
            (Tap, START_CURRENT, Some(TapUnconfirmed)),
            (TapUnconfirmed, START_CURRENT, None),
            (DoubleTap, START_CURRENT, Some(TapUnconfirmed)),
            (ScrollBegin, START, None),
            (ScrollUpdate, CURRENT, Some(ScrollBegin)),
            (ScrollEnd, NONE, Some(ScrollBegin)),
            (FlingStart, NONE, Some(ScrollUpdate)),
            (FlingCancel, NONE, Some(FlingStart)),
            (PinchBegin, START, Some(ScrollBegin)),
            (PinchUpdate, CURRENT, Some(PinchBegin)),
            (PinchEnd, NONE, Some(PinchBegin)),
            (GestureBegin, START, None),
            (GestureEnd, NONE, Some(GestureBegin)),
            (Swipe, START, Some(ScrollBegin)),
            (TwoFingerTap, START, None),
        ];
        assert_eq!(expected.len(), GestureType::COUNT);
        for (kind, required, antecedent) in expected {
            assert_eq!(
                disposition_info(kind),
                info(required, antecedent),
                "wrong rule for {kind}"
            );
        }
    }

    #[test]
    fn start_consumption_is_sticky() {
        let mut state = GestureHandlingState::default();
        state.on_touch_event_ack(true, true);
        state.on_touch_event_ack(false, false);
        assert!(state.start_touch_consumed());
        assert!(!state.current_touch_consumed());
        assert!(state.filter(GestureType::TapDown));
        assert!(!state.filter(GestureType::FlingCancel));
    }

    #[test]
    fn consumed_non_start_touch_does_not_mark_start() {
        let mut state = GestureHandlingState::default();
        state.on_touch_event_ack(true, false);
        assert!(!state.start_touch_consumed());
        assert!(state.current_touch_consumed());
        assert!(!state.filter(GestureType::ScrollBegin));
        assert!(state.filter(GestureType::ScrollUpdate));
    }

    #[test]
    fn dropped_antecedent_drops_dependents() {
        let mut state = GestureHandlingState::default();
        state.on_touch_event_ack(true, true);
        assert!(state.filter(GestureType::ScrollBegin));

        // Later touches are not consumed, but the scroll never began.
        state.on_touch_event_ack(false, false);
        assert!(state.filter(GestureType::ScrollUpdate));
        assert!(state.filter(GestureType::ScrollEnd));
        assert!(state.filter(GestureType::FlingStart));
        assert!(state.filter(GestureType::FlingCancel));
    }

    #[test]
    fn forwarded_instance_clears_dropped_record() {
        let mut state = GestureHandlingState::default();
        state.on_touch_event_ack(true, false);
        assert!(state.filter(GestureType::ScrollUpdate));
        assert!(state.was_dropped(GestureType::ScrollUpdate));

        state.on_touch_event_ack(false, false);
        assert!(!state.filter(GestureType::ScrollUpdate));
        assert!(!state.was_dropped(GestureType::ScrollUpdate));
        assert!(!state.filter(GestureType::FlingStart));
    }

    #[test]
    fn type_set_tracks_individual_kinds() {
        let mut set = GestureTypeSet::empty();
        assert!(set.is_empty());
        set.set(GestureType::FlingCancel, true);
        set.set(GestureType::ScrollBegin, true);
        assert!(set.contains(GestureType::FlingCancel));
        assert!(set.contains(GestureType::ScrollBegin));
        assert!(!set.contains(GestureType::Tap));
        set.set(GestureType::FlingCancel, false);
        assert!(!set.contains(GestureType::FlingCancel));
        assert!(!set.is_empty());
    }
}

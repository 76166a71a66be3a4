// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_touch_disposition --heading-base-level=0

//! Understory Touch Disposition: reconcile touch acks with speculatively recognized gestures.
//!
//! Gesture recognition runs before the application has seen the touches the
//! gestures come from. If the application then consumes a touch (for example a
//! page handling its own touch events), the gestures recognized from it must not
//! reach the application as well. This crate sits between the recognizer and the
//! application and makes that call once the verdict is known.
//!
//! - [`GestureHandlingState`]: per-sequence verdicts and the per-kind rules that
//!   decide whether a gesture is dropped.
//! - [`TouchDispositionGestureFilter`]: queues gesture packets per touch
//!   sequence, replays them as touch acks arrive, and keeps the forwarded stream
//!   well formed by synthesizing tap cancels, scroll ends and fling cancels.
//! - [`GestureFilterClient`]: where surviving gestures go.
//!
//! ## Workflow
//!
//! 1) For every touch event, the recognizer produces a
//!    [`GestureEventDataPacket`](understory_gesture::GestureEventDataPacket);
//!    pass it to [`TouchDispositionGestureFilter::on_gesture_packet`].
//! 2) Dispatch the touch event to the application.
//! 3) When the application has handled it, call
//!    [`TouchDispositionGestureFilter::on_touch_event_ack`] with whether it was consumed.
//!    The filter forwards the surviving gestures to its client.
//!
//! Timeout packets (long press, show press) need no ack of their own: they are
//! released together with the touch packet queued before them, or immediately if
//! nothing is waiting.
//!
//! ## Logging
//!
//! The filter reports rejected packets and ignored acks at `debug` level and
//! every queued, dropped, synthesized and forwarded gesture at `trace` level
//! through [`tracing`]. No subscriber is installed by this crate.
//!
//! ## Features
//!
//! - `std` (default): forwards to the `std` features of dependencies.
//! - `libm`: forwards to `kurbo/libm` for `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod client;
mod filter;
mod state;

pub use client::GestureFilterClient;
pub use filter::{PacketError, TouchDispositionGestureFilter};
pub use state::{
    DispositionHandlingInfo, GestureHandlingState, GestureTypeSet, RequiredTouches,
    disposition_info,
};

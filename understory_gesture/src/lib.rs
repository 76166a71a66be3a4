// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: value types for recognized touch gestures.
//!
//! This crate describes what a gesture recognizer emits. It does not recognize
//! gestures itself, and it does not decide whether they reach the application;
//! see `understory_touch_disposition` for the latter.
//!
//! - [`GestureType`]: the closed set of gesture kinds, each with a stable ordinal.
//! - [`GestureEventDetails`]: a tagged union of per-kind payloads (scroll deltas,
//!   fling velocity, pinch scale, tap count, ...) plus shared attributes.
//! - [`GestureEventData`]: details plus the motion event, tool, time and
//!   location they are attributed to.
//! - [`GestureEventDataPacket`]: the ordered gestures recognized from one touch
//!   event or timeout, tagged with a [`GestureSource`].
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_gesture::{
//!     EventFlags, GestureEventData, GestureEventDataPacket, GestureEventDetails,
//!     GestureSource, GestureType, ToolType,
//! };
//!
//! let location = Point::new(10.0, 20.0);
//! let mut packet = GestureEventDataPacket::from_touch(
//!     GestureSource::TouchSequenceStart,
//!     1_000,
//!     location,
//!     location,
//! );
//! packet.push(GestureEventData::new(
//!     GestureEventDetails::new(GestureType::TapDown),
//!     1,
//!     ToolType::Finger,
//!     1_000,
//!     location,
//!     location,
//!     1,
//!     Rect::from_center_size(location, (4.0, 4.0)),
//!     EventFlags::empty(),
//! ));
//!
//! assert_eq!(packet.gesture_count(), 1);
//! assert_eq!(packet.gesture(0).kind(), GestureType::TapDown);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` builds.
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(test)]
extern crate alloc;

mod data;
mod details;
mod kind;
mod packet;

pub use data::{EventFlags, GestureEventData};
pub use details::{GestureEventDetails, SwipeDirection};
pub use kind::{GestureDeviceType, GestureType, ToolType};
pub use packet::{GestureEventDataPacket, GestureSource, TouchAction};

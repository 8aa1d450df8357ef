//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! CSB and OBJ conversions
//!
//! - CSB (binary) - Collision meshes as shipped with the game
//! - OBJ (text) - Editable meshes with labelled vertex groups

mod csb_to_obj;
mod obj_to_csb;
mod verify;

pub use csb_to_obj::{csb_to_obj, csb_to_obj_with_progress};
pub use obj_to_csb::{obj_to_csb, obj_to_csb_with_progress};
pub use verify::{RoundTripReport, verify_round_trip};

//! Fixed limits of the version space
//!
//! Released class versions are small integers starting at 1. Velocity
//! features (in-progress capabilities that do not have a release number yet)
//! are numbered from a reserved range above every released version.
//!
//! ## Contract
//!
//! The velocity range is FROZEN at compile time. It is not a configuration
//! knob: generated descriptions embed these numbers, so changing the range
//! renumbers every velocity interface. Exhausting it is a build-time fatal
//! error surfaced through `ProjectionError::VelocityCapacityExhausted`.

/// First version number reserved for velocity features
pub const VELOCITY_VERSION_BASE: u32 = 0x0001_0000;

/// Number of velocity features a single generation run can allocate
pub const MAX_VELOCITY_FEATURES: u32 = 256;

/// One past the last version number reserved for velocity features
pub const VELOCITY_VERSION_END: u32 = VELOCITY_VERSION_BASE + MAX_VELOCITY_FEATURES;

/// The first released version of every class
pub const INITIAL_VERSION: u32 = 1;

/// Check whether a version number lies in the velocity range
#[inline]
pub const fn is_velocity_version(version: u32) -> bool {
    version >= VELOCITY_VERSION_BASE && version < VELOCITY_VERSION_END
}

/// Version number for the velocity slot at `slot`
///
/// Returns `None` when the slot is outside the fixed capacity.
#[inline]
pub const fn velocity_version_for_slot(slot: u32) -> Option<u32> {
    if slot < MAX_VELOCITY_FEATURES {
        Some(VELOCITY_VERSION_BASE + slot)
    } else {
        None
    }
}

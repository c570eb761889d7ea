//! The timezone the service lives in.
//!
//! Wire timestamps carry no offset, so every one of them is read as wall-clock
//! time in this zone, and academic years start and end by its calendar.

use chrono_tz::Tz;

/// Europe/London, with its GMT/BST daylight-saving rules.
pub const SERVICE_ZONE: Tz = chrono_tz::Europe::London;

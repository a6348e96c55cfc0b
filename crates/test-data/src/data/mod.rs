//! Static data tables for generation.
//!
//! Compile-time constant pools; nothing here is loaded or re-read at runtime.

pub mod names;
pub mod presets;

pub use names::{FIRST_NAMES, LAST_NAMES, guest_email, random_full_name, random_name_pair};
pub use presets::{NeedDetails, Preset, PresetType, find_preset};

//! # netgrid core
//!
//! Interface discovery and vendor resolution.
//!
//! * [`system`] and [`mock`] produce raw interface facts.
//! * [`normalizer`] and [`filter`] turn them into canonical records.
//! * [`vendors`] maps MAC prefixes to manufacturer names.
//! * [`collector`] ties one pass together.

pub mod collector;
pub mod filter;
pub mod mock;
pub mod normalizer;
pub mod system;
pub mod vendors;

pub use collector::Collector;

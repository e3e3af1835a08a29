pub mod collection;
pub mod interface;
pub mod mac;
pub mod raw;

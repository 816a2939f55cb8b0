//! Encoding channels: the capability table, definitions and the encoding builder.

pub mod builder;
pub mod capability;
pub mod def;

pub use builder::{ChannelSpec, Encoding, EncodingBuilder};
pub use capability::{CHANNELS, ChannelCapability, FIELD_KEYS, channel};
pub use def::ChannelDef;

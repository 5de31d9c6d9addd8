/// MPRIS media player session control
pub mod mpris;

pub use mpris::{Controller, MediaBus, ZbusMediaBus};

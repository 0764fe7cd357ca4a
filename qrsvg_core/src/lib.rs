mod canvas;
mod data;
mod meta;
pub mod qrstandard;

pub use canvas::{Module, ModuleMatrix};
pub use data::{Mode, Segment};
pub use meta::{Ecl, Version};

pub mod format;
pub mod quantize;
pub mod encode;
pub mod decode;
pub mod render;

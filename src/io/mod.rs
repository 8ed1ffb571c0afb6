mod byte_buffer;

pub use byte_buffer::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, ByteBuffer};

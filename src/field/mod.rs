pub mod buffer;
pub mod grid;
pub mod io;
pub mod mask;
pub mod stack;

pub use self::buffer::Field2;
pub use self::grid::{FieldMeta, GridField};
pub use self::mask::Mask;
pub use self::stack::FieldStack;

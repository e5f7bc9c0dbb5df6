pub mod testing;
pub mod value;

pub use value::{as_row, for_each_until, is_nil, omit, type_name};

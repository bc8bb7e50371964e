mod table_stream;

pub use table_stream::{TableStream, iter_table};

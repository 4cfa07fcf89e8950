pub mod csv_codec;
pub mod xlsx;

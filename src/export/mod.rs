mod csv_io;

pub use csv_io::{read_csv, write_csv, ExportError};

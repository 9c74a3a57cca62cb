/// Filesystem adapters for file I/O operations
mod file_writer;
mod response_reader;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use response_reader::ResponseFileReader;

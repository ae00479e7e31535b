//! Alert sink backends.

mod email;
mod file;
mod job_list;
mod writer;

pub use email::{EmailSink, DEFAULT_FROM, DEFAULT_SERVER, DEFAULT_SUBJECT};
pub use file::FileSink;
pub use job_list::JobListSink;
pub use writer::{ConsoleSink, WriterSink};

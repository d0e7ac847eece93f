//!  Local persistence of work logs, organized through [log_store::JsonFileStore].
//!  The basic idea is:
//!   - There is an application directory with a single log file.
//!   - The file holds the full collection as a JSON array.
//!   - Entries are never updated in place, new ones are appended to the collection.

pub mod entities;
pub mod log_store;

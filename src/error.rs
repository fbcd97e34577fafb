use std::error;
use std::fmt::{self, Display};

use engine::Location;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// No derivation covered the input. `location` is where the parse got
    /// furthest before failing.
    Parse { location: Location, message: String },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Parse {
                ref location,
                ref message,
            } => write!(f, "failed to parse: {} at {}", message, location),
        }
    }
}

impl error::Error for Error {}

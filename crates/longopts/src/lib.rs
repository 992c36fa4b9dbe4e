//! Getopt::Long style option parsing with a chained builder.
//!
//! Options are registered against caller-owned [`Slot`]s. A scan reads
//! `--name` / `--name=value` / `--name value` tokens from the front of the
//! argument list and returns whatever follows them:
//!
//! ```
//! use longopts::{Opts, Slot};
//!
//! let data = Slot::new(String::from("file.dat"));
//! let length = Slot::new(24i64);
//! let verbose = Slot::new(false);
//!
//! let rest = Opts::new()
//!     .int_option("length", &length)
//!     .string_option("files", &data)
//!     .simple_option("verbose", &verbose)
//!     .scan(&["--files=hello.world", "--length", "10", "--verbose", "rest"])
//!     .unwrap();
//!
//! assert_eq!(length.get(), 10);
//! assert_eq!(data.get(), "hello.world");
//! assert!(verbose.get());
//! assert_eq!(rest, ["rest"]);
//! ```
//!
//! Syntax:
//! - only long options; there is no `-x` form
//! - a bare `--` ends option processing, everything after it is returned as is
//! - negatable flags accept `--name` and `--noname`
//! - an optional-argument option stores its default when it is followed by
//!   nothing, by `--`, or by another `--option`
//!
//! Slots are written only after the whole argument list has been accepted. If
//! anything fails, no slot changes and the error carries the input unchanged.

mod descriptor;
mod error;
mod process;
mod registry;
mod scan;
mod slot;
mod value;

pub use descriptor::{Arity, Descriptor, Shape};
pub use error::{OptsError, OptsResult, ScanFailure};
pub use registry::{NEGATION_PREFIX, Opts, is_negated_pair, negated_name};
pub use scan::OPTION_PREFIX;
pub use slot::{Slot, SlotId};
pub use value::{Decode, DecodeError, Value, ValueKind, decode};

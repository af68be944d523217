//! Offset-addressed file I/O.
//!
//! Every call names its own absolute offset, so a single file handle can be
//! shared by any number of threads reading or writing disjoint ranges without
//! racing on a file cursor.
//!
//! * [`PositionalRead`] / [`PositionalWrite`] are the capability traits, with
//!   implementations for [`std::fs::File`] on Unix and Windows
//! * [`read_at`] fills a buffer up to end-of-file
//! * [`write_at`] writes a buffer completely or fails
//!
//! # Example
//!
//! ```rust,ignore
//! use fastcopy_io::{read_at, write_at};
//!
//! let mut buf = vec![0u8; 4096];
//! let n = read_at(&source, &mut buf, offset)?;
//! write_at(&destination, &buf[..n], offset)?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod ops;
mod positional;

pub use error::OffsetIoError;
pub use ops::{read_at, write_at};
pub use positional::{PositionalRead, PositionalWrite};

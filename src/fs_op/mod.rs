//! Filesystem primitives used by fixtures.
//!
//! Each submodule is a thin wrapper over `std::fs` returning `io::Result`, so
//! the fixture layer can attach paths and operation names to failures.

pub mod copy;
pub mod create;
pub mod mv;
pub mod path;
pub mod remove;
pub mod stat;
pub mod symlink;

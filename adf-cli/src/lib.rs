//! Library side of the `adf` binary: the inspect transforms, shared with tests.

pub mod transforms;

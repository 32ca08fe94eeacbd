//! Authentication & Authorization

pub(crate) mod middleware;
mod policy;

pub(crate) use policy::*;

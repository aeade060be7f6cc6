//! CLI command implementations

pub(crate) mod common;
pub(crate) mod fetch;
pub(crate) mod history;
pub(crate) mod init;

//! # CLI Command Implementations
//!
//! Each subcommand of `gitops-preview` lives in its own file, with:
//! - an `Args` struct derived using `clap`;
//! - an `execute` function that calls into the `gitops_preview` library and
//!   prints the result.

pub mod app;
pub mod completions;

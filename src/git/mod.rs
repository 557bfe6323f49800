// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!        Public API
//!     query.rs  cmd.rs
//!        \        /
//!         v      v
//!   ,------------------,
//!   | backend (traits) |
//!   '--+----------+----'
//!      |          |
//!      v          v
//! GitQuery    GitMutation
//! (gix, read)  (CLI, write)
//!      |          |
//!      v          v
//! GixBackend  ShellBackend
//! .is_repo    .clone/fetch
//! .branch     .hard_reset
//! .dirty      .checkout
//!             .branches
//!             .behind
//! ```
//!
//! **`GixBackend`** — pure Rust, no subprocess, read-only.
//! **`ShellBackend`** — git CLI for remotes, credentials, and writes.

pub mod backend;
pub mod cmd;
pub mod query;

#[cfg(test)]
mod tests;

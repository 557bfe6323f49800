// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        list / status / update / ..
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML, instance registry  |
//!              '-----+-------------+-------'
//!                    |             |
//!                    v             v
//!                instance ----> addon
//!              GameInstance    entity + observers
//!                                  |
//!                      +-----------+-----------+
//!                      v                       v
//!                    git                    manifest
//!                 gix / CLI                TOC parser
//!                      |
//!                      v
//!                   install
//!              clone transaction
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod addon;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod git;
pub mod install;
pub mod instance;
pub mod logging;
pub mod manifest;

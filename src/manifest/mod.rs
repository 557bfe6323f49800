// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! TOC manifest parsing.
//!
//! ```text
//! <AddOns>/<Name>/<Name>.toc
//!        |
//!        v
//!   read_manifest --> extract_value("Version") --> Option<String>
//! ```
//!
//! Every WoW addon ships a `<Name>.toc` manifest whose metadata lines
//! look like `## Key: Value`. Only the keys we need are extracted; the
//! rest of the file (load order, saved variables) is ignored.

use regex::Regex;
use std::path::Path;
use tracing::debug;

/// Extract the value following the first `<key>:` occurrence.
///
/// Matching is case-sensitive and tolerant of whitespace around the
/// colon. The value runs to the end of the line and is returned
/// trimmed. Returns `None` only when the key is absent.
#[must_use]
pub fn extract_value(content: &str, key: &str) -> Option<String> {
    let pattern = format!(r"{}\s*:\s*([^\r\n]*)", regex::escape(key));
    let re = Regex::new(&pattern).ok()?;
    let value = re.captures(content)?.get(1)?.as_str().trim();
    Some(value.to_string())
}

/// Read the declared version from an addon's TOC manifest.
///
/// The manifest is expected at `<addon_dir>/<name>.toc` where `name`
/// is the directory's file name. A missing or unreadable manifest, or
/// one without a `## Version:` line, yields `None` - the addon is
/// still manageable, it just has no self-declared version.
#[must_use]
pub fn declared_version(addon_dir: &Path) -> Option<String> {
    let name = addon_dir.file_name()?.to_str()?;
    let toc_path = addon_dir.join(format!("{name}.toc"));

    let content = match std::fs::read_to_string(&toc_path) {
        Ok(content) => content,
        Err(e) => {
            debug!("no readable manifest at {}: {e}", toc_path.display());
            return None;
        }
    };

    extract_value(&content, "Version")
}

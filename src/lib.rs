// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Maintenance helpers for the Midnight Commander documentation.
//!
//! The man pages under `doc/` are written in roff and end up being
//! rendered by different roff implementations. The [`validate`] module
//! renders every section 1 page with both groff and nroff, collects
//! their warnings and adds a few textual checks for escapes which are
//! not portable. See [`checks`] for those.
//!
//! The `mc-doctest` binary runs all of this over the source tree it is
//! started in.

use std::path::PathBuf;

use render::RenderCommand;

pub mod checks;
pub mod diagnostic;
pub mod manpage;
pub mod render;
pub mod validate;

pub use diagnostic::{Diagnostic, Error, Verdict};
pub use manpage::ManPage;
pub use validate::Validator;

/// Where to find the man pages and how to render them.
///
/// Paths are relative to the root of the source tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// File whose presence identifies the root of the source tree.
    pub root_marker: PathBuf,
    /// Directory searched for man pages.
    pub doc_dir: PathBuf,
    /// Directory holding the untranslated man pages.
    pub base_man_dir: PathBuf,
    /// Renderers whose warnings are reported for every page.
    pub renderers: Vec<RenderCommand>,
    /// Renderer used to check untranslated pages for non-ASCII input.
    pub ascii_renderer: RenderCommand,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_marker: PathBuf::from("doc/man/mc.1.in"),
            doc_dir: PathBuf::from("doc"),
            base_man_dir: PathBuf::from("doc/man"),
            renderers: vec![RenderCommand::groff(), RenderCommand::nroff()],
            ascii_renderer: RenderCommand::groff_ascii(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.root_marker.starts_with(&config.base_man_dir));
        assert!(config.base_man_dir.starts_with(&config.doc_dir));
        assert_eq!(
            config
                .renderers
                .iter()
                .map(|command| command.program.as_str())
                .collect::<Vec<_>>(),
            vec!["groff", "nroff"]
        );
    }
}

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

//! Checking every man page of the documentation tree.

use std::path::Path;

use log::{debug, info};

use crate::checks::content_checks;
use crate::diagnostic::{Diagnostic, Verdict};
use crate::manpage::{find_man_pages, ManPage};
use crate::render::{warning_lines, Renderer};
use crate::Config;

/// Runs the renderer and content checks over man pages.
pub struct Validator<R> {
    config: Config,
    renderer: R,
}

impl<R: Renderer> Validator<R> {
    pub fn new(config: Config, renderer: R) -> Self {
        Self { config, renderer }
    }

    /// Checks all man pages below the documentation directory of `root`.
    ///
    /// Pages are checked one at a time. A renderer failure aborts the run.
    pub fn run(&self, root: &Path) -> anyhow::Result<Verdict> {
        let base_dir = root.join(&self.config.base_man_dir);
        let mut verdict = Verdict::new();
        for path in find_man_pages(&root.join(&self.config.doc_dir))? {
            info!(
                "Checking {}",
                path.strip_prefix(root).unwrap_or(path.as_path()).display()
            );
            let page = ManPage::read(&path)?;
            verdict.merge(self.check_page(&page, &base_dir)?);
        }
        Ok(verdict)
    }

    /// Checks a single page.
    ///
    /// Pages directly in `base_dir` are the untranslated sources and are
    /// additionally required to be pure ASCII.
    pub fn check_page(&self, page: &ManPage, base_dir: &Path) -> anyhow::Result<Verdict> {
        let mut verdict = Verdict::new();

        for command in &self.config.renderers {
            let output = self.renderer.render(command, &page.path)?;
            verdict.extend(
                warning_lines(&output)
                    .into_iter()
                    .map(Diagnostic::RenderWarning),
            );
        }

        verdict.extend(content_checks(page));

        if page.is_base_language(base_dir) {
            debug!("Checking {} for non-ASCII input", page.path.display());
            let output = self.renderer.render(&self.config.ascii_renderer, &page.path)?;
            verdict.extend(
                warning_lines(&output)
                    .into_iter()
                    .map(Diagnostic::RenderWarning),
            );
        }

        Ok(verdict)
    }
}

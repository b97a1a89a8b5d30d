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

//! Locating the repository and its section 1 man pages.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use walkdir::WalkDir;

use crate::diagnostic::Error;

/// One-based line number of the first line of [`ManPage::body`].
const BODY_START_LINE: usize = 2;

/// Suffix of the untranslated man page sources.
const BASE_LANGUAGE_SUFFIX: &str = ".1.in";

/// A man page read from disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManPage {
    pub path: PathBuf,
    pub text: String,
}

impl ManPage {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Reads the page at `path`.
    ///
    /// Invalid UTF-8 is replaced rather than rejected: translated pages
    /// may be in legacy encodings and the renderers will complain about
    /// those on their own.
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("Could not read {}", path.display()))?;
        Ok(Self::new(path, String::from_utf8_lossy(&bytes)))
    }

    /// The page without its first line.
    ///
    /// The first line is the `.TH` (or `.\"` coding) header and is never
    /// scanned for markup problems.
    pub fn body(&self) -> &str {
        match self.text.split_once('\n') {
            Some((_, body)) => body,
            None => "",
        }
    }

    /// Translates a byte offset into [`body`](Self::body) into a one-based
    /// line number of the whole page.
    pub fn line_of(&self, body_offset: usize) -> usize {
        let body = self.body();
        let offset = body_offset.min(body.len());
        let newlines = body.as_bytes()[..offset]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        BODY_START_LINE + newlines
    }

    /// Whether this is an untranslated page living directly in `base_dir`.
    pub fn is_base_language(&self, base_dir: &Path) -> bool {
        let in_base_dir = self.path.parent() == Some(base_dir);
        let untranslated = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(BASE_LANGUAGE_SUFFIX));
        in_base_dir && untranslated
    }
}

/// Walks up from `start` until a directory containing `marker` is found.
pub fn find_root(start: &Path, marker: &Path) -> Result<PathBuf, Error> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::RootNotFound {
            marker: marker.to_path_buf(),
            start: start.to_path_buf(),
        })
}

/// Whether a file name looks like a section 1 man page, e.g. `mc.1.in`.
pub fn is_man_page_name(name: &str) -> bool {
    name.contains(".1.")
}

/// Returns all section 1 man pages below `doc_dir`, sorted by path.
pub fn find_man_pages(doc_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut pages = Vec::new();
    for entry in WalkDir::new(doc_dir) {
        let entry = entry.with_context(|| format!("Could not walk {}", doc_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_str().is_some_and(is_man_page_name) {
            pages.push(entry.into_path());
        }
    }
    pages.sort();
    Ok(pages)
}

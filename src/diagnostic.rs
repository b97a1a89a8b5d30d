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

//! Diagnostics reported by the man page validator and the verdict
//! collecting them.

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use thiserror::Error;

/// One problem found in a man page.
///
/// Diagnostics are compared by value, so two checks reporting the same
/// problem collapse into a single entry of a [`Verdict`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Diagnostic {
    /// A `warning:` line printed by one of the roff renderers.
    ///
    /// The line is kept verbatim: groff, nroff and the ASCII render
    /// frequently print the very same warning, which should only be
    /// reported once.
    RenderWarning(String),

    /// A forbidden escape sequence such as `\\` in the page body.
    ForbiddenEscape {
        path: PathBuf,
        line: usize,
        pattern: &'static str,
    },

    /// A bare `-` which should have been written as `\-`.
    UnescapedDash { path: PathBuf, line: usize },

    /// A `\"` which is not part of a `.\"` comment.
    EscapedQuote { path: PathBuf, line: usize },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Diagnostic::RenderWarning(warning) => write!(f, "{warning}"),
            Diagnostic::ForbiddenEscape {
                path,
                line,
                pattern,
            } => write!(
                f,
                "{}:{line}: forbidden escape sequence `{pattern}`",
                path.display()
            ),
            Diagnostic::UnescapedDash { path, line } => {
                write!(f, "{}:{line}: unescaped dash, use `\\-`", path.display())
            }
            Diagnostic::EscapedQuote { path, line } => write!(
                f,
                "{}:{line}: escaped quote outside of a `.\\\"` comment",
                path.display()
            ),
        }
    }
}

/// The de-duplicated set of diagnostics found during a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Verdict {
    diagnostics: BTreeSet<Diagnostic>,
}

impl Verdict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds another verdict into this one.
    pub fn merge(&mut self, other: Verdict) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Turns a non-empty verdict into [`Error::Diagnostics`].
    pub fn into_result(self) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Diagnostics(self))
        }
    }
}

impl Extend<Diagnostic> for Verdict {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.diagnostics.extend(iter);
    }
}

impl FromIterator<Diagnostic> for Verdict {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        Self {
            diagnostics: iter.into_iter().collect(),
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

/// Errors which end a validation run.
#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Could not find {} in {} or any parent directory",
        .marker.display(),
        .start.display()
    )]
    RootNotFound { marker: PathBuf, start: PathBuf },
    #[error("Found {} problem(s) in the man pages:\n{0}", .0.len())]
    Diagnostics(Verdict),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dash(line: usize) -> Diagnostic {
        Diagnostic::UnescapedDash {
            path: PathBuf::from("doc/man/mc.1.in"),
            line,
        }
    }

    #[test]
    fn test_identical_warnings_collapse() {
        let warning = "troff: mc.1.in:10: warning: macro 'XX' not defined";
        let mut verdict = Verdict::new();
        verdict.extend([
            Diagnostic::RenderWarning(warning.into()),
            Diagnostic::RenderWarning(warning.into()),
        ]);
        assert_eq!(verdict.len(), 1);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let first = Verdict::from_iter([dash(3), dash(5)]);
        let mut merged = first.clone();
        merged.merge(first.clone());
        assert_eq!(merged, first);
    }

    #[test]
    fn test_clean_verdict_is_ok() {
        assert!(Verdict::new().into_result().is_ok());
    }

    #[test]
    fn test_verdict_error_lists_every_diagnostic() {
        let verdict = Verdict::from_iter([
            dash(3),
            Diagnostic::RenderWarning("w: warning: x".into()),
        ]);
        let err = verdict.into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Found 2 problem(s) in the man pages:\n\
             w: warning: x\n\
             doc/man/mc.1.in:3: unescaped dash, use `\\-`\n"
        );
    }

    #[test]
    fn test_display_forbidden_escape() {
        let diagnostic = Diagnostic::ForbiddenEscape {
            path: PathBuf::from("doc/man/mcedit.1.in"),
            line: 7,
            pattern: r"\!",
        };
        assert_eq!(
            diagnostic.to_string(),
            r"doc/man/mcedit.1.in:7: forbidden escape sequence `\!`"
        );
    }
}

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

//! Textual markup checks.
//!
//! These checks look at the body of a man page only (see
//! [`ManPage::body`]) and never run a renderer.

use regex::Regex;
use std::sync::OnceLock;

use crate::diagnostic::Diagnostic;
use crate::manpage::ManPage;

/// Escape sequences which must not appear in a page body.
///
/// `\\` and `\.` are not portable between groff and mandoc, `\!` is
/// transparent output which a man page has no business with.
pub const FORBIDDEN_ESCAPES: [&str; 3] = [r"\\", r"\.", r"\!"];

/// Reports each forbidden escape sequence found in the page.
///
/// Every pattern is reported at most once per page, at its first
/// occurrence.
pub fn forbidden_escapes(page: &ManPage) -> Vec<Diagnostic> {
    let body = page.body();
    FORBIDDEN_ESCAPES
        .iter()
        .filter_map(|&pattern| {
            let offset = body.find(pattern)?;
            Some(Diagnostic::ForbiddenEscape {
                path: page.path.clone(),
                line: page.line_of(offset),
                pattern,
            })
        })
        .collect()
}

/// Reports a `-` standing on its own, e.g. `foo - bar`.
///
/// Hyphenated words (`foo-bar`) and escaped dashes (`foo\-bar`) are fine.
pub fn unescaped_dash(page: &ManPage) -> Vec<Diagnostic> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\B-\B").expect("well-formed regex"));

    re.find(page.body())
        .map(|m| Diagnostic::UnescapedDash {
            path: page.path.clone(),
            line: page.line_of(m.start()),
        })
        .into_iter()
        .collect()
}

/// Reports a `\"` which does not start a `.\"` comment line.
pub fn escaped_quote(page: &ManPage) -> Vec<Diagnostic> {
    static RE: OnceLock<Regex> = OnceLock::new();
    // No look-behind in `regex`, so the preceding character is part of
    // the match.
    let re = RE.get_or_init(|| Regex::new(r#"(?:^|[^.])\\""#).expect("well-formed regex"));

    re.find(page.body())
        .map(|m| Diagnostic::EscapedQuote {
            path: page.path.clone(),
            line: page.line_of(m.end() - r#"\""#.len()),
        })
        .into_iter()
        .collect()
}

/// Runs all checks which only need the text of the page.
pub fn content_checks(page: &ManPage) -> Vec<Diagnostic> {
    let mut diagnostics = forbidden_escapes(page);
    diagnostics.extend(unescaped_dash(page));
    diagnostics.extend(escaped_quote(page));
    diagnostics
}

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

//! Running man pages through roff renderers.

use std::fmt::{self, Display, Formatter};
use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context};
use log::debug;

/// A renderer invocation. The page is passed as the last argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl RenderCommand {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// groff with UTF-8 input and output and pedantic man/mdoc checks.
    pub fn groff() -> Self {
        Self::new(
            "groff",
            [
                "-b", "-z", "-ww", "-K", "utf8", "-T", "utf8", "-mandoc", "-rCHECKSTYLE=10",
            ],
        )
    }

    /// nroff with UTF-8 input and output.
    pub fn nroff() -> Self {
        Self::new("nroff", ["-ww", "-z", "-K", "utf8", "-T", "utf8", "-mandoc"])
    }

    /// groff producing strict ASCII and warning about any other input.
    pub fn groff_ascii() -> Self {
        Self::new(
            "groff",
            [
                "-b", "-z", "-ww", "-w", "input", "-K", "ascii", "-T", "ascii", "-mandoc",
            ],
        )
    }
}

impl Display for RenderCommand {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Something which can render a man page.
///
/// The validator only talks to renderers through this trait, which makes
/// it possible to test it without groff installed.
pub trait Renderer {
    /// Renders `page` and returns everything printed on stdout and stderr.
    ///
    /// A renderer which fails (as opposed to printing warnings) is an
    /// error.
    fn render(&self, command: &RenderCommand, page: &Path) -> anyhow::Result<String>;
}

/// Runs the renderers as child processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRenderer;

impl Renderer for ProcessRenderer {
    fn render(&self, command: &RenderCommand, page: &Path) -> anyhow::Result<String> {
        debug!("Running {command} {}", page.display());
        let output = Command::new(&command.program)
            .args(&command.args)
            .arg(page)
            .output()
            .with_context(|| format!("Could not run {}", command.program))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            bail!(
                "{} failed on {} ({}):\n{}",
                command.program,
                page.display(),
                output.status,
                combined.trim_end()
            );
        }
        Ok(combined)
    }
}

/// Returns the lines of renderer output which are warnings.
pub fn warning_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| line.contains("warning:"))
        .map(|line| line.trim_end().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_warning_lines() {
        let output = "\
troff: mc.1.in:12: warning: macro 'XY' not defined
some regular output
an.tmac: mc.1.in:40: style: blank line in input
troff: mc.1.in:80: warning [p 3, 1.2i]: cannot adjust line   \n";
        assert_eq!(
            warning_lines(output),
            vec![
                "troff: mc.1.in:12: warning: macro 'XY' not defined".to_string(),
            ]
        );
    }

    #[test]
    fn test_warning_lines_without_warnings() {
        assert_eq!(warning_lines(""), Vec::<String>::new());
        assert_eq!(warning_lines("all good\n"), Vec::<String>::new());
    }

    #[test]
    fn test_warning_lines_trims_trailing_whitespace() {
        assert_eq!(
            warning_lines("troff: x:1: warning: y  \r\n"),
            vec!["troff: x:1: warning: y".to_string()]
        );
    }

    #[test]
    fn test_display_command() {
        assert_eq!(
            RenderCommand::nroff().to_string(),
            "nroff -ww -z -K utf8 -T utf8 -mandoc"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_process_renderer_captures_stdout_and_stderr() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let page = tmpdir.path().join("mc.1.in");
        std::fs::write(&page, ".TH MC 1\n")?;
        let command = RenderCommand::new("sh", ["-c", "echo out; echo 'x: warning: y' >&2", "sh"]);
        let output = ProcessRenderer.render(&command, &page)?;
        assert_eq!(output, "out\nx: warning: y\n");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_process_renderer_failure_is_an_error() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let page = tmpdir.path().join("mc.1.in");
        std::fs::write(&page, ".TH MC 1\n")?;
        let command = RenderCommand::new("sh", ["-c", "echo broken >&2; exit 3", "sh"]);
        let err = ProcessRenderer.render(&command, &page).unwrap_err();
        assert!(err.to_string().starts_with("sh failed on"));
        assert!(err.to_string().ends_with("broken"));
        Ok(())
    }

    #[test]
    fn test_process_renderer_missing_program() {
        let command = RenderCommand::new("no-such-roff-renderer", Vec::<String>::new());
        let err = ProcessRenderer
            .render(&command, Path::new("mc.1.in"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Could not run no-such-roff-renderer");
    }
}

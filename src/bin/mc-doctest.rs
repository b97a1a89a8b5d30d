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

//! Check the man pages of the source tree.
//!
//! This program finds the root of the source tree from the current
//! directory, renders every section 1 man page under `doc/` with groff
//! and nroff and fails if either of them printed a warning or if a page
//! uses escapes which do not render the same everywhere. The English
//! pages must also be plain ASCII.
//!
//! It takes no arguments. Set `RUST_LOG=debug` to see the renderer
//! invocations.

use anyhow::Context;
use mc_maint_helpers::manpage::find_root;
use mc_maint_helpers::render::ProcessRenderer;
use mc_maint_helpers::{Config, Validator};

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"));

    let config = Config::default();
    let cwd = std::env::current_dir().context("Could not determine current directory")?;
    let root = find_root(&cwd, &config.root_marker)?;

    let validator = Validator::new(config, ProcessRenderer);
    let verdict = validator.run(&root)?;
    verdict.into_result()?;
    Ok(())
}

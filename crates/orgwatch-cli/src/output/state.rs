// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Write};

use console::style;

use super::Renderable;
use super::common::format_timestamp;
use crate::cli::OutputContext;
use crate::commands::types::{StateResetResult, StateShowResult};

impl Renderable for StateShowResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w)?;
        match &self.state.last_check {
            Some(last_check) => {
                writeln!(
                    w,
                    "{}  {}",
                    style("last check:").dim(),
                    style(format_timestamp(last_check)).bold()
                )?;
                writeln!(
                    w,
                    "{}  {}",
                    style("reported:").dim(),
                    self.state.last_repository_count
                )?;
            }
            None => {
                writeln!(w, "{}", style("No scan recorded yet.").yellow())?;
                writeln!(w, "The next `orgwatch scan` reports every repository.")?;
            }
        }
        writeln!(
            w,
            "{}  {}",
            style("state file:").dim(),
            self.path.display()
        )?;
        writeln!(w)?;
        Ok(())
    }
}

impl Renderable for StateResetResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(
            w,
            "{} {}",
            style("Last check cleared:").green(),
            self.path.display()
        )
    }
}

//! Display surface printing to a terminal

use std::io::{self, IsTerminal, Stdout, Write};

use cromrps_core::LinkId;
use cromrps_shell::DisplaySurface;

const LINK_STYLE: &str = "\x1b[4;34m";
const RESET: &str = "\x1b[0m";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Writes pages to `out`, links as `text [n]`.
///
/// Output errors are not reported; a broken terminal just shows nothing.
pub struct TerminalSurface<W: Write> {
    out: W,
    styled: bool,
    title: String,
}

impl TerminalSurface<Stdout> {
    pub fn stdout(title: &str) -> Self {
        let styled = io::stdout().is_terminal();
        Self::new(io::stdout(), styled, title)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, styled: bool, title: &str) -> Self {
        Self {
            out,
            styled,
            title: title.to_string(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn clear(&mut self) {
        if self.styled {
            let _ = write!(self.out, "{}", CLEAR_SCREEN);
        }
        let _ = writeln!(self.out, "===== {} =====", self.title);
    }

    fn append_text(&mut self, text: &str) {
        let _ = write!(self.out, "{}", text);
        if text.ends_with('\n') {
            let _ = self.out.flush();
        }
    }

    fn append_link(&mut self, id: LinkId, text: &str) {
        let _ = if self.styled {
            write!(self.out, "{}{}{} [{}]", LINK_STYLE, text, RESET, id)
        } else {
            write!(self.out, "{} [{}]", text, id)
        };
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            let _ = writeln!(self.out, "Loading...");
            let _ = self.out.flush();
        }
    }
}

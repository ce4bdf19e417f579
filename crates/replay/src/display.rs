use std::io::{self, Write};

use crate::vcs::Commit;

/// Line-oriented output for the replay loop.
///
/// Lines end in `\r\n` because raw mode turns off output post-processing.
pub struct Display<W: Write> {
    out: W,
}

impl<W: Write> Display<W> {
    pub fn new(out: W) -> Self {
        Display { out }
    }

    pub fn banner(&mut self) -> io::Result<()> {
        for line in [
            "Replay Mode",
            "-----------",
            "n → next",
            "p → previous",
            "q → quit",
            "",
        ] {
            write!(self.out, "{}\r\n", line)?;
        }
        self.out.flush()
    }

    pub fn commit(&mut self, commit: &Commit, position: (usize, usize)) -> io::Result<()> {
        let (current, total) = position;
        write!(
            self.out,
            "[{}/{}] {} {}\r\n",
            current, total, commit.hash, commit.message
        )?;
        self.out.flush()
    }

    pub fn error(&mut self, msg: &str) -> io::Result<()> {
        write!(self.out, "Error: {}\r\n", msg)?;
        self.out.flush()
    }

    pub fn restoring(&mut self) -> io::Result<()> {
        write!(self.out, "\r\nRestoring original state...\r\n")?;
        self.out.flush()
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

use std::io::{self, Write};

use colored::Colorize;

/// Print a success message with a green checkmark prefix.
pub fn success(out: &mut dyn Write, msg: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "✓".green(), msg)
}

/// Print a warning message with a yellow warning prefix.
pub fn warning(out: &mut dyn Write, msg: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "⚠".yellow(), msg)
}

/// Print an informational message with a blue info prefix.
pub fn info(out: &mut dyn Write, msg: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "ℹ".blue(), msg)
}

/// Print a bold header/section title.
pub fn header(out: &mut dyn Write, msg: &str) -> io::Result<()> {
    writeln!(out, "{}", msg.bold())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_keep_plain_text() {
        let mut buf: Vec<u8> = Vec::new();
        success(&mut buf, "done").unwrap();
        warning(&mut buf, "careful").unwrap();
        info(&mut buf, "fyi").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("done"));
        assert!(text.contains("careful"));
        assert!(text.contains("fyi"));
    }
}

//! Input helpers for interactive commands.

use std::io::BufRead;

/// Reads one trimmed line; `None` on end of input or a read error.
///
/// ```rust
/// use std::io::Cursor;
/// use holdem_cli::io_utils::read_stdin_line;
///
/// let mut input = Cursor::new(b"raise 40\n".to_vec());
/// assert_eq!(read_stdin_line(&mut input), Some("raise 40".to_string()));
/// assert_eq!(read_stdin_line(&mut input), None);
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

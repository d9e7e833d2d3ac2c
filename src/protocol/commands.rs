//! Module `commands`
//!
//! Parses frames received after a client has named itself. There is exactly
//! one in-band command, `/login <name>`; everything else is chat text.

/// Literal prefix of the rename command, trailing space included
pub const RENAME_PREFIX: &str = "/login ";

/// What a single frame asks the relay to do.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Rename to the trimmed, non-empty remainder after the prefix
    Rename(String),
    /// The prefix followed by nothing but whitespace
    EmptyRename,
    /// Chat text, untouched, to be fanned out
    Chat(String),
}

/// Decodes one frame as UTF-8, replacing invalid sequences.
///
/// A multi-byte character cut by the read buffer boundary decodes as U+FFFD.
pub fn decode_frame(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Classifies a decoded frame.
///
/// The prefix match is done on the raw frame, so leading whitespace turns a
/// rename into chat. Chat text keeps any trailing whitespace the client sent.
pub fn parse_command(frame: &str) -> Command {
    match frame.strip_prefix(RENAME_PREFIX) {
        Some(rest) => match rest.trim() {
            "" => Command::EmptyRename,
            name => Command::Rename(name.to_string()),
        },
        None => Command::Chat(frame.to_string()),
    }
}

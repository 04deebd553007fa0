//! Manifest line parser.
//!
//! Turns raw manifest lines into a [`CommandSet`]. Blank lines and `#`
//! comments are skipped; any other line must be either a single
//! hexadecimal inode token (delete) or six whitespace-separated fields
//! (update). A line with any other shape aborts the whole parse: a
//! corrupt manifest must not result in partial, misleading restoration.

use super::{Command, CommandSet, UpdateInfo};
use crate::utils::inode::inode_key;
use std::fmt;

/// A manifest line the parser could not understand.
#[derive(Debug)]
pub enum ParseError {
    /// Non-empty, non-comment line with a token count that is neither a
    /// bare inode nor a full update record.
    Malformed {
        /// 1-based line number in the manifest.
        line_number: usize,
        /// The offending line, trimmed.
        line: String,
    },
    /// The inode field was not valid hexadecimal.
    BadInode {
        /// 1-based line number in the manifest.
        line_number: usize,
        /// The offending inode token.
        token: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { line_number, line } => {
                write!(f, "Malformed manifest line {line_number}: {line:?}")
            }
            Self::BadInode { line_number, token } => {
                write!(
                    f,
                    "Invalid inode number {token:?} on manifest line {line_number}"
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses manifest lines into a [`CommandSet`].
///
/// When two lines name the same inode the later one overwrites the
/// earlier mapping entry.
///
/// # Errors
/// Returns a [`ParseError`] naming the offending line if any non-blank,
/// non-comment line is neither a bare hex inode nor a six-field record.
pub fn parse<'a, I>(lines: I) -> Result<CommandSet, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut commands = CommandSet::new();

    for (index, raw) in lines.into_iter().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let command = match tokens.as_slice() {
            [inode] => Command::Delete {
                inode: parse_inode(inode, line_number)?,
            },
            [inode, mode, user, group, timestamp, filename] => Command::Update {
                inode: parse_inode(inode, line_number)?,
                info: UpdateInfo {
                    mode_string: (*mode).to_string(),
                    user: (*user).to_string(),
                    group: (*group).to_string(),
                    timestamp: (*timestamp).to_string(),
                    filename: (*filename).to_string(),
                },
            },
            _ => {
                return Err(ParseError::Malformed {
                    line_number,
                    line: line.to_string(),
                });
            }
        };

        commands.insert(inode_key(command.inode()), command);
    }

    Ok(commands)
}

/// Parses a manifest inode token (base-16).
fn parse_inode(token: &str, line_number: usize) -> Result<u64, ParseError> {
    u64::from_str_radix(token, 16).map_err(|_| ParseError::BadInode {
        line_number,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignores_comments() {
        let parsed = parse(["# abc123"]).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_ignores_blank_lines() {
        let parsed = parse(["", "   ", "\t"]).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_single_inode_creates_delete_command() {
        let parsed = parse(["abc123"]).unwrap();
        assert_eq!(parsed["abc123"], Command::Delete { inode: 0xabc123 });
    }

    #[test]
    fn test_well_formed_line_creates_update_command() {
        let parsed =
            parse(["abc123 100644 user group 2014-04-30T10:11:12+01:00 /tmp/example.txt"]).unwrap();
        assert!(matches!(parsed["abc123"], Command::Update { .. }));
    }

    #[test]
    fn test_update_command_content() {
        let parsed =
            parse(["abc123 100644 user group 2014-04-30T10:11:12+01:00 /tmp/example.txt"]).unwrap();
        let Command::Update { inode, info } = &parsed["abc123"] else {
            panic!("expected update command");
        };
        assert_eq!(*inode, 0xabc123);
        assert_eq!(info.mode_string, "100644");
        assert_eq!(info.user, "user");
        assert_eq!(info.group, "group");
        assert_eq!(info.timestamp, "2014-04-30T10:11:12+01:00");
        assert_eq!(info.filename, "/tmp/example.txt");
    }

    #[test]
    fn test_extra_whitespace_is_ignored() {
        let minimal =
            parse(["abc123 100644 user group 2014-04-30T10:11:12+01:00 /tmp/example.txt"]).unwrap();
        let padded =
            parse(["  abc123  100644  user\tgroup  2014-04-30T10:11:12+01:00   /tmp/example.txt "])
                .unwrap();
        assert_eq!(minimal, padded);
    }

    #[test]
    fn test_malformed_line_aborts_parse() {
        let err = parse(["abc123 100644 user group"]).unwrap_err();
        let ParseError::Malformed { line_number, line } = err else {
            panic!("expected malformed error");
        };
        assert_eq!(line_number, 1);
        assert_eq!(line, "abc123 100644 user group");
    }

    #[test]
    fn test_malformed_line_reports_its_number() {
        let err = parse([
            "# header",
            "abc123",
            "not a valid line at all here now",
        ])
        .unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line_number: 3, .. }));
    }

    #[test]
    fn test_non_hex_inode_is_rejected() {
        let err = parse(["zzz999"]).unwrap_err();
        assert!(matches!(err, ParseError::BadInode { .. }));
    }

    #[test]
    fn test_duplicate_inode_last_one_wins() {
        let parsed = parse([
            "abc123",
            "abc123 100644 user group 2014-04-30T10:11:12+01:00 /tmp/example.txt",
        ])
        .unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(matches!(parsed["abc123"], Command::Update { .. }));
    }

    #[test]
    fn test_map_key_matches_command_key() {
        let parsed = parse(["abc123", "1f"]).unwrap();
        for (key, command) in &parsed {
            assert_eq!(*key, command.key());
        }
    }
}

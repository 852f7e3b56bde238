// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering the cause attached to a log call.

use std::error::Error;
use std::fmt::Debug;
use std::fmt::Write;

/// Links of a `source()` chain rendered before the rest is cut off.
pub const MAX_CHAIN_LINKS: usize = 64;

/**
Produces the human-readable trace logged on the line after a message with a cause.
*/
pub trait StackTraceFormatter: Debug + Send + Sync {
    fn format(&self, cause: &dyn Error) -> String;
}

/**
Renders the cause followed by its `source()` chain, one link per line.

At most [`MAX_CHAIN_LINKS`] links are rendered; a longer (or cyclic) chain ends with a
`... (truncated)` line.

```
use contextlog::{SourceChainFormatter, StackTraceFormatter};
use std::fmt;

#[derive(Debug)]
struct Timeout;
impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("request timed out")
    }
}
impl std::error::Error for Timeout {}

assert_eq!(SourceChainFormatter.format(&Timeout), "request timed out");
```
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceChainFormatter;

impl StackTraceFormatter for SourceChainFormatter {
    fn format(&self, cause: &dyn Error) -> String {
        let mut text = cause.to_string();
        let mut source = cause.source();
        let mut links = 0;
        while let Some(link) = source {
            if links == MAX_CHAIN_LINKS {
                text.push_str("\n... (truncated)");
                break;
            }
            // writing into a String can't fail
            let _ = write!(text, "\nCaused by: {link}");
            source = link.source();
            links += 1;
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("could not load profile")]
    struct LoadFailed {
        #[source]
        source: ParseFailed,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("unexpected token at line {0}")]
    struct ParseFailed(u32);

    /// An error whose source chain never ends.
    #[derive(Debug)]
    struct Cyclic;

    impl std::fmt::Display for Cyclic {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("cyclic")
        }
    }

    impl Error for Cyclic {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&Cyclic)
        }
    }

    #[test]
    fn cyclic_chain_is_truncated() {
        let text = SourceChainFormatter.format(&Cyclic);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), MAX_CHAIN_LINKS + 2);
        assert_eq!(lines[0], "cyclic");
        assert!(lines[1..=MAX_CHAIN_LINKS].iter().all(|line| *line == "Caused by: cyclic"));
        assert_eq!(lines[MAX_CHAIN_LINKS + 1], "... (truncated)");
    }

    #[test]
    fn single_error_has_no_chain() {
        assert_eq!(SourceChainFormatter.format(&ParseFailed(3)), "unexpected token at line 3");
    }

    #[test]
    fn chain_is_rendered_in_order() {
        let error = LoadFailed {
            source: ParseFailed(12),
        };
        assert_eq!(
            SourceChainFormatter.format(&error),
            "could not load profile\nCaused by: unexpected token at line 12"
        );
    }
}

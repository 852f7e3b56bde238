//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# contextlog

contextlog is a leveled logging facility with a black box recorder.

# The problem

Production builds log at a coarse level because persisting every fine-grained message is
expensive.  Then something fails, and the one log line you have says *what* failed but not
*how the program got there*.  Turning on debug logging and waiting for the failure to recur
is rarely an option.

# The idea

While running at a coarse level, contextlog keeps the most recent messages (the ones below
the threshold included) in a fixed-size ring buffer in memory.  When an error is logged, that
history is written out first, framed by separator lines, and the error follows:

```text
[Error Context] ==================================================
[Error Context] [Sync] fetching page 1
[Error Context] [Sync] fetching page 2
[Error Context] ==================================================
ERROR [Sync] server closed the connection
```

You get the diagnostic trail of a debug build at the I/O cost of a release build.

# Levels

| Level     | Value | Notes                                                        |
|-----------|-------|--------------------------------------------------------------|
| Disabled  | -1    | suppresses everything                                        |
| Error     | 0     | triggers the context dump                                    |
| Info      | 1     | default                                                      |
| Debug     | 2     |                                                              |
| Trace     | 3     |                                                              |
| Verbose   | 4     |                                                              |
| Warn      | 5     |                                                              |

A message is emitted when the active level's value is at least the message's value.  The
table is historical; `Warn` sorting after `Trace` is deliberate compatibility, not a typo.
Memory and time snapshots use an internal profiling level that is emitted whenever logging
is enabled at all.

# The API

```rust
use contextlog::{ContextLogger, InMemoryAppender, Severity};
use std::sync::Arc;

let appender = Arc::new(InMemoryAppender::new());
let logger = ContextLogger::new();
logger.init_log_with_capacity(appender.clone(), Severity::Info, 1024);

logger.debug_tagged("Sync", "fetching page 1");
logger.error_tagged("Sync", "server closed the connection");

assert!(appender.messages().contains(&"[Sync] fetching page 1".to_string()));
```

Where the messages go is up to the [Appender] you initialize with.  Every emitted line is also
echoed to stdout with a timestamp, unless [ContextLogger::set_release] turns that off.

# Multithreading

All operations take `&self`.  A single lock covers caching, dumping and emitting, so a dump is
never interleaved with another thread's message.

# Failure

Logging never returns an error and never panics because a sink failed.  Sink failures are
reported on stderr, best-effort, and otherwise dropped.
*/

mod appender;
mod config;
mod console;
mod error;
mod facility;
pub mod global_logger;
mod inmemory_appender;
mod level;
mod log_record;
mod macros;
mod policy;
mod ring_buffer;
mod sink;
mod spinlock;
mod sys;
mod trace;

pub use appender::{Appender, LogContent};
pub use config::LogConfig;
pub use console::Console;
pub use error::{AppenderError, Error};
pub use facility::{CONTEXT_SEPARATOR, ContextLogger, ERROR_CONTEXT_TAG};
pub use global_logger::{global_logger, set_global_logger, take_global_logger};
pub use inmemory_appender::{Entry, InMemoryAppender};
pub use level::Severity;
pub use log_record::LogRecord;
pub use policy::LevelPolicy;
pub use ring_buffer::{ContextRingBuffer, DEFAULT_CAPACITY, DrainInOrder};
pub use sink::LogSink;
pub use trace::{MAX_CHAIN_LINKS, SourceChainFormatter, StackTraceFormatter};

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn buffer() -> MutexGuard<'static, Option<Vec<String>>> {
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Activate buffering. While active, log records are stored instead of
/// being printed to stderr.
pub fn activate() {
    *buffer() = Some(Vec::new());
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    buffer().take().unwrap_or_default()
}

/// Write a message. If buffering is active the message is stored;
/// otherwise it is printed to stderr immediately.
pub fn warn(msg: String) {
    let mut guard = buffer();
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprint!("{}", msg);
    }
}

/// `Write` sink for the logger. Routes every write through `warn`.
pub struct BufferedStderr;

impl Write for BufferedStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        warn(String::from_utf8_lossy(buf).into_owned());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so parallel tests never race on the global buffer.
    #[test]
    fn test_buffering_lifecycle() {
        activate();
        let mut sink = BufferedStderr;
        sink.write_all(b"first\n").unwrap();
        warn("second\n".to_string());

        let drained = drain();
        assert_eq!(drained, vec!["first\n".to_string(), "second\n".to_string()]);

        // After drain, buffering is off and nothing accumulates.
        assert!(drain().is_empty());
    }
}

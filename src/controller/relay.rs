//! Output relay: turns the child's pipes into `Output` / `ErrorOutput` events

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::EventHub;
use crate::{OutputStream, ProcessEvent};

const CHUNK_SIZE: usize = 8 * 1024;

/// Decodes raw pipe chunks into text without splitting multi-byte characters.
///
/// An incomplete UTF-8 sequence at the end of a chunk is held back until the
/// next chunk arrives; genuinely invalid bytes are replaced lossily.
#[derive(Debug, Default)]
pub(crate) struct Utf8Chunker {
    pending: Vec<u8>,
}

impl Utf8Chunker {
    pub fn push(&mut self, bytes: &[u8]) -> Option<String> {
        self.pending.extend_from_slice(bytes);
        let cut = complete_prefix_len(&self.pending);
        if cut == 0 {
            return None;
        }
        let rest = self.pending.split_off(cut);
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending = rest;
        Some(text)
    }

    /// Flush whatever is left once the pipe is closed
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        Some(text)
    }
}

/// Length of `bytes` without a trailing, still incomplete UTF-8 sequence
fn complete_prefix_len(bytes: &[u8]) -> usize {
    let len = bytes.len();
    for back in 1..=len.min(3) {
        let byte = bytes[len - back];
        if byte & 0xC0 == 0x80 {
            // continuation byte, keep looking for the lead byte
            continue;
        }
        let needed = if byte & 0xE0 == 0xC0 {
            2
        } else if byte & 0xF0 == 0xE0 {
            3
        } else if byte & 0xF8 == 0xF0 {
            4
        } else {
            1
        };
        return if needed > back { len - back } else { len };
    }
    len
}

fn event_for(stream: OutputStream, text: String) -> ProcessEvent {
    match stream {
        OutputStream::Stdout => ProcessEvent::Output(text),
        OutputStream::Stderr => ProcessEvent::ErrorOutput(text),
    }
}

/// Spawn a task that forwards every chunk read from `reader` to the hub
pub(super) fn spawn_relay<R>(
    runtime: &Handle,
    mut reader: R,
    stream: OutputStream,
    hub: EventHub,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    runtime.spawn(async move {
        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut chunker = Utf8Chunker::default();

        loop {
            match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => {
                    if let Some(text) = chunker.push(&buf[..n]) {
                        match stream {
                            OutputStream::Stdout => tracing::debug!("[App Output]: {}", text.trim_end()),
                            OutputStream::Stderr => tracing::debug!("[App Error]: {}", text.trim_end()),
                        }
                        hub.emit(event_for(stream, text));
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::error!("Failed to read {:?} of child process: {}", stream, e);
                    hub.emit(ProcessEvent::RuntimeError(format!(
                        "Ошибка чтения вывода приложения: {}",
                        e
                    )));
                    break;
                }
            }
        }

        if let Some(text) = chunker.finish() {
            hub.emit(event_for(stream, text));
        }
        tracing::debug!("{:?} relay finished", stream);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunker_passes_ascii_through() {
        let mut chunker = Utf8Chunker::default();
        assert_eq!(chunker.push(b"line1\nline2"), Some("line1\nline2".to_string()));
        assert_eq!(chunker.finish(), None);
    }

    #[test]
    fn test_chunker_holds_back_split_cyrillic() {
        let bytes = "Запуск".as_bytes();
        // cut in the middle of the second character
        let (head, tail) = bytes.split_at(3);

        let mut chunker = Utf8Chunker::default();
        assert_eq!(chunker.push(head), Some("З".to_string()));
        assert_eq!(chunker.push(tail), Some("апуск".to_string()));
    }

    #[test]
    fn test_chunker_waits_for_lone_lead_byte() {
        let euro = "€".as_bytes();
        let mut chunker = Utf8Chunker::default();
        assert_eq!(chunker.push(&euro[..1]), None);
        assert_eq!(chunker.push(&euro[1..2]), None);
        assert_eq!(chunker.push(&euro[2..]), Some("€".to_string()));
    }

    #[test]
    fn test_chunker_flushes_truncated_sequence_lossily() {
        let mut chunker = Utf8Chunker::default();
        assert_eq!(chunker.push(&[b'a', 0xE2, 0x82]), Some("a".to_string()));
        assert_eq!(chunker.finish(), Some("\u{FFFD}".to_string()));
    }

    #[tokio::test]
    async fn test_relay_emits_chunks_as_events() {
        let hub = EventHub::new();
        let mut sub = hub.subscribe();
        let reader: &'static [u8] = b"hello\n";

        spawn_relay(&Handle::current(), reader, OutputStream::Stderr, hub.clone())
            .await
            .unwrap();

        assert_eq!(sub.try_recv(), Some(ProcessEvent::ErrorOutput("hello\n".into())));
        assert_eq!(sub.try_recv(), None);
    }
}

use std::collections::VecDeque;
use std::io;

use protocol::{Command, ControlMessage, EndFileRecord, Transport};

/// A frame captured by [`ScriptedTransport`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SentFrame {
    /// Command tag.
    pub command: Command,
    /// Payload bytes.
    pub payload: Vec<u8>,
}

#[derive(Debug)]
struct Scheduled {
    due_at_poll: usize,
    message: ControlMessage,
}

/// In-memory [`Transport`] that records output and replays scripted input.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    sent: Vec<SentFrame>,
    inbound: VecDeque<Scheduled>,
    polls: usize,
    fail_after: Option<usize>,
}

impl ScriptedTransport {
    /// An empty transport with nothing scheduled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `message` for the next poll.
    #[must_use]
    pub fn with_message(mut self, message: ControlMessage) -> Self {
        self.push_after(self.polls, message);
        self
    }

    /// Queues `message` so it is first returned by poll number `poll`
    /// (counting from one).
    #[must_use]
    pub fn with_message_at_poll(mut self, poll: usize, message: ControlMessage) -> Self {
        self.push_after(poll.saturating_sub(1), message);
        self
    }

    /// Makes every transmit after the first `frames` fail with `BrokenPipe`.
    #[must_use]
    pub fn failing_after(mut self, frames: usize) -> Self {
        self.fail_after = Some(frames);
        self
    }

    fn push_after(&mut self, due_at_poll: usize, message: ControlMessage) {
        self.inbound.push_back(Scheduled {
            due_at_poll,
            message,
        });
    }

    /// Every frame transmitted so far.
    #[must_use]
    pub fn sent(&self) -> &[SentFrame] {
        &self.sent
    }

    /// Concatenated payloads of all `Append` frames.
    #[must_use]
    pub fn appended(&self) -> Vec<u8> {
        self.sent
            .iter()
            .filter(|frame| frame.command == Command::Append)
            .flat_map(|frame| frame.payload.iter().copied())
            .collect()
    }

    /// Number of `Append` frames.
    #[must_use]
    pub fn append_count(&self) -> usize {
        self.sent
            .iter()
            .filter(|frame| frame.command == Command::Append)
            .count()
    }

    /// Parsed end-of-file record, if one was sent.
    #[must_use]
    pub fn end_file(&self) -> Option<EndFileRecord> {
        self.sent
            .iter()
            .find(|frame| frame.command == Command::EndFile)
            .and_then(|frame| std::str::from_utf8(&frame.payload).ok())
            .and_then(|text| EndFileRecord::parse(text).ok())
    }

    /// Polls performed so far.
    #[must_use]
    pub const fn polls(&self) -> usize {
        self.polls
    }

    /// Scheduled messages not yet delivered.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inbound.len()
    }
}

impl Transport for ScriptedTransport {
    fn transmit(&mut self, command: Command, payload: &[u8]) -> io::Result<()> {
        if self.fail_after.is_some_and(|limit| self.sent.len() >= limit) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "scripted transmit failure"));
        }
        self.sent.push(SentFrame {
            command,
            payload: payload.to_vec(),
        });
        Ok(())
    }

    fn poll_control(&mut self) -> io::Result<Option<ControlMessage>> {
        let poll = self.polls;
        self.polls += 1;
        match self.inbound.front() {
            Some(next) if next.due_at_poll <= poll => {
                Ok(self.inbound.pop_front().map(|scheduled| scheduled.message))
            }
            _ => Ok(None),
        }
    }
}

//! Cooperative interrupt checks between frames.

use protocol::{ControlMessage, Transport};

use crate::{Counters, TransferError};

/// Whether the pipeline may keep sending.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
    /// Keep going.
    Continue,
    /// The server asked to stop this transfer.
    Interrupted,
}

/// Polls the transport for one control message after each frame.
#[derive(Clone, Debug)]
pub struct InterruptMonitor<'a> {
    data_path: Option<&'a str>,
    enabled: bool,
}

impl<'a> InterruptMonitor<'a> {
    /// Creates a monitor for the transfer identified by `data_path`.
    ///
    /// Without a data path no interrupt can match, but warnings and
    /// unexpected messages are still handled.
    #[must_use]
    pub const fn new(data_path: Option<&'a str>, enabled: bool) -> Self {
        Self { data_path, enabled }
    }

    /// A monitor that never polls.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            data_path: None,
            enabled: false,
        }
    }

    /// Whether this monitor polls at all.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Performs one non-blocking poll and interprets the result.
    pub fn check<T>(&self, transport: &mut T, counters: &Counters) -> Result<Flow, TransferError>
    where
        T: Transport + ?Sized,
    {
        if !self.enabled {
            return Ok(Flow::Continue);
        }
        let message = transport
            .poll_control()
            .map_err(TransferError::TransmissionFailure)?;
        match message {
            None => Ok(Flow::Continue),
            Some(ControlMessage::Warning(text)) => {
                ::tracing::warn!(target: logging::targets::INTERRUPT, "WARNING: {text}");
                counters.record_warning();
                Ok(Flow::Continue)
            }
            Some(ControlMessage::Interrupt(path)) => {
                if self.data_path == Some(path.as_str()) {
                    logging::trace_interrupt!(path = %path, "server interrupted transfer");
                    Ok(Flow::Interrupted)
                } else {
                    ::tracing::debug!(
                        target: logging::targets::INTERRUPT,
                        path = %path,
                        "ignoring interrupt for another transfer"
                    );
                    Ok(Flow::Continue)
                }
            }
            Some(ControlMessage::Unexpected { tag, text }) => {
                Err(TransferError::UnexpectedControlMessage { command: tag, text })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io;

    use protocol::Command;

    use super::*;

    #[derive(Default)]
    struct Inbox(VecDeque<io::Result<Option<ControlMessage>>>);

    impl Transport for Inbox {
        fn transmit(&mut self, _: Command, _: &[u8]) -> io::Result<()> {
            Ok(())
        }

        fn poll_control(&mut self) -> io::Result<Option<ControlMessage>> {
            self.0.pop_front().unwrap_or(Ok(None))
        }
    }

    fn inbox(messages: Vec<ControlMessage>) -> Inbox {
        Inbox(messages.into_iter().map(|m| Ok(Some(m))).collect())
    }

    #[test]
    fn quiet_channel_continues() {
        let counters = Counters::new();
        let monitor = InterruptMonitor::new(Some("t/file"), true);
        assert_eq!(
            monitor.check(&mut Inbox::default(), &counters).unwrap(),
            Flow::Continue
        );
    }

    #[test]
    fn warnings_are_counted() {
        let counters = Counters::new();
        let monitor = InterruptMonitor::new(Some("t/file"), true);
        let mut transport = inbox(vec![
            ControlMessage::Warning("one".into()),
            ControlMessage::Warning("two".into()),
        ]);
        for _ in 0..3 {
            assert_eq!(
                monitor.check(&mut transport, &counters).unwrap(),
                Flow::Continue
            );
        }
        assert_eq!(counters.warnings(), 2);
    }

    #[test]
    fn matching_interrupt_stops() {
        let counters = Counters::new();
        let monitor = InterruptMonitor::new(Some("t/file"), true);
        let mut transport = inbox(vec![ControlMessage::Interrupt("t/file".into())]);
        assert_eq!(
            monitor.check(&mut transport, &counters).unwrap(),
            Flow::Interrupted
        );
    }

    #[test]
    fn other_interrupts_are_ignored() {
        let counters = Counters::new();
        let monitor = InterruptMonitor::new(Some("t/file"), true);
        let mut transport = inbox(vec![ControlMessage::Interrupt("t/other".into())]);
        assert_eq!(
            monitor.check(&mut transport, &counters).unwrap(),
            Flow::Continue
        );

        let unnamed = InterruptMonitor::new(None, true);
        let mut transport = inbox(vec![ControlMessage::Interrupt(String::new())]);
        assert_eq!(
            unnamed.check(&mut transport, &counters).unwrap(),
            Flow::Continue
        );
    }

    #[test]
    fn unexpected_messages_are_fatal() {
        let counters = Counters::new();
        let monitor = InterruptMonitor::new(Some("t/file"), true);
        let mut transport = inbox(vec![ControlMessage::Unexpected {
            tag: b'e',
            text: "boom".into(),
        }]);
        let err = monitor.check(&mut transport, &counters).unwrap_err();
        assert!(matches!(
            err,
            TransferError::UnexpectedControlMessage { command: b'e', .. }
        ));
    }

    #[test]
    fn poll_errors_are_transmission_failures() {
        let counters = Counters::new();
        let monitor = InterruptMonitor::new(Some("t/file"), true);
        let mut transport = Inbox(VecDeque::from([Err(io::Error::from(
            io::ErrorKind::ConnectionReset,
        ))]));
        assert!(matches!(
            monitor.check(&mut transport, &counters),
            Err(TransferError::TransmissionFailure(_))
        ));
    }

    #[test]
    fn disabled_monitor_never_polls() {
        let counters = Counters::new();
        let mut transport = inbox(vec![ControlMessage::Interrupt("t/file".into())]);
        let monitor = InterruptMonitor::disabled();
        assert!(!monitor.is_enabled());
        assert_eq!(
            monitor.check(&mut transport, &counters).unwrap(),
            Flow::Continue
        );
        assert_eq!(transport.0.len(), 1);
    }
}

#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Message framing and control-channel types for the backup data path.
//!
//! Every message exchanged between client and server is a [`Frame`]: a
//! one-byte ASCII [`Command`] tag, a four digit hex payload length and the
//! payload itself. The sender pushes file data as [`Command::Append`] frames
//! and closes each file with an [`EndFileRecord`]. While a file is in flight
//! the server may send [`ControlMessage`]s back; a [`Transport`] exposes them
//! through a non-blocking poll.
//!
//! # Examples
//!
//! Encode a frame and read it back.
//!
//! ```
//! use protocol::{Command, read_frame, write_frame};
//!
//! # fn example() -> Result<(), protocol::FrameError> {
//! let mut wire = Vec::new();
//! write_frame(&mut wire, Command::Append, b"0123456789abcdef")?;
//! assert_eq!(&wire[..5], b"a0010");
//!
//! let frame = read_frame(&mut wire.as_slice())?.expect("one frame");
//! assert_eq!(frame.command(), Some(Command::Append));
//! assert_eq!(frame.payload(), b"0123456789abcdef");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! Build the end-of-file record for an empty file.
//!
//! ```
//! use protocol::EndFileRecord;
//!
//! let record = EndFileRecord::new(0, checksums::strong::Md5::digest(b""));
//! assert_eq!(record.to_string(), "0:d41d8cd98f00b204e9800998ecf8427e");
//! ```

mod command;
mod control;
mod endfile;
mod frame;
mod transport;

pub use command::{Command, ParseCommandError};
pub use control::ControlMessage;
pub use endfile::{EndFileParseError, EndFileRecord};
pub use frame::{Frame, FrameError, FrameHeader, HEADER_LEN, MAX_PAYLOAD_LEN, read_frame, write_frame};
pub use transport::{InboundFrames, StreamTransport, Transport, spawn_frame_reader};

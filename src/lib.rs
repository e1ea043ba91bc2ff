//! Decoder for SCTE-35 `splice_info_section` messages.
//!
//! SCTE-35 sections are compact, bit-packed binary structures embedded in
//! broadcast transport streams to signal ad insertion points, program
//! boundaries, and content segmentation events. This crate converts a raw
//! byte buffer into a fully-typed, nested representation of every field.
//!
//! Supported splice commands are `splice_insert` (0x05) and `time_signal`
//! (0x06). Segmentation descriptors (tag 0x02) are decoded in full; other
//! descriptor tags are recorded as opaque `(tag, length)` stubs.
//!
//! # Example
//!
//! ```rust
//! use data_encoding::BASE64;
//! use scte35_decoder::{parse_splice_info_section, SpliceCommand};
//!
//! let payload = "/DAWAAAAAAAAAP/wBQb+Qjo1vQAAuwxz9A==";
//! let buffer = BASE64.decode(payload.as_bytes()).unwrap();
//!
//! let section = parse_splice_info_section(&buffer).unwrap();
//! assert_eq!(section.splice_command_type, 0x06);
//! match section.splice_command {
//!     SpliceCommand::TimeSignal(ref cmd) => {
//!         assert!(cmd.splice_time.pts_time.is_some());
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use std::time::Duration;
use thiserror::Error;

mod bit_reader;
mod parser;
mod types;
mod upid;


pub use parser::parse_splice_info_section;
pub use types::{
    BreakDuration, DeliveryRestrictions, GenericDescriptor, SegmentationComponent,
    SegmentationDescriptor, SegmentationEvent, SpliceCommand, SpliceDescriptor, SpliceInfoSection,
    SpliceInsert, SpliceInsertComponent, SpliceInsertEvent, SpliceTime, TimeSignal,
    segmentation_type_label,
};
pub use upid::SegmentationUpidType;

/// Errors produced while decoding a `splice_info_section`.
///
/// `InvalidTableId` and `UnsupportedSpliceCommand` abort the whole decode
/// with no partial result. `OutOfData` is fatal for the read that raised
/// it, but when it occurs inside the descriptor loop the section parser
/// degrades to a partial descriptor list instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The first byte of the section was not 0xFC.
    #[error("invalid table_id 0x{0:02x}, splice_info_section must start with 0xfc")]
    InvalidTableId(u8),
    /// The splice_command_type is not splice_insert (0x05) or time_signal (0x06).
    #[error("splice_command_type 0x{0:02x} is not supported")]
    UnsupportedSpliceCommand(u8),
    /// A fixed-width read or skip would run past the end of the buffer.
    #[error("out of data: needed {needed} bits but only {remaining} remain")]
    OutOfData { needed: usize, remaining: usize },
}

/// Converts a 90kHz clock tick count to seconds.
pub fn ticks_to_secs(ticks: u64) -> f64 {
    ticks as f64 / 90_000.0
}

/// Converts a 90kHz clock tick count to a [`Duration`].
pub fn ticks_to_duration(ticks: u64) -> Duration {
    Duration::from_secs_f64(ticks_to_secs(ticks))
}

#[cfg(test)]
mod clock_tests {
    use super::*;

    #[test]
    fn test_ticks_to_secs() {
        assert_eq!(ticks_to_secs(90_000), 1.0);
        assert_eq!(ticks_to_secs(0), 0.0);
        assert_eq!(ticks_to_secs(45_000), 0.5);
    }

    #[test]
    fn test_ticks_to_duration_consistent_with_secs() {
        let ticks = 1_936_310_318;
        let secs = ticks_to_secs(ticks);
        let duration = ticks_to_duration(ticks);
        assert!((duration.as_secs_f64() - secs).abs() < 1e-6);
        assert_eq!(duration.as_secs(), 21_514);
    }
}

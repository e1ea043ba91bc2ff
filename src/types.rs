//! Decoded SCTE-35 value records.
//!
//! Every structure here is an immutable value produced once during a
//! single decode pass. Conditional fields whose presence is governed by
//! earlier flag bits are modeled as `Option`s or nested event records;
//! absence means "not applicable", never zero.

use crate::upid::SegmentationUpidType;
use crate::{ticks_to_secs, ticks_to_duration};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// A complete decoded `splice_info_section`.
///
/// Header fields appear in wire order, followed by the splice command
/// and the descriptor loop. The trailing CRC-32 is not modeled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SpliceInfoSection {
    /// Table identifier, always 0xFC for SCTE-35.
    pub table_id: u8,
    pub section_syntax_indicator: bool,
    pub private_indicator: bool,
    /// Length of the section in bytes, from the field after this one.
    pub section_length: u16,
    pub protocol_version: u8,
    pub encrypted_packet: bool,
    pub encryption_algorithm: u8,
    /// Offset added to every PTS in the section, in 90kHz ticks.
    pub pts_adjustment: u64,
    pub cw_index: u8,
    /// 12-bit authorization tier, conventionally rendered as hex.
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_tier"))]
    pub tier: u16,
    pub splice_command_length: u16,
    pub splice_command_type: u8,
    pub splice_command: SpliceCommand,
    /// Byte count of the descriptor loop.
    pub splice_descriptor_loop_length: u16,
    pub splice_descriptors: Vec<SpliceDescriptor>,
}

/// The decoded splice command payload, discriminated by
/// `splice_command_type`.
///
/// Only `splice_insert` (0x05) and `time_signal` (0x06) are supported;
/// any other command type fails the decode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum SpliceCommand {
    SpliceInsert(SpliceInsert),
    TimeSignal(TimeSignal),
}

/// A `splice_time` sub-structure: an optional 33-bit 90kHz timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SpliceTime {
    pub time_specified_flag: bool,
    /// Present iff `time_specified_flag` is set.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub pts_time: Option<u64>,
}

impl SpliceTime {
    /// The timestamp in seconds, if specified.
    pub fn as_secs(&self) -> Option<f64> {
        self.pts_time.map(ticks_to_secs)
    }

    /// The timestamp as a [`Duration`], if specified.
    pub fn to_duration(&self) -> Option<Duration> {
        self.pts_time.map(ticks_to_duration)
    }
}

/// A `break_duration` sub-structure.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BreakDuration {
    pub auto_return: bool,
    /// Duration of the break in 90kHz ticks.
    pub duration: u64,
}

impl BreakDuration {
    pub fn as_secs(&self) -> f64 {
        ticks_to_secs(self.duration)
    }

    pub fn to_duration(&self) -> Duration {
        ticks_to_duration(self.duration)
    }
}

/// A `splice_insert` command (0x05).
///
/// When `splice_event_cancel_indicator` is set the command carries
/// nothing beyond the event id; `event` is `None` and callers must treat
/// the missing fields as not applicable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SpliceInsert {
    pub splice_event_id: u32,
    pub splice_event_cancel_indicator: bool,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub event: Option<SpliceInsertEvent>,
}

/// The body of a non-cancelled `splice_insert`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SpliceInsertEvent {
    pub out_of_network_indicator: bool,
    pub program_splice_flag: bool,
    pub duration_flag: bool,
    pub splice_immediate_flag: bool,
    /// Present iff `program_splice_flag && !splice_immediate_flag`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub splice_time: Option<SpliceTime>,
    /// Present iff `!program_splice_flag`; may be an empty list.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub components: Option<Vec<SpliceInsertComponent>>,
    /// Present iff `duration_flag`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub break_duration: Option<BreakDuration>,
    pub unique_program_id: u16,
    pub avail_num: u8,
    pub avails_expected: u8,
}

/// Per-component timing in a component-level `splice_insert`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SpliceInsertComponent {
    pub component_tag: u8,
    /// Present iff the enclosing command's `splice_immediate_flag` is set.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub splice_time: Option<SpliceTime>,
}

/// A `time_signal` command (0x06): a single `splice_time`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TimeSignal {
    pub splice_time: SpliceTime,
}

/// A descriptor from the descriptor loop.
///
/// Segmentation descriptors (tag 0x02) are decoded in full; every other
/// tag is recorded as an opaque `(tag, length)` stub with its body
/// skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum SpliceDescriptor {
    Segmentation(SegmentationDescriptor),
    Generic(GenericDescriptor),
}

impl SpliceDescriptor {
    pub fn tag(&self) -> u8 {
        match self {
            SpliceDescriptor::Segmentation(d) => d.splice_descriptor_tag,
            SpliceDescriptor::Generic(d) => d.splice_descriptor_tag,
        }
    }

    pub fn length(&self) -> u8 {
        match self {
            SpliceDescriptor::Segmentation(d) => d.descriptor_length,
            SpliceDescriptor::Generic(d) => d.descriptor_length,
        }
    }
}

/// Stub for descriptor tags the decoder does not model. The body bytes
/// are skipped, not captured.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GenericDescriptor {
    pub splice_descriptor_tag: u8,
    pub descriptor_length: u8,
}

/// A segmentation descriptor (tag 0x02).
///
/// As with [`SpliceInsert`], a set cancel indicator terminates the
/// structure early and `event` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SegmentationDescriptor {
    pub splice_descriptor_tag: u8,
    /// Byte count of the descriptor body, excluding tag and length.
    pub descriptor_length: u8,
    /// 32-bit identifier, 0x43554549 ("CUEI") in practice.
    pub identifier: u32,
    pub segmentation_event_id: u32,
    pub segmentation_event_cancel_indicator: bool,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub event: Option<SegmentationEvent>,
}

/// The body of a non-cancelled segmentation descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SegmentationEvent {
    pub program_segmentation_flag: bool,
    pub segmentation_duration_flag: bool,
    pub delivery_not_restricted_flag: bool,
    /// Present iff `!delivery_not_restricted_flag`.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub delivery_restrictions: Option<DeliveryRestrictions>,
    /// Present iff `!program_segmentation_flag`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub components: Option<Vec<SegmentationComponent>>,
    /// 40-bit duration in 90kHz ticks, iff `segmentation_duration_flag`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub segmentation_duration: Option<u64>,
    /// UPID type code. Informational only; never varies UPID parsing.
    pub segmentation_upid_type: SegmentationUpidType,
    pub segmentation_upid_length: u8,
    /// The UPID body as a lowercase hex dump.
    pub segmentation_upid: String,
    /// The segmentation type, resolved through [`segmentation_type_label`]:
    /// a human-readable label for known codes, the raw two-digit hex code
    /// otherwise.
    pub segmentation_type_id: String,
    pub segment_num: u8,
    pub segments_expected: u8,
    /// Present iff the raw type-id code is "34" or "36".
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub sub_segment_num: Option<u8>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub sub_segments_expected: Option<u8>,
}

/// Delivery restriction flags, present when a segmentation descriptor is
/// delivery-restricted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DeliveryRestrictions {
    pub web_delivery_allowed_flag: bool,
    pub no_regional_blackout_flag: bool,
    pub archive_allowed_flag: bool,
    /// 2-bit device restriction group.
    pub device_restrictions: u8,
}

/// Per-component entry in a component-level segmentation descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SegmentationComponent {
    pub component_tag: u8,
    /// 33-bit offset from the splice point, in 90kHz ticks.
    pub pts_offset: u64,
}

/// Resolves a two-hex-digit segmentation type code to its label.
///
/// The table is fixed and matched case-sensitively; codes outside it
/// return `None` and are kept verbatim by the descriptor parser.
///
/// # Example
///
/// ```rust
/// use scte35_decoder::segmentation_type_label;
///
/// assert_eq!(segmentation_type_label("22"), Some("Break Start"));
/// assert_eq!(segmentation_type_label("99"), None);
/// ```
pub fn segmentation_type_label(code: &str) -> Option<&'static str> {
    Some(match code {
        "00" => "Not Indicated",
        "01" => "Content Identification",
        "10" => "Program Start",
        "11" => "Program End",
        "12" => "Program Early Termination",
        "13" => "Program Breakaway",
        "14" => "Program Resumption",
        "15" => "Program Runover Planned",
        "16" => "Program Runover Unplanned",
        "17" => "Program Overlap Start",
        "18" => "Program Blackout Override",
        "19" => "Program Start – In Progress",
        "20" => "Chapter Start",
        "21" => "Chapter End",
        "22" => "Break Start",
        "23" => "Break End",
        "30" => "Provider Advertisement Start",
        "31" => "Provider Advertisement End",
        "32" => "Distributor Advertisement Start",
        "33" => "Distributor Advertisement End",
        "34" => "Provider Placement Opportunity Start",
        "35" => "Provider Placement Opportunity End",
        "36" => "Distributor Placement Opportunity Start",
        "37" => "Distributor Placement Opportunity End",
        "40" => "Unscheduled Event Start",
        "41" => "Unscheduled Event End",
        "50" => "Network Start",
        "51" => "Network End",
        _ => return None,
    })
}

/// Serializes the 12-bit tier as its conventional three-digit hex form.
#[cfg(feature = "serde")]
fn serialize_tier<S>(tier: &u16, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{:03x}", tier))
}

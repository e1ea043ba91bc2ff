//! Parsing of SCTE-35 splice information sections.
//!
//! All parsing is a single top-down pass over a [`BitReader`]: the
//! section header first, then exactly one splice command, then the
//! descriptor loop. There is no backtracking and no re-reading.

use crate::DecodeError;
use crate::bit_reader::BitReader;
use crate::types::{
    BreakDuration, DeliveryRestrictions, GenericDescriptor, SegmentationComponent,
    SegmentationDescriptor, SegmentationEvent, SpliceCommand, SpliceDescriptor, SpliceInfoSection,
    SpliceInsert, SpliceInsertComponent, SpliceInsertEvent, SpliceTime, TimeSignal,
    segmentation_type_label,
};
use crate::upid::SegmentationUpidType;
use log::warn;

const TABLE_ID: u8 = 0xFC;
const SPLICE_INSERT: u8 = 0x05;
const TIME_SIGNAL: u8 = 0x06;
const SEGMENTATION_DESCRIPTOR_TAG: u8 = 0x02;

/// splice_command_length value meaning "length not specified" in
/// pre-2017 revisions of the standard.
const COMMAND_LENGTH_UNDEFINED: u16 = 0xFFF;

/// Parses a complete `splice_info_section` from a byte buffer.
///
/// This is the main entry point of the crate. The buffer must contain
/// exactly one section, starting at its 0xFC table_id byte; extracting
/// it from a transport-stream, base64, or hex envelope is the caller's
/// job.
///
/// # Errors
///
/// * [`DecodeError::InvalidTableId`] if the first byte is not 0xFC.
/// * [`DecodeError::UnsupportedSpliceCommand`] for command types other
///   than splice_insert (0x05) and time_signal (0x06).
/// * [`DecodeError::OutOfData`] if a header or command read runs past
///   the end of the buffer.
///
/// A malformed descriptor loop is not fatal: the section is returned
/// with the descriptors decoded before the failure (possibly none) and
/// the error is logged. Header and command fields are considered more
/// reliable than the descriptor tail.
pub fn parse_splice_info_section(buffer: &[u8]) -> Result<SpliceInfoSection, DecodeError> {
    let mut reader = BitReader::new(buffer);

    let table_id = reader.read_bits(8)? as u8;
    if table_id != TABLE_ID {
        return Err(DecodeError::InvalidTableId(table_id));
    }

    let section_syntax_indicator = reader.read_bool()?;
    let private_indicator = reader.read_bool()?;
    reader.skip_bits(2)?; // sap_type, not modeled
    let section_length = reader.read_bits(12)? as u16;
    let protocol_version = reader.read_bits(8)? as u8;
    let encrypted_packet = reader.read_bool()?;
    let encryption_algorithm = reader.read_bits(6)? as u8;
    let pts_adjustment = reader.read_bits(33)?;
    let cw_index = reader.read_bits(8)? as u8;
    let tier = reader.read_bits(12)? as u16;
    let splice_command_length = reader.read_bits(12)? as u16;
    let splice_command_type = reader.read_bits(8)? as u8;

    let command_start = reader.position();
    let splice_command = parse_splice_command(&mut reader, splice_command_type)?;
    let command_bits_read = reader.position() - command_start;

    // Real encoders occasionally pad the command area; resync to the
    // declared length unless it is the legacy "undefined" marker.
    if splice_command_length != COMMAND_LENGTH_UNDEFINED {
        let expected_bits = splice_command_length as usize * 8;
        if command_bits_read < expected_bits {
            warn!(
                "splice command shorter than declared: read {} bits, expected {}",
                command_bits_read, expected_bits
            );
            reader.skip_bits(expected_bits - command_bits_read)?;
        }
    }

    let splice_descriptor_loop_length = reader.read_bits(16)? as u16;
    let splice_descriptors = if splice_descriptor_loop_length > 0 {
        let (descriptors, error) =
            parse_splice_descriptors(&mut reader, splice_descriptor_loop_length);
        if let Some(err) = error {
            warn!(
                "descriptor loop aborted after {} descriptor(s): {}",
                descriptors.len(),
                err
            );
        }
        descriptors
    } else {
        Vec::new()
    };

    Ok(SpliceInfoSection {
        table_id,
        section_syntax_indicator,
        private_indicator,
        section_length,
        protocol_version,
        encrypted_packet,
        encryption_algorithm,
        pts_adjustment,
        cw_index,
        tier,
        splice_command_length,
        splice_command_type,
        splice_command,
        splice_descriptor_loop_length,
        splice_descriptors,
    })
}

fn parse_splice_command(
    reader: &mut BitReader,
    command_type: u8,
) -> Result<SpliceCommand, DecodeError> {
    match command_type {
        SPLICE_INSERT => Ok(SpliceCommand::SpliceInsert(parse_splice_insert(reader)?)),
        TIME_SIGNAL => Ok(SpliceCommand::TimeSignal(parse_time_signal(reader)?)),
        other => Err(DecodeError::UnsupportedSpliceCommand(other)),
    }
}

fn parse_splice_time(reader: &mut BitReader) -> Result<SpliceTime, DecodeError> {
    let time_specified_flag = reader.read_bool()?;
    let pts_time = if time_specified_flag {
        reader.skip_bits(6)?;
        Some(reader.read_bits(33)?)
    } else {
        reader.skip_bits(7)?;
        None
    };
    Ok(SpliceTime {
        time_specified_flag,
        pts_time,
    })
}

fn parse_break_duration(reader: &mut BitReader) -> Result<BreakDuration, DecodeError> {
    let auto_return = reader.read_bool()?;
    reader.skip_bits(6)?;
    let duration = reader.read_bits(33)?;
    Ok(BreakDuration {
        auto_return,
        duration,
    })
}

fn parse_splice_insert(reader: &mut BitReader) -> Result<SpliceInsert, DecodeError> {
    let splice_event_id = reader.read_bits(32)? as u32;
    let splice_event_cancel_indicator = reader.read_bool()?;
    reader.skip_bits(7)?;

    // A cancelled event is a terminal short form.
    if splice_event_cancel_indicator {
        return Ok(SpliceInsert {
            splice_event_id,
            splice_event_cancel_indicator,
            event: None,
        });
    }

    let out_of_network_indicator = reader.read_bool()?;
    let program_splice_flag = reader.read_bool()?;
    let duration_flag = reader.read_bool()?;
    let splice_immediate_flag = reader.read_bool()?;
    reader.skip_bits(4)?;

    let splice_time = if program_splice_flag && !splice_immediate_flag {
        Some(parse_splice_time(reader)?)
    } else {
        None
    };

    let components = if !program_splice_flag {
        let component_count = reader.read_bits(8)? as u8;
        let mut components = Vec::with_capacity(component_count as usize);
        for _ in 0..component_count {
            let component_tag = reader.read_bits(8)? as u8;
            let splice_time = if splice_immediate_flag {
                Some(parse_splice_time(reader)?)
            } else {
                None
            };
            components.push(SpliceInsertComponent {
                component_tag,
                splice_time,
            });
        }
        Some(components)
    } else {
        None
    };

    let break_duration = if duration_flag {
        Some(parse_break_duration(reader)?)
    } else {
        None
    };

    let unique_program_id = reader.read_bits(16)? as u16;
    let avail_num = reader.read_bits(8)? as u8;
    let avails_expected = reader.read_bits(8)? as u8;

    Ok(SpliceInsert {
        splice_event_id,
        splice_event_cancel_indicator,
        event: Some(SpliceInsertEvent {
            out_of_network_indicator,
            program_splice_flag,
            duration_flag,
            splice_immediate_flag,
            splice_time,
            components,
            break_duration,
            unique_program_id,
            avail_num,
            avails_expected,
        }),
    })
}

fn parse_time_signal(reader: &mut BitReader) -> Result<TimeSignal, DecodeError> {
    Ok(TimeSignal {
        splice_time: parse_splice_time(reader)?,
    })
}

/// Iterates the descriptor loop over an explicit remaining-byte budget.
///
/// On a mid-loop failure the descriptors decoded so far are returned
/// together with the error; the caller decides how to surface it.
fn parse_splice_descriptors(
    reader: &mut BitReader,
    loop_length: u16,
) -> (Vec<SpliceDescriptor>, Option<DecodeError>) {
    let mut descriptors = Vec::new();
    let mut remaining = loop_length as i32;

    while remaining > 0 {
        let tag = match reader.read_bits(8) {
            Ok(value) => value as u8,
            Err(err) => return (descriptors, Some(err)),
        };

        // A tag right at the end of the buffer has no length byte;
        // record it as a zero-length stub instead of failing.
        if reader.remaining_bits() == 0 {
            descriptors.push(SpliceDescriptor::Generic(GenericDescriptor {
                splice_descriptor_tag: tag,
                descriptor_length: 0,
            }));
            break;
        }

        let length = match reader.read_bits(8) {
            Ok(value) => value as u8,
            Err(err) => return (descriptors, Some(err)),
        };
        // Negative overshoot just terminates the loop; it is not an error.
        remaining -= length as i32 + 2;

        let result = if tag == SEGMENTATION_DESCRIPTOR_TAG {
            parse_segmentation_descriptor(reader, tag, length).map(SpliceDescriptor::Segmentation)
        } else {
            // The unparsed body must still be skipped or every
            // subsequent descriptor desynchronizes.
            reader
                .skip_bits(length as usize * 8)
                .map(|_| {
                    SpliceDescriptor::Generic(GenericDescriptor {
                        splice_descriptor_tag: tag,
                        descriptor_length: length,
                    })
                })
        };

        match result {
            Ok(descriptor) => descriptors.push(descriptor),
            Err(err) => return (descriptors, Some(err)),
        }
    }

    (descriptors, None)
}

fn parse_segmentation_descriptor(
    reader: &mut BitReader,
    tag: u8,
    length: u8,
) -> Result<SegmentationDescriptor, DecodeError> {
    let start = reader.position();

    let identifier = reader.read_bits(32)? as u32;
    let segmentation_event_id = reader.read_bits(32)? as u32;
    let segmentation_event_cancel_indicator = reader.read_bool()?;
    reader.skip_bits(7)?;

    let event = if segmentation_event_cancel_indicator {
        None
    } else {
        Some(parse_segmentation_event(reader)?)
    };

    // Tolerate trailing bytes the decoder does not model, staying
    // aligned with the declared descriptor length for the loop.
    let bits_read = reader.position() - start;
    let declared_bits = length as usize * 8;
    if bits_read < declared_bits {
        reader.skip_bits(declared_bits - bits_read)?;
    }

    Ok(SegmentationDescriptor {
        splice_descriptor_tag: tag,
        descriptor_length: length,
        identifier,
        segmentation_event_id,
        segmentation_event_cancel_indicator,
        event,
    })
}

fn parse_segmentation_event(reader: &mut BitReader) -> Result<SegmentationEvent, DecodeError> {
    let program_segmentation_flag = reader.read_bool()?;
    let segmentation_duration_flag = reader.read_bool()?;
    let delivery_not_restricted_flag = reader.read_bool()?;

    let delivery_restrictions = if !delivery_not_restricted_flag {
        Some(DeliveryRestrictions {
            web_delivery_allowed_flag: reader.read_bool()?,
            no_regional_blackout_flag: reader.read_bool()?,
            archive_allowed_flag: reader.read_bool()?,
            device_restrictions: reader.read_bits(2)? as u8,
        })
    } else {
        reader.skip_bits(5)?;
        None
    };

    let components = if !program_segmentation_flag {
        let component_count = reader.read_bits(8)? as u8;
        let mut components = Vec::with_capacity(component_count as usize);
        for _ in 0..component_count {
            let component_tag = reader.read_bits(8)? as u8;
            reader.skip_bits(7)?;
            let pts_offset = reader.read_bits(33)?;
            components.push(SegmentationComponent {
                component_tag,
                pts_offset,
            });
        }
        Some(components)
    } else {
        None
    };

    let segmentation_duration = if segmentation_duration_flag {
        Some(reader.read_bits(40)?)
    } else {
        None
    };

    let segmentation_upid_type = SegmentationUpidType::from(reader.read_bits(8)? as u8);
    let segmentation_upid_length = reader.read_bits(8)? as u8;
    let segmentation_upid = reader.read_hex(segmentation_upid_length as usize)?;

    let type_code = reader.read_hex(1)?;
    let segment_num = reader.read_bits(8)? as u8;
    let segments_expected = reader.read_bits(8)? as u8;

    // The sub-segment gate checks the raw code, before the label lookup
    // replaces it: 0x34 Provider / 0x36 Distributor Placement
    // Opportunity Start.
    let (sub_segment_num, sub_segments_expected) = if type_code == "34" || type_code == "36" {
        (
            Some(reader.read_bits(8)? as u8),
            Some(reader.read_bits(8)? as u8),
        )
    } else {
        (None, None)
    };

    let segmentation_type_id = match segmentation_type_label(&type_code) {
        Some(label) => label.to_string(),
        None => type_code,
    };

    Ok(SegmentationEvent {
        program_segmentation_flag,
        segmentation_duration_flag,
        delivery_not_restricted_flag,
        delivery_restrictions,
        components,
        segmentation_duration,
        segmentation_upid_type,
        segmentation_upid_length,
        segmentation_upid,
        segmentation_type_id,
        segment_num,
        segments_expected,
        sub_segment_num,
        sub_segments_expected,
    })
}

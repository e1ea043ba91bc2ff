//! Command-line front end: decodes one or more SCTE-35 payloads given as
//! base64 (or hex) strings and prints the result as text or JSON.

use clap::{Parser, ValueEnum};
use data_encoding::{BASE64, HEXLOWER_PERMISSIVE};
use scte35_decoder::{
    DecodeError, SpliceCommand, SpliceDescriptor, SpliceInfoSection, parse_splice_info_section,
    ticks_to_secs,
};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "scte35-decoder",
    version,
    about = "Decode SCTE-35 splice_info_section payloads from base64 or hex"
)]
struct Args {
    /// Base64-encoded SCTE-35 payloads (hex with --hex)
    #[arg(required = true)]
    payloads: Vec<String>,

    /// Treat payloads as hex strings instead of base64
    #[arg(long)]
    hex: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    // Parser warnings (degraded descriptor loops, command-length
    // mismatches) go to stderr; RUST_LOG overrides the level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    // Each payload is decoded independently; one failure never aborts
    // the remaining payloads.
    let mut failed = false;
    for payload in &args.payloads {
        if let Err(message) = process_payload(payload, &args) {
            match args.output {
                OutputFormat::Text => eprintln!("{message}"),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({ "status": "error", "error": message })
                ),
            }
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn process_payload(payload: &str, args: &Args) -> Result<(), String> {
    let buffer = if args.hex {
        HEXLOWER_PERMISSIVE
            .decode(payload.as_bytes())
            .map_err(|e| format!("Error decoding hex string: {e}"))?
    } else {
        BASE64
            .decode(payload.as_bytes())
            .map_err(|e| format!("Error decoding base64 string: {e}"))?
    };

    let section = parse_splice_info_section(&buffer)
        .map_err(|e: DecodeError| format!("Error parsing splice_info_section: {e}"))?;

    match args.output {
        OutputFormat::Text => print_section(&section),
        OutputFormat::Json => {
            let doc = serde_json::json!({ "status": "success", "data": section });
            println!(
                "{}",
                serde_json::to_string_pretty(&doc).map_err(|e| e.to_string())?
            );
        }
    }
    Ok(())
}

fn print_section(section: &SpliceInfoSection) {
    println!("Successfully parsed splice_info_section:");
    println!("  Table ID: {}", section.table_id);
    println!("  Section Length: {}", section.section_length);
    println!("  Protocol Version: {}", section.protocol_version);
    println!("  PTS Adjustment: {}", section.pts_adjustment);
    println!("  Tier: 0x{:03x}", section.tier);
    println!("  Splice Command Type: {}", section.splice_command_type);
    println!("  Splice Command Length: {}", section.splice_command_length);

    match &section.splice_command {
        SpliceCommand::SpliceInsert(cmd) => {
            println!("  Splice Command: SpliceInsert");
            println!("    Splice Event ID: 0x{:08x}", cmd.splice_event_id);
            println!(
                "    Splice Event Cancel: {}",
                cmd.splice_event_cancel_indicator
            );
            if let Some(event) = &cmd.event {
                println!("    Out of Network: {}", event.out_of_network_indicator);
                println!("    Program Splice Flag: {}", event.program_splice_flag);
                println!("    Duration Flag: {}", event.duration_flag);
                println!("    Splice Immediate Flag: {}", event.splice_immediate_flag);

                if let Some(splice_time) = &event.splice_time {
                    if let Some(pts) = splice_time.pts_time {
                        println!(
                            "    Splice Time PTS: 0x{:09x} ({:.6} seconds)",
                            pts,
                            ticks_to_secs(pts)
                        );
                    }
                }
                if let Some(components) = &event.components {
                    println!("    Component Count: {}", components.len());
                    for component in components {
                        match component.splice_time.as_ref().and_then(|t| t.pts_time) {
                            Some(pts) => println!(
                                "      Component {}: PTS 0x{:09x}",
                                component.component_tag, pts
                            ),
                            None => println!("      Component {}", component.component_tag),
                        }
                    }
                }
                if let Some(break_duration) = &event.break_duration {
                    println!("    Break Duration:");
                    println!("      Auto Return: {}", break_duration.auto_return);
                    println!(
                        "      Duration: 0x{:09x} ({:.6} seconds)",
                        break_duration.duration,
                        break_duration.as_secs()
                    );
                }
                println!("    Unique Program ID: {}", event.unique_program_id);
                println!("    Avail Num: {}", event.avail_num);
                println!("    Avails Expected: {}", event.avails_expected);
            }
        }
        SpliceCommand::TimeSignal(cmd) => {
            println!("  Splice Command: TimeSignal");
            match cmd.splice_time.pts_time {
                Some(pts) => println!(
                    "    PTS Time: 0x{:09x} ({:.6} seconds)",
                    pts,
                    ticks_to_secs(pts)
                ),
                None => println!("    PTS Time: not specified"),
            }
        }
    }

    println!(
        "  Descriptor Loop Length: {}",
        section.splice_descriptor_loop_length
    );
    println!(
        "  Number of Descriptors: {}",
        section.splice_descriptors.len()
    );
    for descriptor in &section.splice_descriptors {
        match descriptor {
            SpliceDescriptor::Segmentation(desc) => {
                println!("    Segmentation Descriptor:");
                println!("      Identifier: 0x{:08x}", desc.identifier);
                println!(
                    "      Segmentation Event ID: 0x{:08x}",
                    desc.segmentation_event_id
                );
                println!(
                    "      Cancel Indicator: {}",
                    desc.segmentation_event_cancel_indicator
                );
                if let Some(event) = &desc.event {
                    println!("      Segmentation Type: {}", event.segmentation_type_id);
                    println!(
                        "      UPID Type: 0x{} ({})",
                        event.segmentation_upid_type.code(),
                        event.segmentation_upid_type.description()
                    );
                    if !event.segmentation_upid.is_empty() {
                        println!("      UPID: 0x{}", event.segmentation_upid);
                    }
                    if let Some(duration) = event.segmentation_duration {
                        println!(
                            "      Segmentation Duration: {} ({:.6} seconds)",
                            duration,
                            ticks_to_secs(duration)
                        );
                    }
                    println!(
                        "      Segment: {} of {}",
                        event.segment_num, event.segments_expected
                    );
                    if let (Some(sub_num), Some(sub_expected)) =
                        (event.sub_segment_num, event.sub_segments_expected)
                    {
                        println!("      Sub-Segment: {} of {}", sub_num, sub_expected);
                    }
                }
            }
            SpliceDescriptor::Generic(desc) => {
                println!(
                    "    Descriptor Tag: {} (length {})",
                    desc.splice_descriptor_tag, desc.descriptor_length
                );
            }
        }
    }
}

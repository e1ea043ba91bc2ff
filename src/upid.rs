//! UPID (Unique Program Identifier) type codes.
//!
//! Segmentation descriptors carry a `segmentation_upid_type` byte naming
//! the identifier scheme of the UPID payload. The decoder records the
//! type and dumps the payload as hex; the type never changes how the
//! payload is parsed.

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// The `segmentation_upid_type` codes defined by SCTE-35.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SegmentationUpidType {
    /// No UPID is used (0x00)
    NotUsed,
    /// User-defined UPID, deprecated (0x01)
    UserDefinedDeprecated,
    /// Industry Standard Commercial Identifier (0x02)
    ISCI,
    /// Ad Identifier (0x03)
    AdID,
    /// Unique Material Identifier (0x04)
    UMID,
    /// ISAN, deprecated form (0x05)
    ISANDeprecated,
    /// International Standard Audiovisual Number (0x06)
    ISAN,
    /// Turner Identifier (0x07)
    TID,
    /// Airing ID (0x08)
    AiringID,
    /// Advertising Digital Identification (0x09)
    ADI,
    /// Entertainment Identifier Registry (0x0A)
    EIDR,
    /// ATSC Content Identifier (0x0B)
    ATSCContentIdentifier,
    /// Media Processing Unit (0x0C)
    MPU,
    /// Multiple UPIDs (0x0D)
    MID,
    /// ADS Information (0x0E)
    ADSInformation,
    /// Uniform Resource Identifier (0x0F)
    URI,
    /// Universally Unique Identifier (0x10)
    UUID,
    /// Subscriber Company Reporting (0x11)
    SCR,
    /// Reserved or unknown type code
    Reserved(u8),
}

impl From<u8> for SegmentationUpidType {
    fn from(value: u8) -> Self {
        use SegmentationUpidType::*;
        match value {
            0x00 => NotUsed,
            0x01 => UserDefinedDeprecated,
            0x02 => ISCI,
            0x03 => AdID,
            0x04 => UMID,
            0x05 => ISANDeprecated,
            0x06 => ISAN,
            0x07 => TID,
            0x08 => AiringID,
            0x09 => ADI,
            0x0A => EIDR,
            0x0B => ATSCContentIdentifier,
            0x0C => MPU,
            0x0D => MID,
            0x0E => ADSInformation,
            0x0F => URI,
            0x10 => UUID,
            0x11 => SCR,
            x => Reserved(x),
        }
    }
}

impl From<SegmentationUpidType> for u8 {
    fn from(value: SegmentationUpidType) -> Self {
        use SegmentationUpidType::*;
        match value {
            NotUsed => 0x00,
            UserDefinedDeprecated => 0x01,
            ISCI => 0x02,
            AdID => 0x03,
            UMID => 0x04,
            ISANDeprecated => 0x05,
            ISAN => 0x06,
            TID => 0x07,
            AiringID => 0x08,
            ADI => 0x09,
            EIDR => 0x0A,
            ATSCContentIdentifier => 0x0B,
            MPU => 0x0C,
            MID => 0x0D,
            ADSInformation => 0x0E,
            URI => 0x0F,
            UUID => 0x10,
            SCR => 0x11,
            Reserved(x) => x,
        }
    }
}

impl SegmentationUpidType {
    /// The raw type byte rendered as two lowercase hex digits.
    pub fn code(&self) -> String {
        format!("{:02x}", u8::from(*self))
    }

    /// A human-readable name for the type, for display purposes.
    pub fn description(&self) -> &'static str {
        use SegmentationUpidType::*;
        match self {
            NotUsed => "Not Used",
            UserDefinedDeprecated => "User Defined (Deprecated)",
            ISCI => "ISCI (Industry Standard Commercial Identifier)",
            AdID => "Ad Identifier",
            UMID => "UMID (Unique Material Identifier)",
            ISANDeprecated => "ISAN (Deprecated)",
            ISAN => "ISAN (International Standard Audiovisual Number)",
            TID => "TID (Turner Identifier)",
            AiringID => "Airing ID",
            ADI => "ADI (Advertising Digital Identification)",
            EIDR => "EIDR (Entertainment Identifier Registry)",
            ATSCContentIdentifier => "ATSC Content Identifier",
            MPU => "MPU (Media Processing Unit)",
            MID => "MID (Multiple UPIDs)",
            ADSInformation => "ADS Information",
            URI => "URI (Uniform Resource Identifier)",
            UUID => "UUID (Universally Unique Identifier)",
            SCR => "SCR (Subscriber Company Reporting)",
            Reserved(_) => "Reserved/Unknown",
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for SegmentationUpidType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.code())
    }
}

//! Tag technical details: what kind of tag it is and how its memory is laid out

use itertools::Itertools as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Android reports technologies as class names, `android.nfc.tech.NfcA`
const ANDROID_TECH_PREFIX: &str = "android.nfc.tech.";

const MIFARE_CLASSIC: &str = "MifareClassic";
const MIFARE_ULTRALIGHT: &str = "MifareUltralight";
const NFC_A: &str = "NfcA";
const NFC_B: &str = "NfcB";
const NFC_F: &str = "NfcF";
const NFC_V: &str = "NfcV";
const ISO_DEP: &str = "IsoDep";
const NDEF: &str = "Ndef";
const NDEF_FORMATABLE: &str = "NdefFormatable";

const MIFARE_BLOCK_SIZE: u32 = 16;

/// Serial number as the platform hands it over, raw bytes or an already formatted string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
#[serde(untagged)]
pub enum SerialNumber {
    Bytes(Vec<u8>),
    Text(String),
}

/// Platform reported tag metadata, anything the platform didn't report stays `None`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase", default)]
pub struct TagMeta {
    pub serial_number: Option<SerialNumber>,
    pub technologies: Vec<String>,
    /// A number, or the two bytes Android's `NfcA.getAtqa()` returns (low byte first)
    #[serde(deserialize_with = "atqa_from_number_or_bytes")]
    pub atqa: Option<u16>,
    pub sak: Option<u8>,
    pub max_size: Option<u32>,
    pub is_writable: Option<bool>,
    pub can_make_read_only: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct TagTechnicalInfo {
    /// Always true, a report only exists for a detected tag
    pub detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    pub technologies: Vec<String>,
    pub tag_type_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atqa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sak: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_writable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_make_read_only: Option<bool>,
}

/// Tag classification, the first matching technology wins
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TagType {
    #[display("ISO 14443-3A - Mifare Classic")]
    MifareClassic,
    #[display("ISO 14443-3A - Mifare Ultralight")]
    MifareUltralight,
    #[display("ISO 14443-3A - NDEF Formatable")]
    NfcANdefFormatable,
    #[display("ISO 14443-3A")]
    NfcA,
    #[display("ISO 14443-3B")]
    NfcB,
    #[display("ISO 18092 - FeliCa")]
    NfcF,
    #[display("ISO 15693 - I-CODE")]
    NfcV,
    #[display("ISO 14443-4 - ISO-DEP")]
    IsoDep,
    #[display("NDEF Tag")]
    Ndef,
    #[display("NDEF Formatable Tag")]
    NdefFormatable,
    #[display("Unknown ({_0})")]
    Unknown(String),
}

impl TagType {
    pub fn classify(technologies: &[String]) -> Self {
        let has = |technology: &str| technologies.iter().any(|tech| tech == technology);

        if has(MIFARE_CLASSIC) {
            Self::MifareClassic
        } else if has(MIFARE_ULTRALIGHT) {
            Self::MifareUltralight
        } else if has(NFC_A) && has(NDEF_FORMATABLE) {
            Self::NfcANdefFormatable
        } else if has(NFC_A) {
            Self::NfcA
        } else if has(NFC_B) {
            Self::NfcB
        } else if has(NFC_F) {
            Self::NfcF
        } else if has(NFC_V) {
            Self::NfcV
        } else if has(ISO_DEP) {
            Self::IsoDep
        } else if has(NDEF) {
            Self::Ndef
        } else if has(NDEF_FORMATABLE) {
            Self::NdefFormatable
        } else {
            Self::Unknown(technologies.join(", "))
        }
    }
}

impl SerialNumber {
    /// Colon separated uppercase hex octets, text that isn't hex is kept as is
    pub fn render(&self) -> String {
        match self {
            Self::Bytes(bytes) => colon_hex(bytes),
            Self::Text(text) => match ndef_util::hex_to_bytes(text) {
                Ok(bytes) if !bytes.is_empty() => colon_hex(&bytes),
                _ => text.trim().to_string(),
            },
        }
    }
}

impl From<Vec<u8>> for SerialNumber {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<String> for SerialNumber {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Derive the technical view of a tag from whatever metadata the platform reported
pub fn inspect(meta: &TagMeta) -> TagTechnicalInfo {
    let technologies = normalize_technologies(&meta.technologies);
    let tag_type = TagType::classify(&technologies);
    let memory_info = memory_info(&technologies, meta.max_size);

    TagTechnicalInfo {
        detected: true,
        serial_number: meta.serial_number.as_ref().map(SerialNumber::render),
        tag_type_label: tag_type.to_string(),
        memory_info,
        atqa: meta.atqa.map(|atqa| format!("0x{atqa:04X}")),
        sak: meta.sak.map(|sak| format!("0x{sak:02X}")),
        max_size: meta.max_size,
        is_writable: meta.is_writable,
        can_make_read_only: meta.can_make_read_only,
        technologies,
    }
}

/// Capacity and sector layout, `None` when nothing is known about the memory
pub fn memory_info(technologies: &[String], max_size: Option<u32>) -> Option<String> {
    let has = |technology: &str| technologies.iter().any(|tech| tech == technology);

    if has(MIFARE_CLASSIC) {
        let Some(max_size) = max_size else {
            return Some("Mifare Classic (size unknown)".to_string());
        };

        let blocks = max_size / MIFARE_BLOCK_SIZE;
        let layout = match blocks {
            0..=16 => format!("{blocks} sectors of 4 blocks (16 bytes each)"),
            17..=40 => {
                "32 sectors of 4 blocks and 8 sectors of 16 blocks (16 bytes each)".to_string()
            }
            _ => format!("{blocks} blocks (16 bytes each)"),
        };

        return Some(format!("{} kBytes: {layout}", max_size / 1024));
    }

    if has(MIFARE_ULTRALIGHT) {
        return Some("Mifare Ultralight (512 bytes)".to_string());
    }

    let max_size = max_size?;
    let kbytes = max_size / 1024;

    Some(format!("{kbytes} kBytes ({max_size} bytes)"))
}

// private
fn atqa_from_number_or_bytes<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Atqa {
        Number(u16),
        Bytes(Vec<u8>),
    }

    let atqa = Option::<Atqa>::deserialize(deserializer)?.and_then(|atqa| match atqa {
        Atqa::Number(atqa) => Some(atqa),
        Atqa::Bytes(bytes) => match bytes.as_slice() {
            [low, high] => Some(u16::from_le_bytes([*low, *high])),
            _ => None,
        },
    });

    Ok(atqa)
}

fn colon_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02X}")).join(":")
}

/// Short technology names, duplicates dropped, first seen order kept
fn normalize_technologies(technologies: &[String]) -> Vec<String> {
    technologies
        .iter()
        .map(|tech| tech.trim())
        .map(|tech| tech.strip_prefix(ANDROID_TECH_PREFIX).unwrap_or(tech))
        .filter(|tech| !tech.is_empty())
        .unique()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn techs(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn label(names: &[&str]) -> String {
        TagType::classify(&techs(names)).to_string()
    }

    #[test]
    fn classification_order() {
        assert_eq!(
            label(&["NfcA", "MifareClassic", "Ndef"]),
            "ISO 14443-3A - Mifare Classic"
        );
        assert_eq!(
            label(&["NfcA", "MifareUltralight"]),
            "ISO 14443-3A - Mifare Ultralight"
        );
        assert_eq!(
            label(&["NdefFormatable", "NfcA"]),
            "ISO 14443-3A - NDEF Formatable"
        );
        assert_eq!(label(&["NfcA", "Ndef"]), "ISO 14443-3A");
        assert_eq!(label(&["IsoDep", "NfcB"]), "ISO 14443-3B");
        assert_eq!(label(&["NfcF", "Ndef"]), "ISO 18092 - FeliCa");
        assert_eq!(label(&["NfcV"]), "ISO 15693 - I-CODE");
        assert_eq!(label(&["IsoDep"]), "ISO 14443-4 - ISO-DEP");
        assert_eq!(label(&["Ndef"]), "NDEF Tag");
        assert_eq!(label(&["NdefFormatable"]), "NDEF Formatable Tag");
        assert_eq!(label(&["NfcBarcode", "Foo"]), "Unknown (NfcBarcode, Foo)");
        assert_eq!(label(&[]), "Unknown ()");
    }

    #[test]
    fn mifare_classic_memory_layouts() {
        let classic = techs(&["MifareClassic"]);

        assert_eq!(
            memory_info(&classic, Some(1024)).as_deref(),
            Some("1 kBytes: 64 blocks (16 bytes each)")
        );
        assert_eq!(
            memory_info(&classic, Some(4096)).as_deref(),
            Some("4 kBytes: 256 blocks (16 bytes each)")
        );
        assert_eq!(
            memory_info(&classic, Some(320)).as_deref(),
            Some(
                "0 kBytes: 32 sectors of 4 blocks and 8 sectors of 16 blocks (16 bytes each)"
            )
        );
        assert_eq!(
            memory_info(&classic, Some(256)).as_deref(),
            Some("0 kBytes: 16 sectors of 4 blocks (16 bytes each)")
        );
        assert_eq!(
            memory_info(&classic, None).as_deref(),
            Some("Mifare Classic (size unknown)")
        );
    }

    #[test]
    fn other_memory_descriptions() {
        assert_eq!(
            memory_info(&techs(&["NfcA", "MifareUltralight"]), Some(4096)).as_deref(),
            Some("Mifare Ultralight (512 bytes)")
        );
        assert_eq!(
            memory_info(&techs(&["NfcA", "Ndef"]), Some(2048)).as_deref(),
            Some("2 kBytes (2048 bytes)")
        );
        assert_eq!(
            memory_info(&techs(&["NfcA", "Ndef"]), Some(868)).as_deref(),
            Some("0 kBytes (868 bytes)")
        );
        assert_eq!(memory_info(&techs(&["NfcA"]), None), None);
    }

    #[test]
    fn inspect_mifare_classic() {
        let meta = TagMeta {
            technologies: techs(&["MifareClassic"]),
            max_size: Some(1024),
            ..Default::default()
        };

        let info = inspect(&meta);
        assert!(info.detected);
        assert_eq!(info.tag_type_label, "ISO 14443-3A - Mifare Classic");
        assert_eq!(
            info.memory_info.as_deref(),
            Some("1 kBytes: 64 blocks (16 bytes each)")
        );
        assert_eq!(info.serial_number, None);
        assert_eq!(info.atqa, None);
    }

    #[test]
    fn inspect_formats_fields() {
        let meta = TagMeta {
            serial_number: Some(SerialNumber::Bytes(vec![0x04, 0xa2, 0x1b, 0x3c])),
            technologies: techs(&["android.nfc.tech.NfcA", "android.nfc.tech.Ndef", "NfcA"]),
            atqa: Some(0x44),
            sak: Some(0x0),
            max_size: Some(868),
            is_writable: Some(true),
            can_make_read_only: Some(false),
        };

        let info = inspect(&meta);
        assert_eq!(info.serial_number.as_deref(), Some("04:A2:1B:3C"));
        assert_eq!(info.technologies, techs(&["NfcA", "Ndef"]));
        assert_eq!(info.tag_type_label, "ISO 14443-3A");
        assert_eq!(info.atqa.as_deref(), Some("0x0044"));
        assert_eq!(info.sak.as_deref(), Some("0x00"));
        assert_eq!(info.memory_info.as_deref(), Some("0 kBytes (868 bytes)"));
        assert_eq!(info.is_writable, Some(true));
        assert_eq!(info.can_make_read_only, Some(false));
    }

    #[test]
    fn serial_number_rendering() {
        assert_eq!(SerialNumber::Text("04:a2:1b".into()).render(), "04:A2:1B");
        assert_eq!(SerialNumber::Text("04a21b".into()).render(), "04:A2:1B");
        assert_eq!(
            SerialNumber::Text("not-a-serial".into()).render(),
            "not-a-serial"
        );
        assert_eq!(SerialNumber::Bytes(vec![]).render(), "");
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let info = inspect(&TagMeta::default());
        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "detected": true,
                "technologies": [],
                "tagTypeLabel": "Unknown ()",
            })
        );
    }

    #[test]
    fn atqa_deserializes_from_number_or_bytes() {
        let atqa = |json: &str| serde_json::from_str::<TagMeta>(json).unwrap().atqa;

        assert_eq!(atqa(r#"{ "atqa": 68 }"#), Some(0x0044));
        assert_eq!(atqa(r#"{ "atqa": [68, 0] }"#), Some(0x0044));
        assert_eq!(atqa(r#"{ "atqa": [4, 3] }"#), Some(0x0304));
        assert_eq!(atqa(r#"{ "atqa": null }"#), None);
        assert_eq!(atqa("{}"), None);

        // unexpected length is left out rather than failing the whole tag
        assert_eq!(atqa(r#"{ "atqa": [1, 2, 3] }"#), None);
    }

    #[test]
    fn serial_number_deserializes_from_either_shape() {
        let bytes: SerialNumber = serde_json::from_str("[4, 162]").unwrap();
        assert_eq!(bytes, SerialNumber::Bytes(vec![4, 162]));

        let text: SerialNumber = serde_json::from_str("\"04:a2\"").unwrap();
        assert_eq!(text, SerialNumber::Text("04:a2".into()));
    }
}

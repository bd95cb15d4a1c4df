use std::path::Path;

use anyhow::{Context, Result, bail};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Text encoding of an annotation file (Praat writes UTF-16 with a BOM)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
}

/// Decode file contents, detecting UTF-16 by its byte order mark
pub fn decode(bytes: &[u8]) -> Result<(String, TextEncoding)> {
    if let Some(rest) = bytes.strip_prefix(&UTF16_LE_BOM) {
        Ok((decode_utf16(rest, u16::from_le_bytes)?, TextEncoding::Utf16Le))
    } else if let Some(rest) = bytes.strip_prefix(&UTF16_BE_BOM) {
        Ok((decode_utf16(rest, u16::from_be_bytes)?, TextEncoding::Utf16Be))
    } else {
        let rest = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
        let text = String::from_utf8(rest.to_vec()).context("File is not valid UTF-8")?;
        Ok((text, TextEncoding::Utf8))
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String> {
    if bytes.len() % 2 != 0 {
        bail!("UTF-16 file has an odd number of bytes ({})", bytes.len());
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).context("File is not valid UTF-16")
}

/// Encode text; UTF-16 output starts with a byte order mark
pub fn encode(text: &str, encoding: TextEncoding) -> Vec<u8> {
    match encoding {
        TextEncoding::Utf8 => text.as_bytes().to_vec(),
        TextEncoding::Utf16Le => {
            let mut bytes = UTF16_LE_BOM.to_vec();
            bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
            bytes
        }
        TextEncoding::Utf16Be => {
            let mut bytes = UTF16_BE_BOM.to_vec();
            bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
            bytes
        }
    }
}

pub fn read_text_file(path: &Path) -> Result<(String, TextEncoding)> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    decode(&bytes).with_context(|| format!("Failed to decode file: {:?}", path))
}

pub fn write_text_file(path: &Path, text: &str, encoding: TextEncoding) -> Result<()> {
    std::fs::write(path, encode(text, encoding))
        .with_context(|| format!("Failed to write file: {:?}", path))
}

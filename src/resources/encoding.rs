//! Decoding of input bytes into UTF-8 text.
//!
//! The encoding is taken from, in this order:
//! - a byte order mark
//! - the `encoding` pseudo-attribute of the XML declaration
//! - UTF-8 as the XML default

use encoding_rs::{Encoding, UTF_8};

use crate::error::{ConvertError, Result};

/// Decodes a whole document into a `String`.
pub fn decode(bytes: &[u8]) -> Result<String> {
    let encoding = match Encoding::for_bom(bytes) {
        Some((encoding, _)) => encoding,
        None => match declared_encoding(bytes) {
            Some(label) => Encoding::for_label(label).ok_or_else(|| {
                ConvertError::Unsupported(format!(
                    "document encoding {}",
                    String::from_utf8_lossy(label)
                ))
            })?,
            None => UTF_8,
        },
    };

    // a BOM, if present, overrides the declaration and is stripped
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(ConvertError::InvalidEncoding {
            encoding: used.name(),
        });
    }
    if used != UTF_8 {
        log::debug!("Decoded document from {}", used.name());
    }
    Ok(text.into_owned())
}

/// Label of `<?xml ... encoding="..."?>`, if the document starts with one.
pub fn declared_encoding(bytes: &[u8]) -> Option<&[u8]> {
    let rest = bytes.strip_prefix(b"<?xml")?;
    let end = rest.windows(2).position(|w| w == b"?>")?;
    let decl = &rest[..end];

    let at = decl.windows(8).position(|w| w == b"encoding")?;
    let rest = trim_start(&decl[at + 8..]);
    let rest = trim_start(rest.strip_prefix(b"=")?);
    let (&quote, rest) = rest.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let len = rest.iter().position(|&b| b == quote)?;
    Some(&rest[..len])
}

fn trim_start(bytes: &[u8]) -> &[u8] {
    let skip = bytes
        .iter()
        .take_while(|b| b.is_ascii_whitespace())
        .count();
    &bytes[skip..]
}

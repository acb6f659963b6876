//! One-to-one byte/char mapping for request text
//!
//! Heads and form bodies are not guaranteed to be UTF-8. Decoding each byte
//! as the char with the same code point keeps every byte, so text taken
//! apart by the parser encodes back to the exact bytes it came from.

/// Decode bytes as ISO-8859-1
pub fn decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Encode text as ISO-8859-1
///
/// Chars above U+00FF have no single-byte form and are written as UTF-8.
pub fn encode(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match u8::try_from(c) {
            Ok(b) => out.push(b),
            Err(_) => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    out
}

//! Newline-delimited JSON framing.

/// Append the line terminator to an encoded event.
pub fn encode_line(payload: &str) -> Vec<u8> {
    let mut line = Vec::with_capacity(payload.len() + 1);
    line.extend_from_slice(payload.as_bytes());
    line.push(b'\n');
    line
}

/// Frame `payload` as a single datagram, rejecting lines over `max_size`.
pub fn datagram_line(payload: &str, max_size: usize) -> Option<Vec<u8>> {
    let size = payload.len().checked_add(1)?;
    if size > max_size {
        return None;
    }
    Some(encode_line(payload))
}

//! Canonical little-endian field encoding for approval preimages.

pub fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

pub fn put_u64(out: &mut Vec<u8>, v: u64) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// Fixed-width field; the reader knows the length.
pub fn put_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(bytes);
}

/// Variable-width field with a u32 length prefix.
pub fn put_var_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    put_u32(out, bytes.len() as u32);
    out.extend_from_slice(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_bytes_are_length_prefixed() {
        let mut a = Vec::new();
        put_var_bytes(&mut a, &[1, 2]);
        put_var_bytes(&mut a, &[3]);
        let mut b = Vec::new();
        put_var_bytes(&mut b, &[1]);
        put_var_bytes(&mut b, &[2, 3]);
        assert_ne!(a, b);
        assert_eq!(a, vec![2, 0, 0, 0, 1, 2, 1, 0, 0, 0, 3]);
    }
}

pub mod geometry;
pub mod program;
pub mod renderer;

/// Size of the buffer GL info logs are read into.
pub const INFO_LOG_LEN: usize = 1024;

/// Turns a NUL-padded info log buffer into text.
///
/// GL writes a NUL-terminated string; anything past the first NUL is stale
/// buffer content. A buffer without a NUL is taken whole.
pub fn info_log_to_string(buf: &[u8]) -> String {
    let data = match buf.iter().position(|b| *b == 0) {
        Some(end) => &buf[..end],
        None => buf,
    };

    String::from_utf8_lossy(data).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_log_stops_at_nul() {
        let mut buf = [0_u8; 16];
        buf[..5].copy_from_slice(b"error");
        buf[6..9].copy_from_slice(b"old");

        assert_eq!(info_log_to_string(&buf), "error");
    }

    #[test]
    fn info_log_without_nul() {
        assert_eq!(info_log_to_string(b"0:1(1): bad\n"), "0:1(1): bad");
    }

    #[test]
    fn info_log_empty() {
        assert_eq!(info_log_to_string(&[0; INFO_LOG_LEN]), "");
    }
}

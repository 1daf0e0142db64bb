//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;

pub mod analyze;
pub mod info;
#[cfg(feature = "mcp")]
pub mod serve;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Read all of `reader`, stopping one byte past the limit to detect overflow.
pub fn read_input_stream<R: Read>(reader: R, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    match max_bytes {
        Some(max) => {
            reader
                .take(max as u64 + 1)
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            if buf.len() > max {
                anyhow::bail!("input too large: stdin exceeds {max} bytes");
            }
        }
        None => {
            let mut reader = reader;
            reader.read_to_end(&mut buf).context("failed to read stdin")?;
        }
    }
    String::from_utf8(buf).context("stdin is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_over_limit_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.txt");
        std::fs::write(&path, "0123456789").unwrap();
        let path = camino::Utf8PathBuf::try_from(path).unwrap();

        let err = read_input_file(&path, Some(4)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
        assert_eq!(read_input_file(&path, Some(10)).unwrap(), "0123456789");
        assert_eq!(read_input_file(&path, None).unwrap(), "0123456789");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_input_file(Utf8Path::new("/nonexistent/prompt.txt"), None).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/prompt.txt"));
    }

    #[test]
    fn stream_respects_limit() {
        assert_eq!(read_input_stream("abc".as_bytes(), Some(3)).unwrap(), "abc");
        let err = read_input_stream("abcd".as_bytes(), Some(3)).unwrap_err();
        assert!(err.to_string().contains("stdin exceeds 3 bytes"));
        assert_eq!(read_input_stream("abcd".as_bytes(), None).unwrap(), "abcd");
    }

    #[test]
    fn stream_rejects_invalid_utf8() {
        let bytes: &[u8] = &[0xff, 0xfe];
        assert!(read_input_stream(bytes, None).is_err());
    }
}

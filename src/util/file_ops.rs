// File Operations
// Reads key files and writes recovered plaintext

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Read entire file into memory
pub fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(data)
}

/// Write data to file
pub fn write_file(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let path = std::env::temp_dir().join(format!("rsa_interop_{}.bin", std::process::id()));
        write_file(&path, b"hello rsa").unwrap();
        assert_eq!(read_file(&path).unwrap(), b"hello rsa");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_missing() {
        let err = read_file(Path::new("no/such/file.pem")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}

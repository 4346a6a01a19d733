use std::fs;
use std::path::Path;

use log::info;

use crate::consts;
use crate::error::InitError;

/// Raw program image, no header, loaded verbatim at 0x200.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Rom {
    buffer: Vec<u8>,
}

impl Rom {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InitError> {
        if bytes.len() > consts::MAX_ROM_BYTES {
            return Err(InitError::too_large(bytes.len()));
        }
        Ok(Rom {
            buffer: bytes.to_vec(),
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InitError> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        info!("read {} bytes from {}", data.len(), path.display());
        Self::from_bytes(&data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_limit() -> Result<(), InitError> {
        let rom = Rom::from_bytes(&[0x12, 0x00])?;
        assert_eq!(rom.as_bytes(), &[0x12, 0x00]);
        assert!(Rom::from_bytes(&[0; consts::MAX_ROM_BYTES]).is_ok());
        assert!(matches!(
            Rom::from_bytes(&[0; consts::MAX_ROM_BYTES + 1]),
            Err(InitError::ProgramTooLarge { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_from_path_round_trip() -> Result<(), InitError> {
        let path = std::env::temp_dir().join(format!("chip8-vm-rom-{}.ch8", std::process::id()));
        fs::write(&path, [0x60, 0x05, 0xA2, 0x0A])?;
        let rom = Rom::from_path(&path);
        fs::remove_file(&path)?;
        assert_eq!(rom?.as_bytes(), &[0x60, 0x05, 0xA2, 0x0A]);
        Ok(())
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Rom::from_path("/nonexistent/definitely/missing.ch8").unwrap_err();
        assert!(matches!(err, InitError::Io(_)));
    }
}

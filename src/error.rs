use thiserror::Error;

use crate::consts;

/// Errors raised while building a machine from a ROM image.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("could not read ROM: {0}")]
    Io(#[from] std::io::Error),
}

impl InitError {
    pub(crate) fn too_large(size: usize) -> Self {
        InitError::ProgramTooLarge {
            size,
            max: consts::MAX_ROM_BYTES,
        }
    }
}

/// Faults surfaced by a single machine operation. None of them leave the
/// machine in an unusable state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MachineError {
    #[error("memory access out of range at address {address:#06X}")]
    MemoryOutOfRange { address: usize },

    #[error("stack overflow: call depth exceeds {}", consts::STACK_SIZE)]
    StackOverflow,

    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("invalid opcode: {opcode:#06X}")]
    InvalidOpcode { opcode: u16 },

    #[error("invalid key index: {key:#X}")]
    InvalidKeyIndex { key: usize },
}

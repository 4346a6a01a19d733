use crate::error::MachineError;
use crate::utils;

/// Register-to-register ALU forms (`8XY_`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Load,
    Or,
    And,
    Xor,
    Add,
    Sub,
    ShiftRight,
    SubReversed,
    ShiftLeft,
}

/// Keypad skip forms (`EX__`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOp {
    SkipIfPressed,
    SkipIfReleased,
}

/// Timer, index and memory-transfer forms (`FX__`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiscOp {
    ReadDelay,
    WaitKey,
    SetDelay,
    SetSound,
    AddIndex,
    FontGlyph,
    StoreBcd,
    StoreRegisters,
    LoadRegisters,
}

/// A fully decoded opcode. Register operands are nibbles (0x0..=0xF),
/// addresses are 12 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /* 00E0 */ Clear,
    /* 00EE */ Return,
    /* 1NNN */ Jump(u16),
    /* 2NNN */ Call(u16),
    /* 3XNN */ SkipIfEqual(usize, u8),
    /* 4XNN */ SkipIfNotEqual(usize, u8),
    /* 5XY0 */ SkipIfRegistersEqual(usize, usize),
    /* 6XNN */ Load(usize, u8),
    /* 7XNN */ AddImmediate(usize, u8),
    /* 8XY_ */ Alu(AluOp, usize, usize),
    /* 9XY0 */ SkipIfRegistersNotEqual(usize, usize),
    /* ANNN */ SetIndex(u16),
    /* BNNN */ JumpOffset(u16),
    /* CXNN */ Random(usize, u8),
    /* DXYN */ Draw(usize, usize, u8),
    /* EX__ */ Key(KeyOp, usize),
    /* FX__ */ Misc(MiscOp, usize),
}

impl Instruction {
    pub fn decode(opcode: u16) -> Result<Self, MachineError> {
        let (family, x, y, n) = utils::nibble_split(opcode);
        let nn = (opcode & 0x00FF) as u8;
        let nnn = opcode & 0x0FFF;
        let (x, y) = (x as usize, y as usize);

        let instruction = match family {
            0x0 => match opcode {
                0x00E0 => Instruction::Clear,
                0x00EE => Instruction::Return,
                _ => return Err(MachineError::InvalidOpcode { opcode }),
            },
            0x1 => Instruction::Jump(nnn),
            0x2 => Instruction::Call(nnn),
            0x3 => Instruction::SkipIfEqual(x, nn),
            0x4 => Instruction::SkipIfNotEqual(x, nn),
            0x5 if n == 0 => Instruction::SkipIfRegistersEqual(x, y),
            0x6 => Instruction::Load(x, nn),
            0x7 => Instruction::AddImmediate(x, nn),
            0x8 => {
                let op = match n {
                    0x0 => AluOp::Load,
                    0x1 => AluOp::Or,
                    0x2 => AluOp::And,
                    0x3 => AluOp::Xor,
                    0x4 => AluOp::Add,
                    0x5 => AluOp::Sub,
                    0x6 => AluOp::ShiftRight,
                    0x7 => AluOp::SubReversed,
                    0xE => AluOp::ShiftLeft,
                    _ => return Err(MachineError::InvalidOpcode { opcode }),
                };
                Instruction::Alu(op, x, y)
            }
            0x9 if n == 0 => Instruction::SkipIfRegistersNotEqual(x, y),
            0xA => Instruction::SetIndex(nnn),
            0xB => Instruction::JumpOffset(nnn),
            0xC => Instruction::Random(x, nn),
            0xD => Instruction::Draw(x, y, n),
            0xE => {
                let op = match nn {
                    0x9E => KeyOp::SkipIfPressed,
                    0xA1 => KeyOp::SkipIfReleased,
                    _ => return Err(MachineError::InvalidOpcode { opcode }),
                };
                Instruction::Key(op, x)
            }
            0xF => {
                let op = match nn {
                    0x07 => MiscOp::ReadDelay,
                    0x0A => MiscOp::WaitKey,
                    0x15 => MiscOp::SetDelay,
                    0x18 => MiscOp::SetSound,
                    0x1E => MiscOp::AddIndex,
                    0x29 => MiscOp::FontGlyph,
                    0x33 => MiscOp::StoreBcd,
                    0x55 => MiscOp::StoreRegisters,
                    0x65 => MiscOp::LoadRegisters,
                    _ => return Err(MachineError::InvalidOpcode { opcode }),
                };
                Instruction::Misc(op, x)
            }
            _ => return Err(MachineError::InvalidOpcode { opcode }),
        };
        Ok(instruction)
    }
}

use crate::consts;
use crate::core::display::DisplayBuffer;
use crate::core::instruction::{AluOp, Instruction, KeyOp, MiscOp};
use crate::core::keypad::Keypad;
use crate::core::ram::Ram;
use crate::core::registers::{Registers, Stack};
use crate::core::rom::Rom;
use crate::error::{InitError, MachineError};
use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    RedrawScreen,
    Continue,
    Waiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExecState {
    Running,
    AwaitingKey(usize),
}

/// The whole machine: memory, registers, stack, display and keypad owned as
/// one aggregate, plus the fetch-decode-execute loop that drives them.
#[derive(Debug)]
pub struct Processor {
    ram: Ram,
    registers: Registers,
    stack: Stack,
    display: DisplayBuffer,
    keypad: Keypad,
    state: ExecState,
    program: Rom,
    rng: StdRng,
}

impl Processor {
    pub fn new(rom: &[u8]) -> Result<Self, InitError> {
        Self::with_rng(Rom::from_bytes(rom)?, StdRng::from_entropy())
    }

    /// Same as `new`, with a fixed seed for `CXNN`.
    pub fn with_seed(rom: &[u8], seed: u64) -> Result<Self, InitError> {
        Self::with_rng(Rom::from_bytes(rom)?, StdRng::seed_from_u64(seed))
    }

    pub fn from_rom(rom: Rom) -> Result<Self, InitError> {
        Self::with_rng(rom, StdRng::from_entropy())
    }

    fn with_rng(program: Rom, rng: StdRng) -> Result<Self, InitError> {
        let mut processor = Processor {
            ram: Ram::default(),
            registers: Registers::default(),
            stack: Stack::default(),
            display: DisplayBuffer::default(),
            keypad: Keypad::default(),
            state: ExecState::Running,
            program,
            rng,
        };
        processor.reset()?;
        Ok(processor)
    }

    /// Re-runs initialisation with the program this machine was built from.
    /// Held keys mirror the host keyboard and survive the reset, only pending
    /// presses are dropped.
    pub fn reset(&mut self) -> Result<(), InitError> {
        self.ram.init(self.program.as_bytes())?;
        self.registers = Registers::default();
        self.stack = Stack::default();
        self.display.clear();
        self.keypad.clear_presses();
        self.state = ExecState::Running;
        Ok(())
    }

    /// Executes one instruction, or polls for a key while suspended on `FX0A`.
    ///
    /// PC is advanced past the fetched opcode before it executes, so on any
    /// error other than a failed fetch the machine continues with the next
    /// instruction.
    pub fn step(&mut self) -> Result<CycleStatus, MachineError> {
        if let ExecState::AwaitingKey(x) = self.state {
            return Ok(self.resume_on_key(x));
        }

        let pc = self.registers.pc;
        let opcode = self.ram.read_word(pc as usize)?;
        self.registers.pc = pc.wrapping_add(consts::OP_CODE_BYTES);

        let result = Instruction::decode(opcode).and_then(|instruction| {
            trace!("{:#05x}: {:04X} {:?}", pc, opcode, instruction);
            self.execute(instruction)
        });
        if let Err(err) = &result {
            warn!("{:#05x}: {:04X} skipped: {}", pc, opcode, err);
        }
        result
    }

    pub fn set_key(&mut self, key: usize, pressed: bool) -> Result<(), MachineError> {
        self.keypad.set_key(key, pressed)
    }

    /// One 60 Hz timer tick.
    pub fn tick_timers(&mut self) {
        self.registers.tick_timers();
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> bool {
        self.display.is_set(x, y)
    }

    pub fn display(&self) -> &DisplayBuffer {
        &self.display
    }

    pub fn delay_timer(&self) -> u8 {
        self.registers.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.registers.sound_timer
    }

    pub fn pc(&self) -> u16 {
        self.registers.pc
    }

    pub fn index(&self) -> u16 {
        self.registers.idx_register
    }

    pub fn sp(&self) -> u8 {
        self.stack.stack_pointer()
    }

    pub fn registers(&self) -> &[u8; consts::REG_COUNT] {
        &self.registers.v
    }

    pub fn memory(&self) -> &[u8] {
        self.ram.as_slice()
    }

    pub fn is_awaiting_key(&self) -> bool {
        matches!(self.state, ExecState::AwaitingKey(_))
    }

    fn resume_on_key(&mut self, x: usize) -> CycleStatus {
        match self.keypad.take_press() {
            Some(key) => {
                debug!("key {:X} pressed, resuming into V{:X}", key, x);
                self.registers.v[x] = key;
                self.state = ExecState::Running;
                CycleStatus::Continue
            }
            None => CycleStatus::Waiting,
        }
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.registers.pc = self.registers.pc.wrapping_add(consts::OP_CODE_BYTES);
        }
    }

    fn execute(&mut self, instruction: Instruction) -> Result<CycleStatus, MachineError> {
        let v = self.registers.v;
        match instruction {
            Instruction::Clear => {
                self.display.clear();
                return Ok(CycleStatus::RedrawScreen);
            }
            Instruction::Return => {
                self.registers.pc = self.stack.pop()?;
            }
            Instruction::Jump(nnn) => {
                self.registers.pc = nnn;
            }
            Instruction::Call(nnn) => {
                self.stack.push(self.registers.pc)?;
                self.registers.pc = nnn;
            }
            Instruction::SkipIfEqual(x, nn) => self.skip_if(v[x] == nn),
            Instruction::SkipIfNotEqual(x, nn) => self.skip_if(v[x] != nn),
            Instruction::SkipIfRegistersEqual(x, y) => self.skip_if(v[x] == v[y]),
            Instruction::SkipIfRegistersNotEqual(x, y) => self.skip_if(v[x] != v[y]),
            Instruction::Load(x, nn) => {
                self.registers.v[x] = nn;
            }
            Instruction::AddImmediate(x, nn) => {
                self.registers.v[x] = v[x].wrapping_add(nn);
            }
            Instruction::Alu(op, x, y) => self.alu(op, x, y),
            Instruction::SetIndex(nnn) => {
                self.registers.idx_register = nnn;
            }
            Instruction::JumpOffset(nnn) => {
                self.registers.pc = nnn.wrapping_add(v[0] as u16) & consts::ADDRESS_MASK;
            }
            Instruction::Random(x, nn) => {
                let rand_val: u8 = self.rng.gen();
                self.registers.v[x] = nn & rand_val;
            }
            Instruction::Draw(x, y, n) => {
                let sprite = self
                    .ram
                    .slice(self.registers.idx_register as usize, n as usize)?;
                let collision = self
                    .display
                    .draw_sprite(v[x] as usize, v[y] as usize, sprite);
                self.registers.set_flag(collision);
                return Ok(CycleStatus::RedrawScreen);
            }
            Instruction::Key(op, x) => {
                let pressed = self.keypad.is_pressed(v[x] as usize);
                match op {
                    KeyOp::SkipIfPressed => self.skip_if(pressed),
                    KeyOp::SkipIfReleased => self.skip_if(!pressed),
                }
            }
            Instruction::Misc(op, x) => return self.misc(op, x),
        }
        Ok(CycleStatus::Continue)
    }

    /// `8XY_`. The result lands in Vx before VF is written, so VF holds the
    /// flag even when X is F.
    fn alu(&mut self, op: AluOp, x: usize, y: usize) {
        let vx = self.registers.v[x];
        let vy = self.registers.v[y];
        let (result, flag) = match op {
            AluOp::Load => (vy, None),
            AluOp::Or => (vx | vy, None),
            AluOp::And => (vx & vy, None),
            AluOp::Xor => (vx ^ vy, None),
            AluOp::Add => {
                let (sum, carry) = vx.overflowing_add(vy);
                (sum, Some(carry))
            }
            AluOp::Sub => (vx.wrapping_sub(vy), Some(vx >= vy)),
            AluOp::ShiftRight => (vx >> 1, Some(vx & 0b0000_0001 != 0)),
            AluOp::SubReversed => (vy.wrapping_sub(vx), Some(vy >= vx)),
            AluOp::ShiftLeft => (vx << 1, Some(vx & 0b1000_0000 != 0)),
        };
        self.registers.v[x] = result;
        if let Some(flag) = flag {
            self.registers.set_flag(flag);
        }
    }

    fn misc(&mut self, op: MiscOp, x: usize) -> Result<CycleStatus, MachineError> {
        let vx = self.registers.v[x];
        let idx = self.registers.idx_register as usize;
        match op {
            MiscOp::ReadDelay => {
                self.registers.v[x] = self.registers.delay_timer;
            }
            MiscOp::WaitKey => {
                debug!("waiting for key into V{:X}", x);
                self.keypad.clear_presses();
                self.state = ExecState::AwaitingKey(x);
                return Ok(CycleStatus::Waiting);
            }
            MiscOp::SetDelay => {
                self.registers.delay_timer = vx;
            }
            MiscOp::SetSound => {
                self.registers.sound_timer = vx;
            }
            MiscOp::AddIndex => {
                self.registers.idx_register =
                    self.registers.idx_register.wrapping_add(vx as u16) & consts::ADDRESS_MASK;
            }
            MiscOp::FontGlyph => {
                self.registers.idx_register = vx as u16 * consts::FONT_GLYPH_BYTES as u16;
            }
            MiscOp::StoreBcd => {
                let digits = [vx / 100, (vx / 10) % 10, vx % 10];
                self.ram.slice_mut(idx, digits.len())?.copy_from_slice(&digits);
            }
            MiscOp::StoreRegisters => {
                self.ram
                    .slice_mut(idx, x + 1)?
                    .copy_from_slice(&self.registers.v[..=x]);
            }
            MiscOp::LoadRegisters => {
                let src = self.ram.slice(idx, x + 1)?;
                self.registers.v[..=x].copy_from_slice(src);
            }
        }
        Ok(CycleStatus::Continue)
    }
}

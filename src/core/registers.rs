use crate::consts;
use crate::error::MachineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; consts::REG_COUNT],
    pub idx_register: u16,
    pub pc: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
}

impl Default for Registers {
    fn default() -> Self {
        Registers {
            v: [0; consts::REG_COUNT],
            idx_register: 0,
            pc: consts::PROG_OFFSET as u16,
            delay_timer: 0,
            sound_timer: 0,
        }
    }
}

impl Registers {
    pub fn set_flag(&mut self, flag: bool) {
        self.v[consts::FLAG_REG] = flag as u8;
    }

    /// Decrements both timers, stopping at zero.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

/// Return-address stack. `stack_pointer` counts occupied slots.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stack {
    slots: [u16; consts::STACK_SIZE],
    stack_pointer: u8,
}

impl Stack {
    pub fn push(&mut self, addr: u16) -> Result<(), MachineError> {
        let sp = self.stack_pointer as usize;
        if sp >= consts::STACK_SIZE {
            return Err(MachineError::StackOverflow);
        }
        self.slots[sp] = addr;
        self.stack_pointer += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, MachineError> {
        if self.stack_pointer == 0 {
            return Err(MachineError::StackUnderflow);
        }
        self.stack_pointer -= 1;
        Ok(self.slots[self.stack_pointer as usize])
    }

    pub fn stack_pointer(&self) -> u8 {
        self.stack_pointer
    }
}

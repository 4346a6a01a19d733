use crate::consts;
use crate::error::MachineError;

/// Hex keypad state. The host writes it through `set_key`, opcodes only read.
///
/// Besides the held state, each key remembers whether it went from released
/// to pressed since the last `clear_presses`, which is what `FX0A` waits on.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Keypad {
    held: [bool; consts::KEYBOARD_SIZE],
    pressed_since: [bool; consts::KEYBOARD_SIZE],
}

impl Keypad {
    pub fn set_key(&mut self, key: usize, pressed: bool) -> Result<(), MachineError> {
        let held = self
            .held
            .get_mut(key)
            .ok_or(MachineError::InvalidKeyIndex { key })?;
        if pressed && !*held {
            self.pressed_since[key] = true;
        }
        *held = pressed;
        Ok(())
    }

    /// Out-of-range ids read as released.
    pub fn is_pressed(&self, key: usize) -> bool {
        self.held.get(key).copied().unwrap_or(false)
    }

    pub fn clear_presses(&mut self) {
        self.pressed_since = [false; consts::KEYBOARD_SIZE];
    }

    /// Lowest key that transitioned to pressed since the last clear.
    pub fn take_press(&mut self) -> Option<u8> {
        let key = self.pressed_since.iter().position(|&p| p)?;
        self.clear_presses();
        Some(key as u8)
    }
}

/// Host key code for each logical key, indexed by key id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap<K> {
    map: [K; consts::KEYBOARD_SIZE],
}

impl<K: Copy + PartialEq> Keymap<K> {
    pub fn new(map: [K; consts::KEYBOARD_SIZE]) -> Self {
        Keymap { map }
    }

    pub fn logical(&self, code: K) -> Option<usize> {
        self.map.iter().position(|&k| k == code)
    }

    pub fn physical(&self, key: usize) -> Option<K> {
        self.map.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_key_range() {
        let mut keypad = Keypad::default();
        assert_eq!(keypad.set_key(0xF, true), Ok(()));
        assert!(keypad.is_pressed(0xF));
        assert_eq!(
            keypad.set_key(16, true),
            Err(MachineError::InvalidKeyIndex { key: 16 })
        );
        assert!(!keypad.is_pressed(16));
    }

    #[test]
    fn test_release() -> Result<(), MachineError> {
        let mut keypad = Keypad::default();
        keypad.set_key(4, true)?;
        keypad.set_key(4, false)?;
        assert!(!keypad.is_pressed(4));
        Ok(())
    }

    #[test]
    fn test_take_press_needs_transition() -> Result<(), MachineError> {
        let mut keypad = Keypad::default();
        keypad.set_key(7, true)?;
        keypad.clear_presses();
        // still held, but no new transition
        keypad.set_key(7, true)?;
        assert_eq!(keypad.take_press(), None);

        keypad.set_key(9, true)?;
        keypad.set_key(3, true)?;
        assert_eq!(keypad.take_press(), Some(3));
        assert_eq!(keypad.take_press(), None);
        Ok(())
    }

    #[test]
    fn test_press_and_release_still_counts() -> Result<(), MachineError> {
        let mut keypad = Keypad::default();
        keypad.set_key(0xA, true)?;
        keypad.set_key(0xA, false)?;
        assert_eq!(keypad.take_press(), Some(0xA));
        Ok(())
    }

    #[test]
    fn test_keymap_lookups() {
        let keymap = Keymap::new([
            'x', '1', '2', '3', 'q', 'w', 'e', 'a', 's', 'd', 'z', 'c', '4', 'r', 'f', 'v',
        ]);
        assert_eq!(keymap.logical('x'), Some(0x0));
        assert_eq!(keymap.logical('v'), Some(0xF));
        assert_eq!(keymap.logical('p'), None);
        assert_eq!(keymap.physical(0xC), Some('4'));
        assert_eq!(keymap.physical(16), None);
    }
}

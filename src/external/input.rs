use sdl2;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_vm::{Keymap, Processor};

/// Left-hand block of a QWERTY keyboard, indexed by CHIP-8 key id.
pub const CONVENTIONAL_KEYMAP: [Keycode; 16] = [
    Keycode::X,    // 0
    Keycode::Num1, // 1
    Keycode::Num2, // 2
    Keycode::Num3, // 3
    Keycode::Q,    // 4
    Keycode::W,    // 5
    Keycode::E,    // 6
    Keycode::A,    // 7
    Keycode::S,    // 8
    Keycode::D,    // 9
    Keycode::Z,    // A
    Keycode::C,    // B
    Keycode::Num4, // C
    Keycode::R,    // D
    Keycode::F,    // E
    Keycode::V,    // F
];

pub struct KeyboardDriver {
    events: sdl2::EventPump,
    keymap: Keymap<Keycode>,
}

impl KeyboardDriver {
    pub fn new(context: &sdl2::Sdl, keymap: Keymap<Keycode>) -> Result<Self, String> {
        Ok(KeyboardDriver {
            events: context.event_pump()?,
            keymap,
        })
    }

    /// Forwards key transitions to the machine. Returns false once the user
    /// asks to quit.
    pub fn poll(&mut self, processor: &mut Processor) -> bool {
        for event in self.events.poll_iter() {
            let (code, pressed) = match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return false,
                Event::KeyDown {
                    keycode: Some(code),
                    repeat: false,
                    ..
                } => (code, true),
                Event::KeyUp {
                    keycode: Some(code),
                    ..
                } => (code, false),
                _ => continue,
            };
            if let Some(key) = self.keymap.logical(code) {
                if let Err(err) = processor.set_key(key, pressed) {
                    log::warn!("dropping key event: {}", err);
                }
            }
        }
        true
    }
}

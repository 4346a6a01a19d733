use chip8_vm::consts;
use chip8_vm::{Processor, Tone};
use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const OFF: Color = Color::RGB(0, 0, 0);
const ON: Color = Color::RGB(0, 255, 0);

pub struct DisplayDriver {
    screen: Canvas<Window>,
    scale: u32,
}

impl DisplayDriver {
    pub fn new(context: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = context.video()?;
        let window = video_subsystem
            .window(
                "CHIP-8",
                consts::DISPL_WIDTH as u32 * scale,
                consts::DISPL_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        canvas.set_draw_color(OFF);
        canvas.clear();
        canvas.present();

        Ok(DisplayDriver {
            screen: canvas,
            scale,
        })
    }

    pub fn draw(&mut self, processor: &Processor) -> Result<(), String> {
        self.screen.set_draw_color(OFF);
        self.screen.clear();
        self.screen.set_draw_color(ON);
        for y in 0..consts::DISPL_HEIGHT {
            for x in 0..consts::DISPL_WIDTH {
                if !processor.get_pixel(x, y) {
                    continue;
                }
                self.screen.fill_rect(Rect::new(
                    (x as u32 * self.scale) as i32,
                    (y as u32 * self.scale) as i32,
                    self.scale,
                    self.scale,
                ))?;
            }
        }
        self.screen.present();
        Ok(())
    }
}

const TONE_HZ: f32 = 440.0;
const VOLUME: f32 = 0.2;

pub struct SquareWave {
    phase_inc: f32,
    phase: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase <= 0.5 { VOLUME } else { -VOLUME };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

pub struct AudioDriver {
    device: AudioDevice<SquareWave>,
}

impl AudioDriver {
    pub fn new(context: &sdl2::Sdl) -> Result<Self, String> {
        let audio_subsystem = context.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };
        let device = audio_subsystem.open_playback(None, &desired, |spec| SquareWave {
            phase_inc: TONE_HZ / spec.freq as f32,
            phase: 0.0,
        })?;
        Ok(AudioDriver { device })
    }
}

impl Tone for AudioDriver {
    fn start(&mut self) {
        self.device.resume();
    }

    fn stop(&mut self) {
        self.device.pause();
    }
}

mod external;

use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use chip8_vm::{consts, CycleStatus, Keymap, Processor, Rom, Ticker, TimerDriver};
use clap::Parser;
use log::info;

use crate::external::input::{KeyboardDriver, CONVENTIONAL_KEYMAP};
use crate::external::output::{AudioDriver, DisplayDriver};

#[derive(Parser, Debug)]
#[command(name = "chip8-vm", about = "Run a CHIP-8 ROM in an SDL window.")]
struct Args {
    /// ROM image to load at 0x200.
    rom: PathBuf,

    /// Instructions executed per second.
    #[arg(long, default_value_t = consts::DEFAULT_INSTRUCTION_HZ)]
    hz: u32,

    /// Window pixels per CHIP-8 pixel.
    #[arg(long, default_value_t = consts::SCALE_FACTOR)]
    scale: u32,

    /// Fixed seed for the random number opcode.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let rom = Rom::from_path(&args.rom)?;
    let mut chip8 = match args.seed {
        Some(seed) => Processor::with_seed(rom.as_bytes(), seed)?,
        None => Processor::from_rom(rom)?,
    };

    let context = sdl2::init()?;
    let mut display = DisplayDriver::new(&context, args.scale)?;
    let mut keyboard = KeyboardDriver::new(&context, Keymap::new(CONVENTIONAL_KEYMAP))?;
    let mut timers = TimerDriver::new(AudioDriver::new(&context)?);

    info!("running {} at {} Hz", args.rom.display(), args.hz);
    let mut cpu_clock = Ticker::new(args.hz);
    let mut timer_clock = Ticker::new(consts::TIMER_HZ);
    let mut redraw = true;

    while keyboard.poll(&mut chip8) {
        let now = Instant::now();
        for _ in 0..cpu_clock.due(now) {
            // faults are logged by the processor and never stop the loop
            if let Ok(CycleStatus::RedrawScreen) = chip8.step() {
                redraw = true;
            }
        }
        for _ in 0..timer_clock.due(now) {
            timers.tick(&mut chip8);
        }
        if redraw {
            display.draw(&chip8)?;
            redraw = false;
        }

        let now = Instant::now();
        thread::sleep(cpu_clock.until_next(now).min(timer_clock.until_next(now)));
    }
    Ok(())
}

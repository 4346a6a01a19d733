use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::consts;
use crate::core::processor::Processor;

/// Audio collaborator. Only told about edges: `start` when the sound timer
/// becomes active, `stop` on the tick it runs out.
pub trait Tone {
    fn start(&mut self);
    fn stop(&mut self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Silence;

impl Tone for Silence {
    fn start(&mut self) {}
    fn stop(&mut self) {}
}

/// Fixed-rate schedule. Hosts keep one per clock (instructions, timers) so
/// the two never drift into each other.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Instant,
}

// A host that stalls longer than this resynchronises instead of replaying
// every missed period.
const MAX_LAG: Duration = Duration::from_secs(1);

impl Ticker {
    pub fn new(frequency_hz: u32) -> Self {
        Self::starting_at(frequency_hz, Instant::now())
    }

    pub fn starting_at(frequency_hz: u32, start: Instant) -> Self {
        let period = Duration::from_secs(1) / frequency_hz.max(1);
        Ticker {
            period,
            next: start + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of whole periods that have come due by `now`.
    pub fn due(&mut self, now: Instant) -> u32 {
        if now.saturating_duration_since(self.next) > MAX_LAG {
            debug!("ticker fell behind, resynchronising");
            self.next = now + self.period;
            return 1;
        }
        let mut count = 0;
        while now >= self.next {
            self.next += self.period;
            count += 1;
        }
        count
    }

    pub fn until_next(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }
}

/// Drives the delay and sound timers and keeps the tone in step with the
/// sound timer.
#[derive(Debug)]
pub struct TimerDriver<T> {
    tone: T,
    sounding: bool,
}

impl<T: Tone> TimerDriver<T> {
    pub fn new(tone: T) -> Self {
        TimerDriver {
            tone,
            sounding: false,
        }
    }

    /// The tone is on for every tick that finds the sound timer above zero,
    /// and goes off on the tick that brings it to zero.
    pub fn tick(&mut self, processor: &mut Processor) {
        let active = processor.sound_timer() > 0;
        if active && !self.sounding {
            self.tone.start();
            self.sounding = true;
        }
        processor.tick_timers();
        if self.sounding && processor.sound_timer() == 0 {
            self.tone.stop();
            self.sounding = false;
        }
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }

    pub fn into_tone(self) -> T {
        self.tone
    }
}

/// Runs `driver` at 60 Hz on its own thread until `stop` is raised. The
/// machine is only touched while holding its lock, one batch of ticks at a
/// time. The driver is handed back on join.
pub fn spawn_timer_thread<T>(
    machine: Arc<Mutex<Processor>>,
    mut driver: TimerDriver<T>,
    stop: Arc<AtomicBool>,
) -> JoinHandle<TimerDriver<T>>
where
    T: Tone + Send + 'static,
{
    thread::spawn(move || {
        let mut ticker = Ticker::new(consts::TIMER_HZ);
        while !stop.load(Ordering::Relaxed) {
            let due = ticker.due(Instant::now());
            if due > 0 {
                let Ok(mut processor) = machine.lock() else {
                    warn!("machine lock poisoned, timer thread exiting");
                    break;
                };
                for _ in 0..due {
                    driver.tick(&mut processor);
                }
            }
            thread::sleep(ticker.until_next(Instant::now()));
        }
        driver
    })
}

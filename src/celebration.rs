use crate::logger;
use rand::Rng;
use std::time::{Duration, Instant};

pub const CELEBRATION_DURATION: Duration = Duration::from_secs(5);
pub const CONFETTI_PALETTE_SIZE: usize = 5;
const PARTICLE_COUNT: usize = 150;

/// One confetti piece. Coordinates are fractions of the screen; `y` starts
/// above the top edge so pieces rain in.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Screen heights per second.
    pub velocity: f32,
    pub angle: u16,
    pub spin: i16,
    pub color: usize,
}

impl Particle {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            x: rng.gen_range(0.0..1.0),
            y: rng.gen_range(-1.0..0.0),
            velocity: rng.gen_range(0.15..0.45),
            angle: rng.gen_range(0..360),
            spin: if rng.gen_bool(0.5) { 1 } else { -1 },
            color: rng.gen_range(0..CONFETTI_PALETTE_SIZE),
        }
    }

    fn advance<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        self.y += self.velocity * dt;
        self.angle = (self.angle as i32 + self.spin as i32 * 6).rem_euclid(360) as u16;
        if self.y > 1.0 {
            self.y = -0.05;
            self.x = rng.gen_range(0.0..1.0);
        }
    }
}

/// The expiry deadline and the particle field are held together, so
/// every way of ending the effect releases both.
#[derive(Debug)]
struct Effect {
    deadline: Instant,
    last_frame: Instant,
    particles: Vec<Particle>,
}

/// Time-bounded confetti shown when a section is completed for the first
/// time.
#[derive(Debug)]
pub struct Celebration {
    duration: Duration,
    effect: Option<Effect>,
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}

impl Celebration {
    pub fn new() -> Self {
        Self::with_duration(CELEBRATION_DURATION)
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self {
            duration,
            effect: None,
        }
    }

    /// Starts the effect, or restarts the timer if it is already running.
    /// Effects never stack.
    pub fn activate<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) {
        let deadline = now + self.duration;
        match self.effect.as_mut() {
            Some(effect) => {
                effect.deadline = deadline;
                logger::log("Celebration timer restarted");
            }
            None => {
                self.effect = Some(Effect {
                    deadline,
                    last_frame: now,
                    particles: (0..PARTICLE_COUNT).map(|_| Particle::random(rng)).collect(),
                });
                logger::log("Celebration started");
            }
        }
    }

    pub fn deactivate(&mut self) {
        if self.effect.take().is_some() {
            logger::log("Celebration ended");
        }
    }

    pub fn is_active(&self) -> bool {
        self.effect.is_some()
    }

    /// Time left before the effect expires on its own.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.effect
            .as_ref()
            .map(|effect| effect.deadline.saturating_duration_since(now))
    }

    pub fn particles(&self) -> &[Particle] {
        self.effect
            .as_ref()
            .map(|effect| effect.particles.as_slice())
            .unwrap_or(&[])
    }

    /// Advances one frame. Expires the effect once its deadline has passed
    /// and returns whether it is still running.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> bool {
        let Some(effect) = self.effect.as_mut() else {
            return false;
        };
        if now >= effect.deadline {
            self.deactivate();
            return false;
        }
        let dt = now.saturating_duration_since(effect.last_frame).as_secs_f32();
        effect.last_frame = now;
        for particle in &mut effect.particles {
            particle.advance(dt, rng);
        }
        true
    }
}

impl Drop for Celebration {
    fn drop(&mut self) {
        self.deactivate();
    }
}

use std::f32::consts::TAU;

use engine::{Rgba, Vec2};

use crate::rng::GameRng;

pub const ATTACK_ANIMATION_SECONDS: f32 = 0.5;
pub const ATTACK_PARTICLE_LIFE: f32 = 0.3;
pub const HIT_PARTICLE_LIFE: f32 = 0.5;
pub const DAMAGE_NUMBER_LIFE: f32 = 2.0;
pub const DAMAGE_NUMBER_RISE_PER_SECOND: f32 = 50.0;

const CRITICAL_PARTICLE_COUNT: usize = 15;
const NORMAL_PARTICLE_COUNT: usize = 8;
const HIT_PARTICLE_COUNT: usize = 8;
const CRITICAL_COLOR: Rgba = [255, 68, 68, 255];
const DAGGER_COLOR: Rgba = [255, 215, 0, 255];
const PLAIN_COLOR: Rgba = [255, 255, 255, 255];
const HIT_COLOR: Rgba = [255, 107, 107, 255];
const DAGGER_ICON: &str = "🗡️";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub color: Rgba,
}

impl Particle {
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.life -= dt;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageNumber {
    pub position: Vec2,
    pub amount: i32,
    pub critical: bool,
    pub life: f32,
    pub max_life: f32,
}

impl DamageNumber {
    pub fn spawn(anchor: Vec2, amount: i32, critical: bool, rng: &mut GameRng) -> Self {
        Self {
            position: Vec2::new(anchor.x + rng.unit() * 20.0 - 10.0, anchor.y - 10.0),
            amount,
            critical,
            life: DAMAGE_NUMBER_LIFE,
            max_life: DAMAGE_NUMBER_LIFE,
        }
    }

    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttackKind {
    #[default]
    Normal,
    Critical,
}

impl AttackKind {
    pub fn is_critical(self) -> bool {
        self == AttackKind::Critical
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttackAnimation {
    pub active: bool,
    pub remaining: f32,
    pub kind: AttackKind,
    pub particles: Vec<Particle>,
}

impl AttackAnimation {
    /// Restarts the swing with a ring of evenly spaced particles around
    /// `origin`.
    pub fn start(&mut self, kind: AttackKind, origin: Vec2, weapon_icon: Option<&str>, rng: &mut GameRng) {
        let (count, color) = match kind {
            AttackKind::Critical => (CRITICAL_PARTICLE_COUNT, CRITICAL_COLOR),
            AttackKind::Normal if weapon_icon == Some(DAGGER_ICON) => {
                (NORMAL_PARTICLE_COUNT, DAGGER_COLOR)
            }
            AttackKind::Normal => (NORMAL_PARTICLE_COUNT, PLAIN_COLOR),
        };
        self.active = true;
        self.remaining = ATTACK_ANIMATION_SECONDS;
        self.kind = kind;
        self.particles.clear();
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            let speed = 100.0 + rng.unit() * 50.0;
            self.particles.push(Particle {
                position: origin,
                velocity: Vec2::from_angle(angle) * speed,
                life: ATTACK_PARTICLE_LIFE,
                max_life: ATTACK_PARTICLE_LIFE,
                color,
            });
        }
    }

    pub fn advance(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.active = false;
            self.particles.clear();
            return;
        }
        advance_particles(&mut self.particles, dt);
    }
}

pub fn hit_burst(center: Vec2, rng: &mut GameRng) -> impl Iterator<Item = Particle> + '_ {
    (0..HIT_PARTICLE_COUNT).map(move |_| {
        let angle = rng.angle();
        let speed = 50.0 + rng.unit() * 100.0;
        Particle {
            position: center,
            velocity: Vec2::from_angle(angle) * speed,
            life: HIT_PARTICLE_LIFE,
            max_life: HIT_PARTICLE_LIFE,
            color: HIT_COLOR,
        }
    })
}

pub fn advance_particles(particles: &mut Vec<Particle>, dt: f32) {
    for particle in particles.iter_mut() {
        particle.advance(dt);
    }
    particles.retain(|particle| particle.life > 0.0);
}

pub fn advance_damage_numbers(numbers: &mut Vec<DamageNumber>, dt: f32) {
    for number in numbers.iter_mut() {
        number.position.y -= DAMAGE_NUMBER_RISE_PER_SECOND * dt;
        number.life -= dt;
    }
    numbers.retain(|number| number.life > 0.0);
}

use crate::params::Course;

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,  // Delta time for this step
    pub now: f32, // Total elapsed time
}

impl Time {
    pub fn new(dt: f32, now: f32) -> Self {
        Self { dt, now }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self {
            dt: 0.016,
            now: 0.0,
        }
    }
}

/// Eco points collected on this ride
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub points: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, points: u32) {
        self.points = self.points.saturating_add(points);
    }
}

/// Remaining seconds of the pickup speed boost
#[derive(Debug, Clone, Copy, Default)]
pub struct Boost {
    pub timer: f32, // 0 = inactive
}

impl Boost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, duration: f32) {
        self.timer = duration.max(0.0);
    }

    pub fn cancel(&mut self) {
        self.timer = 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        if self.timer > 0.0 {
            self.timer = (self.timer - dt).max(0.0);
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Held rider intents, sampled once at the start of a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub accelerate: bool,
    pub reverse: bool,
    pub brake: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// +1 left, -1 right, 0 when neither or both are held
    pub fn steer(&self) -> f32 {
        (self.turn_left as i8 - self.turn_right as i8) as f32
    }
}

/// Things that happened during the last step
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub pickups_collected: u32,
    pub obstacle_hits: u32,
    pub boost_started: bool,
    pub new_tip: Option<usize>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.pickups_collected = 0;
        self.obstacle_hits = 0;
        self.boost_started = false;
        self.new_tip = None;
    }
}

pub const TRAIL_TIPS: &[&str] = &[
    "Every ride is a chance to cut emissions. Pedal for cleaner air!",
    "Collect recyclables and keep the trail green.",
    "Reduce, reuse, recycle: build habits that protect our planet.",
    "Sustainable commutes start with small choices like biking today.",
    "Support local ecosystems by keeping waste out of nature trails.",
];

pub const CIRCUIT_TIPS: &[&str] = &[
    "Draft smart and keep the city clean: zero-emission racing!",
    "Grab the recyclables to unlock eco boosts.",
    "Reduce, reuse, recycle: every lap matters.",
    "Sustainable commutes start with bikes, not burnouts.",
    "Protect green spaces by staying on the track.",
];

/// Eco tip shown in the dialogue box
#[derive(Debug, Clone)]
pub struct Tips {
    lines: &'static [&'static str],
    current: usize,
}

impl Tips {
    pub fn new(lines: &'static [&'static str]) -> Self {
        Self { lines, current: 0 }
    }

    pub fn for_course(course: Course) -> Self {
        match course {
            Course::Trail => Self::new(TRAIL_TIPS),
            Course::Circuit => Self::new(CIRCUIT_TIPS),
        }
    }

    /// Show a new tip chosen uniformly at random (repeats allowed)
    pub fn pick(&mut self, rng: &mut GameRng) -> usize {
        use rand::Rng;
        if !self.lines.is_empty() {
            self.current = rng.0.gen_range(0..self.lines.len());
        }
        self.current
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &'static str {
        self.lines.get(self.current).copied().unwrap_or("")
    }
}

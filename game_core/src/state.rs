//! Owned game state for a single ride

use glam::Vec3;
use hecs::{Entity, World};

use crate::{
    create_obstacle, create_pickup, create_rider, step, Boost, ConfigError, Config, Controls,
    Events, GameRng, Obstacle, Pickup, Pose, Rider, Score, Spin, Time, Tips,
};

/// Render-facing view of a pickup or obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropView {
    pub pos: Vec3,
    pub spin_y: f32,
    pub spin_z: f32,
    pub visible: bool,
}

/// Everything one ride needs, driven by a single frame loop
pub struct GameState {
    pub world: World,
    pub rider: Entity,
    pub config: Config,
    pub time: Time,
    pub boost: Boost,
    pub score: Score,
    pub events: Events,
    pub tips: Tips,
    pub rng: GameRng,
}

impl GameState {
    /// Validate `config` and lay out the course
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = World::new();
        let mut rng = GameRng::new(seed);

        let rider = create_rider(&mut world, config.track.rider_spawn());

        let spin = config.course.pickup_spin();
        for pos in config.track.pickup_spots(config.pickup_count, &mut rng) {
            create_pickup(&mut world, pos, spin);
        }
        for pos in config.track.obstacle_spots(config.obstacle_count) {
            create_obstacle(&mut world, pos);
        }

        let mut tips = Tips::for_course(config.course);
        tips.pick(&mut rng);

        tracing::info!(
            course = ?config.course,
            pickups = config.pickup_count,
            obstacles = config.obstacle_count,
            seed,
            "ride ready"
        );

        Ok(Self {
            world,
            rider,
            config,
            time: Time::new(0.0, 0.0),
            boost: Boost::new(),
            score: Score::new(),
            events: Events::new(),
            tips,
            rng,
        })
    }

    /// Run one frame with the given elapsed seconds and held controls
    pub fn step(&mut self, dt: f32, controls: Controls) {
        self.time.dt = dt.max(0.0);
        step(
            &mut self.world,
            &mut self.time,
            &self.config,
            &controls,
            &mut self.boost,
            &mut self.score,
            &mut self.events,
            &mut self.tips,
            &mut self.rng,
        );
    }

    pub fn pose(&self) -> Pose {
        self.world
            .get::<&Pose>(self.rider)
            .map(|pose| *pose)
            .unwrap_or_else(|_| self.config.track.rider_spawn())
    }

    pub fn velocity(&self) -> f32 {
        self.world
            .get::<&Rider>(self.rider)
            .map(|rider| rider.velocity)
            .unwrap_or(0.0)
    }

    pub fn speed_readout(&self) -> u32 {
        self.config.speed_readout(self.velocity())
    }

    pub fn score(&self) -> u32 {
        self.score.points
    }

    pub fn boost_active(&self) -> bool {
        self.boost.is_active()
    }

    pub fn tip(&self) -> &'static str {
        self.tips.current()
    }

    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn pickups(&self) -> Vec<PropView> {
        let mut query = self.world.query::<(&Pose, &Pickup, &Spin)>();
        query
            .iter()
            .map(|(_e, (pose, pickup, spin))| PropView {
                pos: pose.pos,
                spin_y: spin.y,
                spin_z: spin.z,
                visible: pickup.visible,
            })
            .collect()
    }

    pub fn obstacles(&self) -> Vec<PropView> {
        let mut query = self.world.query::<(&Pose, &Obstacle, &Spin)>();
        query
            .iter()
            .map(|(_e, (pose, _, spin))| PropView {
                pos: pose.pos,
                spin_y: spin.y,
                spin_z: spin.z,
                visible: true,
            })
            .collect()
    }
}

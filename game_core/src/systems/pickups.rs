use glam::Vec3;
use hecs::World;

use crate::components::*;
use crate::params::Config;
use crate::resources::*;

/// Collect every visible pickup within reach of a rider
pub fn collect_pickups(
    world: &mut World,
    config: &Config,
    score: &mut Score,
    boost: &mut Boost,
    tips: &mut Tips,
    events: &mut Events,
    rng: &mut GameRng,
) {
    let riders: Vec<Vec3> = world
        .query::<(&Pose, &Rider)>()
        .iter()
        .map(|(_e, (pose, _))| pose.pos)
        .collect();

    for (entity, (pose, pickup)) in world.query_mut::<(&Pose, &mut Pickup)>() {
        if !pickup.visible {
            continue;
        }
        let in_reach = riders
            .iter()
            .any(|rider| rider.distance(pose.pos) < config.pickup_radius);
        if !in_reach || !pickup.collect() {
            continue;
        }

        score.add(config.pickup_points);
        events.pickups_collected += 1;
        if config.pickup_boost {
            boost.start(config.physics.boost_duration);
            events.boost_started = true;
        }
        events.new_tip = Some(tips.pick(rng));

        tracing::debug!(
            pickup = entity.id(),
            points = score.points,
            boosted = config.pickup_boost,
            "pickup collected"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pickup, create_rider, Params};

    struct Fixture {
        world: World,
        config: Config,
        score: Score,
        boost: Boost,
        tips: Tips,
        events: Events,
        rng: GameRng,
    }

    impl Fixture {
        fn new(config: Config) -> Self {
            let tips = Tips::for_course(config.course);
            Self {
                world: World::new(),
                config,
                score: Score::new(),
                boost: Boost::new(),
                tips,
                events: Events::new(),
                rng: GameRng::new(42),
            }
        }

        fn run(&mut self) {
            self.events.clear();
            collect_pickups(
                &mut self.world,
                &self.config,
                &mut self.score,
                &mut self.boost,
                &mut self.tips,
                &mut self.events,
                &mut self.rng,
            );
        }
    }

    #[test]
    fn test_pickup_in_reach_is_collected_once() {
        let mut fx = Fixture::new(Config::circuit());
        create_rider(&mut fx.world, Pose::at(Vec3::new(20.0, 0.5, 0.0)));
        let pickup = create_pickup(&mut fx.world, Vec3::new(19.5, 0.5, 0.0), (0.0, 0.0));

        fx.run();
        assert_eq!(fx.score.points, Params::PICKUP_POINTS);
        assert_eq!(fx.events.pickups_collected, 1);
        assert!(fx.events.new_tip.is_some());
        assert!(!fx.world.get::<&Pickup>(pickup).unwrap().visible);

        // Still in reach next frame: nothing more
        fx.run();
        assert_eq!(fx.score.points, Params::PICKUP_POINTS);
        assert_eq!(fx.events.pickups_collected, 0);
        assert!(fx.events.new_tip.is_none());
    }

    #[test]
    fn test_pickup_starts_boost_on_circuit() {
        let mut fx = Fixture::new(Config::circuit());
        create_rider(&mut fx.world, Pose::at(Vec3::new(20.0, 0.5, 0.0)));
        create_pickup(&mut fx.world, Vec3::new(19.5, 0.5, 0.0), (0.0, 0.0));

        fx.run();

        assert_eq!(fx.boost.timer, Params::BOOST_DURATION);
        assert!(fx.events.boost_started);
    }

    #[test]
    fn test_trail_pickup_has_no_boost() {
        let mut fx = Fixture::new(Config::trail());
        create_rider(&mut fx.world, Pose::at(Vec3::new(0.0, 0.5, 0.0)));
        create_pickup(&mut fx.world, Vec3::new(0.5, 0.35, 0.0), (0.0, 0.0));

        fx.run();

        assert_eq!(fx.score.points, Params::TRAIL_PICKUP_POINTS);
        assert!(!fx.boost.is_active());
        assert!(!fx.events.boost_started);
    }

    #[test]
    fn test_pickup_out_of_reach_is_left() {
        let mut fx = Fixture::new(Config::circuit());
        create_rider(&mut fx.world, Pose::at(Vec3::new(20.0, 0.5, 0.0)));
        let pickup = create_pickup(&mut fx.world, Vec3::new(18.7, 0.5, 0.0), (0.0, 0.0));

        fx.run();

        assert_eq!(fx.score.points, 0);
        assert!(fx.world.get::<&Pickup>(pickup).unwrap().visible);
    }

    #[test]
    fn test_reach_is_strict() {
        let mut fx = Fixture::new(Config::circuit());
        create_rider(&mut fx.world, Pose::at(Vec3::new(0.0, 0.0, 0.0)));
        create_pickup(&mut fx.world, Vec3::new(1.25, 0.0, 0.0), (0.0, 0.0));

        fx.run();

        assert_eq!(fx.score.points, 0);
    }

    #[test]
    fn test_two_pickups_same_frame() {
        let mut fx = Fixture::new(Config::circuit());
        create_rider(&mut fx.world, Pose::at(Vec3::new(20.0, 0.5, 0.0)));
        create_pickup(&mut fx.world, Vec3::new(19.6, 0.5, 0.2), (0.0, 0.0));
        create_pickup(&mut fx.world, Vec3::new(19.6, 0.5, -0.2), (0.0, 0.0));

        fx.run();

        assert_eq!(fx.score.points, 2 * Params::PICKUP_POINTS);
        assert_eq!(fx.events.pickups_collected, 2);
    }

    #[test]
    fn test_no_rider_collects_nothing() {
        let mut fx = Fixture::new(Config::circuit());
        create_pickup(&mut fx.world, Vec3::ZERO, (0.0, 0.0));

        fx.run();

        assert_eq!(fx.score.points, 0);
    }
}

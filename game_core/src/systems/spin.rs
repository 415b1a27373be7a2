use hecs::World;

use crate::{Pickup, Spin, Time};

/// Idle rotation for props. Collected pickups stop turning.
pub fn spin_props(world: &mut World, time: &Time) {
    for (_entity, (spin, pickup)) in world.query_mut::<(&mut Spin, Option<&Pickup>)>() {
        if pickup.is_some_and(|p| !p.visible) {
            continue;
        }
        spin.advance(time.dt);
    }
}

use hecs::{Entity, World};

use crate::components::{IgnoreCollision, Pickable};

/// Stop `a` and `b` colliding with each other. Both sides record the pair.
pub fn ignore_collision(world: &mut World, a: Entity, b: Entity) {
    for (this, other) in [(a, b), (b, a)] {
        let has_list = world.get::<&IgnoreCollision>(this).is_ok();
        if has_list {
            if let Ok(mut list) = world.get::<&mut IgnoreCollision>(this) {
                if !list.0.contains(&other) {
                    list.0.push(other);
                }
            }
        } else {
            let _ = world.insert_one(this, IgnoreCollision(vec![other]));
        }
    }
}

pub fn collides_with(world: &World, a: Entity, b: Entity) -> bool {
    let ignored = |this: Entity, other: Entity| {
        world
            .get::<&IgnoreCollision>(this)
            .map(|list| list.0.contains(&other))
            .unwrap_or(false)
    };
    !ignored(a, b) && !ignored(b, a)
}

/// Re-enable collision between `actor` and every pickable object.
/// Returns how many pickables had been ignoring the actor.
pub fn restore_collisions(world: &mut World, actor: Entity) -> usize {
    let mut restored = Vec::new();
    for (entity, (_pickable, list)) in world.query_mut::<(&Pickable, &mut IgnoreCollision)>() {
        let before = list.0.len();
        list.0.retain(|&e| e != actor);
        if list.0.len() != before {
            restored.push(entity);
        }
    }

    if let Ok(mut list) = world.get::<&mut IgnoreCollision>(actor) {
        list.0.retain(|e| !restored.contains(e));
    }
    restored.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignore_is_symmetric() {
        let mut world = World::new();
        let a = world.spawn(());
        let b = world.spawn(());
        assert!(collides_with(&world, a, b));
        ignore_collision(&mut world, a, b);
        ignore_collision(&mut world, a, b);
        assert!(!collides_with(&world, b, a));
        assert_eq!(world.get::<&IgnoreCollision>(a).unwrap().0, vec![b]);
    }

    #[test]
    fn restore_only_touches_pickables() {
        let mut world = World::new();
        let actor = world.spawn(());
        let bomb = world.spawn((Pickable,));
        let wall = world.spawn(());
        ignore_collision(&mut world, actor, bomb);
        ignore_collision(&mut world, actor, wall);

        assert_eq!(restore_collisions(&mut world, actor), 1);
        assert!(collides_with(&world, actor, bomb));
        assert!(!collides_with(&world, actor, wall));
        assert_eq!(restore_collisions(&mut world, actor), 0);
    }
}

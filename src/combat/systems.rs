//! Combat domain: consumers for punch commands aimed at the giant.

use avian2d::prelude::LinearVelocity;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::components::{GiantSlime, Health};
use crate::combat::GIANT_FLINCH_SPEED;
use crate::feedback::WorldCommand;
use crate::slime::pickups::spawn_pickup;
use crate::slime::{GOLDEN_WEIGHT, NORMAL_WEIGHT};

/// Apply punch damage to the giant. Every hit shoots a normal slime to the
/// attacker's feet; the killing blow leaves a golden one.
pub(crate) fn apply_giant_damage(
    mut commands: Commands,
    mut world_commands: MessageReader<WorldCommand>,
    mut giants: Query<
        (
            &mut Health,
            &Transform,
            Option<&mut LinearVelocity>,
            Option<&mut Sprite>,
        ),
        With<GiantSlime>,
    >,
) {
    for command in world_commands.read() {
        let WorldCommand::DamageGiant {
            giant,
            amount,
            force,
        } = *command
        else {
            continue;
        };
        let Ok((mut health, transform, velocity, sprite)) = giants.get_mut(giant) else {
            continue;
        };
        if health.is_dead() {
            continue;
        }

        health.take_damage(amount);
        let position = transform.translation.truncate();
        spawn_pickup(&mut commands, position + force, NORMAL_WEIGHT, None);

        if health.is_dead() {
            info!("Giant slime {giant:?} defeated");
            spawn_pickup(&mut commands, position, GOLDEN_WEIGHT, None);
            commands.entity(giant).despawn();
            continue;
        }

        if let Some(mut velocity) = velocity {
            velocity.0 -= force.normalize_or_zero() * GIANT_FLINCH_SPEED;
        }
        if let Some(mut sprite) = sprite {
            let flash = 0.5 + 0.5 * health.percent();
            sprite.color = Color::srgb(1.0, flash, flash);
        }
        debug!(
            "Giant slime hit for {amount}, {:.0}/{:.0} left",
            health.current, health.max
        );
    }
}

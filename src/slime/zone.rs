//! Slime domain: scoring zones and depositing into them.

use bevy::prelude::*;
use rand::Rng;

use crate::feedback::{
    CharacterEventKind, Feedback, Haptic, Popup, PopupAnchor, PopupColor, PopupText,
};
use crate::movement::character::{Character, ZONE_DEPOSIT_INTERVAL};
use crate::movement::physics::{BodyKind, PhysicsWorld};
use crate::movement::reconcile::FrameContext;
use crate::movement::{ContactSide, GameLayer};
use crate::slime::GOLDEN_WEIGHT;

/// Seconds a zone stays active before the next one takes over.
pub const ZONE_ROTATION_PERIOD: f32 = 20.0;
/// How long deposit popups stay on screen.
pub const POPUP_LIFETIME: f32 = 1.0;

/// A sensor area players deliver slime into.
#[derive(Component, Debug, Clone, Copy)]
pub struct ScoringZone {
    pub id: u32,
}

/// Which scoring zone currently accepts deposits.
#[derive(Resource, Debug, Clone)]
pub struct ActiveZone {
    zones: Vec<u32>,
    index: usize,
    elapsed: f32,
    period: f32,
}

impl Default for ActiveZone {
    fn default() -> Self {
        Self::with_period(ZONE_ROTATION_PERIOD)
    }
}

impl ActiveZone {
    pub fn with_period(period: f32) -> Self {
        Self {
            zones: Vec::new(),
            index: 0,
            elapsed: 0.0,
            period,
        }
    }

    pub fn current(&self) -> Option<u32> {
        self.zones.get(self.index).copied()
    }

    pub fn register(&mut self, id: u32) {
        if !self.zones.contains(&id) {
            self.zones.push(id);
        }
    }

    pub fn clear(&mut self) {
        self.zones.clear();
        self.index = 0;
        self.elapsed = 0.0;
    }

    /// Advance the rotation clock. Returns the newly active zone when the
    /// rotation moved on.
    pub fn tick(&mut self, dt: f32) -> Option<u32> {
        if self.zones.len() < 2 {
            return None;
        }
        self.elapsed += dt;
        if self.elapsed < self.period {
            return None;
        }
        self.elapsed -= self.period;
        self.index = (self.index + 1) % self.zones.len();
        self.current()
    }
}

/// Deliver slime while standing in the active zone: one slime, heaviest
/// first, every [`ZONE_DEPOSIT_INTERVAL`] seconds.
pub(crate) fn deposit_in_zone<W: PhysicsWorld + ?Sized, R: Rng>(
    character: &mut Character,
    body: Entity,
    dt: f32,
    frame: &mut FrameContext<'_, W, R>,
) {
    let in_active_zone = frame.active_zone.is_some_and(|zone| {
        frame
            .world
            .detect(body, GameLayer::Goal, ContactSide::Body)
            .iter()
            .filter_map(|collider| frame.world.resolve(collider))
            .any(|owner| owner.kind == BodyKind::Zone(zone))
    });

    let carried = character.bag.total_weight();
    if !in_active_zone || carried == 0 {
        character.zone_timer = ZONE_DEPOSIT_INTERVAL;
        return;
    }

    let slot = character.id();
    frame.outbox.emit(Feedback::Haptic(Haptic {
        slot,
        low: 0.2 * carried as f32,
        high: 0.0,
        duration: 0.1,
    }));

    character.zone_timer -= dt;
    if character.zone_timer > 0.0 {
        return;
    }
    character.zone_timer = ZONE_DEPOSIT_INTERVAL;

    let position = frame.world.position(body).unwrap_or_default();
    let Some(weight) = character.bag.pop() else {
        frame.outbox.emit(empty_popup(PopupAnchor::World(position)));
        return;
    };

    frame.scores.add(slot, weight);
    let kind = if weight == GOLDEN_WEIGHT {
        CharacterEventKind::SlimeGolden
    } else {
        CharacterEventKind::SlimeDeliver
    };
    frame.outbox.character_event(slot, kind);
    debug!("Slot {slot} delivered {weight}, score {}", frame.scores.get(slot));

    let remaining = character.bag.total_weight();
    if remaining > 0 {
        for anchor in [PopupAnchor::World(position), PopupAnchor::Screen(slot)] {
            frame.outbox.emit(Feedback::Popup(Popup {
                text: PopupText::Number(remaining),
                color: PopupColor::Team(slot),
                anchor,
                lifetime: POPUP_LIFETIME,
            }));
        }
    } else {
        frame.outbox.emit(empty_popup(PopupAnchor::World(position)));
        frame.outbox.emit(empty_popup(PopupAnchor::Screen(slot)));
        frame.outbox.emit(Feedback::StopHaptic { slot });
    }
}

fn empty_popup(anchor: PopupAnchor) -> Feedback {
    Feedback::Popup(Popup {
        text: PopupText::Label("EMPTY!"),
        color: PopupColor::Alert,
        anchor,
        lifetime: POPUP_LIFETIME,
    })
}

pub(crate) fn rotate_active_zone(time: Res<Time>, mut active: ResMut<ActiveZone>) {
    if let Some(zone) = active.tick(time.delta_secs()) {
        info!("Scoring zone {zone} is now active");
    }
}

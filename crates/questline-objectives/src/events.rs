//! Domain events the built-in objective types react to.

use questline_core::actor::ActorId;
use questline_core::event::GameEvent;

/// Event type of [`PlayerPickupExpEvent`].
pub const PLAYER_PICKUP_EXP: &str = "player.pickup_exp";

/// An actor picked up an experience orb.
#[derive(Debug, Clone)]
pub struct PlayerPickupExpEvent {
    /// The collecting actor.
    pub actor: ActorId,
    /// Experience carried by the orb.
    pub amount: u64,
    /// Why the orb spawned (e.g. "MOB_KILL").
    pub reason: String,
}

impl GameEvent for PlayerPickupExpEvent {
    fn event_type(&self) -> &'static str {
        PLAYER_PICKUP_EXP
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Event type of [`PlayerBedLeaveEvent`].
pub const PLAYER_BED_LEAVE: &str = "player.bed_leave";

/// An actor left a bed.
#[derive(Debug, Clone)]
pub struct PlayerBedLeaveEvent {
    /// The waking actor.
    pub actor: ActorId,
    /// Identifier of the bed block.
    pub bed: String,
}

impl GameEvent for PlayerBedLeaveEvent {
    fn event_type(&self) -> &'static str {
        PLAYER_BED_LEAVE
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Event type of [`LandUntrustEvent`].
pub const LAND_UNTRUST: &str = "land.untrust";

/// An actor lost trust in (left) a land claim. Raised by the optional
/// `lands` host integration.
#[derive(Debug, Clone)]
pub struct LandUntrustEvent {
    /// The actor who was untrusted.
    pub target: ActorId,
    /// Name of the land.
    pub land: String,
}

impl GameEvent for LandUntrustEvent {
    fn event_type(&self) -> &'static str {
        LAND_UNTRUST
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

//! Player movement integrator (one step per frame)

use super::state::Player;
use crate::Viewport;
use crate::tuning::ControlScheme;

/// Movement intent for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    /// -1 left, 0 none, 1 right
    pub x: f32,
    /// -1 up, 0 none, 1 down (free-move only)
    pub y: f32,
    /// Jump request (edge-triggered)
    pub jump: bool,
}

/// Start a jump if grounded. Returns whether the jump started.
pub fn jump(player: &mut Player) -> bool {
    if player.airborne {
        return false;
    }
    player.airborne = true;
    player.vel.y = player.jump_impulse;
    true
}

/// Advance the player by one frame
pub fn advance(player: &mut Player, intent: MoveIntent, scheme: ControlScheme, viewport: Viewport) {
    player.vel.x = intent.x.clamp(-1.0, 1.0) * player.speed;
    player.pos.x += player.vel.x;
    player.pos.x = player.pos.x.clamp(0.0, (viewport.width - player.size.x).max(0.0));

    match scheme {
        ControlScheme::Jump => {
            if intent.jump {
                jump(player);
            }
            integrate_jump(player);
        }
        ControlScheme::FreeMove => {
            player.vel.y = intent.y.clamp(-1.0, 1.0) * player.speed;
            player.pos.y += player.vel.y;
            player.pos.y = player.pos.y.clamp(0.0, (viewport.height - player.size.y).max(0.0));
        }
    }
}

fn integrate_jump(player: &mut Player) {
    if !player.airborne {
        return;
    }

    player.vel.y += player.gravity;
    player.pos.y += player.vel.y;

    if player.pos.y < player.min_y {
        // Hit the ceiling: stop rising, stay airborne
        player.pos.y = player.min_y;
        player.vel.y = 0.0;
    }

    if player.pos.y >= player.ground_y && player.vel.y >= 0.0 {
        player.pos.y = player.ground_y;
        player.vel.y = 0.0;
        player.airborne = false;
    }
}

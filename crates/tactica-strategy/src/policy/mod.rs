//! Per-tick command production.
//!
//! [`decide`] turns a world snapshot into one command per agent of ours. The
//! snapshot is mapped into the attack frame once, every agent's command is computed
//! from that same immutable view, and the results are mapped back.

mod carrier;
mod keeper;
mod support;

pub use carrier::{find_shot, goal_corners};
pub use keeper::keeper_anchor;

use tactica_core::{AgentState, Command, Role, RoleAssignment, Settings, WorldSnapshot};

use crate::{frame::AttackFrame, situation::Situation};

/// Computes the commands for all of our agents, in the order they appear in the
/// snapshot.
///
/// Never fails: agents without a role stand still, and degenerate geometry falls
/// back to safe commands.
pub fn decide(world: &WorldSnapshot, roles: &RoleAssignment, settings: &Settings) -> Vec<Command> {
    let frame = AttackFrame::new(&settings.field);
    let world = frame.world(world);
    let field = frame.field(&settings.field);
    let situation = Situation::new(&world, &field, roles, settings);

    world
        .own_players()
        .map(|agent| frame.command(&decide_agent(&situation, agent)))
        .collect()
}

fn decide_agent(situation: &Situation, agent: &AgentState) -> Command {
    let Some(role) = situation.roles.get(agent.id) else {
        log::debug!("player {} has no role, standing still", agent.id);
        return Command::stand_still();
    };

    match role {
        Role::Goalkeeper => keeper::goalkeeper(situation, agent),
        Role::Idle => Command::stand_still(),
        _ if situation.is_holder(agent.id) => carrier::carry(situation, agent),
        Role::Chaser => support::chase(situation, agent),
        Role::Striker | Role::Support(_) => support::off_ball(situation, agent, role),
    }
}

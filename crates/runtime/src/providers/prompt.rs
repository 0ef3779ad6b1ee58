//! Battle prompt rendering and reply parsing for language-model decisions.
//!
//! The model is asked for a strict three-line format. Models being models,
//! the parser accepts the format loosely and falls back to scanning the
//! whole reply for anything resembling an action token.

use arena_engine::TurnAction;

use crate::view::TurnView;

/// Renders the per-turn prompt for the side described by `view`.
pub fn render_prompt(view: &TurnView, personality: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!("# Battle Arena - Turn {}\n\n", view.turn));
    prompt.push_str(&format!("You are the coach of **{}**.\n\n", view.you.name));

    if !personality.is_empty() {
        prompt.push_str(&format!("## Team Personality\n{personality}\n\n"));
    }

    if let Some(active) = &view.you.active {
        prompt.push_str(&format!(
            "## Your Active Fighter\n**{}** ({} type)\n- HP: {}/{}\n- Weakness: {}\n\n",
            active.name, active.element, active.hp, active.max_hp, active.weakness
        ));
        prompt.push_str(&format!("## Your Energy: {}/5\n\n", view.you.energy));

        prompt.push_str("## Available Attacks\n");
        for (i, attack) in active.attacks.iter().enumerate() {
            let affordable = if attack.cost <= view.you.energy {
                "available"
            } else {
                "NOT ENOUGH ENERGY"
            };
            let effect = attack
                .effect
                .map(|e| format!(" [{e}]"))
                .unwrap_or_default();
            prompt.push_str(&format!(
                "{}. {} ({} energy) - {} damage{} ({})\n",
                i + 1,
                attack.name,
                attack.cost,
                attack.damage,
                effect,
                affordable
            ));
        }
        prompt.push('\n');

        prompt.push_str(&format!("## Bench ({} fighters)\n", view.you.bench.len()));
        if view.you.bench.is_empty() {
            prompt.push_str("No fighters on the bench.\n");
        } else {
            for (i, fighter) in view.you.bench.iter().enumerate() {
                prompt.push_str(&format!(
                    "{}. {} ({}, {}/{} HP)\n",
                    i, fighter.name, fighter.element, fighter.hp, fighter.max_hp
                ));
            }
        }
        prompt.push_str(&format!("Retreat cost: {} energy\n\n", active.retreat_cost));
    }

    if let Some(foe) = &view.foe.active {
        prompt.push_str(&format!(
            "## Opponent's Active Fighter\n**{}** ({} type)\n- HP: {}/{}\n- Weakness: {}\n\n",
            foe.name, foe.element, foe.hp, foe.max_hp, foe.weakness
        ));

        if let Some(active) = &view.you.active {
            if active.weakness == foe.element {
                prompt.push_str(&format!(
                    "WARNING: your {} is WEAK to {} (+20 damage taken).\n",
                    active.name, foe.element
                ));
            }
            if foe.weakness == active.element {
                prompt.push_str(&format!(
                    "ADVANTAGE: the enemy is WEAK to your {} type (+20 damage dealt).\n",
                    active.element
                ));
            }
        }
        prompt.push('\n');
    }

    prompt.push_str(&format!(
        "## Score\nYour KOs: {}/3 | Their KOs: {}/3 (first to 3 wins)\n\n",
        view.you.knockouts, view.foe.knockouts
    ));

    prompt.push_str("## Recent History\n");
    if view.history.is_empty() {
        prompt.push_str("This is the first turn.\n");
    } else {
        for entry in &view.history {
            prompt.push_str(&format!(
                "Turn {}: you played {} ({} dmg) | they played {} ({} dmg)\n",
                entry.turn,
                entry.your_action,
                entry.your_damage,
                entry.foe_action,
                entry.foe_damage
            ));
        }
    }

    prompt.push_str(
        "\n## Your Response\n\
         Think strategically (spectators will see this!), trash talk, then \
         choose your action.\n\n\
         You MUST respond in this EXACT format:\n\
         THINKING: [your strategic reasoning in 1-2 sentences]\n\
         TRASH_TALK: [a taunt in character]\n\
         ACTION: [one of: ATTACK_1, ATTACK_2, RETREAT_<bench index>, PASS]\n",
    );

    prompt
}

/// Best-effort structure pulled out of a model reply.
#[derive(Clone, Debug, Default)]
pub struct ParsedReply {
    pub action: Option<TurnAction>,
    /// The token text the action was recognized from.
    pub token: Option<String>,
    pub thinking: String,
    pub taunt: String,
}

/// Parses the strict `THINKING:`/`TRASH_TALK:`/`ACTION:` format, then falls
/// back to scanning the whole reply for any recognizable action token.
/// Returns `action: None` only when nothing in the text looks like a move.
pub fn parse_reply(text: &str) -> ParsedReply {
    let mut parsed = ParsedReply::default();

    for line in text.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("THINKING:") {
            parsed.thinking = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("TRASH_TALK:") {
            parsed.taunt = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("ACTION:") {
            let token = rest.trim();
            if let Some(action) = TurnAction::parse_token(token) {
                parsed.action = Some(action);
                parsed.token = Some(token.to_string());
            }
        }
    }

    // Format not followed: scan for anything token-shaped.
    if parsed.action.is_none() {
        for word in text.split(|c: char| !c.is_ascii_alphanumeric() && c != '_') {
            if word.is_empty() {
                continue;
            }
            if let Some(action) = TurnAction::parse_token(word) {
                parsed.action = Some(action);
                parsed.token = Some(word.to_string());
                break;
            }
        }
    }

    if parsed.thinking.is_empty() {
        parsed.thinking = text.chars().take(100).collect::<String>().trim().to_string();
    }

    parsed
}

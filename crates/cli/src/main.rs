//! Arena demo driver.
//!
//! Runs a single narrated exhibition match between two teams (built-in or
//! loaded from RON files), or a silent batch simulation with `--simulate N`.
//! With `OPENAI_API_KEY` set, both sides are coached by a language model;
//! otherwise the local heuristic plays.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use arena_content::{TeamLoader, TeamSpec, builtin_teams};
use arena_runtime::{
    ArenaService, DecisionSource, LlmConfig, MatchEvent, MemorySink, OrchestratorConfig,
    ParticipantRegistry,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [flag, count] if flag == "--simulate" => {
            let count: usize = count.parse().context("--simulate expects a number")?;
            simulate(count).await
        }
        [team1, team2] => {
            let team1 = TeamLoader::load(Path::new(team1))?;
            let team2 = TeamLoader::load(Path::new(team2))?;
            exhibition(team1, team2).await
        }
        [] => {
            let mut teams = builtin_teams().into_iter();
            let team1 = teams.next().context("no built-in teams")?;
            let team2 = teams.next().context("need two built-in teams")?;
            exhibition(team1, team2).await
        }
        _ => {
            eprintln!("usage: arena [team1.ron team2.ron] | arena --simulate <n>");
            std::process::exit(2);
        }
    }
}

fn new_arena() -> (Arc<ParticipantRegistry>, ArenaService) {
    let registry = Arc::new(ParticipantRegistry::new());
    let sink = Arc::new(MemorySink::new());
    let arena = ArenaService::new(Arc::clone(&registry), sink, OrchestratorConfig::default());
    (registry, arena)
}

/// Decision source for local runs: a language model when a key is
/// configured, the heuristic otherwise.
fn local_source() -> DecisionSource {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => DecisionSource::Llm(LlmConfig::new(key)),
        _ => DecisionSource::Heuristic,
    }
}

/// Registry names allow `[A-Za-z0-9_-]` only; team names are display text.
fn slug(name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    if slug.len() < 2 { format!("team-{slug}") } else { slug }
}

async fn exhibition(team1: TeamSpec, team2: TeamSpec) -> Result<()> {
    let (registry, arena) = new_arena();
    let a = registry.register(&slug(&team1.team_name), local_source(), Some(team1))?;
    let b = registry.register(&slug(&team2.team_name), local_source(), Some(team2))?;

    let mut rx = arena.events().subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            match event {
                MatchEvent::Started { player1, player2, .. } => {
                    println!("{}", "=".repeat(60));
                    println!("  {player1} vs {player2}");
                    println!("{}", "=".repeat(60));
                }
                MatchEvent::Turn { record, .. } => {
                    println!("\n--- Turn {} ---", record.turn);
                    for (label, side) in [("1", &record.side1), ("2", &record.side2)] {
                        if !side.thinking.is_empty() {
                            println!("  [side {label}] thinks: {}", side.thinking);
                        }
                        if !side.taunt.is_empty() {
                            println!("  [side {label}] taunts: {}", side.taunt);
                        }
                    }
                    for event in &record.events {
                        println!("  {event}");
                    }
                }
                MatchEvent::Finished { state, deltas, .. } => {
                    println!("\n{}", "=".repeat(60));
                    match state.winner_name() {
                        Some(winner) => println!("  WINNER: {winner}"),
                        None => println!("  IT'S A DRAW"),
                    }
                    println!(
                        "  {} turns | KOs {} - {} | rating {:+} / {:+}",
                        state.replay.len(),
                        state.player1.knockouts,
                        state.player2.knockouts,
                        deltas.side1,
                        deltas.side2,
                    );
                    println!("{}", "=".repeat(60));
                    break;
                }
            }
        }
    });

    arena.run_match(&a.id, &b.id).await?;
    printer.await?;

    for id in [&a.id, &b.id] {
        if let Some(p) = registry.get(id) {
            println!("  {}: rating {} ({} game(s), {} win(s))", p.name, p.rating, p.games_played, p.wins);
        }
    }
    Ok(())
}

async fn simulate(count: usize) -> Result<()> {
    let (registry, arena) = new_arena();

    let mut ids = Vec::new();
    for team in builtin_teams() {
        let name = slug(&team.team_name);
        let p = registry.register(&name, DecisionSource::Heuristic, Some(team))?;
        ids.push((p.id, p.name));
    }

    println!("Simulating {count} battles...");
    let mut total_turns = 0usize;
    let mut draws = 0usize;
    for round in 0..count {
        // Deterministic round-robin over every ordered pairing.
        let i = round % ids.len();
        let j = (round / ids.len() + 1 + i) % ids.len();
        let (home, away) = (&ids[i], &ids[if j == i { (i + 1) % ids.len() } else { j }]);

        let report = arena.run_match(&home.0, &away.0).await?;
        total_turns += report.state.replay.len();
        let winner = report.state.winner_name().map(str::to_string);
        match &winner {
            Some(name) => println!(
                "Battle {}: {} vs {} -> {} ({} turns)",
                round + 1,
                home.1,
                away.1,
                name,
                report.state.replay.len()
            ),
            None => {
                draws += 1;
                println!(
                    "Battle {}: {} vs {} -> draw ({} turns)",
                    round + 1,
                    home.1,
                    away.1,
                    report.state.replay.len()
                );
            }
        }
    }

    println!("\nSTANDINGS");
    for p in registry.leaderboard(ids.len()) {
        println!(
            "  {:<20} rating {:>4} | {} win(s) in {} game(s)",
            p.name, p.rating, p.wins, p.games_played
        );
    }
    println!("  draws: {draws}");
    if count > 0 {
        println!("  average battle length: {:.1} turns", total_turns as f64 / count as f64);
    }
    Ok(())
}

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use lifepath::components::identity::Gender;
use lifepath::core::serialization::{load_file_from_path, save_file_to_path, SaveFile};
use lifepath::core::world::{Game, YearSummary};
use lifepath::simulation::creation::CharacterSpec;

fn main() {
    println!("LifePath — one year at a time.");
    let save_path = parse_save_path(env::args().collect());

    let mut game = match build_game() {
        Some(game) => game,
        None => return,
    };
    print_summary(&game.summary());

    println!(
        "Commands: age [n] | choose <id> | stats | family | achievements | log | save | load [slot] | slots | export <path> | import <path> | new | quit"
    );
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            break;
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or("").to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" => break,
            "help" => {
                println!(
                    "Commands: age [n] | choose <id> | stats | family | achievements | log | save | load [slot] | slots | export <path> | import <path> | new | quit"
                );
            }
            "age" | "a" => {
                let years = parts
                    .next()
                    .and_then(|raw| raw.parse::<u32>().ok())
                    .unwrap_or(1);
                for _ in 0..years {
                    let summary = game.age_up();
                    print_summary(&summary);
                    if summary.pending.is_some() || summary.game_over.is_some() {
                        break;
                    }
                }
            }
            "choose" | "c" => {
                if let Some(choice_id) = parts.next() {
                    match game.resolve_choice(choice_id) {
                        Ok(summary) => print_summary(&summary),
                        Err(err) => println!("{}", err),
                    }
                } else {
                    println!("Usage: choose <choice_id>");
                }
            }
            "stats" => {
                print_stats(&game.summary());
            }
            "family" => {
                print_family(&mut game);
            }
            "achievements" => {
                let unlocked = game.achievements();
                if unlocked.is_empty() {
                    println!("Nothing unlocked yet.");
                }
                for id in unlocked {
                    println!("  * {}", id);
                }
            }
            "log" => {
                for entry in game.life_log() {
                    println!("Age {}:", entry.age);
                    for line in &entry.lines {
                        println!("  {}", line);
                    }
                }
            }
            "save" => {
                let mut file = load_file_from_path(&save_path).unwrap_or_default();
                file.push(game.save_state());
                match save_file_to_path(&file, &save_path) {
                    Ok(()) => println!(
                        "Saved slot {} to {}",
                        file.slots.len(),
                        save_path.display()
                    ),
                    Err(err) => println!("Save failed: {}", err),
                }
            }
            "load" => match load_file_from_path(&save_path) {
                Ok(file) => {
                    let slot = parts
                        .next()
                        .and_then(|raw| raw.parse::<usize>().ok())
                        .unwrap_or(file.slots.len());
                    match slot.checked_sub(1).and_then(|idx| file.slots.get(idx)) {
                        Some(entry) => {
                            game.load_state(entry.state.clone());
                            println!("Loaded slot {} from {}", slot, save_path.display());
                            print_summary(&game.summary());
                        }
                        None => println!("No such slot: {}", slot),
                    }
                }
                Err(err) => println!("Load failed: {}", err),
            },
            "slots" => print_slots(&save_path),
            "export" => {
                if let Some(path) = parts.next() {
                    match game.save_to_path(path) {
                        Ok(()) => println!("Exported to {}", path),
                        Err(err) => println!("Export failed: {}", err),
                    }
                } else {
                    println!("Usage: export <path>");
                }
            }
            "import" => {
                if let Some(path) = parts.next() {
                    match game.load_from_path(path) {
                        Ok(()) => {
                            println!("Imported from {}", path);
                            print_summary(&game.summary());
                        }
                        Err(err) => println!("Import failed: {}", err),
                    }
                } else {
                    println!("Usage: import <path>");
                }
            }
            "new" => {
                if let Some(fresh) = build_game() {
                    game = fresh;
                    print_summary(&game.summary());
                }
            }
            _ => println!("Unknown command: {} (try help)", cmd),
        }
    }
}

fn parse_save_path(args: Vec<String>) -> PathBuf {
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--save" {
            if let Some(path) = iter.next() {
                return PathBuf::from(path);
            }
        }
    }
    PathBuf::from("lifepath_save.json")
}

fn build_game() -> Option<Game> {
    let first_name = prompt("First name (blank for random): ")?;
    let last_name = prompt("Last name (blank for random): ")?;
    let gender_raw = prompt("Gender [m/f/blank for random]: ")?;
    let seed_raw = prompt("Seed (blank for random): ")?;

    let gender = match gender_raw.to_lowercase().as_str() {
        "m" | "male" => Some(Gender::Male),
        "f" | "female" => Some(Gender::Female),
        _ => None,
    };
    let seed = seed_raw.parse::<u64>().ok();

    let spec = CharacterSpec {
        first_name: non_empty(first_name),
        last_name: non_empty(last_name),
        gender,
        seed,
    };
    Some(Game::new(spec))
}

fn prompt(label: &str) -> Option<String> {
    print!("{}", label);
    io::stdout().flush().ok()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input).ok()?;
    // Names keep their capitalization; token matching lowercases at the call.
    Some(input.trim().to_string())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn print_summary(summary: &YearSummary) {
    println!(
        "{} — age {} ({}). ${} on hand{}",
        summary.name,
        summary.age,
        summary.year,
        summary.balance,
        if summary.debts > 0 {
            format!(", ${} in debt", summary.debts)
        } else {
            String::new()
        }
    );
    for line in &summary.year_log {
        println!("  {}", line);
    }
    if let Some(reason) = &summary.game_over {
        println!("== GAME OVER: {}", reason);
        return;
    }
    if let Some(pending) = &summary.pending {
        println!("== {} ==", pending.title);
        println!("{}", pending.text);
        for choice in &pending.choices {
            println!("  [{}] {}", choice.id, choice.text);
        }
        println!("(resolve with: choose <id>)");
    }
}

fn print_stats(summary: &YearSummary) {
    println!("Health    {:>3}", summary.stats.health);
    println!("Happiness {:>3}", summary.stats.happiness);
    println!("Smarts    {:>3}", summary.stats.smarts);
    println!("Looks     {:>3}", summary.stats.looks);
    println!("Fame      {:>3}", summary.fame);
    println!("Balance   {:>8}", summary.balance);
    println!("Debts     {:>8}", summary.debts);
    println!("Net worth {:>8}", summary.net_worth);
    match &summary.job {
        Some(job) => println!("Job: {}", job),
        None => println!("Job: none"),
    }
}

fn print_slots(save_path: &std::path::Path) {
    let file: SaveFile = match load_file_from_path(save_path) {
        Ok(file) => file,
        Err(err) => {
            println!("No save file at {}: {}", save_path.display(), err);
            return;
        }
    };
    if file.slots.is_empty() {
        println!("Save file is empty.");
        return;
    }
    for (idx, slot) in file.slots.iter().enumerate() {
        println!(
            "  [{}] {} — age {} (saved at unix {})",
            idx + 1,
            slot.state.player.identity.full_name(),
            slot.state.player.age,
            slot.timestamp
        );
    }
}

fn print_family(game: &mut Game) {
    let members = game.family();
    if members.is_empty() {
        println!("No family on record.");
        return;
    }
    for member in members {
        if member.alive {
            println!(
                "  {} ({}) — age {}, bond {}",
                member.name, member.role, member.age, member.quality
            );
        } else {
            println!("  {} ({}) — deceased", member.name, member.role);
        }
    }
}

//! A week of Moji played against an in-memory store

use chrono::NaiveDate;
use moji_core::{FixedClock, MemoryStore, MojiConfig, Session, StatsEngine};

fn main() {
    let first_day = NaiveDate::from_ymd_opt(2025, 12, 21).unwrap_or_default();
    let engine = StatsEngine::new(MemoryStore::new(), FixedClock::on(first_day), MojiConfig::default());
    let mut session = Session::new(engine);

    for day in 0..7u64 {
        // Any seed works; it only changes the tile decoration
        match session.play(day * 7919) {
            Ok(play) => {
                println!("{}", play.share_text());
                println!("    ({:?}, grid of {} rows)\n", play.mode, play.grid.len());
            }
            Err(e) => {
                eprintln!("could not record: {}", e);
                return;
            }
        }
        session.engine_mut().clock_mut().advance_days(1);
    }

    // Playing twice on one day shows the recorded result again
    session.engine_mut().clock_mut().advance_days(-1);
    if let Ok(play) = session.play(1) {
        println!("Replay of puzzle #{}: {:?}\n", play.puzzle_number, play.mode);
    }

    let stats = session.stats_view();
    println!(
        "Played {}  Win {}%  Streak {}  Best {}",
        stats.played, stats.win_percentage, stats.current_streak, stats.max_streak
    );
    for bar in &stats.bars {
        println!("{:>2} {:<5} {}", bar.label, "#".repeat(bar.width_percent as usize / 20), bar.count);
    }
    println!("\nNext puzzle in {}", session.next_puzzle_countdown());
}

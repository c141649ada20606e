use crate::theme::Theme;
use crossterm::{
    cursor::{Hide, MoveTo, MoveToNextLine, Show},
    execute, queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use moji_core::{Grid, Play, RevealStep, RevealTimeline, StatsView, StreakBadge};
use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

/// Width of a full distribution bar, in cells
const BAR_CELLS: f64 = 30.0;
const GRID_X: u16 = 2;
const HEADER_Y: u16 = 1;
const GRID_Y: u16 = 3;

/// Draw a play by walking its reveal timeline in real time
pub fn render_play<W: Write>(
    out: &mut W,
    play: &Play,
    timeline: &RevealTimeline,
    theme: &Theme,
    countdown: &str,
) -> io::Result<()> {
    let view = play.view();
    let footer_y = GRID_Y + view.rows.len() as u16 + 1;
    let start = Instant::now();

    execute!(out, Hide)?;
    for scheduled in timeline.steps() {
        let due = start + Duration::from_millis(scheduled.at_ms);
        let now = Instant::now();
        if due > now {
            thread::sleep(due - now);
        }

        match scheduled.step {
            RevealStep::ShowContainer => {
                queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
            }
            RevealStep::RevealTile { row, col } => {
                draw_tile(out, &play.grid, theme, row, col)?;
            }
            RevealStep::RevealHeader => {
                queue!(
                    out,
                    MoveTo(GRID_X, HEADER_Y),
                    SetForegroundColor(theme.header),
                    Print(format!("Moji #{}  {}", view.puzzle_number, view.score_label))
                )?;
            }
            RevealStep::RevealFooter => {
                draw_streak(out, view.streak, theme, footer_y)?;
                queue!(
                    out,
                    MoveTo(GRID_X, footer_y + 1),
                    SetForegroundColor(theme.info),
                    Print(format!("Next Moji in {}", countdown))
                )?;
            }
            RevealStep::OfferReplay => {
                queue!(
                    out,
                    MoveTo(GRID_X, footer_y + 3),
                    SetForegroundColor(theme.info),
                    Print("Practice mode: run `moji play` again for another round")
                )?;
            }
        }
        out.flush()?;
    }

    let bottom = footer_y + if timeline_offers_replay(timeline) { 4 } else { 2 };
    execute!(out, ResetColor, MoveTo(0, bottom), Show)?;
    writeln!(out)
}

fn timeline_offers_replay(timeline: &RevealTimeline) -> bool {
    timeline
        .steps()
        .iter()
        .any(|s| s.step == RevealStep::OfferReplay)
}

fn draw_tile<W: Write>(
    out: &mut W,
    grid: &Grid,
    theme: &Theme,
    row: usize,
    col: usize,
) -> io::Result<()> {
    let Some(&tile) = grid.rows().get(row).and_then(|r| r.get(col)) else {
        return Ok(());
    };
    queue!(
        out,
        MoveTo(GRID_X + col as u16 * 3, GRID_Y + row as u16),
        SetForegroundColor(theme.tile(tile)),
        Print("██")
    )
}

fn draw_streak<W: Write>(out: &mut W, streak: StreakBadge, theme: &Theme, y: u16) -> io::Result<()> {
    let color = match streak {
        StreakBadge::Lost => theme.error,
        _ => theme.success,
    };
    queue!(
        out,
        MoveTo(GRID_X, y),
        SetForegroundColor(color),
        Print(streak.text())
    )
}

/// Print the statistics panel inline
pub fn render_stats<W: Write>(out: &mut W, stats: &StatsView, theme: &Theme) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(theme.header),
        Print("═══ STATISTICS ═══"),
        MoveToNextLine(2),
        SetForegroundColor(theme.fg),
        Print(format!(
            "Played {:>4}   Win % {:>4}   Streak {:>3}   Best {:>3}",
            stats.played, stats.win_percentage, stats.current_streak, stats.max_streak
        )),
        MoveToNextLine(2),
    )?;

    for bar in &stats.bars {
        let cells = ((bar.width_percent / 100.0) * BAR_CELLS).round().max(1.0) as usize;
        queue!(
            out,
            SetForegroundColor(theme.fg),
            Print(format!("{:>2} ", bar.label)),
            SetForegroundColor(theme.bar(bar.kind, bar.highlight)),
            Print("█".repeat(cells)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", bar.count)),
            MoveToNextLine(1),
        )?;
    }

    queue!(out, ResetColor)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use moji_core::{FixedClock, MemoryStore, MojiConfig, Session, StatsEngine};

    fn played_session() -> Session<MemoryStore, FixedClock> {
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2025, 12, 21).unwrap());
        let mut session = Session::new(StatsEngine::new(MemoryStore::new(), clock, MojiConfig::default()));
        session.play(7).unwrap();
        session
    }

    #[test]
    fn test_render_instant_play() {
        let session = played_session();
        let play = session.current().unwrap();
        let timeline = RevealTimeline::instant(play.grid.len());

        let mut out = Vec::new();
        render_play(&mut out, play, &timeline, &Theme::dark(), "12:00:00").unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Moji #1  3/6"));
        assert_eq!(text.matches("██").count(), 15);
        assert!(text.contains("Next Moji in 12:00:00"));
        assert!(!text.contains("Practice mode"));
    }

    #[test]
    fn test_tiles_use_theme_colors() {
        let session = played_session();
        let play = session.current().unwrap();
        let theme = Theme::light();

        let mut out = Vec::new();
        draw_tile(&mut out, &play.grid, &theme, 0, 0).unwrap();
        let mut expected = Vec::new();
        queue!(
            expected,
            MoveTo(GRID_X, GRID_Y),
            SetForegroundColor(theme.tile(play.grid[0][0])),
            Print("██")
        )
        .unwrap();
        assert_eq!(out, expected);

        let mut out = Vec::new();
        draw_tile(&mut out, &play.grid, &theme, 99, 0).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_render_stats() {
        let session = played_session();
        let mut out = Vec::new();
        render_stats(&mut out, &session.stats_view(), &Theme::dark()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Played    1"));
        assert!(text.contains(" 3 "));
        assert!(text.contains(" X "));
    }
}

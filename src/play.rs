//! Terminal front end: draws the maze with the avatar and turns key presses into game actions.

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use log::{info, warn};
use rand::Rng;
use std::{
    io::{self, Write},
    path::PathBuf,
    time::{Duration, Instant},
};

use maze_adventure::{
    cells::CompassPrimary,
    difficulty::Difficulty,
    game::{AnimationStep, Game, PathAnimation},
    grid_displays::{AvatarDisplay, EntranceExitDisplay, LayeredDisplay},
    grid_traits::GridDisplay,
    renderers,
    units::SideLength,
};

use crate::errors::*;

const IDLE_POLL: Duration = Duration::from_millis(500);
const KEYS_HELP: &str = "arrows: move  s: solve  n: new maze  1/2/3: difficulty  d: snapshot  q: quit";

pub struct PlaySettings {
    pub side: SideLength,
    pub tick: Duration,
    pub snapshot_path: PathBuf,
}

/// Run the game until the player quits. The terminal is restored even if the game fails.
pub fn play<R: Rng>(settings: &PlaySettings, rng: &mut R) -> Result<()> {
    let mut game = Game::new(settings.side, rng)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let outcome = event_loop(&mut game, settings, rng, &mut stdout);

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    outcome
}

fn event_loop<R: Rng, W: Write>(game: &mut Game,
                                settings: &PlaySettings,
                                rng: &mut R,
                                out: &mut W)
                                -> Result<()> {
    let mut animation: Option<PathAnimation> = None;
    let mut status = String::new();
    let mut last_tick = Instant::now();

    draw(out, game, &status)?;

    loop {
        let timeout = if animation.is_some() {
            settings.tick.checked_sub(last_tick.elapsed()).unwrap_or_default()
        } else {
            IDLE_POLL
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Up => {
                        let _ = game.move_avatar(CompassPrimary::North);
                    }
                    KeyCode::Right => {
                        let _ = game.move_avatar(CompassPrimary::East);
                    }
                    KeyCode::Down => {
                        let _ = game.move_avatar(CompassPrimary::South);
                    }
                    KeyCode::Left => {
                        let _ = game.move_avatar(CompassPrimary::West);
                    }
                    KeyCode::Char('s') => {
                        match game.solve() {
                            Ok(solution) => {
                                status = format!("Solving: {} steps", solution.remaining());
                                animation = Some(solution);
                                last_tick = Instant::now();
                            }
                            Err(e) => {
                                warn!("solve failed: {}", e);
                                status = format!("No solution: {}", e);
                            }
                        }
                    }
                    KeyCode::Char('n') => {
                        game.new_maze(rng)?;
                        status = String::from("New maze");
                    }
                    KeyCode::Char(c @ '1'..='3') => {
                        let difficulty = Difficulty::ALL[(c as usize) - ('1' as usize)];
                        game.change_size(difficulty.side_length(), rng)?;
                        status = format!("New {} maze", difficulty);
                    }
                    KeyCode::Char('d') => status = save_snapshot(game, settings),
                    _ => {}
                }
                draw(out, game, &status)?;
            }
        }

        let mut animation_done = false;
        if let Some(ref mut running) = animation {
            if last_tick.elapsed() >= settings.tick {
                last_tick = Instant::now();
                match game.advance(running) {
                    AnimationStep::Moved(_) => {}
                    AnimationStep::Finished => {
                        animation_done = true;
                        status = String::from("Solved");
                    }
                    AnimationStep::Cancelled => animation_done = true,
                }
                draw(out, game, &status)?;
            }
        }
        if animation_done {
            animation = None;
        }
    }

    info!("player quit");
    Ok(())
}

/// The snapshot never shows the avatar.
fn save_snapshot(game: &Game, settings: &PlaySettings) -> String {
    let options = renderers::RenderOptionsBuilder::new()
        .mark_entrance_exit(true)
        .build();
    match renderers::save_snapshot(game.grid(), &options, &settings.snapshot_path) {
        Ok(()) => format!("Saved {}", settings.snapshot_path.display()),
        Err(e) => {
            warn!("snapshot failed: {}", e);
            format!("Snapshot failed: {}", e)
        }
    }
}

fn draw<W: Write>(out: &mut W, game: &Game, status: &str) -> Result<()> {
    let grid = game.grid();
    let avatar = AvatarDisplay::new(game.avatar());
    let markers = EntranceExitDisplay::new(grid);
    let layers: Vec<&dyn GridDisplay> = vec![&avatar, &markers];
    let display = LayeredDisplay::new(layers);
    let maze_text = grid.view(&display).to_string();

    let SideLength(n) = grid.side_length();
    let mut lines = vec![format!("Maze Adventure {}x{}", n, n)];
    lines.extend(maze_text.lines().map(String::from));
    if game.is_won() {
        lines.push(String::from("You escaped! Press n for a new maze or q to quit."));
    }
    lines.push(status.to_string());
    lines.push(KEYS_HELP.to_string());

    // Raw mode has no carriage return on newline so each line is placed explicitly.
    queue!(out, Clear(ClearType::All))?;
    for (row, line) in lines.iter().enumerate() {
        queue!(out, cursor::MoveTo(0, row as u16), Print(line))?;
    }
    out.flush()?;
    Ok(())
}

use anyhow::Context;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use log::info;
use maze_escape::{generate, Config, Dir, Pos, Session};
use std::fs::File;
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Exit,
    Wall,
    Open,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    placement: Option<Placement>,
}

impl Renderer {
    fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Open,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            needs_full: true,
            placement: None,
        }
    }
}

/// Screen position of the maze, centered, with the HUD on the row above.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Placement {
    origin_x: u16,
    origin_y: u16,
    grid_h: u16,
}

impl Placement {
    /// `None` when the grid (two columns per cell, plus HUD and footer rows)
    /// does not fit the terminal, including sizes beyond `u16`.
    fn fit(grid_w: usize, grid_h: usize, term_w: u16, term_h: u16) -> Option<Self> {
        let needed_w = u16::try_from(grid_w.checked_mul(CELL_W)?).ok()?;
        let needed_h = u16::try_from(grid_h.checked_add(2)?).ok()?;
        if term_w < needed_w || term_h < needed_h {
            return None;
        }
        Some(Self {
            origin_x: (term_w - needed_w) / 2,
            origin_y: (term_h - needed_h) / 2 + 1,
            grid_h: needed_h - 2,
        })
    }

    fn cell(&self, x: usize, y: usize) -> Option<(u16, u16)> {
        let col = u16::try_from(x.checked_mul(CELL_W)?).ok()?;
        let row = u16::try_from(y).ok()?;
        Some((self.origin_x.checked_add(col)?, self.origin_y.checked_add(row)?))
    }

    fn hud_row(&self) -> u16 {
        self.origin_y - 1
    }

    fn footer_row(&self) -> u16 {
        self.origin_y + self.grid_h
    }
}

enum Outcome {
    Escaped(Duration),
    Quit,
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let config = Config::from_env();
    let maze = generate(config.width, config.height, config.seed)
        .context("cannot generate maze")?;

    if config.print_only {
        print!("{}", maze.grid);
        return Ok(());
    }

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, Session::new(maze, Instant::now()), config.fps);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    match result? {
        Outcome::Escaped(time) => {
            info!("escaped in {:?}", time);
            println!("Escaped in {:.2}s", time.as_secs_f64());
        }
        Outcome::Quit => info!("quit before reaching the exit"),
    }
    Ok(())
}

/// Logs go to `MAZE_LOG_FILE` when set; stderr would tear the alternate screen.
fn init_logging() -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Ok(path) = std::env::var("MAZE_LOG_FILE") {
        let file = File::create(&path).with_context(|| format!("cannot open log file {}", path))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run(stdout: &mut Stdout, mut session: Session, fps: u64) -> io::Result<Outcome> {
    let grid = &session.maze().grid;
    let mut renderer = Renderer::new(grid.width(), grid.height());
    let frame_time = Duration::from_micros(1_000_000 / fps.max(1));

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(Outcome::Quit),
                    code => {
                        if let Some(dir) = dir_for_key(code) {
                            session.apply(dir, Instant::now());
                        }
                    }
                }
            }
        }

        render(stdout, &session, &mut renderer)?;
        if session.is_finished() {
            let time = session.elapsed(Instant::now());
            render_escaped(stdout, &session, time)?;
            return Ok(Outcome::Escaped(time));
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn dir_for_key(code: KeyCode) -> Option<Dir> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Dir::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Dir::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Dir::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Dir::Right),
        _ => None,
    }
}

fn render(stdout: &mut Stdout, session: &Session, renderer: &mut Renderer) -> io::Result<()> {
    let grid = &session.maze().grid;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    let Some(placement) = Placement::fit(grid.width(), grid.height(), term_w, term_h) else {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            grid.width().saturating_mul(CELL_W),
            grid.height().saturating_add(2),
            term_w,
            term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.placement = None;
        renderer.needs_full = true;
        return Ok(());
    };
    if renderer.placement != Some(placement) {
        renderer.placement = Some(placement);
        renderer.needs_full = true;
    }

    let hud = format!(
        "Time: {:.1}s  (arrows/hjkl to move, q to quit)",
        session.elapsed(Instant::now()).as_secs_f64()
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(placement.origin_x, placement.hud_row()))?;
        stdout.queue(SetForegroundColor(Color::Grey))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let cell = cell_for(session, Pos::new(x, y));
            let idx = y * grid.width() + x;
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                if let Some((col, row)) = placement.cell(x, y) {
                    draw_cell(stdout, col, row, cell)?;
                }
            }
        }
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn cell_for(session: &Session, pos: Pos) -> Cell {
    if pos == session.player() {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Blue,
        };
    }
    if pos == session.maze().exit {
        return Cell {
            glyph: Glyph::Exit,
            color: Color::Green,
        };
    }
    if session.maze().grid.is_open(pos.x, pos.y) {
        Cell {
            glyph: Glyph::Open,
            color: Color::Reset,
        }
    } else {
        Cell {
            glyph: Glyph::Wall,
            color: Color::White,
        }
    }
}

fn draw_cell(stdout: &mut Stdout, col: u16, row: u16, cell: Cell) -> io::Result<()> {
    let text = match cell.glyph {
        Glyph::Player => "🙂",
        Glyph::Exit => "🚪",
        Glyph::Wall => "██",
        Glyph::Open => "  ",
    };
    stdout.queue(MoveTo(col, row))?;
    stdout.queue(SetForegroundColor(cell.color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}

fn render_escaped(stdout: &mut Stdout, session: &Session, time: Duration) -> io::Result<()> {
    let grid = &session.maze().grid;
    let (term_w, term_h) = terminal::size()?;
    match Placement::fit(grid.width(), grid.height(), term_w, term_h) {
        Some(placement) => stdout.queue(MoveTo(placement.origin_x, placement.footer_row()))?,
        None => stdout.queue(MoveTo(0, 1))?,
    };
    stdout.queue(Print(format!(
        "Escaped in {:.2}s (press q to quit)",
        time.as_secs_f64()
    )))?;
    stdout.flush()?;
    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') {
                    return Ok(());
                }
            }
        }
    }
}

//! A simple terminal view of the world.

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use rhrot_lib::{Coord, Simulate, State, Status, DEAD};
use std::{
    io::{self, Stdout, Write},
    time::Duration,
};

/// Delay between two generations while running.
const FRAME: Duration = Duration::from_millis(50);

/// How long to wait for a key while paused.
const IDLE: Duration = Duration::from_millis(250);

struct View {
    stdout: Stdout,
    running: bool,
    status: Status,
    /// The public coordinates shown at the middle of the screen.
    centre: Coord,
}

impl View {
    fn new() -> Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Ok(View {
            stdout,
            running: false,
            status: Status::Running,
            centre: (0, 0),
        })
    }

    fn centre_on(&mut self, world: &dyn Simulate) {
        if let Some(bbox) = world.live_box() {
            self.centre = (
                (bbox.min_x + bbox.max_x).div_euclid(2),
                (bbox.min_y + bbox.max_y).div_euclid(2),
            );
        }
    }

    fn cell_char(world: &dyn Simulate, coord: Coord) -> char {
        let alive = world.alive_state();
        match world.get_cell(coord) {
            DEAD if world.get_mark(coord) > 0 => '·',
            DEAD => ' ',
            State(i) if i == alive.0 => 'O',
            State(i) => char::from(b'A' + alive.0 - i),
        }
    }

    fn status_text(&self) -> &'static str {
        match (self.running, self.status) {
            (_, Status::GridFull) => "Grid full",
            (_, Status::Extinct) => "Extinct",
            (true, Status::Running) => "Running",
            (false, Status::Running) => "Paused",
        }
    }

    fn draw(&mut self, world: &dyn Simulate) -> Result<()> {
        let (cols, rows) = terminal::size()?;
        let (width, height) = (i32::from(cols), i32::from(rows).saturating_sub(2));

        let status = self.status_text();
        queue!(
            self.stdout,
            Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            SetAttribute(Attribute::Reverse),
            Print(format!(
                "{:<width$}",
                format!(
                    " {}  Gen: {}  Pop: {}  +{} -{}  [{}]",
                    world.rule_string(),
                    world.generation(),
                    world.population(),
                    world.births(),
                    world.deaths(),
                    status,
                ),
                width = usize::from(cols)
            )),
            SetAttribute(Attribute::Reset),
        )?;

        let (left, top) = (self.centre.0 - width / 2, self.centre.1 + height / 2);
        for row in 0..height {
            let line: String = (0..width)
                .map(|col| View::cell_char(world, (left + col, top - row)))
                .collect();
            // `row + 1` fits because `row < rows - 2`.
            queue!(self.stdout, cursor::MoveTo(0, row as u16 + 1), Print(line))?;
        }

        queue!(
            self.stdout,
            cursor::MoveTo(0, rows.saturating_sub(1)),
            SetAttribute(Attribute::Dim),
            Print(format!(
                " ({}, {})  Space: run/pause  N: step  C: centre  Arrows: pan  Q: quit",
                self.centre.0, self.centre.1
            )),
            SetAttribute(Attribute::Reset),
        )?;
        self.stdout.flush()?;
        Ok(())
    }

    fn step(&mut self, world: &mut dyn Simulate) {
        self.status = world.step();
        if self.status != Status::Running {
            self.running = false;
        }
    }

    fn main_loop(&mut self, world: &mut dyn Simulate) -> Result<()> {
        self.centre_on(world);
        loop {
            self.draw(world)?;
            let timeout = if self.running { FRAME } else { IDLE };
            if event::poll(timeout)? {
                if let Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    ..
                }) = event::read()?
                {
                    match code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char(' ') | KeyCode::Enter => {
                            self.running = !self.running && self.status != Status::GridFull
                        }
                        KeyCode::Char('n') => {
                            self.running = false;
                            self.step(world);
                        }
                        KeyCode::Char('c') => self.centre_on(world),
                        KeyCode::Left => self.centre.0 -= 1,
                        KeyCode::Right => self.centre.0 += 1,
                        KeyCode::Up => self.centre.1 += 1,
                        KeyCode::Down => self.centre.1 -= 1,
                        _ => (),
                    }
                }
            } else if self.running {
                self.step(world);
            }
        }
    }
}

impl Drop for View {
    fn drop(&mut self) {
        execute!(self.stdout, cursor::Show, LeaveAlternateScreen).ok();
        terminal::disable_raw_mode().ok();
    }
}

/// Runs the world in the terminal, and prints the result on exit.
pub(crate) fn run_with_tui(mut world: Box<dyn Simulate>) -> Result<()> {
    {
        let mut view = View::new()?;
        view.main_loop(world.as_mut())?;
    }
    print!("{}", world.rle());
    Ok(())
}

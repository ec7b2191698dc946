//! The landing hero drawn in the terminal.

mod banner;
mod color;
mod terminal;
mod view;

pub(crate) use banner::title_lines;
pub(crate) use view::HeroView;

use crate::{
    theme::{Theme, ThemeStore},
    typewriter::Snapshot,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    io::{self, Write},
    time::{Duration, Instant},
};
use terminal::{TerminalGuard, draw, draw_plain, reset_colors, write_line};
use tokio::sync::watch;
use view::FrameState;

/// How long to wait for input before checking for a new snapshot.
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// What a key press asks the hero to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Quit,
    ToggleTheme,
}

impl Action {
    fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Self::Quit),
            KeyCode::Char('t') => Some(Self::ToggleTheme),
            _ => None,
        }
    }
}

/// Renders typewriter snapshots until asked to stop.
pub(crate) struct Hero {
    view: HeroView,
    theme: Theme,
    store: Option<ThemeStore>,
    count: Option<u64>,
}

impl Hero {
    pub(crate) fn new(view: HeroView, theme: Theme, store: Option<ThemeStore>, count: Option<u64>) -> Self {
        Self { view, theme, store, count }
    }

    /// Whether `count` commands have been shown in full.
    fn finished(&self, snapshot: &Snapshot) -> bool {
        self.count.is_some_and(|count| snapshot.completed >= count)
    }

    fn hint(&self) -> String {
        format!("q quit · t theme ({})", self.theme)
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        tracing::info!(theme = %self.theme, "theme toggled");
        if let Some(store) = &self.store {
            match store.save(self.theme) {
                Ok(()) => tracing::debug!(path = %store.path().display(), "theme saved"),
                Err(e) => tracing::warn!("{e}"),
            }
        }
    }

    /// Take over the terminal and draw the full hero until the user quits.
    pub(crate) fn run_interactive(&mut self, mut frames: watch::Receiver<Snapshot>) -> io::Result<()> {
        let started = Instant::now();
        let mut screen = TerminalGuard::enter(io::stdout())?;
        let (mut width, mut height) = crossterm::terminal::size()?;
        let mut cursor_lit = None;
        let mut dirty = true;
        tracing::debug!(width, height, "interactive hero started");

        loop {
            if frames.has_changed().unwrap_or(false) {
                dirty = true;
            }
            let snapshot = frames.borrow_and_update().clone();
            if self.finished(&snapshot) {
                break;
            }
            let lit = self.view.cursor().is_lit(started.elapsed());
            if cursor_lit != Some(lit) {
                cursor_lit = Some(lit);
                dirty = true;
            }
            if dirty {
                let palette = self.theme.palette();
                let hint = self.hint();
                let state = FrameState { text: &snapshot.text, cursor_lit: lit, palette: &palette, hint: &hint };
                draw(screen.writer(), &self.view.frame(state, width), &palette, height)?;
                dirty = false;
            }

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => match Action::from_key(&key) {
                    Some(Action::Quit) => break,
                    Some(Action::ToggleTheme) => {
                        self.toggle_theme();
                        dirty = true;
                    }
                    None => (),
                },
                Event::Resize(w, h) => {
                    (width, height) = (w, h);
                    dirty = true;
                }
                _ => (),
            }
        }

        reset_colors(screen.writer())?;
        screen.restore()
    }

    /// Print the prompt line once per snapshot without taking over the screen.
    ///
    /// With `in_place` the line is rewritten on a terminal; otherwise every changed line is
    /// written on its own, so pipes and files get plain text.
    pub(crate) async fn run_plain<W: Write>(
        &self,
        writer: &mut W,
        mut frames: watch::Receiver<Snapshot>,
        in_place: bool,
    ) -> io::Result<()> {
        let mut last = None;
        loop {
            let (line, finished) = {
                let snapshot = frames.borrow_and_update();
                tracing::trace!(index = snapshot.index, phase = ?snapshot.phase, "plain frame");
                (self.view.prompt_line(&snapshot.text), self.finished(&snapshot))
            };
            if last.as_ref() != Some(&line) {
                if in_place {
                    draw_plain(writer, &line)?;
                } else {
                    write_line(writer, &line)?;
                }
                last = Some(line);
            }
            if finished {
                break;
            }
            tokio::select! {
                changed = frames.changed() => {
                    if changed.is_err() {
                        // nothing will ever be typed; keep the prompt up until interrupted
                        tokio::signal::ctrl_c().await?;
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }
        if in_place {
            writeln!(writer)?;
        }
        writer.flush()
    }
}

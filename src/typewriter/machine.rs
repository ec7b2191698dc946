use super::commands::CommandList;
use std::time::Duration;

/// The phase the typewriter is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub(crate) enum Phase {
    /// Characters are being appended one at a time.
    Typing,
    /// The full command is on screen.
    HoldingFull,
    /// The full command is on screen and about to be erased.
    Clearing,
}

/// Delays between consecutive ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Timings {
    /// Delay between two typed characters.
    pub typing: Duration,
    /// How long a fully typed command stays before the clear phase starts.
    pub hold: Duration,
    /// How long the clear phase lasts before the text is erased.
    pub clear: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            typing: Duration::from_millis(100),
            hold: Duration::from_millis(1000),
            clear: Duration::from_millis(2000),
        }
    }
}

/// The mutable part of the typewriter.
///
/// The displayed text is stored as a byte length into the active command, always on a
/// character boundary, so it can only ever be a prefix of that command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AnimationState {
    active_index: usize,
    displayed_len: usize,
    phase: Phase,
}

/// The result of advancing the state by one tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Transition {
    /// The state after the tick.
    pub state: AnimationState,
    /// How long to wait before the next tick.
    pub delay: Duration,
}

impl AnimationState {
    pub(crate) fn initial() -> Self {
        Self { active_index: 0, displayed_len: 0, phase: Phase::Typing }
    }

    pub(crate) fn active_index(&self) -> usize {
        self.active_index
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn displayed_text<'a>(&self, commands: &'a CommandList) -> &'a str {
        commands.get(self.active_index).map(|command| &command[..self.displayed_len]).unwrap_or("")
    }

    /// Compute the state that follows this one.
    ///
    /// Returns `None` when there is nothing to animate, i.e. the list is empty.
    pub(crate) fn advance(&self, commands: &CommandList, timings: &Timings) -> Option<Transition> {
        let command = commands.get(self.active_index)?;
        let transition = match self.phase {
            Phase::Typing => match command[self.displayed_len..].chars().next() {
                Some(next) => Transition {
                    state: Self { displayed_len: self.displayed_len + next.len_utf8(), ..self.clone() },
                    delay: timings.typing,
                },
                None => Transition { state: Self { phase: Phase::HoldingFull, ..self.clone() }, delay: timings.hold },
            },
            Phase::HoldingFull => {
                Transition { state: Self { phase: Phase::Clearing, ..self.clone() }, delay: timings.clear }
            }
            // the next command starts typing right away, so the empty prompt is never held
            Phase::Clearing => Transition {
                state: Self {
                    active_index: commands.next_index(self.active_index),
                    displayed_len: 0,
                    phase: Phase::Typing,
                },
                delay: Duration::ZERO,
            },
        };
        Some(transition)
    }
}

/// A point-in-time copy of what the typewriter displays.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub index: usize,
    pub text: String,
    pub phase: Option<Phase>,
    /// How many commands have been typed and cleared so far.
    pub completed: u64,
}

/// A command typewriter: a command list plus its animation state.
#[derive(Clone, Debug)]
pub(crate) struct Typewriter {
    commands: CommandList,
    timings: Timings,
    state: AnimationState,
    completed: u64,
}

impl Typewriter {
    pub(crate) fn new(commands: CommandList, timings: Timings) -> Self {
        Self { commands, timings, state: AnimationState::initial(), completed: 0 }
    }

    /// Whether this typewriter has anything to animate.
    pub(crate) fn is_idle(&self) -> bool {
        self.commands.is_empty()
    }

    pub(crate) fn timings(&self) -> &Timings {
        &self.timings
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &AnimationState {
        &self.state
    }

    pub(crate) fn displayed_text(&self) -> &str {
        self.state.displayed_text(&self.commands)
    }

    /// Advance by one step, returning the delay until the next tick.
    pub(crate) fn tick(&mut self) -> Option<Duration> {
        let Transition { state, delay } = self.state.advance(&self.commands, &self.timings)?;
        if self.state.phase == Phase::Clearing {
            self.completed += 1;
        }
        if state.phase != self.state.phase {
            tracing::trace!(index = state.active_index(), from = %self.state.phase(), to = %state.phase(), "typewriter phase change");
        }
        self.state = state;
        Some(delay)
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            index: self.state.active_index(),
            text: self.displayed_text().to_string(),
            phase: (!self.is_idle()).then_some(self.state.phase()),
            completed: self.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn typewriter(commands: &[&str]) -> Typewriter {
        Typewriter::new(CommandList::new(commands.iter().copied()), Timings::default())
    }

    fn assert_prefix(typewriter: &Typewriter) {
        let index = typewriter.state().active_index();
        let command = typewriter.commands.get(index).expect("index in range");
        assert!(command.starts_with(typewriter.displayed_text()), "{:?} not a prefix of {command:?}", typewriter.displayed_text());
    }

    #[test]
    fn initial_state() {
        let typewriter = typewriter(&["a", "bb"]);
        assert_eq!(typewriter.state(), &AnimationState::initial());
        assert_eq!(typewriter.displayed_text(), "");
        assert_eq!(typewriter.state().phase(), Phase::Typing);
    }

    #[test]
    fn two_command_scenario() {
        let mut typewriter = typewriter(&["a", "bb"]);

        typewriter.tick();
        typewriter.tick();
        assert_eq!(typewriter.displayed_text(), "a");
        assert_eq!(typewriter.state().phase(), Phase::HoldingFull);
        assert_eq!(typewriter.state().active_index(), 0);

        typewriter.tick();
        typewriter.tick();
        assert_eq!(typewriter.displayed_text(), "");
        assert_eq!(typewriter.state().phase(), Phase::Typing);
        assert_eq!(typewriter.state().active_index(), 1);

        typewriter.tick();
        typewriter.tick();
        assert_eq!(typewriter.displayed_text(), "bb");
    }

    #[rstest]
    #[case("gh-templates pr list")]
    #[case("x")]
    #[case("héllo wörld ✓")]
    fn types_full_command_then_holds(#[case] command: &str) {
        let mut typewriter = typewriter(&[command, "other"]);
        let char_count = command.chars().count();
        for typed in 1..=char_count {
            assert_eq!(typewriter.tick(), Some(Duration::from_millis(100)));
            assert_eq!(typewriter.displayed_text().chars().count(), typed);
            assert_eq!(typewriter.state().phase(), Phase::Typing);
        }
        assert_eq!(typewriter.displayed_text(), command);

        assert_eq!(typewriter.tick(), Some(Duration::from_millis(1000)));
        assert_eq!(typewriter.state().phase(), Phase::HoldingFull);
        assert_eq!(typewriter.displayed_text(), command);
    }

    #[test]
    fn hold_then_clear_keeps_text_until_reset() {
        let mut typewriter = typewriter(&["ab", "c"]);
        for _ in 0..3 {
            typewriter.tick();
        }
        assert_eq!(typewriter.state().phase(), Phase::HoldingFull);

        assert_eq!(typewriter.tick(), Some(Duration::from_millis(2000)));
        assert_eq!(typewriter.state().phase(), Phase::Clearing);
        assert_eq!(typewriter.displayed_text(), "ab");

        assert_eq!(typewriter.tick(), Some(Duration::ZERO));
        assert_eq!(typewriter.state().phase(), Phase::Typing);
        assert_eq!(typewriter.displayed_text(), "");
        assert_eq!(typewriter.state().active_index(), 1);
    }

    #[rstest]
    #[case(&["a"])]
    #[case(&["a", "bb"])]
    #[case(&["one", "", "three", "four"])]
    fn full_cycle_returns_to_first_command(#[case] commands: &[&str]) {
        let mut typewriter = typewriter(commands);
        let mut seen = Vec::new();
        while typewriter.snapshot().completed < commands.len() as u64 {
            seen.push(typewriter.state().active_index());
            assert_prefix(&typewriter);
            typewriter.tick().expect("non empty list always ticks");
        }
        assert_eq!(typewriter.state().active_index(), 0);
        assert_eq!(typewriter.displayed_text(), "");
        seen.dedup();
        assert_eq!(seen, (0..commands.len()).collect::<Vec<_>>());
    }

    #[test]
    fn index_only_changes_when_clearing_ends() {
        let mut typewriter = typewriter(&["ab", "cd", "e"]);
        for _ in 0..50 {
            let before = typewriter.state().clone();
            typewriter.tick();
            let after = typewriter.state();
            if before.active_index() != after.active_index() {
                assert_eq!(before.phase(), Phase::Clearing);
                assert_eq!(after.active_index(), (before.active_index() + 1) % 3);
            }
            assert_prefix(&typewriter);
        }
    }

    #[test]
    fn empty_list_never_starts() {
        let mut typewriter = typewriter(&[]);
        assert!(typewriter.is_idle());
        assert_eq!(typewriter.tick(), None);
        assert_eq!(typewriter.state(), &AnimationState::initial());
        assert_eq!(typewriter.snapshot(), Snapshot::default());
    }

    #[test]
    fn advance_is_pure() {
        let commands = CommandList::new(["abc"]);
        let state = AnimationState::initial();
        let first = state.advance(&commands, &Timings::default());
        let second = state.advance(&commands, &Timings::default());
        assert_eq!(first, second);
        assert_eq!(state, AnimationState::initial());
    }
}

//! Menu Shell
//!
//! Top-level state machine over both games:
//!
//! ```text
//! MainMenu ──confirm──► CharacterSelect ──confirm──► Fighting ──KO──► GameOver
//!    ▲  │                  │ cancel                                   │ confirm
//!    │  │                  ▼                                          ▼
//!    │  └──confirm──► Platforming              CharacterSelect ◄──────┘
//!    └────cancel──────────┘
//! ```
//!
//! Menu navigation reads held directions through a per-cursor debounce
//! timer; confirm and cancel are edge-triggered so one key press never
//! crosses two screens.

use serde::{Serialize, Deserialize};
use tracing::info;

use crate::config::ArcadeConfig;
use crate::core::timer::FrameTimer;
use crate::fight::character::{Roster, Side};
use crate::fight::tick::{self as fight_tick, Fight};
use crate::platformer::tick::{self as level_tick, Level, LevelPhase};

use super::events::GameEvent;
use super::input::{Action, InputSnapshot};

/// Games on the main menu, in menu order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameChoice {
    Fighting,
    Platformer,
}

impl GameChoice {
    pub const ALL: [GameChoice; 2] = [GameChoice::Fighting, GameChoice::Platformer];

    /// Key used for the high-score file.
    pub fn key(self) -> &'static str {
        match self {
            GameChoice::Fighting => "fighting",
            GameChoice::Platformer => "platformer",
        }
    }
}

/// Current screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    MainMenu,
    CharacterSelect,
    Fighting,
    GameOver { winner: Side },
    Platforming,
}

/// A bounded list cursor with its own repeat delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCursor {
    index: usize,
    len: usize,
    debounce: FrameTimer,
}

impl MenuCursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len, debounce: FrameTimer::IDLE }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move by `direction` (-1, 0, +1) unless still cooling down or at
    /// the end of the list. Returns whether the cursor moved.
    pub fn step(&mut self, direction: i8, debounce: u32) -> bool {
        if direction == 0 || self.debounce.is_active() {
            return false;
        }
        let next = match direction {
            d if d < 0 => self.index.checked_sub(1),
            _ if self.index + 1 < self.len => Some(self.index + 1),
            _ => None,
        };
        match next {
            Some(index) => {
                self.index = index;
                self.debounce.start(debounce);
                true
            }
            None => false,
        }
    }

    pub fn tick(&mut self) {
        self.debounce.tick();
    }
}

/// How a finished session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    FightOver { winner: Side, roster: Roster },
    LevelOver { won: bool, score: u32 },
}

/// Result of a shell tick.
#[derive(Debug, Default)]
pub struct ShellTickResult {
    /// Events from the active game this frame
    pub events: Vec<GameEvent>,
    /// Set when the screen changed
    pub transition: Option<(Screen, Screen)>,
    /// Set on the frame a game session ends
    pub outcome: Option<SessionOutcome>,
}

/// The whole collection: menus plus at most one running game.
#[derive(Clone, Debug)]
pub struct Shell {
    screen: Screen,
    menu: MenuCursor,
    p1_cursor: MenuCursor,
    p2_cursor: MenuCursor,
    fight: Option<Fight>,
    level: Option<Level>,
    seed: u64,
    fights_started: u64,
}

impl Shell {
    pub fn new(seed: u64) -> Self {
        Self {
            screen: Screen::MainMenu,
            menu: MenuCursor::new(GameChoice::ALL.len()),
            p1_cursor: MenuCursor::new(Roster::ALL.len()),
            p2_cursor: MenuCursor::new(Roster::ALL.len()),
            fight: None,
            level: None,
            seed,
            fights_started: 0,
        }
    }

    #[inline]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected_game(&self) -> GameChoice {
        GameChoice::ALL[self.menu.index()]
    }

    /// Current character-select picks for P1 and P2.
    pub fn selected_roster(&self) -> (Roster, Roster) {
        (
            Roster::from_index(self.p1_cursor.index()),
            Roster::from_index(self.p2_cursor.index()),
        )
    }

    pub fn fight(&self) -> Option<&Fight> {
        self.fight.as_ref()
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    /// Advance one frame. `inputs` is indexed by player (P1, P2); the
    /// platformer and the menus other than character select read P1 only.
    pub fn tick(&mut self, inputs: &[InputSnapshot; 2], config: &ArcadeConfig) -> ShellTickResult {
        let mut result = ShellTickResult::default();
        let debounce = config.shell.menu_debounce;
        let p1 = &inputs[0];
        let p2 = &inputs[1];

        self.menu.tick();
        self.p1_cursor.tick();
        self.p2_cursor.tick();

        let next = match self.screen {
            Screen::MainMenu => {
                let direction = p1.is_held(Action::Down) as i8 - p1.is_held(Action::Up) as i8;
                self.menu.step(direction, debounce);

                if p1.just_pressed(Action::Confirm) {
                    match self.selected_game() {
                        GameChoice::Fighting => Some(Screen::CharacterSelect),
                        GameChoice::Platformer => {
                            self.level = Some(Level::level_one(config));
                            Some(Screen::Platforming)
                        }
                    }
                } else {
                    None
                }
            }

            Screen::CharacterSelect => {
                self.p1_cursor.step(p1.held.move_direction(), debounce);
                self.p2_cursor.step(p2.held.move_direction(), debounce);

                if p1.just_pressed(Action::Cancel) {
                    Some(Screen::MainMenu)
                } else if p1.just_pressed(Action::Confirm) || p2.just_pressed(Action::Confirm) {
                    let (a, b) = self.selected_roster();
                    let seed = self.seed.wrapping_add(self.fights_started);
                    self.fights_started += 1;
                    self.fight = Some(Fight::new(a, b, seed, config));
                    Some(Screen::Fighting)
                } else {
                    None
                }
            }

            Screen::Fighting => match self.fight.as_mut() {
                Some(fight) => {
                    let tick = fight_tick::tick(fight, &[p1.held, p2.held], config);
                    result.events = tick.events;
                    tick.winner.map(|winner| {
                        result.outcome = Some(SessionOutcome::FightOver {
                            winner,
                            roster: fight.fighter(winner).roster,
                        });
                        Screen::GameOver { winner }
                    })
                }
                None => Some(Screen::CharacterSelect),
            },

            Screen::GameOver { .. } => {
                if p1.just_pressed(Action::Confirm) || p2.just_pressed(Action::Confirm) {
                    self.fight = None;
                    Some(Screen::CharacterSelect)
                } else {
                    None
                }
            }

            Screen::Platforming => {
                if p1.just_pressed(Action::Cancel) {
                    self.level = None;
                    Some(Screen::MainMenu)
                } else {
                    self.tick_level(p1, config, &mut result);
                    None
                }
            }
        };

        if let Some(to) = next {
            let from = self.screen;
            self.screen = to;
            info!(?from, ?to, "screen changed");
            result.transition = Some((from, to));
        }
        result
    }

    fn tick_level(&mut self, p1: &InputSnapshot, config: &ArcadeConfig, result: &mut ShellTickResult) {
        let level = self.level.get_or_insert_with(|| Level::level_one(config));

        if level.is_finished() {
            if p1.just_pressed(Action::Confirm) {
                *level = Level::level_one(config);
                info!("level restarted");
            }
            return;
        }

        let tick = level_tick::tick(level, &p1.held, config);
        result.events = tick.events;
        if let Some(phase) = tick.finished {
            result.outcome = Some(SessionOutcome::LevelOver {
                won: phase == LevelPhase::Won,
                score: level.player.score,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::input::{InputFrame, InputSampler};

    /// Drives a shell with sampled held input, like a frame loop would.
    struct Harness {
        shell: Shell,
        config: ArcadeConfig,
        samplers: [InputSampler; 2],
    }

    impl Harness {
        fn new() -> Self {
            Self {
                shell: Shell::new(99),
                config: ArcadeConfig::default(),
                samplers: [InputSampler::new(), InputSampler::new()],
            }
        }

        fn frame(&mut self, p1: &[Action], p2: &[Action]) -> ShellTickResult {
            let inputs = [
                self.samplers[0].sample(InputFrame::from_actions(p1)),
                self.samplers[1].sample(InputFrame::from_actions(p2)),
            ];
            self.shell.tick(&inputs, &self.config)
        }

        fn press(&mut self, action: Action) -> ShellTickResult {
            let result = self.frame(&[action], &[]);
            self.frame(&[], &[]);
            result
        }
    }

    #[test]
    fn test_menu_cursor_debounce() {
        let mut cursor = MenuCursor::new(4);
        assert!(cursor.step(1, 9));
        assert_eq!(cursor.index(), 1);

        // Held: no repeat until the debounce lapses
        for _ in 0..8 {
            cursor.tick();
            assert!(!cursor.step(1, 9));
        }
        cursor.tick();
        assert!(cursor.step(1, 9));
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn test_menu_cursor_clamps() {
        let mut cursor = MenuCursor::new(2);
        assert!(!cursor.step(-1, 0));
        assert!(cursor.step(1, 0));
        assert!(!cursor.step(1, 0));
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn test_confirm_does_not_cascade() {
        let mut h = Harness::new();
        // Holding confirm for many frames only moves one screen
        for _ in 0..30 {
            h.frame(&[Action::Confirm], &[]);
        }
        assert_eq!(h.shell.screen(), Screen::CharacterSelect);
    }

    #[test]
    fn test_fight_flow() {
        let mut h = Harness::new();
        let result = h.press(Action::Confirm);
        assert_eq!(result.transition, Some((Screen::MainMenu, Screen::CharacterSelect)));

        // P1 moves to Iori, P2 to Mai
        h.frame(&[Action::MoveRight], &[Action::MoveRight]);
        for _ in 0..9 {
            h.frame(&[], &[Action::MoveRight]);
        }
        h.frame(&[], &[]);
        assert_eq!(h.shell.selected_roster(), (Roster::Iori, Roster::Mai));

        h.press(Action::Confirm);
        assert_eq!(h.shell.screen(), Screen::Fighting);
        let fight = h.shell.fight().expect("fight running");
        assert_eq!(fight.fighter(Side::P1).roster, Roster::Iori);
        assert_eq!(fight.fighter(Side::P2).roster, Roster::Mai);

        // Force a knockout
        if let Some(fight) = h.shell.fight.as_mut() {
            fight.fighter_mut(Side::P2).health = 0;
        }
        let result = h.frame(&[], &[]);
        assert_eq!(h.shell.screen(), Screen::GameOver { winner: Side::P1 });
        assert_eq!(
            result.outcome,
            Some(SessionOutcome::FightOver { winner: Side::P1, roster: Roster::Iori })
        );

        h.press(Action::Confirm);
        assert_eq!(h.shell.screen(), Screen::CharacterSelect);
        assert!(h.shell.fight().is_none());

        h.press(Action::Cancel);
        assert_eq!(h.shell.screen(), Screen::MainMenu);
    }

    #[test]
    fn test_platformer_flow() {
        let mut h = Harness::new();
        h.frame(&[Action::Down], &[]);
        assert_eq!(h.shell.selected_game(), GameChoice::Platformer);

        h.press(Action::Confirm);
        assert_eq!(h.shell.screen(), Screen::Platforming);
        assert!(h.shell.level().is_some());

        h.frame(&[Action::MoveRight], &[]);
        let frame = h.shell.level().map(|l| l.frame).unwrap_or(0);
        assert!(frame >= 2);

        h.press(Action::Cancel);
        assert_eq!(h.shell.screen(), Screen::MainMenu);
        assert!(h.shell.level().is_none());
    }

    #[test]
    fn test_platformer_restart_after_finish() {
        let mut h = Harness::new();
        h.frame(&[Action::Down], &[]);
        h.press(Action::Confirm);

        if let Some(level) = h.shell.level.as_mut() {
            level.player.coins = 8;
            level.coins.push(crate::platformer::world::Coin::new(
                level.player.body.position,
                &h.config.platformer,
            ));
        }
        let result = h.frame(&[], &[]);
        assert!(matches!(result.outcome, Some(SessionOutcome::LevelOver { won: true, .. })));

        // Finished levels sit still until confirm
        let frame = h.shell.level().map(|l| l.frame);
        h.frame(&[Action::MoveRight], &[]);
        assert_eq!(h.shell.level().map(|l| l.frame), frame);

        h.press(Action::Confirm);
        let level = h.shell.level().expect("fresh level");
        assert!(!level.is_finished());
        assert_eq!(level.player.coins, 0);
        assert_eq!(h.shell.screen(), Screen::Platforming);
    }

    #[test]
    fn test_fight_seeds_differ_per_match() {
        let mut h = Harness::new();
        h.press(Action::Confirm);
        h.press(Action::Confirm);
        let first = h.shell.fight().map(|f| f.seed);

        if let Some(fight) = h.shell.fight.as_mut() {
            fight.fighter_mut(Side::P1).health = 0;
        }
        h.frame(&[], &[]);
        h.press(Action::Confirm);
        h.press(Action::Confirm);
        let second = h.shell.fight().map(|f| f.seed);

        assert_eq!(first, Some(99));
        assert_eq!(second, Some(100));
    }
}

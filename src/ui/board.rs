use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gtk4::prelude::*;
use gtk4::{DrawingArea, GestureClick};

use super::rendering::{self, Region};
use super::resources::GameResources;
use crate::game::logic::{MatchContext, TurnOutcome};
use crate::game::rng::ThreadDice;
use crate::game::types::{BatBowlChoice, MatchState, Parity};
use crate::i18n::I18n;

/// The phases of the display-pacing state machine. The flow pauses
/// between revealing an intermediate state and applying the next one;
/// the pauses are timed phases driven by the frame clock so the logic
/// stays non-blocking.
#[derive(Debug, Clone)]
pub enum PacePhase {
    /// Waiting for the player to click.
    Idle,
    /// Both toss hands are shown; the winner is applied when time runs out.
    TossReveal { time_left: Duration },
    /// The toss winner's message is shown; input stays locked briefly.
    TossSettle { time_left: Duration },
    /// The first-innings close is shown; the chase starts when time runs out.
    InningsBreak { time_left: Duration },
}

const TOSS_REVEAL_DURATION: Duration = Duration::from_secs(2);
const TOSS_SETTLE_DURATION: Duration = Duration::from_secs(1);
const INNINGS_BREAK_DURATION: Duration = Duration::from_secs(2);

pub struct PacingState {
    pub phase: PacePhase,
}

impl PacingState {
    pub fn new() -> Self {
        Self {
            phase: PacePhase::Idle,
        }
    }

    /// Is a pacing pause running? (blocks every input except Restart)
    pub fn is_busy(&self) -> bool {
        !matches!(self.phase, PacePhase::Idle)
    }

    pub fn reset(&mut self) {
        self.phase = PacePhase::Idle;
    }

    pub fn start_toss_reveal(&mut self) {
        self.phase = PacePhase::TossReveal {
            time_left: TOSS_REVEAL_DURATION,
        };
    }

    pub fn start_innings_break(&mut self) {
        self.phase = PacePhase::InningsBreak {
            time_left: INNINGS_BREAK_DURATION,
        };
    }

    pub fn toss_settle_duration(&self) -> Duration {
        TOSS_SETTLE_DURATION
    }
}

/// Create the game scene drawing area with mouse handling.
pub fn create_board(
    state: Rc<RefCell<MatchContext>>,
    resources: Rc<GameResources>,
    i18n: Rc<I18n>,
    pacing: Rc<RefCell<PacingState>>,
) -> DrawingArea {
    let drawing_area = DrawingArea::new();
    drawing_area.set_content_width(rendering::REF_WIDTH as i32);
    drawing_area.set_content_height(rendering::REF_HEIGHT as i32);
    drawing_area.set_hexpand(true);
    drawing_area.set_vexpand(true);

    // --- Draw handler ---
    {
        let state = state.clone();
        let resources = resources.clone();
        let i18n = i18n.clone();
        drawing_area.set_draw_func(move |_area, cr, w, h| {
            let st = state.borrow();
            rendering::render(cr, &st, &resources, &i18n, w, h);
        });
    }

    // --- Click handler ---
    {
        let state = state.clone();
        let da = drawing_area.clone();
        let pacing = pacing.clone();
        let click = GestureClick::new();
        click.connect_released(move |_gesture, _n, x, y| {
            let (rx, ry) = rendering::widget_to_ref(x, y, da.width(), da.height());

            // Restart is the highest-priority region and also cancels a
            // running pacing pause.
            if rendering::RESTART_RECT.contains(rx, ry) {
                state.borrow_mut().restart();
                pacing.borrow_mut().reset();
                da.queue_draw();
                return;
            }
            if pacing.borrow().is_busy() {
                return;
            }

            let mut st = state.borrow_mut();
            let Some(region) = rendering::region_at(st.state, rx, ry) else {
                return;
            };
            let mut dice = ThreadDice;
            match region {
                // Already handled before the state dispatch.
                Region::Restart => {}
                Region::Odd => st.choose_parity(Parity::Odd),
                Region::Even => st.choose_parity(Parity::Even),
                Region::Bat => st.choose_bat_bowl(BatBowlChoice::Bat),
                Region::Bowl => st.choose_bat_bowl(BatBowlChoice::Bowl),
                Region::Number(n) if st.state == MatchState::TossPlay => {
                    st.roll_toss(n, &mut dice);
                    pacing.borrow_mut().start_toss_reveal();
                }
                Region::Number(n) => match st.play_turn(n, &mut dice) {
                    TurnOutcome::FirstInningsOver => {
                        pacing.borrow_mut().start_innings_break();
                    }
                    TurnOutcome::MatchOver => {
                        let _ = crate::storage::save_statistics(&st.statistics);
                    }
                    TurnOutcome::Continue | TurnOutcome::Ignored => {}
                },
            }
            drop(st);
            da.queue_draw();
        });
        drawing_area.add_controller(click);
    }

    drawing_area
}

use super::rng::Dice;
use super::types::{
    BatBowlChoice, MatchResult, MatchState, Parity, Side, Statistics, Status,
};

/// Central game state holding everything needed for one match.
///
/// Mutated only through the transition methods below; the renderer reads
/// it and draws.
#[derive(Debug, Clone)]
pub struct MatchContext {
    pub state: MatchState,
    /// Running score of the innings in progress.
    pub current_score: u32,
    pub player_score: u32,
    pub computer_score: u32,
    /// 1 or 2.
    pub current_innings: u8,
    /// 0 until innings 1 ends, then first-innings score + 1.
    pub target: u32,
    pub toss_choice: Option<Parity>,
    pub toss_winner: Option<Side>,
    pub player_bats_first: Option<bool>,
    /// Parity outcome of a rolled toss, held until the reveal pause ends.
    pending_toss: Option<Parity>,
    /// Hand values currently shown (left sprite = batter, right = bowler).
    pub batter_hand: Option<u8>,
    pub bowler_hand: Option<u8>,
    pub status: Status,
    pub result: Option<MatchResult>,
    pub statistics: Statistics,
}

/// Result of one batting/bowling exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Input arrived outside the accepted state or range.
    Ignored,
    /// Runs scored (or none), same innings continues.
    Continue,
    /// Innings 1 closed; the caller schedules `begin_second_innings`.
    FirstInningsOver,
    /// Innings 2 closed; the match result is recorded.
    MatchOver,
}

impl MatchContext {
    pub fn new() -> Self {
        Self {
            state: MatchState::Toss,
            current_score: 0,
            player_score: 0,
            computer_score: 0,
            current_innings: 1,
            target: 0,
            toss_choice: None,
            toss_winner: None,
            player_bats_first: None,
            pending_toss: None,
            batter_hand: None,
            bowler_hand: None,
            status: Status::ChooseParity,
            result: None,
            statistics: Statistics::default(),
        }
    }

    /// Reset every match field to its program-start value. Cumulative
    /// statistics survive; they span matches.
    pub fn restart(&mut self) {
        let statistics = self.statistics.clone();
        *self = Self::new();
        self.statistics = statistics;
    }

    /// Toss → TossPlay on the player's odd/even call.
    pub fn choose_parity(&mut self, parity: Parity) {
        if self.state != MatchState::Toss {
            return;
        }
        self.toss_choice = Some(parity);
        self.status = Status::ChooseTossNumber;
        self.state = MatchState::TossPlay;
    }

    /// First half of the toss: roll the computer's number and reveal both
    /// hands. The outcome is applied by [`resolve_toss`](Self::resolve_toss)
    /// once the reveal pause has run.
    pub fn roll_toss<D: Dice>(&mut self, number: u8, dice: &mut D) {
        if self.state != MatchState::TossPlay
            || self.pending_toss.is_some()
            || !(1..=6).contains(&number)
        {
            return;
        }
        let computer = dice.roll();
        let total = number + computer;
        let parity = Parity::of(total);
        self.batter_hand = Some(number);
        self.bowler_hand = Some(computer);
        self.pending_toss = Some(parity);
        self.status = Status::TossTotal {
            player: number,
            computer,
            total,
            parity,
        };
    }

    /// Second half of the toss. The player wins iff the total's parity
    /// matches their call; otherwise a coin flip decides who bats first
    /// (the computer's bat/bowl pick is a plain coin flip).
    pub fn resolve_toss<D: Dice>(&mut self, dice: &mut D) {
        let Some(outcome) = self.pending_toss.take() else {
            return;
        };
        self.batter_hand = None;
        self.bowler_hand = None;
        if self.toss_choice == Some(outcome) {
            self.toss_winner = Some(Side::Player);
            self.status = Status::PlayerWonToss;
            self.state = MatchState::ChooseBatBowl;
        } else {
            self.toss_winner = Some(Side::Computer);
            let player_bats = dice.flip();
            self.start_first_innings(player_bats, Side::Computer);
        }
    }

    /// ChooseBatBowl → Playing on the toss winner's pick.
    pub fn choose_bat_bowl(&mut self, choice: BatBowlChoice) {
        if self.state != MatchState::ChooseBatBowl {
            return;
        }
        self.start_first_innings(choice == BatBowlChoice::Bat, Side::Player);
    }

    fn start_first_innings(&mut self, player_bats_first: bool, decided_by: Side) {
        self.player_bats_first = Some(player_bats_first);
        self.state = MatchState::Playing;
        self.current_innings = 1;
        self.status = if player_bats_first {
            match decided_by {
                Side::Player => Status::PlayerBatsFirst,
                Side::Computer => Status::ComputerBowlsFirst,
            }
        } else {
            Status::BowlFirstInnings
        };
    }

    /// True if the human holds the bat in the innings in progress.
    pub fn player_is_batting(&self) -> bool {
        match self.player_bats_first {
            Some(first) => first == (self.current_innings == 1),
            None => false,
        }
    }

    /// One batting/bowling exchange. `number` is the player's pick; the
    /// computer's number is drawn from the dice. Equal numbers dismiss the
    /// batter with no runs from the turn; otherwise the batter's own
    /// number is added. In the chase the innings also closes as soon as
    /// the target is reached.
    pub fn play_turn<D: Dice>(&mut self, number: u8, dice: &mut D) -> TurnOutcome {
        if self.state != MatchState::Playing || !(1..=6).contains(&number) {
            return TurnOutcome::Ignored;
        }
        let computer = dice.roll();
        let player_batting = self.player_is_batting();
        let (bat, bowl) = if player_batting {
            (number, computer)
        } else {
            (computer, number)
        };
        self.batter_hand = Some(bat);
        self.bowler_hand = Some(bowl);

        if bat == bowl {
            return self.end_innings(bowl, player_batting);
        }

        self.current_score += u32::from(bat);
        // The status always names the bowler's pick, whichever side it was.
        self.status = Status::Scored {
            opponent: bowl,
            runs: bat,
            player_batting,
        };
        if self.current_innings == 2 && self.current_score >= self.target {
            return self.end_innings(bowl, player_batting);
        }
        TurnOutcome::Continue
    }

    fn end_innings(&mut self, opponent: u8, player_batting: bool) -> TurnOutcome {
        if player_batting {
            self.player_score = self.current_score;
        } else {
            self.computer_score = self.current_score;
        }
        if self.current_innings == 1 {
            self.target = self.current_score + 1;
            self.status = Status::FirstInningsOut {
                opponent,
                player_batting,
                score: self.current_score,
                target: self.target,
            };
            TurnOutcome::FirstInningsOver
        } else {
            self.finish();
            TurnOutcome::MatchOver
        }
    }

    /// Open the chase after the innings-break pause.
    pub fn begin_second_innings(&mut self) {
        if self.state != MatchState::Playing || self.current_innings != 1 || self.target == 0 {
            return;
        }
        self.current_innings = 2;
        self.current_score = 0;
        self.batter_hand = None;
        self.bowler_hand = None;
        self.status = if self.player_is_batting() {
            Status::PlayerToBat
        } else {
            Status::BowlSecondInnings
        };
    }

    fn finish(&mut self) {
        // Chaser wins on reaching the target, else the higher total;
        // equal totals (failed chase matching innings 1) tie.
        let player_chasing = self.player_is_batting();
        let result = if self.current_score >= self.target {
            if player_chasing {
                MatchResult::PlayerWin
            } else {
                MatchResult::ComputerWin
            }
        } else if self.player_score > self.computer_score {
            MatchResult::PlayerWin
        } else if self.computer_score > self.player_score {
            MatchResult::ComputerWin
        } else {
            MatchResult::Tie
        };

        self.state = MatchState::Result;
        self.result = Some(result);
        self.statistics.record(result);
        self.status = match result {
            MatchResult::PlayerWin => Status::PlayerWins {
                score: self.player_score,
            },
            MatchResult::ComputerWin => Status::ComputerWins {
                score: self.computer_score,
            },
            MatchResult::Tie => Status::Tie {
                score: self.player_score,
            },
        };
    }

    /// Scores shown in the two scoreboard panels: the live running score
    /// for whichever side is at bat, recorded totals otherwise.
    pub fn display_scores(&self) -> (u32, u32) {
        if self.state != MatchState::Playing || self.player_bats_first.is_none() {
            return (self.player_score, self.computer_score);
        }
        if self.player_is_batting() {
            (self.current_score, self.computer_score)
        } else {
            (self.player_score, self.current_score)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Scripted dice for deterministic tests.
    struct FixedDice {
        rolls: VecDeque<u8>,
        flips: VecDeque<bool>,
    }

    impl FixedDice {
        fn rolls(rolls: &[u8]) -> Self {
            Self {
                rolls: rolls.iter().copied().collect(),
                flips: VecDeque::new(),
            }
        }

        fn with_flips(rolls: &[u8], flips: &[bool]) -> Self {
            Self {
                rolls: rolls.iter().copied().collect(),
                flips: flips.iter().copied().collect(),
            }
        }
    }

    impl Dice for FixedDice {
        fn roll(&mut self) -> u8 {
            self.rolls.pop_front().expect("test script ran out of rolls")
        }

        fn flip(&mut self) -> bool {
            self.flips.pop_front().expect("test script ran out of flips")
        }
    }

    /// Set up a match where the player bats first (wins toss, picks Bat).
    fn player_batting_match() -> MatchContext {
        let mut ctx = MatchContext::new();
        let mut dice = FixedDice::rolls(&[4]);
        ctx.choose_parity(Parity::Odd);
        ctx.roll_toss(3, &mut dice); // 3 + 4 = 7, odd
        ctx.resolve_toss(&mut dice);
        assert_eq!(ctx.state, MatchState::ChooseBatBowl);
        ctx.choose_bat_bowl(BatBowlChoice::Bat);
        ctx
    }

    #[test]
    fn toss_outcome_matches_total_parity_for_all_rolls() {
        for human in 1..=6u8 {
            for computer in 1..=6u8 {
                for call in [Parity::Odd, Parity::Even] {
                    let mut ctx = MatchContext::new();
                    // Flip only consumed when the computer wins the toss.
                    let mut dice = FixedDice::with_flips(&[computer], &[true]);
                    ctx.choose_parity(call);
                    ctx.roll_toss(human, &mut dice);
                    assert_eq!(
                        ctx.status,
                        Status::TossTotal {
                            player: human,
                            computer,
                            total: human + computer,
                            parity: Parity::of(human + computer),
                        }
                    );
                    ctx.resolve_toss(&mut dice);
                    let player_won = Parity::of(human + computer) == call;
                    if player_won {
                        assert_eq!(ctx.toss_winner, Some(Side::Player));
                        assert_eq!(ctx.state, MatchState::ChooseBatBowl);
                    } else {
                        assert_eq!(ctx.toss_winner, Some(Side::Computer));
                        assert_eq!(ctx.state, MatchState::Playing);
                    }
                }
            }
        }
    }

    #[test]
    fn scenario_a_player_wins_toss_and_bats() {
        let ctx = player_batting_match();
        assert_eq!(ctx.player_bats_first, Some(true));
        assert_eq!(ctx.state, MatchState::Playing);
        assert_eq!(ctx.current_innings, 1);
        assert!(ctx.player_is_batting());
        assert_eq!(ctx.status, Status::PlayerBatsFirst);
    }

    #[test]
    fn computer_toss_win_flips_a_coin_for_first_bat() {
        for (flip, expect_player_bats) in [(true, true), (false, false)] {
            let mut ctx = MatchContext::new();
            let mut dice = FixedDice::with_flips(&[3], &[flip]);
            ctx.choose_parity(Parity::Odd);
            ctx.roll_toss(3, &mut dice); // total 6, even: computer wins
            ctx.resolve_toss(&mut dice);
            assert_eq!(ctx.toss_winner, Some(Side::Computer));
            assert_eq!(ctx.player_bats_first, Some(expect_player_bats));
            assert_eq!(ctx.state, MatchState::Playing);
            let expected = if expect_player_bats {
                Status::ComputerBowlsFirst
            } else {
                Status::BowlFirstInnings
            };
            assert_eq!(ctx.status, expected);
        }
    }

    #[test]
    fn non_dismissal_turn_adds_the_batting_number() {
        let mut ctx = player_batting_match();
        let mut dice = FixedDice::rolls(&[2]);
        assert_eq!(ctx.play_turn(5, &mut dice), TurnOutcome::Continue);
        assert_eq!(ctx.current_score, 5);
        assert_eq!(
            ctx.status,
            Status::Scored {
                opponent: 2,
                runs: 5,
                player_batting: true,
            }
        );
        assert_eq!(ctx.batter_hand, Some(5));
        assert_eq!(ctx.bowler_hand, Some(2));
    }

    #[test]
    fn scenario_b_dismissal_keeps_prior_score_and_sets_target() {
        let mut ctx = player_batting_match();
        let mut dice = FixedDice::rolls(&[1, 2, 2]);
        assert_eq!(ctx.play_turn(4, &mut dice), TurnOutcome::Continue);
        assert_eq!(ctx.play_turn(6, &mut dice), TurnOutcome::Continue);
        // No target while innings 1 is still open.
        assert_eq!(ctx.target, 0);
        // Third turn: both sides pick 2 -> OUT, no runs from this turn.
        assert_eq!(ctx.play_turn(2, &mut dice), TurnOutcome::FirstInningsOver);
        assert_eq!(ctx.player_score, 10);
        assert_eq!(ctx.target, 11);
        assert_eq!(
            ctx.status,
            Status::FirstInningsOut {
                opponent: 2,
                player_batting: true,
                score: 10,
                target: 11,
            }
        );

        ctx.begin_second_innings();
        assert_eq!(ctx.current_innings, 2);
        assert_eq!(ctx.current_score, 0);
        assert_eq!(ctx.batter_hand, None);
        assert_eq!(ctx.bowler_hand, None);
        assert!(!ctx.player_is_batting());
        assert_eq!(ctx.status, Status::BowlSecondInnings);
        // Target is never recomputed during the chase.
        let mut dice = FixedDice::rolls(&[3]);
        ctx.play_turn(1, &mut dice);
        assert_eq!(ctx.target, 11);
    }

    #[test]
    fn scenario_c_chase_ends_immediately_on_reaching_target() {
        let mut ctx = player_batting_match();
        // Innings 1: player scores 4+6=10, out on the third ball.
        let mut dice = FixedDice::rolls(&[1, 2, 2]);
        ctx.play_turn(4, &mut dice);
        ctx.play_turn(6, &mut dice);
        ctx.play_turn(2, &mut dice);
        ctx.begin_second_innings();

        // Chase: computer bats 6 and 5 (player bowls 1 then 2) -> 11.
        let mut dice = FixedDice::rolls(&[6, 5]);
        assert_eq!(ctx.play_turn(1, &mut dice), TurnOutcome::Continue);
        assert_eq!(ctx.play_turn(2, &mut dice), TurnOutcome::MatchOver);
        assert_eq!(ctx.current_score, 11);
        assert_eq!(ctx.state, MatchState::Result);
        assert_eq!(ctx.result, Some(MatchResult::ComputerWin));
        assert_eq!(ctx.computer_score, 11);
        assert_eq!(ctx.status, Status::ComputerWins { score: 11 });
    }

    #[test]
    fn failed_chase_below_first_innings_score_loses() {
        let mut ctx = player_batting_match();
        let mut dice = FixedDice::rolls(&[1, 2, 2]);
        ctx.play_turn(4, &mut dice);
        ctx.play_turn(6, &mut dice);
        ctx.play_turn(2, &mut dice); // player out at 10, target 11
        ctx.begin_second_innings();

        // Computer scores 3, then is dismissed (both 4).
        let mut dice = FixedDice::rolls(&[3, 4]);
        ctx.play_turn(1, &mut dice);
        assert_eq!(ctx.play_turn(4, &mut dice), TurnOutcome::MatchOver);
        assert_eq!(ctx.result, Some(MatchResult::PlayerWin));
        assert_eq!(ctx.status, Status::PlayerWins { score: 10 });
    }

    #[test]
    fn equal_scores_with_failed_chase_tie() {
        let mut ctx = player_batting_match();
        let mut dice = FixedDice::rolls(&[1, 2, 2]);
        ctx.play_turn(4, &mut dice);
        ctx.play_turn(6, &mut dice);
        ctx.play_turn(2, &mut dice); // player out at 10, target 11
        ctx.begin_second_innings();

        // Computer reaches exactly 10 (4+6), then is dismissed (both 3).
        let mut dice = FixedDice::rolls(&[4, 6, 3]);
        ctx.play_turn(1, &mut dice);
        ctx.play_turn(2, &mut dice);
        assert_eq!(ctx.play_turn(3, &mut dice), TurnOutcome::MatchOver);
        assert_eq!(ctx.result, Some(MatchResult::Tie));
        assert_eq!(ctx.player_score, 10);
        assert_eq!(ctx.computer_score, 10);
        assert_eq!(ctx.status, Status::Tie { score: 10 });
    }

    #[test]
    fn player_bowling_adds_the_computers_number() {
        let mut ctx = MatchContext::new();
        let mut dice = FixedDice::with_flips(&[3], &[false]);
        ctx.choose_parity(Parity::Odd);
        ctx.roll_toss(3, &mut dice); // computer wins, flip=false: computer bats
        ctx.resolve_toss(&mut dice);
        assert!(!ctx.player_is_batting());

        let mut dice = FixedDice::rolls(&[5]);
        assert_eq!(ctx.play_turn(2, &mut dice), TurnOutcome::Continue);
        assert_eq!(ctx.current_score, 5);
        // Left sprite shows the batter (computer), right the bowler (player).
        assert_eq!(ctx.batter_hand, Some(5));
        assert_eq!(ctx.bowler_hand, Some(2));
        // The status carries the player's bowled pick, not the batted 5.
        assert_eq!(
            ctx.status,
            Status::Scored {
                opponent: 2,
                runs: 5,
                player_batting: false,
            }
        );
    }

    #[test]
    fn chase_status_names_the_bowled_number() {
        let mut ctx = player_batting_match();
        let mut dice = FixedDice::rolls(&[1, 4]);
        ctx.play_turn(4, &mut dice);
        ctx.play_turn(4, &mut dice); // out at 4, target 5
        ctx.begin_second_innings();

        // Chase: the player bowls 1, the computer bats 3.
        let mut dice = FixedDice::rolls(&[3]);
        assert_eq!(ctx.play_turn(1, &mut dice), TurnOutcome::Continue);
        assert_eq!(
            ctx.status,
            Status::Scored {
                opponent: 1,
                runs: 3,
                player_batting: false,
            }
        );
    }

    #[test]
    fn live_score_is_shown_for_the_side_at_bat() {
        let mut ctx = player_batting_match();
        let mut dice = FixedDice::rolls(&[1]);
        ctx.play_turn(4, &mut dice);
        assert_eq!(ctx.display_scores(), (4, 0));

        let mut dice = FixedDice::rolls(&[3, 4, 3]);
        ctx.play_turn(2, &mut dice); // 6 total
        ctx.play_turn(4, &mut dice); // out at 6, target 7
        ctx.begin_second_innings();
        ctx.play_turn(1, &mut dice); // computer bats 3
        assert_eq!(ctx.display_scores(), (6, 3));
    }

    #[test]
    fn inputs_outside_the_active_state_are_ignored() {
        let mut ctx = MatchContext::new();
        let mut dice = FixedDice::rolls(&[]);
        assert_eq!(ctx.play_turn(3, &mut dice), TurnOutcome::Ignored);
        ctx.choose_bat_bowl(BatBowlChoice::Bat);
        assert_eq!(ctx.state, MatchState::Toss);
        ctx.roll_toss(3, &mut dice);
        assert_eq!(ctx.state, MatchState::Toss);
        // A second parity pick while already waiting for the number.
        ctx.choose_parity(Parity::Odd);
        ctx.choose_parity(Parity::Even);
        assert_eq!(ctx.toss_choice, Some(Parity::Odd));
    }

    #[test]
    fn second_toss_number_during_reveal_is_ignored() {
        let mut ctx = MatchContext::new();
        let mut dice = FixedDice::rolls(&[4]);
        ctx.choose_parity(Parity::Odd);
        ctx.roll_toss(3, &mut dice);
        // Reveal pending: another number must not re-roll.
        ctx.roll_toss(5, &mut dice);
        assert_eq!(ctx.batter_hand, Some(3));
    }

    #[test]
    fn restart_resets_every_match_field() {
        let mut ctx = player_batting_match();
        let mut dice = FixedDice::rolls(&[1, 4, 4, 3]);
        ctx.play_turn(4, &mut dice);
        ctx.play_turn(4, &mut dice); // out at 4, target 5
        ctx.begin_second_innings();
        ctx.play_turn(1, &mut dice); // computer bats 4
        ctx.play_turn(2, &mut dice); // computer bats 3 -> 7 >= 5, match over
        assert_eq!(ctx.state, MatchState::Result);
        let stats_before = ctx.statistics.clone();

        ctx.restart();
        let fresh = MatchContext::new();
        assert_eq!(ctx.state, fresh.state);
        assert_eq!(ctx.current_score, 0);
        assert_eq!(ctx.player_score, 0);
        assert_eq!(ctx.computer_score, 0);
        assert_eq!(ctx.current_innings, 1);
        assert_eq!(ctx.target, 0);
        assert_eq!(ctx.toss_choice, None);
        assert_eq!(ctx.toss_winner, None);
        assert_eq!(ctx.player_bats_first, None);
        assert_eq!(ctx.batter_hand, None);
        assert_eq!(ctx.bowler_hand, None);
        assert_eq!(ctx.status, Status::ChooseParity);
        assert_eq!(ctx.result, None);
        // Cross-match statistics are kept.
        assert_eq!(ctx.statistics.computer_wins, stats_before.computer_wins);
    }

    #[test]
    fn statistics_record_each_result() {
        let mut stats = Statistics::default();
        stats.record(MatchResult::PlayerWin);
        stats.record(MatchResult::ComputerWin);
        stats.record(MatchResult::ComputerWin);
        stats.record(MatchResult::Tie);
        assert_eq!(stats.player_wins, 1);
        assert_eq!(stats.computer_wins, 2);
        assert_eq!(stats.ties, 1);
    }
}

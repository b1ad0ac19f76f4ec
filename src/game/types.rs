/// Which screen of the match flow is active.
///
/// The ordering matters to the renderer: everything from `TossPlay`
/// onwards shows the hand sprites and the hexagonal number pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchState {
    Toss,
    TossPlay,
    ChooseBatBowl,
    Playing,
    Result,
}

/// Odd/even call made by the player before the toss roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    /// Parity of a toss total.
    pub fn of(total: u8) -> Self {
        if total % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

/// What the toss winner elects to do first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatBowlChoice {
    Bat,
    Bowl,
}

/// The two sides of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Computer,
}

/// Final outcome of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    PlayerWin,
    ComputerWin,
    Tie,
}

/// Status line shown below the scoreboard. The renderer turns these into
/// localized text; the game logic never builds display strings itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// "Choose Odd or Even to toss."
    ChooseParity,
    /// "Now choose a number for the toss."
    ChooseTossNumber,
    /// Both toss numbers revealed, shown during the reveal pause.
    TossTotal {
        player: u8,
        computer: u8,
        total: u8,
        parity: Parity,
    },
    /// Player won the toss and gets to pick bat or bowl.
    PlayerWonToss,
    /// Player elected to bat.
    PlayerBatsFirst,
    /// Computer won the toss and bowls first.
    ComputerBowlsFirst,
    /// Computer bats first; the player is asked to bowl.
    BowlFirstInnings,
    /// A non-dismissal turn: `opponent` is the bowler's number,
    /// `runs` the batting side's number that was added.
    Scored {
        opponent: u8,
        runs: u8,
        player_batting: bool,
    },
    /// Innings 1 ended by dismissal; the target for the chase is set.
    FirstInningsOut {
        opponent: u8,
        player_batting: bool,
        score: u32,
        target: u32,
    },
    /// Second innings, player bats.
    PlayerToBat,
    /// Second innings, player bowls.
    BowlSecondInnings,
    PlayerWins { score: u32 },
    ComputerWins { score: u32 },
    Tie { score: u32 },
}

/// Cumulative win/loss/tie statistics across matches.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Statistics {
    pub player_wins: u32,
    pub computer_wins: u32,
    pub ties: u32,
}

impl Statistics {
    pub fn record(&mut self, result: MatchResult) {
        match result {
            MatchResult::PlayerWin => self.player_wins += 1,
            MatchResult::ComputerWin => self.computer_wins += 1,
            MatchResult::Tie => self.ties += 1,
        }
    }
}

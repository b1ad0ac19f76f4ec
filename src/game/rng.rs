use rand::Rng;

/// Source of the game's randomness: the computer's hand numbers and the
/// coin flip after the computer wins the toss. Injected into the
/// transition functions so tests can script exact sequences.
pub trait Dice {
    /// Uniform number in 1..=6.
    fn roll(&mut self) -> u8;
    /// Fair coin.
    fn flip(&mut self) -> bool;
}

/// Production dice backed by the thread-local RNG.
pub struct ThreadDice;

impl Dice for ThreadDice {
    fn roll(&mut self) -> u8 {
        rand::thread_rng().gen_range(1..=6)
    }

    fn flip(&mut self) -> bool {
        rand::thread_rng().gen_bool(0.5)
    }
}

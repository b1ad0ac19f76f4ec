use std::path::Path;

use gdk_pixbuf::Pixbuf;

/// A hand sprite: either a loaded raster image or a generated
/// placeholder carrying the label that was meant to be shown.
pub enum HandImage {
    Raster(Pixbuf),
    Placeholder(String),
}

/// The hand sprites used by the renderer: `hand0.png` (neutral pose)
/// through `hand6.png`, plus the lower-arm sprite drawn under both hands.
pub struct GameResources {
    hands: Vec<HandImage>,
    base: HandImage,
}

impl GameResources {
    /// Load all sprites from the given directory. A missing or corrupt
    /// file is replaced by a labelled placeholder and logged; gameplay
    /// never depends on the load succeeding.
    pub fn load<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();

        let hands = (0..=6)
            .map(|i| Self::load_image(dir, &format!("hand{}", i), &i.to_string()))
            .collect();
        let base = Self::load_image(dir, "hand_base", "-1");

        Self { hands, base }
    }

    fn load_image(dir: &Path, name: &str, label: &str) -> HandImage {
        let path = dir.join(format!("{}.png", name));
        match Pixbuf::from_file(&path) {
            Ok(pb) => HandImage::Raster(pb),
            Err(e) => {
                eprintln!(
                    "Warning: could not load {}: {}. Using placeholder.",
                    path.display(),
                    e
                );
                HandImage::Placeholder(label.to_string())
            }
        }
    }

    /// Sprite for a hand value 0–6 (0 = neutral pose).
    pub fn hand(&self, value: u8) -> &HandImage {
        let idx = usize::from(value).min(self.hands.len() - 1);
        &self.hands[idx]
    }

    /// Lower-arm sprite drawn beneath each hand.
    pub fn base(&self) -> &HandImage {
        &self.base
    }
}

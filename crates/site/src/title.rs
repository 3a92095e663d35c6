use foundation::time::Time;
use foundation::{PROJECT_PALETTE, Rgb};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use runtime::Interval;

pub const TITLE_TICK_S: f64 = 0.150;
const MAX_RECOLOR_PER_TICK: usize = 5;

/// Per-letter coloring of an animated heading.
///
/// Adjacent letters never share a color, both after construction and after
/// every tick.
#[derive(Debug, Clone)]
pub struct TitleAnimator {
    letters: Vec<char>,
    colors: Vec<usize>,
    rng: ChaCha8Rng,
    interval: Interval,
}

impl TitleAnimator {
    pub fn new(text: &str, seed: u64, now: Time) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let letters: Vec<char> = text.chars().collect();
        let mut colors: Vec<usize> = Vec::with_capacity(letters.len());
        for i in 0..letters.len() {
            let left = i.checked_sub(1).map(|l| colors[l]);
            colors.push(pick_color(&mut rng, left, None));
        }
        Self {
            letters,
            colors,
            rng,
            interval: Interval::new(now, TITLE_TICK_S),
        }
    }

    pub fn text(&self) -> String {
        self.letters.iter().collect()
    }

    pub fn color_indices(&self) -> &[usize] {
        &self.colors
    }

    /// Letter and color pairs, in order.
    pub fn spans(&self) -> impl Iterator<Item = (char, Rgb)> + '_ {
        self.letters
            .iter()
            .zip(&self.colors)
            .map(|(ch, &c)| (*ch, PROJECT_PALETTE[c]))
    }

    /// Recolors 1 to 5 random letters.
    pub fn tick(&mut self) {
        let len = self.letters.len();
        if len == 0 {
            return;
        }
        let count = self.rng.gen_range(1..=MAX_RECOLOR_PER_TICK);
        for _ in 0..count {
            let pos = self.rng.gen_range(0..len);
            let left = pos.checked_sub(1).map(|l| self.colors[l]);
            let right = (pos + 1 < len).then(|| self.colors[pos + 1]);
            self.colors[pos] = pick_color(&mut self.rng, left, right);
        }
    }

    /// Advances to `now`. Missed periods collapse into a single tick.
    /// Returns `true` if the colors changed.
    pub fn advance(&mut self, now: Time) -> bool {
        if self.interval.poll(now) == 0 {
            return false;
        }
        self.tick();
        true
    }
}

fn pick_color(rng: &mut ChaCha8Rng, left: Option<usize>, right: Option<usize>) -> usize {
    let candidates: Vec<usize> = (0..PROJECT_PALETTE.len())
        .filter(|c| Some(*c) != left && Some(*c) != right)
        .collect();
    candidates[rng.gen_range(0..candidates.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacent_distinct(t: &TitleAnimator) -> bool {
        t.color_indices().windows(2).all(|w| w[0] != w[1])
    }

    #[test]
    fn initial_colors_differ_from_neighbors() {
        for seed in 0..20 {
            let t = TitleAnimator::new("TechFusion Hackathon", seed, Time::ZERO);
            assert_eq!(t.color_indices().len(), 20);
            assert!(adjacent_distinct(&t));
        }
    }

    #[test]
    fn ticks_keep_neighbors_distinct() {
        let mut t = TitleAnimator::new("PIXELS", 7, Time::ZERO);
        for _ in 0..500 {
            t.tick();
            assert!(adjacent_distinct(&t));
        }
    }

    #[test]
    fn advance_follows_the_interval() {
        let mut t = TitleAnimator::new("ab", 1, Time::ZERO);
        assert!(!t.advance(Time(0.1)));
        assert!(t.advance(Time(0.15)));
        assert!(!t.advance(Time(0.2)));
        assert!(t.advance(Time(5.0)));
    }

    #[test]
    fn same_seed_same_colors() {
        let a = TitleAnimator::new("grid", 42, Time::ZERO);
        let b = TitleAnimator::new("grid", 42, Time::ZERO);
        assert_eq!(a.color_indices(), b.color_indices());
        assert_eq!(a.text(), "grid");
        assert_eq!(a.spans().count(), 4);
    }

    #[test]
    fn empty_text_is_inert() {
        let mut t = TitleAnimator::new("", 0, Time::ZERO);
        t.tick();
        assert!(t.color_indices().is_empty());
    }
}

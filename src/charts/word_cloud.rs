//! Word Cloud Renderer
//! Frequency-weighted word cloud of the raw description text.
//!
//! Words are placed largest first, each at the free spot nearest the canvas
//! centre. Occupied boxes are tracked with an integral image so a candidate
//! position is checked in constant time.
//!
//! Only single words are counted; two-word collocations are not formed.

use image::{Rgba, RgbaImage};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use super::renderer::{draw_text, draw_text_centered, draw_text_rotated, BLACK, PALETTE, WHITE};
use super::ChartFont;

pub const WORD_CLOUD_TITLE: &str = "Job Description WordCloud";

/// English stop words dropped before counting.
pub const STOPWORDS: [&str; 192] = [
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "com", "could", "couldn't", "did", "didn't",
    "do", "does", "doesn't", "doing", "don't", "down", "during", "each", "else", "ever", "few",
    "for", "from", "further", "get", "had", "hadn't", "has", "hasn't", "have", "haven't",
    "having", "he", "he'd", "he'll", "he's", "hence", "her", "here", "here's", "hers", "herself",
    "him", "himself", "his", "how", "how's", "however", "http", "i", "i'd", "i'll", "i'm",
    "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "just", "k",
    "let's", "like", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of",
    "off", "on", "once", "only", "or", "other", "otherwise", "ought", "our", "ours", "ourselves",
    "out", "over", "own", "r", "same", "shall", "shan't", "she", "she'd", "she'll", "she's",
    "should", "shouldn't", "since", "so", "some", "such", "than", "that", "that's", "the",
    "their", "theirs", "them", "themselves", "then", "there", "there's", "therefore", "these",
    "they", "they'd", "they'll", "they're", "they've", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "wasn't", "we", "we'd", "we'll", "we're", "we've",
    "were", "weren't", "what", "what's", "when", "when's", "where", "where's", "which", "while",
    "who", "who's", "whom", "why", "why's", "with", "won't", "would", "wouldn't", "www", "you",
    "you'd", "you'll", "you're", "you've", "your", "yours", "yourself", "yourselves",
];

/// Candidate positions are spaced this many pixels apart.
const POSITION_STEP: u32 = 2;
const TITLE_SIZE: f32 = 18.0;
const MIN_FONT_STEP: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct WordCloudOptions {
    pub width: u32,
    pub height: u32,
    /// Height of the band above the cloud holding the title.
    pub title_band: u32,
    pub max_words: usize,
    pub max_font_size: f32,
    pub min_font_size: f32,
    pub font_step: f32,
    pub margin: u32,
    /// 0 sizes words by rank only, 1 strictly by frequency.
    pub relative_scaling: f32,
    pub prefer_horizontal: f32,
}

impl Default for WordCloudOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            title_band: 40,
            max_words: 200,
            max_font_size: 120.0,
            min_font_size: 4.0,
            font_step: 1.0,
            margin: 2,
            relative_scaling: 0.5,
            prefer_horizontal: 0.9,
        }
    }
}

/// A counted word and its frequency relative to the most common word.
#[derive(Debug, Clone, PartialEq)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
    pub weight: f32,
}

/// A word positioned on the cloud canvas (title band excluded).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub font_size: f32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub vertical: bool,
    pub color: Rgba<u8>,
}

pub struct WordCloudRenderer<'f> {
    font: &'f ChartFont,
    options: WordCloudOptions,
}

impl<'f> WordCloudRenderer<'f> {
    pub fn new(font: &'f ChartFont) -> Self {
        Self::with_options(font, WordCloudOptions::default())
    }

    /// A `font_step` below 1 is raised to 1.
    pub fn with_options(font: &'f ChartFont, mut options: WordCloudOptions) -> Self {
        if options.font_step.is_nan() || options.font_step < MIN_FONT_STEP {
            options.font_step = MIN_FONT_STEP;
        }
        Self { font, options }
    }

    /// Count words in `corpus`: stop words and bare numbers dropped, case
    /// variants and simple plurals merged, most frequent first.
    pub fn word_frequencies(&self, corpus: &str) -> Vec<WordFrequency> {
        let stopwords: HashSet<&str> = STOPWORDS.iter().copied().collect();

        // lowercase form -> (first seen rank, counts per spelling in first-seen order)
        let mut groups: HashMap<String, (usize, Vec<(String, usize)>)> = HashMap::new();
        for token in tokens(corpus) {
            let token = strip_possessive(token);
            if token.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            let lower = token.to_lowercase();
            if stopwords.contains(lower.as_str()) {
                continue;
            }

            let next_rank = groups.len();
            let (_, spellings) = groups.entry(lower).or_insert_with(|| (next_rank, Vec::new()));
            match spellings.iter_mut().find(|(s, _)| s == token) {
                Some((_, n)) => *n += 1,
                None => spellings.push((token.to_string(), 1)),
            }
        }

        // Fold "xs" into "x" when both were seen.
        let plurals: Vec<String> = groups
            .keys()
            .filter(|w| w.ends_with('s') && !w.ends_with("ss") && w.len() > 1)
            .filter(|w| groups.contains_key(&w[..w.len() - 1]))
            .cloned()
            .collect();
        for plural in plurals {
            if let Some((_, spellings)) = groups.remove(&plural) {
                let total: usize = spellings.iter().map(|(_, n)| n).sum();
                if let Some((_, singular)) = groups.get_mut(&plural[..plural.len() - 1]) {
                    singular.push((String::new(), total));
                }
            }
        }

        let mut words: Vec<(usize, WordFrequency)> = groups
            .into_values()
            .map(|(rank, spellings)| {
                let count = spellings.iter().map(|(_, n)| n).sum();
                // Most common spelling; earlier spelling wins ties.
                let word = spellings
                    .iter()
                    .filter(|(s, _)| !s.is_empty())
                    .fold(None::<&(String, usize)>, |best, cur| match best {
                        Some(b) if b.1 >= cur.1 => Some(b),
                        _ => Some(cur),
                    })
                    .map(|(s, _)| s.clone())
                    .unwrap_or_default();
                (
                    rank,
                    WordFrequency {
                        word,
                        count,
                        weight: 0.0,
                    },
                )
            })
            .collect();

        words.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.0.cmp(&b.0)));
        words.truncate(self.options.max_words);

        let max_count = words.first().map(|(_, w)| w.count).unwrap_or(1) as f32;
        words
            .into_iter()
            .map(|(_, mut w)| {
                w.weight = w.count as f32 / max_count;
                w
            })
            .collect()
    }

    /// Place the words of `corpus` on the canvas.
    pub fn layout(&self, corpus: &str) -> Vec<PlacedWord> {
        self.layout_frequencies(&self.word_frequencies(corpus))
    }

    /// Place pre-counted words, largest first, stopping at the first word
    /// that no longer fits at the minimum font size.
    pub fn layout_frequencies(&self, words: &[WordFrequency]) -> Vec<PlacedWord> {
        let opts = &self.options;
        let mut occupancy = Occupancy::new(opts.width, opts.height);
        let candidates = candidate_centers(opts.width, opts.height);
        let mut placed = Vec::new();

        let mut font_size = opts.max_font_size;
        let mut last_weight = 1.0f32;
        for (rank, wf) in words.iter().enumerate() {
            if wf.weight <= 0.0 {
                continue;
            }
            if opts.relative_scaling != 0.0 {
                let rs = opts.relative_scaling;
                font_size = ((rs * wf.weight / last_weight + (1.0 - rs)) * font_size).round();
            }

            let preferred_vertical = self.prefers_vertical(rank);
            let mut vertical = preferred_vertical;
            let mut tried_other = false;
            let spot = loop {
                if font_size < opts.min_font_size {
                    break None;
                }
                let (tw, th) = self.font.measure(&wf.word, font_size);
                let (bw, bh) = if vertical { (th, tw) } else { (tw, th) };
                if let Some(pos) =
                    occupancy.find_free(&candidates, bw + opts.margin, bh + opts.margin)
                {
                    break Some((pos, bw, bh));
                }
                if !tried_other && opts.prefer_horizontal < 1.0 {
                    vertical = !vertical;
                    tried_other = true;
                } else {
                    font_size -= opts.font_step;
                    vertical = preferred_vertical;
                }
            };

            let Some(((x, y), bw, bh)) = spot else {
                tracing::debug!(placed = placed.len(), "word cloud canvas full");
                break;
            };
            occupancy.fill(x, y, bw + opts.margin, bh + opts.margin);
            placed.push(PlacedWord {
                word: wf.word.clone(),
                font_size,
                x: x + opts.margin / 2,
                y: y + opts.margin / 2,
                width: bw,
                height: bh,
                vertical,
                color: PALETTE[rank % PALETTE.len()],
            });
            last_weight = wf.weight;
        }
        placed
    }

    /// Deterministic stand-in for a random orientation draw.
    fn prefers_vertical(&self, rank: usize) -> bool {
        let every = (1.0 / (1.0 - self.options.prefer_horizontal).max(f32::EPSILON)).round();
        every.is_finite() && every >= 1.0 && every < 1e6 && (rank + 1) % every as usize == 0
    }

    /// Render the cloud under its title; an empty corpus gives a blank canvas.
    pub fn render(&self, corpus: &str) -> RgbaImage {
        let opts = &self.options;
        let words = self.layout(corpus);
        let mut img = RgbaImage::from_pixel(opts.width, opts.height + opts.title_band, WHITE);

        draw_text_centered(
            &mut img,
            self.font,
            TITLE_SIZE,
            WORD_CLOUD_TITLE,
            (opts.width / 2) as i32,
            (opts.title_band as f32 / 2.0 - TITLE_SIZE / 2.0).max(0.0) as i32,
            BLACK,
        );

        let top = opts.title_band as i32;
        for word in &words {
            if word.vertical {
                draw_text_rotated(
                    &mut img,
                    self.font,
                    word.font_size,
                    &word.word,
                    word.x as i32,
                    top + word.y as i32,
                    90.0,
                    word.color,
                );
            } else {
                draw_text(
                    &mut img,
                    self.font,
                    word.font_size,
                    &word.word,
                    word.x as i32,
                    top + word.y as i32,
                    word.color,
                );
            }
        }
        img
    }
}

static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Tokens of two or more characters: a word character followed by word
/// characters or apostrophes.
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    let pattern = TOKEN_PATTERN.get_or_init(|| Regex::new(r"\w[\w']+").expect("valid token pattern"));
    pattern.find_iter(text).map(|m| m.as_str())
}

fn strip_possessive(token: &str) -> &str {
    let n = token.len();
    if n > 2 && token.is_char_boundary(n - 2) && token[n - 2..].eq_ignore_ascii_case("'s") {
        &token[..n - 2]
    } else {
        token
    }
}

/// Grid points sorted by distance from the canvas centre.
fn candidate_centers(width: u32, height: u32) -> Vec<(u32, u32)> {
    let (cx, cy) = (width as i64 / 2, height as i64 / 2);
    let mut points: Vec<(u32, u32)> = (0..height)
        .step_by(POSITION_STEP as usize)
        .flat_map(|y| (0..width).step_by(POSITION_STEP as usize).map(move |x| (x, y)))
        .collect();
    points.sort_by_key(|&(x, y)| {
        let (dx, dy) = (x as i64 - cx, y as i64 - cy);
        (dx * dx + dy * dy, y, x)
    });
    points
}

/// Occupied-pixel map with a summed-area table for O(1) box queries.
struct Occupancy {
    width: u32,
    height: u32,
    cells: Vec<bool>,
    /// (width + 1) x (height + 1), row-major.
    integral: Vec<u32>,
}

impl Occupancy {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; (width * height) as usize],
            integral: vec![0; ((width + 1) * (height + 1)) as usize],
        }
    }

    fn sum_at(&self, x: u32, y: u32) -> u32 {
        self.integral[(y * (self.width + 1) + x) as usize]
    }

    fn is_free(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        if x + w > self.width || y + h > self.height {
            return false;
        }
        let total = self.sum_at(x + w, y + h) + self.sum_at(x, y)
            - self.sum_at(x + w, y)
            - self.sum_at(x, y + h);
        total == 0
    }

    /// Top-left of the free `w` x `h` box whose centre is nearest the canvas centre.
    fn find_free(&self, candidates: &[(u32, u32)], w: u32, h: u32) -> Option<(u32, u32)> {
        if w == 0 || h == 0 || w > self.width || h > self.height {
            return None;
        }
        candidates.iter().find_map(|&(cx, cy)| {
            let x = cx.checked_sub(w / 2)?;
            let y = cy.checked_sub(h / 2)?;
            self.is_free(x, y, w, h).then_some((x, y))
        })
    }

    fn fill(&mut self, x: u32, y: u32, w: u32, h: u32) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for row in y..y_end {
            for col in x..x_end {
                self.cells[(row * self.width + col) as usize] = true;
            }
        }
        self.rebuild_from(y);
    }

    /// Recompute integral rows below `y`; rows above are unchanged.
    fn rebuild_from(&mut self, y: u32) {
        let stride = (self.width + 1) as usize;
        for row in y..self.height {
            let mut row_sum = 0u32;
            for col in 0..self.width {
                row_sum += self.cells[(row * self.width + col) as usize] as u32;
                let above = self.integral[row as usize * stride + col as usize + 1];
                self.integral[(row as usize + 1) * stride + col as usize + 1] = above + row_sum;
            }
        }
    }
}

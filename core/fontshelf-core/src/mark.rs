//! MarkBuilder: draw letterforms on a 5x5 dot grid
//!
//! Time is explicit. Strokes of an animated glyph are scheduled on a
//! [`TimerSet`] and land when the caller advances the builder's clock, so
//! the same state machine drives a terminal animation and unit tests.

use std::time::Duration;

use anyhow::{anyhow, Result};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

pub const GRID_SIZE: u8 = 5;
pub const POINT_COUNT: u8 = GRID_SIZE * GRID_SIZE;
/// Gap between strokes of an animated glyph.
pub const STROKE_DELAY: Duration = Duration::from_millis(150);
/// Delay before the intro glyph starts drawing.
pub const INTRO_DELAY: Duration = Duration::from_millis(500);
pub const INTRO_GLYPH: char = 'K';

/// Line between two grid points, stored with the smaller index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment {
    a: u8,
    b: u8,
}

impl Segment {
    pub fn new(from: u8, to: u8) -> Result<Self> {
        if from >= POINT_COUNT || to >= POINT_COUNT {
            return Err(anyhow!("grid point out of range: {from}-{to}"));
        }
        if from == to {
            return Err(anyhow!("segment needs two distinct points, got {from}"));
        }
        Ok(Self {
            a: from.min(to),
            b: from.max(to),
        })
    }

    pub fn ends(self) -> (u8, u8) {
        (self.a, self.b)
    }
}

const GLYPHS: &[(char, &[(u8, u8)])] = &[
    ('A', &[(20, 10), (10, 2), (2, 14), (14, 24), (11, 13)]),
    ('B', &[(0, 20), (0, 2), (2, 12), (12, 10), (12, 14), (14, 24), (24, 20)]),
    ('C', &[(4, 0), (0, 20), (20, 24)]),
    ('E', &[(4, 0), (0, 20), (20, 24), (10, 13)]),
    ('F', &[(20, 0), (0, 4), (10, 13)]),
    ('H', &[(0, 20), (4, 24), (10, 14)]),
    ('I', &[(1, 3), (2, 22), (21, 23)]),
    ('K', &[(0, 10), (10, 20), (4, 11), (11, 10), (10, 17), (17, 24)]),
    ('L', &[(0, 20), (20, 24)]),
    ('M', &[(20, 0), (0, 12), (12, 4), (4, 24)]),
    ('N', &[(20, 0), (0, 24), (24, 4)]),
    ('O', &[(0, 4), (4, 24), (24, 20), (20, 0)]),
    ('P', &[(20, 0), (0, 4), (4, 14), (14, 10)]),
    ('R', &[(20, 0), (0, 4), (4, 14), (14, 10), (12, 24)]),
    ('S', &[(4, 0), (0, 10), (10, 14), (14, 24), (24, 20)]),
    ('T', &[(0, 4), (2, 22)]),
    ('U', &[(0, 20), (20, 24), (24, 4)]),
    ('V', &[(0, 22), (22, 4)]),
    ('W', &[(0, 20), (20, 12), (12, 24), (24, 4)]),
    ('X', &[(0, 24), (4, 20)]),
    ('Y', &[(0, 12), (4, 12), (12, 22)]),
    ('Z', &[(0, 4), (4, 20), (20, 24)]),
];

/// Letters the builder knows how to draw.
pub fn glyph_keys() -> Vec<char> {
    GLYPHS.iter().map(|(key, _)| *key).collect()
}

/// Strokes for `key` in drawing order.
pub fn glyph_strokes(key: char) -> Option<Vec<Segment>> {
    let key = key.to_ascii_uppercase();
    GLYPHS.iter().find(|(k, _)| *k == key).map(|(_, pairs)| {
        pairs
            .iter()
            .filter_map(|&(from, to)| Segment::new(from, to).ok())
            .collect()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Cancellable callbacks keyed by id, due at an absolute time.
#[derive(Debug, Clone)]
pub struct TimerSet<P> {
    pending: Vec<(TimerId, Duration, P)>,
    next_id: u64,
}

impl<P> Default for TimerSet<P> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
        }
    }
}

impl<P> TimerSet<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: Duration, payload: P) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push((id, at, payload));
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(pending, _, _)| *pending != id);
        before != self.pending.len()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return timers due at or before `now`, earliest first,
    /// each paired with the instant it was set for.
    pub fn due(&mut self, now: Duration) -> Vec<(Duration, P)> {
        let mut ready = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].1 <= now {
                ready.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        ready.sort_by_key(|(id, at, _)| (*at, *id));
        ready.into_iter().map(|(_, at, payload)| (at, payload)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkTask {
    Stroke(Segment),
    Glyph(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Drawing { from: u8 },
}

#[derive(Debug)]
pub struct MarkBuilder {
    segments: Vec<Segment>,
    mode: Mode,
    current_glyph: Option<char>,
    hover: Option<u8>,
    clock: Duration,
    timers: TimerSet<MarkTask>,
}

impl Default for MarkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkBuilder {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            mode: Mode::Idle,
            current_glyph: None,
            hover: None,
            clock: Duration::ZERO,
            timers: TimerSet::new(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn current_glyph(&self) -> Option<char> {
        self.current_glyph
    }

    pub fn pending_strokes(&self) -> usize {
        self.timers.len()
    }

    /// Click on grid point `point`.
    pub fn click_point(&mut self, point: u8) {
        if point >= POINT_COUNT {
            return;
        }
        self.mode = match self.mode {
            Mode::Idle => Mode::Drawing { from: point },
            Mode::Drawing { from } if from == point => Mode::Idle,
            Mode::Drawing { from } => {
                if let Ok(segment) = Segment::new(from, point) {
                    self.toggle_segment(segment);
                }
                self.current_glyph = None;
                Mode::Drawing { from: point }
            }
        };
    }

    fn toggle_segment(&mut self, segment: Segment) {
        if let Some(pos) = self.segments.iter().position(|s| *s == segment) {
            self.segments.remove(pos);
        } else {
            self.segments.push(segment);
        }
    }

    /// Click anywhere that is not a grid point.
    pub fn click_outside(&mut self) {
        self.mode = Mode::Idle;
    }

    pub fn hover(&mut self, point: Option<u8>) {
        self.hover = point.filter(|p| *p < POINT_COUNT);
    }

    /// Rubber-band line from the drawing source to the hovered point.
    pub fn preview_segment(&self) -> Option<Segment> {
        match (self.mode, self.hover) {
            (Mode::Drawing { from }, Some(to)) => Segment::new(from, to).ok(),
            _ => None,
        }
    }

    /// Draw a random glyph, avoiding the one currently shown.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> char {
        let keys = glyph_keys();
        let mut next = keys.choose(rng).copied().unwrap_or(INTRO_GLYPH);
        if Some(next) == self.current_glyph && keys.len() > 1 {
            let others: Vec<char> = keys
                .iter()
                .copied()
                .filter(|k| Some(*k) != self.current_glyph)
                .collect();
            next = others.choose(rng).copied().unwrap_or(next);
        }
        self.start_glyph(next, self.clock);
        next
    }

    /// Draw a specific glyph; unknown keys leave the builder untouched.
    pub fn generate_glyph(&mut self, key: char) -> Result<()> {
        let key = key.to_ascii_uppercase();
        if glyph_strokes(key).is_none() {
            return Err(anyhow!("no glyph for {key:?}"));
        }
        self.start_glyph(key, self.clock);
        Ok(())
    }

    /// Stroke `i` lands at `origin + i * STROKE_DELAY`.
    fn start_glyph(&mut self, key: char, origin: Duration) {
        let strokes = glyph_strokes(key).unwrap_or_default();
        self.timers.cancel_all();
        self.segments.clear();
        self.mode = Mode::Idle;
        self.current_glyph = Some(key);
        for (i, stroke) in strokes.into_iter().enumerate() {
            let at = origin + STROKE_DELAY * i as u32;
            self.timers.schedule(at, MarkTask::Stroke(stroke));
        }
        debug!("mark: drawing {key}");
        // Apply whatever is already due, at least the first stroke.
        self.advance(Duration::ZERO);
    }

    /// Schedule the intro glyph, as when the builder first appears.
    pub fn intro(&mut self) {
        let at = self.clock + INTRO_DELAY;
        self.timers.schedule(at, MarkTask::Glyph(INTRO_GLYPH));
    }

    /// Move the clock forward and apply whatever became due.
    pub fn advance(&mut self, elapsed: Duration) {
        self.clock += elapsed;
        loop {
            let due = self.timers.due(self.clock);
            if due.is_empty() {
                break;
            }
            for (at, task) in due {
                match task {
                    MarkTask::Stroke(segment) => {
                        if !self.segments.contains(&segment) {
                            self.segments.push(segment);
                        }
                    }
                    MarkTask::Glyph(key) => {
                        self.start_glyph(key, at);
                        return;
                    }
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.timers.cancel_all();
        self.segments.clear();
        self.mode = Mode::Idle;
        self.current_glyph = None;
        self.hover = None;
    }

    /// Cancel everything still scheduled.
    pub fn teardown(&mut self) {
        self.timers.cancel_all();
    }

    /// Text rendering: `o` dots, `@` the drawing source, `#` ink.
    pub fn render_ascii(&self) -> String {
        const ROW_STEP: usize = 2;
        const COL_STEP: usize = 4;
        let size = GRID_SIZE as usize;
        let height = (size - 1) * ROW_STEP + 1;
        let width = (size - 1) * COL_STEP + 1;
        let mut canvas = vec![vec![' '; width]; height];

        let position = |p: u8| {
            let p = p as usize;
            ((p / size) * ROW_STEP, (p % size) * COL_STEP)
        };

        let mut ink: Vec<Segment> = self.segments.clone();
        ink.extend(self.preview_segment());
        for segment in ink {
            let (r0, c0) = position(segment.a);
            let (r1, c1) = position(segment.b);
            let (dr, dc) = (r1 as isize - r0 as isize, c1 as isize - c0 as isize);
            let steps = dr.abs().max(dc.abs()).max(1);
            for s in 0..=steps {
                let r = r0 as isize + dr * s / steps;
                let c = c0 as isize + dc * s / steps;
                canvas[r as usize][c as usize] = '#';
            }
        }

        for p in 0..POINT_COUNT {
            let (r, c) = position(p);
            let on_ink = canvas[r][c] == '#';
            canvas[r][c] = match self.mode {
                Mode::Drawing { from } if from == p => '@',
                _ if on_ink => '#',
                _ => 'o',
            };
        }

        canvas
            .into_iter()
            .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Drop for MarkBuilder {
    fn drop(&mut self) {
        self.teardown();
    }
}

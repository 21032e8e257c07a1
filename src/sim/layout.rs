//! Bubble layout
//!
//! Places one bubble per option value on the play surface: fixed zonal
//! placement for the first reveal wave, rejection sampling for the rest.

use glam::Vec2;
use rand::Rng;

use crate::consts::{BUBBLE_DIAMETER, BUBBLE_GAP, FIRST_WAVE, PLACEMENT_ATTEMPTS, PLAY_PADDING};

/// Bubble fill colors, cycled by option index
pub const BUBBLE_COLORS: [&str; 7] = [
    "hsl(210, 80%, 55%)",
    "hsl(145, 70%, 45%)",
    "hsl(330, 80%, 60%)",
    "hsl(45, 100%, 55%)",
    "hsl(280, 70%, 50%)",
    "hsl(25, 100%, 55%)",
    "hsl(180, 70%, 50%)",
];

/// A positioned answer bubble
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    /// Index of the value in the option sequence, stable for the round
    pub id: u32,
    pub value: f64,
    /// Top-left corner. Bubbles share one diameter, so corner distances
    /// equal center distances.
    pub x: f32,
    pub y: f32,
    pub color: &'static str,
}

impl Bubble {
    fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Fractional surface bounds for one first-wave bubble
struct Zone {
    x_min: f32,
    x_max: f32,
    y_min: f32,
    y_max: f32,
}

/// Quadrant-like regions keeping the first wave well spread
const ZONES: [Zone; 4] = [
    Zone { x_min: 0.08, x_max: 0.35, y_min: 0.08, y_max: 0.35 },
    Zone { x_min: 0.55, x_max: 0.85, y_min: 0.08, y_max: 0.35 },
    Zone { x_min: 0.08, x_max: 0.35, y_min: 0.55, y_max: 0.85 },
    Zone { x_min: 0.55, x_max: 0.85, y_min: 0.55, y_max: 0.85 },
];

fn too_close(a: Vec2, b: Vec2) -> bool {
    a.distance(b) < BUBBLE_DIAMETER + BUBBLE_GAP
}

/// Rejection-sample a spot clear of every placed bubble
fn find_open_position<R: Rng + ?Sized>(
    rng: &mut R,
    placed: &[Bubble],
    width: f32,
    height: f32,
) -> Option<Vec2> {
    for _ in 0..PLACEMENT_ATTEMPTS {
        let x = PLAY_PADDING + rng.random::<f32>() * (width - BUBBLE_DIAMETER - PLAY_PADDING * 2.0);
        let y = PLAY_PADDING + rng.random::<f32>() * (height - BUBBLE_DIAMETER - PLAY_PADDING * 2.0);
        let candidate = Vec2::new(x, y);
        if placed.iter().all(|b| !too_close(candidate, b.pos())) {
            return Some(candidate);
        }
    }
    None
}

/// Lay out one bubble per option value.
///
/// The first four get a uniform point inside their zone, clamped to the
/// padded surface. The rest are rejection-sampled against everything placed
/// so far and silently omitted when no clear spot turns up within the
/// attempt budget; ids track the option index even across omissions.
pub fn layout_bubbles<R: Rng + ?Sized>(
    rng: &mut R,
    options: &[f64],
    width: f32,
    height: f32,
) -> Vec<Bubble> {
    let mut bubbles = Vec::with_capacity(options.len());

    for (index, &value) in options.iter().take(FIRST_WAVE).enumerate() {
        let zone = &ZONES[index];
        let x_frac = zone.x_min + rng.random::<f32>() * (zone.x_max - zone.x_min);
        let y_frac = zone.y_min + rng.random::<f32>() * (zone.y_max - zone.y_min);
        let x = (width * x_frac - BUBBLE_DIAMETER / 2.0)
            .min(width - BUBBLE_DIAMETER - PLAY_PADDING)
            .max(PLAY_PADDING);
        let y = (height * y_frac - BUBBLE_DIAMETER / 2.0)
            .min(height - BUBBLE_DIAMETER - PLAY_PADDING)
            .max(PLAY_PADDING);
        bubbles.push(Bubble {
            id: index as u32,
            value,
            x,
            y,
            color: BUBBLE_COLORS[index % BUBBLE_COLORS.len()],
        });
    }

    for (index, &value) in options.iter().enumerate().skip(FIRST_WAVE) {
        if let Some(pos) = find_open_position(rng, &bubbles, width, height) {
            bubbles.push(Bubble {
                id: index as u32,
                value,
                x: pos.x,
                y: pos.y,
                color: BUBBLE_COLORS[index % BUBBLE_COLORS.len()],
            });
        }
    }

    bubbles
}

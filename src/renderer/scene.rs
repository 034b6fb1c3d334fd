//! Scene projection
//!
//! Turns a read-only `SessionState` into an ordered list of textured quads
//! plus HUD text. Nothing here mutates the session or touches the GPU, so
//! what gets drawn is fully testable.

use glam::Vec2;

use crate::consts::{SCORE_FONT_PX, TITLE_FONT_PX};
use crate::deg_to_rad;
use crate::sim::{GamePhase, Playfield, SessionState};
use crate::tuning::Tuning;

/// Texture a quad samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    Background,
    Body,
    Pipe,
    /// 1×1 white texel, for flat colored quads
    Solid,
}

impl TextureId {
    pub const ALL: [TextureId; 4] = [
        TextureId::Background,
        TextureId::Body,
        TextureId::Pipe,
        TextureId::Solid,
    ];

    pub fn index(&self) -> usize {
        match self {
            TextureId::Background => 0,
            TextureId::Body => 1,
            TextureId::Pipe => 2,
            TextureId::Solid => 3,
        }
    }
}

/// Axis-aligned destination rectangle, optionally rotated about its centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub texture: TextureId,
    /// Top-left corner before rotation (pixels, y down)
    pub pos: Vec2,
    pub size: Vec2,
    /// Clockwise on screen, radians
    pub rotation: f32,
    pub color: [f32; 4],
}

impl Quad {
    fn sprite(texture: TextureId, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            texture,
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            rotation: 0.0,
            color: [1.0; 4],
        }
    }

    fn rotated(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Value for `CanvasRenderingContext2d::textAlign`
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// One line of HUD text; `y` is the baseline
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_px: f32,
    pub align: TextAlign,
    /// CSS color
    pub color: &'static str,
}

/// Everything one frame draws, back to front
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub quads: Vec<Quad>,
    pub texts: Vec<TextItem>,
}

/// Veil drawn over the frozen round after a hit
pub const GAME_OVER_VEIL: [f32; 4] = [0.0, 0.0, 0.0, 0.5];

/// Build the frame for `state`. `fps` is drawn top-right when present.
pub fn build_scene(
    state: &SessionState,
    tuning: &Tuning,
    playfield: Playfield,
    fps: Option<u32>,
) -> Scene {
    let Playfield { width, height } = playfield;
    let s = tuning.ui_scale;
    let mut scene = Scene::default();

    // Two tiles so the wrap is seamless
    let bg_x = state.background_offset;
    scene
        .quads
        .push(Quad::sprite(TextureId::Background, bg_x, 0.0, width, height));
    scene.quads.push(Quad::sprite(
        TextureId::Background,
        bg_x + width,
        0.0,
        width,
        height,
    ));

    let pipe_w = state.obstacles.pipe_width;
    for pair in state.obstacles.pairs() {
        scene.quads.push(Quad::sprite(
            TextureId::Pipe,
            pair.x,
            0.0,
            pipe_w,
            pair.top_height,
        ));
        scene.quads.push(
            Quad::sprite(
                TextureId::Pipe,
                pair.x,
                pair.bottom_y,
                pipe_w,
                pair.bottom_height,
            )
            .rotated(std::f32::consts::PI),
        );
    }

    let body = &state.body;
    let tilt = body.tilt_degrees(tuning.tilt_velocity_normalizer, tuning.max_tilt_deg);
    scene.quads.push(
        Quad::sprite(TextureId::Body, body.x, body.y, body.width, body.height)
            .rotated(deg_to_rad(tilt)),
    );

    let score = state.scoreboard.score();
    scene.texts.push(TextItem {
        text: format!("Score: {}", score),
        x: 10.0 * s,
        y: 50.0 * s,
        font_px: SCORE_FONT_PX * s,
        align: TextAlign::Left,
        color: "#000",
    });

    if state.phase == GamePhase::GameOver {
        let mut veil = Quad::sprite(TextureId::Solid, 0.0, 0.0, width, height);
        veil.color = GAME_OVER_VEIL;
        scene.quads.push(veil);

        let cx = width / 2.0;
        let cy = height / 2.0;
        let lines = [
            ("Game Over".to_string(), cy - 30.0 * s, TITLE_FONT_PX),
            (format!("Score: {}", score), cy + 20.0 * s, SCORE_FONT_PX),
            ("Click or Tap to Restart".to_string(), cy + 60.0 * s, SCORE_FONT_PX),
        ];
        for (text, y, font) in lines {
            scene.texts.push(TextItem {
                text,
                x: cx,
                y,
                font_px: font * s,
                align: TextAlign::Center,
                color: "#fff",
            });
        }
    }

    if let Some(fps) = fps {
        scene.texts.push(TextItem {
            text: format!("FPS: {}", fps),
            x: width - 10.0 * s,
            y: 30.0 * s,
            font_px: 20.0 * s,
            align: TextAlign::Right,
            color: "#000",
        });
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYFIELD: Playfield = Playfield {
        width: 800.0,
        height: 600.0,
    };

    fn running_state() -> (SessionState, Tuning) {
        let tuning = Tuning::default();
        let mut state = SessionState::new(&tuning, PLAYFIELD);
        state.obstacles.spawn_with_top(150.0, PLAYFIELD);
        (state, tuning)
    }

    fn count(scene: &Scene, texture: TextureId) -> usize {
        scene.quads.iter().filter(|q| q.texture == texture).count()
    }

    #[test]
    fn test_running_frame_layout() {
        let (state, tuning) = running_state();
        let scene = build_scene(&state, &tuning, PLAYFIELD, None);

        assert_eq!(count(&scene, TextureId::Background), 2);
        assert_eq!(count(&scene, TextureId::Pipe), 2);
        assert_eq!(count(&scene, TextureId::Body), 1);
        assert_eq!(count(&scene, TextureId::Solid), 0);
        // Background first, body last
        assert_eq!(scene.quads[0].texture, TextureId::Background);
        assert_eq!(scene.quads.last().map(|q| q.texture), Some(TextureId::Body));

        assert_eq!(scene.texts.len(), 1);
        assert_eq!(scene.texts[0].text, "Score: 0");
        assert_eq!((scene.texts[0].x, scene.texts[0].y), (10.0, 50.0));
    }

    #[test]
    fn test_pipe_quads_match_pair_geometry() {
        let (state, tuning) = running_state();
        let scene = build_scene(&state, &tuning, PLAYFIELD, None);
        let pipes: Vec<_> = scene
            .quads
            .iter()
            .filter(|q| q.texture == TextureId::Pipe)
            .collect();

        assert_eq!(pipes[0].pos, Vec2::new(800.0, 0.0));
        assert_eq!(pipes[0].size, Vec2::new(90.0, 150.0));
        assert_eq!(pipes[0].rotation, 0.0);

        assert_eq!(pipes[1].pos, Vec2::new(800.0, 400.0));
        assert_eq!(pipes[1].size, Vec2::new(90.0, 200.0));
        assert_eq!(pipes[1].rotation, std::f32::consts::PI);
    }

    #[test]
    fn test_background_tiles_follow_offset() {
        let (mut state, tuning) = running_state();
        state.background_offset = -300.0;
        let scene = build_scene(&state, &tuning, PLAYFIELD, None);
        assert_eq!(scene.quads[0].pos.x, -300.0);
        assert_eq!(scene.quads[1].pos.x, 500.0);
    }

    #[test]
    fn test_body_tilt_follows_velocity() {
        let (mut state, tuning) = running_state();
        state.body.velocity = 10_000.0;
        let scene = build_scene(&state, &tuning, PLAYFIELD, None);
        let body = scene.quads.last().unwrap();
        assert!((body.rotation - deg_to_rad(25.0)).abs() < 1e-6);

        state.body.velocity = -300.0;
        let scene = build_scene(&state, &tuning, PLAYFIELD, None);
        let body = scene.quads.last().unwrap();
        assert!((body.rotation - deg_to_rad(-12.5)).abs() < 1e-6);
    }

    #[test]
    fn test_game_over_overlay() {
        let (mut state, tuning) = running_state();
        state.phase = GamePhase::GameOver;
        let mut events = Vec::new();
        for _ in 0..7 {
            state.scoreboard.on_passed(&mut events);
        }
        let scene = build_scene(&state, &tuning, PLAYFIELD, None);

        let veil = scene.quads.last().unwrap();
        assert_eq!(veil.texture, TextureId::Solid);
        assert_eq!(veil.color, GAME_OVER_VEIL);
        assert_eq!(veil.size, Vec2::new(800.0, 600.0));

        let texts: Vec<_> = scene.texts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Score: 7", "Game Over", "Score: 7", "Click or Tap to Restart"]
        );
        let title = &scene.texts[1];
        assert_eq!((title.x, title.y, title.font_px), (400.0, 270.0, 60.0));
        assert_eq!(title.align, TextAlign::Center);
        assert_eq!(scene.texts[3].y, 360.0);
    }

    #[test]
    fn test_hud_scales_with_ui_scale() {
        let tuning = Tuning::default().scaled(0.5);
        let state = SessionState::new(&tuning, PLAYFIELD);
        let scene = build_scene(&state, &tuning, PLAYFIELD, Some(58));
        assert_eq!(scene.texts[0].font_px, 15.0);
        assert_eq!((scene.texts[0].x, scene.texts[0].y), (5.0, 25.0));

        let fps = scene.texts.last().unwrap();
        assert_eq!(fps.text, "FPS: 58");
        assert_eq!(fps.align, TextAlign::Right);
    }

    #[test]
    fn test_projection_is_read_only() {
        let (state, tuning) = running_state();
        let before = serde_json::to_string(&state).unwrap();
        let _ = build_scene(&state, &tuning, PLAYFIELD, Some(60));
        assert_eq!(serde_json::to_string(&state).unwrap(), before);
    }
}

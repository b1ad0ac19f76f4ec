use cairo::Context;
use fluent_bundle::FluentArgs;
use gtk4::prelude::*;

use super::resources::{GameResources, HandImage};
use crate::game::logic::MatchContext;
use crate::game::types::{MatchState, Parity, Status};
use crate::i18n::I18n;

// Design-time (reference) dimensions. All layout constants are relative
// to the (0,0) origin of this coordinate space; the scene is uniformly
// scaled and centred in the widget.
pub const REF_WIDTH: f64 = 400.0;
pub const REF_HEIGHT: f64 = 600.0;

// Colors (0..1 RGB)
const WHITE: (f64, f64, f64) = (1.0, 1.0, 1.0);
const BLACK: (f64, f64, f64) = (0.0, 0.0, 0.0);
const GRAY: (f64, f64, f64) = (0.78, 0.78, 0.78);
const DARK_GREY: (f64, f64, f64) = (0.25, 0.25, 0.25);
const NEUTRAL: (f64, f64, f64) = (0.39, 0.39, 0.39);
const GREEN: (f64, f64, f64) = (0.0, 0.59, 0.0);
const BLUE: (f64, f64, f64) = (0.27, 0.51, 0.71);
const ORANGE: (f64, f64, f64) = (1.0, 0.27, 0.0);
/// Tan shade marking the batting side.
const BATTING: (f64, f64, f64) = (0.73, 0.55, 0.39);
/// Salmon shade marking the bowling side.
const BOWLING: (f64, f64, f64) = (1.0, 0.45, 0.46);

// Font sizes
const FONT_LARGE: f64 = 34.0;
const FONT_MEDIUM: f64 = 26.0;
const FONT_SMALL: f64 = 17.0;
const FONT_VSMALL: f64 = 13.0;

// Rectangular buttons
pub const RESTART_RECT: Rect = Rect::new(125.0, 530.0, 150.0, 45.0);
const ODD_RECT: Rect = Rect::new(50.0, 250.0, 140.0, 55.0);
const EVEN_RECT: Rect = Rect::new(210.0, 250.0, 140.0, 55.0);
const BAT_RECT: Rect = Rect::new(50.0, 250.0, 140.0, 55.0);
const BOWL_RECT: Rect = Rect::new(210.0, 250.0, 140.0, 55.0);

// Hexagonal number pad: six triangles sharing the hex centre.
const HEX_CENTER: (f64, f64) = (REF_WIDTH / 2.0, 450.0);
const HEX_RADIUS: f64 = 80.0;

// Hand sprites
const HAND_Y: f64 = 250.0;
const HAND_W: f64 = 200.0;
const HAND_H: f64 = 100.0;
const BASE_H: f64 = 50.0;
const HAND_INSET: f64 = -25.0;

const MESSAGE_WRAP: usize = 50;

/// Axis-aligned rectangle in reference coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// A clickable region of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Restart,
    Odd,
    Even,
    Bat,
    Bowl,
    /// One of the six number triangles, value 1–6.
    Number(u8),
}

/// Vertices of number triangle `i` (0–5): the hex centre plus two points
/// on the circumference, starting from the top and going clockwise.
pub fn triangle_vertices(i: usize) -> [(f64, f64); 3] {
    let (cx, cy) = HEX_CENTER;
    let a0 = (i as f64 * 60.0 - 90.0).to_radians();
    let a1 = (i as f64 * 60.0 - 30.0).to_radians();
    [
        (cx, cy),
        (cx + HEX_RADIUS * a0.cos(), cy + HEX_RADIUS * a0.sin()),
        (cx + HEX_RADIUS * a1.cos(), cy + HEX_RADIUS * a1.sin()),
    ]
}

/// Barycentric point-in-triangle test.
pub fn point_in_triangle(x: f64, y: f64, tri: &[(f64, f64); 3]) -> bool {
    let [(x1, y1), (x2, y2), (x3, y3)] = *tri;
    let denom = (y2 - y3) * (x1 - x3) + (x3 - x2) * (y1 - y3);
    if denom.abs() < 1e-10 {
        return false;
    }
    let a = ((y2 - y3) * (x - x3) + (x3 - x2) * (y - y3)) / denom;
    let b = ((y3 - y1) * (x - x3) + (x1 - x3) * (y - y3)) / denom;
    let c = 1.0 - a - b;
    a >= 0.0 && b >= 0.0 && c >= 0.0
}

/// Convert widget-space mouse coordinates back to reference coordinates.
pub fn widget_to_ref(x: f64, y: f64, widget_w: i32, widget_h: i32) -> (f64, f64) {
    let w = widget_w as f64;
    let h = widget_h as f64;
    let scale = (w / REF_WIDTH).min(h / REF_HEIGHT);
    let offset_x = (w - REF_WIDTH * scale) / 2.0;
    let offset_y = (h - REF_HEIGHT * scale) / 2.0;
    ((x - offset_x) / scale, (y - offset_y) / scale)
}

/// Hit-test a point (in reference coordinates) against the regions the
/// given state accepts. The Restart button outranks everything.
pub fn region_at(state: MatchState, x: f64, y: f64) -> Option<Region> {
    if RESTART_RECT.contains(x, y) {
        return Some(Region::Restart);
    }
    match state {
        MatchState::Toss => {
            if ODD_RECT.contains(x, y) {
                Some(Region::Odd)
            } else if EVEN_RECT.contains(x, y) {
                Some(Region::Even)
            } else {
                None
            }
        }
        MatchState::ChooseBatBowl => {
            if BAT_RECT.contains(x, y) {
                Some(Region::Bat)
            } else if BOWL_RECT.contains(x, y) {
                Some(Region::Bowl)
            } else {
                None
            }
        }
        MatchState::TossPlay | MatchState::Playing => (0..6)
            .find(|&i| point_in_triangle(x, y, &triangle_vertices(i)))
            .map(|i| Region::Number(i as u8 + 1)),
        MatchState::Result => None,
    }
}

/// Format the current status line through Fluent.
pub fn status_text(i18n: &I18n, status: &Status) -> String {
    match status {
        Status::ChooseParity => i18n.t("status-choose-parity"),
        Status::ChooseTossNumber => i18n.t("status-choose-toss-number"),
        Status::TossTotal {
            player,
            computer,
            total,
            parity,
        } => {
            let mut args = FluentArgs::new();
            args.set("player", *player);
            args.set("computer", *computer);
            args.set("total", *total);
            args.set("parity", parity_label(i18n, *parity));
            i18n.t_args("status-toss-total", &args)
        }
        Status::PlayerWonToss => i18n.t("status-player-won-toss"),
        Status::PlayerBatsFirst => i18n.t("status-player-bats-first"),
        Status::ComputerBowlsFirst => i18n.t("status-computer-bowls-first"),
        Status::BowlFirstInnings => i18n.t("status-bowl-first-innings"),
        Status::Scored {
            opponent,
            runs,
            player_batting,
        } => {
            let mut args = FluentArgs::new();
            args.set("opponent", *opponent);
            args.set("runs", *runs);
            let id = if *player_batting {
                "status-player-scored"
            } else {
                "status-computer-scored"
            };
            i18n.t_args(id, &args)
        }
        Status::FirstInningsOut {
            opponent,
            player_batting,
            score,
            target,
        } => {
            let mut args = FluentArgs::new();
            args.set("opponent", *opponent);
            args.set("score", *score);
            args.set("target", *target);
            let id = if *player_batting {
                "status-player-out"
            } else {
                "status-computer-out"
            };
            i18n.t_args(id, &args)
        }
        Status::PlayerToBat => i18n.t("status-player-to-bat"),
        Status::BowlSecondInnings => i18n.t("status-bowl-second-innings"),
        Status::PlayerWins { score } => {
            let mut args = FluentArgs::new();
            args.set("score", *score);
            i18n.t_args("status-player-wins", &args)
        }
        Status::ComputerWins { score } => {
            let mut args = FluentArgs::new();
            args.set("score", *score);
            i18n.t_args("status-computer-wins", &args)
        }
        Status::Tie { score } => {
            let mut args = FluentArgs::new();
            args.set("score", *score);
            i18n.t_args("status-tie", &args)
        }
    }
}

fn parity_label(i18n: &I18n, parity: Parity) -> String {
    match parity {
        Parity::Odd => i18n.t("parity-odd"),
        Parity::Even => i18n.t("parity-even"),
    }
}

/// Greedy word-wrap used for the status line.
pub fn wrap_message(message: &str) -> Vec<String> {
    if message.len() <= MESSAGE_WRAP {
        return vec![message.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in message.split_whitespace() {
        if current.len() + word.len() < MESSAGE_WRAP {
            current.push_str(word);
            current.push(' ');
        } else {
            lines.push(current.trim_end().to_string());
            current = format!("{} ", word);
        }
    }
    if !current.trim_end().is_empty() {
        lines.push(current.trim_end().to_string());
    }
    lines
}

/// Render the entire scene, scaled to fit (widget_w, widget_h).
pub fn render(
    cr: &Context,
    ctx: &MatchContext,
    res: &GameResources,
    i18n: &I18n,
    widget_w: i32,
    widget_h: i32,
) {
    let w = widget_w as f64;
    let h = widget_h as f64;
    let scale = (w / REF_WIDTH).min(h / REF_HEIGHT);
    let offset_x = (w - REF_WIDTH * scale) / 2.0;
    let offset_y = (h - REF_HEIGHT * scale) / 2.0;

    let _ = cr.save();
    cr.translate(offset_x, offset_y);
    cr.scale(scale, scale);

    // Backdrop
    set_color(cr, DARK_GREY);
    cr.rectangle(0.0, 0.0, REF_WIDTH, REF_HEIGHT);
    let _ = cr.fill();

    draw_score_panels(cr, ctx, i18n);
    draw_status_message(cr, ctx, i18n);

    match ctx.state {
        MatchState::Toss => {
            draw_button(cr, ODD_RECT, ORANGE, &i18n.t("button-odd"), FONT_MEDIUM);
            draw_button(cr, EVEN_RECT, BLUE, &i18n.t("button-even"), FONT_MEDIUM);
        }
        MatchState::ChooseBatBowl => {
            draw_button(cr, BAT_RECT, BATTING, &i18n.t("button-bat"), FONT_MEDIUM);
            draw_button(cr, BOWL_RECT, BOWLING, &i18n.t("button-bowl"), FONT_MEDIUM);
        }
        MatchState::TossPlay | MatchState::Playing | MatchState::Result => {
            draw_hands(cr, ctx, res, i18n);
            draw_number_pad(cr, ctx);
        }
    }

    draw_button(
        cr,
        RESTART_RECT,
        GREEN,
        &i18n.t("button-restart"),
        FONT_SMALL,
    );

    let _ = cr.restore();
}

/// The two trapezium score panels at the top, coloured by role once play
/// has started (tan = batting, salmon = bowling).
fn draw_score_panels(cr: &Context, ctx: &MatchContext, i18n: &I18n) {
    let left = [(20.0, 10.0), (170.0, 10.0), (150.0, 40.0), (40.0, 40.0)];
    let right = [(230.0, 10.0), (380.0, 10.0), (360.0, 40.0), (250.0, 40.0)];

    let (left_color, right_color) = if ctx.state >= MatchState::Playing {
        if ctx.player_is_batting() {
            (BATTING, BOWLING)
        } else {
            (BOWLING, BATTING)
        }
    } else {
        (NEUTRAL, NEUTRAL)
    };

    fill_polygon(cr, &left, left_color);
    stroke_polygon(cr, &left, DARK_GREY, 2.0);
    fill_polygon(cr, &right, right_color);
    stroke_polygon(cr, &right, DARK_GREY, 2.0);

    let (player_score, computer_score) = ctx.display_scores();
    draw_text_centered(cr, &i18n.t("panel-player"), FONT_VSMALL, WHITE, 95.0, 18.0);
    draw_text_centered(cr, &player_score.to_string(), FONT_SMALL, WHITE, 95.0, 32.0);
    draw_text_centered(
        cr,
        &i18n.t("panel-computer"),
        FONT_VSMALL,
        WHITE,
        305.0,
        18.0,
    );
    draw_text_centered(
        cr,
        &computer_score.to_string(),
        FONT_SMALL,
        WHITE,
        305.0,
        32.0,
    );
}

fn draw_status_message(cr: &Context, ctx: &MatchContext, i18n: &I18n) {
    let message = status_text(i18n, &ctx.status);
    let message_y = if ctx.state >= MatchState::Playing {
        195.0
    } else {
        135.0
    };
    for (i, line) in wrap_message(&message).iter().enumerate() {
        draw_text_centered(
            cr,
            line,
            FONT_SMALL,
            WHITE,
            REF_WIDTH / 2.0,
            message_y + i as f64 * 20.0,
        );
    }
}

/// Both hand sprites with their lower-arm pieces; the bowler's side is
/// mirrored so the hands face each other.
fn draw_hands(cr: &Context, ctx: &MatchContext, res: &GameResources, i18n: &I18n) {
    let batter = res.hand(ctx.batter_hand.unwrap_or(0));
    draw_hand(cr, batter, HAND_INSET, HAND_Y, HAND_W, HAND_H, false);
    draw_hand(
        cr,
        res.base(),
        HAND_INSET,
        HAND_Y + HAND_H,
        HAND_W,
        BASE_H,
        false,
    );
    draw_text_centered(
        cr,
        &i18n.t("label-batsman"),
        FONT_SMALL,
        BATTING,
        HAND_W / 2.0,
        HAND_Y - 20.0,
    );

    let bowler = res.hand(ctx.bowler_hand.unwrap_or(0));
    let bowler_x = REF_WIDTH - HAND_W - HAND_INSET;
    draw_hand(cr, bowler, bowler_x, HAND_Y, HAND_W, HAND_H, true);
    draw_hand(
        cr,
        res.base(),
        bowler_x,
        HAND_Y + HAND_H,
        HAND_W,
        BASE_H,
        true,
    );
    draw_text_centered(
        cr,
        &i18n.t("label-bowler"),
        FONT_SMALL,
        BOWLING,
        REF_WIDTH - HAND_W / 2.0,
        HAND_Y - 20.0,
    );
}

fn draw_number_pad(cr: &Context, ctx: &MatchContext) {
    let fill = if ctx.state == MatchState::Playing {
        if ctx.player_is_batting() {
            BATTING
        } else {
            BOWLING
        }
    } else {
        NEUTRAL
    };

    for i in 0..6 {
        let tri = triangle_vertices(i);
        fill_polygon(cr, &tri, fill);
        stroke_polygon(cr, &tri, BLACK, 3.0);
        let cx = (tri[0].0 + tri[1].0 + tri[2].0) / 3.0;
        let cy = (tri[0].1 + tri[1].1 + tri[2].1) / 3.0;
        draw_text_centered(cr, &(i + 1).to_string(), FONT_MEDIUM, WHITE, cx, cy);
    }
}

// ── Drawing helpers ──────────────────────────────────────────────────────────

fn set_color(cr: &Context, (r, g, b): (f64, f64, f64)) {
    cr.set_source_rgb(r, g, b);
}

fn fill_polygon(cr: &Context, points: &[(f64, f64)], color: (f64, f64, f64)) {
    set_color(cr, color);
    polygon_path(cr, points);
    let _ = cr.fill();
}

fn stroke_polygon(cr: &Context, points: &[(f64, f64)], color: (f64, f64, f64), width: f64) {
    set_color(cr, color);
    cr.set_line_width(width);
    polygon_path(cr, points);
    let _ = cr.stroke();
}

fn polygon_path(cr: &Context, points: &[(f64, f64)]) {
    cr.new_path();
    for (i, &(x, y)) in points.iter().enumerate() {
        if i == 0 {
            cr.move_to(x, y);
        } else {
            cr.line_to(x, y);
        }
    }
    cr.close_path();
}

fn rounded_rect_path(cr: &Context, rect: Rect, radius: f64) {
    let Rect { x, y, w, h } = rect;
    let r = radius.min(w / 2.0).min(h / 2.0);
    cr.new_path();
    cr.arc(x + w - r, y + r, r, -std::f64::consts::FRAC_PI_2, 0.0);
    cr.arc(x + w - r, y + h - r, r, 0.0, std::f64::consts::FRAC_PI_2);
    cr.arc(
        x + r,
        y + h - r,
        r,
        std::f64::consts::FRAC_PI_2,
        std::f64::consts::PI,
    );
    cr.arc(
        x + r,
        y + r,
        r,
        std::f64::consts::PI,
        1.5 * std::f64::consts::PI,
    );
    cr.close_path();
}

fn draw_button(cr: &Context, rect: Rect, color: (f64, f64, f64), label: &str, font_size: f64) {
    set_color(cr, color);
    rounded_rect_path(cr, rect, 8.0);
    let _ = cr.fill();
    let (cx, cy) = rect.center();
    draw_text_centered(cr, label, font_size, WHITE, cx, cy);
}

fn draw_text_centered(
    cr: &Context,
    text: &str,
    size: f64,
    color: (f64, f64, f64),
    cx: f64,
    cy: f64,
) {
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(size);
    let Ok(ext) = cr.text_extents(text) else {
        return;
    };
    set_color(cr, color);
    cr.move_to(
        cx - (ext.width() / 2.0 + ext.x_bearing()),
        cy - (ext.height() / 2.0 + ext.y_bearing()),
    );
    let _ = cr.show_text(text);
}

/// Draw a hand sprite scaled to (w, h); `flip` mirrors it horizontally.
/// Placeholders render as a grey box with the intended label (unmirrored,
/// so the text stays readable).
fn draw_hand(cr: &Context, img: &HandImage, x: f64, y: f64, w: f64, h: f64, flip: bool) {
    match img {
        HandImage::Raster(pb) => {
            let pw = pb.width() as f64;
            let ph = pb.height() as f64;
            if pw <= 0.0 || ph <= 0.0 {
                return;
            }
            let _ = cr.save();
            if flip {
                cr.translate(x + w, y);
                cr.scale(-(w / pw), h / ph);
            } else {
                cr.translate(x, y);
                cr.scale(w / pw, h / ph);
            }
            cr.set_source_pixbuf(pb, 0.0, 0.0);
            let _ = cr.paint();
            let _ = cr.restore();
        }
        HandImage::Placeholder(label) => {
            set_color(cr, GRAY);
            cr.rectangle(x, y, w, h);
            let _ = cr.fill();
            draw_text_centered(cr, label, FONT_LARGE, BLACK, x + w / 2.0, y + h / 2.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_centroids_map_to_their_numbers() {
        for i in 0..6 {
            let tri = triangle_vertices(i);
            let cx = (tri[0].0 + tri[1].0 + tri[2].0) / 3.0;
            let cy = (tri[0].1 + tri[1].1 + tri[2].1) / 3.0;
            assert!(point_in_triangle(cx, cy, &tri));
            assert_eq!(
                region_at(MatchState::Playing, cx, cy),
                Some(Region::Number(i as u8 + 1))
            );
        }
    }

    #[test]
    fn points_outside_the_pad_hit_nothing() {
        assert!(!point_in_triangle(0.0, 0.0, &triangle_vertices(0)));
        assert_eq!(region_at(MatchState::Playing, 10.0, 10.0), None);
        assert_eq!(region_at(MatchState::Result, 120.0, 277.0), None);
    }

    #[test]
    fn restart_outranks_state_regions() {
        let (cx, cy) = RESTART_RECT.center();
        for state in [
            MatchState::Toss,
            MatchState::TossPlay,
            MatchState::ChooseBatBowl,
            MatchState::Playing,
            MatchState::Result,
        ] {
            assert_eq!(region_at(state, cx, cy), Some(Region::Restart));
        }
    }

    #[test]
    fn toss_and_choice_buttons_share_layout_but_not_state() {
        let (cx, cy) = ODD_RECT.center();
        assert_eq!(region_at(MatchState::Toss, cx, cy), Some(Region::Odd));
        assert_eq!(
            region_at(MatchState::ChooseBatBowl, cx, cy),
            Some(Region::Bat)
        );
        assert_eq!(region_at(MatchState::Playing, cx, cy), None);
        let (cx, cy) = EVEN_RECT.center();
        assert_eq!(region_at(MatchState::Toss, cx, cy), Some(Region::Even));
        assert_eq!(
            region_at(MatchState::ChooseBatBowl, cx, cy),
            Some(Region::Bowl)
        );
    }

    #[test]
    fn widget_transform_undoes_scaling_and_centering() {
        // Native size: identity.
        let (x, y) = widget_to_ref(100.0, 150.0, 400, 600);
        assert!((x - 100.0).abs() < 1e-9);
        assert!((y - 150.0).abs() < 1e-9);
        // Doubled size: halved coordinates.
        let (x, y) = widget_to_ref(200.0, 300.0, 800, 1200);
        assert!((x - 100.0).abs() < 1e-9);
        assert!((y - 150.0).abs() < 1e-9);
        // Wider than tall: content centred horizontally.
        let (x, y) = widget_to_ref(300.0, 300.0, 1000, 600);
        assert!((x - 100.0).abs() < 1e-9);
        assert!((y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn short_messages_stay_on_one_line() {
        assert_eq!(wrap_message("short"), vec!["short".to_string()]);
    }

    #[test]
    fn long_messages_wrap_on_word_boundaries() {
        let msg = "Computer chose 4. OUT! Final score: 23 Target to chase: 24 runs.";
        let lines = wrap_message(msg);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.len() <= MESSAGE_WRAP);
        }
        assert_eq!(lines.join(" "), msg);
    }
}

//! Static bifurcation diagram viewer built with eframe/egui.
//!
//! [`Viewer`] owns a finished [`Diagram`] and repaints it on every frame:
//! white background, the point cloud, the `x0` label and the `r` tick
//! labels under the plot. Nothing in the diagram changes after startup.

use std::sync::Arc;

use eframe::App;
use glam::IVec2;
use map_core::{Diagram, config::DisplayConfig, types::ScreenPoint};

/// Left margin between the window edge and the plot origin.
const PLOT_LEFT: f32 = 20.0;
/// Baseline of the `x0` label.
const X0_LABEL_POS: (f32, f32) = (20.0, 30.0);
const X0_FONT_SIZE: f32 = 20.0;
const TICK_FONT_SIZE: f32 = 15.0;
/// Tick labels start this far left of their tick.
const TICK_LABEL_SHIFT: i32 = 10;
/// Tick label baseline sits `height_offset - TICK_BASELINE_RAISE` below the plot.
const TICK_BASELINE_RAISE: u32 = 60;
const STATUS_FONT_SIZE: f32 = 12.0;

/// Window-space placement of the plot and its annotations.
///
/// All positions are relative to the top-left corner of the window.
#[derive(Clone, Copy, Debug)]
pub struct Layout {
    display: DisplayConfig,
}

impl Layout {
    pub fn new(display: DisplayConfig) -> Self {
        Self { display }
    }

    /// Window position of plot coordinate `(0, 0)`; plot `y` grows upward.
    pub fn plot_origin(&self) -> egui::Pos2 {
        egui::pos2(
            PLOT_LEFT,
            self.display.height.saturating_sub(self.display.height_offset) as f32,
        )
    }

    /// Window position of a plot point.
    pub fn to_window(&self, p: ScreenPoint) -> egui::Pos2 {
        let o = self.plot_origin();
        egui::pos2(o.x + p.x as f32, o.y - p.y as f32)
    }

    /// Horizontal spacing of tick labels, in whole pixels.
    pub fn tick_spacing(&self) -> i32 {
        (self.display.plot_width() / self.display.num_ticks.max(1) as u32) as i32
    }

    /// Left end of the baseline of tick label `i`.
    pub fn tick_label_pos(&self, i: usize) -> egui::Pos2 {
        let o = self.plot_origin();
        let x = i as i32 * self.tick_spacing() - TICK_LABEL_SHIFT;
        let y = self.display.height_offset.saturating_sub(TICK_BASELINE_RAISE);
        egui::pos2(o.x + x as f32, o.y + y as f32)
    }

    pub fn x0_label_pos(&self) -> egui::Pos2 {
        egui::pos2(X0_LABEL_POS.0, X0_LABEL_POS.1)
    }
}

/// The point cloud stamped into an RGBA buffer.
///
/// Every point becomes a 2×2 black block (the footprint of a 1-pixel oval)
/// on a white background. Row 0 is the top of the plot.
#[derive(Clone, Debug)]
pub struct PointRaster {
    size: IVec2,
    rgba: Vec<u8>,
}

impl PointRaster {
    /// Stamps `points` into a raster covering a `plot_size` plot.
    ///
    /// Points outside the plot are clipped.
    pub fn new(plot_size: IVec2, points: &[ScreenPoint]) -> Self {
        // One extra row and column for the 2×2 stamp at the far edges.
        let size = plot_size.max(IVec2::ZERO) + IVec2::ONE * 2;
        let mut raster = Self {
            size,
            rgba: vec![255; size.x as usize * size.y as usize * 4],
        };
        for p in points {
            let top_left = IVec2::new(p.x, plot_size.y - p.y);
            for d in [IVec2::ZERO, IVec2::X, IVec2::Y, IVec2::ONE] {
                raster.set_black(top_left + d);
            }
        }
        raster
    }

    fn index(&self, px: IVec2) -> Option<usize> {
        if px.x < 0 || px.y < 0 || px.x >= self.size.x || px.y >= self.size.y {
            return None;
        }
        Some((px.y as usize * self.size.x as usize + px.x as usize) * 4)
    }

    fn set_black(&mut self, px: IVec2) {
        if let Some(i) = self.index(px) {
            self.rgba[i..i + 3].fill(0);
        }
    }

    pub fn is_black(&self, px: IVec2) -> bool {
        self.index(px)
            .map(|i| self.rgba[i..i + 3] == [0, 0, 0])
            .unwrap_or(false)
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.size.x as usize, self.size.y as usize],
            &self.rgba,
        )
    }
}

/// Main application state for the viewer.
///
/// ### Fields
/// - `diagram` - The finished sweep; shared read-only.
/// - `layout` - Where the plot and labels go in the window.
/// - `raster` - The point cloud, stamped once from `diagram`.
/// - `texture` - GPU copy of `raster`, uploaded on the first frame.
pub struct Viewer {
    diagram: Arc<Diagram>,
    layout: Layout,
    raster: PointRaster,
    texture: Option<egui::TextureHandle>,
}

impl Viewer {
    /// Creates a viewer for a fully computed diagram.
    pub fn new(diagram: Arc<Diagram>, display: DisplayConfig) -> Self {
        let plot_size = IVec2::new(display.plot_width() as i32, display.plot_height() as i32);
        let raster = PointRaster::new(plot_size, diagram.points());
        tracing::debug!(
            points = diagram.points().len(),
            width = raster.size().x,
            height = raster.size().y,
            "stamped point raster"
        );

        Self {
            diagram,
            layout: Layout::new(display),
            raster,
            texture: None,
        }
    }

    /// Window rectangle covered by the raster.
    fn raster_rect(&self) -> egui::Rect {
        let size = self.raster.size();
        // Raster row 0 is plot height `size.y - 2`.
        let min = self.layout.to_window(IVec2::new(0, size.y - 2));
        egui::Rect::from_min_size(min, egui::vec2(size.x as f32, size.y as f32))
    }

    fn texture(&mut self, ctx: &egui::Context) -> egui::TextureId {
        self.texture
            .get_or_insert_with(|| {
                ctx.load_texture(
                    "bifurcation-diagram",
                    self.raster.to_color_image(),
                    egui::TextureOptions::NEAREST,
                )
            })
            .id()
    }

    fn draw(&mut self, ctx: &egui::Context, painter: &egui::Painter, window: egui::Rect) {
        let offset = window.min.to_vec2();
        let texture = self.texture(ctx);

        painter.rect_filled(window, 0.0, egui::Color32::WHITE);
        painter.image(
            texture,
            self.raster_rect().translate(offset),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        painter.text(
            self.layout.x0_label_pos() + offset,
            egui::Align2::LEFT_BOTTOM,
            format!("x0 = {}", self.diagram.x0()),
            egui::FontId::proportional(X0_FONT_SIZE),
            egui::Color32::BLACK,
        );

        for (i, tick) in self.diagram.ticks().iter().enumerate() {
            painter.text(
                self.layout.tick_label_pos(i) + offset,
                egui::Align2::LEFT_BOTTOM,
                format!("{tick:.1}"),
                egui::FontId::proportional(TICK_FONT_SIZE),
                egui::Color32::BLACK,
            );
        }

        painter.text(
            window.right_bottom() - egui::vec2(8.0, 4.0),
            egui::Align2::RIGHT_BOTTOM,
            self.diagram.stats().to_string(),
            egui::FontId::proportional(STATUS_FONT_SIZE),
            egui::Color32::GRAY,
        );
    }
}

impl App for Viewer {
    /// Repaints the whole scene; there is no incremental update.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                let window = ui.max_rect();
                let painter = ui.painter_at(window);
                self.draw(ctx, &painter, window);
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use map_core::Config;

    fn small_diagram() -> (Arc<Diagram>, DisplayConfig) {
        let mut cfg = Config::default();
        cfg.sweep.min = 3.0;
        cfg.sweep.max = 3.6;
        cfg.sweep.accuracy = 50.0;
        cfg.orbit.max_iterations = 500;
        let diagram = map_core::sample(&cfg).unwrap();
        (Arc::new(diagram), cfg.display)
    }

    #[test]
    fn layout_matches_default_window() {
        let layout = Layout::new(DisplayConfig::default());
        assert_eq!(layout.plot_origin(), egui::pos2(20.0, 700.0));
        assert_eq!(layout.tick_spacing(), 47);
        assert_eq!(layout.tick_label_pos(0), egui::pos2(10.0, 740.0));
        assert_eq!(layout.tick_label_pos(2), egui::pos2(104.0, 740.0));
    }

    #[test]
    fn plot_points_flip_vertically() {
        let layout = Layout::new(DisplayConfig::default());
        assert_eq!(layout.to_window(IVec2::new(0, 0)), egui::pos2(20.0, 700.0));
        assert_eq!(layout.to_window(IVec2::new(1050, 700)), egui::pos2(1070.0, 0.0));
    }

    #[test]
    fn raster_stamps_two_by_two_blocks() {
        let raster = PointRaster::new(IVec2::new(10, 10), &[IVec2::new(3, 4)]);
        assert_eq!(raster.size(), IVec2::new(12, 12));

        // Plot y = 4 is raster row 10 - 4 = 6.
        for px in [
            IVec2::new(3, 6),
            IVec2::new(4, 6),
            IVec2::new(3, 7),
            IVec2::new(4, 7),
        ] {
            assert!(raster.is_black(px), "{px} should be black");
        }
        assert!(!raster.is_black(IVec2::new(2, 6)));
        assert!(!raster.is_black(IVec2::new(3, 5)));
        assert!(!raster.is_black(IVec2::new(0, 0)));
    }

    #[test]
    fn raster_clips_out_of_range_points() {
        let raster = PointRaster::new(
            IVec2::new(4, 4),
            &[IVec2::new(-5, 2), IVec2::new(100, 100), IVec2::new(4, 0)],
        );
        // Only the corner point survives; its stamp reaches the extra column.
        assert!(raster.is_black(IVec2::new(4, 4)));
        assert!(raster.is_black(IVec2::new(5, 5)));
        assert!(!raster.is_black(IVec2::new(6, 6)));
    }

    #[test]
    fn raster_addresses_the_far_corner() {
        let raster = PointRaster::new(IVec2::new(300, 7), &[IVec2::new(300, 0)]);
        assert_eq!(raster.rgba.len(), 302 * 9 * 4);
        assert!(raster.is_black(IVec2::new(301, 8)));
        assert!(!raster.is_black(IVec2::new(302, 8)));
    }

    #[test]
    fn color_image_has_raster_size() {
        let raster = PointRaster::new(IVec2::new(8, 5), &[]);
        let image = raster.to_color_image();
        assert_eq!(image.size, [10, 7]);
        assert!(image.pixels.iter().all(|&c| c == egui::Color32::WHITE));
    }

    #[test]
    fn viewer_stamps_every_diagram_point() {
        let (diagram, display) = small_diagram();
        let viewer = Viewer::new(diagram.clone(), display);
        let h = display.plot_height() as i32;

        for p in diagram.points() {
            assert!(viewer.raster.is_black(IVec2::new(p.x, h - p.y)));
        }
        assert!(viewer.texture.is_none());
    }

    #[test]
    fn raster_rect_spans_plot_area() {
        let (diagram, display) = small_diagram();
        let viewer = Viewer::new(diagram, display);
        let rect = viewer.raster_rect();
        assert_eq!(rect.min, egui::pos2(20.0, 0.0));
        assert_eq!(rect.size(), egui::vec2(1052.0, 702.0));
    }
}

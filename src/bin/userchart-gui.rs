/*!
 * Desktop view for userchart: the stacked user-type chart with live interaction.
 *
 * - Press and drag across the bars to inspect the nearest day
 * - Pinch (or Ctrl/Cmd + scroll) to zoom around the pointer
 * - Double-click to zoom back out
 *
 * Platform support: Windows, macOS, Linux
 */

use chrono::Local;
use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use userchart::models::{Rgb8, legend};
use userchart::readout::readout;
use userchart::viz::util::{format_count, map_locale, nice_axis_max};
use userchart::viz::{BAR_INSET, Bar};
use userchart::{ChartConfig, ChartState, Dataset, TimeScale, UserType, x_axis_date_values};

const Y_AXIS_PX: f32 = 56.0;
const X_AXIS_PX: f32 = 24.0;
const Y_GRID_LINES: usize = 5;

fn main() -> Result<(), eframe::Error> {
    // Enable logging for better debugging
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 800.0])
            .with_min_inner_size([400.0, 480.0])
            .with_title("userchart"),
        ..Default::default()
    };

    eframe::run_native(
        "userchart",
        options,
        Box::new(|_cc| Ok(Box::new(UserChartApp::new()))),
    )
}

/// A zoom gesture in progress: where it started and how far it has magnified.
#[derive(Debug, Clone, Copy)]
struct Pinch {
    anchor: f64,
    magnification: f64,
}

struct UserChartApp {
    data: Dataset,
    /// `None` when the dataset is empty.
    state: Option<ChartState>,
    config: ChartConfig,
    pinch: Option<Pinch>,
}

impl UserChartApp {
    fn new() -> Self {
        let data = Dataset::load_embedded_or_empty();
        let state = ChartState::for_dataset(&data);
        Self {
            data,
            state,
            config: ChartConfig::default(),
            pinch: None,
        }
    }

    /// Apply this frame's pointer and zoom input to the chart state.
    fn handle_input(&mut self, ui: &egui::Ui, response: &egui::Response, plot: Rect) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let scale = TimeScale::new(state.window(), plot.left() as f64, plot.width() as f64);

        let (zoom_delta, touching, command, hover) = ui.input(|i| {
            (
                i.zoom_delta(),
                i.multi_touch().is_some(),
                i.modifiers.command,
                i.pointer.hover_pos(),
            )
        });

        // Pinch / Ctrl+scroll zoom. The gesture lives as long as the fingers
        // (or the modifier) stay down, so magnification accumulates against one base.
        let gesture_live = response.contains_pointer() && (touching || command);
        if gesture_live && (self.pinch.is_some() || zoom_delta != 1.0) {
            let pinch = self.pinch.get_or_insert_with(|| {
                state.begin_zoom();
                Pinch {
                    anchor: hover.map_or(0.5, |p| scale.fraction_at(p.x as f64)),
                    magnification: 1.0,
                }
            });
            pinch.magnification *= zoom_delta as f64;
            state.update_zoom(pinch.anchor, pinch.magnification);
        } else if self.pinch.take().is_some() {
            state.end_zoom();
        }

        if response.double_clicked() {
            state.reset_zoom();
        }

        // Press/drag inspection
        if response.is_pointer_button_down_on() && !touching {
            state.begin_drag();
            if let Some(pos) = response.interact_pointer_pos() {
                state.drag_to(&self.data, scale.date_at(pos.x as f64));
            }
        } else if state.is_dragging() {
            state.end_drag();
        }
    }

    fn paint_chart(&self, painter: &egui::Painter, plot: Rect) {
        let axis_color = Color32::GRAY;
        let text_color = Color32::DARK_GRAY;
        let font = FontId::proportional(12.0);

        let Some(state) = self.state.as_ref() else {
            painter.text(plot.center(), Align2::CENTER_CENTER, "No data", font, text_color);
            return;
        };
        let window = state.window();
        let scale = TimeScale::new(window, plot.left() as f64, plot.width() as f64);
        let visible = self.data.window_indices(&window);
        let y_max = nice_axis_max(Dataset::max_total(&self.data.rows()[visible.clone()]));
        let y_px = |v: f64| plot.bottom() - (v / y_max) as f32 * plot.height();
        let locale = map_locale(&self.config.locale);

        // Value grid
        for i in 0..=Y_GRID_LINES {
            let v = y_max * i as f64 / Y_GRID_LINES as f64;
            let y = y_px(v);
            painter.line_segment(
                [Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)],
                Stroke::new(0.5, Color32::from_gray(220)),
            );
            painter.text(
                Pos2::new(plot.left() - 6.0, y),
                Align2::RIGHT_CENTER,
                format_count(v, locale),
                font.clone(),
                text_color,
            );
        }

        // Bars
        let clipped = painter.with_clip_rect(plot);
        let selected = state.selected_index();
        for i in visible {
            let Some(row) = self.data.get(i) else { continue };
            let Some((day_start, day_end)) = row.day_bounds(&Local) else {
                continue;
            };
            let (x0, x1) = (scale.x_of(&day_start), scale.x_of(&day_end));
            let inset = (x1 - x0) * BAR_INSET;
            let bar = Bar {
                x0: x0 + inset,
                x1: x1 - inset,
                active: row.active_users() as f64,
                total: row.total_users as f64,
                selected: selected == Some(i),
            };
            let (left, right) = (bar.x0 as f32, bar.x1 as f32);
            for user_type in UserType::ALL {
                let (lo, hi) = bar.segment(user_type);
                let rect =
                    Rect::from_min_max(Pos2::new(left, y_px(hi)), Pos2::new(right, y_px(lo)));
                clipped.rect_filled(rect, 0.0, color32(user_type.color()));
            }
            if bar.selected {
                let rect = Rect::from_min_max(
                    Pos2::new(left, y_px(bar.total)),
                    Pos2::new(right, plot.bottom()),
                );
                clipped.rect_stroke(rect, 0.0, Stroke::new(2.0, Color32::BLACK));
            }
        }

        // Axes and date ticks
        painter.line_segment(
            [plot.left_bottom(), plot.right_bottom()],
            Stroke::new(1.0, axis_color),
        );
        painter.line_segment([plot.left_top(), plot.left_bottom()], Stroke::new(1.0, axis_color));
        for tick in x_axis_date_values(self.config.tick_count, Some(&window), &Local) {
            let x = scale.x_of(&tick) as f32;
            painter.line_segment(
                [Pos2::new(x, plot.bottom()), Pos2::new(x, plot.bottom() + 4.0)],
                Stroke::new(1.0, axis_color),
            );
            painter.text(
                Pos2::new(x, plot.bottom() + 6.0),
                Align2::CENTER_TOP,
                tick.format("%b %-d").to_string(),
                font.clone(),
                text_color,
            );
        }
    }
}

fn color32(c: Rgb8) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

impl eframe::App for UserChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.group(|ui| {
                ui.heading(&self.config.title);
                ui.add_space(6.0);

                // Detail readout; blank line keeps the layout steady.
                let text = self
                    .state
                    .as_ref()
                    .and_then(|s| s.selected_row(&self.data))
                    .map(|row| readout(row, &Local, &self.config.locale))
                    .unwrap_or_default();
                ui.label(if text.is_empty() { " ".to_string() } else { text });

                // Square chart, sized by the available width.
                let side = ui
                    .available_width()
                    .min(ui.available_height() - 40.0)
                    .max(200.0);
                let (response, painter) =
                    ui.allocate_painter(Vec2::splat(side), Sense::click_and_drag());
                let plot = Rect::from_min_max(
                    response.rect.min + Vec2::new(Y_AXIS_PX, 8.0),
                    response.rect.max - Vec2::new(8.0, X_AXIS_PX),
                );

                self.handle_input(ui, &response, plot);
                self.paint_chart(&painter, plot);

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    for item in legend() {
                        let (swatch, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                        ui.painter().rect_filled(swatch, 2.0, color32(item.color));
                        ui.label(item.description);
                        ui.add_space(12.0);
                    }
                });
            });
        });
    }
}

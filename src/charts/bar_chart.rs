//! Bar Chart Renderer
//! Draws the top-N skills as vertical bars.
//!
//! Layout:
//! 1. Title "Top In-Demand Skills" centered
//! 2. Y axis with integer ticks and light grid lines
//! 3. One bar per skill, count printed above it
//! 4. Skill names under the axis, rotated 45 degrees

use image::RgbaImage;
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use super::renderer::{
    draw_text, draw_text_centered, draw_text_rotated, map_y, nice_step, rotated_extent, BLACK,
    BLUE, GRAY, WHITE,
};
use super::ChartFont;
use crate::stats::SkillFrequencyTable;

pub const BAR_CHART_TITLE: &str = "Top In-Demand Skills";
pub const DEFAULT_TOP_N: usize = 10;

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 600;
const TITLE_SIZE: f32 = 20.0;
const LABEL_SIZE: f32 = 13.0;
const TICK_SIZE: f32 = 11.0;
const LABEL_ANGLE: f32 = 45.0;
/// Fraction of each slot covered by its bar.
const BAR_FILL: f64 = 0.8;

/// One bar in pixel space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub skill: String,
    pub count: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bar {
    pub fn center_x(&self) -> u32 {
        self.x + self.width / 2
    }
}

/// Plot area, y scale and bars of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartLayout {
    pub plot_x: u32,
    pub plot_y: u32,
    pub plot_w: u32,
    pub plot_h: u32,
    pub y_max: f64,
    pub y_step: f64,
    pub bars: Vec<Bar>,
}

impl BarChartLayout {
    /// Pixel row of the horizontal axis.
    pub fn axis_y(&self) -> u32 {
        self.plot_y + self.plot_h
    }
}

pub struct BarChartRenderer<'f> {
    font: &'f ChartFont,
    width: u32,
    height: u32,
}

impl<'f> BarChartRenderer<'f> {
    pub fn new(font: &'f ChartFont) -> Self {
        Self {
            font,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Compute bar geometry for the first `top_n` table entries.
    pub fn layout(&self, table: &SkillFrequencyTable, top_n: usize) -> BarChartLayout {
        let rows = table.top(top_n);

        // Leave room under the axis for the longest rotated label.
        let label_room = rows
            .iter()
            .map(|r| {
                let (w, h) = self.font.measure(&r.skill, LABEL_SIZE);
                rotated_extent(w, h, LABEL_ANGLE).1
            })
            .max()
            .unwrap_or(0);
        let bottom = (label_room + 16).max(30).min(self.height / 2);

        let plot_x = 60u32.min(self.width / 4);
        let plot_y = 50u32.min(self.height / 4);
        let plot_w = self.width.saturating_sub(plot_x + 20).max(1);
        let plot_h = self.height.saturating_sub(plot_y + bottom).max(1);

        let max_count = rows.iter().map(|r| r.count).max().unwrap_or(0) as f64;
        let y_step = nice_step(max_count.max(1.0), 5).max(1.0);
        let y_max = ((max_count / y_step).ceil() * y_step).max(y_step);

        let bars = if rows.is_empty() {
            Vec::new()
        } else {
            let slot = plot_w as f64 / rows.len() as f64;
            let bar_w = ((slot * BAR_FILL).round() as u32).max(1);
            rows.iter()
                .enumerate()
                .map(|(i, row)| {
                    let top = map_y(row.count as f64, 0.0, y_max, plot_y, plot_h);
                    let x = plot_x + (i as f64 * slot + (slot - bar_w as f64) / 2.0).round() as u32;
                    Bar {
                        skill: row.skill.clone(),
                        count: row.count,
                        x,
                        y: top,
                        width: bar_w,
                        height: (plot_y + plot_h - top).max(1),
                    }
                })
                .collect()
        };

        BarChartLayout {
            plot_x,
            plot_y,
            plot_w,
            plot_h,
            y_max,
            y_step,
            bars,
        }
    }

    /// Render the chart; an empty table yields title and axes only.
    pub fn render(&self, table: &SkillFrequencyTable, top_n: usize) -> RgbaImage {
        let layout = self.layout(table, top_n);
        let mut img = RgbaImage::from_pixel(self.width, self.height, WHITE);
        let axis_y = layout.axis_y();

        draw_text_centered(
            &mut img,
            self.font,
            TITLE_SIZE,
            BAR_CHART_TITLE,
            (self.width / 2) as i32,
            12,
            BLACK,
        );

        // Y ticks and grid
        let mut tick = 0.0;
        while tick <= layout.y_max + 1e-9 {
            let py = map_y(tick, 0.0, layout.y_max, layout.plot_y, layout.plot_h);
            draw_line_segment_mut(
                &mut img,
                (layout.plot_x as f32, py as f32),
                ((layout.plot_x + layout.plot_w) as f32, py as f32),
                GRAY,
            );
            let label = format!("{:.0}", tick);
            let (lw, lh) = self.font.measure(&label, TICK_SIZE);
            draw_text(
                &mut img,
                self.font,
                TICK_SIZE,
                &label,
                layout.plot_x as i32 - 6 - lw as i32,
                py as i32 - lh as i32 / 2,
                BLACK,
            );
            tick += layout.y_step;
        }

        for bar in &layout.bars {
            draw_filled_rect_mut(
                &mut img,
                Rect::at(bar.x as i32, bar.y as i32).of_size(bar.width, bar.height),
                BLUE,
            );

            let count = bar.count.to_string();
            let (_, ch) = self.font.measure(&count, TICK_SIZE);
            draw_text_centered(
                &mut img,
                self.font,
                TICK_SIZE,
                &count,
                bar.center_x() as i32,
                bar.y as i32 - ch as i32 - 2,
                BLACK,
            );

            // Label ends just under its bar, running down-left.
            let (w, h) = self.font.measure(&bar.skill, LABEL_SIZE);
            let (rw, _) = rotated_extent(w, h, LABEL_ANGLE);
            draw_text_rotated(
                &mut img,
                self.font,
                LABEL_SIZE,
                &bar.skill,
                bar.center_x() as i32 - rw as i32,
                axis_y as i32 + 6,
                LABEL_ANGLE,
                BLACK,
            );
        }

        // Axes drawn last so bars do not cover them.
        draw_line_segment_mut(
            &mut img,
            (layout.plot_x as f32, axis_y as f32),
            ((layout.plot_x + layout.plot_w) as f32, axis_y as f32),
            BLACK,
        );
        draw_line_segment_mut(
            &mut img,
            (layout.plot_x as f32, layout.plot_y as f32),
            (layout.plot_x as f32, axis_y as f32),
            BLACK,
        );

        img
    }
}

//! Course card widget and the responsive grid that lays cards out.

use client_core::{CourseCard, MissingTierDisplay};
use eframe::egui;
use shared::domain::Course;

pub const CARD_GAP: f32 = 24.0;
const SMALL_BREAKPOINT: f32 = 640.0;
const LARGE_BREAKPOINT: f32 = 1024.0;
const CARD_MARGIN_X: i8 = 18;
const CARD_MARGIN_Y: i8 = 16;

const TITLE_COLOR: egui::Color32 = egui::Color32::from_rgb(67, 56, 202);

/// 1 column on narrow windows, 2 on medium, 4 on wide.
pub fn grid_columns(available_width: f32) -> usize {
    if available_width < SMALL_BREAKPOINT {
        1
    } else if available_width < LARGE_BREAKPOINT {
        2
    } else {
        4
    }
}

pub fn card_width(available_width: f32, columns: usize) -> f32 {
    let columns = columns.max(1) as f32;
    ((available_width - CARD_GAP * (columns - 1.0)) / columns).max(0.0)
}

pub fn show_grid(ui: &mut egui::Ui, courses: &[Course], missing_tier: MissingTierDisplay) {
    let available = ui.available_width();
    let columns = grid_columns(available);
    let width = card_width(available, columns);

    egui::Grid::new("course_grid")
        .num_columns(columns)
        .spacing([CARD_GAP, CARD_GAP])
        .show(ui, |ui| {
            for (i, course) in courses.iter().enumerate() {
                let card = CourseCard::from_course(course, missing_tier);
                ui.push_id(card.key.0, |ui| show_card(ui, &card, width));
                if (i + 1) % columns == 0 {
                    ui.end_row();
                }
            }
        });
}

fn show_card(ui: &mut egui::Ui, card: &CourseCard, width: f32) {
    let inner_width = (width - 2.0 * f32::from(CARD_MARGIN_X)).max(0.0);
    egui::Frame::NONE
        .fill(ui.visuals().extreme_bg_color)
        .stroke(egui::Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(CARD_MARGIN_X, CARD_MARGIN_Y))
        .show(ui, |ui| {
            ui.set_width(inner_width);
            ui.label(
                egui::RichText::new(&card.title)
                    .size(20.0)
                    .strong()
                    .color(TITLE_COLOR),
            );
            ui.add_space(6.0);
            for line in &card.lines {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(format!("{}:", line.label)).strong());
                    ui.label(&line.value);
                });
            }
        });
}

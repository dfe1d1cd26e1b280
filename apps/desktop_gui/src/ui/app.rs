use std::time::Duration;

use client_core::{
    render::{EMPTY_RESULT_MESSAGE, LOADING_MESSAGE},
    MissingTierDisplay, RenderState, Settings, ViewHandle,
};
use eframe::egui;

use crate::backend_bridge::runtime::BackendRuntime;
use crate::ui::cards;

pub const APP_TITLE: &str = "University Course Finder";
pub const SEARCH_HINT: &str = "Search by course title or university";
const MEDIUM_BREAKPOINT: f32 = 768.0;

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub settings: Settings,
}

pub struct CourseFinderApp {
    view: ViewHandle,
    search: String,
    missing_tier: MissingTierDisplay,
    // Declared last so the view is dropped before its runtime.
    _backend: BackendRuntime,
}

impl CourseFinderApp {
    pub fn bootstrap(startup: StartupConfig) -> anyhow::Result<Self> {
        let backend = BackendRuntime::launch()?;
        let view = backend.mount_directory(&startup.settings)?;
        Ok(Self {
            view,
            search: String::new(),
            missing_tier: startup.settings.missing_tier_display,
            _backend: backend,
        })
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("course_finder_header")
            .frame(
                egui::Frame::side_top_panel(&ctx.style())
                    .inner_margin(egui::Margin::symmetric(16, 20)),
            )
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(APP_TITLE).size(30.0).strong());
                    ui.add_space(12.0);
                    let width = search_box_width(ui.available_width());
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.search)
                            .id_salt("course_search")
                            .hint_text(SEARCH_HINT)
                            .desired_width(width),
                    );
                    if response.changed() {
                        self.view.on_search_input(self.search.clone());
                    }
                });
            });
    }

    fn show_directory(&mut self, ctx: &egui::Context) {
        let snapshot = self.view.snapshot();
        egui::CentralPanel::default().show(ctx, |ui| match snapshot.render_state() {
            RenderState::Loading => {
                ui.vertical_centered(|ui| {
                    ui.add_space(48.0);
                    ui.spinner();
                    ui.weak(LOADING_MESSAGE);
                });
            }
            RenderState::EmptyResult => {
                ui.vertical_centered(|ui| {
                    ui.add_space(48.0);
                    ui.weak(EMPTY_RESULT_MESSAGE);
                });
            }
            RenderState::Populated(courses) => {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.add_space(8.0);
                        cards::show_grid(ui, courses, self.missing_tier);
                    });
            }
        });
    }
}

/// Full width on narrow windows, half width from the medium breakpoint up.
pub fn search_box_width(available_width: f32) -> f32 {
    if available_width < MEDIUM_BREAKPOINT {
        available_width
    } else {
        available_width / 2.0
    }
}

impl eframe::App for CourseFinderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_header(ctx);
        self.show_directory(ctx);

        let snapshot = self.view.snapshot();
        if snapshot.loading || snapshot.recompute_pending {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

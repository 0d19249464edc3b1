use chrono::{Datelike, Utc};
use eframe::egui::{self, Align, Layout, RichText};

use crate::app::PakurFastApp;
use crate::ui::constants::{BUSY_REPAINT, DETAILS_PANEL_WIDTH, PARTNER_PANEL_WIDTH};
use crate::ui::controls::render_control_panel;
use crate::ui::details::render_details_panel;
use crate::ui::map_view::render_map_view;
use crate::ui::partners::render_partner_panel;
use crate::ui::stats::render_stats;
use crate::ui::utils::muted_text_color;

pub fn run() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("PakurFast")
            .with_inner_size([1440.0, 900.0]),
        ..Default::default()
    };
    eframe::run_native(
        "PakurFast",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(PakurFastApp::from_env()?))
        }),
    )
}

impl eframe::App for PakurFastApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker();
        self.map_tiles.drain_results(ctx);
        if self.is_busy() || self.map_tiles.is_loading() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            render_control_panel(ui, self);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            render_footer(ui, self);
        });

        egui::SidePanel::left("partners")
            .resizable(false)
            .exact_width(PARTNER_PANEL_WIDTH)
            .show(ctx, |ui| {
                render_partner_panel(ui, self);
            });

        egui::SidePanel::right("details")
            .resizable(false)
            .exact_width(DETAILS_PANEL_WIDTH)
            .show(ctx, |ui| {
                render_details_panel(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            render_stats(ui, self.state.stats());
            ui.add_space(8.0);
            render_map_view(ui, self);
        });
    }
}

fn render_footer(ui: &mut egui::Ui, app: &PakurFastApp) {
    let muted = muted_text_color();
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!("© {} {} Logistics Hub", Utc::now().year(), app.config.city))
                .small()
                .color(muted),
        );
        ui.label(
            RichText::new(format!("{} Node Active", app.config.city))
                .small()
                .color(muted),
        );
        if let Some(message) = &app.status_message {
            ui.separator();
            ui.label(RichText::new(message).small());
        }
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            ui.label(
                RichText::new(format!("Service Area: {} Municipality", app.config.city))
                    .small()
                    .color(muted),
            );
        });
    });
}

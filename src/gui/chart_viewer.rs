use std::hash::{Hash, Hasher};

use eframe::egui;
use egui_plot::{Bar, BarChart, Corner, Legend, Line, Plot, Points};

use crate::{
    analysis::{HistogramBin, MergedRecord},
    api::{AnalysisReport, ESG_LABEL, RETURN_LABEL},
};

#[derive(Clone, Copy, PartialEq)]
enum ChartTab {
    Histogram,
    Scatter,
}

pub struct ChartViewer {
    tab: ChartTab,

    bins: Vec<HistogramBin>,
    scatter_points: Vec<[f64; 2]>,
    trend_points: Vec<[f64; 2]>,

    status_message: String,
}

impl ChartViewer {
    pub fn new(
        cc: &eframe::CreationContext,
        report: &AnalysisReport,
        records: &[MergedRecord],
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let scatter_points: Vec<[f64; 2]> = records
            .iter()
            .filter_map(|r| match (r.total_esg_score, r.annual_return) {
                (Some(x), Some(y)) => Some([x, y]),
                _ => None,
            })
            .collect();

        let trend_points = match &report.trend_line {
            Some(line) => {
                let min_x = scatter_points
                    .iter()
                    .map(|p| p[0])
                    .fold(f64::INFINITY, f64::min);
                let max_x = scatter_points
                    .iter()
                    .map(|p| p[0])
                    .fold(f64::NEG_INFINITY, f64::max);

                if min_x.is_finite() && max_x.is_finite() {
                    vec![[min_x, line.at(min_x)], [max_x, line.at(max_x)]]
                } else {
                    vec![]
                }
            }
            None => vec![],
        };

        let status_message = format!(
            "n = {}   r = {:.4}   p = {:.4}   {}",
            report.correlation.n, report.correlation.r, report.correlation.p_value, report.verdict
        );

        Self {
            tab: ChartTab::Histogram,

            bins: report.histogram.clone(),
            scatter_points,
            trend_points,

            status_message,
        }
    }

    fn show_histogram(&self, ui: &mut egui::Ui) {
        let bars: Vec<Bar> = self
            .bins
            .iter()
            .map(|bin| Bar::new(bin.center(), bin.count as f64).width(bin.width()))
            .collect();

        Plot::new("histogram")
            .legend(Legend::default().position(Corner::RightTop))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(RETURN_LABEL, bars).color(str_to_color(RETURN_LABEL)),
                );
            });
    }

    fn show_scatter(&self, ui: &mut egui::Ui) {
        Plot::new("scatter")
            .label_formatter(|_, point| {
                format!("{ESG_LABEL} {:.2}\n{RETURN_LABEL} {:.2}%", point.x, point.y * 100.0)
            })
            .legend(Legend::default().position(Corner::RightTop))
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new("Constituents", self.scatter_points.clone())
                        .radius(2.5)
                        .color(str_to_color(ESG_LABEL)),
                );

                if !self.trend_points.is_empty() {
                    plot_ui.line(
                        Line::new("Trend", self.trend_points.clone())
                            .width(1.5)
                            .color(egui::Color32::GOLD),
                    );
                }
            });
    }
}

impl eframe::App for ChartViewer {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::TopBottomPanel::top("tools_panel")
                .show_separator_line(false)
                .show_inside(ui, |ui| {
                    ui.horizontal_centered(|ui| {
                        ui.selectable_value(&mut self.tab, ChartTab::Histogram, "Return Histogram");
                        ui.selectable_value(&mut self.tab, ChartTab::Scatter, "ESG vs Return");
                    });
                });

            egui::TopBottomPanel::bottom("status_panel")
                .show_separator_line(false)
                .show_inside(ui, |ui| {
                    ui.horizontal_centered(|ui| {
                        ui.label(
                            egui::RichText::new(&self.status_message)
                                .color(egui::Color32::DARK_GRAY)
                                .size(12.0),
                        );
                    });
                });

            egui::CentralPanel::default().show_inside(ui, |ui| match self.tab {
                ChartTab::Histogram => self.show_histogram(ui),
                ChartTab::Scatter => self.show_scatter(ui),
            });
        });
    }
}

fn str_to_color(s: &str) -> egui::Color32 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    s.hash(&mut hasher);
    let hash = hasher.finish();

    let hue = (hash % 360) as f64;
    let saturation = 0.6;
    let lightness = 1.0;

    let (r, g, b) = hsv::hsv_to_rgb(hue, saturation, lightness);

    egui::Color32::from_rgb(r, g, b)
}

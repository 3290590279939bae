use eframe::egui;

use crate::{
    VERSION,
    analysis::MergedRecord,
    api::AnalysisReport,
    error::{EsError, EsResult},
    gui::chart_viewer::ChartViewer,
};

pub mod chart_viewer;

/// Opens the chart window and blocks until it is closed.
pub fn show_charts(report: &AnalysisReport, records: &[MergedRecord]) -> EsResult<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1024.0, 680.0]),
        ..Default::default()
    };

    let report = report.clone();
    let records = records.to_vec();

    eframe::run_native(
        &format!("ESG Return Analysis {VERSION}"),
        options,
        Box::new(move |cc| Ok(Box::new(ChartViewer::new(cc, &report, &records)))),
    )
    .map_err(|err| EsError::GuiError(err.to_string()))
}

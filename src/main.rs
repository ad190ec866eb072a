//! Mailsmith - AI-assisted email template studio
//!
//! An egui-based editor for email template documents with live placeholder
//! preview and an AI chat assistant that proposes section updates.

mod app;
mod assistant;
mod core;
mod ui;

use app::MailsmithApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting Mailsmith...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Mailsmith"),
        ..Default::default()
    };

    eframe::run_native(
        "Mailsmith",
        native_options,
        Box::new(|cc| Ok(Box::new(MailsmithApp::new(cc)?))),
    )
}

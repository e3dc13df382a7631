//! Main GUI application
//!
//! egui application state and rendering. The UI only observes the
//! verification controller and feeds it events; digest computation runs on
//! worker threads reporting back over a channel.

use crate::config;
use crate::core::algorithm::Algorithm;
use crate::core::checksum::{self, ExtensionMap};
use crate::core::compare::Outcome;
use crate::core::controller::{ComputeRequest, Verifier};
use crate::core::engine::{DigestEngine, EngineError, FileDigestEngine};
use eframe::egui;
use std::sync::mpsc;

/// Main verifier application state
pub struct VerifierApp {
    /// Verification state controller
    verifier: Verifier,
    /// Extension to algorithm mapping from config
    extensions: ExtensionMap,
    /// Channel for receiving async results
    async_receiver: Option<mpsc::Receiver<AsyncResult>>,
    /// Error message to display (file IO outside the controller)
    error_message: Option<String>,
    /// Success message to display
    success_message: Option<String>,
    /// Contents of the expected-digest text field
    expected_input: String,
}

enum AsyncResult {
    Digest(ComputeRequest, Result<String, EngineError>),
}

impl VerifierApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = config::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}", e);
            config::Config::default()
        });

        Self {
            verifier: Verifier::new(config.general.default_algorithm),
            extensions: config.extension_map(),
            async_receiver: None,
            error_message: None,
            success_message: None,
            expected_input: String::new(),
        }
    }

    /// Hand a compute request to a worker thread
    fn start_compute(&mut self, request: ComputeRequest, ctx: &egui::Context) {
        let (tx, rx) = mpsc::channel();
        self.async_receiver = Some(rx);

        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let result = FileDigestEngine.compute(&request.path, request.algorithm);
            let _ = tx.send(AsyncResult::Digest(request, result));
            ctx.request_repaint();
        });
    }

    fn check_async_results(&mut self) {
        if let Some(rx) = &self.async_receiver {
            if let Ok(result) = rx.try_recv() {
                match result {
                    AsyncResult::Digest(request, result) => {
                        // stale results are dropped inside the controller
                        self.verifier.apply(&request, result);
                        self.async_receiver = None;
                    }
                }
            }
        }
    }

    fn pick_file(&mut self, ctx: &egui::Context) {
        if let Some(path) = rfd::FileDialog::new().pick_file() {
            self.error_message = None;
            self.success_message = None;
            let request = self.verifier.select_file(path);
            self.start_compute(request, ctx);
        }
    }

    fn pick_checksum_file(&mut self, ctx: &egui::Context) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Open checksum file")
            .pick_file()
        else {
            return;
        };

        self.error_message = None;
        self.success_message = None;

        match std::fs::read_to_string(&path) {
            Ok(text) => {
                if let Some(request) =
                    self.verifier.load_checksum_file(&text, &path, &self.extensions)
                {
                    // the parsed expected digest replaces the field contents
                    self.expected_input = self.verifier.state().expected_digest.clone();
                    self.start_compute(request, ctx);
                }
                // on a parse failure the controller carries the message
            }
            Err(e) => {
                self.error_message = Some(format!("Cannot read {}: {}", path.display(), e));
            }
        }
    }

    fn save_digest_file(&mut self) {
        let state = self.verifier.state();
        let (Some(file), Some(digest)) = (
            state.selected_file.clone(),
            state.computed_digest.clone(),
        ) else {
            return;
        };
        let algorithm = state.algorithm;

        let suggested = checksum::digest_file_name(&file, algorithm);
        let mut dialog = rfd::FileDialog::new()
            .set_title("Save checksum file")
            .set_file_name(suggested.to_string_lossy());
        if let Some(dir) = file.parent() {
            dialog = dialog.set_directory(dir);
        }

        if let Some(dest) = dialog.save_file() {
            match checksum::write_digest_file(&dest, &file, algorithm, &digest) {
                Ok(()) => {
                    self.success_message =
                        Some(format!("Checksum file saved: {}", dest.display()));
                }
                Err(e) => {
                    self.error_message = Some(format!("Failed to save: {}", e));
                }
            }
        }
    }
}

impl eframe::App for VerifierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for async results
        self.check_async_results();

        // Top panel - Header
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("🔐 verihash");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label("v0.1.0");
                });
            });
        });

        // Bottom panel - Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(err) = self.error_message.clone() {
                    ui.colored_label(egui::Color32::RED, format!("❌ {}", err));
                    if ui.small_button("✕").clicked() {
                        self.error_message = None;
                    }
                } else if let Some(err) = self.verifier.message() {
                    ui.colored_label(egui::Color32::RED, format!("❌ {}", err));
                } else if let Some(msg) = &self.success_message {
                    ui.colored_label(egui::Color32::GREEN, format!("✅ {}", msg));
                } else if self.verifier.state().busy {
                    ui.spinner();
                    ui.label("Computing digest...");
                } else {
                    ui.label("Ready");
                }
            });
        });

        // Central panel - Verification form
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_verify_form(ui, ctx);
        });

        // Request repaint while a computation is in flight
        if self.verifier.state().busy {
            ctx.request_repaint();
        }
    }
}

impl VerifierApp {
    fn show_verify_form(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let state = self.verifier.state();
        let selected_file = state
            .selected_file
            .as_ref()
            .map(|path| path.display().to_string());
        let computed_digest = state.computed_digest.clone();
        let mut selected_algorithm = state.algorithm;

        if let Some(file) = &selected_file {
            ui.label(egui::RichText::new(file).weak());
        }
        if let Some(digest) = &computed_digest {
            ui.label(egui::RichText::new(digest).monospace());
        }
        if selected_file.is_some() || computed_digest.is_some() {
            ui.add_space(5.0);
        }

        ui.horizontal(|ui| {
            if ui.button("📂 Select File").clicked() {
                self.pick_file(ctx);
            }
            if ui.button("📄 Open Checksum File").clicked() {
                self.pick_checksum_file(ctx);
            }
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("Algorithm:");
            egui::ComboBox::from_id_salt("algorithm_select")
                .selected_text(selected_algorithm.name())
                .show_ui(ui, |ui| {
                    for algorithm in Algorithm::ALL {
                        ui.selectable_value(
                            &mut selected_algorithm,
                            algorithm,
                            algorithm.name(),
                        );
                    }
                });
        });
        if let Some(request) = self.verifier.change_algorithm(selected_algorithm) {
            self.success_message = None;
            self.start_compute(request, ctx);
        }

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("Expected:");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.expected_input)
                    .hint_text("Expected digest")
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                self.verifier.set_expected(self.expected_input.clone());
            }
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            if ui.button("🔍 Compare").clicked() {
                self.verifier.compare();
            }

            let can_save = self.verifier.state().computed_digest.is_some();
            if ui
                .add_enabled(can_save, egui::Button::new("💾 Save Checksum File"))
                .clicked()
            {
                self.save_digest_file();
            }

            if ui.button("🗑 Clear").clicked() {
                self.verifier.clear();
                self.expected_input.clear();
                self.error_message = None;
                self.success_message = None;
                self.async_receiver = None;
            }
        });

        // Comparison verdict
        if let Some(outcome) = self.verifier.outcome() {
            ui.add_space(10.0);
            match outcome {
                Outcome::Matched => {
                    ui.colored_label(
                        egui::Color32::GREEN,
                        format!("✅ {}", outcome.message()),
                    );
                }
                Outcome::Mismatched => {
                    ui.colored_label(
                        egui::Color32::RED,
                        format!("❌ {}", outcome.message()),
                    );
                }
                _ => {
                    ui.label(outcome.message());
                }
            }
        }
    }
}

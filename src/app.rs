// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module owns the current video session and wires the pieces
//! together: pointer events into the draft machine, committed shapes
//! into the store, store mutations into the sync coordinator, and the
//! playback clock into the overlay's visibility filter.

use crate::io::media::{self, LoadedImage};
use crate::io::repository::{
    AnnotationRepository, JsonFileRepository, MemoryRepository, RepositoryError,
};
use crate::io::sync::SyncCoordinator;
use crate::models::annotation::Annotation;
use crate::models::document::AnnotationDocument;
use crate::models::draft::{DraftMachine, PointerEvent, ToolOutcome};
use crate::models::playback::{PlaybackClock, FRAME_STEP, SKIP_STEP};
use crate::models::store::AnnotationStore;
use crate::ui::{canvas, playback, toolbar};
use crate::util::geometry::{hit_test, ERASER_RADIUS};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::time::{Duration, Instant};

const DEFAULT_COLOR: &str = "#3B82F6";

/// One video being annotated: the store, the interaction state, the
/// clock and the persistence plumbing, torn down wholesale when a
/// different video is opened.
struct Session {
    video_id: String,
    store: AnnotationStore,
    draft: DraftMachine,
    clock: PlaybackClock,
    sync: SyncCoordinator,
    active_color: String,

    poster: Option<egui::TextureHandle>,
    poster_loader: Option<Receiver<Result<LoadedImage, String>>>,
    annotation_loader: Option<Receiver<Result<Vec<Annotation>, RepositoryError>>>,
    load_error: Option<String>,
}

impl Session {
    /// Open a session against the given repository, fetching the stored
    /// annotation set (and any poster frame) on background threads.
    fn open(
        video_id: String,
        repository: Arc<dyn AnnotationRepository>,
        poster_path: Option<PathBuf>,
    ) -> Self {
        let sync = SyncCoordinator::new(Arc::clone(&repository), video_id.clone());
        let mut store = AnnotationStore::new();
        store.subscribe(sync.mutation_listener());

        let (ann_tx, ann_rx) = channel();
        {
            let repository = Arc::clone(&repository);
            let video_id = video_id.clone();
            std::thread::spawn(move || {
                let _ = ann_tx.send(repository.fetch_annotations(&video_id));
            });
        }

        let poster_loader = poster_path.map(|path| {
            let (tx, rx) = channel();
            std::thread::spawn(move || {
                let result =
                    media::load_image(&path).map_err(|e| format!("Failed to load poster: {}", e));
                let _ = tx.send(result);
            });
            rx
        });

        log::info!("Opened session for {}", video_id);

        Self {
            video_id,
            store,
            draft: DraftMachine::new(),
            clock: PlaybackClock::new(),
            sync,
            active_color: DEFAULT_COLOR.to_string(),
            poster: None,
            poster_loader,
            annotation_loader: Some(ann_rx),
            load_error: None,
        }
    }

    fn is_loading(&self) -> bool {
        self.annotation_loader.is_some() || self.poster_loader.is_some()
    }

    /// Collect results from the background loaders.
    fn poll_loaders(&mut self, ctx: &egui::Context) {
        if let Some(rx) = &self.annotation_loader {
            if let Ok(result) = rx.try_recv() {
                self.annotation_loader = None;
                match result {
                    Ok(annotations) => {
                        log::info!(
                            "Loaded {} annotations for {}",
                            annotations.len(),
                            self.video_id
                        );
                        self.store.load(annotations);
                    }
                    Err(e) => {
                        // The view stays usable over an empty set.
                        log::error!("Failed to load annotations: {}", e);
                        self.load_error = Some(format!("Failed to load annotations: {}", e));
                    }
                }
            }
        }

        if let Some(rx) = &self.poster_loader {
            if let Ok(result) = rx.try_recv() {
                self.poster_loader = None;
                match result {
                    Ok(loaded) => {
                        let size = [loaded.width as usize, loaded.height as usize];
                        let color_image =
                            egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
                        self.poster = Some(ctx.load_texture(
                            "poster_frame",
                            color_image,
                            egui::TextureOptions::LINEAR,
                        ));
                        log::info!("Loaded poster frame ({}x{})", loaded.width, loaded.height);
                    }
                    Err(e) => log::error!("{}", e),
                }
            }
        }
    }
}

/// Main application state.
pub struct RemarkApp {
    session: Session,
}

impl RemarkApp {
    /// Create the application, opening either the video given on the
    /// command line or an in-memory demo session.
    pub fn new(initial_video: Option<PathBuf>) -> Self {
        let session = match initial_video {
            Some(path) => Self::file_session(&path),
            None => Session::open(
                "demo".to_string(),
                Arc::new(MemoryRepository::new()),
                None,
            ),
        };
        Self { session }
    }

    fn file_session(path: &Path) -> Session {
        Session::open(
            path.to_string_lossy().to_string(),
            Arc::new(JsonFileRepository::new()),
            media::find_poster(path),
        )
    }

    /// Switch to a different video. The outgoing session's debounce
    /// timer is disarmed first so no stale write can land against the
    /// new annotation set.
    fn open_video(&mut self, path: PathBuf) {
        self.session.sync.cancel_pending();
        self.session = Self::file_session(&path);
    }

    fn import_annotations(&mut self, path: PathBuf) {
        let extension = path.extension().and_then(|s| s.to_str());
        let result = match extension {
            Some("yaml") | Some("yml") => crate::io::serialization::import_yaml(&path),
            Some("json") => crate::io::serialization::import_json(&path),
            _ => {
                log::error!("Unsupported file extension: {:?}", extension);
                return;
            }
        };

        match result {
            Ok(document) => {
                log::info!(
                    "Imported {} annotations from {}",
                    document.annotations.len(),
                    path.display()
                );
                self.session.store.replace_all(document.annotations);
            }
            Err(e) => log::error!("Failed to import annotations: {}", e),
        }
    }

    fn export_annotations(&self, path: PathBuf) {
        let document = AnnotationDocument::new(
            self.session.video_id.clone(),
            self.session.store.snapshot().to_vec(),
        );
        let extension = path.extension().and_then(|s| s.to_str());
        let result = match extension {
            Some("yaml") | Some("yml") => crate::io::serialization::export_yaml(&document, &path),
            Some("json") => crate::io::serialization::export_json(&document, &path),
            _ => {
                log::error!("Unsupported file extension: {:?}", extension);
                return;
            }
        };

        match result {
            Ok(_) => log::info!("Exported annotations to {}", path.display()),
            Err(e) => log::error!("Failed to export annotations: {}", e),
        }
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.session.draft.select_tool(None);
        }

        // Skip transport shortcuts while a text field is being edited.
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.session.clock.toggle();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
            let step = if ctx.input(|i| i.modifiers.shift) {
                FRAME_STEP
            } else {
                SKIP_STEP
            };
            self.session.clock.skip(-step);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
            let step = if ctx.input(|i| i.modifiers.shift) {
                FRAME_STEP
            } else {
                SKIP_STEP
            };
            self.session.clock.skip(step);
        }
    }

    fn handle_canvas_action(&mut self, action: canvas::CanvasAction) {
        let event = match action {
            canvas::CanvasAction::None => return,
            canvas::CanvasAction::Pressed(p) => PointerEvent::Pressed(p),
            canvas::CanvasAction::Moved(p) => PointerEvent::Moved(p),
            canvas::CanvasAction::Released(p) => PointerEvent::Released(p),
            canvas::CanvasAction::Clicked(p) => PointerEvent::Clicked(p),
        };

        let session = &mut self.session;
        let timestamp = session.clock.position();
        match session.draft.handle(event, timestamp, &session.active_color) {
            ToolOutcome::None => {}
            ToolOutcome::Committed(annotation) => {
                log::info!(
                    "Committed {:?} at t={:.2}s, total: {}",
                    annotation.kind,
                    annotation.timestamp,
                    session.store.len() + 1
                );
                session.store.append(annotation);
            }
            ToolOutcome::Erase(at) => {
                let before = session.store.len();
                session
                    .store
                    .remove_where(|ann| hit_test(ann, at, ERASER_RADIUS));
                log::info!(
                    "Eraser removed {} annotation(s)",
                    before - session.store.len()
                );
            }
        }
    }
}

impl eframe::App for RemarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.session.poll_loaders(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Video...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Videos", &["mp4", "mov", "mkv", "avi", "webm"])
                            .pick_file()
                        {
                            self.open_video(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Import Annotations...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Annotations", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.import_annotations(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.menu_button("Export Annotations", |ui| {
                        if ui.button("Export as YAML...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("YAML", &["yaml", "yml"])
                                .set_file_name("annotations.yaml")
                                .save_file()
                            {
                                self.export_annotations(path);
                            }
                            ui.close_menu();
                        }
                        if ui.button("Export as JSON...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("JSON", &["json"])
                                .set_file_name("annotations.json")
                                .save_file()
                            {
                                self.export_annotations(path);
                            }
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(
                    ui,
                    &mut self.session.draft,
                    &mut self.session.active_color,
                    self.session.sync.status(),
                    self.session.store.len(),
                )
            })
            .inner;

        if let toolbar::ToolbarAction::ResetAll = toolbar_action {
            self.session.store.replace_all(Vec::new());
            self.session.draft.select_tool(None);
            log::info!("Cleared all annotations for {}", self.session.video_id);
        }

        // Transport controls
        egui::TopBottomPanel::bottom("transport").show(ctx, |ui| {
            playback::show(ui, &mut self.session.clock);
            if let Some(error) = &self.session.load_error {
                ui.label(
                    egui::RichText::new(error).color(egui::Color32::from_rgb(0xDC, 0x26, 0x26)),
                );
            }
        });

        self.handle_keyboard(ctx);

        // Playback surface with the annotation overlay
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if self.session.is_loading() {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                    canvas::CanvasAction::None
                } else {
                    canvas::show(
                        ui,
                        &self.session.store,
                        &self.session.draft,
                        &self.session.clock,
                        &self.session.poster,
                    )
                }
            })
            .inner;

        self.handle_canvas_action(canvas_action);

        // Advance simulated playback and drive the debounced sync.
        let dt = ctx.input(|i| i.stable_dt) as f64;
        self.session.clock.advance(dt);
        self.session.sync.tick(Instant::now());

        if self.session.clock.is_playing() || self.session.is_loading() {
            ctx.request_repaint();
        } else if self.session.sync.has_pending_work() {
            // Keep ticking so the quiet period can elapse without input.
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

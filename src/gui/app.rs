// Copyright (C) 2025 Berkay Yetgin
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use eframe::egui;
use egui::{Color32, Margin, RichText, Rounding};

use factorio_mod_manager::core::{
    add_mods, format_size, is_mod_archive, DirectoryOption, GameVersion, ImportProgress,
    ImportResult, Mod, ModpackItem, Session, Settings,
};

const FACTORIO_WEBSITE: &str = "https://www.factorio.com/";
const MOD_PORTAL: &str = "https://mods.factorio.com/";

/// Message types for the import worker
#[derive(Debug)]
enum AsyncMessage {
    Progress { fraction: f64, file_name: String },
    ModInstalled(Mod),
    ImportFinished(ImportResult),
}

/// Main Navigation Pages
#[derive(PartialEq, Clone, Copy)]
enum Page {
    Mods,
    Versions,
    Settings,
    About,
}

/// User intents collected while drawing, applied once the frame is laid out
enum Action {
    SelectVersion(GameVersion),
    StartGame,
    PickMods,
    Import(Vec<PathBuf>),
    ToggleMod(PathBuf, bool),
    DeleteMod(PathBuf),
    CreateModpack,
    RenameModpack(String, String),
    DeleteModpack(String),
    ActivateModpack(String, bool),
    AddModToModpack(String, String),
    AddModpackToModpack(String, String),
    RemoveFromModpack(String, ModpackItem),
    ApplySettings(Settings),
    RelinkMods,
    Reload,
    SavePaneRatio(f32),
}

/// Selection and edit buffers of the mods/modpacks page
#[derive(Default)]
struct PanelState {
    selected_modpack: Option<String>,
    rename_buffer: String,
    confirm_delete_mod: Option<PathBuf>,
    confirm_delete_modpack: Option<String>,
}

/// UI State
pub struct ModManagerApp {
    page: Page,
    session: Option<Session>,
    startup_error: Option<String>,
    panel: PanelState,
    settings_draft: Option<Settings>,

    // Async
    tx: Sender<AsyncMessage>,
    rx: Receiver<AsyncMessage>,
    is_importing: bool,
    import_fraction: f64,
    import_file: String,

    // UI Helpers
    log_messages: Vec<String>,
    show_log: bool,
    notification: Option<String>,
}

impl ModManagerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, session: anyhow::Result<Session>) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.visuals.window_rounding = Rounding::same(10.0);
        style.visuals.widgets.noninteractive.rounding = Rounding::same(6.0);
        style.visuals.widgets.inactive.rounding = Rounding::same(6.0);
        style.visuals.widgets.hovered.rounding = Rounding::same(6.0);
        style.visuals.widgets.active.rounding = Rounding::same(6.0);
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        style.spacing.window_margin = Margin::same(12.0);
        cc.egui_ctx.set_style(style);

        let (tx, rx) = channel();
        let mut app = Self {
            page: Page::Mods,
            session: None,
            startup_error: None,
            panel: PanelState::default(),
            settings_draft: None,
            tx,
            rx,
            is_importing: false,
            import_fraction: 0.0,
            import_file: String::new(),
            log_messages: Vec::new(),
            show_log: false,
            notification: None,
        };

        match session {
            Ok(session) => {
                app.log(&format!(
                    "Loaded {} mods and {} modpacks",
                    session.mods().len(),
                    session.modpacks().len()
                ));
                app.session = Some(session);
            }
            Err(e) => {
                log::error!("Failed to load application state: {:#}", e);
                app.startup_error = Some(format!("{:#}", e));
            }
        }
        app
    }

    // --- Helpers ---

    fn log(&mut self, msg: &str) {
        let time = chrono::Local::now().format("%H:%M:%S");
        self.log_messages.push(format!("[{}] {}", time, msg));
    }

    fn notify(&mut self, msg: &str) {
        self.log(msg);
        self.notification = Some(msg.to_string());
    }

    fn report(&mut self, context: &str, result: anyhow::Result<()>) {
        if let Err(e) = result {
            log::error!("{}: {:#}", context, e);
            self.notify(&format!("⚠️ {}: {:#}", context, e));
        }
    }

    // --- Logic Actions ---

    fn start_import(&mut self, files: Vec<PathBuf>) {
        let Some(settings) = self.session.as_ref().map(|s| s.settings().clone()) else {
            return;
        };
        if self.is_importing || files.is_empty() {
            return;
        }

        self.is_importing = true;
        self.import_fraction = 0.0;
        self.import_file.clear();
        self.log(&format!("Processing {} mods...", files.len()));

        let tx = self.tx.clone();
        thread::spawn(move || {
            let progress_tx = tx.clone();
            let on_progress = move |p: ImportProgress| {
                let msg = match p {
                    ImportProgress::Processing { fraction, file_name } => {
                        AsyncMessage::Progress { fraction, file_name }
                    }
                    ImportProgress::Installed(m) => AsyncMessage::ModInstalled(m),
                    ImportProgress::Finished => return,
                };
                let _ = progress_tx.send(msg);
            };
            let result = add_mods(&files, &settings, Some(&on_progress));
            let _ = tx.send(AsyncMessage::ImportFinished(result));
        });
    }

    fn handle_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                AsyncMessage::Progress { fraction, file_name } => {
                    self.import_fraction = fraction;
                    self.import_file = file_name;
                }
                AsyncMessage::ModInstalled(m) => {
                    self.log(&format!("Added {} for Factorio {}", m.file_name(), m.factorio_version));
                    if let Some(session) = &mut self.session {
                        session.install([m]);
                    }
                }
                AsyncMessage::ImportFinished(result) => {
                    self.is_importing = false;
                    for e in &result.errors {
                        self.log(&format!("ERROR: {}", e));
                    }
                    if result.skipped.is_empty() {
                        self.notify(&format!("Added {} mods", result.installed.len()));
                    } else {
                        self.notify(&format!(
                            "Added {} mods, skipped {} (see log)",
                            result.installed.len(),
                            result.skipped.len()
                        ));
                    }
                }
            }
        }
    }

    fn pick_mods(&mut self) {
        if let Some(files) = rfd::FileDialog::new()
            .set_title("Add mods")
            .add_filter("ZIP-Archives", &["zip"])
            .pick_files()
        {
            self.start_import(files);
        }
    }

    fn apply(&mut self, action: Action) {
        let Some(session) = self.session.as_mut() else { return };
        let (context, result): (&str, anyhow::Result<()>) = match action {
            Action::PickMods => return self.pick_mods(),
            Action::Import(files) => return self.start_import(files),
            Action::SelectVersion(v) => ("Select version", session.set_selected_version(v)),
            Action::StartGame => ("Start game", session.start_game().map(|_| ())),
            Action::ToggleMod(path, active) => ("Toggle mod", session.set_mod_active(&path, active)),
            Action::DeleteMod(path) => ("Delete mod", session.delete_mod(&path)),
            Action::CreateModpack => {
                let result = session.create_modpack().map(|name| {
                    self.panel.rename_buffer = name.clone();
                    self.panel.selected_modpack = Some(name);
                });
                ("Create modpack", result)
            }
            Action::RenameModpack(old, new) => {
                let result = session.rename_modpack(&old, &new);
                if result.is_ok() {
                    self.panel.selected_modpack = Some(new.trim().to_string());
                }
                ("Rename modpack", result)
            }
            Action::DeleteModpack(name) => {
                let result = session.delete_modpack(&name);
                if self.panel.selected_modpack.as_deref() == Some(name.as_str()) {
                    self.panel.selected_modpack = None;
                }
                ("Delete modpack", result)
            }
            Action::ActivateModpack(name, exclusive) => {
                let result = session.activate_modpack(&name, exclusive).map(|count| {
                    log::info!("Enabled {} mods from '{}'", count, name);
                });
                ("Activate modpack", result)
            }
            Action::AddModToModpack(pack, m) => ("Add to modpack", session.add_mod_to_modpack(&pack, &m)),
            Action::AddModpackToModpack(pack, child) => {
                ("Add to modpack", session.add_modpack_to_modpack(&pack, &child))
            }
            Action::RemoveFromModpack(pack, item) => {
                ("Remove from modpack", session.remove_from_modpack(&pack, &item))
            }
            Action::ApplySettings(settings) => {
                let result = session.apply_settings(settings);
                self.settings_draft = None;
                ("Apply settings", result)
            }
            Action::RelinkMods => {
                let errors = session.link_mod_directories(true);
                let result = if errors.is_empty() {
                    Ok(())
                } else {
                    Err(anyhow::anyhow!(errors.join("; ")))
                };
                ("Link mod folders", result)
            }
            Action::Reload => ("Reload", session.reload()),
            Action::SavePaneRatio(ratio) => ("Save layout", session.set_pane_ratio(ratio)),
        };
        self.report(context, result);
    }
}

impl eframe::App for ModManagerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_messages();
        if self.is_importing {
            ctx.request_repaint();
        }

        let mut actions: Vec<Action> = Vec::new();

        // Archives dropped onto the window are imported like picked ones
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .filter(|p| {
                    p.file_name()
                        .map(|n| is_mod_archive(&n.to_string_lossy()))
                        .unwrap_or(false)
                })
                .collect()
        });
        if !dropped.is_empty() {
            actions.push(Action::Import(dropped));
        }

        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading("Factorio");
                    ui.label("Mod Manager");
                });
                ui.add_space(20.0);

                let btn = |ui: &mut egui::Ui, label: &str, active: bool| {
                    let text = RichText::new(label).size(16.0).strong();
                    let btn = egui::Button::new(text)
                        .frame(false)
                        .min_size(egui::vec2(160.0, 36.0));
                    if active {
                        ui.add(btn.fill(ui.visuals().widgets.active.bg_fill));
                        false
                    } else {
                        ui.add(btn).clicked()
                    }
                };

                if btn(ui, "🧩 Mods", self.page == Page::Mods) {
                    self.page = Page::Mods;
                }
                if btn(ui, "🎮 Versions", self.page == Page::Versions) {
                    self.page = Page::Versions;
                }
                if btn(ui, "⚙️ Settings", self.page == Page::Settings) {
                    self.page = Page::Settings;
                }

                ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
                    ui.add_space(20.0);
                    if btn(ui, "ℹ️ About", self.page == Page::About) {
                        self.page = Page::About;
                    }
                });
            });

        if self.show_log {
            egui::TopBottomPanel::bottom("log_panel")
                .resizable(true)
                .min_height(100.0)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Log");
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Close").clicked() {
                                self.show_log = false;
                            }
                            if ui.button("Clear").clicked() {
                                self.log_messages.clear();
                            }
                        });
                    });
                    ui.separator();
                    egui::ScrollArea::vertical().stick_to_bottom(true).show(ui, |ui| {
                        ui.style_mut().spacing.item_spacing = egui::vec2(0.0, 2.0);
                        for msg in &self.log_messages {
                            ui.label(RichText::new(msg).monospace().size(12.0));
                        }
                    });
                });
        } else {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if self.is_importing {
                        ui.spinner();
                        ui.label("Processing mods...");
                    } else if let Some(note) = &self.notification {
                        ui.label(note);
                    } else {
                        ui.label("Ready");
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Show Log").clicked() {
                            self.show_log = true;
                        }
                        ui.label(concat!("v", env!("CARGO_PKG_VERSION")));
                    });
                });
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(session) = self.session.as_ref() else {
                ui.heading("Could not load your mod library");
                if let Some(e) = &self.startup_error {
                    ui.label(RichText::new(e).color(Color32::LIGHT_RED));
                }
                return;
            };

            match self.page {
                Page::Mods => render_mods_page(ui, session, &mut self.panel, &mut actions),
                Page::Versions => render_versions(ui, session, &mut actions),
                Page::Settings => {
                    let draft = self
                        .settings_draft
                        .get_or_insert_with(|| session.settings().clone());
                    render_settings(ui, draft, &mut actions);
                }
                Page::About => render_about(ui),
            }
        });

        // Modal progress window while importing
        if self.is_importing {
            egui::Window::new("Processing mods")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.set_min_width(320.0);
                    ui.add(egui::ProgressBar::new(self.import_fraction as f32).show_percentage());
                    ui.label(&self.import_file);
                });
        }

        for action in actions {
            self.apply(action);
        }
    }
}

// --- Page renderers ---

fn render_mods_page(ui: &mut egui::Ui, session: &Session, panel: &mut PanelState, actions: &mut Vec<Action>) {
    ui.horizontal(|ui| {
        let selected = session.selected_version();
        egui::ComboBox::from_id_salt("version_select")
            .selected_text(
                selected
                    .map(|v| format!("Factorio {}", v.version))
                    .unwrap_or_else(|| "Select a version".to_string()),
            )
            .show_ui(ui, |ui| {
                for v in session.versions() {
                    let is_selected = selected.map(|s| s.version) == Some(v.version);
                    if ui
                        .selectable_label(is_selected, format!("Factorio {}", v.version))
                        .clicked()
                    {
                        actions.push(Action::SelectVersion(v.version));
                    }
                }
            });

        if ui
            .add_enabled(selected.is_some(), egui::Button::new("▶ Start game"))
            .clicked()
        {
            actions.push(Action::StartGame);
        }
        ui.separator();
        if ui.button("📦 Add mods").clicked() {
            actions.push(Action::PickMods);
        }
        if ui.button("➕ New modpack").clicked() {
            actions.push(Action::CreateModpack);
        }
    });
    ui.separator();

    let total_width = ui.available_width().max(1.0);
    let modpack_width = total_width * (1.0 - session.settings().pane_ratio);
    let panel_response = egui::SidePanel::right("modpack_panel")
        .resizable(true)
        .default_width(modpack_width)
        .width_range(total_width * 0.1..=total_width * 0.9)
        .show_inside(ui, |ui| render_modpacks(ui, session, panel, actions));

    let ratio = 1.0 - panel_response.response.rect.width() / total_width;
    let dragging = ui.ctx().input(|i| i.pointer.any_down());
    if !dragging && (ratio - session.settings().pane_ratio).abs() > 0.01 {
        actions.push(Action::SavePaneRatio(ratio));
    }

    egui::CentralPanel::default().show_inside(ui, |ui| render_mod_list(ui, session, panel, actions));
}

fn render_mod_list(ui: &mut egui::Ui, session: &Session, panel: &mut PanelState, actions: &mut Vec<Action>) {
    ui.heading("Mods");
    if session.mods().is_empty() {
        ui.label("No mods yet. Use \"Add mods\" or drop zip archives onto this window.");
        return;
    }

    let target = panel.selected_modpack.clone();
    egui::ScrollArea::vertical().show(ui, |ui| {
        for (version, mods) in session.mods_by_version() {
            egui::CollapsingHeader::new(format!("Factorio {}", version))
                .default_open(true)
                .show(ui, |ui| {
                    for m in mods {
                        ui.horizontal(|ui| {
                            let mut active = m.active;
                            if ui.checkbox(&mut active, "").changed() {
                                actions.push(Action::ToggleMod(m.file_path.clone(), active));
                            }
                            ui.label(RichText::new(m.display_title()).strong())
                                .on_hover_text(m.file_name());
                            ui.label(RichText::new(&m.version).weak());
                            ui.label(RichText::new(format_size(m.size)).weak());

                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if panel.confirm_delete_mod.as_ref() == Some(&m.file_path) {
                                    if ui.button("Cancel").clicked() {
                                        panel.confirm_delete_mod = None;
                                    }
                                    if ui
                                        .button(RichText::new("Delete").color(Color32::LIGHT_RED))
                                        .clicked()
                                    {
                                        actions.push(Action::DeleteMod(m.file_path.clone()));
                                        panel.confirm_delete_mod = None;
                                    }
                                } else if ui.small_button("🗑").on_hover_text("Delete mod").clicked() {
                                    panel.confirm_delete_mod = Some(m.file_path.clone());
                                }

                                if let Some(pack) = &target {
                                    if ui
                                        .small_button("➕")
                                        .on_hover_text(format!("Add to {}", pack))
                                        .clicked()
                                    {
                                        actions.push(Action::AddModToModpack(pack.clone(), m.name.clone()));
                                    }
                                }
                            });
                        });
                    }
                });
        }
    });
}

fn render_modpacks(ui: &mut egui::Ui, session: &Session, panel: &mut PanelState, actions: &mut Vec<Action>) {
    ui.heading("Modpacks");
    let modpacks = session.modpacks();
    if modpacks.is_empty() {
        ui.label("No modpacks yet.");
        return;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for modpack in modpacks.sorted() {
            let is_selected = panel.selected_modpack.as_deref() == Some(modpack.name.as_str());
            let label = format!("{} ({})", modpack.name, modpack.items.len());
            if ui.selectable_label(is_selected, label).clicked() {
                panel.selected_modpack = Some(modpack.name.clone());
                panel.rename_buffer = modpack.name.clone();
                panel.confirm_delete_modpack = None;
            }
        }

        let Some(name) = panel.selected_modpack.clone() else { return };
        let Some(modpack) = modpacks.get(&name) else {
            panel.selected_modpack = None;
            return;
        };

        ui.separator();
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.text_edit_singleline(&mut panel.rename_buffer);
                if ui.button("Rename").clicked() {
                    actions.push(Action::RenameModpack(name.clone(), panel.rename_buffer.clone()));
                }
            });

            ui.horizontal(|ui| {
                if ui.button("Enable").on_hover_text("Enable all mods of this modpack").clicked() {
                    actions.push(Action::ActivateModpack(name.clone(), false));
                }
                if ui
                    .button("Enable only this")
                    .on_hover_text("Enable this modpack and disable every other mod")
                    .clicked()
                {
                    actions.push(Action::ActivateModpack(name.clone(), true));
                }
                if panel.confirm_delete_modpack.as_deref() == Some(name.as_str()) {
                    if ui.button(RichText::new("Really delete").color(Color32::LIGHT_RED)).clicked() {
                        actions.push(Action::DeleteModpack(name.clone()));
                        panel.confirm_delete_modpack = None;
                    }
                } else if ui.button("Delete").clicked() {
                    panel.confirm_delete_modpack = Some(name.clone());
                }
            });

            ui.separator();
            if modpack.items.is_empty() {
                ui.label(RichText::new("Empty. Use ➕ next to a mod to add it.").italics());
            }
            for item in &modpack.items {
                ui.horizontal(|ui| {
                    let icon = match item {
                        ModpackItem::Mod(_) => "🧩",
                        ModpackItem::Modpack(_) => "📦",
                    };
                    ui.label(format!("{} {}", icon, item.display_name()));
                    if ui.small_button("✖").on_hover_text("Remove").clicked() {
                        actions.push(Action::RemoveFromModpack(name.clone(), item.clone()));
                    }
                });
            }

            let candidates: Vec<&str> = modpacks
                .sorted()
                .into_iter()
                .map(|m| m.name.as_str())
                .filter(|other| *other != name)
                .filter(|other| !modpack.contains(&ModpackItem::Modpack(other.to_string())))
                .collect();
            if !candidates.is_empty() {
                egui::ComboBox::from_id_salt("add_modpack")
                    .selected_text("Add modpack...")
                    .show_ui(ui, |ui| {
                        for other in candidates {
                            if ui.selectable_label(false, other).clicked() {
                                actions.push(Action::AddModpackToModpack(name.clone(), other.to_string()));
                            }
                        }
                    });
            }
        });
    });
}

fn render_versions(ui: &mut egui::Ui, session: &Session, actions: &mut Vec<Action>) {
    ui.heading("Installed versions");
    ui.label(format!(
        "Looking in {}",
        session.settings().factorio_directory().display()
    ));
    ui.add_space(10.0);

    ui.horizontal(|ui| {
        if ui.button("🔄 Refresh").clicked() {
            actions.push(Action::Reload);
        }
        if ui
            .button("🔗 Link mod folders")
            .on_hover_text("Point every installation's mods folder at the managed mod folder")
            .clicked()
        {
            actions.push(Action::RelinkMods);
        }
    });
    ui.separator();

    if session.versions().is_empty() {
        ui.label("No installed versions found.");
        return;
    }

    let selected = session.selected_version().map(|v| v.version);
    egui::Grid::new("versions_grid").striped(true).num_columns(3).show(ui, |ui| {
        for v in session.versions() {
            let label = RichText::new(format!("Factorio {}", v.version)).strong();
            if selected == Some(v.version) {
                ui.label(label.color(Color32::LIGHT_GREEN));
            } else {
                ui.label(label);
            }
            ui.label(RichText::new(v.directory.to_string_lossy()).monospace());
            if ui
                .add_enabled(selected != Some(v.version), egui::Button::new("Select"))
                .clicked()
            {
                actions.push(Action::SelectVersion(v.version));
            }
            ui.end_row();
        }
    });
}

fn directory_picker(ui: &mut egui::Ui, title: &str, option: &mut DirectoryOption) {
    ui.label(RichText::new(title).strong());
    let mut kind = match option {
        DirectoryOption::AppData => 0,
        DirectoryOption::ApplicationDirectory => 1,
        DirectoryOption::Custom(_) => 2,
    };
    let before = kind;

    ui.horizontal(|ui| {
        ui.radio_value(&mut kind, 0, "User data folder");
        ui.radio_value(&mut kind, 1, "Next to the application");
        ui.radio_value(&mut kind, 2, "Custom");
    });

    if kind != before {
        *option = match kind {
            0 => DirectoryOption::AppData,
            1 => DirectoryOption::ApplicationDirectory,
            _ => DirectoryOption::Custom(PathBuf::new()),
        };
    }

    if let DirectoryOption::Custom(path) = option {
        ui.horizontal(|ui| {
            if ui.button("📂 Browse...").clicked() {
                if let Some(picked) = rfd::FileDialog::new().set_title(title).pick_folder() {
                    *path = picked;
                }
            }
            if path.as_os_str().is_empty() {
                ui.label(RichText::new("Not selected").italics().color(Color32::LIGHT_RED));
            } else {
                ui.label(RichText::new(path.to_string_lossy()).monospace().color(Color32::LIGHT_GREEN));
            }
        });
    }
}

fn render_settings(ui: &mut egui::Ui, draft: &mut Settings, actions: &mut Vec<Action>) {
    ui.heading("Settings");
    ui.add_space(10.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        directory_picker(ui, "Factorio installations", &mut draft.factorio_directory);
        ui.label(RichText::new(draft.factorio_directory().to_string_lossy()).weak());
        ui.add_space(10.0);
        directory_picker(ui, "Mods", &mut draft.mod_directory);
        ui.label(RichText::new(draft.mod_directory().to_string_lossy()).weak());
    });

    ui.add_space(10.0);
    let incomplete = [&draft.factorio_directory, &draft.mod_directory]
        .iter()
        .any(|o| matches!(o, DirectoryOption::Custom(p) if p.as_os_str().is_empty()));
    if ui
        .add_enabled(!incomplete, egui::Button::new("Apply").min_size(egui::vec2(80.0, 30.0)))
        .clicked()
    {
        actions.push(Action::ApplySettings(draft.clone()));
    }
    ui.label("Applying re-links the mods folder of every installed version.");
}

fn render_about(ui: &mut egui::Ui) {
    ui.heading("About Factorio Mod Manager");
    ui.add_space(10.0);
    ui.label("Keeps mods per game version, groups them into modpacks and starts the game with them.");
    ui.add_space(10.0);
    ui.label(concat!("Version: ", env!("CARGO_PKG_VERSION")));
    ui.hyperlink_to("Factorio website", FACTORIO_WEBSITE);
    ui.hyperlink_to("Factorio mod portal", MOD_PORTAL);
    ui.add_space(20.0);
    ui.label("License: GPL-3.0");
}

use acfgen_core::report::{ConversionLog, LogLevel};
use acfgen_core::template::Template;
use acfgen_extract::{Conversion, Converter, ExtractConfig};
use anyhow::{bail, Context, Result};
use eframe::egui;
use std::path::{Path, PathBuf};

fn main() -> eframe::Result {
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "acfgen",
        native_options,
        Box::new(|cc| Ok(Box::new(AcfGenApp::new(cc)))),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    NewAircraft,
    ModifyExisting,
}

struct AcfGenApp {
    obj_path: Option<PathBuf>,
    mode: Mode,

    existing_acf: Option<PathBuf>,
    new_acf_dir: Option<PathBuf>,
    new_acf_name: String,

    cowl_offset_deg: f64,
    station_tolerance: f64,

    conversion: Option<Conversion>,
    written_path: Option<PathBuf>,
    backup_path: Option<PathBuf>,

    status: String,
}

impl AcfGenApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            obj_path: None,
            mode: Mode::NewAircraft,
            existing_acf: None,
            new_acf_dir: None,
            new_acf_name: "NewAircraft.acf".to_string(),
            cowl_offset_deg: 5.0,
            station_tolerance: 1e-4,
            conversion: None,
            written_path: None,
            backup_path: None,
            status: "Open an OBJ to begin.".to_string(),
        }
    }

    fn pick_obj(&mut self) {
        let file = rfd::FileDialog::new()
            .add_filter("OBJ meshes", &["obj"])
            .pick_file();
        if let Some(path) = file {
            self.obj_path = Some(path.clone());
            self.conversion = None;
            self.written_path = None;
            self.backup_path = None;
            self.status = format!("Selected {}", path.display());
            if self.new_acf_dir.is_none() {
                self.new_acf_dir = path.parent().map(Path::to_path_buf);
            }
        }
    }

    fn pick_existing_acf(&mut self) {
        let file = rfd::FileDialog::new()
            .add_filter("ACF files", &["acf"])
            .pick_file();
        if let Some(path) = file {
            self.existing_acf = Some(path);
        }
    }

    fn pick_new_acf_dir(&mut self) {
        if let Some(folder) = rfd::FileDialog::new().pick_folder() {
            self.new_acf_dir = Some(folder);
        }
    }

    fn run_convert(&mut self) {
        match self.try_convert() {
            Ok(status) => self.status = status,
            Err(e) => self.status = format!("Failed: {e:#}"),
        }
    }

    fn try_convert(&mut self) -> Result<String> {
        let Some(obj_path) = self.obj_path.clone() else {
            bail!("select a source OBJ first");
        };

        let body_template =
            Template::parse(acfgen_acf::templates::BODY_BLOCK).context("body template")?;
        let wing_template =
            Template::parse(acfgen_acf::templates::WING_BLOCK).context("wing template")?;

        let mut log = ConversionLog::new();
        let doc = acfgen_import_obj::import_obj(&obj_path, &mut log)?;

        let cfg = ExtractConfig {
            cowl_offset_deg: self.cowl_offset_deg,
            station_tolerance: self.station_tolerance,
            ..ExtractConfig::default()
        };
        let conversion = Converter::new(cfg)
            .convert(&doc, &body_template, &wing_template, &mut log)
            .with_context(|| format!("convert {}", obj_path.display()))?;

        self.written_path = None;
        self.backup_path = None;

        let status = match self.mode {
            Mode::ModifyExisting => {
                let Some(target) = self.existing_acf.clone() else {
                    self.conversion = Some(conversion);
                    bail!("select an existing .acf to modify");
                };
                let mut patcher = acfgen_acf::AcfPatcher::new(&target);
                let backup = patcher
                    .back_up()
                    .with_context(|| format!("back up {}", target.display()))?
                    .to_path_buf();
                let spliced = patcher
                    .write(&conversion.body_block, &conversion.wing_block)
                    .with_context(|| format!("patch {}", target.display()))?;
                self.backup_path = Some(backup);
                self.written_path = Some(target.clone());
                format!(
                    "Patched {} (replaced {} line(s) with {})",
                    target.display(),
                    spliced.removed_lines,
                    spliced.inserted_lines
                )
            }
            Mode::NewAircraft => {
                let Some(dir) = self.new_acf_dir.clone() else {
                    self.conversion = Some(conversion);
                    bail!("select an output folder for the new .acf");
                };
                if self.new_acf_name.trim().is_empty() {
                    self.conversion = Some(conversion);
                    bail!("enter a file name for the new .acf");
                }
                let path = dir.join(self.new_acf_name.trim());
                let name = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("NewAircraft")
                    .to_string();
                acfgen_acf::write_new_acf(
                    &path,
                    &name,
                    &conversion.body_block,
                    &conversion.wing_block,
                )
                .with_context(|| format!("write {}", path.display()))?;
                self.written_path = Some(path.clone());
                format!("Wrote {}", path.display())
            }
        };

        self.conversion = Some(conversion);
        Ok(status)
    }

    fn handle_file_drop(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().find(|f| f.path.is_some()) else {
            return;
        };
        if let Some(path) = file.path {
            self.obj_path = Some(path);
            self.conversion = None;
        }
    }
}

impl eframe::App for AcfGenApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_file_drop(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open OBJ…").clicked() {
                    self.pick_obj();
                }
                ui.separator();
                ui.radio_value(&mut self.mode, Mode::NewAircraft, "New aircraft");
                ui.radio_value(&mut self.mode, Mode::ModifyExisting, "Modify existing");
                ui.separator();
                ui.add(
                    egui::DragValue::new(&mut self.cowl_offset_deg)
                        .speed(0.1)
                        .range(-15.0..=15.0)
                        .prefix("cowl_offset_deg="),
                );
                ui.add(
                    egui::DragValue::new(&mut self.station_tolerance)
                        .speed(1e-5)
                        .range(1e-6..=0.1)
                        .prefix("station_tol="),
                );
                ui.separator();
                let ready = self.obj_path.is_some();
                if ui
                    .add_enabled(ready, egui::Button::new("Generate .acf blocks"))
                    .clicked()
                {
                    self.run_convert();
                }
            });

            ui.horizontal(|ui| match self.mode {
                Mode::ModifyExisting => {
                    if ui.button("Existing .acf…").clicked() {
                        self.pick_existing_acf();
                    }
                    if let Some(p) = &self.existing_acf {
                        ui.monospace(p.display().to_string());
                    }
                }
                Mode::NewAircraft => {
                    if ui.button("Output folder…").clicked() {
                        self.pick_new_acf_dir();
                    }
                    if let Some(p) = &self.new_acf_dir {
                        ui.monospace(p.display().to_string());
                    }
                    ui.label("Name:");
                    ui.text_edit_singleline(&mut self.new_acf_name);
                }
            });

            if let Some(p) = &self.obj_path {
                ui.label(format!("Input: {}", p.display()));
            }
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                if let Some(p) = &self.written_path {
                    if ui.button("Open folder").clicked() {
                        if let Some(dir) = p.parent() {
                            let _ = open::that(dir);
                        }
                    }
                }
                if let Some(p) = &self.backup_path {
                    ui.label(format!("Backup: {}", p.display()));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |cols| {
                cols[0].heading("Log");
                cols[0].separator();
                draw_log(&mut cols[0], self);

                cols[1].heading("Generated blocks");
                cols[1].separator();
                draw_blocks(&mut cols[1], self);
            });
        });
    }
}

fn draw_log(ui: &mut egui::Ui, app: &AcfGenApp) {
    let Some(conversion) = &app.conversion else {
        ui.label("No conversion run yet.");
        return;
    };
    egui::ScrollArea::vertical()
        .id_salt("log")
        .show(ui, |ui| {
            for msg in &conversion.report.log.messages {
                let color = match msg.level {
                    LogLevel::Info => ui.visuals().text_color(),
                    LogLevel::Warning => egui::Color32::from_rgb(200, 140, 0),
                    LogLevel::Error => egui::Color32::from_rgb(200, 40, 40),
                };
                ui.colored_label(color, format!("{}: {}", msg.code, msg.message));
            }
        });
}

fn draw_blocks(ui: &mut egui::Ui, app: &AcfGenApp) {
    let Some(conversion) = &app.conversion else {
        ui.label("Run a conversion to preview the blocks.");
        return;
    };
    ui.label(format!(
        "{} body block(s), {} wing block(s)",
        conversion.report.body_count, conversion.report.wing_count
    ));
    egui::ScrollArea::vertical()
        .id_salt("blocks")
        .show(ui, |ui| {
            ui.monospace(&conversion.body_block);
            ui.separator();
            ui.monospace(&conversion.wing_block);
        });
}

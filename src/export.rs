//! Batch export of the icon into the bundle's icons directory.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use image::{ImageError, ImageFormat, RgbaImage};
use rayon::prelude::*;

use crate::error::{IconError, Result};
use crate::icon;
use crate::manifest::{self, ICNS_FILE, ICO_FILE, ICONSET_DIR, PNG_TARGETS};

pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Turns a populated `.iconset` directory into a single `.icns` file.
pub trait IconsetPacker {
    fn pack(&self, iconset: &Path, output: &Path) -> Result<()>;
}

/// macOS `iconutil -c icns <iconset> -o <output>`.
#[derive(Debug, Clone)]
pub struct IconUtil {
    program: String,
    timeout: Duration,
}

impl Default for IconUtil {
    fn default() -> Self {
        Self { program: "iconutil".to_string(), timeout: DEFAULT_TOOL_TIMEOUT }
    }
}

impl IconUtil {
    pub fn with_program(program: impl Into<String>) -> Self {
        Self { program: program.into(), ..Self::default() }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl IconsetPacker for IconUtil {
    fn pack(&self, iconset: &Path, output: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-c").arg("icns").arg(iconset).arg("-o").arg(output)
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        log::info!("RUN: {} -c icns {} -o {}", self.program, iconset.display(), output.display());

        let mut child = cmd.spawn().map_err(|e| {
            IconError::ExternalToolUnavailable(format!("failed to start {}: {}", self.program, e))
        })?;
        let started = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(status)) if status.success() => return Ok(()),
                Ok(Some(status)) => {
                    return Err(IconError::ExternalToolUnavailable(format!("{} exited with {}", self.program, status)));
                }
                Ok(None) if started.elapsed() >= self.timeout => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(IconError::ExternalToolUnavailable(format!(
                        "{} timed out after {}s",
                        self.program,
                        self.timeout.as_secs()
                    )));
                }
                Ok(None) => thread::sleep(Duration::from_millis(50)),
                Err(e) => {
                    return Err(IconError::ExternalToolUnavailable(format!("waiting for {}: {}", self.program, e)));
                }
            }
        }
    }
}

#[derive(Debug)]
pub enum StepOutcome {
    Written(PathBuf),
    Failed(IconError),
}

impl StepOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, StepOutcome::Written(_))
    }
}

impl From<Result<PathBuf>> for StepOutcome {
    fn from(r: Result<PathBuf>) -> Self {
        match r {
            Ok(p) => StepOutcome::Written(p),
            Err(e) => StepOutcome::Failed(e),
        }
    }
}

#[derive(Debug)]
pub struct ExportReport {
    pub pngs: Vec<PathBuf>,
    pub icns: StepOutcome,
    pub ico: StepOutcome,
}

impl ExportReport {
    pub fn files_written(&self) -> usize {
        self.pngs.len() + self.icns.is_written() as usize + self.ico.is_written() as usize
    }
}

pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png).map_err(|e| match e {
        ImageError::IoError(io) => IconError::io(path, io),
        other => IconError::Image(other),
    })
}

fn render_to(size: u32, path: &Path) -> Result<()> {
    let img = icon::render(size)?;
    save_png(&img, path)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| IconError::io(dir, e))
}

/// Writes every flat PNG target. Paths come back in manifest order.
pub fn export_pngs(dir: &Path) -> Result<Vec<PathBuf>> {
    ensure_dir(dir)?;
    PNG_TARGETS
        .par_iter()
        .map(|&(name, size)| -> Result<PathBuf> {
            let path = dir.join(name);
            render_to(size, &path)?;
            Ok(path)
        })
        .collect()
}

pub fn write_iconset(staging: &Path) -> Result<()> {
    ensure_dir(staging)?;
    manifest::iconset_entries()
        .par_iter()
        .try_for_each(|(name, size)| render_to(*size, &staging.join(name)))
}

/// Stages an `.iconset`, packs it and removes the staging directory
/// whether or not packing worked.
pub fn export_icns(dir: &Path, packer: &dyn IconsetPacker) -> Result<PathBuf> {
    let staging = dir.join(ICONSET_DIR);
    let output = dir.join(ICNS_FILE);
    let result = write_iconset(&staging).and_then(|_| packer.pack(&staging, &output));
    if staging.exists() {
        if let Err(e) = fs::remove_dir_all(&staging) {
            log::warn!("could not remove {}: {}", staging.display(), e);
        }
    }
    result.map(|_| output)
}

pub fn export_ico(dir: &Path) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let mut icon_dir = IconDir::new(ResourceType::Icon);
    for &size in manifest::ICO_SIZES {
        let img = icon::render(size)?;
        let image = IconImage::from_rgba_data(size, size, img.into_raw());
        let entry = IconDirEntry::encode(&image).map_err(|e| IconError::io(format!("{}@{}px", ICO_FILE, size), e))?;
        icon_dir.add_entry(entry);
    }
    let path = dir.join(ICO_FILE);
    let file = File::create(&path).map_err(|e| IconError::io(&path, e))?;
    let mut out = BufWriter::new(file);
    icon_dir.write(&mut out).map_err(|e| IconError::io(&path, e))?;
    out.flush().map_err(|e| IconError::io(&path, e))?;
    Ok(path)
}

pub fn run(dir: &Path) -> Result<ExportReport> {
    run_with(dir, &IconUtil::default())
}

/// PNG failures abort; container failures are recorded in the report.
pub fn run_with(dir: &Path, packer: &dyn IconsetPacker) -> Result<ExportReport> {
    println!("🎨 Generating Scribe icons...");
    println!("   Output directory: {}", dir.display());
    println!();

    let pngs = export_pngs(dir)?;
    for &(name, size) in PNG_TARGETS {
        println!("   ✅ {} ({}x{})", name, size, size);
    }

    println!();
    println!("🍎 Generating macOS .icns...");
    let icns = StepOutcome::from(export_icns(dir, packer));
    report_step(ICNS_FILE, &icns);

    println!();
    println!("🪟 Generating Windows .ico...");
    let ico = StepOutcome::from(export_ico(dir));
    report_step(ICO_FILE, &ico);

    Ok(ExportReport { pngs, icns, ico })
}

fn report_step(name: &str, outcome: &StepOutcome) {
    match outcome {
        StepOutcome::Written(_) => println!("   ✅ {}", name),
        StepOutcome::Failed(e) => {
            log::warn!("{} skipped: {}", name, e);
            println!("   ⚠️  {} skipped: {}", name, e);
        }
    }
}

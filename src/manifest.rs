//! Output file names and pixel sizes for the Tauri bundle icons.

/// Flat PNGs written straight into the icons directory.
pub const PNG_TARGETS: &[(&str, u32)] = &[
    ("32x32.png", 32),
    ("128x128.png", 128),
    ("128x128@2x.png", 256),
    ("icon.png", 1024), // master
    // Windows Store / tiles
    ("Square30x30Logo.png", 30),
    ("Square44x44Logo.png", 44),
    ("Square71x71Logo.png", 71),
    ("Square89x89Logo.png", 89),
    ("Square107x107Logo.png", 107),
    ("Square142x142Logo.png", 142),
    ("Square150x150Logo.png", 150),
    ("Square284x284Logo.png", 284),
    ("Square310x310Logo.png", 310),
    ("StoreLogo.png", 50),
];

pub const ICNS_SIZES: &[u32] = &[16, 32, 64, 128, 256, 512, 1024];

/// Largest ICNS size that also gets an `@2x` variant.
pub const ICNS_MAX_2X: u32 = 512;

/// Order matters: the first entry is the primary frame.
pub const ICO_SIZES: &[u32] = &[16, 32, 48, 64, 128, 256];

pub const ICNS_FILE: &str = "icon.icns";
pub const ICO_FILE: &str = "icon.ico";
pub const ICONSET_DIR: &str = "icon.iconset";

/// `(file name, pixel size)` pairs for the `.iconset` staging directory.
pub fn iconset_entries() -> Vec<(String, u32)> {
    let mut out = Vec::new();
    for &size in ICNS_SIZES {
        out.push((format!("icon_{}x{}.png", size, size), size));
        if size <= ICNS_MAX_2X {
            out.push((format!("icon_{}x{}@2x.png", size, size), size * 2));
        }
    }
    out
}

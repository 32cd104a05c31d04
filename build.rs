use std::env;
use std::path::PathBuf;

const WATCHED_VARIABLES: [&str; 4] = ["FFMPEG_DIR", "VCPKG_ROOT", "VCPKGRS_DYNAMIC", "VCPKGRS_TRIPLET"];

fn main() {
    for variable in WATCHED_VARIABLES {
        println!("cargo:rerun-if-env-changed={variable}");
    }

    // ffmpeg-sys-next finds FFmpeg through pkg-config everywhere but Windows.
    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows"
        || env::var_os("FFMPEG_DIR").is_some()
    {
        return;
    }

    match vcpkg_ffmpeg_dir() {
        None => warn("mediathumb needs FFmpeg: set FFMPEG_DIR, or install it with vcpkg and set VCPKG_ROOT."),
        Some(dir) if dir.exists() => {
            warn(&format!(
                "using the vcpkg FFmpeg at {0}; set FFMPEG_DIR={0} to skip this lookup.",
                dir.display()
            ));
            if env::var_os("VCPKGRS_DYNAMIC").is_none() {
                warn("set VCPKGRS_DYNAMIC=1 if your vcpkg FFmpeg is a dynamic build.");
            }
        }
        Some(dir) => warn(&format!("no FFmpeg install under {}.", dir.display())),
    }
}

fn vcpkg_ffmpeg_dir() -> Option<PathBuf> {
    let root = env::var("VCPKG_ROOT").ok()?;
    let triplet = env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
    Some(PathBuf::from(root).join("installed").join(triplet))
}

fn warn(message: &str) {
    println!("cargo:warning={message}");
}

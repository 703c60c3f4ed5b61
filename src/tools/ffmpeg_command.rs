use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfmpegMode {
    /// Stream copy, metadata and chapters dropped
    Remux,
    /// Full transcode with a fixed preset, metadata dropped
    Reencode,
}

pub struct FfmpegCommand {
    program: PathBuf,
    source_path: PathBuf,
    destination_path: PathBuf,
    mode: FfmpegMode,
}

impl FfmpegCommand {
    #[must_use]
    pub fn remux(program: &Path, source_path: &Path, destination_path: &Path) -> Self {
        Self::new(program, source_path, destination_path, FfmpegMode::Remux)
    }

    #[must_use]
    pub fn reencode(program: &Path, source_path: &Path, destination_path: &Path) -> Self {
        Self::new(program, source_path, destination_path, FfmpegMode::Reencode)
    }

    fn new(program: &Path, source_path: &Path, destination_path: &Path, mode: FfmpegMode) -> Self {
        Self {
            program: program.to_path_buf(),
            source_path: source_path.to_path_buf(),
            destination_path: destination_path.to_path_buf(),
            mode,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> FfmpegMode {
        self.mode
    }

    #[must_use]
    pub fn destination_path(&self) -> &Path {
        &self.destination_path
    }

    fn destination_extension(&self) -> String {
        self.destination_path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-hide_banner",
            "-nostdin",
            "-loglevel", "error",
            "-y",
        ]
        .iter()
        .map(OsString::from)
        .collect();

        let mut input = OsString::from("file:");
        input.push(self.source_path.as_os_str());
        args.push("-i".into());
        args.push(input);

        args.extend(
            [
                "-map_metadata", "-1",
                "-map_metadata:s", "-1",
                "-map_chapters", "-1",
                "-fflags", "+bitexact",
            ]
            .iter()
            .map(OsString::from),
        );

        match self.mode {
            FfmpegMode::Remux => args.extend(["-c", "copy"].iter().map(OsString::from)),
            FfmpegMode::Reencode => args.extend(self.reencode_preset().iter().map(OsString::from)),
        }

        args.push(self.destination_path.as_os_str().to_os_string());
        args
    }

    fn reencode_preset(&self) -> Vec<&'static str> {
        let ext = self.destination_extension();
        if ext == "webm" {
            return vec![
                "-c:v", "libvpx-vp9",
                "-crf", "32",
                "-b:v", "0",
                "-c:a", "libopus",
                "-b:a", "128k",
            ];
        }

        let mut preset = vec![
            "-c:v", "libx264",
            "-preset", "medium",
            "-crf", "18",
            "-pix_fmt", "yuv420p",
            "-c:a", "aac",
            "-b:a", "192k",
        ];
        if matches!(ext.as_str(), "mp4" | "mov" | "m4v") {
            preset.extend(["-movflags", "+faststart"]);
        }
        preset
    }

    #[must_use]
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args());
        cmd
    }
}

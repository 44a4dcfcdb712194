use std::io::Write;
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use raylib::prelude::*;
use tracing::{info, warn};
use crate::error::CaptureError;

/// Pipes raw RGBA frames into an ffmpeg child that encodes them to H.264.
pub struct Ffmpeg {
    process: Child,
    stdin: Option<ChildStdin>,
    frames: u64,
}

impl Ffmpeg {
    pub fn spawn(width: i32, height: i32, fps: u32, output: &Path) -> Result<Ffmpeg, CaptureError> {
        let mut process = Command::new("ffmpeg")
            .stdin(Stdio::piped())
            .args(["-loglevel", "error"])
            .arg("-y")
            .args(["-f", "rawvideo"])
            .args(["-pixel_format", "rgba"])
            .args(["-video_size", &format!("{}x{}", width, height)])
            .args(["-framerate", &format!("{}", fps)])
            .args(["-i", "-"])
            .args(["-c:v", "libx264"])
            .args(["-pix_fmt", "yuv420p"])
            .arg(output)
            .spawn()
            .map_err(CaptureError::Spawn)?;
        let stdin = process.stdin.take().ok_or(CaptureError::NoStdin)?;
        info!(output = ?output, width, height, fps, "recording started");
        Ok(Ffmpeg { process, stdin: Some(stdin), frames: 0 })
    }

    pub fn write(&mut self, image: &Image) -> Result<(), CaptureError> {
        let stdin = self.stdin.as_mut().ok_or(CaptureError::NoStdin)?;
        let width = image.width() as usize;
        let height = image.height() as usize;
        let row_len = width * 4; // RGBA

        // SAFETY: a framebuffer readback is an uncompressed RGBA8 buffer of
        // exactly width * height * 4 bytes, alive for the borrow of `image`.
        let pixels = unsafe {
            std::slice::from_raw_parts(image.data() as *const u8, row_len * height)
        };

        // Render textures come back bottom-up, ffmpeg expects top-down
        for row in pixels.chunks_exact(row_len).rev() {
            stdin.write_all(row).map_err(CaptureError::Write)?;
        }
        self.frames += 1;
        Ok(())
    }
}

impl Drop for Ffmpeg {
    fn drop(&mut self) {
        // Closing stdin lets ffmpeg finish the file
        self.stdin = None;
        match self.process.wait() {
            Ok(status) if status.success() => info!(frames = self.frames, "recording finished"),
            Ok(status) => warn!(%status, "ffmpeg exited with an error"),
            Err(e) => warn!(error = %e, "failed to wait for ffmpeg"),
        }
    }
}

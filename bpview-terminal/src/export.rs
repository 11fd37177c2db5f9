/// Frame sequence encoders
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage};
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use bpview_core::Frame;

/// Playback interval between frames, in milliseconds
pub const FRAME_DELAY_MS: u32 = 50;

fn to_io(err: image::ImageError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}

/// Encode `frames` as an endlessly looping animated GIF
pub fn write_gif<P: AsRef<Path>>(frames: &[Frame], path: P) -> io::Result<()> {
    let file = BufWriter::new(File::create(path)?);
    let mut encoder = GifEncoder::new(file);
    encoder.set_repeat(Repeat::Infinite).map_err(to_io)?;

    for frame in frames {
        let rgba = DynamicImage::ImageRgb8(frame.clone()).into_rgba8();
        let delay = Delay::from_numer_denom_ms(FRAME_DELAY_MS, 1);
        encoder
            .encode_frame(image::Frame::from_parts(rgba, 0, 0, delay))
            .map_err(to_io)?;
    }
    Ok(())
}

/// Write each frame as `frame_NNN.png` under `dir`, returning the paths
pub fn write_pngs<P: AsRef<Path>>(frames: &[Frame], dir: P) -> io::Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(frames.len());
    for (i, frame) in frames.iter().enumerate() {
        let path = dir.join(format!("frame_{:03}.png", i));
        frame.save(&path).map_err(to_io)?;
        written.push(path);
    }
    Ok(written)
}

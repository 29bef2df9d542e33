//! The built-in job configuration: one H.264 rendition muxed into MP4 plus a
//! single-cell sprite sheet.

use std::time::Duration;

use serde_json::Map;

use crate::{
    ElementaryStream, ElementaryStreamKind, ExtractionStrategy, JobConfig, MuxStream,
    SpriteSheet, VideoCodecSettings, VideoStream,
};

pub const VIDEO_STREAM_KEY: &str = "video_stream0";
pub const MUX_STREAM_KEY: &str = "output_video0";
pub const MP4_CONTAINER: &str = "mp4";
pub const SPRITE_FILE_PREFIX: &str = "large-sprite-sheet";

/// Builds the sprite-sheet job configuration.
///
/// - `video_stream0`: H.264, 550 kbps, 60 fps, 640×360
/// - `output_video0`: MP4 containing `video_stream0`
/// - `large-sprite-sheet`: 128×72 sprites in a 1×1 grid from offset 0 at
///   quality 100, frames picked by `extraction`
pub fn sprite_sheet_job_config(extraction: ExtractionStrategy) -> JobConfig {
    JobConfig {
        elementary_streams: vec![ElementaryStream {
            key: VIDEO_STREAM_KEY.to_string(),
            kind: ElementaryStreamKind::VideoStream(VideoStream::H264(VideoCodecSettings {
                bitrate_bps: 550_000,
                frame_rate: 60.0,
                width_pixels: 640,
                height_pixels: 360,
                extra: Map::new(),
            })),
        }],
        mux_streams: vec![MuxStream {
            key: MUX_STREAM_KEY.to_string(),
            file_name: None,
            container: MP4_CONTAINER.to_string(),
            elementary_streams: vec![VIDEO_STREAM_KEY.to_string()],
            extra: Map::new(),
        }],
        sprite_sheets: vec![SpriteSheet {
            format: None,
            file_prefix: SPRITE_FILE_PREFIX.to_string(),
            sprite_width_pixels: 128,
            sprite_height_pixels: 72,
            column_count: 1,
            row_count: 1,
            start_time_offset: Duration::ZERO,
            end_time_offset: None,
            extraction,
            quality: 100,
            extra: Map::new(),
        }],
        extra: Map::new(),
    }
}

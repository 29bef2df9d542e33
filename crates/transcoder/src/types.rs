//! Job and job-configuration value types.
//!
//! These mirror the service's JSON representation: field names are camelCase,
//! enum values are `SCREAMING_SNAKE_CASE`, durations are protobuf-JSON strings
//! (`"0s"`) and timestamps are RFC 3339. Fields the client never sets are
//! omitted on the way out. Fields and enum values the model does not name are
//! kept verbatim, so a job reads back exactly as the service reported it.
//!
//! [`JobConfig::validate`] checks the invariants the service would otherwise
//! reject, so malformed configurations fail before a connection is opened.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ConfigError;
use crate::{JobName, StatusCode, StorageUri};

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

/// Lifecycle state of a job, owned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingState {
    /// Not reported (e.g. on a job that has not been submitted yet).
    #[default]
    #[serde(rename = "PROCESSING_STATE_UNSPECIFIED")]
    Unspecified,
    Pending,
    Running,
    Succeeded,
    Failed,
    /// A state this client does not know yet, as the service spelled it.
    #[serde(untagged)]
    Other(String),
}

impl ProcessingState {
    /// Returns `true` once the service will no longer change the state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

impl std::fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unspecified => "PROCESSING_STATE_UNSPECIFIED",
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::Other(s) => s.as_str(),
        };
        f.write_str(s)
    }
}

/// Error details attached to a failed job (`google.rpc.Status`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatus {
    /// Numeric canonical code.
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
    /// Structured details, kept opaque.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<Value>,
}

impl JobStatus {
    /// Returns the canonical status code.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_code(self.code)
    }
}

/// A transcoding job.
///
/// Built client-side with [`Job::new`] for submission; returned by the service
/// with `name`, `state` and the timestamps filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Full resource name, assigned by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub input_uri: String,
    #[serde(default)]
    pub output_uri: String,
    /// Set instead of `config` when the job was created from a template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<JobConfig>,
    #[serde(default, skip_serializing_if = "ProcessingState::is_unspecified")]
    pub state: ProcessingState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_after_completion_days: Option<u32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JobStatus>,
    /// Unmodelled fields (`mode`, `optimization`, `pubsubDestination`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    /// Creates an unsubmitted job reading from `input` and writing under `output`.
    pub fn new(input: &StorageUri, output: &StorageUri, config: JobConfig) -> Self {
        Self {
            name: None,
            input_uri: input.as_str().to_string(),
            output_uri: output.as_str().to_string(),
            template_id: None,
            config: Some(config),
            state: ProcessingState::Unspecified,
            create_time: None,
            start_time: None,
            end_time: None,
            ttl_after_completion_days: None,
            labels: BTreeMap::new(),
            error: None,
            extra: Map::new(),
        }
    }

    /// Returns the parsed resource name, if the service assigned a well-formed one.
    pub fn job_name(&self) -> Option<JobName> {
        self.name.as_deref().and_then(|n| n.parse().ok())
    }
}

// ---------------------------------------------------------------------------
// Job configuration
// ---------------------------------------------------------------------------

/// Declarative description of the outputs a job produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elementary_streams: Vec<ElementaryStream>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mux_streams: Vec<MuxStream>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sprite_sheets: Vec<SpriteSheet>,
    /// Unmodelled sections (`inputs`, `output`, `editList`, `manifests`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobConfig {
    /// Checks stream-key references and sprite-sheet parameters.
    ///
    /// Keys must be non-empty and unique per kind; every key a mux stream
    /// lists must name a declared elementary stream.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut declared = HashSet::new();
        for stream in &self.elementary_streams {
            if stream.key.is_empty() {
                return Err(ConfigError::EmptyKey);
            }
            if !declared.insert(stream.key.as_str()) {
                return Err(ConfigError::DuplicateElementaryStream {
                    key: stream.key.clone(),
                });
            }
        }

        let mut muxes = HashSet::new();
        for mux in &self.mux_streams {
            if mux.key.is_empty() {
                return Err(ConfigError::EmptyKey);
            }
            if !muxes.insert(mux.key.as_str()) {
                return Err(ConfigError::DuplicateMuxStream {
                    key: mux.key.clone(),
                });
            }
            if mux.elementary_streams.is_empty() {
                return Err(ConfigError::EmptyMuxStream {
                    mux: mux.key.clone(),
                });
            }
            if let Some(missing) = mux
                .elementary_streams
                .iter()
                .find(|key| !declared.contains(key.as_str()))
            {
                return Err(ConfigError::UnknownElementaryStream {
                    mux: mux.key.clone(),
                    key: missing.clone(),
                });
            }
        }

        self.sprite_sheets.iter().try_for_each(SpriteSheet::validate)
    }
}

// ---------------------------------------------------------------------------
// Elementary streams
// ---------------------------------------------------------------------------

/// A single encoded stream, referenced by mux streams through its `key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementaryStream {
    pub key: String,
    #[serde(flatten)]
    pub kind: ElementaryStreamKind,
}

/// The payload of an elementary stream, serialised as `videoStream` or `audioStream`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementaryStreamKind {
    VideoStream(VideoStream),
    AudioStream(AudioStream),
    /// Anything else (`textStream`, an unmodelled codec), kept as received.
    #[serde(untagged)]
    Other(Map<String, Value>),
}

/// Video codec selection, serialised as `{"h264": {...}}` and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStream {
    H264(VideoCodecSettings),
    H265(VideoCodecSettings),
    Vp9(VideoCodecSettings),
}

impl VideoStream {
    /// Returns the codec name as the service spells it.
    pub fn codec(&self) -> &'static str {
        match self {
            Self::H264(_) => "h264",
            Self::H265(_) => "h265",
            Self::Vp9(_) => "vp9",
        }
    }

    /// Returns the codec-independent settings.
    pub fn settings(&self) -> &VideoCodecSettings {
        match self {
            Self::H264(s) | Self::H265(s) | Self::Vp9(s) => s,
        }
    }
}

/// Encoding parameters shared by all video codecs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCodecSettings {
    pub bitrate_bps: u32,
    pub frame_rate: f64,
    #[serde(default)]
    pub width_pixels: u32,
    #[serde(default)]
    pub height_pixels: u32,
    /// Codec-specific tuning (`gopDuration`, `profile`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioStream {
    /// Codec name (`"aac"`, `"mp3"`, ...).
    pub codec: String,
    pub bitrate_bps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate_hertz: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Mux streams
// ---------------------------------------------------------------------------

/// A container-level output combining one or more elementary streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuxStream {
    pub key: String,
    /// Output file name; the service derives one from `key` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Container format (`"mp4"`, `"ts"`, `"fmp4"`, ...).
    pub container: String,
    #[serde(default)]
    pub elementary_streams: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Sprite sheets
// ---------------------------------------------------------------------------

/// How frames are picked for a sprite sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExtractionStrategy {
    /// Send neither field; the service applies its own default.
    #[default]
    ServiceDefault,
    /// Extract exactly this many sprites, evenly spaced.
    TotalCount(u32),
    /// Extract one sprite every interval.
    Interval(Duration),
}

/// Sprite-sheet extraction parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SpriteSheetWire", try_from = "SpriteSheetWire")]
pub struct SpriteSheet {
    /// Image format (`"jpeg"`); service default when absent.
    pub format: Option<String>,
    pub file_prefix: String,
    pub sprite_width_pixels: u32,
    pub sprite_height_pixels: u32,
    pub column_count: u32,
    pub row_count: u32,
    pub start_time_offset: Duration,
    pub end_time_offset: Option<Duration>,
    pub extraction: ExtractionStrategy,
    /// JPEG quality, `0..=100`.
    pub quality: u32,
    pub extra: Map<String, Value>,
}

impl SpriteSheet {
    fn validate(&self) -> Result<(), ConfigError> {
        let file_prefix = || self.file_prefix.clone();
        if self.file_prefix.is_empty() {
            return Err(ConfigError::EmptyFilePrefix);
        }
        if self.quality > 100 {
            return Err(ConfigError::SpriteQualityOutOfRange {
                file_prefix: file_prefix(),
                quality: self.quality,
            });
        }
        let dims = [
            self.sprite_width_pixels,
            self.sprite_height_pixels,
            self.column_count,
            self.row_count,
        ];
        if dims.contains(&0) {
            return Err(ConfigError::SpriteDimension {
                file_prefix: file_prefix(),
            });
        }
        match self.extraction {
            ExtractionStrategy::TotalCount(0) => {
                return Err(ConfigError::SpriteExtraction {
                    file_prefix: file_prefix(),
                })
            }
            ExtractionStrategy::Interval(d) if d.is_zero() => {
                return Err(ConfigError::SpriteExtraction {
                    file_prefix: file_prefix(),
                })
            }
            _ => {}
        }
        if matches!(self.end_time_offset, Some(end) if end <= self.start_time_offset) {
            return Err(ConfigError::SpriteTimeRange {
                file_prefix: file_prefix(),
            });
        }
        Ok(())
    }
}

/// JSON shape of a sprite sheet: the extraction strategy is a oneof of
/// `totalCount` and `interval`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpriteSheetWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    file_prefix: String,
    #[serde(default)]
    sprite_width_pixels: u32,
    #[serde(default)]
    sprite_height_pixels: u32,
    #[serde(default)]
    column_count: u32,
    #[serde(default)]
    row_count: u32,
    #[serde(
        default,
        with = "crate::duration::option",
        skip_serializing_if = "Option::is_none"
    )]
    start_time_offset: Option<Duration>,
    #[serde(
        default,
        with = "crate::duration::option",
        skip_serializing_if = "Option::is_none"
    )]
    end_time_offset: Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_count: Option<u32>,
    #[serde(
        default,
        with = "crate::duration::option",
        skip_serializing_if = "Option::is_none"
    )]
    interval: Option<Duration>,
    #[serde(default)]
    quality: u32,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<SpriteSheet> for SpriteSheetWire {
    fn from(s: SpriteSheet) -> Self {
        let (total_count, interval) = match s.extraction {
            ExtractionStrategy::ServiceDefault => (None, None),
            ExtractionStrategy::TotalCount(n) => (Some(n), None),
            ExtractionStrategy::Interval(d) => (None, Some(d)),
        };
        Self {
            format: s.format,
            file_prefix: s.file_prefix,
            sprite_width_pixels: s.sprite_width_pixels,
            sprite_height_pixels: s.sprite_height_pixels,
            column_count: s.column_count,
            row_count: s.row_count,
            start_time_offset: Some(s.start_time_offset),
            end_time_offset: s.end_time_offset,
            total_count,
            interval,
            quality: s.quality,
            extra: s.extra,
        }
    }
}

impl TryFrom<SpriteSheetWire> for SpriteSheet {
    type Error = String;

    fn try_from(w: SpriteSheetWire) -> Result<Self, Self::Error> {
        let extraction = match (w.total_count, w.interval) {
            (None, None) => ExtractionStrategy::ServiceDefault,
            (Some(n), None) => ExtractionStrategy::TotalCount(n),
            (None, Some(d)) => ExtractionStrategy::Interval(d),
            (Some(_), Some(_)) => {
                return Err(format!(
                    "sprite sheet '{}' sets both totalCount and interval",
                    w.file_prefix
                ))
            }
        };
        Ok(Self {
            format: w.format,
            file_prefix: w.file_prefix,
            sprite_width_pixels: w.sprite_width_pixels,
            sprite_height_pixels: w.sprite_height_pixels,
            column_count: w.column_count,
            row_count: w.row_count,
            start_time_offset: w.start_time_offset.unwrap_or_default(),
            end_time_offset: w.end_time_offset,
            extraction,
            quality: w.quality,
            extra: w.extra,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sprite() -> SpriteSheet {
        SpriteSheet {
            format: None,
            file_prefix: "small-sprite-sheet".to_string(),
            sprite_width_pixels: 64,
            sprite_height_pixels: 32,
            column_count: 10,
            row_count: 10,
            start_time_offset: Duration::ZERO,
            end_time_offset: None,
            extraction: ExtractionStrategy::Interval(Duration::from_secs(7)),
            quality: 80,
            extra: Map::new(),
        }
    }

    fn config() -> JobConfig {
        JobConfig {
            elementary_streams: vec![
                ElementaryStream {
                    key: "video_stream0".to_string(),
                    kind: ElementaryStreamKind::VideoStream(VideoStream::H264(
                        VideoCodecSettings {
                            bitrate_bps: 550_000,
                            frame_rate: 60.0,
                            width_pixels: 640,
                            height_pixels: 360,
                            extra: Map::new(),
                        },
                    )),
                },
                ElementaryStream {
                    key: "audio_stream0".to_string(),
                    kind: ElementaryStreamKind::AudioStream(AudioStream {
                        codec: "aac".to_string(),
                        bitrate_bps: 64_000,
                        channel_count: None,
                        sample_rate_hertz: None,
                        extra: Map::new(),
                    }),
                },
            ],
            mux_streams: vec![MuxStream {
                key: "sd".to_string(),
                file_name: None,
                container: "mp4".to_string(),
                elementary_streams: vec!["video_stream0".to_string(), "audio_stream0".to_string()],
                extra: Map::new(),
            }],
            sprite_sheets: vec![sprite()],
            extra: Map::new(),
        }
    }

    #[test]
    fn config_serialises_in_service_shape() {
        let value = serde_json::to_value(config()).unwrap();
        assert_eq!(
            value["elementaryStreams"][0],
            json!({
                "key": "video_stream0",
                "videoStream": {
                    "h264": {
                        "bitrateBps": 550000,
                        "frameRate": 60.0,
                        "widthPixels": 640,
                        "heightPixels": 360
                    }
                }
            })
        );
        assert_eq!(
            value["elementaryStreams"][1]["audioStream"],
            json!({ "codec": "aac", "bitrateBps": 64000 })
        );
        assert_eq!(
            value["muxStreams"][0],
            json!({
                "key": "sd",
                "container": "mp4",
                "elementaryStreams": ["video_stream0", "audio_stream0"]
            })
        );
        assert_eq!(
            value["spriteSheets"][0],
            json!({
                "filePrefix": "small-sprite-sheet",
                "spriteWidthPixels": 64,
                "spriteHeightPixels": 32,
                "columnCount": 10,
                "rowCount": 10,
                "startTimeOffset": "0s",
                "interval": "7s",
                "quality": 80
            })
        );
    }

    #[test]
    fn sprite_sheet_extraction_maps_to_oneof_fields() {
        let mut sheet = sprite();
        sheet.extraction = ExtractionStrategy::TotalCount(4);
        let value = serde_json::to_value(&sheet).unwrap();
        assert_eq!(value["totalCount"], json!(4));
        assert!(value.get("interval").is_none());

        sheet.extraction = ExtractionStrategy::ServiceDefault;
        let value = serde_json::to_value(&sheet).unwrap();
        assert!(value.get("totalCount").is_none());
        assert!(value.get("interval").is_none());
    }

    #[test]
    fn sprite_sheet_rejects_both_extraction_fields() {
        let raw = json!({
            "filePrefix": "s",
            "totalCount": 2,
            "interval": "3s"
        });
        let err = serde_json::from_value::<SpriteSheet>(raw).unwrap_err();
        assert!(err.to_string().contains("both totalCount and interval"));
    }

    #[test]
    fn job_decodes_service_response() {
        let raw = json!({
            "name": "projects/123/locations/us-central1/jobs/job-123",
            "inputUri": "gs://b/in.mp4",
            "outputUri": "gs://b/out/",
            "state": "FAILED",
            "createTime": "2024-03-01T10:00:00.123456Z",
            "startTime": "2024-03-01T10:00:05Z",
            "endTime": "2024-03-01T10:01:00Z",
            "ttlAfterCompletionDays": 30,
            "mode": "PROCESSING_MODE_INTERACTIVE",
            "config": {
                "elementaryStreams": [{
                    "key": "video_stream0",
                    "videoStream": { "h264": {
                        "bitrateBps": 550000,
                        "frameRate": 60,
                        "widthPixels": 640,
                        "heightPixels": 360,
                        "gopDuration": "3s",
                        "profile": "high"
                    }}
                }],
                "muxStreams": [{
                    "key": "output_video0",
                    "container": "mp4",
                    "elementaryStreams": ["video_stream0"]
                }],
                "spriteSheets": [{
                    "format": "jpeg",
                    "filePrefix": "large-sprite-sheet",
                    "spriteWidthPixels": 128,
                    "spriteHeightPixels": 72,
                    "columnCount": 1,
                    "rowCount": 1,
                    "startTimeOffset": "0s",
                    "quality": 100
                }]
            },
            "error": { "code": 3, "message": "Input file is not readable" }
        });
        let job: Job = serde_json::from_value(raw).unwrap();

        assert_eq!(job.state, ProcessingState::Failed);
        assert_eq!(job.extra["mode"], json!("PROCESSING_MODE_INTERACTIVE"));
        assert!(job.state.is_terminal());
        assert_eq!(job.job_name().unwrap().job_id().as_str(), "job-123");
        assert_eq!(job.ttl_after_completion_days, Some(30));
        assert!(job.start_time.unwrap() < job.end_time.unwrap());

        let status = job.error.as_ref().unwrap();
        assert_eq!(status.status_code(), StatusCode::InvalidArgument);

        let config = job.config.unwrap();
        config.validate().unwrap();
        let sheet = &config.sprite_sheets[0];
        assert_eq!(sheet.format.as_deref(), Some("jpeg"));
        assert_eq!(sheet.extraction, ExtractionStrategy::ServiceDefault);
        match &config.elementary_streams[0].kind {
            ElementaryStreamKind::VideoStream(video) => {
                assert_eq!(video.codec(), "h264");
                assert_eq!(video.settings().frame_rate, 60.0);
                assert_eq!(video.settings().extra["gopDuration"], json!("3s"));
            }
            other => panic!("unexpected stream {other:?}"),
        }
    }

    #[test]
    fn job_with_unmodelled_streams_and_state_decodes() {
        let raw = json!({
            "name": "projects/p/locations/us-central1/jobs/j1",
            "inputUri": "gs://b/in.mp4",
            "outputUri": "gs://b/out/",
            "state": "CANCELLED",
            "config": {
                "elementaryStreams": [
                    {
                        "key": "video_stream0",
                        "videoStream": { "h264": { "bitrateBps": 550000, "frameRate": 60 } }
                    },
                    { "key": "sub0", "textStream": { "codec": "webvtt" } },
                    { "key": "v1", "videoStream": { "av1": { "bitrateBps": 1 } } }
                ],
                "muxStreams": [{
                    "key": "subs",
                    "container": "vtt",
                    "elementaryStreams": ["sub0"]
                }]
            }
        });
        let job: Job = serde_json::from_value(raw).unwrap();

        assert_eq!(job.state, ProcessingState::Other("CANCELLED".to_string()));
        assert_eq!(job.state.to_string(), "CANCELLED");
        assert!(!job.state.is_terminal());

        let config = job.config.as_ref().unwrap();
        assert!(matches!(
            config.elementary_streams[0].kind,
            ElementaryStreamKind::VideoStream(VideoStream::H264(_))
        ));
        match &config.elementary_streams[1].kind {
            ElementaryStreamKind::Other(body) => {
                assert_eq!(body["textStream"], json!({ "codec": "webvtt" }));
            }
            other => panic!("unexpected stream {other:?}"),
        }
        assert!(matches!(
            config.elementary_streams[2].kind,
            ElementaryStreamKind::Other(_)
        ));
        config.validate().unwrap();

        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["state"], json!("CANCELLED"));
        assert_eq!(
            value["config"]["elementaryStreams"][1],
            json!({ "key": "sub0", "textStream": { "codec": "webvtt" } })
        );
        assert_eq!(
            value["config"]["elementaryStreams"][2],
            json!({ "key": "v1", "videoStream": { "av1": { "bitrateBps": 1 } } })
        );
    }

    #[test]
    fn job_reserialises_unmodelled_fields() {
        let raw = json!({
            "name": "projects/p/locations/us-central1/jobs/j1",
            "inputUri": "gs://b/in.mp4",
            "outputUri": "gs://b/out/",
            "state": "RUNNING",
            "mode": "PROCESSING_MODE_INTERACTIVE",
            "optimization": "AUTODETECT",
            "batchModePriority": 10,
            "config": {
                "inputs": [{ "key": "input0", "uri": "gs://b/in.mp4" }],
                "output": { "uri": "gs://b/out/" },
                "editList": [{ "key": "atom0", "inputs": ["input0"] }],
                "pubsubDestination": { "topic": "projects/p/topics/t" },
                "muxStreams": [{
                    "key": "sd",
                    "container": "mp4",
                    "elementaryStreams": ["video_stream0"],
                    "segmentSettings": { "segmentDuration": "6s" }
                }],
                "elementaryStreams": [{
                    "key": "video_stream0",
                    "videoStream": { "h264": {
                        "bitrateBps": 550000,
                        "frameRate": 60.0,
                        "widthPixels": 640,
                        "heightPixels": 360,
                        "profile": "high"
                    }}
                }],
                "spriteSheets": [{
                    "filePrefix": "s",
                    "spriteWidthPixels": 128,
                    "spriteHeightPixels": 72,
                    "columnCount": 1,
                    "rowCount": 1,
                    "startTimeOffset": "0s",
                    "quality": 100,
                    "spriteSheetFormat": "jpeg"
                }]
            }
        });
        let job: Job = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&job).unwrap(), raw);
    }

    #[test]
    fn unsubmitted_job_omits_service_fields() {
        let job = Job::new(
            &StorageUri::new("gs://b/in.mp4").unwrap(),
            &StorageUri::new("gs://b/out/").unwrap(),
            JobConfig::default(),
        );
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(
            value,
            json!({ "inputUri": "gs://b/in.mp4", "outputUri": "gs://b/out/", "config": {} })
        );
        assert!(job.job_name().is_none());
    }

    #[test]
    fn validate_accepts_well_formed_config() {
        assert_eq!(config().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_dangling_mux_reference() {
        let mut cfg = config();
        cfg.mux_streams[0].elementary_streams.push("video_stream9".to_string());
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::UnknownElementaryStream {
                mux: "sd".to_string(),
                key: "video_stream9".to_string(),
            })
        );
    }

    #[test]
    fn validate_rejects_duplicate_and_empty_keys() {
        let mut cfg = config();
        cfg.elementary_streams[1].key = "video_stream0".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::DuplicateElementaryStream { .. })
        ));

        let mut cfg = config();
        cfg.mux_streams.push(cfg.mux_streams[0].clone());
        assert!(matches!(cfg.validate(), Err(ConfigError::DuplicateMuxStream { .. })));

        let mut cfg = config();
        cfg.mux_streams[0].key.clear();
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyKey));

        let mut cfg = config();
        cfg.mux_streams[0].elementary_streams.clear();
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyMuxStream { .. })));
    }

    #[test]
    fn validate_rejects_bad_sprite_parameters() {
        let with = |f: fn(&mut SpriteSheet)| {
            let mut cfg = config();
            f(&mut cfg.sprite_sheets[0]);
            cfg.validate()
        };

        assert!(matches!(
            with(|s| s.quality = 101),
            Err(ConfigError::SpriteQualityOutOfRange { quality: 101, .. })
        ));
        assert!(matches!(
            with(|s| s.row_count = 0),
            Err(ConfigError::SpriteDimension { .. })
        ));
        assert!(matches!(
            with(|s| s.extraction = ExtractionStrategy::TotalCount(0)),
            Err(ConfigError::SpriteExtraction { .. })
        ));
        assert!(matches!(
            with(|s| s.extraction = ExtractionStrategy::Interval(Duration::ZERO)),
            Err(ConfigError::SpriteExtraction { .. })
        ));
        assert!(matches!(
            with(|s| {
                s.start_time_offset = Duration::from_secs(5);
                s.end_time_offset = Some(Duration::from_secs(5));
            }),
            Err(ConfigError::SpriteTimeRange { .. })
        ));
        assert_eq!(with(|s| s.file_prefix.clear()), Err(ConfigError::EmptyFilePrefix));
        assert_eq!(with(|s| s.quality = 100), Ok(()));
    }
}

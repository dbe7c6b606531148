/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

use serde::{Deserialize, Serialize};

/// Video codecs this layer can request during negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoCodec {
    #[serde(rename = "h264")]
    H264,
    #[serde(rename = "vp8")]
    Vp8,
}

impl VideoCodec {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoCodec::H264 => "h264",
            VideoCodec::Vp8 => "vp8",
        }
    }
}

impl std::fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Codec choice for a session, with the reason it was made.
///
/// H264 is preferred when the platform asserts hardware decode support (less
/// CPU and battery on multi-party calls); VP8 is the universal fallback that
/// every endpoint can decode in software.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodecPreference {
    pub primary: VideoCodec,
    pub hardware_decode: bool,
}

impl CodecPreference {
    /// The codec to fall back to if the primary cannot be negotiated.
    pub fn fallback(&self) -> VideoCodec {
        VideoCodec::Vp8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_as_str() {
        assert_eq!(VideoCodec::H264.as_str(), "h264");
        assert_eq!(VideoCodec::Vp8.as_str(), "vp8");
    }

    #[test]
    fn test_codec_serde_rename() {
        assert_eq!(serde_json::to_string(&VideoCodec::H264).unwrap(), "\"h264\"");
        assert_eq!(serde_json::to_string(&VideoCodec::Vp8).unwrap(), "\"vp8\"");
    }

    #[test]
    fn test_fallback_is_always_vp8() {
        let hw = CodecPreference {
            primary: VideoCodec::H264,
            hardware_decode: true,
        };
        let sw = CodecPreference {
            primary: VideoCodec::Vp8,
            hardware_decode: false,
        };
        assert_eq!(hw.fallback(), VideoCodec::Vp8);
        assert_eq!(sw.fallback(), VideoCodec::Vp8);
    }
}

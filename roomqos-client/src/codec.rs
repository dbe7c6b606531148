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
 */

//! Codec selection based on hardware decode capability.

use roomqos_types::{CodecPreference, VideoCodec};

/// H264 when hardware decode is available, VP8 otherwise.
pub fn preferred_codec(hardware_decode_available: bool) -> VideoCodec {
    if hardware_decode_available {
        VideoCodec::H264
    } else {
        VideoCodec::Vp8
    }
}

/// Full preference record for negotiation, carrying the rationale alongside
/// the chosen codec.
pub fn codec_preference(hardware_decode_available: bool) -> CodecPreference {
    CodecPreference {
        primary: preferred_codec(hardware_decode_available),
        hardware_decode: hardware_decode_available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hardware_decode_prefers_h264() {
        assert_eq!(preferred_codec(true), VideoCodec::H264);
    }

    #[test]
    fn test_software_only_prefers_vp8() {
        assert_eq!(preferred_codec(false), VideoCodec::Vp8);
    }

    #[test]
    fn test_preference_records_rationale() {
        let pref = codec_preference(true);
        assert_eq!(pref.primary, VideoCodec::H264);
        assert!(pref.hardware_decode);
        assert_eq!(pref.fallback(), VideoCodec::Vp8);
    }
}

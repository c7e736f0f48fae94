//! services/api/src/audio.rs
//!
//! WAV container construction for synthesized speech, plus the
//! content-addressed naming scheme for generated audio files.

use hound::{SampleFormat, WavSpec, WavWriter};
use sha2::{Digest, Sha256};

use newsdesk_core::domain::VoiceChoice;

/// The fixed sample rate the speech provider returns PCM at.
pub const TTS_SAMPLE_RATE: u32 = 24_000;

/// Encodes raw mono 16-bit PCM samples as a self-contained WAV byte
/// stream: the canonical 44-byte RIFF/WAVE header followed by the
/// little-endian sample data. Pure function, no I/O.
pub fn pcm_to_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, hound::Error> {
    let mut cursor = std::io::Cursor::new(Vec::new());

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::new(&mut cursor, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    Ok(cursor.into_inner())
}

/// Content address for one (voice, text) synthesis request. Re-requesting
/// the same text with the same voice resolves to the same file, so the
/// generated-audio directory deduplicates instead of accumulating.
pub fn content_key(voice: VoiceChoice, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(voice.label().as_bytes());
    hasher.update(b"\n");
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;

    #[test]
    fn wav_output_is_header_plus_samples() {
        for n in [0usize, 1, 7, 2400] {
            let samples: Vec<i16> = (0..n).map(|i| (i as i16).wrapping_mul(257)).collect();
            let wav = pcm_to_wav(&samples, TTS_SAMPLE_RATE).unwrap();
            assert_eq!(wav.len(), 44 + 2 * n, "n={n}");
            assert_eq!(&wav[0..4], b"RIFF");
            assert_eq!(&wav[8..12], b"WAVE");
            assert_eq!(&wav[12..16], b"fmt ");
            assert_eq!(&wav[36..40], b"data");
        }
    }

    #[test]
    fn wav_header_fields_are_canonical_pcm() {
        let samples = vec![0i16; 100];
        let wav = pcm_to_wav(&samples, TTS_SAMPLE_RATE).unwrap();
        let u16_at = |i: usize| u16::from_le_bytes([wav[i], wav[i + 1]]);
        let u32_at = |i: usize| u32::from_le_bytes([wav[i], wav[i + 1], wav[i + 2], wav[i + 3]]);

        assert_eq!(u32_at(4), 36 + 200); // RIFF chunk size
        assert_eq!(u32_at(16), 16); // fmt chunk size
        assert_eq!(u16_at(20), 1); // format tag = PCM
        assert_eq!(u16_at(22), 1); // channels
        assert_eq!(u32_at(24), TTS_SAMPLE_RATE);
        assert_eq!(u32_at(28), TTS_SAMPLE_RATE * 2); // byte rate
        assert_eq!(u16_at(32), 2); // block align
        assert_eq!(u16_at(34), 16); // bits per sample
        assert_eq!(u32_at(40), 200); // data chunk size
    }

    #[test]
    fn wav_round_trips_through_a_standard_reader() {
        let samples: Vec<i16> = vec![0, 1, -1, i16::MAX, i16::MIN, 12345, -12345];
        let wav = pcm_to_wav(&samples, TTS_SAMPLE_RATE).unwrap();

        let reader = WavReader::new(std::io::Cursor::new(wav)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, TTS_SAMPLE_RATE);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, SampleFormat::Int);

        let decoded: Vec<i16> = reader.into_samples().map(|s| s.unwrap()).collect();
        assert_eq!(decoded, samples);
    }

    #[test]
    fn content_key_is_stable_and_voice_sensitive() {
        let a = content_key(VoiceChoice::Female, "hello");
        assert_eq!(a, content_key(VoiceChoice::Female, "hello"));
        assert_ne!(a, content_key(VoiceChoice::Male, "hello"));
        assert_ne!(a, content_key(VoiceChoice::Female, "hello there"));
        assert_eq!(a.len(), 16);
    }
}

//! RIFF writing, PCM packing and payload lookup.

use std::io::{self, Write};

use super::format::WavFormat;

/// Size of the canonical header written by [`write_wav`].
pub const HEADER_LEN: usize = 44;

/// Writes a complete WAV file.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = pcm_data.len() as u32;
    // RIFF size excludes the 8-byte RIFF chunk header.
    let riff_size = (HEADER_LEN as u32 - 8) + data_size;

    writer.write_all(b"RIFF")?;
    writer.write_all(&riff_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?; // PCM
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)
}

/// Writes a WAV file into a fresh byte vector.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(HEADER_LEN + pcm_data.len());
    write_wav(&mut buffer, format, pcm_data).expect("writing to Vec should not fail");
    buffer
}

/// Packs samples as little-endian 16-bit PCM, the WAV payload byte order.
pub fn samples_to_pcm16_le(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// Finds the `data` chunk payload of a WAV file.
///
/// Walks the chunk list after the `RIFF`/`WAVE` preamble, honoring the
/// word-alignment pad byte of odd-sized chunks.
pub fn pcm_data(wav: &[u8]) -> Option<&[u8]> {
    if wav.get(0..4)? != b"RIFF" || wav.get(8..12)? != b"WAVE" {
        return None;
    }

    let mut rest = &wav[12..];
    while rest.len() >= 8 {
        let (id, size) = rest.split_at(4);
        let size = u32::from_le_bytes([size[0], size[1], size[2], size[3]]) as usize;
        let body = &rest[8..];
        if id == b"data" {
            return body.get(..size);
        }
        let skip = size + (size & 1);
        rest = body.get(skip..)?;
    }
    None
}

/// BLAKE3 hex digest of the PCM payload of a WAV file.
pub fn pcm_hash(wav: &[u8]) -> Option<String> {
    pcm_data(wav).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}

//! End-to-end tests: parameter text in, PCM and WAV out.

use std::io::Read;

use pretty_assertions::assert_eq;
use sfxkit_backend_audio::wav::{pcm_data, pcm_hash};
use sfxkit_backend_audio::{
    EngineState, EnvelopeStage, StopReason, SynthOptions, SynthesisEngine, SAMPLE_RATE,
};
use sfxkit_spec::{ParameterFormat, ParameterSet, Preset, WaveShape};

const COIN: &str = "0,,0.0736,0.4591,0.3858,0.5416,,,,,,0.5273,0.5732,,,,,,1,,,,,0.5";

fn coin() -> ParameterSet {
    ParameterSet::parse(COIN.as_bytes(), ParameterFormat::Text).unwrap()
}

#[test]
fn test_coin_text_to_sound() {
    let params = coin();
    assert_eq!(params.wave_shape, WaveShape::Square);
    assert_eq!(params.sustain_time, f64::from(0.0736_f32));
    assert_eq!(params.sustain_punch, f64::from(0.4591_f32));
    assert_eq!(params.decay_time, f64::from(0.3858_f32));
    assert_eq!(params.start_frequency, f64::from(0.5416_f32));
    assert_eq!(params.master_volume, 0.5);

    let engine = SynthesisEngine::with_seed(&params, 0);
    let state = EngineState::derive_all(&params, &mut rand::thread_rng());
    assert_eq!(
        engine.num_samples(),
        state.envelope().full_length() as usize
    );
    assert!(engine.samples().iter().all(|s| s.unsigned_abs() <= 32_000));
    assert!(engine.samples().iter().any(|s| *s != 0));
}

#[test]
fn test_same_seed_is_byte_identical() {
    for preset in Preset::ALL {
        let a = SynthesisEngine::with_seed(&preset.params(), 1234);
        let b = SynthesisEngine::with_seed(&preset.params(), 1234);
        assert_eq!(a.pcm(), b.pcm(), "{preset}");
    }
}

#[test]
fn test_cursor_reads_whole_sound_once() {
    let engine = SynthesisEngine::with_seed(&Preset::Laser.params(), 9);
    let mut cursor = engine.cursor();

    let mut chunk = [0u8; 1000];
    let mut collected = Vec::new();
    loop {
        let n = cursor.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        collected.extend_from_slice(&chunk[..n]);
    }

    assert_eq!(collected, engine.pcm());
    assert!(cursor.is_finished());
    assert_eq!(cursor.remaining(), 0);

    cursor.stop();
    assert_eq!(cursor.position(), 0);
    assert_eq!(cursor.remaining(), engine.pcm().len());
}

#[test]
fn test_cursor_outlives_engine_and_crosses_threads() {
    let engine = SynthesisEngine::with_seed(&Preset::Coin.params(), 2);
    let expected = engine.pcm().to_vec();
    let mut cursor = engine.cursor();
    drop(engine);

    let handle = std::thread::spawn(move || {
        let mut out = Vec::new();
        cursor.read_to_end(&mut out).unwrap();
        out
    });
    assert_eq!(handle.join().unwrap(), expected);
}

#[test]
fn test_wav_export() {
    let engine = SynthesisEngine::with_seed(&Preset::Explosion.params(), 5);
    let wav = engine.to_wav();

    assert_eq!(&wav.wav_data[0..4], b"RIFF");
    assert_eq!(&wav.wav_data[8..12], b"WAVE");
    assert_eq!(wav.sample_rate, SAMPLE_RATE);
    assert_eq!(wav.num_samples, engine.num_samples());
    assert_eq!(wav.pcm_hash.len(), 64);
    assert_eq!(pcm_hash(&wav.wav_data), Some(wav.pcm_hash.clone()));

    let payload = pcm_data(&wav.wav_data).unwrap();
    assert_eq!(payload.len(), engine.pcm().len());
    for (i, sample) in engine.samples().iter().enumerate() {
        assert_eq!(i16::from_le_bytes([payload[i * 2], payload[i * 2 + 1]]), *sample);
    }
}

#[test]
fn test_noise_engines_differ_only_in_noise() {
    let params = Preset::Explosion.params();
    let a = SynthesisEngine::with_seed(&params, 100);
    let b = SynthesisEngine::with_seed(&params, 200);
    assert_eq!(a.num_samples(), b.num_samples());
    assert_eq!(a.stop_reason(), b.stop_reason());
    assert_ne!(a.samples(), b.samples());
}

#[test]
fn test_envelope_runs_through_every_stage() {
    let params = ParameterSet {
        master_volume: 0.5,
        attack_time: 0.1,
        sustain_time: 0.1,
        sustain_punch: 0.5,
        decay_time: 0.1,
        start_frequency: 0.4,
        low_pass_cutoff: 1.0,
        ..Default::default()
    };
    let mut state = EngineState::derive_all(&params, &mut rand::thread_rng());
    let mut rng = rand::thread_rng();
    let mut stages = vec![state.envelope().stage().index()];
    loop {
        let step = state.advance(&mut rng);
        let index = state.envelope().stage().index();
        if stages.last() != Some(&index) {
            stages.push(index);
        }
        if step.finished {
            break;
        }
    }
    assert_eq!(stages, vec![0, 1, 2, 3]);
    assert_eq!(state.envelope().stage(), EnvelopeStage::Finished);
}

#[test]
fn test_capped_render() {
    let options = SynthOptions::default().with_seed(1).with_max_samples(1000);
    let engine = SynthesisEngine::with_options(&Preset::Siren.params(), &options).unwrap();
    assert_eq!(engine.num_samples(), 1000);
    assert_eq!(engine.stop_reason(), StopReason::SampleCap);
}

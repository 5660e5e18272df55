// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::config::ModelConfig;
use crate::error::KernelError;
use crate::fxp::qformat::QFormat;
use crate::replay::{decode_log, encode_log, prove, replay, replay_and_hash, LogHeader};
use crate::sgd::Hyperparams;
use crate::snapshot::encode_state;
use crate::state::command::Command;
use crate::state::model::ModelState;
use crate::synth::{LinearTarget, Pcg32, MAX_RANGE};
use crate::types::scalar::FxpScalar;
use crate::types::vector::FxpVector;
use crate::verify::{model_state_hash, snapshot_hash};

const N: usize = 3;

/// Hyperparameters first, then `steps` training samples.
fn session(seed: u64, steps: usize) -> (QFormat, Vec<Command<N>>) {
    let config = ModelConfig::default();
    let fmt = config.format().unwrap();
    let target = LinearTarget::new([1.0, -2.0, 0.5], 0.25, 1.5);
    let mut rng = Pcg32::new(seed);

    let mut commands = vec![Command::SetHyperparams(config.hyperparams().unwrap())];
    commands.extend(target.train_commands(&fmt, &mut rng, steps));
    commands.push(Command::Infer {
        x: FxpVector::from_raw([fmt.encode(0.5).0, 0, fmt.encode(-1.0).0]),
    });
    (fmt, commands)
}

fn run(fmt: QFormat, commands: &[Command<N>]) -> ModelState<N> {
    let mut model = ModelState::<N>::new(fmt, Hyperparams::default());
    for cmd in commands {
        model.apply(cmd);
    }
    model
}

#[test]
fn test_determinism_harness() {
    let (fmt, commands) = session(42, 200);
    let hash1 = model_state_hash(&run(fmt, &commands));
    let hash2 = model_state_hash(&run(fmt, &commands));
    assert_eq!(hash1, hash2, "same commands must give the same state");

    let (_, other) = session(43, 200);
    assert_ne!(hash1, model_state_hash(&run(fmt, &other)));
}

#[test]
fn test_log_roundtrip() {
    let (fmt, mut commands) = session(5, 10);
    commands.push(Command::LoadWeights {
        weights: FxpVector::from_raw([1, -1, i32::MAX]),
        bias: FxpScalar::MIN,
    });

    let bytes = encode_log(&fmt, &commands).unwrap();
    let (header, decoded) = decode_log::<N>(&bytes).unwrap();
    assert_eq!(header, LogHeader::new(fmt, N));
    assert_eq!(decoded, commands);
}

#[test]
fn test_replay_from_empty_snapshot() {
    let (fmt, commands) = session(42, 200);
    let expected = model_state_hash(&run(fmt, &commands));

    let log = encode_log(&fmt, &commands).unwrap();
    assert_eq!(replay_and_hash::<N>(&[], &log).unwrap(), expected);
}

#[test]
fn test_replay_resumes_from_snapshot() {
    let (fmt, commands) = session(8, 300);
    let expected = model_state_hash(&run(fmt, &commands));

    let (head, tail) = commands.split_at(120);
    let snapshot = encode_state(&run(fmt, head)).unwrap();
    let log = encode_log(&fmt, tail).unwrap();

    let resumed = replay::<N>(&snapshot, &log).unwrap();
    assert_eq!(model_state_hash(&resumed), expected);
    assert_eq!(resumed.version(), commands.len() as u64);
}

#[test]
fn test_empty_log_is_noop() {
    let (fmt, commands) = session(1, 20);
    let model = run(fmt, &commands);
    let snapshot = encode_state(&model).unwrap();
    assert_eq!(replay_and_hash::<N>(&snapshot, &[]).unwrap(), model_state_hash(&model));
}

#[test]
fn test_replay_rejects_mismatches() {
    let (fmt, commands) = session(1, 4);
    let snapshot = encode_state(&run(fmt, &commands)).unwrap();

    let q8_8 = QFormat::new(16, 8).unwrap();
    let log = encode_log::<N>(&q8_8, &[]).unwrap();
    assert!(matches!(
        replay::<N>(&snapshot, &log),
        Err(KernelError::FormatMismatch { found_width: 16, .. })
    ));

    let log = encode_log(&fmt, &commands).unwrap();
    assert!(matches!(
        replay::<2>(&[], &log),
        Err(KernelError::DimensionMismatch { expected: 2, found: 3 })
    ));

    let mut bad = encode_log::<N>(&fmt, &[]).unwrap();
    bad.push(9);
    assert!(matches!(replay::<N>(&[], &bad), Err(KernelError::InvalidRecord(9))));

    let mut truncated = encode_log(&fmt, &commands).unwrap();
    truncated.pop();
    assert!(matches!(replay::<N>(&[], &truncated), Err(KernelError::IoError(_))));
}

#[test]
fn test_training_proof() {
    let (fmt, commands) = session(42, 50);
    let (head, tail) = commands.split_at(10);
    let snapshot = encode_state(&run(fmt, head)).unwrap();
    let log = encode_log(&fmt, tail).unwrap();

    let proof = prove::<N>(&snapshot, &log).unwrap();
    assert_eq!(proof.commands, tail.len() as u64);
    assert_eq!(proof.n_features, N as u32);
    assert_eq!(proof.snapshot_hash, snapshot_hash(&snapshot));
    assert_eq!(proof.final_state_hash, model_state_hash(&run(fmt, &commands)));

    let fresh = prove::<N>(&[], &log).unwrap();
    assert_eq!(fresh.snapshot_hash, [0u8; 32]);
    assert_eq!(fresh.log_hash, proof.log_hash);
}

#[test]
fn test_sampling_range_is_clamped() {
    let mut rng = Pcg32::new(1);
    for _ in 0..64 {
        let x = rng.next_symmetric(3_000_000.0);
        assert!(x.abs() <= MAX_RANGE);
        assert!(rng.next_symmetric(f64::INFINITY).is_finite());
    }
    assert_eq!(rng.next_symmetric(f64::NAN), 0.0);
    assert_eq!(rng.next_symmetric(-5.0), 0.0);

    // Oversized ranges still sample; the encoded words wrap, nothing panics.
    let target = LinearTarget::new([1.0], 0.0, 3_000_000.0);
    let _ = target.sample(&QFormat::Q16_16, &mut Pcg32::new(1));
}

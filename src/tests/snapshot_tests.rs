// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::config::{ModelConfig, DEFAULT_SATURATION_STREAK};
use crate::error::KernelError;
use crate::fxp::ops::from_f64;
use crate::fxp::qformat::QFormat;
use crate::sgd::Hyperparams;
use crate::snapshot::encode::{encoded_len, HEADER_SIZE};
use crate::snapshot::pack::{pack, packed_len, unpack};
use crate::snapshot::{checksum, decode_state, encode_state, read_from, read_header, write_to};
use crate::state::command::Command;
use crate::state::model::ModelState;
use crate::types::scalar::FxpScalar;
use crate::types::vector::FxpVector;
use crate::verify::model_state_hash;

fn trained_model() -> ModelState<2> {
    let mut model = ModelState::<2>::new(QFormat::Q16_16, Hyperparams::new(from_f64(0.05), from_f64(0.001)));
    let x = FxpVector::from_raw([from_f64(1.5).0, from_f64(-0.5).0]);
    for _ in 0..5 {
        model.apply(&Command::Train { x, y_true: from_f64(2.0) });
    }
    model
}

#[test]
fn test_snapshot_restore() {
    let model = trained_model();
    let bytes = encode_state(&model).unwrap();
    assert_eq!(bytes.len(), encoded_len(2));

    let restored = decode_state::<2>(&bytes).unwrap();
    assert_eq!(restored.weights(), model.weights());
    assert_eq!(restored.bias(), model.bias());
    assert_eq!(restored.hyperparams(), model.hyperparams());
    assert_eq!(restored.version(), 5);
    assert_eq!(restored.format(), QFormat::Q16_16);
    assert_eq!(model_state_hash(&restored), model_state_hash(&model));
}

#[test]
fn test_read_header() {
    let bytes = encode_state(&trained_model()).unwrap();
    let header = read_header(&bytes).unwrap();
    assert_eq!(header.n_features, 2);
    assert_eq!(header.format, QFormat::Q16_16);
    assert_eq!(header.version, 5);
}

#[test]
fn test_invalid_magic() {
    let mut bytes = encode_state(&trained_model()).unwrap();
    bytes[0] = b'X';
    assert!(matches!(decode_state::<2>(&bytes), Err(KernelError::InvalidMagic)));
}

#[test]
fn test_corruption_detected() {
    let mut bytes = encode_state(&trained_model()).unwrap();
    bytes[HEADER_SIZE + 12] ^= 0x01;
    assert!(matches!(
        decode_state::<2>(&bytes),
        Err(KernelError::ChecksumMismatch { .. })
    ));
}

#[test]
fn test_dimension_and_length_checks() {
    let bytes = encode_state(&trained_model()).unwrap();
    assert!(matches!(
        decode_state::<3>(&bytes),
        Err(KernelError::DimensionMismatch { expected: 3, found: 2 })
    ));
    assert!(matches!(
        decode_state::<2>(&bytes[..bytes.len() - 1]),
        Err(KernelError::InvalidPayloadLength { .. })
    ));
    assert!(matches!(
        read_header(&bytes[..8]),
        Err(KernelError::InvalidPayloadLength { .. })
    ));
}

#[test]
fn test_out_of_range_word_rejected() {
    let q8_8 = QFormat::new(16, 8).unwrap();
    let model = ModelState::<1>::new(q8_8, Hyperparams::new(q8_8.encode(0.5), FxpScalar::ZERO));
    let mut bytes = encode_state(&model).unwrap();

    // Plant a weight a 16-bit register cannot hold, then re-seal the CRC.
    let weight_at = HEADER_SIZE + 12;
    bytes[weight_at..weight_at + 4].copy_from_slice(&40_000i32.to_le_bytes());
    let body_len = bytes.len() - 8;
    let crc = checksum(&bytes[..body_len]);
    bytes[body_len..].copy_from_slice(&crc.to_le_bytes());

    assert!(matches!(
        decode_state::<1>(&bytes),
        Err(KernelError::ValueOutOfRange(40_000))
    ));
}

#[test]
fn test_snapshot_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.snap");
    let model = trained_model();

    write_to(&path, &model).unwrap();
    let restored = read_from::<2>(&path).unwrap();
    assert_eq!(model_state_hash(&restored), model_state_hash(&model));
}

#[test]
fn test_pack_places_index_zero_lowest() {
    let fmt = QFormat::Q16_16;
    let v = FxpVector::from_raw([0x1122_3344, -1]);
    let bus = pack(&fmt, &v);
    assert_eq!(bus, vec![0x44, 0x33, 0x22, 0x11, 0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(unpack::<2>(&fmt, &bus).unwrap(), v);
}

#[test]
fn test_pack_narrow_words_share_bytes() {
    let q8_4 = QFormat::new(12, 4).unwrap();
    assert_eq!(packed_len(&q8_4, 2), 3);

    let v = FxpVector::from_raw([0x123, -1]);
    let bus = pack(&q8_4, &v);
    assert_eq!(bus, vec![0x23, 0xF1, 0xFF]);
    assert_eq!(unpack::<2>(&q8_4, &bus).unwrap(), v);

    assert!(matches!(
        unpack::<2>(&q8_4, &bus[..2]),
        Err(KernelError::InvalidPayloadLength { expected: 3, found: 2 })
    ));
}

#[test]
fn test_restore_uses_default_warn_streak() {
    let config = ModelConfig {
        saturation_warn_streak: 4,
        ..ModelConfig::default()
    };
    let model = ModelState::<2>::from_config(&config).unwrap();
    assert_eq!(model.warn_streak(), 4);

    let restored: ModelState<2> = decode_state(&encode_state(&model).unwrap()).unwrap();
    assert_eq!(restored.warn_streak(), DEFAULT_SATURATION_STREAK);

    let restored = restored.with_warn_streak(config.saturation_warn_streak);
    assert_eq!(restored.warn_streak(), 4);
    assert_eq!(model_state_hash(&restored), model_state_hash(&model));
}

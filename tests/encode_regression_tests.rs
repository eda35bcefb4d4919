//! Integration tests for QR encoding regression testing
//!
//! These tests verify that encoded symbols have the right geometry, select
//! the expected version, stay deterministic, and decode back to the input
//! through an independent read path (format bits, unmasking, de-interleaving,
//! Reed-Solomon syndromes). Rendered symbols are also scanned with `rqrr`,
//! which carries its own copy of the standard tables.

use rust_qr_encode::encoder::format::{format_bits, read_format_bits};
use rust_qr_encode::encoder::function_mask::FunctionPatterns;
use rust_qr_encode::encoder::tables::{
    byte_capacity, data_codewords, ec_block_info, total_codewords,
};
use rust_qr_encode::encoder::verify::read_back;
use rust_qr_encode::render::{RenderOptions, render_luma};
use rust_qr_encode::{
    ECLevel, EncodeError, MaskPattern, PLACEHOLDER_SIZE, Version, encode, encode_bytes,
    encode_or_placeholder,
};

fn sample_text(len: usize) -> String {
    "The quick brown fox jumps over the lazy dog. 0123456789"
        .chars()
        .cycle()
        .take(len)
        .collect()
}

#[test]
fn test_hello_m_is_version_1() {
    let qr = encode("HELLO", ECLevel::M).unwrap();
    assert_eq!(qr.version, Version::new(1));
    assert_eq!(qr.size(), 21);
    assert_eq!(qr.to_rows().len(), 21);
    assert!(qr.to_rows().iter().all(|row| row.len() == 21));
}

#[test]
fn test_codeword_totals_fill_every_version() {
    for version in Version::all() {
        for level in ECLevel::ALL {
            let info = ec_block_info(version, level);
            assert_eq!(
                data_codewords(version, level) + info.num_blocks * info.ecc_per_block,
                total_codewords(version)
            );
        }
    }
}

#[test]
fn test_round_trip_all_versions_and_levels() {
    for level in ECLevel::ALL {
        for version in Version::all() {
            let len = byte_capacity(version, level);
            let text = sample_text(len);
            let qr = encode(&text, level).unwrap();
            assert_eq!(qr.version, Some(version), "len {len} at {level}");
            assert_eq!(qr.size(), 17 + 4 * version.number() as usize);

            let decoded = read_back(&qr.modules).expect("symbol should read back");
            assert_eq!(decoded.payload, text.as_bytes());
            assert_eq!(decoded.version, version);
            assert_eq!(decoded.ec_level, level);
            assert_eq!(Some(decoded.mask), qr.mask_pattern);
        }
    }
}

#[test]
fn test_round_trip_utf8_and_binary() {
    let text = "héllo wörld ✓";
    let qr = encode(text, ECLevel::Q).unwrap();
    let decoded = read_back(&qr.modules).unwrap();
    assert_eq!(decoded.text(), Some(text));

    let bytes: Vec<u8> = (0..=255u8).step_by(3).collect();
    let qr = encode_bytes(&bytes, ECLevel::L).unwrap();
    assert_eq!(read_back(&qr.modules).unwrap().payload, bytes);
}

#[test]
fn test_multibyte_characters_count_as_bytes() {
    // 7 three-byte characters = 21 bytes, beyond the 14-byte capacity of 1-M
    let text = "✓".repeat(7);
    let qr = encode(&text, ECLevel::M).unwrap();
    assert_eq!(qr.version, Version::new(2));
}

#[test]
fn test_capacity_boundary_level_l() {
    let qr = encode(&"a".repeat(134), ECLevel::L).unwrap();
    assert_eq!(qr.version, Version::new(6));
    assert_eq!(qr.size(), 41);

    let err = encode(&"a".repeat(135), ECLevel::L).unwrap_err();
    assert_eq!(err, EncodeError::DataTooLong { len: 135, max: 134 });

    let fallback = encode_or_placeholder(&"a".repeat(135), ECLevel::L);
    assert_eq!(fallback.size(), PLACEHOLDER_SIZE);
    assert!(fallback.version.is_none());
}

#[test]
fn test_encoding_is_deterministic() {
    let text = sample_text(40);
    for level in ECLevel::ALL {
        let a = encode(&text, level).unwrap();
        let b = encode(&text, level).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_finder_regions_identical_across_inputs() {
    let reference = encode("A", ECLevel::L).unwrap();
    let corner = |qr: &rust_qr_encode::QrCode, ox: usize, oy: usize| -> Vec<bool> {
        (0..8)
            .flat_map(|y| (0..8).map(move |x| (x, y)))
            .map(|(x, y)| qr.modules.get(ox + x, oy + y))
            .collect()
    };
    let expected = corner(&reference, 0, 0);

    let cases = [
        ("HELLO".to_string(), ECLevel::M),
        (sample_text(60), ECLevel::Q),
        (sample_text(100), ECLevel::L),
    ];
    for (text, level) in &cases {
        let qr = encode(text, *level).unwrap();
        let size = qr.size();
        assert_eq!(corner(&qr, 0, 0), expected);
        // Top-right and bottom-left are mirror images of top-left
        let tr: Vec<bool> = (0..8)
            .flat_map(|y| (0..8).map(move |x| (x, y)))
            .map(|(x, y)| qr.modules.get(size - 1 - x, y))
            .collect();
        let bl: Vec<bool> = (0..8)
            .flat_map(|y| (0..8).map(move |x| (x, y)))
            .map(|(x, y)| qr.modules.get(x, size - 1 - y))
            .collect();
        assert_eq!(tr, expected);
        assert_eq!(bl, expected);
    }
}

#[test]
fn test_function_patterns_survive_masking() {
    let qr = encode(&sample_text(50), ECLevel::H).unwrap();
    assert_eq!(qr.version, Version::new(6));
    let version = qr.version.unwrap();
    let func = FunctionPatterns::new(version);
    let size = qr.size();
    for y in 0..size {
        for x in 0..size {
            // Format areas carry the committed format word; everything else is fixed
            let is_format_row = y == 8 && (x <= 8 || x >= size - 8);
            let is_format_col = x == 8 && (y <= 8 || y >= size - 7);
            if func.is_function(x, y) && !is_format_row && !is_format_col {
                assert_eq!(qr.modules.get(x, y), func.modules().get(x, y), "({x}, {y})");
            }
        }
    }
    assert!(qr.modules.get(8, 4 * version.number() as usize + 9));
}

#[test]
fn test_format_bits_written_twice() {
    let qr = encode("format", ECLevel::M).unwrap();
    let mask = qr.mask_pattern.unwrap();
    let expected = format_bits(ECLevel::M, mask);
    assert_eq!(read_format_bits(&qr.modules, 0), expected);
    assert_eq!(read_format_bits(&qr.modules, 1), expected);
    assert_eq!(format_bits(ECLevel::M, MaskPattern::Pattern0), 0b101010000010010);
}

// (data codewords, blocks, ec codewords per block) for versions 1-6, in
// L, M, Q, H order.
const STANDARD_LAYOUTS: [[(usize, usize, usize); 6]; 4] = [
    [(19, 1, 7), (34, 1, 10), (55, 1, 15), (80, 1, 20), (108, 1, 26), (136, 2, 18)],
    [(16, 1, 10), (28, 1, 16), (44, 1, 26), (64, 2, 18), (86, 2, 24), (108, 4, 16)],
    [(13, 1, 13), (22, 1, 22), (34, 2, 18), (48, 2, 26), (62, 4, 18), (76, 4, 24)],
    [(9, 1, 17), (16, 1, 28), (26, 2, 22), (36, 4, 16), (46, 4, 22), (60, 4, 28)],
];

#[test]
fn test_block_layouts_match_standard() {
    for (level, row) in ECLevel::ALL.into_iter().zip(STANDARD_LAYOUTS) {
        for (version, (data, blocks, ecc)) in Version::all().zip(row) {
            let info = ec_block_info(version, level);
            assert_eq!(data_codewords(version, level), data, "{version}-{level}");
            assert_eq!(info.num_blocks, blocks, "{version}-{level}");
            assert_eq!(info.ecc_per_block, ecc, "{version}-{level}");
        }
    }
}

fn scan(text: &str, level: ECLevel) -> (rqrr::MetaData, String) {
    let qr = encode(text, level).unwrap();
    let options = RenderOptions {
        module_pixels: 4,
        quiet_zone: 4,
        ..RenderOptions::default()
    };
    let img = render_luma(&qr.modules, &options);
    let (w, h) = (img.width() as usize, img.height() as usize);
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(w, h, |x, y| {
        img.get_pixel(x as u32, y as u32)[0]
    });
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "one symbol expected for {:?}", text);
    grids[0].decode().unwrap()
}

#[test]
fn test_external_decoder_reads_every_version_and_level() {
    for version in Version::all() {
        for level in ECLevel::ALL {
            let text = sample_text(byte_capacity(version, level));
            let (meta, content) = scan(&text, level);
            assert_eq!(content, text, "{version}-{level}");
            assert_eq!(meta.version.0, version.number() as usize, "{version}-{level}");
            assert_eq!(meta.ecc_level, level.format_bits() as u16, "{version}-{level}");
        }
    }
}

#[test]
fn test_external_decoder_reads_short_payloads() {
    for text in ["HELLO", "https://example.com/path?q=1", "a"] {
        let expected = encode(text, ECLevel::M).unwrap().version.unwrap();
        let (meta, content) = scan(text, ECLevel::M);
        assert_eq!(content, text);
        assert_eq!(meta.version.0, expected.number() as usize);
    }
}

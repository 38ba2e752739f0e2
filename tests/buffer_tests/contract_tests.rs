//! Tests for the Buffer contract shared by every variant
//!
//! Each check is written once against `Buffer` and run over both the
//! file-backed and the memory-backed views:
//! - Cursor bounds (position, advance)
//! - Relative reads advance by the value width
//! - Absolute reads leave the cursor alone
//! - Slices get their own cursor
//! - Out-of-range requests are precondition violations

use atlasbuf::buffer::compare;
use atlasbuf::{AtlasError, Buffer};
use std::cmp::Ordering;

use super::common::{file_buffer, memory_buffer, ramp};

/// Run `check` once over a file-backed and once over a memory-backed view
macro_rules! both_variants {
    ($name:ident, $bytes:expr, $check:ident) => {
        mod $name {
            use super::*;

            #[test]
            fn file() {
                let (_temp, buf) = file_buffer(&$bytes);
                $check(buf);
            }

            #[test]
            fn memory() {
                $check(memory_buffer(&$bytes));
            }
        }
    };
}

// =============================================================================
// Cursor
// =============================================================================

fn check_position_bounds<B: Buffer + std::fmt::Debug>(mut buf: B) {
    assert_eq!(buf.position(), 0);
    assert_eq!(buf.limit(), 10);

    buf.set_position(10).unwrap();
    assert_eq!(buf.remaining(), 0);
    assert!(!buf.has_remaining());

    let err = buf.set_position(11).unwrap_err();
    assert!(err.is_precondition());
    // Failed move leaves the cursor where it was
    assert_eq!(buf.position(), 10);
}

both_variants!(position_bounds, ramp(10), check_position_bounds);

fn check_advance_bounds<B: Buffer + std::fmt::Debug>(mut buf: B) {
    buf.advance(3).unwrap().advance(7).unwrap();
    assert_eq!(buf.position(), 10);

    buf.set_position(5).unwrap();
    assert!(buf.advance(6).unwrap_err().is_precondition());
    assert_eq!(buf.position(), 5);
    assert!(buf.advance(u64::MAX).is_err());
}

both_variants!(advance_bounds, ramp(10), check_advance_bounds);

// =============================================================================
// Relative vs Absolute Reads
// =============================================================================

fn check_relative_reads_advance<B: Buffer>(mut buf: B) {
    assert_eq!(buf.get().unwrap(), 0x01);
    assert_eq!(buf.position(), 1);

    assert_eq!(buf.get_int().unwrap(), -2);
    assert_eq!(buf.position(), 5);

    assert_eq!(buf.get_long().unwrap(), 0x0102_0304_0506_0708);
    assert_eq!(buf.position(), 13);

    let mut dst = [0u8; 4];
    buf.get_into(&mut dst[1..3]).unwrap();
    assert_eq!(dst, [0, 0xAB, 0xCD, 0]);
    assert_eq!(buf.position(), 15);
    assert!(!buf.has_remaining());
}

fn relative_bytes() -> Vec<u8> {
    let mut bytes = vec![0x01];
    bytes.extend_from_slice(&(-2i32).to_be_bytes());
    bytes.extend_from_slice(&0x0102_0304_0506_0708i64.to_be_bytes());
    bytes.extend_from_slice(&[0xAB, 0xCD]);
    bytes
}

both_variants!(relative_reads_advance, relative_bytes(), check_relative_reads_advance);

fn check_absolute_reads_keep_cursor<B: Buffer>(mut buf: B) {
    buf.set_position(3).unwrap();

    assert_eq!(buf.get_at(9).unwrap(), 9);
    assert_eq!(buf.get_int_at(0).unwrap(), 0x0001_0203);
    assert_eq!(buf.get_long_at(2).unwrap(), 0x0203_0405_0607_0809);

    let mut dst = [0u8; 3];
    buf.read_at(7, &mut dst).unwrap();
    assert_eq!(dst, [7, 8, 9]);

    assert_eq!(buf.position(), 3);
}

both_variants!(absolute_reads_keep_cursor, ramp(10), check_absolute_reads_keep_cursor);

fn check_repeated_absolute_reads_agree<B: Buffer>(buf: B) {
    let first = buf.get_long_at(1).unwrap();
    for _ in 0..10 {
        assert_eq!(buf.get_long_at(1).unwrap(), first);
    }
    assert_eq!(buf.to_vec().unwrap(), ramp(16));
}

both_variants!(repeated_absolute_reads_agree, ramp(16), check_repeated_absolute_reads_agree);

fn check_reads_past_limit_fail<B: Buffer>(mut buf: B) {
    assert!(buf.get_at(10).unwrap_err().is_precondition());
    assert!(buf.get_int_at(7).unwrap_err().is_precondition());
    assert!(buf.get_long_at(3).unwrap_err().is_precondition());
    assert!(buf.get_long_at(u64::MAX).is_err());

    let mut dst = [0u8; 4];
    assert!(buf.read_at(8, &mut dst).unwrap_err().is_precondition());

    buf.set_position(7).unwrap();
    assert!(matches!(buf.get_int(), Err(AtlasError::Precondition(_))));
    assert!(buf.get_long().is_err());
    assert!(buf.get_into(&mut dst).is_err());
    // Failed relative reads do not move the cursor
    assert_eq!(buf.position(), 7);

    buf.set_position(10).unwrap();
    assert!(buf.get().unwrap_err().is_precondition());
}

both_variants!(reads_past_limit_fail, ramp(10), check_reads_past_limit_fail);

// =============================================================================
// Slicing
// =============================================================================

/// 10-byte medium sliced as (2, 4)
fn check_slice_window<B: Buffer>(buf: B) {
    let mut child = buf.slice(2, 4).unwrap();

    assert_eq!(child.limit(), 4);
    assert_eq!(child.position(), 0);
    assert_eq!(child.get_int_at(0).unwrap(), 0x0203_0405);

    child.set_position(0).unwrap();
    child.get_int().unwrap();
    assert_eq!(child.position(), 4);
    assert!(!child.has_remaining());
}

both_variants!(slice_window, ramp(10), check_slice_window);

fn check_slice_cursor_isolation<B: Buffer>(mut parent: B) {
    parent.set_position(6).unwrap();
    let mut child = parent.slice(1, 8).unwrap();
    assert_eq!(child.position(), 0);

    child.advance(5).unwrap();
    assert_eq!(parent.position(), 6);

    parent.set_position(0).unwrap();
    assert_eq!(child.position(), 5);
    assert_eq!(child.get().unwrap(), 6);
}

both_variants!(slice_cursor_isolation, ramp(10), check_slice_cursor_isolation);

fn check_slice_bounds<B: Buffer + std::fmt::Debug>(buf: B) {
    assert!(buf.slice(0, 10).is_ok());
    assert_eq!(buf.slice(10, 0).unwrap().limit(), 0);

    assert!(buf.slice(0, 11).unwrap_err().is_precondition());
    assert!(buf.slice(11, 0).unwrap_err().is_precondition());
    assert!(buf.slice(5, 6).unwrap_err().is_precondition());
    assert!(buf.slice(1, u64::MAX).unwrap_err().is_precondition());

    // Child bounds are relative to the child, not the medium
    let child = buf.slice(4, 4).unwrap();
    assert!(child.slice(0, 5).is_err());
    assert_eq!(child.slice(1, 3).unwrap().to_vec().unwrap(), vec![5, 6, 7]);
}

both_variants!(slice_bounds, ramp(10), check_slice_bounds);

fn check_slice_relative_forms<B: Buffer + std::fmt::Debug>(mut buf: B) {
    buf.set_position(3).unwrap();

    let next = buf.slice_next(2).unwrap();
    assert_eq!(next.to_vec().unwrap(), vec![3, 4]);

    let rest = buf.slice_remaining().unwrap();
    assert_eq!(rest.limit(), 7);
    assert_eq!(rest.get_at(0).unwrap(), 3);

    assert!(buf.slice_next(8).unwrap_err().is_precondition());
    assert_eq!(buf.position(), 3);
}

both_variants!(slice_relative_forms, ramp(10), check_slice_relative_forms);

// =============================================================================
// Cross-variant Comparison
// =============================================================================

#[test]
fn test_compare_file_against_memory() {
    let (_temp, file) = file_buffer(b"prefix-apple");
    let memory = memory_buffer(b"banana");

    let apple = file.slice(7, 5).unwrap();
    assert_eq!(compare(&apple, &memory).unwrap(), Ordering::Less);
    assert_eq!(compare(&memory, &apple).unwrap(), Ordering::Greater);
    assert_eq!(
        compare(&apple, &memory_buffer(b"apple")).unwrap(),
        Ordering::Equal
    );
}

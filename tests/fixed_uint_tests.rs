use exactpred::{Error, FixedUInt};
use num_bigint::BigUint;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

const N: usize = 8;

type U = FixedUInt<N>;

fn from_limbs(limbs: &[u32]) -> U {
    let limbs = &limbs[..limbs.len().min(N)];
    U::from_blocks(limbs).expect("at most N limbs")
}

fn to_big(value: &U) -> BigUint {
    BigUint::from_slice(value.blocks())
}

#[test]
fn scenario_sixty_four_bit_word() {
    let value = U::from_u64(0xFFFF_FFFF_FFFF_FFFF);
    assert_eq!(value.num_bits(), 64);
    assert_eq!(value.num_blocks(), 2);
    assert_eq!(value.blocks(), &[0xFFFF_FFFF, 0xFFFF_FFFF]);

    let mut record = Vec::new();
    value.write(&mut record).unwrap();
    let restored = U::read(&mut record.as_slice()).unwrap();
    assert_eq!(restored, value);
    assert_eq!(restored.num_bits(), 64);
    assert_eq!(restored.num_blocks(), 2);
}

#[quickcheck]
fn write_read_round_trip(limbs: Vec<u32>) -> bool {
    let value = from_limbs(&limbs);
    let mut record = Vec::new();
    value.write(&mut record).unwrap();
    let restored = U::read(&mut record.as_slice()).unwrap();
    restored == value
        && restored.num_bits() == value.num_bits()
        && restored.num_blocks() == value.num_blocks()
        && restored.blocks() == value.blocks()
}

#[quickcheck]
fn round_trip_into_wider_capacity(limbs: Vec<u32>) -> bool {
    let value = from_limbs(&limbs);
    let mut record = Vec::new();
    value.write(&mut record).unwrap();
    let restored = FixedUInt::<{ 2 * N }>::read(&mut record.as_slice()).unwrap();
    restored == value.widen()
}

#[test]
fn oversized_record_is_a_precision_error() {
    let value = U::from_blocks(&[1, 2, 3, 4, 5]).unwrap();
    let mut record = Vec::new();
    value.write(&mut record).unwrap();
    match FixedUInt::<4>::read(&mut record.as_slice()) {
        Err(Error::Precision(err)) => {
            assert_eq!(err.required_blocks, 5);
            assert_eq!(err.capacity, 4);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[quickcheck]
fn addition_matches_biguint(lhs: Vec<u32>, rhs: Vec<u32>) -> bool {
    // Half capacity each so the sum always fits.
    let lhs = from_limbs(&lhs[..lhs.len().min(N / 2)]);
    let rhs = from_limbs(&rhs[..rhs.len().min(N / 2)]);
    let mut sum = U::zero();
    sum.add(&lhs, &rhs);
    to_big(&sum) == to_big(&lhs) + to_big(&rhs)
}

#[quickcheck]
fn subtraction_matches_biguint(lhs: Vec<u32>, rhs: Vec<u32>) -> bool {
    let (lhs, rhs) = (from_limbs(&lhs), from_limbs(&rhs));
    let (big, small) = if lhs >= rhs { (lhs, rhs) } else { (rhs, lhs) };
    let mut difference = U::zero();
    difference.sub(&big, &small);
    to_big(&difference) == to_big(&big) - to_big(&small)
}

#[quickcheck]
fn multiplication_matches_biguint(lhs: Vec<u32>, rhs: Vec<u32>) -> bool {
    let lhs = from_limbs(&lhs[..lhs.len().min(N / 2)]);
    let rhs = from_limbs(&rhs[..rhs.len().min(N / 2)]);
    let mut product = U::zero();
    product.mul(&lhs, &rhs);
    to_big(&product) == to_big(&lhs) * to_big(&rhs)
}

#[quickcheck]
fn shifts_match_biguint(limbs: Vec<u32>, shift: u8) -> TestResult {
    let value = from_limbs(&limbs[..limbs.len().min(N / 2)]);
    let shift = u32::from(shift % 128);
    let mut shifted = U::zero();
    shifted.shift_left(&value, shift);
    if to_big(&shifted) != to_big(&value) << shift {
        return TestResult::failed();
    }
    let mut back = U::zero();
    back.shift_right(&shifted, shift);
    TestResult::from_bool(back == value)
}

#[quickcheck]
fn comparison_matches_biguint(lhs: Vec<u32>, rhs: Vec<u32>) -> bool {
    let (lhs, rhs) = (from_limbs(&lhs), from_limbs(&rhs));
    lhs.cmp(&rhs) == to_big(&lhs).cmp(&to_big(&rhs))
}

#[test]
fn odd_part_and_round_up() {
    let mut odd = U::zero();
    let shift = odd.shift_right_to_odd(&U::from_u64(0x28 << 40));
    assert_eq!(shift, 43);
    assert_eq!(odd, U::from_u32(5));

    let mut all_ones = U::from_u64(u64::MAX);
    all_ones.round_up();
    assert_eq!(all_ones.blocks(), &[0, 0, 1]);
    assert_eq!(all_ones.num_bits(), 65);
}

#[test]
fn try_set_num_bits_reports_capacity() {
    let mut value = FixedUInt::<2>::zero();
    assert!(value.try_set_num_bits(64).is_ok());
    let err = value.try_set_num_bits(65).unwrap_err();
    assert_eq!(err.required_blocks, 3);
    assert_eq!(err.capacity, 2);
    assert_eq!(value.num_bits(), 64);
}

#[test]
#[should_panic(expected = "precision configuration error")]
fn product_past_capacity_is_fatal() {
    let factor = FixedUInt::<2>::from_u64(u64::MAX);
    let mut product = FixedUInt::<2>::zero();
    product.mul(&factor, &factor);
}

#[test]
#[should_panic(expected = "overflow")]
fn carry_past_capacity_is_fatal() {
    let mut value = FixedUInt::<2>::from_u64(u64::MAX);
    value.round_up();
}

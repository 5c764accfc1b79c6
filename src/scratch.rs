//! Reusable exact registers for the exact phase of a predicate.
//!
//! Each evaluator owns one [`ScratchNodes`] and runs a fixed program over it:
//! load the inputs into the first slots, then write every intermediate into a
//! slot whose previous value is dead. The arena tracks how many slots have
//! been written since [`ScratchNodes::begin`]. Reading past that prefix, or
//! writing a slot that would leave a gap, is a defect in the program and
//! panics, so no evaluation can observe a value left over from an earlier
//! call.

use crate::float::FilterFloat;
use crate::{Dyadic, Sign};
use std::mem;

pub(crate) struct ScratchNodes<const N: usize> {
    nodes: Vec<Dyadic<N>>,
    /// Destination of the current operation, swapped into place afterwards so
    /// a slot may be both an operand and the result.
    spare: Dyadic<N>,
    len: usize,
    high_water: usize,
    /// Widest magnitude produced since the last `begin`, including values
    /// that were later overwritten and the alignment of summands.
    max_blocks: usize,
}

impl<const N: usize> ScratchNodes<N> {
    pub fn new(count: usize) -> Self {
        Self {
            nodes: (0..count).map(|_| Dyadic::zero()).collect(),
            spare: Dyadic::zero(),
            len: 0,
            high_water: 0,
            max_blocks: 0,
        }
    }

    /// Starts a new evaluation. Slot contents are kept but become unreadable.
    #[inline]
    pub fn begin(&mut self) {
        self.len = 0;
        self.max_blocks = 0;
    }

    /// Slots written since the last [`begin`](Self::begin).
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Largest number of slots any evaluation has written.
    #[inline]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Largest limb count any value of the current evaluation needed.
    #[inline]
    pub fn max_blocks(&self) -> usize {
        self.max_blocks
    }

    #[inline]
    pub fn get(&self, slot: usize) -> &Dyadic<N> {
        self.check_readable(slot);
        &self.nodes[slot]
    }

    #[inline]
    pub fn sign(&self, slot: usize) -> Sign {
        self.get(slot).sign()
    }

    /// Loads an input float.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not finite.
    pub fn set_float<T: FilterFloat>(&mut self, slot: usize, value: T) {
        self.mark_written(slot);
        if let Err(err) = self.nodes[slot].set_float(value) {
            panic!("{err}");
        }
        self.record_blocks(self.nodes[slot].magnitude().num_blocks());
    }

    /// Loads a caller-supplied exact input.
    pub fn set(&mut self, slot: usize, value: &Dyadic<N>) {
        self.mark_written(slot);
        self.nodes[slot].clone_from(value);
        self.record_blocks(value.magnitude().num_blocks());
    }

    pub fn add(&mut self, dst: usize, lhs: usize, rhs: usize) {
        self.record_alignment(lhs, rhs);
        self.apply(dst, lhs, rhs, Dyadic::set_sum);
    }

    pub fn sub(&mut self, dst: usize, lhs: usize, rhs: usize) {
        self.record_alignment(lhs, rhs);
        self.apply(dst, lhs, rhs, Dyadic::set_difference);
    }

    pub fn mul(&mut self, dst: usize, lhs: usize, rhs: usize) {
        self.apply(dst, lhs, rhs, Dyadic::set_product);
    }

    #[inline]
    fn apply(
        &mut self,
        dst: usize,
        lhs: usize,
        rhs: usize,
        op: fn(&mut Dyadic<N>, &Dyadic<N>, &Dyadic<N>),
    ) {
        self.check_readable(lhs);
        self.check_readable(rhs);
        op(&mut self.spare, &self.nodes[lhs], &self.nodes[rhs]);
        self.record_blocks(self.spare.magnitude().num_blocks());
        self.mark_written(dst);
        mem::swap(&mut self.spare, &mut self.nodes[dst]);
    }

    fn record_alignment(&mut self, lhs: usize, rhs: usize) {
        let blocks = self.get(lhs).aligned_blocks(self.get(rhs));
        self.record_blocks(blocks);
    }

    #[inline]
    fn record_blocks(&mut self, blocks: usize) {
        self.max_blocks = self.max_blocks.max(blocks);
    }

    #[inline]
    fn check_readable(&self, slot: usize) {
        assert!(
            slot < self.len,
            "scratch slot {slot} read before it was written ({} written)",
            self.len
        );
    }

    fn mark_written(&mut self, slot: usize) {
        assert!(
            slot <= self.len,
            "scratch slot {slot} written before slot {}",
            self.len
        );
        assert!(
            slot < self.nodes.len(),
            "scratch slot {slot} out of {} slots",
            self.nodes.len()
        );
        if slot == self.len {
            self.len += 1;
            self.high_water = self.high_water.max(self.len);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_may_be_operand_and_result() {
        let mut nodes = ScratchNodes::<4>::new(3);
        nodes.begin();
        nodes.set_float(0, 1.5_f64);
        nodes.set_float(1, -0.25_f64);
        nodes.mul(0, 0, 1);
        nodes.sub(1, 0, 1);
        assert_eq!(nodes.get(0), &Dyadic::from_float(-0.375_f64));
        assert_eq!(nodes.get(1), &Dyadic::from_float(-0.125_f64));
        nodes.add(2, 1, 1);
        assert_eq!(nodes.sign(2), Sign::Negative);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes.high_water(), 3);
    }

    #[test]
    #[should_panic(expected = "read before it was written")]
    fn stale_slots_are_unreadable() {
        let mut nodes = ScratchNodes::<4>::new(2);
        nodes.begin();
        nodes.set_float(0, 1.0_f64);
        nodes.set_float(1, 2.0_f64);
        nodes.begin();
        nodes.set_float(0, 3.0_f64);
        nodes.add(0, 0, 1);
    }

    #[test]
    #[should_panic(expected = "written before slot")]
    fn writes_must_extend_the_prefix() {
        let mut nodes = ScratchNodes::<4>::new(4);
        nodes.begin();
        nodes.set_float(0, 1.0_f64);
        nodes.set_float(2, 1.0_f64);
    }

    #[test]
    fn high_water_survives_restarts() {
        let mut nodes = ScratchNodes::<4>::new(3);
        nodes.begin();
        for slot in 0..3 {
            nodes.set(slot, &Dyadic::from(slot as u64));
        }
        nodes.begin();
        nodes.set_float(0, 0.5_f32);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes.high_water(), 3);
        assert_eq!(nodes.max_blocks(), 1);
    }

    #[test]
    fn max_blocks_counts_overwritten_values() {
        let mut nodes = ScratchNodes::<4>::new(2);
        nodes.begin();
        nodes.set(0, &Dyadic::from(u64::MAX));
        nodes.set_float(1, 3.0_f64);
        nodes.mul(0, 1, 1);
        assert_eq!(nodes.get(0), &Dyadic::from(9u64));
        assert_eq!(nodes.max_blocks(), 2);
    }

    #[test]
    fn max_blocks_counts_summand_alignment() {
        // 2^64 - (2^64 - 1): both inputs and the result are narrower than
        // the 65-bit aligned operand.
        let mut nodes = ScratchNodes::<4>::new(2);
        nodes.begin();
        nodes.set_float(0, 2f64.powi(64));
        nodes.set(1, &Dyadic::from(u64::MAX));
        nodes.sub(0, 0, 1);
        assert_eq!(nodes.get(0), &Dyadic::from(1u64));
        assert_eq!(nodes.max_blocks(), 3);

        nodes.begin();
        nodes.set_float(0, 0.5_f32);
        assert_eq!(nodes.max_blocks(), 1);
    }

    #[test]
    #[should_panic(expected = "non-finite")]
    fn nan_input_panics() {
        let mut nodes = ScratchNodes::<4>::new(1);
        nodes.begin();
        nodes.set_float(0, f64::NAN);
    }
}

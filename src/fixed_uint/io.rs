//! Binary record `[num_bits: u32][num_blocks: u32][num_blocks x u32]` in native
//! byte order. This is a scratch/cache layout: writer and reader must agree on
//! the capacity and the machine's endianness.

use super::{FixedUInt, blocks_for_bits};
use crate::Error;
use std::io::{Read, Write};
use tracing::debug;

impl<const N: usize> FixedUInt<N> {
    /// Writes the occupied limbs and the length header.
    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.num_bits.to_ne_bytes())?;
        writer.write_all(&(self.num_blocks as u32).to_ne_bytes())?;
        for limb in self.blocks() {
            writer.write_all(&limb.to_ne_bytes())?;
        }
        Ok(())
    }

    /// Reads a record written by [`FixedUInt::write`].
    ///
    /// Rejects headers whose block count disagrees with the bit count, records
    /// that need more than `N` limbs, and limbs whose leading bit does not match
    /// the stored bit count.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, Error> {
        let num_bits = read_u32(reader)?;
        let num_blocks = read_u32(reader)? as usize;
        if num_blocks != blocks_for_bits(num_bits) {
            debug!(num_bits, num_blocks, "rejecting FixedUInt record header");
            return Err(Error::CorruptRecord("block count does not match bit count"));
        }
        let mut result = Self::zero();
        result.try_set_num_bits(num_bits)?;
        for limb in &mut result.limbs[..num_blocks] {
            *limb = read_u32(reader)?;
        }
        let stored = (result.num_bits, result.num_blocks);
        result.normalize(num_blocks);
        if (result.num_bits, result.num_blocks) != stored {
            debug!(num_bits, "rejecting FixedUInt record with inconsistent leading limb");
            return Err(Error::CorruptRecord("leading limb does not match bit count"));
        }
        Ok(result)
    }
}

fn read_u32<R: Read>(reader: &mut R) -> std::io::Result<u32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_ne_bytes(bytes))
}

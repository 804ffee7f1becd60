use std::fmt::Debug;

/// Fixed-size bit set. The planner keeps one per module, one bit per entry point.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BitSet {
  entries: Vec<u8>,
}

impl BitSet {
  pub fn new(max_bit_count: u32) -> Self {
    Self { entries: vec![0u8; max_bit_count.div_ceil(8) as usize] }
  }

  pub fn has_bit(&self, bit: u32) -> bool {
    self.entries[bit as usize / 8] & (1 << (bit & 7)) != 0
  }

  pub fn set_bit(&mut self, bit: u32) {
    self.entries[bit as usize / 8] |= 1 << (bit & 7);
  }

  pub fn union(&mut self, other: &Self) {
    for (a, b) in self.entries.iter_mut().zip(&other.entries) {
      *a |= *b;
    }
  }

  pub fn bit_count(&self) -> u32 {
    self.entries.iter().map(|byte| byte.count_ones()).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.iter().all(|byte| *byte == 0)
  }

  /// Indexes of the set bits, ascending.
  pub fn index_of_one(&self) -> Vec<u32> {
    let mut ones = Vec::with_capacity(self.bit_count() as usize);
    for (byte_idx, byte) in self.entries.iter().enumerate() {
      for offset in 0..8u32 {
        if byte & (1 << offset) != 0 {
          ones.push(u32::try_from(byte_idx).unwrap_or(u32::MAX) * 8 + offset);
        }
      }
    }
    ones
  }
}

impl Debug for BitSet {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let bits = self.entries.iter().rev().map(|byte| format!("{byte:08b}")).collect::<String>();
    f.debug_tuple("BitSet").field(&bits).finish()
  }
}

#[cfg(test)]
mod tests {
  use super::BitSet;

  #[test]
  fn set_and_query_bits() {
    let mut bits = BitSet::new(10);
    assert!(bits.is_empty());
    bits.set_bit(0);
    bits.set_bit(9);
    assert!(bits.has_bit(0));
    assert!(bits.has_bit(9));
    assert!(!bits.has_bit(5));
    assert_eq!(bits.bit_count(), 2);
    assert_eq!(bits.index_of_one(), vec![0, 9]);
  }

  #[test]
  fn union_merges_bits() {
    let mut a = BitSet::new(3);
    let mut b = BitSet::new(3);
    a.set_bit(0);
    b.set_bit(2);
    a.union(&b);
    assert_eq!(a.index_of_one(), vec![0, 2]);
  }
}

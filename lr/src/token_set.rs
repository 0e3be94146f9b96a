use std::fmt;
use bitvec::prelude::*;
use grammar::TerminalId;

/// A fixed-capacity set of terminals, one bit per terminal id.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TerminalSet {
  bits: BitVec,
}

impl TerminalSet {
  pub fn new(num_terminals: usize) -> Self {
    Self {
      bits: bitvec![0; num_terminals],
    }
  }

  pub fn from_terminal(num_terminals: usize, t: TerminalId) -> Self {
    let mut set = Self::new(num_terminals);
    set.insert(t);
    set
  }

  pub fn capacity(&self) -> usize {
    self.bits.len()
  }

  /// Returns `true` if `t` was not already a member.
  pub fn insert(&mut self, t: TerminalId) -> bool {
    !self.bits.replace(t.index(), true)
  }

  pub fn contains(&self, t: TerminalId) -> bool {
    self.bits.get(t.index()).map_or(false, |bit| *bit)
  }

  /// Returns `true` if the set grew.
  pub fn union_with(&mut self, other: &TerminalSet) -> bool {
    debug_assert_eq!(self.bits.len(), other.bits.len());
    let mut changed = false;
    for (a, b) in self.bits.as_raw_mut_slice().iter_mut().zip(other.bits.as_raw_slice()) {
      let new = *a | *b;
      changed |= new != *a;
      *a = new;
    }
    changed
  }

  pub fn clear(&mut self) {
    self.bits.fill(false);
  }

  pub fn len(&self) -> usize {
    self.bits.count_ones()
  }

  pub fn is_empty(&self) -> bool {
    self.bits.not_any()
  }

  pub fn iter(&self) -> impl Iterator<Item = TerminalId> + '_ {
    self.bits.iter_ones().map(|i| TerminalId::new(i as u32))
  }
}

impl fmt::Debug for TerminalSet {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_set().entries(self.bits.iter_ones()).finish()
  }
}

//! Bit stacks recording, per enclosing construct, whether a `do` belongs to a
//! loop condition (`cond`) or to a command call's arguments (`cmdarg`).
//!
//! An empty stack reads as all-false, so popping past the bottom is harmless.

use std::fmt;

use smallvec::SmallVec;

#[derive(Clone, Default, PartialEq, Eq)]
pub(crate) struct StackState {
    name: &'static str,
    bits: SmallVec<[bool; 16]>,
}

impl StackState {
    pub(crate) fn new(name: &'static str) -> Self {
        StackState {
            name,
            bits: SmallVec::new(),
        }
    }

    pub(crate) fn push(&mut self, bit: bool) -> bool {
        self.bits.push(bit);
        bit
    }

    pub(crate) fn pop(&mut self) -> bool {
        self.bits.pop().unwrap_or(false)
    }

    /// Pop the top bit and fold it into the new top.
    pub(crate) fn lexpop(&mut self) -> bool {
        let top = self.pop();
        match self.bits.last_mut() {
            Some(last) => *last |= top,
            None if top => self.bits.push(true),
            None => {}
        }
        self.active()
    }

    #[inline]
    pub(crate) fn active(&self) -> bool {
        self.bits.last().copied().unwrap_or(false)
    }

    pub(crate) fn clear(&mut self) {
        self.bits.clear();
    }
}

impl fmt::Debug for StackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.name)?;
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests;
